use hk_property_core::stamp_duty::schedule::{
    band_for_price, calculate_stamp_duty, schedule_duty, AVD_SCALE_2,
};
use hk_property_core::BuyerType;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Band seams
// ===========================================================================

#[test]
fn test_band_seams_are_continuous() {
    // At every upper bound, the next band's formula evaluated at the bound
    // must agree with the lower band's duty to within a dollar.
    for pair in AVD_SCALE_2.windows(2) {
        let bound = pair[0].upper_bound.unwrap();
        let from_below = schedule_duty(bound);
        let from_above = pair[1].formula.exact_duty(bound);
        assert!(
            (from_below - from_above).abs() <= dec!(1),
            "seam at {bound}: below {from_below}, above {from_above}"
        );
    }
}

#[test]
fn test_reference_amounts_at_thresholds() {
    let cases = [
        (dec!(4000000), dec!(100)),
        (dec!(4323780), dec!(64856)),
        (dec!(4500000), dec!(67500)),
        (dec!(4935480), dec!(111048)),
        (dec!(6000000), dec!(135000)),
        (dec!(6642860), dec!(199286)),
        (dec!(9000000), dec!(270000)),
        (dec!(10080000), dec!(378000)),
        (dec!(20000000), dec!(750000)),
    ];
    for (price, expected) in cases {
        assert_eq!(schedule_duty(price), expected, "price {price}");
    }
}

#[test]
fn test_just_above_threshold_is_not_cheaper() {
    for band in AVD_SCALE_2.iter().filter(|b| b.upper_bound.is_some()) {
        let bound = band.upper_bound.unwrap();
        assert!(schedule_duty(bound + dec!(1)) >= schedule_duty(bound));
        assert!(schedule_duty(bound + dec!(0.01)) >= schedule_duty(bound));
    }
}

#[test]
fn test_fractional_price_units_map_to_band() {
    // 432.378 units is exactly the second band's upper bound
    let price = dec!(432.378) * dec!(10000);
    assert_eq!(band_for_price(price).index, 2);
}

#[test]
fn test_refund_flag_for_first_time_permanent_resident() {
    let result = calculate_stamp_duty(dec!(8000000), BuyerType::PermanentResident, true);
    assert_eq!(result.amount, dec!(240000));
    assert!(result.refund_eligible);
}

// ===========================================================================
// Properties
// ===========================================================================

fn price_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..40_000_000i64).prop_map(Decimal::from)
}

fn cents_price_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..4_000_000_000i64).prop_map(|x| Decimal::new(x, 2))
}

proptest! {
    /// Duty never falls as price rises
    #[test]
    fn duty_is_monotone(a in price_strategy(), b in price_strategy()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(schedule_duty(lo) <= schedule_duty(hi));
    }

    /// Duty is a whole number no smaller than the exact formula
    #[test]
    fn duty_is_ceiling_of_exact(price in cents_price_strategy()) {
        let exact = band_for_price(price).formula.exact_duty(price);
        let duty = schedule_duty(price);
        prop_assert_eq!(duty, duty.trunc());
        prop_assert!(duty >= exact);
        prop_assert!(duty - exact < Decimal::ONE);
    }

    /// Residency and first-home status never change the amount
    #[test]
    fn refund_flag_is_informational(price in price_strategy(), first in any::<bool>()) {
        let hkpr = calculate_stamp_duty(price, BuyerType::PermanentResident, first);
        let non = calculate_stamp_duty(price, BuyerType::NonPermanentResident, first);
        prop_assert_eq!(hkpr.amount, non.amount);
        prop_assert_eq!(hkpr.refund_eligible, first);
        prop_assert!(!non.refund_eligible);
    }
}
