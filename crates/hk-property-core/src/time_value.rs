use rust_decimal::Decimal;

use crate::error::PropertyCalcError;
use crate::types::{Money, Rate};
use crate::CalcResult;

/// `base^exp` by repeated squaring, failing instead of panicking on overflow.
///
/// The base is only squared while higher exponent bits remain, so an
/// overflowing square always means the full power overflows too.
fn checked_powu(base: Decimal, exp: u32, context: &str) -> CalcResult<Decimal> {
    let mut result = Decimal::ONE;
    let mut b = base;
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result = result
                .checked_mul(b)
                .ok_or_else(|| PropertyCalcError::overflow(context))?;
        }
        e >>= 1;
        if e > 0 {
            b = b
                .checked_mul(b)
                .ok_or_else(|| PropertyCalcError::overflow(context))?;
        }
    }
    Ok(result)
}

/// (1 + rate)^periods in exact decimal arithmetic.
pub fn compound_factor(rate: Rate, periods: u32) -> CalcResult<Decimal> {
    let one_plus_r = Decimal::ONE
        .checked_add(rate)
        .ok_or_else(|| PropertyCalcError::overflow("compound factor"))?;
    checked_powu(one_plus_r, periods, "compound factor")
}

/// Future value of a lump sum growing at `rate` per period.
pub fn future_value(present_value: Money, rate: Rate, periods: u32) -> CalcResult<Money> {
    present_value
        .checked_mul(compound_factor(rate, periods)?)
        .ok_or_else(|| PropertyCalcError::overflow("future value"))
}

/// Level payment that fully amortises `principal` over `periods`:
/// P * r / (1 - (1+r)^-n)
///
/// Discounting rather than compounding keeps long terms at high rates
/// representable. A zero periodic rate falls back to straight-line
/// repayment `P / n`.
pub fn amortising_payment(
    principal: Money,
    periodic_rate: Rate,
    periods: u32,
) -> CalcResult<Money> {
    if periods == 0 {
        return Err(PropertyCalcError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if periodic_rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let one_plus_r = Decimal::ONE
        .checked_add(periodic_rate)
        .ok_or_else(|| PropertyCalcError::overflow("amortising payment"))?;
    let discount = Decimal::ONE
        .checked_div(one_plus_r)
        .ok_or_else(|| PropertyCalcError::DivisionByZero {
            context: "amortising payment discount factor".into(),
        })?;
    let denominator = Decimal::ONE
        .checked_sub(checked_powu(
            discount,
            periods,
            "amortising payment discount factor",
        )?)
        .ok_or_else(|| PropertyCalcError::overflow("amortising payment"))?;

    if denominator.is_zero() {
        return Err(PropertyCalcError::DivisionByZero {
            context: "amortising payment denominator".into(),
        });
    }

    principal
        .checked_mul(periodic_rate)
        .and_then(|numerator| numerator.checked_div(denominator))
        .ok_or_else(|| PropertyCalcError::overflow("amortising payment"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compound_factor_zero_periods() {
        assert_eq!(compound_factor(dec!(0.05), 0).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_compound_factor_two_periods() {
        assert_eq!(compound_factor(dec!(0.10), 2).unwrap(), dec!(1.21));
    }

    #[test]
    fn test_compound_factor_odd_periods() {
        assert_eq!(compound_factor(dec!(1), 5).unwrap(), dec!(32));
        assert_eq!(compound_factor(dec!(0.1), 3).unwrap(), dec!(1.331));
    }

    #[test]
    fn test_compound_factor_overflow_is_an_error() {
        let err = compound_factor(dec!(1), 200).unwrap_err();
        assert!(matches!(err, PropertyCalcError::Overflow { .. }));
    }

    #[test]
    fn test_compound_factor_shrinking_base_never_overflows() {
        let factor = compound_factor(dec!(-0.5), u32::MAX).unwrap();
        assert_eq!(factor, Decimal::ZERO);
    }

    #[test]
    fn test_future_value_growth() {
        // 1,000,000 at 3% for 2 years = 1,060,900
        assert_eq!(
            future_value(dec!(1000000), dec!(0.03), 2).unwrap(),
            dec!(1060900)
        );
    }

    #[test]
    fn test_future_value_negative_growth() {
        assert_eq!(future_value(dec!(100), dec!(-0.5), 1).unwrap(), dec!(50));
    }

    #[test]
    fn test_future_value_overflow_is_an_error() {
        assert!(future_value(dec!(5000000), dec!(0.03), 2000).is_err());
    }

    #[test]
    fn test_amortising_payment_sanity() {
        // 750k at 6.5% over 30 years, expected ~4,740/mo
        let payment = amortising_payment(dec!(750000), dec!(0.065) / dec!(12), 360).unwrap();
        assert!(
            payment > dec!(4700) && payment < dec!(4800),
            "Monthly payment {} outside expected range",
            payment
        );
    }

    #[test]
    fn test_amortising_payment_single_period() {
        // One period: principal plus one period's interest
        let payment = amortising_payment(dec!(1000), dec!(0.1), 1).unwrap();
        assert!((payment - dec!(1100)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_amortising_payment_extreme_rate_tends_to_interest_only() {
        // 500% a year over 30 years: the payment approaches P * r
        let payment = amortising_payment(dec!(1000000), dec!(5) / dec!(12), 360).unwrap();
        let interest_only = dec!(1000000) * dec!(5) / dec!(12);
        assert!((payment - interest_only).abs() < dec!(0.01));
    }

    #[test]
    fn test_amortising_payment_zero_rate() {
        let payment = amortising_payment(dec!(360000), Decimal::ZERO, 360).unwrap();
        assert_eq!(payment, dec!(1000));
    }

    #[test]
    fn test_amortising_payment_zero_periods() {
        let err = amortising_payment(dec!(1000), dec!(0.01), 0).unwrap_err();
        assert!(matches!(err, PropertyCalcError::InvalidInput { .. }));
    }
}
