use log::trace;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PropertyCalcError;
use crate::types::{BuyerType, Money, Percent};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How a single band turns a price into duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DutyFormula {
    /// A flat fee regardless of price within the band
    Fixed { amount: Money },
    /// A flat percentage of the whole price
    Percentage { rate_pct: Percent },
    /// Marginal relief: base fee plus a percentage of the excess over `threshold`
    FixedPlusExcess {
        base: Money,
        threshold: Money,
        rate_pct: Percent,
    },
}

/// One row of the ad valorem duty schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyBand {
    /// 1-based position in the schedule
    pub index: u8,
    /// Exclusive lower bound (zero for the first band)
    pub lower_bound: Money,
    /// Inclusive upper bound; `None` for the open-ended top band
    pub upper_bound: Option<Money>,
    pub formula: DutyFormula,
}

/// Schedule-derived duty for a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampDutyResult {
    /// Duty in whole HKD, rounded up
    pub amount: Money,
    /// HKPR first-time buyers may reclaim the duty after selling a prior home
    pub refund_eligible: bool,
}

/// Stamp duty figures as carried in a calculation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampDutyInfo {
    /// Amount used downstream: the manual override when supplied, else the schedule amount
    pub amount: Money,
    /// Amount the schedule produces for this price
    pub schedule_amount: Money,
    /// Marginal percentage of the matched band (0 for the flat-fee band)
    pub marginal_rate_pct: Percent,
    pub band: DutyBand,
    pub refund_eligible: bool,
    pub manual_override: bool,
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Ad valorem stamp duty, Scale 2, effective 26 February 2025.
///
/// Bands are ordered by ascending upper bound and the first match wins.
/// The marginal-relief bands sit between the flat-percentage bands so that
/// duty never jumps at a threshold.
pub static AVD_SCALE_2: [DutyBand; 10] = [
    DutyBand {
        index: 1,
        lower_bound: dec!(0),
        upper_bound: Some(dec!(4000000)),
        formula: DutyFormula::Fixed { amount: dec!(100) },
    },
    DutyBand {
        index: 2,
        lower_bound: dec!(4000000),
        upper_bound: Some(dec!(4323780)),
        formula: DutyFormula::FixedPlusExcess {
            base: dec!(100),
            threshold: dec!(4000000),
            rate_pct: dec!(20),
        },
    },
    DutyBand {
        index: 3,
        lower_bound: dec!(4323780),
        upper_bound: Some(dec!(4500000)),
        formula: DutyFormula::Percentage { rate_pct: dec!(1.5) },
    },
    DutyBand {
        index: 4,
        lower_bound: dec!(4500000),
        upper_bound: Some(dec!(4935480)),
        formula: DutyFormula::FixedPlusExcess {
            base: dec!(67500),
            threshold: dec!(4500000),
            rate_pct: dec!(10),
        },
    },
    DutyBand {
        index: 5,
        lower_bound: dec!(4935480),
        upper_bound: Some(dec!(6000000)),
        formula: DutyFormula::Percentage { rate_pct: dec!(2.25) },
    },
    DutyBand {
        index: 6,
        lower_bound: dec!(6000000),
        upper_bound: Some(dec!(6642860)),
        formula: DutyFormula::FixedPlusExcess {
            base: dec!(135000),
            threshold: dec!(6000000),
            rate_pct: dec!(10),
        },
    },
    DutyBand {
        index: 7,
        lower_bound: dec!(6642860),
        upper_bound: Some(dec!(9000000)),
        formula: DutyFormula::Percentage { rate_pct: dec!(3) },
    },
    DutyBand {
        index: 8,
        lower_bound: dec!(9000000),
        upper_bound: Some(dec!(10080000)),
        formula: DutyFormula::FixedPlusExcess {
            base: dec!(270000),
            threshold: dec!(9000000),
            rate_pct: dec!(10),
        },
    },
    DutyBand {
        index: 9,
        lower_bound: dec!(10080000),
        upper_bound: Some(dec!(20000000)),
        formula: DutyFormula::Percentage { rate_pct: dec!(3.75) },
    },
    DutyBand {
        index: 10,
        lower_bound: dec!(20000000),
        upper_bound: None,
        formula: DutyFormula::FixedPlusExcess {
            base: dec!(750000),
            threshold: dec!(20000000),
            rate_pct: dec!(10),
        },
    },
];

const HUNDRED: Decimal = dec!(100);

impl DutyFormula {
    /// Unrounded duty for `price` under this formula.
    ///
    /// Rates are scaled to fractions before multiplying, so any price inside
    /// the formula's band is exact; prices far outside saturate.
    pub fn exact_duty(&self, price: Money) -> Money {
        match *self {
            DutyFormula::Fixed { amount } => amount,
            DutyFormula::Percentage { rate_pct } => price.saturating_mul(rate_pct / HUNDRED),
            DutyFormula::FixedPlusExcess {
                base,
                threshold,
                rate_pct,
            } => base.saturating_add(
                price
                    .saturating_sub(threshold)
                    .saturating_mul(rate_pct / HUNDRED),
            ),
        }
    }

    pub fn marginal_rate_pct(&self) -> Percent {
        match *self {
            DutyFormula::Fixed { .. } => Decimal::ZERO,
            DutyFormula::Percentage { rate_pct } => rate_pct,
            DutyFormula::FixedPlusExcess { rate_pct, .. } => rate_pct,
        }
    }
}

impl DutyBand {
    pub fn contains(&self, price: Money) -> bool {
        self.upper_bound.map_or(true, |upper| price <= upper)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// First band (ascending upper bound) whose inclusive upper bound covers `price`.
pub fn band_for_price(price: Money) -> &'static DutyBand {
    let last = &AVD_SCALE_2[AVD_SCALE_2.len() - 1];
    let band = AVD_SCALE_2
        .iter()
        .find(|band| band.contains(price))
        .unwrap_or(last);
    trace!("price {price} falls in AVD band {}", band.index);
    band
}

/// Schedule duty for `price`, rounded up to the whole dollar.
pub fn schedule_duty(price: Money) -> Money {
    band_for_price(price).formula.exact_duty(price).ceil()
}

pub fn is_refund_eligible(buyer_type: BuyerType, is_first_home: bool) -> bool {
    matches!(buyer_type, BuyerType::PermanentResident) && is_first_home
}

/// Calculate stamp duty for a residential purchase at `price` (HKD).
///
/// Refund eligibility is informational and never changes the amount.
pub fn calculate_stamp_duty(
    price: Money,
    buyer_type: BuyerType,
    is_first_home: bool,
) -> StampDutyResult {
    StampDutyResult {
        amount: schedule_duty(price),
        refund_eligible: is_refund_eligible(buyer_type, is_first_home),
    }
}

/// Stamp duty with an optional manual override.
///
/// A `manual_amount` above zero replaces the amount used downstream; band and
/// rate metadata always come from the schedule. The price must be positive.
pub fn stamp_duty_info(
    price: Money,
    buyer_type: BuyerType,
    is_first_home: bool,
    manual_amount: Money,
) -> CalcResult<StampDutyInfo> {
    if price <= Decimal::ZERO {
        return Err(PropertyCalcError::invalid(
            "price",
            "Property price must be positive",
        ));
    }

    let band = band_for_price(price);
    let computed = calculate_stamp_duty(price, buyer_type, is_first_home);
    let manual_override = manual_amount > Decimal::ZERO;

    Ok(StampDutyInfo {
        amount: if manual_override {
            manual_amount
        } else {
            computed.amount
        },
        schedule_amount: computed.amount,
        marginal_rate_pct: band.formula.marginal_rate_pct(),
        band: *band,
        refund_eligible: computed.refund_eligible,
        manual_override,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
