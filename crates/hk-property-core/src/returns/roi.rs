use std::ops::RangeInclusive;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PropertyCalcError;
use crate::time_value::future_value;
use crate::types::{Money, Percent, Years};
use crate::CalcResult;

const MONTHS: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

/// Holding horizon used when none is given.
pub const DEFAULT_HORIZON_YEARS: u32 = 10;

/// Longest holding horizon the aggregation accepts.
pub const MAX_HORIZON_YEARS: u32 = 100;

// ---------------------------------------------------------------------------
// Break-even
// ---------------------------------------------------------------------------

/// Years of net cash flow needed to recoup the upfront cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakEven {
    Years(Years),
    /// Net cash flow is zero or negative, so the cost is never recouped
    Never,
}

impl BreakEven {
    pub fn is_never(&self) -> bool {
        matches!(self, BreakEven::Never)
    }

    pub fn years(&self) -> Option<Years> {
        match *self {
            BreakEven::Years(y) => Some(y),
            BreakEven::Never => None,
        }
    }
}

pub fn break_even_years(total_cost: Money, net_monthly_income: Money) -> CalcResult<BreakEven> {
    if net_monthly_income <= Decimal::ZERO {
        return Ok(BreakEven::Never);
    }
    net_monthly_income
        .checked_mul(MONTHS)
        .and_then(|annual| total_cost.checked_div(annual))
        .map(BreakEven::Years)
        .ok_or_else(|| PropertyCalcError::overflow("break-even period"))
}

// ---------------------------------------------------------------------------
// Appreciation-adjusted ROI
// ---------------------------------------------------------------------------

/// Capital gain plus cumulative net income over `years`, as a percentage of
/// the initial price.
pub fn total_roi_pct(
    initial_price: Money,
    appreciation_pct: Percent,
    years: u32,
    net_monthly_income: Money,
) -> CalcResult<Percent> {
    if initial_price.is_zero() {
        return Err(PropertyCalcError::DivisionByZero {
            context: "total ROI (gain / initial price)".into(),
        });
    }
    roi_for_nonzero_price(initial_price, appreciation_pct, years, net_monthly_income)
}

fn roi_for_nonzero_price(
    initial_price: Money,
    appreciation_pct: Percent,
    years: u32,
    net_monthly_income: Money,
) -> CalcResult<Percent> {
    let final_price = future_value(initial_price, appreciation_pct / HUNDRED, years)?;
    net_monthly_income
        .checked_mul(MONTHS)
        .and_then(|annual| annual.checked_mul(Decimal::from(years)))
        .and_then(|total_income| final_price.checked_add(total_income))
        .and_then(|end_value| end_value.checked_sub(initial_price))
        .and_then(|gain| gain.checked_div(initial_price))
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .ok_or_else(|| PropertyCalcError::overflow("total ROI"))
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// ROI after holding for `year` years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiPoint {
    pub year: u32,
    pub roi_pct: Percent,
}

/// Lazy sequence of [`RoiPoint`]s for years `1..=horizon`.
///
/// Each year is priced independently, so a year that overflows yields an
/// error without ending the sequence. Cloning an unstarted timeline gives an
/// independent copy that can be replayed from year one.
#[derive(Debug, Clone)]
pub struct RoiTimeline {
    initial_price: Money,
    appreciation_pct: Percent,
    net_monthly_income: Money,
    years: RangeInclusive<u32>,
}

pub fn roi_timeline(
    initial_price: Money,
    appreciation_pct: Percent,
    net_monthly_income: Money,
    horizon: u32,
) -> CalcResult<RoiTimeline> {
    if initial_price.is_zero() {
        return Err(PropertyCalcError::DivisionByZero {
            context: "ROI timeline (gain / initial price)".into(),
        });
    }
    Ok(RoiTimeline {
        initial_price,
        appreciation_pct,
        net_monthly_income,
        years: 1..=horizon,
    })
}

impl Iterator for RoiTimeline {
    type Item = CalcResult<RoiPoint>;

    fn next(&mut self) -> Option<CalcResult<RoiPoint>> {
        let year = self.years.next()?;
        Some(
            roi_for_nonzero_price(
                self.initial_price,
                self.appreciation_pct,
                year,
                self.net_monthly_income,
            )
            .map(|roi_pct| RoiPoint { year, roi_pct }),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.years.size_hint()
    }
}

impl ExactSizeIterator for RoiTimeline {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_break_even_finite() {
        // 1,200,000 / (10,000 x 12) = 10 years
        assert_eq!(
            break_even_years(dec!(1200000), dec!(10000)).unwrap(),
            BreakEven::Years(dec!(10))
        );
    }

    #[test]
    fn test_break_even_never_for_zero_and_negative() {
        assert!(break_even_years(dec!(1000000), Decimal::ZERO).unwrap().is_never());
        assert!(break_even_years(dec!(1000000), dec!(-1)).unwrap().is_never());
        assert_eq!(
            break_even_years(dec!(1000000), dec!(-1)).unwrap().years(),
            None
        );
    }

    #[test]
    fn test_break_even_serializes_distinctly() {
        assert_eq!(serde_json::to_string(&BreakEven::Never).unwrap(), "\"never\"");
        let finite = serde_json::to_value(BreakEven::Years(dec!(12.5))).unwrap();
        assert_eq!(finite["years"], "12.5");
    }

    #[test]
    fn test_roi_pure_appreciation() {
        // 10% growth for one year, no income
        let roi = total_roi_pct(dec!(1000000), dec!(10), 1, Decimal::ZERO).unwrap();
        assert_eq!(roi, dec!(10));
    }

    #[test]
    fn test_roi_income_only() {
        // 5,000/month for 2 years on 1,200,000 = 10%
        let roi = total_roi_pct(dec!(1200000), Decimal::ZERO, 2, dec!(5000)).unwrap();
        assert_eq!(roi, dec!(10));
    }

    #[test]
    fn test_roi_zero_years_is_zero() {
        let roi = total_roi_pct(dec!(1000000), dec!(3), 0, dec!(5000)).unwrap();
        assert_eq!(roi, Decimal::ZERO);
    }

    #[test]
    fn test_roi_zero_price_errors() {
        assert!(total_roi_pct(Decimal::ZERO, dec!(3), 5, dec!(100)).is_err());
        assert!(roi_timeline(Decimal::ZERO, dec!(3), dec!(100), 5).is_err());
    }

    #[test]
    fn test_timeline_matches_point_formula() {
        let timeline = roi_timeline(dec!(5000000), dec!(3), dec!(-6000), 10).unwrap();
        assert_eq!(timeline.len(), 10);
        for point in timeline {
            let point = point.unwrap();
            let expected = total_roi_pct(dec!(5000000), dec!(3), point.year, dec!(-6000)).unwrap();
            assert_eq!(point.roi_pct, expected);
        }
    }

    #[test]
    fn test_timeline_is_restartable() {
        let timeline = roi_timeline(dec!(5000000), dec!(3), dec!(2000), 4).unwrap();
        let first: Vec<RoiPoint> = timeline.clone().collect::<CalcResult<_>>().unwrap();
        let second: Vec<RoiPoint> = timeline.collect::<CalcResult<_>>().unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|p| p.year).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn test_timeline_empty_horizon() {
        let mut timeline = roi_timeline(dec!(5000000), dec!(3), dec!(2000), 0).unwrap();
        assert!(timeline.next().is_none());
    }

    #[test]
    fn test_long_horizon_overflow_is_an_error() {
        let err = total_roi_pct(dec!(5000000), dec!(3), 2000, dec!(1000)).unwrap_err();
        assert!(matches!(err, PropertyCalcError::Overflow { .. }));
    }

    #[test]
    fn test_timeline_reports_overflowing_years() {
        // 100% a year doubles the price: 2^90 x 1e6 overflows, 2^10 x 1e6 does not
        let mut timeline = roi_timeline(dec!(1000000), dec!(100), Decimal::ZERO, 90).unwrap();
        assert_eq!(timeline.len(), 90);
        assert!(timeline.next().unwrap().is_ok());
        assert!(timeline.last().unwrap().is_err());
    }

    #[test]
    fn test_timeline_full_u32_horizon_is_sized() {
        let timeline = roi_timeline(dec!(1000000), Decimal::ZERO, Decimal::ZERO, u32::MAX).unwrap();
        assert_eq!(timeline.len(), u32::MAX as usize);
    }

    #[test]
    fn test_break_even_overflow_is_an_error() {
        let err = break_even_years(Decimal::MAX, dec!(0.0000000000000000000001)).unwrap_err();
        assert!(matches!(err, PropertyCalcError::Overflow { .. }));
    }
}
