use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::PropertyCalcError;
use crate::types::{Money, PaymentType, Percent, Years};
use crate::CalcResult;

const MONTHS: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

/// Rental less every monthly outgoing, financing included.
pub fn net_monthly_income(
    monthly_rental: Money,
    monthly_expenses: Money,
    monthly_management_fee: Money,
    monthly_rates: Money,
    monthly_financing_payment: Money,
) -> CalcResult<Money> {
    [
        monthly_expenses,
        monthly_management_fee,
        monthly_rates,
        monthly_financing_payment,
    ]
    .into_iter()
    .try_fold(monthly_rental, |net, outgoing| net.checked_sub(outgoing))
    .ok_or_else(|| PropertyCalcError::overflow("net monthly income"))
}

/// `monthly * 12 / base * 100`, failing on a zero base or overflow.
fn annualised_pct(monthly: Money, base: Money, context: &str) -> CalcResult<Percent> {
    if base.is_zero() {
        return Err(PropertyCalcError::DivisionByZero {
            context: context.into(),
        });
    }
    monthly
        .checked_mul(MONTHS)
        .and_then(|annual| annual.checked_div(base))
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .ok_or_else(|| PropertyCalcError::overflow(context))
}

/// Annual rent as a percentage of price, before any costs.
pub fn gross_yield_pct(monthly_rental: Money, actual_price: Money) -> CalcResult<Percent> {
    annualised_pct(monthly_rental, actual_price, "gross yield (rent / price)")
}

/// Annual net cash flow as a percentage of price.
pub fn net_yield_pct(net_monthly_income: Money, actual_price: Money) -> CalcResult<Percent> {
    annualised_pct(
        net_monthly_income,
        actual_price,
        "net yield (net income / price)",
    )
}

/// Cash needed on day one: price plus duty for cash, down payment plus duty
/// for a mortgage.
pub fn total_upfront_cost(
    payment_type: PaymentType,
    actual_price: Money,
    down_payment_amount: Money,
    stamp_duty: Money,
) -> CalcResult<Money> {
    let equity = match payment_type {
        PaymentType::Cash => actual_price,
        PaymentType::Mortgage => down_payment_amount,
    };
    equity
        .checked_add(stamp_duty)
        .ok_or_else(|| PropertyCalcError::overflow("total upfront cost"))
}

/// Annual net cash flow as a percentage of upfront cost. `None` when the
/// upfront cost is zero.
pub fn annual_yield_pct(
    net_monthly_income: Money,
    total_upfront_cost: Money,
) -> CalcResult<Option<Percent>> {
    if total_upfront_cost.is_zero() {
        return Ok(None);
    }
    annualised_pct(
        net_monthly_income,
        total_upfront_cost,
        "annual yield (net income / upfront cost)",
    )
    .map(Some)
}

/// Upfront cost divided by annual net cash flow.
///
/// `None` when either side is zero. Negative when cash flow is negative;
/// callers wanting a "never" reading should use
/// [`break_even_years`](super::roi::break_even_years).
pub fn payback_years(
    total_upfront_cost: Money,
    net_monthly_income: Money,
) -> CalcResult<Option<Years>> {
    let annual = net_monthly_income
        .checked_mul(MONTHS)
        .ok_or_else(|| PropertyCalcError::overflow("payback period"))?;
    if total_upfront_cost.is_zero() || annual.is_zero() {
        return Ok(None);
    }
    total_upfront_cost
        .checked_div(annual)
        .map(Some)
        .ok_or_else(|| PropertyCalcError::overflow("payback period"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_net_monthly_income() {
        let net = net_monthly_income(dec!(15000), dec!(3000), dec!(2000), dec!(417), dec!(5000))
            .unwrap();
        assert_eq!(net, dec!(4583));
    }

    #[test]
    fn test_net_monthly_income_overflow_is_an_error() {
        let err = net_monthly_income(
            Decimal::ZERO,
            Decimal::MAX,
            Decimal::MAX,
            Decimal::ZERO,
            Decimal::ZERO,
        )
        .unwrap_err();
        assert!(matches!(err, PropertyCalcError::Overflow { .. }));
    }

    #[test]
    fn test_gross_yield() {
        // 15,000 x 12 / 5,000,000 = 3.6%
        assert_eq!(gross_yield_pct(dec!(15000), dec!(5000000)).unwrap(), dec!(3.6));
    }

    #[test]
    fn test_net_yield_can_be_negative() {
        assert_eq!(net_yield_pct(dec!(-1000), dec!(1200000)).unwrap(), dec!(-1));
    }

    #[test]
    fn test_yield_zero_price_errors() {
        assert!(gross_yield_pct(dec!(1), Decimal::ZERO).is_err());
        assert!(net_yield_pct(dec!(1), Decimal::ZERO).is_err());
    }

    #[test]
    fn test_yield_on_vanishing_price_is_an_error() {
        let err = gross_yield_pct(dec!(1000000000000), dec!(0.0000000000000000000001)).unwrap_err();
        assert!(matches!(err, PropertyCalcError::Overflow { .. }));
    }

    #[test]
    fn test_upfront_cost_by_payment_type() {
        let cash =
            total_upfront_cost(PaymentType::Cash, dec!(5000000), dec!(1500000), dec!(112500))
                .unwrap();
        let mortgage =
            total_upfront_cost(PaymentType::Mortgage, dec!(5000000), dec!(1500000), dec!(112500))
                .unwrap();
        assert_eq!(cash, dec!(5112500));
        assert_eq!(mortgage, dec!(1612500));
    }

    #[test]
    fn test_annual_yield_undefined_at_zero_cost() {
        assert_eq!(annual_yield_pct(dec!(1000), Decimal::ZERO).unwrap(), None);
        assert_eq!(
            annual_yield_pct(dec!(1000), dec!(120000)).unwrap(),
            Some(dec!(10))
        );
    }

    #[test]
    fn test_payback_years() {
        assert_eq!(payback_years(dec!(120000), dec!(1000)).unwrap(), Some(dec!(10)));
        assert_eq!(payback_years(dec!(120000), dec!(-1000)).unwrap(), Some(dec!(-10)));
        assert_eq!(payback_years(dec!(120000), Decimal::ZERO).unwrap(), None);
        assert_eq!(payback_years(Decimal::ZERO, dec!(1000)).unwrap(), None);
    }
}
