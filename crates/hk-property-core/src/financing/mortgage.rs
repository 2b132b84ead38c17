use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PropertyCalcError;
use crate::time_value::amortising_payment;
use crate::types::{DownPaymentType, Money, PaymentType, Percent};
use crate::CalcResult;

const MONTHS_PER_YEAR: u32 = 12;

/// How the purchase price is split between the buyer's cash and a loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingSummary {
    /// Cash the buyer puts in before duty: the full price for a cash
    /// purchase, the down payment for a mortgage
    pub equity_outlay: Money,
    /// Price less down payment; negative when the down payment exceeds the price
    pub loan_amount: Money,
    /// Level monthly instalment (zero for cash purchases)
    pub monthly_payment: Money,
    /// Twelve monthly instalments
    pub annual_debt_service: Money,
    pub total_months: u32,
    /// True when a mortgage carries no interest and is repaid straight-line
    pub interest_free: bool,
}

/// Down payment in HKD.
///
/// No clamping: a percentage above 100 or an amount above the price is
/// returned as-is and yields a negative loan.
pub fn resolve_down_payment(
    actual_price: Money,
    down_payment: Decimal,
    down_payment_type: DownPaymentType,
) -> CalcResult<Money> {
    match down_payment_type {
        DownPaymentType::Percentage => actual_price
            .checked_mul(down_payment / dec!(100))
            .ok_or_else(|| PropertyCalcError::overflow("down payment")),
        DownPaymentType::Amount => Ok(down_payment),
    }
}

pub fn loan_amount(actual_price: Money, down_payment_amount: Money) -> CalcResult<Money> {
    actual_price
        .checked_sub(down_payment_amount)
        .ok_or_else(|| PropertyCalcError::overflow("loan amount"))
}

fn term_months(years: u32) -> CalcResult<u32> {
    years.checked_mul(MONTHS_PER_YEAR).ok_or_else(|| {
        PropertyCalcError::invalid("mortgage_term_years", "Mortgage term is too long")
    })
}

/// Standard fixed-rate mortgage instalment.
///
/// `annual_rate_pct` is a percentage (3.5 = 3.5%). A zero rate is repaid
/// straight-line as `loan / (years * 12)`. Loan and rate must not be negative.
pub fn monthly_payment(loan: Money, annual_rate_pct: Percent, years: u32) -> CalcResult<Money> {
    if years == 0 {
        return Err(PropertyCalcError::invalid(
            "mortgage_term_years",
            "Mortgage term must be at least 1 year",
        ));
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(PropertyCalcError::invalid(
            "annual_interest_rate_pct",
            "Interest rate cannot be negative",
        ));
    }

    let monthly_rate = annual_rate_pct / dec!(100) / Decimal::from(MONTHS_PER_YEAR);
    amortising_payment(loan, monthly_rate, term_months(years)?)
}

/// Repayment profile of a stand-alone loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanQuote {
    pub monthly_payment: Money,
    pub total_months: u32,
    /// Every instalment over the full term
    pub total_paid: Money,
    pub total_interest: Money,
}

/// Quote a loan on its own, outside a purchase.
///
/// Unlike a purchase, where an oversized down payment yields a negative
/// loan, a quoted principal must not be negative.
pub fn quote_loan(loan: Money, annual_rate_pct: Percent, years: u32) -> CalcResult<LoanQuote> {
    if loan < Decimal::ZERO {
        return Err(PropertyCalcError::invalid(
            "loan",
            "Loan amount cannot be negative",
        ));
    }

    let payment = monthly_payment(loan, annual_rate_pct, years)?;
    let total_months = term_months(years)?;
    let total_paid = payment
        .checked_mul(Decimal::from(total_months))
        .ok_or_else(|| PropertyCalcError::overflow("total repaid"))?;

    Ok(LoanQuote {
        monthly_payment: payment,
        total_months,
        total_paid,
        total_interest: total_paid - loan,
    })
}

/// Split the purchase into equity and debt and price the debt.
pub fn finance_purchase(
    actual_price: Money,
    payment_type: PaymentType,
    down_payment: Decimal,
    down_payment_type: DownPaymentType,
    annual_rate_pct: Percent,
    term_years: u32,
) -> CalcResult<FinancingSummary> {
    let summary = match payment_type {
        PaymentType::Cash => FinancingSummary {
            equity_outlay: actual_price,
            loan_amount: Decimal::ZERO,
            monthly_payment: Decimal::ZERO,
            annual_debt_service: Decimal::ZERO,
            total_months: 0,
            interest_free: false,
        },
        PaymentType::Mortgage => {
            let down = resolve_down_payment(actual_price, down_payment, down_payment_type)?;
            let loan = loan_amount(actual_price, down)?;
            let payment = monthly_payment(loan, annual_rate_pct, term_years)?;
            FinancingSummary {
                equity_outlay: down,
                loan_amount: loan,
                monthly_payment: payment,
                annual_debt_service: payment
                    .checked_mul(Decimal::from(MONTHS_PER_YEAR))
                    .ok_or_else(|| PropertyCalcError::overflow("annual debt service"))?,
                total_months: term_months(term_years)?,
                interest_free: annual_rate_pct.is_zero(),
            }
        }
    };

    debug!(
        "financing: equity {} loan {} monthly {}",
        summary.equity_outlay, summary.loan_amount, summary.monthly_payment
    );

    Ok(summary)
}
