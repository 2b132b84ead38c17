use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PropertyCalcError;
use crate::financing::mortgage::finance_purchase;
use crate::returns::breakdown::{cash_flow_breakdown, cost_breakdown, CashFlowLine, CostLine};
use crate::returns::rates::resolve_monthly_rates;
use crate::returns::roi::{
    break_even_years, roi_timeline, total_roi_pct, BreakEven, RoiPoint, DEFAULT_HORIZON_YEARS,
    MAX_HORIZON_YEARS,
};
use crate::returns::yields::{
    annual_yield_pct, gross_yield_pct, net_monthly_income, net_yield_pct, payback_years,
    total_upfront_cost,
};
use crate::stamp_duty::schedule::{stamp_duty_info, StampDutyInfo};
use crate::types::{
    with_metadata, BuyerType, ComputationOutput, DownPaymentType, Money, PaymentType, Percent,
    Years,
};
use crate::CalcResult;

/// Prices are entered in blocks of HK$10,000.
pub const PRICE_UNIT: Money = dec!(10000);

const LOW_GROSS_YIELD_PCT: Percent = dec!(2);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Everything the caller supplies for one calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyInput {
    pub payment_type: PaymentType,
    pub buyer_type: BuyerType,
    pub is_first_home: bool,
    /// Price in units of HK$10,000
    pub price_units: Decimal,
    pub monthly_rental: Money,
    pub monthly_expenses: Money,
    pub monthly_management_fee: Money,
    /// Government rates; zero means estimate from price
    pub monthly_rates: Money,
    /// Mortgage only
    pub annual_interest_rate_pct: Percent,
    /// Mortgage only
    pub mortgage_term_years: u32,
    /// Percentage of price or HKD amount, per `down_payment_type`
    pub down_payment: Decimal,
    pub down_payment_type: DownPaymentType,
    pub annual_appreciation_rate_pct: Percent,
    /// Zero or below means use the schedule
    pub manual_stamp_duty: Money,
}

impl Default for PropertyInput {
    /// A HK$5M flat bought with a 30% down payment and let at HK$15,000 a month.
    fn default() -> Self {
        PropertyInput {
            payment_type: PaymentType::Mortgage,
            buyer_type: BuyerType::PermanentResident,
            is_first_home: false,
            price_units: dec!(500),
            monthly_rental: dec!(15000),
            monthly_expenses: dec!(3000),
            monthly_management_fee: dec!(2000),
            monthly_rates: Decimal::ZERO,
            annual_interest_rate_pct: dec!(3.5),
            mortgage_term_years: 30,
            down_payment: dec!(30),
            down_payment_type: DownPaymentType::Percentage,
            annual_appreciation_rate_pct: dec!(3),
            manual_stamp_duty: Decimal::ZERO,
        }
    }
}

/// Parameters of the aggregation call that are not part of the property itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Holding period for total ROI and the ROI timeline
    pub horizon_years: u32,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            horizon_years: DEFAULT_HORIZON_YEARS,
        }
    }
}

/// Every derived figure for one input snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Price in HKD
    pub actual_price: Money,
    pub total_upfront_cost: Money,
    /// Full price for cash, down payment for a mortgage
    pub equity_outlay: Money,
    pub loan_amount: Money,
    pub monthly_financing_payment: Money,
    /// Rates actually used: the caller's figure or the estimate
    pub monthly_rates: Money,
    /// Gross monthly rent
    pub monthly_income: Money,
    pub net_monthly_income: Money,
    pub gross_yield_pct: Percent,
    pub net_yield_pct: Percent,
    /// Total ROI at `horizon_years`
    pub total_roi_pct: Percent,
    pub horizon_years: u32,
    pub break_even: BreakEven,
    /// Net annual cash flow over upfront cost; `None` when undefined
    pub annual_yield_pct: Option<Percent>,
    /// Upfront cost over net annual cash flow; `None` when undefined
    pub payback_years: Option<Years>,
    pub stamp_duty: StampDutyInfo,
}

/// Calculation result plus the series behind the charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAnalysis {
    #[serde(flatten)]
    pub calculation: CalculationResult,
    pub roi_timeline: Vec<RoiPoint>,
    pub cost_breakdown: Vec<CostLine>,
    pub cash_flow_breakdown: Vec<CashFlowLine>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn actual_price(price_units: Decimal) -> CalcResult<Money> {
    price_units
        .checked_mul(PRICE_UNIT)
        .ok_or_else(|| PropertyCalcError::invalid("price_units", "Property price is too large"))
}

/// Compute the full result record with the default ten-year horizon.
pub fn calculate(input: &PropertyInput) -> CalcResult<CalculationResult> {
    calculate_with_horizon(input, DEFAULT_HORIZON_YEARS)
}

/// Compute the full result record, measuring total ROI at `horizon_years`.
///
/// Input is validated before any arithmetic; the record is always rebuilt
/// from scratch.
pub fn calculate_with_horizon(
    input: &PropertyInput,
    horizon_years: u32,
) -> CalcResult<CalculationResult> {
    validate_input(input)?;
    validate_horizon(horizon_years)?;

    let price = actual_price(input.price_units)?;

    let stamp_duty = stamp_duty_info(
        price,
        input.buyer_type,
        input.is_first_home,
        input.manual_stamp_duty,
    )?;
    let monthly_rates = resolve_monthly_rates(input.monthly_rates, price);
    let financing = finance_purchase(
        price,
        input.payment_type,
        input.down_payment,
        input.down_payment_type,
        input.annual_interest_rate_pct,
        input.mortgage_term_years,
    )?;

    let net = net_monthly_income(
        input.monthly_rental,
        input.monthly_expenses,
        input.monthly_management_fee,
        monthly_rates,
        financing.monthly_payment,
    )?;

    let total_cost = total_upfront_cost(
        input.payment_type,
        price,
        financing.equity_outlay,
        stamp_duty.amount,
    )?;

    let result = CalculationResult {
        actual_price: price,
        total_upfront_cost: total_cost,
        equity_outlay: financing.equity_outlay,
        loan_amount: financing.loan_amount,
        monthly_financing_payment: financing.monthly_payment,
        monthly_rates,
        monthly_income: input.monthly_rental,
        net_monthly_income: net,
        gross_yield_pct: gross_yield_pct(input.monthly_rental, price)?,
        net_yield_pct: net_yield_pct(net, price)?,
        total_roi_pct: total_roi_pct(
            price,
            input.annual_appreciation_rate_pct,
            horizon_years,
            net,
        )?,
        horizon_years,
        break_even: break_even_years(total_cost, net)?,
        annual_yield_pct: annual_yield_pct(net, total_cost)?,
        payback_years: payback_years(total_cost, net)?,
        stamp_duty,
    };

    debug!(
        "price {} duty {} rates {} net monthly {} break-even {:?}",
        result.actual_price,
        result.stamp_duty.amount,
        result.monthly_rates,
        result.net_monthly_income,
        result.break_even
    );

    Ok(result)
}

/// Full analysis: result record, ROI timeline, cost and cash-flow breakdowns,
/// wrapped with methodology, assumptions and warnings.
pub fn analyse_property(
    input: &PropertyInput,
    options: &AnalysisOptions,
) -> CalcResult<ComputationOutput<PropertyAnalysis>> {
    let calculation = calculate_with_horizon(input, options.horizon_years)?;

    let timeline = roi_timeline(
        calculation.actual_price,
        input.annual_appreciation_rate_pct,
        calculation.net_monthly_income,
        options.horizon_years,
    )?
    .collect::<CalcResult<Vec<RoiPoint>>>()?;

    let costs = cost_breakdown(
        input.payment_type,
        calculation.equity_outlay,
        calculation.stamp_duty.amount,
    );
    let cash_flows = cash_flow_breakdown(
        input.payment_type,
        input.monthly_rental,
        input.monthly_expenses,
        input.monthly_management_fee,
        calculation.monthly_rates,
        calculation.monthly_financing_payment,
    );

    let warnings = collect_warnings(input, &calculation);

    let assumptions = serde_json::json!({
        "input": input,
        "options": options,
    });

    Ok(with_metadata(
        "Hong Kong Residential Property Returns (AVD Scale 2)",
        &assumptions,
        warnings,
        PropertyAnalysis {
            calculation,
            roi_timeline: timeline,
            cost_breakdown: costs,
            cash_flow_breakdown: cash_flows,
        },
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &PropertyInput) -> CalcResult<()> {
    if input.price_units <= Decimal::ZERO {
        return Err(PropertyCalcError::invalid(
            "price_units",
            "Property price must be positive",
        ));
    }

    let non_negative = [
        ("monthly_rental", input.monthly_rental),
        ("monthly_expenses", input.monthly_expenses),
        ("monthly_management_fee", input.monthly_management_fee),
        ("monthly_rates", input.monthly_rates),
    ];
    for (field, value) in non_negative {
        if value < Decimal::ZERO {
            return Err(PropertyCalcError::invalid(field, "Amount cannot be negative"));
        }
    }

    if input.annual_appreciation_rate_pct <= dec!(-100) {
        return Err(PropertyCalcError::invalid(
            "annual_appreciation_rate_pct",
            "Appreciation rate must be greater than -100%",
        ));
    }

    if input.payment_type == PaymentType::Mortgage {
        if input.annual_interest_rate_pct < Decimal::ZERO {
            return Err(PropertyCalcError::invalid(
                "annual_interest_rate_pct",
                "Interest rate cannot be negative",
            ));
        }
        if input.mortgage_term_years == 0 {
            return Err(PropertyCalcError::invalid(
                "mortgage_term_years",
                "Mortgage term must be at least 1 year",
            ));
        }
        if input.down_payment < Decimal::ZERO {
            return Err(PropertyCalcError::invalid(
                "down_payment",
                "Down payment cannot be negative",
            ));
        }
    }

    Ok(())
}

fn validate_horizon(horizon_years: u32) -> CalcResult<()> {
    if horizon_years == 0 {
        return Err(PropertyCalcError::invalid(
            "horizon_years",
            "Holding horizon must be at least 1 year",
        ));
    }
    if horizon_years > MAX_HORIZON_YEARS {
        return Err(PropertyCalcError::InvalidInput {
            field: "horizon_years".into(),
            reason: format!("Holding horizon cannot exceed {MAX_HORIZON_YEARS} years"),
        });
    }
    Ok(())
}

fn collect_warnings(input: &PropertyInput, result: &CalculationResult) -> Vec<String> {
    let mut warnings = Vec::new();

    if input.payment_type == PaymentType::Mortgage && result.loan_amount < Decimal::ZERO {
        warnings.push(format!(
            "Down payment of {} exceeds the purchase price — loan amount is negative",
            result.equity_outlay
        ));
    }

    if input.payment_type == PaymentType::Mortgage && input.annual_interest_rate_pct.is_zero() {
        warnings.push("Interest-free mortgage — repaid straight-line".into());
    }

    if result.stamp_duty.manual_override
        && result.stamp_duty.amount < result.stamp_duty.schedule_amount
    {
        warnings.push(format!(
            "Manual stamp duty {} is below the scheduled {}",
            result.stamp_duty.amount, result.stamp_duty.schedule_amount
        ));
    }

    if result.break_even.is_never() {
        warnings.push(format!(
            "Net monthly cash flow of {:.2} is not positive — upfront cost is never recouped",
            result.net_monthly_income
        ));
    }

    if result.gross_yield_pct < LOW_GROSS_YIELD_PCT {
        warnings.push(format!(
            "Gross yield {:.2}% is below {}% — rent looks low for the price",
            result.gross_yield_pct, LOW_GROSS_YIELD_PCT
        ));
    }

    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
