use chrono::Utc;
use clap::{Args, ValueEnum};
use log::info;
use rust_decimal::Decimal;
use serde_json::Value;
use std::fs;

use hk_property_core::report::{ExportDocument, DEFAULT_EXPORT_FILE};
use hk_property_core::returns::analysis::{self, AnalysisOptions, PropertyInput};
use hk_property_core::returns::roi::{roi_timeline, DEFAULT_HORIZON_YEARS};
use hk_property_core::{BuyerType, CalcResult, DownPaymentType, PaymentType};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PaymentArg {
    Cash,
    Mortgage,
}

impl From<PaymentArg> for PaymentType {
    fn from(arg: PaymentArg) -> Self {
        match arg {
            PaymentArg::Cash => PaymentType::Cash,
            PaymentArg::Mortgage => PaymentType::Mortgage,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BuyerArg {
    /// Hong Kong permanent resident
    Hkpr,
    /// Not a Hong Kong permanent resident
    NonHkpr,
}

impl From<BuyerArg> for BuyerType {
    fn from(arg: BuyerArg) -> Self {
        match arg {
            BuyerArg::Hkpr => BuyerType::PermanentResident,
            BuyerArg::NonHkpr => BuyerType::NonPermanentResident,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DownPaymentArg {
    Percentage,
    Amount,
}

impl From<DownPaymentArg> for DownPaymentType {
    fn from(arg: DownPaymentArg) -> Self {
        match arg {
            DownPaymentArg::Percentage => DownPaymentType::Percentage,
            DownPaymentArg::Amount => DownPaymentType::Amount,
        }
    }
}

/// Property fields settable from flags. Unset flags keep the default form's value.
#[derive(Args, Debug, Default)]
pub struct PropertyFlags {
    /// Cash or mortgage purchase
    #[arg(long, value_enum)]
    pub payment_type: Option<PaymentArg>,

    /// Buyer residency status
    #[arg(long, value_enum)]
    pub buyer_type: Option<BuyerArg>,

    /// Buyer is purchasing a first home
    #[arg(long)]
    pub first_home: bool,

    /// Price in units of HK$10,000 (500 = HK$5M)
    #[arg(long)]
    pub price_units: Option<Decimal>,

    /// Monthly rental income
    #[arg(long)]
    pub rental: Option<Decimal>,

    /// Monthly expenses (repairs, insurance)
    #[arg(long)]
    pub expenses: Option<Decimal>,

    /// Monthly management fee
    #[arg(long)]
    pub management_fee: Option<Decimal>,

    /// Monthly government rates (0 = estimate from price)
    #[arg(long)]
    pub rates: Option<Decimal>,

    /// Annual mortgage interest rate in percent (3.5 = 3.5%)
    #[arg(long)]
    pub interest_rate: Option<Decimal>,

    /// Mortgage term in years
    #[arg(long)]
    pub mortgage_term: Option<u32>,

    /// Down payment, read per --down-payment-type
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Whether --down-payment is a percentage or an HKD amount
    #[arg(long, value_enum)]
    pub down_payment_type: Option<DownPaymentArg>,

    /// Annual appreciation rate in percent (negative for depreciation)
    #[arg(long, allow_negative_numbers = true)]
    pub appreciation_rate: Option<Decimal>,

    /// Manual stamp duty in HKD (0 = use the schedule)
    #[arg(long)]
    pub stamp_duty: Option<Decimal>,
}

impl PropertyFlags {
    /// Overlay the flags that were given onto `base`.
    pub fn apply(&self, base: PropertyInput) -> PropertyInput {
        PropertyInput {
            payment_type: self.payment_type.map_or(base.payment_type, Into::into),
            buyer_type: self.buyer_type.map_or(base.buyer_type, Into::into),
            is_first_home: self.first_home || base.is_first_home,
            price_units: self.price_units.unwrap_or(base.price_units),
            monthly_rental: self.rental.unwrap_or(base.monthly_rental),
            monthly_expenses: self.expenses.unwrap_or(base.monthly_expenses),
            monthly_management_fee: self.management_fee.unwrap_or(base.monthly_management_fee),
            monthly_rates: self.rates.unwrap_or(base.monthly_rates),
            annual_interest_rate_pct: self.interest_rate.unwrap_or(base.annual_interest_rate_pct),
            mortgage_term_years: self.mortgage_term.unwrap_or(base.mortgage_term_years),
            down_payment: self.down_payment.unwrap_or(base.down_payment),
            down_payment_type: self
                .down_payment_type
                .map_or(base.down_payment_type, Into::into),
            annual_appreciation_rate_pct: self
                .appreciation_rate
                .unwrap_or(base.annual_appreciation_rate_pct),
            manual_stamp_duty: self.stamp_duty.unwrap_or(base.manual_stamp_duty),
        }
    }
}

/// Arguments for a full property return calculation
#[derive(Args)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub property: PropertyFlags,

    /// Holding horizon in years for total ROI and the ROI timeline
    #[arg(long, default_value_t = DEFAULT_HORIZON_YEARS)]
    pub horizon: u32,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Also write an export document (input, result, timestamp) to this path
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_EXPORT_FILE)]
    pub export: Option<String>,
}

/// Arguments for the ROI-over-time series
#[derive(Args)]
pub struct TimelineArgs {
    #[command(flatten)]
    pub property: PropertyFlags,

    /// Number of years in the series
    #[arg(long, default_value_t = DEFAULT_HORIZON_YEARS)]
    pub horizon: u32,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

fn resolve_input(
    path: Option<&str>,
    flags: &PropertyFlags,
) -> Result<PropertyInput, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        input::file::read_input(path)
    } else if let Some(property) = input::stdin::read_stdin()? {
        Ok(property)
    } else {
        Ok(flags.apply(PropertyInput::default()))
    }
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let property = resolve_input(args.input.as_deref(), &args.property)?;
    let options = AnalysisOptions {
        horizon_years: args.horizon,
    };
    let output = analysis::analyse_property(&property, &options)?;

    if let Some(ref path) = args.export {
        let doc = ExportDocument::new(property, output.result.calculation.clone(), Utc::now());
        fs::write(path, doc.to_json_pretty()?)
            .map_err(|e| format!("Failed to write export '{}': {}", path, e))?;
        info!("export written to {path}");
    }

    Ok(serde_json::to_value(output)?)
}

pub fn run_timeline(args: TimelineArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let property = resolve_input(args.input.as_deref(), &args.property)?;
    let result = analysis::calculate_with_horizon(&property, args.horizon)?;
    let points: Vec<_> = roi_timeline(
        result.actual_price,
        property.annual_appreciation_rate_pct,
        result.net_monthly_income,
        args.horizon,
    )?
    .collect::<CalcResult<_>>()?;
    Ok(serde_json::json!({ "result": points }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_no_flags_keeps_defaults() {
        let flags = PropertyFlags::default();
        assert_eq!(flags.apply(PropertyInput::default()), PropertyInput::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let flags = PropertyFlags {
            payment_type: Some(PaymentArg::Cash),
            buyer_type: Some(BuyerArg::NonHkpr),
            first_home: true,
            price_units: Some(dec!(800)),
            down_payment_type: Some(DownPaymentArg::Amount),
            ..PropertyFlags::default()
        };
        let input = flags.apply(PropertyInput::default());
        assert_eq!(input.payment_type, PaymentType::Cash);
        assert_eq!(input.buyer_type, BuyerType::NonPermanentResident);
        assert!(input.is_first_home);
        assert_eq!(input.price_units, dec!(800));
        assert_eq!(input.down_payment_type, DownPaymentType::Amount);
        assert_eq!(input.monthly_rental, dec!(15000));
    }
}
