use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use hk_property_core::financing::mortgage;

/// Arguments for a stand-alone mortgage instalment
#[derive(Args)]
pub struct MortgageArgs {
    /// Loan principal in HKD
    #[arg(long, allow_negative_numbers = true)]
    pub loan: Decimal,

    /// Annual interest rate in percent (3.5 = 3.5%)
    #[arg(long, allow_negative_numbers = true)]
    pub rate: Decimal,

    /// Term in years
    #[arg(long, default_value = "30")]
    pub years: u32,
}

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let quote = mortgage::quote_loan(args.loan, args.rate, args.years)?;
    Ok(serde_json::json!({ "result": quote }))
}
