use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use hk_property_core::returns::analysis::actual_price;
use hk_property_core::stamp_duty::schedule::{self, AVD_SCALE_2};
use hk_property_core::BuyerType;

use super::property::BuyerArg;

/// Arguments for a stand-alone stamp duty lookup
#[derive(Args)]
pub struct StampDutyArgs {
    /// Purchase price in HKD
    #[arg(long, conflicts_with = "price_units", allow_negative_numbers = true)]
    pub price: Option<Decimal>,

    /// Purchase price in units of HK$10,000
    #[arg(long, allow_negative_numbers = true)]
    pub price_units: Option<Decimal>,

    /// Buyer residency status
    #[arg(long, value_enum, default_value = "hkpr")]
    pub buyer_type: BuyerArg,

    /// Buyer is purchasing a first home
    #[arg(long)]
    pub first_home: bool,

    /// Manual stamp duty in HKD (0 = use the schedule)
    #[arg(long, default_value = "0")]
    pub manual: Decimal,
}

pub fn run_stamp_duty(args: StampDutyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let price = match (args.price, args.price_units) {
        (Some(p), _) => p,
        (None, Some(units)) => actual_price(units)?,
        (None, None) => return Err("--price or --price-units is required".into()),
    };

    let buyer: BuyerType = args.buyer_type.into();
    let info = schedule::stamp_duty_info(price, buyer, args.first_home, args.manual)?;
    Ok(serde_json::json!({
        "result": info,
        "price": price,
    }))
}

/// The duty bands as rows, for display alongside a calculation.
pub fn run_schedule() -> Result<Value, Box<dyn std::error::Error>> {
    let rows: Vec<Value> = AVD_SCALE_2
        .iter()
        .map(|band| {
            serde_json::json!({
                "band": band.index,
                "lower_bound": band.lower_bound,
                "upper_bound": band.upper_bound,
                "marginal_rate_pct": band.formula.marginal_rate_pct(),
            })
        })
        .collect();
    Ok(serde_json::json!({ "result": rows }))
}
