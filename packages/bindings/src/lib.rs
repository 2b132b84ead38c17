use std::str::FromStr;

use chrono::{DateTime, Utc};
use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use hk_property_core::report::ExportDocument;
use hk_property_core::returns::analysis::{self, AnalysisOptions, PropertyInput};
use hk_property_core::returns::roi::DEFAULT_HORIZON_YEARS;
use hk_property_core::BuyerType;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_decimal(field: &str, value: &str) -> NapiResult<Decimal> {
    Decimal::from_str(value.trim())
        .map_err(|e| napi::Error::from_reason(format!("{field}: {e}")))
}

fn parse_input(input_json: &str) -> NapiResult<PropertyInput> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Returns
// ---------------------------------------------------------------------------

/// Result record only. `horizon_years` defaults to ten.
#[napi]
pub fn calculate_property(input_json: String, horizon_years: Option<u32>) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let output = analysis::calculate_with_horizon(
        &input,
        horizon_years.unwrap_or(DEFAULT_HORIZON_YEARS),
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Result record, ROI timeline and breakdowns in the standard envelope.
#[napi]
pub fn analyse_property(input_json: String, horizon_years: Option<u32>) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let options = AnalysisOptions {
        horizon_years: horizon_years.unwrap_or(DEFAULT_HORIZON_YEARS),
    };
    let output = analysis::analyse_property(&input, &options).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn default_property_input() -> NapiResult<String> {
    serde_json::to_string(&PropertyInput::default()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Stamp duty & financing
// ---------------------------------------------------------------------------

#[napi]
pub fn stamp_duty(
    price: String,
    is_permanent_resident: bool,
    is_first_home: bool,
    manual_amount: Option<String>,
) -> NapiResult<String> {
    let price = parse_decimal("price", &price)?;
    let manual = match manual_amount {
        Some(m) => parse_decimal("manual_amount", &m)?,
        None => Decimal::ZERO,
    };
    let buyer = if is_permanent_resident {
        BuyerType::PermanentResident
    } else {
        BuyerType::NonPermanentResident
    };
    let info = hk_property_core::stamp_duty::schedule::stamp_duty_info(
        price,
        buyer,
        is_first_home,
        manual,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&info).map_err(to_napi_error)
}

/// Monthly instalment, total repaid and total interest for a loan.
#[napi]
pub fn mortgage_quote(loan: String, annual_rate_pct: String, years: u32) -> NapiResult<String> {
    let loan = parse_decimal("loan", &loan)?;
    let rate = parse_decimal("annual_rate_pct", &annual_rate_pct)?;
    let quote = hk_property_core::financing::mortgage::quote_loan(loan, rate, years)
        .map_err(to_napi_error)?;
    serde_json::to_string(&quote).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Export document for file-save / share. `timestamp` is RFC 3339; the
/// current time is used when omitted.
#[napi]
pub fn export_document(input_json: String, timestamp: Option<String>) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let result = analysis::calculate(&input).map_err(to_napi_error)?;
    let ts: DateTime<Utc> = match timestamp {
        Some(t) => DateTime::parse_from_rfc3339(&t)
            .map_err(to_napi_error)?
            .with_timezone(&Utc),
        None => Utc::now(),
    };
    ExportDocument::new(input, result, ts)
        .to_json_pretty()
        .map_err(to_napi_error)
}
