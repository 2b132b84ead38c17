use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values, in HKD. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentages as entered by users (3.5 = 3.5%).
pub type Percent = Decimal;

/// Rates expressed as decimals (0.035 = 3.5%). Used internally only.
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// How the purchase is funded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Cash,
    #[default]
    Mortgage,
}

/// Residency status of the buyer. Only affects stamp duty refund eligibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuyerType {
    #[default]
    #[serde(alias = "hkpr")]
    PermanentResident,
    #[serde(alias = "non-hkpr")]
    NonPermanentResident,
}

/// Whether `down_payment` is a percentage of price or a literal HKD amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownPaymentType {
    #[default]
    Percentage,
    Amount,
}

/// Standard computation output envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation.
///
/// Carries no timing information so that identical inputs produce identical
/// envelopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub precision: String,
    pub currency: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            precision: "rust_decimal_128bit".to_string(),
            currency: "HKD".to_string(),
        },
    }
}
