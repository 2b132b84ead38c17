use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::returns::analysis::{CalculationResult, PropertyInput};
use crate::CalcResult;

/// File name used when saving an export without an explicit path.
pub const DEFAULT_EXPORT_FILE: &str = "property-calculator-results.json";

/// The document handed to file-save and share integrations.
///
/// The timestamp is supplied by the caller; nothing in the engine reads the
/// clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub input: PropertyInput,
    pub result: CalculationResult,
    pub timestamp: DateTime<Utc>,
}

impl ExportDocument {
    pub fn new(input: PropertyInput, result: CalculationResult, timestamp: DateTime<Utc>) -> Self {
        ExportDocument {
            input,
            result,
            timestamp,
        }
    }

    pub fn to_json_pretty(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::returns::analysis::calculate;
    use chrono::TimeZone;

    #[test]
    fn test_export_document_shape() {
        let input = PropertyInput::default();
        let result = calculate(&input).unwrap();
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let doc = ExportDocument::new(input, result, ts);

        let value: serde_json::Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();
        assert!(value.get("input").is_some());
        assert!(value.get("result").is_some());
        assert_eq!(value["timestamp"], "2025-03-01T12:00:00Z");
        assert_eq!(value["result"]["break_even"], "never");
    }

    #[test]
    fn test_export_document_reads_back() {
        let input = PropertyInput::default();
        let result = calculate(&input).unwrap();
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let doc = ExportDocument::new(input, result, ts);

        let parsed = ExportDocument::from_json(&doc.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_malformed_export_is_serialization_error() {
        let err = ExportDocument::from_json("{not json").unwrap_err();
        assert!(matches!(err, crate::PropertyCalcError::SerializationError(_)));
    }
}
