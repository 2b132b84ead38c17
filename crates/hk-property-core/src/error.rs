use thiserror::Error;

#[derive(Debug, Error)]
pub enum PropertyCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PropertyCalcError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        PropertyCalcError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(context: &str) -> Self {
        PropertyCalcError::Overflow {
            context: context.into(),
        }
    }
}

impl From<serde_json::Error> for PropertyCalcError {
    fn from(e: serde_json::Error) -> Self {
        PropertyCalcError::SerializationError(e.to_string())
    }
}
