pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "stamp_duty")]
pub mod stamp_duty;

#[cfg(feature = "financing")]
pub mod financing;

#[cfg(feature = "returns")]
pub mod returns;

#[cfg(feature = "returns")]
pub mod report;

pub use error::PropertyCalcError;
pub use types::*;

/// Standard result type for all property calculations
pub type CalcResult<T> = Result<T, PropertyCalcError>;
