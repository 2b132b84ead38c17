pub mod analysis;
pub mod breakdown;
pub mod rates;
pub mod roi;
pub mod yields;
