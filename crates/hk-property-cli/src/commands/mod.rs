pub mod mortgage;
pub mod property;
pub mod stamp_duty;
