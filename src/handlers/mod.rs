pub mod calculate;
pub mod error;
pub mod locale;
pub mod page;
