pub mod calculator;
pub mod page;
pub mod report;
