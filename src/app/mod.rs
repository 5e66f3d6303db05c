pub mod report;
pub mod session;
