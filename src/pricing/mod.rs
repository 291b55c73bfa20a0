mod calculator;
mod report;
mod table;
mod types;

pub(crate) use report::{CostReport, ReportRow, build_report};
pub(crate) use table::PricingTable;
pub(crate) use types::CostResult;
