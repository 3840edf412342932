pub mod monthly_aggregator;
pub mod report_service;

pub use monthly_aggregator::MonthlyAggregator;
pub use report_service::ReportService;
