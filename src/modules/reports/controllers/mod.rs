pub mod report_controller;

pub use report_controller::{configure, get_daily_report, get_monthly_report, get_trend_report};
