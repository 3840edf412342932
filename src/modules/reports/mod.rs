pub mod controllers;
pub mod models;
pub mod services;

pub use models::{DailyReport, MonthlyReport, TrendRange, TrendReport};
pub use services::{MonthlyAggregator, ReportService};
