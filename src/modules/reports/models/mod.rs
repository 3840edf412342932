pub mod spending_report;

pub use spending_report::{
    CategoryShare, DailyReport, DailyTotal, LimitLevel, MonthlyReport, MonthlyTotal,
    SpendingLimitStatus, SpendingSummary, TrendRange, TrendReport,
};
