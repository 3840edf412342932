use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::core::{checked_sum, Currency, Result, YearMonth};
use crate::modules::reports::models::{
    DailyReport, MonthlyReport, SpendingLimitStatus, SpendingSummary, TrendRange, TrendReport,
};
use crate::modules::reports::services::MonthlyAggregator;
use crate::modules::transactions::models::Transaction;

/// Builds dashboard and trend reports from a transaction list
#[derive(Debug, Clone, Copy)]
pub struct ReportService {
    currency: Currency,
    spending_limit: Decimal,
}

impl ReportService {
    pub fn new(currency: Currency, spending_limit: Decimal) -> Self {
        Self {
            currency,
            spending_limit,
        }
    }

    pub fn spending_limit(&self) -> Decimal {
        self.spending_limit
    }

    /// Figures for `month`: totals, category split, limit status and largest expense
    pub fn monthly_report(&self, transactions: &[Transaction], month: YearMonth) -> MonthlyReport {
        let total_spending = MonthlyAggregator::aggregate_for_month(transactions, month);
        let installment_total = MonthlyAggregator::installment_total_for_month(transactions, month);
        let daily_average = self
            .currency
            .round(total_spending / Decimal::from(month.days_in_month()));

        let report = MonthlyReport {
            month,
            total_spending,
            installment_total,
            daily_average,
            by_category: MonthlyAggregator::category_breakdown(transactions, month),
            limit_status: SpendingLimitStatus::evaluate(total_spending, self.spending_limit),
            largest_expense: MonthlyAggregator::largest_expense(transactions, month).cloned(),
        };

        debug!(
            month = %month,
            total = %report.total_spending,
            level = ?report.limit_status.level,
            "Monthly report built"
        );

        report
    }

    /// Trend over `range` ending on `today`
    pub fn trend_report(
        &self,
        transactions: &[Transaction],
        range: TrendRange,
        today: NaiveDate,
    ) -> Result<TrendReport> {
        let start_date = range.start_date(today);
        let months = MonthlyAggregator::monthly_totals_between(transactions, start_date, today)?;
        let summary = SpendingSummary::from_months(&months, |d| self.currency.round(d));

        info!(
            range = ?range,
            start = %start_date,
            end = %today,
            months = months.len(),
            total = %summary.total,
            "Trend report built"
        );

        Ok(TrendReport {
            range,
            start_date,
            end_date: today,
            by_category: MonthlyAggregator::category_breakdown_between(transactions, start_date, today),
            months,
            summary,
        })
    }

    /// Spending for each of the `days` days ending on `today`
    pub fn daily_report(&self, transactions: &[Transaction], today: NaiveDate, days: u32) -> Result<DailyReport> {
        let daily = MonthlyAggregator::daily_totals(transactions, today, days)?;
        let total = checked_sum(daily.iter().map(|d| d.total));
        let average = self.currency.round(total / Decimal::from(days));
        let start_date = daily.first().map_or(today, |d| d.date);

        info!(start = %start_date, end = %today, days, total = %total, "Daily report built");

        Ok(DailyReport {
            start_date,
            end_date: today,
            days: daily,
            total,
            average,
        })
    }
}
