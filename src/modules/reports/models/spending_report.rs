use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::core::{checked_sum, YearMonth};
use crate::modules::transactions::models::{Category, Transaction};

/// Amount attributed to one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub total: Decimal,
}

/// Amount attributed to one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: Decimal,
}

/// One category's slice of a period's spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: Category,
    pub amount: Decimal,
    /// Whole-number share of the period total, rounded half-up
    pub percentage: Decimal,
}

/// Total, average and extremes of a monthly series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSummary {
    pub total: Decimal,
    pub average: Decimal,
    pub highest: Option<MonthlyTotal>,
    pub lowest: Option<MonthlyTotal>,
}

impl SpendingSummary {
    /// Summarize `months`; the first month wins ties for highest and lowest
    pub fn from_months(months: &[MonthlyTotal], round: impl Fn(Decimal) -> Decimal) -> Self {
        let total = checked_sum(months.iter().map(|m| m.total));
        let average = if months.is_empty() {
            Decimal::ZERO
        } else {
            round(total / Decimal::from(months.len()))
        };

        let highest = months
            .iter()
            .copied()
            .reduce(|max, m| if m.total > max.total { m } else { max });
        let lowest = months
            .iter()
            .copied()
            .reduce(|min, m| if m.total < min.total { m } else { min });

        Self {
            total,
            average,
            highest,
            lowest,
        }
    }
}

/// How close spending is to the configured limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitLevel {
    /// Below 80% of the limit
    Under,
    /// At least 80% of the limit, not above it
    Warning,
    /// Spending is above the limit
    Exceeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingLimitStatus {
    pub spent: Decimal,
    pub limit: Decimal,
    /// `spent / limit` as a percentage, two decimal places
    pub progress_percent: Decimal,
    pub level: LimitLevel,
}

impl SpendingLimitStatus {
    const WARNING_PERCENT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

    pub fn evaluate(spent: Decimal, limit: Decimal) -> Self {
        let progress_percent = if limit > Decimal::ZERO {
            spent
                .checked_div(limit)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::MAX)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        } else if spent > Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        let level = if spent > limit {
            LimitLevel::Exceeded
        } else if progress_percent >= Self::WARNING_PERCENT {
            LimitLevel::Warning
        } else {
            LimitLevel::Under
        };

        Self {
            spent,
            limit,
            progress_percent,
            level,
        }
    }
}

/// Dashboard figures for a single month
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub month: YearMonth,
    /// Everything attributed to the month, installments by due date
    pub total_spending: Decimal,
    /// Portion of `total_spending` coming from installment purchases
    pub installment_total: Decimal,
    pub daily_average: Decimal,
    pub by_category: Vec<CategoryShare>,
    pub limit_status: SpendingLimitStatus,
    pub largest_expense: Option<Transaction>,
}

/// Preset period a trend report covers, ending today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrendRange {
    #[serde(rename = "1month")]
    OneMonth,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[default]
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "1year")]
    OneYear,
}

impl TrendRange {
    /// First day covered when the report ends on `today`
    ///
    /// The one-month range goes back to the same day of the previous month
    /// (clamped); longer ranges start on the first day of the starting month.
    pub fn start_date(&self, today: NaiveDate) -> NaiveDate {
        let month = YearMonth::of(today);
        let start = match self {
            TrendRange::OneMonth => month
                .add_months(-1)
                .and_then(|m| m.day_clamped(chrono::Datelike::day(&today))),
            TrendRange::ThreeMonths => month.add_months(-3).map(|m| m.first_day()),
            TrendRange::SixMonths => month.add_months(-6).map(|m| m.first_day()),
            TrendRange::OneYear => month.add_months(-12).map(|m| m.first_day()),
        };
        start.unwrap_or(NaiveDate::MIN)
    }
}

/// Spending trend over a preset range
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub range: TrendRange,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Zero-filled, chronological
    pub months: Vec<MonthlyTotal>,
    pub by_category: Vec<CategoryShare>,
    pub summary: SpendingSummary,
}

/// Day-by-day spending ending on `end_date`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Zero-filled, chronological
    pub days: Vec<DailyTotal>,
    pub total: Decimal,
    pub average: Decimal,
}
