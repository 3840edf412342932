use chrono::{Days, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;
use tracing::warn;

use crate::core::{checked_sum, AppError, Result, YearMonth};
use crate::modules::reports::models::{CategoryShare, DailyTotal, MonthlyTotal};
use crate::modules::transactions::models::{Category, Transaction};

/// Attributes transaction amounts to calendar periods
///
/// Plain transactions count in full on their purchase date. Installment
/// purchases count one installment at a time, on each installment's due date,
/// so a purchase contributes to every month its series touches.
///
/// Sums never panic: a term that would overflow a running total is logged
/// and left out.
pub struct MonthlyAggregator;

impl MonthlyAggregator {
    /// Longest window `daily_totals` accepts
    pub const MAX_DAILY_WINDOW: u32 = 366;

    /// Total attributable to `year_month`
    pub fn aggregate_for_month(transactions: &[Transaction], year_month: YearMonth) -> Decimal {
        Self::sum_where(transactions, |date| year_month.contains(date))
    }

    /// Total attributable to the inclusive range `start..=end`
    pub fn aggregate_for_range(transactions: &[Transaction], start: NaiveDate, end: NaiveDate) -> Decimal {
        Self::sum_where(transactions, |date| date >= start && date <= end)
    }

    /// Sum of installments due in `year_month`, ignoring plain transactions
    pub fn installment_total_for_month(transactions: &[Transaction], year_month: YearMonth) -> Decimal {
        checked_sum(
            transactions
                .iter()
                .filter(|t| t.has_installments())
                .flat_map(attributions)
                .filter(|(date, _)| year_month.contains(*date))
                .map(|(_, amount)| amount),
        )
    }

    /// Per-month totals for every month from `from` to `to`, zero-filled
    pub fn monthly_totals(
        transactions: &[Transaction],
        from: YearMonth,
        to: YearMonth,
    ) -> Result<Vec<MonthlyTotal>> {
        Self::monthly_totals_between(transactions, from.first_day(), to.last_day())
    }

    /// Per-month totals for the inclusive date range, one entry per touched month
    pub fn monthly_totals_between(
        transactions: &[Transaction],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MonthlyTotal>> {
        if start > end {
            return Err(AppError::validation(format!(
                "start ({}) must be before or equal to end ({})",
                start, end
            )));
        }

        let mut totals: BTreeMap<YearMonth, Decimal> = BTreeMap::new();
        let mut month = YearMonth::of(start);
        let last = YearMonth::of(end);
        while month <= last {
            totals.insert(month, Decimal::ZERO);
            month = month.next()?;
        }

        for (date, amount) in transactions.iter().flat_map(attributions) {
            if date >= start && date <= end {
                let total = totals.entry(YearMonth::of(date)).or_default();
                *total = checked_sum([*total, amount]);
            }
        }

        Ok(totals
            .into_iter()
            .map(|(month, total)| MonthlyTotal { month, total })
            .collect())
    }

    /// Per-day totals for the `days` days ending on `end`, zero-filled
    pub fn daily_totals(transactions: &[Transaction], end: NaiveDate, days: u32) -> Result<Vec<DailyTotal>> {
        if days == 0 || days > Self::MAX_DAILY_WINDOW {
            return Err(AppError::validation(format!(
                "days must be between 1 and {}, got {}",
                Self::MAX_DAILY_WINDOW,
                days
            )));
        }
        let start = end
            .checked_sub_days(Days::new(u64::from(days - 1)))
            .ok_or_else(|| AppError::validation(format!("{} days before {} is out of range", days, end)))?;

        let mut totals: BTreeMap<NaiveDate, Decimal> =
            start.iter_days().take(days as usize).map(|d| (d, Decimal::ZERO)).collect();

        for (date, amount) in transactions.iter().flat_map(attributions) {
            if let Some(total) = totals.get_mut(&date) {
                *total = checked_sum([*total, amount]);
            }
        }

        Ok(totals
            .into_iter()
            .map(|(date, total)| DailyTotal { date, total })
            .collect())
    }

    /// Category shares of the spending attributed to `year_month`
    pub fn category_breakdown(transactions: &[Transaction], year_month: YearMonth) -> Vec<CategoryShare> {
        Self::category_breakdown_between(transactions, year_month.first_day(), year_month.last_day())
    }

    /// Category shares of the inclusive date range, largest amount first
    pub fn category_breakdown_between(
        transactions: &[Transaction],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<CategoryShare> {
        let mut by_category: BTreeMap<Category, Decimal> = BTreeMap::new();
        for transaction in transactions {
            let amount = checked_sum(
                attributions(transaction)
                    .into_iter()
                    .filter(|(date, _)| *date >= start && *date <= end)
                    .map(|(_, amount)| amount),
            );
            if !amount.is_zero() {
                let category_total = by_category.entry(transaction.category).or_default();
                *category_total = checked_sum([*category_total, amount]);
            }
        }

        let total = checked_sum(by_category.values().copied());
        let mut shares: Vec<CategoryShare> = by_category
            .into_iter()
            .map(|(category, amount)| CategoryShare {
                category,
                amount,
                percentage: percentage_of(amount, total),
            })
            .collect();
        shares.sort_by(|a, b| b.amount.cmp(&a.amount));
        shares
    }

    /// Greatest purchase among transactions attributed to `year_month`
    ///
    /// Compares full purchase amounts; the earliest listed wins ties.
    pub fn largest_expense(transactions: &[Transaction], year_month: YearMonth) -> Option<&Transaction> {
        transactions
            .iter()
            .filter(|t| attributions(t).iter().any(|(date, _)| year_month.contains(*date)))
            .reduce(|max, t| if t.amount > max.amount { t } else { max })
    }

    fn sum_where(transactions: &[Transaction], in_period: impl Fn(NaiveDate) -> bool) -> Decimal {
        checked_sum(
            transactions
                .iter()
                .flat_map(attributions)
                .filter(|(date, _)| in_period(*date))
                .map(|(_, amount)| amount),
        )
    }
}

/// `(date, amount)` pairs a transaction contributes
///
/// Installments without a usable amount contribute zero.
fn attributions(transaction: &Transaction) -> Vec<(NaiveDate, Decimal)> {
    match &transaction.installments {
        None => vec![(transaction.date, transaction.amount)],
        Some(installments) => installments
            .iter()
            .map(|installment| {
                let amount = installment
                    .checked_amount(&transaction.id)
                    .unwrap_or_else(|err| {
                        warn!(error = %err, "Skipping malformed installment");
                        Decimal::ZERO
                    });
                (installment.due_date, amount)
            })
            .collect(),
    }
}

fn percentage_of(amount: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    amount
        .checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
