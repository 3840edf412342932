use chrono::{Datelike, NaiveDate};

use crate::core::{AppError, Result, YearMonth};
use crate::modules::installments::models::BillingCycle;

/// Statement month a purchase is billed in
///
/// A purchase made after the closing day lands on the next month's statement,
/// one made on or before it stays on the current month's.
pub fn statement_for_purchase(purchase_date: NaiveDate, cycle: &BillingCycle) -> Result<YearMonth> {
    let current = YearMonth::of(purchase_date);
    if purchase_date.day() > cycle.closing_day {
        current.next()
    } else {
        Ok(current)
    }
}

/// Due date of the installment at `installment_offset` (0-based) of a purchase
///
/// The day is fixed to the cycle's due day, clamped to the last day of the
/// resolved month when that month is shorter.
pub fn resolve_statement_month(
    purchase_date: NaiveDate,
    cycle: &BillingCycle,
    installment_offset: u32,
) -> Result<NaiveDate> {
    let offset = i32::try_from(installment_offset)
        .map_err(|_| AppError::validation("Installment offset is too large"))?;

    let statement = statement_for_purchase(purchase_date, cycle)?.add_months(offset)?;

    statement.day_clamped(cycle.due_day)
}
