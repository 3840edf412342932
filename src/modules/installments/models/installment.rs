use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::core::{AppError, Result, YearMonth};

/// One dated sub-payment of a credit-card purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    /// Sequential number (1, 2, 3...)
    pub installment_number: u32,
    /// `None` when the persisted record carried no usable amount
    #[serde(
        default,
        deserialize_with = "lenient_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    /// Statement due date this installment is billed on
    pub due_date: NaiveDate,
}

impl Installment {
    pub fn new(installment_number: u32, amount: Decimal, due_date: NaiveDate) -> Self {
        Self {
            installment_number,
            amount: Some(amount),
            due_date,
        }
    }

    /// Amount of this installment, or `MalformedInstallmentRecord` if it has none
    pub fn checked_amount(&self, transaction_id: &str) -> Result<Decimal> {
        self.amount.ok_or_else(|| AppError::MalformedInstallmentRecord {
            transaction_id: transaction_id.to_string(),
            installment_number: self.installment_number,
        })
    }

    /// Statement month the installment is due in
    pub fn due_month(&self) -> YearMonth {
        YearMonth::of(self.due_date)
    }
}

/// Accepts JSON numbers and numeric strings, anything else becomes `None`
fn lenient_amount<'de, D>(deserializer: D) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let parsed = match value {
        serde_json::Value::Number(number) => parse_decimal(&number.to_string()),
        serde_json::Value::String(text) => parse_decimal(text.trim()),
        _ => None,
    };
    Ok(parsed)
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Closing/due-day pair describing a card's monthly statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingCycle {
    /// Last day of the cycle; purchases after it roll to the next statement
    pub closing_day: u32,
    /// Day of month the statement is due
    pub due_day: u32,
}

impl BillingCycle {
    pub const DEFAULT_CLOSING_DAY: u32 = 4;
    pub const DEFAULT_DUE_DAY: u32 = 11;

    pub fn new(closing_day: u32, due_day: u32) -> Result<Self> {
        let cycle = Self {
            closing_day,
            due_day,
        };
        cycle.validate()?;
        Ok(cycle)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=31).contains(&self.closing_day) {
            return Err(AppError::validation(format!(
                "Closing day must be between 1 and 31, got {}",
                self.closing_day
            )));
        }

        if !(1..=31).contains(&self.due_day) {
            return Err(AppError::validation(format!(
                "Due day must be between 1 and 31, got {}",
                self.due_day
            )));
        }

        Ok(())
    }
}

impl Default for BillingCycle {
    fn default() -> Self {
        Self {
            closing_day: Self::DEFAULT_CLOSING_DAY,
            due_day: Self::DEFAULT_DUE_DAY,
        }
    }
}
