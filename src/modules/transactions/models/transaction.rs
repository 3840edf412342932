use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::core::{AppError, YearMonth};
use crate::modules::installments::models::Installment;

/// Spending category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Shopping,
    Transport,
    Entertainment,
    Housing,
    Utilities,
    Health,
    /// Also used for unrecognized persisted values
    #[serde(other)]
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Shopping,
        Category::Transport,
        Category::Entertainment,
        Category::Housing,
        Category::Utilities,
        Category::Health,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Shopping => "shopping",
            Self::Transport => "transport",
            Self::Entertainment => "entertainment",
            Self::Housing => "housing",
            Self::Utilities => "utilities",
            Self::Health => "health",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| AppError::validation(format!("Invalid category: {}", s)))
    }
}

/// Stored transaction record
///
/// Installment fields are only present for credit purchases split into more
/// than one installment; they are always derived together by the
/// materializer and never edited on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub description: String,
    /// Full purchase amount
    pub amount: Decimal,
    /// Purchase date
    pub date: NaiveDate,
    pub category: Category,
    /// Id of the referenced payment method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// Month of the first installment's due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_month: Option<YearMonth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<Vec<Installment>>,
    /// Amount of installment #1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_installments: Option<u32>,
}

impl Transaction {
    /// Installment series, empty for plain transactions
    pub fn installments(&self) -> &[Installment] {
        self.installments.as_deref().unwrap_or(&[])
    }

    pub fn has_installments(&self) -> bool {
        self.installments.is_some()
    }

    pub fn references(&self, payment_method_id: &str) -> bool {
        self.payment_method.as_deref() == Some(payment_method_id)
    }

    /// Description with the installment count marker, e.g. `TV (10x)`
    ///
    /// Older records may already carry the marker in the stored text; it is
    /// not appended twice.
    pub fn display_description(&self) -> String {
        match self.total_installments {
            Some(count) if self.has_installments() => {
                let marker = format!(" ({}x)", count);
                if self.description.ends_with(&marker) {
                    self.description.clone()
                } else {
                    format!("{}{}", self.description, marker)
                }
            }
            _ => self.description.clone(),
        }
    }

    /// Per-statement amount for installment purchases, full amount otherwise
    pub fn display_amount(&self) -> Decimal {
        self.installment_amount.unwrap_or(self.amount)
    }
}

/// Transaction as submitted for creation or replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Category,
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Requested installment count; only honored for credit payment methods
    #[serde(default)]
    pub total_installments: Option<u32>,
}

/// Field the transaction list is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Search and ordering options for listing transactions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionQuery {
    /// Case-insensitive match on description or category name
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub direction: SortDirection,
}

impl TransactionQuery {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let needle = match self.search.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_lowercase(),
            _ => return true,
        };

        transaction.description.to_lowercase().contains(&needle)
            || transaction.category.as_str().contains(&needle)
    }

    pub fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        let ordering = match self.sort {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Amount => a.amount.cmp(&b.amount),
        };

        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Filter and order `transactions`; ties keep their store order
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        let mut selected: Vec<&Transaction> =
            transactions.iter().filter(|t| self.matches(t)).collect();
        selected.sort_by(|a, b| self.compare(a, b));
        selected
    }
}
