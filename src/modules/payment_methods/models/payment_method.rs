use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};
use crate::modules::installments::models::BillingCycle;

/// Kind of payment method; only `Credit` activates installments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethodKind {
    Credit,
    Debit,
    Cash,
    Other,
}

impl PaymentMethodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
            Self::Cash => "cash",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for PaymentMethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A way of paying that transactions can reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PaymentMethodKind,
    /// Display color, e.g. `#ef4444`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Card-specific cycle; the store default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_cycle: Option<BillingCycle>,
}

impl PaymentMethod {
    pub fn is_credit(&self) -> bool {
        self.kind == PaymentMethodKind::Credit
    }

    /// Cycle to bill this method's purchases on
    pub fn billing_cycle_or(&self, default: BillingCycle) -> BillingCycle {
        self.billing_cycle.unwrap_or(default)
    }
}

/// Payment method as submitted for creation, before an id is assigned
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPaymentMethod {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PaymentMethodKind,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub billing_cycle: Option<BillingCycle>,
}

impl NewPaymentMethod {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Payment method name cannot be empty"));
        }

        if let Some(cycle) = &self.billing_cycle {
            if self.kind != PaymentMethodKind::Credit {
                return Err(AppError::validation(
                    "Only credit payment methods can carry a billing cycle",
                ));
            }
            cycle.validate()?;
        }

        Ok(())
    }

    pub fn into_payment_method(self, id: String) -> PaymentMethod {
        PaymentMethod {
            id,
            name: self.name.trim().to_string(),
            kind: self.kind,
            color: self.color,
            billing_cycle: self.billing_cycle,
        }
    }
}

/// Methods a fresh store starts with
pub fn default_payment_methods() -> Vec<PaymentMethod> {
    [
        ("cash", "Cash", PaymentMethodKind::Cash, "#22c55e"),
        ("debit", "Debit Card", PaymentMethodKind::Debit, "#3b82f6"),
        ("credit", "Credit Card", PaymentMethodKind::Credit, "#ef4444"),
    ]
    .into_iter()
    .map(|(id, name, kind, color)| PaymentMethod {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        color: Some(color.to_string()),
        billing_cycle: None,
    })
    .collect()
}
