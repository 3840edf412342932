use tracing::debug;

use crate::core::{AppError, Currency, Result, YearMonth, MAX_AMOUNT};
use crate::modules::installments::models::BillingCycle;
use crate::modules::installments::services::{validate_count, InstallmentCalculator};
use crate::modules::payment_methods::models::PaymentMethod;
use crate::modules::transactions::models::{Transaction, TransactionRequest};

/// Builds stored transaction records from requests
///
/// Materializing is a pure function of its inputs: running it twice on the
/// same request produces the same record, which is what makes updates a
/// plain full replace.
pub struct TransactionMaterializer {
    default_cycle: BillingCycle,
    currency: Currency,
}

impl TransactionMaterializer {
    pub fn new(default_cycle: BillingCycle, currency: Currency) -> Self {
        Self {
            default_cycle,
            currency,
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn default_cycle(&self) -> BillingCycle {
        self.default_cycle
    }

    /// Produce the record stored under `id` for `request`
    ///
    /// # Arguments
    /// * `id` - Identifier the record is stored under
    /// * `request` - Submitted transaction fields
    /// * `payment_method` - Resolved payment method referenced by the request, if any
    pub fn materialize(
        &self,
        id: String,
        request: TransactionRequest,
        payment_method: Option<&PaymentMethod>,
    ) -> Result<Transaction> {
        if let Some(count) = request.total_installments {
            validate_count(count)?;
        }

        if request.amount > MAX_AMOUNT {
            return Err(AppError::validation(format!(
                "Amount {} exceeds the maximum of {}",
                request.amount, MAX_AMOUNT
            )));
        }

        let amount = self.currency.round(request.amount);
        let mut transaction = Transaction {
            id,
            description: request.description,
            amount,
            date: request.date,
            category: request.category,
            payment_method: request.payment_method,
            due_month: None,
            installments: None,
            installment_amount: None,
            total_amount: None,
            total_installments: None,
        };

        let card = match payment_method {
            Some(method) if method.is_credit() => method,
            _ => return Ok(transaction),
        };

        let count = match request.total_installments {
            Some(count) if count > 1 => count,
            _ => return Ok(transaction),
        };

        let cycle = card.billing_cycle_or(self.default_cycle);
        let installments =
            InstallmentCalculator::split(amount, count, self.currency, transaction.date, &cycle)?;

        let first = &installments[0];
        debug!(
            transaction_id = transaction.id.as_str(),
            payment_method = card.id.as_str(),
            count,
            first_due = %first.due_date,
            "Materialized installment purchase"
        );

        transaction.due_month = Some(YearMonth::of(first.due_date));
        transaction.installment_amount = first.amount;
        transaction.total_amount = Some(amount);
        transaction.total_installments = Some(count);
        transaction.installments = Some(installments);

        Ok(transaction)
    }
}

impl Default for TransactionMaterializer {
    fn default() -> Self {
        Self::new(BillingCycle::default(), Currency::default())
    }
}
