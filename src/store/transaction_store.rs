use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::core::traits::{StateStorage, PAYMENT_METHODS_KEY, TRANSACTIONS_KEY};
use crate::core::{AppError, Currency, Result, YearMonth};
use crate::modules::installments::models::BillingCycle;
use crate::modules::payment_methods::models::{default_payment_methods, NewPaymentMethod, PaymentMethod};
use crate::modules::reports::services::MonthlyAggregator;
use crate::modules::transactions::models::{Transaction, TransactionQuery, TransactionRequest};
use crate::modules::transactions::services::TransactionMaterializer;

/// Settings a store is opened with
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreSettings {
    /// Cycle for credit methods that carry none of their own
    pub default_cycle: BillingCycle,
    pub currency: Currency,
}

/// In-memory owner of one session's transactions and payment methods
///
/// Every successful mutation writes the affected collection back through the
/// injected [`StateStorage`]. Writes are fire-and-forget: a failed write is
/// logged and the in-memory state stays authoritative.
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    payment_methods: Vec<PaymentMethod>,
    materializer: TransactionMaterializer,
    storage: Box<dyn StateStorage>,
}

impl TransactionStore {
    /// Load both collections from `storage`
    ///
    /// A store that never saved payment methods starts with the default
    /// cash/debit/credit set.
    pub fn open(storage: impl StateStorage + 'static, settings: StoreSettings) -> Result<Self> {
        settings.default_cycle.validate()?;

        let transactions: Vec<Transaction> =
            load_collection(&storage, TRANSACTIONS_KEY)?.unwrap_or_default();
        let payment_methods = load_collection(&storage, PAYMENT_METHODS_KEY)?
            .unwrap_or_else(default_payment_methods);

        info!(
            transactions = transactions.len(),
            payment_methods = payment_methods.len(),
            currency = %settings.currency,
            "Transaction store opened"
        );

        Ok(Self {
            transactions,
            payment_methods,
            materializer: TransactionMaterializer::new(settings.default_cycle, settings.currency),
            storage: Box::new(storage),
        })
    }

    /// Transactions, newest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn find_transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn query_transactions(&self, query: &TransactionQuery) -> Vec<&Transaction> {
        query.apply(&self.transactions)
    }

    pub fn currency(&self) -> Currency {
        self.materializer.currency()
    }

    /// Record a new transaction and return the stored record
    pub fn add_transaction(&mut self, request: TransactionRequest) -> Result<Transaction> {
        let id = format!("tr-{}", Uuid::new_v4());
        let method = self.resolve_payment_method(request.payment_method.as_deref())?;
        let transaction = self.materializer.materialize(id, request, method)?;

        info!(
            transaction_id = transaction.id.as_str(),
            amount = %transaction.amount,
            installments = transaction.installments().len(),
            "Transaction added"
        );

        self.transactions.insert(0, transaction.clone());
        self.persist_transactions();

        Ok(transaction)
    }

    /// Replace transaction `id` with a record rebuilt from `request`
    ///
    /// The installment series is recomputed from scratch; nothing from the
    /// previous record survives except its id and position.
    pub fn update_transaction(&mut self, id: &str, request: TransactionRequest) -> Result<Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| AppError::not_found(format!("Transaction {}", id)))?;

        let method = self.resolve_payment_method(request.payment_method.as_deref())?;
        let transaction = self.materializer.materialize(id.to_string(), request, method)?;

        info!(
            transaction_id = id,
            amount = %transaction.amount,
            installments = transaction.installments().len(),
            "Transaction updated"
        );

        self.transactions[index] = transaction.clone();
        self.persist_transactions();

        Ok(transaction)
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<()> {
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| AppError::not_found(format!("Transaction {}", id)))?;

        self.transactions.remove(index);
        info!(transaction_id = id, "Transaction deleted");
        self.persist_transactions();

        Ok(())
    }

    /// Total attributable to `year_month` across all stored transactions
    pub fn aggregate_for_month(&self, year_month: YearMonth) -> Decimal {
        MonthlyAggregator::aggregate_for_month(&self.transactions, year_month)
    }

    pub fn list_payment_methods(&self) -> &[PaymentMethod] {
        &self.payment_methods
    }

    pub fn find_payment_method(&self, id: &str) -> Option<&PaymentMethod> {
        self.payment_methods.iter().find(|m| m.id == id)
    }

    pub fn add_payment_method(&mut self, request: NewPaymentMethod) -> Result<PaymentMethod> {
        request.validate()?;

        let method = request.into_payment_method(format!("pm-{}", Uuid::new_v4()));
        info!(
            payment_method_id = method.id.as_str(),
            kind = %method.kind,
            "Payment method added"
        );

        self.payment_methods.push(method.clone());
        self.persist_payment_methods();

        Ok(method)
    }

    /// Remove payment method `id` unless a transaction still references it
    pub fn delete_payment_method(&mut self, id: &str) -> Result<()> {
        let index = self
            .payment_methods
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| AppError::not_found(format!("Payment method {}", id)))?;

        let transaction_count = self.transactions.iter().filter(|t| t.references(id)).count();
        if transaction_count > 0 {
            warn!(
                payment_method_id = id,
                transaction_count, "Refusing to delete payment method in use"
            );
            return Err(AppError::PaymentMethodInUse {
                id: id.to_string(),
                transaction_count,
            });
        }

        self.payment_methods.remove(index);
        info!(payment_method_id = id, "Payment method deleted");
        self.persist_payment_methods();

        Ok(())
    }

    fn resolve_payment_method(&self, id: Option<&str>) -> Result<Option<&PaymentMethod>> {
        match id {
            None => Ok(None),
            Some(id) => self
                .find_payment_method(id)
                .map(Some)
                .ok_or_else(|| AppError::not_found(format!("Payment method {}", id))),
        }
    }

    fn persist_transactions(&mut self) {
        let written = save_collection(self.storage.as_mut(), TRANSACTIONS_KEY, &self.transactions);
        log_persist_failure(TRANSACTIONS_KEY, written);
    }

    fn persist_payment_methods(&mut self) {
        let written =
            save_collection(self.storage.as_mut(), PAYMENT_METHODS_KEY, &self.payment_methods);
        log_persist_failure(PAYMENT_METHODS_KEY, written);
    }
}

fn save_collection<T: Serialize>(storage: &mut dyn StateStorage, key: &str, collection: &[T]) -> Result<()> {
    let json = serde_json::to_string(collection)?;
    storage.save(key, &json)
}

fn log_persist_failure(key: &str, written: Result<()>) {
    if let Err(err) = written {
        error!(key, error = %err, "Failed to persist collection");
    }
}

fn load_collection<T: DeserializeOwned>(storage: &impl StateStorage, key: &str) -> Result<Option<Vec<T>>> {
    match storage.load(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}
