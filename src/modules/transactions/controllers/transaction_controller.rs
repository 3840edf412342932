use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::core::error::AppError;
use crate::core::MAX_AMOUNT;
use crate::modules::transactions::models::{Category, TransactionQuery, TransactionRequest};
use crate::store::{lock_store, SharedStore};

/// Request body for creating or replacing a transaction
///
/// `totalInstallments` is taken as a raw JSON number so a fractional or
/// negative count is reported as an installment-count error rather than a
/// generic parse failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Category,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub total_installments: Option<serde_json::Number>,
}

impl TryFrom<TransactionPayload> for TransactionRequest {
    type Error = AppError;

    fn try_from(payload: TransactionPayload) -> Result<Self, Self::Error> {
        if payload.description.trim().is_empty() {
            return Err(AppError::validation("Description cannot be empty"));
        }
        if payload.amount <= Decimal::ZERO {
            return Err(AppError::validation("Amount must be greater than zero"));
        }
        if payload.amount > MAX_AMOUNT {
            return Err(AppError::validation(format!(
                "Amount must not exceed {}",
                MAX_AMOUNT
            )));
        }

        let total_installments = payload
            .total_installments
            .map(|count| parse_installment_count(&count))
            .transpose()?;

        Ok(TransactionRequest {
            description: payload.description,
            amount: payload.amount,
            date: payload.date,
            category: payload.category,
            payment_method: payload.payment_method.filter(|id| !id.is_empty()),
            total_installments,
        })
    }
}

/// Whole, non-negative JSON numbers only; `3` and `3.0` are both accepted
fn parse_installment_count(count: &serde_json::Number) -> Result<u32, AppError> {
    count
        .as_u64()
        .or_else(|| {
            count
                .as_f64()
                .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= f64::from(u32::MAX))
                .map(|n| n as u64)
        })
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            AppError::invalid_installment_count(format!(
                "Installment count must be a positive whole number, got {}",
                count
            ))
        })
}

/// List transactions
/// GET /v1/transactions?search=&sort=date|amount&direction=asc|desc
pub async fn list_transactions(
    store: web::Data<SharedStore>,
    query: web::Query<TransactionQuery>,
) -> Result<HttpResponse, AppError> {
    let store = lock_store(&store)?;
    let transactions = store.query_transactions(&query);

    Ok(HttpResponse::Ok().json(transactions))
}

/// Record a transaction
/// POST /v1/transactions
pub async fn create_transaction(
    store: web::Data<SharedStore>,
    payload: web::Json<TransactionPayload>,
) -> Result<HttpResponse, AppError> {
    let request = TransactionRequest::try_from(payload.into_inner())?;
    let transaction = lock_store(&store)?.add_transaction(request)?;

    Ok(HttpResponse::Created().json(transaction))
}

/// Replace a transaction, recomputing its installments
/// PUT /v1/transactions/{id}
pub async fn update_transaction(
    store: web::Data<SharedStore>,
    path: web::Path<String>,
    payload: web::Json<TransactionPayload>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let request = TransactionRequest::try_from(payload.into_inner())?;
    let transaction = lock_store(&store)?.update_transaction(&id, request)?;

    Ok(HttpResponse::Ok().json(transaction))
}

/// DELETE /v1/transactions/{id}
pub async fn delete_transaction(
    store: web::Data<SharedStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    lock_store(&store)?.delete_transaction(&path.into_inner())?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure transaction routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/transactions")
            .route("", web::get().to(list_transactions))
            .route("", web::post().to(create_transaction))
            .route("/{id}", web::put().to(update_transaction))
            .route("/{id}", web::delete().to(delete_transaction)),
    );
}
