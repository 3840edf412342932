use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::payment_methods::models::NewPaymentMethod;
use crate::store::{lock_store, SharedStore};

/// List payment methods
/// GET /v1/payment-methods
pub async fn list_payment_methods(store: web::Data<SharedStore>) -> Result<HttpResponse, AppError> {
    let store = lock_store(&store)?;

    Ok(HttpResponse::Ok().json(store.list_payment_methods()))
}

/// Create a payment method
/// POST /v1/payment-methods
pub async fn create_payment_method(
    store: web::Data<SharedStore>,
    request: web::Json<NewPaymentMethod>,
) -> Result<HttpResponse, AppError> {
    let method = lock_store(&store)?.add_payment_method(request.into_inner())?;

    Ok(HttpResponse::Created().json(method))
}

/// Delete a payment method no transaction references
/// DELETE /v1/payment-methods/{id}
pub async fn delete_payment_method(
    store: web::Data<SharedStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    lock_store(&store)?.delete_payment_method(&path.into_inner())?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure payment method routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payment-methods")
            .route("", web::get().to(list_payment_methods))
            .route("", web::post().to(create_payment_method))
            .route("/{id}", web::delete().to(delete_payment_method)),
    );
}
