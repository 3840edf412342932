use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::store::SharedStore;

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub store: String,
    pub application: String,
    pub transactions: usize,
}

/// GET /health
/// Returns 200 while the store can be locked, 503 once its lock is poisoned
pub async fn health_check(store: web::Data<SharedStore>) -> impl Responder {
    let (store_status, transactions) = match store.lock() {
        Ok(store) => ("healthy", store.transactions().len()),
        Err(_) => {
            tracing::error!("Health check found the transaction store lock poisoned");
            ("unavailable", 0)
        }
    };
    let healthy = store_status == "healthy";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        checks: HealthChecks {
            store: store_status.to_string(),
            application: "healthy".to_string(),
            transactions,
        },
    };

    if healthy {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
