use actix_web::{web, HttpRequest};

use crate::core::AppError;
use crate::modules::{health, payment_methods, reports, transactions};

/// Mount every route; expects `web::Data<SharedStore>` and
/// `web::Data<ReportService>` to be registered on the app
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req: &HttpRequest| AppError::validation(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req: &HttpRequest| AppError::validation(err.to_string()).into()),
    )
    .configure(health::configure)
    .service(
        web::scope("/v1")
            .configure(payment_methods::controllers::configure)
            .configure(transactions::controllers::configure)
            .configure(reports::controllers::configure),
    );
}
