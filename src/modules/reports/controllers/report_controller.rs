use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::core::{AppError, YearMonth};
use crate::modules::reports::models::TrendRange;
use crate::modules::reports::services::ReportService;
use crate::store::{lock_store, SharedStore};

/// Query parameters for the trend endpoint
#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    #[serde(default)]
    pub range: TrendRange,
    /// Last day covered (format: YYYY-MM-DD); defaults to the current UTC date
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Query parameters for the daily endpoint
#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    #[serde(default = "default_days")]
    pub days: u32,
    /// Last day covered (format: YYYY-MM-DD); defaults to the current UTC date
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

fn default_days() -> u32 {
    7
}

/// GET /v1/reports/monthly/{year_month}
pub async fn get_monthly_report(
    store: web::Data<SharedStore>,
    reports: web::Data<ReportService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let month: YearMonth = path.into_inner().parse()?;
    let store = lock_store(&store)?;
    let report = reports.monthly_report(store.transactions(), month);

    Ok(HttpResponse::Ok().json(report))
}

/// GET /v1/reports/trend?range=1month|3months|6months|1year&today=YYYY-MM-DD
pub async fn get_trend_report(
    store: web::Data<SharedStore>,
    reports: web::Data<ReportService>,
    query: web::Query<TrendQuery>,
) -> Result<HttpResponse, AppError> {
    let today = query.today.unwrap_or_else(|| Utc::now().date_naive());
    let store = lock_store(&store)?;
    let report = reports.trend_report(store.transactions(), query.range, today)?;

    Ok(HttpResponse::Ok().json(report))
}

/// GET /v1/reports/daily?days=7&today=YYYY-MM-DD
pub async fn get_daily_report(
    store: web::Data<SharedStore>,
    reports: web::Data<ReportService>,
    query: web::Query<DailyQuery>,
) -> Result<HttpResponse, AppError> {
    let today = query.today.unwrap_or_else(|| Utc::now().date_naive());
    let store = lock_store(&store)?;
    let report = reports.daily_report(store.transactions(), today, query.days)?;

    Ok(HttpResponse::Ok().json(report))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("/monthly/{year_month}", web::get().to(get_monthly_report))
            .route("/trend", web::get().to(get_trend_report))
            .route("/daily", web::get().to(get_daily_report)),
    );
}
