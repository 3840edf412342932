use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use spendwise::config::{Config, LogFormat};
use spendwise::modules::reports::ReportService;
use spendwise::{routes, JsonFileStorage, StoreSettings, TransactionStore};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    init_tracing(&config);

    tracing::info!("Starting Spendwise expense tracker");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let storage = JsonFileStorage::open(&config.store.data_dir).with_context(|| {
        format!("Failed to open data directory {}", config.store.data_dir.display())
    })?;
    let settings = StoreSettings {
        default_cycle: config.store.billing_cycle,
        currency: config.store.currency,
    };
    let store = TransactionStore::open(storage, settings).context("Failed to load stored data")?;
    let store = web::Data::new(Mutex::new(store));
    let reports = web::Data::new(ReportService::new(
        config.store.currency,
        config.store.spending_limit,
    ));

    tracing::info!(
        data_dir = %config.store.data_dir.display(),
        closing_day = config.store.billing_cycle.closing_day,
        due_day = config.store.billing_cycle.due_day,
        spending_limit = %config.store.spending_limit,
        "Store ready"
    );

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(store.clone())
            .app_data(reports.clone())
            .configure(routes::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await.context("Server terminated with an error")
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("spendwise={},actix_web=info", config.app.log_level).into());
    let registry = tracing_subscriber::registry().with(filter);

    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
