pub mod api;
pub mod domain;
pub mod routes;
pub mod shared;

use contracts::remitos::ReportConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::http::{header, Method};
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::services::ServeDir;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("backend.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                // Keep application logs, quiet the SQL layer.
                "info,sqlx=warn,sea_orm=warn".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    let config = shared::config::load_config()?;
    let db_path = shared::config::get_database_path(&config)?;
    shared::data::db::initialize_database(db_path.to_str())
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    // A fresh install gets a usable standard column set right away.
    domain::table_config::service::ensure_standard_default().await?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let state = api::AppState {
        schema: api::graphql::build_schema(),
        report: ReportConfig {
            base_url: config.report.base_url.clone(),
            report_name: config.report.report_name.clone(),
        },
    };

    let app = routes::configure_routes(state)
        .fallback_service(ServeDir::new("dist"))
        .layer(cors);

    let addr: SocketAddr = ([0, 0, 0, 0], 3000).into();
    tracing::info!("listening on http://{}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
