use axum::{
    routing::{get, post},
    Router,
};

use crate::api::{self, graphql, handlers};

/// Route table of the application.
pub fn configure_routes(state: api::AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // GraphQL endpoint (remitosDynamic query, subirPdfBase64 mutation)
        .route("/graphql", post(graphql::graphql_handler))
        // Table configuration documents
        .route(
            "/api/config/table-defaults",
            get(handlers::table_config::get_standard).post(handlers::table_config::put_standard),
        )
        .route(
            "/api/config/table-defaults/derive",
            post(handlers::table_config::derive_standard),
        )
        .route(
            "/api/config/table-customizations",
            get(handlers::table_config::get_specific).post(handlers::table_config::put_specific),
        )
        // Report service
        .route("/api/config/report", get(handlers::report::get_report_config))
        .route("/proxy-getrpt", get(handlers::report::proxy_getrpt))
        .with_state(state)
}
