pub mod graphql;
pub mod handlers;

use axum::extract::FromRef;
use contracts::remitos::ReportConfig;

use graphql::AppSchema;

/// Shared state of the HTTP layer.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub schema: AppSchema,
    pub report: ReportConfig,
}
