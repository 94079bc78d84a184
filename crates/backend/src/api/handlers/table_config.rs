use axum::{http::StatusCode, Json};
use contracts::table_config::{SpecificConfig, StandardConfig};

use crate::domain::table_config::service;

/// GET /api/config/table-defaults
pub async fn get_standard() -> Result<Json<StandardConfig>, StatusCode> {
    match service::load_standard().await {
        Ok(Some(config)) => Ok(Json(config)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("failed to load standard table config: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/config/table-defaults
pub async fn put_standard(Json(config): Json<StandardConfig>) -> Result<StatusCode, StatusCode> {
    match service::save_standard(&config).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            tracing::error!("failed to save standard table config: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/config/table-defaults/derive
///
/// Administrative re-derivation of the standard config from the live SQL
/// column set of the remitos table.
pub async fn derive_standard() -> Result<Json<StandardConfig>, StatusCode> {
    match service::derive_standard_from_sql_columns().await {
        Ok(config) => {
            tracing::info!(
                "standard table config re-derived: {} columns",
                config.table.db_columns.len()
            );
            Ok(Json(config))
        }
        Err(e) => {
            tracing::error!("failed to derive standard table config: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/config/table-customizations
pub async fn get_specific() -> Result<Json<SpecificConfig>, StatusCode> {
    match service::load_specific().await {
        Ok(Some(config)) => Ok(Json(config)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("failed to load specific table config: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/config/table-customizations
pub async fn put_specific(Json(config): Json<SpecificConfig>) -> Result<StatusCode, StatusCode> {
    match service::save_specific(&config).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            tracing::error!("failed to save specific table config: {e}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
