use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use contracts::remitos::ReportConfig;
use serde::Deserialize;

/// GET /api/config/report
pub async fn get_report_config(State(report): State<ReportConfig>) -> Json<ReportConfig> {
    Json(report)
}

#[derive(Deserialize)]
pub struct GetRptParams {
    pub sdhnum: String,
}

/// GET /proxy-getrpt?sdhnum=...
///
/// Pass-through to the external report generator; the browser cannot call it
/// directly (CORS), so the backend relays the PDF bytes.
pub async fn proxy_getrpt(
    State(report): State<ReportConfig>,
    Query(params): Query<GetRptParams>,
) -> Result<impl IntoResponse, StatusCode> {
    let url = format!(
        "{}/{}?sdhnum={}",
        report.base_url, report.report_name, params.sdhnum
    );
    tracing::info!("proxying report request for {}", params.sdhnum);

    let response = reqwest::get(&url).await.map_err(|e| {
        tracing::error!("report service unreachable: {e}");
        StatusCode::BAD_GATEWAY
    })?;

    if !response.status().is_success() {
        tracing::error!("report service returned {}", response.status());
        return Err(StatusCode::BAD_GATEWAY);
    }

    let bytes = response.bytes().await.map_err(|e| {
        tracing::error!("failed reading report body: {e}");
        StatusCode::BAD_GATEWAY
    })?;

    Ok(([(header::CONTENT_TYPE, "application/pdf")], bytes))
}
