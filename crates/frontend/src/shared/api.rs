//! REST client for the configuration endpoints.
//!
//! Config documents are optional on the server: a 404 is a normal "not
//! configured yet" answer, not an error.

use contracts::remitos::ReportConfig;
use contracts::table_config::{SpecificConfig, StandardConfig};
use gloo_net::http::Request;

const CONFIG_BASE: &str = "/api/config";

/// Load the tenant-wide standard config. `Ok(None)` when none exists yet.
pub async fn get_standard_config() -> Result<Option<StandardConfig>, String> {
    let resp = Request::get(&format!("{CONFIG_BASE}/table-defaults"))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if resp.status() == 404 {
        return Ok(None);
    }
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    resp.json().await.map(Some).map_err(|e| e.to_string())
}

/// Ask the server to re-derive the standard config from the live SQL columns.
pub async fn derive_standard_config() -> Result<StandardConfig, String> {
    let resp = Request::post(&format!("{CONFIG_BASE}/table-defaults/derive"))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    resp.json().await.map_err(|e| e.to_string())
}

/// Load the per-installation specific config. `Ok(None)` when none exists.
pub async fn get_specific_config() -> Result<Option<SpecificConfig>, String> {
    let resp = Request::get(&format!("{CONFIG_BASE}/table-customizations"))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if resp.status() == 404 {
        return Ok(None);
    }
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    resp.json().await.map(Some).map_err(|e| e.to_string())
}

/// Persist the specific config.
pub async fn put_specific_config(config: &SpecificConfig) -> Result<(), String> {
    let resp = Request::post(&format!("{CONFIG_BASE}/table-customizations"))
        .json(config)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    Ok(())
}

/// Proxied URL of the report PDF for one remito.
pub fn report_proxy_url(sdhnum: &str) -> String {
    format!("/proxy-getrpt?sdhnum={sdhnum}")
}

/// Fetch the report for a remito through the proxy. The sign view embeds the
/// same URL in an iframe, which swallows proxy failures; this call surfaces
/// them before navigation.
pub async fn check_report(sdhnum: &str) -> Result<(), String> {
    let resp = Request::get(&report_proxy_url(sdhnum))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    Ok(())
}

/// Report-service endpoint data used to build the signable PDF URL.
pub async fn get_report_config() -> Result<ReportConfig, String> {
    Request::get(&format!("{CONFIG_BASE}/report"))
        .send()
        .await
        .map_err(|e| e.to_string())?
        .json()
        .await
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_proxy_url_targets_the_proxy_endpoint() {
        assert_eq!(report_proxy_url("R-0001"), "/proxy-getrpt?sdhnum=R-0001");
    }
}
