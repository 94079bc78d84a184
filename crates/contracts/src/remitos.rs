//! Wire shapes of the dynamic remitos operation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::pagination::PaginationState;

/// One row of the dynamic query: a JSON object keyed by the requested column
/// names. The column set varies per request, so rows stay schemaless here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemitoRow {
    pub data: Map<String, Value>,
}

impl RemitoRow {
    /// String form of a cell, empty when absent or null.
    pub fn text(&self, field: &str) -> String {
        match self.data.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

/// Response of the `remitosDynamic` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemitosPage {
    pub remitos: Vec<RemitoRow>,
    pub pagination: PaginationState,
}

/// Report-service endpoint configuration served by `/api/config/report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfig {
    pub base_url: String,
    pub report_name: String,
}
