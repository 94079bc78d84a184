//! Table column configuration documents and their merge.
//!
//! Two documents drive the remitos table: a tenant-wide *standard* config and
//! a per-installation *specific* config layered on top. The merge result is
//! never persisted; it is recomputed whenever either input changes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Field name of the signed-status flag column in the remitos table.
pub const SIGNED_COLUMN: &str = "XX6FLSIGN_0";

/// Canonical value of the signed-status filter selecting unsigned remitos.
pub const FIRMADO_NO: &str = "no-firmados";
/// Canonical value of the signed-status filter selecting signed remitos.
pub const FIRMADO_SI: &str = "si-firmados";

fn default_true() -> bool {
    true
}

/// Rendered data type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Select,
    Date,
    Number,
}

/// Kind of filter widget a column exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    #[default]
    Text,
    Select,
}

/// One entry of a select-type filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// A single column of the remitos table.
///
/// `field` doubles as the SQL identifier selected by the dynamic query and
/// must be unique within a column list. Render order is the stable sort by
/// `position` (positions need not be contiguous).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbColumn {
    pub field: String,
    pub label: String,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    #[serde(default = "default_width")]
    pub width: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "default_true")]
    pub filterable: bool,
    #[serde(default)]
    pub filter_type: FilterType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub filter_options: Option<Vec<FilterOption>>,
    #[serde(default = "default_true")]
    pub sortable: bool,
}

fn default_width() -> String {
    "120px".to_string()
}

/// Partial column used in the specific config: every present key overrides
/// the matching key of the base column, absent keys keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnOverride {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub column_type: Option<ColumnType>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub position: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub filterable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub filter_type: Option<FilterType>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub filter_options: Option<Vec<FilterOption>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sortable: Option<bool>,
}

/// Free-form settings bag merged key-by-key (specific wins).
pub type TableSettings = BTreeMap<String, Value>;

/// Extra filter widget a site defines outside the column set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFilter {
    pub field: String,
    pub label: String,
    #[serde(default)]
    pub options: Vec<FilterOption>,
}

/// Tenant-wide default configuration. Loaded once per session; mutated only
/// by administrative re-derivation from the live SQL column set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardConfig {
    pub version: String,
    pub client: String,
    pub last_modified: String,
    pub table: StandardTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardTable {
    #[serde(default)]
    pub db_columns: Vec<DbColumn>,
    #[serde(default)]
    pub settings: TableSettings,
}

/// Per-installation customization persisted back to the server on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificConfig {
    pub version: String,
    pub client: String,
    pub last_modified: String,
    pub table: SpecificTable,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificTable {
    #[serde(default)]
    pub column_overrides: BTreeMap<String, ColumnOverride>,
    #[serde(default)]
    pub custom_filters: Vec<CustomFilter>,
    #[serde(default)]
    pub settings: TableSettings,
}

/// Merge result. Ephemeral: recreated on every merge call, never mutated in
/// place by two callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedConfig {
    pub db_columns: Vec<DbColumn>,
    pub settings: TableSettings,
}

/// The three canonical options of the signed-status select filter.
pub fn firmado_filter_options() -> Vec<FilterOption> {
    vec![
        FilterOption {
            value: FIRMADO_NO.to_string(),
            label: "No firmados".to_string(),
        },
        FilterOption {
            value: FIRMADO_SI.to_string(),
            label: "Firmados".to_string(),
        },
        FilterOption {
            value: String::new(),
            label: "Todos".to_string(),
        },
    ]
}

/// Combine the standard and specific configs into the merged column list.
///
/// Both absent returns `None`: the caller must surface the "no configuration
/// yet" state instead of synthesizing defaults silently.
///
/// With only the specific config present, every override entry synthesizes a
/// full column from documented defaults. With both present, overrides are
/// shallow-merged onto matching standard columns and unmatched override
/// fields are ignored. The asymmetry is intentional: a brand-new install can
/// define its whole column set from overrides alone, while an established
/// one treats the standard document as the authoritative column universe.
pub fn merge(
    standard: Option<&StandardConfig>,
    specific: Option<&SpecificConfig>,
) -> Option<MergedConfig> {
    let mut merged = match (standard, specific) {
        (None, None) => return None,
        (None, Some(sp)) => MergedConfig {
            db_columns: sp
                .table
                .column_overrides
                .iter()
                .map(|(field, o)| synthesize_column(field, o))
                .collect(),
            settings: sp.table.settings.clone(),
        },
        (Some(st), None) => MergedConfig {
            db_columns: st.table.db_columns.clone(),
            settings: st.table.settings.clone(),
        },
        (Some(st), Some(sp)) => {
            let db_columns = st
                .table
                .db_columns
                .iter()
                .map(|base| match sp.table.column_overrides.get(&base.field) {
                    Some(over) => apply_override(base, over),
                    None => base.clone(),
                })
                .collect();

            let mut settings = st.table.settings.clone();
            for (key, value) in &sp.table.settings {
                settings.insert(key.clone(), value.clone());
            }

            MergedConfig {
                db_columns,
                settings,
            }
        }
    };

    // Render order is the position total order; Vec::sort_by_key is stable so
    // equal positions keep their original relative order.
    merged.db_columns.sort_by_key(|c| c.position);
    Some(merged)
}

/// Shallow merge of an override onto a base column, key by key.
fn apply_override(base: &DbColumn, over: &ColumnOverride) -> DbColumn {
    DbColumn {
        field: base.field.clone(),
        label: over.label.clone().unwrap_or_else(|| base.label.clone()),
        column_type: over.column_type.unwrap_or(base.column_type),
        width: over.width.clone().unwrap_or_else(|| base.width.clone()),
        visible: over.visible.unwrap_or(base.visible),
        position: over.position.unwrap_or(base.position),
        filterable: over.filterable.unwrap_or(base.filterable),
        filter_type: over.filter_type.unwrap_or(base.filter_type),
        filter_options: over
            .filter_options
            .clone()
            .or_else(|| base.filter_options.clone()),
        sortable: over.sortable.unwrap_or(base.sortable),
    }
}

/// Build a whole column from an override entry with no base column.
fn synthesize_column(field: &str, over: &ColumnOverride) -> DbColumn {
    let is_signed = field == SIGNED_COLUMN;

    DbColumn {
        field: field.to_string(),
        label: over.label.clone().unwrap_or_else(|| field.to_string()),
        column_type: over.column_type.unwrap_or_default(),
        width: over.width.clone().unwrap_or_else(default_width),
        visible: over.visible.unwrap_or(true),
        position: over.position.unwrap_or(0),
        filterable: over.filterable.unwrap_or(true),
        filter_type: over
            .filter_type
            .unwrap_or(if is_signed { FilterType::Select } else { FilterType::Text }),
        filter_options: over.filter_options.clone().or_else(|| {
            is_signed.then(firmado_filter_options)
        }),
        sortable: over.sortable.unwrap_or(true),
    }
}
