//! Client-side store of the two configuration documents.

use contracts::table_config::{
    merge, ColumnType, DbColumn, MergedConfig, SpecificConfig, StandardConfig, SIGNED_COLUMN,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api;

#[derive(Clone, Copy)]
pub struct ConfigStore {
    pub standard: RwSignal<Option<StandardConfig>>,
    pub specific: RwSignal<Option<SpecificConfig>>,
    /// Bumped on every configuration edit; the table treats a bump as a
    /// forced header regeneration.
    pub generation: RwSignal<u32>,
    pub loaded: RwSignal<bool>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self {
            standard: RwSignal::new(None),
            specific: RwSignal::new(None),
            generation: RwSignal::new(0),
            loaded: RwSignal::new(false),
        }
    }

    /// Load both documents. A missing document or a failed request becomes
    /// `None`; the merge works from whatever half is available.
    pub fn load(self) {
        spawn_local(async move {
            match api::get_standard_config().await {
                Ok(standard) => self.standard.set(standard),
                Err(e) => {
                    log::warn!("standard config unavailable: {e}");
                    self.standard.set(None);
                }
            }
            match api::get_specific_config().await {
                Ok(specific) => self.specific.set(specific),
                Err(e) => {
                    log::warn!("specific config unavailable: {e}");
                    self.specific.set(None);
                }
            }
            self.loaded.set(true);
        });
    }

    /// Recompute the merged view of both documents.
    pub fn merged(&self) -> Option<MergedConfig> {
        let standard = self.standard.get();
        let specific = self.specific.get();
        merge(standard.as_ref(), specific.as_ref())
    }

    pub fn bump_generation(&self) {
        self.generation.update(|g| *g += 1);
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Document number column; row actions need it on every fetch.
pub const NUMBER_COLUMN: &str = "SDHNUM_0";

/// Visible columns in render order.
pub fn visible_columns(config: &MergedConfig) -> Vec<DbColumn> {
    config
        .db_columns
        .iter()
        .filter(|c| c.visible)
        .cloned()
        .collect()
}

/// Fields to request from the server: the visible columns plus the document
/// number and signed flag, which the per-row sign action reads even when a
/// customization hides them.
pub fn request_fields(config: &MergedConfig) -> Vec<String> {
    let mut fields: Vec<String> = visible_columns(config)
        .iter()
        .map(|c| c.field.clone())
        .collect();
    for required in [NUMBER_COLUMN, SIGNED_COLUMN] {
        if !fields.iter().any(|f| f == required) {
            fields.push(required.to_string());
        }
    }
    fields
}

/// SQL fields of visible date columns, whose cells get display formatting.
pub fn date_fields(config: &MergedConfig) -> Vec<String> {
    config
        .db_columns
        .iter()
        .filter(|c| c.visible && c.column_type == ColumnType::Date)
        .map(|c| c.field.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::table_config::{FilterType, TableSettings};

    fn config() -> MergedConfig {
        let column = |field: &str, column_type: ColumnType, visible: bool| DbColumn {
            field: field.to_string(),
            label: field.to_string(),
            column_type,
            width: "120px".to_string(),
            visible,
            position: 0,
            filterable: true,
            filter_type: FilterType::Text,
            filter_options: None,
            sortable: true,
        };
        MergedConfig {
            db_columns: vec![
                column("SDHNUM_0", ColumnType::Text, true),
                column("DLVDAT_0", ColumnType::Date, true),
                column("HIDDEN_DATE_0", ColumnType::Date, false),
            ],
            settings: TableSettings::new(),
        }
    }

    #[test]
    fn hidden_columns_are_excluded_from_the_view() {
        let visible = visible_columns(&config());
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|c| c.visible));
    }

    #[test]
    fn date_fields_only_cover_visible_date_columns() {
        assert_eq!(date_fields(&config()), vec!["DLVDAT_0".to_string()]);
    }

    #[test]
    fn required_columns_are_requested_exactly_once_when_visible() {
        let fields = request_fields(&config());
        assert_eq!(fields.iter().filter(|f| *f == NUMBER_COLUMN).count(), 1);
        assert!(!fields.contains(&"HIDDEN_DATE_0".to_string()));
    }

    #[test]
    fn hidden_signed_column_is_still_requested() {
        use contracts::remitos::RemitoRow;
        use contracts::table_config::{
            merge, ColumnOverride, SpecificConfig, SpecificTable, StandardConfig, StandardTable,
        };
        use std::collections::BTreeMap;

        let column = |field: &str, position: i32| {
            let mut c = config().db_columns.remove(0);
            c.field = field.to_string();
            c.position = position;
            c
        };
        let standard = StandardConfig {
            version: "1".to_string(),
            client: String::new(),
            last_modified: String::new(),
            table: StandardTable {
                db_columns: vec![column(NUMBER_COLUMN, 0), column(SIGNED_COLUMN, 1)],
                settings: TableSettings::new(),
            },
        };
        let mut overrides = BTreeMap::new();
        overrides.insert(
            SIGNED_COLUMN.to_string(),
            ColumnOverride {
                visible: Some(false),
                ..ColumnOverride::default()
            },
        );
        let specific = SpecificConfig {
            version: "1".to_string(),
            last_modified: String::new(),
            client: String::new(),
            table: SpecificTable {
                column_overrides: overrides,
                custom_filters: Vec::new(),
                settings: TableSettings::new(),
            },
        };

        let merged = merge(Some(&standard), Some(&specific)).unwrap();
        assert!(visible_columns(&merged).iter().all(|c| c.field != SIGNED_COLUMN));

        let fields = request_fields(&merged);
        assert!(fields.contains(&SIGNED_COLUMN.to_string()));
        assert!(fields.contains(&NUMBER_COLUMN.to_string()));

        // A signed row keeps classifying as signed with the column hidden.
        let cells = serde_json::json!({ "SDHNUM_0": "R-0001", "XX6FLSIGN_0": "2" });
        let row = RemitoRow {
            data: cells.as_object().cloned().unwrap(),
        };
        assert_eq!(row.text(SIGNED_COLUMN), "2");
    }
}
