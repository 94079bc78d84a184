//! Filter session state of the remitos table.
//!
//! The state lives outside the fetch cycle so filters survive pagination and
//! refetches; only an explicit user edit changes them.

use std::collections::BTreeMap;

use contracts::filters::{FilterDescriptor, FilterOperator, FirmadoFilter};
use contracts::table_config::{DbColumn, FilterType, SIGNED_COLUMN};

/// Lower bound of the delivery-date window when the user picked none.
pub const DEFAULT_DESDE: &str = "2020-01-01";

/// Everything the user typed or selected into the filter row.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSessionState {
    /// Per-column filter values keyed by SQL field name. The signed column is
    /// not in here; it is the dedicated tri-state below.
    pub values: BTreeMap<String, String>,
    pub firmado: FirmadoFilter,
    pub desde: String,
}

impl Default for FilterSessionState {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
            firmado: FirmadoFilter::default(),
            desde: DEFAULT_DESDE.to_string(),
        }
    }
}

impl FilterSessionState {
    /// Record a filter edit; a blank value clears the entry.
    pub fn set_value(&mut self, field: &str, value: String) {
        if value.trim().is_empty() {
            self.values.remove(field);
        } else {
            self.values.insert(field.to_string(), value);
        }
    }

    /// Translate the session into abstract descriptors for the query. Text
    /// columns filter with LIKE, select columns with EQUALS, and the signed
    /// tri-state contributes its own descriptor (or none for "todos").
    pub fn descriptors(&self, columns: &[DbColumn]) -> Vec<FilterDescriptor> {
        let mut out = Vec::new();
        for col in columns.iter().filter(|c| c.filterable) {
            if col.field == SIGNED_COLUMN {
                continue;
            }
            let Some(value) = self.values.get(&col.field) else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let operator = match col.filter_type {
                FilterType::Text => FilterOperator::Like,
                FilterType::Select => FilterOperator::Equals,
            };
            out.push(FilterDescriptor::new(col.field.clone(), operator, value));
        }
        if let Some(descriptor) = self.firmado.to_descriptor() {
            out.push(descriptor);
        }
        out
    }
}

/// Which filter input held focus (and where the caret was) before the table
/// re-rendered, so it can be restored afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FocusState {
    pub field: Option<String>,
    pub caret: Option<u32>,
}

impl FocusState {
    /// Consume the snapshot, leaving an empty one behind. Restoration uses a
    /// snapshot at most once.
    pub fn take(&mut self) -> FocusState {
        std::mem::take(self)
    }
}
