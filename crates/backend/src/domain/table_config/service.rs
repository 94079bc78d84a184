use anyhow::Result;
use chrono::Utc;
use contracts::table_config::{
    firmado_filter_options, ColumnType, DbColumn, FilterType, SpecificConfig, StandardConfig,
    StandardTable, TableSettings, SIGNED_COLUMN,
};

use super::repository;
use crate::domain::remito::repository as remito_repository;

pub const STANDARD_KEY: &str = "table-defaults";
pub const SPECIFIC_KEY: &str = "table-customizations";

/// Load the tenant-wide standard config, `None` when never stored.
pub async fn load_standard() -> Result<Option<StandardConfig>> {
    match repository::get_document(STANDARD_KEY).await? {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

pub async fn save_standard(config: &StandardConfig) -> Result<()> {
    repository::put_document(STANDARD_KEY, &serde_json::to_string(config)?).await
}

/// Load the per-installation specific config, `None` when never stored.
pub async fn load_specific() -> Result<Option<SpecificConfig>> {
    match repository::get_document(SPECIFIC_KEY).await? {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

pub async fn save_specific(config: &SpecificConfig) -> Result<()> {
    repository::put_document(SPECIFIC_KEY, &serde_json::to_string(config)?).await
}

/// Seed the standard config on first start so a fresh install has a usable
/// column set before any administration happens.
pub async fn ensure_standard_default() -> Result<()> {
    if load_standard().await?.is_none() {
        tracing::info!("seeding default standard table configuration");
        save_standard(&default_standard()).await?;
    }
    Ok(())
}

/// Administrative re-derivation of the standard config from the live SQL
/// column set: kept columns keep their metadata, newly discovered columns are
/// appended hidden at the end, vanished columns are dropped.
pub async fn derive_standard_from_sql_columns() -> Result<StandardConfig> {
    let live = remito_repository::sql_column_names().await?;
    let current = load_standard().await?.unwrap_or_else(default_standard);

    let mut columns: Vec<DbColumn> = current
        .table
        .db_columns
        .iter()
        .filter(|c| live.contains(&c.field))
        .cloned()
        .collect();

    let mut next_position = columns.iter().map(|c| c.position).max().unwrap_or(-1) + 1;
    for name in &live {
        if columns.iter().any(|c| c.field == *name) {
            continue;
        }
        columns.push(DbColumn {
            field: name.clone(),
            label: name.clone(),
            column_type: ColumnType::Text,
            width: "120px".to_string(),
            visible: false,
            position: next_position,
            filterable: true,
            filter_type: FilterType::Text,
            filter_options: None,
            sortable: true,
        });
        next_position += 1;
    }

    let derived = StandardConfig {
        version: current.version,
        client: current.client,
        last_modified: Utc::now().to_rfc3339(),
        table: StandardTable {
            db_columns: columns,
            settings: current.table.settings,
        },
    };
    save_standard(&derived).await?;
    Ok(derived)
}

/// Built-in default column set of the signing workflow.
pub fn default_standard() -> StandardConfig {
    let text = |field: &str, label: &str, position: i32| DbColumn {
        field: field.to_string(),
        label: label.to_string(),
        column_type: ColumnType::Text,
        width: "120px".to_string(),
        visible: true,
        position,
        filterable: true,
        filter_type: FilterType::Text,
        filter_options: None,
        sortable: true,
    };

    let mut fecha = text("DLVDAT_0", "Fecha entrega", 1);
    fecha.column_type = ColumnType::Date;

    let mut firmado = text(SIGNED_COLUMN, "Firmado", 4);
    firmado.column_type = ColumnType::Select;
    firmado.filter_type = FilterType::Select;
    firmado.filter_options = Some(firmado_filter_options());

    StandardConfig {
        version: "1".to_string(),
        client: "default".to_string(),
        last_modified: Utc::now().to_rfc3339(),
        table: StandardTable {
            db_columns: vec![
                text("SDHNUM_0", "Remito", 0),
                fecha,
                text("BPCNAM_0", "Cliente", 2),
                text("STOFCY_0", "Planta", 3),
                firmado,
            ],
            settings: TableSettings::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_standard_has_the_signed_select_column() {
        let config = default_standard();
        let signed = config
            .table
            .db_columns
            .iter()
            .find(|c| c.field == SIGNED_COLUMN)
            .unwrap();
        assert_eq!(signed.filter_type, FilterType::Select);
        assert_eq!(signed.filter_options.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn default_standard_fields_are_valid_sql_identifiers() {
        use crate::domain::remito::query_builder::is_valid_identifier;
        for column in default_standard().table.db_columns {
            assert!(is_valid_identifier(&column.field), "{}", column.field);
        }
    }
}
