use anyhow::Result;
use contracts::filters::SIGNED_VALUE;
use contracts::table_config::SIGNED_COLUMN;
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, FromQueryResult, JsonValue, Statement,
};
use serde_json::{Map, Value};

use super::query_builder::{RemitosQuery, NUMBER_COLUMN, REMITOS_TABLE};
use crate::shared::data::db::get_connection;

/// Column holding the URL of the signed document.
const SIGNED_URL_COLUMN: &str = "XX6URLFIRM_0";

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn statement(sql: &str, params: &[String]) -> Statement {
    Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        sql,
        params.iter().map(|p| p.clone().into()),
    )
}

/// Run the data query; rows come back as JSON objects keyed by the requested
/// column names, since the column set varies per request.
pub async fn fetch_rows(query: &RemitosQuery) -> Result<Vec<Map<String, Value>>> {
    let rows = JsonValue::find_by_statement(statement(&query.data_sql, &query.params))
        .all(conn())
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| match row {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect())
}

/// Run the count query sharing the data query's predicate.
pub async fn count_rows(query: &RemitosQuery) -> Result<u64> {
    let row = conn()
        .query_one(statement(&query.count_sql, &query.params))
        .await?;

    let total: i64 = match row {
        Some(row) => row.try_get("", "total")?,
        None => 0,
    };
    Ok(total.max(0) as u64)
}

/// Live column names of the remitos table, in declaration order. Feeds the
/// administrative re-derivation of the standard config.
pub async fn sql_column_names() -> Result<Vec<String>> {
    let sql = format!("PRAGMA table_info({REMITOS_TABLE})");
    let rows = conn()
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, sql))
        .await?;

    let mut names = Vec::with_capacity(rows.len());
    for row in rows {
        let name: String = row.try_get("", "name")?;
        names.push(name);
    }
    Ok(names)
}

/// Mark a remito as signed and record the stored document URL.
pub async fn mark_signed(sdhnum: &str, url: &str) -> Result<()> {
    let sql = format!(
        "UPDATE {REMITOS_TABLE} SET {SIGNED_COLUMN} = ?, {SIGNED_URL_COLUMN} = ? \
         WHERE {NUMBER_COLUMN} = ?"
    );
    conn()
        .execute(statement(
            &sql,
            &[SIGNED_VALUE.to_string(), url.to_string(), sdhnum.to_string()],
        ))
        .await?;
    Ok(())
}
