use anyhow::Result;
use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

use crate::shared::data::db::get_connection;

/// Key/value store holding the JSON configuration documents.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "table_config_documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub document: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn get_document(key: &str) -> Result<Option<String>> {
    let row = Entity::find_by_id(key.to_string()).one(conn()).await?;
    Ok(row.map(|r| r.document))
}

pub async fn put_document(key: &str, document: &str) -> Result<()> {
    let active = ActiveModel {
        key: Set(key.to_string()),
        document: Set(document.to_string()),
        updated_at: Set(Utc::now().to_rfc3339()),
    };
    Entity::insert(active)
        .on_conflict(
            OnConflict::column(Column::Key)
                .update_columns([Column::Document, Column::UpdatedAt])
                .to_owned(),
        )
        .exec(conn())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::initialize_database;

    #[tokio::test]
    async fn put_document_upserts_in_place() {
        let db_file =
            std::env::temp_dir().join(format!("config-docs-test-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&db_file);
        initialize_database(db_file.to_str()).await.unwrap();

        put_document("upsert-check", r#"{"v":1}"#).await.unwrap();
        put_document("upsert-check", r#"{"v":2}"#).await.unwrap();

        let stored = get_document("upsert-check").await.unwrap();
        assert_eq!(stored.as_deref(), Some(r#"{"v":2}"#));
    }
}
