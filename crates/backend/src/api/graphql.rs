//! GraphQL endpoint consumed by the signing frontend.
//!
//! One query drives the whole table (`remitosDynamic`); the mutation receives
//! the signed PDF produced by the client-side editor.

use async_graphql::{EmptySubscription, InputObject, Json, Object, Schema, SimpleObject};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use base64::Engine;
use contracts::pagination::PaginationState;

use crate::domain::remito::query_builder::WireFilter;
use crate::domain::remito::service::{self, DEFAULT_PAGE_SIZE};
use crate::domain::remito::repository;

#[derive(InputObject)]
pub struct FilterInput {
    pub field: String,
    pub operator: String,
    pub value: String,
}

#[derive(SimpleObject)]
pub struct RemitoNode {
    pub data: Json<serde_json::Value>,
}

#[derive(SimpleObject)]
#[graphql(name = "PaginationState")]
pub struct PaginationNode {
    pub current_page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl From<PaginationState> for PaginationNode {
    fn from(p: PaginationState) -> Self {
        Self {
            current_page: p.current_page,
            page_size: p.page_size,
            total_count: p.total_count,
            total_pages: p.total_pages,
            has_next_page: p.has_next_page,
            has_previous_page: p.has_previous_page,
        }
    }
}

#[derive(SimpleObject)]
pub struct RemitosDynamicPayload {
    pub remitos: Vec<RemitoNode>,
    pub pagination: PaginationNode,
}

#[derive(SimpleObject)]
pub struct UploadedPdf {
    pub url: String,
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Dynamic remitos listing: caller picks the columns, sends abstract
    /// filters, gets one page plus authoritative pagination metadata.
    async fn remitos_dynamic(
        &self,
        cpy: String,
        stofcy: String,
        columns: Vec<String>,
        filters: Option<Vec<FilterInput>>,
        desde: Option<String>,
        page: Option<i32>,
        page_size: Option<i32>,
    ) -> async_graphql::Result<RemitosDynamicPayload> {
        let filters: Vec<WireFilter> = filters
            .unwrap_or_default()
            .into_iter()
            .map(|f| WireFilter {
                field: f.field,
                operator: f.operator,
                value: f.value,
            })
            .collect();

        let slice = service::fetch_page(
            &columns,
            &filters,
            &cpy,
            &stofcy,
            desde.as_deref(),
            page.map_or(1, |p| p.max(1) as u64),
            page_size.map_or(DEFAULT_PAGE_SIZE, |s| s.max(1) as u64),
        )
        .await
        .map_err(|e| {
            tracing::error!("remitosDynamic failed: {e}");
            async_graphql::Error::new(e.to_string())
        })?;

        Ok(RemitosDynamicPayload {
            remitos: slice
                .rows
                .into_iter()
                .map(|row| RemitoNode {
                    data: Json(serde_json::Value::Object(row)),
                })
                .collect(),
            pagination: slice.pagination.into(),
        })
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Store a signed PDF and return its served URL. When the remito number
    /// is given, the row is also flagged as signed.
    async fn subir_pdf_base64(
        &self,
        pdf_base64: String,
        sdhnum: Option<String>,
    ) -> async_graphql::Result<UploadedPdf> {
        let url = store_pdf("dist/firmados", &pdf_base64, sdhnum.as_deref())
            .map_err(|e| {
                tracing::error!("subirPdfBase64 failed: {e}");
                async_graphql::Error::new(e.to_string())
            })?;

        if let Some(sdhnum) = &sdhnum {
            repository::mark_signed(sdhnum, &url)
                .await
                .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        }

        Ok(UploadedPdf { url })
    }
}

/// Decode and persist the uploaded PDF under the served static dir.
fn store_pdf(base_dir: &str, pdf_base64: &str, sdhnum: Option<&str>) -> anyhow::Result<String> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(pdf_base64)?;
    std::fs::create_dir_all(base_dir)?;

    let stem = match sdhnum {
        Some(num) => format!("remito-{num}"),
        None => format!("remito-{}", chrono::Utc::now().timestamp_millis()),
    };
    let file_name = format!("{stem}.pdf");
    std::fs::write(std::path::Path::new(base_dir).join(&file_name), bytes)?;

    Ok(format!("/firmados/{file_name}"))
}

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema() -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription).finish()
}

pub async fn graphql_handler(
    State(schema): State<AppSchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
    use serde_json::json;

    use crate::shared::data::db::{get_connection, initialize_database};

    async fn seed() {
        let db_file = std::env::temp_dir().join(format!(
            "remitos-graphql-test-{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&db_file);
        initialize_database(Some(db_file.to_str().unwrap()))
            .await
            .unwrap();

        let rows = [
            ("R-0001", "2025-03-29", "1"),
            ("R-0002", "2025-03-28", "1"),
            ("R-0003", "2025-03-27", "2"),
        ];
        for (num, date, signed) in rows {
            let sql = format!(
                "INSERT OR REPLACE INTO remitos_firma \
                 (SDHNUM_0, DLVDAT_0, CPY_0, STOFCY_0, CFMFLG_0, XX6FLSIGN_0, BPCNAM_0) \
                 VALUES ('{num}', '{date}', 'ES01', 'SEV1', '2', '{signed}', 'Acme SA')"
            );
            get_connection()
                .execute(Statement::from_string(DatabaseBackend::Sqlite, sql))
                .await
                .unwrap();
        }
        // A confirmed remito of another facility must never show up.
        get_connection()
            .execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                "INSERT OR REPLACE INTO remitos_firma \
                 (SDHNUM_0, DLVDAT_0, CPY_0, STOFCY_0, CFMFLG_0, XX6FLSIGN_0, BPCNAM_0) \
                 VALUES ('R-9999', '2025-03-29', 'ES01', 'MAD1', '2', '1', 'Otro')"
                    .to_string(),
            ))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn remitos_dynamic_filters_and_paginates() {
        seed().await;
        let schema = build_schema();

        let response = schema
            .execute(
                r#"{
                    remitosDynamic(
                        cpy: "ES01", stofcy: "SEV1",
                        columns: ["SDHNUM_0", "DLVDAT_0", "XX6FLSIGN_0"],
                        filters: [{field: "XX6FLSIGN_0", operator: "NOT_EQUALS", value: "2"}],
                        page: 1, pageSize: 50
                    ) {
                        remitos { data }
                        pagination { totalCount totalPages hasNextPage hasPreviousPage }
                    }
                }"#,
            )
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().unwrap();
        let payload = &data["remitosDynamic"];
        assert_eq!(payload["pagination"]["totalCount"], json!(2));
        assert_eq!(payload["pagination"]["totalPages"], json!(1));
        assert_eq!(payload["pagination"]["hasNextPage"], json!(false));
        assert_eq!(payload["pagination"]["hasPreviousPage"], json!(false));

        // Date descending: the newest unsigned remito comes first.
        let remitos = payload["remitos"].as_array().unwrap();
        assert_eq!(remitos.len(), 2);
        assert_eq!(remitos[0]["data"]["SDHNUM_0"], json!("R-0001"));
        assert_eq!(remitos[1]["data"]["SDHNUM_0"], json!("R-0002"));

        // Malformed identifiers are rejected at the schema boundary.
        let bad = schema
            .execute(
                r#"{
                    remitosDynamic(
                        cpy: "ES01", stofcy: "SEV1",
                        columns: ["SDHNUM_0; DROP TABLE remitos_firma"]
                    ) { pagination { totalCount } }
                }"#,
            )
            .await;
        assert!(!bad.errors.is_empty());
    }

    #[tokio::test]
    async fn subir_pdf_base64_flags_the_remito_signed() {
        let db_file = std::env::temp_dir().join(format!(
            "remitos-graphql-sign-test-{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&db_file);
        initialize_database(Some(db_file.to_str().unwrap()))
            .await
            .unwrap();
        get_connection()
            .execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                "INSERT OR REPLACE INTO remitos_firma \
                 (SDHNUM_0, DLVDAT_0, CPY_0, STOFCY_0, CFMFLG_0, XX6FLSIGN_0, BPCNAM_0) \
                 VALUES ('M-0001', '2025-04-02', 'ES01', 'MAD9', '2', '1', 'Acme SA')"
                    .to_string(),
            ))
            .await
            .unwrap();

        let schema = build_schema();
        let pdf = base64::engine::general_purpose::STANDARD.encode(b"%PDF-1.4 firmado");
        let response = schema
            .execute(format!(
                r#"mutation {{ subirPdfBase64(pdfBase64: "{pdf}", sdhnum: "M-0001") {{ url }} }}"#
            ))
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        assert_eq!(data["subirPdfBase64"]["url"], json!("/firmados/remito-M-0001.pdf"));

        // The row now carries the signed flag and the stored URL.
        let listed = schema
            .execute(
                r#"{
                    remitosDynamic(
                        cpy: "ES01", stofcy: "MAD9",
                        columns: ["SDHNUM_0", "XX6FLSIGN_0", "XX6URLFIRM_0"],
                        filters: [{field: "XX6FLSIGN_0", operator: "EQUALS", value: "2"}]
                    ) {
                        remitos { data }
                        pagination { totalCount }
                    }
                }"#,
            )
            .await;
        assert!(listed.errors.is_empty(), "{:?}", listed.errors);
        let data = listed.data.into_json().unwrap();
        let payload = &data["remitosDynamic"];
        assert_eq!(payload["pagination"]["totalCount"], json!(1));
        let row = &payload["remitos"].as_array().unwrap()[0]["data"];
        assert_eq!(row["SDHNUM_0"], json!("M-0001"));
        assert_eq!(row["XX6FLSIGN_0"], json!("2"));
        assert_eq!(row["XX6URLFIRM_0"], json!("/firmados/remito-M-0001.pdf"));

        let _ = std::fs::remove_file("dist/firmados/remito-M-0001.pdf");
    }

    #[test]
    fn store_pdf_writes_under_base_dir() {
        let dir = std::env::temp_dir().join(format!("firmados-test-{}", std::process::id()));
        let encoded = base64::engine::general_purpose::STANDARD.encode(b"%PDF-1.4 test");

        let url = store_pdf(dir.to_str().unwrap(), &encoded, Some("R-0001")).unwrap();
        assert_eq!(url, "/firmados/remito-R-0001.pdf");
        assert!(dir.join("remito-R-0001.pdf").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
