//! GraphQL client for the dynamic remitos query and the sign upload.

use contracts::filters::FilterDescriptor;
use contracts::remitos::RemitosPage;
use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::shared::date_utils::format_remito_date;

const GRAPHQL_URL: &str = "/graphql";

const REMITOS_QUERY: &str = "\
query Remitos($cpy: String!, $stofcy: String!, $columns: [String!]!, \
$filters: [FilterInput!], $desde: String, $page: Int, $pageSize: Int) {
  remitosDynamic(cpy: $cpy, stofcy: $stofcy, columns: $columns, \
filters: $filters, desde: $desde, page: $page, pageSize: $pageSize) {
    remitos { data }
    pagination { currentPage pageSize totalCount totalPages hasNextPage hasPreviousPage }
  }
}";

#[derive(Deserialize)]
struct GraphQlEnvelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct RemitosData {
    #[serde(rename = "remitosDynamic")]
    remitos_dynamic: RemitosPage,
}

/// One page request against `remitosDynamic`.
pub struct RemitosRequest<'a> {
    pub cpy: &'a str,
    pub stofcy: &'a str,
    pub columns: &'a [String],
    pub filters: &'a [FilterDescriptor],
    pub desde: &'a str,
    pub page: u64,
    pub page_size: u64,
}

/// Build the GraphQL body. Kept pure so the wire shape is testable.
pub fn build_request(req: &RemitosRequest<'_>) -> Value {
    json!({
        "query": REMITOS_QUERY,
        "variables": {
            "cpy": req.cpy,
            "stofcy": req.stofcy,
            "columns": req.columns,
            "filters": req.filters,
            "desde": req.desde,
            "page": req.page,
            "pageSize": req.page_size,
        }
    })
}

/// Fetch one page. Date-typed cells are reformatted for display before the
/// page is handed to the table.
pub async fn fetch_remitos(
    req: &RemitosRequest<'_>,
    date_fields: &[String],
) -> Result<RemitosPage, String> {
    let envelope: GraphQlEnvelope<RemitosData> = Request::post(GRAPHQL_URL)
        .json(&build_request(req))
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?
        .json()
        .await
        .map_err(|e| e.to_string())?;

    if let Some(err) = envelope.errors.first() {
        return Err(err.message.clone());
    }
    let mut page = envelope
        .data
        .ok_or_else(|| "empty GraphQL response".to_string())?
        .remitos_dynamic;
    format_date_cells(&mut page, date_fields);
    Ok(page)
}

/// Rewrite the listed date cells of every row in place.
pub fn format_date_cells(page: &mut RemitosPage, date_fields: &[String]) {
    for row in &mut page.remitos {
        for field in date_fields {
            if let Some(Value::String(cell)) = row.data.get_mut(field) {
                *cell = format_remito_date(cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::filters::{FilterOperator, FirmadoFilter};
    use contracts::pagination::PaginationState;
    use serde_json::json;

    #[test]
    fn request_body_carries_filters_and_page() {
        let columns = vec!["SDHNUM_0".to_string(), "DLVDAT_0".to_string()];
        let mut filters = vec![FilterDescriptor::new(
            "SDHNUM_0",
            FilterOperator::Like,
            "R-00",
        )];
        filters.extend(FirmadoFilter::NoFirmados.to_descriptor());

        let body = build_request(&RemitosRequest {
            cpy: "ES01",
            stofcy: "SEV1",
            columns: &columns,
            filters: &filters,
            desde: "2020-01-01",
            page: 2,
            page_size: 50,
        });

        let vars = &body["variables"];
        assert_eq!(vars["page"], json!(2));
        assert_eq!(vars["pageSize"], json!(50));
        assert_eq!(vars["desde"], json!("2020-01-01"));

        // Pagination does not drop the active filters.
        let filters = vars["filters"].as_array().unwrap();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0]["operator"], json!("LIKE"));
        assert_eq!(filters[1]["field"], json!("XX6FLSIGN_0"));
        assert_eq!(filters[1]["operator"], json!("NOT_EQUALS"));
    }

    #[test]
    fn only_listed_date_fields_are_reformatted() {
        let mut page: RemitosPage = serde_json::from_value(json!({
            "remitos": [
                { "data": { "SDHNUM_0": "2025-03-29", "DLVDAT_0": "2025-03-29" } }
            ],
            "pagination": PaginationState::compute(1, 50, 1),
        }))
        .unwrap();

        format_date_cells(&mut page, &["DLVDAT_0".to_string()]);

        assert_eq!(page.remitos[0].text("DLVDAT_0"), "29/03/2025");
        assert_eq!(page.remitos[0].text("SDHNUM_0"), "2025-03-29");
    }
}
