//! Dynamic SQL builder for the remitos table.
//!
//! The client decides which columns it wants and sends abstract filter
//! descriptors; this module turns them into a parameterized data query and a
//! count query sharing the identical predicate, so the reported total never
//! diverges from the page actually returned.

use contracts::filters::FilterOperator;
use thiserror::Error;

/// Table the signing workflow reads from.
pub const REMITOS_TABLE: &str = "remitos_firma";

/// Document date column; all queries order by it descending.
pub const DATE_COLUMN: &str = "DLVDAT_0";
/// Document number column, descending tiebreak for deterministic paging.
pub const NUMBER_COLUMN: &str = "SDHNUM_0";
pub const COMPANY_COLUMN: &str = "CPY_0";
pub const FACILITY_COLUMN: &str = "STOFCY_0";
/// Confirmation flag column; only confirmed documents are listed.
pub const CONFIRMED_COLUMN: &str = "CFMFLG_0";
/// Flag value meaning "confirmed".
pub const CONFIRMED_VALUE: &str = "2";
/// Lower bound applied when the caller sends no `desde` date.
pub const DEFAULT_DESDE: &str = "2020-01-01";

#[derive(Debug, Error)]
pub enum QueryBuildError {
    #[error("invalid column identifier: {0:?}")]
    InvalidColumn(String),
    #[error("unsupported filter operator: {0:?}")]
    UnsupportedOperator(String),
    #[error("no columns requested")]
    NoColumns,
}

/// Filter as it arrives on the wire, operator still unparsed.
#[derive(Debug, Clone)]
pub struct WireFilter {
    pub field: String,
    pub operator: String,
    pub value: String,
}

/// Built query pair plus the bound text parameters (shared by both).
#[derive(Debug, Clone)]
pub struct RemitosQuery {
    pub data_sql: String,
    pub count_sql: String,
    pub params: Vec<String>,
}

/// The sole injection defense: every identifier reaching SQL construction
/// must be alphanumeric/underscore.
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn check_identifier(name: &str) -> Result<(), QueryBuildError> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(QueryBuildError::InvalidColumn(name.to_string()))
    }
}

fn parse_operator(text: &str) -> Result<FilterOperator, QueryBuildError> {
    match text {
        "EQUALS" => Ok(FilterOperator::Equals),
        "NOT_EQUALS" => Ok(FilterOperator::NotEquals),
        "LIKE" => Ok(FilterOperator::Like),
        "GREATER_THAN" => Ok(FilterOperator::GreaterThan),
        "LESS_THAN" => Ok(FilterOperator::LessThan),
        "IN" => Ok(FilterOperator::In),
        other => Err(QueryBuildError::UnsupportedOperator(other.to_string())),
    }
}

/// Build the data + count queries for one page of remitos.
///
/// The base predicate is always applied: document date ≥ `desde`,
/// confirmation flag = confirmed, company and facility equality. Caller
/// filters are appended after it.
pub fn build_query(
    columns: &[String],
    filters: &[WireFilter],
    company: &str,
    facility: &str,
    desde: Option<&str>,
    page: u64,
    page_size: u64,
) -> Result<RemitosQuery, QueryBuildError> {
    if columns.is_empty() {
        return Err(QueryBuildError::NoColumns);
    }
    for column in columns {
        check_identifier(column)?;
    }

    let mut conditions = vec![
        format!("{DATE_COLUMN} >= ?"),
        format!("{CONFIRMED_COLUMN} = ?"),
        format!("{COMPANY_COLUMN} = ?"),
        format!("{FACILITY_COLUMN} = ?"),
    ];
    let mut params = vec![
        desde.unwrap_or(DEFAULT_DESDE).to_string(),
        CONFIRMED_VALUE.to_string(),
        company.to_string(),
        facility.to_string(),
    ];

    for filter in filters {
        check_identifier(&filter.field)?;
        let column = &filter.field;

        match parse_operator(&filter.operator)? {
            FilterOperator::Equals => {
                conditions.push(format!("{column} = ?"));
                params.push(filter.value.clone());
            }
            FilterOperator::NotEquals => {
                conditions.push(format!("{column} != ?"));
                params.push(filter.value.clone());
            }
            FilterOperator::Like => {
                conditions.push(format!("LOWER({column}) LIKE LOWER(?)"));
                params.push(format!("%{}%", filter.value));
            }
            FilterOperator::GreaterThan => {
                conditions.push(format!("{column} > ?"));
                params.push(filter.value.clone());
            }
            FilterOperator::LessThan => {
                conditions.push(format!("{column} < ?"));
                params.push(filter.value.clone());
            }
            FilterOperator::In => {
                let values: Vec<&str> = filter
                    .value
                    .split(',')
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .collect();
                if values.is_empty() {
                    continue;
                }
                let placeholders = vec!["?"; values.len()].join(", ");
                conditions.push(format!("{column} IN ({placeholders})"));
                params.extend(values.into_iter().map(str::to_string));
            }
        }
    }

    let predicate = conditions.join(" AND ");
    let select_list = columns.join(", ");
    let offset = page.saturating_sub(1) * page_size;

    let data_sql = format!(
        "SELECT {select_list} FROM {REMITOS_TABLE} WHERE {predicate} \
         ORDER BY {DATE_COLUMN} DESC, {NUMBER_COLUMN} DESC \
         LIMIT {page_size} OFFSET {offset}"
    );
    let count_sql = format!("SELECT COUNT(*) AS total FROM {REMITOS_TABLE} WHERE {predicate}");

    Ok(RemitosQuery {
        data_sql,
        count_sql,
        params,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn filter(field: &str, operator: &str, value: &str) -> WireFilter {
        WireFilter {
            field: field.to_string(),
            operator: operator.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn base_predicate_is_always_applied() {
        let q = build_query(&cols(&["SDHNUM_0"]), &[], "ES01", "SEV1", None, 1, 50).unwrap();
        assert!(q.data_sql.contains("DLVDAT_0 >= ?"));
        assert!(q.data_sql.contains("CFMFLG_0 = ?"));
        assert!(q.data_sql.contains("CPY_0 = ?"));
        assert!(q.data_sql.contains("STOFCY_0 = ?"));
        assert_eq!(q.params, vec!["2020-01-01", "2", "ES01", "SEV1"]);
    }

    #[test]
    fn count_and_data_share_the_predicate() {
        let filters = [filter("SDHNUM_0", "LIKE", "123")];
        let q = build_query(
            &cols(&["SDHNUM_0", "DLVDAT_0"]),
            &filters,
            "ES01",
            "SEV1",
            Some("2024-06-01"),
            2,
            50,
        )
        .unwrap();

        let data_predicate = q
            .data_sql
            .split(" WHERE ")
            .nth(1)
            .unwrap()
            .split(" ORDER BY ")
            .next()
            .unwrap();
        let count_predicate = q.count_sql.split(" WHERE ").nth(1).unwrap();
        assert_eq!(data_predicate, count_predicate);
    }

    #[test]
    fn malformed_column_is_rejected_before_sql_construction() {
        let err = build_query(
            &cols(&["SDHNUM_0; DROP TABLE remitos_firma"]),
            &[],
            "ES01",
            "SEV1",
            None,
            1,
            50,
        )
        .unwrap_err();
        assert!(matches!(err, QueryBuildError::InvalidColumn(_)));

        let filters = [filter("X' OR '1'='1", "EQUALS", "x")];
        let err = build_query(&cols(&["SDHNUM_0"]), &filters, "ES01", "SEV1", None, 1, 50)
            .unwrap_err();
        assert!(matches!(err, QueryBuildError::InvalidColumn(_)));
    }

    #[test]
    fn unknown_operator_is_rejected() {
        let filters = [filter("SDHNUM_0", "REGEX", "abc")];
        let err = build_query(&cols(&["SDHNUM_0"]), &filters, "ES01", "SEV1", None, 1, 50)
            .unwrap_err();
        assert!(matches!(err, QueryBuildError::UnsupportedOperator(op) if op == "REGEX"));
    }

    #[test]
    fn like_is_case_insensitive_substring() {
        let filters = [filter("BPCNAM_0", "LIKE", "Acme")];
        let q = build_query(&cols(&["SDHNUM_0"]), &filters, "ES01", "SEV1", None, 1, 50).unwrap();
        assert!(q.data_sql.contains("LOWER(BPCNAM_0) LIKE LOWER(?)"));
        assert_eq!(q.params.last().unwrap(), "%Acme%");
    }

    #[test]
    fn in_splits_on_commas() {
        let filters = [filter("STOFCY_0", "IN", "SEV1, SEV2 ,SEV3")];
        let q = build_query(&cols(&["SDHNUM_0"]), &filters, "ES01", "SEV1", None, 1, 50).unwrap();
        assert!(q.data_sql.contains("STOFCY_0 IN (?, ?, ?)"));
        assert_eq!(&q.params[4..], ["SEV1", "SEV2", "SEV3"]);
    }

    #[test]
    fn comparison_operators_translate() {
        let filters = [
            filter("QTY_0", "GREATER_THAN", "5"),
            filter("QTY_0", "LESS_THAN", "10"),
            filter("FCY_0", "NOT_EQUALS", "X"),
        ];
        let q = build_query(&cols(&["SDHNUM_0"]), &filters, "ES01", "SEV1", None, 1, 50).unwrap();
        assert!(q.data_sql.contains("QTY_0 > ?"));
        assert!(q.data_sql.contains("QTY_0 < ?"));
        assert!(q.data_sql.contains("FCY_0 != ?"));
    }

    #[test]
    fn pagination_maps_to_limit_offset() {
        let q = build_query(&cols(&["SDHNUM_0"]), &[], "ES01", "SEV1", None, 3, 50).unwrap();
        assert!(q.data_sql.ends_with("LIMIT 50 OFFSET 100"));
        assert!(!q.count_sql.contains("LIMIT"));
    }

    #[test]
    fn ordering_is_by_date_then_number_descending() {
        let q = build_query(&cols(&["SDHNUM_0"]), &[], "ES01", "SEV1", None, 1, 50).unwrap();
        assert!(q
            .data_sql
            .contains("ORDER BY DLVDAT_0 DESC, SDHNUM_0 DESC"));
    }

    #[test]
    fn empty_column_set_is_rejected() {
        let err = build_query(&[], &[], "ES01", "SEV1", None, 1, 50).unwrap_err();
        assert!(matches!(err, QueryBuildError::NoColumns));
    }
}
