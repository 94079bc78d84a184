use anyhow::Result;
use contracts::pagination::PaginationState;
use serde_json::{Map, Value};

use super::query_builder::{self, QueryBuildError, WireFilter};
use super::repository;

pub const DEFAULT_PAGE_SIZE: u64 = 50;
const MAX_PAGE_SIZE: u64 = 500;

#[derive(Debug)]
pub struct RemitosSlice {
    pub rows: Vec<Map<String, Value>>,
    pub pagination: PaginationState,
}

/// Fetch one page of remitos plus server-authoritative pagination metadata.
///
/// Malformed input (bad identifiers, unknown operators) fails fast with the
/// builder's error; a page past the end returns an empty row set with
/// consistent metadata rather than an error.
pub async fn fetch_page(
    columns: &[String],
    filters: &[WireFilter],
    company: &str,
    facility: &str,
    desde: Option<&str>,
    page: u64,
    page_size: u64,
) -> Result<RemitosSlice, FetchPageError> {
    let page = page.max(1);
    let page_size = match page_size {
        0 => {
            tracing::warn!("page_size 0 requested, using default {DEFAULT_PAGE_SIZE}");
            DEFAULT_PAGE_SIZE
        }
        s if s > MAX_PAGE_SIZE => {
            tracing::warn!("page_size {s} too large, clamping to {MAX_PAGE_SIZE}");
            MAX_PAGE_SIZE
        }
        s => s,
    };

    let query = query_builder::build_query(
        columns, filters, company, facility, desde, page, page_size,
    )?;

    let total_count = repository::count_rows(&query).await?;
    let rows = repository::fetch_rows(&query).await?;

    Ok(RemitosSlice {
        rows,
        pagination: PaginationState::compute(page, page_size, total_count),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum FetchPageError {
    #[error(transparent)]
    Build(#[from] QueryBuildError),
    #[error(transparent)]
    Db(#[from] anyhow::Error),
}
