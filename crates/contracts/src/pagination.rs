//! Server-authoritative pagination metadata.

use serde::{Deserialize, Serialize};

/// Pagination metadata recomputed by the server on every fetch. The client
/// treats it as authoritative and only derives display state from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub current_page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationState {
    /// Derive the full state from a row count. An empty result set has zero
    /// pages (not one), and a page past the end still produces consistent
    /// metadata.
    pub fn compute(current_page: u64, page_size: u64, total_count: u64) -> Self {
        let total_pages = total_count.div_ceil(page_size.max(1));
        Self {
            current_page,
            page_size,
            total_count,
            total_pages,
            has_next_page: current_page < total_pages,
            has_previous_page: current_page > 1,
        }
    }

    /// SQL offset of the requested page.
    pub fn offset(page: u64, page_size: u64) -> u64 {
        page.saturating_sub(1) * page_size
    }
}
