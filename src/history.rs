//! Audit history operations.
//!
//! Every rescan of an audit appends an entry to its history. This module
//! reads and clears that history:
//!
//! - [`get_history`] — GET `/api/history`, paginated.
//! - [`delete_history`] — DELETE `/api/history`.

use crate::client::A11yClient;
use crate::enums::Sort;
use crate::error::Result;
use crate::params::Params;
use crate::response::ApiResponse;

/// Optional arguments for [`get_history`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryOptions {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub per_page: u32,
    /// Result ordering.
    pub sort: Sort,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        HistoryOptions {
            page: 1,
            per_page: 10,
            sort: Sort::CreatedAtAsc,
        }
    }
}

/// Fetches one page of an audit's history.
pub async fn get_history(
    client: &A11yClient,
    uuid: &str,
    options: &HistoryOptions,
) -> Result<ApiResponse> {
    let mut params = Params::new();
    params.insert("uuid", uuid);
    params.insert("page", options.page);
    params.insert("per_page", options.per_page);
    params.insert("sort", options.sort);
    client.get("history", params).await
}

/// Deletes the history of an audit, keeping the audit itself.
pub async fn delete_history(client: &A11yClient, uuid: &str) -> Result<ApiResponse> {
    let mut params = Params::new();
    params.insert("uuid", uuid);
    client.delete("history", params).await
}
