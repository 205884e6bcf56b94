//! Scan and audit operations.
//!
//! This module covers the "audit" endpoint family:
//!
//! | Function | API Path | Method |
//! |----------|----------|--------|
//! | [`scan`] | `/api/scan` | GET |
//! | [`rescan`] | `/api/rescan` | GET |
//! | [`get_audit`] | `/api/audit` | GET |
//! | [`list_audits`] | `/api/audits` | GET |
//! | [`delete_audit`] | `/api/audit` | DELETE |
//! | [`update_audit_manual`] | `/api/audit/manual` | POST (form body) |
//!
//! Each function only assembles parameters; encoding, authentication and
//! response normalization happen in [`A11yClient::dispatch`]. Optional
//! arguments live in `*Options` structs whose `Default` matches the service
//! defaults.
//!
//! ## Asynchronous scans
//!
//! With `sync: false` (the default) the service queues the scan and answers
//! immediately with the audit identifier; fetch the finished report later
//! with [`get_audit`]. With `sync: true` the call blocks until the report is
//! ready, which is why the client's request timeout is generous.

use crate::client::A11yClient;
use crate::enums::{AuditStatus, Device, Language, Sort};
use crate::error::Result;
use crate::params::Params;
use crate::response::ApiResponse;

// ── Options ────────────────────────────────────────────────────────────

/// Optional arguments for [`scan`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Report language.
    pub lang: Language,
    /// Device profile. [`Device::All`] omits the parameter, which the
    /// service reads as "all devices".
    pub device: Device,
    /// Wait for the audit to finish before answering.
    pub sync: bool,
    /// Include extended per-element data in the report.
    pub extra_data: bool,
    /// Caller-chosen key used to group audits, e.g. per customer.
    pub unique_key: Option<String>,
}

/// Optional arguments for [`rescan`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RescanOptions {
    /// Report language.
    pub lang: Language,
    /// Wait for the audit to finish before answering.
    pub sync: bool,
    /// Include extended per-element data in the report.
    pub extra_data: bool,
}

/// Optional arguments for [`get_audit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditOptions {
    /// Report language.
    pub lang: Language,
    /// Include extended per-element data in the report.
    pub extra_data: bool,
}

/// Optional arguments for [`list_audits`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListAuditsOptions {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub per_page: u32,
    /// Result ordering.
    pub sort: Sort,
    /// Restrict results to audits started with this key. `None` is sent as
    /// an empty `unique_key`.
    pub unique_key: Option<String>,
}

/// Optional arguments for [`update_audit_manual`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualUpdateOptions {
    /// Device profile the verdict applies to.
    pub device: Device,
}

impl Default for ListAuditsOptions {
    fn default() -> Self {
        ListAuditsOptions {
            page: 1,
            per_page: 10,
            sort: Sort::LastAuditDesc,
            unique_key: None,
        }
    }
}

// ── Endpoint functions ─────────────────────────────────────────────────

/// Starts a new scan of `url`.
///
/// # Errors
///
/// - `A11yError::Transport` — no response from the service.
///
/// Non-2xx answers (invalid URL, quota exceeded, ...) are returned as
/// `Ok(ApiResponse)` with the status and body.
pub async fn scan(client: &A11yClient, url: &str, options: &ScanOptions) -> Result<ApiResponse> {
    let mut params = Params::new();
    params.insert("url", url);
    params.insert("sync", options.sync);
    params.insert("lang", options.lang);
    params.insert("extra_data", options.extra_data);
    params.insert("unique_key", options.unique_key.as_deref());
    if options.device != Device::All {
        params.insert("device", options.device);
    }
    client.get("scan", params).await
}

/// Re-runs the scan behind an existing audit.
pub async fn rescan(
    client: &A11yClient,
    uuid: &str,
    options: &RescanOptions,
) -> Result<ApiResponse> {
    let mut params = Params::new();
    params.insert("uuid", uuid);
    params.insert("sync", options.sync);
    params.insert("lang", options.lang);
    params.insert("extra_data", options.extra_data);
    client.get("rescan", params).await
}

/// Fetches a single audit report.
///
/// A 404 status means the audit does not exist or belongs to another key.
pub async fn get_audit(
    client: &A11yClient,
    uuid: &str,
    options: &AuditOptions,
) -> Result<ApiResponse> {
    let mut params = Params::new();
    params.insert("uuid", uuid);
    params.insert("lang", options.lang);
    params.insert("extra_data", options.extra_data);
    client.get("audit", params).await
}

/// Searches audits by URL fragment.
///
/// `unique_key` is always sent, even when empty; every other optional
/// parameter follows the usual falsy filter.
pub async fn list_audits(
    client: &A11yClient,
    search: &str,
    options: &ListAuditsOptions,
) -> Result<ApiResponse> {
    let mut params = Params::new();
    params.insert("search", search);
    params.insert("page", options.page);
    params.insert("per_page", options.per_page);
    params.insert("sort", options.sort);
    params.insert_unfiltered(
        "unique_key",
        options.unique_key.as_deref().unwrap_or_default(),
    );
    client.get("audits", params).await
}

/// Deletes an audit together with its history.
pub async fn delete_audit(client: &A11yClient, uuid: &str) -> Result<ApiResponse> {
    let mut params = Params::new();
    params.insert("uuid", uuid);
    client.delete("audit", params).await
}

/// Records a manual verdict for one criterion of an audit.
///
/// Parameters travel as a form body, not as a query string.
pub async fn update_audit_manual(
    client: &A11yClient,
    uuid: &str,
    criterion_id: &str,
    status: AuditStatus,
    options: &ManualUpdateOptions,
) -> Result<ApiResponse> {
    let mut params = Params::new();
    params.insert("uuid", uuid);
    params.insert("criterion_id", criterion_id);
    params.insert("status", status);
    params.insert("device", options.device);
    client.post_form("audit/manual", params).await
}
