//! Async Rust client library for the a11y-checker accessibility auditing API.
//!
//! Builds authenticated requests for the service's operations (scan, rescan,
//! fetch and search audits, audit history, manual criterion updates) and
//! normalizes every answer into a single [`ApiResponse`] shape: the HTTP
//! status plus a JSON-or-text body. HTTP error statuses are returned as data;
//! only failures that produce no response at all surface as [`A11yError`].
//!
//! # Modules
//!
//! - [`audits`] — Scan, rescan, fetch, search, delete and manual updates.
//! - [`client`] — Client construction and the request dispatcher.
//! - [`enums`] — Closed value sets (language, device, sort, audit status).
//! - [`error`] — Typed error hierarchy (`A11yError`).
//! - [`history`] — Audit history fetch and delete.
//! - [`params`] — Request parameter mapping and its falsy filter.
//! - [`response`] — Normalized `ApiResponse` / `ResponseBody`.
//!
//! # Quick Start
//!
//! ```ignore
//! use a11y_checker::audits::{ScanOptions, scan};
//! use a11y_checker::client::A11yClient;
//!
//! let client = A11yClient::new(Some("api-key"), None)?;
//! let response = scan(&client, "https://example.com", &ScanOptions::default()).await?;
//! if response.is_success() {
//!     println!("{:?}", response.json());
//! }
//! ```

#![warn(missing_docs)]

pub mod audits;
pub mod client;
pub mod enums;
pub mod error;
pub mod history;
pub mod params;
pub mod response;

pub use client::{A11yClient, ClientBuilder};
pub use enums::{AuditStatus, Device, Language, Sort};
pub use error::{A11yError, Result};
pub use response::{ApiResponse, ResponseBody};
