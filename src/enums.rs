//! Closed value sets accepted by the auditing API.
//!
//! Each enum maps one-to-one onto the string codes the service understands.
//! The serde representation is the wire code itself, so an undeclared code
//! fails to deserialize instead of slipping through as free text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language of the audit report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Polish.
    Pl,
    /// German.
    De,
    /// French.
    Fr,
    /// Spanish.
    Es,
    /// Italian.
    It,
}

impl Language {
    /// Every declared language, in declaration order.
    pub const VARIANTS: [Language; 6] = [
        Language::En,
        Language::Pl,
        Language::De,
        Language::Fr,
        Language::Es,
        Language::It,
    ];

    /// The wire code sent as the `lang` parameter.
    pub const fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pl => "pl",
            Language::De => "de",
            Language::Fr => "fr",
            Language::Es => "es",
            Language::It => "it",
        }
    }
}

/// Device profile the page is rendered with during a scan.
///
/// `All` is never sent on the wire by [`scan`](crate::audits::scan): the
/// service treats a missing `device` parameter as "all devices".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Desktop and mobile.
    All,
    /// Desktop viewport.
    #[default]
    Desktop,
    /// Mobile viewport.
    Mobile,
}

impl Device {
    /// Every declared device, in declaration order.
    pub const VARIANTS: [Device; 3] = [Device::All, Device::Desktop, Device::Mobile];

    /// The wire code sent as the `device` parameter.
    pub const fn as_str(self) -> &'static str {
        match self {
            Device::All => "all",
            Device::Desktop => "desktop",
            Device::Mobile => "mobile",
        }
    }
}

/// Ordering of paginated audit and history listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sort {
    /// Oldest first by creation time.
    CreatedAtAsc,
    /// Newest first by creation time.
    CreatedAtDesc,
    /// Least recently audited first.
    LastAuditAsc,
    /// Most recently audited first.
    LastAuditDesc,
}

impl Sort {
    /// Every declared sort order, in declaration order.
    pub const VARIANTS: [Sort; 4] = [
        Sort::CreatedAtAsc,
        Sort::CreatedAtDesc,
        Sort::LastAuditAsc,
        Sort::LastAuditDesc,
    ];

    /// The wire code sent as the `sort` parameter.
    pub const fn as_str(self) -> &'static str {
        match self {
            Sort::CreatedAtAsc => "created_at_asc",
            Sort::CreatedAtDesc => "created_at_desc",
            Sort::LastAuditAsc => "last_audit_asc",
            Sort::LastAuditDesc => "last_audit_desc",
        }
    }
}

/// Outcome recorded for a criterion that is reviewed by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    /// The page satisfies the criterion.
    Passed,
    /// The page violates the criterion.
    Failed,
    /// The criterion does not apply to the page.
    NotApplicable,
    /// The reviewer could not decide.
    CantTell,
    /// Not reviewed yet.
    NotTested,
}

impl AuditStatus {
    /// Every declared status, in declaration order.
    pub const VARIANTS: [AuditStatus; 5] = [
        AuditStatus::Passed,
        AuditStatus::Failed,
        AuditStatus::NotApplicable,
        AuditStatus::CantTell,
        AuditStatus::NotTested,
    ];

    /// The wire code sent as the `status` parameter.
    pub const fn as_str(self) -> &'static str {
        match self {
            AuditStatus::Passed => "passed",
            AuditStatus::Failed => "failed",
            AuditStatus::NotApplicable => "not_applicable",
            AuditStatus::CantTell => "cant_tell",
            AuditStatus::NotTested => "not_tested",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
