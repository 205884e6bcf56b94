//! Request parameter mapping and its falsy filter.
//!
//! Every operation builds a [`Params`] and hands it to the dispatcher. Before
//! encoding, entries whose value is falsy (empty string, the string `"0"`,
//! `false`, `0`, or null) are dropped, so for example `sync=false` or a missing `unique_key`
//! never appears on the wire. The filter is observable API behavior: the
//! service relies on absent flags meaning "off".
//!
//! A single call path needs the opposite: listing audits always sends
//! `unique_key`, even when it is empty. That entry is inserted with
//! [`Params::insert_unfiltered`] so the exemption is visible at the call site
//! rather than hidden in the encoder.

use crate::enums::{AuditStatus, Device, Language, Sort};
use crate::error::Result;

/// A scalar parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Free text, or the wire code of an enum.
    Str(String),
    /// Flag. Rendered as `1` / `0`.
    Bool(bool),
    /// Integer, rendered in decimal.
    Int(i64),
    /// Absent value. Never rendered.
    Null,
}

impl ParamValue {
    /// Returns `true` for the values the filter drops: `""`, `"0"`, `false`,
    /// `0` and null.
    pub fn is_falsy(&self) -> bool {
        match self {
            ParamValue::Str(s) => s.is_empty() || s == "0",
            ParamValue::Bool(b) => !b,
            ParamValue::Int(n) => *n == 0,
            ParamValue::Null => true,
        }
    }

    /// Wire rendering of the value, or `None` for null.
    fn render(&self) -> Option<String> {
        match self {
            ParamValue::Str(s) => Some(s.clone()),
            ParamValue::Bool(true) => Some("1".to_string()),
            ParamValue::Bool(false) => Some("0".to_string()),
            ParamValue::Int(n) => Some(n.to_string()),
            ParamValue::Null => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        // Saturates at i64::MAX.
        ParamValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

impl From<Language> for ParamValue {
    fn from(value: Language) -> Self {
        ParamValue::Str(value.as_str().to_string())
    }
}

impl From<Device> for ParamValue {
    fn from(value: Device) -> Self {
        ParamValue::Str(value.as_str().to_string())
    }
}

impl From<Sort> for ParamValue {
    fn from(value: Sort) -> Self {
        ParamValue::Str(value.as_str().to_string())
    }
}

impl From<AuditStatus> for ParamValue {
    fn from(value: AuditStatus) -> Self {
        ParamValue::Str(value.as_str().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    value: ParamValue,
    filtered: bool,
}

/// Insertion-ordered parameter mapping.
///
/// Keys are unique: inserting an existing key replaces its value but keeps
/// its original position, so the encoded order is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<Entry>,
}

impl Params {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value that is subject to the falsy filter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.upsert(key.into(), value.into(), true);
    }

    /// Inserts a value that is sent even when falsy. Null is still omitted.
    pub fn insert_unfiltered(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.upsert(key.into(), value.into(), false);
    }

    fn upsert(&mut self, key: String, value: ParamValue, filtered: bool) {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => {
                entry.value = value;
                entry.filtered = filtered;
            }
            None => self.entries.push(Entry {
                key,
                value,
                filtered,
            }),
        }
    }

    /// Returns the raw value stored under `key`, before filtering.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.value)
    }

    /// Returns `true` if `key` has been inserted, whatever its value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries, before filtering.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The key/value pairs that survive the filter, rendered for the wire,
    /// in insertion order.
    pub fn wire_pairs(&self) -> Vec<(&str, String)> {
        self.entries
            .iter()
            .filter(|e| !(e.filtered && e.value.is_falsy()))
            .filter_map(|e| e.value.render().map(|v| (e.key.as_str(), v)))
            .collect()
    }

    /// URL-encodes the surviving pairs as `application/x-www-form-urlencoded`.
    pub fn to_query_string(&self) -> Result<String> {
        Ok(serde_urlencoded::to_string(self.wire_pairs())?)
    }
}
