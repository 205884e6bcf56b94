//! CI validation for the endpoint manifest (manifest/endpoints.toml).
//!
//! These tests keep the manifest syntactically valid and consistent with the
//! crate's encoding rules: every endpoint has its required fields, uses a
//! known HTTP verb, and only POST endpoints travel as form bodies.

use serde::Deserialize;

/// Top-level manifest structure matching the TOML schema.
#[derive(Debug, Deserialize)]
struct Manifest {
    meta: Meta,
    endpoints: Vec<Endpoint>,
}

/// Manifest metadata.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Meta {
    schema_version: u32,
    last_validated: String,
}

/// A single endpoint entry in the manifest.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Endpoint {
    family: String,
    name: String,
    method: String,
    path: String,
    encoding: String,
    params: Vec<String>,
    implemented: bool,
    #[serde(default)]
    notes: String,
}

fn load_manifest() -> Manifest {
    let content = std::fs::read_to_string("manifest/endpoints.toml")
        .expect("manifest/endpoints.toml should exist and be readable");
    toml::from_str(&content).expect("manifest/endpoints.toml should be valid TOML")
}

#[test]
fn manifest_endpoints_toml_is_valid() {
    let manifest = load_manifest();

    assert!(
        manifest.meta.schema_version >= 1,
        "schema_version must be at least 1"
    );
    assert!(
        !manifest.endpoints.is_empty(),
        "manifest should contain at least one endpoint"
    );

    for ep in &manifest.endpoints {
        assert!(!ep.family.is_empty(), "endpoint family must not be empty");
        assert!(!ep.name.is_empty(), "endpoint name must not be empty");
        assert!(
            ep.path.starts_with("/api/"),
            "endpoint '{}' path must live under /api/",
            ep.name
        );
        assert!(!ep.params.is_empty(), "endpoint '{}' has no params", ep.name);
    }
}

#[test]
fn manifest_lists_every_implemented_operation() {
    let manifest = load_manifest();
    let implemented: Vec<&str> = manifest
        .endpoints
        .iter()
        .filter(|ep| ep.implemented)
        .map(|ep| ep.name.as_str())
        .collect();

    for expected in [
        "scan",
        "rescan",
        "get_audit",
        "list_audits",
        "delete_audit",
        "update_audit_manual",
        "get_history",
        "delete_history",
    ] {
        assert!(
            implemented.contains(&expected),
            "endpoint '{expected}' should be marked as implemented"
        );
    }
}

#[test]
fn manifest_methods_and_encodings_are_consistent() {
    let manifest = load_manifest();

    let valid_methods = ["GET", "POST", "DELETE"];
    for ep in &manifest.endpoints {
        assert!(
            valid_methods.contains(&ep.method.as_str()),
            "endpoint '{}' has invalid method '{}', expected one of {:?}",
            ep.name,
            ep.method,
            valid_methods
        );
        let expected_encoding = if ep.method == "POST" { "form" } else { "query" };
        assert_eq!(
            ep.encoding, expected_encoding,
            "endpoint '{}' should use {expected_encoding} encoding",
            ep.name
        );
    }
}
