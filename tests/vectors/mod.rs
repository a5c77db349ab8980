//! Test vector types for the key-transport structures.
//!
//! The vectors in this directory were produced with an independent DER
//! encoder. Success vectors must decode to the listed fields and re-encode
//! byte for byte; failure vectors must be rejected.

// Many fields are required for deserialization but not directly used in tests
#![allow(dead_code)]

use serde::Deserialize;

/// A test vector suite (top-level JSON structure).
#[derive(Debug, Deserialize)]
pub struct TestVectorSuite<T> {
    pub name: String,
    pub tests: Vec<T>,
}

/// Test vector for `EncryptedKey`.
#[derive(Debug, Deserialize)]
pub struct EncryptedKeyTestVector {
    pub name: String,
    #[serde(rename = "expect-fail")]
    pub expect_fail: bool,
    #[serde(default)]
    pub comment: Option<String>,
    /// Hex-encoded DER
    pub der: String,
    #[serde(rename = "encrypted-key")]
    pub encrypted_key: Option<String>,
    #[serde(rename = "mask-key")]
    pub mask_key: Option<String>,
    pub mac: Option<String>,
}

/// Test vector for `KeyWrap`.
#[derive(Debug, Deserialize)]
pub struct KeyWrapTestVector {
    pub name: String,
    #[serde(rename = "expect-fail")]
    pub expect_fail: bool,
    #[serde(default)]
    pub comment: Option<String>,
    pub der: String,
    #[serde(rename = "encrypted-key")]
    pub encrypted_key: Option<String>,
    pub mac: Option<String>,
    /// Dotted encryption parameter set
    #[serde(rename = "param-set")]
    pub param_set: Option<String>,
    pub ukm: Option<String>,
}

/// Test vector for `KeyTransportMessage`.
#[derive(Debug, Deserialize)]
pub struct KeyTransportTestVector {
    pub name: String,
    #[serde(rename = "expect-fail")]
    pub expect_fail: bool,
    #[serde(default)]
    pub comment: Option<String>,
    /// Family the recipient decodes for
    pub family: String,
    pub der: String,
    #[serde(rename = "encrypted-key")]
    pub encrypted_key: Option<String>,
    pub mac: Option<String>,
    #[serde(rename = "param-set")]
    pub param_set: Option<String>,
    #[serde(rename = "public-key")]
    pub public_key: Option<String>,
    #[serde(rename = "public-key-param-set")]
    pub public_key_param_set: Option<String>,
    #[serde(rename = "digest-param-set")]
    pub digest_param_set: Option<String>,
    pub ukm: Option<String>,
}

/// Decode a hex string from a test vector.
pub fn hex_decode(s: &str) -> Option<Vec<u8>> {
    hex::decode(s).ok()
}

/// Load a test vector suite from a JSON file.
pub fn load_vectors<T: serde::de::DeserializeOwned>(path: &str) -> TestVectorSuite<T> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read test vector file {path}: {e}"));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse test vector file {path}: {e}"))
}
