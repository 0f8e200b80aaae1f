//! Helpers shared by the integration tests.
#![allow(dead_code, reason = "each test binary uses a subset of the helpers")]

use std::io::Write;

use httpmock::{
    Method::{GET, POST},
    Mock, MockServer,
};
use tempfile::NamedTempFile;

/// Small vocabulary covering the sentences used across the tests.
pub const VOCABULARY: &[(&str, [f32; 3])] = &[
    ("He", [0.1, 0.9, 0.0]),
    ("is", [0.8, 0.1, 0.1]),
    ("has", [0.2, 0.2, 0.9]),
    ("late.", [0.5, 0.5, 0.5]),
    ("gone.", [0.4, 0.6, 0.3]),
];

/// Write `entries` in the word2vec binary format.
pub fn binary_embeddings(entries: &[(&str, [f32; 3])]) -> NamedTempFile {
    let mut bytes = format!("{} 3\n", entries.len()).into_bytes();
    for (word, vector) in entries {
        bytes.extend_from_slice(word.as_bytes());
        bytes.push(b' ');
        for value in vector {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes.push(b'\n');
    }
    let mut file = NamedTempFile::new().unwrap_or_else(|e| panic!("create temp file: {e}"));
    file.write_all(&bytes)
        .unwrap_or_else(|e| panic!("write embeddings: {e}"));
    file
}

/// Serve `/v2/languages` advertising the given `(code, longCode)` pairs.
pub fn mock_languages<'a>(server: &'a MockServer, languages: &[(&str, &str)]) -> Mock<'a> {
    let body: Vec<serde_json::Value> = languages
        .iter()
        .map(|(code, long_code)| {
            serde_json::json!({ "name": long_code, "code": code, "longCode": long_code })
        })
        .collect();
    server.mock(|when, then| {
        when.method(GET).path("/v2/languages");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::Value::Array(body));
    })
}

/// Report `issues` grammar problems for any checked text whose form-encoded
/// body contains `fragment`. Register specific mocks before catch-alls.
pub fn mock_check<'a>(server: &'a MockServer, fragment: &str, issues: usize) -> Mock<'a> {
    let matches: Vec<serde_json::Value> = (0..issues)
        .map(|offset| {
            serde_json::json!({
                "message": "Possible agreement error.",
                "offset": offset,
                "length": 3,
                "rule": { "id": "AGREEMENT" }
            })
        })
        .collect();
    server.mock(|when, then| {
        when.method(POST)
            .path("/v2/check")
            .body_contains(fragment);
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({ "matches": matches }));
    })
}

/// Report no grammar problems for any text.
pub fn mock_clean_checks(server: &MockServer) -> Mock<'_> {
    mock_check(server, "text=", 0)
}
