use std::time::Duration;

use contractions::providers::{GrammarChecker, LanguageToolChecker, LanguageToolError};
use httpmock::{
    Method::{GET, POST},
    MockServer,
};
use rstest::*;

#[fixture]
fn mock_server() -> MockServer {
    MockServer::start()
}

fn checker(server: &MockServer, language: &str) -> LanguageToolChecker {
    LanguageToolChecker::new(server.base_url(), language, Duration::from_secs(5))
        .unwrap_or_else(|e| panic!("client: {e}"))
}

#[rstest]
fn parses_matches(mock_server: MockServer) {
    let mock = mock_server.mock(|when, then| {
        when.method(POST)
            .path("/v2/check")
            .header("content-type", "application/x-www-form-urlencoded")
            .body_contains("language=en-US")
            .body_contains("text=He+have+gone");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({
                "software": { "name": "LanguageTool" },
                "matches": [{
                    "message": "Possible agreement error.",
                    "offset": 3,
                    "length": 4,
                    "rule": { "id": "HE_VERB_AGR", "description": "agreement" }
                }]
            }));
    });
    let issues = checker(&mock_server, "en-US")
        .check("He have gone")
        .unwrap_or_else(|e| panic!("check: {e}"));
    mock.assert();
    assert_eq!(issues.len(), 1);
    let issue = &issues[0];
    assert_eq!((issue.offset, issue.length), (3, 4));
    assert_eq!(issue.rule_id.as_deref(), Some("HE_VERB_AGR"));
    assert_eq!(issue.message, "Possible agreement error.");
}

#[rstest]
#[case(serde_json::json!({ "matches": [] }), 0)]
#[case(serde_json::json!({ "matches": [{ "offset": 0, "length": 1 }, { "offset": 2, "length": 1 }] }), 2)]
fn counts_issues(
    mock_server: MockServer,
    #[case] body: serde_json::Value,
    #[case] expected: usize,
) {
    mock_server.mock(|when, then| {
        when.method(POST).path("/v2/check");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(body);
    });
    let count = checker(&mock_server, "en-US")
        .issue_count("anything")
        .unwrap_or_else(|e| panic!("check: {e}"));
    assert_eq!(count, expected);
}

#[derive(Clone, Copy)]
enum ExpectedError {
    Request,
    InvalidResponse,
}

#[rstest]
#[case(500, None, ExpectedError::Request)]
#[case(200, Some(r#"{"oops":true}"#), ExpectedError::InvalidResponse)]
#[case(200, Some("not json"), ExpectedError::InvalidResponse)]
fn check_errors(
    mock_server: MockServer,
    #[case] status: u16,
    #[case] body: Option<&str>,
    #[case] expected: ExpectedError,
) {
    mock_server.mock(|when, then| {
        when.method(POST).path("/v2/check");
        match body {
            Some(body) => {
                then.status(status)
                    .header("content-type", "application/json")
                    .body(body);
            }
            None => {
                then.status(status);
            }
        }
    });
    let Err(err) = checker(&mock_server, "en-US").check("text") else {
        panic!("expected error")
    };
    match expected {
        ExpectedError::Request => assert!(matches!(err, LanguageToolError::Request(_))),
        ExpectedError::InvalidResponse => assert_eq!(err, LanguageToolError::InvalidResponse),
    }
}

#[rstest]
#[case("en-US", true)]
#[case("en", true)]
#[case("EN-us", true)]
#[case("fr", false)]
fn verifies_language(mock_server: MockServer, #[case] language: &str, #[case] supported: bool) {
    mock_server.mock(|when, then| {
        when.method(GET).path("/v2/languages");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(serde_json::json!([
                { "name": "English (US)", "code": "en", "longCode": "en-US" },
                { "name": "German", "code": "de", "longCode": "de-DE" }
            ]));
    });
    let result = checker(&mock_server, language).verify_language();
    if supported {
        assert!(result.is_ok(), "{result:?}");
    } else {
        assert_eq!(
            result,
            Err(LanguageToolError::UnsupportedLanguage {
                language: language.to_owned()
            })
        );
    }
}

#[test]
fn trims_trailing_slash() {
    let server = MockServer::start();
    let url = format!("{}/", server.base_url());
    let checker = LanguageToolChecker::new(url, "en-US", Duration::from_secs(1))
        .unwrap_or_else(|e| panic!("client: {e}"));
    assert_eq!(checker.base_url(), server.base_url());
    assert_eq!(checker.language(), "en-US");
}

#[test]
fn unreachable_server_is_a_request_error() {
    let checker = LanguageToolChecker::new("http://127.0.0.1:9", "en-US", Duration::from_secs(1))
        .unwrap_or_else(|e| panic!("client: {e}"));
    assert!(matches!(
        checker.verify_language(),
        Err(LanguageToolError::Request(_))
    ));
}
