//! HTTP client behavior against a mock API server.
//!
//! Covers rate-limit handling (429 countdown, Retry-After, budget
//! exhaustion), error status mapping, and request shape on the wire.

use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use s2cli::request::QueryFilters;
use s2cli::{ClientError, Config, SemanticScholarClient};

fn client_for(server: &MockServer) -> SemanticScholarClient {
    SemanticScholarClient::new(Config::for_testing(&server.uri())).expect("client builds")
}

#[tokio::test]
async fn test_success_passes_response_through_unmodified() {
    let server = MockServer::start().await;
    let body = json!({
        "paperId": "abc123",
        "title": "Attention Is All You Need",
        "tldr": {"text": "a field the client has no model for"},
        "embedding": [0.1, 0.2]
    });

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).get_paper("abc123", None).await.unwrap();
    assert_eq!(result, body);
}

#[tokio::test]
async fn test_api_key_header_sent_when_configured() {
    let server = MockServer::start().await;
    let mut config = Config::for_testing(&server.uri());
    config.api_key = Some("test-key".to_string());
    let client = SemanticScholarClient::new(config).unwrap();

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/abc"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"paperId": "abc"})))
        .expect(1)
        .mount(&server)
        .await;

    client.get_paper("abc", None).await.unwrap();
}

#[tokio::test]
async fn test_search_sends_query_and_filter_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/search"))
        .and(query_param("query", "attention"))
        .and(query_param("limit", "5"))
        .and(query_param("year", "2020-2023"))
        .and(query_param("openAccessPdf", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0, "data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let filters = QueryFilters {
        year: Some("2020-2023".to_string()),
        open_access: true,
        ..Default::default()
    };
    client_for(&server).search_papers("attention", &filters, 5, 0, None).await.unwrap();
}

#[tokio::test]
async fn test_batch_posts_normalized_ids() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graph/v1/paper/batch"))
        .and(body_json(json!({"ids": ["DOI:10.1234/x", "ARXIV:1706.03762"]})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"paperId": "a"}, {"paperId": "b"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ids = vec!["doi:10.1234/x".to_string(), "1706.03762".to_string()];
    let result = client_for(&server).get_papers_batch(&ids, None).await.unwrap();
    assert_eq!(result.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_doi_with_slash_and_hash_stays_in_the_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/DOI:10.1234%2Fabc%23sec"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"paperId": "x"})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).get_paper("10.1234/abc#sec", None).await.unwrap();
}

#[tokio::test]
async fn test_multi_recommendations_posts_examples() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/recommendations/v1/papers/"))
        .and(body_json(json!({
            "positivePaperIds": ["DOI:10.1/x", "abc"],
            "negativePaperIds": ["ARXIV:1706.03762"]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"recommendedPapers": [{"paperId": "r"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let positive = vec!["doi:10.1/x".to_string(), "abc".to_string()];
    let negative = vec!["1706.03762".to_string()];
    let result = client_for(&server)
        .get_recommendations_multi(&positive, &negative, 10, None)
        .await
        .unwrap();
    assert_eq!(result["recommendedPapers"][0]["paperId"], "r");
}

#[tokio::test]
async fn test_429_retries_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/abc"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"paperId": "abc"})))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).get_paper("abc", None).await.unwrap();
    assert_eq!(result["paperId"], "abc");
}

#[tokio::test]
async fn test_429_honors_retry_after_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/abc"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"paperId": "abc"})))
        .mount(&server)
        .await;

    let start = Instant::now();
    client_for(&server).get_paper("abc", None).await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(1));
}

#[tokio::test]
async fn test_429_budget_exhaustion() {
    let server = MockServer::start().await;

    // Budget of 5 retries means 6 requests total before giving up.
    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/abc"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(6)
        .mount(&server)
        .await;

    let err = client_for(&server).get_paper("abc", None).await.unwrap_err();
    match err {
        ClientError::RateLimitExceeded { attempts } => assert_eq!(attempts, 6),
        other => panic!("expected rate limit error, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn test_no_retry_fails_on_first_429() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/abc"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config::for_testing(&server.uri()).without_retries();
    let client = SemanticScholarClient::new(config).unwrap();

    let err = client.get_paper("abc", None).await.unwrap_err();
    match err {
        ClientError::RateLimitExceeded { attempts } => assert_eq!(attempts, 1),
        other => panic!("expected rate limit error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_retry_after_falls_back_to_default() {
    let server = MockServer::start().await;

    // Test config sets the fallback backoff to zero, so a garbage header
    // must not stall the retry loop.
    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/abc"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "soon"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"paperId": "abc"})))
        .mount(&server)
        .await;

    client_for(&server).get_paper("abc", None).await.unwrap();
}

#[tokio::test]
async fn test_404_fails_immediately_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Paper not found"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).get_paper("missing", None).await.unwrap_err();
    match err {
        ClientError::Api { status, ref body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "Paper not found");
        }
        ref other => panic!("expected api error, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_400_surfaces_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/search"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "Unrecognized field: bogus"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search_papers("x", &QueryFilters::default(), 10, 0, Some("bogus"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Unrecognized field"));
}

#[tokio::test]
async fn test_500_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/graph/v1/paper/abc"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).get_paper("abc", None).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_invalid_identifier_never_hits_the_network() {
    let server = MockServer::start().await;

    let err = client_for(&server).get_paper("   ", None).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidIdentifier(_)));
    assert_eq!(err.exit_code(), 2);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_datasets_use_their_own_base_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/datasets/v1/release/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["2024-01-01"])))
        .expect(1)
        .mount(&server)
        .await;

    let releases = client_for(&server).list_releases().await.unwrap();
    assert_eq!(releases[0], "2024-01-01");
}
