//! API behavior tests against a mock server
//!
//! Covers query-string construction, the uniform non-2xx failure, the
//! defaulting of missing response fields, and the feedback submission flow
//! (one POST followed by one re-fetch, or nothing at all for an empty
//! comment).

use std::sync::Arc;

use fatwa_common::error::{ClientError, Error};
use fatwa_common::models::{ListQuery, DEFAULT_LIST_LIMIT};
use fatwa_tui::client::FatwaClient;
use fatwa_tui::services::ApiService;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> ApiService {
    ApiService::new(Arc::new(FatwaClient::new(&server.uri())))
}

#[tokio::test]
async fn test_list_query_includes_topic_search_and_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/fatawa"))
        .and(query_param("topic", "fasting"))
        .and(query_param("q", "water"))
        .and(query_param("limit", "80"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 1, "title": "Water while fasting", "topic": "fasting"}],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = service_for(&server);
    let query = ListQuery::new(Some("fasting"), "water", DEFAULT_LIST_LIMIT);
    let items = api.list_fatawa(&query).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, 1);
}

#[tokio::test]
async fn test_list_query_without_filters_sends_only_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/fatawa"))
        .and(query_param("limit", "80"))
        .and(query_param_is_missing("topic"))
        .and(query_param_is_missing("q"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let api = service_for(&server);
    let query = ListQuery::new(None, "   ", DEFAULT_LIST_LIMIT);
    let items = api.list_fatawa(&query).await.unwrap();

    assert!(items.is_empty());
}

#[tokio::test]
async fn test_list_response_missing_items_defaults_to_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/fatawa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 0})))
        .mount(&server)
        .await;

    let api = service_for(&server);
    let items = api.list_fatawa(&ListQuery::default()).await.unwrap();

    assert!(items.is_empty());
}

#[tokio::test]
async fn test_non_success_status_surfaces_as_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/topics"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = service_for(&server);
    let err = api.topics().await.unwrap_err();

    match err {
        Error::Client(ClientError::Http { status, method, .. }) => {
            assert_eq!(status, 500);
            assert_eq!(method, "GET");
        }
        other => panic!("expected Http error, got: {other}"),
    }
}

#[tokio::test]
async fn test_detail_decodes_references_and_feedback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/fatawa/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "title": "Travel prayer",
            "topic": "prayer",
            "madhhab": "Hanafi",
            "url": "https://example.org/9",
            "question_summary": "Shortening prayer while traveling",
            "draft_fatwa_text": "A traveler may shorten the prayer.",
            "quran_references_json": "[\"4:101\"]",
            "feedback": [{"id": 3, "comment": "add hadith refs", "created_at_unix": 1700000000}]
        })))
        .mount(&server)
        .await;

    let api = service_for(&server);
    let detail = api.get_fatwa(9).await.unwrap();

    assert_eq!(detail.quran_references(), vec!["4:101"]);
    assert_eq!(detail.feedback.len(), 1);
    assert_eq!(detail.feedback[0].comment, "add hadith refs");
    assert_eq!(detail.display_madhhab(), "Hanafi");
}

#[tokio::test]
async fn test_detail_with_malformed_references_still_loads() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/fatawa/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4,
            "topic": "zakat",
            "quran_references_json": "not valid json"
        })))
        .mount(&server)
        .await;

    let api = service_for(&server);
    let detail = api.get_fatwa(4).await.unwrap();

    assert!(detail.quran_references().is_empty());
    assert!(detail.feedback.is_empty());
}

#[tokio::test]
async fn test_empty_comment_issues_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/feedback"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/fatawa/5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = service_for(&server);
    let result = api.submit_and_refresh(5, "   \n  ").await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_feedback_posts_trimmed_comment_then_refetches_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/feedback"))
        .and(body_json(json!({"fatwa_id": 5, "comment": "needs a source"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/fatawa/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "topic": "fasting",
            "feedback": [{"comment": "needs a source"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = service_for(&server);
    let detail = api
        .submit_and_refresh(5, "  needs a source  ")
        .await
        .unwrap()
        .expect("refreshed detail");

    assert_eq!(detail.id, 5);
    assert_eq!(detail.feedback[0].comment, "needs a source");
}

#[tokio::test]
async fn test_failed_feedback_post_skips_refetch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/feedback"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/fatawa/123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = service_for(&server);
    let err = api.submit_and_refresh(123, "missing record").await.unwrap_err();

    match err {
        Error::Client(ClientError::Http { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected Http error, got: {other}"),
    }
}

#[tokio::test]
async fn test_topics_then_filtered_list_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/topics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "topics": [{"topic": "fasting", "count": 3}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/fatawa"))
        .and(query_param("topic", "fasting"))
        .and(query_param("q", "water"))
        .and(query_param("limit", "80"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 2, "topic": "fasting"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = service_for(&server);

    let topics = api.topics().await.unwrap();
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].display_label(), "fasting (3)");

    let query = ListQuery::new(Some(&topics[0].topic), "water", DEFAULT_LIST_LIMIT);
    let items = api.list_fatawa(&query).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].meta_line(), "fasting | #2");
}
