use std::time::Duration;

use docwatch_backend::{
    ApiFailure, ApiSettings, DocumentStatusPayload, ReqwestStatusApi, StatusApi, StatusLabel,
    SystemStatsPayload,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestStatusApi {
    ReqwestStatusApi::new(ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    })
    .expect("client")
}

#[tokio::test]
async fn document_status_parses_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/document-status/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 42,
            "filename": "report.pdf",
            "status": "completed",
            "error": null
        })))
        .mount(&server)
        .await;

    let payload = api_for(&server)
        .document_status("42")
        .await
        .expect("status ok");
    assert_eq!(
        payload,
        DocumentStatusPayload {
            filename: "report.pdf".to_string(),
            status: StatusLabel::Completed,
            error: None,
        }
    );
}

#[tokio::test]
async fn failed_status_carries_the_error_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/document-status/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 7,
            "filename": "scan.tiff",
            "status": "failed",
            "error": "ocr stage crashed"
        })))
        .mount(&server)
        .await;

    let payload = api_for(&server)
        .document_status("7")
        .await
        .expect("status ok");
    assert_eq!(payload.status, StatusLabel::Failed);
    assert_eq!(payload.error.as_deref(), Some("ocr stage crashed"));
}

#[tokio::test]
async fn missing_document_maps_to_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/document-status/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = api_for(&server).document_status("9").await.unwrap_err();
    assert_eq!(err.kind, ApiFailure::HttpStatus(404));
}

#[tokio::test]
async fn malformed_body_is_a_parse_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/document-status/9"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
        .mount(&server)
        .await;

    let err = api_for(&server).document_status("9").await.unwrap_err();
    assert_eq!(err.kind, ApiFailure::Parse);
}

#[tokio::test]
async fn unknown_status_label_is_a_parse_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/document-status/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 9,
            "filename": "old.docx",
            "status": "archived",
            "error": null
        })))
        .mount(&server)
        .await;

    let err = api_for(&server).document_status("9").await.unwrap_err();
    assert_eq!(err.kind, ApiFailure::Parse);
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/system-stats"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(serde_json::json!({})),
        )
        .mount(&server)
        .await;

    let api = ReqwestStatusApi::new(ApiSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::default()
    })
    .expect("client");

    let err = api.system_stats().await.unwrap_err();
    assert_eq!(err.kind, ApiFailure::Timeout);
}

#[tokio::test]
async fn system_stats_parses_counters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/system-stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_documents": 12,
            "processed_documents": 9,
            "processing_documents": 2,
            "failed_documents": 1,
            "total_queries": 40
        })))
        .mount(&server)
        .await;

    let payload = api_for(&server).system_stats().await.expect("stats ok");
    assert_eq!(
        payload,
        SystemStatsPayload {
            total_documents: 12,
            processed_documents: 9,
            processing_documents: 2,
            failed_documents: 1,
            total_queries: 40,
        }
    );
}

#[tokio::test]
async fn system_stats_tolerate_a_missing_query_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/system-stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_documents": 3,
            "processed_documents": 3,
            "processing_documents": 0,
            "failed_documents": 0
        })))
        .mount(&server)
        .await;

    let payload = api_for(&server).system_stats().await.expect("stats ok");
    assert_eq!(payload.total_queries, 0);
}

#[tokio::test]
async fn invalid_base_url_is_rejected_up_front() {
    let err = ReqwestStatusApi::new(ApiSettings {
        base_url: "not a url".to_string(),
        ..ApiSettings::default()
    })
    .unwrap_err();

    assert_eq!(err.kind, ApiFailure::InvalidUrl);
}
