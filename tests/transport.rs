//! Transport behaviour against a mock backend

use mldash_cli::api::{self, TrainParams};
use mldash_cli::client::{ApiRequest, Transport, TransportConfig};
use mldash_cli::config::{ProxyRule, Timeouts};
use mldash_cli::error::NO_RESPONSE_MESSAGE;
use mldash_cli::notify::MemoryNotifier;
use mldash_cli::ClientError;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_with(base_url: &str, timeouts: Timeouts, proxy: Vec<ProxyRule>) -> (Transport, Arc<MemoryNotifier>) {
    let notifier = Arc::new(MemoryNotifier::new());
    let config = TransportConfig {
        base_url: base_url.to_string(),
        timeouts,
        proxy,
        user_agent: "mldash-tests".to_string(),
    };
    let transport = Transport::new(config, notifier.clone()).unwrap();
    (transport, notifier)
}

fn transport(base_url: &str) -> (Transport, Arc<MemoryNotifier>) {
    transport_with(base_url, Timeouts::default(), Vec::new())
}

fn short_timeouts() -> Timeouts {
    Timeouts {
        default: 1,
        upload: 1,
        training: 1,
        automl: 1,
        connect: 1,
    }
}

#[tokio::test]
async fn success_envelope_is_returned_unchanged() {
    let server = MockServer::start().await;
    let body = json!({"success": true, "message": "Default data loaded", "train_shape": [120, 8]});
    Mock::given(method("POST"))
        .and(path("/api/data/load-default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let (transport, notifier) = transport(&server.uri());
    let envelope = api::load_default_data(&transport).await.unwrap();

    assert_eq!(envelope.into_value(), body);
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn business_failure_is_rejected_with_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data/preview"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "No data loaded"})),
        )
        .mount(&server)
        .await;

    let (transport, notifier) = transport(&server.uri());
    let err = api::preview_data(&transport).await.unwrap_err();

    assert!(matches!(&err, ClientError::Business { message } if message == "No data loaded"));
    let notices = notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "No data loaded");
}

#[tokio::test]
async fn business_failure_on_training_is_still_notified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ml/train"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let (transport, notifier) = transport(&server.uri());
    let params = TrainParams::new("random_forest", vec!["yield_strength".to_string()]);
    let err = api::train_model(&transport, &params).await.unwrap_err();

    assert_eq!(err.to_string(), "Request failed");
    assert_eq!(notifier.notices().len(), 1);
}

#[tokio::test]
async fn not_found_maps_to_category() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models/list"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (transport, notifier) = transport(&server.uri());
    let err = api::list_models(&transport).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Requested resource not found");
    assert_eq!(notifier.notices()[0].message, "Requested resource not found");
}

#[tokio::test]
async fn server_message_wins_over_category() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ml/evaluate"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"success": false, "message": "No model has been trained"})),
        )
        .mount(&server)
        .await;

    let (transport, _) = transport(&server.uri());
    let err = api::evaluate_model(&transport, &json!({})).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "No model has been trained");
}

#[tokio::test]
async fn unknown_status_uses_generic_category() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/system/status"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (transport, _) = transport(&server.uri());
    let err = api::system_status(&transport).await.unwrap_err();
    assert_eq!(err.to_string(), "Server error 503");
}

#[tokio::test]
async fn unreachable_backend_reports_connectivity() {
    let (transport, notifier) = transport("http://127.0.0.1:1");
    let err = api::health(&transport).await.unwrap_err();

    assert!(matches!(&err, ClientError::Network(m) if m == NO_RESPONSE_MESSAGE));
    assert_eq!(notifier.notices()[0].message, NO_RESPONSE_MESSAGE);
}

#[tokio::test]
async fn long_running_failures_are_not_notified() {
    let (transport, notifier) = transport("http://127.0.0.1:1");
    let err = api::run_automl(&transport, &json!({"search_method": "random"}))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Network(_)));
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn long_running_calls_get_raised_timeout() {
    let server = MockServer::start().await;
    let delayed = |body: serde_json::Value| {
        ResponseTemplate::new(200)
            .set_body_json(body)
            .set_delay(Duration::from_millis(2500))
    };
    Mock::given(method("POST"))
        .and(path("/api/stacking/train"))
        .respond_with(delayed(json!({"success": true, "model_id": "stack_1"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/ml/predict"))
        .respond_with(delayed(json!({"success": true})))
        .mount(&server)
        .await;

    let (transport, _) = transport_with(&server.uri(), short_timeouts(), Vec::new());

    let trained = api::train_stacking(&transport, &json!({"base_models": ["rf"]}))
        .await
        .unwrap();
    assert_eq!(trained.get("model_id"), Some(&json!("stack_1")));

    let err = api::predict(&transport, &json!({})).await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
}

#[tokio::test]
async fn binary_download_passes_through() {
    let server = MockServer::start().await;
    let csv = b"a,b\n1,2\n".to_vec();
    Mock::given(method("GET"))
        .and(path("/api/data/download/test/csv"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Disposition", "attachment; filename=test_data.csv")
                .set_body_raw(csv.clone(), "text/csv"),
        )
        .mount(&server)
        .await;

    let (transport, _) = transport(&server.uri());
    let payload = api::download_data(&transport, "test", "csv").await.unwrap();

    assert_eq!(payload.status, 200);
    assert_eq!(payload.bytes, csv);
    assert_eq!(payload.file_name.as_deref(), Some("test_data.csv"));
    assert_eq!(payload.content_type.as_deref(), Some("text/csv"));
}

#[tokio::test]
async fn binary_body_shaped_like_failure_is_not_inspected() {
    let server = MockServer::start().await;
    let body = br#"{"success": false, "message": "looks like an error"}"#.to_vec();
    Mock::given(method("GET"))
        .and(path("/api/models/download/rf_01"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.clone(), "application/json"))
        .mount(&server)
        .await;

    let (transport, notifier) = transport(&server.uri());
    let payload = api::download_model(&transport, "rf_01").await.unwrap();

    assert_eq!(payload.bytes, body);
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn parameters_are_sent_as_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ml/train"))
        .and(body_json(json!({
            "model_type": "random_forest",
            "target_columns": ["yield_strength"],
            "test_size": 0.2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let (transport, _) = transport(&server.uri());
    let mut params = TrainParams::new("random_forest", vec!["yield_strength".to_string()]);
    params.test_size = Some(0.2);
    api::train_model(&transport, &params).await.unwrap();
}

#[tokio::test]
async fn delete_report_uses_delete_verb() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/reports/rep_42"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "message": "Report deleted"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (transport, _) = transport(&server.uri());
    let envelope = api::delete_report(&transport, "rep_42").await.unwrap();
    assert_eq!(envelope.message(), Some("Report deleted"));
}

#[tokio::test]
async fn empty_base_url_routes_through_proxy_rule() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (transport, _) = transport_with(
        "",
        Timeouts::default(),
        vec![ProxyRule::new("/api", server.uri())],
    );
    let health = api::health_status(&transport).await.unwrap();
    assert!(health.is_healthy());
}

#[tokio::test]
async fn custom_headers_are_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reports/list"))
        .and(wiremock::matchers::header("X-Request-Source", "tests"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "reports": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (transport, _) = transport(&server.uri());
    let request = ApiRequest::get("/api/reports/list").header("X-Request-Source", "tests");
    let envelope = transport.json(request).await.unwrap();
    assert_eq!(envelope.success(), Some(true));
}

fn proxy_rule(target: &str, timeout: u64) -> ProxyRule {
    let mut rule = ProxyRule::new("/api", target);
    rule.timeout = timeout;
    rule
}

#[tokio::test]
async fn proxied_requests_carry_target_host() {
    let server = MockServer::start().await;
    let host = server.uri().trim_start_matches("http://").to_string();
    Mock::given(method("GET"))
        .and(path("/api/data/preview"))
        .and(wiremock::matchers::header("host", host.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let (transport, _) = transport_with("", Timeouts::default(), vec![proxy_rule(&server.uri(), 300)]);
    api::preview_data(&transport).await.unwrap();
}

#[tokio::test]
async fn unreachable_proxy_target_is_a_proxy_error() {
    let (transport, notifier) =
        transport_with("", Timeouts::default(), vec![proxy_rule("http://127.0.0.1:1", 5)]);
    let err = api::preview_data(&transport).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().starts_with("Proxy server error: "));
    assert_eq!(notifier.notices().len(), 1);
    assert!(notifier.notices()[0].message.starts_with("Proxy server error: "));
}

#[tokio::test]
async fn proxy_rule_timeout_replaces_default_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data/preview"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true}))
                .set_delay(Duration::from_millis(2500)),
        )
        .mount(&server)
        .await;

    let (transport, _) = transport_with("", Timeouts::default(), vec![proxy_rule(&server.uri(), 1)]);
    let err = api::preview_data(&transport).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn long_running_proxy_errors_are_not_notified() {
    let (transport, notifier) =
        transport_with("", Timeouts::default(), vec![proxy_rule("http://127.0.0.1:1", 5)]);
    let err = api::run_automl(&transport, &json!({})).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn malformed_upload_part_is_reported() {
    let (transport, notifier) = transport("http://127.0.0.1:1");
    let mut part = mldash_cli::client::UploadPart::new("train_file", "train.csv", b"a\n".to_vec());
    part.content_type = "not-a-mime".to_string();

    let err = api::upload_data(&transport, vec![part]).await.unwrap_err();

    assert!(matches!(&err, ClientError::RequestSetup(m) if m == "Network error"));
    assert_eq!(notifier.notices().len(), 1);
    assert_eq!(notifier.notices()[0].message, "Network error");
}
