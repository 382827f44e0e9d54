use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use burrow_gateway::{App, AppState};
use burrow_generator::RandomGenerator;
use burrow_shortener::ShortenerService;
use burrow_storage::InMemoryRepository;
use serde_json::{json, Value};
use tower::ServiceExt;

const BASE_URL: &str = "http://localhost:8080";

struct Fixture {
    repository: Arc<InMemoryRepository>,
    router: Router,
}

impl Fixture {
    fn new() -> Self {
        let repository = Arc::new(InMemoryRepository::new());
        let shortener = ShortenerService::new(Arc::clone(&repository), RandomGenerator::new());
        let router = App::router(AppState::new(Arc::new(shortener), BASE_URL));
        Self { repository, router }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body.to_vec())
    }

    async fn get(&self, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn shorten_raw(&self, body: &str) -> (StatusCode, Value) {
        let request = Request::post("/api/shorten")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();
        let (status, _, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    async fn shorten(&self, url: &str) -> Value {
        let (status, body) = self.shorten_raw(&json!({ "url": url }).to_string()).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body
    }
}

#[tokio::test]
async fn shorten_returns_code_and_short_url() {
    let fixture = Fixture::new();

    let body = fixture.shorten("https://www.google.com").await;

    let code = body["short_code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert_eq!(body["original_url"], "https://www.google.com");
    assert_eq!(body["short_url"], format!("{BASE_URL}/{code}"));
}

#[tokio::test]
async fn shorten_rejects_bad_requests() {
    let fixture = Fixture::new();

    for payload in [r#"{"url":}"#, r#"{}"#, r#"{"url":""}"#, r#"{"url":"invalid"}"#] {
        let (status, body) = fixture.shorten_raw(payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
        assert!(body["error"].is_string(), "{payload}");
    }

    assert!(fixture.repository.is_empty());
}

#[tokio::test]
async fn shorten_without_json_content_type_is_rejected() {
    let fixture = Fixture::new();

    let request = Request::post("/api/shorten")
        .body(Body::from(json!({ "url": "example.com" }).to_string()))
        .unwrap();
    let (status, _, body) = fixture.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "expected Content-Type: application/json");
    assert!(fixture.repository.is_empty());
}

#[tokio::test]
async fn malformed_json_is_reported_as_invalid() {
    let fixture = Fixture::new();

    let (status, body) = fixture.shorten_raw(r#"{"url":}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid JSON");
}

#[tokio::test]
async fn shorten_is_idempotent() {
    let fixture = Fixture::new();

    let first = fixture.shorten("example.com").await;
    let second = fixture.shorten("http://example.com").await;

    assert_eq!(first["short_code"], second["short_code"]);
    assert_eq!(first["original_url"], "http://example.com");
    assert_eq!(fixture.repository.len(), 1);
}

#[tokio::test]
async fn redirect_counts_access() {
    let fixture = Fixture::new();
    let created = fixture.shorten("example.com").await;
    let code = created["short_code"].as_str().unwrap();

    let (status, headers, _) = fixture.get(&format!("/{code}")).await;
    assert_eq!(status, StatusCode::MOVED_PERMANENTLY);
    assert_eq!(headers[header::LOCATION], "http://example.com");

    let (status, _, body) = fixture.get(&format!("/api/stats/{code}")).await;
    assert_eq!(status, StatusCode::OK);
    let stats: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(stats["short_code"], code);
    assert_eq!(stats["original_url"], "http://example.com");
    assert_eq!(stats["access_count"], 1);
    assert!(stats["created_at"].is_string());
}

#[tokio::test]
async fn stats_do_not_count_access() {
    let fixture = Fixture::new();
    let created = fixture.shorten("https://example.com").await;
    let code = created["short_code"].as_str().unwrap();

    for _ in 0..3 {
        let (status, _, body) = fixture.get(&format!("/api/stats/{code}")).await;
        assert_eq!(status, StatusCode::OK);
        let stats: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(stats["access_count"], 0);
    }
}

#[tokio::test]
async fn unknown_codes_are_not_found() {
    let fixture = Fixture::new();

    let (status, _, _) = fixture.get("/zzzzzz").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = fixture.get("/doesnotexist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = fixture.get("/api/stats/doesnotexist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "short url not found");

    assert!(fixture.repository.is_empty());
}

#[tokio::test]
async fn list_returns_every_record() {
    let fixture = Fixture::new();
    fixture.shorten("https://a.com").await;
    fixture.shorten("https://b.com").await;

    let (status, _, body) = fixture.get("/api/urls").await;
    assert_eq!(status, StatusCode::OK);

    let listed: Vec<Value> = serde_json::from_slice(&body).unwrap();
    for entry in &listed {
        assert_eq!(entry["id"], entry["short_code"]);
        assert_eq!(entry["access_count"], 0);
        assert!(entry["created_at"].is_string());
    }
    let mut urls: Vec<_> = listed
        .iter()
        .map(|r| r["original_url"].as_str().unwrap().to_owned())
        .collect();
    urls.sort();
    assert_eq!(urls, ["https://a.com", "https://b.com"]);
}

#[tokio::test]
async fn health_reports_status_and_time() {
    let fixture = Fixture::new();

    let (status, _, body) = fixture.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "burrow");
    assert!(body["time"].as_str().unwrap().parse::<jiff::Timestamp>().is_ok());
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let fixture = Fixture::new();

    let request = Request::options("/api/shorten")
        .header(header::ORIGIN, "http://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = fixture.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_shorten_requests_share_one_code() {
    let fixture = Arc::new(Fixture::new());
    let mut handles = vec![];

    for _ in 0..32 {
        let fixture = Arc::clone(&fixture);
        handles.push(tokio::spawn(async move {
            fixture.shorten("https://race.example.com").await["short_code"]
                .as_str()
                .unwrap()
                .to_owned()
        }));
    }

    let mut codes = std::collections::HashSet::new();
    for handle in handles {
        codes.insert(handle.await.unwrap());
    }

    assert_eq!(codes.len(), 1);
    assert_eq!(fixture.repository.len(), 1);
}
