//! End-to-end route tests: router + session store + mocked backend

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use kabar::config::{Config, UserCredential};
use kabar::web::session::password_digest;
use kabar::web::{AppState, DashboardServer};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(backend_url: &str) -> Config {
    let mut config = Config::default();
    config.backend.base_url = backend_url.to_string();
    config.backend.request_timeout_secs = 5;
    config.backend.retry_count = 0;
    config.backend.retry_delay_ms = 1;
    config.auth.allow_guest = true;
    config.auth.users = vec![UserCredential {
        username: "ana".to_string(),
        password_sha256: password_digest("secret"),
    }];
    config
}

fn test_server(backend_url: &str) -> (axum::Router, AppState) {
    let server = DashboardServer::new(test_config(backend_url)).unwrap();
    (server.build_router(), server.state())
}

async fn mount_empty_article_endpoints(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/dashboard/articles/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

fn cookie_for(state: &AppState, session_id: uuid::Uuid) -> String {
    format!("{}={}", state.config.session.cookie_name, session_id)
}

async fn body_string(body: Body) -> String {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_dashboard_redirects_without_session() {
    let backend = MockServer::start().await;
    let (router, _) = test_server(&backend.uri());

    let response = router
        .oneshot(Request::get("/dashboard").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn test_guest_login_sets_cookie_and_redirects() {
    let backend = MockServer::start().await;
    let (router, state) = test_server(&backend.uri());

    let response = router
        .oneshot(Request::get("/guest-login").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/dashboard");

    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with(&state.config.session.cookie_name));
    assert!(cookie.contains("HttpOnly"));
    assert_eq!(state.sessions.len().await, 1);
}

#[tokio::test]
async fn test_dashboard_renders_for_guest() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "a", "sentiment": "positif", "source": "Antara"},
            {"id": 2, "title": "b", "sentiment": "negatif", "source": "Antara"},
        ])))
        .mount(&backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/dashboard/articles/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&backend)
        .await;

    let (router, state) = test_server(&backend.uri());
    let session = state.sessions.create_guest().await;

    let response = router
        .oneshot(
            Request::get("/dashboard")
                .header(header::COOKIE, cookie_for(&state, session.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response.into_body()).await;
    assert!(html.contains("sentimentDonut"));
    assert!(html.contains("Antara"));
}

#[tokio::test]
async fn test_dashboard_neutralizes_hostile_source_names() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "a", "source": "</script><script>alert(1)</script>"},
        ])))
        .mount(&backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/dashboard/articles/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&backend)
        .await;

    let (router, state) = test_server(&backend.uri());
    let session = state.sessions.create_guest().await;

    let response = router
        .oneshot(
            Request::get("/dashboard")
                .header(header::COOKIE, cookie_for(&state, session.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response.into_body()).await;
    // The name must never appear verbatim: the chart blob escapes it as
    // \u003c and the sources table HTML-escapes it.
    assert!(!html.contains("</script><script>alert(1)</script>"));
    assert!(html.contains("\\u003c/script>"));
}

#[tokio::test]
async fn test_login_with_valid_credentials() {
    let backend = MockServer::start().await;
    let (router, state) = test_server(&backend.uri());

    let response = router
        .oneshot(
            Request::post("/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=ana&password=secret"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/dashboard");
    assert_eq!(state.sessions.len().await, 1);
}

#[tokio::test]
async fn test_login_with_bad_credentials_rerenders_form() {
    let backend = MockServer::start().await;
    let (router, state) = test_server(&backend.uri());

    let response = router
        .oneshot(
            Request::post("/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=ana&password=wrong"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.sessions.len().await, 0);
}

#[tokio::test]
async fn test_guest_cannot_reach_auth_only_pages() {
    let backend = MockServer::start().await;
    let (router, state) = test_server(&backend.uri());
    let session = state.sessions.create_guest().await;

    let response = router
        .oneshot(
            Request::get("/favorite")
                .header(header::COOKIE, cookie_for(&state, session.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn test_api_routes_answer_401_without_login() {
    let backend = MockServer::start().await;
    let (router, _) = test_server(&backend.uri());

    let response = router
        .oneshot(
            Request::delete("/api/history/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value =
        serde_json::from_str(&body_string(response.into_body()).await).unwrap();
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_favorite_toggle_reports_new_state() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/favorites/7/check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"is_favorite": false})))
        .mount(&backend)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/favorites/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&backend)
        .await;

    let (router, state) = test_server(&backend.uri());
    let session = state.sessions.create_authenticated("ana").await;

    let response = router
        .oneshot(
            Request::post("/api/favorites/7/toggle")
                .header(header::COOKIE, cookie_for(&state, session.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value =
        serde_json::from_str(&body_string(response.into_body()).await).unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["is_favorite"], json!(true));
}

#[tokio::test]
async fn test_empty_search_redirects_to_dashboard() {
    let backend = MockServer::start().await;
    let (router, state) = test_server(&backend.uri());
    let session = state.sessions.create_guest().await;

    let response = router
        .oneshot(
            Request::get("/search-results?query=%20%20")
                .header(header::COOKIE, cookie_for(&state, session.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/dashboard?notice=empty-query"
    );
}

#[tokio::test]
async fn test_search_records_history_and_renders() {
    let backend = MockServer::start().await;
    mount_empty_article_endpoints(&backend).await;
    Mock::given(method("POST"))
        .and(path("/v1/search-history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&backend)
        .await;

    let (router, state) = test_server(&backend.uri());
    let session = state.sessions.create_guest().await;

    let response = router
        .oneshot(
            Request::get("/search-results?query=banjir")
                .header(header::COOKIE, cookie_for(&state, session.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response.into_body()).await;
    assert!(html.contains("banjir"));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let backend = MockServer::start().await;
    let (router, state) = test_server(&backend.uri());
    let session = state.sessions.create_authenticated("ana").await;

    let response = router
        .oneshot(
            Request::post("/logout")
                .header(header::COOKIE, cookie_for(&state, session.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.contains("Max-Age=0"));
    assert_eq!(state.sessions.len().await, 0);
}

#[tokio::test]
async fn test_health_reports_backend_state() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&backend)
        .await;

    let (router, _) = test_server(&backend.uri());

    let response = router
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value =
        serde_json::from_str(&body_string(response.into_body()).await).unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["backend_reachable"], json!(true));
}

#[tokio::test]
async fn test_source_create_validation() {
    let backend = MockServer::start().await;
    let (router, state) = test_server(&backend.uri());
    let session = state.sessions.create_authenticated("ana").await;

    let response = router
        .oneshot(
            Request::post("/api/sources")
                .header(header::COOKIE, cookie_for(&state, session.id))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name": "", "base_url": "https://ok.example"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
