use axum::body::Body;
use http::{Request, StatusCode};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

use yiya_mp::infra::wechat::WeChatClient;
use yiya_mp::router::build_router;
use yiya_mp::state::AppState;
use yiya_testing::auth::MockAuth;
use yiya_testing::body::json_body;

use crate::helpers::test_issuer;

/// Router over a disconnected database and an unreachable WeChat host. Only
/// paths that reject before any I/O can be exercised.
fn app() -> axum::Router {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        issuer: test_issuer(),
        wechat: WeChatClient::new("wx-test", "secret").with_base_url("http://127.0.0.1:1"),
    };
    build_router(state, &[])
}

fn request(method: &str, uri: &str) -> http::request::Builder {
    Request::builder().method(method).uri(uri)
}

#[tokio::test]
async fn should_answer_liveness_probe() {
    let resp = app()
        .oneshot(request("GET", "/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn should_report_unready_without_database() {
    let resp = app()
        .oneshot(request("GET", "/readyz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(resp).await;
    assert_eq!(body["status"], "unhealthy");
    assert!(body["checks"]["database"].as_str().unwrap().starts_with("error"));
}

#[tokio::test]
async fn should_reject_missing_bearer_token() {
    let resp = app()
        .oneshot(request("GET", "/api/v1/mp/user/me").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(resp).await["kind"], "INVALID_TOKEN");
}

#[tokio::test]
async fn should_reject_admin_token_on_mp_routes() {
    let token = MockAuth::admin(1, "admin").access_token().token;
    let resp = app()
        .oneshot(
            request("GET", "/api/v1/mp/user/me")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(resp).await["kind"], "INVALID_TOKEN");
}

#[tokio::test]
async fn should_reject_blank_login_code_before_calling_wechat() {
    let resp = app()
        .oneshot(
            request("POST", "/api/v1/mp/auth/login_by_code")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"code":""}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["kind"], "INVALID_INPUT");
}
