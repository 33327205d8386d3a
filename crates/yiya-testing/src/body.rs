use axum::body::{Body, to_bytes};
use axum::response::Response;

/// Read a response body as JSON.
///
/// Panics if the body is not valid JSON.
pub async fn json_body(resp: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
