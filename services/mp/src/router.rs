use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use yiya_core::health::healthz;
use yiya_core::middleware::{cors_layer, propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{bind_phone, login_by_code},
    health::readyz,
    user::{get_me, update_me},
};
use crate::state::AppState;

pub const API_PREFIX: &str = "/api/v1/mp";

pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/auth/login_by_code", post(login_by_code))
        .route("/auth/bind_phone", post(bind_phone))
        .route("/user/me", get(get_me).put(update_me));

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest(API_PREFIX, api)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(cors_layer(cors_origins)),
        )
        .with_state(state)
}
