use axum::extract::State;

use yiya_core::health::Readiness;

use crate::state::AppState;

/// `GET /readyz`: Postgres and Redis must both answer.
pub async fn readyz(State(state): State<AppState>) -> Readiness {
    let database = state.db.ping().await;
    let redis = state.token_store().ping().await;
    Readiness::new()
        .check("database", database)
        .check("redis", redis)
}
