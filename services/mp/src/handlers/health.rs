use axum::extract::State;

use yiya_core::health::Readiness;

use crate::state::AppState;

/// `GET /readyz`: Postgres must answer. WeChat is not probed.
pub async fn readyz(State(state): State<AppState>) -> Readiness {
    Readiness::new().check("database", state.db.ping().await)
}
