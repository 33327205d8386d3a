use sea_orm::Database;
use tracing::info;

use yiya_mp::config::MpConfig;
use yiya_mp::router::build_router;
use yiya_mp::state::AppState;

#[tokio::main]
async fn main() {
    yiya_core::tracing::init_tracing("mp");

    let config = MpConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        issuer: config.token_issuer(),
        wechat: config.wechat_client(),
    };

    let router = build_router(state, &config.cors_origins);
    let addr = format!("0.0.0.0:{}", config.mp_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("mp service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
