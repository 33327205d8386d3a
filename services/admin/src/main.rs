use std::net::SocketAddr;

use sea_orm::Database;
use tracing::info;

use yiya_admin::config::AdminConfig;
use yiya_admin::domain::access::AccessEvaluator;
use yiya_admin::router::build_router;
use yiya_admin::state::AppState;

#[tokio::main]
async fn main() {
    yiya_core::tracing::init_tracing("admin");

    let config = AdminConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let state = AppState {
        db,
        redis,
        issuer: config.token_issuer(),
        evaluator: AccessEvaluator::default(),
    };

    let router = build_router(state, &config.cors_origins);
    let addr = format!("0.0.0.0:{}", config.admin_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("admin service listening on {addr}");
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("server error");
}
