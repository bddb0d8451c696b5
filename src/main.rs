use std::sync::Arc;

use boutique_api::config::AppConfig;
use boutique_api::database::store;
use boutique_api::media::MediaClient;
use boutique_api::{app, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = Arc::new(AppConfig::from_env());

    let pool = store::connect_lazy(&config.database)
        .unwrap_or_else(|e| panic!("invalid database configuration: {}", e));

    let state = AppState {
        pool: pool.clone(),
        media: MediaClient::new(config.cloudinary.clone()),
        config: config.clone(),
    };

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Boutique API listening on http://{}", bind_addr);

    // Best-effort: the server stays up even if the schema pass fails
    store::init_db(&pool).await;

    axum::serve(listener, app(state)).await.expect("server");
}
