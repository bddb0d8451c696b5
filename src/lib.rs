use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod media;
pub mod state;

pub use state::AppState;

/// Build the full application router over shared state.
pub fn app(state: AppState) -> Router {
    let downloads = ServeDir::new(&state.config.downloads_dir);

    Router::new()
        // Public
        .route("/", get(handlers::meta::root))
        .route("/api/app-version", get(handlers::meta::app_version))
        // Diagnostics
        .route("/api/db-init", get(handlers::meta::db_init))
        .route("/api/debug/users", get(handlers::meta::debug_users))
        // Media upload
        .route("/api/upload", post(handlers::upload::upload_image))
        .merge(auth_routes())
        .merge(user_routes())
        .merge(order_routes())
        .merge(wishlist_routes())
        .merge(address_routes())
        .merge(product_routes())
        .merge(review_routes())
        .merge(notification_routes())
        // Application package distribution
        .nest_service("/downloads", downloads)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/google", post(auth::google_login))
}

fn user_routes() -> Router<AppState> {
    Router::new().route("/api/users/:id", put(handlers::users::update_profile))
}

fn order_routes() -> Router<AppState> {
    use handlers::orders;

    Router::new()
        .route("/api/orders/:userId", get(orders::list))
        .route("/api/orders", post(orders::create))
}

fn wishlist_routes() -> Router<AppState> {
    use handlers::wishlist;

    Router::new()
        .route("/api/wishlist/:userId", get(wishlist::list))
        .route("/api/wishlist", post(wishlist::add))
        .route("/api/wishlist/:userId/:productId", delete(wishlist::remove))
}

fn address_routes() -> Router<AppState> {
    use handlers::addresses;

    Router::new()
        .route("/api/addresses/:userId", get(addresses::list))
        .route("/api/addresses", post(addresses::create))
        .route("/api/addresses/:userId/:addressId", delete(addresses::delete))
}

fn product_routes() -> Router<AppState> {
    use handlers::products;

    Router::new()
        .route("/api/products", get(products::list).post(products::create))
        .route("/api/products/:id", put(products::update).delete(products::delete))
}

fn review_routes() -> Router<AppState> {
    use handlers::reviews;

    Router::new()
        .route("/api/reviews/:productId", get(reviews::list))
        .route("/api/reviews", post(reviews::create))
}

fn notification_routes() -> Router<AppState> {
    use handlers::notifications;

    Router::new()
        .route("/api/notifications/:userId", get(notifications::list))
        .route("/api/notifications", post(notifications::create))
        .route("/api/notifications/:userId/read", put(notifications::mark_all_read))
}
