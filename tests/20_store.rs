// Database-backed behavior tests. These run against the Postgres named by
// DATABASE_URL and skip silently when it is not configured, so the suite
// stays green on machines without a local database.

mod common;

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use axum::Router;
use serde_json::json;

fn database_url() -> Option<String> {
    std::env::var("DATABASE_URL").ok()
}

async fn db_app() -> Option<Router> {
    let url = database_url()?;
    let app = common::test_app(&url);
    // Schema bootstrap is idempotent; run it so each test can assume tables
    let (status, _) = common::get(&app, "/api/db-init").await;
    assert_eq!(status, 200);
    Some(app)
}

fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    format!("{}{}", prefix, nanos)
}

async fn signup_user(app: &Router, email: &str) -> i64 {
    let (status, body) = common::post(
        app,
        "/api/auth/signup",
        json!({ "identifier": email, "password": "secret-pw", "name": "Test User" }),
    )
    .await;
    assert_eq!(status, 201, "signup failed: {}", body);
    body["user"]["id"].as_i64().unwrap()
}

async fn create_product(app: &Router, name: &str) -> i64 {
    let (status, body) = common::post(
        app,
        "/api/products",
        json!({
            "name": name,
            "price": "499.00",
            "description": "test product",
            "sizes": ["S", "M"],
            "colors": ["red"],
            "image_urls": []
        }),
    )
    .await;
    assert_eq!(status, 201, "product create failed: {}", body);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn signup_then_login_succeeds() -> Result<()> {
    let Some(app) = db_app().await else { return Ok(()) };

    let email = unique("login") + "@example.com";
    signup_user(&app, &email).await;

    let (status, body) = common::post(
        &app,
        "/api/auth/login",
        json!({ "identifier": format!("  {}  ", email), "password": "secret-pw" }),
    )
    .await;
    assert_eq!(status, 200, "login failed: {}", body);
    assert_eq!(body["user"]["email"], email.as_str());
    assert!(body["token"].as_str().unwrap().len() > 20);
    Ok(())
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() -> Result<()> {
    let Some(app) = db_app().await else { return Ok(()) };

    let email = unique("badpw") + "@example.com";
    signup_user(&app, &email).await;

    let (status, _) = common::post(
        &app,
        "/api/auth/login",
        json!({ "identifier": email, "password": "wrong" }),
    )
    .await;
    assert_eq!(status, 401);
    Ok(())
}

#[tokio::test]
async fn login_unknown_identifier_is_not_found() -> Result<()> {
    let Some(app) = db_app().await else { return Ok(()) };

    let (status, body) = common::post(
        &app,
        "/api/auth/login",
        json!({ "identifier": unique("ghost") + "@example.com", "password": "pw" }),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "User not found");
    Ok(())
}

#[tokio::test]
async fn duplicate_signup_is_rejected() -> Result<()> {
    let Some(app) = db_app().await else { return Ok(()) };

    let email = unique("dup") + "@example.com";
    signup_user(&app, &email).await;

    let (status, body) = common::post(
        &app,
        "/api/auth/signup",
        json!({ "identifier": email, "password": "other-pw" }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "User already exists");
    Ok(())
}

#[tokio::test]
async fn phone_signup_stores_phone_identity() -> Result<()> {
    let Some(app) = db_app().await else { return Ok(()) };

    let phone = unique("98");
    let (status, body) = common::post(
        &app,
        "/api/auth/signup",
        json!({ "identifier": phone, "password": "pw" }),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body["user"]["phone"], phone.as_str());
    assert!(body["user"]["email"].is_null());
    Ok(())
}

#[tokio::test]
async fn google_login_creates_then_reuses_user() -> Result<()> {
    let Some(app) = db_app().await else { return Ok(()) };

    let email = unique("google") + "@example.com";
    let payload = json!({ "email": email, "name": "G User", "photoUrl": "https://p.example/g.jpg" });

    let (status, first) = common::post(&app, "/api/auth/google", payload.clone()).await;
    assert_eq!(status, 200, "google login failed: {}", first);
    let first_id = first["user"]["id"].as_i64().unwrap();
    assert_eq!(first["user"]["phone"], "");

    let (status, second) = common::post(&app, "/api/auth/google", payload).await;
    assert_eq!(status, 200);
    assert_eq!(second["user"]["id"].as_i64().unwrap(), first_id);
    Ok(())
}

#[tokio::test]
async fn profile_update_coalesces_missing_fields() -> Result<()> {
    let Some(app) = db_app().await else { return Ok(()) };

    let email = unique("profile") + "@example.com";
    let user_id = signup_user(&app, &email).await;

    let (status, body) = common::send(
        &app,
        "PUT",
        &format!("/api/users/{}", user_id),
        Some(json!({ "profile_image_url": "https://p.example/new.jpg" })),
    )
    .await;
    assert_eq!(status, 200);
    // name untouched, image updated
    assert_eq!(body["name"], "Test User");
    assert_eq!(body["profile_image_url"], "https://p.example/new.jpg");

    let (status, _) =
        common::send(&app, "PUT", "/api/users/999999999", Some(json!({ "name": "X" }))).await;
    assert_eq!(status, 404);
    Ok(())
}

#[tokio::test]
async fn products_list_newest_first() -> Result<()> {
    let Some(app) = db_app().await else { return Ok(()) };

    let p1 = unique("first-");
    let p2 = unique("second-");
    create_product(&app, &p1).await;
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    create_product(&app, &p2).await;

    let (status, body) = common::get(&app, "/api/products").await;
    assert_eq!(status, 200);
    let names: Vec<&str> =
        body.as_array().unwrap().iter().map(|p| p["name"].as_str().unwrap()).collect();
    let pos1 = names.iter().position(|n| *n == p1).unwrap();
    let pos2 = names.iter().position(|n| *n == p2).unwrap();
    assert!(pos2 < pos1, "newer product should come first");
    Ok(())
}

#[tokio::test]
async fn product_delete_semantics() -> Result<()> {
    let Some(app) = db_app().await else { return Ok(()) };

    let (status, body) = common::send(&app, "DELETE", "/api/products/999999999", None).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Product not found");

    let id = create_product(&app, &unique("togo-")).await;
    let (status, body) = common::send(&app, "DELETE", &format!("/api/products/{}", id), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Product deleted successfully");

    let (_, listing) = common::get(&app, "/api/products").await;
    assert!(!listing.as_array().unwrap().iter().any(|p| p["id"].as_i64() == Some(id)));
    Ok(())
}

#[tokio::test]
async fn product_update_replaces_all_fields() -> Result<()> {
    let Some(app) = db_app().await else { return Ok(()) };

    let id = create_product(&app, &unique("upd-")).await;
    let (status, body) = common::send(
        &app,
        "PUT",
        &format!("/api/products/{}", id),
        Some(json!({
            "name": "Renamed",
            "price": "999.00",
            "description": "updated",
            "sizes": ["L"],
            "colors": [],
            "image_urls": ["https://cdn.example/x.jpg"],
            "is_available": false
        })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["name"], "Renamed");
    assert_eq!(body["sizes"], json!(["L"]));
    assert_eq!(body["is_available"], false);
    Ok(())
}

#[tokio::test]
async fn wishlist_add_is_idempotent() -> Result<()> {
    let Some(app) = db_app().await else { return Ok(()) };

    let email = unique("wish") + "@example.com";
    let user_id = signup_user(&app, &email).await;
    let product_id = create_product(&app, &unique("wishp-")).await;

    let payload = json!({ "userId": user_id, "productId": product_id });
    let (status, _) = common::post(&app, "/api/wishlist", payload.clone()).await;
    assert_eq!(status, 201);
    let (status, _) = common::post(&app, "/api/wishlist", payload).await;
    assert_eq!(status, 201);

    let (status, body) = common::get(&app, &format!("/api/wishlist/{}", user_id)).await;
    assert_eq!(status, 200);
    assert_eq!(body.as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn wishlist_remove_of_absent_entry_succeeds() -> Result<()> {
    let Some(app) = db_app().await else { return Ok(()) };

    let email = unique("unwish") + "@example.com";
    let user_id = signup_user(&app, &email).await;

    let (status, body) =
        common::send(&app, "DELETE", &format!("/api/wishlist/{}/999999999", user_id), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Removed from wishlist");
    Ok(())
}

#[tokio::test]
async fn at_most_one_default_address_per_user() -> Result<()> {
    let Some(app) = db_app().await else { return Ok(()) };

    let email = unique("addr") + "@example.com";
    let user_id = signup_user(&app, &email).await;

    let (status, _) = common::post(
        &app,
        "/api/addresses",
        json!({
            "userId": user_id,
            "name": "Asha R",
            "address1": "12 MG Road",
            "address2": "2nd Cross",
            "city": "Bengaluru",
            "state": "KA",
            "zip": "560001",
            "isDefault": true
        }),
    )
    .await;
    assert_eq!(status, 201);

    let (status, second) = common::post(
        &app,
        "/api/addresses",
        json!({
            "user_id": user_id,
            "recipient_name": "Asha R",
            "street": "7 Brigade Road",
            "city": "Bengaluru",
            "state": "KA",
            "pincode": "560025",
            "is_default": true
        }),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(second["street"], "7 Brigade Road");

    let (status, listing) = common::get(&app, &format!("/api/addresses/{}", user_id)).await;
    assert_eq!(status, 200);
    let addresses = listing.as_array().unwrap();
    assert_eq!(addresses.len(), 2);
    let defaults = addresses.iter().filter(|a| a["is_default"] == true).count();
    assert_eq!(defaults, 1);
    // Default-first ordering
    assert_eq!(addresses[0]["is_default"], true);
    assert_eq!(addresses[0]["street"], "7 Brigade Road");
    Ok(())
}

#[tokio::test]
async fn address_delete_is_scoped_to_user() -> Result<()> {
    let Some(app) = db_app().await else { return Ok(()) };

    let owner = signup_user(&app, &(unique("owner") + "@example.com")).await;
    let other = signup_user(&app, &(unique("other") + "@example.com")).await;

    let (_, created) = common::post(
        &app,
        "/api/addresses",
        json!({ "userId": owner, "street": "12 MG Road", "pincode": "560001" }),
    )
    .await;
    let address_id = created["id"].as_i64().unwrap();

    // Wrong user: no-op
    let (status, _) =
        common::send(&app, "DELETE", &format!("/api/addresses/{}/{}", other, address_id), None).await;
    assert_eq!(status, 200);
    let (_, listing) = common::get(&app, &format!("/api/addresses/{}", owner)).await;
    assert_eq!(listing.as_array().unwrap().len(), 1);

    // Owning user: removed
    let (status, _) =
        common::send(&app, "DELETE", &format!("/api/addresses/{}/{}", owner, address_id), None).await;
    assert_eq!(status, 200);
    let (_, listing) = common::get(&app, &format!("/api/addresses/{}", owner)).await;
    assert!(listing.as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn reviews_join_reviewer_identity() -> Result<()> {
    let Some(app) = db_app().await else { return Ok(()) };

    let user_id = signup_user(&app, &(unique("rev") + "@example.com")).await;
    let product_id = create_product(&app, &unique("revp-")).await;

    let (status, created) = common::post(
        &app,
        "/api/reviews",
        json!({ "userId": user_id, "productId": product_id, "rating": 4, "text": "Lovely fabric" }),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(created["reviewer_name"], "Test User");

    let (status, listing) = common::get(&app, &format!("/api/reviews/{}", product_id)).await;
    assert_eq!(status, 200);
    let reviews = listing.as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["rating"], 4);
    assert_eq!(reviews[0]["review_text"], "Lovely fabric");
    Ok(())
}

#[tokio::test]
async fn notifications_flow() -> Result<()> {
    let Some(app) = db_app().await else { return Ok(()) };

    let user_id = signup_user(&app, &(unique("notif") + "@example.com")).await;

    for title in ["first", "second"] {
        let (status, _) = common::post(
            &app,
            "/api/notifications",
            json!({
                "userId": user_id,
                "title": title,
                "type": "order",
                "metadata": { "order_id": "order-1" }
            }),
        )
        .await;
        assert_eq!(status, 201);
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }

    let (status, listing) = common::get(&app, &format!("/api/notifications/{}", user_id)).await;
    assert_eq!(status, 200);
    let notifications = listing.as_array().unwrap();
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0]["title"], "second");
    assert_eq!(notifications[0]["is_read"], false);
    assert_eq!(notifications[0]["type"], "order");

    let (status, body) =
        common::send(&app, "PUT", &format!("/api/notifications/{}/read", user_id), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["updated"], 2);

    let (_, listing) = common::get(&app, &format!("/api/notifications/{}", user_id)).await;
    assert!(listing.as_array().unwrap().iter().all(|n| n["is_read"] == true));
    Ok(())
}

#[tokio::test]
async fn debug_users_carry_member_ids() -> Result<()> {
    let Some(app) = db_app().await else { return Ok(()) };

    signup_user(&app, &(unique("member") + "@example.com")).await;

    let (status, listing) = common::get(&app, "/api/debug/users").await;
    assert_eq!(status, 200);
    let users = listing.as_array().unwrap();
    assert!(!users.is_empty());
    assert!(users.iter().all(|u| u["member_id"].as_str().unwrap().starts_with("RKJ")));
    Ok(())
}
