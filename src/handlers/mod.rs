pub mod addresses;
pub mod auth;
pub mod meta;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod upload;
pub mod users;
pub mod wishlist;
