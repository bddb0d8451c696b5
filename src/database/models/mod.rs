pub mod address;
pub mod notification;
pub mod product;
pub mod review;
pub mod user;

pub use address::Address;
pub use notification::Notification;
pub use product::Product;
pub use review::ProductReview;
pub use user::{PublicUser, User};
