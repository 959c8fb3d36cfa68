//! Wishlists

pub mod errors;
pub mod events;
pub mod service;
pub mod store;

pub use errors::WishlistsServiceError;
pub use events::WishlistEvent;
pub use service::*;
pub use store::WishlistStore;
