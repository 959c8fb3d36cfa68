//! Wishlists service errors.

use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum WishlistsServiceError {
    #[error("login required")]
    LoginRequired,

    #[error("wishlist storage error")]
    Storage(#[from] StorageError),
}
