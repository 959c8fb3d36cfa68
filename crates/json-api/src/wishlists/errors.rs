//! Wishlist Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::wishlists::WishlistsServiceError;

pub(crate) fn into_status_error(error: WishlistsServiceError) -> StatusError {
    match error {
        WishlistsServiceError::LoginRequired => StatusError::unauthorized().brief("Login required"),
        WishlistsServiceError::Storage(source) => {
            error!("failed to persist wishlist: {source}");

            StatusError::internal_server_error()
        }
    }
}
