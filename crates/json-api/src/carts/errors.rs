//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be at least 1")
        }
        CartsServiceError::InvalidSize(size) => {
            StatusError::bad_request().brief(format!("Size {size:?} is not available"))
        }
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::NotLoaded => {
            error!("cart used before it was loaded");

            StatusError::internal_server_error()
        }
        CartsServiceError::Products(source) => {
            error!("failed to read the catalog: {source}");

            StatusError::internal_server_error()
        }
        CartsServiceError::Storage(source) => {
            error!("failed to persist cart: {source}");

            StatusError::internal_server_error()
        }
    }
}
