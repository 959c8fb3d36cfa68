//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product data")
        }
        ProductsServiceError::Sql(source) => {
            error!("failed to read the catalog: {source}");

            StatusError::internal_server_error()
        }
        ProductsServiceError::InvalidNumber(source) => {
            error!("catalog row holds an out-of-range number: {source}");

            StatusError::internal_server_error()
        }
    }
}
