//! Carts service errors.

use thiserror::Error;

use crate::{domain::products::ProductsServiceError, storage::StorageError};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart has not been loaded")]
    NotLoaded,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("size {0:?} is not offered for this product")]
    InvalidSize(String),

    #[error("product not found")]
    ProductNotFound,

    #[error("catalog error")]
    Products(#[source] ProductsServiceError),

    #[error("cart storage error")]
    Storage(#[from] StorageError),
}

impl From<ProductsServiceError> for CartsServiceError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::NotFound => Self::ProductNotFound,
            other => Self::Products(other),
        }
    }
}
