//! Checkout errors.

use thiserror::Error;

use crate::domain::{
    carts::CartsServiceError, checkout::validation::ValidationErrors, orders::OrdersServiceError,
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("checkout form is invalid")]
    Validation(#[from] ValidationErrors),

    #[error("cart error")]
    Cart(#[from] CartsServiceError),

    #[error("order could not be saved")]
    Persistence(#[source] OrdersServiceError),
}

/// Failure to deliver an order notification.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("notification rejected: {0}")]
    Rejected(String),
}
