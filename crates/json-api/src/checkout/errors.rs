//! Checkout Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::checkout::{CheckoutError, validation::ValidationErrors};

use crate::carts::errors::into_status_error as cart_status_error;

pub(crate) fn into_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::EmptyCart => StatusError::conflict().brief("Cart is empty"),
        CheckoutError::Validation(errors) => {
            StatusError::unprocessable_entity().brief(field_messages(&errors))
        }
        CheckoutError::Cart(source) => cart_status_error(source),
        CheckoutError::Persistence(source) => {
            error!("failed to save order: {source}");

            StatusError::bad_gateway().brief("Order could not be saved")
        }
    }
}

/// `field: message` pairs, separated by `; `.
fn field_messages(errors: &ValidationErrors) -> String {
    errors
        .0
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join("; ")
}
