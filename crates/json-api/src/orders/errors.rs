//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Order already exists")
        }
        OrdersServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Missing required order data")
        }
        OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Order totals do not add up")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failed: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::InvalidAmount(source) => {
            error!("order amount out of range: {source}");

            StatusError::internal_server_error()
        }
    }
}
