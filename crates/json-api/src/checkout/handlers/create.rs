//! Place Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::checkout::{form::CheckoutForm, pipeline::PlacedOrder};

use crate::{checkout::errors::into_status_error, extensions::*, state::State};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    pub name: String,

    /// 11 digits starting with `01`
    pub phone: String,

    #[serde(default)]
    pub email: Option<String>,

    pub address: String,

    pub city: String,

    pub zip: String,

    /// `cod` or `online`
    pub payment_method: String,
}

impl From<CheckoutRequest> for CheckoutForm {
    fn from(request: CheckoutRequest) -> Self {
        CheckoutForm {
            name: request.name,
            phone: request.phone,
            email: request.email,
            address: request.address,
            city: request.city,
            zip: request.zip,
            payment_method: request.payment_method,
        }
    }
}

/// Order Placed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderPlacedResponse {
    pub order_id: String,

    pub grand_total: u64,
}

impl From<PlacedOrder> for OrderPlacedResponse {
    fn from(placed: PlacedOrder) -> Self {
        Self {
            order_id: placed.order_id.into_string(),
            grand_total: placed.grand_total,
        }
    }
}

/// Place Order Handler
///
/// Validates the shipping form, notifies the merchant, stores the order and
/// clears the cart.
#[endpoint(
    tags("checkout"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::CONFLICT, description = "Cart is empty"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid checkout form"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Order could not be saved"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderPlacedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_500()?;

    let placed = state
        .app
        .checkout
        .checkout(identity, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", placed.order_id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(placed.into()))
}
