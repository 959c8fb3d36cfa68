//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::{
    auth::Identity,
    domain::orders::{
        data::{DEFAULT_ORDER_STATUS, NewOrder},
        records::OrderTotals,
    },
};

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        handlers::{OrderItemBody, OrderResponse, PaymentDetailsBody, ShippingInfoBody},
    },
    state::State,
};

fn pending() -> String {
    DEFAULT_ORDER_STATUS.to_string()
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub order_id: String,

    pub subtotal: u64,

    #[serde(default)]
    pub discount_amount: u64,

    pub delivery_charge: u64,

    #[serde(default)]
    pub tax_amount: u64,

    /// Must equal `subtotal + delivery_charge + tax_amount - discount_amount`
    pub grand_total: u64,

    /// Defaults to `pending`
    #[serde(default = "pending")]
    pub order_status: String,

    pub order_items: Vec<OrderItemBody>,

    pub shipping_info: ShippingInfoBody,

    pub payment_details: PaymentDetailsBody,

    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateOrderRequest {
    /// The order as placed by `identity`. Guests place orders without a user.
    fn into_new_order(self, identity: &Identity) -> NewOrder {
        NewOrder {
            order_id: self.order_id.into(),
            user_id: identity.user_id().cloned(),
            totals: OrderTotals {
                subtotal: self.subtotal,
                discount_amount: self.discount_amount,
                delivery_charge: self.delivery_charge,
                tax_amount: self.tax_amount,
                grand_total: self.grand_total,
            },
            order_status: self.order_status,
            order_items: self.order_items.into_iter().map(Into::into).collect(),
            shipping_info: self.shipping_info.into(),
            payment_details: self.payment_details.into(),
            notes: self.notes,
        }
    }
}

/// Create Order Handler
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::CONFLICT, description = "Order already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or inconsistent order data"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_500()?;

    let order = state
        .app
        .orders
        .create_order(json.into_inner().into_new_order(&identity))
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.order_id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
