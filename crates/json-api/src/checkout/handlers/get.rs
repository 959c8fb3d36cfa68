//! Checkout Quote Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::checkout::CheckoutQuote;

use crate::{
    carts::handlers::CartLineResponse, checkout::errors::into_status_error, extensions::*,
    state::State,
};

/// Checkout Quote Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteResponse {
    pub items: Vec<CartLineResponse>,

    pub subtotal: u64,

    pub discount_amount: u64,

    /// Flat charge added to every order
    pub delivery_charge: u64,

    pub tax_amount: u64,

    pub grand_total: u64,

    /// The last order went through and the cart is still empty
    pub completed: bool,
}

impl From<CheckoutQuote> for QuoteResponse {
    fn from(quote: CheckoutQuote) -> Self {
        Self {
            items: quote.items.into_iter().map(Into::into).collect(),
            subtotal: quote.totals.subtotal,
            discount_amount: quote.totals.discount_amount,
            delivery_charge: quote.totals.delivery_charge,
            tax_amount: quote.totals.tax_amount,
            grand_total: quote.totals.grand_total,
            completed: quote.completed,
        }
    }
}

/// Checkout Quote Handler
///
/// Prices the current cart for checkout. An empty cart answers 409 so the
/// client can send the shopper back to the catalog, except right after an
/// order, when an empty `completed` quote is returned instead.
#[endpoint(
    tags("checkout"),
    summary = "Get Checkout Quote",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Checkout quote"),
        (status_code = StatusCode::CONFLICT, description = "Cart is empty"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<QuoteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_500()?;

    let quote = state
        .app
        .checkout
        .quote(identity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(quote.into()))
}
