//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, handlers::CartResponse},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the cart of the current identity. Guests share one cart.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_500()?;

    let cart = state
        .app
        .carts
        .get_cart(identity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
