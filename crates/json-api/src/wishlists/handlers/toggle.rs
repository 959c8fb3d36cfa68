//! Toggle Wishlist Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{
    products::records::ProductId,
    wishlists::{WishlistEvent, WishlistToggle},
};

use crate::{extensions::*, state::State, wishlists::errors::into_status_error};

/// Wishlist Toggle Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistToggleResponse {
    /// Saved product ids after the toggle
    pub products: Vec<String>,

    /// Whether the product is now on the wishlist
    pub added: bool,

    /// Shopper-facing message for the change
    pub notice: String,
}

impl From<WishlistToggle> for WishlistToggleResponse {
    fn from(toggle: WishlistToggle) -> Self {
        Self {
            added: matches!(toggle.event, WishlistEvent::Added(_)),
            notice: toggle.event.to_string(),
            products: toggle.products.into_iter().map(Into::into).collect(),
        }
    }
}

/// Toggle Wishlist Handler
///
/// Adds the product when absent and removes it when present.
#[endpoint(
    tags("wishlists"),
    summary = "Toggle Wishlist Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Wishlist updated"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Login required"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<WishlistToggleResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_500()?;

    let toggle = state
        .app
        .wishlists
        .toggle(identity, ProductId::new(product.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(toggle.into()))
}
