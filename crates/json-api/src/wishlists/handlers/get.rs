//! Get Wishlist Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State, wishlists::errors::into_status_error};

/// Wishlist Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistResponse {
    /// Saved product ids, oldest first
    pub products: Vec<String>,
}

/// Get Wishlist Handler
///
/// Returns the signed-in user's wishlist. Guests have none.
#[endpoint(
    tags("wishlists"),
    summary = "Get Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Wishlist"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Login required"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<WishlistResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_500()?;

    let products = state
        .app
        .wishlists
        .get_wishlist(identity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(WishlistResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}
