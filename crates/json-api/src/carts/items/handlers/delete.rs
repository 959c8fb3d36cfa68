//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::domain::carts::models::LineItemKey;

use crate::{
    carts::{errors::into_status_error, handlers::CartMutationResponse},
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Line removed, or was not in the cart"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    key: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartMutationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_500()?;

    let mutation = state
        .app
        .carts
        .remove_item(identity, LineItemKey::new(key.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(mutation.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use storefront_app::domain::carts::CartMutation;

    use crate::test_helpers::{Mocks, make_cart};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("cart/items/{key}").delete(handler))
    }

    #[tokio::test]
    async fn test_remove_item_success() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .carts
            .expect_remove_item()
            .once()
            .withf(|_, key| key.as_str() == "b")
            .return_once(|_, _| {
                Ok(CartMutation {
                    cart: make_cart(vec![]),
                    event: None,
                })
            });

        let res = TestClient::delete("http://example.com/cart/items/b")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
