//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, handlers::CartMutationResponse},
    extensions::*,
    state::State,
};

/// Clear Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart cleared"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartMutationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_500()?;

    let mutation = state
        .app
        .carts
        .clear_cart(identity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(mutation.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::carts::{
        CartEvent, CartMutation, CartsServiceError, models::LineItemKey,
    };

    use crate::test_helpers::{Mocks, make_cart};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("cart").delete(handler))
    }

    #[tokio::test]
    async fn test_clear_returns_the_empty_cart() -> TestResult {
        let mut mocks = Mocks::new();

        mocks.carts.expect_clear_cart().once().return_once(|_| {
            Ok(CartMutation {
                cart: make_cart(vec![]),
                event: Some(CartEvent::ItemRemoved {
                    key: LineItemKey::new("a"),
                    label: "Product a".to_string(),
                }),
            })
        });

        let mut res = TestClient::delete("http://example.com/cart")
            .send(&make_service(mocks))
            .await;

        let body: CartMutationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.cart.items.is_empty());
        assert!(body.notice.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_unexpected_cart_errors_return_500() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .carts
            .expect_clear_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::NotLoaded));

        let res = TestClient::delete("http://example.com/cart")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
