//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{carts::models::NewCartItem, products::records::ProductId};

use crate::{
    carts::{errors::into_status_error, handlers::CartMutationResponse},
    extensions::*,
    state::State,
};

fn one() -> u32 {
    1
}

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub product_id: String,

    /// Defaults to one
    #[serde(default = "one")]
    pub quantity: u32,

    /// Required to be one of the product's sizes when given
    #[serde(default)]
    pub size: Option<String>,
}

impl From<AddCartItemRequest> for NewCartItem {
    fn from(request: AddCartItemRequest) -> Self {
        NewCartItem {
            product: ProductId::new(request.product_id),
            quantity: request.quantity,
            size: request.size,
        }
    }
}

/// Add Cart Item Handler
///
/// Adds a catalog product to the cart, or increases the quantity of the
/// matching line.
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity or size"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartMutationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_500()?;

    let mutation = state
        .app
        .carts
        .add_item(identity, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(mutation.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::carts::{
        CartEvent, CartMutation, CartsServiceError, models::line_item_key,
    };

    use crate::test_helpers::{Mocks, make_cart, make_line, make_product};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("cart/items").post(handler))
    }

    #[tokio::test]
    async fn test_add_item_defaults_to_one() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .carts
            .expect_add_item()
            .once()
            .withf(|_, item| {
                *item
                    == NewCartItem {
                        product: ProductId::new("shawl"),
                        quantity: 1,
                        size: Some("L".to_string()),
                    }
            })
            .return_once(|_, _| {
                let line = make_line(make_product("shawl", 1200, &["L"]), 1, Some("L"));

                Ok(CartMutation {
                    event: Some(CartEvent::ItemAdded {
                        key: line.key.clone(),
                        label: line.label(),
                    }),
                    cart: make_cart(vec![line]),
                })
            });

        let mut res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_id": "shawl", "size": "L" }))
            .send(&make_service(mocks))
            .await;

        let body: CartMutationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.cart.total, 1200);
        assert_eq!(
            body.notice.as_deref(),
            Some("Product shawl (L) has been added.")
        );
        assert_eq!(
            body.cart.items.first().map(|line| line.key.clone()),
            Some(line_item_key(&ProductId::new("shawl"), Some("L")).into_string())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_product_returns_404() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::ProductNotFound));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_id": "missing" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_unoffered_size_returns_400() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidSize("XXL".to_string())));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_id": "shawl", "size": "XXL" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
