//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::products::records::{ProductId, ProductRecord};

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The catalog id of the product
    pub id: String,

    /// Display name
    pub name: String,

    /// Colour label, when the product has one
    pub color_name: Option<String>,

    /// Unit price in whole currency units
    pub price: u64,

    /// Sizes the product is offered in; empty for unsized products
    pub sizes: Vec<String>,

    /// Units in stock
    pub inventory: u32,

    /// Image reference
    pub image: String,

    pub description: String,

    pub category: Option<String>,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.id.into_string(),
            name: product.name,
            color_name: product.color_name,
            price: product.price,
            sizes: product.sizes,
            inventory: product.inventory,
            image: product.image,
            description: product.description,
            category: product.category,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(ProductId::new(product.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::products::ProductsServiceError;

    use crate::test_helpers::{Mocks, make_product};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("products/{product}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_200() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .products
            .expect_get_product()
            .once()
            .withf(|product| product.as_str() == "shawl-1")
            .return_once(|_| Ok(make_product("shawl-1", 2500, &["M", "L"])));

        let mut res = TestClient::get("http://example.com/products/shawl-1")
            .send(&make_service(mocks))
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.id, "shawl-1");
        assert_eq!(body.sizes, vec!["M".to_string(), "L".to_string()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_product_returns_404() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .products
            .expect_get_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::get("http://example.com/products/missing")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
