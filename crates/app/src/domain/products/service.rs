//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductFilter},
        errors::ProductsServiceError,
        records::{ProductId, ProductRecord},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, &product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn import_products(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<usize, ProductsServiceError> {
        for product in &products {
            product.validate()?;
        }

        let mut tx = self.db.begin().await?;

        for product in &products {
            self.repository.upsert_product(&mut tx, product).await?;
        }

        tx.commit().await?;

        info!(count = products.len(), "catalog imported");

        Ok(products.len())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves catalog entries, optionally restricted to one category.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError>;

    /// Inserts or replaces catalog entries in one transaction, returning how
    /// many were written. Nothing is written if any entry is invalid.
    async fn import_products(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<usize, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::new_product};

    use super::*;

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn imported_products_can_be_fetched() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products
            .import_products(vec![new_product("prod1", 1200, &["M", "L"])])
            .await?;

        let product = ctx.products.get_product(ProductId::new("prod1")).await?;

        assert_eq!(product.price, 1200);
        assert_eq!(product.sizes, vec!["M".to_string(), "L".to_string()]);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn get_product_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductId::new("missing")).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn list_products_filters_by_category() -> TestResult {
        let ctx = TestContext::new().await;

        let mut shirt = new_product("shirt", 900, &[]);
        shirt.category = Some("tops".to_string());

        let mut jeans = new_product("jeans", 1500, &[]);
        jeans.category = Some("bottoms".to_string());

        ctx.products.import_products(vec![shirt, jeans]).await?;

        let tops = ctx
            .products
            .list_products(ProductFilter::category("tops"))
            .await?;

        let all = ctx.products.list_products(ProductFilter::default()).await?;

        assert_eq!(tops.len(), 1);
        assert_eq!(tops[0].id, ProductId::new("shirt"));
        assert_eq!(all.len(), 2);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn reimporting_replaces_the_entry() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products
            .import_products(vec![new_product("prod1", 100, &[])])
            .await?;

        ctx.products
            .import_products(vec![new_product("prod1", 250, &[])])
            .await?;

        let product = ctx.products.get_product(ProductId::new("prod1")).await?;

        assert_eq!(product.price, 250);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a container runtime"]
    async fn invalid_entries_abort_the_import() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .import_products(vec![new_product("ok", 100, &[]), new_product(" ", 1, &[])])
            .await;

        assert!(matches!(
            result,
            Err(ProductsServiceError::MissingRequiredData)
        ));
        assert!(
            ctx.products
                .list_products(ProductFilter::default())
                .await?
                .is_empty()
        );

        Ok(())
    }
}
