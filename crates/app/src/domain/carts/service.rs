//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tokio::sync::broadcast;

use crate::{
    auth::Identity,
    domain::{
        carts::{
            CartEvent, CartStore, CartsServiceError,
            models::{Cart, LineItemKey, NewCartItem},
        },
        products::ProductsService,
    },
    storage::StateStorage,
};

/// A cart after one operation, with the change it raised, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartMutation {
    pub cart: Cart,
    pub event: Option<CartEvent>,
}

/// Loads a [`CartStore`] per call and applies a single operation to it.
#[derive(Clone)]
pub struct StoredCartsService {
    storage: Arc<dyn StateStorage>,
    products: Arc<dyn ProductsService>,
    events: broadcast::Sender<CartEvent>,
}

impl StoredCartsService {
    #[must_use]
    pub fn new(
        storage: Arc<dyn StateStorage>,
        products: Arc<dyn ProductsService>,
        events: broadcast::Sender<CartEvent>,
    ) -> Self {
        Self {
            storage,
            products,
            events,
        }
    }

    async fn store(&self, identity: Identity) -> Result<CartStore, CartsServiceError> {
        let mut store = CartStore::new(self.storage.clone(), self.events.clone());

        store.load(identity).await?;

        Ok(store)
    }
}

fn mutation(store: &CartStore, event: Option<CartEvent>) -> CartMutation {
    CartMutation {
        cart: store.cart(),
        event,
    }
}

#[async_trait]
impl CartsService for StoredCartsService {
    async fn get_cart(&self, identity: Identity) -> Result<Cart, CartsServiceError> {
        Ok(self.store(identity).await?.cart())
    }

    #[tracing::instrument(name = "carts.add_item", skip_all, fields(identity = ?identity))]
    async fn add_item(
        &self,
        identity: Identity,
        item: NewCartItem,
    ) -> Result<CartMutation, CartsServiceError> {
        let product = self.products.get_product(item.product).await?;
        let mut store = self.store(identity).await?;

        let event = store
            .add_to_cart(&product, item.quantity, item.size.as_deref())
            .await?;

        Ok(mutation(&store, event))
    }

    #[tracing::instrument(name = "carts.update_quantity", skip_all, fields(identity = ?identity))]
    async fn update_quantity(
        &self,
        identity: Identity,
        key: LineItemKey,
        quantity: i64,
    ) -> Result<CartMutation, CartsServiceError> {
        let mut store = self.store(identity).await?;

        let event = store.update_quantity(&key, quantity).await?;

        Ok(mutation(&store, event))
    }

    #[tracing::instrument(name = "carts.remove_item", skip_all, fields(identity = ?identity))]
    async fn remove_item(
        &self,
        identity: Identity,
        key: LineItemKey,
    ) -> Result<CartMutation, CartsServiceError> {
        let mut store = self.store(identity).await?;

        let event = store.remove_from_cart(&key).await?;

        Ok(mutation(&store, event))
    }

    #[tracing::instrument(name = "carts.clear_cart", skip_all, fields(identity = ?identity))]
    async fn clear_cart(&self, identity: Identity) -> Result<CartMutation, CartsServiceError> {
        let mut store = self.store(identity).await?;

        let event = store.clear_cart().await?;

        Ok(mutation(&store, event))
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the cart of an identity.
    async fn get_cart(&self, identity: Identity) -> Result<Cart, CartsServiceError>;

    /// Add a catalog product to the cart.
    async fn add_item(
        &self,
        identity: Identity,
        item: NewCartItem,
    ) -> Result<CartMutation, CartsServiceError>;

    /// Replace the quantity of a line; zero or less removes it.
    async fn update_quantity(
        &self,
        identity: Identity,
        key: LineItemKey,
        quantity: i64,
    ) -> Result<CartMutation, CartsServiceError>;

    /// Remove a line. Absent lines are ignored.
    async fn remove_item(
        &self,
        identity: Identity,
        key: LineItemKey,
    ) -> Result<CartMutation, CartsServiceError>;

    /// Remove every line.
    async fn clear_cart(&self, identity: Identity) -> Result<CartMutation, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::{
        auth::UserId,
        domain::{
            carts::events::cart_event_channel,
            products::{MockProductsService, ProductsServiceError, records::ProductId},
        },
        storage::MemoryStateStorage,
        test::helpers::product,
    };

    use super::*;

    fn service(products: MockProductsService) -> StoredCartsService {
        StoredCartsService::new(
            Arc::new(MemoryStateStorage::new()),
            Arc::new(products),
            cart_event_channel(),
        )
    }

    fn new_item(product: &str, quantity: u32, size: Option<&str>) -> NewCartItem {
        NewCartItem {
            product: ProductId::new(product),
            quantity,
            size: size.map(ToString::to_string),
        }
    }

    #[tokio::test]
    async fn add_item_resolves_the_product_from_the_catalog() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .with(eq(ProductId::new("p1")))
            .times(2)
            .returning(|_| Ok(product("p1", 750, &["M"])));

        let carts = service(products);
        let user = Identity::User(UserId::new("123"));

        carts
            .add_item(user.clone(), new_item("p1", 1, Some("M")))
            .await?;

        let mutation = carts
            .add_item(user.clone(), new_item("p1", 2, Some("M")))
            .await?;

        assert_eq!(mutation.cart.count(), 3);
        assert_eq!(mutation.cart.total(), 2250);
        assert!(matches!(
            mutation.event,
            Some(CartEvent::QuantityIncreased { quantity: 3, .. })
        ));
        assert_eq!(carts.get_cart(user).await?, mutation.cart);
        assert!(carts.get_cart(Identity::Guest).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn unknown_products_are_reported() {
        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .returning(|_| Err(ProductsServiceError::NotFound));

        let result = service(products)
            .add_item(Identity::Guest, new_item("missing", 1, None))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn clear_cart_empties_the_cart() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .returning(|id| Ok(product(id.as_str(), 100, &[])));

        let carts = service(products);

        carts
            .add_item(Identity::Guest, new_item("a", 1, None))
            .await?;
        carts
            .add_item(Identity::Guest, new_item("b", 1, None))
            .await?;

        let cleared = carts.clear_cart(Identity::Guest).await?;

        assert!(cleared.cart.is_empty());
        assert!(matches!(
            cleared.event,
            Some(CartEvent::ItemRemoved { ref key, .. }) if key.as_str() == "a"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn update_and_remove_act_on_line_keys() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .returning(|id| Ok(product(id.as_str(), 100, &["S"])));

        let carts = service(products);

        carts
            .add_item(Identity::Guest, new_item("a", 1, Some("S")))
            .await?;
        carts
            .add_item(Identity::Guest, new_item("b", 1, None))
            .await?;

        let updated = carts
            .update_quantity(Identity::Guest, LineItemKey::new("a_S"), 4)
            .await?;

        assert_eq!(updated.cart.count(), 5);

        let removed = carts
            .remove_item(Identity::Guest, LineItemKey::new("b"))
            .await?;

        assert_eq!(removed.cart.items.len(), 1);
        assert_eq!(removed.cart.total(), 400);

        Ok(())
    }
}
