//! Wishlist state for a signed-in identity.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::{
    auth::{Identity, UserId},
    domain::{
        products::records::ProductId,
        wishlists::{WishlistEvent, WishlistsServiceError},
    },
    storage::{PartitionKey, StateStorage, StorageError},
};

/// Ordered product ids saved by one user. Guests have no wishlist.
pub struct WishlistStore {
    storage: Arc<dyn StateStorage>,
    events: broadcast::Sender<WishlistEvent>,
    user: Option<UserId>,
    products: Vec<ProductId>,
    loaded: bool,
}

impl WishlistStore {
    #[must_use]
    pub fn new(storage: Arc<dyn StateStorage>, events: broadcast::Sender<WishlistEvent>) -> Self {
        Self {
            storage,
            events,
            user: None,
            products: Vec::new(),
            loaded: false,
        }
    }

    /// Read the wishlist of `identity`. Loading as a guest is a logout.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistsServiceError::Storage`] when the partition cannot be
    /// read.
    pub async fn load(&mut self, identity: Identity) -> Result<(), WishlistsServiceError> {
        let Identity::User(user) = identity else {
            self.logout();
            self.loaded = true;
            return Ok(());
        };

        self.products.clear();

        let partition = PartitionKey::wishlist(Identity::User(user.clone()));

        if let Some(payload) = self.storage.read(&partition).await? {
            match serde_json::from_str::<Vec<ProductId>>(&payload) {
                Ok(products) => self.products = products,
                Err(error) => {
                    warn!(%partition, %error, "discarding unreadable wishlist");

                    if let Err(error) = self.storage.remove(&partition).await {
                        warn!(%partition, %error, "failed to discard unreadable wishlist");
                    }
                }
            }
        }

        self.user = Some(user);
        self.loaded = true;

        Ok(())
    }

    /// Forget the in-memory wishlist. Storage is left untouched.
    pub fn logout(&mut self) {
        self.user = None;
        self.products.clear();
    }

    #[must_use]
    pub fn products(&self) -> &[ProductId] {
        &self.products
    }

    #[must_use]
    pub fn contains(&self, product: &ProductId) -> bool {
        self.products.contains(product)
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Add `product` if absent, remove it otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`WishlistsServiceError::LoginRequired`] when no user is signed
    /// in, and storage errors from persisting the change.
    pub async fn toggle(&mut self, product: ProductId) -> Result<WishlistEvent, WishlistsServiceError> {
        let user = self
            .user
            .clone()
            .ok_or(WishlistsServiceError::LoginRequired)?;

        let mut next = self.products.clone();

        let event = if let Some(position) = next.iter().position(|id| id == &product) {
            next.remove(position);
            WishlistEvent::Removed(product)
        } else {
            next.push(product.clone());
            WishlistEvent::Added(product)
        };

        let payload = serde_json::to_string(&next).map_err(StorageError::Serialize)?;

        self.storage
            .write(&PartitionKey::wishlist(Identity::User(user)), payload)
            .await?;

        self.products = next;

        if self.events.send(event.clone()).is_err() {
            debug!(%event, "no wishlist event subscribers");
        }

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::wishlists::events::wishlist_event_channel,
        storage::{MemoryStateStorage, MockStateStorage},
    };

    use super::*;

    fn user() -> Identity {
        Identity::User(UserId::new("123"))
    }

    #[tokio::test]
    async fn toggling_twice_restores_the_wishlist() -> TestResult {
        let storage: Arc<dyn StateStorage> = Arc::new(MemoryStateStorage::new());
        let mut store = WishlistStore::new(storage, wishlist_event_channel());

        store.load(user()).await?;
        store.toggle(ProductId::new("a")).await?;

        let before = store.products().to_vec();

        let added = store.toggle(ProductId::new("b")).await?;
        let removed = store.toggle(ProductId::new("b")).await?;

        assert_eq!(added, WishlistEvent::Added(ProductId::new("b")));
        assert_eq!(removed, WishlistEvent::Removed(ProductId::new("b")));
        assert_eq!(store.products(), before.as_slice());

        Ok(())
    }

    #[tokio::test]
    async fn guests_cannot_toggle() -> TestResult {
        let storage = Arc::new(MemoryStateStorage::new());
        let mut store = WishlistStore::new(storage.clone(), wishlist_event_channel());

        store.load(Identity::Guest).await?;

        let result = store.toggle(ProductId::new("a")).await;

        assert!(matches!(result, Err(WishlistsServiceError::LoginRequired)));
        assert!(store.products().is_empty());
        assert_eq!(
            storage
                .read(&PartitionKey::wishlist(Identity::Guest))
                .await?,
            None
        );

        Ok(())
    }

    #[tokio::test]
    async fn logout_keeps_the_persisted_wishlist() -> TestResult {
        let storage: Arc<dyn StateStorage> = Arc::new(MemoryStateStorage::new());
        let mut store = WishlistStore::new(storage, wishlist_event_channel());

        store.load(user()).await?;
        store.toggle(ProductId::new("a")).await?;
        store.logout();

        assert!(store.products().is_empty());

        store.load(user()).await?;

        assert!(store.contains(&ProductId::new("a")));

        Ok(())
    }

    #[tokio::test]
    async fn malformed_wishlist_loads_as_empty() -> TestResult {
        let storage = Arc::new(MemoryStateStorage::new());
        let partition = PartitionKey::wishlist(user());

        storage.write(&partition, "not-json".to_string()).await?;

        let mut store = WishlistStore::new(storage.clone(), wishlist_event_channel());

        store.load(user()).await?;

        assert!(store.is_loaded());
        assert!(store.products().is_empty());
        assert_eq!(storage.read(&partition).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn malformed_wishlist_loads_even_when_it_cannot_be_discarded() -> TestResult {
        let mut storage = MockStateStorage::new();

        storage
            .expect_read()
            .once()
            .returning(|_| Ok(Some("not-json".to_string())));
        storage
            .expect_remove()
            .once()
            .returning(|_| Err(StorageError::Sql(sqlx::Error::PoolTimedOut)));

        let mut store = WishlistStore::new(Arc::new(storage), wishlist_event_channel());

        store.load(user()).await?;

        assert!(store.is_loaded());
        assert!(store.products().is_empty());

        Ok(())
    }
}
