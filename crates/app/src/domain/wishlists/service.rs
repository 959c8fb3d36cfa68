//! Wishlists service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tokio::sync::broadcast;

use crate::{
    auth::Identity,
    domain::{
        products::records::ProductId,
        wishlists::{WishlistEvent, WishlistStore, WishlistsServiceError},
    },
    storage::StateStorage,
};

/// Wishlist contents after a toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistToggle {
    pub products: Vec<ProductId>,
    pub event: WishlistEvent,
}

#[derive(Clone)]
pub struct StoredWishlistsService {
    storage: Arc<dyn StateStorage>,
    events: broadcast::Sender<WishlistEvent>,
}

impl StoredWishlistsService {
    #[must_use]
    pub fn new(storage: Arc<dyn StateStorage>, events: broadcast::Sender<WishlistEvent>) -> Self {
        Self { storage, events }
    }

    async fn store(&self, identity: Identity) -> Result<WishlistStore, WishlistsServiceError> {
        if !identity.is_authenticated() {
            return Err(WishlistsServiceError::LoginRequired);
        }

        let mut store = WishlistStore::new(self.storage.clone(), self.events.clone());

        store.load(identity).await?;

        Ok(store)
    }
}

#[async_trait]
impl WishlistsService for StoredWishlistsService {
    async fn get_wishlist(
        &self,
        identity: Identity,
    ) -> Result<Vec<ProductId>, WishlistsServiceError> {
        Ok(self.store(identity).await?.products().to_vec())
    }

    #[tracing::instrument(name = "wishlists.toggle", skip_all, fields(identity = ?identity, product = %product))]
    async fn toggle(
        &self,
        identity: Identity,
        product: ProductId,
    ) -> Result<WishlistToggle, WishlistsServiceError> {
        let mut store = self.store(identity).await?;

        let event = store.toggle(product).await?;

        Ok(WishlistToggle {
            products: store.products().to_vec(),
            event,
        })
    }
}

#[automock]
#[async_trait]
pub trait WishlistsService: Send + Sync {
    /// Product ids saved by a signed-in user.
    async fn get_wishlist(
        &self,
        identity: Identity,
    ) -> Result<Vec<ProductId>, WishlistsServiceError>;

    /// Add or remove a product from a signed-in user's wishlist.
    async fn toggle(
        &self,
        identity: Identity,
        product: ProductId,
    ) -> Result<WishlistToggle, WishlistsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        auth::UserId, domain::wishlists::events::wishlist_event_channel,
        storage::MemoryStateStorage,
    };

    use super::*;

    fn service() -> StoredWishlistsService {
        StoredWishlistsService::new(Arc::new(MemoryStateStorage::new()), wishlist_event_channel())
    }

    #[tokio::test]
    async fn guests_have_no_wishlist() {
        let result = service().get_wishlist(Identity::Guest).await;

        assert!(matches!(result, Err(WishlistsServiceError::LoginRequired)));
    }

    #[tokio::test]
    async fn toggles_persist_per_user() -> TestResult {
        let wishlists = service();
        let alice = Identity::User(UserId::new("alice"));
        let bob = Identity::User(UserId::new("bob"));

        let toggled = wishlists
            .toggle(alice.clone(), ProductId::new("p1"))
            .await?;

        assert_eq!(toggled.products, vec![ProductId::new("p1")]);
        assert_eq!(wishlists.get_wishlist(alice).await?, vec![ProductId::new("p1")]);
        assert!(wishlists.get_wishlist(bob).await?.is_empty());

        Ok(())
    }
}
