//! Identity-scoped cart state.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::{
    auth::Identity,
    domain::{
        carts::{
            CartsServiceError,
            events::{CartEvent, detect_change},
            models::{self, Cart, CartLineItem, LineItemKey, line_item_key},
        },
        products::records::ProductRecord,
    },
    storage::{PartitionKey, StateStorage, StorageError},
};

/// The cart of the identity it was last loaded for.
///
/// Every mutation writes the whole next snapshot to storage first and only
/// then replaces the in-memory lines, so a failed write leaves the store as
/// it was.
pub struct CartStore {
    storage: Arc<dyn StateStorage>,
    events: broadcast::Sender<CartEvent>,
    identity: Identity,
    items: Vec<CartLineItem>,
    loaded: bool,
}

impl CartStore {
    /// An unloaded store. Call [`CartStore::load`] before mutating it.
    #[must_use]
    pub fn new(storage: Arc<dyn StateStorage>, events: broadcast::Sender<CartEvent>) -> Self {
        Self {
            storage,
            events,
            identity: Identity::Guest,
            items: Vec::new(),
            loaded: false,
        }
    }

    /// Point the store at `identity` and read its persisted cart.
    ///
    /// A snapshot that fails to parse is discarded and the cart starts empty.
    /// Loading never raises cart events.
    ///
    /// # Errors
    ///
    /// Returns [`CartsServiceError::Storage`] when the partition cannot be read.
    pub async fn load(&mut self, identity: Identity) -> Result<(), CartsServiceError> {
        self.loaded = false;
        self.identity = identity;
        self.items.clear();

        let partition = self.partition();

        if let Some(payload) = self.storage.read(&partition).await? {
            match serde_json::from_str::<Vec<CartLineItem>>(&payload) {
                Ok(items) => self.items = items,
                Err(error) => {
                    warn!(%partition, %error, "discarding unreadable cart");

                    if let Err(error) = self.storage.remove(&partition).await {
                        warn!(%partition, %error, "failed to discard unreadable cart");
                    }
                }
            }
        }

        self.loaded = true;

        Ok(())
    }

    /// Re-point the store at another identity. Carts are never merged.
    ///
    /// # Errors
    ///
    /// See [`CartStore::load`].
    pub async fn switch_identity(&mut self, identity: Identity) -> Result<(), CartsServiceError> {
        self.load(identity).await
    }

    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        models::count(&self.items)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        models::total(&self.items)
    }

    #[must_use]
    pub fn cart(&self) -> Cart {
        Cart {
            identity: self.identity.clone(),
            items: self.items.clone(),
        }
    }

    /// Add `quantity` of `product`, merging into an existing line with the
    /// same key. An empty size is treated as no size.
    ///
    /// # Errors
    ///
    /// Returns [`CartsServiceError::InvalidQuantity`] for a zero quantity,
    /// [`CartsServiceError::InvalidSize`] for a size the product is not offered
    /// in, and storage errors from persisting the change.
    pub async fn add_to_cart(
        &mut self,
        product: &ProductRecord,
        quantity: u32,
        size: Option<&str>,
    ) -> Result<Option<CartEvent>, CartsServiceError> {
        self.ensure_loaded()?;

        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let size = size.filter(|size| !size.is_empty());

        if let Some(size) = size
            && !product.offers_size(size)
        {
            return Err(CartsServiceError::InvalidSize(size.to_string()));
        }

        let key = line_item_key(&product.id, size);
        let mut next = self.items.clone();

        match next.iter_mut().find(|item| item.key == key) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CartsServiceError::InvalidQuantity)?;
            }
            None => next.push(CartLineItem {
                key,
                product: product.clone(),
                quantity,
                size: size.map(ToString::to_string),
            }),
        }

        self.commit(next).await
    }

    /// Remove the line stored under `key`. Absent keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns storage errors from persisting the change.
    pub async fn remove_from_cart(
        &mut self,
        key: &LineItemKey,
    ) -> Result<Option<CartEvent>, CartsServiceError> {
        self.ensure_loaded()?;

        let next = self
            .items
            .iter()
            .filter(|item| &item.key != key)
            .cloned()
            .collect();

        self.commit(next).await
    }

    /// Replace the quantity of the line under `key`; zero or less removes it.
    ///
    /// # Errors
    ///
    /// Returns [`CartsServiceError::InvalidQuantity`] for quantities beyond
    /// `u32::MAX` and storage errors from persisting the change.
    pub async fn update_quantity(
        &mut self,
        key: &LineItemKey,
        quantity: i64,
    ) -> Result<Option<CartEvent>, CartsServiceError> {
        if quantity <= 0 {
            return self.remove_from_cart(key).await;
        }

        self.ensure_loaded()?;

        let quantity = u32::try_from(quantity).map_err(|_| CartsServiceError::InvalidQuantity)?;

        let next = self
            .items
            .iter()
            .cloned()
            .map(|mut item| {
                if &item.key == key {
                    item.quantity = quantity;
                }
                item
            })
            .collect();

        self.commit(next).await
    }

    /// Empty the cart of the current identity.
    ///
    /// # Errors
    ///
    /// Returns storage errors from persisting the change.
    pub async fn clear_cart(&mut self) -> Result<Option<CartEvent>, CartsServiceError> {
        self.ensure_loaded()?;

        self.commit(Vec::new()).await
    }

    fn ensure_loaded(&self) -> Result<(), CartsServiceError> {
        if self.loaded {
            Ok(())
        } else {
            Err(CartsServiceError::NotLoaded)
        }
    }

    fn partition(&self) -> PartitionKey {
        PartitionKey::cart(self.identity.clone())
    }

    async fn commit(
        &mut self,
        next: Vec<CartLineItem>,
    ) -> Result<Option<CartEvent>, CartsServiceError> {
        if next == self.items {
            return Ok(None);
        }

        let payload = serde_json::to_string(&next).map_err(StorageError::Serialize)?;

        self.storage.write(&self.partition(), payload).await?;

        let event = detect_change(&self.items, &next);

        self.items = next;

        if let Some(event) = &event
            && self.events.send(event.clone()).is_err()
        {
            debug!(key = %event.key(), "no cart event subscribers");
        }

        Ok(event)
    }
}
