//! Wishlist change notifications.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;
use tokio::sync::broadcast;

use crate::domain::products::records::ProductId;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "product_id", rename_all = "snake_case")]
pub enum WishlistEvent {
    Added(ProductId),
    Removed(ProductId),
}

impl Display for WishlistEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Added(_) => f.write_str("Added to wishlist"),
            Self::Removed(_) => f.write_str("Removed from wishlist"),
        }
    }
}

#[must_use]
pub fn wishlist_event_channel() -> broadcast::Sender<WishlistEvent> {
    broadcast::channel(CHANNEL_CAPACITY).0
}
