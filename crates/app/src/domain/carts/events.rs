//! Cart change notifications.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;
use tokio::sync::broadcast;

use crate::domain::carts::models::{CartLineItem, LineItemKey};

const CHANNEL_CAPACITY: usize = 256;

/// One observable change to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    ItemAdded {
        key: LineItemKey,
        label: String,
    },
    ItemRemoved {
        key: LineItemKey,
        label: String,
    },
    QuantityIncreased {
        key: LineItemKey,
        label: String,
        previous: u32,
        quantity: u32,
    },
}

impl CartEvent {
    #[must_use]
    pub fn key(&self) -> &LineItemKey {
        match self {
            Self::ItemAdded { key, .. }
            | Self::ItemRemoved { key, .. }
            | Self::QuantityIncreased { key, .. } => key,
        }
    }
}

impl Display for CartEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::ItemAdded { label, .. } => write!(f, "{label} has been added."),
            Self::ItemRemoved { label, .. } => write!(f, "{label} has been removed."),
            Self::QuantityIncreased { .. } => f.write_str("Cart updated"),
        }
    }
}

/// A sender for cart events. Stores publish into it; subscribers are optional.
#[must_use]
pub fn cart_event_channel() -> broadcast::Sender<CartEvent> {
    broadcast::channel(CHANNEL_CAPACITY).0
}

/// Compare two snapshots of a cart and report the change between them.
///
/// A longer cart reports the first line that is new, a shorter one the first
/// line that went missing. Otherwise the first line whose quantity differs is
/// reported, and only if it grew.
#[must_use]
pub fn detect_change(previous: &[CartLineItem], next: &[CartLineItem]) -> Option<CartEvent> {
    if next.len() > previous.len() {
        return next
            .iter()
            .find(|item| find_line(previous, &item.key).is_none())
            .map(|item| CartEvent::ItemAdded {
                key: item.key.clone(),
                label: item.label(),
            });
    }

    if next.len() < previous.len() {
        return previous
            .iter()
            .find(|item| find_line(next, &item.key).is_none())
            .map(|item| CartEvent::ItemRemoved {
                key: item.key.clone(),
                label: item.label(),
            });
    }

    let (item, before) = next.iter().find_map(|item| {
        find_line(previous, &item.key)
            .filter(|before| before.quantity != item.quantity)
            .map(|before| (item, before))
    })?;

    (item.quantity > before.quantity).then(|| CartEvent::QuantityIncreased {
        key: item.key.clone(),
        label: item.label(),
        previous: before.quantity,
        quantity: item.quantity,
    })
}

fn find_line<'a>(items: &'a [CartLineItem], key: &LineItemKey) -> Option<&'a CartLineItem> {
    items.iter().find(|item| &item.key == key)
}
