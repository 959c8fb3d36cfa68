//! Cart Models

use serde::{Deserialize, Serialize};

use crate::{
    auth::Identity,
    domain::products::records::{ProductId, ProductRecord},
    ids::TypedId,
};

/// Line item key: `{product_id}_{size}` for sized lines, the bare product id
/// otherwise.
pub type LineItemKey = TypedId<CartLineItem>;

/// Derive the key a product and optional size are stored under.
#[must_use]
pub fn line_item_key(product: &ProductId, size: Option<&str>) -> LineItemKey {
    match size {
        Some(size) => LineItemKey::new(format!("{product}_{size}")),
        None => LineItemKey::new(product.as_str()),
    }
}

/// A product snapshot with the quantity and size it was added in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub key: LineItemKey,
    pub product: ProductRecord,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl CartLineItem {
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.product.price.saturating_mul(u64::from(self.quantity))
    }

    /// Product name with the size appended, as shown to the shopper.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.size {
            Some(size) => format!("{} ({size})", self.product.name),
            None => self.product.name.clone(),
        }
    }
}

/// The cart of one identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    pub identity: Identity,
    pub items: Vec<CartLineItem>,
}

impl Cart {
    /// Sum of quantities over all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        count(&self.items)
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> u64 {
        total(&self.items)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub(crate) fn count(items: &[CartLineItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

pub(crate) fn total(items: &[CartLineItem]) -> u64 {
    items
        .iter()
        .map(CartLineItem::line_total)
        .fold(0, u64::saturating_add)
}

/// Add-to-cart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub product: ProductId,
    pub quantity: u32,
    pub size: Option<String>,
}
