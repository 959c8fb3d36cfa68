//! Product Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::ids::TypedId;

/// Product ID
pub type ProductId = TypedId<ProductRecord>;

/// Product Record
///
/// Catalog entries are read-only from the storefront's side. Carts keep a
/// copy of the record taken when the line was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub color_name: Option<String>,
    pub price: u64,
    pub sizes: Vec<String>,
    pub inventory: u32,
    pub image: String,
    pub description: String,
    pub category: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Whether `size` is one of the sizes this product is offered in.
    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|offered| offered == size)
    }
}
