//! Products Data

use serde::Deserialize;

use crate::domain::products::{ProductsServiceError, records::ProductId};

/// Catalog listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
}

impl ProductFilter {
    #[must_use]
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
        }
    }
}

/// A catalog entry as read from an import file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewProduct {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub color_name: Option<String>,
    pub price: u64,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub inventory: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl NewProduct {
    /// Reject entries the catalog cannot serve.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::MissingRequiredData`] for a blank id or
    /// name and [`ProductsServiceError::InvalidData`] for blank or repeated
    /// sizes.
    pub fn validate(&self) -> Result<(), ProductsServiceError> {
        if self.id.is_blank() || self.name.trim().is_empty() {
            return Err(ProductsServiceError::MissingRequiredData);
        }

        for (index, size) in self.sizes.iter().enumerate() {
            if size.trim().is_empty() || self.sizes[..index].contains(size) {
                return Err(ProductsServiceError::InvalidData);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, sizes: &[&str]) -> NewProduct {
        NewProduct {
            id: ProductId::new(id),
            name: name.to_string(),
            color_name: None,
            price: 100,
            sizes: sizes.iter().map(ToString::to_string).collect(),
            inventory: 1,
            image: String::new(),
            description: String::new(),
            category: None,
        }
    }

    #[test]
    fn blank_ids_are_rejected() {
        let result = product(" ", "Shirt", &[]).validate();

        assert!(matches!(
            result,
            Err(ProductsServiceError::MissingRequiredData)
        ));
    }

    #[test]
    fn repeated_sizes_are_rejected() {
        let result = product("p1", "Shirt", &["M", "L", "M"]).validate();

        assert!(matches!(result, Err(ProductsServiceError::InvalidData)));
    }

    #[test]
    fn import_entries_default_optional_fields() -> Result<(), serde_json::Error> {
        let parsed: NewProduct =
            serde_json::from_str(r#"{"id":"p1","name":"Shirt","price":1200}"#)?;

        assert_eq!(parsed.id, ProductId::new("p1"));
        assert_eq!(parsed.price, 1200);
        assert_eq!(parsed.inventory, 0);
        assert!(parsed.sizes.is_empty());
        assert!(parsed.image.is_empty());
        assert!(parsed.color_name.is_none());
        assert!(parsed.category.is_none());

        Ok(())
    }
}
