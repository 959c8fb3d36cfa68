//! Cart Handlers

pub(crate) mod delete;
pub(crate) mod get;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::domain::carts::{
    CartMutation,
    models::{Cart, CartLineItem},
};

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// Line key: the product id, suffixed with `_{size}` for sized lines
    pub key: String,

    pub product_id: String,

    pub name: String,

    pub color_name: Option<String>,

    pub image: String,

    /// Unit price at the time the line was added
    pub unit_price: u64,

    pub quantity: u32,

    pub size: Option<String>,

    /// `unit_price * quantity`
    pub line_total: u64,
}

impl From<CartLineItem> for CartLineResponse {
    fn from(line: CartLineItem) -> Self {
        Self {
            line_total: line.line_total(),
            key: line.key.into_string(),
            product_id: line.product.id.into_string(),
            name: line.product.name,
            color_name: line.product.color_name,
            image: line.product.image,
            unit_price: line.product.price,
            quantity: line.quantity,
            size: line.size,
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Lines in the order they were first added
    pub items: Vec<CartLineResponse>,

    /// Sum of quantities
    pub count: u64,

    /// Sum of line totals
    pub total: u64,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            count: cart.count(),
            total: cart.total(),
            items: cart.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Cart Mutation Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartMutationResponse {
    pub cart: CartResponse,

    /// Shopper-facing message for the change, if the change warrants one
    pub notice: Option<String>,
}

impl From<CartMutation> for CartMutationResponse {
    fn from(mutation: CartMutation) -> Self {
        Self {
            cart: mutation.cart.into(),
            notice: mutation.event.map(|event| event.to_string()),
        }
    }
}
