//! Order Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{auth::UserId, domain::products::records::ProductId, ids::TypedId};

/// Order ID
pub type OrderId = TypedId<OrderRecord>;

/// A purchased line, priced at the time of the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_name: Option<String>,
    pub unit_price: u64,
    pub quantity: u32,
    pub total_price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

fn standard_delivery() -> String {
    "Standard".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub address: String,
    pub city: String,
    pub zip: String,
    #[serde(default = "standard_delivery")]
    pub delivery_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courier_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash on delivery
    Cod,
    Online,
}

impl PaymentMethod {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cod" => Some(Self::Cod),
            "online" => Some(Self::Online),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cod => "cod",
            Self::Online => "online",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Cod => "Cash on Delivery",
            Self::Online => "Online Payment",
        }
    }

    /// Payment status a fresh order starts in.
    #[must_use]
    pub fn initial_status(self) -> &'static str {
        match self {
            Self::Cod => "unpaid",
            Self::Online => "pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub payment_method: PaymentMethod,
    pub payment_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

/// Money fields of an order, in whole currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: u64,
    pub discount_amount: u64,
    pub delivery_charge: u64,
    pub tax_amount: u64,
    pub grand_total: u64,
}

impl OrderTotals {
    /// Totals for a subtotal and delivery charge with no discount or tax.
    #[must_use]
    pub fn with_delivery(subtotal: u64, delivery_charge: u64) -> Self {
        Self {
            subtotal,
            discount_amount: 0,
            delivery_charge,
            tax_amount: 0,
            grand_total: subtotal.saturating_add(delivery_charge),
        }
    }

    /// `subtotal + delivery_charge + tax_amount - discount_amount`, if it
    /// neither overflows nor goes negative.
    #[must_use]
    pub fn expected_grand_total(&self) -> Option<u64> {
        self.subtotal
            .checked_add(self.delivery_charge)?
            .checked_add(self.tax_amount)?
            .checked_sub(self.discount_amount)
    }

    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.expected_grand_total() == Some(self.grand_total)
    }
}

/// Order Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub order_id: OrderId,
    pub user_id: Option<UserId>,
    pub totals: OrderTotals,
    pub order_status: String,
    pub order_items: Vec<OrderItem>,
    pub shipping_info: ShippingInfo,
    pub payment_details: PaymentDetails,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
