//! Order Handlers

pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::records::{
    OrderItem, OrderRecord, PaymentDetails, PaymentMethod, ShippingInfo,
};

/// Order Item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemBody {
    pub product_id: String,

    pub name: String,

    #[serde(default)]
    pub variant_name: Option<String>,

    pub unit_price: u64,

    pub quantity: u32,

    /// `unit_price * quantity`
    pub total_price: u64,

    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<OrderItem> for OrderItemBody {
    fn from(item: OrderItem) -> Self {
        Self {
            product_id: item.product_id.into_string(),
            name: item.name,
            variant_name: item.variant_name,
            unit_price: item.unit_price,
            quantity: item.quantity,
            total_price: item.total_price,
            image_url: item.image_url,
        }
    }
}

impl From<OrderItemBody> for OrderItem {
    fn from(item: OrderItemBody) -> Self {
        Self {
            product_id: item.product_id.into(),
            name: item.name,
            variant_name: item.variant_name,
            unit_price: item.unit_price,
            quantity: item.quantity,
            total_price: item.total_price,
            image_url: item.image_url,
        }
    }
}

fn standard_delivery() -> String {
    "Standard".to_string()
}

/// Shipping Info
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShippingInfoBody {
    pub name: String,

    pub phone: String,

    #[serde(default)]
    pub email: Option<String>,

    pub address: String,

    pub city: String,

    pub zip: String,

    /// Defaults to `Standard`
    #[serde(default = "standard_delivery")]
    pub delivery_method: String,

    #[serde(default)]
    pub courier_name: Option<String>,

    #[serde(default)]
    pub tracking_code: Option<String>,
}

impl From<ShippingInfo> for ShippingInfoBody {
    fn from(shipping: ShippingInfo) -> Self {
        Self {
            name: shipping.name,
            phone: shipping.phone,
            email: shipping.email,
            address: shipping.address,
            city: shipping.city,
            zip: shipping.zip,
            delivery_method: shipping.delivery_method,
            courier_name: shipping.courier_name,
            tracking_code: shipping.tracking_code,
        }
    }
}

impl From<ShippingInfoBody> for ShippingInfo {
    fn from(shipping: ShippingInfoBody) -> Self {
        Self {
            name: shipping.name,
            phone: shipping.phone,
            email: shipping.email,
            address: shipping.address,
            city: shipping.city,
            zip: shipping.zip,
            delivery_method: shipping.delivery_method,
            courier_name: shipping.courier_name,
            tracking_code: shipping.tracking_code,
        }
    }
}

/// Payment Method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum PaymentMethodBody {
    Cod,
    Online,
}

impl From<PaymentMethod> for PaymentMethodBody {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Cod => Self::Cod,
            PaymentMethod::Online => Self::Online,
        }
    }
}

impl From<PaymentMethodBody> for PaymentMethod {
    fn from(method: PaymentMethodBody) -> Self {
        match method {
            PaymentMethodBody::Cod => Self::Cod,
            PaymentMethodBody::Online => Self::Online,
        }
    }
}

/// Payment Details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentDetailsBody {
    pub payment_method: PaymentMethodBody,

    /// `unpaid` for cash on delivery, `pending` for online payment when
    /// omitted
    #[serde(default)]
    pub payment_status: Option<String>,

    #[serde(default)]
    pub transaction_id: Option<String>,
}

impl From<PaymentDetails> for PaymentDetailsBody {
    fn from(payment: PaymentDetails) -> Self {
        Self {
            payment_method: payment.payment_method.into(),
            payment_status: Some(payment.payment_status),
            transaction_id: payment.transaction_id,
        }
    }
}

impl From<PaymentDetailsBody> for PaymentDetails {
    fn from(payment: PaymentDetailsBody) -> Self {
        let payment_method = PaymentMethod::from(payment.payment_method);

        Self {
            payment_status: payment
                .payment_status
                .unwrap_or_else(|| payment_method.initial_status().to_string()),
            payment_method,
            transaction_id: payment.transaction_id,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub order_id: String,

    /// Account that placed the order; absent for guest orders
    pub user_id: Option<String>,

    pub subtotal: u64,

    pub discount_amount: u64,

    pub delivery_charge: u64,

    pub tax_amount: u64,

    pub grand_total: u64,

    pub order_status: String,

    pub order_items: Vec<OrderItemBody>,

    pub shipping_info: ShippingInfoBody,

    pub payment_details: PaymentDetailsBody,

    pub notes: Option<String>,

    /// The date and time the order was stored
    pub created_at: String,

    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            order_id: order.order_id.into_string(),
            user_id: order.user_id.map(|user| user.into_string()),
            subtotal: order.totals.subtotal,
            discount_amount: order.totals.discount_amount,
            delivery_charge: order.totals.delivery_charge,
            tax_amount: order.totals.tax_amount,
            grand_total: order.totals.grand_total,
            order_status: order.order_status,
            order_items: order.order_items.into_iter().map(Into::into).collect(),
            shipping_info: order.shipping_info.into(),
            payment_details: order.payment_details.into(),
            notes: order.notes,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}
