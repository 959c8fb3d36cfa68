//! Test Helpers

use jiff::Timestamp;

use crate::domain::{
    orders::{
        data::{DEFAULT_ORDER_STATUS, NewOrder},
        records::{
            OrderId, OrderItem, OrderRecord, OrderTotals, PaymentDetails, PaymentMethod,
            ShippingInfo,
        },
    },
    products::{
        data::NewProduct,
        records::{ProductId, ProductRecord},
    },
};

pub(crate) fn new_product(id: &str, price: u64, sizes: &[&str]) -> NewProduct {
    NewProduct {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        color_name: None,
        price,
        sizes: sizes.iter().map(ToString::to_string).collect(),
        inventory: 10,
        image: format!("/images/{id}.jpg"),
        description: String::new(),
        category: None,
    }
}

pub(crate) fn product(id: &str, price: u64, sizes: &[&str]) -> ProductRecord {
    let product = new_product(id, price, sizes);

    ProductRecord {
        id: product.id,
        name: product.name,
        color_name: product.color_name,
        price: product.price,
        sizes: product.sizes,
        inventory: product.inventory,
        image: product.image,
        description: product.description,
        category: product.category,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A valid cash-on-delivery order for one line of `quantity` units, with the
/// default delivery charge of 80.
pub(crate) fn new_order(order_id: &str, unit_price: u64, quantity: u32) -> NewOrder {
    let total_price = unit_price * u64::from(quantity);

    NewOrder {
        order_id: OrderId::new(order_id),
        user_id: None,
        totals: OrderTotals::with_delivery(total_price, 80),
        order_status: DEFAULT_ORDER_STATUS.to_string(),
        order_items: vec![OrderItem {
            product_id: ProductId::new("p1"),
            name: "Product p1".to_string(),
            variant_name: None,
            unit_price,
            quantity,
            total_price,
            image_url: Some("/images/p1.jpg".to_string()),
        }],
        shipping_info: ShippingInfo {
            name: "Rahim".to_string(),
            phone: "01712345678".to_string(),
            email: None,
            address: "House 1, Road 2".to_string(),
            city: "Dhaka".to_string(),
            zip: "1207".to_string(),
            delivery_method: "Standard".to_string(),
            courier_name: None,
            tracking_code: None,
        },
        payment_details: PaymentDetails {
            payment_method: PaymentMethod::Cod,
            payment_status: PaymentMethod::Cod.initial_status().to_string(),
            transaction_id: None,
        },
        notes: None,
    }
}

/// The record a store would return for `order`.
pub(crate) fn stored_order(order: NewOrder) -> OrderRecord {
    OrderRecord {
        order_id: order.order_id,
        user_id: order.user_id,
        totals: order.totals,
        order_status: order.order_status,
        order_items: order.order_items,
        shipping_info: order.shipping_info,
        payment_details: order.payment_details,
        notes: order.notes,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
