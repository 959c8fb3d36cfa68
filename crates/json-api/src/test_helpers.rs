//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use storefront_app::{
    auth::{Identity, MockAuthService, User, UserId},
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            events::cart_event_channel,
            models::{Cart, CartLineItem, line_item_key},
        },
        checkout::MockCheckoutService,
        orders::{
            MockOrdersService,
            data::DEFAULT_ORDER_STATUS,
            records::{
                OrderId, OrderItem, OrderRecord, OrderTotals, PaymentDetails, PaymentMethod,
                ShippingInfo,
            },
        },
        products::{
            MockProductsService,
            records::{ProductId, ProductRecord},
        },
        wishlists::{MockWishlistsService, events::wishlist_event_channel},
    },
};

use crate::{auth, state::State};

pub(crate) const TEST_TOKEN: &str = "st_test";
pub(crate) const TEST_USER_ID: &str = "123";

/// One mock per service. Any call without a matching expectation fails the
/// test.
pub(crate) struct Mocks {
    pub(crate) products: MockProductsService,
    pub(crate) carts: MockCartsService,
    pub(crate) wishlists: MockWishlistsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) checkout: MockCheckoutService,
    pub(crate) auth: MockAuthService,
}

impl Mocks {
    pub(crate) fn new() -> Self {
        Self {
            products: MockProductsService::new(),
            carts: MockCartsService::new(),
            wishlists: MockWishlistsService::new(),
            orders: MockOrdersService::new(),
            checkout: MockCheckoutService::new(),
            auth: MockAuthService::new(),
        }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            wishlists: Arc::new(self.wishlists),
            orders: Arc::new(self.orders),
            checkout: Arc::new(self.checkout),
            auth: Arc::new(self.auth),
            cart_events: cart_event_channel(),
            wishlist_events: wishlist_event_channel(),
        })
    }

    /// Serve `route` behind the state and the auth middleware.
    pub(crate) fn service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(auth::middleware::handler)
                .push(route),
        )
    }
}

pub(crate) fn test_user() -> User {
    User {
        id: UserId::new(TEST_USER_ID),
        name: "Test User".to_string(),
        email: "user@example.com".to_string(),
    }
}

/// Accept [`TEST_TOKEN`] as the session of [`test_user`].
pub(crate) fn expect_session(auth: &mut MockAuthService) {
    auth.expect_authenticate_bearer()
        .withf(|token| token == TEST_TOKEN)
        .returning(|_| Ok(test_user()));
}

pub(crate) fn bearer() -> String {
    format!("Bearer {TEST_TOKEN}")
}

pub(crate) fn make_product(id: &str, price: u64, sizes: &[&str]) -> ProductRecord {
    ProductRecord {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        color_name: None,
        price,
        sizes: sizes.iter().map(ToString::to_string).collect(),
        inventory: 10,
        image: format!("/images/{id}.jpg"),
        description: String::new(),
        category: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_line(product: ProductRecord, quantity: u32, size: Option<&str>) -> CartLineItem {
    CartLineItem {
        key: line_item_key(&product.id, size),
        product,
        quantity,
        size: size.map(ToString::to_string),
    }
}

pub(crate) fn make_cart(items: Vec<CartLineItem>) -> Cart {
    Cart {
        identity: Identity::Guest,
        items,
    }
}

/// A cash-on-delivery order of two units at 500 plus a delivery charge of 80.
pub(crate) fn make_order(id: &str) -> OrderRecord {
    OrderRecord {
        order_id: OrderId::new(id),
        user_id: Some(UserId::new(TEST_USER_ID)),
        totals: OrderTotals::with_delivery(1000, 80),
        order_status: DEFAULT_ORDER_STATUS.to_string(),
        order_items: vec![OrderItem {
            product_id: ProductId::new("p1"),
            name: "Product p1".to_string(),
            variant_name: None,
            unit_price: 500,
            quantity: 2,
            total_price: 1000,
            image_url: None,
        }],
        shipping_info: ShippingInfo {
            name: "Rahim".to_string(),
            phone: "01712345678".to_string(),
            email: None,
            address: "House 1".to_string(),
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
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
