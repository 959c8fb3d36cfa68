//! Order assembly and submission.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    auth::Identity,
    domain::{
        carts::{
            CartsService,
            models::{Cart, CartLineItem},
        },
        checkout::{
            CheckoutError,
            form::CheckoutDetails,
            notifier::{CustomerDetails, NotifiedItem, OrderNotification, OrderNotifier},
        },
        orders::{
            OrdersService,
            data::{DEFAULT_ORDER_STATUS, NewOrder},
            records::{OrderId, OrderItem, OrderTotals, PaymentDetails, ShippingInfo},
        },
    },
};

pub const DEFAULT_DELIVERY_CHARGE: u64 = 80;
pub const FALLBACK_IMAGE: &str = "/default-product.jpg";
pub const DELIVERY_METHOD: &str = "Standard Courier";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    pub delivery_charge: u64,
    /// Prefix for product images stored as relative references.
    pub image_base_url: Option<String>,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            delivery_charge: DEFAULT_DELIVERY_CHARGE,
            image_base_url: None,
        }
    }
}

/// Whether a checkout has gone through. An empty cart only means "leave the
/// checkout" while the session is still open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckoutSession {
    completed: bool,
}

impl CheckoutSession {
    pub fn complete(&mut self) {
        self.completed = true;
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn should_leave(&self, cart: &Cart) -> bool {
        cart.is_empty() && !self.completed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub grand_total: u64,
}

/// Turns a cart into an order: notify the merchant, store the order, then
/// clear the cart.
///
/// Notification failures are logged and do not stop the order. A failure to
/// store the order leaves the cart as it was. There is no compensation for a
/// merchant notified about an order that was then not stored.
///
/// The last completed session of each identity is kept until its cart is
/// quoted with items again.
#[derive(Clone)]
pub struct CheckoutPipeline {
    carts: Arc<dyn CartsService>,
    orders: Arc<dyn OrdersService>,
    notifier: Arc<dyn OrderNotifier>,
    settings: CheckoutSettings,
    sessions: Arc<RwLock<FxHashMap<Identity, CheckoutSession>>>,
}

impl CheckoutPipeline {
    #[must_use]
    pub fn new(
        carts: Arc<dyn CartsService>,
        orders: Arc<dyn OrdersService>,
        notifier: Arc<dyn OrderNotifier>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            carts,
            orders,
            notifier,
            settings,
            sessions: Arc::new(RwLock::new(FxHashMap::default())),
        }
    }

    /// The recorded session of `identity`, or a fresh one.
    pub async fn session(&self, identity: &Identity) -> CheckoutSession {
        self.sessions
            .read()
            .await
            .get(identity)
            .copied()
            .unwrap_or_default()
    }

    pub(crate) async fn record_session(&self, identity: Identity, session: CheckoutSession) {
        let mut sessions = self.sessions.write().await;

        if session.is_completed() {
            sessions.insert(identity, session);
        } else {
            sessions.remove(&identity);
        }
    }

    pub(crate) fn carts(&self) -> &Arc<dyn CartsService> {
        &self.carts
    }

    #[must_use]
    pub fn totals(&self, cart: &Cart) -> OrderTotals {
        OrderTotals::with_delivery(cart.total(), self.settings.delivery_charge)
    }

    /// Place an order for the cart of `identity`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when there is nothing to order,
    /// [`CheckoutError::Persistence`] when the order could not be stored, and
    /// [`CheckoutError::Cart`] when the cart could not be read.
    #[tracing::instrument(name = "checkout.run", skip_all, fields(identity = ?identity))]
    pub async fn run(
        &self,
        identity: Identity,
        details: CheckoutDetails,
        session: &mut CheckoutSession,
    ) -> Result<PlacedOrder, CheckoutError> {
        let cart = self.carts.get_cart(identity.clone()).await?;

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let order_id = generate_order_id();
        let totals = self.totals(&cart);

        let notification = OrderNotification {
            order_id: order_id.clone(),
            customer: CustomerDetails {
                name: details.name.clone(),
                phone: details.phone.clone(),
                email: details.email.clone(),
                address: details.address.clone(),
                city: details.city.clone(),
                zip: details.zip.clone(),
                payment_method: details.payment_method,
            },
            items: cart
                .items
                .iter()
                .map(|line| self.notified_item(line))
                .collect(),
            total: totals.subtotal,
        };

        if let Err(error) = self.notifier.notify(notification).await {
            warn!(%order_id, %error, "order notification failed");
        }

        let order = NewOrder {
            order_id: order_id.clone(),
            user_id: identity.user_id().cloned(),
            totals,
            order_status: DEFAULT_ORDER_STATUS.to_string(),
            order_items: cart.items.iter().map(|line| self.order_item(line)).collect(),
            shipping_info: ShippingInfo {
                name: details.name,
                phone: details.phone,
                email: details.email,
                address: details.address,
                city: details.city,
                zip: details.zip,
                delivery_method: DELIVERY_METHOD.to_string(),
                courier_name: None,
                tracking_code: None,
            },
            payment_details: PaymentDetails {
                payment_method: details.payment_method,
                payment_status: details.payment_method.initial_status().to_string(),
                transaction_id: None,
            },
            notes: None,
        };

        self.orders
            .create_order(order)
            .await
            .map_err(CheckoutError::Persistence)?;

        if let Err(error) = self.carts.clear_cart(identity).await {
            error!(%order_id, %error, "order stored but the cart could not be cleared");
        }

        session.complete();

        info!(%order_id, grand_total = totals.grand_total, "order placed");

        Ok(PlacedOrder {
            order_id,
            grand_total: totals.grand_total,
        })
    }

    fn notified_item(&self, line: &CartLineItem) -> NotifiedItem {
        NotifiedItem {
            product_id: line.product.id.clone(),
            name: line.product.name.clone(),
            color_name: line.product.color_name.clone(),
            size: line.size.clone(),
            quantity: line.quantity,
            unit_price: line.product.price,
            image_url: self.image_url(&line.product.image),
        }
    }

    fn order_item(&self, line: &CartLineItem) -> OrderItem {
        OrderItem {
            product_id: line.product.id.clone(),
            name: line.product.name.clone(),
            variant_name: variant_name(line),
            unit_price: line.product.price,
            quantity: line.quantity,
            total_price: line.line_total(),
            image_url: Some(self.image_url(&line.product.image)),
        }
    }

    fn image_url(&self, image: &str) -> String {
        resolve_image_url(image, self.settings.image_base_url.as_deref())
    }
}

/// `order_` followed by a time-ordered UUID.
#[must_use]
pub fn generate_order_id() -> OrderId {
    OrderId::new(format!("order_{}", Uuid::now_v7().simple()))
}

/// Absolute URLs are kept, relative references are joined onto `base_url`
/// when one is set, and empty references fall back to [`FALLBACK_IMAGE`].
#[must_use]
pub fn resolve_image_url(image: &str, base_url: Option<&str>) -> String {
    let image = image.trim();

    if image.is_empty() {
        return FALLBACK_IMAGE.to_string();
    }

    if image.starts_with("https://") || image.starts_with("http://") {
        return image.to_string();
    }

    match base_url {
        Some(base) => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            image.trim_start_matches('/')
        ),
        None => image.to_string(),
    }
}

/// Size and color joined with `" / "`, skipping whichever is missing.
#[must_use]
pub fn variant_name(line: &CartLineItem) -> Option<String> {
    let parts: Vec<&str> = [line.size.as_deref(), line.product.color_name.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();

    (!parts.is_empty()).then(|| parts.join(" / "))
}
