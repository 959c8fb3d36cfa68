//! App Context

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::{
    auth::{AuthService, CredentialTable, InMemoryAuthService},
    database::{self, Db},
    domain::{
        carts::{CartEvent, CartsService, StoredCartsService, events::cart_event_channel},
        checkout::{
            CheckoutService,
            notifier::{LogNotifier, OrderNotifier, TelegramConfig, TelegramNotifier},
            pipeline::{CheckoutPipeline, CheckoutSettings},
        },
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        wishlists::{
            StoredWishlistsService, WishlistEvent, WishlistsService,
            events::wishlist_event_channel,
        },
    },
    storage::{PgStateStorage, StateStorage},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Settings that shape how the services are wired together.
#[derive(Debug, Clone, Default)]
pub struct AppSettings {
    pub checkout: CheckoutSettings,

    /// Merchant notifications are only logged when absent.
    pub telegram: Option<TelegramConfig>,

    pub seed_demo_account: bool,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub wishlists: Arc<dyn WishlistsService>,
    pub orders: Arc<dyn OrdersService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub auth: Arc<dyn AuthService>,
    pub cart_events: broadcast::Sender<CartEvent>,
    pub wishlist_events: broadcast::Sender<WishlistEvent>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str, settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool), settings))
    }

    /// Wire the PostgreSQL-backed services around an existing pool.
    #[must_use]
    pub fn from_db(db: Db, settings: AppSettings) -> Self {
        let storage: Arc<dyn StateStorage> = Arc::new(PgStateStorage::new(db.clone()));
        let products: Arc<dyn ProductsService> = Arc::new(PgProductsService::new(db.clone()));
        let orders: Arc<dyn OrdersService> = Arc::new(PgOrdersService::new(db));

        let cart_events = cart_event_channel();
        let wishlist_events = wishlist_event_channel();

        let carts: Arc<dyn CartsService> = Arc::new(StoredCartsService::new(
            storage.clone(),
            products.clone(),
            cart_events.clone(),
        ));

        let notifier: Arc<dyn OrderNotifier> = match settings.telegram {
            Some(config) => {
                info!(chat_id = %config.chat_id, "order notifications go to telegram");

                Arc::new(TelegramNotifier::new(config))
            }
            None => {
                warn!("telegram is not configured; order notifications will only be logged");

                Arc::new(LogNotifier)
            }
        };

        let credentials = if settings.seed_demo_account {
            CredentialTable::with_demo_account()
        } else {
            CredentialTable::new()
        };

        Self {
            checkout: Arc::new(CheckoutPipeline::new(
                carts.clone(),
                orders.clone(),
                notifier,
                settings.checkout,
            )),
            wishlists: Arc::new(StoredWishlistsService::new(
                storage,
                wishlist_events.clone(),
            )),
            auth: Arc::new(InMemoryAuthService::new(credentials)),
            products,
            carts,
            orders,
            cart_events,
            wishlist_events,
        }
    }
}
