//! Store event logging.

use std::fmt::Display;

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

use storefront_app::context::AppContext;

/// Log every cart and wishlist change published by the stores.
pub(crate) fn spawn_event_log(app: &AppContext) {
    tokio::spawn(log_events("cart", app.cart_events.subscribe()));
    tokio::spawn(log_events("wishlist", app.wishlist_events.subscribe()));
}

async fn log_events<E>(store: &'static str, mut receiver: broadcast::Receiver<E>)
where
    E: Clone + Display + Send + 'static,
{
    loop {
        match receiver.recv().await {
            Ok(event) => info!(store, "{event}"),
            Err(RecvError::Lagged(skipped)) => {
                warn!(store, skipped, "event log lagged, skipped events");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
