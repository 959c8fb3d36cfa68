//! Checkout Config

use clap::Args;

use storefront_app::domain::checkout::pipeline::{CheckoutSettings, DEFAULT_DELIVERY_CHARGE};

/// Checkout pricing settings.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// Flat delivery charge added to every order
    #[arg(long, env = "DELIVERY_CHARGE", default_value_t = DEFAULT_DELIVERY_CHARGE)]
    pub delivery_charge: u64,

    /// Base URL prepended to relative product image references
    #[arg(long, env = "IMAGE_BASE_URL")]
    pub image_base_url: Option<String>,
}

impl CheckoutConfig {
    #[must_use]
    pub fn settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            delivery_charge: self.delivery_charge,
            image_base_url: self.image_base_url.clone(),
        }
    }
}
