//! Server configuration module

use clap::Parser;

use storefront_app::context::AppSettings;

use crate::config::{
    auth::AuthConfig,
    checkout::CheckoutConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, RequestLoggingConfig},
    server::ServerRuntimeConfig,
    telegram::TelegramSettings,
};

pub(crate) mod auth;
pub(crate) mod checkout;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod telegram;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request logging settings.
    #[command(flatten)]
    pub requests: RequestLoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Checkout pricing settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,

    /// Merchant notification settings.
    #[command(flatten)]
    pub telegram: TelegramSettings,

    /// Identity provider settings.
    #[command(flatten)]
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for wiring the application services.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            checkout: self.checkout.settings(),
            telegram: self.telegram.config(),
            seed_demo_account: self.auth.seed_demo_account,
        }
    }
}
