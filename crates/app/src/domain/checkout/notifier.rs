//! Merchant order notifications.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::{
    checkout::NotificationError,
    orders::records::{OrderId, PaymentMethod},
    products::records::ProductId,
};

pub const CURRENCY: &str = "BDT";
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifiedItem {
    pub product_id: ProductId,
    pub name: String,
    pub color_name: Option<String>,
    pub size: Option<String>,
    pub quantity: u32,
    pub unit_price: u64,
    pub image_url: String,
}

/// What the merchant is told about a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderNotification {
    pub order_id: OrderId,
    pub customer: CustomerDetails,
    pub items: Vec<NotifiedItem>,
    pub total: u64,
}

impl OrderNotification {
    /// Render the notification as Telegram Markdown.
    #[must_use]
    pub fn message(&self) -> String {
        let customer = &self.customer;

        let mut lines = vec![
            "*🎉 New Order Received! 🎉*".to_string(),
            String::new(),
            format!("*Order ID:* `{}`", self.order_id),
            String::new(),
            "*Customer Details:*".to_string(),
            format!("  - *Name:* {}", customer.name),
            format!("  - *Phone:* {}", customer.phone),
            format!(
                "  - *Email:* {}",
                customer.email.as_deref().unwrap_or("N/A")
            ),
            format!(
                "  - *Address:* {}, {}, {}",
                customer.address, customer.city, customer.zip
            ),
            format!("  - *Payment:* {}", customer.payment_method.label()),
            String::new(),
            "*Order Items:*".to_string(),
        ];

        for item in &self.items {
            let mut line = format!("  - *{}*", item.name);

            if let Some(color) = &item.color_name {
                line.push_str(&format!(" ({color})"));
            }

            if let Some(size) = &item.size {
                line.push_str(&format!(" (Size: {size})"));
            }

            lines.push(line);
            lines.push(format!(
                "    _Qty: {} x {} {CURRENCY}_",
                item.quantity,
                format_amount(item.unit_price)
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "*Total Amount:* *{} {CURRENCY}*",
            format_amount(self.total)
        ));

        lines.join("\n")
    }
}

/// `1234567` as `1,234,567`.
#[must_use]
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            formatted.push(',');
        }

        formatted.push(digit);
    }

    formatted
}

#[automock]
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    /// Tell the merchant about an order.
    async fn notify(&self, notification: OrderNotification) -> Result<(), NotificationError>;
}

/// Bot credentials for the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramConfig {
    /// API root, normally [`TELEGRAM_API_BASE`].
    pub api_base: String,
    pub bot_token: String,
    pub chat_id: String,
}

impl Debug for TelegramConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("TelegramConfig")
            .field("api_base", &self.api_base)
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,

    #[serde(default)]
    description: Option<String>,
}

impl TelegramResponse {
    fn into_result(self) -> Result<(), NotificationError> {
        if self.ok {
            Ok(())
        } else {
            Err(NotificationError::Rejected(
                self.description
                    .unwrap_or_else(|| "no description".to_string()),
            ))
        }
    }
}

/// Sends order messages to a Telegram chat, followed by a photo of the first
/// item.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    config: TelegramConfig,
    http: Client,
}

impl TelegramNotifier {
    #[must_use]
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.config.api_base.trim_end_matches('/'),
            self.config.bot_token
        )
    }

    async fn call(&self, method: &str, body: serde_json::Value) -> Result<(), NotificationError> {
        let response: TelegramResponse = self
            .http
            .post(self.method_url(method))
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        response.into_result()
    }
}

#[async_trait]
impl OrderNotifier for TelegramNotifier {
    async fn notify(&self, notification: OrderNotification) -> Result<(), NotificationError> {
        self.call(
            "sendMessage",
            serde_json::json!({
                "chat_id": self.config.chat_id,
                "text": notification.message(),
                "parse_mode": "Markdown",
            }),
        )
        .await?;

        info!(order_id = %notification.order_id, "merchant notified");

        if let Some(item) = notification.items.first() {
            let photo = self
                .call(
                    "sendPhoto",
                    serde_json::json!({
                        "chat_id": self.config.chat_id,
                        "photo": item.image_url,
                        "caption": format!("Primary item: *{}*", item.name),
                        "parse_mode": "Markdown",
                    }),
                )
                .await;

            if let Err(error) = photo {
                warn!(order_id = %notification.order_id, %error, "failed to send item photo");
            }
        }

        Ok(())
    }
}

/// Stand-in used when no bot is configured: the order is only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl OrderNotifier for LogNotifier {
    async fn notify(&self, notification: OrderNotification) -> Result<(), NotificationError> {
        warn!(
            order_id = %notification.order_id,
            total = notification.total,
            items = notification.items.len(),
            "telegram is not configured; order notification only logged"
        );

        Ok(())
    }
}
