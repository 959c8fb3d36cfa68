//! Telegram Config

use clap::Args;

use storefront_app::domain::checkout::notifier::{TELEGRAM_API_BASE, TelegramConfig};

/// Telegram Bot API settings. Notifications are only logged unless both the
/// token and the chat id are set.
#[derive(Debug, Args)]
pub struct TelegramSettings {
    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_bot_token: Option<String>,

    /// Chat that receives order notifications
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,

    /// Telegram Bot API root
    #[arg(long, env = "TELEGRAM_API_BASE", default_value = TELEGRAM_API_BASE)]
    pub telegram_api_base: String,
}

impl TelegramSettings {
    #[must_use]
    pub fn config(&self) -> Option<TelegramConfig> {
        let bot_token = self.telegram_bot_token.as_deref().map(str::trim)?;
        let chat_id = self.telegram_chat_id.as_deref().map(str::trim)?;

        if bot_token.is_empty() || chat_id.is_empty() {
            return None;
        }

        Some(TelegramConfig {
            api_base: self.telegram_api_base.clone(),
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
        })
    }
}
