//! Telegram Bot API adapter. Implements NotifierPort via sendMessage.
//!
//! Requires a bot token (from @BotFather) and the target chat id.

use crate::domain::DomainError;
use crate::ports::NotifierPort;
use reqwest::Client;
use std::time::Duration;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Telegram notifier. Sends HTML-formatted messages to one chat.
pub struct TelegramNotifier {
    client: Client,
    base_url: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self::with_base_url(TELEGRAM_API_BASE.to_string(), bot_token, chat_id)
    }

    /// Custom API base, e.g. a local bot-api server.
    pub fn with_base_url(base_url: String, bot_token: String, chat_id: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            bot_token,
            chat_id,
        }
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.base_url, self.bot_token)
    }

    fn payload(&self, text: &str) -> serde_json::Value {
        serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "HTML",
        })
    }
}

#[async_trait::async_trait]
impl NotifierPort for TelegramNotifier {
    async fn send_order(&self, text: &str) -> Result<(), DomainError> {
        let res = self
            .client
            .post(self.send_message_url())
            .timeout(REQUEST_TIMEOUT)
            .json(&self.payload(text))
            .send()
            .await
            .map_err(|e| DomainError::Notify(format!("request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(DomainError::Notify(format!(
                "Telegram API error {}: {}",
                status, text
            )));
        }

        Ok(())
    }
}
