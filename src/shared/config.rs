//! Application configuration. Bot credentials, paths, pricing knobs.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// How many products the listing asks the catalog for by default.
pub const DEFAULT_CATALOG_LIMIT: usize = 5;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Telegram bot token (from @BotFather). Read from TG_SHOP_BOT_TOKEN.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Telegram chat id orders are sent to. Read from TG_SHOP_CHAT_ID.
    #[serde(default)]
    pub chat_id: Option<String>,

    /// Directory for the durable store file. Read from TG_SHOP_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Catalog API base URL. Read from TG_SHOP_CATALOG_URL.
    #[serde(default)]
    pub catalog_url: Option<String>,

    /// Max products to list. Read from TG_SHOP_CATALOG_LIMIT.
    #[serde(default)]
    pub catalog_limit: Option<usize>,

    /// Flat shipping charge, decimal string (e.g. "15.00"). Read from TG_SHOP_SHIPPING.
    #[serde(default)]
    pub shipping: Option<String>,

    /// Tax rate over the subtotal, decimal string (e.g. "0.08"). Read from TG_SHOP_TAX_RATE.
    #[serde(default)]
    pub tax_rate: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("TG_SHOP"));
        if let Ok(path) = std::env::var("TG_SHOP_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the bot token from config or TG_SHOP_BOT_TOKEN env.
    pub fn bot_token(&self) -> Option<String> {
        self.bot_token
            .clone()
            .or_else(|| std::env::var("TG_SHOP_BOT_TOKEN").ok())
    }

    /// Returns the chat id from config or TG_SHOP_CHAT_ID env.
    pub fn chat_id(&self) -> Option<String> {
        self.chat_id
            .clone()
            .or_else(|| std::env::var("TG_SHOP_CHAT_ID").ok())
    }

    /// Returns true if checkout notifications can be delivered.
    pub fn is_telegram_configured(&self) -> bool {
        self.bot_token().is_some() && self.chat_id().is_some()
    }

    /// Returns the data directory. Defaults to "./data".
    pub fn data_dir_or_default(&self) -> String {
        self.data_dir.clone().unwrap_or_else(|| "./data".to_string())
    }

    /// Returns the catalog base URL. Defaults to the Fake Store API.
    pub fn catalog_url_or_default(&self) -> String {
        self.catalog_url
            .clone()
            .unwrap_or_else(|| "https://fakestoreapi.com".to_string())
    }

    /// Returns the product listing limit. Defaults to DEFAULT_CATALOG_LIMIT.
    pub fn catalog_limit_or_default(&self) -> usize {
        self.catalog_limit.unwrap_or(DEFAULT_CATALOG_LIMIT)
    }

    /// Returns the flat shipping charge. Defaults to 15.00 if unset or invalid.
    pub fn shipping_or_default(&self) -> Decimal {
        self.shipping
            .as_deref()
            .and_then(|s| Decimal::from_str(s).ok())
            .unwrap_or_else(|| Decimal::new(1500, 2))
    }

    /// Returns the tax rate. Defaults to 0.08 if unset or invalid.
    pub fn tax_rate_or_default(&self) -> Decimal {
        self.tax_rate
            .as_deref()
            .and_then(|s| Decimal::from_str(s).ok())
            .unwrap_or_else(|| Decimal::new(8, 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.data_dir_or_default(), "./data");
        assert_eq!(cfg.catalog_url_or_default(), "https://fakestoreapi.com");
        assert_eq!(cfg.catalog_limit_or_default(), 5);
        assert_eq!(cfg.shipping_or_default(), Decimal::new(1500, 2));
        assert_eq!(cfg.tax_rate_or_default(), Decimal::new(8, 2));
    }

    #[test]
    fn test_invalid_decimal_falls_back() {
        let cfg = AppConfig {
            shipping: Some("free".to_string()),
            tax_rate: Some("".to_string()),
            ..AppConfig::default()
        };

        assert_eq!(cfg.shipping_or_default(), Decimal::new(1500, 2));
        assert_eq!(cfg.tax_rate_or_default(), Decimal::new(8, 2));
    }
}
