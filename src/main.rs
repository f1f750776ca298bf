//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here; the cart is rehydrated before the first prompt.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tg_shop::adapters::catalog::FakeStoreCatalog;
use tg_shop::adapters::persistence::local_store::LocalStore;
use tg_shop::adapters::telegram::TelegramNotifier;
use tg_shop::adapters::ui::tui::TuiInputPort;
use tg_shop::ports::{CatalogPort, InputPort, NotifierPort, StoragePort};
use tg_shop::shared::config::AppConfig;
use tg_shop::usecases::{CartService, CatalogService, CheckoutService};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    tg_shop::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_default();

    let data_path = PathBuf::from(cfg.data_dir_or_default());
    tokio::fs::create_dir_all(&data_path)
        .await
        .map_err(|e| anyhow::anyhow!("create data dir: {}", e))?;
    info!(path = %data_path.display(), "data directory");

    // --- Durable storage: load slots, then rehydrate the cart before first render ---
    let store = LocalStore::new(data_path.join("store.json"));
    store.load().await.map_err(|e| anyhow::anyhow!("{}", e))?;
    let storage: Arc<dyn StoragePort> = Arc::new(store);

    let cart = Arc::new(CartService::new(Arc::clone(&storage)));
    cart.load().await.map_err(|e| anyhow::anyhow!("{}", e))?;

    // --- Catalog ---
    let catalog_port: Arc<dyn CatalogPort> =
        Arc::new(FakeStoreCatalog::new(cfg.catalog_url_or_default()));
    let catalog = Arc::new(CatalogService::new(
        catalog_port,
        cfg.catalog_limit_or_default(),
    ));

    // --- Checkout notification sink (optional; checkout refuses without it) ---
    let notifier: Option<Arc<dyn NotifierPort>> = if cfg.is_telegram_configured() {
        info!("Telegram checkout notifications enabled (TG_SHOP_BOT_TOKEN, TG_SHOP_CHAT_ID)");
        Some(Arc::new(TelegramNotifier::new(
            cfg.bot_token().unwrap_or_default(),
            cfg.chat_id().unwrap_or_default(),
        )))
    } else {
        warn!("TG_SHOP_BOT_TOKEN / TG_SHOP_CHAT_ID not set, checkout will ask for them");
        None
    };

    let checkout = Arc::new(CheckoutService::new(
        Arc::clone(&cart),
        notifier,
        cfg.shipping_or_default(),
        cfg.tax_rate_or_default(),
    ));

    // --- Run (main menu -> browse / cart / checkout) ---
    let input: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(catalog, cart, checkout));
    input.run().await.map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
