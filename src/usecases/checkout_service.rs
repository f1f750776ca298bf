//! Checkout flow: quote totals, compose the order message, notify, clear.
//!
//! - Totals: flat shipping plus proportional tax over the cart subtotal
//! - One outbound notification per order; delivery failure leaves the cart
//!   intact so the user can retry
//! - The notifier is optional wiring: without credentials, checkout refuses
//!   with a configuration error instead of silently dropping the order

use crate::domain::{Customer, DomainError, OrderSummary};
use crate::ports::NotifierPort;
use crate::usecases::CartService;
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

/// Checkout service. Coordinates the cart, totals and the notification sink.
pub struct CheckoutService {
    cart: Arc<CartService>,
    notifier: Option<Arc<dyn NotifierPort>>,
    shipping: Decimal,
    tax_rate: Decimal,
}

impl CheckoutService {
    pub fn new(
        cart: Arc<CartService>,
        notifier: Option<Arc<dyn NotifierPort>>,
        shipping: Decimal,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            cart,
            notifier,
            shipping,
            tax_rate,
        }
    }

    /// Whether an order can actually be delivered (bot credentials wired in).
    pub fn is_configured(&self) -> bool {
        self.notifier.is_some()
    }

    /// Totals over the current cart. Tax is rounded to cents.
    pub async fn quote(&self) -> OrderSummary {
        let items = self.cart.items().await;
        let subtotal = self.cart.total_price().await;
        let tax = (subtotal * self.tax_rate).round_dp(2);
        let total = subtotal + self.shipping + tax;
        OrderSummary {
            items,
            subtotal,
            shipping: self.shipping,
            tax,
            total,
        }
    }

    /// Place the order: compose the message, deliver it once, and clear the
    /// cart only after successful delivery. On any error the cart is left
    /// untouched for a retry.
    pub async fn place_order(&self, customer: &Customer) -> Result<OrderSummary, DomainError> {
        let summary = self.quote().await;
        if summary.items.is_empty() {
            return Err(DomainError::Checkout("cart is empty".into()));
        }
        let notifier = self.notifier.as_ref().ok_or_else(|| {
            DomainError::Config(
                "Telegram bot is not configured (set TG_SHOP_BOT_TOKEN and TG_SHOP_CHAT_ID)".into(),
            )
        })?;

        let message = format_order_message(customer, &summary);
        notifier.send_order(&message).await?;
        self.cart.clear().await?;
        info!(
            lines = summary.items.len(),
            total = %summary.total,
            "order delivered, cart cleared"
        );
        Ok(summary)
    }
}

/// HTML order message for Telegram (`parse_mode=HTML`). User block, one block
/// per cart line, then the totals.
fn format_order_message(customer: &Customer, summary: &OrderSummary) -> String {
    let mut msg = String::new();
    msg.push_str("<b>🛒 Checkout Details</b>\n");
    msg.push_str("<b>-----------------------------</b>\n");
    msg.push_str("<b>👤 User Information</b>\n");
    msg.push_str(&format!("<b>Name:</b> {}\n", escape_html(&customer.name)));
    msg.push_str(&format!("<b>Email:</b> {}\n", escape_html(&customer.email)));
    msg.push_str(&format!(
        "<b>Address:</b> {}\n",
        escape_html(&customer.address_line())
    ));
    msg.push_str(&format!("<b>Phone:</b> {}\n", escape_html(&customer.phone)));
    msg.push_str("<b>-----------------------------</b>\n");
    msg.push_str("<b>📦 Order Summary</b>\n");
    for item in &summary.items {
        msg.push_str(&format!("<b>{}</b>\n", escape_html(&item.title)));
        msg.push_str(&format!("<b>Price:</b> ${:.2}\n", item.price));
        msg.push_str(&format!("<b>Quantity:</b> {}\n", item.quantity));
        msg.push_str(&format!("<b>Total:</b> ${:.2}\n", item.line_total()));
    }
    msg.push_str("<b>-----------------------------</b>\n");
    msg.push_str(&format!("<b>Subtotal:</b> ${:.2}\n", summary.subtotal));
    msg.push_str(&format!("<b>Shipping:</b> ${:.2}\n", summary.shipping));
    msg.push_str(&format!("<b>Tax:</b> ${:.2}\n", summary.tax));
    msg.push_str(&format!("<b>Total:</b> ${:.2}\n", summary.total));
    msg.push_str("<b>-----------------------------</b>\n");
    msg.push_str(&format!(
        "<b>🕒 Placed:</b> {}\n",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    ));
    msg.push_str("<b>🎉 Thank you for your purchase!</b>");
    msg
}

/// Minimal escape for text interpolated into an HTML-parse-mode message.
fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
