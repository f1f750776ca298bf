//! Implements InputPort. Inquire-based storefront prompts.
//!
//! Main menu -> browse products / review cart / checkout. Esc backs out of
//! any prompt; network calls run behind a spinner.

use crate::domain::{CartItem, Customer, DomainError, OrderSummary, Product};
use crate::ports::InputPort;
use crate::usecases::{CartService, CatalogService, CheckoutService};
use async_trait::async_trait;
use indicatif::ProgressBar;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::validator::{Validation, ValueRequiredValidator};
use inquire::{Confirm, CustomType, InquireError, Select, Text};
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Applies the prompt theme matching the banner colors. Call once at startup.
pub fn apply_theme() {
    let mut cfg = RenderConfig::default_colored();
    cfg.prompt_prefix = Styled::new("»").with_fg(Color::Rgb {
        r: 0x63,
        g: 0x66,
        b: 0xf1,
    });
    cfg.highlighted_option_prefix = Styled::new("›").with_fg(Color::Rgb {
        r: 0x34,
        g: 0xd3,
        b: 0x99,
    });
    inquire::set_global_render_config(cfg);
}

enum MenuChoice {
    Browse,
    Cart,
    Checkout,
    Quit,
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Browse => "Browse products",
            Self::Cart => "Review cart",
            Self::Checkout => "Checkout",
            Self::Quit => "Quit",
        };
        write!(f, "{}", label)
    }
}

enum CartAction {
    Update,
    Remove,
    Clear,
    Back,
}

impl fmt::Display for CartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Update => "Change a quantity",
            Self::Remove => "Remove an item",
            Self::Clear => "Empty the cart",
            Self::Back => "Back",
        };
        write!(f, "{}", label)
    }
}

/// Select option carrying a value behind its display label.
struct Choice<T> {
    label: String,
    value: T,
}

impl<T> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Esc/ctrl-c become None (back out); other prompt failures are Input errors.
fn maybe<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Input(e.to_string())),
    }
}

fn ask_required(prompt: &str) -> Result<Option<String>, DomainError> {
    maybe(
        Text::new(prompt)
            .with_validator(ValueRequiredValidator::default())
            .prompt(),
    )
}

fn network_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn pick_line(items: &[CartItem], prompt: &str) -> Result<Option<u64>, DomainError> {
    let options: Vec<Choice<u64>> = items
        .iter()
        .map(|item| Choice {
            label: format!("{} x{}", item.title, item.quantity),
            value: item.id,
        })
        .collect();
    Ok(maybe(Select::new(prompt, options).prompt())?.map(|choice| choice.value))
}

fn print_product(product: &Product) {
    println!();
    println!("{} (${:.2})", product.title, product.price);
    if let Some(category) = &product.category {
        println!("Category: {}", category);
    }
    if let Some(description) = &product.description {
        println!("{}", description);
    }
    println!();
}

fn print_cart(items: &[CartItem], total: Decimal) {
    println!();
    for item in items {
        println!(
            "  {} x{} @ ${:.2} = ${:.2}",
            item.title,
            item.quantity,
            item.price,
            item.line_total()
        );
    }
    println!("  Subtotal: ${:.2}", total);
    println!();
}

fn print_summary(summary: &OrderSummary) {
    println!();
    println!("Order summary");
    for item in &summary.items {
        println!("  {} x{}  ${:.2}", item.title, item.quantity, item.line_total());
    }
    println!("  Subtotal: ${:.2}", summary.subtotal);
    println!("  Shipping: ${:.2}", summary.shipping);
    println!("  Tax:      ${:.2}", summary.tax);
    println!("  Total:    ${:.2}", summary.total);
    println!();
}

/// TUI adapter. Inquire prompts over the storefront services.
pub struct TuiInputPort {
    catalog: Arc<CatalogService>,
    cart: Arc<CartService>,
    checkout: Arc<CheckoutService>,
}

impl TuiInputPort {
    pub fn new(
        catalog: Arc<CatalogService>,
        cart: Arc<CartService>,
        checkout: Arc<CheckoutService>,
    ) -> Self {
        Self {
            catalog,
            cart,
            checkout,
        }
    }

    async fn browse(&self) -> Result<(), DomainError> {
        let spinner = network_spinner("Loading products...");
        let products = self.catalog.products().await;
        spinner.finish_and_clear();
        let products = match products {
            Ok(products) => products,
            Err(e) => {
                println!("❌ Could not load the catalog: {}", e);
                return Ok(());
            }
        };
        if products.is_empty() {
            println!("The catalog is empty.");
            return Ok(());
        }

        loop {
            let options: Vec<Choice<usize>> = products
                .iter()
                .enumerate()
                .map(|(index, product)| Choice {
                    label: format!("{} (${:.2})", product.title, product.price),
                    value: index,
                })
                .collect();
            let picked = match maybe(Select::new("Pick a product", options).prompt())? {
                Some(choice) => choice.value,
                None => return Ok(()),
            };
            let product = &products[picked];
            print_product(product);

            let quantity = match maybe(
                CustomType::<u32>::new("Quantity:")
                    .with_default(1)
                    .with_validator(|quantity: &u32| {
                        if *quantity >= 1 {
                            Ok(Validation::Valid)
                        } else {
                            Ok(Validation::Invalid("quantity must be at least 1".into()))
                        }
                    })
                    .prompt(),
            )? {
                Some(quantity) => quantity,
                None => continue,
            };

            self.cart.add(product, quantity).await?;
            println!("Added {} x{} to the cart.", product.title, quantity);
        }
    }

    async fn review_cart(&self) -> Result<(), DomainError> {
        loop {
            let items = self.cart.items().await;
            if items.is_empty() {
                println!("Your cart is empty.");
                return Ok(());
            }
            print_cart(&items, self.cart.total_price().await);

            let actions = vec![
                CartAction::Update,
                CartAction::Remove,
                CartAction::Clear,
                CartAction::Back,
            ];
            match maybe(Select::new("Cart", actions).prompt())? {
                Some(CartAction::Update) => {
                    let id = match pick_line(&items, "Which item?")? {
                        Some(id) => id,
                        None => continue,
                    };
                    let quantity = match maybe(
                        CustomType::<u32>::new("New quantity:").with_default(1).prompt(),
                    )? {
                        Some(quantity) => quantity,
                        None => continue,
                    };
                    if let Err(e) = self.cart.update_quantity(id, quantity).await {
                        println!("❌ {}", e);
                    }
                }
                Some(CartAction::Remove) => {
                    if let Some(id) = pick_line(&items, "Remove which item?")? {
                        self.cart.remove(id).await?;
                    }
                }
                Some(CartAction::Clear) => {
                    let confirmed =
                        match maybe(Confirm::new("Empty the whole cart?").with_default(false).prompt())? {
                            Some(confirmed) => confirmed,
                            None => false,
                        };
                    if confirmed {
                        self.cart.clear().await?;
                    }
                }
                Some(CartAction::Back) | None => return Ok(()),
            }
        }
    }

    fn collect_customer(&self) -> Result<Option<Customer>, DomainError> {
        let name = match ask_required("Full name:")? {
            Some(value) => value,
            None => return Ok(None),
        };
        let email = match ask_required("Email address:")? {
            Some(value) => value,
            None => return Ok(None),
        };
        let street = match ask_required("Address:")? {
            Some(value) => value,
            None => return Ok(None),
        };
        let city = match ask_required("City:")? {
            Some(value) => value,
            None => return Ok(None),
        };
        let region = match ask_required("State / Province:")? {
            Some(value) => value,
            None => return Ok(None),
        };
        let postal_code = match ask_required("Postal code:")? {
            Some(value) => value,
            None => return Ok(None),
        };
        let phone = match maybe(Text::new("Phone (optional):").prompt())? {
            Some(value) => value,
            None => return Ok(None),
        };
        Ok(Some(Customer {
            name,
            email,
            phone,
            street,
            city,
            region,
            postal_code,
        }))
    }

    async fn run_checkout(&self) -> Result<(), DomainError> {
        if self.cart.is_empty().await {
            println!("Your cart is empty; add something first.");
            return Ok(());
        }
        if !self.checkout.is_configured() {
            println!("❌ Please configure your Telegram bot first (TG_SHOP_BOT_TOKEN, TG_SHOP_CHAT_ID).");
            return Ok(());
        }

        let customer = match self.collect_customer()? {
            Some(customer) => customer,
            None => return Ok(()),
        };

        print_summary(&self.checkout.quote().await);
        let confirmed = match maybe(Confirm::new("Place the order?").with_default(true).prompt())? {
            Some(confirmed) => confirmed,
            None => false,
        };
        if !confirmed {
            println!("Order not placed.");
            return Ok(());
        }

        let spinner = network_spinner("Sending your order...");
        let result = self.checkout.place_order(&customer).await;
        spinner.finish_and_clear();
        match result {
            Ok(_) => println!("✅ Your order has been saved successfully."),
            // Cart is untouched on failure, the user can retry
            Err(e) => println!("❌ Could not send the order: {}. Check your settings and try again.", e),
        }
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let badge = self.cart.unique_item_count().await;
            let title = format!("Storefront (cart: {} items)", badge);
            let choices = vec![
                MenuChoice::Browse,
                MenuChoice::Cart,
                MenuChoice::Checkout,
                MenuChoice::Quit,
            ];
            let choice = match maybe(Select::new(&title, choices).prompt())? {
                Some(choice) => choice,
                None => MenuChoice::Quit,
            };
            match choice {
                MenuChoice::Browse => self.browse().await?,
                MenuChoice::Cart => self.review_cart().await?,
                MenuChoice::Checkout => self.run_checkout().await?,
                MenuChoice::Quit => return Ok(()),
            }
        }
    }
}
