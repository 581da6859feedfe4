//! Command-line shell.
//!
//! The route map of the storefront, one subcommand per screen: catalog,
//! cart, checkout, customer account and the admin console. Admin commands
//! are gated through the same session flags the admin routes were.

use clap::{Parser, Subcommand};

use crate::{config::AppConfig, context::AppContext};

mod account;
mod admin;
mod cart;
mod checkout;
mod products;

#[derive(Debug, Parser)]
#[command(name = "kotsell", about = "KOTSELL auto-parts storefront", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the product catalog.
    Products(products::ProductsCommand),

    /// Inspect and edit the shopping cart.
    Cart(cart::CartCommand),

    /// Place an order for the current cart.
    Checkout(checkout::CheckoutArgs),

    /// Customer account: register, login, profile, order history.
    Account(account::AccountCommand),

    /// Admin console: dashboard and product management.
    Admin(admin::AdminCommand),
}

impl Cli {
    /// The parsed configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Dispatches the subcommand.
    ///
    /// # Errors
    ///
    /// Returns a rendered error message for the terminal.
    pub async fn run(self, ctx: &AppContext) -> Result<(), String> {
        match self.command {
            Commands::Products(command) => products::run(command, ctx).await,
            Commands::Cart(command) => cart::run(command, ctx).await,
            Commands::Checkout(args) => checkout::run(args, ctx).await,
            Commands::Account(command) => account::run(command, ctx).await,
            Commands::Admin(command) => admin::run(command, ctx).await,
        }
    }
}

/// Renders an error with its source chain, outermost first.
pub(crate) fn render_error(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}
