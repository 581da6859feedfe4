//! Customer account commands.

use clap::{Args, Subcommand};
use kotsell::money::display_php;
use tabled::{Table, Tabled};

use crate::{
    context::AppContext,
    domain::{
        accounts::models::{NewCustomer, ProfileUpdate},
        auth::{errors::AuthError, service::require_customer},
        orders::records::OrderRecord,
    },
};

use super::render_error;

#[derive(Debug, Args)]
pub(crate) struct AccountCommand {
    #[command(subcommand)]
    command: AccountSubcommand,
}

#[derive(Debug, Subcommand)]
enum AccountSubcommand {
    /// Create a customer account.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },

    /// Log in as a customer. The guest cart is merged into the remote cart.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// End the active session.
    Logout,

    /// Show the saved profile.
    Show,

    /// Save profile fields. Blank fields keep their placeholder defaults.
    Save {
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        street: String,
        #[arg(long, default_value = "")]
        barangay: String,
        #[arg(long, default_value = "")]
        city: String,
        #[arg(long, default_value = "")]
        postal_code: String,
    },

    /// List this customer's orders.
    Orders,
}

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "Order")]
    id: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Placed")]
    placed: String,
}

impl From<&OrderRecord> for OrderRow {
    fn from(record: &OrderRecord) -> Self {
        Self {
            id: record
                .order_id()
                .map_or_else(|| "-".to_owned(), |id| id.to_string()),
            total: display_php(record.total()),
            status: record.status().to_owned(),
            payment: record.payment_method().unwrap_or("-").to_owned(),
            placed: record
                .created_at()
                .map_or_else(|| "-".to_owned(), |ts| ts.to_string()),
        }
    }
}

pub(crate) async fn run(command: AccountCommand, ctx: &AppContext) -> Result<(), String> {
    match command.command {
        AccountSubcommand::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            ctx.accounts
                .register(NewCustomer {
                    username,
                    email,
                    password,
                    confirm_password,
                })
                .await
                .map_err(|error| render_error(&error))?;

            println!("Account created successfully. You can now login.");

            Ok(())
        }
        AccountSubcommand::Login { email, password } => {
            let account = ctx
                .auth
                .login_customer(&email, &password)
                .await
                .map_err(|error| render_error(&error))?;

            // The session now points at the remote cart; push whatever was
            // collected as a guest onto it.
            let carts = ctx.resolve_cart_store();
            let cart = carts.adopt_guest_cart().await;

            println!("Welcome, {}!", account.display_name());

            if !cart.is_empty() {
                println!(
                    "Your cart has {} item(s) totalling {}.",
                    cart.len(),
                    display_php(cart.subtotal())
                );
            }

            Ok(())
        }
        AccountSubcommand::Logout => {
            ctx.auth.logout();
            println!("Logged out.");

            Ok(())
        }
        AccountSubcommand::Show => {
            require_customer(&ctx.session).map_err(|error| render_error(&error))?;

            let id = ctx
                .session
                .customer_id()
                .ok_or_else(|| render_error(&AuthError::CustomerRequired))?;

            let account = ctx
                .accounts
                .load_customer(id)
                .await
                .map_err(|error| render_error(&error))?;

            println!("{} <{}>", account.display_name(), account.email);
            println!("Username:    {}", account.username);
            println!("Street:      {}", account.street);
            println!("Barangay:    {}", account.barangay);
            println!("City:        {}", account.city);
            println!("Postal code: {}", account.postal_code);

            Ok(())
        }
        AccountSubcommand::Save {
            first_name,
            last_name,
            street,
            barangay,
            city,
            postal_code,
        } => {
            require_customer(&ctx.session).map_err(|error| render_error(&error))?;

            let id = ctx
                .session
                .customer_id()
                .ok_or_else(|| render_error(&AuthError::CustomerRequired))?;

            let account = ctx
                .accounts
                .save_customer(
                    id,
                    ProfileUpdate {
                        first_name,
                        last_name,
                        street,
                        barangay,
                        city,
                        postal_code,
                    },
                )
                .await
                .map_err(|error| render_error(&error))?;

            println!("Profile saved for {}.", account.display_name());

            Ok(())
        }
        AccountSubcommand::Orders => {
            require_customer(&ctx.session).map_err(|error| render_error(&error))?;

            let id = ctx
                .session
                .customer_id()
                .ok_or_else(|| render_error(&AuthError::CustomerRequired))?;

            let orders = ctx
                .orders
                .fetch_for_customer(id)
                .await
                .map_err(|error| render_error(&error))?;

            if orders.is_empty() {
                println!("No orders yet.");
                return Ok(());
            }

            let rows: Vec<OrderRow> = orders.iter().map(OrderRow::from).collect();
            println!("{}", Table::new(rows));

            Ok(())
        }
    }
}
