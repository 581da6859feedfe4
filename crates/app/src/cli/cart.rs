//! Cart commands.

use clap::{Args, Subcommand};
use kotsell::{
    cart::Cart,
    money::display_php,
    products::ProductId,
};
use tabled::{Table, Tabled};

use crate::context::AppContext;

use super::render_error;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart.
    Show,

    /// Add a product to the cart.
    Add {
        /// Product id.
        id: ProductId,

        /// How many to add.
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },

    /// Set the quantity for a product already in the cart.
    SetQty {
        /// Product id.
        id: ProductId,

        /// The new quantity (at least 1; use `remove` for zero).
        quantity: u32,
    },

    /// Remove a product from the cart.
    Remove {
        /// Product id.
        id: ProductId,
    },

    /// Empty the cart.
    Clear,
}

#[derive(Tabled)]
struct CartRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Total")]
    total: String,
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    let rows: Vec<CartRow> = cart
        .items()
        .iter()
        .map(|item| CartRow {
            id: item.product_id.to_string(),
            name: item.name.clone(),
            price: display_php(item.price),
            quantity: item.quantity,
            total: display_php(item.line_total()),
        })
        .collect();

    println!("{}", Table::new(rows));
    println!("Subtotal: {}", display_php(cart.subtotal()));
}

pub(crate) async fn run(command: CartCommand, ctx: &AppContext) -> Result<(), String> {
    match command.command {
        CartSubcommand::Show => {
            let cart = ctx.carts.load().await;
            print_cart(&cart);

            Ok(())
        }
        CartSubcommand::Add { id, quantity } => {
            let product = ctx
                .products
                .get(id)
                .await
                .map_err(|error| render_error(&error))?;

            let cart = ctx
                .carts
                .add(&product, quantity)
                .await
                .map_err(|error| render_error(&error))?;

            if quantity == 1 {
                println!("{} has been added to the cart", product.name);
            } else {
                println!("{quantity} {} have been added to the cart", product.name);
            }
            print_cart(&cart);

            Ok(())
        }
        CartSubcommand::SetQty { id, quantity } => {
            let cart = ctx
                .carts
                .update_quantity(id, quantity)
                .await
                .map_err(|error| render_error(&error))?;

            print_cart(&cart);

            Ok(())
        }
        CartSubcommand::Remove { id } => {
            let cart = ctx.carts.remove(id).await;
            print_cart(&cart);

            Ok(())
        }
        CartSubcommand::Clear => {
            ctx.carts.clear().await;
            println!("Cart cleared.");

            Ok(())
        }
    }
}
