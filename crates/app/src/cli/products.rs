//! Catalog commands.

use clap::{Args, Subcommand};
use jiff::Timestamp;
use kotsell::{money::display_php, products::{Product, ProductId}};
use tabled::{Table, Tabled};

use crate::context::AppContext;

use super::render_error;

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List the catalog.
    List {
        /// Bypass the cache and refetch.
        #[arg(long)]
        fresh: bool,
    },

    /// Show one product in full.
    Show {
        /// Product id.
        id: ProductId,
    },

    /// List the category labels.
    Categories,
}

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: String,
    #[tabled(rename = "Categories")]
    categories: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: display_php(product.price),
            stock: if product.is_in_stock() {
                product.stock.to_string()
            } else {
                "out of stock".to_owned()
            },
            categories: product.categories.join(", "),
        }
    }
}

pub(crate) async fn run(command: ProductsCommand, ctx: &AppContext) -> Result<(), String> {
    match command.command {
        ProductsSubcommand::List { fresh } => {
            let now = Timestamp::now();
            let products = if fresh {
                ctx.products.refresh(now).await
            } else {
                ctx.products.list(now).await
            }
            .map_err(|error| render_error(&error))?;

            if products.is_empty() {
                println!("No products available.");
                return Ok(());
            }

            let rows: Vec<ProductRow> = products.iter().map(ProductRow::from).collect();
            println!("{}", Table::new(rows));

            Ok(())
        }
        ProductsSubcommand::Show { id } => {
            let product = ctx
                .products
                .get(id)
                .await
                .map_err(|error| render_error(&error))?;

            println!("{} (#{})", product.name, product.id);
            println!("Price: {}", display_php(product.price));
            println!(
                "Stock: {}",
                if product.is_in_stock() {
                    product.stock.to_string()
                } else {
                    "out of stock".to_owned()
                }
            );

            if !product.categories.is_empty() {
                println!("Categories: {}", product.categories.join(", "));
            }

            if !product.description.is_empty() {
                println!();
                println!("{}", product.description);
            }

            if !product.images.is_empty() {
                println!();
                for image in &product.images {
                    println!("image: {image}");
                }
            }

            Ok(())
        }
        ProductsSubcommand::Categories => {
            let categories = ctx
                .categories
                .list()
                .await
                .map_err(|error| render_error(&error))?;

            if categories.is_empty() {
                println!("No categories defined.");
                return Ok(());
            }

            for category in categories {
                println!("{}  {}", category.id, category.name);
            }

            Ok(())
        }
    }
}
