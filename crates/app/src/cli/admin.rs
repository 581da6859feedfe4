//! Admin console commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use jiff::Timestamp;
use kotsell::{
    money::display_php,
    products::{CategoryId, ProductId},
};
use rust_decimal::Decimal;

use crate::{
    context::AppContext,
    domain::{
        auth::service::require_admin,
        products::models::{NewProduct, ProductUpdate},
    },
};

use super::render_error;

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// Log in as an admin.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Show the dashboard tiles.
    Dashboard,

    /// Create a product.
    AddProduct {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long, default_value_t = 0)]
        stock: u32,
        /// Category names to link (repeatable).
        #[arg(long = "category")]
        categories: Vec<String>,
        /// Image file to upload and link.
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Edit a product. Omitted fields keep their current value.
    EditProduct {
        /// Product id.
        id: ProductId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        stock: Option<u32>,
        /// Category names replacing the current links (repeatable).
        #[arg(long = "category")]
        categories: Vec<String>,
    },

    /// Delete a product.
    DeleteProduct {
        /// Product id.
        id: ProductId,
    },

    /// Unlink an uploaded image from its product.
    RemoveImage {
        /// Image id.
        id: crate::domain::images::models::ImageId,
    },

    /// Show the admin account.
    Account,

    /// Save admin account fields.
    SaveAccount {
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
    },
}

async fn resolve_categories(
    ctx: &AppContext,
    names: &[String],
) -> Result<Vec<CategoryId>, String> {
    let mut ids = Vec::with_capacity(names.len());

    for name in names {
        let category = ctx
            .categories
            .find_by_name(name)
            .await
            .map_err(|error| render_error(&error))?;
        ids.push(category.id);
    }

    Ok(ids)
}

pub(crate) async fn run(command: AdminCommand, ctx: &AppContext) -> Result<(), String> {
    let command = match command.command {
        AdminSubcommand::Login { email, password } => {
            let account = ctx
                .auth
                .login_admin(&email, &password)
                .await
                .map_err(|error| render_error(&error))?;

            println!("Welcome, {}.", account.username);
            return Ok(());
        }
        other => other,
    };

    // Everything below is admin-only, the way the admin routes were gated.
    require_admin(&ctx.session).map_err(|error| render_error(&error))?;

    match command {
        AdminSubcommand::Login { .. } => Ok(()),
        AdminSubcommand::Dashboard => {
            let summary = ctx
                .dashboard()
                .overview(Timestamp::now())
                .await
                .map_err(|error| render_error(&error))?;

            println!("Total Products: {}", summary.total_products);
            println!("Total Orders:   {}", summary.total_orders);
            println!("Revenue:        {}", display_php(summary.revenue));

            Ok(())
        }
        AdminSubcommand::AddProduct {
            name,
            description,
            price,
            stock,
            categories,
            image,
        } => {
            let product = ctx
                .products
                .create(NewProduct {
                    name,
                    description,
                    price,
                    stock,
                })
                .await
                .map_err(|error| render_error(&error))?;

            if !categories.is_empty() {
                let ids = resolve_categories(ctx, &categories).await?;
                ctx.categories
                    .replace_links(product.id, &ids)
                    .await
                    .map_err(|error| render_error(&error))?;
            }

            if let Some(path) = image {
                let bytes = std::fs::read(&path)
                    .map_err(|error| format!("failed to read {}: {error}", path.display()))?;
                let file_name = path
                    .file_name()
                    .map_or_else(|| "image".to_owned(), |name| name.to_string_lossy().into_owned());

                ctx.images
                    .attach(product.id, &file_name, bytes)
                    .await
                    .map_err(|error| render_error(&error))?;
            }

            println!("Created product #{}: {}", product.id, product.name);

            Ok(())
        }
        AdminSubcommand::EditProduct {
            id,
            name,
            description,
            price,
            stock,
            categories,
        } => {
            let current = ctx
                .products
                .get(id)
                .await
                .map_err(|error| render_error(&error))?;

            let updated = ctx
                .products
                .update(
                    id,
                    ProductUpdate {
                        name: name.unwrap_or(current.name),
                        description: description.unwrap_or(current.description),
                        price: price.unwrap_or(current.price),
                        stock: stock.unwrap_or(current.stock),
                    },
                )
                .await
                .map_err(|error| render_error(&error))?;

            if !categories.is_empty() {
                let ids = resolve_categories(ctx, &categories).await?;
                ctx.categories
                    .replace_links(id, &ids)
                    .await
                    .map_err(|error| render_error(&error))?;
            }

            println!(
                "Updated product #{}: {} at {}, stock {}",
                updated.id,
                updated.name,
                display_php(updated.price),
                updated.stock
            );

            Ok(())
        }
        AdminSubcommand::DeleteProduct { id } => {
            ctx.products
                .delete(id)
                .await
                .map_err(|error| render_error(&error))?;

            println!("Deleted product #{id}.");

            Ok(())
        }
        AdminSubcommand::RemoveImage { id } => {
            let image = ctx
                .images
                .resolve(id)
                .await
                .map_err(|error| render_error(&error))?;

            ctx.images
                .detach(id)
                .await
                .map_err(|error| render_error(&error))?;

            println!("Unlinked image #{id} ({}).", image.url);

            Ok(())
        }
        AdminSubcommand::Account => {
            let id = ctx
                .session
                .admin_id()
                .ok_or_else(|| render_error(&crate::domain::auth::errors::AuthError::AdminRequired))?;

            let account = ctx
                .accounts
                .load_admin(id)
                .await
                .map_err(|error| render_error(&error))?;

            println!("{} <{}>", account.username, account.email);
            println!("First name: {}", account.first_name);
            println!("Last name:  {}", account.last_name);

            Ok(())
        }
        AdminSubcommand::SaveAccount {
            first_name,
            last_name,
        } => {
            let id = ctx
                .session
                .admin_id()
                .ok_or_else(|| render_error(&crate::domain::auth::errors::AuthError::AdminRequired))?;

            let account = ctx
                .accounts
                .save_admin(
                    id,
                    crate::domain::accounts::models::ProfileUpdate {
                        first_name,
                        last_name,
                        ..Default::default()
                    },
                )
                .await
                .map_err(|error| render_error(&error))?;

            println!("Account saved for {}.", account.username);

            Ok(())
        }
    }
}
