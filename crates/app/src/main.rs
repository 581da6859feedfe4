//! KOTSELL storefront CLI entry point.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kotsell_app::{cli::Cli, context::AppContext};

#[tokio::main]
pub async fn main() {
    // Load .env if present (ignore if missing).
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.config().log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let ctx = match AppContext::from_config(cli.config()) {
        Ok(ctx) => ctx,
        Err(error) => {
            eprintln!("{error}");
            process::exit(1);
        }
    };

    if let Err(error) = cli.run(&ctx).await {
        eprintln!("{error}");
        process::exit(1);
    }
}
