//! Mensa CLI - canteen management tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the menu from a YAML file into a running server
//! mensa-cli seed demos/menu.yaml
//!
//! # List the current menu
//! mensa-cli menu
//!
//! # Show today's sales report
//! mensa-cli report
//! ```
//!
//! All commands talk to a running server over HTTP; the target defaults
//! to `http://127.0.0.1:3000` and can be overridden with `--server` or
//! the `MENSA_SERVER_URL` environment variable.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mensa-cli")]
#[command(author, version, about = "Mensa CLI tools")]
struct Cli {
    /// Base URL of the mensa server
    #[arg(long, global = true, env = "MENSA_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the menu from a YAML file
    Seed {
        /// Path to the YAML menu file
        file: String,
    },
    /// List the current menu
    Menu {
        /// Restrict to one category (Breakfast, Lunch, Drinks, Snacks)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show the daily sales report
    Report,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { file } => commands::seed::menu_from_file(&cli.server, &file).await?,
        Commands::Menu { category } => commands::menu::list(&cli.server, category.as_deref()).await?,
        Commands::Report => commands::report::daily(&cli.server).await?,
    }
    Ok(())
}
