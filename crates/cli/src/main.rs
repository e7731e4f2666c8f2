//! Corner Shop CLI - Cart inspection and maintenance tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the stored cart
//! shop-cli --store data/shop.json cart show
//!
//! # Add a product (or one more unit of it)
//! shop-cli cart add mug "Ceramic Mug" 500
//!
//! # Change quantities
//! shop-cli cart set mug 3
//! shop-cli cart inc mug
//! shop-cli cart dec mug
//!
//! # Remove a line or empty the cart
//! shop-cli cart remove mug
//! shop-cli cart clear
//! ```
//!
//! # Environment Variables
//!
//! - `SHOP_STORE_PATH` - JSON store file, used when `--store` is not given

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::cart::{self, CartCommandError};

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Corner Shop CLI tools")]
struct Cli {
    /// JSON store file shared with the storefront
    #[arg(long, global = true, env = "SHOP_STORE_PATH")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or change the stored cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart
    Show,
    /// Add a product, or one more unit of it
    Add {
        /// Product ID
        id: String,
        /// Display name
        name: String,
        /// Unit price
        price: String,
    },
    /// Set a line's quantity
    Set {
        /// Product ID
        id: String,
        /// New quantity (non-digits are ignored; invalid input means 1)
        qty: String,
    },
    /// Add one unit to a line
    Inc {
        /// Product ID
        id: String,
    },
    /// Remove one unit from a line
    Dec {
        /// Product ID
        id: String,
    },
    /// Remove a line
    Remove {
        /// Product ID
        id: String,
    },
    /// Empty the cart
    Clear,
}

fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "corner_shop_cli=info,corner_shop_storefront=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CartCommandError> {
    let Commands::Cart { action } = cli.command;
    let repo = cart::open(cli.store)?;

    let updated = match action {
        CartAction::Show => repo.load(),
        CartAction::Add { id, name, price } => cart::add(&repo, &id, &name, &price)?,
        CartAction::Set { id, qty } => cart::set(&repo, &id, &qty)?,
        CartAction::Inc { id } => cart::increment(&repo, &id)?,
        CartAction::Dec { id } => cart::decrement(&repo, &id)?,
        CartAction::Remove { id } => cart::remove(&repo, &id)?,
        CartAction::Clear => cart::clear(&repo)?,
    };

    #[allow(clippy::print_stdout)]
    {
        print!("{}", cart::render(&updated));
    }

    Ok(())
}
