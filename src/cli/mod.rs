use std::{io, process::ExitCode};

use anyhow::Context;
use clap::{Parser, Subcommand};
use trolley::{
    config::AppConfig,
    manager::CartManager,
    notify::WriterNotifier,
    observability,
    presentation::CartObserver,
    storage::FileStore,
};

mod add;
mod checkout;
mod lines;
mod products;
mod show;

/// Cart manager backed by the configured file store, reporting notices on stdout.
type Session<O> = CartManager<FileStore, WriterNotifier<io::Stdout>, O>;

#[derive(Debug, Parser)]
#[command(name = "trolley", about = "Trolley shopping cart", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the products in the catalog
    Products,
    /// Add one unit of a product to the cart
    Add(add::AddArgs),
    /// Add one unit to a cart line
    Increment(lines::LineArgs),
    /// Take one unit off a cart line, removing it at zero
    Decrement(lines::LineArgs),
    /// Change a cart line's quantity by a signed amount
    Quantity(lines::QuantityArgs),
    /// Remove a cart line entirely
    Remove(lines::LineArgs),
    /// Show the cart with its totals
    Show,
    /// Print the number of units in the cart
    Count,
    /// Settle the cart and empty it
    Checkout,
}

impl Cli {
    pub(crate) fn run(self) -> anyhow::Result<ExitCode> {
        observability::init_subscriber(&self.config.logging)
            .context("failed to initialise logging")?;

        let config = self.config;

        match self.command {
            Commands::Products => products::run(&config),
            Commands::Add(args) => add::run(&config, args),
            Commands::Increment(args) => lines::change(&config, args, 1),
            Commands::Decrement(args) => lines::change(&config, args, -1),
            Commands::Quantity(args) => lines::quantity(&config, args),
            Commands::Remove(args) => lines::remove(&config, args),
            Commands::Show => show::run(&config),
            Commands::Count => show::count(&config),
            Commands::Checkout => checkout::run(&config),
        }
    }
}

/// Rehydrate the persisted cart for this invocation.
fn open<O: CartObserver>(config: &AppConfig, observer: O) -> anyhow::Result<Session<O>> {
    let currency = config.currency()?;

    Ok(CartManager::initialize(
        config.store.file_store(),
        WriterNotifier::new(io::stdout()),
        observer,
        currency,
    ))
}
