use std::{io, process::ExitCode};

use clap::Args;
use trolley::{
    config::AppConfig,
    money::parse_amount,
    presentation::{Intent, NoopObserver},
    render::write_badge,
};

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// Catalog key of the product to add
    #[arg(required_unless_present = "name", conflicts_with_all = ["name", "price"])]
    product: Option<String>,

    /// Name of an item that is not in the catalog
    #[arg(long, requires = "price")]
    name: Option<String>,

    /// Unit price of the item, in the cart currency (e.g. 10.00)
    #[arg(long, requires = "name", allow_hyphen_values = true)]
    price: Option<String>,
}

pub(crate) fn run(config: &AppConfig, args: AddArgs) -> anyhow::Result<ExitCode> {
    let intent = match (args.product, args.name, args.price) {
        (Some(key), _, _) => config.catalog()?.get(&key)?.add_intent(),
        (None, Some(name), Some(price)) => Intent::Add {
            name,
            unit_price: parse_amount(&price, config.currency()?)?,
        },
        _ => anyhow::bail!("either a catalog product or --name and --price are required"),
    };

    let mut session = super::open(config, NoopObserver)?;

    session.dispatch(intent)?;

    write_badge(io::stdout().lock(), session.cart())?;

    Ok(ExitCode::SUCCESS)
}
