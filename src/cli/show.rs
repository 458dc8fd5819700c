use std::{
    io::{self, Write},
    process::ExitCode,
};

use trolley::{config::AppConfig, presentation::NoopObserver, render::write_cart};

pub(crate) fn run(config: &AppConfig) -> anyhow::Result<ExitCode> {
    let session = super::open(config, NoopObserver)?;

    write_cart(io::stdout().lock(), session.cart())?;

    Ok(ExitCode::SUCCESS)
}

pub(crate) fn count(config: &AppConfig) -> anyhow::Result<ExitCode> {
    let session = super::open(config, NoopObserver)?;

    writeln!(io::stdout().lock(), "{}", session.item_count())?;

    Ok(ExitCode::SUCCESS)
}
