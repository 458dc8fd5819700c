use std::{io, process::ExitCode};

use trolley::{config::AppConfig, render::write_catalog};

pub(crate) fn run(config: &AppConfig) -> anyhow::Result<ExitCode> {
    let catalog = config.catalog()?;

    write_catalog(io::stdout().lock(), &catalog)?;

    Ok(ExitCode::SUCCESS)
}
