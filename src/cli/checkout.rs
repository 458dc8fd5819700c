use std::{io, process::ExitCode};

use trolley::{cart::CartError, config::AppConfig, presentation::NoopObserver};

pub(crate) fn run(config: &AppConfig) -> anyhow::Result<ExitCode> {
    let mut session = super::open(config, NoopObserver)?;

    match session.checkout() {
        Ok(receipt) => {
            receipt.write_to(io::stdout().lock())?;

            Ok(ExitCode::SUCCESS)
        }
        // Already reported through the notifier.
        Err(CartError::EmptyCart) => Ok(ExitCode::FAILURE),
        Err(error) => Err(error.into()),
    }
}
