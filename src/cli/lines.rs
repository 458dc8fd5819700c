use std::{io, process::ExitCode};

use clap::Args;
use trolley::{
    config::AppConfig,
    presentation::{Intent, LineRef, TableObserver},
};

#[derive(Debug, Args)]
pub(crate) struct LineArgs {
    /// Name of the cart line
    #[arg(required_unless_present = "index", conflicts_with = "index")]
    name: Option<String>,

    /// Position of the cart line as listed by `show`, starting at 1
    #[arg(long)]
    index: Option<usize>,
}

impl LineArgs {
    fn line_ref(self) -> anyhow::Result<LineRef> {
        match (self.name, self.index) {
            (Some(name), _) => Ok(LineRef::Name(name)),
            (None, Some(position)) => position
                .checked_sub(1)
                .map(LineRef::Index)
                .ok_or_else(|| anyhow::anyhow!("line positions start at 1")),
            (None, None) => anyhow::bail!("either a line name or --index is required"),
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct QuantityArgs {
    #[command(flatten)]
    line: LineArgs,

    /// Signed change to apply to the quantity (e.g. 3 or -2)
    #[arg(long, allow_hyphen_values = true)]
    delta: i64,
}

pub(crate) fn quantity(config: &AppConfig, args: QuantityArgs) -> anyhow::Result<ExitCode> {
    change(config, args.line, args.delta)
}

pub(crate) fn change(config: &AppConfig, args: LineArgs, delta: i64) -> anyhow::Result<ExitCode> {
    let line = args.line_ref()?;

    apply(config, Intent::ChangeQuantity { line, delta })
}

pub(crate) fn remove(config: &AppConfig, args: LineArgs) -> anyhow::Result<ExitCode> {
    let line = args.line_ref()?;

    apply(config, Intent::Remove { line })
}

fn apply(config: &AppConfig, intent: Intent) -> anyhow::Result<ExitCode> {
    let mut session = super::open(config, TableObserver::new(io::stdout()))?;

    session.dispatch(intent)?;

    Ok(ExitCode::SUCCESS)
}
