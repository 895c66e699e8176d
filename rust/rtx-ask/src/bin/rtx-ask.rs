use std::io;

use anyhow::Result;
use clap::Parser;
use rtx_ask::{AskCli, run};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn main() -> Result<()> {
    let cli = AskCli::parse();

    let default_directive = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .init();

    let stdout = io::stdout();
    run(cli, &mut stdout.lock())
}
