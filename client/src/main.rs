use std::io;
use std::process::ExitCode;

use clap::Parser;
use item_client::harness::DEFAULT_BASE_URL;
use item_client::{Harness, ItemClient, UreqTransport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "item-harness")]
#[command(about = "Runs the demo request sequence against an item service", long_about = None)]
struct Cli {
    /// Base URL of the service
    #[arg(default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let harness = Harness::new(ItemClient::new(&cli.base_url), UreqTransport::new());

    let mut stdout = io::stdout().lock();
    match harness.run(&mut stdout) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::debug!(error = %err, "harness aborted");
            err.report(&mut stdout)?;
            Ok(ExitCode::FAILURE)
        }
    }
}
