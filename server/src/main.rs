use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use item_server::config::DEFAULT_PORT;
use item_server::{Mode, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "item-server")]
#[command(about = "In-memory item store over HTTP", long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, env = "ITEM_SERVER_ADDR", default_value = "127.0.0.1")]
    addr: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Route set to expose
    #[arg(long, env = "ITEM_SERVER_MODE", value_enum, default_value_t = Mode::Full)]
    mode: Mode,

    /// Start with the demo items (apple, banana, milk)
    #[arg(long, env = "ITEM_SERVER_SEED")]
    seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let cli = Cli::parse();
    let config = ServerConfig {
        addr: SocketAddr::new(cli.addr, cli.port),
        mode: cli.mode,
        seed: cli.seed,
    };

    item_server::serve(config).await?;
    Ok(())
}
