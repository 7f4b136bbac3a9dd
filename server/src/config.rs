use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::ValueEnum;

pub const DEFAULT_PORT: u16 = 8000;

/// Which route set the server exposes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Storing, paginated, searchable API.
    #[default]
    Full,
    /// Stateless echo API.
    Minimal,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub mode: Mode,
    /// Start the full configuration with the demo dataset instead of empty.
    pub seed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT),
            mode: Mode::Full,
            seed: false,
        }
    }
}
