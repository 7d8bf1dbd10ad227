//! Server configuration.

use clap::Parser;

/// Command line / environment configuration for the game server
#[derive(Debug, Clone, Parser)]
#[command(name = "marubatsu-server", about = "Realtime marubatsu game server")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 4000)]
    pub port: u16,
}
