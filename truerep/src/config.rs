//! Runtime configuration, parsed from CLI flags with environment fallbacks.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

/// Default port the web server listens on.
pub const DEFAULT_PORT: u16 = 8000;

/// URL prefix static assets are mounted under.
pub const STATIC_PREFIX: &str = "/static";

/// Configuration for the `serve` command.
#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    /// Address to bind
    #[arg(long, env = "TRUEREP_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "TRUEREP_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory served under /static
    #[arg(long, env = "TRUEREP_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Directory holding index.html
    #[arg(long, env = "TRUEREP_TEMPLATES_DIR", default_value = "templates")]
    pub templates_dir: PathBuf,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

impl ServeConfig {
    /// Socket address the server binds to.
    pub const fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Base URL used when a request carries no Host header.
    pub fn fallback_base_url(&self) -> String {
        format!("http://{}", self.addr())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// Newline-delimited JSON records
    Json,
}
