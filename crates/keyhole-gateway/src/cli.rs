use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "KEYHOLE_GATEWAY_LISTEN_ADDR";
pub const DOMAIN_PREFIX_ENV: &str = "KEYHOLE_DOMAIN_PREFIX";
pub const STORAGE_BACKEND_ENV: &str = "KEYHOLE_STORAGE_BACKEND";
pub const REDIS_URL_ENV: &str = "KEYHOLE_REDIS_URL";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DOMAIN_PREFIX: &str = "http://127.0.0.1:8080/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "redis")]
    Redis,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "keyhole-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Prefix concatenated with every generated display code; include the
    /// trailing slash.
    #[arg(long, env = DOMAIN_PREFIX_ENV, default_value = DEFAULT_DOMAIN_PREFIX)]
    pub domain_prefix: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = REDIS_URL_ENV, required_if_eq("storage", "redis"))]
    pub redis_url: Option<String>,
}
