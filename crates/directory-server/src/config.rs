use std::net::{IpAddr, SocketAddr};

use clap::Args;

/// Flags for `directory-server serve`
///
/// Every flag falls back to an environment variable; `.env` is loaded before
/// parsing.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, env = "DIRECTORY_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    #[arg(long, env = "DIRECTORY_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Comma-separated list of origins allowed by CORS
    #[arg(
        long,
        env = "DIRECTORY_CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:4200"
    )]
    pub cors_origins: Vec<String>,

    /// Start with an empty directory instead of the sample data
    #[arg(long)]
    pub no_seed: bool,
}

/// Resolved server settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServeConfig {
    pub addr: SocketAddr,
    pub cors_origins: Vec<String>,
    pub seed: bool,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
            cors_origins: Vec::new(),
            seed: true,
        }
    }

    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins
            .into_iter()
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        self
    }
}

impl From<ServeArgs> for ServeConfig {
    fn from(args: ServeArgs) -> Self {
        let mut config = ServeConfig::new(args.host, args.port).with_cors_origins(args.cors_origins);
        config.seed = !args.no_seed;
        config
    }
}
