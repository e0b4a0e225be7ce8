//! [`Args`] definitions.

use clap::Parser;

use crate::config;

/// Read-only HTTP API over real-estate listings.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Host to bind the server to, overriding the configured one.
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind the server to, overriding the configured one.
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }

    /// Applies the overrides of these [`Args`] to the provided
    /// [`config::Server`].
    pub fn apply_to(&mut self, server: &mut config::Server) {
        if let Some(host) = self.host.take() {
            server.host = host;
        }
        if let Some(port) = self.port {
            server.port = port;
        }
    }
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;

    use crate::config;

    use super::Args;

    #[test]
    fn defaults_config_path() {
        let args = Args::try_parse_from(["application"]).unwrap();

        assert_eq!(args.config, "config.toml");
        assert!(args.host.is_none());
        assert!(args.port.is_none());
    }

    #[test]
    fn overrides_server_address() {
        let mut args = Args::try_parse_from([
            "application",
            "--config",
            "prod.toml",
            "--host",
            "127.0.0.1",
            "-p",
            "9000",
        ])
        .unwrap();
        let mut server = config::Server::default();

        args.apply_to(&mut server);

        assert_eq!(args.config, "prod.toml");
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 9000);
    }
}
