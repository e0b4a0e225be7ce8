//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use http::header::{HeaderValue, InvalidHeaderValue};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;
use service::infra::postgres;
use smart_default::SmartDefault;
use tower_http::cors::{self, AllowOrigin, CorsLayer};

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: Server,

    /// Service configuration.
    #[serde(default)]
    pub service: Service,

    /// Postgres configuration.
    #[serde(default)]
    pub postgres: Postgres,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// Public URL the server is reachable by, if differs from the bound
    /// address.
    pub public_url: Option<String>,

    /// Maximum duration of handling a single request.
    #[default(time::Duration::from_secs(30))]
    #[serde(with = "humantime_serde")]
    pub request_timeout: time::Duration,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    ///
    /// `*` allows any origin.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

impl Cors {
    /// Builds a [`CorsLayer`] allowing `GET` requests from the configured
    /// [`origins`].
    ///
    /// # Errors
    ///
    /// If any of the [`origins`] is not a valid header value.
    ///
    /// [`origins`]: Cors::origins
    pub fn layer(&self) -> Result<CorsLayer, InvalidHeaderValue> {
        let layer = CorsLayer::new()
            .allow_methods([http::Method::GET, http::Method::OPTIONS])
            .allow_headers([http::header::CONTENT_TYPE]);

        if self.origins.iter().any(|o| o == "*") {
            return Ok(layer.allow_origin(cors::Any));
        }
        let origins = self
            .origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(layer.allow_origin(AllowOrigin::list(origins)))
    }
}

/// Service configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// How far back the trending section looks for created listings.
    #[default(time::Duration::from_secs(7 * 24 * 60 * 60))]
    #[serde(with = "humantime_serde")]
    pub trending_window: time::Duration,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service { trending_window } = value;
        Self { trending_window }
    }
}

/// Postgres configuration.
#[derive(Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Postgres {
    /// Connection URL of the database.
    ///
    /// Database is considered not configured if absent.
    pub url: Option<String>,

    /// Password to connect with, overriding the one in the [`url`].
    ///
    /// [`url`]: Postgres::url
    pub password: Option<SecretString>,

    /// Maximum number of pooled connections.
    #[default(16)]
    pub pool_size: usize,

    /// Indicator whether to run database migrations on startup.
    #[default(true)]
    pub migrate: bool,
}

impl Postgres {
    /// Returns the [`postgres::Config`] of the pool, if the database is
    /// configured.
    #[must_use]
    pub fn pool_config(&self) -> Option<postgres::Config> {
        let url = self.url.as_ref().filter(|url| !url.trim().is_empty())?;

        Some(postgres::Config {
            url: Some(url.clone()),
            password: self
                .password
                .as_ref()
                .map(|p| p.expose_secret().to_owned()),
            pool: Some(postgres::PoolConfig::new(self.pool_size)),
            ..postgres::Config::default()
        })
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Config, Cors, Postgres};

    #[test]
    fn unconfigured_by_default() {
        let Config {
            server,
            service,
            postgres,
            ..
        } = Config::default();

        assert_eq!(server.port, 8080);
        assert_eq!(server.request_timeout.as_secs(), 30);
        assert_eq!(service.trending_window.as_secs(), 7 * 24 * 60 * 60);
        assert!(postgres.migrate);
        assert!(postgres.pool_config().is_none());
    }

    #[test]
    fn builds_pool_config_out_of_url() {
        let postgres = Postgres {
            url: Some("postgres://listings@localhost/listings".to_owned()),
            password: Some("secret".to_owned().into()),
            pool_size: 4,
            ..Postgres::default()
        };

        let conf = postgres.pool_config().unwrap();
        assert_eq!(conf.password.as_deref(), Some("secret"));
        assert_eq!(conf.pool.map(|p| p.max_size), Some(4));
        assert!(Postgres {
            url: Some("  ".to_owned()),
            ..Postgres::default()
        }
        .pool_config()
        .is_none());
    }

    #[test]
    fn rejects_invalid_cors_origin() {
        let cors = Cors {
            origins: vec!["https://a.example".to_owned(), "a\nb".to_owned()],
        };

        assert!(cors.layer().is_err());
        assert!(Cors::default().layer().is_ok());
    }
}
