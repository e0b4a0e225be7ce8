//! Service contains the business logic of the listings API.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

use std::time;

use smart_default::SmartDefault;
use tracerr::Traced;

#[cfg(test)]
use tokio as _;

#[cfg(doc)]
use crate::infra::Database;
use crate::infra::database;

pub use self::query::Query;

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// How far back [`read::listing::section::Section::Trending`] looks for
    /// created listings.
    #[default(time::Duration::from_secs(7 * 24 * 60 * 60))]
    pub trending_window: time::Duration,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`], if it's configured.
    database: Option<Db>,
}

impl<Db> Service<Db> {
    /// Creates a new [`Service`] with the provided parameters.
    ///
    /// [`Service`] without a [`Database`] still serves requests, failing
    /// each of them with a [`database::Error::NotConfigured`].
    #[must_use]
    pub fn new(config: Config, database: Option<Db>) -> Self {
        Self { config, database }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    ///
    /// # Errors
    ///
    /// With [`database::Error::NotConfigured`] if this [`Service`] has no
    /// [`Database`].
    pub fn database(&self) -> Result<&Db, Traced<database::Error>> {
        self.database
            .as_ref()
            .ok_or_else(|| tracerr::new!(database::Error::NotConfigured))
    }
}
