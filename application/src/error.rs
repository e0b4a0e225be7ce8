//! [`Error`]-related definitions.

use std::fmt;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use derive_more::Error as StdError;
use itertools::Itertools as _;
use serde::Serialize;
use service::infra::{database, postgres};
use tracerr::{Trace, Traced};
use tracing as log;

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[status = $status_code:ident]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            status_code: ::http::StatusCode::$status_code,
                            message: $message.to_string(),
                            details: None,
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// API [`Error`].
#[derive(Clone, Debug, Serialize, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// [`http::StatusCode`] of this [`Error`].
    #[serde(skip)]
    pub status_code: http::StatusCode,

    /// [`Error`] message.
    pub message: String,

    /// Additional details of this [`Error`], if any.
    pub details: Option<String>,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    #[serde(skip)]
    pub backtrace: Option<Trace>,
}

impl Error {
    /// Create a new [`Error`] representing an internal server error.
    ///
    /// The provided `err` is logged, but not exposed to clients.
    #[must_use]
    pub fn internal(err: &impl fmt::Display) -> Self {
        log::error!("internal server error: {err}");

        Self {
            code: "INTERNAL_SERVER_ERROR",
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".to_owned(),
            details: None,
            backtrace: None,
        }
    }

    /// Attaches the provided `details` to this [`Error`].
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            status_code: _,
            message,
            details,
            backtrace,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}{}",
            details
                .iter()
                .format_with("", |d, f| f(&format_args!(" ({d})"))),
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("{trace}"))),
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        /// Body of a failed response.
        #[derive(Serialize)]
        struct Body<'e> {
            /// Always empty data.
            data: Option<()>,

            /// Happened [`Error`].
            error: &'e Error,
        }

        (
            self.status_code,
            Json(Body {
                data: None,
                error: &self,
            }),
        )
            .into_response()
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::NotConfigured => Some(DatabaseError::NotConfigured.into()),
            Self::Postgres(e) => e.try_as_error(),
        }
    }
}

impl AsError for postgres::Error {
    fn try_as_error(&self) -> Option<Error> {
        if self.is_unavailable() {
            log::error!("database is unavailable: {self}");
            return Some(DatabaseError::Unavailable.into());
        }
        let details = match self.db_error() {
            Some((message, Some(detail))) => format!("{message}: {detail}"),
            Some((message, None)) => message.to_owned(),
            None => self.to_string(),
        };
        log::error!("database query failed: {details}");
        Some(Error::from(DatabaseError::Query).with_details(details))
    }
}

define_error! {
    enum DatabaseError {
        #[code = "NOT_CONFIGURED"]
        #[status = INTERNAL_SERVER_ERROR]
        #[message = "Listings database is not configured"]
        NotConfigured,

        #[code = "SERVICE_UNAVAILABLE"]
        #[status = SERVICE_UNAVAILABLE]
        #[message = "Listings database is unavailable"]
        Unavailable,

        #[code = "QUERY_ERROR"]
        #[status = INTERNAL_SERVER_ERROR]
        #[message = "Failed to query listings"]
        Query,
    }
}
