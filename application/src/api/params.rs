//! [`QueryParams`] extractor.

use std::{collections::HashMap, convert::Infallible};

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
};

/// Query string parameters of an HTTP request.
///
/// Only the first value of a repeated parameter is kept, and a malformed
/// query string is treated as an empty one.
#[derive(Clone, Debug, Default)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    /// Parses [`QueryParams`] out of the query string of the provided
    /// [`http::Uri`].
    #[must_use]
    pub fn from_uri(uri: &http::Uri) -> Self {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();

        let mut params = HashMap::with_capacity(pairs.len());
        for (name, value) in pairs {
            _ = params.entry(name).or_insert(value);
        }
        Self(params)
    }

    /// Returns the value of the parameter with the provided `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns an owned value of the parameter with the provided `name`, if
    /// any.
    pub(crate) fn owned(&self, name: &str) -> Option<String> {
        self.get(name).map(ToOwned::to_owned)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_uri(&parts.uri))
    }
}
