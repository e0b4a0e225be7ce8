//! [`Query`] collection related to a single [`Listing`].

use common::operations::By;

use crate::domain::{listing, Listing};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a visible [`Listing`] by its [`listing::Id`].
pub type ById = DatabaseQuery<By<Option<Listing>, listing::Id>>;
