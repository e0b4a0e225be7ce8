//! [`Database`] the API is served from.

use common::operations::{By, Ping, Select};
use service::{
    domain::{listing, Listing},
    infra::database,
    read::listing::{list, section},
};
use tracerr::Traced;

/// [`database::Database`] providing every operation the API needs.
pub trait Database:
    database::Database<Ping, Ok = (), Err = Traced<database::Error>>
    + database::Database<
        Select<By<Option<Listing>, listing::Id>>,
        Ok = Option<Listing>,
        Err = Traced<database::Error>,
    > + database::Database<
        Select<By<list::Page, list::Selector>>,
        Ok = list::Page,
        Err = Traced<database::Error>,
    > + database::Database<
        Select<By<Vec<Listing>, section::Selector>>,
        Ok = Vec<Listing>,
        Err = Traced<database::Error>,
    > + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> Database for T where
    T: database::Database<Ping, Ok = (), Err = Traced<database::Error>>
        + database::Database<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<database::Error>,
        > + database::Database<
            Select<By<list::Page, list::Selector>>,
            Ok = list::Page,
            Err = Traced<database::Error>,
        > + database::Database<
            Select<By<Vec<Listing>, section::Selector>>,
            Ok = Vec<Listing>,
            Err = Traced<database::Error>,
        > + Clone
        + Send
        + Sync
        + 'static
{
}
