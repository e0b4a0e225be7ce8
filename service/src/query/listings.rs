//! [`Query`] collection related to multiple [`Listing`]s.

use std::convert::Infallible;

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{listing, Listing},
    infra::{database, Database},
    read::{
        self,
        listing::section::{self, Sections},
    },
    Service,
};

use super::{DatabaseQuery, Query};

/// Queries a page of visible [`Listing`]s.
pub type List =
    DatabaseQuery<By<read::listing::list::Page, read::listing::list::Selector>>;

/// Queries visible [`Listing`]s of a [`section::Section`].
#[derive(Clone, Copy, Debug)]
pub struct Section {
    /// [`section::Section`] to query.
    pub section: section::Section,

    /// [`listing::Category`] to restrict the [`section::Section`] to, if
    /// any.
    pub category: Option<listing::Category>,

    /// Maximum number of [`Listing`]s to return.
    pub limit: u32,
}

impl<Db> Query<Section> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Listing>, section::Selector>>,
        Ok = Vec<Listing>,
        Err = Traced<database::Error>,
    > + Sync,
{
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Section {
            section,
            category,
            limit,
        }: Section,
    ) -> Result<Self::Ok, Self::Err> {
        let created_since = section.is_recent_only().then(|| {
            listing::CreationDateTime::now() - self.config().trending_window
        });

        self.database()
            .map_err(tracerr::wrap!())?
            .execute(Select(By::new(section::Selector {
                section,
                category,
                limit,
                created_since,
            })))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Queries all the [`section::Section`]s concurrently.
///
/// A failed [`section::Section`] is logged and returned empty, so it never
/// fails the others.
#[derive(Clone, Copy, Debug)]
pub struct AllSections {
    /// [`listing::Category`] to restrict the [`section::Section`]s to, if
    /// any.
    pub category: Option<listing::Category>,

    /// Maximum number of [`Listing`]s in each [`section::Section`], except
    /// the discovery feed having [`section::DISCOVERY_FEED_LIMIT`].
    pub limit: u32,
}

impl<Db> Query<AllSections> for Service<Db>
where
    Self: Query<Section, Ok = Vec<Listing>, Err = Traced<database::Error>>,
    Db: Sync,
{
    type Ok = Sections;
    type Err = Infallible;

    async fn execute(
        &self,
        AllSections { category, limit }: AllSections,
    ) -> Result<Self::Ok, Self::Err> {
        use section::Section as S;

        let fetch = |section, limit| async move {
            self.execute(Section {
                section,
                category,
                limit,
            })
            .await
            .unwrap_or_else(|e| {
                log::warn!("failed to query `{section}` section: {e}");
                Vec::new()
            })
        };

        let (
            most_viewed,
            trending,
            recently_added,
            high_demand,
            featured,
            discovery,
        ) = futures::join!(
            fetch(S::MostViewed, limit),
            fetch(S::Trending, limit),
            fetch(S::RecentlyAdded, limit),
            fetch(S::HighDemand, limit),
            fetch(S::Featured, limit),
            fetch(S::Discovery, section::DISCOVERY_FEED_LIMIT),
        );

        Ok(Sections {
            most_viewed,
            trending,
            recently_added,
            high_demand,
            featured,
            discovery,
        })
    }
}
