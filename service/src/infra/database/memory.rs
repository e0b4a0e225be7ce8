//! In-process [`Database`] implementation.

use std::{cmp::Ordering, sync::Arc};

use common::{
    operations::{By, Ping, Select},
    pagination,
};
use tracerr::Traced;

use crate::{
    domain::{listing, Listing},
    infra::{database, Database},
    read::listing::{list, section, SortKey},
};

/// In-process [`Database`] holding a fixed set of [`Listing`]s.
///
/// Mirrors the semantics of the [`Postgres`] one, so it can stand in for it
/// in tests and local setups.
///
/// [`Postgres`]: crate::infra::Postgres
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// [`Listing`]s stored in this [`Memory`].
    listings: Arc<[Listing]>,
}

impl Memory {
    /// Creates a new [`Memory`] holding the provided [`Listing`]s.
    #[must_use]
    pub fn new(listings: impl IntoIterator<Item = Listing>) -> Self {
        Self {
            listings: listings.into_iter().collect(),
        }
    }

    /// Returns an iterator over the visible [`Listing`]s.
    fn visible(&self) -> impl Iterator<Item = &Listing> {
        self.listings.iter().filter(|l| l.is_visible())
    }
}

impl FromIterator<Listing> for Memory {
    fn from_iter<T: IntoIterator<Item = Listing>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl Database<Ping> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Ping) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl Database<Select<By<Option<Listing>, listing::Id>>> for Memory {
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.visible().find(|l| l.id == id).cloned())
    }
}

impl Database<Select<By<list::Page, list::Selector>>> for Memory {
    type Ok = list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let pagination::Selector { arguments, filter } = by.into_inner();

        let mut found =
            self.visible().filter(|l| matches(&filter, l)).collect::<Vec<_>>();
        found.sort_by(|a, b| compare(list::ORDERING, a, b));

        let total = u64::try_from(found.len()).unwrap_or(u64::MAX);
        let offset = usize::try_from(arguments.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(arguments.limit()).unwrap_or(usize::MAX);
        let items = found
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect::<Vec<_>>();

        Ok(list::Page::new(arguments, items, total))
    }
}

impl Database<Select<By<Vec<Listing>, section::Selector>>> for Memory {
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, section::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let section::Selector {
            section,
            category,
            limit,
            created_since,
        } = by.into_inner();

        let mut found = self
            .visible()
            .filter(|l| category.map_or(true, |c| l.category == c))
            .filter(|l| !section.is_featured_only() || l.featured)
            .filter(|l| created_since.map_or(true, |at| l.created_at >= at))
            .collect::<Vec<_>>();
        found.sort_by(|a, b| compare(section.ordering(), a, b));

        Ok(found
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}

/// Checks whether the provided [`Listing`] passes the [`list::Filter`].
fn matches(filter: &list::Filter, listing: &Listing) -> bool {
    let list::Filter {
        country,
        city,
        postcode,
        category,
        min_price,
        max_price,
    } = filter;

    let listing_country: &str = listing.country.as_ref();
    let listing_city: &str = listing.city.as_ref();
    let listing_postcode: Option<&str> =
        listing.postcode.as_ref().map(AsRef::as_ref);

    country.as_ref().map_or(true, |c| listing_country == c.as_str())
        && city
            .as_ref()
            .map_or(true, |c| contains_ignore_case(listing_city, c.as_str()))
        && postcode.as_ref().map_or(true, |p| {
            listing_postcode
                .is_some_and(|lp| contains_ignore_case(lp, p.as_str()))
        })
        && category.map_or(true, |c| listing.category == c)
        && min_price.map_or(true, |min| listing.price >= min)
        && max_price.map_or(true, |max| listing.price <= max)
}

/// Checks whether the `haystack` contains the `needle`, ignoring case.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Compares the provided [`Listing`]s by the `keys` in descending order,
/// falling back to their IDs.
fn compare(keys: &[SortKey], a: &Listing, b: &Listing) -> Ordering {
    keys.iter()
        .map(|key| match key {
            SortKey::CreatedAt => b.created_at.cmp(&a.created_at),
            SortKey::Views => b.views.cmp(&a.views),
            SortKey::Inquiries => b.inquiries.cmp(&a.inquiries),
            SortKey::Favorites => b.favorites.cmp(&a.favorites),
            SortKey::Featured => b.featured.cmp(&a.featured),
        })
        .find(|o| o.is_ne())
        .unwrap_or_else(|| b.id.cmp(&a.id))
}
