//! [`Listing`]-related read definitions.

#[cfg(doc)]
use crate::domain::Listing;

/// Attribute a [`Listing`] selection is ordered by, in descending order.
///
/// Every ordering is finished by the [`Listing`] ID, so equal keys are
/// still returned in a stable order.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SortKey {
    /// Creation date and time.
    CreatedAt,

    /// Number of views.
    Views,

    /// Number of inquiries.
    Inquiries,

    /// Number of favorites.
    Favorites,

    /// Featured flag, featured ones first.
    Featured,
}

pub mod list {
    //! [`Listing`] list definitions.

    use common::{define_pagination, pagination::Limits};
    use derive_more::Display;
    #[cfg(feature = "postgres")]
    use postgres_types::ToSql;

    use crate::domain::{listing, Listing};

    use super::SortKey;

    define_pagination!(Listing, Filter);

    /// Page size [`Limits`] of a [`Listing`] list.
    pub const LIMITS: Limits = Limits {
        default: 20,
        max: 100,
    };

    /// Ordering of a [`Listing`] list.
    pub const ORDERING: &[SortKey] = &[SortKey::CreatedAt];

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// Exact [`listing::Country`] to look for.
        pub country: Option<SearchText>,

        /// [`listing::City`] (or its part) to look for, case-insensitively.
        pub city: Option<SearchText>,

        /// [`listing::Postcode`] (or its part) to look for,
        /// case-insensitively.
        pub postcode: Option<SearchText>,

        /// [`listing::Category`] to look for.
        pub category: Option<listing::Category>,

        /// Inclusive lower bound of a [`listing::Price`].
        pub min_price: Option<listing::Price>,

        /// Inclusive upper bound of a [`listing::Price`].
        pub max_price: Option<listing::Price>,
    }

    /// Text a [`Listing`] attribute is searched by.
    ///
    /// Unlike the [`Listing`] attributes themselves, it isn't limited in
    /// length: a text longer than any stored value simply matches nothing.
    #[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
    #[cfg_attr(feature = "postgres", derive(ToSql), postgres(transparent))]
    pub struct SearchText(String);

    impl SearchText {
        /// Creates a new [`SearchText`] out of the provided `text` with its
        /// surrounding whitespace trimmed.
        ///
        /// [`None`] is returned if the `text` is blank.
        #[must_use]
        pub fn new(text: &str) -> Option<Self> {
            let text = text.trim();
            (!text.is_empty()).then(|| Self(text.to_owned()))
        }

        /// Returns this [`SearchText`] as a string slice.
        #[must_use]
        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

}

pub mod section {
    //! [`Listing`] section definitions.

    use common::pagination::Limits;
    use strum::{AsRefStr, Display, EnumString, IntoStaticStr, VariantArray};

    use crate::domain::{listing, Listing};

    use super::SortKey;

    /// Page size [`Limits`] of a [`Section`].
    pub const LIMITS: Limits = Limits {
        default: 6,
        max: 20,
    };

    /// Number of [`Listing`]s in the discovery feed of [`Sections`].
    pub const DISCOVERY_FEED_LIMIT: u32 = 8;

    /// Curated selection of [`Listing`]s.
    #[derive(
        AsRefStr,
        Clone,
        Copy,
        Debug,
        Default,
        Display,
        EnumString,
        Eq,
        Hash,
        IntoStaticStr,
        PartialEq,
        VariantArray,
    )]
    #[strum(serialize_all = "snake_case")]
    pub enum Section {
        /// Most viewed [`Listing`]s.
        MostViewed,

        /// Most viewed [`Listing`]s among the recently created ones.
        Trending,

        /// Latest [`Listing`]s.
        RecentlyAdded,

        /// [`Listing`]s with the most inquiries and favorites.
        HighDemand,

        /// Latest featured [`Listing`]s.
        Featured,

        /// Featured and popular [`Listing`]s first, then the rest.
        #[default]
        Discovery,
    }

    impl Section {
        /// Parses a [`Section`] out of its name, falling back to
        /// [`Section::Discovery`] for unknown ones.
        #[must_use]
        pub fn from_name(name: &str) -> Self {
            name.trim().parse().unwrap_or_default()
        }

        /// Returns the ordering of this [`Section`].
        #[must_use]
        pub const fn ordering(self) -> &'static [SortKey] {
            match self {
                Self::MostViewed | Self::Trending => &[SortKey::Views],
                Self::RecentlyAdded | Self::Featured => &[SortKey::CreatedAt],
                Self::HighDemand => &[SortKey::Inquiries, SortKey::Favorites],
                Self::Discovery => &[
                    SortKey::Featured,
                    SortKey::Views,
                    SortKey::CreatedAt,
                ],
            }
        }

        /// Indicates whether this [`Section`] contains featured [`Listing`]s
        /// only.
        #[must_use]
        pub const fn is_featured_only(self) -> bool {
            matches!(self, Self::Featured)
        }

        /// Indicates whether this [`Section`] contains recently created
        /// [`Listing`]s only.
        #[must_use]
        pub const fn is_recent_only(self) -> bool {
            matches!(self, Self::Trending)
        }
    }

    /// Selector of [`Listing`]s in a [`Section`].
    #[derive(Clone, Copy, Debug)]
    pub struct Selector {
        /// [`Section`] to select.
        pub section: Section,

        /// [`listing::Category`] to restrict the [`Section`] to, if any.
        pub category: Option<listing::Category>,

        /// Maximum number of [`Listing`]s to select.
        pub limit: u32,

        /// Lower bound of [`Listing`]s creation, if any.
        pub created_since: Option<listing::CreationDateTime>,
    }

    /// All the [`Section`]s at once.
    #[derive(Clone, Debug, Default)]
    pub struct Sections {
        /// [`Section::MostViewed`] [`Listing`]s.
        pub most_viewed: Vec<Listing>,

        /// [`Section::Trending`] [`Listing`]s.
        pub trending: Vec<Listing>,

        /// [`Section::RecentlyAdded`] [`Listing`]s.
        pub recently_added: Vec<Listing>,

        /// [`Section::HighDemand`] [`Listing`]s.
        pub high_demand: Vec<Listing>,

        /// [`Section::Featured`] [`Listing`]s.
        pub featured: Vec<Listing>,

        /// [`Section::Discovery`] feed.
        pub discovery: Vec<Listing>,
    }

}
