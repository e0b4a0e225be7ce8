//! [`Listing`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Real-estate listing published for sale or rent.
#[derive(Clone, Debug)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// [`Title`] of this [`Listing`].
    pub title: Title,

    /// [`Description`] of this [`Listing`], if any.
    pub description: Option<Description>,

    /// [`Address`] of this [`Listing`], if any.
    pub address: Option<Address>,

    /// [`Country`] this [`Listing`] is located in.
    pub country: Country,

    /// [`City`] this [`Listing`] is located in.
    pub city: City,

    /// [`Postcode`] of this [`Listing`], if any.
    pub postcode: Option<Postcode>,

    /// [`Category`] of this [`Listing`].
    pub category: Category,

    /// Asked [`Price`] of this [`Listing`].
    pub price: Price,

    /// Publication [`Status`] of this [`Listing`].
    pub status: Status,

    /// Number of times this [`Listing`] was viewed.
    pub views: u32,

    /// Number of inquiries made about this [`Listing`].
    pub inquiries: u32,

    /// Number of users who added this [`Listing`] to their favorites.
    pub favorites: u32,

    /// Indicator whether this [`Listing`] is promoted.
    pub featured: bool,

    /// [`DateTime`] when this [`Listing`] was created.
    pub created_at: CreationDateTime,
}

impl Listing {
    /// Indicates whether this [`Listing`] may be shown to clients.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.status.is_visible()
    }
}

/// ID of a [`Listing`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Title of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        check_text(&title, 512).then_some(Self(title))
    }
}

/// Free-form description of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`] if the given `description` isn't empty.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Option<Self> {
        let description = description.into();
        (!description.trim().is_empty()).then_some(Self(description))
    }
}

/// Street address of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        check_text(&address, 1024).then_some(Self(address))
    }
}

/// Country of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Country(String);

impl Country {
    /// Creates a new [`Country`] if the given `country` is valid.
    #[must_use]
    pub fn new(country: impl Into<String>) -> Option<Self> {
        let country = country.into();
        check_text(&country, 512).then_some(Self(country))
    }
}

/// City of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct City(String);

impl City {
    /// Creates a new [`City`] if the given `city` is valid.
    #[must_use]
    pub fn new(city: impl Into<String>) -> Option<Self> {
        let city = city.into();
        check_text(&city, 512).then_some(Self(city))
    }
}

/// Postcode of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Postcode(String);

impl Postcode {
    /// Creates a new [`Postcode`] if the given `postcode` is valid.
    #[must_use]
    pub fn new(postcode: impl Into<String>) -> Option<Self> {
        let postcode = postcode.into();
        check_text(&postcode, 32).then_some(Self(postcode))
    }
}

/// Price asked for a [`Listing`].
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Price(Decimal);

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self)
    }
}

define_kind! {
    #[doc = "Category of a [`Listing`]."]
    enum Category {
        #[doc = "Listing offered for sale."]
        Sale,

        #[doc = "Listing offered for rent."]
        Rent,
    }
}

define_kind! {
    #[doc = "Publication status of a [`Listing`]."]
    enum Status {
        #[doc = "Published and shown to clients."]
        Online,

        #[doc = "Actively marketed and shown to clients."]
        Active,

        #[doc = "Not published yet."]
        Draft,

        #[doc = "Withdrawn from publication."]
        Offline,

        #[doc = "Sold or rented out already."]
        Sold,
    }
}

impl Status {
    /// [`Status`]es of [`Listing`]s that may be shown to clients.
    pub const VISIBLE: [Self; 2] = [Self::Online, Self::Active];

    /// Indicates whether a [`Listing`] with this [`Status`] may be shown to
    /// clients.
    #[must_use]
    pub fn is_visible(self) -> bool {
        Self::VISIBLE.contains(&self)
    }
}

/// [`DateTime`] when a [`Listing`] was created.
pub type CreationDateTime = DateTimeOf<Listing>;

/// Checks whether the given `text` is trimmed, non-empty and not longer than
/// `max_len` bytes.
fn check_text(text: &str, max_len: usize) -> bool {
    text.trim() == text && !text.is_empty() && text.len() <= max_len
}

#[cfg(test)]
mod spec {
    use super::{Category, City, Price, Status};

    #[test]
    fn only_online_and_active_are_visible() {
        assert!(Status::Online.is_visible());
        assert!(Status::Active.is_visible());
        assert!(!Status::Draft.is_visible());
        assert!(!Status::Offline.is_visible());
        assert!(!Status::Sold.is_visible());
    }

    #[test]
    fn kinds_use_snake_case_names() {
        assert_eq!(Category::Rent.as_ref(), "rent");
        assert_eq!("sale".parse::<Category>().unwrap(), Category::Sale);
        assert_eq!("online".parse::<Status>().unwrap(), Status::Online);
        assert!("Buy".parse::<Category>().is_err());
    }

    #[test]
    fn rejects_untrimmed_text() {
        assert!(City::new("London").is_some());
        assert!(City::new(" London").is_none());
        assert!(City::new("").is_none());
    }

    #[test]
    fn parses_price() {
        assert_eq!(
            " 1250.50 ".parse::<Price>().unwrap(),
            "1250.5".parse::<Price>().unwrap(),
        );
        assert!("cheap".parse::<Price>().is_err());
    }
}
