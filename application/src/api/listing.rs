//! [`Listing`]-related definitions.

use rust_decimal::Decimal;
use serde::Serialize;
use service::{
    domain::{self, listing},
    read::listing::list::SearchText,
};

/// A real-estate listing, as returned by the API.
#[derive(Clone, Debug, Serialize)]
pub struct Listing {
    /// Unique identifier of this [`Listing`].
    pub id: String,

    /// Title of this [`Listing`].
    pub title: String,

    /// Description of this [`Listing`], if any.
    pub description: Option<String>,

    /// Street address of this [`Listing`], if any.
    pub address: Option<String>,

    /// Country this [`Listing`] is located in.
    pub country: String,

    /// City this [`Listing`] is located in.
    pub city: String,

    /// Postcode of this [`Listing`], if any.
    pub postcode: Option<String>,

    /// Category of this [`Listing`]: `sale` or `rent`.
    pub category: String,

    /// Asked price of this [`Listing`].
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Publication status of this [`Listing`].
    pub status: String,

    /// Number of times this [`Listing`] was viewed.
    pub views: u32,

    /// Number of inquiries made about this [`Listing`].
    pub inquiries: u32,

    /// Number of users who added this [`Listing`] to their favorites.
    pub favorites: u32,

    /// Indicator whether this [`Listing`] is promoted.
    pub featured: bool,

    /// [RFC 3339] date and time when this [`Listing`] was created.
    ///
    /// [RFC 3339]: https://datatracker.ietf.org/doc/html/rfc3339
    pub created_at: String,
}

impl From<domain::Listing> for Listing {
    fn from(listing: domain::Listing) -> Self {
        let domain::Listing {
            id,
            title,
            description,
            address,
            country,
            city,
            postcode,
            category,
            price,
            status,
            views,
            inquiries,
            favorites,
            featured,
            created_at,
        } = listing;

        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.map(|d| d.to_string()),
            address: address.map(|a| a.to_string()),
            country: country.to_string(),
            city: city.to_string(),
            postcode: postcode.map(|p| p.to_string()),
            category: category.to_string(),
            price: price.into(),
            status: status.to_string(),
            views,
            inquiries,
            favorites,
            featured,
            created_at: created_at.to_rfc3339(),
        }
    }
}

/// Parses an integer query parameter, ignoring unparseable ones.
pub(crate) fn integer(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse().ok())
}

/// Parses the `type` query parameter into a [`listing::Category`].
///
/// `buy` and `sale` mean a sale, while `rent` means a rent. Anything else
/// applies no restriction.
pub(crate) fn category(raw: Option<&str>) -> Option<listing::Category> {
    match raw?.trim().to_ascii_lowercase().as_str() {
        "buy" | "sale" => Some(listing::Category::Sale),
        "rent" => Some(listing::Category::Rent),
        _ => None,
    }
}

/// Parses a price query parameter, ignoring unparseable ones.
pub(crate) fn price(raw: Option<&str>) -> Option<listing::Price> {
    raw.and_then(|s| s.parse().ok())
}

/// Parses a textual query parameter, ignoring blank ones.
pub(crate) fn text(raw: Option<&str>) -> Option<SearchText> {
    raw.and_then(SearchText::new)
}

#[cfg(test)]
mod spec {
    use service::{
        domain::listing::{Category, Price},
        read::listing::list::SearchText,
    };

    use super::{category, integer, price, text};

    #[test]
    fn maps_type_to_category() {
        assert_eq!(category(Some("buy")), Some(Category::Sale));
        assert_eq!(category(Some("SALE")), Some(Category::Sale));
        assert_eq!(category(Some(" Rent ")), Some(Category::Rent));
        assert_eq!(category(Some("lease")), None);
        assert_eq!(category(Some("")), None);
        assert_eq!(category(None), None);
    }

    #[test]
    fn ignores_unparseable_numbers() {
        assert_eq!(integer(Some("3")), Some(3));
        assert_eq!(integer(Some("-1")), Some(-1));
        assert_eq!(integer(Some("three")), None);
        assert_eq!(price(Some("1500.50")), "1500.5".parse::<Price>().ok());
        assert_eq!(price(Some("cheap")), None);
    }

    #[test]
    fn ignores_blank_text() {
        assert_eq!(text(Some(" Leeds ")), SearchText::new("Leeds"));
        assert_eq!(text(Some("   ")), None);
        assert_eq!(text(None), None);
    }
}
