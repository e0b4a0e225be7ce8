//! `/properties` endpoints.

use axum::{
    extract::Path,
    response::{IntoResponse, Response},
    Json,
};
use common::pagination;
use serde::Serialize;
use service::{
    domain::listing,
    query::{self, listings},
    read::listing::list,
    Query as _,
};

use crate::{api, AsError, Context, Database, Error};

/// Query parameters of the `GET /properties` endpoint.
#[derive(Debug, Default)]
pub struct Params {
    /// Number of the requested page, starting from `1`.
    pub page: Option<String>,

    /// Maximum number of listings on the page.
    pub limit: Option<String>,

    /// Exact country to look for.
    pub country: Option<String>,

    /// City (or its part) to look for.
    pub city: Option<String>,

    /// Postcode (or its part) to look for.
    pub postcode: Option<String>,

    /// Listing type: `buy`, `sale` or `rent`.
    pub kind: Option<String>,

    /// Inclusive lower bound of the price.
    pub min_price: Option<String>,

    /// Inclusive upper bound of the price.
    pub max_price: Option<String>,
}

impl From<&api::QueryParams> for Params {
    fn from(query: &api::QueryParams) -> Self {
        Self {
            page: query.owned("page"),
            limit: query.owned("limit"),
            country: query.owned("country"),
            city: query.owned("city"),
            postcode: query.owned("postcode"),
            kind: query.owned("type"),
            min_price: query.owned("min_price"),
            max_price: query.owned("max_price"),
        }
    }
}

impl Params {
    /// Builds a [`list::Selector`] out of these [`Params`].
    ///
    /// Invalid values fall back to their defaults rather than fail.
    #[must_use]
    pub fn selector(&self) -> list::Selector {
        let Self {
            page,
            limit,
            country,
            city,
            postcode,
            kind,
            min_price,
            max_price,
        } = self;

        list::Selector {
            arguments: list::Arguments::new(
                api::listing::integer(page.as_deref()),
                api::listing::integer(limit.as_deref()),
                list::LIMITS,
            ),
            filter: list::Filter {
                country: api::listing::text(country.as_deref()),
                city: api::listing::text(city.as_deref()),
                postcode: api::listing::text(postcode.as_deref()),
                category: api::listing::category(kind.as_deref()),
                min_price: api::listing::price(min_price.as_deref()),
                max_price: api::listing::price(max_price.as_deref()),
            },
        }
    }
}

/// Pagination metadata of a [`ListResponse`].
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Number of the returned page.
    pub page: u32,

    /// Maximum number of listings on the page.
    pub limit: u32,

    /// Total number of listings matching the filter.
    pub total: u64,

    /// Total number of pages.
    pub total_pages: u64,

    /// Indicator whether there is a page after this one.
    pub has_next_page: bool,

    /// Indicator whether there is a page before this one.
    pub has_previous_page: bool,
}

impl From<pagination::PageInfo> for Pagination {
    fn from(info: pagination::PageInfo) -> Self {
        let pagination::PageInfo {
            page,
            limit,
            total,
            total_pages,
            has_next_page,
            has_previous_page,
        } = info;

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next_page,
            has_previous_page,
        }
    }
}

/// Response of the `GET /properties` endpoint.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Listings on the requested page, if succeeded.
    pub data: Option<Vec<api::Listing>>,

    /// Happened [`Error`], if any.
    pub error: Option<Error>,

    /// Pagination metadata, if succeeded.
    pub pagination: Option<Pagination>,
}

impl From<Result<list::Page, Error>> for ListResponse {
    fn from(res: Result<list::Page, Error>) -> Self {
        match res {
            Ok(page) => {
                let pagination = page.page_info().into();
                Self {
                    data: Some(page.map(Into::into).items),
                    error: None,
                    pagination: Some(pagination),
                }
            }
            Err(e) => Self {
                data: None,
                error: Some(e),
                pagination: None,
            },
        }
    }
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        let status = self
            .error
            .as_ref()
            .map_or(http::StatusCode::OK, |e| e.status_code);
        (status, Json(self)).into_response()
    }
}

/// Response of the `GET /properties/{id}` endpoint.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    /// Found listing, if any.
    pub data: Option<api::Listing>,

    /// Happened [`Error`], if any.
    pub error: Option<Error>,
}

impl IntoResponse for ItemResponse {
    fn into_response(self) -> Response {
        let status = self
            .error
            .as_ref()
            .map_or(http::StatusCode::OK, |e| e.status_code);
        (status, Json(self)).into_response()
    }
}

/// Returns a page of visible listings matching the provided [`Params`].
#[tracing::instrument(
    skip_all,
    fields(
        http.handler = "properties.list",
        otel.name = api::SPAN_NAME,
    ),
)]
pub async fn list<Db: Database>(
    ctx: Context<Db>,
    query: api::QueryParams,
) -> ListResponse {
    let selector = Params::from(&query).selector();
    tracing::debug!(
        page = selector.arguments.page(),
        limit = selector.arguments.limit(),
        "listing properties",
    );

    ctx.service()
        .execute(listings::List::by(selector))
        .await
        .map_err(AsError::into_error)
        .into()
}

/// Returns the visible listing with the provided ID, if any.
///
/// A malformed ID is treated as an absent listing.
#[tracing::instrument(
    skip_all,
    fields(
        http.handler = "properties.by_id",
        id = %id,
        otel.name = api::SPAN_NAME,
    ),
)]
pub async fn by_id<Db: Database>(
    ctx: Context<Db>,
    Path(id): Path<String>,
) -> ItemResponse {
    let Ok(id) = id.trim().parse::<listing::Id>() else {
        return ItemResponse {
            data: None,
            error: None,
        };
    };

    match ctx.service().execute(query::listing::ById::by(id)).await {
        Ok(found) => ItemResponse {
            data: found.map(Into::into),
            error: None,
        },
        Err(e) => ItemResponse {
            data: None,
            error: Some(AsError::into_error(e)),
        },
    }
}

#[cfg(test)]
mod spec {
    use service::domain::listing::Category;

    use crate::api::QueryParams;

    use super::Params;

    #[test]
    fn builds_default_selector() {
        let selector = Params::default().selector();

        assert_eq!(selector.arguments.page(), 1);
        assert_eq!(selector.arguments.limit(), 20);
        assert!(selector.filter.category.is_none());
        assert!(selector.filter.country.is_none());
    }

    #[test]
    fn builds_selector_leniently() {
        let selector = Params {
            page: Some("0".to_owned()),
            limit: Some("500".to_owned()),
            city: Some("  ".to_owned()),
            kind: Some("Buy".to_owned()),
            min_price: Some("abc".to_owned()),
            max_price: Some("1000".to_owned()),
            ..Params::default()
        }
        .selector();

        assert_eq!(selector.arguments.page(), 1);
        assert_eq!(selector.arguments.limit(), 100);
        assert!(selector.filter.city.is_none());
        assert_eq!(selector.filter.category, Some(Category::Sale));
        assert!(selector.filter.min_price.is_none());
        assert!(selector.filter.max_price.is_some());
    }

    #[test]
    fn keeps_long_text_filters() {
        let selector = Params {
            postcode: Some("SW1A 1AA LONDON UNITED KINGDOM GB".to_owned()),
            country: Some("X".repeat(600)),
            ..Params::default()
        }
        .selector();

        assert_eq!(
            selector.filter.postcode.as_ref().map(|p| p.as_str()),
            Some("SW1A 1AA LONDON UNITED KINGDOM GB"),
        );
        assert_eq!(
            selector.filter.country.as_ref().map(|c| c.as_str().len()),
            Some(600),
        );
    }

    #[test]
    fn reads_first_of_repeated_params() {
        let query = QueryParams::from_uri(
            &"/properties?city=Leeds&type=rent&page=2&type=sale"
                .parse()
                .unwrap(),
        );

        let selector = Params::from(&query).selector();

        assert_eq!(selector.arguments.page(), 2);
        assert_eq!(
            selector.filter.city.as_ref().map(|c| c.as_str()),
            Some("Leeds"),
        );
        assert_eq!(selector.filter.category, Some(Category::Rent));
    }
}
