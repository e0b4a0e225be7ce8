//! Curated sections endpoints.

use axum::Json;
use serde::Serialize;
use service::{
    domain,
    query::listings,
    read::listing::section::{self, Section, Sections},
    Query as _,
};

use crate::{api, AsError, Context, Database, Error};

/// Query parameters of the sections endpoints.
#[derive(Debug, Default)]
pub struct Params {
    /// Name of the requested section.
    ///
    /// Unknown names fall back to the discovery feed.
    pub section: Option<String>,

    /// Maximum number of listings in a section.
    pub limit: Option<String>,

    /// Listing type: `buy`, `sale` or `rent`.
    pub kind: Option<String>,
}

impl From<&api::QueryParams> for Params {
    fn from(query: &api::QueryParams) -> Self {
        Self {
            section: query.owned("section"),
            limit: query.owned("limit"),
            kind: query.owned("type"),
        }
    }
}

impl Params {
    /// Returns the requested [`Section`].
    #[must_use]
    pub fn section(&self) -> Section {
        self.section
            .as_deref()
            .map(Section::from_name)
            .unwrap_or_default()
    }

    /// Returns the requested section size, clamped into
    /// [`section::LIMITS`].
    #[must_use]
    pub fn limit(&self) -> u32 {
        section::LIMITS.clamp(api::listing::integer(self.limit.as_deref()))
    }
}

/// Response of the `GET /properties/sections` endpoint.
///
/// Always served with `200 OK`, so a failed section never breaks a page.
#[derive(Debug, Serialize)]
pub struct SectionResponse {
    /// Listings of the section, empty if failed.
    pub data: Vec<api::Listing>,

    /// Name of the section.
    pub section: &'static str,

    /// Number of the returned listings, if succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    /// Happened [`Error`], if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Error>,
}

/// Response of the `GET /properties/all-sections` endpoint.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllSectionsResponse {
    /// Most viewed listings.
    pub most_viewed: Vec<api::Listing>,

    /// Most viewed among the recently created listings.
    pub trending: Vec<api::Listing>,

    /// Latest listings.
    pub recently_added: Vec<api::Listing>,

    /// Listings with the most inquiries and favorites.
    pub high_demand: Vec<api::Listing>,

    /// Latest featured listings.
    pub featured: Vec<api::Listing>,

    /// Featured and popular listings first, then the rest.
    pub discovery: Vec<api::Listing>,
}

impl From<Sections> for AllSectionsResponse {
    fn from(sections: Sections) -> Self {
        let convert = |listings: Vec<domain::Listing>| -> Vec<api::Listing> {
            listings.into_iter().map(Into::into).collect()
        };
        let Sections {
            most_viewed,
            trending,
            recently_added,
            high_demand,
            featured,
            discovery,
        } = sections;

        Self {
            most_viewed: convert(most_viewed),
            trending: convert(trending),
            recently_added: convert(recently_added),
            high_demand: convert(high_demand),
            featured: convert(featured),
            discovery: convert(discovery),
        }
    }
}

/// Returns a single curated section of visible listings.
#[tracing::instrument(
    skip_all,
    fields(
        http.handler = "properties.sections",
        otel.name = api::SPAN_NAME,
        section = tracing::field::Empty,
    ),
)]
pub async fn section<Db: Database>(
    ctx: Context<Db>,
    query: api::QueryParams,
) -> Json<SectionResponse> {
    let params = Params::from(&query);
    let section = params.section();
    _ = tracing::Span::current().record("section", section.as_ref());

    let res = ctx
        .service()
        .execute(listings::Section {
            section,
            category: api::listing::category(params.kind.as_deref()),
            limit: params.limit(),
        })
        .await;

    Json(match res {
        Ok(found) => SectionResponse {
            count: Some(found.len()),
            data: found.into_iter().map(Into::into).collect(),
            section: section.into(),
            error: None,
        },
        Err(e) => {
            let error = AsError::into_error(e);
            tracing::warn!("failed to fetch `{section}` section: {error}");
            SectionResponse {
                data: Vec::new(),
                section: section.into(),
                count: None,
                error: Some(error),
            }
        }
    })
}

/// Returns all the curated sections at once.
///
/// Failed sections are returned empty.
#[tracing::instrument(
    skip_all,
    fields(
        http.handler = "properties.all_sections",
        otel.name = api::SPAN_NAME,
    ),
)]
pub async fn all<Db: Database>(
    ctx: Context<Db>,
    query: api::QueryParams,
) -> Json<AllSectionsResponse> {
    let params = Params::from(&query);

    let sections = ctx
        .service()
        .execute(listings::AllSections {
            category: api::listing::category(params.kind.as_deref()),
            limit: params.limit(),
        })
        .await
        .unwrap_or_else(|never| match never {});

    Json(sections.into())
}
