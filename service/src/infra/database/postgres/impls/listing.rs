//! [`Listing`]-related [`Database`] implementations.

use common::{
    operations::{By, Select},
    pagination,
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        listing::{self, Status},
        Listing,
    },
    infra::{
        database::{
            self,
            postgres::{Connection, LikePattern},
            Postgres,
        },
        Database,
    },
    read::listing::{list, section, SortKey},
};

/// Columns of the `properties` table forming a [`Listing`].
const COLUMNS: &str = "\
    id, title, description, address, \
    country, city, postcode, \
    category, price, status, \
    views, inquiries, favorites, featured, \
    created_at";

impl<C> Database<Select<By<Option<Listing>, listing::Id>>> for Postgres<C>
where
    C: Connection + Sync,
{
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: listing::Id = by.into_inner();
        let statuses: &[Status] = &Status::VISIBLE;

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM properties \
             WHERE id = $1::UUID \
               AND status = ANY($2::VARCHAR[]) \
             LIMIT 1",
        );
        Ok(self
            .query_opt(&sql, &[&id, &statuses])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(listing_from_row))
    }
}

impl<C> Database<Select<By<list::Page, list::Selector>>> for Postgres<C>
where
    C: Connection + Sync,
{
    type Ok = list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let pagination::Selector {
            arguments,
            filter:
                list::Filter {
                    country,
                    city,
                    postcode,
                    category,
                    min_price,
                    max_price,
                },
        } = by.into_inner();

        let statuses: &[Status] = &Status::VISIBLE;
        let city = city.as_ref().map(|c| LikePattern::contains(c.as_str()));
        let postcode =
            postcode.as_ref().map(|p| LikePattern::contains(p.as_str()));
        let offset = i64::try_from(arguments.offset()).unwrap_or(i64::MAX);
        let limit = i64::from(arguments.limit());

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&statuses];
        let mut conditions = vec!["status = ANY($1::VARCHAR[])".to_owned()];
        if let Some(country) = &country {
            ps.push(country);
            conditions.push(format!("country = ${}::VARCHAR", ps.len()));
        }
        if let Some(city) = &city {
            ps.push(city);
            conditions.push(format!("city ILIKE ${}::VARCHAR", ps.len()));
        }
        if let Some(postcode) = &postcode {
            ps.push(postcode);
            conditions.push(format!("postcode ILIKE ${}::VARCHAR", ps.len()));
        }
        if let Some(category) = &category {
            ps.push(category);
            conditions.push(format!("category = ${}::VARCHAR", ps.len()));
        }
        if let Some(min) = &min_price {
            ps.push(min);
            conditions.push(format!("price >= ${}::NUMERIC", ps.len()));
        }
        if let Some(max) = &max_price {
            ps.push(max);
            conditions.push(format!("price <= ${}::NUMERIC", ps.len()));
        }
        let filtering = conditions.iter().join(" AND ");
        let filter_params = ps.len();

        let count_sql = format!(
            "SELECT COUNT(*)::INT8 \
             FROM properties \
             WHERE {filtering}",
        );
        let total = self
            .query_one(&count_sql, &ps[..filter_params])
            .await
            .map_err(tracerr::wrap!())?
            .get::<_, i64>(0);

        ps.push(&offset);
        ps.push(&limit);
        let page_sql = format!(
            "SELECT {COLUMNS} \
             FROM properties \
             WHERE {filtering} \
             ORDER BY {ordering} \
             OFFSET ${offset_idx}::INT8 \
             LIMIT ${limit_idx}::INT8",
            ordering = ordering(list::ORDERING),
            offset_idx = filter_params + 1,
            limit_idx = filter_params + 2,
        );
        let items = self
            .query(&page_sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(listing_from_row)
            .collect::<Vec<_>>();

        Ok(list::Page::new(
            arguments,
            items,
            u64::try_from(total).unwrap_or_default(),
        ))
    }
}

impl<C> Database<Select<By<Vec<Listing>, section::Selector>>> for Postgres<C>
where
    C: Connection + Sync,
{
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

        let statuses: &[Status] = &Status::VISIBLE;
        let limit = i64::from(limit);

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&statuses, &limit];
        let mut conditions = vec!["status = ANY($1::VARCHAR[])".to_owned()];
        if let Some(category) = &category {
            ps.push(category);
            conditions.push(format!("category = ${}::VARCHAR", ps.len()));
        }
        if let Some(since) = &created_since {
            ps.push(since);
            conditions.push(format!("created_at >= ${}::TIMESTAMPTZ", ps.len()));
        }
        if section.is_featured_only() {
            conditions.push("featured".to_owned());
        }

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM properties \
             WHERE {filtering} \
             ORDER BY {ordering} \
             LIMIT $2::INT8",
            filtering = conditions.iter().join(" AND "),
            ordering = ordering(section.ordering()),
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(listing_from_row)
            .collect())
    }
}

/// Renders an `ORDER BY` clause body for the provided [`SortKey`]s.
fn ordering(keys: &[SortKey]) -> String {
    keys.iter()
        .map(|key| match key {
            SortKey::CreatedAt => "created_at",
            SortKey::Views => "views",
            SortKey::Inquiries => "inquiries",
            SortKey::Favorites => "favorites",
            SortKey::Featured => "featured",
        })
        .chain(["id"])
        .format_with(", ", |column, f| f(&format_args!("{column} DESC")))
        .to_string()
}

/// Builds a [`Listing`] out of the provided `properties` [`Row`].
fn listing_from_row(row: &Row) -> Listing {
    let counter = |column: &str| {
        u32::try_from(row.get::<_, i32>(column))
            .unwrap_or_else(|_| panic!("`{column}` is negative"))
    };

    Listing {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        address: row.get("address"),
        country: row.get("country"),
        city: row.get("city"),
        postcode: row.get("postcode"),
        category: row.get("category"),
        price: row.get("price"),
        status: row.get("status"),
        views: counter("views"),
        inquiries: counter("inquiries"),
        favorites: counter("favorites"),
        featured: row.get("featured"),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod spec {
    use crate::read::listing::{list, section::Section};

    use super::ordering;

    #[test]
    fn orders_by_id_last() {
        assert_eq!(ordering(list::ORDERING), "created_at DESC, id DESC");
        assert_eq!(
            ordering(Section::Discovery.ordering()),
            "featured DESC, views DESC, created_at DESC, id DESC",
        );
        assert_eq!(
            ordering(Section::HighDemand.ordering()),
            "inquiries DESC, favorites DESC, id DESC",
        );
    }
}
