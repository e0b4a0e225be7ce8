use std::time::Duration;

use common::{
    operations::{By, Select},
    pagination::Arguments,
};
use service::{
    domain::{
        listing::{self, Category, City, Country, CreationDateTime, Status},
        Listing,
    },
    infra::{database, Database, Memory},
    query::{
        listing::ById,
        listings::{AllSections, List, Section},
        Health,
    },
    read::{
        health::Backend,
        listing::{
            list::{self, SearchText},
            section,
        },
    },
    Config, Service,
};
use tracerr::Traced;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

fn listing(title: &str, category: Category, age: Duration) -> Listing {
    Listing {
        id: listing::Id::new(),
        title: listing::Title::new(title).unwrap(),
        description: None,
        address: None,
        country: Country::new("United Kingdom").unwrap(),
        city: City::new("London").unwrap(),
        postcode: None,
        category,
        price: "1000".parse().unwrap(),
        status: Status::Online,
        views: 0,
        inquiries: 0,
        favorites: 0,
        featured: false,
        created_at: CreationDateTime::now() - age,
    }
}

fn service(listings: impl IntoIterator<Item = Listing>) -> Service<Memory> {
    Service::new(Config::default(), Some(listings.into_iter().collect()))
}

fn selector(
    page: i64,
    limit: i64,
    filter: list::Filter,
) -> list::Selector {
    list::Selector {
        arguments: Arguments::new(Some(page), Some(limit), list::LIMITS),
        filter,
    }
}

fn titles(listings: &[Listing]) -> Vec<&str> {
    listings.iter().map(|l| l.title.as_ref()).collect()
}

#[tokio::test]
async fn paginates_filtered_by_category() {
    let service = service([
        listing("rent-1", Category::Rent, DAY),
        listing("sale-1", Category::Sale, DAY * 2),
        listing("rent-2", Category::Rent, DAY * 3),
        listing("sale-2", Category::Sale, DAY * 4),
        listing("rent-3", Category::Rent, DAY * 5),
    ]);
    let filter = list::Filter {
        category: Some(Category::Rent),
        ..list::Filter::default()
    };

    let page = service
        .execute(List::by(selector(1, 2, filter)))
        .await
        .unwrap();

    assert_eq!(titles(&page.items), ["rent-1", "rent-2"]);
    let info = page.page_info();
    assert_eq!(info.page, 1);
    assert_eq!(info.limit, 2);
    assert_eq!(info.total, 3);
    assert_eq!(info.total_pages, 2);
    assert!(info.has_next_page);
    assert!(!info.has_previous_page);
}

#[tokio::test]
async fn total_is_same_on_every_page() {
    let service = service(
        (0..7_u32)
            .map(|n| listing(&format!("l-{n}"), Category::Sale, DAY * n)),
    );

    let mut seen = Vec::new();
    for p in 1..=4 {
        let page = service
            .execute(List::by(selector(p, 3, list::Filter::default())))
            .await
            .unwrap();
        assert_eq!(page.total, 7, "page: {p}");
        let info = page.page_info();
        assert_eq!(info.has_next_page, u64::from(info.page) < 3, "page: {p}");
        seen.extend(page.items.into_iter().map(|l| l.title.to_string()));
    }

    assert_eq!(seen, ["l-0", "l-1", "l-2", "l-3", "l-4", "l-5", "l-6"]);
}

#[tokio::test]
async fn excludes_invisible_listings() {
    let hidden = [Status::Draft, Status::Offline, Status::Sold]
        .into_iter()
        .map(|status| Listing {
            status,
            ..listing("hidden", Category::Sale, DAY)
        });
    let active = Listing {
        status: Status::Active,
        ..listing("active", Category::Sale, DAY * 2)
    };
    let hidden_id = Listing {
        status: Status::Sold,
        ..listing("sold", Category::Sale, DAY)
    };
    let sold = hidden_id.id;
    let service = service(
        hidden
            .chain([active, listing("online", Category::Rent, DAY * 3)])
            .chain([hidden_id]),
    );

    let page = service
        .execute(List::by(selector(1, 100, list::Filter::default())))
        .await
        .unwrap();
    assert_eq!(titles(&page.items), ["active", "online"]);
    assert_eq!(page.total, 2);

    let sections = service
        .execute(AllSections {
            category: None,
            limit: 20,
        })
        .await
        .unwrap();
    assert_eq!(sections.discovery.len(), 2);
    assert!(sections.most_viewed.iter().all(Listing::is_visible));

    assert!(service.execute(ById::by(sold)).await.unwrap().is_none());
}

#[tokio::test]
async fn filters_by_location_and_price() {
    let service = service([
        Listing {
            city: City::new("Manchester").unwrap(),
            postcode: listing::Postcode::new("M1 1AE"),
            price: "250000".parse().unwrap(),
            ..listing("manchester", Category::Sale, DAY)
        },
        Listing {
            country: Country::new("Ireland").unwrap(),
            city: City::new("Dublin").unwrap(),
            price: "300000".parse().unwrap(),
            ..listing("dublin", Category::Sale, DAY * 2)
        },
        Listing {
            postcode: listing::Postcode::new("SW1A 1AA"),
            price: "500000".parse().unwrap(),
            ..listing("london", Category::Sale, DAY * 3)
        },
    ]);
    let find = |filter: list::Filter| {
        let service = &service;
        async move {
            let page = service
                .execute(List::by(selector(1, 20, filter)))
                .await
                .unwrap();
            page.items
                .into_iter()
                .map(|l| l.title.to_string())
                .collect::<Vec<_>>()
        }
    };

    assert_eq!(
        find(list::Filter {
            city: SearchText::new("CHESTER"),
            ..list::Filter::default()
        })
        .await,
        ["manchester"],
    );
    assert_eq!(
        find(list::Filter {
            country: SearchText::new("Ireland"),
            ..list::Filter::default()
        })
        .await,
        ["dublin"],
    );
    assert_eq!(
        find(list::Filter {
            postcode: SearchText::new("sw1a"),
            ..list::Filter::default()
        })
        .await,
        ["london"],
    );
    assert_eq!(
        find(list::Filter {
            min_price: Some("250000".parse().unwrap()),
            max_price: Some("300000".parse().unwrap()),
            ..list::Filter::default()
        })
        .await,
        ["manchester", "dublin"],
    );
}

#[tokio::test]
async fn overlong_filters_match_nothing() {
    let service = service([Listing {
        postcode: listing::Postcode::new("SW1A 1AA"),
        ..listing("london", Category::Sale, DAY)
    }]);
    let find = |filter: list::Filter| {
        let service = &service;
        async move {
            service
                .execute(List::by(selector(1, 20, filter)))
                .await
                .unwrap()
        }
    };

    let by_postcode = find(list::Filter {
        postcode: SearchText::new("SW1A 1AA LONDON UNITED KINGDOM GB"),
        ..list::Filter::default()
    })
    .await;
    assert!(by_postcode.items.is_empty());
    assert_eq!(by_postcode.total, 0);

    let by_country = find(list::Filter {
        country: SearchText::new(&"X".repeat(600)),
        ..list::Filter::default()
    })
    .await;
    assert!(by_country.items.is_empty());
    assert_eq!(by_country.total, 0);
}

#[tokio::test]
async fn identical_requests_give_identical_results() {
    let at = CreationDateTime::now();
    let service = service((0..5_u32).map(|n| Listing {
        created_at: at,
        ..listing(&format!("same-{n}"), Category::Rent, DAY)
    }));

    let first = service
        .execute(List::by(selector(1, 3, list::Filter::default())))
        .await
        .unwrap();
    let second = service
        .execute(List::by(selector(1, 3, list::Filter::default())))
        .await
        .unwrap();

    assert_eq!(
        first.items.iter().map(|l| l.id).collect::<Vec<_>>(),
        second.items.iter().map(|l| l.id).collect::<Vec<_>>(),
    );
    assert_eq!(first.page_info(), second.page_info());
}

#[tokio::test]
async fn trending_excludes_old_listings() {
    let service = service([
        Listing {
            views: 10,
            ..listing("fresh", Category::Sale, DAY)
        },
        Listing {
            views: 1_000,
            ..listing("old", Category::Sale, DAY * 8)
        },
        Listing {
            views: 50,
            ..listing("recent", Category::Sale, DAY * 6)
        },
    ]);

    let trending = service
        .execute(Section {
            section: section::Section::Trending,
            category: None,
            limit: 6,
        })
        .await
        .unwrap();

    assert_eq!(titles(&trending), ["recent", "fresh"]);
}

#[tokio::test]
async fn orders_sections() {
    use section::Section as S;

    let service = service([
        Listing {
            views: 5,
            inquiries: 3,
            favorites: 1,
            ..listing("a", Category::Sale, DAY)
        },
        Listing {
            views: 50,
            inquiries: 3,
            favorites: 9,
            featured: true,
            ..listing("b", Category::Rent, DAY * 2)
        },
        Listing {
            views: 20,
            inquiries: 7,
            featured: true,
            ..listing("c", Category::Sale, DAY * 3)
        },
        Listing {
            views: 100,
            ..listing("d", Category::Rent, DAY * 4)
        },
    ]);
    let select = |s: S, category: Option<Category>| {
        let service = &service;
        async move {
            let found = service
                .execute(Section {
                    section: s,
                    category,
                    limit: 6,
                })
                .await
                .unwrap();
            found
                .into_iter()
                .map(|l| l.title.to_string())
                .collect::<Vec<_>>()
        }
    };

    assert_eq!(select(S::MostViewed, None).await, ["d", "b", "c", "a"]);
    assert_eq!(select(S::RecentlyAdded, None).await, ["a", "b", "c", "d"]);
    assert_eq!(select(S::HighDemand, None).await, ["c", "b", "a", "d"]);
    assert_eq!(select(S::Featured, None).await, ["b", "c"]);
    assert_eq!(select(S::Discovery, None).await, ["b", "c", "d", "a"]);
    assert_eq!(
        select(S::MostViewed, Some(Category::Sale)).await,
        ["c", "a"],
    );
}

#[tokio::test]
async fn section_respects_limit() {
    let service = service(
        (0..30_u32)
            .map(|n| listing(&format!("l-{n}"), Category::Sale, DAY * n)),
    );

    let found = service
        .execute(Section {
            section: section::Section::RecentlyAdded,
            category: None,
            limit: section::LIMITS.clamp(Some(1_000)),
        })
        .await
        .unwrap();

    assert_eq!(found.len(), 20);
}

#[tokio::test]
async fn discovery_feed_has_fixed_size() {
    let service = service(
        (0..12_u32)
            .map(|n| listing(&format!("l-{n}"), Category::Rent, DAY * n)),
    );

    let sections = service
        .execute(AllSections {
            category: None,
            limit: 2,
        })
        .await
        .unwrap();

    assert_eq!(sections.most_viewed.len(), 2);
    assert_eq!(sections.recently_added.len(), 2);
    assert_eq!(sections.trending.len(), 2);
    assert_eq!(sections.discovery.len(), 8);
}

#[tokio::test]
async fn finds_by_id() {
    let target = listing("target", Category::Rent, DAY);
    let id = target.id;
    let service = service([listing("other", Category::Rent, DAY), target]);

    let found = service.execute(ById::by(id)).await.unwrap();
    assert_eq!(found.map(|l| l.id), Some(id));

    let missing = service.execute(ById::by(listing::Id::new())).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn fails_without_database() {
    let service = Service::<Memory>::new(Config::default(), None);

    let err = service
        .execute(List::by(selector(1, 20, list::Filter::default())))
        .await
        .unwrap_err();
    assert!(matches!(err.as_ref(), database::Error::NotConfigured));

    let sections = service
        .execute(AllSections {
            category: None,
            limit: 6,
        })
        .await
        .unwrap();
    assert!(sections.most_viewed.is_empty());
    assert!(sections.trending.is_empty());
    assert!(sections.recently_added.is_empty());
    assert!(sections.high_demand.is_empty());
    assert!(sections.featured.is_empty());
    assert!(sections.discovery.is_empty());
}

/// [`Memory`] failing to select the trending section.
#[derive(Clone, Debug)]
struct Flaky(Memory);

impl Database<Select<By<Vec<Listing>, section::Selector>>> for Flaky {
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        op: Select<By<Vec<Listing>, section::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        if op.0.inner().section == section::Section::Trending {
            return Err(tracerr::new!(database::Error::NotConfigured));
        }
        self.0.execute(op).await
    }
}

#[tokio::test]
async fn failed_section_does_not_fail_others() {
    let memory = [
        Listing {
            views: 3,
            ..listing("a", Category::Sale, DAY)
        },
        listing("b", Category::Rent, DAY * 2),
    ]
    .into_iter()
    .collect();
    let service = Service::new(Config::default(), Some(Flaky(memory)));

    let sections = service
        .execute(AllSections {
            category: None,
            limit: 6,
        })
        .await
        .unwrap();

    assert!(sections.trending.is_empty());
    assert_eq!(titles(&sections.most_viewed), ["a", "b"]);
    assert_eq!(titles(&sections.recently_added), ["a", "b"]);
    assert_eq!(sections.discovery.len(), 2);
}

#[tokio::test]
async fn reports_backend_health() {
    let unknown = Service::<Memory>::new(Config::default(), None)
        .execute(Health)
        .await
        .unwrap();
    assert_eq!(unknown, Backend::Unknown);
    assert!(!unknown.is_connected());

    let connected = service([]).execute(Health).await.unwrap();
    assert_eq!(connected, Backend::Connected);
}
