//! Abstractions for offset pagination.

/// Bounds applied to a requested page size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Limits {
    /// Page size used when none (or a non-positive one) is requested.
    pub default: u32,

    /// Maximum allowed page size.
    pub max: u32,
}

impl Limits {
    /// Clamps the `requested` page size into these [`Limits`].
    #[must_use]
    pub fn clamp(&self, requested: Option<i64>) -> u32 {
        match requested {
            Some(n) if n > 0 => {
                u32::try_from(n).map_or(self.max, |n| n.min(self.max))
            }
            Some(_) | None => self.default.min(self.max),
        }
    }
}

/// Pagination arguments.
///
/// Pages are numbered from `1`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Arguments {
    /// Number of the requested page.
    page: u32,

    /// Number of items on a page.
    limit: u32,
}

impl Arguments {
    /// Creates new [`Arguments`] out of the requested `page` and `limit`.
    ///
    /// A missing or non-positive `page` falls back to the first one, while
    /// the `limit` is clamped into the provided [`Limits`].
    #[must_use]
    pub fn new(page: Option<i64>, limit: Option<i64>, limits: Limits) -> Self {
        let page = match page {
            Some(p) if p > 0 => u32::try_from(p).unwrap_or(u32::MAX),
            Some(_) | None => 1,
        };
        Self {
            page,
            limit: limits.clamp(limit),
        }
    }

    /// Returns the requested page number.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the number of items on a page.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the number of items to skip before the requested page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// A page of items.
#[derive(Clone, Debug)]
pub struct Page<I> {
    /// Items on this [`Page`].
    pub items: Vec<I>,

    /// Total number of items across all pages.
    pub total: u64,

    /// [`Arguments`] this [`Page`] was selected with.
    pub arguments: Arguments,
}

impl<I> Page<I> {
    /// Creates a new [`Page`].
    #[must_use]
    pub fn new(
        arguments: Arguments,
        items: impl IntoIterator<Item = impl Into<I>>,
        total: u64,
    ) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            total,
            arguments,
        }
    }

    /// Returns [`PageInfo`] of this [`Page`].
    #[must_use]
    pub fn page_info(&self) -> PageInfo {
        let page = self.arguments.page();
        let limit = self.arguments.limit();
        let total_pages = self.total.div_ceil(u64::from(limit.max(1)));
        PageInfo {
            page,
            limit,
            total: self.total,
            total_pages,
            has_next_page: u64::from(page) < total_pages,
            has_previous_page: page > 1,
        }
    }

    /// Maps items of this [`Page`] with the provided function.
    #[must_use]
    pub fn map<T>(self, f: impl FnMut(I) -> T) -> Page<T> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            arguments: self.arguments,
        }
    }
}

/// Information about a [`Page`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageInfo {
    /// Number of the page.
    pub page: u32,

    /// Maximum number of items on the page.
    pub limit: u32,

    /// Total number of items across all pages.
    pub total: u64,

    /// Total number of pages.
    pub total_pages: u64,

    /// Indicator whether there is a page after this one.
    pub has_next_page: bool,

    /// Indicator whether there is a page before this one.
    pub has_previous_page: bool,
}

/// Pagination selector.
#[derive(Clone, Debug)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        #[doc = "A [`Page`] of [`$node`]s."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "An information about a [`Page`]."]
        pub type PageInfo = $crate::pagination::PageInfo;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter>;
    };
}

#[cfg(test)]
mod spec {
    use super::{Arguments, Limits, Page};

    const LIMITS: Limits = Limits {
        default: 20,
        max: 100,
    };

    #[test]
    fn defaults_page_and_limit() {
        let args = Arguments::new(None, None, LIMITS);

        assert_eq!(args.page(), 1);
        assert_eq!(args.limit(), 20);
        assert_eq!(args.offset(), 0);
    }

    #[test]
    fn clamps_limit() {
        for requested in [101, 1_000, i64::MAX] {
            assert_eq!(
                Arguments::new(None, Some(requested), LIMITS).limit(),
                100,
                "requested: {requested}",
            );
        }
        assert_eq!(Arguments::new(None, Some(100), LIMITS).limit(), 100);
        assert_eq!(Arguments::new(None, Some(1), LIMITS).limit(), 1);
        assert_eq!(Arguments::new(None, Some(0), LIMITS).limit(), 20);
        assert_eq!(Arguments::new(None, Some(-5), LIMITS).limit(), 20);
    }

    #[test]
    fn non_positive_page_is_first() {
        assert_eq!(Arguments::new(Some(0), None, LIMITS).page(), 1);
        assert_eq!(Arguments::new(Some(-3), None, LIMITS).page(), 1);
    }

    #[test]
    fn offset_is_zero_indexed() {
        let args = Arguments::new(Some(3), Some(10), LIMITS);

        assert_eq!(args.offset(), 20);
    }

    #[test]
    fn page_info() {
        let page = |p, total| {
            Page::<u8>::new(
                Arguments::new(Some(p), Some(2), LIMITS),
                Vec::<u8>::new(),
                total,
            )
            .page_info()
        };

        let first = page(1, 3);
        assert_eq!(first.total_pages, 2);
        assert!(first.has_next_page);
        assert!(!first.has_previous_page);

        let last = page(2, 3);
        assert_eq!(last.total_pages, 2);
        assert!(!last.has_next_page);
        assert!(last.has_previous_page);

        let empty = page(1, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next_page);
        assert!(!empty.has_previous_page);

        let beyond = page(5, 3);
        assert!(!beyond.has_next_page);
        assert!(beyond.has_previous_page);
    }

    #[test]
    fn has_next_page_iff_before_last() {
        for total in 0..12 {
            for p in 1..8 {
                let info = Page::<u8>::new(
                    Arguments::new(Some(p), Some(3), LIMITS),
                    Vec::<u8>::new(),
                    total,
                )
                .page_info();
                assert_eq!(info.total, total);
                assert_eq!(
                    info.has_next_page,
                    u64::from(info.page) < info.total_pages,
                );
            }
        }
    }
}
