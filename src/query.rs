//! Composable filter and sort criteria for browsing coupons.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use crate::models::{Coupon, CouponStatus};

/// Filter value meaning "do not filter on this field".
pub const ALL: &str = "all";

/// Which statuses a query admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every status.
    All,
    /// Exactly one status.
    Only(CouponStatus),
}

impl Default for StatusFilter {
    /// Browsing shows available coupons unless asked otherwise.
    #[inline]
    fn default() -> Self {
        Self::Only(CouponStatus::Available)
    }
}

impl StatusFilter {
    /// Returns `true` if `status` passes the filter.
    #[inline]
    #[must_use]
    pub fn admits(self, status: CouponStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::All => f.write_str(ALL),
            Self::Only(status) => fmt::Display::fmt(&status, f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Most recently posted first.
    #[default]
    Newest,
    /// Soonest expiry first.
    Expiry,
    /// Largest numeric discount first.
    Discount,
    /// Highest rating first.
    Rating,
}

impl SortBy {
    /// Reads a sort key; anything unrecognised sorts by [`SortBy::Newest`].
    #[inline]
    #[must_use]
    pub fn from_param(raw: &str) -> Self {
        match raw {
            "expiry" => Self::Expiry,
            "discount" => Self::Discount,
            "rating" => Self::Rating,
            _ => Self::Newest,
        }
    }

    /// Returns the wire name of the sort key.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Expiry => "expiry",
            Self::Discount => "discount",
            Self::Rating => "rating",
        }
    }

    /// Compares two coupons under this ordering.
    #[inline]
    #[must_use]
    pub fn compare(self, left: &Coupon, right: &Coupon) -> Ordering {
        match self {
            Self::Newest => right.posted_at.cmp(&left.posted_at),
            Self::Expiry => left.expiry_date.cmp(&right.expiry_date),
            Self::Discount => right.discount_amount().total_cmp(&left.discount_amount()),
            Self::Rating => right.rating.total_cmp(&left.rating),
        }
    }
}

/// Composable criteria for querying coupons.
///
/// Use builder-style methods to chain criteria. All set criteria must
/// hold for a coupon to pass, except that the text search succeeds when
/// any one of title, store or description contains the term.
///
/// # Examples
///
/// ```
/// use coupon_share::query::{CouponQuery, SortBy, StatusFilter};
///
/// let query = CouponQuery::new()
///     .status(StatusFilter::All)
///     .search("pizza")
///     .category("Food & Dining")
///     .discount_range(10.0, 50.0)
///     .sort_by(SortBy::Discount);
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CouponQuery {
    /// Status restriction (defaults to available only).
    pub status: StatusFilter,
    /// Case-insensitive substring over title, store and description.
    pub search: Option<String>,
    /// Exact category; `"all"` disables the filter.
    pub category: Option<String>,
    /// Case-insensitive store substring; `"all"` disables the filter.
    pub store: Option<String>,
    /// Lower bound on the numeric discount (inclusive).
    pub min_discount: Option<f64>,
    /// Upper bound on the numeric discount (inclusive).
    pub max_discount: Option<f64>,
    /// Result ordering.
    pub sort_by: SortBy,
}

impl CouponQuery {
    /// Creates a query for available coupons, newest first.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status restriction.
    #[inline]
    #[must_use]
    pub const fn status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Restricts to coupons whose title, store or description contains
    /// `term` (case-insensitive).
    #[inline]
    #[must_use]
    pub fn search<T: Into<String>>(mut self, term: T) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restricts to one category.
    #[inline]
    #[must_use]
    pub fn category<T: Into<String>>(mut self, category: T) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restricts to stores whose name contains `store` (case-insensitive).
    #[inline]
    #[must_use]
    pub fn store<T: Into<String>>(mut self, store: T) -> Self {
        self.store = Some(store.into());
        self
    }

    /// Restricts to numeric discounts within `[min, max]`.
    #[inline]
    #[must_use]
    pub const fn discount_range(self, min: f64, max: f64) -> Self {
        self.min_discount(min).max_discount(max)
    }

    /// Restricts to numeric discounts of at least `min`.
    #[inline]
    #[must_use]
    pub const fn min_discount(mut self, min: f64) -> Self {
        self.min_discount = Some(min);
        self
    }

    /// Restricts to numeric discounts of at most `max`.
    #[inline]
    #[must_use]
    pub const fn max_discount(mut self, max: f64) -> Self {
        self.max_discount = Some(max);
        self
    }

    /// Sets the result ordering.
    #[inline]
    #[must_use]
    pub const fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Filters and sorts `coupons` according to this query.
    #[inline]
    #[must_use]
    pub fn apply(&self, coupons: Vec<Coupon>) -> Vec<Coupon> {
        let mut matching: Vec<Coupon> = coupons
            .into_iter()
            .filter(|coupon| self.matches(coupon))
            .collect();
        let order = self.sort_by;
        matching.sort_by(|left, right| order.compare(left, right));
        matching
    }

    /// Returns `true` if the coupon satisfies all set criteria.
    #[inline]
    #[must_use]
    pub fn matches(&self, coupon: &Coupon) -> bool {
        self.status.admits(coupon.status)
            && self.matches_search(coupon)
            && self.matches_category(coupon)
            && self.matches_store(coupon)
            && self.matches_discount(coupon)
    }

    /// Checks the free-text search.
    fn matches_search(&self, coupon: &Coupon) -> bool {
        self.search
            .as_deref()
            .filter(|term| !term.is_empty())
            .is_none_or(|term| {
                let term = term.to_lowercase();
                [&coupon.title, &coupon.store, &coupon.description]
                    .into_iter()
                    .any(|field| field.to_lowercase().contains(&term))
            })
    }

    /// Checks the category criterion.
    fn matches_category(&self, coupon: &Coupon) -> bool {
        active(self.category.as_deref()).is_none_or(|category| coupon.category == category)
    }

    /// Checks the store criterion.
    fn matches_store(&self, coupon: &Coupon) -> bool {
        active(self.store.as_deref()).is_none_or(|store| {
            coupon
                .store
                .to_lowercase()
                .contains(&store.to_lowercase())
        })
    }

    /// Checks the discount range; only applied when a bound is set.
    fn matches_discount(&self, coupon: &Coupon) -> bool {
        if self.min_discount.is_none() && self.max_discount.is_none() {
            return true;
        }
        let min = self.min_discount.unwrap_or(0.0_f64);
        let max = self.max_discount.unwrap_or(f64::INFINITY);
        let amount = coupon.discount_amount();
        min <= amount && amount <= max
    }
}

/// Returns the filter value unless it is absent, empty or [`ALL`].
fn active(value: Option<&str>) -> Option<&str> {
    value.filter(|inner| !inner.is_empty() && *inner != ALL)
}
