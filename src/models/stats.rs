//! Aggregate coupon counts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Coupon, CouponStatus};

/// Tallies over a whole coupon collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponStats {
    /// Number of coupons of any status.
    pub total: usize,
    /// Coupons with status `available`.
    pub available: usize,
    /// Coupons with status `claimed`.
    pub claimed: usize,
    /// Coupons with status `expired`.
    pub expired: usize,
    /// Count per observed category. Categories without coupons are absent.
    pub category_counts: BTreeMap<String, usize>,
}

impl CouponStats {
    /// Computes the tallies for `coupons`.
    #[inline]
    #[must_use]
    pub fn from_coupons(coupons: &[Coupon]) -> Self {
        let mut stats = Self {
            total: coupons.len(),
            ..Self::default()
        };
        for coupon in coupons {
            match coupon.status {
                CouponStatus::Available => stats.available += 1,
                CouponStatus::Claimed => stats.claimed += 1,
                CouponStatus::Expired => stats.expired += 1,
            }
            *stats
                .category_counts
                .entry(coupon.category.clone())
                .or_insert(0) += 1;
        }
        stats
    }
}
