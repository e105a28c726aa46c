//! Submission payload for posting a coupon.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Coupon, CouponId, CouponStatus, DiscountType};

/// Fields a user supplies when posting a coupon.
///
/// Run it through [`crate::validation::validate_new_coupon`] before
/// turning it into a [`Coupon`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCoupon {
    /// Short headline.
    pub title: String,
    /// Store or brand.
    pub store: String,
    /// Category name.
    pub category: String,
    /// Discount amount as entered.
    pub discount_value: String,
    /// How to read the discount value.
    pub discount_type: DiscountType,
    /// Expiry moment.
    #[serde(with = "crate::models::timestamp")]
    pub expiry_date: DateTime<Utc>,
    /// Free-text details.
    pub description: String,
    /// Optional redemption code.
    #[serde(default)]
    pub code: Option<String>,
    /// Optional picture URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Name of the posting user.
    pub posted_by: String,
}

impl NewCoupon {
    /// Builds a fresh, available, unrated coupon from this submission.
    ///
    /// Text fields are trimmed; a code that is blank after trimming is
    /// dropped.
    #[inline]
    #[must_use]
    pub fn into_coupon(self, id: CouponId, now: DateTime<Utc>) -> Coupon {
        Coupon {
            id,
            title: self.title.trim().to_owned(),
            store: self.store.trim().to_owned(),
            category: self.category,
            discount_value: self.discount_value.trim().to_owned(),
            discount_type: self.discount_type,
            expiry_date: self.expiry_date,
            description: self.description.trim().to_owned(),
            code: self
                .code
                .map(|code| code.trim().to_owned())
                .filter(|code| !code.is_empty()),
            image_url: self.image_url.filter(|url| !url.is_empty()),
            posted_by: self.posted_by.trim().to_owned(),
            posted_at: now,
            claimed_by: None,
            claimed_at: None,
            status: CouponStatus::Available,
            rating: 0.0_f64,
            rating_count: 0,
        }
    }
}
