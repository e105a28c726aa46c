//! Coupon model and its state transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CouponId, CouponStatus, DiscountType};

/// A shareable discount offer.
///
/// `claimed_by` and `claimed_at` are populated if and only if the status
/// is [`CouponStatus::Claimed`]; the transition methods below keep that
/// pairing intact. Nothing ties `expiry_date` to the `Expired` status
/// until [`Coupon::expire_if_overdue`] runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Unique identifier, fixed at creation.
    pub id: CouponId,
    /// Short headline.
    pub title: String,
    /// Store or brand the coupon is redeemable at.
    pub store: String,
    /// One of [`super::COUPON_CATEGORIES`].
    pub category: String,
    /// Discount amount as entered (may be non-numeric for `other`).
    pub discount_value: String,
    /// How to read `discount_value`.
    pub discount_type: DiscountType,
    /// Moment the offer stops being valid.
    #[serde(with = "crate::models::timestamp")]
    pub expiry_date: DateTime<Utc>,
    /// Free-text details.
    pub description: String,
    /// Redemption code, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Picture URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Name of the user who posted the coupon.
    pub posted_by: String,
    /// Creation timestamp.
    #[serde(with = "crate::models::timestamp")]
    pub posted_at: DateTime<Utc>,
    /// Name of the current claimant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_by: Option<String>,
    /// When the current claim was made.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::models::timestamp::option"
    )]
    pub claimed_at: Option<DateTime<Utc>>,
    /// Lifecycle status.
    pub status: CouponStatus,
    /// Running mean of all ratings, one decimal.
    #[serde(default)]
    pub rating: f64,
    /// Number of ratings folded into `rating`.
    #[serde(default)]
    pub rating_count: u32,
}

impl Coupon {
    /// Numeric reading of `discount_value`, used for range filters and
    /// sorting. Unparsable values read as `0`.
    #[inline]
    #[must_use]
    pub fn discount_amount(&self) -> f64 {
        parse_discount(&self.discount_value)
    }

    /// Marks the coupon as claimed by `claimant` at `now`.
    ///
    /// Returns `false` and leaves the coupon untouched unless it is
    /// currently available. Self-claims are not rejected here; see
    /// [`Coupon::can_claim`].
    #[inline]
    pub fn claim(&mut self, claimant: &str, now: DateTime<Utc>) -> bool {
        if self.status != CouponStatus::Available {
            return false;
        }
        self.status = CouponStatus::Claimed;
        self.claimed_by = Some(claimant.to_owned());
        self.claimed_at = Some(now);
        true
    }

    /// Returns a claimed coupon to the available pool.
    ///
    /// Returns `false` and leaves the coupon untouched unless it is
    /// currently claimed. Does not check who is releasing it.
    #[inline]
    pub fn release(&mut self) -> bool {
        if self.status != CouponStatus::Claimed {
            return false;
        }
        self.status = CouponStatus::Available;
        self.claimed_by = None;
        self.claimed_at = None;
        true
    }

    /// Folds one more rating into the running mean, rounded to one
    /// decimal place.
    #[inline]
    pub fn apply_rating(&mut self, rating: u8) {
        let count = f64::from(self.rating_count);
        let mean = self.rating.mul_add(count, f64::from(rating)) / (count + 1.0_f64);
        self.rating = (mean * 10.0_f64).round() / 10.0_f64;
        self.rating_count = self.rating_count.saturating_add(1);
    }

    /// Whether the expiry date lies strictly before `now`.
    #[inline]
    #[must_use]
    pub fn is_past_expiry(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date < now
    }

    /// Sets the status to `Expired` if the expiry date has passed and the
    /// coupon is not already expired. Returns whether anything changed.
    ///
    /// Claim fields are left as they are, matching the sweep semantics.
    #[inline]
    pub fn expire_if_overdue(&mut self, now: DateTime<Utc>) -> bool {
        if self.status == CouponStatus::Expired || !self.is_past_expiry(now) {
            return false;
        }
        self.status = CouponStatus::Expired;
        true
    }

    /// Whether `user` posted this coupon.
    #[inline]
    #[must_use]
    pub fn is_owned_by(&self, user: &str) -> bool {
        self.posted_by == user
    }

    /// Whether `user` may claim the coupon: it is available, not past
    /// its expiry date, and not their own.
    #[inline]
    #[must_use]
    pub fn can_claim(&self, user: &str, now: DateTime<Utc>) -> bool {
        !self.is_owned_by(user)
            && self.status == CouponStatus::Available
            && !self.is_past_expiry(now)
    }

    /// Whether `user` may release the coupon: only its current claimant can.
    #[inline]
    #[must_use]
    pub fn can_unclaim(&self, user: &str) -> bool {
        self.status == CouponStatus::Claimed && self.claimed_by.as_deref() == Some(user)
    }
}

/// Literal read as an unbounded discount, optionally signed.
const INFINITY: &str = "Infinity";

/// Reads the leading decimal number of `raw`, ignoring leading
/// whitespace and any trailing text (`"20% off"` reads as `20`).
/// A leading `Infinity` (case-sensitive) reads as infinite.
///
/// Returns `0` when there is no leading number.
fn parse_discount(raw: &str) -> f64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let negative = bytes.first() == Some(&b'-');
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if text.get(end..).is_some_and(|rest| rest.starts_with(INFINITY)) {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut cursor = frac_start;
        while bytes.get(cursor).is_some_and(u8::is_ascii_digit) {
            cursor += 1;
        }
        digits += cursor - frac_start;
        end = cursor;
    }
    if digits == 0 {
        return 0.0_f64;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut cursor = end + 1;
        if matches!(bytes.get(cursor), Some(b'+' | b'-')) {
            cursor += 1;
        }
        let exp_start = cursor;
        while bytes.get(cursor).is_some_and(u8::is_ascii_digit) {
            cursor += 1;
        }
        if cursor > exp_start {
            end = cursor;
        }
    }

    text.get(..end)
        .and_then(|number| number.parse::<f64>().ok())
        .unwrap_or(0.0_f64)
}
