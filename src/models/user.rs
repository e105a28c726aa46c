//! Community member model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CouponId, UserId};

/// A registered community member.
///
/// The users collection is persisted alongside coupons but no store
/// operation reads it yet; coupon ownership is tracked by name in
/// [`super::Coupon::posted_by`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Display name.
    pub username: String,
    /// Contact address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Registration timestamp.
    #[serde(with = "crate::models::timestamp")]
    pub joined_at: DateTime<Utc>,
    /// Coupons this user has posted.
    #[serde(default)]
    pub posted_coupons: Vec<CouponId>,
    /// Coupons this user has claimed.
    #[serde(default)]
    pub claimed_coupons: Vec<CouponId>,
    /// Reputation score.
    #[serde(default)]
    pub rating: f64,
}
