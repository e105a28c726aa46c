//! Owner edits to an existing coupon.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Coupon, DiscountType};

/// A partial edit of a coupon's descriptive fields.
///
/// Identity, ownership, claim state, status and rating cannot be edited;
/// they only change through the dedicated store operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponUpdate {
    /// New headline.
    #[serde(default)]
    pub title: Option<String>,
    /// New store name.
    #[serde(default)]
    pub store: Option<String>,
    /// New category.
    #[serde(default)]
    pub category: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New discount value.
    #[serde(default)]
    pub discount_value: Option<String>,
    /// New discount type.
    #[serde(default)]
    pub discount_type: Option<DiscountType>,
    /// New expiry moment.
    #[serde(default, with = "crate::models::timestamp::option")]
    pub expiry_date: Option<DateTime<Utc>>,
    /// New redemption code.
    #[serde(default)]
    pub code: Option<String>,
    /// New picture URL.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CouponUpdate {
    /// Returns `true` when the patch changes nothing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrites the fields of `coupon` that this patch provides.
    #[inline]
    pub fn apply(self, coupon: &mut Coupon) {
        if let Some(title) = self.title {
            coupon.title = title;
        }
        if let Some(store) = self.store {
            coupon.store = store;
        }
        if let Some(category) = self.category {
            coupon.category = category;
        }
        if let Some(description) = self.description {
            coupon.description = description;
        }
        if let Some(discount_value) = self.discount_value {
            coupon.discount_value = discount_value;
        }
        if let Some(discount_type) = self.discount_type {
            coupon.discount_type = discount_type;
        }
        if let Some(expiry_date) = self.expiry_date {
            coupon.expiry_date = expiry_date;
        }
        if self.code.is_some() {
            coupon.code = self.code;
        }
        if self.image_url.is_some() {
            coupon.image_url = self.image_url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CouponId, CouponStatus};

    fn claimed_coupon() -> Coupon {
        Coupon {
            id: CouponId::new("c-1".to_owned()),
            title: "Old title".to_owned(),
            store: "Store".to_owned(),
            category: "Travel".to_owned(),
            discount_value: "15".to_owned(),
            discount_type: DiscountType::Percentage,
            expiry_date: DateTime::from_timestamp(2_000_000_000, 0).unwrap(),
            description: "Fifteen percent off hotels".to_owned(),
            code: None,
            image_url: None,
            posted_by: "alice".to_owned(),
            posted_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            claimed_by: Some("bob".to_owned()),
            claimed_at: DateTime::from_timestamp(1_750_000_000, 0),
            status: CouponStatus::Claimed,
            rating: 3.5,
            rating_count: 4,
        }
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(CouponUpdate::default().is_empty());
        let patch = CouponUpdate {
            title: Some("x".to_owned()),
            ..CouponUpdate::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn apply_overwrites_only_provided_fields() {
        let mut coupon = claimed_coupon();
        let original = coupon.clone();
        CouponUpdate {
            title: Some("New title".to_owned()),
            discount_type: Some(DiscountType::Fixed),
            code: Some("TRIP15".to_owned()),
            ..CouponUpdate::default()
        }
        .apply(&mut coupon);

        assert_eq!(coupon.title, "New title");
        assert_eq!(coupon.discount_type, DiscountType::Fixed);
        assert_eq!(coupon.code.as_deref(), Some("TRIP15"));
        assert_eq!(coupon.store, original.store);
        assert_eq!(coupon.description, original.description);
        assert_eq!(coupon.id, original.id);
        assert_eq!(coupon.posted_by, original.posted_by);
        assert_eq!(coupon.posted_at, original.posted_at);
        assert_eq!(coupon.claimed_by, original.claimed_by);
        assert_eq!(coupon.claimed_at, original.claimed_at);
        assert_eq!(coupon.status, original.status);
        assert_eq!(coupon.rating_count, original.rating_count);
    }

    #[test]
    fn deserialize_partial_patch() {
        let patch: CouponUpdate =
            serde_json::from_str(r#"{"description": "Now valid on flights too"}"#).unwrap();
        assert_eq!(
            patch.description.as_deref(),
            Some("Now valid on flights too")
        );
        assert!(patch.title.is_none());
        assert!(patch.expiry_date.is_none());
    }
}
