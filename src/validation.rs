//! Field checks applied by callers before records reach the store.
//!
//! Every function returns the list of human-readable violations; an empty
//! list means the input is acceptable. None of them fail.

use chrono::{DateTime, Utc};

use crate::models::{COUPON_CATEGORIES, NewCoupon};

/// Minimum trimmed title length.
const MIN_TITLE_LEN: usize = 3;
/// Minimum trimmed store name length.
const MIN_STORE_LEN: usize = 2;
/// Minimum trimmed description length.
const MIN_DESCRIPTION_LEN: usize = 10;
/// Minimum trimmed poster name length.
const MIN_POSTED_BY_LEN: usize = 2;
/// Lowest accepted rating.
const MIN_RATING: u8 = 1;
/// Highest accepted rating.
const MAX_RATING: u8 = 5;

/// Checks a coupon submission.
///
/// `now` is the reference point for the expiry check; the expiry date
/// must lie strictly after it.
#[inline]
#[must_use]
pub fn validate_new_coupon(new: &NewCoupon, now: DateTime<Utc>) -> Vec<String> {
    let mut errors = Vec::new();

    if trimmed_len(&new.title) < MIN_TITLE_LEN {
        errors.push(format!(
            "Title must be at least {MIN_TITLE_LEN} characters long"
        ));
    }
    if trimmed_len(&new.store) < MIN_STORE_LEN {
        errors.push(format!(
            "Store name must be at least {MIN_STORE_LEN} characters long"
        ));
    }
    if new.category.is_empty() {
        errors.push("Category is required".to_owned());
    } else if !COUPON_CATEGORIES.contains(&new.category.as_str()) {
        errors.push(format!(
            "Category must be one of: {}",
            COUPON_CATEGORIES.join(", ")
        ));
    }
    if new.discount_value.trim().is_empty() {
        errors.push("Discount value is required".to_owned());
    }
    if new.expiry_date <= now {
        errors.push("Expiry date must be in the future".to_owned());
    }
    if trimmed_len(&new.description) < MIN_DESCRIPTION_LEN {
        errors.push(format!(
            "Description must be at least {MIN_DESCRIPTION_LEN} characters long"
        ));
    }
    if trimmed_len(&new.posted_by) < MIN_POSTED_BY_LEN {
        errors.push("Posted by field is required".to_owned());
    }

    errors
}

/// Checks a star rating.
#[inline]
#[must_use]
pub fn validate_rating(rating: u8) -> Vec<String> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Vec::new()
    } else {
        vec![format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )]
    }
}

/// Length in characters after trimming surrounding whitespace.
fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}
