//! Newtype wrappers for entity identifiers.
//!
//! These prevent accidentally mixing up coupon and user IDs at compile
//! time.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix shared by every generated coupon identifier.
const COUPON_ID_PREFIX: &str = "coupon_";

/// Number of random characters appended to a generated coupon identifier.
const COUPON_ID_SUFFIX_LEN: usize = 9;

/// Macro to define a newtype ID wrapping a `String` inner type.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from the given string.
            #[inline]
            #[must_use]
            pub const fn new(value: String) -> Self {
                Self(value)
            }

            /// Returns a reference to the inner string.
            #[inline]
            #[must_use]
            pub fn as_inner(&self) -> &str {
                &self.0
            }

            /// Consumes the wrapper and returns the inner string.
            #[inline]
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }
    };
}

define_string_id! {
    /// Unique identifier for a coupon (`coupon_<millis>_<random>`).
    CouponId
}

define_string_id! {
    /// Unique identifier for a registered user.
    UserId
}

impl CouponId {
    /// Generates a fresh coupon identifier.
    ///
    /// The identifier combines a fixed prefix, the current Unix time in
    /// milliseconds and a random suffix. Uniqueness is probabilistic: the
    /// result is not checked against existing records.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(COUPON_ID_SUFFIX_LEN)
            .collect();
        Self(format!("{COUPON_ID_PREFIX}{millis}_{suffix}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coupon_id_serde_is_transparent() {
        let id = CouponId::new("coupon_1700000000000_abc123def".to_owned());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""coupon_1700000000000_abc123def""#);
        let deserialized: CouponId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    fn generated_id_has_expected_shape() {
        let id = CouponId::generate();
        let raw = id.as_inner();
        assert!(raw.starts_with(COUPON_ID_PREFIX));

        let parts: Vec<&str> = raw.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), COUPON_ID_SUFFIX_LEN);
    }

    #[test]
    fn generated_ids_differ() {
        let first = CouponId::generate();
        let second = CouponId::generate();
        assert_ne!(first, second);
    }

    #[test]
    fn string_id_display() {
        let id = UserId::new("guest".to_owned());
        assert_eq!(id.to_string(), "guest");
    }

    #[test]
    fn id_from_str_and_into_inner() {
        let id: CouponId = "c-1".into();
        assert_eq!(id.as_inner(), "c-1");
        assert_eq!(id.into_inner(), "c-1");
    }
}
