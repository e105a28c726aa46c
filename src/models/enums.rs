//! Enumeration types for constrained coupon values.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of categories a coupon may be filed under.
pub const COUPON_CATEGORIES: [&str; 11] = [
    "Food & Dining",
    "Shopping",
    "Entertainment",
    "Travel",
    "Electronics",
    "Fashion",
    "Health & Beauty",
    "Sports & Fitness",
    "Home & Garden",
    "Education",
    "Other",
];

/// Lifecycle status of a coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CouponStatus {
    /// Open for anyone but the owner to claim.
    Available,
    /// Reserved by a user.
    Claimed,
    /// Marked inactive by an expiry sweep.
    Expired,
}

impl CouponStatus {
    /// Returns the wire name of the status.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Claimed => "claimed",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for CouponStatus {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CouponStatus {
    type Err = String;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "claimed" => Ok(Self::Claimed),
            "expired" => Ok(Self::Expired),
            other => Err(format!("unknown coupon status: {other}")),
        }
    }
}

/// How the discount value of a coupon should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscountType {
    /// Percentage off (e.g. `"20"` means 20%).
    Percentage,
    /// Fixed amount off.
    Fixed,
    /// Free-form offer such as "buy one get one".
    Other,
}

impl DiscountType {
    /// Returns the wire name of the discount type.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for DiscountType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountType {
    type Err = String;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(Self::Percentage),
            "fixed" => Ok(Self::Fixed),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown discount type: {other}")),
        }
    }
}
