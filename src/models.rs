//! Data models for the coupon community.
//!
//! This module contains the persisted [`Coupon`] and [`User`] records,
//! the submission and edit payloads, aggregate statistics, newtype ID
//! wrappers, and enumeration types for constrained values.

mod coupon;
mod enums;
mod ids;
mod new_coupon;
mod stats;
pub mod timestamp;
mod update;
mod user;

pub use chrono::{DateTime, Utc};
pub use coupon::Coupon;
pub use enums::{COUPON_CATEGORIES, CouponStatus, DiscountType};
pub use ids::{CouponId, UserId};
pub use new_coupon::NewCoupon;
pub use stats::CouponStats;
pub use update::CouponUpdate;
pub use user::User;
