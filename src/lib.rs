//! Community coupon-sharing store.
//!
//! Users post coupons, browse and filter them, claim or release them, and
//! rate them; a sweep marks coupons past their expiry date as expired.
//! Records live in flat JSON collections behind a pluggable storage
//! backend, and every operation reads and writes the whole collection.
//!
//! The [`store`] module holds the async and blocking stores, [`query`]
//! the filter and sort criteria, and [`validation`] the field checks that
//! callers apply before handing input to the store.

pub mod error;
pub mod models;
pub mod query;
pub mod storage;
pub mod store;
pub mod validation;
