//! Coupon store over a pluggable storage backend.
//!
//! [`CouponStore`] (async) and [`CouponStoreBlocking`] (blocking) expose the
//! same operations. Each call loads the whole coupon collection from
//! storage, applies its logic and, for mutations, writes the whole
//! collection back. Nothing is cached between calls.
//!
//! Mutations hold a store-wide writer lock across their
//! load-modify-write sequence, so concurrent mutations through one store
//! instance never overwrite each other. Reads take no writer lock.

use crate::models::Coupon;
use crate::query::SortBy;

/// Replaces the record with the same ID in place, or appends it.
fn upsert(coupons: &mut Vec<Coupon>, coupon: Coupon) {
    match coupons
        .iter_mut()
        .find(|existing| existing.id == coupon.id)
    {
        Some(slot) => *slot = coupon,
        None => coupons.push(coupon),
    }
}

/// Sorts by posting time, most recent first.
fn newest_first(mut coupons: Vec<Coupon>) -> Vec<Coupon> {
    coupons.sort_by(|left, right| SortBy::Newest.compare(left, right));
    coupons
}

/// Generates a coupon store (async or blocking).
macro_rules! define_coupon_store {
    (
        store_name: $store:ident,
        storage_trait: $storage_trait:ident,
        writer: $writer:ty,
        acquire: $acquire:path,
        store_doc: $store_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
    ) => {
        #[doc = $store_doc]
        #[derive(Debug)]
        pub struct $store<S: $storage_trait> {
            /// Storage backend.
            storage: S,
            /// Serializes load-modify-write sequences.
            writer: $writer,
        }

        impl<S: $storage_trait> $store<S> {
            /// Creates a store over the given storage backend.
            #[inline]
            #[must_use]
            pub fn new(storage: S) -> Self {
                Self {
                    storage,
                    writer: <$writer>::new(()),
                }
            }

            /// Returns a reference to the storage backend.
            #[inline]
            #[must_use]
            pub const fn storage(&self) -> &S {
                &self.storage
            }

            /// Returns the coupons matching `query`, sorted as it asks.
            ///
            /// # Errors
            ///
            /// Returns an error if the storage backend fails to read.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn query(&self, query: &CouponQuery) -> Result<Vec<Coupon>> {
                let all = self.load() $( .$await_ext )? ?;
                let matching = query.apply(all);
                tracing::debug!(
                    matched = matching.len(),
                    sort_by = query.sort_by.as_str(),
                    "query evaluated"
                );
                Ok(matching)
            }

            /// Looks up a coupon by ID.
            ///
            /// # Errors
            ///
            /// Returns an error if the storage backend fails to read.
            pub $($async_kw)? fn get(&self, id: &CouponId) -> Result<Option<Coupon>> {
                let all = self.load() $( .$await_ext )? ?;
                Ok(all.into_iter().find(|coupon| coupon.id == *id))
            }

            /// Inserts a coupon, or replaces the stored one with the same ID
            /// in place.
            ///
            /// # Errors
            ///
            /// Returns an error if the storage backend fails to read or write.
            #[tracing::instrument(skip_all, fields(id = %coupon.id))]
            pub $($async_kw)? fn save(&self, coupon: Coupon) -> Result<()> {
                let _writer = $acquire(&self.writer) $( .$await_ext )? ?;
                self.save_locked(coupon) $( .$await_ext )?
            }

            /// Removes a coupon. Returns `false` if no coupon has that ID.
            ///
            /// # Errors
            ///
            /// Returns an error if the storage backend fails to read or write.
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn delete(&self, id: &CouponId) -> Result<bool> {
                let _writer = $acquire(&self.writer) $( .$await_ext )? ?;
                let mut coupons = self.load() $( .$await_ext )? ?;
                let before = coupons.len();
                coupons.retain(|coupon| coupon.id != *id);
                if coupons.len() == before {
                    tracing::warn!("delete refused: coupon not found");
                    return Ok(false);
                }
                self.persist(coupons) $( .$await_ext )? ?;
                tracing::info!("coupon deleted");
                Ok(true)
            }

            /// Claims an available coupon for `claimant`.
            ///
            /// Returns `false` without writing anything when the coupon is
            /// missing or not available. Ownership and expiry date are not
            /// checked here; see [`Coupon::can_claim`].
            ///
            /// # Errors
            ///
            /// Returns an error if the storage backend fails to read or write.
            #[tracing::instrument(skip_all, fields(id = %id, claimant = %claimant))]
            pub $($async_kw)? fn claim(&self, id: &CouponId, claimant: &str) -> Result<bool> {
                let _writer = $acquire(&self.writer) $( .$await_ext )? ?;
                let mut coupons = self.load() $( .$await_ext )? ?;
                let Some(coupon) = coupons.iter_mut().find(|candidate| candidate.id == *id) else {
                    tracing::warn!("claim refused: coupon not found");
                    return Ok(false);
                };
                if !coupon.claim(claimant, Utc::now()) {
                    tracing::warn!(status = %coupon.status, "claim refused: coupon not available");
                    return Ok(false);
                }
                self.persist(coupons) $( .$await_ext )? ?;
                tracing::info!("coupon claimed");
                Ok(true)
            }

            /// Returns a claimed coupon to the available pool.
            ///
            /// Returns `false` without writing anything when the coupon is
            /// missing or not claimed. The caller is not checked against the
            /// claimant; see [`Coupon::can_unclaim`].
            ///
            /// # Errors
            ///
            /// Returns an error if the storage backend fails to read or write.
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn unclaim(&self, id: &CouponId) -> Result<bool> {
                let _writer = $acquire(&self.writer) $( .$await_ext )? ?;
                let mut coupons = self.load() $( .$await_ext )? ?;
                let Some(coupon) = coupons.iter_mut().find(|candidate| candidate.id == *id) else {
                    tracing::warn!("unclaim refused: coupon not found");
                    return Ok(false);
                };
                if !coupon.release() {
                    tracing::warn!(status = %coupon.status, "unclaim refused: coupon not claimed");
                    return Ok(false);
                }
                self.persist(coupons) $( .$await_ext )? ?;
                tracing::info!("coupon released");
                Ok(true)
            }

            /// Folds a rating into the coupon's running mean and returns the
            /// updated coupon, or `None` if no coupon has that ID.
            ///
            /// The rating is not range-checked here; see
            /// [`crate::validation::validate_rating`].
            ///
            /// # Errors
            ///
            /// Returns an error if the storage backend fails to read or write.
            #[tracing::instrument(skip_all, fields(id = %id, rating = rating))]
            pub $($async_kw)? fn rate(&self, id: &CouponId, rating: u8) -> Result<Option<Coupon>> {
                let _writer = $acquire(&self.writer) $( .$await_ext )? ?;
                let mut coupons = self.load() $( .$await_ext )? ?;
                let Some(coupon) = coupons.iter_mut().find(|candidate| candidate.id == *id) else {
                    tracing::warn!("rating refused: coupon not found");
                    return Ok(None);
                };
                coupon.apply_rating(rating);
                let rated = coupon.clone();
                self.persist(coupons) $( .$await_ext )? ?;
                tracing::info!(mean = rated.rating, count = rated.rating_count, "coupon rated");
                Ok(Some(rated))
            }

            /// Applies an owner edit and returns the updated coupon, or
            /// `None` if no coupon has that ID.
            ///
            /// # Errors
            ///
            /// Returns an error if the storage backend fails to read or write.
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn update(
                &self,
                id: &CouponId,
                patch: CouponUpdate,
            ) -> Result<Option<Coupon>> {
                let _writer = $acquire(&self.writer) $( .$await_ext )? ?;
                let mut coupons = self.load() $( .$await_ext )? ?;
                let Some(coupon) = coupons.iter_mut().find(|candidate| candidate.id == *id) else {
                    tracing::warn!("update refused: coupon not found");
                    return Ok(None);
                };
                patch.apply(coupon);
                let updated = coupon.clone();
                self.persist(coupons) $( .$await_ext )? ?;
                tracing::info!("coupon updated");
                Ok(Some(updated))
            }

            /// Validates a submission, turns it into a fresh coupon with a
            /// generated ID and stores it.
            ///
            /// # Errors
            ///
            /// Returns [`CouponError::Validation`] listing every violated
            /// rule (nothing is written in that case), or a storage error if
            /// the backend fails to read or write.
            #[tracing::instrument(skip_all, fields(title = %new.title))]
            pub $($async_kw)? fn publish(&self, new: NewCoupon) -> Result<Coupon> {
                let now = Utc::now();
                let violations = validate_new_coupon(&new, now);
                if !violations.is_empty() {
                    tracing::warn!(violations = violations.len(), "submission rejected");
                    return Err(CouponError::Validation(violations));
                }
                let coupon = new.into_coupon(CouponId::generate(), now);
                let _writer = $acquire(&self.writer) $( .$await_ext )? ?;
                self.save_locked(coupon.clone()) $( .$await_ext )? ?;
                tracing::info!(id = %coupon.id, "coupon published");
                Ok(coupon)
            }

            /// Returns every coupon posted by `user`, whatever its status,
            /// newest first.
            ///
            /// # Errors
            ///
            /// Returns an error if the storage backend fails to read.
            pub $($async_kw)? fn posted_by(&self, user: &str) -> Result<Vec<Coupon>> {
                let all = self.load() $( .$await_ext )? ?;
                Ok(newest_first(
                    all.into_iter().filter(|coupon| coupon.is_owned_by(user)).collect(),
                ))
            }

            /// Returns every coupon currently claimed by `user`, newest
            /// first.
            ///
            /// # Errors
            ///
            /// Returns an error if the storage backend fails to read.
            pub $($async_kw)? fn claimed_by(&self, user: &str) -> Result<Vec<Coupon>> {
                let all = self.load() $( .$await_ext )? ?;
                Ok(newest_first(
                    all.into_iter()
                        .filter(|coupon| coupon.claimed_by.as_deref() == Some(user))
                        .collect(),
                ))
            }

            /// Marks every coupon whose expiry date has passed as expired and
            /// returns how many changed.
            ///
            /// Nothing is deleted, and nothing is written when no coupon
            /// changed.
            ///
            /// # Errors
            ///
            /// Returns an error if the storage backend fails to read or write.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn sweep(&self) -> Result<usize> {
                let _writer = $acquire(&self.writer) $( .$await_ext )? ?;
                let mut coupons = self.load() $( .$await_ext )? ?;
                let now = Utc::now();
                let mut expired = 0_usize;
                for coupon in &mut coupons {
                    if coupon.expire_if_overdue(now) {
                        expired += 1;
                    }
                }
                if expired > 0 {
                    self.persist(coupons) $( .$await_ext )? ?;
                }
                tracing::info!(expired, "expiry sweep finished");
                Ok(expired)
            }

            /// Returns status and category counts over all coupons.
            ///
            /// # Errors
            ///
            /// Returns an error if the storage backend fails to read.
            pub $($async_kw)? fn stats(&self) -> Result<CouponStats> {
                let all = self.load() $( .$await_ext )? ?;
                Ok(CouponStats::from_coupons(&all))
            }

            /// Loads the whole collection.
            $($async_kw)? fn load(&self) -> Result<Vec<Coupon>> {
                let coupons = self.storage.coupons() $( .$await_ext )? ?;
                tracing::debug!(count = coupons.len(), "coupons loaded");
                Ok(coupons)
            }

            /// Writes the whole collection back.
            $($async_kw)? fn persist(&self, coupons: Vec<Coupon>) -> Result<()> {
                tracing::debug!(count = coupons.len(), "writing coupons");
                self.storage.write_coupons(coupons) $( .$await_ext )?
            }

            /// Upsert body; the caller holds the writer lock.
            $($async_kw)? fn save_locked(&self, coupon: Coupon) -> Result<()> {
                let mut coupons = self.load() $( .$await_ext )? ?;
                upsert(&mut coupons, coupon);
                self.persist(coupons) $( .$await_ext )?
            }
        }
    };
}

// ── Async variant ───────────────────────────────────────────────────────

#[cfg(feature = "async")]
mod async_store {
    //! Async coupon store.

    use chrono::Utc;
    use tokio::sync::{Mutex, MutexGuard};

    use crate::error::{CouponError, Result};
    use crate::models::{Coupon, CouponId, CouponStats, CouponUpdate, NewCoupon};
    use crate::query::CouponQuery;
    use crate::storage::Storage;
    use crate::validation::validate_new_coupon;

    use super::{newest_first, upsert};

    /// Waits for the writer lock.
    #[expect(
        clippy::unnecessary_wraps,
        reason = "matches the fallible blocking writer lock used by the shared macro"
    )]
    async fn lock_writer(writer: &Mutex<()>) -> Result<MutexGuard<'_, ()>> {
        Ok(writer.lock().await)
    }

    define_coupon_store! {
        store_name: CouponStore,
        storage_trait: Storage,
        writer: Mutex<()>,
        acquire: lock_writer,
        store_doc: "Async coupon store over a [`Storage`] backend.\n\nConstruct it with [`CouponStore::new`].",
        async_kw: async,
        await_kw: await,
    }
}

// ── Blocking variant ────────────────────────────────────────────────────

#[cfg(feature = "blocking")]
mod blocking_store {
    //! Blocking coupon store.

    use std::sync::{Mutex, MutexGuard};

    use chrono::Utc;

    use crate::error::{CouponError, Result};
    use crate::models::{Coupon, CouponId, CouponStats, CouponUpdate, NewCoupon};
    use crate::query::CouponQuery;
    use crate::storage::BlockingStorage;
    use crate::validation::validate_new_coupon;

    use super::{newest_first, upsert};

    /// Takes the writer lock, surfacing poisoning as a storage error.
    fn lock_writer(writer: &Mutex<()>) -> Result<MutexGuard<'_, ()>> {
        writer
            .lock()
            .map_err(|err| CouponError::Storage(err.to_string().into()))
    }

    define_coupon_store! {
        store_name: CouponStoreBlocking,
        storage_trait: BlockingStorage,
        writer: Mutex<()>,
        acquire: lock_writer,
        store_doc: "Blocking coupon store over a [`BlockingStorage`] backend.\n\nConstruct it with [`CouponStoreBlocking::new`].",
    }
}

#[cfg(feature = "async")]
pub use async_store::CouponStore;
#[cfg(feature = "blocking")]
pub use blocking_store::CouponStoreBlocking;

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::error::{CouponError, Result};
    use crate::models::{CouponId, CouponStatus, DiscountType, NewCoupon, User};
    use crate::storage::InMemoryStorage;

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    /// Far enough ahead that nothing in these tests expires.
    fn future() -> DateTime<Utc> {
        ts(4_000_000_000)
    }

    fn test_coupon(id: &str, posted_at: i64) -> Coupon {
        Coupon {
            id: CouponId::new(id.to_owned()),
            title: format!("Coupon {id}"),
            store: "Corner Shop".to_owned(),
            category: "Shopping".to_owned(),
            discount_value: "10".to_owned(),
            discount_type: DiscountType::Percentage,
            expiry_date: future(),
            description: "Ten percent off the whole shop".to_owned(),
            code: None,
            image_url: None,
            posted_by: "alice".to_owned(),
            posted_at: ts(posted_at),
            claimed_by: None,
            claimed_at: None,
            status: CouponStatus::Available,
            rating: 0.0,
            rating_count: 0,
        }
    }

    fn submission() -> NewCoupon {
        NewCoupon {
            title: "Free dessert".to_owned(),
            store: "Bistro 21".to_owned(),
            category: "Food & Dining".to_owned(),
            discount_value: "100".to_owned(),
            discount_type: DiscountType::Percentage,
            expiry_date: future(),
            description: "One free dessert with any main course".to_owned(),
            code: Some("  SWEET ".to_owned()),
            image_url: None,
            posted_by: "carol".to_owned(),
        }
    }

    fn ids(coupons: &[Coupon]) -> Vec<&str> {
        coupons.iter().map(|coupon| coupon.id.as_inner()).collect()
    }

    #[test]
    fn upsert_replaces_in_place_and_appends_new() {
        let mut coupons = vec![test_coupon("a", 1), test_coupon("b", 2)];
        let mut replacement = test_coupon("a", 1);
        replacement.title = "Replaced".to_owned();

        upsert(&mut coupons, replacement);
        upsert(&mut coupons, test_coupon("c", 3));

        assert_eq!(ids(&coupons), vec!["a", "b", "c"]);
        assert_eq!(coupons[0].title, "Replaced");
    }

    #[test]
    fn newest_first_orders_by_posting_time() {
        let sorted = newest_first(vec![
            test_coupon("old", 100),
            test_coupon("new", 300),
            test_coupon("mid", 200),
        ]);
        assert_eq!(ids(&sorted), vec!["new", "mid", "old"]);
    }

    /// Storage double whose writes always fail and whose reads fail on
    /// request.
    #[derive(Debug, Default)]
    struct BrokenStorage {
        /// Collection served by successful reads.
        coupons: Vec<Coupon>,
        /// Whether reads fail too.
        reads_fail: bool,
    }

    impl BrokenStorage {
        fn read(&self) -> Result<Vec<Coupon>> {
            if self.reads_fail {
                Err(CouponError::Storage("disk unavailable".into()))
            } else {
                Ok(self.coupons.clone())
            }
        }

        fn write() -> Result<()> {
            Err(CouponError::Storage("read-only volume".into()))
        }
    }

    #[cfg(feature = "blocking")]
    impl crate::storage::BlockingStorage for BrokenStorage {
        fn coupons(&self) -> Result<Vec<Coupon>> {
            self.read()
        }
        fn users(&self) -> Result<Vec<User>> {
            Ok(Vec::new())
        }
        fn write_coupons(&self, _items: Vec<Coupon>) -> Result<()> {
            Self::write()
        }
        fn write_users(&self, _items: Vec<User>) -> Result<()> {
            Self::write()
        }
    }

    #[cfg(feature = "async")]
    impl crate::storage::Storage for BrokenStorage {
        fn coupons(&self) -> impl Future<Output = Result<Vec<Coupon>>> + Send {
            core::future::ready(self.read())
        }
        fn users(&self) -> impl Future<Output = Result<Vec<User>>> + Send {
            core::future::ready(Ok(Vec::new()))
        }
        fn write_coupons(&self, _items: Vec<Coupon>) -> impl Future<Output = Result<()>> + Send {
            core::future::ready(Self::write())
        }
        fn write_users(&self, _items: Vec<User>) -> impl Future<Output = Result<()>> + Send {
            core::future::ready(Self::write())
        }
    }

    #[cfg(feature = "blocking")]
    mod blocking {
        use std::sync::Arc;
        use std::thread;

        use super::*;
        use crate::models::CouponUpdate;
        use crate::query::{CouponQuery, StatusFilter};
        use crate::storage::BlockingStorage;

        fn store_with(coupons: Vec<Coupon>) -> CouponStoreBlocking<InMemoryStorage> {
            CouponStoreBlocking::new(InMemoryStorage::with_coupons(coupons))
        }

        fn cid(raw: &str) -> CouponId {
            CouponId::new(raw.to_owned())
        }

        #[test]
        fn query_defaults_to_available_newest_first() {
            let mut claimed = test_coupon("claimed", 300);
            claimed.status = CouponStatus::Claimed;
            claimed.claimed_by = Some("bob".to_owned());
            claimed.claimed_at = Some(ts(301));
            let store = store_with(vec![
                test_coupon("older", 100),
                claimed,
                test_coupon("newer", 200),
            ]);

            let result = store.query(&CouponQuery::new()).unwrap();
            assert_eq!(ids(&result), vec!["newer", "older"]);

            let everything = store
                .query(&CouponQuery::new().status(StatusFilter::All))
                .unwrap();
            assert_eq!(everything.len(), 3);
        }

        #[test]
        fn get_finds_by_id() {
            let store = store_with(vec![test_coupon("a", 1)]);
            assert!(store.get(&cid("a")).unwrap().is_some());
            assert!(store.get(&cid("missing")).unwrap().is_none());
        }

        #[test]
        fn save_upserts_preserving_order() {
            let store = store_with(vec![test_coupon("a", 1), test_coupon("b", 2)]);
            let mut edited = test_coupon("a", 1);
            edited.title = "Edited".to_owned();
            store.save(edited).unwrap();
            store.save(test_coupon("c", 3)).unwrap();

            let stored = store.storage().coupons().unwrap();
            assert_eq!(ids(&stored), vec!["a", "b", "c"]);
            assert_eq!(stored[0].title, "Edited");
        }

        #[test]
        fn delete_reports_whether_anything_was_removed() {
            let store = store_with(vec![test_coupon("a", 1), test_coupon("b", 2)]);
            assert!(store.delete(&cid("a")).unwrap());
            assert!(!store.delete(&cid("a")).unwrap());
            assert_eq!(ids(&store.storage().coupons().unwrap()), vec!["b"]);
        }

        #[test]
        fn claim_then_second_claim_fails() {
            let store = store_with(vec![test_coupon("a", 1)]);
            assert!(store.claim(&cid("a"), "bob").unwrap());

            let claimed = store.get(&cid("a")).unwrap().unwrap();
            assert_eq!(claimed.status, CouponStatus::Claimed);
            assert_eq!(claimed.claimed_by.as_deref(), Some("bob"));
            assert!(claimed.claimed_at.is_some());

            assert!(!store.claim(&cid("a"), "carol").unwrap());
            let unchanged = store.get(&cid("a")).unwrap().unwrap();
            assert_eq!(unchanged, claimed);
        }

        #[test]
        fn claim_missing_coupon_is_false() {
            let store = store_with(Vec::new());
            assert!(!store.claim(&cid("nope"), "bob").unwrap());
        }

        #[test]
        fn store_allows_self_claim() {
            let store = store_with(vec![test_coupon("a", 1)]);
            assert!(store.claim(&cid("a"), "alice").unwrap());
        }

        #[test]
        fn unclaim_restores_availability() {
            let store = store_with(vec![test_coupon("a", 1)]);
            assert!(!store.unclaim(&cid("a")).unwrap());
            assert!(store.claim(&cid("a"), "bob").unwrap());
            assert!(store.unclaim(&cid("a")).unwrap());

            let released = store.get(&cid("a")).unwrap().unwrap();
            assert_eq!(released.status, CouponStatus::Available);
            assert!(released.claimed_by.is_none());
            assert!(released.claimed_at.is_none());
        }

        #[test]
        fn rate_folds_into_mean_and_persists() {
            let mut rated = test_coupon("a", 1);
            rated.rating = 4.0;
            rated.rating_count = 2;
            let store = store_with(vec![rated]);

            let result = store.rate(&cid("a"), 5).unwrap().unwrap();
            assert!((result.rating - 4.3).abs() < f64::EPSILON);
            assert_eq!(result.rating_count, 3);
            assert_eq!(store.get(&cid("a")).unwrap().unwrap(), result);

            assert!(store.rate(&cid("missing"), 5).unwrap().is_none());
        }

        #[test]
        fn update_touches_only_descriptive_fields() {
            let mut original = test_coupon("a", 1);
            original.status = CouponStatus::Claimed;
            original.claimed_by = Some("bob".to_owned());
            original.claimed_at = Some(ts(5));
            original.rating = 3.5;
            original.rating_count = 2;
            let store = store_with(vec![original.clone()]);

            let patch = CouponUpdate {
                title: Some("Better title".to_owned()),
                discount_value: Some("25".to_owned()),
                ..CouponUpdate::default()
            };
            let updated = store.update(&cid("a"), patch).unwrap().unwrap();

            assert_eq!(updated.title, "Better title");
            assert_eq!(updated.discount_value, "25");
            assert_eq!(updated.id, original.id);
            assert_eq!(updated.posted_by, original.posted_by);
            assert_eq!(updated.posted_at, original.posted_at);
            assert_eq!(updated.status, original.status);
            assert_eq!(updated.claimed_by, original.claimed_by);
            assert_eq!(updated.claimed_at, original.claimed_at);
            assert_eq!(updated.rating_count, original.rating_count);

            assert!(
                store
                    .update(&cid("missing"), CouponUpdate::default())
                    .unwrap()
                    .is_none()
            );
        }

        #[test]
        fn publish_stores_a_fresh_coupon() {
            let store = store_with(Vec::new());
            let coupon = store.publish(submission()).unwrap();

            assert!(coupon.id.as_inner().starts_with("coupon_"));
            assert_eq!(coupon.status, CouponStatus::Available);
            assert_eq!(coupon.code.as_deref(), Some("SWEET"));
            assert_eq!(coupon.rating_count, 0);
            assert_eq!(store.get(&coupon.id).unwrap(), Some(coupon));
        }

        #[cfg(feature = "storage-file")]
        #[test]
        fn file_backed_store_returns_what_it_saved() {
            let dir = tempfile::tempdir().unwrap();
            let storage = crate::storage::FileStorage::new(dir.path().to_path_buf()).unwrap();
            let store = CouponStoreBlocking::new(storage);
            let mut new = submission();
            new.expiry_date = DateTime::from_timestamp(4_000_000_000, 123_456_789).unwrap();

            let published = store.publish(new).unwrap();
            assert_eq!(store.get(&published.id).unwrap(), Some(published.clone()));

            assert!(store.claim(&published.id, "bob").unwrap());
            let claimed = store.get(&published.id).unwrap().unwrap();
            assert_eq!(claimed.expiry_date, published.expiry_date);
            let everything = store
                .query(&CouponQuery::new().status(StatusFilter::All))
                .unwrap();
            assert_eq!(everything, vec![claimed]);
        }

        #[test]
        fn publish_rejects_invalid_submission_without_writing() {
            let store = store_with(Vec::new());
            let mut bad = submission();
            bad.title = "Hi".to_owned();
            bad.description = "short".to_owned();

            let err = store.publish(bad).unwrap_err();
            assert!(matches!(err, CouponError::Validation(_)));
            assert_eq!(
                err.to_string(),
                "validation failed: Title must be at least 3 characters long; \
                 Description must be at least 10 characters long"
            );
            assert!(store.storage().coupons().unwrap().is_empty());
        }

        #[test]
        fn owner_views_cover_every_status() {
            let mut expired = test_coupon("expired", 100);
            expired.status = CouponStatus::Expired;
            let mut claimed = test_coupon("claimed", 200);
            claimed.posted_by = "dave".to_owned();
            claimed.status = CouponStatus::Claimed;
            claimed.claimed_by = Some("alice".to_owned());
            claimed.claimed_at = Some(ts(201));
            let store = store_with(vec![expired, claimed, test_coupon("fresh", 300)]);

            let posted = store.posted_by("alice").unwrap();
            assert_eq!(ids(&posted), vec!["fresh", "expired"]);

            let claims = store.claimed_by("alice").unwrap();
            assert_eq!(ids(&claims), vec!["claimed"]);

            assert!(store.claimed_by("nobody").unwrap().is_empty());
        }

        #[test]
        fn sweep_expires_overdue_and_keeps_claim_fields() {
            let mut overdue = test_coupon("overdue", 1);
            overdue.expiry_date = ts(1_000);
            let mut overdue_claimed = test_coupon("overdue-claimed", 2);
            overdue_claimed.expiry_date = ts(1_000);
            overdue_claimed.status = CouponStatus::Claimed;
            overdue_claimed.claimed_by = Some("bob".to_owned());
            overdue_claimed.claimed_at = Some(ts(500));
            let mut already = test_coupon("already", 3);
            already.expiry_date = ts(1_000);
            already.status = CouponStatus::Expired;
            let store = store_with(vec![overdue, overdue_claimed, already, test_coupon("live", 4)]);

            assert_eq!(store.sweep().unwrap(), 2);

            let stored = store.storage().coupons().unwrap();
            assert_eq!(stored.len(), 4);
            let statuses: Vec<CouponStatus> = stored.iter().map(|c| c.status).collect();
            assert_eq!(
                statuses,
                vec![
                    CouponStatus::Expired,
                    CouponStatus::Expired,
                    CouponStatus::Expired,
                    CouponStatus::Available,
                ]
            );
            assert_eq!(stored[1].claimed_by.as_deref(), Some("bob"));

            assert_eq!(store.sweep().unwrap(), 0);
        }

        #[test]
        fn sweep_with_nothing_overdue_does_not_write() {
            let store = CouponStoreBlocking::new(BrokenStorage {
                coupons: vec![test_coupon("live", 1)],
                reads_fail: false,
            });
            assert_eq!(store.sweep().unwrap(), 0);
        }

        #[test]
        fn stats_count_statuses_and_categories() {
            let mut claimed = test_coupon("b", 2);
            claimed.status = CouponStatus::Claimed;
            let mut travel = test_coupon("c", 3);
            travel.category = "Travel".to_owned();
            travel.status = CouponStatus::Expired;
            let store = store_with(vec![test_coupon("a", 1), claimed, travel]);

            let stats = store.stats().unwrap();
            assert_eq!(stats.total, 3);
            assert_eq!(stats.available, 1);
            assert_eq!(stats.claimed, 1);
            assert_eq!(stats.expired, 1);
            assert_eq!(stats.category_counts.get("Shopping"), Some(&2));
            assert_eq!(stats.category_counts.get("Travel"), Some(&1));
        }

        #[test]
        fn storage_failures_propagate() {
            let unreadable = CouponStoreBlocking::new(BrokenStorage {
                coupons: Vec::new(),
                reads_fail: true,
            });
            assert!(matches!(
                unreadable.query(&CouponQuery::new()),
                Err(CouponError::Storage(_))
            ));
            assert!(matches!(unreadable.stats(), Err(CouponError::Storage(_))));

            let unwritable = CouponStoreBlocking::new(BrokenStorage {
                coupons: vec![test_coupon("a", 1)],
                reads_fail: false,
            });
            assert!(matches!(
                unwritable.claim(&cid("a"), "bob"),
                Err(CouponError::Storage(_))
            ));
            assert!(matches!(
                unwritable.save(test_coupon("b", 2)),
                Err(CouponError::Storage(_))
            ));
        }

        #[test]
        fn concurrent_claims_on_distinct_coupons_all_persist() {
            let num_threads: usize = 8;
            let coupons: Vec<Coupon> = (0..num_threads)
                .map(|idx| test_coupon(&format!("c{idx}"), 1))
                .collect();
            let store = Arc::new(store_with(coupons));

            let handles: Vec<_> = (0..num_threads)
                .map(|idx| {
                    let store = Arc::clone(&store);
                    thread::spawn(move || {
                        store
                            .claim(&cid(&format!("c{idx}")), &format!("user{idx}"))
                            .unwrap()
                    })
                })
                .collect();
            for handle in handles {
                assert!(handle.join().unwrap());
            }

            let stored = store.storage().coupons().unwrap();
            assert!(
                stored
                    .iter()
                    .all(|coupon| coupon.status == CouponStatus::Claimed)
            );
        }

        #[test]
        fn concurrent_claims_on_one_coupon_have_one_winner() {
            let store = Arc::new(store_with(vec![test_coupon("hot", 1)]));
            let handles: Vec<_> = (0..8_usize)
                .map(|idx| {
                    let store = Arc::clone(&store);
                    thread::spawn(move || store.claim(&cid("hot"), &format!("user{idx}")).unwrap())
                })
                .collect();
            let winners = handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .filter(|won| *won)
                .count();
            assert_eq!(winners, 1);
        }
    }

    #[cfg(feature = "async")]
    mod async_tests {
        use std::sync::Arc;

        use super::*;
        use crate::query::{CouponQuery, SortBy, StatusFilter};
        use crate::storage::Storage;

        fn store_with(coupons: Vec<Coupon>) -> CouponStore<InMemoryStorage> {
            CouponStore::new(InMemoryStorage::with_coupons(coupons))
        }

        fn cid(raw: &str) -> CouponId {
            CouponId::new(raw.to_owned())
        }

        #[tokio::test]
        async fn query_sorts_by_discount() {
            let mut ten = test_coupon("ten", 1);
            ten.discount_value = "10".to_owned();
            let mut thirty = test_coupon("thirty", 2);
            thirty.discount_value = "30".to_owned();
            let mut text = test_coupon("abc", 3);
            text.discount_value = "abc".to_owned();
            let store = store_with(vec![ten, text, thirty]);

            let result = store
                .query(
                    &CouponQuery::new()
                        .status(StatusFilter::Only(CouponStatus::Available))
                        .sort_by(SortBy::Discount),
                )
                .await
                .unwrap();
            assert_eq!(ids(&result), vec!["thirty", "ten", "abc"]);
        }

        #[tokio::test]
        async fn claim_unclaim_cycle() {
            let store = store_with(vec![test_coupon("a", 1)]);
            assert!(store.claim(&cid("a"), "bob").await.unwrap());
            assert!(!store.claim(&cid("a"), "carol").await.unwrap());
            assert!(store.unclaim(&cid("a")).await.unwrap());
            let coupon = store.get(&cid("a")).await.unwrap().unwrap();
            assert_eq!(coupon.status, CouponStatus::Available);
        }

        #[tokio::test]
        async fn publish_and_delete() {
            let store = store_with(Vec::new());
            let coupon = store.publish(submission()).await.unwrap();
            assert_eq!(store.posted_by("carol").await.unwrap().len(), 1);
            assert!(store.delete(&coupon.id).await.unwrap());
            assert!(store.storage().coupons().await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn sweep_and_stats() {
            let mut overdue = test_coupon("overdue", 1);
            overdue.expiry_date = ts(1_000);
            let store = store_with(vec![overdue, test_coupon("live", 2)]);
            assert_eq!(store.sweep().await.unwrap(), 1);
            let stats = store.stats().await.unwrap();
            assert_eq!(stats.expired, 1);
            assert_eq!(stats.available, 1);
        }

        #[tokio::test]
        async fn write_failure_propagates() {
            let store = CouponStore::new(BrokenStorage {
                coupons: vec![test_coupon("a", 1)],
                reads_fail: false,
            });
            assert!(matches!(
                store.rate(&cid("a"), 4).await,
                Err(CouponError::Storage(_))
            ));
        }

        #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
        async fn concurrent_ratings_are_all_counted() {
            let store = Arc::new(store_with(vec![test_coupon("a", 1)]));
            let tasks: Vec<_> = (0..16_u32)
                .map(|_| {
                    let store = Arc::clone(&store);
                    tokio::spawn(async move { store.rate(&cid("a"), 5).await.unwrap() })
                })
                .collect();
            for task in tasks {
                assert!(task.await.unwrap().is_some());
            }
            let coupon = store.get(&cid("a")).await.unwrap().unwrap();
            assert_eq!(coupon.rating_count, 16);
            assert!((coupon.rating - 5.0).abs() < f64::EPSILON);
        }
    }
}
