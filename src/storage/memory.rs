//! In-memory storage backend for testing.
//!
//! Provides [`InMemoryStorage`], a thread-safe in-memory implementation of
//! the storage traits. Ideal for unit and integration tests where file I/O
//! is undesirable.

use std::sync::Mutex;

#[cfg(feature = "async")]
use core::future::{self, Future};

use crate::error::{CouponError, Result};
use crate::models::{Coupon, User};

/// Thread-safe in-memory storage for testing.
///
/// This type implements both [`super::Storage`] (async) and
/// [`super::BlockingStorage`] (blocking) traits, providing a zero-setup
/// storage backend for tests.
///
/// # Example
///
/// ```rust
/// use coupon_share::storage::InMemoryStorage;
///
/// let storage = InMemoryStorage::new();
/// // Hand it to a store:
/// // CouponStoreBlocking::new(storage)
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    /// All state behind a single mutex for thread-safe interior mutability.
    inner: Mutex<Inner>,
}

/// Inner mutable state.
#[derive(Debug, Default)]
struct Inner {
    /// Stored coupons.
    coupons: Vec<Coupon>,
    /// Stored users.
    users: Vec<User>,
}

impl InMemoryStorage {
    /// Creates a new empty in-memory storage.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-populated with `coupons`.
    #[inline]
    #[must_use]
    pub fn with_coupons(coupons: Vec<Coupon>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                coupons,
                users: Vec::new(),
            }),
        }
    }

    /// Acquires the inner lock and applies a closure.
    fn with_lock<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> Result<R> {
        let mut inner = self.inner.lock().map_err(|err| lock_error(&err))?;
        Ok(f(&mut inner))
    }

    /// Returns a copy of the coupons.
    fn read_coupons(&self) -> Result<Vec<Coupon>> {
        self.with_lock(|inner| inner.coupons.clone())
    }

    /// Returns a copy of the users.
    fn read_users(&self) -> Result<Vec<User>> {
        self.with_lock(|inner| inner.users.clone())
    }

    /// Replaces the coupons.
    fn replace_coupons(&self, items: Vec<Coupon>) -> Result<()> {
        self.with_lock(|inner| inner.coupons = items)
    }

    /// Replaces the users.
    fn replace_users(&self, items: Vec<User>) -> Result<()> {
        self.with_lock(|inner| inner.users = items)
    }
}

/// Wraps a mutex poison error.
fn lock_error<T>(err: &std::sync::PoisonError<T>) -> CouponError {
    CouponError::Storage(err.to_string().into())
}

// ── BlockingStorage implementation ──────────────────────────────────────

#[cfg(feature = "blocking")]
impl super::BlockingStorage for InMemoryStorage {
    #[inline]
    fn coupons(&self) -> Result<Vec<Coupon>> {
        self.read_coupons()
    }

    #[inline]
    fn users(&self) -> Result<Vec<User>> {
        self.read_users()
    }

    #[inline]
    fn write_coupons(&self, items: Vec<Coupon>) -> Result<()> {
        self.replace_coupons(items)
    }

    #[inline]
    fn write_users(&self, items: Vec<User>) -> Result<()> {
        self.replace_users(items)
    }
}

// ── Storage (async) implementation ──────────────────────────────────────

#[cfg(feature = "async")]
impl super::Storage for InMemoryStorage {
    #[inline]
    fn coupons(&self) -> impl Future<Output = Result<Vec<Coupon>>> + Send {
        future::ready(self.read_coupons())
    }

    #[inline]
    fn users(&self) -> impl Future<Output = Result<Vec<User>>> + Send {
        future::ready(self.read_users())
    }

    #[inline]
    fn write_coupons(&self, items: Vec<Coupon>) -> impl Future<Output = Result<()>> + Send {
        future::ready(self.replace_coupons(items))
    }

    #[inline]
    fn write_users(&self, items: Vec<User>) -> impl Future<Output = Result<()>> + Send {
        future::ready(self.replace_users(items))
    }
}
