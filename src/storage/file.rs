//! JSON-file-based storage backend.
//!
//! Stores each collection in a separate JSON file under a configurable
//! directory (default: `$XDG_DATA_HOME/coupon-share/`).

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{CouponError, Result};
use crate::models::{Coupon, User};

/// Application name used for the XDG data directory.
const APP_NAME: &str = "coupon-share";

/// File name for coupons.
const COUPONS_FILE: &str = "coupons.json";
/// File name for users.
const USERS_FILE: &str = "users.json";
/// Sentinel file used for cross-process file locking.
const LOCK_FILE: &str = "storage.lock";
/// Contents written for a collection with no records.
const EMPTY_COLLECTION: &str = "[]";

/// File-backed storage that persists both collections as JSON arrays.
///
/// # Concurrency
///
/// Thread safety within a single process is provided by an in-process
/// [`Mutex`]. Cross-process safety is achieved via an advisory file lock
/// on `storage.lock` (using [`std::fs::File::lock`] /
/// [`std::fs::File::lock_shared`]).
///
/// Read operations acquire a shared lock (allowing concurrent readers),
/// while write operations acquire an exclusive lock. Each write lands via
/// a temporary file and a rename, so readers never see a half-written
/// collection.
///
/// # File layout
///
/// ```text
/// <dir>/
///   storage.lock          (cross-process lock sentinel)
///   coupons.json
///   users.json
/// ```
#[derive(Debug)]
pub struct FileStorage {
    /// Root directory containing all JSON files.
    dir: PathBuf,
    /// Mutex serializing concurrent in-process access.
    lock: Mutex<()>,
    /// Sentinel file for cross-process advisory locking.
    lock_file: fs::File,
}

impl FileStorage {
    /// Creates a new file storage rooted at the given directory.
    ///
    /// Creates the directory (and parents) if it does not exist, opens
    /// (or creates) the `storage.lock` sentinel, and seeds each missing
    /// collection file with an empty array. Existing files are left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory, the lock file or a collection
    /// file cannot be created.
    #[inline]
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).map_err(storage_io_error)?;
        let lock_file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(dir.join(LOCK_FILE))
            .map_err(storage_io_error)?;
        let storage = Self {
            dir,
            lock: Mutex::new(()),
            lock_file,
        };
        storage.with_exclusive_lock(|| {
            for name in [COUPONS_FILE, USERS_FILE] {
                let path = storage.path(name);
                if !path.exists() {
                    tracing::debug!(path = %path.display(), "seeding empty collection");
                    fs::write(&path, EMPTY_COLLECTION).map_err(storage_io_error)?;
                }
            }
            Ok(())
        })?;
        Ok(storage)
    }

    /// Returns the default XDG-compliant data directory for this application.
    ///
    /// On Linux: `$XDG_DATA_HOME/coupon-share/` (typically
    /// `~/.local/share/coupon-share/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform data directory cannot be determined.
    #[inline]
    pub fn default_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|data_path| data_path.join(APP_NAME))
            .ok_or_else(|| {
                CouponError::Storage("could not determine platform data directory".into())
            })
    }

    // ── Private helpers ─────────────────────────────────────────────

    /// Returns the full path for a given file name.
    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Acquires an in-process mutex guard and a shared (read) file lock,
    /// executes `op`, then releases the file lock.
    fn with_shared_lock<R, F: FnOnce() -> Result<R>>(&self, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        self.lock_file.lock_shared().map_err(storage_io_error)?;
        let result = op();
        // Only surface the unlock error when the operation succeeded;
        // otherwise the original error is more useful.
        if let Err(err) = self.lock_file.unlock()
            && result.is_ok()
        {
            return Err(storage_io_error(err));
        }
        result
    }

    /// Acquires an in-process mutex guard and an exclusive (write) file
    /// lock, executes `op`, then releases the file lock.
    fn with_exclusive_lock<R, F: FnOnce() -> Result<R>>(&self, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        self.lock_file.lock().map_err(storage_io_error)?;
        let result = op();
        if let Err(err) = self.lock_file.unlock()
            && result.is_ok()
        {
            return Err(storage_io_error(err));
        }
        result
    }

    /// Reads and deserializes a JSON array. Returns an empty `Vec` if the
    /// file does not exist.
    fn read_collection<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let path = self.path(name);
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(CouponError::from),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(storage_io_error(err)),
        }
    }

    /// Atomically writes a serialized JSON array (write-to-tmp then rename).
    fn write_collection<T: Serialize>(&self, name: &str, items: &[T]) -> Result<()> {
        let path = self.path(name);
        let tmp_path = self.path(&format!("{name}.tmp"));
        let json = serde_json::to_string_pretty(items).map_err(CouponError::from)?;
        fs::write(&tmp_path, json).map_err(storage_io_error)?;
        fs::rename(&tmp_path, &path).map_err(storage_io_error)?;
        Ok(())
    }

    /// Reads a collection under a shared lock.
    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        self.with_shared_lock(|| self.read_collection(name))
    }

    /// Replaces a collection under an exclusive lock.
    fn store<T: Serialize>(&self, name: &str, items: &[T]) -> Result<()> {
        self.with_exclusive_lock(|| self.write_collection(name, items))
    }
}

// ── Free-standing helpers ───────────────────────────────────────────────

/// Wraps an I/O error into a [`CouponError::Storage`].
fn storage_io_error(err: std::io::Error) -> CouponError {
    CouponError::Storage(Box::new(err))
}

/// Wraps a mutex poison error into a [`CouponError::Storage`].
fn lock_poison_error<T>(err: &std::sync::PoisonError<T>) -> CouponError {
    CouponError::Storage(err.to_string().into())
}

// ── BlockingStorage implementation ──────────────────────────────────────

#[cfg(feature = "blocking")]
impl super::BlockingStorage for FileStorage {
    #[inline]
    fn coupons(&self) -> Result<Vec<Coupon>> {
        self.load(COUPONS_FILE)
    }

    #[inline]
    fn users(&self) -> Result<Vec<User>> {
        self.load(USERS_FILE)
    }

    #[inline]
    fn write_coupons(&self, items: Vec<Coupon>) -> Result<()> {
        self.store(COUPONS_FILE, &items)
    }

    #[inline]
    fn write_users(&self, items: Vec<User>) -> Result<()> {
        self.store(USERS_FILE, &items)
    }
}

// ── Storage (async) implementation ──────────────────────────────────────

#[cfg(feature = "async")]
impl super::Storage for FileStorage {
    #[inline]
    fn coupons(&self) -> impl Future<Output = Result<Vec<Coupon>>> + Send {
        core::future::ready(self.load(COUPONS_FILE))
    }

    #[inline]
    fn users(&self) -> impl Future<Output = Result<Vec<User>>> + Send {
        core::future::ready(self.load(USERS_FILE))
    }

    #[inline]
    fn write_coupons(&self, items: Vec<Coupon>) -> impl Future<Output = Result<()>> + Send {
        core::future::ready(self.store(COUPONS_FILE, &items))
    }

    #[inline]
    fn write_users(&self, items: Vec<User>) -> impl Future<Output = Result<()>> + Send {
        core::future::ready(self.store(USERS_FILE, &items))
    }
}
