//! Pluggable storage backends for the coupon and user collections.
//!
//! This module defines the [`Storage`] (async) and [`BlockingStorage`]
//! (blocking) traits via a shared macro, mirroring the store generation
//! pattern in [`crate::store`].
//!
//! Backends persist whole collections: every write replaces the stored
//! collection with the given list, preserving its order. Read-modify-write
//! sequencing is the caller's job.

#[cfg(feature = "storage-file")]
mod file;
mod memory;

#[cfg(feature = "storage-file")]
pub use file::FileStorage;
pub use memory::InMemoryStorage;

/// Generates a storage trait (async or blocking) with all collection methods.
///
/// Uses `@methods` to define the method list once, and `@method` to render
/// each method in async (`impl Future + Send`) or blocking (`fn`) style.
macro_rules! define_storage {
    // ── Entry points ────────────────────────────────────────────────
    (
        trait_name: $trait_name:ident,
        trait_doc: $trait_doc:expr,
        mode: async_mode,
    ) => {
        #[doc = $trait_doc]
        pub trait $trait_name: core::fmt::Debug + Send + Sync {
            define_storage!(@methods async_mode);
        }
    };
    (
        trait_name: $trait_name:ident,
        trait_doc: $trait_doc:expr,
        mode: blocking,
    ) => {
        #[doc = $trait_doc]
        pub trait $trait_name: core::fmt::Debug + Send + Sync {
            define_storage!(@methods blocking);
        }
    };

    // ── Single method list (shared between both variants) ───────────
    (@methods $mode:ident) => {
        // Read
        define_storage!(@method $mode, coupons,
            "Returns all stored coupons in stored order.\n\nA backend with nothing persisted yet returns an empty list.\n\n# Errors\n\nReturns an error if the storage backend fails to read or the stored data cannot be decoded.",
            -> Result<Vec<Coupon>>);
        define_storage!(@method $mode, users,
            "Returns all stored users in stored order.\n\n# Errors\n\nReturns an error if the storage backend fails to read or the stored data cannot be decoded.",
            -> Result<Vec<User>>);

        // Replace
        define_storage!(@method $mode, write_coupons,
            "Replaces the stored coupon collection with `items`.\n\n# Errors\n\nReturns an error if the storage backend fails to write.",
            items: Vec<Coupon>, -> Result<()>);
        define_storage!(@method $mode, write_users,
            "Replaces the stored user collection with `items`.\n\n# Errors\n\nReturns an error if the storage backend fails to write.",
            items: Vec<User>, -> Result<()>);
    };

    // ── Blocking method renderer ────────────────────────────────────
    (@method blocking, $name:ident, $doc:expr,
     $($param:ident: $param_ty:ty,)* -> $ret:ty) => {
        #[doc = $doc]
        fn $name(&self $(, $param: $param_ty)*) -> $ret;
    };

    // ── Async method renderer (returns impl Future + Send) ──────────
    (@method async_mode, $name:ident, $doc:expr,
     $($param:ident: $param_ty:ty,)* -> $ret:ty) => {
        #[doc = $doc]
        fn $name(&self $(, $param: $param_ty)*)
            -> impl core::future::Future<Output = $ret> + Send;
    };
}

#[cfg(feature = "async")]
mod async_storage {
    //! Async storage trait definition.

    use crate::error::Result;
    use crate::models::{Coupon, User};

    define_storage! {
        trait_name: Storage,
        trait_doc: "Async storage backend for the coupon and user collections.\n\nAll methods take `&self`; implementations use interior mutability\n(e.g. `Mutex`) for thread-safe mutation.",
        mode: async_mode,
    }
}

#[cfg(feature = "blocking")]
mod blocking_storage {
    //! Blocking storage trait definition.

    use crate::error::Result;
    use crate::models::{Coupon, User};

    define_storage! {
        trait_name: BlockingStorage,
        trait_doc: "Blocking storage backend for the coupon and user collections.\n\nAll methods take `&self`; implementations use interior mutability\n(e.g. `Mutex`) for thread-safe mutation.",
        mode: blocking,
    }
}

#[cfg(feature = "async")]
pub use async_storage::Storage;
#[cfg(feature = "blocking")]
pub use blocking_storage::BlockingStorage;
