//! Error types for the coupon store.

/// All errors that can occur when using the coupon store.
///
/// A missing coupon or a refused state transition is not an error: those
/// are reported through `Option` / `bool` return values.
#[derive(Debug, thiserror::Error)]
pub enum CouponError {
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The storage backend could not be read or written.
    #[error("storage error: {0}")]
    Storage(Box<dyn core::error::Error + Send + Sync>),

    /// A caller-supplied record failed field validation.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Convenience alias for results carrying a [`CouponError`].
pub type Result<T> = core::result::Result<T, CouponError>;
