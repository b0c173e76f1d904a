//! Error types for canvas operations.

use crate::registry::WidgetId;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors surfaced by the canvas engine.
///
/// None of these are fatal: stale ids and unsupported setters are absorbed by
/// the callers that can treat them as no-ops, the rest are reported to the
/// user and leave the canvas unchanged.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Widget not found: {0}")]
    NotFound(WidgetId),
    #[error("Property '{name}' is not supported by '{type_tag}'")]
    UnsupportedProperty { type_tag: String, name: String },
    #[error("Property '{name}' expects a {expected} value")]
    PropertyType { name: String, expected: &'static str },
    #[error("Persistence failure: {0}")]
    Persistence(#[from] StorageError),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;
