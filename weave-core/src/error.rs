//! Error types for Weave.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`WeaveError`] - Top-level error type for all Weave operations
//! - [`LookupError`] - A mixin name is not registered
//! - [`InjectError`] - Errors while attaching mixins to a host
//! - [`AccessError`] - Errors from typed access to attached mixins

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Weave operations.
#[derive(Error, Debug)]
pub enum WeaveError {
    /// A mixin name was not found in the registry.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Injection into a host failed.
    #[error("inject error: {0}")]
    Inject(#[from] InjectError),

    /// Typed access to an attached mixin failed.
    #[error("access error: {0}")]
    Access(#[from] AccessError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// An operation referenced a mixin name absent from the registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown mixin name: {name}")]
pub struct LookupError {
    name: String,
}

impl LookupError {
    /// Create a lookup error for the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The name that could not be resolved.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Errors that can occur while injecting mixins into a host.
///
/// Either variant is reported before any constructor runs, so a failed
/// injection never leaves the host partially populated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InjectError {
    /// A requested name is not registered.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The host has no slot for the requested name.
    #[error("host does not accept mixin: {name}")]
    Rejected {
        /// The refused name.
        name: String,
    },
}

impl InjectError {
    /// The name that caused the failure.
    pub fn name(&self) -> &str {
        match self {
            InjectError::Lookup(err) => err.name(),
            InjectError::Rejected { name } => name,
        }
    }
}

/// Errors from typed access to mixins attached to a host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// Nothing is attached under the name.
    #[error("no mixin attached as: {name}")]
    Missing {
        /// The requested name.
        name: String,
    },

    /// The attached mixin does not have the requested type anywhere in its
    /// base chain.
    #[error("mixin `{name}` is a `{found}`, not a `{expected}`")]
    TypeMismatch {
        /// The requested name.
        name: String,
        /// The requested type.
        expected: &'static str,
        /// The concrete type of the attached instance.
        found: &'static str,
    },
}

impl From<BoxError> for WeaveError {
    fn from(err: BoxError) -> Self {
        WeaveError::Custom(err)
    }
}
