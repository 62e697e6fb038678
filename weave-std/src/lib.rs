//! # weave-std
//!
//! Standard implementations for the Weave mixin registry.
//!
//! This crate provides:
//! - **Registry**: [`Registry`] and [`RegistryBuilder`]
//! - **Extensions**: [`Extension`], [`derive`], [`replace`]
//! - **Name sets**: [`Names`]
//! - **Collected declarations**: `submit_mixin!` (with the `inventory` feature)
//! - **Testing utilities**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core contracts
pub use weave_core;

// Modules
#[cfg(feature = "inventory")]
pub mod collected;
pub mod extension;
pub mod names;
pub mod registry;
pub mod testing;

pub use extension::{Extension, derive, replace};
pub use names::Names;
pub use registry::{Registry, RegistryBuilder};

#[cfg(feature = "inventory")]
pub use inventory;
