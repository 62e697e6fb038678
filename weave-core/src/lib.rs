//! # weave-core
//!
//! Core contracts for the Weave mixin registry.
//!
//! This crate has minimal dependencies and is meant to be imported by crates
//! that define mixins or hosts without needing the registry itself.
//!
//! # Building Blocks
//!
//! ## [`Mixin`]
//!
//! A behavior unit that gets attached to a host under a symbolic name. An
//! extended mixin owns the instance it extends and exposes it through
//! [`Mixin::base`]; typed lookups on `dyn Mixin` walk that chain.
//!
//! ## [`Constructor`]
//!
//! A shareable, argument-free factory for mixin instances. Registries store
//! constructors, never instances.
//!
//! ## [`Host`]
//!
//! The receiving side of injection. [`Mixins`] is the general-purpose host;
//! maps keyed by name and `#[derive(Host)]` records are the alternatives.
//!
//! # Error Types
//!
//! - [`WeaveError`] - Top-level error type
//! - [`LookupError`] - Unknown mixin name
//! - [`InjectError`] - Injection failures
//! - [`AccessError`] - Typed host access failures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod constructor;
mod error;
mod host;
mod mixin;

// Re-exports
pub use constructor::Constructor;
pub use error::{AccessError, BoxError, InjectError, LookupError, WeaveError};
pub use host::{Host, Mixins};
pub use mixin::{AsAny, AsMixin, Lineage, Mixin};
