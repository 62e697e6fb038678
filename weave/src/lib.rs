//! # weave - Named Mixin Registry
//!
//! `weave` binds behavior units ("mixins") to symbolic names, extends them by
//! delegation, and injects fresh instances into host objects on request.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use weave::prelude::*;
//!
//! #[derive(Default, Mixin)]
//! struct Counter { value: i32 }
//!
//! #[derive(Mixin)]
//! struct Tens {
//!     #[mixin(base)]
//!     base: Box<dyn Mixin>,
//!     value: i32,
//! }
//!
//! let registry = Registry::new();
//! registry.register_default::<Counter>("counter");
//! registry.extend("counter", derive(|base| Tens { base, value: 10 }))?;
//!
//! let host = registry.assemble(["counter"])?;
//! assert_eq!(host.get_as::<Tens>("counter")?.value, 10);
//! assert!(host.get("counter").unwrap().is_a::<Counter>());
//! ```
//!
//! ## Features
//!
//! - `macros` (default): `#[derive(Mixin)]` and `#[derive(Host)]`
//! - `tracing`: structured `tracing` events for registry operations
//! - `inventory`: `submit_mixin!` declarations and `Registry::collected`

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use weave_core::{
    // Errors
    AccessError,
    // Mixin
    AsAny,
    AsMixin,
    BoxError,
    // Constructor
    Constructor,
    // Host
    Host,
    InjectError,
    Lineage,
    LookupError,
    Mixin,
    Mixins,
    WeaveError,
};

// Registry
pub use weave_std::{Names, Registry, RegistryBuilder};

/// Extension factories.
pub mod extension {
    pub use weave_std::extension::{Derive, Extension, Replace, derive, replace};
}

pub use extension::{Extension, derive, replace};

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use weave_std::testing::*;
}

/// Collected mixin declarations.
#[cfg(feature = "inventory")]
pub mod collected {
    pub use weave_std::collected::MixinRegistration;
}

#[cfg(feature = "inventory")]
pub use weave_std::submit_mixin;

/// Prelude module - common imports for Weave.
///
/// # Usage
///
/// ```rust,ignore
/// use weave::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Constructor, Extension, Host, InjectError, LookupError, Mixin, Mixins, Registry, derive,
        replace,
    };
}

#[cfg(feature = "macros")]
pub use weave_macros::{Host, Mixin};

#[cfg(feature = "inventory")]
pub use inventory;
