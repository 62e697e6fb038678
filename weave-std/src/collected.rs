//! Mixin declarations collected via `inventory`.
//!
//! A crate can declare a mixin next to its type with [`submit_mixin!`]; every
//! declaration linked into the binary can then be registered into a registry
//! with [`Registry::register_collected`] or [`Registry::collected`].
//!
//! Declarations are only a list of constructors. Each registry built from them
//! is independent state.
//!
//! [`submit_mixin!`]: crate::submit_mixin

use crate::registry::Registry;
use weave_core::{Constructor, Mixin};

/// A mixin declaration submitted to `inventory`.
pub struct MixinRegistration {
    /// Name the mixin is registered under.
    pub name: &'static str,
    /// Builds a fresh instance.
    pub construct: fn() -> Box<dyn Mixin>,
}

impl MixinRegistration {
    /// Create a declaration.
    pub const fn new(name: &'static str, construct: fn() -> Box<dyn Mixin>) -> Self {
        Self { name, construct }
    }
}

inventory::collect!(MixinRegistration);

impl Registry {
    /// Create a registry holding every collected declaration.
    pub fn collected() -> Self {
        let registry = Self::new();
        registry.register_collected();
        registry
    }

    /// Register every collected declaration.
    ///
    /// Declarations sharing a name are applied in link order, so the last
    /// one wins as with any re-registration.
    pub fn register_collected(&self) {
        for registration in inventory::iter::<MixinRegistration> {
            self.register(
                registration.name,
                Constructor::from_boxed(registration.construct),
            );
        }
    }
}

/// Declares a mixin for collection.
///
/// The type must implement `Default`; the declared constructor builds
/// `Default::default()`.
///
/// # Example
/// ```rust,ignore
/// #[derive(Default)]
/// struct Validator;
/// impl Mixin for Validator {}
///
/// submit_mixin!("validator", Validator);
///
/// let registry = Registry::collected();
/// ```
#[macro_export]
macro_rules! submit_mixin {
    ($name:expr, $ty:ty) => {
        $crate::inventory::submit! {
            $crate::collected::MixinRegistration::new($name, || {
                ::std::boxed::Box::new(<$ty as ::core::default::Default>::default())
            })
        }
    };
}
