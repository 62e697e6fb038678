//! # Mixin Capability Surface
//!
//! A mixin is a self-contained behavior unit that a registry constructs and
//! attaches to a host under a symbolic name.
//!
//! # Extension by Delegation
//!
//! An extended mixin does not inherit from its parent. It owns the parent
//! instance and exposes it through [`Mixin::base`]. Typed lookups on
//! `dyn Mixin` walk that chain, so an extended instance still answers for
//! every type it wraps:
//!
//! ```rust,ignore
//! struct Counter { value: i32 }
//! impl Mixin for Counter {}
//!
//! struct Stepped { base: Box<dyn Mixin>, step: i32 }
//! impl Mixin for Stepped {
//!     fn base(&self) -> Option<&dyn Mixin> { Some(&*self.base) }
//!     fn base_mut(&mut self) -> Option<&mut dyn Mixin> { Some(&mut *self.base) }
//! }
//!
//! let instance: Box<dyn Mixin> = Box::new(Stepped { base: Box::new(Counter { value: 0 }), step: 2 });
//! assert!(instance.is_a::<Counter>());
//! ```

use std::any::Any;

/// Type-erasure helper implemented for every `Send + Sync + 'static` type.
///
/// This is a supertrait of [`Mixin`] so that `dyn Mixin` can be downcast.
pub trait AsAny: Any + Send + Sync {
    /// View as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// View as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The concrete type name, for diagnostics.
    fn type_name(&self) -> &'static str;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A behavior unit that can be attached to a host.
///
/// Mixins must be `Send + Sync + 'static` so that instances can be moved into
/// hosts on any thread.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct Validator { rules: Vec<Rule> }
///
/// impl Mixin for Validator {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a Mixin",
    label = "missing `Mixin` implementation",
    note = "Implement `Mixin` (or `#[derive(Mixin)]`) for types attached through a registry."
)]
pub trait Mixin: AsAny + 'static {
    /// The parent instance this mixin delegates to, if it extends one.
    fn base(&self) -> Option<&dyn Mixin> {
        None
    }

    /// Mutable access to the parent instance.
    fn base_mut(&mut self) -> Option<&mut dyn Mixin> {
        None
    }
}

impl dyn Mixin {
    /// Returns `true` if the concrete type of this instance is `T`.
    ///
    /// The base chain is not consulted; see [`is_a`](Self::is_a).
    pub fn is<T: Mixin>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcast the outermost instance to `T`.
    pub fn downcast_ref<T: Mixin>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutably downcast the outermost instance to `T`.
    pub fn downcast_mut<T: Mixin>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Find the first instance of `T` in this instance's lineage.
    pub fn find<T: Mixin>(&self) -> Option<&T> {
        self.lineage().find_map(|m| m.downcast_ref::<T>())
    }

    /// Find the first instance of `T` in this instance's lineage, mutably.
    pub fn find_mut<T: Mixin>(&mut self) -> Option<&mut T> {
        if self.is::<T>() {
            return self.downcast_mut::<T>();
        }
        self.base_mut()?.find_mut::<T>()
    }

    /// Returns `true` if `T` appears anywhere in this instance's lineage.
    ///
    /// This is the delegation equivalent of an `instanceof` check.
    pub fn is_a<T: Mixin>(&self) -> bool {
        self.find::<T>().is_some()
    }

    /// Iterate from this instance through each successive base.
    pub fn lineage(&self) -> Lineage<'_> {
        Lineage { next: Some(self) }
    }

    /// Number of extension layers wrapped around the innermost base.
    pub fn depth(&self) -> usize {
        self.lineage().count() - 1
    }
}

impl std::fmt::Debug for dyn Mixin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Mixin").field(&self.type_name()).finish()
    }
}

/// Iterator over a mixin and its bases, outermost first.
pub struct Lineage<'a> {
    next: Option<&'a dyn Mixin>,
}

impl<'a> Iterator for Lineage<'a> {
    type Item = &'a dyn Mixin;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.base();
        Some(current)
    }
}

/// Conversion to `&dyn Mixin` for both concrete mixins and boxed ones.
///
/// Used by `#[derive(Mixin)]` to expose a `#[mixin(base)]` field regardless of
/// whether the field is a concrete type or a `Box<dyn Mixin>`.
pub trait AsMixin {
    /// View as a mixin.
    fn as_mixin(&self) -> &dyn Mixin;

    /// View as a mutable mixin.
    fn as_mixin_mut(&mut self) -> &mut dyn Mixin;
}

impl<T: Mixin> AsMixin for T {
    fn as_mixin(&self) -> &dyn Mixin {
        self
    }

    fn as_mixin_mut(&mut self) -> &mut dyn Mixin {
        self
    }
}

impl AsMixin for Box<dyn Mixin> {
    fn as_mixin(&self) -> &dyn Mixin {
        &**self
    }

    fn as_mixin_mut(&mut self) -> &mut dyn Mixin {
        &mut **self
    }
}
