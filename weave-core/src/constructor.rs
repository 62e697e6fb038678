//! Mixin constructors.

use crate::mixin::Mixin;
use std::{fmt, sync::Arc};

type ConstructFn = dyn Fn() -> Box<dyn Mixin> + Send + Sync;

/// A shareable, argument-free factory for mixin instances.
///
/// Cloning a `Constructor` is O(1): clones share the same underlying closure,
/// and [`same`](Self::same) reports whether two handles are clones of each
/// other.
///
/// # Example
///
/// ```rust,ignore
/// let counter = Constructor::new(|| Counter { value: 0 });
/// let instance = counter.construct();
/// assert!(instance.is::<Counter>());
/// ```
#[derive(Clone)]
pub struct Constructor(Arc<ConstructFn>);

impl Constructor {
    /// Create a constructor from a closure producing a concrete mixin.
    pub fn new<F, M>(f: F) -> Self
    where
        F: Fn() -> M + Send + Sync + 'static,
        M: Mixin,
    {
        Self(Arc::new(move || Box::new(f()) as Box<dyn Mixin>))
    }

    /// Create a constructor from a closure that already erases its output.
    pub fn from_boxed<F>(f: F) -> Self
    where
        F: Fn() -> Box<dyn Mixin> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// A constructor that builds `M::default()`.
    pub fn of<M: Mixin + Default>() -> Self {
        Self::new(M::default)
    }

    /// Invoke the constructor.
    pub fn construct(&self) -> Box<dyn Mixin> {
        (self.0)()
    }

    /// Derive a child constructor that wraps each parent instance.
    ///
    /// The child invokes this constructor first and hands the resulting
    /// instance to `wrap`, which typically stores it as its [`Mixin::base`].
    pub fn derive<F, M>(&self, wrap: F) -> Self
    where
        F: Fn(Box<dyn Mixin>) -> M + Send + Sync + 'static,
        M: Mixin,
    {
        let parent = self.clone();
        Self::new(move || wrap(parent.construct()))
    }

    /// Returns `true` if both handles share the same underlying closure.
    pub fn same(&self, other: &Constructor) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Constructor")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

impl<F> From<F> for Constructor
where
    F: Fn() -> Box<dyn Mixin> + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self::from_boxed(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter {
        value: i32,
    }

    impl Mixin for Counter {}

    struct Child {
        base: Box<dyn Mixin>,
        value: i32,
    }

    impl Mixin for Child {
        fn base(&self) -> Option<&dyn Mixin> {
            Some(&*self.base)
        }
    }

    #[test]
    fn test_construct_produces_fresh_instances() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();
        let ctor = Constructor::new(move || {
            counted.fetch_add(1, Ordering::SeqCst);
            Counter::default()
        });

        let a = ctor.construct();
        let b = ctor.construct();
        assert!(a.is::<Counter>() && b.is::<Counter>());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_of_uses_default() {
        let m = Constructor::of::<Counter>().construct();
        assert_eq!(m.downcast_ref::<Counter>().unwrap().value, 0);
    }

    #[test]
    fn test_derive_wraps_parent_instance() {
        let base = Constructor::new(|| Counter { value: 1 });
        let child = base.derive(|base| Child { base, value: 10 });

        let m = child.construct();
        assert_eq!(m.downcast_ref::<Child>().unwrap().value, 10);
        assert_eq!(m.find::<Counter>().unwrap().value, 1);
        assert!(!child.same(&base));
    }

    #[test]
    fn test_same_tracks_clones() {
        let a = Constructor::of::<Counter>();
        let b = a.clone();
        let c = Constructor::of::<Counter>();
        assert!(a.same(&b));
        assert!(!a.same(&c));
    }

    #[test]
    fn test_from_boxed_closure() {
        let ctor: Constructor = (|| Box::new(Counter { value: 5 }) as Box<dyn Mixin>).into();
        assert_eq!(ctor.construct().find::<Counter>().unwrap().value, 5);
    }
}
