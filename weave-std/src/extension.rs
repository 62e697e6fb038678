//! Extension factories.
//!
//! An [`Extension`] receives the constructor currently registered under a name
//! and returns the constructor that replaces it. Any
//! `FnMut(Constructor) -> Constructor` is an extension; this module adds the
//! common shapes:
//!
//! - [`derive`] - wrap each parent instance in a child that delegates to it
//! - [`replace`] - ignore the parent entirely (stubs and mocks)

use weave_core::{Constructor, Mixin};

/// Transforms a registered constructor into its replacement.
///
/// The registry may invoke an extension more than once if the entry it
/// extends is replaced concurrently; only the result of the last invocation is
/// stored.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a mixin extension",
    label = "expected `FnMut(Constructor) -> Constructor`",
    note = "Use `weave::extension::derive` to wrap the parent instance."
)]
pub trait Extension {
    /// Produce the child constructor from the parent constructor.
    fn apply(&mut self, parent: Constructor) -> Constructor;
}

impl<F> Extension for F
where
    F: FnMut(Constructor) -> Constructor,
{
    fn apply(&mut self, parent: Constructor) -> Constructor {
        self(parent)
    }
}

/// Extension that wraps each parent instance.
///
/// Created by [`derive`].
pub struct Derive<F> {
    wrap: F,
}

impl<F, M> Extension for Derive<F>
where
    F: Fn(Box<dyn Mixin>) -> M + Clone + Send + Sync + 'static,
    M: Mixin,
{
    fn apply(&mut self, parent: Constructor) -> Constructor {
        parent.derive(self.wrap.clone())
    }
}

/// Build an extension whose child wraps the parent instance.
///
/// # Example
///
/// ```rust,ignore
/// registry.extend("counter", derive(|base| Tens { base, value: 10 }))?;
/// ```
pub fn derive<F, M>(wrap: F) -> Derive<F>
where
    F: Fn(Box<dyn Mixin>) -> M + Clone + Send + Sync + 'static,
    M: Mixin,
{
    Derive { wrap }
}

/// Extension that discards the parent constructor.
///
/// Created by [`replace`].
pub struct Replace {
    with: Constructor,
}

impl Extension for Replace {
    fn apply(&mut self, _parent: Constructor) -> Constructor {
        self.with.clone()
    }
}

/// Build an extension that swaps in `with`, regardless of the parent.
///
/// Unlike re-registering, this fails if the name is not registered yet.
pub fn replace(with: impl Into<Constructor>) -> Replace {
    Replace { with: with.into() }
}
