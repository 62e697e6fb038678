//! # Host Contexts
//!
//! A host is whatever object mixin instances get attached to. Instead of
//! ambient property access, attached instances are reached through an
//! explicit structure:
//!
//! - [`Mixins`] - a name → instance map with typed accessors
//! - `HashMap` / `BTreeMap` keyed by name
//! - a struct deriving `Host`, whose optional fields are the accepted names

use crate::{
    error::AccessError,
    mixin::{AsAny, Mixin},
};
use std::collections::{BTreeMap, HashMap};

/// Anything that can receive named mixin instances.
///
/// A registry checks [`accepts`](Host::accepts) for every requested name
/// before constructing anything, then calls [`attach`](Host::attach) once per
/// name in request order.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot host mixins",
    label = "missing `Host` implementation",
    note = "Use `Mixins`, a map keyed by name, or `#[derive(Host)]` on a struct."
)]
pub trait Host {
    /// Store `instance` under `name`, replacing any previous instance.
    fn attach(&mut self, name: &str, instance: Box<dyn Mixin>);

    /// Whether this host has a slot for `name`.
    fn accepts(&self, name: &str) -> bool {
        let _ = name;
        true
    }
}

impl<H: Host + ?Sized> Host for &mut H {
    fn attach(&mut self, name: &str, instance: Box<dyn Mixin>) {
        (**self).attach(name, instance);
    }

    fn accepts(&self, name: &str) -> bool {
        (**self).accepts(name)
    }
}

impl Host for HashMap<String, Box<dyn Mixin>> {
    fn attach(&mut self, name: &str, instance: Box<dyn Mixin>) {
        self.insert(name.to_owned(), instance);
    }
}

impl Host for BTreeMap<String, Box<dyn Mixin>> {
    fn attach(&mut self, name: &str, instance: Box<dyn Mixin>) {
        self.insert(name.to_owned(), instance);
    }
}

/// A host that keeps attached mixins in a map and offers typed access.
///
/// # Example
///
/// ```rust,ignore
/// let mut host = Mixins::new();
/// registry.inject(["validator", "submitter"], &mut host)?;
///
/// let validator: &Validator = host.get_as("validator")?;
/// ```
#[derive(Debug, Default)]
pub struct Mixins {
    slots: HashMap<String, Box<dyn Mixin>>,
}

impl Mixins {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// The instance attached under `name`.
    pub fn get(&self, name: &str) -> Option<&dyn Mixin> {
        self.slots.get(name).map(|m| &**m)
    }

    /// The instance attached under `name`, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut dyn Mixin> {
        self.slots.get_mut(name).map(|m| &mut **m)
    }

    /// The instance attached under `name`, viewed as `T`.
    ///
    /// `T` may be the instance's own type or any type in its base chain.
    pub fn get_as<T: Mixin>(&self, name: &str) -> Result<&T, AccessError> {
        let mixin = self.get(name).ok_or_else(|| AccessError::Missing {
            name: name.to_owned(),
        })?;
        mixin
            .find::<T>()
            .ok_or_else(|| type_mismatch::<T>(name, mixin))
    }

    /// The instance attached under `name`, mutably viewed as `T`.
    pub fn get_as_mut<T: Mixin>(&mut self, name: &str) -> Result<&mut T, AccessError> {
        let mixin = self.get_mut(name).ok_or_else(|| AccessError::Missing {
            name: name.to_owned(),
        })?;
        if !mixin.is_a::<T>() {
            return Err(type_mismatch::<T>(name, mixin));
        }
        mixin.find_mut::<T>().ok_or_else(|| AccessError::Missing {
            name: name.to_owned(),
        })
    }

    /// Whether anything is attached under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Detach and return the instance under `name`.
    pub fn take(&mut self, name: &str) -> Option<Box<dyn Mixin>> {
        self.slots.remove(name)
    }

    /// Names of attached instances, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.slots.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of attached instances.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Host for Mixins {
    fn attach(&mut self, name: &str, instance: Box<dyn Mixin>) {
        self.slots.insert(name.to_owned(), instance);
    }
}

fn type_mismatch<T: Mixin>(name: &str, found: &dyn Mixin) -> AccessError {
    AccessError::TypeMismatch {
        name: name.to_owned(),
        expected: std::any::type_name::<T>(),
        found: found.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Counter {
        value: i32,
    }

    impl Mixin for Counter {}

    struct Doubler {
        base: Counter,
    }

    impl Mixin for Doubler {
        fn base(&self) -> Option<&dyn Mixin> {
            Some(&self.base)
        }

        fn base_mut(&mut self) -> Option<&mut dyn Mixin> {
            Some(&mut self.base)
        }
    }

    struct Other;

    impl Mixin for Other {}

    #[test]
    fn test_attach_and_typed_get() {
        let mut host = Mixins::new();
        host.attach("counter", Box::new(Counter { value: 0 }));

        assert!(host.contains("counter"));
        assert_eq!(host.get_as::<Counter>("counter").unwrap().value, 0);
        assert_eq!(host.len(), 1);
    }

    #[test]
    fn test_attach_overwrites() {
        let mut host = Mixins::new();
        host.attach("counter", Box::new(Counter { value: 1 }));
        host.attach("counter", Box::new(Counter { value: 2 }));

        assert_eq!(host.len(), 1);
        assert_eq!(host.get_as::<Counter>("counter").unwrap().value, 2);
    }

    #[test]
    fn test_get_as_through_base() {
        let mut host = Mixins::new();
        host.attach(
            "counter",
            Box::new(Doubler {
                base: Counter { value: 4 },
            }),
        );

        host.get_as_mut::<Counter>("counter").unwrap().value *= 2;
        assert_eq!(host.get_as::<Counter>("counter").unwrap().value, 8);
        assert!(host.get_as::<Doubler>("counter").is_ok());
    }

    #[test]
    fn test_access_errors() {
        let mut host = Mixins::new();
        host.attach("other", Box::new(Other));

        assert_eq!(
            host.get_as::<Counter>("missing").unwrap_err(),
            AccessError::Missing {
                name: "missing".into()
            }
        );

        match host.get_as_mut::<Counter>("other").unwrap_err() {
            AccessError::TypeMismatch {
                name,
                expected,
                found,
            } => {
                assert_eq!(name, "other");
                assert!(expected.ends_with("Counter"));
                assert!(found.ends_with("Other"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_names_sorted_and_take() {
        let mut host = Mixins::new();
        host.attach("b", Box::new(Other));
        host.attach("a", Box::new(Other));
        assert_eq!(host.names(), vec!["a", "b"]);

        assert!(host.take("a").is_some());
        assert!(!host.contains("a"));
        assert!(host.take("a").is_none());
    }

    #[test]
    fn test_map_hosts() {
        let mut map: HashMap<String, Box<dyn Mixin>> = HashMap::new();
        map.attach("x", Box::new(Other));
        assert!(map.contains_key("x"));

        let mut tree: BTreeMap<String, Box<dyn Mixin>> = BTreeMap::new();
        Host::attach(&mut tree, "y", Box::new(Other));
        assert!(tree.accepts("anything"));
        assert!(tree["y"].is::<Other>());
    }
}
