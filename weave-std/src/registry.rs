//! The mixin registry.
//!
//! A [`Registry`] owns a name → [`Constructor`] table and provides the three
//! core operations:
//!
//! - [`register`](Registry::register) - bind or rebind a name
//! - [`extend`](Registry::extend) - replace a binding with a derived constructor
//! - [`inject`](Registry::inject) - construct named mixins into a host
//!
//! Registries are plain values. There is no process-wide instance; create one
//! per application (or per test) and share it through `Arc` if needed.

use crate::{extension::Extension, names::Names};
use std::{
    collections::HashMap,
    fmt,
    sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use weave_core::{Constructor, Host, InjectError, LookupError, Mixin, Mixins};

/// A table of mixin constructors keyed by name.
///
/// The table is guarded by a lock held only for lookups and the single write
/// of each operation. Constructors and extensions always run with the table
/// lock released, so they may call back into the registry.
///
/// # Example
///
/// ```rust,ignore
/// let registry = Registry::new();
/// registry.register("counter", Constructor::new(|| Counter { value: 0 }));
/// registry.extend("counter", derive(|base| Tens { base, value: 10 }))?;
///
/// let mut host = Mixins::new();
/// registry.inject("counter", &mut host)?;
/// ```
#[derive(Default)]
pub struct Registry {
    table: RwLock<HashMap<String, Constructor>>,
    extending: Mutex<()>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a registry with chained registrations.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Bind `name` to `constructor`, silently replacing any previous binding.
    pub fn register(&self, name: impl Into<String>, constructor: impl Into<Constructor>) {
        let name = name.into();
        debug_assert!(!name.is_empty(), "mixin names must be non-empty");

        let previous = self.write().insert(name.clone(), constructor.into());

        #[cfg(feature = "tracing")]
        {
            tracing::debug!(mixin = %name, replaced = previous.is_some(), "registered mixin");
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = (name, previous);
        }
    }

    /// Bind `name` to `M::default`.
    pub fn register_default<M: Mixin + Default>(&self, name: impl Into<String>) {
        self.register(name, Constructor::of::<M>());
    }

    /// Replace the constructor under `name` with the one `extension` derives
    /// from it.
    ///
    /// Extending twice stacks two layers: the second extension receives the
    /// result of the first.
    ///
    /// The extension is applied exactly once, without the table lock held, and
    /// its result is stored in a single write. Concurrent `extend` calls are
    /// serialized so that each one wraps the result of the previous. A
    /// `register` of the same name made while the extension runs is
    /// overwritten by the extension's result. The extension must not call
    /// `extend` on the same registry.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if `name` is not registered. The table is left
    /// unchanged.
    pub fn extend<X: Extension>(&self, name: &str, mut extension: X) -> Result<(), LookupError> {
        let _serial = self.extending.lock().unwrap_or_else(PoisonError::into_inner);

        let parent = self.constructor(name)?;
        let child = extension.apply(parent.clone());

        let previous = self.write().insert(name.to_owned(), child);

        #[cfg(feature = "tracing")]
        {
            let rebound = previous.as_ref().is_some_and(|current| !current.same(&parent));
            tracing::debug!(mixin = %name, rebound, "extended mixin");
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = previous;
        }
        Ok(())
    }

    /// Construct each named mixin and attach it to `host` under its name.
    ///
    /// Names are resolved against the bindings current at call time and
    /// attached in request order. A name requested twice is constructed twice;
    /// the host keeps the last instance.
    ///
    /// Injection is all-or-nothing: every name is resolved and checked against
    /// [`Host::accepts`] before the first constructor runs.
    ///
    /// # Errors
    ///
    /// - [`InjectError::Lookup`] if a name is not registered
    /// - [`InjectError::Rejected`] if the host has no slot for a name
    ///
    /// In both cases no constructor has run and `host` is untouched.
    pub fn inject<N, H>(&self, names: N, host: &mut H) -> Result<(), InjectError>
    where
        N: Names,
        H: Host + ?Sized,
    {
        let plan = self.resolve(&names)?;

        if let Some((name, _)) = plan.iter().find(|(name, _)| !host.accepts(name)) {
            #[cfg(feature = "tracing")]
            {
                tracing::debug!(mixin = %name, "host rejected mixin");
            }
            return Err(InjectError::Rejected {
                name: (*name).to_owned(),
            });
        }

        for (name, constructor) in plan {
            host.attach(name, constructor.construct());

            #[cfg(feature = "tracing")]
            {
                tracing::debug!(mixin = %name, "injected mixin");
            }
        }
        Ok(())
    }

    /// Inject `names` into a fresh [`Mixins`] host and return it.
    pub fn assemble<N: Names>(&self, names: N) -> Result<Mixins, InjectError> {
        let mut host = Mixins::new();
        self.inject(names, &mut host)?;
        Ok(host)
    }

    /// The constructor currently bound to `name`.
    pub fn constructor(&self, name: &str) -> Result<Constructor, LookupError> {
        self.read().get(name).cloned().ok_or_else(|| {
            #[cfg(feature = "tracing")]
            {
                tracing::debug!(mixin = %name, "unknown mixin name");
            }
            LookupError::new(name)
        })
    }

    /// Construct a single instance of `name` without attaching it anywhere.
    pub fn instantiate(&self, name: &str) -> Result<Box<dyn Mixin>, LookupError> {
        Ok(self.constructor(name)?.construct())
    }

    /// Whether `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// All bound names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no name is bound.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Resolve every name to its constructor under a single read lock.
    fn resolve<'n, N: Names>(&self, names: &'n N) -> Result<Vec<(&'n str, Constructor)>, LookupError> {
        let table = self.read();
        names
            .names()
            .map(|name| match table.get(name) {
                Some(constructor) => Ok((name, constructor.clone())),
                None => {
                    #[cfg(feature = "tracing")]
                    {
                        tracing::debug!(mixin = %name, "unknown mixin name");
                    }
                    Err(LookupError::new(name))
                }
            })
            .collect()
    }

    // Writes replace whole entries, so a poisoned table is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Constructor>> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Constructor>> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names())
            .finish()
    }
}

// ============================================================================
// RegistryBuilder - for constructing registries
// ============================================================================

enum Step {
    Register(String, Constructor),
    Extend(String, Box<dyn FnMut(Constructor) -> Constructor>),
}

/// Builder for constructing a [`Registry`].
///
/// Steps are applied in order by [`build`](Self::build).
///
/// # Example
/// ```ignore
/// let registry = Registry::builder()
///     .register("validator", Constructor::of::<Validator>())
///     .register_default::<Submitter>("submitter")
///     .extend("validator", derive(|base| StrictValidator { base }))
///     .build()?;
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    steps: Vec<Step>,
}

impl RegistryBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a registration.
    pub fn register(mut self, name: impl Into<String>, constructor: impl Into<Constructor>) -> Self {
        self.steps
            .push(Step::Register(name.into(), constructor.into()));
        self
    }

    /// Queue a registration of `M::default`.
    pub fn register_default<M: Mixin + Default>(self, name: impl Into<String>) -> Self {
        self.register(name, Constructor::of::<M>())
    }

    /// Queue an extension of a name registered by an earlier step.
    pub fn extend<X: Extension + 'static>(
        mut self,
        name: impl Into<String>,
        mut extension: X,
    ) -> Self {
        self.steps.push(Step::Extend(
            name.into(),
            Box::new(move |parent: Constructor| extension.apply(parent)),
        ));
        self
    }

    /// Get the number of queued steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the builder has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Apply all steps to a new registry.
    ///
    /// # Errors
    ///
    /// Returns the [`LookupError`] of the first extension whose name was not
    /// registered by an earlier step.
    pub fn build(self) -> Result<Registry, LookupError> {
        let registry = Registry::new();
        for step in self.steps {
            match step {
                Step::Register(name, constructor) => registry.register(name, constructor),
                Step::Extend(name, extension) => registry.extend(&name, extension)?,
            }
        }
        Ok(registry)
    }
}
