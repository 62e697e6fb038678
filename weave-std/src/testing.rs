//! Testing utilities for Weave.
//!
//! This module provides utilities to make testing registries and hosts easier.
//!
//! # Features
//!
//! - [`Tag`]: A trivial mixin carrying a label
//! - [`CountingConstructor`]: A constructor that counts how often it runs
//! - [`RecordingHost`]: A host that records attachments and can refuse names

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use weave_core::{Constructor, Host, Mixin};

// ============================================================================
// Tag
// ============================================================================

/// A mixin that only carries a label.
///
/// Handy for telling constructors apart after injection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag(pub String);

impl Tag {
    /// Create a tag.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label.
    pub fn label(&self) -> &str {
        &self.0
    }

    /// A constructor producing `Tag::new(label)`.
    pub fn constructor(label: &'static str) -> Constructor {
        Constructor::new(move || Tag::new(label))
    }
}

impl Mixin for Tag {}

// ============================================================================
// Counting Constructor
// ============================================================================

/// Wraps a constructor and counts its invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counting = CountingConstructor::new(Tag::constructor("a"));
/// registry.register("a", counting.constructor());
///
/// registry.inject("a", &mut host)?;
/// assert_eq!(counting.count(), 1);
/// ```
#[derive(Clone)]
pub struct CountingConstructor {
    count: Arc<AtomicUsize>,
    constructor: Constructor,
}

impl CountingConstructor {
    /// Start counting invocations of `inner`.
    pub fn new(inner: Constructor) -> Self {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let constructor = Constructor::from_boxed(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            inner.construct()
        });
        Self { count, constructor }
    }

    /// The counting constructor to register.
    pub fn constructor(&self) -> Constructor {
        self.constructor.clone()
    }

    /// How many instances have been built.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Recording Host
// ============================================================================

/// A host that records every attachment in order.
///
/// Names passed to [`refusing`](Self::refusing) are not accepted, which lets
/// tests exercise injection failures caused by the host.
#[derive(Debug, Default)]
pub struct RecordingHost {
    attached: Vec<(String, Box<dyn Mixin>)>,
    refused: Vec<String>,
}

impl RecordingHost {
    /// Create a host that accepts every name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host that refuses the given names.
    pub fn refusing<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attached: Vec::new(),
            refused: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Names in attachment order, including repeats.
    pub fn order(&self) -> Vec<&str> {
        self.attached.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// The most recent instance attached under `name`.
    pub fn last(&self, name: &str) -> Option<&dyn Mixin> {
        self.attached
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, m)| &**m)
    }

    /// Number of attachments.
    pub fn count(&self) -> usize {
        self.attached.len()
    }
}

impl Host for RecordingHost {
    fn attach(&mut self, name: &str, instance: Box<dyn Mixin>) {
        self.attached.push((name.to_owned(), instance));
    }

    fn accepts(&self, name: &str) -> bool {
        !self.refused.iter().any(|r| r == name)
    }
}
