#![allow(dead_code)]

use weave::{Constructor, Mixin};

// ============================================================================
// Test Mixins
// ============================================================================

/// The `counter` scenario's base mixin.
#[derive(Debug, Default)]
pub struct Counter {
    pub value: i32,
}

impl Counter {
    pub fn increment(&mut self) {
        self.value += 1;
    }
}

impl Mixin for Counter {}

/// Extends any mixin and overrides the counter's starting value.
pub struct Tens {
    pub base: Box<dyn Mixin>,
    pub value: i32,
}

impl Tens {
    pub fn wrap(base: Box<dyn Mixin>) -> Self {
        Self { base, value: 10 }
    }
}

impl Mixin for Tens {
    fn base(&self) -> Option<&dyn Mixin> {
        Some(&*self.base)
    }

    fn base_mut(&mut self) -> Option<&mut dyn Mixin> {
        Some(&mut *self.base)
    }
}

/// Adds a capability on top of whatever it wraps.
pub struct Audited {
    pub base: Box<dyn Mixin>,
    pub entries: Vec<String>,
}

impl Audited {
    pub fn wrap(base: Box<dyn Mixin>) -> Self {
        Self {
            base,
            entries: vec!["created".to_string()],
        }
    }
}

impl Mixin for Audited {
    fn base(&self) -> Option<&dyn Mixin> {
        Some(&*self.base)
    }

    fn base_mut(&mut self) -> Option<&mut dyn Mixin> {
        Some(&mut *self.base)
    }
}

/// Form-field validation, standing in for an external collaborator.
#[derive(Debug, Default)]
pub struct Validator {
    pub required: Vec<&'static str>,
}

impl Validator {
    pub fn missing<'a>(&self, present: &[&'a str]) -> Vec<&'static str> {
        self.required
            .iter()
            .copied()
            .filter(|field| !present.contains(field))
            .collect()
    }
}

impl Mixin for Validator {}

/// Form submission, standing in for an external collaborator.
#[derive(Debug, Default)]
pub struct Submitter {
    pub endpoint: String,
}

impl Mixin for Submitter {}

pub fn counter() -> Constructor {
    Constructor::new(|| Counter { value: 0 })
}
