//! Evaluation context.
//!
//! An [`Interpreter`] owns the one [`Namespace`] a program runs against,
//! seeded with host globals in its root frame. It is the handle a host
//! keeps between runs; nodes can also be evaluated against a bare
//! namespace directly.

mod builder;

pub use builder::InterpreterBuilder;

use prex_ir::{Name, Number};

use crate::{Namespace, Node, Value};

/// Owns a namespace and the default `force` flag for runs.
pub struct Interpreter {
    ns: Namespace,
    globals: Vec<(Name, Value)>,
    force: bool,
}

impl Interpreter {
    /// An interpreter with an empty namespace that honors caches.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Evaluate `node` with the configured `force` flag.
    pub fn run(&mut self, node: &Node) -> Value {
        self.evaluate(node, self.force)
    }

    /// Evaluate `node` to a number with the configured `force` flag.
    pub fn run_number(&mut self, node: &Node) -> Number {
        node.to_number(&mut self.ns, self.force)
    }

    /// Evaluate `node`, reusing caches unless `force` is set.
    #[tracing::instrument(level = "debug", skip_all, fields(node = node.canonical_name(), force = force))]
    pub fn evaluate(&mut self, node: &Node, force: bool) -> Value {
        node.evaluate(&mut self.ns, force)
    }

    #[inline]
    pub fn namespace(&self) -> &Namespace {
        &self.ns
    }

    #[inline]
    pub fn namespace_mut(&mut self) -> &mut Namespace {
        &mut self.ns
    }

    /// Whether runs force re-evaluation.
    #[inline]
    pub fn forces(&self) -> bool {
        self.force
    }

    /// Discard every binding and re-seed the globals.
    pub fn reset(&mut self) {
        self.ns = seeded(&self.globals);
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn seeded(globals: &[(Name, Value)]) -> Namespace {
    let mut ns = Namespace::new();
    for (name, value) in globals {
        ns.set_root(name.clone(), value.clone());
    }
    ns
}
