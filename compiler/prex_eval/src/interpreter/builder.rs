//! `InterpreterBuilder` for creating configured interpreters.

use prex_ir::{Name, Number};

use super::{seeded, Interpreter};
use crate::Value;

/// Builder for [`Interpreter`].
///
/// Globals are bound in the root frame, where every call frame can see
/// them unless it shadows the name.
#[derive(Default)]
pub struct InterpreterBuilder {
    globals: Vec<(Name, Value)>,
    force: bool,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value` in the root frame.
    #[must_use]
    pub fn global(mut self, name: impl Into<Name>, value: impl Into<Value>) -> Self {
        self.globals.push((name.into(), value.into()));
        self
    }

    /// Bind every `(name, number)` pair in the root frame.
    #[must_use]
    pub fn globals<N: Into<Name>>(mut self, globals: impl IntoIterator<Item = (N, Number)>) -> Self {
        self.globals.extend(
            globals
                .into_iter()
                .map(|(name, n)| (name.into(), Value::Number(n))),
        );
        self
    }

    /// Force re-evaluation on every run.
    #[must_use]
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            ns: seeded(&self.globals),
            globals: self.globals,
            force: self.force,
        }
    }
}
