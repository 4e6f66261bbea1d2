//! RAII frame guard for the namespace.
//!
//! [`ScopedNamespace`] pushes a frame when created and pops it when
//! dropped, including while unwinding, so a call frame can never leak into
//! the caller's namespace.
//!
//! The guard holds `&mut Namespace` and implements `Deref`/`DerefMut`, so
//! evaluation inside the scope takes the guard wherever it takes a
//! namespace:
//!
//! ```
//! use prex_eval::{Namespace, Number, Value};
//!
//! let mut ns = Namespace::new();
//! {
//!     let mut scoped = ns.scoped();
//!     scoped.set("x", Value::Number(Number::Int(1)));
//!     assert_eq!(scoped.depth(), 2);
//! }
//! assert_eq!(ns.depth(), 1);
//! assert!(!ns.has("x"));
//! ```

use std::ops::{Deref, DerefMut};

use prex_ir::Name;

use crate::{Namespace, Value};

/// Guard that pops one namespace frame on drop.
pub struct ScopedNamespace<'ns> {
    ns: &'ns mut Namespace,
}

impl Drop for ScopedNamespace<'_> {
    fn drop(&mut self) {
        self.ns.pop();
    }
}

impl Deref for ScopedNamespace<'_> {
    type Target = Namespace;

    fn deref(&self) -> &Self::Target {
        self.ns
    }
}

impl DerefMut for ScopedNamespace<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ns
    }
}

impl Namespace {
    /// Push a frame and return a guard that pops it on drop.
    pub fn scoped(&mut self) -> ScopedNamespace<'_> {
        self.push();
        ScopedNamespace { ns: self }
    }

    /// Run `f` in a fresh frame. The frame is popped when `f` returns or
    /// panics.
    pub fn with_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedNamespace<'_>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }

    /// Run `f` in a fresh frame pre-populated with `bindings`.
    pub fn with_bindings<T, F, I>(&mut self, bindings: I, f: F) -> T
    where
        F: FnOnce(&mut ScopedNamespace<'_>) -> T,
        I: IntoIterator<Item = (Name, Value)>,
    {
        self.with_scope(|scoped| {
            for (name, value) in bindings {
                scoped.set(name, value);
            }
            f(scoped)
        })
    }
}

#[cfg(test)]
#[expect(
    clippy::semicolon_if_nothing_returned,
    reason = "test code: relaxed style for readability"
)]
