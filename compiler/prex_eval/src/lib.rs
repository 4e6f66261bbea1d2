//! Prex Eval - lazy, memoizing tree-walking evaluator.
//!
//! A program is a tree of [`Node`]s built directly by the host (there is no
//! textual parser). Evaluating a node computes its value once and caches it;
//! later evaluations return the cache until a forced re-evaluation is
//! requested.
//!
//! # Architecture
//!
//! - [`Node`]: a closed set of node kinds (`NodeKind`) plus a two-state cache
//! - [`Namespace`]: a stack of frames with innermost-first lookup. Name
//!   resolution is dynamic: a variable resolves against whatever frames are
//!   active when it is evaluated, not where it was written
//! - [`ScopedNamespace`]: RAII guard that pops a pushed frame on drop
//! - [`evaluate_operator`]: direct enum dispatch for the operator family
//! - Rendering: [`Node::source`] (infix-like) and [`Node::reconstruction`]
//!   (canonical constructor form)
//! - [`registry`]: canonical name to constructor, for external builders
//! - [`Interpreter`]: an evaluation context owning one namespace
//!
//! # Example
//!
//! ```
//! use prex_eval::{add, num, Namespace, Number};
//!
//! let mut ns = Namespace::new();
//! let sum = add([num(2), num(3)]);
//! assert_eq!(sum.to_number(&mut ns, false), Number::Int(5));
//! assert_eq!(sum.source(), "(+ 2 3)");
//! ```

mod constructors;
mod errors;
mod eval;
mod interpreter;
mod namespace;
mod node;
mod operands;
mod operators;
mod registry;
mod render;
mod scope_guard;
mod stack;
mod value;

#[cfg(test)]
mod tests;

pub use prex_ir::{FormKind, Name, Number, NumericFault, OpKind};

pub use constructors::{
    add, band, bnot, bor, bpm, call, call_named, cmp, div, equ, fdiv, geq, gtr, lam, lambda, leq,
    les, modulo, mul, neg, neq, num, op, shift_left, shift_right, show, sub, tn, var, xand, xnot,
    xor, xpow, xset, yor,
};
pub use errors::RegistryError;
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use namespace::{Frame, Namespace};
pub use node::{
    Cache, Call, Callee, CustomOperator, Lambda, Node, NodeKind, Operator, OperatorFn, Switch,
    Variable,
};
pub use operands::Operands;
pub use operators::evaluate_operator;
pub use registry::{registry, Argument, EntryKind, OperatorRegistry, RegistryEntry};
pub use scope_guard::ScopedNamespace;
pub use stack::ensure_sufficient_stack;
pub use value::Value;
