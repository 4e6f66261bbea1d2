//! Result of evaluating a node.

use std::fmt;
use std::rc::Rc;

use prex_ir::Number;

use crate::node::Lambda;
use crate::Namespace;

/// An evaluated value: a number, or a function produced by a lambda.
///
/// Namespace frames store `Value`s, so a lambda bound by name can be passed
/// as an argument and called through a variable.
#[derive(Clone, Debug)]
pub enum Value {
    Number(Number),
    Function(Rc<Lambda>),
}

impl Value {
    /// The number, if this is not a function.
    #[inline]
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(n.clone()),
            Value::Function(_) => None,
        }
    }

    /// The lambda, if this is a function.
    #[inline]
    pub fn as_function(&self) -> Option<&Rc<Lambda>> {
        match self {
            Value::Number(_) => None,
            Value::Function(lambda) => Some(lambda),
        }
    }

    /// Collapse to a number. A function is invoked with no arguments.
    pub fn to_number(&self, ns: &mut Namespace, force: bool) -> Number {
        match self {
            Value::Number(n) => n.clone(),
            Value::Function(lambda) => lambda.invoke(ns, &[], force).to_number(ns, force),
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Function(lambda) => write!(f, "λ{}", lambda.name().name()),
        }
    }
}
