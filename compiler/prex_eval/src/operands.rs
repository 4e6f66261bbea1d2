//! Operand access for operator functions.
//!
//! An operator function sees its operands through [`Operands`], whichever
//! way the node evaluates them: all numbers up front (the default), or the
//! raw nodes evaluated on demand when the node turns pre-evaluation off.
//! Deferred access is what lets `&&`, `||` and comparison chains stop at
//! the first decisive operand.

use smallvec::SmallVec;

use prex_ir::Number;

use crate::{Namespace, Node, Value};

/// Operands handed to an operator function.
pub struct Operands<'a> {
    source: Source<'a>,
}

enum Source<'a> {
    Evaluated(SmallVec<[Number; 4]>),
    Deferred {
        nodes: &'a [Node],
        ns: &'a mut Namespace,
        force: bool,
    },
}

impl<'a> Operands<'a> {
    /// Evaluate every node to a number, left to right, forwarding `force`.
    pub(crate) fn evaluated(nodes: &[Node], ns: &mut Namespace, force: bool) -> Self {
        let numbers = nodes.iter().map(|node| node.to_number(ns, force)).collect();
        Operands {
            source: Source::Evaluated(numbers),
        }
    }

    /// Keep the nodes and evaluate each one only when it is read.
    pub(crate) fn deferred(nodes: &'a [Node], ns: &'a mut Namespace, force: bool) -> Self {
        Operands {
            source: Source::Deferred { nodes, ns, force },
        }
    }

    /// Operands that are already numbers.
    pub fn from_numbers(numbers: impl IntoIterator<Item = Number>) -> Self {
        Operands {
            source: Source::Evaluated(numbers.into_iter().collect()),
        }
    }

    pub fn len(&self) -> usize {
        match &self.source {
            Source::Evaluated(numbers) => numbers.len(),
            Source::Deferred { nodes, .. } => nodes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether operands are evaluated only when read.
    pub fn is_deferred(&self) -> bool {
        matches!(self.source, Source::Deferred { .. })
    }

    /// The operand at `index` as a number, evaluating it if deferred.
    pub fn number(&mut self, index: usize) -> Option<Number> {
        match &mut self.source {
            Source::Evaluated(numbers) => numbers.get(index).cloned(),
            Source::Deferred { nodes, ns, force } => {
                let node = nodes.get(index)?;
                Some(node.to_number(ns, *force))
            }
        }
    }

    /// The operand at `index`, or `0` when absent.
    #[inline]
    pub fn number_or_zero(&mut self, index: usize) -> Number {
        self.number(index).unwrap_or(Number::ZERO)
    }

    /// The operand at `index` as a value. A deferred function-valued operand
    /// stays a function.
    pub fn value(&mut self, index: usize) -> Option<Value> {
        match &mut self.source {
            Source::Evaluated(numbers) => numbers.get(index).cloned().map(Value::Number),
            Source::Deferred { nodes, ns, force } => {
                let node = nodes.get(index)?;
                Some(node.evaluate(ns, *force))
            }
        }
    }

    /// Every operand as a number.
    pub fn to_numbers(&mut self) -> SmallVec<[Number; 4]> {
        (0..self.len())
            .map(|index| self.number_or_zero(index))
            .collect()
    }

    /// The raw nodes, when deferred.
    pub fn nodes(&self) -> Option<&[Node]> {
        match &self.source {
            Source::Evaluated(_) => None,
            Source::Deferred { nodes, .. } => Some(nodes),
        }
    }

    /// The namespace, when deferred.
    pub fn namespace(&mut self) -> Option<&mut Namespace> {
        match &mut self.source {
            Source::Evaluated(_) => None,
            Source::Deferred { ns, .. } => Some(&mut **ns),
        }
    }
}
