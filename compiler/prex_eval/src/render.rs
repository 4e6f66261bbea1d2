//! Text renderings of a tree.
//!
//! `source` is the human-readable parenthesized form, `(+ 2 3)`.
//! `reconstruction` is the canonical constructor form, `add(num(2), num(3))`,
//! which names every node by its registry name and prints only the
//! operator overrides that differ from the kind's defaults.

use std::cell::RefCell;
use std::fmt::{self, Display, Formatter};

use crate::node::{Call, Callee, Lambda, NodeKind, Operator, Switch, Variable};
use crate::stack::ensure_sufficient_stack;
use crate::{Namespace, Node};

impl Node {
    /// Human-readable rendering. `show` operands print their cached value,
    /// or `?` before they have been evaluated.
    pub fn source(&self) -> String {
        Source::new(self, None).to_string()
    }

    /// Human-readable rendering with every `show` operand evaluated in `ns`
    /// first, so each marker carries a number. Function values collapse to
    /// the number they produce when called without arguments.
    pub fn source_in(&self, ns: &mut Namespace) -> String {
        let ns = RefCell::new(ns);
        Source::new(self, Some(&ns)).to_string()
    }

    /// Canonical constructor rendering.
    pub fn reconstruction(&self) -> String {
        Reconstruction(self).to_string()
    }
}

struct Source<'a, 'n> {
    node: &'a Node,
    ns: Option<&'a RefCell<&'n mut Namespace>>,
}

impl<'a, 'n> Source<'a, 'n> {
    fn new(node: &'a Node, ns: Option<&'a RefCell<&'n mut Namespace>>) -> Self {
        Source { node, ns }
    }

    fn child(&self, node: &'a Node) -> Source<'a, 'n> {
        Source::new(node, self.ns)
    }

    fn operator(&self, op: &'a Operator, f: &mut Formatter<'_>) -> fmt::Result {
        let symbol = op.symbol();
        if op.kind().is_prefix() {
            return match op.operands().first() {
                Some(operand) => write!(f, "{symbol}{}", self.child(operand)),
                None => write!(f, "{symbol}0"),
            };
        }
        write!(f, "({symbol}")?;
        if op.kind() == prex_ir::OpKind::Show {
            for operand in op.operands() {
                let marker = match self.ns {
                    Some(ns) => Some(
                        operand
                            .to_number(&mut **ns.borrow_mut(), false)
                            .to_string(),
                    ),
                    None => operand.cached().map(|value| value.to_string()),
                };
                let marker = marker.as_deref().unwrap_or("?");
                write!(f, " [{} {marker}]", self.child(operand))?;
            }
        } else {
            for operand in op.operands() {
                write!(f, " {}", self.child(operand))?;
            }
        }
        write!(f, ")")
    }

    fn switch(&self, switch: &'a Switch, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(? {}", self.child(switch.subject()))?;
        for (case, result) in switch.cases() {
            write!(f, " [{} {}]", self.child(case), self.child(result))?;
        }
        write!(f, " [{}])", self.child(switch.otherwise()))
    }

    fn lambda(&self, lambda: &'a Lambda, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(λ {} (", lambda.name().name())?;
        write_separated(f, lambda.params().iter().map(Variable::name), " ")?;
        write!(f, ") {})", self.child(lambda.body()))
    }
}

impl Display for Source<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self.node.kind() {
            NodeKind::Literal(n) => write!(f, "{n}"),
            NodeKind::Variable(var) => write!(f, "{}", var.name()),
            NodeKind::Operator(op) => self.operator(op, f),
            NodeKind::Assign(pairs) => {
                write!(f, "(:=")?;
                for (target, expr) in pairs {
                    write!(f, " [{} {}]", target.name(), self.child(expr))?;
                }
                write!(f, ")")
            }
            NodeKind::Switch(switch) => self.switch(switch, f),
            NodeKind::Lambda(lambda) => self.lambda(lambda, f),
            NodeKind::Call(call) => {
                write!(f, "((λ{}) (", call.callee().name())?;
                write_separated(f, call.args().iter().map(|arg| self.child(arg)), " ")?;
                write!(f, "))")
            }
        })
    }
}

struct Reconstruction<'a>(&'a Node);

impl Display for Reconstruction<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self.0.kind() {
            NodeKind::Literal(n) => write!(f, "num({n})"),
            NodeKind::Variable(var) => write!(f, "var({:?})", var.name().as_str()),
            NodeKind::Operator(op) => reconstruct_operator(op, f),
            NodeKind::Assign(pairs) => {
                write!(f, "xset(")?;
                write_separated(
                    f,
                    pairs.iter().map(|(target, expr)| {
                        format!(
                            "(var({:?}), {})",
                            target.name().as_str(),
                            Reconstruction(expr)
                        )
                    }),
                    ", ",
                )?;
                write!(f, ")")
            }
            NodeKind::Switch(switch) => reconstruct_switch(switch, f),
            NodeKind::Lambda(lambda) => {
                write!(f, "lam({:?}", lambda.name().name().as_str())?;
                for param in lambda.params() {
                    write!(f, ", {:?}", param.name().as_str())?;
                }
                write!(f, ", expression = {})", Reconstruction(lambda.body()))
            }
            NodeKind::Call(call) => reconstruct_call(call, f),
        })
    }
}

fn reconstruct_operator(op: &Operator, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}(", op.kind().canonical_name())?;
    let mut params: Vec<String> = op
        .operands()
        .iter()
        .map(|operand| Reconstruction(operand).to_string())
        .collect();
    if let Some(function) = op.function() {
        params.push(format!("fxn = {}", function.name()));
    }
    if let Some(symbol) = op.symbol_override() {
        params.push(format!("fxn_name = {symbol:?}"));
    }
    if let Some(pre_evaluate) = op.pre_evaluate_override() {
        params.push(format!("pep = {pre_evaluate}"));
    }
    write_separated(f, params, ", ")?;
    write!(f, ")")
}

fn reconstruct_switch(switch: &Switch, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "tn({}", Reconstruction(switch.subject()))?;
    for (case, result) in switch.cases() {
        write!(f, ", ({}, {})", Reconstruction(case), Reconstruction(result))?;
    }
    let otherwise = switch.otherwise();
    if !otherwise.as_literal().is_some_and(|n| n.is_zero()) {
        write!(f, ", otherwise = {}", Reconstruction(otherwise))?;
    }
    write!(f, ")")
}

fn reconstruct_call(call: &Call, f: &mut Formatter<'_>) -> fmt::Result {
    let name = match call.callee() {
        Callee::Lambda(lambda) => lambda.name().name(),
        Callee::Named(var) => var.name(),
    };
    write!(f, "call({:?}", name.as_str())?;
    for arg in call.args() {
        write!(f, ", {}", Reconstruction(arg))?;
    }
    write!(f, ")")
}

fn write_separated<T: Display>(
    f: &mut Formatter<'_>,
    items: impl IntoIterator<Item = T>,
    separator: &str,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
