//! Memoized evaluation.
//!
//! Every node follows the same contract: an unevaluated node, or any node
//! asked to `force`, computes its value and caches it; otherwise the cached
//! value is returned untouched, even if the namespace has changed since.

use std::rc::Rc;

use prex_ir::Number;

use crate::node::{Call, Callee, Lambda, NodeKind, Operator, Switch, Variable};
use crate::operands::Operands;
use crate::stack::ensure_sufficient_stack;
use crate::{operators, Namespace, Node, Value};

impl Node {
    /// Evaluate the node, reusing the cached value unless `force` is set.
    ///
    /// `force` propagates to every child the computation touches.
    pub fn evaluate(&self, ns: &mut Namespace, force: bool) -> Value {
        if let NodeKind::Literal(n) = self.kind() {
            return Value::Number(n.clone());
        }
        if !force {
            if let Some(value) = self.cached() {
                tracing::trace!(node = self.canonical_name(), "cache hit");
                return value;
            }
        }
        let value = ensure_sufficient_stack(|| self.compute(ns, force));
        tracing::trace!(node = self.canonical_name(), force, value = %value, "evaluated");
        self.store(value.clone());
        value
    }

    /// Evaluate and collapse to a number. A function value is invoked with
    /// no arguments.
    pub fn to_number(&self, ns: &mut Namespace, force: bool) -> Number {
        self.evaluate(ns, force).to_number(ns, force)
    }

    fn compute(&self, ns: &mut Namespace, force: bool) -> Value {
        match self.kind() {
            NodeKind::Literal(n) => Value::Number(n.clone()),
            NodeKind::Variable(var) => var.get(ns, None),
            NodeKind::Operator(op) => op.apply(ns, force),
            NodeKind::Assign(pairs) => Value::Number(assign(pairs, ns, force)),
            NodeKind::Switch(switch) => Value::Number(switch.select(ns, force)),
            NodeKind::Lambda(lambda) => {
                let function = Value::Function(Rc::clone(lambda));
                lambda.name().set(ns, function.clone());
                function
            }
            NodeKind::Call(call) => call.invoke(ns, force),
        }
    }
}

impl Operator {
    /// Run the operator function over this node's operands.
    pub(crate) fn apply(&self, ns: &mut Namespace, force: bool) -> Value {
        let mut operands = if self.pre_evaluates() {
            Operands::evaluated(self.operands(), ns, force)
        } else {
            Operands::deferred(self.operands(), ns, force)
        };
        match self.function() {
            Some(custom) => custom.call(&mut operands),
            None => Value::Number(operators::apply(self.kind(), &mut operands)),
        }
    }
}

/// Write each pair in order; later pairs see earlier writes. The result is
/// the first pair's number.
fn assign(pairs: &[(Variable, Node)], ns: &mut Namespace, force: bool) -> Number {
    let mut first = None;
    for (target, expr) in pairs {
        let n = expr.to_number(ns, force);
        target.set(ns, Value::Number(n.clone()));
        if first.is_none() {
            first = Some(n);
        }
    }
    first.unwrap_or(Number::ZERO)
}

impl Switch {
    /// Match the subject against each case in order.
    ///
    /// Only the matching result, or the fallback, is evaluated.
    pub(crate) fn select(&self, ns: &mut Namespace, force: bool) -> Number {
        let subject = self.subject().to_number(ns, force);
        for (case, result) in self.cases() {
            if case.to_number(ns, force) == subject {
                return result.to_number(ns, force);
            }
        }
        self.otherwise().to_number(ns, force)
    }
}

impl Lambda {
    /// Bind `args` to the parameters in a fresh frame and force-evaluate
    /// the body there.
    ///
    /// Arguments are evaluated inside the new frame, so a later argument
    /// sees the parameters bound before it. Surplus arguments are ignored;
    /// parameters without an argument stay unbound.
    pub fn invoke(&self, ns: &mut Namespace, args: &[Node], force: bool) -> Value {
        let mut scope = ns.scoped();
        for (param, arg) in self.params().iter().zip(args) {
            let value = arg.evaluate(&mut scope, force);
            param.set(&mut scope, value);
        }
        self.body().evaluate(&mut scope, true)
    }
}

impl Call {
    #[tracing::instrument(level = "debug", skip_all, fields(callee = %self.callee().name()))]
    pub(crate) fn invoke(&self, ns: &mut Namespace, force: bool) -> Value {
        match self.callee() {
            Callee::Lambda(lambda) => lambda.invoke(ns, self.args(), force),
            Callee::Named(var) => match var.get(ns, None) {
                Value::Function(lambda) => lambda.invoke(ns, self.args(), force),
                number @ Value::Number(_) => number,
            },
        }
    }
}
