//! Expression tree nodes.
//!
//! A [`Node`] pairs a [`NodeKind`] payload with a two-state [`Cache`]. The
//! tree is structurally immutable once built; only caches change, through
//! `RefCell`, so evaluation takes `&self` and a lambda body can be
//! re-entered by recursive calls.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use prex_ir::{FormKind, Name, Number, OpKind};

use crate::operands::Operands;
use crate::{Namespace, Value};

/// Memoized evaluation state of a node.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Cache {
    /// Never evaluated.
    #[default]
    Unevaluated,
    /// Evaluated; returned as-is until a forced re-evaluation.
    Evaluated(Value),
}

/// A node of the expression tree.
pub struct Node {
    kind: NodeKind,
    cache: RefCell<Cache>,
}

/// Payload of a node. One variant per node family.
#[derive(Debug)]
pub enum NodeKind {
    /// Numeric literal. Always evaluated.
    Literal(Number),
    /// Variable resolved through the namespace at evaluation time.
    Variable(Variable),
    /// Operator over an ordered operand list.
    Operator(Operator),
    /// Sequential assignment of `(target, expression)` pairs.
    Assign(Vec<(Variable, Node)>),
    /// Multiway switch.
    Switch(Switch),
    /// Function definition.
    Lambda(Rc<Lambda>),
    /// Function invocation.
    Call(Call),
}

impl Node {
    /// Wrap a payload in a fresh node. Literals start evaluated.
    pub fn new(kind: NodeKind) -> Self {
        let cache = match &kind {
            NodeKind::Literal(n) => Cache::Evaluated(Value::Number(n.clone())),
            _ => Cache::Unevaluated,
        };
        Node {
            kind,
            cache: RefCell::new(cache),
        }
    }

    /// The node payload.
    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Whether a value is cached.
    pub fn is_evaluated(&self) -> bool {
        matches!(*self.cache.borrow(), Cache::Evaluated(_))
    }

    /// The cached value, if any.
    pub fn cached(&self) -> Option<Value> {
        match &*self.cache.borrow() {
            Cache::Evaluated(value) => Some(value.clone()),
            Cache::Unevaluated => None,
        }
    }

    /// Borrow the cache state.
    pub fn cache(&self) -> Ref<'_, Cache> {
        self.cache.borrow()
    }

    pub(crate) fn store(&self, value: Value) {
        self.cache.replace(Cache::Evaluated(value));
    }

    /// Canonical name of the node's kind (`add`, `var`, `tn`, ...).
    pub fn canonical_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Literal(_) => FormKind::Num.canonical_name(),
            NodeKind::Variable(_) => FormKind::Var.canonical_name(),
            NodeKind::Operator(op) => op.kind.canonical_name(),
            NodeKind::Assign(_) => FormKind::Assign.canonical_name(),
            NodeKind::Switch(_) => FormKind::Switch.canonical_name(),
            NodeKind::Lambda(_) => FormKind::Lambda.canonical_name(),
            NodeKind::Call(_) => FormKind::Call.canonical_name(),
        }
    }

    /// The variable handle this node stands for.
    ///
    /// Only variables and lambdas (through their own name) have one.
    pub fn to_variable(&self) -> Option<&Variable> {
        match &self.kind {
            NodeKind::Variable(var) => Some(var),
            NodeKind::Lambda(lambda) => Some(lambda.name()),
            _ => None,
        }
    }

    /// The shared definition, if this is a lambda.
    pub fn as_lambda(&self) -> Option<&Rc<Lambda>> {
        match &self.kind {
            NodeKind::Lambda(lambda) => Some(lambda),
            _ => None,
        }
    }

    /// The literal number, if this is a literal.
    pub fn as_literal(&self) -> Option<Number> {
        match &self.kind {
            NodeKind::Literal(n) => Some(n.clone()),
            _ => None,
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind)
            .field("cache", &*self.cache.borrow())
            .finish()
    }
}

impl From<Number> for Node {
    fn from(n: Number) -> Self {
        Node::new(NodeKind::Literal(n))
    }
}

impl From<Variable> for Node {
    fn from(var: Variable) -> Self {
        Node::new(NodeKind::Variable(var))
    }
}

impl From<Operator> for Node {
    fn from(op: Operator) -> Self {
        Node::new(NodeKind::Operator(op))
    }
}

impl From<Switch> for Node {
    fn from(switch: Switch) -> Self {
        Node::new(NodeKind::Switch(switch))
    }
}

impl From<Rc<Lambda>> for Node {
    fn from(lambda: Rc<Lambda>) -> Self {
        Node::new(NodeKind::Lambda(lambda))
    }
}

impl From<Call> for Node {
    fn from(call: Call) -> Self {
        Node::new(NodeKind::Call(call))
    }
}

/// Named handle into the namespace.
///
/// Holds no state of its own: reads and writes go to whichever frame binds
/// the name when the access happens.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Variable {
    name: Name,
}

impl Variable {
    pub fn new(name: impl Into<Name>) -> Self {
        Variable { name: name.into() }
    }

    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Resolve the name, innermost frame first.
    pub fn get(&self, ns: &Namespace, default: Option<Value>) -> Value {
        ns.get(&self.name, default)
    }

    /// Bind the name in the innermost frame.
    pub fn set(&self, ns: &mut Namespace, value: Value) {
        ns.set(self.name.clone(), value);
    }
}

/// Signature of a runtime-supplied operator function.
pub type OperatorFn = dyn Fn(&mut Operands<'_>) -> Value;

/// A named operator function supplied at runtime.
///
/// The name is what the reconstruction form prints for `fxn = ...`.
#[derive(Clone)]
pub struct CustomOperator {
    name: Name,
    func: Rc<OperatorFn>,
}

impl CustomOperator {
    pub fn new(name: impl Into<Name>, func: impl Fn(&mut Operands<'_>) -> Value + 'static) -> Self {
        CustomOperator {
            name: name.into(),
            func: Rc::new(func),
        }
    }

    /// A function over the operands' numbers, all evaluated up front.
    pub fn numeric(name: impl Into<Name>, func: impl Fn(&[Number]) -> Number + 'static) -> Self {
        Self::new(name, move |operands: &mut Operands<'_>| {
            Value::Number(func(&operands.to_numbers()))
        })
    }

    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    pub(crate) fn call(&self, operands: &mut Operands<'_>) -> Value {
        (self.func)(operands)
    }
}

impl fmt::Debug for CustomOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomOperator").field(&self.name).finish()
    }
}

/// Operator node payload.
///
/// `function`, `symbol` and `pre_evaluate` are per-node overrides of the
/// kind's defaults; `None` means "use the default".
#[derive(Debug)]
pub struct Operator {
    kind: OpKind,
    operands: Vec<Node>,
    function: Option<CustomOperator>,
    symbol: Option<String>,
    pre_evaluate: Option<bool>,
}

impl Operator {
    pub fn new(kind: OpKind, operands: impl IntoIterator<Item = Node>) -> Self {
        Operator {
            kind,
            operands: operands.into_iter().collect(),
            function: None,
            symbol: None,
            pre_evaluate: None,
        }
    }

    /// Replace the builtin operator function.
    #[must_use]
    pub fn with_function(mut self, function: CustomOperator) -> Self {
        self.function = Some(function);
        self
    }

    /// Replace the rendering symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Choose whether operands are evaluated before the operator function
    /// runs. When `false` the function evaluates operands on demand, so
    /// builtin `&&`, `||` and comparison chains short-circuit.
    #[must_use]
    pub fn with_pre_evaluate(mut self, pre_evaluate: bool) -> Self {
        self.pre_evaluate = Some(pre_evaluate);
        self
    }

    #[inline]
    pub fn kind(&self) -> OpKind {
        self.kind
    }

    #[inline]
    pub fn operands(&self) -> &[Node] {
        &self.operands
    }

    #[inline]
    pub fn function(&self) -> Option<&CustomOperator> {
        self.function.as_ref()
    }

    /// Effective rendering symbol.
    pub fn symbol(&self) -> &str {
        self.symbol.as_deref().unwrap_or(self.kind.symbol())
    }

    /// Effective pre-evaluation flag.
    pub fn pre_evaluates(&self) -> bool {
        self.pre_evaluate.unwrap_or(self.kind.pre_evaluates())
    }

    /// Symbol override, if it differs from the kind's default.
    pub fn symbol_override(&self) -> Option<&str> {
        self.symbol
            .as_deref()
            .filter(|symbol| *symbol != self.kind.symbol())
    }

    /// Pre-evaluation override, if it differs from the kind's default.
    pub fn pre_evaluate_override(&self) -> Option<bool> {
        self.pre_evaluate
            .filter(|pre| *pre != self.kind.pre_evaluates())
    }
}

/// Multiway switch payload: `subject`, ordered `(case, result)` pairs, and
/// the `otherwise` fallback.
#[derive(Debug)]
pub struct Switch {
    subject: Box<Node>,
    cases: Vec<(Node, Node)>,
    otherwise: Box<Node>,
}

impl Switch {
    pub fn new(
        subject: Node,
        cases: impl IntoIterator<Item = (Node, Node)>,
        otherwise: Option<Node>,
    ) -> Self {
        Switch {
            subject: Box::new(subject),
            cases: cases.into_iter().collect(),
            otherwise: Box::new(otherwise.unwrap_or_else(|| Node::from(Number::ZERO))),
        }
    }

    #[inline]
    pub fn subject(&self) -> &Node {
        &self.subject
    }

    #[inline]
    pub fn cases(&self) -> &[(Node, Node)] {
        &self.cases
    }

    #[inline]
    pub fn otherwise(&self) -> &Node {
        &self.otherwise
    }
}

/// Function definition: a name, ordered parameters and a body.
///
/// Shared (`Rc`) between the defining node, direct calls and function
/// values bound in the namespace.
#[derive(Debug)]
pub struct Lambda {
    name: Variable,
    params: Vec<Variable>,
    body: Node,
}

impl Lambda {
    pub fn new(name: impl Into<Name>, params: impl IntoIterator<Item = Variable>, body: Node) -> Self {
        Lambda {
            name: Variable::new(name),
            params: params.into_iter().collect(),
            body,
        }
    }

    #[inline]
    pub fn name(&self) -> &Variable {
        &self.name
    }

    #[inline]
    pub fn params(&self) -> &[Variable] {
        &self.params
    }

    #[inline]
    pub fn body(&self) -> &Node {
        &self.body
    }
}

/// What a call invokes.
#[derive(Debug)]
pub enum Callee {
    /// A lambda held directly.
    Lambda(Rc<Lambda>),
    /// A name resolved to a function value when the call is evaluated.
    Named(Variable),
}

impl Callee {
    /// The callee's name.
    pub fn name(&self) -> &Name {
        match self {
            Callee::Lambda(lambda) => lambda.name().name(),
            Callee::Named(var) => var.name(),
        }
    }
}

impl From<Rc<Lambda>> for Callee {
    fn from(lambda: Rc<Lambda>) -> Self {
        Callee::Lambda(lambda)
    }
}

impl From<&Rc<Lambda>> for Callee {
    fn from(lambda: &Rc<Lambda>) -> Self {
        Callee::Lambda(Rc::clone(lambda))
    }
}

impl From<Variable> for Callee {
    fn from(var: Variable) -> Self {
        Callee::Named(var)
    }
}

/// Function invocation payload.
#[derive(Debug)]
pub struct Call {
    callee: Callee,
    args: Vec<Node>,
}

impl Call {
    pub fn new(callee: Callee, args: impl IntoIterator<Item = Node>) -> Self {
        Call {
            callee,
            args: args.into_iter().collect(),
        }
    }

    #[inline]
    pub fn callee(&self) -> &Callee {
        &self.callee
    }

    #[inline]
    pub fn args(&self) -> &[Node] {
        &self.args
    }
}
