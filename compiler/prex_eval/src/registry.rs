//! Canonical name to constructor lookup.
//!
//! Every operator kind and special form is registered once under its
//! canonical name. External builders (a future parser, the CLI) go through
//! [`OperatorRegistry::build`], which takes arguments shaped like the
//! reconstruction form and validates them.

use std::fmt;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use prex_ir::{FormKind, Name, Number, OpKind};

use crate::node::{CustomOperator, Operator};
use crate::{call_named, lam, num, tn, var, xset, Node, RegistryError};

/// What a registry entry builds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Operator(OpKind),
    Form(FormKind),
}

/// One registered name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RegistryEntry {
    pub name: &'static str,
    pub symbol: &'static str,
    pub kind: EntryKind,
}

/// Argument to [`OperatorRegistry::build`], mirroring the reconstruction
/// form: positional nodes, numbers and names, `(a, b)` pairs, and the
/// keyword arguments `otherwise`, `expression`, `fxn`, `fxn_name`, `pep`.
pub enum Argument {
    Node(Node),
    Number(Number),
    Name(Name),
    Pair(Node, Node),
    Otherwise(Node),
    Expression(Node),
    Function(CustomOperator),
    Symbol(String),
    PreEvaluate(bool),
}

impl Argument {
    /// Short description for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Argument::Node(_) => "a node",
            Argument::Number(_) => "a number",
            Argument::Name(_) => "a name",
            Argument::Pair(..) => "a pair",
            Argument::Otherwise(_) => "`otherwise`",
            Argument::Expression(_) => "`expression`",
            Argument::Function(_) => "`fxn`",
            Argument::Symbol(_) => "`fxn_name`",
            Argument::PreEvaluate(_) => "`pep`",
        }
    }
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Node(node) => write!(f, "Node({})", node.reconstruction()),
            Argument::Number(n) => write!(f, "Number({n})"),
            Argument::Name(name) => write!(f, "Name({name:?})"),
            Argument::Pair(a, b) => {
                write!(f, "Pair({}, {})", a.reconstruction(), b.reconstruction())
            }
            Argument::Otherwise(node) => write!(f, "Otherwise({})", node.reconstruction()),
            Argument::Expression(node) => write!(f, "Expression({})", node.reconstruction()),
            Argument::Function(function) => write!(f, "Function({})", function.name()),
            Argument::Symbol(symbol) => write!(f, "Symbol({symbol:?})"),
            Argument::PreEvaluate(pre) => write!(f, "PreEvaluate({pre})"),
        }
    }
}

impl From<Node> for Argument {
    fn from(node: Node) -> Self {
        Argument::Node(node)
    }
}

impl From<Number> for Argument {
    fn from(n: Number) -> Self {
        Argument::Number(n)
    }
}

impl From<&str> for Argument {
    fn from(name: &str) -> Self {
        Argument::Name(Name::new(name))
    }
}

impl From<(Node, Node)> for Argument {
    fn from((a, b): (Node, Node)) -> Self {
        Argument::Pair(a, b)
    }
}

/// Registry of every operator kind and special form.
pub struct OperatorRegistry {
    entries: Vec<RegistryEntry>,
    by_name: FxHashMap<&'static str, usize>,
}

static GLOBAL_REGISTRY: OnceLock<OperatorRegistry> = OnceLock::new();

/// The process-wide registry, built on first use.
pub fn registry() -> &'static OperatorRegistry {
    GLOBAL_REGISTRY.get_or_init(OperatorRegistry::new)
}

impl OperatorRegistry {
    /// Build a registry holding every operator kind and special form.
    pub fn new() -> Self {
        let mut registry = OperatorRegistry {
            entries: Vec::with_capacity(FormKind::ALL.len() + OpKind::ALL.len()),
            by_name: FxHashMap::default(),
        };
        for form in FormKind::ALL {
            registry.register(RegistryEntry {
                name: form.canonical_name(),
                symbol: form.symbol(),
                kind: EntryKind::Form(form),
            });
        }
        for kind in OpKind::ALL {
            registry.register(RegistryEntry {
                name: kind.canonical_name(),
                symbol: kind.symbol(),
                kind: EntryKind::Operator(kind),
            });
        }
        registry
    }

    fn register(&mut self, entry: RegistryEntry) {
        self.by_name.insert(entry.name, self.entries.len());
        self.entries.push(entry);
    }

    /// Look up an entry by canonical name.
    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.by_name.get(name).map(|&index| &self.entries[index])
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Entries in registration order: special forms, then operators.
    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the node registered under `name` from `args`.
    pub fn build(&self, name: &str, args: Vec<Argument>) -> Result<Node, RegistryError> {
        let entry = self
            .get(name)
            .ok_or_else(|| RegistryError::UnknownOperator {
                name: name.to_string(),
            })?;
        match entry.kind {
            EntryKind::Operator(kind) => build_operator(kind, args),
            EntryKind::Form(form) => build_form(form, args),
        }
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Positional operand count a kind requires, if fixed.
fn fixed_arity(kind: OpKind) -> Option<usize> {
    match kind {
        OpKind::Neg | OpKind::Not | OpKind::BitNot => Some(1),
        OpKind::ModPow => Some(3),
        _ => None,
    }
}

fn build_operator(kind: OpKind, args: Vec<Argument>) -> Result<Node, RegistryError> {
    let name = kind.canonical_name();
    let mut operands = Vec::with_capacity(args.len());
    let mut function = None;
    let mut symbol = None;
    let mut pre_evaluate = None;
    for arg in args {
        match arg {
            Argument::Node(node) => operands.push(node),
            Argument::Number(n) => operands.push(num(n)),
            Argument::Function(f) => function = Some(f),
            Argument::Symbol(s) => symbol = Some(s),
            Argument::PreEvaluate(pre) => pre_evaluate = Some(pre),
            other => return Err(RegistryError::unexpected(name, other.describe())),
        }
    }
    if let Some(expected) = fixed_arity(kind) {
        if operands.len() != expected {
            return Err(RegistryError::arity(name, expected, operands.len()));
        }
    }
    let mut op = Operator::new(kind, operands);
    if let Some(function) = function {
        op = op.with_function(function);
    }
    if let Some(symbol) = symbol {
        op = op.with_symbol(symbol);
    }
    if let Some(pre_evaluate) = pre_evaluate {
        op = op.with_pre_evaluate(pre_evaluate);
    }
    Ok(Node::from(op))
}

fn build_form(form: FormKind, args: Vec<Argument>) -> Result<Node, RegistryError> {
    let name = form.canonical_name();
    match form {
        FormKind::Num => match single(name, args)? {
            Argument::Number(n) => Ok(num(n)),
            other => Err(RegistryError::unexpected(name, other.describe())),
        },
        FormKind::Var => match single(name, args)? {
            Argument::Name(var_name) => Ok(var(var_name)),
            other => Err(RegistryError::unexpected(name, other.describe())),
        },
        FormKind::Assign => {
            let mut pairs = Vec::with_capacity(args.len());
            for arg in args {
                match arg {
                    Argument::Pair(target, expr) => match target.to_variable() {
                        Some(variable) => pairs.push((variable.clone(), expr)),
                        None => {
                            return Err(RegistryError::unexpected(name, "a non-variable target"))
                        }
                    },
                    other => return Err(RegistryError::unexpected(name, other.describe())),
                }
            }
            Ok(xset(pairs))
        }
        FormKind::Switch => {
            let mut args = args.into_iter();
            let subject = match args.next() {
                Some(Argument::Node(node)) => node,
                Some(Argument::Number(n)) => num(n),
                Some(other) => return Err(RegistryError::unexpected(name, other.describe())),
                None => return Err(RegistryError::arity(name, 1, 0)),
            };
            let mut cases = Vec::new();
            let mut otherwise = None;
            for arg in args {
                match arg {
                    Argument::Pair(case, result) => cases.push((case, result)),
                    Argument::Otherwise(node) => otherwise = Some(node),
                    other => return Err(RegistryError::unexpected(name, other.describe())),
                }
            }
            Ok(tn(subject, cases, otherwise))
        }
        FormKind::Lambda => {
            let mut args = args.into_iter();
            let fn_name = match args.next() {
                Some(Argument::Name(fn_name)) => fn_name,
                Some(other) => return Err(RegistryError::unexpected(name, other.describe())),
                None => return Err(RegistryError::arity(name, 1, 0)),
            };
            let mut params = Vec::new();
            let mut body = None;
            for arg in args {
                match arg {
                    Argument::Name(param) => params.push(param),
                    Argument::Expression(node) => body = Some(node),
                    other => return Err(RegistryError::unexpected(name, other.describe())),
                }
            }
            let body = body.ok_or(RegistryError::MissingKeyword {
                operator: name,
                keyword: "expression",
            })?;
            Ok(lam(fn_name, params, body))
        }
        FormKind::Call => {
            let mut args = args.into_iter();
            let callee = match args.next() {
                Some(Argument::Name(callee)) => callee,
                Some(other) => return Err(RegistryError::unexpected(name, other.describe())),
                None => return Err(RegistryError::arity(name, 1, 0)),
            };
            let mut call_args = Vec::new();
            for arg in args {
                match arg {
                    Argument::Node(node) => call_args.push(node),
                    Argument::Number(n) => call_args.push(num(n)),
                    other => return Err(RegistryError::unexpected(name, other.describe())),
                }
            }
            Ok(call_named(callee, call_args))
        }
    }
}

/// The only argument of a one-argument form.
fn single(name: &'static str, args: Vec<Argument>) -> Result<Argument, RegistryError> {
    let found = args.len();
    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (Some(arg), None) => Ok(arg),
        _ => Err(RegistryError::arity(name, 1, found)),
    }
}

#[cfg(test)]
mod tests;
