//! Tree-building functions, one per canonical name.
//!
//! `mod` is a keyword, so the modulo constructor is [`modulo`].

use std::rc::Rc;

use prex_ir::{Name, Number, OpKind};

use crate::node::{Call, Callee, Lambda, NodeKind, Operator, Switch, Variable};
use crate::Node;

/// Numeric literal.
pub fn num(n: impl Into<Number>) -> Node {
    Node::from(n.into())
}

/// Variable reference.
pub fn var(name: impl Into<Name>) -> Node {
    Node::from(Variable::new(name))
}

fn operator(kind: OpKind, operands: impl IntoIterator<Item = Node>) -> Node {
    Node::from(Operator::new(kind, operands))
}

macro_rules! nary_constructors {
    ($($(#[$meta:meta])* $name:ident => $kind:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(operands: impl IntoIterator<Item = Node>) -> Node {
                operator(OpKind::$kind, operands)
            }
        )*
    };
}

macro_rules! unary_constructors {
    ($($(#[$meta:meta])* $name:ident => $kind:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(operand: Node) -> Node {
                operator(OpKind::$kind, [operand])
            }
        )*
    };
}

nary_constructors! {
    /// Generic operator; returns its first operand unless given a custom
    /// function through [`Operator::with_function`].
    op => Generic;
    /// Sum, `+`.
    add => Add;
    /// First operand minus the rest, `-`.
    sub => Sub;
    /// Product, `*`.
    mul => Mul;
    /// True division, `/`. Zero-guarded.
    div => Div;
    /// Floor division, `//`. Zero-guarded.
    fdiv => FloorDiv;
    /// Modulo with the divisor's sign, `%`. Zero-guarded.
    modulo => Mod;
    /// Left-to-right power, `**`. Zero-guarded.
    xpow => Pow;
    /// `<` chain.
    les => Lt;
    /// `>` chain.
    gtr => Gt;
    /// `<=` chain.
    leq => LtEq;
    /// `>=` chain.
    geq => GtEq;
    /// Three-way comparison code, `<>`.
    cmp => Cmp;
    /// `==` chain.
    equ => Eq;
    /// `!=` chain.
    neq => NotEq;
    /// All truthy, `&&`.
    xand => And;
    /// Any truthy, `||`.
    yor => Or;
    /// First operand shifted left by the sum of the rest, `<<`.
    shift_left => Shl;
    /// First operand shifted right by the sum of the rest, `>>`.
    shift_right => Shr;
    /// Bitwise and, `&`.
    band => BitAnd;
    /// Bitwise exclusive or, `^`.
    xor => BitXor;
    /// Bitwise or, `|`.
    bor => BitOr;
    /// Evaluates to its first operand; renders every operand with its value.
    show => Show;
}

unary_constructors! {
    /// Negation, `-a`.
    neg => Neg;
    /// Logical not, `!a`.
    xnot => Not;
    /// Bitwise not, `~`.
    bnot => BitNot;
}

/// `(base ** power) mod modulus`, `**%`. Zero-guarded.
pub fn bpm(base: Node, power: Node, modulus: Node) -> Node {
    operator(OpKind::ModPow, [base, power, modulus])
}

/// Sequential assignment, `:=`.
pub fn xset(pairs: impl IntoIterator<Item = (Variable, Node)>) -> Node {
    Node::new(NodeKind::Assign(pairs.into_iter().collect()))
}

/// Multiway switch, `?`. A missing `otherwise` is the literal `0`.
pub fn tn(
    subject: Node,
    cases: impl IntoIterator<Item = (Node, Node)>,
    otherwise: Option<Node>,
) -> Node {
    Node::from(Switch::new(subject, cases, otherwise))
}

/// Shared function definition, for building both the `lam` node and
/// direct calls to it.
pub fn lambda<P: Into<Name>>(
    name: impl Into<Name>,
    params: impl IntoIterator<Item = P>,
    body: Node,
) -> Rc<Lambda> {
    Rc::new(Lambda::new(
        name,
        params.into_iter().map(Variable::new),
        body,
    ))
}

/// Function definition node, `λ`.
pub fn lam<P: Into<Name>>(
    name: impl Into<Name>,
    params: impl IntoIterator<Item = P>,
    body: Node,
) -> Node {
    Node::from(lambda(name, params, body))
}

/// Invocation of a lambda held directly, or of a name resolved when the
/// call is evaluated.
pub fn call(callee: impl Into<Callee>, args: impl IntoIterator<Item = Node>) -> Node {
    Node::from(Call::new(callee.into(), args))
}

/// Invocation of whatever function `name` is bound to at evaluation time.
pub fn call_named(name: impl Into<Name>, args: impl IntoIterator<Item = Node>) -> Node {
    call(Variable::new(name), args)
}
