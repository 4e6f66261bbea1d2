//! Node tags.
//!
//! The node set is closed, so every kind is an enum variant and every
//! per-kind attribute (canonical name, symbol, evaluation policy) is a
//! `match`. `OpKind` covers the operator family that shares the generic
//! operand-list evaluation; `FormKind` covers the special forms that carry
//! their own payload.

/// Operator family tag.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OpKind {
    /// Base operator; returns its first operand unless given a custom function.
    Generic,

    // Arithmetic
    Add,
    Sub,
    Neg,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    ModPow,

    // Comparison
    Lt,
    Gt,
    LtEq,
    GtEq,
    Cmp,
    Eq,
    NotEq,

    // Logical
    Not,
    And,
    Or,

    // Bitwise
    Shl,
    Shr,
    BitNot,
    BitAnd,
    BitXor,
    BitOr,

    // Debugging
    Show,
}

impl OpKind {
    /// Every operator kind, in registration order.
    pub const ALL: [OpKind; 27] = [
        OpKind::Generic,
        OpKind::Add,
        OpKind::Sub,
        OpKind::Neg,
        OpKind::Mul,
        OpKind::Div,
        OpKind::FloorDiv,
        OpKind::Mod,
        OpKind::Pow,
        OpKind::ModPow,
        OpKind::Lt,
        OpKind::Gt,
        OpKind::LtEq,
        OpKind::GtEq,
        OpKind::Cmp,
        OpKind::Eq,
        OpKind::NotEq,
        OpKind::Not,
        OpKind::And,
        OpKind::Or,
        OpKind::Shl,
        OpKind::Shr,
        OpKind::BitNot,
        OpKind::BitAnd,
        OpKind::BitXor,
        OpKind::BitOr,
        OpKind::Show,
    ];

    /// Name used by the reconstruction form and the operator registry.
    pub const fn canonical_name(self) -> &'static str {
        match self {
            Self::Generic => "op",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Neg => "neg",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::FloorDiv => "fdiv",
            Self::Mod => "mod",
            Self::Pow => "xpow",
            Self::ModPow => "bpm",
            Self::Lt => "les",
            Self::Gt => "gtr",
            Self::LtEq => "leq",
            Self::GtEq => "geq",
            Self::Cmp => "cmp",
            Self::Eq => "equ",
            Self::NotEq => "neq",
            Self::Not => "xnot",
            Self::And => "xand",
            Self::Or => "yor",
            Self::Shl => "shift_left",
            Self::Shr => "shift_right",
            Self::BitNot => "bnot",
            Self::BitAnd => "band",
            Self::BitXor => "xor",
            Self::BitOr => "bor",
            Self::Show => "show",
        }
    }

    /// Symbol used by the source rendering.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Generic => "f",
            Self::Add => "+",
            Self::Sub | Self::Neg => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::ModPow => "**%",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Cmp => "<>",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Not => "!",
            Self::And => "&&",
            Self::Or => "||",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::BitNot => "~",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::BitOr => "|",
            Self::Show => "=",
        }
    }

    /// Look up a kind by canonical name.
    pub fn from_canonical(name: &str) -> Option<OpKind> {
        OpKind::ALL
            .into_iter()
            .find(|kind| kind.canonical_name() == name)
    }

    /// Whether operands are evaluated before the operator function runs,
    /// unless a node overrides it.
    ///
    /// Every operator in the family pre-evaluates; special forms that need
    /// short-circuiting are `FormKind`s instead.
    #[inline]
    pub const fn pre_evaluates(self) -> bool {
        true
    }

    /// Division-family operators, whose numeric faults become `0.0`.
    #[inline]
    pub const fn is_zero_guarded(self) -> bool {
        matches!(
            self,
            Self::Div | Self::FloorDiv | Self::Mod | Self::Pow | Self::ModPow
        )
    }

    /// Operators rendered as a bare prefix (`-x`, `!x`) instead of a group.
    #[inline]
    pub const fn is_prefix(self) -> bool {
        matches!(self, Self::Neg | Self::Not)
    }

    /// N-ary operators whose result does not depend on operand order.
    pub const fn is_commutative(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::Mul
                | Self::And
                | Self::Or
                | Self::BitAnd
                | Self::BitXor
                | Self::BitOr
        )
    }
}

/// Special form tag.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FormKind {
    /// Numeric literal.
    Num,
    /// Named variable.
    Var,
    /// Sequential assignment `:=`.
    Assign,
    /// Multiway switch `?`.
    Switch,
    /// Function definition `λ`.
    Lambda,
    /// Function invocation.
    Call,
}

impl FormKind {
    /// Every special form, in registration order.
    pub const ALL: [FormKind; 6] = [
        FormKind::Num,
        FormKind::Var,
        FormKind::Assign,
        FormKind::Switch,
        FormKind::Lambda,
        FormKind::Call,
    ];

    /// Name used by the reconstruction form and the operator registry.
    pub const fn canonical_name(self) -> &'static str {
        match self {
            Self::Num => "num",
            Self::Var => "var",
            Self::Assign => "xset",
            Self::Switch => "tn",
            Self::Lambda => "lam",
            Self::Call => "call",
        }
    }

    /// Symbol used by the source rendering. Literals and variables render
    /// as themselves and have none.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Num | Self::Var => "",
            Self::Assign => ":=",
            Self::Switch => "?",
            Self::Lambda | Self::Call => "λ",
        }
    }

    /// Look up a form by canonical name.
    pub fn from_canonical(name: &str) -> Option<FormKind> {
        FormKind::ALL
            .into_iter()
            .find(|form| form.canonical_name() == name)
    }
}

#[cfg(test)]
mod tests;
