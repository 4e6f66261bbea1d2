//! Builtin operator functions.
//!
//! The operator set is closed, so dispatch is a `match` on [`OpKind`].
//! Every function reads its operands through [`Operands`] by index, so the
//! same code serves pre-evaluated numbers and deferred nodes; chains that
//! can be decided early stop reading once the outcome is known.

use std::cmp::Ordering;

use prex_ir::{Number, NumericFault, OpKind};

use crate::Operands;

/// Apply the builtin function of `kind`.
pub(crate) fn apply(kind: OpKind, operands: &mut Operands<'_>) -> Number {
    match kind {
        OpKind::Generic | OpKind::Show => operands.number_or_zero(0),

        // Arithmetic
        OpKind::Add => fold(operands, Number::ZERO, Number::add),
        OpKind::Sub => {
            let first = operands.number_or_zero(0);
            first.sub(fold_from(operands, 1, Number::ZERO, Number::add))
        }
        OpKind::Neg => operands.number_or_zero(0).neg(),
        OpKind::Mul => fold(operands, Number::ONE, Number::mul),
        OpKind::Div => {
            let first = operands.number_or_zero(0);
            let divisor = fold_from(operands, 1, Number::ONE, Number::mul);
            zero_on_fault(kind, first.true_div(divisor))
        }
        OpKind::FloorDiv => zero_on_fault(kind, try_fold(operands, Number::floor_div)),
        OpKind::Mod => zero_on_fault(kind, try_fold(operands, Number::rem)),
        OpKind::Pow => zero_on_fault(kind, try_fold(operands, Number::pow)),
        OpKind::ModPow => {
            let base = operands.number_or_zero(0);
            let exponent = operands.number_or_zero(1);
            let modulus = operands.number_or_zero(2);
            zero_on_fault(kind, base.mod_pow(exponent, modulus))
        }

        // Comparison
        OpKind::Lt => chain(operands, |ord| ord == Some(Ordering::Less)),
        OpKind::Gt => chain(operands, |ord| ord == Some(Ordering::Greater)),
        OpKind::LtEq => chain(operands, |ord| {
            matches!(ord, Some(Ordering::Less | Ordering::Equal))
        }),
        OpKind::GtEq => chain(operands, |ord| {
            matches!(ord, Some(Ordering::Greater | Ordering::Equal))
        }),
        OpKind::Eq => chain(operands, |ord| ord == Some(Ordering::Equal)),
        OpKind::NotEq => chain(operands, |ord| ord != Some(Ordering::Equal)),
        OpKind::Cmp => compare_codes(operands),

        // Logical
        OpKind::Not => Number::from_bool(!operands.number_or_zero(0).is_truthy()),
        OpKind::And => {
            let all = (0..operands.len()).all(|i| operands.number_or_zero(i).is_truthy());
            Number::from_bool(all)
        }
        OpKind::Or => {
            let any = (0..operands.len()).any(|i| operands.number_or_zero(i).is_truthy());
            Number::from_bool(any)
        }

        // Bitwise
        OpKind::Shl => {
            let first = operands.number_or_zero(0);
            first.shl(fold_from(operands, 1, Number::ZERO, Number::add))
        }
        OpKind::Shr => {
            let first = operands.number_or_zero(0);
            first.shr(fold_from(operands, 1, Number::ZERO, Number::add))
        }
        OpKind::BitNot => operands.number_or_zero(0).bit_not(),
        OpKind::BitAnd => fold(operands, Number::ZERO, Number::bit_and),
        OpKind::BitXor => fold(operands, Number::ZERO, Number::bit_xor),
        OpKind::BitOr => fold(operands, Number::ZERO, Number::bit_or),
    }
}

/// Apply the builtin function of `kind` to already-evaluated numbers.
///
/// ```
/// use prex_eval::{evaluate_operator, Number, OpKind};
///
/// assert_eq!(
///     evaluate_operator(OpKind::FloorDiv, &[Number::Int(7), Number::Int(2)]),
///     Number::Int(3)
/// );
/// assert_eq!(
///     evaluate_operator(OpKind::Div, &[Number::Int(5), Number::ZERO]),
///     Number::Float(0.0)
/// );
/// ```
pub fn evaluate_operator(kind: OpKind, numbers: &[Number]) -> Number {
    apply(kind, &mut Operands::from_numbers(numbers.iter().cloned()))
}

/// Substitute `0.0` for a numeric fault of a zero-guarded operator.
fn zero_on_fault(kind: OpKind, result: Result<Number, NumericFault>) -> Number {
    debug_assert!(kind.is_zero_guarded());
    result.unwrap_or_else(|fault| {
        tracing::debug!(op = kind.canonical_name(), %fault, "numeric fault replaced by 0.0");
        Number::FLOAT_ZERO
    })
}

/// Left fold over every operand. `empty` is returned when there are none.
fn fold(operands: &mut Operands<'_>, empty: Number, f: fn(Number, Number) -> Number) -> Number {
    match operands.number(0) {
        Some(first) => fold_from(operands, 1, first, f),
        None => empty,
    }
}

/// Left fold over the operands from `start` on, seeded with `seed`.
fn fold_from(
    operands: &mut Operands<'_>,
    start: usize,
    seed: Number,
    f: fn(Number, Number) -> Number,
) -> Number {
    let mut acc = seed;
    for index in start..operands.len() {
        acc = f(acc, operands.number_or_zero(index));
    }
    acc
}

/// Fallible left fold; the first fault ends the fold. No operands give `0`.
fn try_fold(
    operands: &mut Operands<'_>,
    f: fn(Number, Number) -> Result<Number, NumericFault>,
) -> Result<Number, NumericFault> {
    let Some(mut acc) = operands.number(0) else {
        return Ok(Number::ZERO);
    };
    for index in 1..operands.len() {
        acc = f(acc, operands.number_or_zero(index))?;
    }
    Ok(acc)
}

/// `1` iff `holds` accepts the ordering of every adjacent pair.
///
/// Reading stops at the first pair that fails.
fn chain(operands: &mut Operands<'_>, holds: impl Fn(Option<Ordering>) -> bool) -> Number {
    let Some(mut prev) = operands.number(0) else {
        return Number::ONE;
    };
    for index in 1..operands.len() {
        let next = operands.number_or_zero(index);
        if !holds(prev.compare(&next)) {
            return Number::ZERO;
        }
        prev = next;
    }
    Number::ONE
}

const CMP_LESS: i64 = 0;
const CMP_EQUAL: i64 = 1;
const CMP_GREATER: i64 = 2;
const CMP_UNDEFINED: i64 = 3;

/// Three-way comparison code of an adjacent pair. Unordered pairs count as
/// greater.
fn compare_code(a: &Number, b: &Number) -> i64 {
    match a.compare(b) {
        Some(Ordering::Less) => CMP_LESS,
        Some(Ordering::Equal) => CMP_EQUAL,
        Some(Ordering::Greater) | None => CMP_GREATER,
    }
}

/// The code shared by every adjacent pair, or undefined when they differ
/// or there is no pair at all.
fn compare_codes(operands: &mut Operands<'_>) -> Number {
    if operands.len() < 2 {
        return Number::Int(CMP_UNDEFINED);
    }
    let mut prev = operands.number_or_zero(0);
    let mut shared = None;
    for index in 1..operands.len() {
        let next = operands.number_or_zero(index);
        let code = compare_code(&prev, &next);
        match shared {
            None => shared = Some(code),
            Some(seen) if seen != code => return Number::Int(CMP_UNDEFINED),
            Some(_) => {}
        }
        prev = next;
    }
    Number::Int(shared.unwrap_or(CMP_UNDEFINED))
}
