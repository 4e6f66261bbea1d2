//! Property-based tests for the evaluator.
//!
//! Random operand lists check the operator laws that do not depend on the
//! particular numbers: order independence of the commutative operators,
//! the zero guard of the division family, agreement between cached and
//! forced evaluation, and frame balance across calls.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use prex_eval::{
    call, evaluate_operator, lambda, les, num, registry, var, Argument, Namespace, Node, Number,
    OpKind, Value,
};
use proptest::prelude::*;

// -- Strategies --

/// Small integers, so generated folds stay cheap to compute.
fn small_int() -> impl Strategy<Value = i64> {
    -1000i64..1000
}

fn operand_list(max: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(small_int(), 0..max)
}

fn commutative_kind() -> impl Strategy<Value = OpKind> {
    prop::sample::select(
        OpKind::ALL
            .into_iter()
            .filter(|kind| kind.is_commutative())
            .collect::<Vec<_>>(),
    )
}

fn zero_guarded_kind() -> impl Strategy<Value = OpKind> {
    prop::sample::select(vec![OpKind::Div, OpKind::FloorDiv, OpKind::Mod])
}

fn ints(values: &[i64]) -> Vec<Number> {
    values.iter().copied().map(Number::Int).collect()
}

/// Build an operator node through the registry from literal operands.
fn build(kind: OpKind, values: &[i64]) -> Node {
    let args = values
        .iter()
        .map(|&v| Argument::Number(Number::Int(v)))
        .collect();
    registry().build(kind.canonical_name(), args).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    /// Reversing or rotating the operands of a commutative operator does
    /// not change its result.
    #[test]
    fn prop_commutative_operators_ignore_order(
        kind in commutative_kind(),
        values in operand_list(6),
        rotation in 0usize..6,
    ) {
        let expected = evaluate_operator(kind, &ints(&values));

        let mut reversed = values.clone();
        reversed.reverse();
        prop_assert_eq!(evaluate_operator(kind, &ints(&reversed)), expected.clone());

        let mut rotated = values.clone();
        if !rotated.is_empty() {
            let by = rotation % rotated.len();
            rotated.rotate_left(by);
        }
        prop_assert_eq!(evaluate_operator(kind, &ints(&rotated)), expected);
    }

    /// A zero anywhere after the first operand of a division-family fold
    /// yields exactly `0.0`.
    #[test]
    fn prop_zero_divisor_yields_float_zero(
        kind in zero_guarded_kind(),
        first in small_int(),
        before in operand_list(3),
        after in operand_list(3),
    ) {
        let mut values = vec![first];
        values.extend(before.iter().copied().filter(|v| *v != 0));
        values.push(0);
        values.extend(after);

        let result = evaluate_operator(kind, &ints(&values));
        prop_assert!(result.is_float());
        prop_assert_eq!(result, Number::Float(0.0));
    }

    /// A cached node, a forced re-evaluation, and a freshly built node
    /// agree when the namespace has not changed.
    #[test]
    fn prop_cached_and_forced_agree(
        kind in prop::sample::select(OpKind::ALL.to_vec()),
        values in operand_list(5),
    ) {
        prop_assume!(kind != OpKind::ModPow || values.len() == 3);
        prop_assume!(!matches!(kind, OpKind::Neg | OpKind::Not | OpKind::BitNot) || values.len() == 1);

        let mut ns = Namespace::new();
        let node = build(kind, &values);
        let cached = node.to_number(&mut ns, false);
        let again = node.to_number(&mut ns, false);
        let forced = node.to_number(&mut ns, true);
        let fresh = build(kind, &values).to_number(&mut ns, false);

        prop_assert!(same(&cached, &again));
        prop_assert!(same(&cached, &forced));
        prop_assert!(same(&cached, &fresh));
    }

    /// A strictly increasing sequence satisfies the `<` chain and any
    /// sequence with an adjacent inversion does not.
    #[test]
    fn prop_less_chain_matches_pairwise(values in operand_list(6)) {
        let holds = values.windows(2).all(|pair| pair[0] < pair[1]);
        let mut ns = Namespace::new();
        let node = les(values.iter().map(|&v| num(v)));
        prop_assert_eq!(node.to_number(&mut ns, false), Number::from_bool(holds));
    }

    /// Calls leave the namespace exactly as they found it.
    #[test]
    fn prop_calls_are_frame_balanced(outer in small_int(), arg in small_int()) {
        let mut ns = Namespace::new();
        ns.set("x", Value::Number(Number::Int(outer)));
        let f = lambda("f", ["x"], var("x"));

        let result = call(&f, [num(arg)]).to_number(&mut ns, false);

        prop_assert_eq!(result, Number::Int(arg));
        prop_assert_eq!(ns.depth(), 1);
        prop_assert_eq!(ns.get("x", None), Value::Number(Number::Int(outer)));
    }
}

/// Numeric equality that also treats two NaNs as the same result.
fn same(a: &Number, b: &Number) -> bool {
    a == b || (a.as_f64().is_nan() && b.as_f64().is_nan())
}
