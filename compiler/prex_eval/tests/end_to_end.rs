//! End-to-end scenarios through the public API.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use prex_eval::{
    add, call, div, equ, lam, lambda, les, mul, num, show, sub, tn, var, xpow, xset,
    CustomOperator, Interpreter, Namespace, Node, Number, OpKind, Operator, Value, Variable,
};

#[test]
fn add_two_literals() {
    let mut ns = Namespace::new();
    assert_eq!(add([num(2), num(3)]).to_number(&mut ns, false), Number::Int(5));
}

#[test]
fn divide_by_zero_is_float_zero() {
    let mut ns = Namespace::new();
    let result = div([num(5), num(0)]).to_number(&mut ns, false);
    assert_eq!(result, Number::Float(0.0));
    assert!(result.is_float());
}

#[test]
fn integers_past_i64_stay_exact() {
    let mut ns = Namespace::new();
    let two_63 = || xpow([num(2), num(63)]);
    let adjacent = equ([two_63(), add([two_63(), num(1)])]);
    assert_eq!(adjacent.to_number(&mut ns, false), Number::Int(0));
    assert_eq!(
        equ([two_63(), two_63()]).to_number(&mut ns, false),
        Number::Int(1)
    );

    let power = xpow([num(3), num(50)]);
    let value = power.to_number(&mut ns, false);
    assert!(!value.is_float());
    assert_eq!(value.to_string(), "717897987691852588770249");
}

#[test]
fn overflowing_fold_is_order_independent() {
    let mut ns = Namespace::new();
    let forward = add([num(i64::MAX), num(1), num(-1)]);
    let backward = add([num(-1), num(1), num(i64::MAX)]);
    let forward = forward.to_number(&mut ns, false);
    let backward = backward.to_number(&mut ns, false);
    assert_eq!(forward, backward);
    assert_eq!(forward.to_string(), i64::MAX.to_string());
    assert_eq!(
        sub([mul([num(i64::MAX), num(2)]), num(i64::MAX)])
            .to_number(&mut ns, false)
            .to_string(),
        i64::MAX.to_string()
    );
}

#[test]
fn switch_picks_second_case() {
    let mut ns = Namespace::new();
    let node = tn(num(2), [(num(1), num(10)), (num(2), num(20))], Some(num(0)));
    assert_eq!(node.to_number(&mut ns, false), Number::Int(20));
}

#[test]
fn call_squares_four() {
    let mut ns = Namespace::new();
    let f = lambda("f", ["x"], mul([var("x"), var("x")]));
    assert_eq!(call(&f, [num(4)]).to_number(&mut ns, false), Number::Int(16));
}

#[test]
fn less_chains() {
    let mut ns = Namespace::new();
    assert_eq!(les([num(1), num(2), num(3)]).to_number(&mut ns, false), Number::Int(1));
    assert_eq!(les([num(1), num(3), num(2)]).to_number(&mut ns, false), Number::Int(0));
}

#[test]
fn memoized_value_is_stale_until_forced() {
    let mut ns = Namespace::new();
    ns.set("x", Value::Number(Number::Int(2)));
    let square = mul([var("x"), var("x")]);
    assert_eq!(square.to_number(&mut ns, false), Number::Int(4));

    xset([(Variable::new("x"), num(3))]).evaluate(&mut ns, false);
    assert_eq!(square.to_number(&mut ns, false), Number::Int(4));
    assert_eq!(square.to_number(&mut ns, true), Number::Int(9));
}

#[test]
fn switch_never_touches_unmatched_results() {
    let mut ns = Namespace::new();
    // the unmatched branch would set `hit` if it ran
    let node = tn(
        num(1),
        [
            (num(1), num(100)),
            (num(2), xset([(Variable::new("hit"), num(1))])),
        ],
        Some(xset([(Variable::new("hit"), num(2))])),
    );
    assert_eq!(node.to_number(&mut ns, false), Number::Int(100));
    assert!(!ns.has("hit"));
}

#[test]
fn call_scoping_shadows_and_restores() {
    let mut ns = Namespace::new();
    ns.set("x", Value::Number(Number::Int(1)));
    let f = lambda("f", ["x"], add([var("x"), var("x")]));

    assert_eq!(call(&f, [num(21)]).to_number(&mut ns, false), Number::Int(42));
    assert_eq!(ns.get("x", None), Value::Number(Number::Int(1)));
    assert_eq!(ns.depth(), 1);
}

#[test]
fn assignment_inside_call_stays_local() {
    let mut ns = Namespace::new();
    let f = lambda(
        "f",
        ["a"],
        xset([(Variable::new("local"), mul([var("a"), num(2)]))]),
    );
    assert_eq!(call(&f, [num(5)]).to_number(&mut ns, false), Number::Int(10));
    assert!(!ns.has("local"));
}

#[test]
fn deferred_custom_operator_short_circuits() {
    let evaluated = Rc::new(Cell::new(0));
    let seen = Rc::clone(&evaluated);
    // evaluates operands until the first zero and returns how many it read
    let until_zero = CustomOperator::new("until_zero", move |operands| {
        let mut read = 0;
        for index in 0..operands.len() {
            read += 1;
            seen.set(seen.get() + 1);
            if operands.number_or_zero(index).is_zero() {
                break;
            }
        }
        Value::Number(Number::Int(read))
    });
    let node = Node::from(
        Operator::new(OpKind::Generic, [num(3), num(0), var("never"), num(9)])
            .with_function(until_zero)
            .with_pre_evaluate(false),
    );
    let mut ns = Namespace::new();
    assert_eq!(node.to_number(&mut ns, false), Number::Int(2));
    assert_eq!(evaluated.get(), 2);
}

#[test]
fn show_renders_values_after_evaluation() {
    let mut interp = Interpreter::builder().global("y", Number::Int(4)).build();
    let node = show([add([num(1), var("y")]), var("y")]);
    assert_eq!(node.source(), "(= [(+ 1 y) ?] [y ?])");
    assert_eq!(interp.run_number(&node), Number::Int(5));
    assert_eq!(node.source(), "(= [(+ 1 y) 5] [y 4])");
}

#[test]
fn recursive_definition_through_interpreter() {
    // fib(n) = n < 2 ? n : fib(n - 1) + fib(n - 2)
    let body = tn(
        les([var("n"), num(2)]),
        [(num(1), var("n"))],
        Some(add([
            prex_eval::call_named("fib", [sub([var("n"), num(1)])]),
            prex_eval::call_named("fib", [sub([var("n"), num(2)])]),
        ])),
    );
    let mut interp = Interpreter::new();
    interp.run(&lam("fib", ["n"], body));
    assert_eq!(
        interp.run_number(&prex_eval::call_named("fib", [num(15)])),
        Number::Int(610)
    );
    assert_eq!(interp.namespace().depth(), 1);
}

#[test]
fn renderings_of_a_complete_program() {
    let f = lambda("f", ["x"], mul([var("x"), var("x")]));
    let program = add([call(&f, [num(4)]), num(1)]);
    assert_eq!(program.source(), "(+ ((λf) (4)) 1)");
    assert_eq!(
        program.reconstruction(),
        "add(call(\"f\", num(4)), num(1))"
    );
}
