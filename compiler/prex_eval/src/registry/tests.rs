use super::*;
use crate::{var, Namespace, Value};
use pretty_assertions::assert_eq;

fn int(n: i64) -> Argument {
    Argument::Number(Number::Int(n))
}

#[test]
fn test_registry_holds_every_kind_once() {
    let registry = registry();
    assert_eq!(registry.len(), OpKind::ALL.len() + FormKind::ALL.len());
    for kind in OpKind::ALL {
        let entry = registry.get(kind.canonical_name()).unwrap();
        assert_eq!(entry.kind, EntryKind::Operator(kind));
        assert_eq!(entry.symbol, kind.symbol());
    }
    for form in FormKind::ALL {
        assert!(registry.contains(form.canonical_name()));
    }
}

#[test]
fn test_registry_is_shared() {
    assert!(std::ptr::eq(registry(), registry()));
}

#[test]
fn test_iter_lists_forms_first() {
    let names: Vec<&str> = registry().iter().take(3).map(|entry| entry.name).collect();
    assert_eq!(names, vec!["num", "var", "xset"]);
}

#[test]
fn test_build_operator() {
    let node = registry().build("add", vec![int(2), int(3)]).unwrap();
    let mut ns = Namespace::new();
    assert_eq!(node.to_number(&mut ns, false), Number::Int(5));
    assert_eq!(node.reconstruction(), "add(num(2), num(3))");
}

#[test]
fn test_build_operator_with_overrides() {
    let node = registry()
        .build(
            "les",
            vec![int(1), int(2), Argument::Symbol("lt".into()), Argument::PreEvaluate(false)],
        )
        .unwrap();
    assert_eq!(
        node.reconstruction(),
        "les(num(1), num(2), fxn_name = \"lt\", pep = false)"
    );
}

#[test]
fn test_build_unknown_operator() {
    let err = registry().build("frobnicate", vec![]).unwrap_err();
    assert_eq!(
        err,
        RegistryError::UnknownOperator {
            name: "frobnicate".into()
        }
    );
    assert_eq!(err.to_string(), "unknown operator `frobnicate`");
}

#[test]
fn test_build_checks_fixed_arity() {
    let err = registry().build("bpm", vec![int(2), int(3)]).unwrap_err();
    assert_eq!(err, RegistryError::arity("bpm", 3, 2));

    let err = registry().build("neg", vec![]).unwrap_err();
    assert_eq!(err, RegistryError::arity("neg", 1, 0));
}

#[test]
fn test_build_rejects_misplaced_keyword() {
    let err = registry()
        .build("add", vec![Argument::Otherwise(var("x"))])
        .unwrap_err();
    assert_eq!(err, RegistryError::unexpected("add", "`otherwise`"));
}

#[test]
fn test_build_literal_and_variable() {
    assert_eq!(
        registry().build("num", vec![int(4)]).unwrap().reconstruction(),
        "num(4)"
    );
    assert_eq!(
        registry().build("var", vec!["x".into()]).unwrap().source(),
        "x"
    );
    assert_eq!(
        registry().build("num", vec![]).unwrap_err(),
        RegistryError::arity("num", 1, 0)
    );
}

#[test]
fn test_build_assignment_needs_variable_targets() {
    let node = registry()
        .build("xset", vec![(var("x"), num(1)).into()])
        .unwrap();
    assert_eq!(node.reconstruction(), "xset((var(\"x\"), num(1)))");

    let err = registry()
        .build("xset", vec![(num(1), num(1)).into()])
        .unwrap_err();
    assert_eq!(err, RegistryError::unexpected("xset", "a non-variable target"));
}

#[test]
fn test_build_switch() {
    let node = registry()
        .build(
            "tn",
            vec![
                int(2),
                (num(1), num(10)).into(),
                (num(2), num(20)).into(),
                Argument::Otherwise(num(-1)),
            ],
        )
        .unwrap();
    let mut ns = Namespace::new();
    assert_eq!(node.to_number(&mut ns, false), Number::Int(20));
}

#[test]
fn test_build_lambda_and_call() {
    let definition = registry()
        .build(
            "lam",
            vec![
                "sq".into(),
                "x".into(),
                Argument::Expression(crate::mul([var("x"), var("x")])),
            ],
        )
        .unwrap();
    let invocation = registry().build("call", vec!["sq".into(), int(6)]).unwrap();

    let mut ns = Namespace::new();
    assert!(matches!(definition.evaluate(&mut ns, false), Value::Function(_)));
    assert_eq!(invocation.to_number(&mut ns, false), Number::Int(36));
}

#[test]
fn test_build_lambda_requires_expression() {
    let err = registry().build("lam", vec!["f".into()]).unwrap_err();
    assert_eq!(
        err,
        RegistryError::MissingKeyword {
            operator: "lam",
            keyword: "expression"
        }
    );
}
