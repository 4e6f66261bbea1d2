use super::*;
use pretty_assertions::assert_eq;

fn int(n: i64) -> Value {
    Value::Number(Number::Int(n))
}

#[test]
fn test_new_namespace_has_root_only() {
    let ns = Namespace::new();
    assert_eq!(ns.depth(), 1);
    assert!(!ns.has("x"));
}

#[test]
fn test_unbound_reads_zero() {
    let ns = Namespace::new();
    assert_eq!(ns.get("missing", None), int(0));
    assert_eq!(ns.get("missing", Some(int(7))), int(7));
}

#[test]
fn test_set_and_get() {
    let mut ns = Namespace::new();
    ns.set("x", int(3));
    assert_eq!(ns.get("x", None), int(3));
    assert!(ns.has("x"));
}

#[test]
fn test_inner_frame_shadows_outer() {
    let mut ns = Namespace::new();
    ns.set("x", int(1));
    ns.push();
    ns.set("x", int(2));
    assert_eq!(ns.get("x", None), int(2));
    assert!(ns.pop());
    assert_eq!(ns.get("x", None), int(1));
}

#[test]
fn test_inner_frame_sees_outer() {
    let mut ns = Namespace::new();
    ns.set("y", int(9));
    ns.push();
    assert_eq!(ns.get("y", None), int(9));
}

#[test]
fn test_set_writes_innermost_only() {
    let mut ns = Namespace::new();
    ns.push();
    ns.set("z", int(4));
    ns.pop();
    assert!(!ns.has("z"));
}

#[test]
fn test_pop_root_is_refused() {
    let mut ns = Namespace::new();
    ns.set("x", int(1));
    assert!(!ns.pop());
    assert_eq!(ns.depth(), 1);
    assert_eq!(ns.get("x", None), int(1));
}

#[test]
fn test_set_root_from_nested_frame() {
    let mut ns = Namespace::new();
    ns.push();
    ns.set_root("g", int(5));
    ns.pop();
    assert_eq!(ns.get("g", None), int(5));
}

#[test]
fn test_visible_bindings_innermost_wins() {
    let mut ns = Namespace::new();
    ns.set("b", int(1));
    ns.set("a", int(1));
    ns.push();
    ns.set("b", int(2));

    let names: Vec<(String, Value)> = ns
        .visible_bindings()
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();
    assert_eq!(
        names,
        vec![("a".to_string(), int(1)), ("b".to_string(), int(2))]
    );
}
