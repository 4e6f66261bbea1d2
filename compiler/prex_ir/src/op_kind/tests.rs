use super::*;
use std::collections::HashSet;

#[test]
fn test_canonical_names_are_unique() {
    let mut seen = HashSet::new();
    for kind in OpKind::ALL {
        assert!(seen.insert(kind.canonical_name()), "{kind:?}");
    }
    for form in FormKind::ALL {
        assert!(seen.insert(form.canonical_name()), "{form:?}");
    }
}

#[test]
fn test_from_canonical_round_trips() {
    for kind in OpKind::ALL {
        assert_eq!(OpKind::from_canonical(kind.canonical_name()), Some(kind));
    }
    for form in FormKind::ALL {
        assert_eq!(FormKind::from_canonical(form.canonical_name()), Some(form));
    }
    assert_eq!(OpKind::from_canonical("tn"), None);
    assert_eq!(FormKind::from_canonical("add"), None);
}

#[test]
fn test_division_family_is_zero_guarded() {
    let guarded: Vec<_> = OpKind::ALL
        .into_iter()
        .filter(|kind| kind.is_zero_guarded())
        .map(OpKind::canonical_name)
        .collect();
    assert_eq!(guarded, ["div", "fdiv", "mod", "xpow", "bpm"]);
}

#[test]
fn test_symbols() {
    assert_eq!(OpKind::ModPow.symbol(), "**%");
    assert_eq!(OpKind::Cmp.symbol(), "<>");
    assert_eq!(OpKind::Generic.symbol(), "f");
    assert_eq!(FormKind::Switch.symbol(), "?");
    assert_eq!(FormKind::Assign.symbol(), ":=");
}
