use apiobject_model::coerce::{contains_member, is_collection, is_numeric, is_truthy, to_int, to_string};
use serde_json::{Value, json};

// ── to_int ───────────────────────────────────────────────────────

#[test]
fn to_int_of_numbers() {
    assert_eq!(to_int(&json!(42)), 42);
    assert_eq!(to_int(&json!(-7)), -7);
    assert_eq!(to_int(&json!(3.9)), 3);
    assert_eq!(to_int(&json!(-3.9)), -3);
    assert_eq!(to_int(&json!(u64::MAX)), i64::MAX);
    assert_eq!(to_int(&json!(1e300)), i64::MAX);
}

#[test]
fn to_int_of_strings() {
    assert_eq!(to_int(&json!("5")), 5);
    assert_eq!(to_int(&json!("  12")), 12);
    assert_eq!(to_int(&json!("+8")), 8);
    assert_eq!(to_int(&json!("-8")), -8);
    assert_eq!(to_int(&json!("12abc")), 12);
    assert_eq!(to_int(&json!("7.9")), 7);
    assert_eq!(to_int(&json!(".5")), 0);
    assert_eq!(to_int(&json!("1e3")), 1000);
    assert_eq!(to_int(&json!("2e")), 2);
    assert_eq!(to_int(&json!("x")), 0);
    assert_eq!(to_int(&json!("")), 0);
    assert_eq!(to_int(&json!("-")), 0);
    assert_eq!(to_int(&json!("0x1A")), 0);
    assert_eq!(to_int(&json!("99999999999999999999")), i64::MAX);
}

#[test]
fn to_int_of_other_shapes() {
    assert_eq!(to_int(&Value::Null), 0);
    assert_eq!(to_int(&json!(true)), 1);
    assert_eq!(to_int(&json!(false)), 0);
    assert_eq!(to_int(&json!([])), 0);
    assert_eq!(to_int(&json!([0])), 1);
    assert_eq!(to_int(&json!({})), 0);
    assert_eq!(to_int(&json!({"a": 0})), 1);
}

// ── is_numeric ───────────────────────────────────────────────────

#[test]
fn numeric_strings() {
    for s in ["5", " 5 ", "-5", "+5", "1.5", ".5", "5.", "1e10", "-2.5E-3"] {
        assert!(is_numeric(&json!(s)), "{s:?} should be numeric");
    }
}

#[test]
fn non_numeric_values() {
    for s in ["", " ", "x", "5x", "1e", ".", "0x10", "1 2"] {
        assert!(!is_numeric(&json!(s)), "{s:?} should not be numeric");
    }
    assert!(is_numeric(&json!(0)));
    assert!(is_numeric(&json!(2.5)));
    assert!(!is_numeric(&Value::Null));
    assert!(!is_numeric(&json!(true)));
    assert!(!is_numeric(&json!([1])));
}

// ── to_string ────────────────────────────────────────────────────

#[test]
fn to_string_renders_scalars() {
    assert_eq!(to_string(&json!("abc")), "abc");
    assert_eq!(to_string(&json!(10)), "10");
    assert_eq!(to_string(&json!(-0.25)), "-0.25");
    assert_eq!(to_string(&json!(true)), "1");
    assert_eq!(to_string(&json!(false)), "");
    assert_eq!(to_string(&Value::Null), "");
}

#[test]
fn to_string_renders_collections_as_json() {
    assert_eq!(to_string(&json!({"a": [1, "b"]})), r#"{"a":[1,"b"]}"#);
}

// ── is_truthy ────────────────────────────────────────────────────

#[test]
fn falsy_values() {
    for v in [
        Value::Null,
        json!(false),
        json!(0),
        json!(0.0),
        json!(""),
        json!("0"),
        json!([]),
        json!({}),
    ] {
        assert!(!is_truthy(&v), "{v} should be falsy");
    }
}

#[test]
fn truthy_values() {
    for v in [
        json!(true),
        json!(1),
        json!(-1),
        json!(0.1),
        json!(u64::MAX),
        json!("a"),
        json!("00"),
        json!(" "),
        json!([0]),
        json!({"k": null}),
    ] {
        assert!(is_truthy(&v), "{v} should be truthy");
    }
}

// ── Collections / membership ─────────────────────────────────────

#[test]
fn collections() {
    assert!(is_collection(&json!([])));
    assert!(is_collection(&json!({})));
    assert!(!is_collection(&json!("[]")));
}

#[test]
fn membership_matches_strings_and_numbers() {
    let values = [json!("a"), json!(3), json!(null), json!(true)];
    assert!(contains_member(values.iter(), "a"));
    assert!(contains_member(values.iter(), "3"));
    assert!(!contains_member(values.iter(), "b"));
    assert!(!contains_member(values.iter(), "true"));
    assert!(!contains_member(values.iter(), "null"));
}
