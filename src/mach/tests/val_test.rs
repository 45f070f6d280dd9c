use crate::mach::Val;

#[test]
fn test_default_is_numeric_zero() {
    assert_eq!(Val::default(), Val::Number(0.0));
}

#[test]
fn test_number_reads_back_as_canonical_text() {
    assert_eq!(Val::Number(7.0).text(), "7");
    assert_eq!(Val::Number(-3.0).text(), "-3");
    assert_eq!(Val::Number(2.5).text(), "2.5");
    assert_eq!(Val::Number(0.0).text(), "0");
}

#[test]
fn test_text_reads_back_as_number() {
    assert_eq!(Val::Text("7".to_string()).number(), 7.0);
    assert_eq!(Val::Text("-2.5".to_string()).number(), -2.5);
    assert_eq!(Val::Text("  12".to_string()).number(), 12.0);
}

#[test]
fn test_numeric_prefix_wins_over_trailing_text() {
    assert_eq!(Val::Text("7px".to_string()).number(), 7.0);
    assert_eq!(Val::Text("3.5 apples".to_string()).number(), 3.5);
    assert_eq!(Val::Text("1e3!".to_string()).number(), 1000.0);
}

#[test]
fn test_non_numeric_text_reads_as_zero() {
    assert_eq!(Val::Text("".to_string()).number(), 0.0);
    assert_eq!(Val::Text("apples".to_string()).number(), 0.0);
    assert_eq!(Val::Text("-".to_string()).number(), 0.0);
    assert_eq!(Val::Text("e5".to_string()).number(), 0.0);
    assert_eq!(Val::Text(".".to_string()).number(), 0.0);
}

#[test]
fn test_exponent_needs_digits_to_bind() {
    // `2e` is the number two followed by stray text, not a malformed
    // exponent
    assert_eq!(Val::Text("2e".to_string()).number(), 2.0);
    assert_eq!(Val::Text("2e+".to_string()).number(), 2.0);
    assert_eq!(Val::Text("2e-4".to_string()).number(), 0.0002);
}

#[test]
fn test_assignment_replaces_variant_wholesale() {
    let mut cell = Val::Text("seven".to_string());
    cell = Val::Number(7.0);
    assert_eq!(cell, Val::Number(7.0));
    cell = Val::Text("again".to_string());
    assert_eq!(cell.text(), "again");
}
