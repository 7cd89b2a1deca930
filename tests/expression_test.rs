mod common;
use common::*;

#[test]
fn test_precedence() {
    assert_eq!(run(&["PRINT 1 + 2 * 3"]), "7\n");
    assert_eq!(run(&["PRINT (1 + 2) * 3"]), "9\n");
    assert_eq!(run(&["PRINT 2 ^ 3 ^ 2"]), "512\n");
    assert_eq!(run(&["PRINT -2 ^ 2"]), "-4\n");
    assert_eq!(run(&["PRINT 10 / 4"]), "2.5\n");
}

#[test]
fn test_relational_results() {
    assert_eq!(run(&["PRINT 1 < 2"]), "-1\n");
    assert_eq!(run(&["PRINT 1 > 2"]), "0\n");
    assert_eq!(run(&["PRINT \"A\" < \"B\""]), "-1\n");
    assert_eq!(run(&["PRINT \"A\" = \"A\""]), "-1\n");
}

#[test]
fn test_logic() {
    assert_eq!(run(&["PRINT 1 < 2 AND 2 < 3"]), "-1\n");
    assert_eq!(run(&["PRINT NOT 1 = 1 OR 2 > 3"]), "0\n");
}

#[test]
fn test_string_concatenation() {
    assert_eq!(run(&["PRINT \"FOO\" + \"BAR\""]), "FOOBAR\n");
}

#[test]
fn test_division_by_zero() {
    assert!(run(&["PRINT 1 / 0"]).starts_with("DIVISION BY ZERO"));
}

#[test]
fn test_mixed_kinds_rejected() {
    assert!(run(&["PRINT 1 + \"A\""]).starts_with("TYPE MISMATCH"));
}

#[test]
fn test_numeric_functions() {
    assert_eq!(run(&["PRINT ABS(-4)"]), "4\n");
    assert_eq!(run(&["PRINT INT(-2.5)"]), "-3\n");
    assert_eq!(run(&["PRINT SGN(-7)"]), "-1\n");
    assert_eq!(run(&["PRINT SQR(9)"]), "3\n");
}

#[test]
fn test_string_functions() {
    assert_eq!(run(&["PRINT LEN(\"HELLO\")"]), "5\n");
    assert_eq!(run(&["PRINT CHR$(65)"]), "A\n");
    assert_eq!(run(&["PRINT ASC(\"A\")"]), "65\n");
    assert_eq!(run(&["PRINT STR$(3.5)"]), "3.5\n");
    assert_eq!(run(&["PRINT VAL(\"12\") + 1"]), "13\n");
    assert_eq!(run(&["PRINT LEFT$(\"HELLO\", 2)"]), "HE\n");
    assert_eq!(run(&["PRINT RIGHT$(\"HELLO\", 2)"]), "LO\n");
    assert_eq!(run(&["PRINT MID$(\"HELLO\", 2, 3)"]), "ELL\n");
}

#[test]
fn test_undefined_function() {
    assert!(run(&["PRINT NOPE(1)"]).starts_with("UNDEFINED FUNCTION"));
}

#[test]
fn test_unassigned_defaults() {
    assert_eq!(run(&["PRINT Z + 1"]), "1\n");
    assert_eq!(run(&["PRINT Z$ + \"END\""]), "END\n");
}

#[test]
fn test_integer_sigil_rounds() {
    assert_eq!(run(&["LET A% = 1.6", "PRINT A%"]), "2\n");
}
