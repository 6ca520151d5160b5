use calc_rs::engine::compute;
use calc_rs::error::ExprError;
use calc_rs::{assert_approx_eq, constants};

#[test]
fn test_unary_expression_evaluation() {
    let one: f64 = 1.0;
    let test_cases = [
        // Simple unary
        ("-1", -1.0),
        ("+1", 1.0),
        ("-x", -2.0),
        ("+x", 2.0),
        // After an opening parenthesis or a binary operator
        ("(-1)", -1.0),
        ("3*-2", -6.0),
        ("3/-2", -1.5),
        ("8+-2", 6.0),
        ("8++2", 10.0),
        ("8--2", 10.0),
        ("1-+2", -1.0),
        ("2 mod -3", 2.0),
        // Functions with unary
        ("-sin(1)", -one.sin()),
        ("sin(-1)", (-one).sin()),
        ("-sin(-cos(1))", -(-one.cos()).sin()),
        // Sign of a parenthesised group
        ("-(2+2)", -4.0),
        ("-(-(3))", 3.0),
    ];

    for &(expr, expected) in &test_cases {
        let result = compute(expr, 2.0).unwrap();
        println!("{:<15} => {}", expr, result);
        assert_approx_eq!(
            result,
            expected,
            constants::TEST_PRECISION,
            "Expression '{}' evaluated to {}, expected {}",
            expr,
            result,
            expected
        );
    }
}

#[test]
fn test_unary_with_power() {
    // The sign applies to the whole power
    assert_eq!(compute("-3^2", 0.0).unwrap(), -9.0);
    assert_eq!(compute("-2^2", 0.0).unwrap(), -4.0);
    assert_eq!(compute("(-2)^2", 0.0).unwrap(), 4.0);
    assert_eq!(compute("-x^2", 3.0).unwrap(), -9.0);

    // A sign in the exponent
    assert_eq!(compute("2^-1", 0.0).unwrap(), 0.5);
    assert_eq!(compute("2^-x", 2.0).unwrap(), 0.25);
    assert_eq!(compute("2^-1^2", 0.0).unwrap(), 0.5);
    assert_eq!(compute("2*-3^2", 0.0).unwrap(), -18.0);
}

#[test]
fn test_unary_binds_tighter_than_products() {
    assert_eq!(compute("-2*3", 0.0).unwrap(), -6.0);
    assert_eq!(compute("-6/3", 0.0).unwrap(), -2.0);
    assert_eq!(compute("-7 mod 3", 0.0).unwrap(), -1.0);
    assert_eq!(compute("-2+5", 0.0).unwrap(), 3.0);
}

#[test]
fn test_stacked_signs_are_rejected() {
    for expr in ["--1", "++1", "+-1", "-+1", "2*--3", "(--2)", "2^--1"] {
        let result = compute(expr, 0.0);
        println!("{:<10} => {:?}", expr, result);
        assert!(
            matches!(result, Err(ExprError::InvalidOperatorSequence { .. })),
            "Expression '{}' should be rejected, got {:?}",
            expr,
            result
        );
    }
}

#[test]
fn test_dangling_sign() {
    assert_eq!(compute("-", 0.0), Err(ExprError::EmptyExpression));
    assert!(matches!(
        compute("2*-", 0.0),
        Err(ExprError::InvalidOperatorSequence { position: 2 })
    ));
    assert_eq!(compute("(-)", 0.0), Err(ExprError::EmptyExpression));
    assert!(matches!(
        compute("(-)+1", 0.0),
        Err(ExprError::InvalidOperatorSequence { position: 2 })
    ));
}
