#![cfg_attr(all(not(test), target_arch = "arm"), no_std)]
#![doc = r#"
# calc-rs

An infix expression calculator and loan calculator core, usable from Rust and C.

## Overview

calc-rs evaluates arithmetic expressions over `f64` in a single variable `x`. An
expression goes through three stages:

1. the lexer validates the text and produces typed tokens,
2. the shunting-yard converter reorders them into postfix order,
3. the evaluator reduces the postfix sequence on a value stack.

Every stage fails fast with a typed [`ExprError`] that says what went wrong and
where. Nothing is shared between calls, so the engine can be used from any number
of threads at once.

Supported syntax:
- decimal literals with optional exponent: `3`, `.5`, `2.5e-3`
- binary operators `+ - * / ^ mod`, with `^` right-associative
- unary `+` and `-` at the start of an operand: `-3^2 = -9`, `2^-1 = 0.5`
- functions `sin cos tan asin acos atan sqrt ln log` (log is base 10), always with
  parentheses
- the variable `x`

Division by zero and out-of-domain function arguments are errors, never NaN.

## Quick Start

```rust
use calc_rs::engine::{compute, format_result, Notation};

let value = compute("2 + 3 * 4", 0.0).unwrap();
assert_eq!(value, 14.0);

let value = compute("sqrt(x) mod 3", 16.0).unwrap();
assert_eq!(value, 1.0);

assert_eq!(format_result(12345.0, Notation::Scientific), "1.23450000e4");
```

## Errors

```rust
use calc_rs::engine::compute;
use calc_rs::error::ExprError;

assert_eq!(compute("1/0", 0.0), Err(ExprError::DivisionByZero));
assert_eq!(
    compute("2 $ 3", 0.0),
    Err(ExprError::InvalidCharacter { position: 2, found: '$' })
);
```

## Graphing

```rust
use calc_rs::plot::{sample, PlotRange};

let points = sample("x^2", PlotRange::new(-2.0, 2.0), 100).unwrap();
assert_eq!(points.len(), 100);
assert_eq!(points[0].x, -2.0);
```

## Loans

```rust
use calc_rs::credit::{credit_annuity, credit_differentiated};

let annuity = credit_annuity(100_000.0, 12.0, 12.0).unwrap();
assert!((annuity.monthly_payment - 8884.88).abs() < 0.01);

let differentiated = credit_differentiated(100_000.0, 12.0, 12.0).unwrap();
assert!(differentiated.first_payment > differentiated.last_payment);
```

## Features

- `libm` (default): transcendental functions come from the `libm` crate, which
  works without `std`. Disable it to use the `f64` methods of `std` instead.

## C interface

The crate builds as a static and dynamic library. `build.rs` generates
`include/calc_rs.h`; see the [`ffi`] module.
"#]

extern crate alloc;

pub mod convert;
pub mod credit;
pub mod engine;
pub mod error;
pub mod eval;
pub mod ffi;
pub mod functions;
pub mod lexer;
pub mod plot;
pub mod types;

pub use engine::{Notation, compile, compute, format_result};
pub use error::{CreditError, ExprError, Result};
pub use types::{BinaryOp, Function, Token, TokenKind, UnaryOp};

pub mod constants {
    pub use crate::credit::{DAYS_PER_MONTH, DAYS_PER_YEAR};
    pub use crate::ffi::ERROR_BUFFER_SIZE;
    pub use crate::plot::DEFAULT_PLOT_POINTS;

    /// Tolerance used by [`assert_approx_eq!`](crate::assert_approx_eq).
    pub const TEST_PRECISION: f64 = 1e-10;
}

/// Asserts that two floating point values are equal within an epsilon.
///
/// The epsilon defaults to [`constants::TEST_PRECISION`]. Two NaNs compare
/// equal, as do two infinities of the same sign. An optional message with
/// format arguments can follow the epsilon.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($left, $right, $crate::constants::TEST_PRECISION)
    };
    ($left:expr, $right:expr, $epsilon:expr $(,)?) => {
        $crate::assert_approx_eq!(
            $left,
            $right,
            $epsilon,
            "assertion failed: `(left ≈ right)` (left: `{}`, right: `{}`, epsilon: `{}`)",
            $left,
            $right,
            $epsilon
        )
    };
    ($left:expr, $right:expr, $epsilon:expr, $($arg:tt)+) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let eps: f64 = $epsilon;

        let same_special = (left_val.is_nan() && right_val.is_nan())
            || (left_val.is_infinite() && left_val == right_val);
        if !same_special {
            assert!((left_val - right_val).abs() < eps, $($arg)+);
        }
    }};
}
