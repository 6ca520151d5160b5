//! Built-in mathematical functions and operator arithmetic.
//!
//! This module applies every operator and function the expression language knows.
//! Inputs outside a function's domain and division by zero are reported as errors
//! instead of silently producing NaN or infinity, so the host never displays a
//! fabricated number. A NaN argument is outside the domain of `sqrt`, `ln`,
//! `log`, `asin` and `acos`. The functions defined on every real and the
//! operators pass a NaN operand through unchanged.
//!
//! With the default `libm` feature the transcendental functions come from the `libm`
//! crate, which keeps them available on no_std targets. Without it the `f64` methods
//! of the standard library are used.

#[cfg(feature = "libm")]
use libm::{
    acos as libm_acos, asin as libm_asin, atan as libm_atan, cos as libm_cos, fmod as libm_fmod,
    log as libm_ln, log10 as libm_log10, pow as libm_pow, rint as libm_rint, sin as libm_sin,
    sqrt as libm_sqrt, tan as libm_tan,
};

#[cfg(not(feature = "libm"))]
mod std_math {
    extern crate std;

    pub fn libm_acos(a: f64) -> f64 {
        a.acos()
    }
    pub fn libm_asin(a: f64) -> f64 {
        a.asin()
    }
    pub fn libm_atan(a: f64) -> f64 {
        a.atan()
    }
    pub fn libm_cos(a: f64) -> f64 {
        a.cos()
    }
    pub fn libm_fmod(a: f64, b: f64) -> f64 {
        a % b
    }
    pub fn libm_ln(a: f64) -> f64 {
        a.ln()
    }
    pub fn libm_log10(a: f64) -> f64 {
        a.log10()
    }
    pub fn libm_pow(a: f64, b: f64) -> f64 {
        a.powf(b)
    }
    pub fn libm_rint(a: f64) -> f64 {
        a.round_ties_even()
    }
    pub fn libm_sin(a: f64) -> f64 {
        a.sin()
    }
    pub fn libm_sqrt(a: f64) -> f64 {
        a.sqrt()
    }
    pub fn libm_tan(a: f64) -> f64 {
        a.tan()
    }
}
#[cfg(not(feature = "libm"))]
use std_math::*;

use crate::error::{ExprError, Result};
use crate::types::{BinaryOp, Function, UnaryOp};

/// Applies a binary operator to `a` (left operand) and `b` (right operand).
///
/// # Errors
///
/// `ExprError::DivisionByZero` when dividing or taking `mod` by exactly `0.0`.
pub fn apply_binary(op: BinaryOp, a: f64, b: f64) -> Result<f64> {
    match op {
        BinaryOp::Add => Ok(a + b),
        BinaryOp::Subtract => Ok(a - b),
        BinaryOp::Multiply => Ok(a * b),
        BinaryOp::Divide => div(a, b),
        BinaryOp::Power => Ok(pow(a, b)),
        BinaryOp::Modulo => fmod(a, b),
    }
}

pub fn apply_unary(op: UnaryOp, a: f64) -> f64 {
    match op {
        UnaryOp::Plus => a,
        UnaryOp::Minus => -a,
    }
}

/// Applies a built-in function to its single argument.
///
/// # Errors
///
/// `ExprError::DomainError` for `sqrt` of a negative number, `asin`/`acos` outside
/// `[-1, 1]`, and `ln`/`log` of zero or a negative number.
pub fn apply_function(func: Function, a: f64) -> Result<f64> {
    match func {
        Function::Sin => Ok(libm_sin(a)),
        Function::Cos => Ok(libm_cos(a)),
        Function::Tan => Ok(libm_tan(a)),
        Function::Asin => asin(a),
        Function::Acos => acos(a),
        Function::Atan => Ok(libm_atan(a)),
        Function::Sqrt => sqrt(a),
        Function::Ln => ln(a),
        Function::Log => log(a),
    }
}

fn domain_error(function: Function, operand: f64) -> ExprError {
    ExprError::DomainError {
        function: function.name(),
        operand,
    }
}

/// Divides `a` by `b`.
pub fn div(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        return Err(ExprError::DivisionByZero);
    }
    Ok(a / b)
}

/// Floating-point remainder of `a / b`, with the sign of `a`.
///
/// `-7 mod 3` is `-1` and `5.5 mod 2` is `1.5`.
pub fn fmod(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        return Err(ExprError::DivisionByZero);
    }
    Ok(libm_fmod(a, b))
}

pub fn pow(a: f64, b: f64) -> f64 {
    libm_pow(a, b)
}

pub fn sqrt(a: f64) -> Result<f64> {
    if a.is_nan() || a < 0.0 {
        return Err(domain_error(Function::Sqrt, a));
    }
    Ok(libm_sqrt(a))
}

pub fn asin(a: f64) -> Result<f64> {
    if !(-1.0..=1.0).contains(&a) {
        return Err(domain_error(Function::Asin, a));
    }
    Ok(libm_asin(a))
}

pub fn acos(a: f64) -> Result<f64> {
    if !(-1.0..=1.0).contains(&a) {
        return Err(domain_error(Function::Acos, a));
    }
    Ok(libm_acos(a))
}

/// Natural logarithm.
pub fn ln(a: f64) -> Result<f64> {
    if a.is_nan() || a <= 0.0 {
        return Err(domain_error(Function::Ln, a));
    }
    Ok(libm_ln(a))
}

/// Base-10 logarithm.
pub fn log(a: f64) -> Result<f64> {
    if a.is_nan() || a <= 0.0 {
        return Err(domain_error(Function::Log, a));
    }
    Ok(libm_log10(a))
}

/// Rounds `a` to `decimals` fractional digits, ties to even.
pub fn round_to(a: f64, decimals: i32) -> f64 {
    let scale = pow(10.0, f64::from(decimals));
    libm_rint(a * scale) / scale
}
