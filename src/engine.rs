//! Expression facade.
//!
//! [`compute`] runs the three pipeline stages in order (tokenize, convert to
//! postfix, evaluate) and stops at the first error. Each call owns its token lists
//! and stacks, so concurrent calls from different threads never interfere.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::convert::to_postfix;
use crate::error::Result;
use crate::eval::evaluate;
use crate::lexer::tokenize;
use crate::types::Token;

/// Evaluate `expression` with the variable `x` bound to `x`.
///
/// ```
/// use calc_rs::engine::compute;
///
/// assert_eq!(compute("2+3*4", 0.0).unwrap(), 14.0);
/// assert_eq!(compute("x*2", 5.0).unwrap(), 10.0);
/// assert_eq!(compute("-3^2", 0.0).unwrap(), -9.0);
/// assert!(compute("1/0", 0.0).is_err());
/// ```
///
/// # Errors
///
/// The error of the first stage that fails, unchanged.
pub fn compute(expression: &str, x: f64) -> Result<f64> {
    let postfix = compile(expression)?;
    let value = evaluate(&postfix, x)?;
    log::debug!("compute({:?}, x = {}) = {}", expression, x, value);
    Ok(value)
}

/// Tokenize and convert `expression` without evaluating it.
///
/// The returned postfix list can be evaluated for several values of `x` within
/// one call, as [`plot::sample`](crate::plot::sample) does.
pub fn compile(expression: &str) -> Result<Vec<Token>> {
    let tokens = tokenize(expression).inspect_err(|e| {
        log::debug!("rejected {:?}: {}", expression, e);
    })?;
    to_postfix(tokens)
}

/// How [`format_result`] renders a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notation {
    /// Shortest decimal that reads back as the same value, never in exponent form.
    #[default]
    Plain,
    /// Exponent form with eight fractional digits, e.g. `1.23450000e4`.
    Scientific,
}

/// Render a computed value for display.
pub fn format_result(value: f64, notation: Notation) -> String {
    match notation {
        Notation::Plain => format!("{}", value),
        Notation::Scientific => format!("{:.8e}", value),
    }
}
