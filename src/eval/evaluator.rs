//! Postfix evaluator

use crate::error::{ExprError, Result};
use crate::eval::stack_ops::ValueStack;
use crate::functions::{apply_binary, apply_function, apply_unary};
use crate::types::{Token, TokenKind};

/// Evaluate a postfix token list with `x` bound to the given value.
///
/// Binary operators take their right operand from the top of the stack, so
/// `a b -` computes `a - b`.
///
/// # Errors
///
/// - `DivisionByZero` for `/` or `mod` by `0.0`
/// - `DomainError` for functions applied outside their domain
/// - `MalformedExpression` when an operator lacks operands, when the sequence
///   does not reduce to exactly one value, or when it contains a parenthesis
pub fn evaluate(postfix: &[Token], x: f64) -> Result<f64> {
    let mut stack = ValueStack::with_capacity(postfix.len());

    for token in postfix {
        match token.kind {
            TokenKind::Number(value) => stack.push(value),
            TokenKind::Variable => stack.push(x),
            TokenKind::Binary(op) => {
                let (a, b) = stack.pop_pair()?;
                stack.push(apply_binary(op, a, b)?);
            }
            TokenKind::Unary(op) => {
                let a = stack.pop_operand()?;
                stack.push(apply_unary(op, a));
            }
            TokenKind::Function(func) => {
                let a = stack.pop_operand()?;
                stack.push(apply_function(func, a)?);
            }
            TokenKind::Open | TokenKind::Close => {
                return Err(ExprError::MalformedExpression(
                    "parenthesis in postfix sequence",
                ));
            }
        }
    }

    stack.into_result()
}
