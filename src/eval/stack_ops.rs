//! Value stack for the postfix evaluator
//!
//! Every pop is checked: a postfix sequence that asks for more operands than are
//! available is reported as `MalformedExpression` instead of panicking.

extern crate alloc;

use alloc::vec::Vec;

use crate::error::{ExprError, Result};

/// Stack of intermediate results.
#[derive(Debug, Default)]
pub struct ValueStack {
    values: Vec<f64>,
}

impl ValueStack {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Pop the operand of a unary operator or function.
    pub fn pop_operand(&mut self) -> Result<f64> {
        self.values
            .pop()
            .ok_or(ExprError::MalformedExpression("missing operand"))
    }

    /// Pop the operands of a binary operator as `(left, right)`.
    ///
    /// The right operand is on top. The stack is left untouched when fewer than
    /// two values are available.
    pub fn pop_pair(&mut self) -> Result<(f64, f64)> {
        if self.values.len() < 2 {
            return Err(ExprError::MalformedExpression("missing operand"));
        }
        let right = self.pop_operand()?;
        let left = self.pop_operand()?;
        Ok((left, right))
    }

    /// The final result. Exactly one value must remain.
    pub fn into_result(mut self) -> Result<f64> {
        match self.values.len() {
            1 => self.pop_operand(),
            0 => Err(ExprError::MalformedExpression("no result on value stack")),
            _ => Err(ExprError::MalformedExpression("leftover operands on value stack")),
        }
    }
}
