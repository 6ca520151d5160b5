//! Postfix evaluation module for calc-rs
//!
//! This module reduces a postfix token list, as produced by
//! [`to_postfix`](crate::convert::to_postfix), to a single value using an explicit
//! value stack. The evaluator checks operand counts itself instead of relying on
//! the lexer's validation.

pub mod evaluator;
pub mod stack_ops;

pub use evaluator::*;
pub use stack_ops::ValueStack;
