//! Error types and handling for the calc-rs crate.
//!
//! This module defines the error types returned by expression tokenizing, conversion,
//! evaluation and by the loan calculators. Every pipeline stage stops at the first
//! problem it finds and reports it as one of these variants; nothing is recovered
//! or replaced with a default value.

extern crate alloc;
use alloc::string::String;
use core::fmt;
use core::result;

/// Result type used throughout the crate.
///
/// This is a convenience type alias that uses the `ExprError` type for the error variant.
pub type Result<T> = result::Result<T, ExprError>;

/// Error type for expression tokenizing, conversion and evaluation.
///
/// Positions are byte offsets into the original expression string.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprError {
    /// A character (or a word) that is not part of the expression language.
    ///
    /// For words, `found` is the first character of the unknown word.
    InvalidCharacter { position: usize, found: char },

    /// A number literal that could not be read.
    ///
    /// Covers repeated decimal points (`2..5`), a lone `.`, and incomplete
    /// exponents such as `1e` or `1e*10`.
    MalformedNumber { position: usize, text: String },

    /// Brackets that close before they open, or that never close.
    UnbalancedBrackets { position: usize },

    /// Operators or operands in an order the grammar does not allow.
    ///
    /// This occurs for adjacent binary operators (`2**3`), a trailing operator
    /// (`2+`), a leading binary operator (`^2`), stacked signs (`--4`) and
    /// operands with no operator between them (`2(3)`).
    InvalidOperatorSequence { position: usize },

    /// A function name that is not followed by an opening parenthesis.
    MissingFunctionParen {
        position: usize,
        function: &'static str,
    },

    /// The expression contains no number and no `x`.
    EmptyExpression,

    /// A parenthesis without a partner reached the converter.
    ///
    /// The lexer rejects these first; the converter checks again on its own.
    UnmatchedParen,

    /// Division or `mod` by exactly zero.
    DivisionByZero,

    /// A function was applied outside of its domain, e.g. `sqrt(-1)` or `ln(0)`.
    DomainError { function: &'static str, operand: f64 },

    /// The postfix sequence did not reduce to exactly one value.
    MalformedExpression(&'static str),

    /// The plot range or point count cannot be sampled.
    InvalidPlotRange,
}

impl ExprError {
    /// Stable numeric code for this error, used across the C boundary.
    ///
    /// Codes are positive; zero means success and negative values are reserved
    /// for FFI-level failures.
    pub fn error_code(&self) -> i32 {
        match self {
            ExprError::InvalidCharacter { .. } => 1,
            ExprError::MalformedNumber { .. } => 2,
            ExprError::UnbalancedBrackets { .. } => 3,
            ExprError::InvalidOperatorSequence { .. } => 4,
            ExprError::MissingFunctionParen { .. } => 5,
            ExprError::EmptyExpression => 6,
            ExprError::UnmatchedParen => 7,
            ExprError::DivisionByZero => 8,
            ExprError::DomainError { .. } => 9,
            ExprError::MalformedExpression(_) => 10,
            ExprError::InvalidPlotRange => 11,
        }
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprError::InvalidCharacter { position, found } => {
                write!(f, "Invalid character '{}' at position {}", found, position)
            }
            ExprError::MalformedNumber { position, text } => {
                write!(f, "Malformed number '{}' at position {}", text, position)
            }
            ExprError::UnbalancedBrackets { position } => {
                write!(f, "Unbalanced brackets at position {}", position)
            }
            ExprError::InvalidOperatorSequence { position } => {
                write!(f, "Invalid operator sequence at position {}", position)
            }
            ExprError::MissingFunctionParen { position, function } => {
                write!(
                    f,
                    "Function '{}' at position {} must be followed by '('",
                    function, position
                )
            }
            ExprError::EmptyExpression => write!(f, "Empty expression"),
            ExprError::UnmatchedParen => write!(f, "Unmatched parenthesis"),
            ExprError::DivisionByZero => write!(f, "Division by zero"),
            ExprError::DomainError { function, operand } => {
                write!(f, "Domain error: {}({}) is undefined", function, operand)
            }
            ExprError::MalformedExpression(reason) => {
                write!(f, "Malformed expression: {}", reason)
            }
            ExprError::InvalidPlotRange => write!(f, "Invalid plot range"),
        }
    }
}

impl core::error::Error for ExprError {}

/// Error type for the loan calculators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CreditError {
    /// An input was zero, negative or not finite. Nothing was computed.
    InvalidInput { field: &'static str, value: f64 },

    /// The inputs were accepted but the figures overflowed to infinity or NaN.
    NonFiniteResult,
}

impl CreditError {
    /// Stable numeric code for this error, used across the C boundary.
    pub fn error_code(&self) -> i32 {
        match self {
            CreditError::InvalidInput { .. } => 1,
            CreditError::NonFiniteResult => 2,
        }
    }
}

impl fmt::Display for CreditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreditError::InvalidInput { field, value } => {
                write!(f, "Invalid {}: {} (must be a positive number)", field, value)
            }
            CreditError::NonFiniteResult => write!(f, "Credit calculation produced a non-finite result"),
        }
    }
}

impl core::error::Error for CreditError {}
