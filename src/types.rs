//! Type definitions for the expression tokenizer, converter and evaluator.
//!
//! This module contains the token representation shared by every pipeline stage,
//! the closed enumerations that identify operators and functions, and the single
//! lookup table that holds their spellings, precedence and associativity.

use bitflags::bitflags;

/// Precedence given to an opening parenthesis while it waits on the operator stack.
///
/// It is lower than every operator, so nothing is ever popped past it.
pub const OPEN_PRECEDENCE: u8 = 0;

/// A token produced by the lexer and consumed by the converter and evaluator.
///
/// Tokens are plain values: copying one never shares state with another, and
/// each stage receives its token list by move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the token in the source expression.
    pub position: usize,
}

impl Token {
    pub const fn new(kind: TokenKind, position: usize) -> Self {
        Self { kind, position }
    }

    /// Conversion precedence of this token; see [`TokenKind::precedence`].
    pub fn precedence(&self) -> u8 {
        self.kind.precedence()
    }
}

/// The kind of a token, carrying the data the kind needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// A numerical literal.
    Number(f64),

    /// The free variable `x`.
    Variable,

    /// A binary operator such as `+`, `*`, `^` or `mod`.
    Binary(BinaryOp),

    /// A sign in operand position.
    Unary(UnaryOp),

    /// A built-in function name. Always followed by `(` in a valid stream.
    Function(Function),

    /// An opening parenthesis.
    Open,

    /// A closing parenthesis.
    Close,
}

impl TokenKind {
    /// Rank used by the infix-to-postfix conversion. Higher binds tighter.
    ///
    /// Operands and the closing parenthesis never sit on the operator stack, so
    /// their rank is irrelevant and reported as the sentinel.
    pub fn precedence(&self) -> u8 {
        match self {
            TokenKind::Binary(op) => op.info().precedence,
            TokenKind::Unary(op) => op.info().precedence,
            TokenKind::Function(_) => FUNCTION_PRECEDENCE,
            TokenKind::Number(_) | TokenKind::Variable | TokenKind::Open | TokenKind::Close => {
                OPEN_PRECEDENCE
            }
        }
    }

    /// Grammar class used by the lexer to validate token adjacency.
    pub fn class(&self) -> TokenClass {
        match self {
            TokenKind::Number(_) => TokenClass::NUMBER,
            TokenKind::Variable => TokenClass::VARIABLE,
            TokenKind::Binary(_) => TokenClass::BINARY,
            TokenKind::Unary(_) => TokenClass::UNARY,
            TokenKind::Function(_) => TokenClass::FUNCTION,
            TokenKind::Open => TokenClass::OPEN,
            TokenKind::Close => TokenClass::CLOSE,
        }
    }

    /// Whether the token produces a value by itself.
    pub fn is_operand(&self) -> bool {
        matches!(self, TokenKind::Number(_) | TokenKind::Variable)
    }
}

bitflags! {
    /// Grammar classes of tokens.
    ///
    /// The lexer keeps the set of classes allowed at the current position and
    /// checks each new token against it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TokenClass: u8 {
        const NUMBER = 1 << 0;
        const VARIABLE = 1 << 1;
        const BINARY = 1 << 2;
        const UNARY = 1 << 3;
        const FUNCTION = 1 << 4;
        const OPEN = 1 << 5;
        const CLOSE = 1 << 6;

        const OPERAND = Self::NUMBER.bits() | Self::VARIABLE.bits();
        /// Anything that may start an operand: the expression start, after `(`
        /// and after a binary operator.
        const OPERAND_START = Self::OPERAND.bits()
            | Self::UNARY.bits()
            | Self::FUNCTION.bits()
            | Self::OPEN.bits();
        /// After a sign another sign is not allowed.
        const AFTER_UNARY = Self::OPERAND.bits() | Self::FUNCTION.bits() | Self::OPEN.bits();
        /// After a number, `x` or `)`.
        const AFTER_OPERAND = Self::BINARY.bits() | Self::CLOSE.bits();
    }
}

impl TokenClass {
    /// Classes allowed directly after a token of class `self`.
    pub fn allowed_next(self) -> TokenClass {
        if self.intersects(TokenClass::OPERAND | TokenClass::CLOSE) {
            TokenClass::AFTER_OPERAND
        } else if self.contains(TokenClass::UNARY) {
            TokenClass::AFTER_UNARY
        } else if self.contains(TokenClass::FUNCTION) {
            TokenClass::OPEN
        } else {
            TokenClass::OPERAND_START
        }
    }
}

/// Grouping rule for operators of equal precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a-b-c = (a-b)-c`
    Left,
    /// `a^b^c = a^(b^c)`
    Right,
}

/// Conversion properties of an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorInfo {
    pub symbol: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
}

const fn info(symbol: &'static str, precedence: u8, associativity: Associativity) -> OperatorInfo {
    OperatorInfo {
        symbol,
        precedence,
        associativity,
    }
}

/// Precedence of function application, above every operator.
pub const FUNCTION_PRECEDENCE: u8 = 5;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Modulo,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

/// Built-in functions. Each takes exactly one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    /// Natural logarithm.
    Ln,
    /// Base-10 logarithm.
    Log,
}

/// Precedence and associativity of every binary operator, indexed by [`BinaryOp`].
///
/// | Precedence | Operators          | Associativity |
/// |------------|--------------------|---------------|
/// | 1          | `+` `-`            | Left          |
/// | 2          | `*` `/` `mod`      | Left          |
/// | 3          | unary `+` `-`      | Right         |
/// | 4          | `^`                | Right         |
/// | 5          | functions          | (prefix)      |
///
/// Unary signs bind weaker than `^`, so `-3^2` is `-(3^2)`.
const BINARY_TABLE: [OperatorInfo; 6] = [
    info("+", 1, Associativity::Left),
    info("-", 1, Associativity::Left),
    info("*", 2, Associativity::Left),
    info("/", 2, Associativity::Left),
    info("^", 4, Associativity::Right),
    info("mod", 2, Associativity::Left),
];

/// Indexed by [`UnaryOp`].
const UNARY_TABLE: [OperatorInfo; 2] = [
    info("+", 3, Associativity::Right),
    info("-", 3, Associativity::Right),
];

/// Spellings of the built-in functions, indexed by [`Function`].
const FUNCTION_NAMES: [&str; 9] = ["sin", "cos", "tan", "asin", "acos", "atan", "sqrt", "ln", "log"];

impl BinaryOp {
    pub fn info(self) -> OperatorInfo {
        BINARY_TABLE[self as usize]
    }

    /// Operator for a single-character symbol (`mod` is a word, see [`lookup_word`]).
    pub fn from_symbol(c: char) -> Option<BinaryOp> {
        match c {
            '+' => Some(BinaryOp::Add),
            '-' => Some(BinaryOp::Subtract),
            '*' => Some(BinaryOp::Multiply),
            '/' => Some(BinaryOp::Divide),
            '^' => Some(BinaryOp::Power),
            _ => None,
        }
    }

    /// The sign this operator becomes in operand position, if it has one.
    pub fn as_unary(self) -> Option<UnaryOp> {
        match self {
            BinaryOp::Add => Some(UnaryOp::Plus),
            BinaryOp::Subtract => Some(UnaryOp::Minus),
            _ => None,
        }
    }
}

impl UnaryOp {
    pub fn info(self) -> OperatorInfo {
        UNARY_TABLE[self as usize]
    }
}

impl Function {
    pub const ALL: [Function; 9] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Sqrt,
        Function::Ln,
        Function::Log,
    ];

    pub fn name(self) -> &'static str {
        FUNCTION_NAMES[self as usize]
    }
}

/// A recognized alphabetic word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word {
    Variable,
    Modulo,
    Function(Function),
}

/// Looks up a whole alphabetic word. Partial matches are not words.
pub fn lookup_word(word: &str) -> Option<Word> {
    match word {
        "x" => Some(Word::Variable),
        "mod" => Some(Word::Modulo),
        _ => Function::ALL
            .into_iter()
            .find(|f| f.name() == word)
            .map(Word::Function),
    }
}

impl core::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TokenKind::Number(value) => write!(f, "{}", value),
            TokenKind::Variable => write!(f, "x"),
            TokenKind::Binary(op) => write!(f, "{}", op.info().symbol),
            // `~` keeps unary minus distinguishable from subtraction in postfix dumps
            TokenKind::Unary(UnaryOp::Minus) => write!(f, "~"),
            TokenKind::Unary(UnaryOp::Plus) => write!(f, "#"),
            TokenKind::Function(func) => write!(f, "{}", func.name()),
            TokenKind::Open => write!(f, "("),
            TokenKind::Close => write!(f, ")"),
        }
    }
}
