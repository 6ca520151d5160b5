//! Tokenizer and validator for calculator expressions.
//!
//! [`tokenize`] turns a raw expression into a token list and rejects everything the
//! grammar does not allow in the same pass: unknown characters and words, malformed
//! numbers, unbalanced brackets, misplaced operators and functions without their
//! opening parenthesis. A list returned by `tokenize` is ready for
//! [`to_postfix`](crate::convert::to_postfix).

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{ExprError, Result};
use crate::types::{BinaryOp, Token, TokenClass, TokenKind, Word, lookup_word};

/// The lexer struct, which produces raw tokens from an input string.
///
/// Signs come out as binary operators; [`tokenize`] retags them from context.
#[derive(Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pub pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Peek at the current character.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Advance the position by one character.
    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    /// Skip whitespace.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Get the next raw token, or `None` at the end of the input.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        self.skip_whitespace();
        let start_pos = self.pos;
        let Some(c) = self.peek() else {
            return Ok(None);
        };

        if c.is_ascii_digit() || c == '.' {
            let value = self.read_number(start_pos)?;
            return Ok(Some(Token::new(TokenKind::Number(value), start_pos)));
        }

        if c.is_ascii_alphabetic() {
            let word = self.read_word();
            let kind = match lookup_word(word) {
                Some(Word::Variable) => TokenKind::Variable,
                Some(Word::Modulo) => TokenKind::Binary(BinaryOp::Modulo),
                Some(Word::Function(func)) => TokenKind::Function(func),
                None => {
                    return Err(ExprError::InvalidCharacter {
                        position: start_pos,
                        found: c,
                    });
                }
            };
            return Ok(Some(Token::new(kind, start_pos)));
        }

        let kind = match c {
            '(' => TokenKind::Open,
            ')' => TokenKind::Close,
            _ => match BinaryOp::from_symbol(c) {
                Some(op) => TokenKind::Binary(op),
                None => {
                    return Err(ExprError::InvalidCharacter {
                        position: start_pos,
                        found: c,
                    });
                }
            },
        };
        self.advance();
        Ok(Some(Token::new(kind, start_pos)))
    }

    /// Read an alphabetic run. Words are matched whole, never by prefix.
    fn read_word(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphabetic() {
                self.advance();
            } else {
                break;
            }
        }
        &self.input[start..self.pos]
    }

    /// Read a number literal: digits with at most one decimal point, optionally
    /// followed by an exponent (`e`/`E`, optional sign, at least one digit).
    fn read_number(&mut self, start_pos: usize) -> Result<f64> {
        let mut saw_dot = false;
        let mut saw_digit = false;

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                saw_digit = true;
                self.advance();
            } else if c == '.' {
                if saw_dot {
                    return Err(self.malformed_number(start_pos));
                }
                saw_dot = true;
                self.advance();
            } else if (c == 'e' || c == 'E') && saw_digit {
                self.advance();
                if let Some(sign) = self.peek() {
                    if sign == '+' || sign == '-' {
                        self.advance();
                    }
                }

                let mut has_exp_digits = false;
                while let Some(ec) = self.peek() {
                    if ec.is_ascii_digit() {
                        has_exp_digits = true;
                        self.advance();
                    } else {
                        break;
                    }
                }

                if !has_exp_digits || self.peek() == Some('.') {
                    return Err(self.malformed_number(start_pos));
                }
                break;
            } else {
                break;
            }
        }

        if !saw_digit {
            return Err(self.malformed_number(start_pos));
        }

        let num_str = &self.input[start_pos..self.pos];
        num_str.parse::<f64>().map_err(|_| ExprError::MalformedNumber {
            position: start_pos,
            text: String::from(num_str),
        })
    }

    /// Consume the rest of a broken literal so the error shows all of it.
    fn malformed_number(&mut self, start_pos: usize) -> ExprError {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '.' {
                self.advance();
            } else {
                break;
            }
        }
        ExprError::MalformedNumber {
            position: start_pos,
            text: String::from(&self.input[start_pos..self.pos]),
        }
    }
}

/// Tokenize and validate an expression.
///
/// `+` and `-` in operand position (at the start, after `(`, or after a binary
/// operator) become unary signs. Only one sign may precede an operand.
///
/// Input without a single number or `x` is always `EmptyExpression`, whatever
/// else is wrong with it: `*`, `()` and `)` are all empty.
///
/// # Errors
///
/// The first problem found, as one of `InvalidCharacter`, `MalformedNumber`,
/// `UnbalancedBrackets`, `InvalidOperatorSequence`, `MissingFunctionParen` or
/// `EmptyExpression`.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(input);
    let mut tokens: Vec<Token> = Vec::new();
    let mut allowed = TokenClass::OPERAND_START;
    let mut depth: usize = 0;
    let mut operands: usize = 0;
    // First grammar error; reported only once an operand has been seen.
    let mut pending: Option<ExprError> = None;

    loop {
        let raw = match lexer.next_token() {
            Ok(Some(raw)) => raw,
            Ok(None) => break,
            Err(err) => return Err(pending.unwrap_or(err)),
        };
        if raw.kind.is_operand() {
            operands += 1;
        }
        if pending.is_some() {
            continue;
        }

        let token = resolve_sign(raw, allowed);
        let class = token.kind.class();

        match token.kind {
            TokenKind::Open => depth += 1,
            TokenKind::Close if depth == 0 => {
                pending = Some(ExprError::UnbalancedBrackets {
                    position: token.position,
                });
                continue;
            }
            TokenKind::Close => depth -= 1,
            _ => {}
        }

        if !allowed.contains(class) {
            pending = Some(adjacency_error(tokens.last(), &token));
            continue;
        }

        allowed = class.allowed_next();
        tokens.push(token);
    }

    if operands == 0 {
        return Err(ExprError::EmptyExpression);
    }
    if let Some(err) = pending {
        return Err(err);
    }
    if depth != 0 {
        return Err(ExprError::UnbalancedBrackets {
            position: input.len(),
        });
    }
    if let Some(last) = tokens.last() {
        if !allowed.contains(TokenClass::CLOSE) {
            return Err(match last.kind {
                TokenKind::Function(func) => ExprError::MissingFunctionParen {
                    position: last.position,
                    function: func.name(),
                },
                _ => ExprError::InvalidOperatorSequence {
                    position: last.position,
                },
            });
        }
    }

    log::trace!("tokenized {:?} into {} tokens", input, tokens.len());
    Ok(tokens)
}

/// Retag a `+`/`-` as a sign when the grammar expects an operand.
fn resolve_sign(token: Token, allowed: TokenClass) -> Token {
    match token.kind {
        TokenKind::Binary(op) if allowed.contains(TokenClass::UNARY) => match op.as_unary() {
            Some(sign) => Token::new(TokenKind::Unary(sign), token.position),
            None => token,
        },
        _ => token,
    }
}

fn adjacency_error(previous: Option<&Token>, token: &Token) -> ExprError {
    match previous.map(|t| t.kind) {
        Some(TokenKind::Function(func)) => ExprError::MissingFunctionParen {
            position: token.position,
            function: func.name(),
        },
        _ => ExprError::InvalidOperatorSequence {
            position: token.position,
        },
    }
}
