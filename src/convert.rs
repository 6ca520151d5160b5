//! Infix to postfix conversion.
//!
//! Classic shunting-yard over the validated token list from
//! [`tokenize`](crate::lexer::tokenize). The converter does not trust its input: a
//! parenthesis without a partner is reported as `UnmatchedParen` even though the
//! lexer already rejects it.

extern crate alloc;

use alloc::vec::Vec;

use crate::error::{ExprError, Result};
use crate::types::{Associativity, Token, TokenKind};

/// Reorder an infix token list into postfix order.
///
/// Binary operators pop every stacked operator that binds tighter, or equally
/// tight when the incoming operator is left-associative. Signs and functions
/// only occur where an operand is expected, so they are pushed without popping:
/// whatever waits on the stack still needs the operand they introduce.
pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::Number(_) | TokenKind::Variable => output.push(token),
            TokenKind::Open | TokenKind::Unary(_) | TokenKind::Function(_) => stack.push(token),
            TokenKind::Close => {
                loop {
                    match stack.pop() {
                        Some(Token {
                            kind: TokenKind::Open,
                            ..
                        }) => break,
                        Some(top) => output.push(top),
                        None => return Err(ExprError::UnmatchedParen),
                    }
                }
                if matches!(stack.last().map(|t| t.kind), Some(TokenKind::Function(_))) {
                    if let Some(func) = stack.pop() {
                        output.push(func);
                    }
                }
            }
            TokenKind::Binary(op) => {
                let info = op.info();
                while let Some(top) = stack.last() {
                    if top.kind == TokenKind::Open {
                        break;
                    }
                    let pops = top.precedence() > info.precedence
                        || (top.precedence() == info.precedence
                            && info.associativity == Associativity::Left);
                    if !pops {
                        break;
                    }
                    if let Some(top) = stack.pop() {
                        output.push(top);
                    }
                }
                stack.push(token);
            }
        }
    }

    while let Some(top) = stack.pop() {
        if top.kind == TokenKind::Open {
            return Err(ExprError::UnmatchedParen);
        }
        output.push(top);
    }

    log::trace!("postfix: {}", PostfixDisplay(&output));
    Ok(output)
}

/// Formats a token list as space-separated symbols, for logs and tests.
///
/// Unary minus prints as `~` and unary plus as `#`.
pub struct PostfixDisplay<'a>(pub &'a [Token]);

impl core::fmt::Display for PostfixDisplay<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token.kind)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::types::{BinaryOp, UnaryOp};
    use alloc::string::{String, ToString};
    use alloc::vec;

    fn postfix(input: &str) -> String {
        let tokens = tokenize(input).unwrap_or_else(|e| panic!("tokenize({:?}): {}", input, e));
        let out = to_postfix(tokens).unwrap_or_else(|e| panic!("to_postfix({:?}): {}", input, e));
        PostfixDisplay(&out).to_string()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(postfix("2+3*4"), "2 3 4 * +");
        assert_eq!(postfix("2*3+4"), "2 3 * 4 +");
        assert_eq!(postfix("(2+3)*4"), "2 3 + 4 *");
        assert_eq!(postfix("7 mod 3 + 1"), "7 3 mod 1 +");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(postfix("1-2-3"), "1 2 - 3 -");
        assert_eq!(postfix("8/4/2"), "8 4 / 2 /");
        assert_eq!(postfix("8/4*2"), "8 4 / 2 *");
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(postfix("2^3^2"), "2 3 2 ^ ^");
    }

    #[test]
    fn test_unary_binds_weaker_than_power() {
        assert_eq!(postfix("-3^2"), "3 2 ^ ~");
        assert_eq!(postfix("2^-1"), "2 1 ~ ^");
        assert_eq!(postfix("-2*3"), "2 ~ 3 *");
        assert_eq!(postfix("2*-3"), "2 3 ~ *");
        assert_eq!(postfix("1-+2"), "1 2 # -");
        assert_eq!(postfix("2^-3^2"), "2 3 2 ^ ~ ^");
    }

    #[test]
    fn test_functions() {
        assert_eq!(postfix("sin(x)"), "x sin");
        assert_eq!(postfix("sin(x)^2"), "x sin 2 ^");
        assert_eq!(postfix("sqrt(sqrt(79))"), "79 sqrt sqrt");
        assert_eq!(postfix("-cos(1+2)*3"), "1 2 + cos ~ 3 *");
        assert_eq!(postfix("ln(x) mod log(100)"), "x ln 100 log mod");
    }

    #[test]
    fn test_unmatched_paren_is_rechecked() {
        let close_only = vec![
            Token::new(TokenKind::Number(1.0), 0),
            Token::new(TokenKind::Close, 1),
        ];
        assert_eq!(to_postfix(close_only), Err(ExprError::UnmatchedParen));

        let open_only = vec![
            Token::new(TokenKind::Open, 0),
            Token::new(TokenKind::Number(1.0), 1),
            Token::new(TokenKind::Binary(BinaryOp::Add), 2),
            Token::new(TokenKind::Number(2.0), 3),
        ];
        assert_eq!(to_postfix(open_only), Err(ExprError::UnmatchedParen));
    }

    #[test]
    fn test_output_has_no_parentheses() {
        let tokens = tokenize("((x+1)*(-(2)))").unwrap();
        let out = to_postfix(tokens).unwrap();
        assert!(out.iter().all(|t| !matches!(t.kind, TokenKind::Open | TokenKind::Close)));
        assert_eq!(out[out.len() - 2].kind, TokenKind::Unary(UnaryOp::Minus));
    }
}
