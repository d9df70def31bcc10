//! Exponent expression evaluator.
//!
//! Powered gate stamps carry their exponent as free-form arithmetic text
//! (`"1/2"`, `"pi/4"`, `"-(1+2)^2"`). The evaluator lexes with [`logos`] and
//! folds the token stream to an `f64` with a precedence-climbing parser.
//! `^` is right-associative and binds tighter than unary minus, so `-2^2`
//! evaluates to -4.

use logos::Logos;
use std::f64::consts::PI;

use crate::error::{CompileError, CompileResult};

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum Token {
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[token("pi")]
    #[token("PI")]
    #[token("π")]
    Pi,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    #[token("**")]
    Caret,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
}

// Binding power of unary minus: tighter than `*`, looser than `^`.
const UNARY_BP: u8 = 5;

/// Evaluate an exponent expression to a finite real number.
pub fn evaluate(src: &str) -> CompileResult<f64> {
    let fail = |reason: &str| CompileError::Expression {
        expr: src.to_owned(),
        reason: reason.to_owned(),
    };

    let mut tokens = Vec::new();
    for item in Token::lexer(src) {
        match item {
            Ok(tok) => tokens.push(tok),
            Err(()) => return Err(fail("unrecognized character")),
        }
    }
    if tokens.is_empty() {
        return Err(fail("empty expression"));
    }

    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr_bp(0).map_err(|reason| fail(&reason))?;
    if parser.pos != parser.tokens.len() {
        return Err(fail("trailing tokens after expression"));
    }
    if !value.is_finite() {
        return Err(fail("expression is not finite"));
    }
    Ok(value)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.peek();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expr_bp(&mut self, min_bp: u8) -> Result<f64, String> {
        let mut lhs = match self.next() {
            Some(Token::Number(v)) => v,
            Some(Token::Pi) => PI,
            Some(Token::Minus) => -self.expr_bp(UNARY_BP)?,
            Some(Token::Plus) => self.expr_bp(UNARY_BP)?,
            Some(Token::LParen) => {
                let v = self.expr_bp(0)?;
                match self.next() {
                    Some(Token::RParen) => v,
                    _ => return Err("unclosed parenthesis".to_owned()),
                }
            }
            Some(_) => return Err("expected a value".to_owned()),
            None => return Err("unexpected end of expression".to_owned()),
        };

        loop {
            let op = match self.peek() {
                Some(tok @ (Token::Plus | Token::Minus | Token::Star | Token::Slash | Token::Caret)) => tok,
                Some(Token::RParen) | None => break,
                Some(_) => return Err("expected an operator".to_owned()),
            };
            let (l_bp, r_bp) = match op {
                Token::Plus | Token::Minus => (1, 2),
                Token::Star | Token::Slash => (3, 4),
                // Right-associative.
                Token::Caret => (7, 6),
                _ => unreachable!(),
            };
            if l_bp < min_bp {
                break;
            }
            self.next();
            let rhs = self.expr_bp(r_bp)?;
            lhs = match op {
                Token::Plus => lhs + rhs,
                Token::Minus => lhs - rhs,
                Token::Star => lhs * rhs,
                Token::Slash => {
                    if rhs == 0.0 {
                        return Err("division by zero".to_owned());
                    }
                    lhs / rhs
                }
                Token::Caret => lhs.powf(rhs),
                _ => unreachable!(),
            };
        }
        Ok(lhs)
    }
}
