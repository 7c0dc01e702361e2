//! Tokenizer for arithmetic expressions.
//!
//! Recognises:
//! - number literals: `12`, `1.5`, `.5`, `5.`, `1e3`, `2.5E-2`
//! - operators `+ - * / % ^`, parentheses and the argument separator `,`
//! - identifiers `[alpha_][alnum_]*`, resolved to built-in constants or
//!   functions (unknown names are rejected here)

use super::builtins::{Constant, Function};
use super::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Constant(Constant),
    Function(Function),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    OpenParen,
    CloseParen,
    Comma,
}

/// A token together with its byte offset in the source text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

/// Split `input` into tokens.
///
/// # Errors
/// Returns `ParseError` on characters outside the grammar, malformed number
/// literals and unknown identifiers.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, ParseError> {
    let mut lexer = Lexer { input, pos: 0 };
    let mut out = Vec::new();

    while let Some(c) = lexer.peek() {
        if c.is_whitespace() {
            lexer.bump(c);
            continue;
        }

        let position = lexer.pos;
        let token = match c {
            '0'..='9' | '.' => lexer.number()?,
            c if c.is_alphabetic() || c == '_' => lexer.identifier()?,
            _ => {
                let token = match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    '/' => Token::Slash,
                    '%' => Token::Percent,
                    '^' => Token::Caret,
                    '(' => Token::OpenParen,
                    ')' => Token::CloseParen,
                    ',' => Token::Comma,
                    ch => return Err(ParseError::UnexpectedCharacter { ch, position }),
                };
                lexer.bump(c);
                token
            }
        };
        out.push(Spanned { token, position });
    }

    Ok(out)
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    /// Consume chars while `pred` holds and return the consumed slice.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump(c);
        }
        &self.input[start..self.pos]
    }

    /// Length in bytes of an exponent suffix (`e7`, `E-3`, `e+12`) at the
    /// cursor, or 0 when the text there is not an exponent.
    fn exponent_len(&self) -> usize {
        let bytes = self.rest().as_bytes();
        match bytes {
            [b'e' | b'E', d, ..] if d.is_ascii_digit() => 1,
            [b'e' | b'E', b'+' | b'-', d, ..] if d.is_ascii_digit() => 2,
            _ => 0,
        }
    }

    fn number(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        self.take_while(|c| c.is_ascii_digit() || c == '.');

        let marker = self.exponent_len();
        if marker > 0 {
            self.pos += marker;
            self.take_while(|c| c.is_ascii_digit());
        }

        let literal = &self.input[start..self.pos];
        literal
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| ParseError::InvalidNumber {
                literal: literal.to_owned(),
                position: start,
            })
    }

    fn identifier(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        let name = self.take_while(|c| c.is_alphanumeric() || c == '_');

        if let Some(constant) = Constant::lookup(name) {
            return Ok(Token::Constant(constant));
        }
        if let Some(function) = Function::lookup(name) {
            return Ok(Token::Function(function));
        }
        Err(ParseError::UnknownIdentifier {
            name: name.to_owned(),
            position: start,
        })
    }
}
