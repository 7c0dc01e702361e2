//! Shunting-yard compiler: tokens -> postfix (RPN) program.
//!
//! Operator precedence, lowest first:
//! - `+ -` binary, left associative
//! - `* / %` left associative
//! - unary `+ -` (prefix)
//! - `^` right associative
//!
//! A value (number, constant, `)`) directly followed by a constant, a
//! function, `(` or a number gets an implicit `*`. Two numbers in a row are
//! rejected. The compiler never recurses, so nesting depth is bounded only by
//! memory.

use super::builtins::Function;
use super::error::{EvaluationError, ParseError};
use super::token::{Spanned, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl BinaryOp {
    fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide | Self::Modulo => 2,
            Self::Power => 4,
        }
    }

    fn is_left_associative(self) -> bool {
        !matches!(self, Self::Power)
    }

    /// # Errors
    /// Returns `EvaluationError::DivisionByZero` when dividing or taking the
    /// remainder by zero.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, EvaluationError> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Subtract => Ok(lhs - rhs),
            Self::Multiply => Ok(lhs * rhs),
            Self::Divide | Self::Modulo if rhs == 0.0 => Err(EvaluationError::DivisionByZero),
            Self::Divide => Ok(lhs / rhs),
            Self::Modulo => Ok(lhs % rhs),
            Self::Power => Ok(lhs.powf(rhs)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

const UNARY_PRECEDENCE: u8 = 3;

impl UnaryOp {
    #[must_use]
    pub fn apply(self, operand: f64) -> f64 {
        match self {
            Self::Plus => operand,
            Self::Minus => -operand,
        }
    }
}

/// One step of a compiled program, executed against a value stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instruction {
    Push(f64),
    Unary(UnaryOp),
    Binary(BinaryOp),
    Call(Function),
}

/// Entries of the operator stack.
enum Pending {
    Unary(UnaryOp),
    Binary(BinaryOp),
    Group,
    Call { function: Function, separators: usize },
}

impl Pending {
    fn precedence(&self) -> Option<u8> {
        match self {
            Self::Unary(_) => Some(UNARY_PRECEDENCE),
            Self::Binary(op) => Some(op.precedence()),
            Self::Group | Self::Call { .. } => None,
        }
    }

    fn into_instruction(self) -> Option<Instruction> {
        match self {
            Self::Unary(op) => Some(Instruction::Unary(op)),
            Self::Binary(op) => Some(Instruction::Binary(op)),
            Self::Group | Self::Call { .. } => None,
        }
    }
}

struct Compiler {
    output: Vec<Instruction>,
    ops: Vec<Pending>,
    /// True when the next token must start an operand.
    expect_operand: bool,
    /// True when the last token was a number literal.
    after_number: bool,
}

/// Compile a token stream into a postfix program.
///
/// # Errors
/// Returns `ParseError` on any structural problem: missing operands,
/// unbalanced parentheses, misplaced separators, adjacent numbers, and
/// function calls with the wrong number of arguments.
pub fn compile(tokens: &[Spanned]) -> Result<Vec<Instruction>, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut compiler = Compiler {
        output: Vec::with_capacity(tokens.len()),
        ops: Vec::new(),
        expect_operand: true,
        after_number: false,
    };

    let mut iter = tokens.iter().peekable();
    while let Some(&Spanned { token, position }) = iter.next() {
        match token {
            Token::Number(value) => {
                if compiler.after_number {
                    return Err(ParseError::AdjacentNumbers { position });
                }
                compiler.implicit_multiply();
                compiler.output.push(Instruction::Push(value));
                compiler.operand_done(true);
            }
            Token::Constant(constant) => {
                compiler.implicit_multiply();
                compiler.output.push(Instruction::Push(constant.value()));
                compiler.operand_done(false);
            }
            Token::Function(function) => {
                if iter.next_if(|s| s.token == Token::OpenParen).is_none() {
                    return Err(ParseError::MissingCallParenthesis {
                        name: function.name(),
                        position,
                    });
                }
                compiler.implicit_multiply();
                compiler.ops.push(Pending::Call {
                    function,
                    separators: 0,
                });
                compiler.expect_operand = true;
                compiler.after_number = false;
            }
            Token::OpenParen => {
                compiler.implicit_multiply();
                compiler.ops.push(Pending::Group);
                compiler.expect_operand = true;
                compiler.after_number = false;
            }
            Token::CloseParen => compiler.close_group(position)?,
            Token::Comma => compiler.separator(position)?,
            Token::Plus | Token::Minus if compiler.expect_operand => {
                let op = if token == Token::Plus {
                    UnaryOp::Plus
                } else {
                    UnaryOp::Minus
                };
                compiler.ops.push(Pending::Unary(op));
                compiler.after_number = false;
            }
            Token::Plus => compiler.binary(BinaryOp::Add, position)?,
            Token::Minus => compiler.binary(BinaryOp::Subtract, position)?,
            Token::Star => compiler.binary(BinaryOp::Multiply, position)?,
            Token::Slash => compiler.binary(BinaryOp::Divide, position)?,
            Token::Percent => compiler.binary(BinaryOp::Modulo, position)?,
            Token::Caret => compiler.binary(BinaryOp::Power, position)?,
        }
    }

    compiler.finish(tokens)
}

impl Compiler {
    fn operand_done(&mut self, was_number: bool) {
        self.expect_operand = false;
        self.after_number = was_number;
    }

    fn implicit_multiply(&mut self) {
        if !self.expect_operand {
            self.push_binary(BinaryOp::Multiply);
        }
    }

    fn push_binary(&mut self, op: BinaryOp) {
        let incoming = op.precedence();
        while let Some(top) = self.ops.last() {
            let Some(stacked) = top.precedence() else {
                break;
            };
            let pops = stacked > incoming || (stacked == incoming && op.is_left_associative());
            if !pops {
                break;
            }
            if let Some(instruction) = self.ops.pop().and_then(Pending::into_instruction) {
                self.output.push(instruction);
            }
        }
        self.ops.push(Pending::Binary(op));
        self.expect_operand = true;
        self.after_number = false;
    }

    fn binary(&mut self, op: BinaryOp, position: usize) -> Result<(), ParseError> {
        if self.expect_operand {
            return Err(ParseError::MissingOperand { position });
        }
        self.push_binary(op);
        Ok(())
    }

    /// Move operators to the output until the innermost group or call.
    fn drain_to_group(&mut self) {
        while let Some(top) = self.ops.last() {
            if top.precedence().is_none() {
                break;
            }
            if let Some(instruction) = self.ops.pop().and_then(Pending::into_instruction) {
                self.output.push(instruction);
            }
        }
    }

    fn close_group(&mut self, position: usize) -> Result<(), ParseError> {
        if self.expect_operand {
            return Err(ParseError::MissingOperand { position });
        }
        self.drain_to_group();

        match self.ops.pop() {
            Some(Pending::Group) => {}
            Some(Pending::Call {
                function,
                separators,
            }) => {
                let found = separators + 1;
                if found != function.arity() {
                    return Err(ParseError::ArityMismatch {
                        name: function.name(),
                        expected: function.arity(),
                        found,
                    });
                }
                self.output.push(Instruction::Call(function));
            }
            _ => return Err(ParseError::UnbalancedParenthesis { position }),
        }

        self.operand_done(false);
        Ok(())
    }

    fn separator(&mut self, position: usize) -> Result<(), ParseError> {
        if self.expect_operand {
            return Err(ParseError::MissingOperand { position });
        }
        self.drain_to_group();

        let Some(Pending::Call { separators, .. }) = self.ops.last_mut() else {
            return Err(ParseError::MisplacedSeparator { position });
        };
        *separators += 1;

        self.expect_operand = true;
        self.after_number = false;
        Ok(())
    }

    fn finish(mut self, tokens: &[Spanned]) -> Result<Vec<Instruction>, ParseError> {
        let end = tokens
            .last()
            .map_or(0, |s| s.position.saturating_add(1));
        if self.expect_operand {
            return Err(ParseError::MissingOperand { position: end });
        }

        while let Some(pending) = self.ops.pop() {
            let Some(instruction) = pending.into_instruction() else {
                return Err(ParseError::UnbalancedParenthesis { position: end });
            };
            self.output.push(instruction);
        }

        Ok(self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::super::builtins::Constant;
    use super::super::token::tokenize;
    use super::*;

    fn program(input: &str) -> Vec<Instruction> {
        compile(&tokenize(input).unwrap()).unwrap()
    }

    fn error(input: &str) -> ParseError {
        compile(&tokenize(input).unwrap()).unwrap_err()
    }

    #[test]
    fn respects_precedence() {
        assert_eq!(
            program("1+2*3"),
            vec![
                Instruction::Push(1.0),
                Instruction::Push(2.0),
                Instruction::Push(3.0),
                Instruction::Binary(BinaryOp::Multiply),
                Instruction::Binary(BinaryOp::Add),
            ]
        );
    }

    #[test]
    fn power_is_right_associative_and_binds_tighter_than_negation() {
        assert_eq!(
            program("-2^3^2"),
            vec![
                Instruction::Push(2.0),
                Instruction::Push(3.0),
                Instruction::Push(2.0),
                Instruction::Binary(BinaryOp::Power),
                Instruction::Binary(BinaryOp::Power),
                Instruction::Unary(UnaryOp::Minus),
            ]
        );
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(
            program("8-4-2"),
            vec![
                Instruction::Push(8.0),
                Instruction::Push(4.0),
                Instruction::Binary(BinaryOp::Subtract),
                Instruction::Push(2.0),
                Instruction::Binary(BinaryOp::Subtract),
            ]
        );
    }

    #[test]
    fn inserts_implicit_multiplication() {
        assert_eq!(
            program("2pi"),
            vec![
                Instruction::Push(2.0),
                Instruction::Push(Constant::Pi.value()),
                Instruction::Binary(BinaryOp::Multiply),
            ]
        );
        assert_eq!(
            program("(1)(2)"),
            vec![
                Instruction::Push(1.0),
                Instruction::Push(2.0),
                Instruction::Binary(BinaryOp::Multiply),
            ]
        );
    }

    #[test]
    fn compiles_function_calls() {
        assert_eq!(
            program("pow(2, 1+1)"),
            vec![
                Instruction::Push(2.0),
                Instruction::Push(1.0),
                Instruction::Push(1.0),
                Instruction::Binary(BinaryOp::Add),
                Instruction::Call(Function::Pow),
            ]
        );
    }

    #[test]
    fn rejects_structural_errors() {
        assert_eq!(error("2+"), ParseError::MissingOperand { position: 2 });
        assert_eq!(error("*2"), ParseError::MissingOperand { position: 0 });
        assert_eq!(error("()"), ParseError::MissingOperand { position: 1 });
        assert_eq!(error("(1+2"), ParseError::UnbalancedParenthesis { position: 4 });
        assert_eq!(error("1+2)"), ParseError::UnbalancedParenthesis { position: 3 });
        assert_eq!(error("1 2"), ParseError::AdjacentNumbers { position: 2 });
        assert_eq!(error("1,2"), ParseError::MisplacedSeparator { position: 1 });
        assert_eq!(
            error("sqrt 4"),
            ParseError::MissingCallParenthesis {
                name: "sqrt",
                position: 0
            }
        );
        assert_eq!(
            error("pow(2)"),
            ParseError::ArityMismatch {
                name: "pow",
                expected: 2,
                found: 1
            }
        );
        assert_eq!(compile(&[]).unwrap_err(), ParseError::Empty);
    }

    #[test]
    fn deep_nesting_does_not_recurse() {
        let depth = 100_000;
        let input = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(program(&input), vec![Instruction::Push(1.0)]);
    }
}
