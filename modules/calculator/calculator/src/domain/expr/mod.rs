//! Arithmetic expression engine.
//!
//! Text goes through three stages: [`token::tokenize`] splits it, [`rpn::compile`]
//! turns the tokens into a postfix program, and [`Expression::evaluate`] runs the
//! program on a value stack. None of the stages recurse.

mod builtins;
mod error;
mod rpn;
mod token;

pub use builtins::{Constant, Function};
pub use error::{EvaluationError, ParseError};

use rpn::Instruction;

/// A compiled expression, ready to be evaluated any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    program: Vec<Instruction>,
}

impl Expression {
    /// Parse and compile `text`.
    ///
    /// # Errors
    /// Returns `ParseError` when `text` is not a well-formed expression.
    pub fn build(text: &str) -> Result<Self, ParseError> {
        let tokens = token::tokenize(text)?;
        let program = rpn::compile(&tokens)?;
        Ok(Self { program })
    }

    /// Run the compiled program.
    ///
    /// # Errors
    /// - `DivisionByZero` for `x / 0`, `x % 0` and `cot` of a multiple of pi
    /// - `Domain` when the result is not a number
    /// - `Overflow` when the result is infinite
    pub fn evaluate(&self) -> Result<f64, EvaluationError> {
        let mut stack: Vec<f64> = Vec::with_capacity(self.program.len());

        for instruction in &self.program {
            match *instruction {
                Instruction::Push(value) => stack.push(value),
                Instruction::Unary(op) => {
                    let operand = stack.pop().ok_or(EvaluationError::MalformedProgram)?;
                    stack.push(op.apply(operand));
                }
                Instruction::Binary(op) => {
                    let rhs = stack.pop().ok_or(EvaluationError::MalformedProgram)?;
                    let lhs = stack.pop().ok_or(EvaluationError::MalformedProgram)?;
                    stack.push(op.apply(lhs, rhs)?);
                }
                Instruction::Call(function) => {
                    let split = stack
                        .len()
                        .checked_sub(function.arity())
                        .ok_or(EvaluationError::MalformedProgram)?;
                    let value = function.apply(&stack[split..])?;
                    stack.truncate(split);
                    stack.push(value);
                }
            }
        }

        let [result] = stack[..] else {
            return Err(EvaluationError::MalformedProgram);
        };
        if result.is_nan() {
            Err(EvaluationError::Domain)
        } else if result.is_infinite() {
            Err(EvaluationError::Overflow)
        } else {
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(text: &str) -> f64 {
        Expression::build(text).unwrap().evaluate().unwrap()
    }

    fn assert_close(text: &str, expected: f64) {
        let actual = eval(text);
        assert!(
            (actual - expected).abs() < 1e-9,
            "{text}: expected {expected}, got {actual}"
        );
    }

    #[test]
    fn evaluates_basic_arithmetic() {
        assert_close("10*11", 110.0);
        assert_close("55/2", 27.5);
        assert_close("1 + 2 * 3", 7.0);
        assert_close("(1 + 2) * 3", 9.0);
        assert_close("8 - 4 - 2", 2.0);
        assert_close("7 % 4", 3.0);
        assert_close("-7 % 4", -3.0);
    }

    #[test]
    fn power_and_unary_minus() {
        assert_close("-2^2", -4.0);
        assert_close("2^3^2", 512.0);
        assert_close("2^-2", 0.25);
        assert_close("--3", 3.0);
        assert_close("+4", 4.0);
        assert_close("3*-2", -6.0);
    }

    #[test]
    fn implicit_multiplication() {
        assert_close("2pi", 2.0 * std::f64::consts::PI);
        assert_close("2(3+4)", 14.0);
        assert_close("(1+1)(2+2)", 8.0);
        assert_close("3sqrt(4)", 6.0);
        assert_close("2e", 2.0 * std::f64::consts::E);
    }

    #[test]
    fn functions_and_constants() {
        assert_close("sqrt(16)", 4.0);
        assert_close("pow(2, 10)", 1024.0);
        assert_close("sin(pi/2)", 1.0);
        assert_close("log(e)", 1.0);
        assert_close("abs(-3) + floor(2.7) + ceil(0.2)", 6.0);
        assert_close("todegree(pi)", 180.0);
        assert_close("\u{3c6}", 1.618_033_988_749_895);
        assert_close("sqrt(sqrt(sqrt(256)))", 2.0);
    }

    #[test]
    fn syntax_errors_are_parse_errors() {
        for text in ["", "   ", "2+", "(1+2", "1+2)", "1 2", "foo(1)", "sqrt", "pow(1)", "1,2", "2**3"] {
            assert!(Expression::build(text).is_err(), "{text:?} should not build");
        }
    }

    #[test]
    fn arithmetic_failures_are_evaluation_errors() {
        let failure = |text: &str| Expression::build(text).unwrap().evaluate().unwrap_err();
        assert_eq!(failure("1/0"), EvaluationError::DivisionByZero);
        assert_eq!(failure("5 % 0"), EvaluationError::DivisionByZero);
        assert_eq!(failure("sqrt(-1)"), EvaluationError::Domain);
        assert_eq!(failure("log(-1)"), EvaluationError::Domain);
        assert_eq!(failure("10^400"), EvaluationError::Overflow);
        assert_eq!(failure("log(0)"), EvaluationError::Overflow);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let expression = Expression::build("1/3 + 2^0.5").unwrap();
        let first = expression.evaluate().unwrap();
        let second = expression.evaluate().unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn deeply_nested_input_evaluates() {
        let depth = 50_000;
        let text = format!("{}2{}", "(".repeat(depth), ")".repeat(depth));
        assert_close(&text, 2.0);

        let negations = format!("{}5", "-".repeat(depth));
        assert_close(&negations, 5.0);
    }
}
