//! Built-in constants and functions recognised by the expression engine.

use super::error::EvaluationError;

const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Named constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
    Phi,
}

impl Constant {
    /// Resolve a constant by its name (`pi`, `e`, and the symbols pi and phi).
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "pi" | "\u{3c0}" => Some(Self::Pi),
            "e" => Some(Self::E),
            "\u{3c6}" => Some(Self::Phi),
            _ => None,
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
            Self::Phi => GOLDEN_RATIO,
        }
    }
}

/// Built-in function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Abs,
    Acos,
    Asin,
    Atan,
    Cbrt,
    Ceil,
    Cos,
    Cosh,
    Cot,
    Exp,
    Expm1,
    Floor,
    Log,
    Log10,
    Log1p,
    Log2,
    Pow,
    Signum,
    Sin,
    Sinh,
    Sqrt,
    Tan,
    Tanh,
    ToDegree,
    ToRadian,
}

impl Function {
    /// Resolve a function by name. Names are case-sensitive.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        let f = match name {
            "abs" => Self::Abs,
            "acos" => Self::Acos,
            "asin" => Self::Asin,
            "atan" => Self::Atan,
            "cbrt" => Self::Cbrt,
            "ceil" => Self::Ceil,
            "cos" => Self::Cos,
            "cosh" => Self::Cosh,
            "cot" => Self::Cot,
            "exp" => Self::Exp,
            "expm1" => Self::Expm1,
            "floor" => Self::Floor,
            "log" => Self::Log,
            "log10" => Self::Log10,
            "log1p" => Self::Log1p,
            "log2" => Self::Log2,
            "pow" => Self::Pow,
            "signum" => Self::Signum,
            "sin" => Self::Sin,
            "sinh" => Self::Sinh,
            "sqrt" => Self::Sqrt,
            "tan" => Self::Tan,
            "tanh" => Self::Tanh,
            "todegree" => Self::ToDegree,
            "toradian" => Self::ToRadian,
            _ => return None,
        };
        Some(f)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Acos => "acos",
            Self::Asin => "asin",
            Self::Atan => "atan",
            Self::Cbrt => "cbrt",
            Self::Ceil => "ceil",
            Self::Cos => "cos",
            Self::Cosh => "cosh",
            Self::Cot => "cot",
            Self::Exp => "exp",
            Self::Expm1 => "expm1",
            Self::Floor => "floor",
            Self::Log => "log",
            Self::Log10 => "log10",
            Self::Log1p => "log1p",
            Self::Log2 => "log2",
            Self::Pow => "pow",
            Self::Signum => "signum",
            Self::Sin => "sin",
            Self::Sinh => "sinh",
            Self::Sqrt => "sqrt",
            Self::Tan => "tan",
            Self::Tanh => "tanh",
            Self::ToDegree => "todegree",
            Self::ToRadian => "toradian",
        }
    }

    /// Number of arguments the function takes.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Self::Pow => 2,
            _ => 1,
        }
    }

    /// Apply the function to exactly `self.arity()` arguments.
    ///
    /// # Errors
    /// Returns `EvaluationError::DivisionByZero` for `cot` where the tangent is exactly zero
    /// and `EvaluationError::MalformedProgram` on an argument count mismatch.
    pub fn apply(self, args: &[f64]) -> Result<f64, EvaluationError> {
        let [x] = args else {
            return match (self, args) {
                (Self::Pow, [base, exponent]) => Ok(base.powf(*exponent)),
                _ => Err(EvaluationError::MalformedProgram),
            };
        };
        let x = *x;

        let value = match self {
            Self::Abs => x.abs(),
            Self::Acos => x.acos(),
            Self::Asin => x.asin(),
            Self::Atan => x.atan(),
            Self::Cbrt => x.cbrt(),
            Self::Ceil => x.ceil(),
            Self::Cos => x.cos(),
            Self::Cosh => x.cosh(),
            Self::Cot => {
                let tan = x.tan();
                if tan == 0.0 {
                    return Err(EvaluationError::DivisionByZero);
                }
                1.0 / tan
            }
            Self::Exp => x.exp(),
            Self::Expm1 => x.exp_m1(),
            Self::Floor => x.floor(),
            Self::Log => x.ln(),
            Self::Log10 => x.log10(),
            Self::Log1p => x.ln_1p(),
            Self::Log2 => x.log2(),
            // f64::signum maps zero to one
            Self::Signum => {
                if x == 0.0 || x.is_nan() {
                    x
                } else {
                    x.signum()
                }
            }
            Self::Sin => x.sin(),
            Self::Sinh => x.sinh(),
            Self::Sqrt => x.sqrt(),
            Self::Tan => x.tan(),
            Self::Tanh => x.tanh(),
            Self::ToDegree => x.to_degrees(),
            Self::ToRadian => x.to_radians(),
            Self::Pow => return Err(EvaluationError::MalformedProgram),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_resolve_by_name_and_symbol() {
        assert_eq!(Constant::lookup("pi"), Some(Constant::Pi));
        assert_eq!(Constant::lookup("\u{3c0}"), Some(Constant::Pi));
        assert_eq!(Constant::lookup("\u{3c6}"), Some(Constant::Phi));
        assert_eq!(Constant::lookup("PI"), None);
        assert!((Constant::E.value() - std::f64::consts::E).abs() < f64::EPSILON);
    }

    #[test]
    fn every_function_round_trips_through_its_name() {
        for name in [
            "abs", "acos", "asin", "atan", "cbrt", "ceil", "cos", "cosh", "cot", "exp", "expm1",
            "floor", "log", "log10", "log1p", "log2", "pow", "signum", "sin", "sinh", "sqrt",
            "tan", "tanh", "todegree", "toradian",
        ] {
            let f = Function::lookup(name).unwrap();
            assert_eq!(f.name(), name);
        }
        assert_eq!(Function::lookup("Sin"), None);
    }

    #[test]
    fn signum_keeps_zero() {
        assert_eq!(Function::Signum.apply(&[0.0]).unwrap().to_bits(), 0.0f64.to_bits());
        assert!((Function::Signum.apply(&[-4.0]).unwrap() + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pow_takes_two_arguments() {
        assert_eq!(Function::Pow.arity(), 2);
        assert!((Function::Pow.apply(&[2.0, 10.0]).unwrap() - 1024.0).abs() < f64::EPSILON);
        assert_eq!(
            Function::Pow.apply(&[2.0]),
            Err(EvaluationError::MalformedProgram)
        );
    }

    #[test]
    fn cot_of_zero_is_a_division_by_zero() {
        assert_eq!(
            Function::Cot.apply(&[0.0]),
            Err(EvaluationError::DivisionByZero)
        );
    }
}
