//! Evaluate a parsed parameter expression against an environment.

use crate::ast::{BinOp, Expr};
use crate::env::Environment;
use crate::error::{ParamError, ParamErrorKind, ParamResult};

/// Evaluate `expr` against `env`, resolving any variable references through
/// it.
pub fn eval(expr: &Expr, env: &Environment) -> ParamResult<f64> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Var(name) => env.get(name),
        Expr::Neg(inner) => Ok(-eval(inner, env)?),
        Expr::Binary(op, lhs, rhs) => {
            let l = eval(lhs, env)?;
            let r = eval(rhs, env)?;
            apply(*op, l, r)
        }
    }
}

fn apply(op: BinOp, l: f64, r: f64) -> ParamResult<f64> {
    match op {
        BinOp::Add => Ok(l + r),
        BinOp::Sub => Ok(l - r),
        BinOp::Mul => Ok(l * r),
        BinOp::Div => {
            if r == 0.0 {
                Err(ParamError::new(ParamErrorKind::ArithmeticError, "division by zero"))
            } else {
                Ok(l / r)
            }
        }
        BinOp::Mod => {
            if r == 0.0 {
                Err(ParamError::new(ParamErrorKind::ArithmeticError, "modulo by zero"))
            } else {
                Ok(l % r)
            }
        }
        BinOp::Pow => Ok(l.powf(r)),
    }
}

/// Parse and evaluate a parameter expression body in one step.
pub fn eval_str(src: &str, env: &Environment) -> ParamResult<f64> {
    let expr = crate::parser::parse_expr(src)?;
    eval(&expr, env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_arithmetic() {
        let env = Environment::new();
        assert_eq!(eval_str("2 + 3 * 4", &env).unwrap(), 14.0);
        assert_eq!(eval_str("(2 + 3) * 4", &env).unwrap(), 20.0);
        assert_eq!(eval_str("2 ** 3 ** 2", &env).unwrap(), 512.0);
        assert_eq!(eval_str("-5 + 2", &env).unwrap(), -3.0);
    }

    #[test]
    fn evaluates_variables() {
        let mut env = Environment::new();
        env.set("wall_thickness", 2.5);
        assert_eq!(eval_str("wall_thickness * 2", &env).unwrap(), 5.0);
    }

    #[test]
    fn division_by_zero_errors() {
        let env = Environment::new();
        let err = eval_str("1 / 0", &env).unwrap_err();
        assert_eq!(err.kind, ParamErrorKind::ArithmeticError);
    }

    #[test]
    fn undefined_variable_errors() {
        let env = Environment::new();
        let err = eval_str("unknown_param + 1", &env).unwrap_err();
        assert_eq!(err.kind, ParamErrorKind::UndefinedParameter);
    }
}
