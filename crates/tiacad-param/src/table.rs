//! Resolves a whole named set of parameter definitions, including
//! parameters that reference other parameters, into a flat [`Environment`].

use std::collections::HashMap;

use crate::ast::Expr;
use crate::env::Environment;
use crate::error::{ParamError, ParamErrorKind, ParamResult};

/// A parameter's unresolved definition, as it appears in a document.
#[derive(Debug, Clone)]
pub enum RawValue {
    /// A plain numeric literal; never depends on other parameters.
    Number(f64),
    /// A `${...}` expression body, which may reference other parameters.
    Expr(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// A table of named parameter definitions, awaiting resolution.
#[derive(Debug, Clone, Default)]
pub struct ParamTable {
    defs: HashMap<String, RawValue>,
}

impl ParamTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine) a named parameter.
    pub fn define(&mut self, name: impl Into<String>, raw: RawValue) {
        self.defs.insert(name.into(), raw);
    }

    /// Resolve every defined parameter into a flat [`Environment`],
    /// evaluating dependent expressions in dependency order.
    ///
    /// Parameters that reference each other in a cycle are reported via
    /// [`crate::error::ParamErrorKind::CyclicDependency`] rather than
    /// recursing forever.
    pub fn resolve_all(&self) -> ParamResult<Environment> {
        let mut parsed: HashMap<&str, Expr> = HashMap::new();
        for (name, raw) in &self.defs {
            if let RawValue::Expr(src) = raw {
                let expr = crate::parser::parse_expr(src).map_err(|e| {
                    ParamError::new(e.kind, format!("parameter '{name}': {}", e.message))
                })?;
                parsed.insert(name.as_str(), expr);
            }
        }

        let mut env = Environment::new();
        let mut marks: HashMap<&str, Mark> = HashMap::new();
        let mut stack: Vec<&str> = Vec::new();

        for name in self.defs.keys() {
            self.visit(name, &parsed, &mut marks, &mut stack, &mut env)?;
        }
        Ok(env)
    }

    fn visit<'a>(
        &'a self,
        name: &'a str,
        parsed: &HashMap<&'a str, Expr>,
        marks: &mut HashMap<&'a str, Mark>,
        stack: &mut Vec<&'a str>,
        env: &mut Environment,
    ) -> ParamResult<()> {
        match marks.get(name) {
            Some(Mark::Done) => return Ok(()),
            None => {}
            Some(Mark::InProgress) => {
                let cycle = stack
                    .iter()
                    .skip_while(|&&n| n != name)
                    .chain(std::iter::once(&name))
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(" -> ");
                return Err(ParamError::new(
                    ParamErrorKind::CyclicDependency,
                    format!("parameter cycle detected: {cycle}"),
                ));
            }
        }

        marks.insert(name, Mark::InProgress);
        stack.push(name);

        match self.defs.get(name) {
            Some(RawValue::Number(n)) => env.set(name, *n),
            Some(RawValue::Expr(_)) => {
                let expr = parsed.get(name).expect("parsed alongside defs");
                let mut deps = Vec::new();
                collect_vars(expr, &mut deps);
                for dep in deps {
                    if self.defs.contains_key(dep.as_str()) {
                        self.visit(dep.as_str(), parsed, marks, stack, env)?;
                    }
                }
                let value = crate::eval::eval(expr, env)?;
                env.set(name, value);
            }
            None => {
                return Err(ParamError::new(
                    ParamErrorKind::UndefinedParameter,
                    format!("no parameter named '{name}'"),
                ))
            }
        }

        stack.pop();
        marks.insert(name, Mark::Done);
        Ok(())
    }
}

fn collect_vars(expr: &Expr, out: &mut Vec<String>) {
    match expr {
        Expr::Number(_) => {}
        Expr::Var(name) => out.push(name.clone()),
        Expr::Neg(inner) => collect_vars(inner, out),
        Expr::Binary(_, lhs, rhs) => {
            collect_vars(lhs, out);
            collect_vars(rhs, out);
        }
    }
}
