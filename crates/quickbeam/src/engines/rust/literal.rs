//! Literal evaluation

use crate::engine::EvalWindow;
use crate::error::EvalFault;
use crate::value::Value;

use super::Evaluate;

impl Evaluate for syn::ExprLit {
    fn eval(&self, _window: &mut EvalWindow<'_>) -> Result<Value, EvalFault> {
        eval_lit(&self.lit)
    }
}

/// Evaluate a literal to a value.
fn eval_lit(lit: &syn::Lit) -> Result<Value, EvalFault> {
    match lit {
        syn::Lit::Str(lit) => Ok(Value::string(lit.value())),

        // A single character is just a one-character string here
        syn::Lit::Char(lit) => Ok(Value::Str(lit.value().to_string())),

        syn::Lit::Int(lit) => eval_int_literal(lit),

        syn::Lit::Float(lit) => eval_float_literal(lit),

        syn::Lit::Bool(lit) => Ok(Value::Bool(lit.value)),

        _ => Err(EvalFault::fatal("unsupported literal")),
    }
}

/// Integers are 64-bit; the only accepted suffix says so explicitly.
fn eval_int_literal(lit: &syn::LitInt) -> Result<Value, EvalFault> {
    match lit.suffix() {
        "" | "i64" => lit.base10_parse::<i64>().map(Value::Int).map_err(|_| {
            EvalFault::fatal(format!(
                "integer literal out of range: {}",
                lit.base10_digits()
            ))
        }),
        other => Err(EvalFault::fatal(format!(
            "unsupported integer suffix `{}`",
            other
        ))),
    }
}

fn eval_float_literal(lit: &syn::LitFloat) -> Result<Value, EvalFault> {
    match lit.suffix() {
        "" | "f64" => lit
            .base10_parse::<f64>()
            .map(Value::Float)
            .map_err(|err| EvalFault::fatal(format!("invalid float literal: {}", err))),
        other => Err(EvalFault::fatal(format!(
            "unsupported float suffix `{}`",
            other
        ))),
    }
}
