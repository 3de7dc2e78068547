//! Unary operators

use crate::engine::EvalWindow;
use crate::error::EvalFault;
use crate::value::Value;

use super::Evaluate;

impl Evaluate for syn::ExprUnary {
    fn eval(&self, window: &mut EvalWindow<'_>) -> Result<Value, EvalFault> {
        let operand = self.expr.eval(window)?;
        match self.op {
            syn::UnOp::Neg(_) => negate(operand),
            syn::UnOp::Not(_) => match operand {
                Value::Bool(value) => Ok(Value::Bool(!value)),
                other => Err(EvalFault::type_violation(format!(
                    "cannot apply ! to {}",
                    other.type_name()
                ))),
            },
            _ => Err(EvalFault::fatal("unsupported unary operator")),
        }
    }
}

fn negate(operand: Value) -> Result<Value, EvalFault> {
    match operand {
        Value::Int(value) => value
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| EvalFault::fatal("integer overflow")),
        Value::Float(value) => Ok(Value::Float(-value)),
        other => Err(EvalFault::type_violation(format!(
            "cannot negate {}",
            other.type_name()
        ))),
    }
}
