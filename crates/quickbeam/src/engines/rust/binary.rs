//! Binary operation evaluation

use std::cmp::Ordering;

use crate::engine::EvalWindow;
use crate::error::EvalFault;
use crate::value::Value;

use super::assign::target_name;
use super::Evaluate;

impl Evaluate for syn::ExprBinary {
    fn eval(&self, window: &mut EvalWindow<'_>) -> Result<Value, EvalFault> {
        // Short-circuit evaluation for && and ||
        match &self.op {
            syn::BinOp::And(_) => return eval_and(&self.left, &self.right, window),
            syn::BinOp::Or(_) => return eval_or(&self.left, &self.right, window),
            _ => {}
        }

        // Compound assignment desugars: x += y becomes x = x + y
        if let Some(base) = desugared(&self.op) {
            return eval_compound_assignment(self, base, window);
        }

        let left = self.left.eval(window)?;
        let right = self.right.eval(window)?;
        apply(&self.op, left, right)
    }
}

fn apply(op: &syn::BinOp, left: Value, right: Value) -> Result<Value, EvalFault> {
    match op {
        // Arithmetic
        syn::BinOp::Add(_) => eval_add(left, right),
        syn::BinOp::Sub(_) => eval_sub(left, right),
        syn::BinOp::Mul(_) => eval_mul(left, right),
        syn::BinOp::Div(_) => eval_div(left, right),
        syn::BinOp::Rem(_) => eval_rem(left, right),

        // Comparison
        syn::BinOp::Eq(_) => Ok(Value::Bool(left == right)),
        syn::BinOp::Ne(_) => Ok(Value::Bool(left != right)),
        syn::BinOp::Lt(_) | syn::BinOp::Le(_) | syn::BinOp::Gt(_) | syn::BinOp::Ge(_) => {
            compare(op, left, right)
        }

        other => Err(EvalFault::fatal(match op_symbol(other) {
            Some(symbol) => format!("unsupported operator `{}`", symbol),
            None => "unsupported operator".to_string(),
        })),
    }
}

/// The base operation behind a supported compound assignment.
fn desugared(op: &syn::BinOp) -> Option<syn::BinOp> {
    match op {
        syn::BinOp::AddAssign(_) => Some(syn::BinOp::Add(Default::default())),
        syn::BinOp::SubAssign(_) => Some(syn::BinOp::Sub(Default::default())),
        syn::BinOp::MulAssign(_) => Some(syn::BinOp::Mul(Default::default())),
        syn::BinOp::DivAssign(_) => Some(syn::BinOp::Div(Default::default())),
        syn::BinOp::RemAssign(_) => Some(syn::BinOp::Rem(Default::default())),
        _ => None,
    }
}

fn eval_compound_assignment(
    binary: &syn::ExprBinary,
    base: syn::BinOp,
    window: &mut EvalWindow<'_>,
) -> Result<Value, EvalFault> {
    let name = target_name(&binary.left)?;
    let current = binary.left.eval(window)?;
    let update = binary.right.eval(window)?;
    let value = apply(&base, current, update)?;
    window.scope.define(name, value.clone());
    Ok(value)
}

fn eval_and(
    left: &syn::Expr,
    right: &syn::Expr,
    window: &mut EvalWindow<'_>,
) -> Result<Value, EvalFault> {
    match left.eval(window)? {
        Value::Bool(false) => Ok(Value::Bool(false)),
        Value::Bool(true) => boolean(right.eval(window)?, "&&"),
        other => Err(operand_error("&&", &other)),
    }
}

fn eval_or(
    left: &syn::Expr,
    right: &syn::Expr,
    window: &mut EvalWindow<'_>,
) -> Result<Value, EvalFault> {
    match left.eval(window)? {
        Value::Bool(true) => Ok(Value::Bool(true)),
        Value::Bool(false) => boolean(right.eval(window)?, "||"),
        other => Err(operand_error("||", &other)),
    }
}

fn boolean(value: Value, op: &str) -> Result<Value, EvalFault> {
    match value {
        Value::Bool(value) => Ok(Value::Bool(value)),
        other => Err(operand_error(op, &other)),
    }
}

fn operand_error(op: &str, value: &Value) -> EvalFault {
    EvalFault::type_violation(format!(
        "{} needs boolean operands, got {}",
        op,
        value.type_name()
    ))
}

// ═══════════════════════════════════════════════════════════════════════
// Arithmetic
// ═══════════════════════════════════════════════════════════════════════

fn eval_add(left: Value, right: Value) -> Result<Value, EvalFault> {
    match (left, right) {
        (Value::Int(l), Value::Int(r)) => checked(l.checked_add(r)),
        (Value::Str(l), Value::Str(r)) => Ok(Value::Str(l + &r)),
        (l, r) => numeric(l, r, "+").map(|(l, r)| Value::Float(l + r)),
    }
}

fn eval_sub(left: Value, right: Value) -> Result<Value, EvalFault> {
    match (left, right) {
        (Value::Int(l), Value::Int(r)) => checked(l.checked_sub(r)),
        (l, r) => numeric(l, r, "-").map(|(l, r)| Value::Float(l - r)),
    }
}

fn eval_mul(left: Value, right: Value) -> Result<Value, EvalFault> {
    match (left, right) {
        (Value::Int(l), Value::Int(r)) => checked(l.checked_mul(r)),
        (l, r) => numeric(l, r, "*").map(|(l, r)| Value::Float(l * r)),
    }
}

fn eval_div(left: Value, right: Value) -> Result<Value, EvalFault> {
    match (left, right) {
        (Value::Int(_), Value::Int(0)) => Err(EvalFault::fatal("division by zero")),
        (Value::Int(l), Value::Int(r)) => checked(l.checked_div(r)),
        (l, r) => numeric(l, r, "/").map(|(l, r)| Value::Float(l / r)),
    }
}

fn eval_rem(left: Value, right: Value) -> Result<Value, EvalFault> {
    match (left, right) {
        (Value::Int(_), Value::Int(0)) => Err(EvalFault::fatal("division by zero")),
        (Value::Int(l), Value::Int(r)) => checked(l.checked_rem(r)),
        (l, r) => numeric(l, r, "%").map(|(l, r)| Value::Float(l % r)),
    }
}

fn checked(result: Option<i64>) -> Result<Value, EvalFault> {
    result
        .map(Value::Int)
        .ok_or_else(|| EvalFault::fatal("integer overflow"))
}

/// Coerce a mixed numeric pair to floats; anything else is a type error.
fn numeric(left: Value, right: Value, op: &str) -> Result<(f64, f64), EvalFault> {
    match (left, right) {
        (Value::Int(l), Value::Float(r)) => Ok((l as f64, r)),
        (Value::Float(l), Value::Int(r)) => Ok((l, r as f64)),
        (Value::Float(l), Value::Float(r)) => Ok((l, r)),
        (l, r) => Err(EvalFault::type_violation(format!(
            "cannot apply {} to {} and {}",
            op,
            l.type_name(),
            r.type_name()
        ))),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Comparison
// ═══════════════════════════════════════════════════════════════════════

fn compare(op: &syn::BinOp, left: Value, right: Value) -> Result<Value, EvalFault> {
    let ordering = match (&left, &right) {
        (Value::Int(l), Value::Int(r)) => l.cmp(r),
        (Value::Str(l), Value::Str(r)) => l.cmp(r),
        (Value::Int(l), Value::Float(r)) => float_ordering(*l as f64, *r)?,
        (Value::Float(l), Value::Int(r)) => float_ordering(*l, *r as f64)?,
        (Value::Float(l), Value::Float(r)) => float_ordering(*l, *r)?,
        _ => {
            return Err(EvalFault::type_violation(format!(
                "cannot order {} and {}",
                left.type_name(),
                right.type_name()
            )))
        }
    };
    Ok(Value::Bool(match op {
        syn::BinOp::Lt(_) => ordering == Ordering::Less,
        syn::BinOp::Le(_) => ordering != Ordering::Greater,
        syn::BinOp::Gt(_) => ordering == Ordering::Greater,
        // Only Ge remains; apply() sends nothing else here
        _ => ordering != Ordering::Less,
    }))
}

fn float_ordering(left: f64, right: f64) -> Result<Ordering, EvalFault> {
    left.partial_cmp(&right)
        .ok_or_else(|| EvalFault::type_violation("cannot order nan values"))
}

fn op_symbol(op: &syn::BinOp) -> Option<&'static str> {
    match op {
        syn::BinOp::BitAnd(_) => Some("&"),
        syn::BinOp::BitOr(_) => Some("|"),
        syn::BinOp::BitXor(_) => Some("^"),
        syn::BinOp::Shl(_) => Some("<<"),
        syn::BinOp::Shr(_) => Some(">>"),
        syn::BinOp::BitAndAssign(_) => Some("&="),
        syn::BinOp::BitOrAssign(_) => Some("|="),
        syn::BinOp::BitXorAssign(_) => Some("^="),
        syn::BinOp::ShlAssign(_) => Some("<<="),
        syn::BinOp::ShrAssign(_) => Some(">>="),
        _ => None,
    }
}
