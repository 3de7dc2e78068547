//! Field access evaluation

use crate::engine::EvalWindow;
use crate::error::EvalFault;
use crate::handler::{self, Diagnostic};
use crate::value::Value;

use super::Evaluate;

impl Evaluate for syn::ExprField {
    fn eval(&self, window: &mut EvalWindow<'_>) -> Result<Value, EvalFault> {
        let name = match &self.member {
            syn::Member::Named(ident) => ident.to_string(),
            syn::Member::Unnamed(index) => {
                return Err(EvalFault::fatal(format!(
                    "unsupported tuple field access .{}",
                    index.index
                )))
            }
        };
        let base = self.base.eval(window)?;

        match base {
            Value::Map(entries) => match entries.get(&name) {
                Some(value) => Ok(value.clone()),
                None => {
                    handler::raise(Diagnostic::notice(format!("undefined field: {}", name)))?;
                    Ok(Value::Null)
                }
            },
            other => Err(EvalFault::type_violation(format!(
                "cannot access field {} on {}",
                name,
                other.type_name()
            ))),
        }
    }
}
