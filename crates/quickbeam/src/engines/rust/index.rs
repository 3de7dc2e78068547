//! Index expression evaluation

use crate::engine::EvalWindow;
use crate::error::EvalFault;
use crate::handler::{self, Diagnostic};
use crate::value::Value;

use super::Evaluate;

impl Evaluate for syn::ExprIndex {
    fn eval(&self, window: &mut EvalWindow<'_>) -> Result<Value, EvalFault> {
        let container = self.expr.eval(window)?;
        let index = self.index.eval(window)?;

        match (container, index) {
            (Value::List(items), Value::Int(i)) => {
                let found = usize::try_from(i)
                    .ok()
                    .and_then(|i| items.get(i).cloned());
                match found {
                    Some(value) => Ok(value),
                    None => Err(EvalFault::fatal(format!(
                        "list index out of bounds: {}",
                        i
                    ))),
                }
            }
            (Value::Map(entries), Value::Str(key)) => match entries.get(&key) {
                Some(value) => Ok(value.clone()),
                None => {
                    handler::raise(Diagnostic::notice(format!("undefined key: {}", key)))?;
                    Ok(Value::Null)
                }
            },
            (Value::List(_), other) => Err(EvalFault::type_violation(format!(
                "list index must be an integer, got {}",
                other.type_name()
            ))),
            (Value::Map(_), other) => Err(EvalFault::type_violation(format!(
                "map key must be a string, got {}",
                other.type_name()
            ))),
            (other, _) => Err(EvalFault::type_violation(format!(
                "cannot index {}",
                other.type_name()
            ))),
        }
    }
}
