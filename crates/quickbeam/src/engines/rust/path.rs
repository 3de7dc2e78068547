//! Variable and receiver lookup

use crate::engine::EvalWindow;
use crate::error::EvalFault;
use crate::handler::{self, Diagnostic};
use crate::scope::RECEIVER_NAME;
use crate::value::Value;

use super::Evaluate;

impl Evaluate for syn::ExprPath {
    fn eval(&self, window: &mut EvalWindow<'_>) -> Result<Value, EvalFault> {
        if self.qself.is_some() {
            return Err(EvalFault::fatal("unsupported qualified path"));
        }
        let ident = match self.path.get_ident() {
            Some(ident) => ident,
            None => return Err(EvalFault::fatal("unsupported multi-segment path")),
        };
        let name = ident.to_string();

        if name == RECEIVER_NAME {
            return match window.receiver {
                Some(receiver) => Ok(receiver.clone()),
                None => Err(EvalFault::fatal("no receiver is bound in this context")),
            };
        }

        match window.scope.get(&name) {
            Some(value) => Ok(value.clone()),
            None => {
                // Reading a name that was never bound is survivable
                handler::raise(Diagnostic::notice(format!("undefined variable: {}", name)))?;
                Ok(Value::Null)
            }
        }
    }
}
