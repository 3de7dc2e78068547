//! Assignment evaluation

use crate::engine::EvalWindow;
use crate::error::EvalFault;
use crate::scope::RECEIVER_NAME;
use crate::value::Value;

use super::Evaluate;

impl Evaluate for syn::ExprAssign {
    fn eval(&self, window: &mut EvalWindow<'_>) -> Result<Value, EvalFault> {
        let name = target_name(&self.left)?;
        let value = self.right.eval(window)?;
        window.scope.define(name, value.clone());
        Ok(value)
    }
}

/// The variable name an assignment writes to.
///
/// Only plain identifiers can be assigned; the receiver is fixed for
/// the life of the loop and rejects reassignment.
pub(super) fn target_name(target: &syn::Expr) -> Result<String, EvalFault> {
    let path = match target {
        syn::Expr::Path(path) if path.qself.is_none() => path,
        _ => return Err(EvalFault::fatal("unsupported assignment target")),
    };
    let name = match path.path.get_ident() {
        Some(ident) => ident.to_string(),
        None => return Err(EvalFault::fatal("unsupported assignment target")),
    };
    if name == RECEIVER_NAME {
        return Err(EvalFault::fatal("cannot reassign the bound receiver"));
    }
    Ok(name)
}
