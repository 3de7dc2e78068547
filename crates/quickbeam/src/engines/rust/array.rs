//! Array literal evaluation

use crate::engine::EvalWindow;
use crate::error::EvalFault;
use crate::value::Value;

use super::Evaluate;

impl Evaluate for syn::ExprArray {
    fn eval(&self, window: &mut EvalWindow<'_>) -> Result<Value, EvalFault> {
        let mut items = Vec::with_capacity(self.elems.len());
        for elem in &self.elems {
            items.push(elem.eval(window)?);
        }
        Ok(Value::List(items))
    }
}
