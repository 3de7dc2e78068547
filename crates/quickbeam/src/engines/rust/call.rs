//! Built-in function calls

use std::io::Write;

use crate::engine::EvalWindow;
use crate::error::{EvalFault, QuickbeamError};
use crate::handler::{self, Diagnostic};
use crate::value::Value;

use super::Evaluate;

impl Evaluate for syn::ExprCall {
    fn eval(&self, window: &mut EvalWindow<'_>) -> Result<Value, EvalFault> {
        let name = match self.func.as_ref() {
            syn::Expr::Path(path) if path.qself.is_none() => match path.path.get_ident() {
                Some(ident) => ident.to_string(),
                None => return Err(EvalFault::fatal("unsupported callee expression")),
            },
            _ => return Err(EvalFault::fatal("unsupported callee expression")),
        };

        let mut args = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            args.push(arg.eval(window)?);
        }

        call_builtin(&name, args, window)
    }
}

fn call_builtin(
    name: &str,
    args: Vec<Value>,
    window: &mut EvalWindow<'_>,
) -> Result<Value, EvalFault> {
    match name {
        "print" => {
            for value in &args {
                write_value(window.output, value)?;
            }
            Ok(Value::Null)
        }
        "println" => {
            for value in &args {
                write_value(window.output, value)?;
            }
            window.output.write_all(b"\n")?;
            Ok(Value::Null)
        }
        "len" => match args.as_slice() {
            [Value::Str(text)] => Ok(Value::Int(text.chars().count() as i64)),
            [Value::List(items)] => Ok(Value::Int(items.len() as i64)),
            [Value::Map(entries)] => Ok(Value::Int(entries.len() as i64)),
            [other] => Err(EvalFault::type_violation(format!(
                "len() expects a string or collection, got {}",
                other.type_name()
            ))),
            _ => Err(EvalFault::type_violation(
                "len() expects exactly one argument",
            )),
        },
        "type_of" => match args.as_slice() {
            [value] => Ok(Value::string(value.type_name())),
            _ => Err(EvalFault::type_violation(
                "type_of() expects exactly one argument",
            )),
        },
        "throw" => Err(thrown(&args).into()),
        "exit" => {
            let error = if args.is_empty() {
                QuickbeamError::break_loop()
            } else {
                QuickbeamError::break_with(text_of(&args, "exiting"))
            };
            Err(error.into())
        }
        "propagate" => {
            let inner = QuickbeamError::domain("Exception", text_of(&args, "propagated"));
            Err(QuickbeamError::propagate(inner).into())
        }
        "warn" => {
            handler::raise(Diagnostic::warning(text_of(&args, "warning")))?;
            Ok(Value::Null)
        }
        "notice" => {
            handler::raise(Diagnostic::notice(text_of(&args, "notice")))?;
            Ok(Value::Null)
        }
        _ => Err(EvalFault::fatal(format!(
            "call to undefined function {}()",
            name
        ))),
    }
}

/// Print one value; strings go out raw, everything else as displayed.
fn write_value(output: &mut dyn Write, value: &Value) -> Result<(), EvalFault> {
    match value {
        Value::Str(text) => output.write_all(text.as_bytes())?,
        other => write!(output, "{}", other)?,
    }
    Ok(())
}

/// The failure `throw(...)` raises.
///
/// Two arguments name the failure class explicitly; any other shape
/// joins the arguments into the message of a generic `Exception`.
fn thrown(args: &[Value]) -> QuickbeamError {
    match args {
        [name, message] => QuickbeamError::domain(text(name), text(message)),
        _ => QuickbeamError::domain("Exception", text_of(args, "thrown")),
    }
}

/// Render one value as message text; strings stay unquoted.
fn text(value: &Value) -> String {
    match value {
        Value::Str(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Join arguments into one message, with a fallback for an empty list.
fn text_of(args: &[Value], fallback: &str) -> String {
    if args.is_empty() {
        return fallback.to_string();
    }
    args.iter().map(text).collect::<Vec<_>>().join(" ")
}
