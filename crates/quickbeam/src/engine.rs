//! The evaluation engine contract

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::EvalFault;
use crate::handler::{self, Diagnostic};
use crate::scope::Scope;
use crate::value::Value;

/// Everything an engine may touch while one fragment evaluates.
///
/// The window is assembled by the execution core: scope comes in by
/// value from the shell, the receiver was resolved once when the loop
/// was built, and anything the fragment prints lands in the core's
/// output sink.
pub struct EvalWindow<'a> {
    /// Bindings visible to the fragment; mutations survive only if the
    /// evaluation succeeds.
    pub scope: &'a mut Scope,

    /// The bound receiver, when one is configured.
    pub receiver: Option<&'a Value>,

    /// Destination for the fragment's output.
    pub output: &'a mut dyn Write,
}

/// A fragment evaluator.
///
/// Engines are deliberately unaware of the loop around them: they see
/// one fragment and one window at a time. Raw failures escape as
/// [`EvalFault`] and are normalized exactly once, by the caller.
pub trait Engine {
    /// Evaluate one fragment inside the given window.
    fn eval(&mut self, source: &str, window: &mut EvalWindow<'_>) -> Result<Value, EvalFault>;

    /// Run one include file inside the given window.
    ///
    /// The default reads the file and evaluates its contents. An
    /// unreadable file raises a warning-severity diagnostic, which
    /// escalates or defers according to the active threshold; when it
    /// defers, the include evaluates to `Null` and loading moves on.
    fn include(&mut self, path: &Path, window: &mut EvalWindow<'_>) -> Result<Value, EvalFault> {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                handler::raise(Diagnostic::warning(format!(
                    "failed to read include {}: {}",
                    path.display(),
                    err
                )))?;
                return Ok(Value::Null);
            }
        };
        self.eval(&source, window)
    }

    /// Whether evaluation should run against the shell's bound object.
    ///
    /// An engine that cannot support receiver binding, kept around for a
    /// constrained legacy embedding, answers false here; the loop then
    /// never resolves a receiver, regardless of what the shell offers.
    fn binds_receiver(&self) -> bool {
        true
    }
}
