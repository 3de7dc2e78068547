//! The execution core
//!
//! One fragment at a time runs under a fixed discipline. The scope is
//! borrowed from the shell before evaluation and written back only when
//! evaluation succeeds, so a failing fragment cannot leave half-applied
//! bindings behind. Output is buffered the same way and flushed or
//! discarded with the same decision. [`execute_once`] surfaces raw
//! faults; [`execute_fragment`] is the one place they become taxonomy
//! members.

use tracing::trace;

use crate::capture::OutputCapture;
use crate::engine::{Engine, EvalWindow};
use crate::error::{EvalFault, QuickbeamError, Result};
use crate::handler::HandlerGuard;
use crate::shell::Shell;
use crate::value::Value;

/// Execute the shell's accumulated fragment, surfacing raw faults.
///
/// Pulls the pending fragment with [`Shell::flush_code`], lets
/// [`Shell::on_execute`] rewrite it, then evaluates it against a copy
/// of the shell's scope with output buffered and a diagnostic handler
/// installed for the duration.
///
/// On success the mutated scope is committed, the buffered output is
/// flushed through [`Shell::write_stdout`], and the result is returned
/// for the caller to present. On failure the scope copy and the buffer
/// are both dropped, so neither bindings nor output from the failed
/// fragment are ever observable; the fault comes back unchanged, and
/// normalizing it is the caller's business.
///
/// Diagnostics deferred during the window reach
/// [`Shell::handle_error`] on both paths. An empty fragment evaluates
/// to [`Value::Null`] without touching the engine.
pub fn execute_once<S, E>(
    shell: &mut S,
    engine: &mut E,
    receiver: Option<&Value>,
) -> std::result::Result<Value, EvalFault>
where
    S: Shell + ?Sized,
    E: Engine + ?Sized,
{
    let fragment = shell.flush_code().unwrap_or_default();
    let fragment = shell.on_execute(fragment);

    let mut scope = shell.scope_variables(false);
    let mut capture = OutputCapture::new();
    let mut guard = HandlerGuard::install(shell.error_threshold());

    let outcome = if fragment.trim().is_empty() {
        Ok(Value::Null)
    } else {
        trace!(bytes = fragment.len(), "evaluating fragment");
        let mut window = EvalWindow {
            scope: &mut scope,
            receiver,
            output: &mut capture,
        };
        engine.eval(&fragment, &mut window)
    };

    let deferred = guard.drain();
    drop(guard);

    match outcome {
        Ok(value) => {
            shell.set_scope_variables(scope);
            capture.flush_to(shell);
            for diagnostic in deferred {
                shell.handle_error(diagnostic);
            }
            Ok(value)
        }
        Err(fault) => {
            capture.discard();
            for diagnostic in deferred {
                shell.handle_error(diagnostic);
            }
            Err(fault)
        }
    }
}

/// Execute the shell's accumulated fragment under the closed taxonomy.
///
/// This is [`execute_once`] with its raw fault normalized through the
/// single `From<EvalFault>` impl. Both the interactive loop and
/// one-shot execution come through here, so everything past this point
/// only ever observes [`QuickbeamError`].
pub fn execute_fragment<S, E>(
    shell: &mut S,
    engine: &mut E,
    receiver: Option<&Value>,
) -> Result<Value>
where
    S: Shell + ?Sized,
    E: Engine + ?Sized,
{
    execute_once(shell, engine, receiver).map_err(QuickbeamError::from)
}
