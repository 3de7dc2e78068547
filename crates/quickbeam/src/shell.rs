//! The host collaborator contract
//!
//! The loop core owns sequencing; everything user-facing, from input and
//! presentation to persistence of variables between calls, belongs to
//! the host behind this trait. Implementations range from full
//! interactive terminals down to the scripted shells this crate tests
//! itself with.

use std::path::PathBuf;

use crate::capture::OutputFlags;
use crate::error::QuickbeamError;
use crate::handler::{Diagnostic, Severity};
use crate::scope::Scope;
use crate::value::Value;

/// Everything the execution loop needs from its host.
pub trait Shell {
    /// Register a fragment of code for the next execution.
    ///
    /// `direct` is true when the fragment came straight from interactive
    /// input rather than from an embedding caller.
    fn add_code(&mut self, fragment: &str, direct: bool);

    /// Block until the next fragment of input is available.
    ///
    /// Returns [`QuickbeamError::Break`] when the input source is
    /// exhausted, and may return [`QuickbeamError::Propagate`] to force
    /// an error out of the loop.
    fn get_input(&mut self) -> Result<String, QuickbeamError>;

    /// Return and clear the currently buffered code.
    fn flush_code(&mut self) -> Option<String>;

    /// Transform a fragment immediately before evaluation.
    ///
    /// The default is the identity transform.
    fn on_execute(&mut self, fragment: String) -> String {
        fragment
    }

    /// Report the value produced by a successful evaluation.
    fn write_return_value(&mut self, value: &Value);

    /// Report a normalized failure. The loop calls this exactly once per
    /// failure.
    fn write_exception(&mut self, error: &QuickbeamError);

    /// Accept one chunk of evaluated-program output.
    ///
    /// The returned bytes are what the shell actually emitted, which may
    /// differ from `chunk` when the shell rewrites output on the way
    /// through.
    fn write_stdout(&mut self, chunk: &[u8], flags: OutputFlags) -> Vec<u8>;

    /// Called at the top of every loop iteration.
    fn before_loop(&mut self) {}

    /// Called at the bottom of every completed iteration; not called on
    /// the iteration that terminates the loop.
    fn after_loop(&mut self) {}

    /// Paths of files to run before the first iteration.
    fn includes(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    /// Snapshot of the current scope bindings.
    ///
    /// With `include_receiver` set, a bound receiver appears in the
    /// result under [`crate::scope::RECEIVER_NAME`].
    fn scope_variables(&self, include_receiver: bool) -> Scope;

    /// Replace the stored scope bindings.
    fn set_scope_variables(&mut self, scope: Scope);

    /// The object receiver-relative references resolve against, if any.
    fn bound_object(&self) -> Option<Value> {
        None
    }

    /// Accept a diagnostic that was captured during an evaluation window
    /// but did not escalate.
    fn handle_error(&mut self, diagnostic: Diagnostic);

    /// Minimum severity at which a captured diagnostic aborts the
    /// evaluation instead of being deferred.
    fn error_threshold(&self) -> Severity {
        Severity::Warning
    }
}
