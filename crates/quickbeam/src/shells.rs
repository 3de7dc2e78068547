//! Ready-made shells
//!
//! [`ScriptedShell`] feeds a fixed script of events into the loop and
//! records everything the loop says back. It backs this crate's own
//! tests and works as a batch harness for embedders that want to run a
//! canned session and inspect the transcript afterwards.

use std::collections::VecDeque;
use std::path::PathBuf;

use crate::capture::OutputFlags;
use crate::error::QuickbeamError;
use crate::handler::{Diagnostic, Severity};
use crate::scope::{Scope, RECEIVER_NAME};
use crate::shell::Shell;
use crate::value::Value;

/// One scripted step handed out by `get_input`.
#[derive(Debug, Clone)]
pub enum ScriptEvent {
    /// A fragment of input.
    Input(String),

    /// A failure raised from input acquisition, the way an interactive
    /// shell raises a break on a closed terminal.
    Signal(QuickbeamError),
}

/// A shell that reads from a script and records the session.
///
/// Script events are handed out in order; when they run dry,
/// `get_input` raises a break and the loop winds down the way an
/// interactive session does on end-of-file. Reported values, failures,
/// output chunks, and deferred diagnostics all land in public fields
/// for later inspection.
#[derive(Debug, Default)]
pub struct ScriptedShell {
    script: VecDeque<ScriptEvent>,
    pending: Vec<String>,
    rewrite: Option<fn(String) -> String>,
    scope: Scope,
    bound: Option<Value>,
    threshold: Severity,
    include_paths: Vec<PathBuf>,

    /// Every fragment registered through `add_code`, with its `direct`
    /// flag.
    pub added: Vec<(String, bool)>,

    /// Every chunk passed to `write_stdout`, with its flags. Empty
    /// chunks are not recorded.
    pub writes: Vec<(Vec<u8>, OutputFlags)>,

    /// Every value reported through `write_return_value`, in order.
    pub return_values: Vec<Value>,

    /// Every failure reported through `write_exception`, in order.
    pub exceptions: Vec<QuickbeamError>,

    /// Every deferred diagnostic delivered to `handle_error`.
    pub diagnostics: Vec<Diagnostic>,

    /// How many times `before_loop` fired.
    pub before_loops: usize,

    /// How many times `after_loop` fired.
    pub after_loops: usize,
}

impl ScriptedShell {
    /// An empty shell with no inputs and nothing bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one input fragment to the script.
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.script.push_back(ScriptEvent::Input(input.into()));
        self
    }

    /// Append several input fragments to the script.
    pub fn with_inputs<I, T>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.script
            .extend(inputs.into_iter().map(|input| ScriptEvent::Input(input.into())));
        self
    }

    /// Append a failure for `get_input` to raise when it reaches this
    /// point in the script.
    pub fn with_signal(mut self, error: QuickbeamError) -> Self {
        self.script.push_back(ScriptEvent::Signal(error));
        self
    }

    /// Install a fragment rewrite applied immediately before evaluation.
    pub fn with_rewrite(mut self, rewrite: fn(String) -> String) -> Self {
        self.rewrite = Some(rewrite);
        self
    }

    /// Seed the scope with one binding.
    pub fn with_variable(mut self, name: impl Into<String>, value: Value) -> Self {
        self.scope.define(name, value);
        self
    }

    /// Bind an object for receiver-relative evaluation.
    pub fn with_bound_object(mut self, value: Value) -> Self {
        self.bound = Some(value);
        self
    }

    /// Set the severity at which captured diagnostics abort evaluation.
    pub fn with_threshold(mut self, threshold: Severity) -> Self {
        self.threshold = threshold;
        self
    }

    /// Queue a file to run before the first iteration.
    pub fn with_include(mut self, path: impl Into<PathBuf>) -> Self {
        self.include_paths.push(path.into());
        self
    }

    /// The current scope bindings.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// All recorded output chunks, concatenated and decoded lossily.
    pub fn stdout_text(&self) -> String {
        let mut bytes = Vec::new();
        for (chunk, _) in &self.writes {
            bytes.extend_from_slice(chunk);
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Shell for ScriptedShell {
    fn add_code(&mut self, fragment: &str, direct: bool) {
        self.added.push((fragment.to_string(), direct));
        self.pending.push(fragment.to_string());
    }

    fn get_input(&mut self) -> Result<String, QuickbeamError> {
        match self.script.pop_front() {
            Some(ScriptEvent::Input(input)) => Ok(input),
            Some(ScriptEvent::Signal(error)) => Err(error),
            None => Err(QuickbeamError::break_with("end of script")),
        }
    }

    fn flush_code(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.drain(..).collect::<Vec<_>>().join("\n"))
        }
    }

    fn on_execute(&mut self, fragment: String) -> String {
        match self.rewrite {
            Some(rewrite) => rewrite(fragment),
            None => fragment,
        }
    }

    fn write_return_value(&mut self, value: &Value) {
        self.return_values.push(value.clone());
    }

    fn write_exception(&mut self, error: &QuickbeamError) {
        self.exceptions.push(error.clone());
    }

    fn write_stdout(&mut self, chunk: &[u8], flags: OutputFlags) -> Vec<u8> {
        if !chunk.is_empty() {
            self.writes.push((chunk.to_vec(), flags));
        }
        chunk.to_vec()
    }

    fn before_loop(&mut self) {
        self.before_loops += 1;
    }

    fn after_loop(&mut self) {
        self.after_loops += 1;
    }

    fn includes(&self) -> Vec<PathBuf> {
        self.include_paths.clone()
    }

    fn scope_variables(&self, include_receiver: bool) -> Scope {
        let mut scope = self.scope.clone();
        if include_receiver {
            if let Some(bound) = &self.bound {
                scope.define(RECEIVER_NAME, bound.clone());
            }
        }
        scope
    }

    fn set_scope_variables(&mut self, scope: Scope) {
        self.scope = scope;
    }

    fn bound_object(&self) -> Option<Value> {
        self.bound.clone()
    }

    fn handle_error(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn error_threshold(&self) -> Severity {
        self.threshold
    }
}
