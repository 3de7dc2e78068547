//! The outer read-eval-print loop
//!
//! [`Repl`] owns a host shell and an engine and drives them through a
//! small state machine: wait for input, execute it, report what
//! happened, repeat. Two of the five failure kinds are terminal. A
//! break ends the loop quietly and a propagated error ends it loudly;
//! everything else is reported and the loop keeps going.

use tracing::trace;

use crate::engine::Engine;
use crate::error::{QuickbeamError, Result};
use crate::executor::execute_fragment;
use crate::includes::load_includes;
use crate::shell::Shell;
use crate::value::Value;

/// Where the loop currently stands.
enum LoopState {
    Idle,
    AwaitingInput,
    Executing,
    Reporting(Result<Value>),
    Terminated(Termination),
}

/// How a session ended.
enum Termination {
    Break,
    Propagated(QuickbeamError),
}

/// An interactive execution session over a host shell and an engine.
///
/// The receiver the engine evaluates against is resolved exactly once,
/// here in [`new`](Repl::new), and never re-examined: an engine that
/// declines receiver binding gets none, no matter what the shell
/// offers.
///
/// ```
/// use quickbeam::{Repl, RustEngine, ScriptedShell, Value};
///
/// let shell = ScriptedShell::new().with_input("x = 20").with_input("x + 1");
/// let mut repl = Repl::new(shell, RustEngine::new());
/// repl.run().unwrap();
///
/// assert_eq!(repl.shell().return_values, vec![Value::Int(20), Value::Int(21)]);
/// ```
pub struct Repl<S, E> {
    shell: S,
    engine: E,
    receiver: Option<Value>,
}

impl<S: Shell, E: Engine> Repl<S, E> {
    /// Build a session, resolving the receiver for its whole lifetime.
    pub fn new(shell: S, engine: E) -> Self {
        let receiver = if engine.binds_receiver() {
            shell.bound_object()
        } else {
            None
        };
        Self {
            shell,
            engine,
            receiver,
        }
    }

    /// The host shell.
    pub fn shell(&self) -> &S {
        &self.shell
    }

    /// The host shell, mutably.
    pub fn shell_mut(&mut self) -> &mut S {
        &mut self.shell
    }

    /// The engine, mutably.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// The receiver resolved at construction, if any.
    pub fn receiver(&self) -> Option<&Value> {
        self.receiver.as_ref()
    }

    /// Give the shell and engine back.
    pub fn into_inner(self) -> (S, E) {
        (self.shell, self.engine)
    }

    /// Run the interactive loop until it terminates.
    ///
    /// Includes load first, once. Each iteration then fires
    /// `before_loop`, blocks on `get_input`, executes the fragment
    /// under the full discipline, and reports the outcome: a value
    /// through `write_return_value`, a failure through
    /// `write_exception`. Recoverable failures are followed by
    /// `after_loop` and another iteration.
    ///
    /// Every failure kind is reported exactly once, including the
    /// terminal ones. A break then returns `Ok(())`; a propagated
    /// error is re-raised as the return value of `run` itself. Neither
    /// terminal path fires `after_loop`.
    ///
    /// Calling `run` again after a break starts a fresh session over
    /// the same shell and engine, includes and all.
    pub fn run(&mut self) -> Result<()> {
        load_includes(&mut self.shell, &mut self.engine);

        let mut state = LoopState::Idle;
        loop {
            state = match state {
                LoopState::Idle => LoopState::AwaitingInput,
                LoopState::AwaitingInput => {
                    self.shell.before_loop();
                    match self.shell.get_input() {
                        Ok(input) => {
                            self.shell.add_code(&input, true);
                            LoopState::Executing
                        }
                        Err(error) => LoopState::Reporting(Err(error)),
                    }
                }
                LoopState::Executing => {
                    let outcome = execute_fragment(
                        &mut self.shell,
                        &mut self.engine,
                        self.receiver.as_ref(),
                    );
                    LoopState::Reporting(outcome)
                }
                LoopState::Reporting(outcome) => match outcome {
                    Ok(value) => {
                        self.shell.write_return_value(&value);
                        self.shell.after_loop();
                        LoopState::AwaitingInput
                    }
                    Err(error) => {
                        self.shell.write_exception(&error);
                        match &error {
                            QuickbeamError::Break { .. } => {
                                LoopState::Terminated(Termination::Break)
                            }
                            QuickbeamError::Propagate { .. } => {
                                LoopState::Terminated(Termination::Propagated(error))
                            }
                            _ => {
                                self.shell.after_loop();
                                LoopState::AwaitingInput
                            }
                        }
                    }
                },
                LoopState::Terminated(Termination::Break) => {
                    trace!("loop ended by break");
                    return Ok(());
                }
                LoopState::Terminated(Termination::Propagated(error)) => {
                    trace!("loop ended by propagation");
                    return Err(error);
                }
            };
        }
    }

    /// Execute one fragment outside the interactive loop.
    ///
    /// The fragment is registered as indirect input and run under the
    /// same discipline the loop uses, against the same scope and the
    /// same receiver. No return value is written to the shell; the
    /// value comes back to the caller instead. A failure is reported
    /// through `write_exception` exactly once and then returned.
    ///
    /// Includes are not loaded and the loop hooks do not fire.
    pub fn execute(&mut self, code: &str) -> Result<Value> {
        self.shell.add_code(code, false);
        match execute_fragment(&mut self.shell, &mut self.engine, self.receiver.as_ref()) {
            Ok(value) => Ok(value),
            Err(error) => {
                self.shell.write_exception(&error);
                Err(error)
            }
        }
    }
}
