//! Startup include loading
//!
//! Includes run once, before the first prompt, inside a single handler
//! window and a single shared scope. A file that fails is reported and
//! skipped; the files after it still run. Bindings left behind by the
//! includes are merged into the shell's scope with the shell's own
//! bindings winning any collision.

use std::io;

use tracing::trace;

use crate::capture::OutputFlags;
use crate::engine::{Engine, EvalWindow};
use crate::error::QuickbeamError;
use crate::handler::HandlerGuard;
use crate::scope::Scope;
use crate::shell::Shell;

/// Forwards include output straight to the shell, one whole chunk per
/// write. Includes run outside any capture buffer, so their output is
/// visible even when the include later fails.
struct Passthrough<'a, S: Shell + ?Sized> {
    shell: &'a mut S,
}

impl<S: Shell + ?Sized> io::Write for Passthrough<'_, S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !buf.is_empty() {
            self.shell.write_stdout(buf, OutputFlags::whole());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run every include the shell asks for.
///
/// All includes share one freshly created scope and one diagnostic
/// handler window. Each failure, of any kind, is reported through
/// [`Shell::write_exception`] and contained there; a failing include
/// never stops the ones after it and never unwinds into the caller.
/// Includes run with no receiver bound.
///
/// When the pass is over, the shared scope is merged into the shell's
/// scope. Names the shell already binds keep the shell's value.
pub fn load_includes<S, E>(shell: &mut S, engine: &mut E)
where
    S: Shell + ?Sized,
    E: Engine + ?Sized,
{
    let paths = shell.includes();
    trace!(count = paths.len(), "loading includes");

    let mut fresh = Scope::new();
    let mut guard = HandlerGuard::install(shell.error_threshold());

    for path in &paths {
        let result = {
            let mut output = Passthrough { shell: &mut *shell };
            let mut window = EvalWindow {
                scope: &mut fresh,
                receiver: None,
                output: &mut output,
            };
            engine.include(path, &mut window)
        };
        if let Err(fault) = result {
            let error = QuickbeamError::from(fault);
            shell.write_exception(&error);
        }
    }

    let deferred = guard.drain();
    drop(guard);
    for diagnostic in deferred {
        shell.handle_error(diagnostic);
    }

    let mut merged = fresh;
    merged.merge(shell.scope_variables(false));
    shell.set_scope_variables(merged);
}
