//! Scoped capture of engine diagnostics
//!
//! Engines report recoverable conditions (notices, warnings) without
//! carrying a reporting handle through every call site. A [`HandlerGuard`]
//! claims the diagnostic slot for the duration of one evaluation window;
//! [`raise`] consults it and either escalates the diagnostic into a
//! failure or defers it for delivery to the host after the window closes.
//! The slot is a thread-local stack, so nested windows restore their
//! predecessor exactly, and dropping a guard always releases its claim on
//! every exit path.

use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, trace, warn};

use crate::error::EvalFault;

/// How serious a diagnostic is, least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Severity {
    /// Informational; deferred under every default threshold.
    Notice,

    /// A deprecated construct was used.
    Deprecation,

    /// Something is probably wrong.
    #[default]
    Warning,

    /// Definitely wrong; escalates under every default threshold.
    Error,
}

impl Severity {
    /// Lowercase label used in rendered diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Notice => "notice",
            Severity::Deprecation => "deprecation",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One diagnostic raised by an engine during evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// How serious it is
    pub severity: Severity,

    /// What happened
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    /// A notice-severity diagnostic.
    pub fn notice(message: impl Into<String>) -> Self {
        Self::new(Severity::Notice, message)
    }

    /// A deprecation-severity diagnostic.
    pub fn deprecation(message: impl Into<String>) -> Self {
        Self::new(Severity::Deprecation, message)
    }

    /// A warning-severity diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// An error-severity diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

struct Slot {
    threshold: Severity,
    deferred: Vec<Diagnostic>,
}

thread_local! {
    static ACTIVE: RefCell<Vec<Slot>> = RefCell::new(Vec::new());
}

/// RAII claim on the diagnostic slot.
///
/// Created immediately before an evaluation window opens. While the
/// guard is alive, [`raise`] measures diagnostics against its threshold.
/// Dropping it releases the claim and restores whichever handler was
/// active before, on success and failure paths alike.
///
/// # Example
///
/// ```
/// use quickbeam::{Diagnostic, HandlerGuard, Severity};
///
/// let mut guard = HandlerGuard::install(Severity::Warning);
/// quickbeam::handler::raise(Diagnostic::notice("below threshold")).unwrap();
/// assert_eq!(guard.drain().len(), 1);
/// ```
#[derive(Debug)]
pub struct HandlerGuard {
    // The slot lives in thread-local storage; keep the guard on-thread.
    _not_send: PhantomData<*const ()>,
}

impl HandlerGuard {
    /// Claim the slot with the given escalation threshold.
    pub fn install(threshold: Severity) -> Self {
        ACTIVE.with(|stack| {
            stack.borrow_mut().push(Slot {
                threshold,
                deferred: Vec::new(),
            });
        });
        trace!(threshold = %threshold, "handler installed");
        Self {
            _not_send: PhantomData,
        }
    }

    /// Take the diagnostics deferred so far in this window.
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        ACTIVE.with(|stack| {
            stack
                .borrow_mut()
                .last_mut()
                .map(|slot| std::mem::take(&mut slot.deferred))
                .unwrap_or_default()
        })
    }
}

impl Drop for HandlerGuard {
    fn drop(&mut self) {
        let undelivered = ACTIVE.with(|stack| {
            stack
                .borrow_mut()
                .pop()
                .map(|slot| slot.deferred.len())
                .unwrap_or(0)
        });
        if undelivered > 0 {
            debug!(count = undelivered, "handler dropped undelivered diagnostics");
        }
        trace!("handler removed");
    }
}

/// Report a diagnostic to the active handler.
///
/// Returns `Err` when the severity meets the installed threshold; the
/// caller aborts the evaluation with the returned fault. Below the
/// threshold the diagnostic is deferred for delivery once the window
/// closes. With no window open the diagnostic is logged and dropped.
pub fn raise(diagnostic: Diagnostic) -> std::result::Result<(), EvalFault> {
    ACTIVE.with(|stack| {
        let mut stack = stack.borrow_mut();
        match stack.last_mut() {
            Some(slot) if diagnostic.severity >= slot.threshold => {
                trace!(diagnostic = %diagnostic, "diagnostic escalated");
                Err(EvalFault::from(diagnostic))
            }
            Some(slot) => {
                trace!(diagnostic = %diagnostic, "diagnostic deferred");
                slot.deferred.push(diagnostic);
                Ok(())
            }
            None => {
                warn!(diagnostic = %diagnostic, "diagnostic raised outside a window");
                Ok(())
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuickbeamError;

    #[test]
    fn test_raise_without_window_is_dropped() {
        assert!(raise(Diagnostic::warning("nobody listening")).is_ok());
    }

    #[test]
    fn test_below_threshold_defers() {
        let mut guard = HandlerGuard::install(Severity::Warning);

        raise(Diagnostic::notice("n")).unwrap();
        raise(Diagnostic::deprecation("d")).unwrap();

        let deferred = guard.drain();
        assert_eq!(deferred.len(), 2);
        assert_eq!(deferred[0], Diagnostic::notice("n"));
        assert_eq!(deferred[1], Diagnostic::deprecation("d"));

        // Draining empties the slot
        assert!(guard.drain().is_empty());
    }

    #[test]
    fn test_at_threshold_escalates() {
        let _guard = HandlerGuard::install(Severity::Warning);

        let fault = raise(Diagnostic::warning("w")).unwrap_err();
        let error = QuickbeamError::from(fault);
        assert_eq!(error.to_string(), "warning: w");
        assert!(matches!(error, QuickbeamError::Domain { .. }));
    }

    #[test]
    fn test_nested_windows_restore_outer() {
        let mut outer = HandlerGuard::install(Severity::Error);
        raise(Diagnostic::warning("outer")).unwrap();

        {
            let mut inner = HandlerGuard::install(Severity::Notice);
            assert!(raise(Diagnostic::notice("inner")).is_err());
            assert!(inner.drain().is_empty());
        }

        // Back to the outer window and its lenient threshold
        raise(Diagnostic::warning("outer again")).unwrap();
        assert_eq!(outer.drain().len(), 2);
    }

    #[test]
    fn test_drop_discards_undelivered() {
        {
            let _guard = HandlerGuard::install(Severity::Error);
            raise(Diagnostic::notice("lost")).unwrap();
        }
        // A fresh window sees none of the dropped window's diagnostics
        let mut guard = HandlerGuard::install(Severity::Error);
        assert!(guard.drain().is_empty());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Notice < Severity::Deprecation);
        assert!(Severity::Deprecation < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }
}
