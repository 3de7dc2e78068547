//! The failure taxonomy and the normalizer that produces it
//!
//! Everything that can go wrong while the loop runs reaches the host as
//! exactly one of the five [`QuickbeamError`] kinds. Engines do not build
//! those directly while evaluating; they fail with the raw [`EvalFault`],
//! and the one `From<EvalFault>` impl below is the only place raw faults
//! become taxonomy members. Two of the kinds are loop-terminating
//! signals; the other three are reported and recovered.

use thiserror::Error;

use crate::handler::Diagnostic;

/// The closed set of failures the loop can report.
#[derive(Error, Debug, Clone)]
pub enum QuickbeamError {
    /// Ends the loop silently; `run` returns `Ok` after reporting it.
    #[error("{}", .message.as_deref().unwrap_or("exiting"))]
    Break {
        /// Optional farewell shown by the host
        message: Option<String>,
    },

    /// Ends the loop and is re-raised to the loop's caller.
    #[error("throwing {source}")]
    Propagate {
        /// The failure being carried out of the loop
        source: Box<QuickbeamError>,
    },

    /// The fragment broke a typing rule.
    #[error("type mismatch: {message}")]
    TypeMismatch {
        /// What the rule was
        message: String,
    },

    /// Any other unrecoverable evaluation failure.
    #[error("runtime error: {message}")]
    Runtime {
        /// What went wrong
        message: String,
    },

    /// An already-well-formed failure raised by the evaluated program
    /// itself, passed through unmodified.
    #[error("{name}: {message}")]
    Domain {
        /// The failure's kind as the program named it
        name: String,
        /// What the program said
        message: String,
    },
}

impl QuickbeamError {
    /// A break signal with no message.
    pub fn break_loop() -> Self {
        QuickbeamError::Break { message: None }
    }

    /// A break signal carrying a farewell message.
    pub fn break_with(message: impl Into<String>) -> Self {
        QuickbeamError::Break {
            message: Some(message.into()),
        }
    }

    /// Wrap a failure so it terminates the loop and re-raises.
    pub fn propagate(inner: QuickbeamError) -> Self {
        QuickbeamError::Propagate {
            source: Box::new(inner),
        }
    }

    /// A typing-rule failure.
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        QuickbeamError::TypeMismatch {
            message: message.into(),
        }
    }

    /// A plain runtime failure.
    pub fn runtime(message: impl Into<String>) -> Self {
        QuickbeamError::Runtime {
            message: message.into(),
        }
    }

    /// A named failure thrown by the evaluated program.
    pub fn domain(name: impl Into<String>, message: impl Into<String>) -> Self {
        QuickbeamError::Domain {
            name: name.into(),
            message: message.into(),
        }
    }

    /// True for the two loop-terminating kinds.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            QuickbeamError::Break { .. } | QuickbeamError::Propagate { .. }
        )
    }
}

/// A raw failure produced inside one evaluation window, before
/// normalization.
#[derive(Error, Debug)]
pub enum EvalFault {
    /// The fragment broke a typing rule.
    #[error("{message}")]
    TypeViolation {
        /// What the rule was
        message: String,
    },

    /// Any other unrecoverable engine failure.
    #[error("{message}")]
    Fatal {
        /// What went wrong
        message: String,
    },

    /// An already-formed loop error thrown from inside the window.
    #[error(transparent)]
    Exception(QuickbeamError),
}

impl EvalFault {
    /// A typing-rule fault.
    pub fn type_violation(message: impl Into<String>) -> Self {
        EvalFault::TypeViolation {
            message: message.into(),
        }
    }

    /// A fatal engine fault.
    pub fn fatal(message: impl Into<String>) -> Self {
        EvalFault::Fatal {
            message: message.into(),
        }
    }
}

impl From<QuickbeamError> for EvalFault {
    fn from(error: QuickbeamError) -> Self {
        EvalFault::Exception(error)
    }
}

impl From<std::io::Error> for EvalFault {
    fn from(error: std::io::Error) -> Self {
        EvalFault::Fatal {
            message: format!("output write failed: {}", error),
        }
    }
}

impl From<Diagnostic> for EvalFault {
    /// An escalated diagnostic enters the taxonomy as a `Domain` failure
    /// named after its severity, so it passes through normalization the
    /// same way any program-thrown exception does.
    fn from(diagnostic: Diagnostic) -> Self {
        EvalFault::Exception(QuickbeamError::domain(
            diagnostic.severity.label(),
            diagnostic.message,
        ))
    }
}

impl From<EvalFault> for QuickbeamError {
    /// The single normalization point: typing faults narrow to
    /// `TypeMismatch`, engine fatals widen to `Runtime`, and exceptions
    /// pass through untouched.
    fn from(fault: EvalFault) -> Self {
        match fault {
            EvalFault::TypeViolation { message } => QuickbeamError::TypeMismatch { message },
            EvalFault::Fatal { message } => QuickbeamError::Runtime { message },
            EvalFault::Exception(error) => error,
        }
    }
}

/// Result type alias for loop operations
pub type Result<T> = std::result::Result<T, QuickbeamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        assert_eq!(QuickbeamError::break_loop().to_string(), "exiting");
        assert_eq!(QuickbeamError::break_with("bye").to_string(), "bye");
        assert_eq!(
            QuickbeamError::type_mismatch("no").to_string(),
            "type mismatch: no"
        );
        assert_eq!(
            QuickbeamError::runtime("bad").to_string(),
            "runtime error: bad"
        );
        assert_eq!(
            QuickbeamError::domain("oops", "details").to_string(),
            "oops: details"
        );
        assert_eq!(
            QuickbeamError::propagate(QuickbeamError::domain("oops", "details")).to_string(),
            "throwing oops: details"
        );
    }

    #[test]
    fn test_normalizer_narrows_type_violations() {
        let error = QuickbeamError::from(EvalFault::type_violation("bad operand"));
        assert!(matches!(error, QuickbeamError::TypeMismatch { .. }));
    }

    #[test]
    fn test_normalizer_widens_fatals() {
        let error = QuickbeamError::from(EvalFault::fatal("no such thing"));
        assert!(matches!(error, QuickbeamError::Runtime { .. }));
    }

    #[test]
    fn test_normalizer_passes_exceptions_through() {
        let error = QuickbeamError::from(EvalFault::from(QuickbeamError::break_loop()));
        assert!(matches!(error, QuickbeamError::Break { .. }));

        let inner = QuickbeamError::domain("err", "x");
        let error = QuickbeamError::from(EvalFault::from(QuickbeamError::propagate(inner)));
        assert!(matches!(error, QuickbeamError::Propagate { .. }));
    }

    #[test]
    fn test_terminal_kinds() {
        assert!(QuickbeamError::break_loop().is_terminal());
        assert!(QuickbeamError::propagate(QuickbeamError::runtime("x")).is_terminal());
        assert!(!QuickbeamError::runtime("x").is_terminal());
        assert!(!QuickbeamError::type_mismatch("x").is_terminal());
        assert!(!QuickbeamError::domain("a", "b").is_terminal());
    }
}
