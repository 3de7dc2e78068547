//! # Quickbeam
//!
//! An embeddable read-eval-print execution loop.
//!
//! Quickbeam runs an interactive session as a strict discipline around
//! a host you provide. Variables persist between fragments and survive
//! failures untouched, and output from a failing fragment never reaches
//! the host. Every failure is funneled into one small closed taxonomy
//! before anyone sees it. The host stays in charge of input and
//! presentation through the [`Shell`] trait; the language being
//! evaluated stays behind the [`Engine`] trait.
//!
//! ## Architecture
//!
//! - **Loop Driver**: the outer iteration over input, execution, and
//!   reporting
//! - **Execution Core**: one fragment under scope, capture, and handler
//!   discipline
//! - **Exception Taxonomy**: five failure kinds, two of them terminal
//! - **Bundled Engine**: a small Rust-flavored evaluator, behind the
//!   `rust` feature
//!
//! A scripted shell for canned sessions ships in [`shells`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod capture;
pub mod driver;
pub mod engine;
#[cfg(feature = "rust")]
pub mod engines;
pub mod error;
pub mod executor;
pub mod handler;
pub mod includes;
pub mod scope;
pub mod shell;
pub mod shells;
pub mod value;

// Re-export main types
pub use capture::{OutputCapture, OutputFlags};
pub use driver::Repl;
pub use engine::{Engine, EvalWindow};
#[cfg(feature = "rust")]
pub use engines::RustEngine;
pub use error::{EvalFault, QuickbeamError, Result};
pub use executor::{execute_fragment, execute_once};
pub use handler::{Diagnostic, HandlerGuard, Severity};
pub use includes::load_includes;
pub use scope::{Scope, RECEIVER_NAME};
pub use shell::Shell;
pub use shells::{ScriptEvent, ScriptedShell};
pub use value::Value;

/// Quickbeam version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
