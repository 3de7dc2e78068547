//! Rust-flavored fragment engine
//!
//! Parses each fragment as a sequence of Rust statements using `syn`
//! and walks the resulting tree. The supported surface is deliberately
//! small: literals, variable bindings and lookups, the usual arithmetic
//! and comparison operators, array literals with indexing and field
//! access, the bound receiver as `self`, and a handful of built-in
//! functions. Everything else fails with a clear unsupported message
//! rather than a parse mystery.

mod array;
mod assign;
mod binary;
mod call;
mod field;
mod index;
mod literal;
mod path;
mod unary;

use crate::engine::{Engine, EvalWindow};
use crate::error::EvalFault;
use crate::value::Value;

/// A fragment engine for Rust-shaped input.
///
/// The value of a fragment is the value of its final statement; a
/// trailing semicolon suppresses it, the way a Rust block would.
///
/// # Example
///
/// ```
/// use quickbeam::engines::RustEngine;
/// use quickbeam::{Engine, EvalWindow, Scope, Value};
///
/// let mut scope = Scope::new();
/// let mut output = Vec::new();
/// let mut window = EvalWindow {
///     scope: &mut scope,
///     receiver: None,
///     output: &mut output,
/// };
///
/// let mut engine = RustEngine::new();
/// assert_eq!(engine.eval("1 + 2", &mut window).unwrap(), Value::Int(3));
/// ```
#[derive(Debug, Clone)]
pub struct RustEngine {
    bind_receiver: bool,
}

impl RustEngine {
    /// An engine with receiver binding enabled.
    pub fn new() -> Self {
        Self {
            bind_receiver: true,
        }
    }

    /// An engine for hosts that cannot supply a receiver.
    ///
    /// Evaluation never sees `self`, even when the shell offers a bound
    /// object.
    pub fn legacy() -> Self {
        Self {
            bind_receiver: false,
        }
    }
}

impl Default for RustEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RustEngine {
    fn eval(&mut self, source: &str, window: &mut EvalWindow<'_>) -> Result<Value, EvalFault> {
        let block = parse_fragment(source)?;
        eval_block(&block.stmts, window)
    }

    fn binds_receiver(&self) -> bool {
        self.bind_receiver
    }
}

/// Trait for evaluating parsed nodes to values.
///
/// Each supported `syn` expression type implements this trait; the
/// dispatcher below fans out to them.
pub trait Evaluate {
    /// Evaluate this node inside the given window.
    fn eval(&self, window: &mut EvalWindow<'_>) -> Result<Value, EvalFault>;
}

// ═══════════════════════════════════════════════════════════════════════
// Parsing and statement evaluation
// ═══════════════════════════════════════════════════════════════════════

fn parse_fragment(source: &str) -> Result<syn::Block, EvalFault> {
    syn::parse_str::<syn::Block>(&format!("{{\n{}\n}}", source))
        .map_err(|err| EvalFault::fatal(format!("syntax error: {}", err)))
}

/// Evaluate a statement list; the last unterminated expression wins.
pub(crate) fn eval_block(
    stmts: &[syn::Stmt],
    window: &mut EvalWindow<'_>,
) -> Result<Value, EvalFault> {
    let mut value = Value::Null;
    for stmt in stmts {
        value = match stmt {
            syn::Stmt::Local(local) => {
                eval_local(local, window)?;
                Value::Null
            }
            syn::Stmt::Expr(expr, semi) => {
                let result = expr.eval(window)?;
                if semi.is_some() {
                    Value::Null
                } else {
                    result
                }
            }
            syn::Stmt::Item(_) => {
                return Err(EvalFault::fatal(
                    "unsupported item declaration in fragment",
                ))
            }
            syn::Stmt::Macro(stmt) => {
                return Err(EvalFault::fatal(format!(
                    "unsupported macro invocation {}!",
                    macro_name(&stmt.mac)
                )))
            }
        };
    }
    Ok(value)
}

fn eval_local(local: &syn::Local, window: &mut EvalWindow<'_>) -> Result<(), EvalFault> {
    let name = match binding_name(&local.pat) {
        Some(name) => name,
        None => return Err(EvalFault::fatal("unsupported pattern in let binding")),
    };
    let value = match &local.init {
        Some(init) => {
            if init.diverge.is_some() {
                return Err(EvalFault::fatal("unsupported let-else binding"));
            }
            init.expr.eval(window)?
        }
        None => Value::Null,
    };
    window.scope.define(name, value);
    Ok(())
}

fn binding_name(pat: &syn::Pat) -> Option<String> {
    match pat {
        syn::Pat::Ident(pat) => Some(pat.ident.to_string()),
        // `let x: i64 = ...` wraps the ident in a type ascription
        syn::Pat::Type(pat) => binding_name(&pat.pat),
        _ => None,
    }
}

fn macro_name(mac: &syn::Macro) -> String {
    mac.path
        .segments
        .last()
        .map(|segment| segment.ident.to_string())
        .unwrap_or_default()
}

// ═══════════════════════════════════════════════════════════════════════
// Main Expression Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for syn::Expr {
    fn eval(&self, window: &mut EvalWindow<'_>) -> Result<Value, EvalFault> {
        match self {
            syn::Expr::Lit(expr) => expr.eval(window),
            syn::Expr::Path(expr) => expr.eval(window),
            syn::Expr::Unary(expr) => expr.eval(window),
            syn::Expr::Binary(expr) => expr.eval(window),
            syn::Expr::Assign(expr) => expr.eval(window),
            syn::Expr::Index(expr) => expr.eval(window),
            syn::Expr::Field(expr) => expr.eval(window),
            syn::Expr::Array(expr) => expr.eval(window),
            syn::Expr::Call(expr) => expr.eval(window),

            syn::Expr::Block(expr) => eval_block(&expr.block.stmts, window),

            // Grouping carries no meaning of its own
            syn::Expr::Paren(expr) => expr.expr.eval(window),
            syn::Expr::Group(expr) => expr.expr.eval(window),

            other => Err(EvalFault::fatal(format!(
                "unsupported {}",
                kind_name(other)
            ))),
        }
    }
}

/// A readable name for the expression kinds the dispatcher rejects.
fn kind_name(expr: &syn::Expr) -> &'static str {
    match expr {
        syn::Expr::Async(_) => "async block",
        syn::Expr::Await(_) => "await",
        syn::Expr::Break(_) => "break expression",
        syn::Expr::Cast(_) => "cast",
        syn::Expr::Closure(_) => "closure",
        syn::Expr::Continue(_) => "continue expression",
        syn::Expr::ForLoop(_) => "for loop",
        syn::Expr::If(_) => "if expression",
        syn::Expr::Let(_) => "let guard",
        syn::Expr::Loop(_) => "loop",
        syn::Expr::Macro(_) => "macro invocation",
        syn::Expr::Match(_) => "match expression",
        syn::Expr::MethodCall(_) => "method call",
        syn::Expr::Range(_) => "range",
        syn::Expr::Reference(_) => "reference",
        syn::Expr::Repeat(_) => "repeat literal",
        syn::Expr::Return(_) => "return expression",
        syn::Expr::Struct(_) => "struct literal",
        syn::Expr::Try(_) => "try operator",
        syn::Expr::Tuple(_) => "tuple",
        syn::Expr::While(_) => "while loop",
        _ => "expression",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::Scope;

    fn eval_str(source: &str) -> Result<Value, EvalFault> {
        let mut scope = Scope::new();
        let mut output = Vec::new();
        let mut window = EvalWindow {
            scope: &mut scope,
            receiver: None,
            output: &mut output,
        };
        RustEngine::new().eval(source, &mut window)
    }

    #[test]
    fn test_last_statement_value_wins() {
        let value = eval_str("let a = 2; let b = 3; a * b").unwrap();
        assert_eq!(value, Value::Int(6));
    }

    #[test]
    fn test_trailing_semicolon_suppresses_value() {
        assert_eq!(eval_str("1 + 1;").unwrap(), Value::Null);
    }

    #[test]
    fn test_empty_block_is_null() {
        assert_eq!(eval_str("").unwrap(), Value::Null);
    }

    #[test]
    fn test_syntax_error_is_reported_as_fault() {
        let fault = eval_str("let = ;").unwrap_err();
        assert!(fault.to_string().starts_with("syntax error"));
    }

    #[test]
    fn test_unsupported_expression_names_its_kind() {
        let fault = eval_str("if true { 1 }").unwrap_err();
        assert_eq!(fault.to_string(), "unsupported if expression");
    }

    #[test]
    fn test_legacy_engine_declines_receiver() {
        assert!(RustEngine::new().binds_receiver());
        assert!(!RustEngine::legacy().binds_receiver());
    }
}
