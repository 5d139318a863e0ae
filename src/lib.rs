//! Interpreter for Bare Bones, a language of six statements over
//! non-negative integer variables.
//!
//! Source is parsed by [`language::parse`] into a statement tree whose
//! variable references are already resolved through a
//! [`runtime::VariableStore`]. [`optimizer::optimize`] may rewrite simple
//! transfer loops, and [`runtime::Interpreter`] walks the tree.

pub mod config;
pub mod diagnostics;
pub mod language;
pub mod logging;
pub mod optimizer;
pub mod report;
pub mod runtime;
