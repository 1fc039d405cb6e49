//! Output formatting utilities for the afq CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by command:
//!
//! - [`clauses`] - Parsed clause output (parse command)
//! - [`compiled`] - Compiled fragment output (compile command)
//! - [`operators`] - Operator table output (operators command)

mod clauses;
mod compiled;
mod operators;

pub use clauses::{format_clauses_json, format_clauses_table};
pub use compiled::{format_compiled_json, format_compiled_text};
pub use operators::{format_operators_json, format_operators_table};

use aphfilter::{CompileMode, OperatorKind};

/// Lowercase name of a compile mode.
pub(crate) fn mode_name(mode: CompileMode) -> &'static str {
    match mode {
        CompileMode::Inline => "inline",
        CompileMode::Placeholder => "placeholder",
    }
}

/// Short label for an operator's kind.
pub(crate) fn kind_name(kind: OperatorKind) -> &'static str {
    match kind {
        OperatorKind::Comparison => "comparison",
        OperatorKind::StringComparison => "string",
        OperatorKind::Pattern => "pattern",
        OperatorKind::Date => "date",
    }
}
