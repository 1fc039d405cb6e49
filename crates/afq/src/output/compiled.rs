//! Compiled fragment output formatting.

use aphfilter::{CompileMode, CompiledFilter, Dialect};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::mode_name;

/// JSON output structure for the compile command.
#[derive(Serialize)]
pub struct CompiledOutput<'a> {
    pub dialect: &'a str,
    pub mode: &'a str,
    pub fragment: &'a str,
    pub binds: &'a [String],
}

/// Formats a compiled filter as JSON.
pub fn format_compiled_json(
    compiled: &CompiledFilter,
    dialect: &Dialect,
    mode: CompileMode,
) -> Result<String, serde_json::Error> {
    let output = CompiledOutput {
        dialect: dialect.name(),
        mode: mode_name(mode),
        fragment: &compiled.fragment,
        binds: &compiled.binds,
    };
    serde_json::to_string_pretty(&output)
}

/// Formats a compiled filter as text: the fragment, then one line per bind
/// labelled with its placeholder.
pub fn format_compiled_text(compiled: &CompiledFilter, dialect: &Dialect, use_colors: bool) -> String {
    if compiled.is_empty() {
        return "(empty filter)\n".to_string();
    }

    let mut output = String::new();
    if use_colors {
        output.push_str(&format!("{}\n", compiled.fragment.bold()));
    } else {
        output.push_str(&compiled.fragment);
        output.push('\n');
    }

    let style = dialect.placeholder_style();
    for (i, value) in compiled.binds.iter().enumerate() {
        let label = format!("{:<5}", style.placeholder(i + 1));
        if use_colors {
            output.push_str(&format!("  {} {}\n", label.dimmed(), value));
        } else {
            output.push_str(&format!("  {} {}\n", label, value));
        }
    }

    output
}
