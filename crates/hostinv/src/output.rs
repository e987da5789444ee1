//! Output: inventory selections to stdout.
//!
//! Documents are single-line JSON and lists are sorted plain text, one
//! element per line (see `Selection::render`). Stdout carries nothing else;
//! diagnostics and logs go to stderr.

use std::io::{self, Write};

use hostinv_core::Selection;

use crate::error::CliError;

/// Render and print a selection.
pub fn print_selection(selection: &Selection) -> Result<(), CliError> {
    let rendered = selection.render()?;
    print_output(&rendered)?;
    Ok(())
}

/// Print rendered output followed by a newline; empty output prints nothing.
pub fn print_output(output: &str) -> io::Result<()> {
    if output.is_empty() {
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}")
}
