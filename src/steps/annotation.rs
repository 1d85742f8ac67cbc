//! Buildbot log annotations
//!
//! The buildbot log viewer splits a run into steps on marker lines of the form
//! `@@@BUILD_STEP <name>@@@`.

use std::io::{self, Write};

/// Start a new named step in the CI log
pub fn print_named_step<W: Write>(out: &mut W, name: &str) -> io::Result<()> {
    writeln!(out, "@@@BUILD_STEP {}@@@", name)
}
