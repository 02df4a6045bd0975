//! Console rendering of session results

pub mod console;
pub mod formatter;
