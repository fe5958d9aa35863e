//! Error adapter for converting SankeyError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::{fmt, io};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use sankey::SankeyError;

/// Returns true when an I/O error carries a JSON syntax or data error.
fn is_malformed_input(err: &io::Error) -> bool {
    err.get_ref()
        .is_some_and(|inner| inner.is::<serde_json::Error>())
}

/// Adapter giving a [`SankeyError`] a stable diagnostic code and, where one
/// applies, a hint.
pub struct ErrorAdapter<'a>(pub &'a SankeyError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            SankeyError::Io(err) if is_malformed_input(err) => "sankey::input",
            SankeyError::Io(_) => "sankey::io",
            SankeyError::Construction { .. } | SankeyError::UnknownNodeName { .. } => {
                "sankey::construction"
            }
            SankeyError::UnknownNode(_) => "sankey::node",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            SankeyError::Io(err) if is_malformed_input(err) => {
                "the input must be a JSON object with `nodes` and `links` arrays"
            }
            SankeyError::Construction { .. } => {
                "link endpoints are zero-based positions in the `nodes` array"
            }
            SankeyError::UnknownNodeName { .. } => {
                "link endpoints given as strings must match a node's `name`"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`SankeyError`] into a reportable diagnostic.
pub fn to_reportable(err: &SankeyError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
