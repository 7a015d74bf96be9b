//! Data structures describing the logical content of the report.
//!
//! The types in this module form a rendering-agnostic model: they carry
//! plain strings and intentionally avoid referencing `genpdf`, so record
//! data can be constructed, inspected and tested without touching the
//! rendering stack.

/// One lab exercise entry: a display title, the source listing and the
/// expected terminal transcript.
///
/// Records are immutable once constructed.  The `code` and `output`
/// strings are stored verbatim, including embedded newlines and any
/// escape sequences that are part of the listing itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabRecord {
    title: String,
    code: String,
    output: String,
}

impl LabRecord {
    /// Creates a new record from its three text attributes.
    pub fn new(
        title: impl Into<String>,
        code: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
            output: output.into(),
        }
    }

    /// Returns the display title of the exercise.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the source listing, verbatim.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the expected terminal transcript, verbatim.
    pub fn output(&self) -> &str {
        &self.output
    }
}
