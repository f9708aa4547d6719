use thiserror::Error;

/// Process-terminal failures.
///
/// Per-line findings are never errors at this level: they travel as
/// [`crate::Issue`] values inside a [`crate::ValidationResult`]. Everything
/// here aborts the run and maps to exit code 1 in the binary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read input: {0}")]
    Input(std::io::Error),

    #[error("failed to write output: {0}")]
    Output(std::io::Error),

    /// The scanner buffer is bounded; an overlong line is a fatal input error
    /// rather than a finding because nothing downstream could represent it.
    #[error("line {line_no} exceeds the {limit}-byte line buffer")]
    LineTooLong { line_no: usize, limit: usize },

    #[error("line {line_no} is not valid UTF-8")]
    InvalidUtf8 { line_no: usize },
}
