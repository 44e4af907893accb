//! The three error kinds from spec §7, hand-rolled in the style of the
//! teacher crate (no `thiserror` anywhere in its dependency stack): a plain
//! enum with manual `Display`/`Error` impls, carrying a `Vec` of prior
//! errors so a completion callback can hand back "most recent error, with
//! prior errors attached as a sibling list".

use std::fmt;

/// What went wrong, and at what severity (spec §7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Non-fatal XML quibble from the tokenizer. Parsing resumes.
    TokenizerWarning,
    /// Recoverable parse error. Tokenizer state is cleared, parsing resumes.
    TokenizerError,
    /// Upstream stream failure. Fatal.
    IoError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::TokenizerWarning => "tokenizer warning",
            ErrorKind::TokenizerError => "tokenizer error",
            ErrorKind::IoError => "io error",
        };
        write!(f, "{}", s)
    }
}

/// A single accumulated error or warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    /// Errors that were accumulated before this one, oldest first, attached
    /// as a sibling list for the completion-callback shim (spec §7).
    pub others: Vec<Error>,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Error { kind, message: message.into(), others: Vec::new() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenizerWarning, message)
    }

    pub fn tokenizer(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenizerError, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IoError, message)
    }

    /// Attaches `prior` as the sibling list of this error, oldest first.
    pub fn with_others(mut self, prior: Vec<Error>) -> Self {
        self.others = prior;
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Error::tokenizer(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
