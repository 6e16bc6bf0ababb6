use miette::Diagnostic;
use thiserror::Error;

/// Main error type for shelf operations
#[derive(Error, Diagnostic, Debug)]
pub enum ShelfError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(shelf::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("parse error at {line}:{column}: {message}")]
    #[diagnostic(code(shelf::parse))]
    Parse {
        line: u32,
        column: u32,
        message: String,
    },

    #[error("Catalog error: {message}")]
    #[diagnostic(code(shelf::catalog))]
    Catalog {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Merge error: {message}")]
    #[diagnostic(code(shelf::merge))]
    Merge {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl ShelfError {
    /// Location-tagged lexical or syntactic error.
    pub fn parse(line: u32, column: u32, message: impl Into<String>) -> Self {
        ShelfError::Parse {
            line,
            column,
            message: message.into(),
        }
    }

    /// Structural-invariant violation in a catalog; these surface calling-code
    /// bugs and are never recovered from.
    pub fn catalog(message: impl Into<String>) -> Self {
        ShelfError::Catalog {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShelfError>;
