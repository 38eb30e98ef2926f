use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for def2fgd operations
#[derive(Error, Diagnostic, Debug)]
pub enum FgdError {
    #[error("IO error: {0}")]
    #[diagnostic(code(def2fgd::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(def2fgd::io))]
    Io { path: PathBuf, message: String },

    #[error("Parse error: {message}")]
    #[diagnostic(code(def2fgd::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(def2fgd::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Malformed header: {header}")]
    #[diagnostic(
        code(def2fgd::header),
        help("Expected `classname (r g b) [(min x y z) (max x y z)] FLAGS...`")
    )]
    MalformedHeader { header: String },

    #[error("No QUAKED blocks found in {}", path.display())]
    #[diagnostic(code(def2fgd::empty))]
    NoBlocksFound { path: PathBuf },

    #[error("No {pattern} files found under {}", root.display())]
    #[diagnostic(
        code(def2fgd::no_input),
        help("Pass a different root directory or use --pattern to match other file names")
    )]
    NoInputFiles { root: PathBuf, pattern: String },

    #[error("Output error: {message}")]
    #[diagnostic(code(def2fgd::output))]
    Output { message: String },
}

pub type Result<T> = std::result::Result<T, FgdError>;
