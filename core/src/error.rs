//! Error types for grammar declaration, parsing and grammar files.
//!
//! [`GrammarError`] covers everything the facade can reject: malformed
//! declarations, duplicate names and token streams that do not match the
//! declared grammar. [`ConfigError`] wraps it together with the I/O and
//! serialization failures of loading a grammar file.

use thiserror::Error;

/// Errors raised while declaring a grammar or parsing tokens against it.
///
/// Every variant is fatal to the call that produced it. A failed
/// registration leaves the registry untouched and a failed parse leaves no
/// result behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// A registration call was given a malformed name or empty description.
    #[error("invalid declaration: {0}")]
    InvalidDeclaration(String),

    /// A name is already taken in the scope it was registered into.
    #[error("duplicate name in scope: {0}")]
    DuplicateName(String),

    /// `parse` was invoked with no tokens beyond the program name.
    #[error("no arguments provided")]
    NoArguments,

    /// A token matched no argument, option or subcommand of the current scope.
    #[error("unexpected argument: {0}")]
    UnexpectedToken(String),

    /// An argument or option identifier was the last token.
    #[error("missing value for: {0}")]
    MissingValue(String),

    /// `get` was called with a name absent from the parse result.
    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    /// No subcommand with this name has been registered.
    #[error("unknown subcommand: {0}")]
    UnknownSubcommand(String),

    /// A registration call was made after the grammar was used for parsing.
    #[error("grammar is closed for registration after parsing")]
    RegistrationClosed,
}

/// Convenience alias for results with [`GrammarError`].
pub type Result<T> = std::result::Result<T, GrammarError>;

/// Errors that can occur while loading or saving a grammar file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension names no supported format.
    #[error("unsupported grammar file format: {0}")]
    UnsupportedFormat(String),

    /// A declaration in the file was rejected by the registry.
    #[error(transparent)]
    Grammar(#[from] GrammarError),
}
