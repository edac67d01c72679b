//! Parse result types.
//!
//! A [`ParseResult`] is built token by token during a single parse pass and
//! never changes afterwards. Every value is copied out of the input as an
//! owned string, so a result holds no borrow of the registry or the tokens.
//! All types serialize with [`serde`] so tools can dump a parse as JSON.

use serde::{Deserialize, Serialize};

use crate::error::{GrammarError, Result};

/// A positional argument matched during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedArgument {
    /// The argument name token.
    pub name: String,
    /// The token immediately following the name.
    pub value: String,
}

/// An option matched during parsing.
///
/// `name` is the alias that actually appeared on the command line. Both
/// declared aliases are carried along so the option can be looked up by
/// either of them.
///
/// # Examples
///
/// ```
/// use cli_grammar_core::ParsedOption;
///
/// let opt = ParsedOption {
///     name: "-o".into(),
///     value: "5".into(),
///     short_name: Some("-o".into()),
///     long_name: Some("--opt".into()),
/// };
/// assert!(opt.matches("-o"));
/// assert!(opt.matches("--opt"));
/// assert!(!opt.matches("-x"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOption {
    /// The option key exactly as supplied.
    pub name: String,
    /// The token immediately following the option key.
    pub value: String,
    /// Declared short alias (e.g. `-o`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Declared long alias (e.g. `--opt`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
}

impl ParsedOption {
    /// Checks whether `name` is one of this option's aliases.
    pub fn matches(&self, name: &str) -> bool {
        self.name == name
            || self.short_name.as_deref() == Some(name)
            || self.long_name.as_deref() == Some(name)
    }
}

/// A subcommand and the arguments and options given after it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    /// Subcommand name.
    pub name: String,
    /// Arguments in encounter order.
    pub arguments: Vec<ParsedArgument>,
    /// Options in encounter order.
    pub options: Vec<ParsedOption>,
}

impl ParsedCommand {
    /// Creates an empty parsed command.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Looks up an argument or option of this subcommand by name or alias.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::UnknownArgument`] if nothing by that name was
    /// parsed.
    pub fn get(&self, name: &str) -> Result<&str> {
        lookup(&self.arguments, &self.options, name)
    }
}

/// Everything produced by one successful parse.
///
/// # Examples
///
/// ```
/// use cli_grammar_core::{ParseResult, ParsedArgument};
///
/// let mut result = ParseResult::default();
/// result.arguments.push(ParsedArgument { name: "file".into(), value: "x.txt".into() });
///
/// assert_eq!(result.get("file").unwrap(), "x.txt");
/// assert!(result.get("other").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Top-level arguments in encounter order.
    pub arguments: Vec<ParsedArgument>,
    /// Top-level options in encounter order.
    pub options: Vec<ParsedOption>,
    /// The subcommand, if one was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<ParsedCommand>,
}

impl ParseResult {
    /// Looks up a top-level argument or option by name or alias.
    ///
    /// Arguments are searched before options. When an identifier occurred
    /// more than once, the last occurrence wins.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::UnknownArgument`] if nothing by that name was
    /// parsed.
    pub fn get(&self, name: &str) -> Result<&str> {
        lookup(&self.arguments, &self.options, name)
    }

    /// Returns `true` if nothing at all was parsed.
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty() && self.options.is_empty() && self.command.is_none()
    }
}

fn lookup<'a>(
    arguments: &'a [ParsedArgument],
    options: &'a [ParsedOption],
    name: &str,
) -> Result<&'a str> {
    if let Some(arg) = arguments.iter().rev().find(|a| a.name == name) {
        return Ok(&arg.value);
    }
    options
        .iter()
        .rev()
        .find(|o| o.matches(name))
        .map(|o| o.value.as_str())
        .ok_or_else(|| GrammarError::UnknownArgument(name.to_string()))
}
