//! Declare a command-line grammar, render its help and parse against it.
//!
//! A grammar is made of:
//!
//! - positional arguments, matched by their literal name token followed by a
//!   value token;
//! - options with a short (`-o`) and/or long (`--output`) key, each followed
//!   by a value token;
//! - subcommands, each owning its own arguments and options. Subcommands do
//!   not nest.
//!
//! [`Parser`] is the entry point. Names are checked by the [`validate`]
//! predicates when declared, kept in a [`Registry`], and token streams are
//! parsed by a [`ParseContext`] into an owned [`ParseResult`].
//!
//! Grammars can also be loaded from JSON or YAML with [`GrammarConfig`].
//!
//! # Example
//!
//! ```
//! use cli_grammar_core::*;
//!
//! let mut cli = Parser::new("app", "an example app");
//! cli.add_argument("file", "input file").unwrap();
//! cli.add_option(Some("-o"), Some("--opt"), "an option").unwrap();
//! cli.add_subcommand("cmd", "a subcommand").unwrap();
//!
//! assert!(cli.help_text().contains("usage: app <file> [options] [command]\n"));
//!
//! cli.parse(["app", "--opt", "5", "file", "x.txt"]).unwrap();
//! assert_eq!(cli.get("-o").unwrap(), "5");
//!
//! let err = cli.parse(["app", "nope"]).unwrap_err();
//! assert_eq!(err, GrammarError::UnexpectedToken("nope".into()));
//! ```

mod config;
mod context;
mod error;
mod help;
mod parser;
mod registry;
mod types;
pub mod validate;

pub use config::{ArgumentConfig, GrammarConfig, GrammarFormat, OptionConfig, SubcommandConfig};
pub use context::ParseContext;
pub use error::{ConfigError, GrammarError, Result};
pub use help::{DEFAULT_VERSION, Info};
pub use parser::Parser;
pub use registry::{
    OptionId, RegisteredArgument, RegisteredOption, RegisteredSubcommand, Registry, ScopeRegistry,
};
pub use types::{ParseResult, ParsedArgument, ParsedCommand, ParsedOption};
pub use validate::{
    valid_argument_name, valid_description, valid_long_option_name, valid_short_option_name,
};
