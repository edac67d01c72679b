//! Recursive-descent parsing of a token stream against a [`Registry`].
//!
//! Grammar:
//!
//! ```text
//! cli        ::= { argument | option } [ command ]
//! command    ::= identifier { argument | option }
//! argument   ::= identifier value
//! option     ::= identifier value
//! identifier ::= token matched against the current scope
//! value      ::= any single token
//! ```
//!
//! The cursor only moves forward. Each token is classified against the
//! current scope in a fixed order: argument, option, then (top level
//! only) subcommand. Once a subcommand is entered, only its own names are
//! reachable until the end of input.

use tracing::debug;

use crate::error::{GrammarError, Result};
use crate::registry::{RegisteredArgument, RegisteredOption, RegisteredSubcommand, Registry};
use crate::types::{ParseResult, ParsedArgument, ParsedCommand, ParsedOption};

/// The set of names reachable at the current cursor position.
#[derive(Debug, Clone, Copy)]
enum Scope<'r> {
    TopLevel(&'r Registry),
    Subcommand(&'r RegisteredSubcommand),
}

/// What a token introduces.
#[derive(Debug, Clone, Copy)]
enum Production<'r> {
    Argument(&'r RegisteredArgument),
    Option(&'r RegisteredOption),
    Command(&'r RegisteredSubcommand),
}

impl<'r> Scope<'r> {
    fn classify(self, token: &str) -> Option<Production<'r>> {
        match self {
            Scope::TopLevel(registry) => {
                let scope = registry.scope();
                scope
                    .argument(token)
                    .map(Production::Argument)
                    .or_else(|| scope.option(token).map(Production::Option))
                    .or_else(|| registry.subcommand(token).map(Production::Command))
            }
            Scope::Subcommand(command) => {
                let scope = command.scope();
                scope
                    .argument(token)
                    .map(Production::Argument)
                    .or_else(|| scope.option(token).map(Production::Option))
            }
        }
    }
}

/// Cursor state for one parse pass.
///
/// Borrows the tokens and the registry for the duration of
/// [`parse`](ParseContext::parse) and hands back an owned [`ParseResult`].
///
/// # Examples
///
/// ```
/// use cli_grammar_core::*;
///
/// let mut registry = Registry::default();
/// registry.register_argument("file", "input file").unwrap();
///
/// let result = ParseContext::new(&["file", "x.txt"], &registry).parse().unwrap();
/// assert_eq!(result.arguments[0].value, "x.txt");
///
/// let err = ParseContext::new(&["file"], &registry).parse().unwrap_err();
/// assert_eq!(err, GrammarError::MissingValue("file".into()));
/// ```
pub struct ParseContext<'a, S> {
    tokens: &'a [S],
    cursor: usize,
    registry: &'a Registry,
}

impl<'a, S: AsRef<str>> ParseContext<'a, S> {
    pub fn new(tokens: &'a [S], registry: &'a Registry) -> Self {
        Self {
            tokens,
            cursor: 0,
            registry,
        }
    }

    /// Consumes every token, succeeding only when the end of input is reached.
    ///
    /// # Errors
    ///
    /// [`GrammarError::UnexpectedToken`] for a token the current scope does
    /// not know, [`GrammarError::MissingValue`] for an identifier with no
    /// value after it.
    pub fn parse(mut self) -> Result<ParseResult> {
        let scope = Scope::TopLevel(self.registry);
        let mut result = ParseResult::default();

        while let Some(token) = self.peek() {
            match scope.classify(token) {
                Some(Production::Argument(arg)) => {
                    result.arguments.push(self.parse_argument(arg)?);
                }
                Some(Production::Option(opt)) => {
                    result.options.push(self.parse_option(opt)?);
                }
                Some(Production::Command(cmd)) => {
                    result.command = Some(self.parse_command(cmd)?);
                }
                None => return Err(unexpected(token)),
            }
        }

        debug!(
            arguments = result.arguments.len(),
            options = result.options.len(),
            command = ?result.command.as_ref().map(|c| c.name.as_str()),
            "Parsed tokens"
        );
        Ok(result)
    }

    fn parse_argument(&mut self, arg: &RegisteredArgument) -> Result<ParsedArgument> {
        let name = self.parse_identifier();
        let value = self.parse_value(&name)?;
        debug!(argument = arg.name(), value = %value, "Matched argument");
        Ok(ParsedArgument { name, value })
    }

    fn parse_option(&mut self, opt: &RegisteredOption) -> Result<ParsedOption> {
        let name = self.parse_identifier();
        let value = self.parse_value(&name)?;
        debug!(option = %name, value = %value, "Matched option");
        Ok(ParsedOption {
            name,
            value,
            short_name: opt.short_name().map(String::from),
            long_name: opt.long_name().map(String::from),
        })
    }

    fn parse_command(&mut self, cmd: &'a RegisteredSubcommand) -> Result<ParsedCommand> {
        let scope = Scope::Subcommand(cmd);
        let mut command = ParsedCommand::new(self.parse_identifier());
        debug!(subcommand = %command.name, "Entered subcommand");

        while let Some(token) = self.peek() {
            match scope.classify(token) {
                Some(Production::Argument(arg)) => {
                    command.arguments.push(self.parse_argument(arg)?);
                }
                Some(Production::Option(opt)) => {
                    command.options.push(self.parse_option(opt)?);
                }
                Some(Production::Command(_)) | None => return Err(unexpected(token)),
            }
        }

        Ok(command)
    }

    /// Takes the current token; only called right after it was classified.
    fn parse_identifier(&mut self) -> String {
        let token = self.tokens[self.cursor].as_ref().to_string();
        self.cursor += 1;
        token
    }

    fn parse_value(&mut self, identifier: &str) -> Result<String> {
        let Some(token) = self.tokens.get(self.cursor) else {
            debug!(identifier, "Identifier has no value");
            return Err(GrammarError::MissingValue(identifier.to_string()));
        };
        self.cursor += 1;
        Ok(token.as_ref().to_string())
    }

    fn peek(&self) -> Option<&'a str> {
        let tokens: &'a [S] = self.tokens;
        tokens.get(self.cursor).map(|t| t.as_ref())
    }
}

fn unexpected(token: &str) -> GrammarError {
    debug!(token, "Unexpected token");
    GrammarError::UnexpectedToken(token.to_string())
}
