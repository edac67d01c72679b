//! The public entry point: declare, parse, query, render.
//!
//! # Examples
//!
//! ```
//! use cli_grammar_core::*;
//!
//! let mut cli = Parser::new("app", "an example app").with_version("1.0.0");
//! cli.add_argument("file", "input file").unwrap();
//! cli.add_option(Some("-o"), Some("--opt"), "an option").unwrap();
//! cli.add_subcommand("build", "build things")
//!     .unwrap()
//!     .add_argument("target", "build target")
//!     .unwrap();
//!
//! cli.parse(["app", "file", "x.txt", "-o", "5", "build", "target", "release"])
//!     .unwrap();
//!
//! assert_eq!(cli.get("file").unwrap(), "x.txt");
//! assert_eq!(cli.get("--opt").unwrap(), "5");
//! assert_eq!(cli.command().unwrap().get("target").unwrap(), "release");
//! assert_eq!(cli.version_text(), "1.0.0\n");
//! ```

use std::ffi::OsString;

use tracing::debug;

use crate::context::ParseContext;
use crate::error::{GrammarError, Result};
use crate::help::Info;
use crate::registry::{OptionId, RegisteredSubcommand, Registry};
use crate::types::{ParseResult, ParsedCommand};

/// A command-line interface: its declared grammar and its last parse.
///
/// Registration happens first; the first call to any `parse*` method closes
/// the grammar, and later `add_*` calls fail with
/// [`GrammarError::RegistrationClosed`]. A `Parser` is meant to be used from
/// one thread; wrap it in a lock to share it.
#[derive(Debug, Clone)]
pub struct Parser {
    info: Info,
    registry: Registry,
    result: Option<ParseResult>,
    closed: bool,
}

impl Parser {
    /// Creates a parser with version `0.0.0`.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            info: Info::new(name, description),
            registry: Registry::default(),
            result: None,
            closed: false,
        }
    }

    /// Sets the version string printed by [`version`](Parser::version).
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.info.version = version.into();
        self
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    /// The declared grammar.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Declares a top-level positional argument.
    ///
    /// # Errors
    ///
    /// See [`Registry::register_argument`]; additionally
    /// [`GrammarError::RegistrationClosed`] after parsing.
    pub fn add_argument(&mut self, name: &str, description: &str) -> Result<()> {
        self.ensure_open()?;
        self.registry.register_argument(name, description)
    }

    /// Declares a top-level option with a short name, a long name or both.
    ///
    /// # Errors
    ///
    /// See [`Registry::register_option`]; additionally
    /// [`GrammarError::RegistrationClosed`] after parsing.
    pub fn add_option(
        &mut self,
        short_name: Option<&str>,
        long_name: Option<&str>,
        description: &str,
    ) -> Result<OptionId> {
        self.ensure_open()?;
        self.registry
            .register_option(short_name, long_name, description)
    }

    /// Declares a subcommand and returns it for registering its own
    /// arguments and options.
    ///
    /// # Errors
    ///
    /// See [`Registry::register_subcommand`]; additionally
    /// [`GrammarError::RegistrationClosed`] after parsing.
    pub fn add_subcommand(
        &mut self,
        name: &str,
        description: &str,
    ) -> Result<&mut RegisteredSubcommand> {
        self.ensure_open()?;
        self.registry.register_subcommand(name, description)
    }

    /// Re-opens a declared subcommand for further registration.
    ///
    /// # Errors
    ///
    /// [`GrammarError::UnknownSubcommand`] if `name` was never declared,
    /// [`GrammarError::RegistrationClosed`] after parsing.
    pub fn subcommand_mut(&mut self, name: &str) -> Result<&mut RegisteredSubcommand> {
        self.ensure_open()?;
        self.registry
            .subcommand_mut(name)
            .ok_or_else(|| GrammarError::UnknownSubcommand(name.to_string()))
    }

    /// Parses a full argument vector, skipping the program name.
    ///
    /// # Errors
    ///
    /// [`GrammarError::NoArguments`] if nothing follows the program name,
    /// otherwise any error of [`ParseContext::parse`].
    pub fn parse<I, S>(&mut self, argv: I) -> Result<&ParseResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = argv.into_iter().skip(1).map(Into::into).collect();
        self.parse_tokens(&tokens)
    }

    /// Parses the arguments of the running process.
    ///
    /// Arguments that are not valid UTF-8 are converted lossily, with
    /// invalid sequences replaced by `U+FFFD`.
    ///
    /// # Errors
    ///
    /// Same as [`parse`](Parser::parse).
    pub fn parse_env(&mut self) -> Result<&ParseResult> {
        self.parse(std::env::args_os().map(lossy_arg))
    }

    /// Parses tokens that no longer include the program name.
    ///
    /// The previous result is discarded first, so a failed parse leaves
    /// nothing to query.
    ///
    /// # Errors
    ///
    /// [`GrammarError::NoArguments`] for an empty slice, otherwise any error
    /// of [`ParseContext::parse`].
    pub fn parse_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<&ParseResult> {
        self.closed = true;
        self.result = None;

        if tokens.is_empty() {
            debug!(program = %self.info.name, "No arguments provided");
            return Err(GrammarError::NoArguments);
        }

        let result = ParseContext::new(tokens, &self.registry).parse()?;
        Ok(&*self.result.insert(result))
    }

    /// Looks up a parsed top-level argument or option by name or alias.
    ///
    /// # Errors
    ///
    /// [`GrammarError::UnknownArgument`] if the name was not parsed, or if no
    /// parse has succeeded.
    pub fn get(&self, name: &str) -> Result<&str> {
        match &self.result {
            Some(result) => result.get(name),
            None => Err(GrammarError::UnknownArgument(name.to_string())),
        }
    }

    /// The subcommand given in the last successful parse.
    pub fn command(&self) -> Option<&ParsedCommand> {
        self.result.as_ref().and_then(|r| r.command.as_ref())
    }

    /// The last successful parse.
    pub fn result(&self) -> Option<&ParseResult> {
        self.result.as_ref()
    }

    pub fn help_text(&self) -> String {
        self.info.render_help(&self.registry)
    }

    /// Help text for one subcommand.
    ///
    /// # Errors
    ///
    /// [`GrammarError::UnknownSubcommand`] if `name` was never declared.
    pub fn subcommand_help_text(&self, name: &str) -> Result<String> {
        self.registry
            .subcommand(name)
            .map(|cmd| self.info.render_subcommand_help(cmd))
            .ok_or_else(|| GrammarError::UnknownSubcommand(name.to_string()))
    }

    pub fn version_text(&self) -> String {
        self.info.render_version()
    }

    /// Prints the help text to stdout.
    pub fn help(&self) {
        print!("{}", self.help_text());
    }

    /// Prints the version line to stdout.
    pub fn version(&self) {
        print!("{}", self.version_text());
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(GrammarError::RegistrationClosed);
        }
        Ok(())
    }
}

fn lossy_arg(arg: OsString) -> String {
    arg.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli() -> Parser {
        let mut cli = Parser::new("app", "an example app");
        cli.add_argument("file", "input file").unwrap();
        cli.add_option(Some("-o"), Some("--opt"), "an option")
            .unwrap();
        let build = cli.add_subcommand("build", "build things").unwrap();
        build.add_argument("target", "build target").unwrap();
        cli
    }

    #[test]
    fn test_program_name_only() {
        let mut cli = cli();
        assert_eq!(cli.parse(["app"]).unwrap_err(), GrammarError::NoArguments);
        assert_eq!(
            cli.parse(Vec::<String>::new()).unwrap_err(),
            GrammarError::NoArguments
        );
    }

    #[test]
    fn test_get_argument_and_option() {
        let mut cli = cli();
        cli.parse(["app", "file", "x.txt", "--opt", "5"]).unwrap();

        assert_eq!(cli.get("file").unwrap(), "x.txt");
        assert_eq!(cli.get("--opt").unwrap(), "5");
        assert_eq!(cli.get("-o").unwrap(), "5");
        assert_eq!(
            cli.get("missing"),
            Err(GrammarError::UnknownArgument("missing".into()))
        );
        assert!(cli.command().is_none());
    }

    #[test]
    fn test_get_before_parse() {
        let cli = cli();
        assert!(matches!(
            cli.get("file"),
            Err(GrammarError::UnknownArgument(_))
        ));
        assert!(cli.result().is_none());
    }

    #[test]
    fn test_failed_parse_clears_previous_result() {
        let mut cli = cli();
        cli.parse(["app", "file", "x.txt"]).unwrap();
        assert!(cli.result().is_some());

        assert_eq!(
            cli.parse(["app", "file"]).unwrap_err(),
            GrammarError::MissingValue("file".into())
        );
        assert!(cli.result().is_none());
        assert!(cli.get("file").is_err());
    }

    #[test]
    fn test_registration_closed_after_parse() {
        let mut cli = cli();
        let _ = cli.parse(["app"]);

        assert_eq!(
            cli.add_argument("late", "too late"),
            Err(GrammarError::RegistrationClosed)
        );
        assert!(matches!(
            cli.add_subcommand("late", "too late"),
            Err(GrammarError::RegistrationClosed)
        ));
        assert!(matches!(
            cli.subcommand_mut("build"),
            Err(GrammarError::RegistrationClosed)
        ));
    }

    #[test]
    fn test_subcommand_mut() {
        let mut cli = cli();
        cli.subcommand_mut("build")
            .unwrap()
            .add_option(Some("-j"), None, "jobs")
            .unwrap();
        assert!(matches!(
            cli.subcommand_mut("deploy"),
            Err(GrammarError::UnknownSubcommand(_))
        ));

        cli.parse(["app", "build", "-j", "8"]).unwrap();
        assert_eq!(cli.command().unwrap().get("-j").unwrap(), "8");
    }

    #[test]
    fn test_subcommand_help_text() {
        let cli = cli();
        assert!(
            cli.subcommand_help_text("build")
                .unwrap()
                .contains("usage: app build <target>\n")
        );
        assert!(cli.subcommand_help_text("nope").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_argument_is_converted_lossily() {
        use std::os::unix::ffi::OsStringExt;

        let value = lossy_arg(OsString::from_vec(vec![b'x', 0xff]));
        assert_eq!(value, "x\u{fffd}");

        let mut cli = cli();
        let argv = vec!["app".to_string(), "file".to_string(), value];
        cli.parse(argv).unwrap();
        assert_eq!(cli.get("file").unwrap(), "x\u{fffd}");
    }
}
