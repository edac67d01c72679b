//! Help and version text.
//!
//! The layout is fixed: a title line, a usage line, then one section per
//! non-empty category with entries indented by two spaces, names
//! left-justified to the widest name of the category and a four-space gutter
//! before the description. Column widths are derived from the registry at
//! render time.

use std::fmt::Write;

use crate::registry::{RegisteredOption, RegisteredSubcommand, Registry, ScopeRegistry};

const INDENT: &str = "  ";
const GUTTER: &str = "    ";

/// Default version string of a new [`Parser`](crate::Parser).
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Name, description and version of a command-line interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub name: String,
    pub description: String,
    pub version: String,
}

impl Info {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            version: DEFAULT_VERSION.to_string(),
        }
    }

    /// Renders the full help text for the top-level grammar.
    ///
    /// # Examples
    ///
    /// ```
    /// use cli_grammar_core::{Info, Registry};
    ///
    /// let info = Info::new("app", "an example app");
    /// let mut registry = Registry::default();
    /// registry.register_argument("arg", "a positional argument").unwrap();
    ///
    /// assert_eq!(
    ///     info.render_help(&registry),
    ///     "app - an example app\n\
    ///      \n\
    ///      usage: app <arg>\n\
    ///      \n\
    ///      arguments:\n\
    ///      \n  arg    a positional argument\n\
    ///      \n"
    /// );
    /// ```
    pub fn render_help(&self, registry: &Registry) -> String {
        let mut out = String::new();
        render_page(
            &mut out,
            &self.name,
            &self.description,
            registry.scope(),
            registry.subcommands(),
        );
        out
    }

    /// Renders help for one subcommand, titled `app cmd - description`.
    pub fn render_subcommand_help(&self, command: &RegisteredSubcommand) -> String {
        let mut out = String::new();
        let name = format!("{} {}", self.name, command.name());
        render_page(&mut out, &name, command.description(), command.scope(), &[]);
        out
    }

    /// Renders the version line.
    pub fn render_version(&self) -> String {
        format!("{}\n", self.version)
    }
}

fn render_page(
    out: &mut String,
    name: &str,
    description: &str,
    scope: &ScopeRegistry,
    subcommands: &[RegisteredSubcommand],
) {
    let _ = writeln!(out, "{name} - {description}");

    out.push_str("\nusage: ");
    out.push_str(name);
    for arg in scope.arguments() {
        let _ = write!(out, " <{}>", arg.name());
    }
    if !scope.options().is_empty() {
        out.push_str(" [options]");
    }
    if !subcommands.is_empty() {
        out.push_str(" [command]");
    }
    out.push('\n');

    if !scope.arguments().is_empty() {
        section(out, "arguments");
        let entries: Vec<(&str, &str)> = scope
            .arguments()
            .iter()
            .map(|a| (a.name(), a.description()))
            .collect();
        aligned_entries(out, &entries);
    }

    if !scope.options().is_empty() {
        section(out, "options");
        option_entries(out, scope.options());
    }

    if !subcommands.is_empty() {
        section(out, "commands");
        let entries: Vec<(&str, &str)> = subcommands
            .iter()
            .map(|c| (c.name(), c.description()))
            .collect();
        aligned_entries(out, &entries);
    }

    out.push('\n');
}

fn section(out: &mut String, header: &str) {
    let _ = write!(out, "\n{header}:\n\n");
}

fn aligned_entries(out: &mut String, entries: &[(&str, &str)]) {
    let width = entries
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);
    for (name, description) in entries {
        let _ = writeln!(out, "{INDENT}{name:<width$}{GUTTER}{description}");
    }
}

fn option_entries(out: &mut String, options: &[RegisteredOption]) {
    let width = options
        .iter()
        .filter_map(|o| o.long_name().map(str::len))
        .max()
        .unwrap_or(0);

    for opt in options {
        out.push_str(INDENT);
        match (opt.short_name(), opt.long_name()) {
            (Some(short), Some(_)) => {
                let _ = write!(out, "{short}, ");
            }
            (Some(short), None) => {
                let _ = write!(out, "{short}  ");
            }
            (None, _) => out.push_str(GUTTER),
        }
        let long = opt.long_name().unwrap_or_default();
        let _ = writeln!(out, "{long:<width$}{GUTTER}{}", opt.description());
    }
}
