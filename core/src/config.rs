//! Grammar files.
//!
//! A grammar can be declared in JSON or YAML instead of code. Building a
//! [`GrammarConfig`] replays every declaration through the [`Parser`]
//! registration calls in file order, so the same name rules and duplicate
//! checks apply.
//!
//! # Example YAML
//!
//! ```yaml
//! name: app
//! description: an example app
//! version: "1.0.0"
//! arguments:
//!   - name: file
//!     description: input file
//! options:
//!   - short: "-o"
//!     long: "--output"
//!     description: output path
//! subcommands:
//!   - name: build
//!     description: build things
//!     arguments:
//!       - name: target
//!         description: build target
//! ```

use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::help::DEFAULT_VERSION;
use crate::parser::Parser;
use crate::registry::{RegisteredArgument, RegisteredOption, ScopeRegistry};

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

/// A declared positional argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgumentConfig {
    pub name: String,
    pub description: String,
}

/// A declared option; at least one of `short` and `long` must be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    pub description: String,
}

/// A declared subcommand with its own arguments and options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubcommandConfig {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionConfig>,
}

/// A complete grammar declaration.
///
/// # Examples
///
/// ```
/// use cli_grammar_core::GrammarConfig;
///
/// let config = GrammarConfig::from_yaml_str(
///     "name: app\n\
///      description: an example app\n\
///      arguments:\n  - name: file\n    description: input file\n",
/// )
/// .unwrap();
/// assert_eq!(config.version, "0.0.0");
///
/// let mut cli = config.build().unwrap();
/// cli.parse(["app", "file", "x.txt"]).unwrap();
/// assert_eq!(cli.get("file").unwrap(), "x.txt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrammarConfig {
    pub name: String,
    pub description: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcommands: Vec<SubcommandConfig>,
}

/// On-disk format of a grammar file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarFormat {
    Json,
    Yaml,
}

impl GrammarFormat {
    /// Picks the format from a `.json`, `.yml` or `.yaml` extension.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yml" | "yaml") => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl GrammarConfig {
    /// Loads a grammar file, picking JSON or YAML from the extension.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnsupportedFormat`] for an unknown extension,
    /// [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Json`] / [`ConfigError::Yaml`] if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = GrammarFormat::from_path(path)?;
        let reader = BufReader::new(std::fs::File::open(path)?);
        let config = match format {
            GrammarFormat::Json => serde_json::from_reader(reader)?,
            GrammarFormat::Yaml => serde_yaml::from_reader(reader)?,
        };
        debug!(path = %path.display(), ?format, "Loaded grammar file");
        Ok(config)
    }

    /// Saves the grammar in the format implied by the extension.
    ///
    /// # Errors
    ///
    /// Same as [`load`](GrammarConfig::load), for writing.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let format = GrammarFormat::from_path(path)?;
        let mut writer = BufWriter::new(std::fs::File::create(path)?);
        match format {
            GrammarFormat::Json => serde_json::to_writer_pretty(&mut writer, self)?,
            GrammarFormat::Yaml => serde_yaml::to_writer(&mut writer, self)?,
        }
        writer.flush()?;
        debug!(path = %path.display(), ?format, "Saved grammar file");
        Ok(())
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Declares every argument, option and subcommand on a new [`Parser`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::Grammar`] with the first declaration the registry
    /// rejects.
    pub fn build(&self) -> Result<Parser, ConfigError> {
        let mut cli = Parser::new(&self.name, &self.description).with_version(&self.version);

        for arg in &self.arguments {
            cli.add_argument(&arg.name, &arg.description)?;
        }
        for opt in &self.options {
            cli.add_option(opt.short.as_deref(), opt.long.as_deref(), &opt.description)?;
        }
        for sub in &self.subcommands {
            let command = cli.add_subcommand(&sub.name, &sub.description)?;
            for arg in &sub.arguments {
                command.add_argument(&arg.name, &arg.description)?;
            }
            for opt in &sub.options {
                command.add_option(opt.short.as_deref(), opt.long.as_deref(), &opt.description)?;
            }
        }

        Ok(cli)
    }
}

impl Parser {
    /// Exports the declared grammar in declaration order.
    pub fn to_config(&self) -> GrammarConfig {
        let (arguments, options) = scope_config(self.registry().scope());
        let subcommands = self
            .registry()
            .subcommands()
            .iter()
            .map(|sub| {
                let (arguments, options) = scope_config(sub.scope());
                SubcommandConfig {
                    name: sub.name().to_string(),
                    description: sub.description().to_string(),
                    arguments,
                    options,
                }
            })
            .collect();

        let info = self.info();
        GrammarConfig {
            name: info.name.clone(),
            description: info.description.clone(),
            version: info.version.clone(),
            arguments,
            options,
            subcommands,
        }
    }
}

fn scope_config(scope: &ScopeRegistry) -> (Vec<ArgumentConfig>, Vec<OptionConfig>) {
    let arguments = scope.arguments().iter().map(ArgumentConfig::from).collect();
    let options = scope.options().iter().map(OptionConfig::from).collect();
    (arguments, options)
}

impl From<&RegisteredArgument> for ArgumentConfig {
    fn from(arg: &RegisteredArgument) -> Self {
        Self {
            name: arg.name().to_string(),
            description: arg.description().to_string(),
        }
    }
}

impl From<&RegisteredOption> for OptionConfig {
    fn from(opt: &RegisteredOption) -> Self {
        Self {
            short: opt.short_name().map(String::from),
            long: opt.long_name().map(String::from),
            description: opt.description().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GrammarError;

    const GRAMMAR_JSON: &str = r#"{
        "name": "app",
        "description": "an example app",
        "version": "2.0.0",
        "arguments": [{ "name": "file", "description": "input file" }],
        "options": [
            { "short": "-o", "long": "--opt", "description": "an option" },
            { "long": "--beta", "description": "long only" }
        ],
        "subcommands": [
            {
                "name": "build",
                "description": "build things",
                "arguments": [{ "name": "target", "description": "build target" }]
            }
        ]
    }"#;

    #[test]
    fn test_build_from_json() {
        let config = GrammarConfig::from_json_str(GRAMMAR_JSON).unwrap();
        let mut cli = config.build().unwrap();

        assert_eq!(cli.version_text(), "2.0.0\n");
        cli.parse(["app", "--beta", "b", "build", "target", "release"])
            .unwrap();
        assert_eq!(cli.get("--beta").unwrap(), "b");
        assert_eq!(cli.command().unwrap().get("target").unwrap(), "release");
    }

    #[test]
    fn test_export_matches_source() {
        let config = GrammarConfig::from_json_str(GRAMMAR_JSON).unwrap();
        let cli = config.build().unwrap();
        assert_eq!(cli.to_config(), config);
    }

    #[test]
    fn test_invalid_declaration_is_reported() {
        let yaml = "name: app\ndescription: x\noptions:\n  - description: nameless\n";
        let config = GrammarConfig::from_yaml_str(yaml).unwrap();
        let err = config.build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Grammar(GrammarError::InvalidDeclaration(_))
        ));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let yaml = "\
name: app
description: x
options:
  - shrt: \"-o\"
    long: \"--opt\"
    description: a misspelled key
";
        assert!(matches!(
            GrammarConfig::from_yaml_str(yaml),
            Err(ConfigError::Yaml(_))
        ));

        let json = r#"{"name": "app", "description": "x", "verison": "1.0.0"}"#;
        assert!(matches!(
            GrammarConfig::from_json_str(json),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_save_writes_complete_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = GrammarConfig::from_json_str(GRAMMAR_JSON).unwrap();

        for file in ["grammar.json", "grammar.yaml"] {
            let path = dir.path().join(file);
            config.save(&path).unwrap();
            assert_eq!(GrammarConfig::load(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            GrammarFormat::from_path(Path::new("g.json")).unwrap(),
            GrammarFormat::Json
        );
        assert_eq!(
            GrammarFormat::from_path(Path::new("g.yml")).unwrap(),
            GrammarFormat::Yaml
        );
        assert!(matches!(
            GrammarFormat::from_path(Path::new("g.toml")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
