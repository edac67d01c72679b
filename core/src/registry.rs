//! The declared grammar.
//!
//! A [`Registry`] holds the top-level [`ScopeRegistry`] (arguments and
//! options) plus the declared subcommands, each of which owns a nested
//! [`ScopeRegistry`] of its own. Subcommands cannot declare subcommands.
//!
//! Names are unique per scope: at the top level argument names, option keys
//! and subcommand names share one namespace, and inside a subcommand its
//! argument names and option keys do. A rejected registration leaves the
//! registry unchanged.
//!
//! # Examples
//!
//! ```
//! use cli_grammar_core::*;
//!
//! let mut registry = Registry::default();
//! registry.register_argument("file", "input file").unwrap();
//! registry.register_option(Some("-o"), Some("--opt"), "an option").unwrap();
//!
//! let build = registry.register_subcommand("build", "build things").unwrap();
//! build.add_argument("target", "build target").unwrap();
//!
//! let opt = registry.scope().option("--opt").unwrap();
//! assert_eq!(registry.scope().option("-o").unwrap().id(), opt.id());
//!
//! let err = registry.register_argument("build", "clashes").unwrap_err();
//! assert!(matches!(err, GrammarError::DuplicateName(_)));
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::error::{GrammarError, Result};
use crate::validate::{
    valid_argument_name, valid_description, valid_long_option_name, valid_short_option_name,
};

/// Stable identity of an option within its scope.
///
/// Both the short and the long key of an option resolve to the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(usize);

/// A declared positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredArgument {
    name: String,
    description: String,
}

impl RegisteredArgument {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A declared option with up to two aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredOption {
    id: OptionId,
    short_name: Option<String>,
    long_name: Option<String>,
    description: String,
}

impl RegisteredOption {
    pub fn id(&self) -> OptionId {
        self.id
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    pub fn long_name(&self) -> Option<&str> {
        self.long_name.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Arguments and options of one scope.
///
/// Declaration order is kept for rendering; lookups go through name-keyed
/// indices.
#[derive(Debug, Clone, Default)]
pub struct ScopeRegistry {
    arguments: Vec<RegisteredArgument>,
    argument_index: HashMap<String, usize>,
    options: Vec<RegisteredOption>,
    option_keys: HashMap<String, OptionId>,
}

impl ScopeRegistry {
    /// Declared arguments in declaration order.
    pub fn arguments(&self) -> &[RegisteredArgument] {
        &self.arguments
    }

    /// Declared options in declaration order.
    pub fn options(&self) -> &[RegisteredOption] {
        &self.options
    }

    /// Finds an argument by its exact name.
    pub fn argument(&self, name: &str) -> Option<&RegisteredArgument> {
        self.argument_index.get(name).map(|&i| &self.arguments[i])
    }

    /// Finds an option by either of its keys.
    pub fn option(&self, key: &str) -> Option<&RegisteredOption> {
        self.option_keys.get(key).map(|id| &self.options[id.0])
    }

    /// Returns `true` if `name` is taken by an argument or an option key.
    pub fn contains(&self, name: &str) -> bool {
        self.argument_index.contains_key(name) || self.option_keys.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty() && self.options.is_empty()
    }

    fn register_argument(&mut self, name: &str, description: &str) -> Result<()> {
        if !valid_argument_name(name) {
            return Err(GrammarError::InvalidDeclaration(format!(
                "invalid argument name: {name:?}"
            )));
        }
        if !valid_description(description) {
            return Err(GrammarError::InvalidDeclaration(format!(
                "argument {name} has an empty description"
            )));
        }
        if self.contains(name) {
            return Err(GrammarError::DuplicateName(name.to_string()));
        }

        self.argument_index
            .insert(name.to_string(), self.arguments.len());
        self.arguments.push(RegisteredArgument {
            name: name.to_string(),
            description: description.to_string(),
        });
        Ok(())
    }

    fn check_option(
        &self,
        short_name: Option<&str>,
        long_name: Option<&str>,
        description: &str,
    ) -> Result<()> {
        if short_name.is_none() && long_name.is_none() {
            return Err(GrammarError::InvalidDeclaration(
                "option must have at least one name".to_string(),
            ));
        }
        if let Some(short) = short_name {
            if !valid_short_option_name(short) {
                return Err(GrammarError::InvalidDeclaration(format!(
                    "invalid short option: {short:?}"
                )));
            }
        }
        if let Some(long) = long_name {
            if !valid_long_option_name(long) {
                return Err(GrammarError::InvalidDeclaration(format!(
                    "invalid long option: {long:?}"
                )));
            }
        }
        if !valid_description(description) {
            return Err(GrammarError::InvalidDeclaration(format!(
                "option {} has an empty description",
                long_name.or(short_name).unwrap_or_default()
            )));
        }
        if let Some(taken) = short_name
            .into_iter()
            .chain(long_name)
            .find(|k| self.contains(k))
        {
            return Err(GrammarError::DuplicateName(taken.to_string()));
        }
        Ok(())
    }

    fn register_option(
        &mut self,
        short_name: Option<&str>,
        long_name: Option<&str>,
        description: &str,
    ) -> Result<OptionId> {
        self.check_option(short_name, long_name, description)?;

        let id = OptionId(self.options.len());
        for key in short_name.into_iter().chain(long_name) {
            self.option_keys.insert(key.to_string(), id);
        }
        self.options.push(RegisteredOption {
            id,
            short_name: short_name.map(String::from),
            long_name: long_name.map(String::from),
            description: description.to_string(),
        });
        Ok(id)
    }
}

/// A declared subcommand owning its own argument/option scope.
#[derive(Debug, Clone)]
pub struct RegisteredSubcommand {
    name: String,
    description: String,
    scope: ScopeRegistry,
}

impl RegisteredSubcommand {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The subcommand's nested arguments and options.
    pub fn scope(&self) -> &ScopeRegistry {
        &self.scope
    }

    /// Declares an argument inside this subcommand.
    ///
    /// # Errors
    ///
    /// [`GrammarError::InvalidDeclaration`] for a malformed name or empty
    /// description, [`GrammarError::DuplicateName`] if the name is taken in
    /// this subcommand.
    pub fn add_argument(&mut self, name: &str, description: &str) -> Result<()> {
        self.scope.register_argument(name, description)?;
        debug!(subcommand = %self.name, name, "Registered argument");
        Ok(())
    }

    /// Declares an option inside this subcommand.
    ///
    /// # Errors
    ///
    /// Same rules as [`Registry::register_option`], checked against this
    /// subcommand's scope.
    pub fn add_option(
        &mut self,
        short_name: Option<&str>,
        long_name: Option<&str>,
        description: &str,
    ) -> Result<OptionId> {
        let id = self
            .scope
            .register_option(short_name, long_name, description)?;
        debug!(subcommand = %self.name, ?short_name, ?long_name, "Registered option");
        Ok(id)
    }
}

/// The complete declared grammar of a command-line interface.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    scope: ScopeRegistry,
    subcommands: Vec<RegisteredSubcommand>,
    subcommand_index: HashMap<String, usize>,
}

impl Registry {
    /// Top-level arguments and options.
    pub fn scope(&self) -> &ScopeRegistry {
        &self.scope
    }

    /// Declared subcommands in declaration order.
    pub fn subcommands(&self) -> &[RegisteredSubcommand] {
        &self.subcommands
    }

    pub fn subcommand(&self, name: &str) -> Option<&RegisteredSubcommand> {
        self.subcommand_index
            .get(name)
            .map(|&i| &self.subcommands[i])
    }

    pub fn subcommand_mut(&mut self, name: &str) -> Option<&mut RegisteredSubcommand> {
        self.subcommand_index
            .get(name)
            .map(|&i| &mut self.subcommands[i])
    }

    /// Returns `true` if `name` is taken anywhere in the top-level scope.
    pub fn contains(&self, name: &str) -> bool {
        self.scope.contains(name) || self.subcommand_index.contains_key(name)
    }

    /// Declares a top-level positional argument.
    ///
    /// # Errors
    ///
    /// [`GrammarError::InvalidDeclaration`] if the name is not an identifier
    /// or the description is empty, [`GrammarError::DuplicateName`] if the
    /// name is already taken at the top level.
    pub fn register_argument(&mut self, name: &str, description: &str) -> Result<()> {
        if self.subcommand_index.contains_key(name) {
            return Err(GrammarError::DuplicateName(name.to_string()));
        }
        self.scope.register_argument(name, description)?;
        debug!(name, "Registered argument");
        Ok(())
    }

    /// Declares a top-level option reachable by each given key.
    ///
    /// # Errors
    ///
    /// [`GrammarError::InvalidDeclaration`] if neither name is given, a
    /// given name is malformed, or the description is empty;
    /// [`GrammarError::DuplicateName`] if either key is already taken.
    pub fn register_option(
        &mut self,
        short_name: Option<&str>,
        long_name: Option<&str>,
        description: &str,
    ) -> Result<OptionId> {
        if let Some(taken) = short_name
            .into_iter()
            .chain(long_name)
            .find(|k| self.subcommand_index.contains_key(*k))
        {
            return Err(GrammarError::DuplicateName(taken.to_string()));
        }
        let id = self
            .scope
            .register_option(short_name, long_name, description)?;
        debug!(?short_name, ?long_name, "Registered option");
        Ok(id)
    }

    /// Declares a subcommand with an empty nested scope.
    ///
    /// # Errors
    ///
    /// [`GrammarError::InvalidDeclaration`] if the name is not an identifier
    /// or the description is empty, [`GrammarError::DuplicateName`] if the
    /// name is already taken at the top level.
    pub fn register_subcommand(
        &mut self,
        name: &str,
        description: &str,
    ) -> Result<&mut RegisteredSubcommand> {
        if !valid_argument_name(name) {
            return Err(GrammarError::InvalidDeclaration(format!(
                "invalid subcommand name: {name:?}"
            )));
        }
        if !valid_description(description) {
            return Err(GrammarError::InvalidDeclaration(format!(
                "subcommand {name} has an empty description"
            )));
        }
        if self.contains(name) {
            return Err(GrammarError::DuplicateName(name.to_string()));
        }

        let index = self.subcommands.len();
        self.subcommand_index.insert(name.to_string(), index);
        self.subcommands.push(RegisteredSubcommand {
            name: name.to_string(),
            description: description.to_string(),
            scope: ScopeRegistry::default(),
        });
        debug!(name, "Registered subcommand");
        Ok(&mut self.subcommands[index])
    }
}
