//! Lexical rules for declared names.
//!
//! These predicates are consulted only when a grammar is declared, never
//! while parsing. They are pure and never fail; the registry turns a `false`
//! into [`GrammarError::InvalidDeclaration`](crate::GrammarError).
//!
//! # Examples
//!
//! ```
//! use cli_grammar_core::*;
//!
//! assert!(valid_argument_name("input-file"));
//! assert!(!valid_argument_name("-input"));
//!
//! assert!(valid_short_option_name("-o"));
//! assert!(!valid_short_option_name("--o"));
//!
//! assert!(valid_long_option_name("--output"));
//! assert!(!valid_long_option_name("--o"));
//! ```

/// Returns `true` for ASCII letters.
fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Returns `true` for characters allowed anywhere in an identifier.
fn is_name_char(c: char) -> bool {
    is_alpha(c) || c == '-'
}

/// Checks an argument or subcommand identifier.
///
/// The name must be non-empty, made of letters and hyphens, and must not
/// start or end with a hyphen.
///
/// # Examples
///
/// ```
/// use cli_grammar_core::valid_argument_name;
///
/// assert!(valid_argument_name("file"));
/// assert!(valid_argument_name("arg-a"));
/// assert!(!valid_argument_name(""));
/// assert!(!valid_argument_name("arg-"));
/// assert!(!valid_argument_name("arg1"));
/// ```
pub fn valid_argument_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.ends_with('-')
        && name.chars().all(is_name_char)
}

/// Checks a short option name: a hyphen followed by exactly one letter.
pub fn valid_short_option_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some('-'), Some(c), None) if is_alpha(c)
    )
}

/// Checks a long option name such as `--output`.
///
/// The name must be longer than four characters, start with `--`, consist of
/// letters and hyphens, and neither the first character after the prefix nor
/// the last character may be a hyphen.
///
/// # Examples
///
/// ```
/// use cli_grammar_core::valid_long_option_name;
///
/// assert!(valid_long_option_name("--opt"));
/// assert!(valid_long_option_name("--dry-run"));
/// assert!(!valid_long_option_name("--ab"));
/// assert!(!valid_long_option_name("---opt"));
/// assert!(!valid_long_option_name("--opt-"));
/// ```
pub fn valid_long_option_name(name: &str) -> bool {
    let Some(rest) = name.strip_prefix("--") else {
        return false;
    };
    name.chars().count() > 4
        && name.chars().all(is_name_char)
        && !rest.starts_with('-')
        && !rest.ends_with('-')
}

/// Checks a description: any non-empty string.
pub fn valid_description(description: &str) -> bool {
    !description.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_name_accepts_identifiers() {
        for name in ["a", "ab", "file", "arg-a", "long-name-here", "MixedCase"] {
            assert!(valid_argument_name(name), "{name} should be valid");
        }
    }

    #[test]
    fn test_argument_name_rejects_malformed() {
        for name in ["", "-", "-a", "a-", "a_b", "a b", "a1", "ä", "--file"] {
            assert!(!valid_argument_name(name), "{name} should be invalid");
        }
    }

    #[test]
    fn test_short_option_name() {
        assert!(valid_short_option_name("-o"));
        assert!(valid_short_option_name("-Z"));

        for name in ["", "-", "o", "--", "-1", "-ab", "--o", "+o", "-é"] {
            assert!(!valid_short_option_name(name), "{name} should be invalid");
        }
    }

    #[test]
    fn test_long_option_name() {
        for name in ["--opt", "--option", "--dry-run", "--a-b"] {
            assert!(valid_long_option_name(name), "{name} should be valid");
        }
        for name in [
            "", "--", "--ab", "-opt", "---opt", "--opt-", "--op1", "--op_t", "opt--",
        ] {
            assert!(!valid_long_option_name(name), "{name} should be invalid");
        }
    }

    #[test]
    fn test_description() {
        assert!(valid_description("x"));
        assert!(!valid_description(""));
    }

    #[test]
    fn test_predicates_are_stable() {
        for name in ["file", "-o", "--opt", "", "a-"] {
            assert_eq!(valid_argument_name(name), valid_argument_name(name));
            assert_eq!(valid_short_option_name(name), valid_short_option_name(name));
            assert_eq!(valid_long_option_name(name), valid_long_option_name(name));
        }
    }
}
