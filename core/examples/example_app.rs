//! Declares a small grammar in code, prints its help and parses the process
//! arguments against it.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p cli-grammar-core --example example_app -- file x.txt -o 5
//! cargo run -p cli-grammar-core --example example_app -- cmd target release
//! ```

use cli_grammar_core::{GrammarError, Parser};

fn main() {
    let mut cli = Parser::new("app", "an example app").with_version("0.1.0");

    if let Err(err) = declare(&mut cli) {
        eprintln!("error: {err}");
        std::process::exit(2);
    }

    match cli.parse_env().cloned() {
        Ok(result) => {
            println!(
                "Parsed {} argument(s), {} option(s)",
                result.arguments.len(),
                result.options.len()
            );
            for arg in &result.arguments {
                println!("  {} = {}", arg.name, arg.value);
            }
            for opt in &result.options {
                println!("  {} = {}", opt.name, opt.value);
            }
            if let Some(command) = &result.command {
                println!("Subcommand: {}", command.name);
                if let Ok(target) = command.get("target") {
                    println!("  target = {target}");
                }
            }
        }
        Err(GrammarError::NoArguments) => cli.help(),
        Err(err) => {
            eprintln!("error: {err}");
            cli.help();
            std::process::exit(1);
        }
    }
}

fn declare(cli: &mut Parser) -> Result<(), GrammarError> {
    cli.add_argument("a", "a positional argument")?;
    cli.add_argument("ab", "a positional argument")?;
    cli.add_argument("file", "a positional argument")?;
    cli.add_option(Some("-o"), Some("--option"), "an optional argument")?;
    cli.add_option(Some("-x"), None, "an optional argument")?;
    cli.add_option(Some("-v"), Some("--verbosity"), "an optional argument")?;
    cli.add_option(None, Some("--number"), "an optional argument")?;

    let cmd = cli.add_subcommand("cmd", "a subcommand")?;
    cmd.add_argument("target", "what to act on")?;
    cmd.add_option(Some("-f"), Some("--force"), "force it")?;
    cli.add_subcommand("other", "another subcommand")?;
    Ok(())
}
