//! Loads a grammar from YAML, exports it back as JSON and parses a fixed
//! token vector against it.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p cli-grammar-core --example grammar_file
//! ```

use cli_grammar_core::GrammarConfig;

const GRAMMAR: &str = r#"
name: deploy
description: ship builds to servers
version: "2.1.0"
arguments:
  - name: env
    description: target environment
options:
  - short: "-r"
    long: "--region"
    description: datacenter region
subcommands:
  - name: rollback
    description: revert the last release
    options:
      - long: "--steps"
        description: how many releases to revert
"#;

const ARGV: &str = "deploy env staging -r eu-west rollback --steps 2";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = GrammarConfig::from_yaml_str(GRAMMAR)?;
    let mut cli = config.build()?;

    print!("{}", cli.help_text());
    println!(
        "Exported grammar:\n{}",
        serde_json::to_string_pretty(&cli.to_config())?
    );

    cli.parse(ARGV.split(' '))?;
    println!("env     = {}", cli.get("env")?);
    println!("region  = {}", cli.get("--region")?);
    if let Some(command) = cli.command() {
        println!("{}: steps = {}", command.name, command.get("--steps")?);
    }
    Ok(())
}
