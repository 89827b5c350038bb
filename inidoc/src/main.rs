//! `inidoc`: inspect and edit INI configuration files.
//!
//! Every command round-trips through the document model, so files written by
//! `set`, `unset` and `fmt` are always in canonical form: sections and keys
//! sorted, values trimmed, comments dropped.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inidoc::TextEncoding;
use inidoc::commands::{self, CommandContext, FmtOutcome};
use inidoc::exit_codes;
use inidoc::io::config::{CONFIG_FILE_NAME, load_config};

#[derive(Parser)]
#[command(name = "inidoc", version, about = "Inspect and edit INI configuration files")]
struct Cli {
    /// Text encoding of the files (utf-8, utf-8-bom, utf-16le, utf-16be, latin1).
    #[arg(long, global = true)]
    encoding: Option<TextEncoding>,

    /// Tool configuration file (defaults to `inidoc.toml` in the working directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a file and report its section and key counts.
    Check { file: String },
    /// Print a file in canonical form.
    Show {
        file: String,
        /// Print `{section: {key: value}}` JSON instead.
        #[arg(long)]
        json: bool,
    },
    /// Print one value.
    Get {
        file: String,
        section: String,
        key: String,
    },
    /// Set one value, creating the file and section if missing.
    Set {
        file: String,
        section: String,
        key: String,
        value: String,
    },
    /// Remove a key, or a whole section when no key is given.
    Unset {
        file: String,
        section: String,
        key: Option<String>,
    },
    /// Rewrite a file in canonical form.
    Fmt {
        file: String,
        /// Do not write; exit non-zero if the file is not canonical.
        #[arg(long)]
        check: bool,
    },
}

fn main() {
    inidoc::logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("resolve working directory")?;
    let config_path = cli.config.unwrap_or_else(|| cwd.join(CONFIG_FILE_NAME));
    let cfg = load_config(&config_path)?;
    let ctx = CommandContext::from_config(&cfg, &cwd, cli.encoding);

    match cli.command {
        Command::Check { file } => {
            let report = commands::check(&ctx, &file)?;
            println!("sections={} keys={}", report.sections, report.pairs);
            Ok(exit_codes::OK)
        }
        Command::Show { file, json } => {
            print!("{}", commands::show(&ctx, &file, json)?);
            Ok(exit_codes::OK)
        }
        Command::Get { file, section, key } => {
            match commands::get(&ctx, &file, &section, &key)? {
                Some(value) => {
                    println!("{}", value);
                    Ok(exit_codes::OK)
                }
                None => {
                    eprintln!("{}.{} not found", section, key);
                    Ok(exit_codes::NOT_FOUND)
                }
            }
        }
        Command::Set {
            file,
            section,
            key,
            value,
        } => {
            commands::set(&ctx, &file, &section, &key, &value)?;
            Ok(exit_codes::OK)
        }
        Command::Unset { file, section, key } => {
            if commands::unset(&ctx, &file, &section, key.as_deref())? {
                Ok(exit_codes::OK)
            } else {
                eprintln!("nothing to remove");
                Ok(exit_codes::NOT_FOUND)
            }
        }
        Command::Fmt { file, check } => match commands::fmt(&ctx, &file, check)? {
            FmtOutcome::Unchanged | FmtOutcome::Rewritten => Ok(exit_codes::OK),
            FmtOutcome::Unformatted => {
                eprintln!("{} is not in canonical form", file);
                Ok(exit_codes::UNFORMATTED)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_get() {
        let cli = Cli::parse_from(["inidoc", "get", "app.ini", "server", "port"]);
        assert!(matches!(
            cli.command,
            Command::Get { ref file, ref section, ref key }
                if file == "app.ini" && section == "server" && key == "port"
        ));
    }

    #[test]
    fn parse_global_encoding_after_subcommand() {
        let cli = Cli::parse_from(["inidoc", "show", "app.ini", "--encoding", "utf-16le"]);
        assert_eq!(cli.encoding, Some(TextEncoding::Utf16Le));
        assert!(matches!(cli.command, Command::Show { json: false, .. }));
    }

    #[test]
    fn parse_fmt_check() {
        let cli = Cli::parse_from(["inidoc", "fmt", "--check", "app.ini"]);
        assert!(matches!(cli.command, Command::Fmt { check: true, .. }));
    }

    #[test]
    fn parse_unset_without_key() {
        let cli = Cli::parse_from(["inidoc", "unset", "app.ini", "server"]);
        assert!(matches!(cli.command, Command::Unset { key: None, .. }));
    }

    #[test]
    fn parse_rejects_unknown_encoding() {
        assert!(Cli::try_parse_from(["inidoc", "--encoding", "ebcdic", "check", "a.ini"]).is_err());
    }
}
