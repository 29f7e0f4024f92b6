use crate::constants::{exit_codes, verbosity};
use clap::{error::ErrorKind, Args, CommandFactory, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// Codesmith - generates source files from annotated data and template groups.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Template root. Defaults to `./.code-generator`, then `$CODE_GENERATOR_PATH`.
    #[arg(long, value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List template groups.
    Groups,

    /// List the templates of a group.
    #[command(visible_alias = "ls")]
    Templates {
        group: String,
    },

    /// Show a group's configuration, including its merged rules.
    Config {
        group: String,

        /// Only report this template.
        #[arg(short, long)]
        template: Option<String>,
    },

    /// Strip annotations from JSON data and show what was extracted.
    Parse {
        group: String,

        #[command(flatten)]
        data: JsonInput,
    },

    /// Render one template with JSON data into a file.
    #[command(visible_alias = "gen")]
    Generate {
        group: String,

        /// Declared template name.
        template: String,

        /// File to write.
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        #[command(flatten)]
        data: JsonInput,
    },

    /// Generate every artifact of a module from a JSON request.
    Module {
        #[command(flatten)]
        request: JsonInput,
    },

    /// Serve the operations as MCP tools over stdio.
    #[cfg(feature = "mcp")]
    Mcp,
}

/// A JSON document given inline, as `-` for stdin, or with `--file`.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct JsonInput {
    /// JSON string, or `-` to read from stdin.
    #[arg(value_name = "JSON", conflicts_with = "file")]
    pub json: Option<String>,

    /// Path to a JSON file.
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Parse command line arguments, printing help when no subcommand is given.
pub fn get_cli() -> Cli {
    Cli::try_parse().unwrap_or_else(|e| {
        if matches!(
            e.kind(),
            ErrorKind::MissingSubcommand
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                | ErrorKind::MissingRequiredArgument
        ) {
            let mut command = Cli::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
