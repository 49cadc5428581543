use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use lcovrs::{cli, ParseOptions};

/// lcovrs — Strict parser and inspector for LCOV .info coverage reports.
#[derive(Parser)]
#[command(name = "lcovrs", version, about)]
struct Cli {
    #[command(flatten)]
    options: OptionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OptionArgs {
    /// Do not cross-check FNF/FNH/LF/LH against the parsed data.
    #[arg(long, global = true)]
    ignore_incorrect_counts: bool,

    /// Sum hit counts of repeated DA entries instead of failing.
    #[arg(long, global = true)]
    merge_duplicate_lines: bool,
}

impl From<&OptionArgs> for ParseOptions {
    fn from(args: &OptionArgs) -> Self {
        ParseOptions::new()
            .with_ignore_incorrect_counts(args.ignore_incorrect_counts)
            .with_merge_duplicate_line_hit_counts(args.merge_duplicate_lines)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show hit/found counts of lines, functions and branches per file.
    Summary {
        /// Path to the LCOV report.
        file: PathBuf,
    },

    /// Show executed line numbers per source file.
    Lines {
        /// Path to the LCOV report.
        file: PathBuf,

        /// Only show lines for this source file (as named by its SF entry).
        #[arg(long)]
        source: Option<String>,
    },

    /// Dump the parsed report as JSON.
    Json {
        /// Path to the LCOV report.
        file: PathBuf,

        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Cli::parse();
    let options = ParseOptions::from(&args.options);

    let output = match args.command {
        Commands::Summary { file } => cli::cmd_summary(&cli::load(&file, &options)?)?,
        Commands::Lines { file, source } => {
            cli::cmd_lines(&cli::load(&file, &options)?, source.as_deref())?
        }
        Commands::Json { file, pretty } => cli::cmd_json(&cli::load(&file, &options)?, pretty)?,
    };

    print!("{output}");
    Ok(())
}
