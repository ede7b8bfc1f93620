//! Sift command-line interface

use anyhow::Result;
use clap::{Parser, Subcommand};
use sift::cli::output::{self, OutputFormat};
use sift::cli::{check, explain, filter, logging, parse};
use std::path::PathBuf;

/// Sift command-line tool
#[derive(Parser)]
#[command(name = "sift")]
#[command(author, version, about = "Compile and run dynamic filter queries", long_about = None)]
struct Cli {
    /// Verbose output (debug logging to stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, pretty, table, text)
    #[arg(short = 'f', long, global = true)]
    format: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    color: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a query and print its clauses
    Parse {
        /// Query text, e.g. "score:GreaterThan:5; tags:Contains:x"
        query: String,
    },

    /// Report every malformed clause, and compile errors with a model
    Check {
        /// Query text
        query: String,

        /// Record model file (JSON)
        #[arg(short, long)]
        model: Option<PathBuf>,
    },

    /// Print the compiled predicate expression
    Explain {
        /// Query text
        query: String,

        /// Record model file (JSON)
        #[arg(short, long)]
        model: PathBuf,
    },

    /// Filter JSON records
    Filter {
        /// Query text
        query: String,

        /// Record model file (JSON)
        #[arg(short, long)]
        model: PathBuf,

        /// Records file (JSON array or NDJSON)
        #[arg(short, long)]
        data: PathBuf,

        /// Property path to order by
        #[arg(long)]
        order_by: Option<String>,

        /// Order descending
        #[arg(long, requires = "order_by")]
        descending: bool,

        /// Number of matching records to skip
        #[arg(long)]
        skip: Option<usize>,

        /// Maximum number of records to return
        #[arg(long)]
        take: Option<usize>,
    },
}

fn run(cli: Cli) -> Result<()> {
    let format = cli.format.as_deref();
    match cli.command {
        Commands::Parse { query } => parse::parse(parse::ParseConfig {
            query,
            output_format: OutputFormat::from_flag(format, OutputFormat::Text)?,
            output_file: cli.output,
        }),

        Commands::Check { query, model } => check::check(check::CheckConfig {
            query,
            model,
            verbose: cli.verbose,
        }),

        Commands::Explain { query, model } => explain::explain(explain::ExplainConfig {
            query,
            model,
            output_format: OutputFormat::from_flag(format, OutputFormat::Text)?,
            output_file: cli.output,
        }),

        Commands::Filter {
            query,
            model,
            data,
            order_by,
            descending,
            skip,
            take,
        } => filter::filter(filter::FilterConfig {
            query,
            model,
            data,
            order_by,
            descending,
            skip,
            take,
            output_format: OutputFormat::from_flag(format, OutputFormat::JsonPretty)?,
            output_file: cli.output,
        }),
    }
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    output::setup_colors(&cli.color);
    logging::init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}
