mod error;
mod output;
mod schema_file;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use optbind_core::{DEFAULT_PROGRAM_NAME, HelpOptions, Parsed, Schema};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, Result};
use crate::output::{OutputFormat, SchemaSummary, format_options, format_summary};
use crate::schema_file::SchemaFile;

#[derive(Debug, Parser)]
#[command(name = "optbind")]
#[command(about = "Parse argument vectors against declared option schemas")]
#[command(version, disable_help_subcommand = true)]
struct Cli {
    /// Emit debug logging on stderr.
    #[arg(long, global = true)]
    log: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse arguments after `--` and print the bound options.
    Parse(ParseArgs),
    /// Print the usage text generated from a schema.
    Help(HelpArgs),
    /// Validate a schema file and summarize its options.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Schema declaration file (YAML or JSON).
    #[arg(long)]
    schema: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,
    /// Program name used in the usage line.
    #[arg(long, default_value = DEFAULT_PROGRAM_NAME)]
    program: String,
    /// Arguments to parse.
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct HelpArgs {
    /// Schema declaration file (YAML or JSON).
    #[arg(long)]
    schema: PathBuf,
    /// Program name used in the usage line.
    #[arg(long, default_value = DEFAULT_PROGRAM_NAME)]
    program: String,
    /// Wrap help text at this many columns.
    #[arg(long)]
    wrap: Option<usize>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Schema declaration file (YAML or JSON).
    #[arg(long)]
    schema: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
    /// Also write the normalized declaration here (JSON for `.json`, else YAML).
    #[arg(long)]
    write: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Help(args) => run_help(args),
        Command::Check(args) => run_check(args),
    };

    match result {
        Ok(()) => {}
        Err(CliError::Parse(err)) => {
            eprint!("{err}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_schema(path: &Path) -> Result<Schema> {
    debug!(path = %path.display(), "Loading schema");
    SchemaFile::load(path)?.into_schema()
}

fn run_parse(args: ParseArgs) -> Result<()> {
    let schema = load_schema(&args.schema)?;
    let argv = std::iter::once(args.program).chain(args.args);

    match schema.parse(argv)? {
        Parsed::Help(text) => print!("{text}"),
        Parsed::Options(options) => {
            let out = format_options(&options, args.format).map_err(CliError::Output)?;
            print_block(&out);
        }
    }
    Ok(())
}

fn run_help(args: HelpArgs) -> Result<()> {
    let schema = load_schema(&args.schema)?;
    let options = HelpOptions {
        wrap_width: args.wrap,
    };
    print!("{}", schema.help_with(&args.program, &options));
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<()> {
    let file = SchemaFile::load(&args.schema)?;
    let schema = file.clone().into_schema()?;
    if let Some(path) = &args.write {
        file.save(path)?;
        debug!(path = %path.display(), "Wrote normalized schema");
    }
    let summary = SchemaSummary::from_schema(&schema);
    let out = format_summary(&summary, args.format).map_err(CliError::Output)?;
    print_block(&out);
    Ok(())
}

fn print_block(text: &str) {
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}
