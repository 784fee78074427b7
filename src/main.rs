//! Entry point for the `datalab` binary.
//! Parses CLI arguments, sets up logging, and dispatches to the analysis functions.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use datalab::analysis::{analyze_csv_with, analyze_json_with, load_options, run};
use datalab::files::{directory_size, find_files_by_pattern, list_directory_contents};
use datalab::report::Reporter;
use datalab::types::StatsResult;
use datalab::{Config, DataLabError};

/// Analyze the bundled people dataset.
#[derive(Parser, Debug)]
#[command(name = "datalab", version, about = "Data analysis over a small CSV/JSON people dataset")]
struct Args {
    /// Data directory (defaults to $DATALAB_DATA_DIR, then the bundled data/ directory)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Append one line per file load to this journal file
    #[arg(long, global = true, value_name = "FILE")]
    load_log: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze the JSON and CSV files and print both reports (default)
    Run,
    /// Analyze a CSV file from the data directory
    Csv {
        /// File name inside the data directory
        #[arg(long)]
        file: Option<String>,
        /// Print the result as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Analyze a JSON file from the data directory
    Json {
        /// File name inside the data directory
        #[arg(long)]
        file: Option<String>,
        /// Print the result as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration
    Config,
    /// List the data directory
    Files {
        /// Only show files matching this glob (e.g. "*.csv")
        #[arg(long)]
        pattern: Option<String>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match dispatch(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn dispatch(args: Args) -> Result<(), DataLabError> {
    let mut config = Config::from_env();
    if let Some(dir) = args.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(path) = args.load_log {
        config = config.with_load_log(path);
    }
    let load = load_options(&config)?;
    let mut reporter = Reporter::stdout(&config);

    match args.command.unwrap_or(Command::Run) {
        Command::Run => run(&config, &load, &mut reporter),
        Command::Csv { file, json } => {
            if let Some(file) = file {
                config.csv_file = file;
            }
            let stats = analyze_csv_with(&config, &load)?;
            emit(&mut reporter, &config.csv_file, &stats, json)
        }
        Command::Json { file, json } => {
            if let Some(file) = file {
                config.json_file = file;
            }
            let stats = analyze_json_with(&config, &load)?;
            emit(&mut reporter, &config.json_file, &stats, json)
        }
        Command::Config => {
            println!("{}", config.describe());
            Ok(())
        }
        Command::Files { pattern } => list_files(&config, pattern.as_deref()),
    }
}

fn emit(
    reporter: &mut Reporter<std::io::Stdout>,
    file: &str,
    stats: &StatsResult,
    as_json: bool,
) -> Result<(), DataLabError> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(stats)?);
    } else {
        reporter.print_report(file, stats)?;
    }
    Ok(())
}

fn list_files(config: &Config, pattern: Option<&str>) -> Result<(), DataLabError> {
    let dir = &config.data_dir;
    println!("Data directory: {}", dir.display());

    match pattern {
        Some(pattern) => {
            for path in find_files_by_pattern(pattern, dir)? {
                println!("  {}", path.display());
            }
        }
        None => {
            let listing = list_directory_contents(dir)?;
            println!("Files: {:?}", listing.files);
            println!("Directories: {:?}", listing.directories);
        }
    }

    println!("Size: {:.2} KB", directory_size(dir) as f64 / 1024.0);
    Ok(())
}
