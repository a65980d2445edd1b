//! Career Compass CLI - convert occupation CSVs to nested JSON
//!
//! ```bash
//! career-compass merged.csv -o career_compass_data.json   # Convert
//! career-compass                                          # Ask for both paths
//! career-compass preview merged.csv --rows 2              # Print the first records
//! ```

use std::io::IsTerminal;
use std::path::PathBuf;

use career_compass::logs::{log_error, log_info, log_warning, LogFormat, CONSOLE};
use career_compass::prompt::{resolve_paths, NoPrompt, Prompter, TerminalPrompter};
use career_compass::{
    convert_file, parse_csv_file, render_json, transform_table, ConvertOptions, PipelineError,
    DEFAULT_DELIMITER,
};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "career-compass")]
#[command(about = "Group Category_Name occupation columns into ranked, nested JSON", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    convert: ConvertArgs,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Console log format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input CSV file (asked for when omitted)
    #[arg(env = "CAREER_COMPASS_INPUT")]
    input: Option<PathBuf>,

    /// Output JSON file (asked for when omitted, default: career_compass_data.json)
    #[arg(short, long, env = "CAREER_COMPASS_OUTPUT")]
    output: Option<PathBuf>,

    /// CSV delimiter
    #[arg(short, long, default_value_t = DEFAULT_DELIMITER, env = "CAREER_COMPASS_DELIMITER")]
    delimiter: char,

    /// Never prompt; a missing input cancels, a missing output uses the default
    #[arg(long)]
    no_prompt: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the first converted records to stdout without writing a file
    Preview {
        /// Input CSV file
        input: PathBuf,

        /// Number of records to print
        #[arg(short, long, default_value = "3")]
        rows: usize,

        /// CSV delimiter
        #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
        delimiter: char,
    },
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    CONSOLE.configure(cli.quiet, cli.log_format);

    let result = match cli.command {
        Some(Commands::Preview { input, rows, delimiter }) => cmd_preview(input, rows, delimiter),
        None => cmd_convert(cli.convert),
    };

    match result {
        Ok(()) => {}
        Err(e) if e.is_cancellation() => log_warning(format!("{}. Exiting.", e)),
        Err(e) => {
            log_error(e.to_string());
            std::process::exit(1);
        }
    }
}

fn cmd_convert(args: ConvertArgs) -> Result<(), PipelineError> {
    let interactive = !args.no_prompt && std::io::stdin().is_terminal();
    let mut terminal = TerminalPrompter;
    let mut scripted = NoPrompt;
    let prompter: &mut dyn Prompter = if interactive {
        &mut terminal
    } else {
        &mut scripted
    };

    let paths = resolve_paths(args.input, args.output, prompter)?;

    let options = ConvertOptions::new(paths.input, paths.output).with_delimiter(args.delimiter);
    convert_file(&options)?;

    Ok(())
}

fn cmd_preview(input: PathBuf, rows: usize, delimiter: char) -> Result<(), PipelineError> {
    let table = parse_csv_file(&input, delimiter)?;
    let records = transform_table(&table)?;

    let shown = &records[..rows.min(records.len())];
    println!("{}", render_json(shown)?);
    log_info(format!("Showing {} of {} records", shown.len(), records.len()));

    Ok(())
}
