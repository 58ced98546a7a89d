use clap::Parser;
use colored::Colorize;
use log::debug;
use std::path::PathBuf;
use std::process::ExitCode;
use utilbox::report::{self, OutputFormat};
use utilbox::{
    DEFAULT_TIME_FORMAT, MetadataOptions, ScanOptions, SizeUnit, TimeFormat, get_dir_contents_with,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory whose direct children are listed
    source_dir: PathBuf,

    /// Only list entries whose name matches this regex (unanchored)
    #[arg(long, short = 'p')]
    pattern: Option<String>,

    /// Report size, modification time and paths for each entry
    #[arg(long, short = 'm')]
    meta: bool,

    /// Size unit for metadata: b, k, m or g (anything else reports raw bytes)
    #[arg(long, short = 'u', default_value = "k")]
    size_unit: String,

    /// strftime pattern for modification times
    #[arg(long, short = 't', default_value = DEFAULT_TIME_FORMAT)]
    time_format: String,

    /// Render as a table
    #[arg(long, conflicts_with = "json")]
    table: bool,

    /// Render as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!(
                "{} {} is not a valid directory",
                "Error:".red(),
                args.source_dir.display()
            );
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            ExitCode::from(2)
        }
    }
}

/// Returns `Ok(false)` when the source directory is not valid.
fn run(args: &Args) -> Result<bool, Box<dyn std::error::Error>> {
    let options = ScanOptions {
        filter_pattern: args.pattern.clone(),
        meta_data: args.meta,
        metadata: MetadataOptions {
            size_unit: SizeUnit::from_code(&args.size_unit),
            time_format: TimeFormat::new(args.time_format.as_str())?,
        },
    };
    debug!("Scanning {} with {options:?}", args.source_dir.display());

    let Some(contents) = get_dir_contents_with(&args.source_dir, &options)? else {
        return Ok(false);
    };
    debug!("{} entries listed", contents.len());

    let format = if args.json {
        OutputFormat::Json
    } else if args.table {
        OutputFormat::Table
    } else {
        OutputFormat::Plain
    };

    let rendered = report::render(&contents, format)?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(true)
}
