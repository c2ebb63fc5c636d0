use clap::{ArgGroup, Parser, Subcommand};
use placeclip::clipboard::{ClipboardSink, StdoutSink, SystemClipboard};
use placeclip::logger::{initialize_logger, LogTarget};
use placeclip::nominatim::{NominatimConfig, NominatimProvider, DEFAULT_ENDPOINT};
use placeclip::pipeline::PipelineConfig;
use placeclip::{copy_search_results, tui, PlaceClipError, RowPick};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[command(subcommand)]
    cmd: SubCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum SubCommands {
    /// Interactive search screen
    Browse(BrowseArgs),
    /// Search once and copy the picked results
    Copy(CopyArgs),
}

#[derive(Parser, Debug, Clone)]
struct SearchArgs {
    #[arg(long, env = "PLACECLIP_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    #[arg(short = 'n', long, default_value_t = 20)]
    limit: usize,
    #[arg(long, default_value_t = 10, help = "HTTP timeout in seconds")]
    timeout_secs: u64,
}

#[derive(Parser, Debug, Clone)]
struct BrowseArgs {
    #[command(flatten)]
    search: SearchArgs,
    #[arg(short = 'd', long, default_value_t = 250)]
    debounce_ms: u64,
    #[arg(long, help = "Write logs to this file while the screen is open")]
    log_file: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
#[command(group(ArgGroup::new("rows").required(true).args(["pick", "all"])))]
struct CopyArgs {
    #[arg(required = true)]
    query: String,
    #[command(flatten)]
    search: SearchArgs,
    #[arg(short = 'p', long, value_delimiter = ',', help = "1-based rows to copy, e.g. 1,3")]
    pick: Vec<usize>,
    #[arg(short = 'a', long, help = "Copy every result")]
    all: bool,
    #[arg(long, help = "Print the table instead of copying it")]
    print: bool,
}

fn provider_config(args: &SearchArgs) -> NominatimConfig {
    NominatimConfig {
        endpoint: args.endpoint.clone(),
        limit: args.limit,
        timeout: Duration::from_secs(args.timeout_secs),
        ..NominatimConfig::default()
    }
}

async fn browse(args: BrowseArgs) -> Result<(), PlaceClipError> {
    let target = match args.log_file {
        Some(path) => LogTarget::File(path),
        None => LogTarget::Disabled,
    };
    initialize_logger(target)?;

    let provider = Arc::new(NominatimProvider::new(provider_config(&args.search))?);
    let config = PipelineConfig {
        debounce: Duration::from_millis(args.debounce_ms),
    };
    tui::run(provider, config).await
}

async fn copy(args: CopyArgs) -> Result<(), PlaceClipError> {
    initialize_logger(LogTarget::Stderr)?;

    let provider = Arc::new(NominatimProvider::new(provider_config(&args.search))?);
    let pick = if args.all {
        RowPick::All
    } else {
        RowPick::Rows(args.pick)
    };
    let mut sink: Box<dyn ClipboardSink> = if args.print {
        Box::new(StdoutSink)
    } else {
        Box::new(SystemClipboard::new()?)
    };

    let rows = copy_search_results(provider, &args.query, pick, sink.as_mut()).await?;
    if !args.print {
        info!("{} places copied to clipboard.", rows);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli_args = CliArgs::parse();

    let result = match cli_args.cmd {
        SubCommands::Browse(args) => browse(args).await,
        SubCommands::Copy(args) => copy(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
