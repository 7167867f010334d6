use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use footerkit_core::check::{check_record_numbers, check_timestamps};
use footerkit_core::{
    BoardType, DataDomain, FooterConfiguration, FooterError, FooterGeometry, Footers,
    decode_board_footers, resolve, validate_bounds,
};
use glob::glob;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod report;

use report::Report;

#[derive(Parser, Debug)]
#[command(name = "footerkit")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("FOOTERKIT_BUILD_COMMIT"),
    " ",
    env!("FOOTERKIT_BUILD_DATE"),
    ")"
))]
#[command(
    about = "Extract record footers from raw digitizer DMA buffers.",
    long_about = None,
    after_help = "Examples:\n  footerkit buffer decode data.bin --config acq.json -o footers.json\n  footerkit buffer decode data.bin --config acq.json --stdout --pretty\n  footerkit boards"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on raw buffer files.
    Buffer {
        #[command(subcommand)]
        command: BufferCommands,
    },
    /// List known boards with their footer variant and capabilities.
    Boards {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum BufferCommands {
    /// Decode the footers of a buffer file into a JSON report.
    #[command(alias = "parse")]
    #[command(
        after_help = "Examples:\n  footerkit buffer decode data.bin --config acq.json -o footers.json\n  footerkit buffer parse 'captures/*.bin' -c acq.json --stdout"
    )]
    Decode {
        /// Path to a raw buffer file (a glob matching exactly one file is accepted)
        input: PathBuf,

        /// Acquisition configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Number of footers to decode (default: every footer the buffer geometry holds)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Verify record numbers count up from 1 and triggers are this many
        /// ticks apart (5% tolerance)
        #[arg(long, value_name = "TICKS")]
        expect_ticks_per_trigger: Option<u64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let quiet = matches!(
        cli.command,
        Commands::Buffer {
            command: BufferCommands::Decode { quiet: true, .. }
        }
    );
    init_tracing(cli.verbose, quiet);

    let result = match cli.command {
        Commands::Buffer { command } => match command {
            BufferCommands::Decode {
                input,
                config,
                count,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                expect_ticks_per_trigger,
            } => cmd_buffer_decode(DecodeArgs {
                input,
                config,
                count,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                expect_ticks_per_trigger,
            }),
        },
        Commands::Boards { json } => cmd_boards(json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

impl From<FooterError> for CliError {
    fn from(err: FooterError) -> Self {
        let hint = match &err {
            FooterError::Config(_) => "check the acquisition configuration file",
            FooterError::Bounds(_) => {
                "check --count and the record geometry against the buffer size"
            }
            FooterError::UnsupportedVariant { .. } => "check board_type in the configuration",
            FooterError::InvalidArgument(_) => "check the command arguments",
        };
        CliError::new(
            format!("footer decoding failed: {}", err),
            Some(hint.to_string()),
        )
    }
}

struct DecodeArgs {
    input: PathBuf,
    config: PathBuf,
    count: Option<usize>,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    expect_ticks_per_trigger: Option<u64>,
}

fn cmd_buffer_decode(args: DecodeArgs) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;
    let report = if args.stdout {
        None
    } else {
        Some(args.report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    if let Some(report_path) = report.as_ref() {
        let report_abs = report_path
            .parent()
            .map(|parent| {
                if parent.as_os_str().is_empty() {
                    fs::canonicalize(".")
                } else {
                    fs::canonicalize(parent)
                }
            })
            .transpose()
            .with_context(|| format!("Failed to resolve output path: {}", report_path.display()))?;
        if let Some(report_dir) = report_abs {
            let report_target = report_dir.join(
                report_path
                    .file_name()
                    .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?,
            );
            if report_target == input_abs {
                return Err(CliError::new(
                    format!(
                        "report path must differ from input: {}",
                        report_path.display()
                    ),
                    Some("choose a different output path".to_string()),
                ));
            }
        }
    }

    let config = load_configuration(&args.config)?;
    let data = fs::read(&resolved_input)
        .with_context(|| format!("Failed to read input file: {}", resolved_input.display()))?;
    info!(
        input = %resolved_input.display(),
        bytes = data.len(),
        board = %config.board_type,
        "decoding buffer"
    );

    let footer_type = config.board_type.footer_type();
    let geometry = resolve(&config, footer_type).map_err(FooterError::from)?;
    let count = match args.count {
        Some(count) => count,
        None => default_footer_count(&config, &geometry, data.len()),
    };
    debug!(count, "footer count");

    let locations = validate_bounds(&geometry, count, data.len()).map_err(FooterError::from)?;
    let footers = decode_board_footers(&data, &config, count)?;

    if let Some(ticks) = args.expect_ticks_per_trigger {
        check_footers(&footers, ticks)?;
        info!(ticks, "footer consistency checks passed");
    }

    let rep = Report::new(
        &resolved_input.display().to_string(),
        data.len() as u64,
        config,
        locations,
        footers,
    );
    let json = serialize_json(&rep, args.pretty, args.compact)?;

    let Some(report) = report else {
        print!("{}", json);
        return Ok(());
    };

    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    fs::write(&report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;

    if !args.quiet {
        eprintln!(
            "OK: {} footers written -> {}",
            rep.footer_count,
            report.display()
        );
    }
    Ok(())
}

fn load_configuration(path: &PathBuf) -> Result<FooterConfiguration, CliError> {
    let text = fs::read_to_string(path).map_err(|err| {
        CliError::new(
            format!("failed to read configuration {}: {}", path.display(), err),
            Some("pass an existing JSON file with --config".to_string()),
        )
    })?;
    serde_json::from_str(&text).map_err(|err| {
        CliError::new(
            format!("invalid configuration {}: {}", path.display(), err),
            Some(
                "expected board_type, data_domain, active_channel_count, data_layout, \
                 bytes_per_record_per_channel, records_per_buffer_per_channel and optional fifo"
                    .to_string(),
            ),
        )
    })
}

/// Every footer the geometry holds, or for FIFO buffers every footer that
/// fits in the file.
fn default_footer_count(
    config: &FooterConfiguration,
    geometry: &FooterGeometry,
    buffer_length: usize,
) -> usize {
    match geometry.capacity() {
        Some(capacity) => capacity,
        None => {
            let first_end = geometry.first_footer_offset + geometry.footer_size;
            if buffer_length < first_end {
                0
            } else {
                debug!(fifo = config.fifo, "counting footers that fit the buffer");
                (buffer_length - first_end) / geometry.footer_stride + 1
            }
        }
    }
}

fn check_footers(footers: &Footers, ticks_per_trigger: u64) -> Result<(), CliError> {
    check_record_numbers(&footers.record_numbers())
        .and_then(|()| check_timestamps(&footers.trigger_timestamps(), ticks_per_trigger))
        .map_err(|err| {
            CliError::new(
                format!("footer consistency check failed: {}", err),
                Some("verify the configuration matches the acquisition".to_string()),
            )
        })
}

fn serialize_json<T: Serialize>(value: &T, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

#[derive(Serialize)]
struct BoardInfo {
    name: &'static str,
    code: u32,
    footer_type: footerkit_core::FooterType,
    resolution_bits: Option<u8>,
    frequency_domain: bool,
}

fn cmd_boards(json: bool) -> Result<(), CliError> {
    let boards: Vec<BoardInfo> = BoardType::ALL
        .iter()
        .map(|board| BoardInfo {
            name: board.name(),
            code: board.code(),
            footer_type: board.footer_type(),
            resolution_bits: board.resolution_bits(),
            frequency_domain: board.supports_domain(DataDomain::Frequency),
        })
        .collect();

    if json {
        println!("{}", serialize_json(&boards, false, false)?);
        return Ok(());
    }

    println!("{:<10} {:>4}  {:<7} {:>4}  fft", "board", "code", "footer", "bits");
    for board in boards {
        let bits = board
            .resolution_bits
            .map(|bits| bits.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<10} {:>4}  {:<7} {:>4}  {}",
            board.name,
            board.code,
            board.footer_type.name(),
            bits,
            if board.frequency_domain { "yes" } else { "no" }
        );
    }
    Ok(())
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass the path of a raw buffer file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass the path of a raw buffer file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single buffer file, or run once per file".to_string();
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>();
        message.push_str("; matches: ");
        message.push_str(&listed.join(", "));
        if matches.len() > 3 {
            message.push_str(", ...");
        }
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
