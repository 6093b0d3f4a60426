//! Fittrace CLI - Command-line interface for the workout metrics calculator
//!
//! Commands:
//! - transform: Process sensor packets into summary lines or JSON (batch mode)
//! - sample: Run the built-in reference packet set
//! - validate: Validate sensor packet input
//! - codes: List known workout codes

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use fittrace::pipeline::{reference_packets, FitProcessor};
use fittrace::schema::{SensorPacket, SCHEMA_VERSION};
use fittrace::{CODE_TABLE, FITTRACE_VERSION};

/// Fittrace - Workout metrics calculator for raw sensor packets
#[derive(Parser)]
#[command(name = "fittrace")]
#[command(version = FITTRACE_VERSION)]
#[command(about = "Compute distance, mean speed, and calories from sensor packets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process sensor packets into workout summaries (batch mode)
    Transform {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,
    },

    /// Run the built-in reference packet set and print the summary lines
    Sample,

    /// Validate sensor packet input
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List known workout codes and their sensor value layout
    Codes {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one packet per line)
    Ndjson,
    /// JSON array of packets
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// One summary line per packet
    Text,
    /// Newline-delimited JSON (one batch entry per line)
    Ndjson,
    /// JSON batch summary with producer metadata
    Json,
    /// Pretty-printed JSON batch summary
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), FitCliError> {
    match cli.command {
        Commands::Transform {
            input,
            output,
            input_format,
            output_format,
        } => cmd_transform(&input, &output, input_format, output_format),

        Commands::Sample => cmd_sample(),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Codes { json } => cmd_codes(json),
    }
}

fn cmd_transform(
    input: &PathBuf,
    output: &PathBuf,
    input_format: InputFormat,
    output_format: OutputFormat,
) -> Result<(), FitCliError> {
    let packets = read_packets(input, &input_format)?;

    if packets.is_empty() {
        return Err(FitCliError::NoPackets);
    }

    let processor = FitProcessor::new();

    let output_data = match output_format {
        OutputFormat::Text => {
            let lines = processor.render_lines(&packets)?;
            lines.join("\n") + "\n"
        }
        OutputFormat::Ndjson => {
            let entries = processor.process(&packets)?;
            let mut lines: Vec<String> = Vec::with_capacity(entries.len());
            for entry in &entries {
                lines.push(serde_json::to_string(entry)?);
            }
            lines.join("\n") + "\n"
        }
        OutputFormat::Json => serde_json::to_string(&processor.summarize(&packets)?)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&processor.summarize(&packets)?)?,
    };

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_sample() -> Result<(), FitCliError> {
    let processor = FitProcessor::new();

    for line in processor.render_lines(&reference_packets())? {
        println!("{}", line);
    }

    Ok(())
}

fn cmd_validate(input: &PathBuf, input_format: InputFormat, json: bool) -> Result<(), FitCliError> {
    let packets = read_packets(input, &input_format)?;

    let mut errors: Vec<ValidationErrorDetail> = Vec::new();
    for (index, packet) in packets.iter().enumerate() {
        if let Err(e) = packet.validate() {
            errors.push(ValidationErrorDetail {
                index,
                workout_type: packet.workout_type.clone(),
                error: e.to_string(),
            });
        }
    }

    let report = ValidationReport {
        schema_version: SCHEMA_VERSION.to_string(),
        total_packets: packets.len(),
        valid_packets: packets.len() - errors.len(),
        invalid_packets: errors.len(),
        errors,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Schema:          {}", report.schema_version);
        println!("Total packets:   {}", report.total_packets);
        println!("Valid packets:   {}", report.valid_packets);
        println!("Invalid packets: {}", report.invalid_packets);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!(
                    "  - Packet {} (index {}): {}",
                    err.workout_type, err.index, err.error
                );
            }
        }
    }

    if report.invalid_packets > 0 {
        Err(FitCliError::ValidationFailed(report.invalid_packets))
    } else {
        Ok(())
    }
}

fn cmd_codes(json: bool) -> Result<(), FitCliError> {
    if json {
        let entries: Vec<CodeInfo> = CODE_TABLE
            .iter()
            .map(|entry| CodeInfo {
                code: entry.code,
                kind: entry.kind,
                arity: entry.arity,
                fields: entry.fields,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("Known workout codes:");
        println!();
        for entry in &CODE_TABLE {
            println!(
                "  {} -> {} ({} values: {})",
                entry.code,
                entry.kind,
                entry.arity,
                entry.fields.join(", ")
            );
        }
    }

    Ok(())
}

// Helper functions

fn read_packets(input: &PathBuf, format: &InputFormat) -> Result<Vec<SensorPacket>, FitCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            eprintln!("reading packets from interactive stdin; pipe input or press Ctrl-D to finish");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let packets = match format {
        InputFormat::Ndjson => SensorPacket::parse_ndjson(&input_data)?,
        InputFormat::Json => SensorPacket::parse_array(&input_data)?,
    };

    Ok(packets)
}

// Error types

#[derive(Debug)]
enum FitCliError {
    Io(io::Error),
    Compute(fittrace::ComputeError),
    Json(serde_json::Error),
    NoPackets,
    ValidationFailed(usize),
}

impl From<io::Error> for FitCliError {
    fn from(e: io::Error) -> Self {
        FitCliError::Io(e)
    }
}

impl From<fittrace::ComputeError> for FitCliError {
    fn from(e: fittrace::ComputeError) -> Self {
        FitCliError::Compute(e)
    }
}

impl From<serde_json::Error> for FitCliError {
    fn from(e: serde_json::Error) -> Self {
        FitCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<FitCliError> for CliError {
    fn from(e: FitCliError) -> Self {
        match e {
            FitCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            FitCliError::Compute(e) => CliError {
                code: "COMPUTE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'fittrace codes' for the expected value layout".to_string()),
            },
            FitCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            FitCliError::NoPackets => CliError {
                code: "NO_PACKETS".to_string(),
                message: "No sensor packets found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            FitCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} packets failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    schema_version: String,
    total_packets: usize,
    valid_packets: usize,
    invalid_packets: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    workout_type: String,
    error: String,
}

#[derive(serde::Serialize)]
struct CodeInfo {
    code: &'static str,
    kind: &'static str,
    arity: usize,
    fields: &'static [&'static str],
}
