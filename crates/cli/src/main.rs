// Dotdash - Morse Stream Encoder
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotdash_config::{EncodeJob, OutputKind};
use dotdash_core::sink::LimitedSink;
use dotdash_core::{symbol, Encoded};
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

mod output;

use output::OutputSink;

const EXIT_PASS: u8 = 0;
const EXIT_INVALID_INPUT: u8 = 1;
const EXIT_CONFIG_ERROR: u8 = 2;
const EXIT_RUNTIME_ERROR: u8 = 3;

const SUMMARY_SCHEMA_VERSION: &str = "1.0";

#[derive(Parser, Debug)]
#[command(author, version, about = "Dotdash Morse Encoder", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode text as Morse marks.
    Encode(EncodeArgs),

    /// Turn Morse marks produced by `encode` back into text.
    Decode(DecodeArgs),

    /// Print the character table.
    Table,
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Text to encode
    #[arg(long, conflicts_with_all = ["input", "job"])]
    text: Option<String>,

    /// Read text from a file (stdin when neither --text nor --input is given)
    #[arg(short, long, conflicts_with = "job")]
    input: Option<PathBuf>,

    /// Path to an encode job (YAML)
    #[arg(short, long)]
    job: Option<PathBuf>,

    /// Write Morse to this file instead of stdout (overrides the job)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Refuse output past this size, e.g. 512 or 4KB (overrides the job)
    #[arg(long)]
    max_output_bytes: Option<String>,

    /// Print a JSON summary line when done
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct DecodeArgs {
    /// Morse marks to decode
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// Read marks from a file (stdin when neither --text nor --input is given)
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[derive(Debug)]
enum Source {
    Text(String),
    File(PathBuf),
    Stdin,
}

impl Source {
    fn from_args(text: Option<&String>, input: Option<&PathBuf>) -> Self {
        match (text, input) {
            (Some(text), _) => Source::Text(text.clone()),
            (None, Some(path)) => Source::File(path.clone()),
            (None, None) => Source::Stdin,
        }
    }

    fn read(&self) -> anyhow::Result<Vec<u8>> {
        match self {
            Source::Text(text) => Ok(text.as_bytes().to_vec()),
            Source::File(path) => {
                std::fs::read(path).with_context(|| format!("Failed to read input {:?}", path))
            }
            Source::Stdin => {
                let mut buf = Vec::new();
                io::stdin()
                    .lock()
                    .read_to_end(&mut buf)
                    .context("Failed to read stdin")?;
                Ok(buf)
            }
        }
    }
}

#[derive(Debug)]
struct EncodePlan {
    source: Source,
    output: OutputKind,
    output_path: Option<PathBuf>,
    max_output_bytes: Option<u64>,
    echo: bool,
}

fn plan_encode(args: &EncodeArgs) -> anyhow::Result<EncodePlan> {
    let mut plan = match &args.job {
        Some(job_path) => {
            info!("Loading encode job: {:?}", job_path);
            let job = EncodeJob::from_file(job_path)?;
            let job_dir = job_path.parent().unwrap_or_else(|| Path::new("."));
            let source = match (&job.input.text, job.input_path(job_dir)) {
                (Some(text), _) => Source::Text(text.clone()),
                (None, Some(path)) => Source::File(path),
                (None, None) => Source::Stdin,
            };
            EncodePlan {
                source,
                output: job.output.kind,
                output_path: job.output_path(job_dir),
                max_output_bytes: job.limits.max_output_bytes()?,
                echo: job.echo,
            }
        }
        None => EncodePlan {
            source: Source::from_args(args.text.as_ref(), args.input.as_ref()),
            output: OutputKind::Stdout,
            output_path: None,
            max_output_bytes: None,
            echo: true,
        },
    };

    if let Some(path) = &args.output {
        plan.output = OutputKind::File;
        plan.output_path = Some(path.clone());
    }

    if let Some(limit) = &args.max_output_bytes {
        let bytes = dotdash_config::parse_size(limit)
            .with_context(|| format!("Invalid --max-output-bytes '{}'", limit))?;
        if bytes == 0 {
            anyhow::bail!("--max-output-bytes must be greater than zero");
        }
        plan.max_output_bytes = Some(bytes);
    }

    Ok(plan)
}

#[derive(Debug, Serialize)]
struct EncodeSummary {
    summary_schema_version: String,
    status: String,
    input_bytes: usize,
    consumed: usize,
    emitted: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    captured: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // stdout carries the Morse stream, so logs go to stderr.
    let level = if cli.trace {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Encode(args) => run_encode(args),
        Commands::Decode(args) => run_decode(args),
        Commands::Table => run_table(),
    }
}

fn run_encode(args: EncodeArgs) -> ExitCode {
    let plan = match plan_encode(&args) {
        Ok(plan) => plan,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let input = match plan.source.read() {
        Ok(input) => input,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let mut sink = match OutputSink::open(plan.output, plan.output_path.as_deref(), plan.echo) {
        Ok(sink) => sink,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    info!(
        "Encoding {} bytes from {:?} to {:?}",
        input.len(),
        plan.source,
        plan.output
    );

    let result = match plan.max_output_bytes {
        Some(limit) => dotdash_core::encode(&input, &mut LimitedSink::new(&mut sink, limit)),
        None => dotdash_core::encode(&input, &mut sink),
    };

    if let Err(e) = sink.finish() {
        error!("Failed to flush output: {}", e);
        return ExitCode::from(EXIT_RUNTIME_ERROR);
    }
    let captured = sink
        .captured()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned());
    drop(sink);

    let (progress, message, code) = match result {
        Ok(done) => {
            info!(
                "Encoding finished: consumed={} emitted={}",
                done.consumed, done.emitted
            );
            (done, None, EXIT_PASS)
        }
        Err(e) => {
            let progress: Encoded = e.progress();
            let message = format!("{:#}", anyhow::Error::from(e));
            error!("{}", message);
            (progress, Some(message), EXIT_RUNTIME_ERROR)
        }
    };

    if args.json {
        let summary = EncodeSummary {
            summary_schema_version: SUMMARY_SCHEMA_VERSION.to_string(),
            status: if code == EXIT_PASS {
                "finished".to_string()
            } else {
                "sink_error".to_string()
            },
            input_bytes: input.len(),
            consumed: progress.consumed,
            emitted: progress.emitted,
            max_output_bytes: plan.max_output_bytes,
            captured,
            message,
        };
        match serde_json::to_string(&summary) {
            Ok(line) => println!("{}", line),
            Err(e) => error!("Failed to serialize summary: {}", e),
        }
    }

    ExitCode::from(code)
}

fn run_decode(args: DecodeArgs) -> ExitCode {
    let source = Source::from_args(args.text.as_ref(), args.input.as_ref());
    let raw = match source.read() {
        Ok(raw) => raw,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let text = match String::from_utf8(raw) {
        Ok(text) => text,
        Err(e) => {
            error!("Input is not valid UTF-8: {}", e);
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    };

    match dotdash_core::decode(text.trim_end_matches(|c: char| c == '\n' || c == '\r')) {
        Ok(decoded) => {
            println!("{}", decoded);
            ExitCode::from(EXIT_PASS)
        }
        Err(e) => {
            error!("Failed to decode: {}", e);
            ExitCode::from(EXIT_INVALID_INPUT)
        }
    }
}

fn run_table() -> ExitCode {
    let mut out = io::stdout().lock();
    for (character, symbol) in symbol::entries() {
        let marks: String = symbol.marks().map(|m| char::from(m.as_byte())).collect();
        if let Err(e) = writeln!(out, "{} {}", char::from(character), marks) {
            error!("Failed to write table: {}", e);
            return ExitCode::from(EXIT_RUNTIME_ERROR);
        }
    }
    ExitCode::from(EXIT_PASS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> EncodeArgs {
        let mut full = vec!["dotdash", "encode"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Encode(args) => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_plan_defaults_to_stdin_and_stdout() {
        let plan = plan_encode(&args(&[])).unwrap();
        assert!(matches!(plan.source, Source::Stdin));
        assert_eq!(plan.output, OutputKind::Stdout);
        assert_eq!(plan.max_output_bytes, None);
    }

    #[test]
    fn test_plan_output_flag_selects_file() {
        let plan = plan_encode(&args(&["--text", "SOS", "-o", "out.txt"])).unwrap();
        assert!(matches!(plan.source, Source::Text(ref t) if t == "SOS"));
        assert_eq!(plan.output, OutputKind::File);
        assert_eq!(plan.output_path, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn test_plan_rejects_zero_limit() {
        let err = plan_encode(&args(&["--text", "E", "--max-output-bytes", "0"])).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_text_conflicts_with_input() {
        let parsed = Cli::try_parse_from(["dotdash", "encode", "--text", "E", "-i", "x.txt"]);
        assert!(parsed.is_err());
    }
}
