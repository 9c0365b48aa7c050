//! `htmlmustache-scan`: print the external-token stream of a template.
//!
//! ```text
//! htmlmustache-scan [--checkpoint] [--fixed-delimiters] [--capacity N] [-v|-vv] [FILE]
//! ```
//!
//! Reads FILE (or stdin), runs the reference grammar host and prints one
//! formatted token per line, followed by parse errors and whatever tags and
//! sections remain open.

use mimalloc::MiMalloc;
use scanner::host::{HostConfig, HostOutput, parse};
use scanner::TokenFmt;
use std::error::Error;
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

struct Args {
    config: HostConfig,
    verbosity: u8,
    path: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, Box<dyn Error>> {
    let mut config = HostConfig::default();
    let mut verbosity = 0;
    let mut path = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--checkpoint" => config.checkpoint = true,
            "--fixed-delimiters" => config.scanner.delimiter_changes = false,
            "--capacity" => {
                let value = args.next().ok_or("--capacity needs a value")?;
                config.scanner.codec_capacity = value.parse()?;
            }
            "-v" => verbosity = 1,
            "-vv" => verbosity = 2,
            "-h" | "--help" => {
                println!(
                    "usage: htmlmustache-scan [--checkpoint] [--fixed-delimiters] [--capacity N] [-v|-vv] [FILE]"
                );
                std::process::exit(0);
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(format!("unknown option '{other}'").into());
            }
            other => {
                if path.replace(other.to_string()).is_some() {
                    return Err("more than one input file".into());
                }
            }
        }
    }
    Ok(Args {
        config,
        verbosity,
        path,
    })
}

/// `-v` shows scanner decisions, `-vv` every token; `RUST_LOG` overrides both.
fn log_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "scanner=warn",
        1 => "scanner=debug",
        _ => "scanner=trace",
    }
}

fn init_logging(verbosity: u8) -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter(verbosity)));
    // The default `tracing-log` feature forwards the scanner's `log` records.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|err| err.to_string())?;
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String, Box<dyn Error>> {
    match path {
        Some(path) if path != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Write the token listing and final state; true when no parse errors were
/// recorded.
fn report(text: &str, output: &HostOutput, out: &mut impl Write) -> Result<bool, Box<dyn Error>> {
    for line in TokenFmt::new(text).format_tokens(&output.tokens)? {
        writeln!(out, "{line}")?;
    }
    for error in &output.errors {
        writeln!(out, "# error: {error}")?;
    }
    if !output.open_tags.is_empty() {
        let names: Vec<&str> = output.open_tags.iter().map(tags::Tag::name).collect();
        writeln!(out, "# open-tags: {}", names.join(" "))?;
    }
    if !output.open_sections.is_empty() {
        let names: Vec<&str> = output.open_sections.iter().map(|s| s.name()).collect();
        writeln!(out, "# open-sections: {}", names.join(" "))?;
    }
    Ok(output.errors.is_empty())
}

fn run() -> Result<bool, Box<dyn Error>> {
    let args = parse_args(std::env::args().skip(1))?;
    init_logging(args.verbosity)?;

    let text = read_input(args.path.as_deref())?;
    let output = parse(&text, args.config);
    report(&text, &output, &mut io::stdout().lock())
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("htmlmustache-scan: {err}");
            std::process::exit(2);
        }
    }
}
