//! OpenAPI Splitter CLI
//!
//! Splits an OpenAPI document into one document per resource.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use openapi_split::{
    split_document, write_all, Document, OutputFormat, SplitOptions, DEFAULT_ALWAYS_INCLUDE,
    DEFAULT_INPUT, DEFAULT_OUTPUT_DIR, DEFAULT_PATH_PREFIX,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "openapi-split")]
#[command(about = "Split an OpenAPI document into per-resource documents")]
#[command(version)]
struct Cli {
    /// Source OpenAPI document (YAML or JSON)
    #[arg(long, short, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Directory receiving one file per resource (created if missing)
    #[arg(long, short, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Route prefix preceding the resource segment
    #[arg(long, default_value = DEFAULT_PATH_PREFIX)]
    prefix: String,

    /// Schema always carried into every resource when defined (repeatable)
    #[arg(
        long = "always-include",
        value_name = "NAME",
        default_values_t = DEFAULT_ALWAYS_INCLUDE.iter().map(|name| name.to_string()).collect::<Vec<_>>()
    )]
    always_include: Vec<String>,

    /// Carry no schemas beyond those the routes reference
    #[arg(long, conflicts_with = "always_include")]
    no_always_include: bool,

    /// Output format: yaml (default) or json
    #[arg(long, default_value = "yaml", value_parser = parse_format)]
    format: OutputFormat,

    /// Fail when a route or schema references an undefined schema
    #[arg(long)]
    strict: bool,

    /// Print a JSON summary of the run (for automation)
    #[arg(long)]
    json: bool,

    /// Only log warnings and errors
    #[arg(long, short)]
    quiet: bool,
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    OutputFormat::parse(s).ok_or_else(|| format!("unknown format '{}': expected yaml or json", s))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_tracing(quiet: bool) {
    let default_filter = if quiet {
        "openapi_split=warn"
    } else {
        "openapi_split=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .init();
}

fn run(cli: Cli) -> Result<(), u8> {
    tracing::info!(input = %cli.input.display(), "loading OpenAPI document");
    let document = Document::load(&cli.input).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let always_include = if cli.no_always_include {
        Vec::new()
    } else {
        cli.always_include
    };

    let options = SplitOptions::new()
        .path_prefix(cli.prefix)
        .always_include(always_include)
        .strict(cli.strict);

    let (grouping, resources) = split_document(&document, &options).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    if grouping.is_empty() {
        if cli.json {
            let summary = serde_json::json!({
                "written": [],
                "skipped": &grouping.skipped,
            });
            println!("{}", summary);
        } else {
            println!(
                "No resources found matching the '{}<resource>' pattern. No files will be generated.",
                options.path_prefix
            );
        }
        return Ok(());
    }

    let report = write_all(&cli.output, &resources, cli.format);

    if cli.json {
        let summary = serde_json::json!({
            "output": &cli.output,
            "written": &report.written,
            "skipped": &grouping.skipped,
            "failures": &report.failures,
        });
        match serde_json::to_string_pretty(&summary) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error serializing summary: {}", e);
                return Err(2);
            }
        }
    } else {
        for failure in &report.failures {
            eprintln!("Error: {}: {}", failure.resource, failure.message);
        }
        println!(
            "Split {} resources into '{}' ({} written, {} failed, {} paths skipped)",
            resources.len(),
            cli.output.display(),
            report.written.len(),
            report.failures.len(),
            grouping.skipped.len()
        );
    }

    if report.is_ok() {
        Ok(())
    } else {
        Err(1)
    }
}
