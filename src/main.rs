use anyhow::{Context, Result};
use clap::Parser;
use htmlmin::config::Config;
use htmlmin::gate::{parse_override, MinificationGate, ResponseMetadata};
use htmlmin::metrics::MinifyStats;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Instant;

/// htmlmin - minify HTML documents the way the response gate would
#[derive(Parser, Debug)]
#[command(name = "htmlmin")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input document (stdin when omitted)
    input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Request path checked against the exclusion patterns
    #[arg(long, default_value = "/")]
    path: String,

    /// Response status code
    #[arg(long, default_value_t = 200)]
    status: u16,

    /// Response Content-Type header value
    #[arg(long, default_value = "text/html; charset=utf-8")]
    content_type: String,

    /// Per-response override (true/false); other values are ignored
    #[arg(long = "override", value_name = "BOOL")]
    override_value: Option<String>,

    /// Keep HTML comments
    #[arg(short, long)]
    keep_comments: bool,

    /// Minify without consulting the gate
    #[arg(short, long)]
    force: bool,

    /// Test configuration and exit
    #[arg(long)]
    test: bool,

    /// Print minification figures as JSON to stderr
    #[arg(long)]
    stats: bool,
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        eprintln!("htmlmin: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    if args.keep_comments {
        config.minify.keep_comments = Some(true);
    }

    htmlmin::logging::init_subscriber(&config.logging)
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize logging subsystem")?;

    tracing::info!(
        config_file = ?args.config,
        minify_enabled = config.minify.minify_enabled(),
        exclude_patterns = config.minify.exclude_patterns.len(),
        "Configuration loaded successfully"
    );

    let gate = MinificationGate::new(config.minify.clone())?;
    if args.test {
        tracing::info!("Configuration test successful");
        return Ok(());
    }

    let document = read_input(args.input.as_ref())?;

    let started = Instant::now();
    let output = if args.force {
        gate.minifier().minify(&document)
    } else {
        let metadata = ResponseMetadata::new(args.status, args.content_type.as_str())
            .with_optional_override(args.override_value.as_deref().and_then(parse_override));
        gate.process(&metadata, &args.path, &document).into_owned()
    };

    if args.stats {
        let stats = MinifyStats::new(document.len(), output.len(), started.elapsed());
        eprintln!("{}", serde_json::to_string(&stats)?);
    }

    write_output(args.output.as_ref(), &output)
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(output: Option<&PathBuf>, document: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, document)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
