//! servicetext - preview service text for a message snapshot
//!
//! Reads a JSON snapshot (event, context, referenced message, entities) from
//! a file or stdin and prints the rendered sentence, styled for the terminal
//! or as JSON with its ranges.

use std::env;
use std::io::Read;

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use servicetext::config::Config;
use servicetext::display::{paint, Renderer, TerminalStyles};
use servicetext::paths;
use servicetext::snapshot::Snapshot;

fn main() -> Result<()> {
    let mut json = false;
    let mut input: Option<String> = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "help" | "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "-" => input = None,
            path => input = Some(path.to_string()),
        }
    }

    let config = Config::load(paths::config_path())?;
    init_tracing(&config)?;
    paths::log_paths();

    let source = match &input {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read snapshot from stdin")?;
            buf
        }
    };

    let snapshot = Snapshot::from_json(&source).context("failed to parse snapshot")?;
    debug!(entities = snapshot.entities.len(), "snapshot loaded");

    let catalog = config.catalog()?;
    let rendered = snapshot
        .render_with(|directory| {
            Renderer::new(&catalog, directory)
                .name_order(config.name_order)
                .clock(config.clock)
        })
        .context("failed to render service text")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
        return Ok(());
    }

    match rendered {
        Some(result) => println!("{}", paint(&result, &TerminalStyles::default())),
        None => info!("event renders no service text"),
    }

    Ok(())
}

/// RUST_LOG wins, then the config filter, then `servicetext=info`.
/// Logs go to stderr so stdout carries only the rendered text.
fn init_tracing(config: &Config) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match &config.log_filter {
            Some(directives) => EnvFilter::try_new(directives)
                .with_context(|| format!("invalid log_filter {:?}", directives))?,
            None => EnvFilter::new("warn").add_directive("servicetext=info".parse()?),
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn print_usage() {
    eprintln!(
        r#"servicetext - Preview service text for a message snapshot

Usage:
  servicetext [--json] [<snapshot.json> | -]

Reads the snapshot from stdin when no file is given.

Options:
  --json    Print text and styled ranges as JSON

Environment:
  SERVICETEXT_CONFIG     Override config path
  SERVICETEXT_CATALOG    Override catalog overrides path
  RUST_LOG               Tracing filter

Paths:
  Config:  {config}
  Catalog: {catalog}

Examples:
  servicetext demos/removed.json
  servicetext --json < demos/pinned.json
"#,
        config = paths::config_path().display(),
        catalog = paths::catalog_path().display(),
    );
}
