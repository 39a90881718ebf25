//! servicetext-catalog - inspect and check locale catalogs
//!
//! Usage:
//!   servicetext-catalog check <catalog.toml>
//!   servicetext-catalog keys
//!   servicetext-catalog show <key> [args...]

use anyhow::{bail, Context, Result};
use std::env;

use servicetext::config::Config;
use servicetext::paths;
use servicetext::template::{Catalog, TemplateKey, TemplateProvider};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "check" => cmd_check(&args[2..])?,
        "keys" => cmd_keys(),
        "show" => cmd_show(&args[2..])?,
        "help" | "--help" | "-h" => print_usage(),
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_usage() {
    eprintln!(
        r#"servicetext-catalog - Inspect and check service text catalogs

Usage:
  servicetext-catalog check <catalog.toml>
  servicetext-catalog keys
  servicetext-catalog show <key> [args...]

`check` parses a standalone catalog and lists keys it lacks.
`show` fills one template from the configured catalog.

Environment:
  SERVICETEXT_CONFIG     Override config path
  SERVICETEXT_CATALOG    Override catalog overrides path

Paths:
  Config:  {config}
  Catalog: {catalog}

Examples:
  servicetext-catalog check locales/de.toml
  servicetext-catalog show Notification.Kicked Ada Bob
"#,
        config = paths::config_path().display(),
        catalog = paths::catalog_path().display(),
    );
}

fn cmd_check(args: &[String]) -> Result<()> {
    let Some(path) = args.first() else {
        bail!("usage: servicetext-catalog check <catalog.toml>");
    };

    let catalog = Catalog::load(path)?;
    match catalog.ensure_complete() {
        Ok(()) => {
            println!("{}: {} templates, complete", path, catalog.len());
            Ok(())
        }
        Err(e) => {
            println!("{}: {} templates", path, catalog.len());
            Err(e).with_context(|| format!("{} is incomplete", path))
        }
    }
}

fn cmd_keys() {
    for key in TemplateKey::ALL {
        println!("{}", key);
    }
}

fn cmd_show(args: &[String]) -> Result<()> {
    let Some((name, rest)) = args.split_first() else {
        bail!("usage: servicetext-catalog show <key> [args...]");
    };

    let key = TemplateKey::ALL
        .iter()
        .copied()
        .find(|k| k.as_str() == name)
        .with_context(|| format!("unknown template key: {}", name))?;

    let config = Config::load(paths::config_path())?;
    let catalog = config.catalog()?;

    let values: Vec<&str> = rest.iter().map(String::as_str).collect();
    let filled = catalog.lookup(key, &values)?;

    println!("{}", filled.text);
    for arg in &filled.ranges {
        println!("  arg {} at {:?}", arg.index, arg.range);
    }

    Ok(())
}
