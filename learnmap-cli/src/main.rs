//! Command-line interface for learnmap
//! Fetches a Quip document and prints it as a learning map in YAML.
//!
//! Usage:
//!   learnmap `<document-id>`
//!
//! Environment:
//!   QUIP_TOKEN        access token (otherwise read from ~/.quiprc)
//!   LEARNMAP_CONFIG   TOML file layered over the built-in defaults
//!   RUST_LOG          log filter, logs go to stderr

mod credentials;
mod fetch;

use anyhow::{Context, Result};
use clap::{Arg, Command};
use learnmap_config::LearnmapConfig;
use std::path::PathBuf;

const CONFIG_ENV: &str = "LEARNMAP_CONFIG";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = Command::new("learnmap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert a Quip document into a learning map YAML file")
        .arg(
            Arg::new("document-id")
                .help("ID of the Quip document (the part of the URL after the host)")
                .required(true)
                .index(1),
        )
        .get_matches();

    let document_id = matches
        .get_one::<String>("document-id")
        .expect("document-id is required");

    if let Err(err) = run(document_id) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(document_id: &str) -> Result<()> {
    let config = load_config()?;
    let token = credentials::resolve_token(&config.quip)?;

    let html = fetch::QuipClient::new(&config.quip, token)
        .fetch_html(document_id)
        .with_context(|| format!("could not fetch document {}", document_id))?;

    let yaml = learnmap_parser::html_to_yaml(&html)
        .with_context(|| format!("could not convert document {}", document_id))?;

    print!("{}", yaml);
    Ok(())
}

fn load_config() -> Result<LearnmapConfig> {
    let user_file = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    learnmap_config::load(user_file.as_deref())
        .with_context(|| format!("invalid configuration (check {})", CONFIG_ENV))
}
