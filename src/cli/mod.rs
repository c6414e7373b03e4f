//! The hcgen command-line interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::path::Path;
use std::{fs, process};

use clap::Parser;

use crate::cli::args::{Command, HcgenArgs};
use crate::collection::find_endpoints;
use crate::error::HcgenError;
use crate::render::{render_collection, RenderOptions};
use crate::transpile::convert_script;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = HcgenArgs::parse();

    let result = match args.command {
        Command::Convert { file, output, auth } => handle_convert(&file, output.as_deref(), auth),
        Command::Script { file } => handle_script(&file),
        Command::Endpoints { file } => handle_endpoints(&file),
    };

    if let Err(e) = result {
        eprintln!("{:?}", miette::Report::new(e));
        process::exit(1);
    }
}

/// Handles the `convert` subcommand.
fn handle_convert(path: &Path, dest: Option<&Path>, auth: bool) -> Result<(), HcgenError> {
    let document = read_collection(path)?;
    let endpoints = find_endpoints(&document)?;
    let rendered = render_collection(&endpoints, &RenderOptions { auth_preamble: auth });
    output::print_warnings(&rendered.warnings);

    match dest {
        Some(dest) => fs::write(dest, &rendered.text).map_err(|source| HcgenError::Io {
            path: dest.display().to_string(),
            source,
        })?,
        None => print!("{}", rendered.text),
    }
    Ok(())
}

/// Handles the `script` subcommand.
fn handle_script(path: &Path) -> Result<(), HcgenError> {
    let source = read_file(path)?;
    let converted = convert_script(&source);
    output::print_warnings(&converted.warnings);
    print!("{}", converted.script);
    Ok(())
}

/// Handles the `endpoints` subcommand.
fn handle_endpoints(path: &Path) -> Result<(), HcgenError> {
    let document = read_collection(path)?;
    let endpoints = find_endpoints(&document)?;
    output::print_endpoints(&endpoints);
    Ok(())
}

fn read_collection(path: &Path) -> Result<serde_json::Value, HcgenError> {
    let text = read_file(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn read_file(path: &Path) -> Result<String, HcgenError> {
    fs::read_to_string(path).map_err(|source| HcgenError::Io {
        path: path.display().to_string(),
        source,
    })
}
