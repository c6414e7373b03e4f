//! Defines the command-line arguments and subcommands for the hcgen CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "hcgen",
    version,
    about = "Convert Postman collection tests into JetBrains HTTP Client request files."
)]
pub struct HcgenArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert a collection export into an .http request file.
    Convert {
        /// The path to the Postman collection JSON export.
        #[arg(required = true)]
        file: PathBuf,
        /// Write the result here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Prepend the fixed authorization request.
        #[arg(long)]
        auth: bool,
    },
    /// Transpile a single Postman test script file.
    Script {
        /// The path to the test script to convert.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// List the request endpoints found in a collection.
    Endpoints {
        /// The path to the Postman collection JSON export.
        #[arg(required = true)]
        file: PathBuf,
    },
}
