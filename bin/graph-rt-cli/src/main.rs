// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # graph-rt
//!
//! Command-line driver for the graph compiler and runtime.
//!
//! ## Usage
//! ```bash
//! # Print the built-in demonstration graph
//! graph-rt inspect
//!
//! # Show what the optimizer does to it
//! graph-rt optimize
//!
//! # Compile and execute it on the reference backend
//! graph-rt run --config ./runtime.toml
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "graph-rt",
    about = "Graph compiler and execution substrate for tensor networks",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the demonstration graph: layers, shapes, connectivity.
    Inspect {
        /// Emit a machine-readable JSON summary instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Run the optimizer over the demonstration graph and report every
    /// rewrite and its provenance.
    Optimize,

    /// Compile the demonstration graph and execute it with sample data.
    Run {
        /// Path to a TOML runtime configuration (defaults apply if omitted).
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Inspect { json } => commands::inspect::execute(json),
        Commands::Optimize => commands::optimize::execute(),
        Commands::Run { config } => commands::run::execute(config),
    }
}
