//! pqwire - PostgreSQL wire-format inspector
//!
//! Encodes and decodes the fixed-width scalars used by the PostgreSQL binary
//! protocol, and shows how errno failures surface as chained ADBC errors.

mod codec;
mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::codec::WireType;
use crate::commands::{print_report, OutputOptions, SwapWidth};
use crate::config::ToolConfig;

#[derive(Parser)]
#[command(name = "pqwire")]
#[command(about = "PostgreSQL wire-format scalar inspector")]
#[command(long_about = "PostgreSQL wire-format scalar inspector

Examples:
  pqwire encode int4 16909060          # -> 01020304
  pqwire decode float8 3FF0000000000000
  pqwire decode int2 'ff 00 2a' --offset 1
  pqwire swap 64 0x0102030405060708
  pqwire errno 32                      # chained error for EPIPE")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true, env = "PQWIRE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a value into network byte order
    Encode {
        #[arg(value_enum)]
        r#type: WireType,

        #[arg(allow_negative_numbers = true)]
        value: String,
    },

    /// Decode a network-order value from hex bytes
    Decode {
        #[arg(value_enum)]
        r#type: WireType,

        /// Hex bytes; `0x` prefix, spaces and colons are ignored
        hex: String,

        /// Byte offset of the value inside the input
        #[arg(short, long, default_value_t = 0)]
        offset: usize,
    },

    /// Show the host-to-network swap of an integer
    Swap {
        #[arg(value_enum)]
        width: SwapWidth,

        /// Decimal or 0x-prefixed hex
        value: String,
    },

    /// Simulate a failing system call and print the resulting error chain
    Errno {
        #[arg(allow_negative_numbers = true)]
        code: i32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = ToolConfig::load(cli.config.as_deref())?;
    pq_common::logging::init_with_config(&config.logging)?;
    if cli.verbose {
        pq_common::logging::set_log_level("debug")?;
    }

    let opts = OutputOptions {
        json: cli.json || config.output.json,
        uppercase_hex: config.output.uppercase_hex,
    };

    match cli.command {
        Commands::Encode { r#type, value } => {
            print_report(&commands::encode(r#type, &value, opts)?, opts)
        },
        Commands::Decode {
            r#type,
            hex,
            offset,
        } => print_report(&commands::decode(r#type, &hex, offset)?, opts),
        Commands::Swap { width, value } => print_report(&commands::swap(width, &value)?, opts),
        Commands::Errno { code } => print_report(&commands::simulate_errno(code), opts),
    }
}
