use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use crossdis::listing::{ListingOptions, render_code_info_to, render_to};
use crossdis::{Bytecode, OpcodeTable, table_for_version};
use miette::{IntoDiagnostic, Result};

mod input;

/// crossdis - disassemble bytecode from several runtime versions
#[derive(Parser, Debug)]
#[command(name = "crossdis")]
#[command(about = "Disassemble a code object", long_about = None)]
struct Args {
    /// Code object to disassemble, as TOML
    code: PathBuf,

    /// Use the built-in opcode table for this version
    #[arg(long, default_value = "3.5", conflicts_with = "table")]
    python: String,

    /// Load the opcode table from a file (.toml, otherwise postcard)
    #[arg(long)]
    table: Option<PathBuf>,

    /// Report source lines as if the code started at this line
    #[arg(long)]
    first_line: Option<i64>,

    /// Mark the instruction at this offset with -->
    #[arg(long)]
    current_offset: Option<usize>,

    /// Write the selected opcode table to this file as postcard
    #[arg(long)]
    emit_table: Option<PathBuf>,

    /// Print details of the code object instead of the listing
    #[arg(long)]
    info: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let loaded: OpcodeTable;
    let table = match &args.table {
        Some(path) => {
            loaded = input::load_table(path)?;
            &loaded
        }
        None => table_for_version(&args.python)?,
    };

    if let Some(path) = &args.emit_table {
        input::save_table(table, path)?;
    }

    let code = input::load_code(&args.code)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if args.info {
        render_code_info_to(&code, &mut out)?;
        out.flush().into_diagnostic()?;
        return Ok(());
    }

    let mut bytecode = Bytecode::new(&code, table);
    if let Some(first_line) = args.first_line {
        bytecode = bytecode.with_first_line(first_line);
    }

    let options = ListingOptions {
        current_offset: args.current_offset,
        ..Default::default()
    };

    let rendered = render_to(&bytecode, &options, &mut out);
    // Flush what was listed before reporting a decode error
    out.flush().into_diagnostic()?;
    rendered?;

    Ok(())
}
