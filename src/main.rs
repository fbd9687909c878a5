//! gridload CLI - Transform DNS/DHCP change requests to canonical JSON
//!
//! # Main Commands
//!
//! ```bash
//! gridload transform a_record_batch.csv      # Full pipeline, kind auto-detected
//! gridload transform changes.xlsx --kind network
//! gridload kinds                             # Show the kind catalog
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! gridload parse input.csv                   # Dump normalized rows as JSON
//! gridload detect aaaa_record_batch.csv      # Show which kind a name resolves to
//! ```

use clap::{Parser, Subcommand};
use gridload::{batch, catalog, reader};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gridload")]
#[command(about = "Transform DNS/DHCP change requests to canonical provisioning JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full pipeline: input file → per-kind JSON artifact
    Transform {
        /// Input CSV or spreadsheet file
        input: PathBuf,

        /// Record kind (auto-detected from the file name if not given)
        #[arg(short, long)]
        kind: Option<String>,

        /// Output directory for the per-kind artifact
        #[arg(short, long, default_value = "out")]
        out_dir: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,
    },

    /// Parse an input file and dump normalized rows as JSON
    Parse {
        /// Input CSV or spreadsheet file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the registered kind catalog
    Kinds,

    /// Show which kind a file name resolves to
    Detect {
        /// File name to test
        filename: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Transform { input, kind, out_dir, delimiter } => {
            cmd_transform(&input, kind.as_deref(), &out_dir, delimiter)
        }

        Commands::Parse { input, delimiter, output } => {
            cmd_parse(&input, delimiter, output.as_deref())
        }

        Commands::Kinds => cmd_kinds(),

        Commands::Detect { filename } => cmd_detect(&filename),
    };

    if let Err(e) = result {
        eprintln!("✗ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_transform(
    input: &Path,
    kind: Option<&str>,
    out_dir: &Path,
    delimiter: Option<char>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Processing: {}", input.display());

    let summary = batch::run(input, kind, out_dir, delimiter)?;

    eprintln!();
    eprintln!("Kind:      {}", summary.kind);
    eprintln!("Rows:      {}", summary.total_rows);
    eprintln!("Converted: {}", summary.converted);
    if summary.rejected > 0 {
        eprintln!("Rejected:  {}", summary.rejected);
    }
    eprintln!("Artifact:  {}", summary.artifact.display());

    Ok(())
}

fn cmd_parse(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Parsing: {}", input.display());

    let result = reader::read_rows(input, delimiter)?;

    if let Some(encoding) = &result.encoding {
        eprintln!("   Encoding: {}", encoding);
    }
    if let Some(d) = result.delimiter {
        eprintln!(
            "   Delimiter: '{}'{}",
            match d {
                '\t' => "\\t".to_string(),
                c => c.to_string(),
            },
            if delimiter.is_none() { " (auto-detected)" } else { "" }
        );
    }
    eprintln!("   Columns: {}", result.headers.join(", "));
    eprintln!("✓ Parsed {} rows", result.rows.len());

    let rows: Vec<serde_json::Value> = result.rows.iter().map(|r| r.to_value()).collect();
    let json = serde_json::to_string_pretty(&rows)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_kinds() -> Result<(), Box<dyn std::error::Error>> {
    println!("Registered kinds ({}):\n", catalog::CATALOG.len());
    for descriptor in catalog::CATALOG {
        println!("  {} → {}", descriptor.kind, descriptor.artifact);
        println!("     Required: {}", descriptor.required.join(", "));
        if !descriptor.optional.is_empty() {
            println!("     Optional: {}", descriptor.optional.join(", "));
        }
        println!();
    }
    Ok(())
}

fn cmd_detect(filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    match catalog::detect_kind(filename) {
        Some(descriptor) => {
            println!("{} → {} ({})", filename, descriptor.kind, descriptor.artifact);
            Ok(())
        }
        None => Err(format!("No kind matches: {}", filename).into()),
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
