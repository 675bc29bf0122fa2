//! `payslip` CLI - Convert payslip PDFs to JSON and build abbreviation glossaries

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use payslip::content::pdf;
use payslip::output::to_json;
use payslip::{build_glossary, load_config, render_glossary, Extractor, Payslip};

#[derive(Parser)]
#[command(name = "payslip")]
#[command(about = "Extract tables and totals from payslip PDFs, cross-checking every figure")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/payslip/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a payslip PDF to JSON
    Extract {
        /// Payslip PDF(s)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write PAYSLIP.json next to each input and keep going past failures
        #[arg(short = 'd')]
        write_json: bool,
    },

    /// Pair abbreviated earnings descriptions with their full names
    Glossary {
        /// JSON files produced by `payslip extract`
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { files, write_json } => {
            let extractor = Extractor::new(load_config(cli.config.as_deref())?);
            if write_json {
                cmd_extract_each(&extractor, &files);
            } else {
                cmd_extract(&extractor, &files)?;
            }
        }
        Commands::Glossary { files } => {
            cmd_glossary(&files)?;
        }
    }

    Ok(())
}

/// Read, check and extract one PDF, echoing its warnings.
fn extract_file(extractor: &Extractor, path: &Path) -> Result<Payslip> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if !pdf::is_pdf(&bytes) {
        bail!("{}: Not a PDF", path.display());
    }

    let pages = pdf::page_streams(&bytes);
    let payslip = extractor
        .extract(&pages)
        .with_context(|| format!("{}: extraction failed", path.display()))?;

    for warning in &payslip.warnings {
        eprintln!("Warning: {}: {warning}", path.display());
    }
    Ok(payslip)
}

fn cmd_extract(extractor: &Extractor, files: &[PathBuf]) -> Result<()> {
    let [path] = files else {
        bail!("expected one PDF (use -d to convert several)");
    };

    let payslip = extract_file(extractor, path)?;
    println!("{}", to_json(&payslip)?);
    Ok(())
}

/// Convert every file to `<name>.json`. Failures are reported and skipped.
fn cmd_extract_each(extractor: &Extractor, files: &[PathBuf]) {
    for path in files {
        let result = extract_file(extractor, path).and_then(|payslip| {
            let out = path.with_extension("json");
            let json = to_json(&payslip)?;
            fs::write(&out, json + "\n")
                .with_context(|| format!("failed to write {}", out.display()))
        });

        if let Err(e) = result {
            eprintln!("Error: {e:#}");
        }
    }
}

fn cmd_glossary(files: &[PathBuf]) -> Result<()> {
    let payslips = files
        .iter()
        .map(|path| {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str::<Payslip>(&text)
                .with_context(|| format!("{}: not an extracted payslip", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let groups = build_glossary(&payslips)?;
    print!("{}", render_glossary(&groups));
    Ok(())
}
