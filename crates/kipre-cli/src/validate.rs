//! # Validate Subcommand
//!
//! Full pre-flight validation of a hostvars document. Preserves the
//! interface of `validate-hostvars.py`: document on stdin, report on
//! stderr, exit code 1 when anything is invalid.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;

use kipre_core::{render_errors, Hostvars};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Hostvars YAML document (defaults to stdin).
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Parse the document, run the full pipeline, and render the report.
pub fn run(args: &ValidateArgs) -> anyhow::Result<ExitCode> {
    let input = crate::read_document(args.file.as_deref())?;
    let hostvars = Hostvars::parse(&input)?;

    let errors = kipre_rules::validate_hostvars(&hostvars);
    if errors.is_empty() {
        tracing::debug!(hosts = hostvars.len(), "hostvars valid");
        return Ok(ExitCode::SUCCESS);
    }

    tracing::debug!(count = errors.len(), "hostvars invalid");
    eprintln!("[ERROR] Invalid hostvars");
    eprint!("{}", render_errors(&errors));
    Ok(ExitCode::FAILURE)
}
