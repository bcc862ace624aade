//! # Derived-Fact Subcommands
//!
//! Thin wrappers over the builders in [`kipre_core::facts`]: each one
//! reads the hostvars document, builds one aggregation, and dumps it as
//! YAML on stdout for the playbooks to slurp.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;

use kipre_core::Hostvars;

/// Shared arguments of the fact subcommands.
#[derive(Args, Debug)]
pub struct FactsArgs {
    /// Hostvars YAML document (defaults to stdin).
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Emit `{internal_network_hosts: ...}`.
pub fn internal_network_hosts(args: &FactsArgs) -> anyhow::Result<ExitCode> {
    let hostvars = parse(args)?;
    emit(&kipre_core::facts::internal_network_hosts(&hostvars)?)
}

/// Emit `{k8s_cp_nodes: [...]}`.
pub fn cp_nodes(args: &FactsArgs) -> anyhow::Result<ExitCode> {
    let hostvars = parse(args)?;
    emit(&kipre_core::facts::k8s_cp_nodes(&hostvars))
}

/// Emit `{ih_to_hostname_dict, hostname_to_ih_dict}`.
pub fn hostname_map(args: &FactsArgs) -> anyhow::Result<ExitCode> {
    let hostvars = parse(args)?;
    emit(&kipre_core::facts::ih_hostname_maps(&hostvars))
}

fn parse(args: &FactsArgs) -> anyhow::Result<Hostvars> {
    let input = crate::read_document(args.file.as_deref())?;
    Ok(Hostvars::parse(&input)?)
}

fn emit(fact: &serde_yaml::Value) -> anyhow::Result<ExitCode> {
    print!("{}", serde_yaml::to_string(fact)?);
    Ok(ExitCode::SUCCESS)
}
