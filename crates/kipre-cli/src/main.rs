//! # kipre CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;

/// kipre — pre-flight checks for the Kubernetes installer.
///
/// Validates hostvars documents, aggregates the derived facts the
/// playbooks need, and answers small network questions.
#[derive(Parser, Debug)]
#[command(name = "kipre", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate a hostvars document (schema + semantic rules).
    Validate(kipre_cli::validate::ValidateArgs),
    /// Aggregate the per-host internal-network interface table.
    InternalNetworkHosts(kipre_cli::facts::FactsArgs),
    /// List the control-plane nodes.
    CpNodes(kipre_cli::facts::FactsArgs),
    /// Build the ih ↔ hostname dictionaries.
    HostnameMap(kipre_cli::facts::FactsArgs),
    /// Print the network address of a CIDR.
    NetworkAddress(kipre_cli::netaddr::NetworkAddressArgs),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate(args) => kipre_cli::validate::run(&args),
        Commands::InternalNetworkHosts(args) => kipre_cli::facts::internal_network_hosts(&args),
        Commands::CpNodes(args) => kipre_cli::facts::cp_nodes(&args),
        Commands::HostnameMap(args) => kipre_cli::facts::hostname_map(&args),
        Commands::NetworkAddress(args) => kipre_cli::netaddr::run(&args),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("[ERROR] {err:#}");
            ExitCode::FAILURE
        }
    }
}
