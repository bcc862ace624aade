//! # Network-Address Subcommand
//!
//! Prints the network address of a CIDR, e.g. `10.244.0.0/16` →
//! `10.244.0.0`. Used by the node charts to derive the flannel network
//! address from the pod subnet. A CIDR with host bits set is rejected,
//! as is anything that is not an IPv4 network.

use std::process::ExitCode;

use clap::Args;

use kipre_core::value::parse_network;

/// Arguments for the network-address subcommand.
#[derive(Args, Debug)]
pub struct NetworkAddressArgs {
    /// CIDR or bare IPv4 address.
    pub cidr: String,
}

/// Print the network address of the given CIDR to stdout.
pub fn run(args: &NetworkAddressArgs) -> anyhow::Result<ExitCode> {
    let net = parse_network(&args.cidr).map_err(|e| anyhow::anyhow!("{}: {e}", args.cidr))?;
    println!("{}", net.network());
    Ok(ExitCode::SUCCESS)
}
