//! # kipre-cli — Pre-Flight Command-Line Interface
//!
//! Replaces the installer's `scripts/preflight` Python tools with a
//! structured clap-based CLI. Every tool reads the hostvars document
//! from stdin by default, and every output format is preserved so the
//! playbooks that consume it keep working.
//!
//! ## Subcommands
//!
//! - `validate` — full pre-flight validation (schema + semantic rules)
//! - `internal-network-hosts` — aggregate the per-host interface table
//! - `cp-nodes` — list the control-plane nodes
//! - `hostname-map` — build the ih ↔ hostname dictionaries
//! - `network-address` — print the network address of a CIDR
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to the domain crates — no validation
//!   logic here.

use std::fs;
use std::io::Read;
use std::path::Path;

pub mod facts;
pub mod netaddr;
pub mod validate;

/// Read the hostvars document from a file, or from stdin when no path
/// was given.
pub(crate) fn read_document(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
