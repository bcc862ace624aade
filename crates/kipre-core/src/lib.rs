//! # kipre-core — Foundational Types for the Pre-flight Suite
//!
//! This crate is the leaf of the workspace DAG. It defines everything the
//! schema and rule layers share:
//!
//! 1. **Primitive value validators.** Absolute paths, IPv4 addresses and
//!    networks, bounded ports, positive integers, and the
//!    pattern-constrained string families (FQDN, object name, validity
//!    period, storage size, SSH user). Each validator returns a typed
//!    value or a [`ValueError`] carrying the offending input.
//!
//! 2. **The hostvars document model.** [`Hostvars`] is a read-only
//!    snapshot of the installer's per-host variable document, parsed once
//!    per run. Malformed documents are [`FatalError`]s — they abort
//!    instead of accumulating.
//!
//! 3. **The structured error model.** [`HostvarsError`] carries the
//!    inventory host, the `/`-joined field path, the stringified input,
//!    and a human message. Errors accumulate across layers and render
//!    deterministically via [`render_errors`].
//!
//! 4. **Name/address mapping helpers** ([`netmap`]) and **derived-fact
//!    builders** ([`facts`]) consumed by the semantic layer and the CLI.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `kipre-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests and regex statics.

pub mod error;
pub mod facts;
pub mod hostvars;
pub mod netmap;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::{render_errors, FatalError, FieldPath, HostvarsError, PathSeg};
pub use hostvars::{Hostvars, LOCALHOST};
pub use value::{stringify, IpOrFqdn, ValueError};
