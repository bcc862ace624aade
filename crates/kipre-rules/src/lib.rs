//! # kipre-rules — Semantic Rule Set
//!
//! Cross-field and cross-host invariant checks no per-field schema can
//! express: "if HA mode is enabled, a virtual IP must be set", "all
//! control-plane nodes must share one subnet", "every node referenced by
//! an ingress class must belong to the node group".
//!
//! Rules run in a fixed order over the already-aggregated `localhost`
//! view and the per-host entries. Each rule is a pure function of that
//! read-only snapshot: it appends zero or more errors and touches no
//! shared state, so the run is idempotent and the rules could evaluate
//! in any order (or in parallel) without changing the collected set —
//! except for the one deliberate short-circuit documented in
//! [`checks::check_internal_network_subnets`].
//!
//! A rule whose inputs failed schema validation skips quietly instead of
//! crashing; the schema layer already reported the field.
//!
//! The [`crossref`] module holds the standalone fail-fast validators for
//! ingress and IP-address-pool lists, used by deployment automation
//! outside the main pre-flight run.

pub mod checks;
pub mod crossref;
pub mod view;

pub use checks::validate_hostvars;
pub use crossref::{
    validate_ingresses, validate_ip_address_pools, CrossRefError, IngressEntry, IpAddressPool,
};
pub use view::LocalhostView;
