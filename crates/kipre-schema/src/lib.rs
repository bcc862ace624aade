//! # kipre-schema — Typed-Schema Layer
//!
//! Declarative description of the installer's variable set plus the
//! generic walker that checks host entries against it.
//!
//! Two independent schema groups exist and every host entry is checked
//! against both:
//!
//! - the **Vars group** — per-deployment tunables (paths, subnets, HA
//!   flags, ingress classes, replica counts),
//! - the **Constant group** — fixed and derived installer paths and
//!   ports.
//!
//! The schema is a fixed, hard-coded description of one installer's
//! variables — this crate is deliberately not a general-purpose schema
//! language. Each field is a `(name, shape, presence)` row in a const
//! table; nested object types (A-records, ingress-class entries) are
//! tables of their own, referenced from the parent row.
//!
//! ## Accumulation Policy
//!
//! The walker never stops at the first violation: every declared field
//! of every group is visited for every host, and all mismatches are
//! collected in field declaration order (then list index order).

pub mod model;
pub mod walk;

pub use model::{FieldSpec, Presence, Primitive, Shape};
pub use model::{A_RECORD_FIELDS, CONSTANT_SCHEMA, INGRESS_CLASS_FIELDS, SCHEMA_GROUPS, VARS_SCHEMA};
pub use walk::{validate_all, validate_group, validate_host};
