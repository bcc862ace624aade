//! # Hostvars Document Model
//!
//! A [`Hostvars`] value is a read-only snapshot of the installer's
//! per-host variable document: a YAML mapping from inventory host
//! identifier ("ih") to that host's variable mapping. The reserved
//! `localhost` entry holds cluster-wide aggregated and derived state
//! (node groups, resolved internal-network interfaces, ingress classes)
//! rather than per-node values.
//!
//! Construction happens once per validation run; nothing is mutated
//! afterwards, so the run is stateless and idempotent.

use serde_yaml::{Mapping, Value};

use crate::error::FatalError;

/// Reserved inventory key for the cluster-wide aggregate entry.
pub const LOCALHOST: &str = "localhost";

/// Immutable snapshot of a hostvars document.
#[derive(Debug, Clone)]
pub struct Hostvars {
    entries: Mapping,
    localhost: Mapping,
}

impl Hostvars {
    /// Parse a YAML document into a hostvars snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`FatalError`] if the input is not parseable YAML, is
    /// not a top-level mapping, or lacks a `localhost` mapping entry.
    /// These abort immediately — there is no meaningful partial
    /// validation of a structurally broken document.
    pub fn parse(input: &str) -> Result<Self, FatalError> {
        let doc: Value = serde_yaml::from_str(input)?;
        Self::from_value(doc)
    }

    /// Build a snapshot from an already-parsed YAML value.
    pub fn from_value(doc: Value) -> Result<Self, FatalError> {
        let Value::Mapping(entries) = doc else {
            return Err(FatalError::NotAMapping);
        };
        let localhost = match entries.get(LOCALHOST) {
            None => return Err(FatalError::MissingLocalhost),
            Some(Value::Mapping(m)) => m.clone(),
            Some(_) => return Err(FatalError::LocalhostNotAMapping),
        };
        Ok(Self { entries, localhost })
    }

    /// Iterate all host entries in document order, `localhost` included.
    pub fn hosts(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| k.as_str().map(|k| (k, v)))
    }

    /// Iterate host entries in document order, skipping `localhost`.
    pub fn remote_hosts(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.hosts().filter(|(ih, _)| *ih != LOCALHOST)
    }

    /// The cluster-wide aggregate entry.
    pub fn localhost(&self) -> &Mapping {
        &self.localhost
    }

    /// Number of host entries, `localhost` included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document holds no host entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
