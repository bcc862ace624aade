//! # Error Model — Structured Validation Errors
//!
//! Every violation found by the schema or semantic layer becomes one
//! [`HostvarsError`]: the inventory host it was found on, the field path
//! inside that host's variables, the stringified offending input, and a
//! human-readable message. Errors accumulate — neither layer stops at the
//! first violation — and the final report renders them in collection
//! order, so the same document always produces byte-identical output.
//!
//! Document-level problems (unparseable YAML, missing `localhost` entry)
//! are a separate [`FatalError`] taxonomy: they abort the run immediately
//! instead of being collected.

use std::fmt;

use thiserror::Error;

/// One segment of a field path: a variable name, a nested mapping key, or
/// a list index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSeg {
    /// A variable name or nested mapping key.
    Key(String),
    /// A zero-based index into a list-valued variable.
    Index(usize),
}

impl fmt::Display for PathSeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSeg::Key(k) => f.write_str(k),
            PathSeg::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for PathSeg {
    fn from(key: &str) -> Self {
        PathSeg::Key(key.to_string())
    }
}

impl From<usize> for PathSeg {
    fn from(index: usize) -> Self {
        PathSeg::Index(index)
    }
}

/// Ordered sequence of path segments locating a variable inside a host
/// entry, rendered as `a / 0 / b`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath(Vec<PathSeg>);

impl FieldPath {
    /// An empty path, addressing the host entry itself.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// A single-segment path addressing a top-level variable.
    pub fn of(name: &str) -> Self {
        Self(vec![PathSeg::from(name)])
    }

    /// Extend with a nested key, consuming self.
    pub fn key(mut self, name: &str) -> Self {
        self.0.push(PathSeg::from(name));
        self
    }

    /// Extend with a list index, consuming self.
    pub fn index(mut self, index: usize) -> Self {
        self.0.push(PathSeg::from(index));
        self
    }

    /// Borrowing variant of [`FieldPath::key`]/[`FieldPath::index`].
    pub fn child(&self, seg: PathSeg) -> Self {
        let mut segments = self.0.clone();
        segments.push(seg);
        Self(segments)
    }

    /// The underlying segments in order.
    pub fn segments(&self) -> &[PathSeg] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" / ")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

impl FromIterator<PathSeg> for FieldPath {
    fn from_iter<T: IntoIterator<Item = PathSeg>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A single collected validation error.
///
/// Produced by both the schema layer (per-field violations) and the
/// semantic layer (cross-field and cross-host violations, attributed to
/// the `localhost` aggregate entry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostvarsError {
    /// Inventory host the error was found on.
    pub ih: String,
    /// Path of the violated variable inside the host entry.
    pub location: FieldPath,
    /// Stringified offending input.
    pub input: String,
    /// Human-readable description of the violation.
    pub msg: String,
}

impl HostvarsError {
    /// Construct an error for the given host and field path.
    pub fn new(
        ih: impl Into<String>,
        location: FieldPath,
        input: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            ih: ih.into(),
            location,
            input: input.into(),
            msg: msg.into(),
        }
    }
}

/// Render collected errors as the canonical, 1-indexed report blocks.
///
/// The caller prints the `[ERROR] Invalid hostvars` banner; this function
/// produces only the per-error blocks, in collection order.
pub fn render_errors(errors: &[HostvarsError]) -> String {
    let mut out = String::new();
    for (idx, error) in errors.iter().enumerate() {
        out.push_str(&format!("Error {}:\n", idx + 1));
        out.push_str(&format!("  ih: {}\n", error.ih));
        out.push_str(&format!("  location: {}\n", error.location));
        out.push_str(&format!("  input: {}\n", error.input));
        out.push_str(&format!("  msg: {}\n", error.msg));
    }
    out
}

/// A document-level failure that aborts the run instead of accumulating.
#[derive(Error, Debug)]
pub enum FatalError {
    /// The input was not parseable YAML.
    #[error("invalid hostvars document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The top-level document was not a mapping of inventory hosts.
    #[error("hostvars document must be a mapping of inventory hosts")]
    NotAMapping,

    /// The reserved `localhost` aggregate entry is absent.
    #[error("hostvars document is missing entry \"localhost\"")]
    MissingLocalhost,

    /// The `localhost` entry is present but not a mapping of variables.
    #[error("entry \"localhost\" must be a mapping of variables")]
    LocalhostNotAMapping,

    /// A host entry is missing a variable a derived-fact builder needs.
    #[error("host {ih:?} is missing required variable {key:?}")]
    MissingVariable {
        /// Inventory host missing the variable.
        ih: String,
        /// Name of the missing variable.
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- field paths ----

    #[test]
    fn test_path_display_joins_with_slashes() {
        let path = FieldPath::of("k8s_ingress_classes").index(0).key("name");
        assert_eq!(path.to_string(), "k8s_ingress_classes / 0 / name");
    }

    #[test]
    fn test_root_path_renders_empty() {
        assert_eq!(FieldPath::root().to_string(), "");
    }

    #[test]
    fn test_child_does_not_mutate_parent() {
        let parent = FieldPath::of("a");
        let child = parent.child(PathSeg::Index(3));
        assert_eq!(parent.to_string(), "a");
        assert_eq!(child.to_string(), "a / 3");
    }

    // ---- report rendering ----

    #[test]
    fn test_render_errors_format() {
        let errors = vec![
            HostvarsError::new("localhost", FieldPath::of("ki_cp_ha_mode_vip"), "null", "must be set"),
            HostvarsError::new("node1", FieldPath::of("ansible_port").index(1), "70000", "out of range"),
        ];
        let rendered = render_errors(&errors);
        let expected = "Error 1:\n\
                        \x20 ih: localhost\n\
                        \x20 location: ki_cp_ha_mode_vip\n\
                        \x20 input: null\n\
                        \x20 msg: must be set\n\
                        Error 2:\n\
                        \x20 ih: node1\n\
                        \x20 location: ansible_port / 1\n\
                        \x20 input: 70000\n\
                        \x20 msg: out of range\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_errors_empty() {
        assert_eq!(render_errors(&[]), "");
    }

    #[test]
    fn test_render_is_deterministic() {
        let errors = vec![HostvarsError::new(
            "localhost",
            FieldPath::of("aipub_cp_nodes"),
            "[\"nodeX\"]",
            "Must belong to k8s_node group",
        )];
        assert_eq!(render_errors(&errors), render_errors(&errors));
    }
}
