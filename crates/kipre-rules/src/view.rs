//! # Localhost Aggregate View
//!
//! Lenient typed accessors over the `localhost` entry. Every accessor
//! returns `Option`: a missing or ill-typed variable yields `None` so
//! that a rule depending on it can skip instead of crashing. The schema
//! layer is responsible for reporting the variable itself.

use serde_yaml::{Mapping, Sequence, Value};

use kipre_core::Hostvars;

/// Absent variables read as null.
static NULL: Value = Value::Null;

/// Read-only view of the cluster-wide aggregate entry.
#[derive(Debug, Clone, Copy)]
pub struct LocalhostView<'a> {
    vars: &'a Mapping,
}

impl<'a> LocalhostView<'a> {
    /// Borrow the `localhost` entry of a parsed document.
    pub fn new(hostvars: &'a Hostvars) -> Self {
        Self {
            vars: hostvars.localhost(),
        }
    }

    /// Raw value of a variable; absent reads as null.
    pub fn raw(&self, name: &str) -> &'a Value {
        self.vars.get(name).unwrap_or(&NULL)
    }

    /// A boolean variable.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.vars.get(name).and_then(Value::as_bool)
    }

    /// A string variable.
    pub fn text(&self, name: &str) -> Option<&'a str> {
        self.vars.get(name).and_then(Value::as_str)
    }

    /// A list variable.
    pub fn sequence(&self, name: &str) -> Option<&'a Sequence> {
        self.vars.get(name).and_then(Value::as_sequence)
    }

    /// A mapping variable.
    pub fn mapping(&self, name: &str) -> Option<&'a Mapping> {
        self.vars.get(name).and_then(Value::as_mapping)
    }

    /// A list variable whose every element is a string. Any non-string
    /// element makes the whole list read as ill-typed.
    pub fn str_list(&self, name: &str) -> Option<Vec<&'a str>> {
        self.sequence(name)?
            .iter()
            .map(Value::as_str)
            .collect::<Option<Vec<_>>>()
    }

    /// A node group from the aggregated `groups` variable.
    pub fn group(&self, group: &str) -> Option<Vec<&'a str>> {
        self.mapping("groups")?
            .get(group)
            .and_then(Value::as_sequence)?
            .iter()
            .map(Value::as_str)
            .collect::<Option<Vec<_>>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_of(yaml: &'static str) -> Hostvars {
        Hostvars::parse(yaml).unwrap()
    }

    #[test]
    fn test_accessors_are_lenient() {
        let doc = view_of("localhost: {ki_cp_ha_mode: true, internal_network_subnets: [a, 3]}\n");
        let view = LocalhostView::new(&doc);
        assert_eq!(view.flag("ki_cp_ha_mode"), Some(true));
        assert_eq!(view.flag("missing"), None);
        assert_eq!(view.flag("internal_network_subnets"), None);
        // Mixed-type list is ill-typed as a string list.
        assert_eq!(view.str_list("internal_network_subnets"), None);
        assert!(view.raw("missing").is_null());
    }

    #[test]
    fn test_group_lookup() {
        let doc = view_of(
            "localhost:\n\
             \x20 groups:\n\
             \x20   k8s_node: [node1, node2]\n\
             \x20   ki_cp_node: [node1]\n",
        );
        let view = LocalhostView::new(&doc);
        assert_eq!(view.group("k8s_node"), Some(vec!["node1", "node2"]));
        assert_eq!(view.group("nope"), None);
    }
}
