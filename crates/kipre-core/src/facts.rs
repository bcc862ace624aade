//! # Derived-Fact Builders
//!
//! Aggregations the installer computes from the hostvars document before
//! validation: the per-host internal-network interface table, the list of
//! control-plane nodes, and the ih ↔ hostname dictionaries. Each builder
//! returns a single-key YAML mapping ready to be emitted, preserving
//! document order.

use serde_yaml::{Mapping, Value};

use crate::error::FatalError;
use crate::hostvars::Hostvars;

const INTERFACES_VAR: &str = "internal_network_interfaces";
const K8S_CP_VAR: &str = "k8s_cp";
const HOSTNAME_VAR: &str = "hostname";

/// Collect every remote host's `internal_network_interfaces` fact into
/// `{internal_network_hosts: {ih: {interfaces: [...]}}}`.
///
/// # Errors
///
/// A host without the `internal_network_interfaces` variable is a
/// [`FatalError::MissingVariable`] — the interface discovery step must
/// have run on every node before this aggregation.
pub fn internal_network_hosts(hostvars: &Hostvars) -> Result<Value, FatalError> {
    let mut hosts = Mapping::new();
    for (ih, vars) in hostvars.remote_hosts() {
        let interfaces = vars.get(INTERFACES_VAR).ok_or_else(|| {
            FatalError::MissingVariable {
                ih: ih.to_string(),
                key: INTERFACES_VAR.to_string(),
            }
        })?;
        let mut entry = Mapping::new();
        entry.insert(Value::from("interfaces"), interfaces.clone());
        hosts.insert(Value::from(ih), Value::Mapping(entry));
    }
    Ok(single_key("internal_network_hosts", Value::Mapping(hosts)))
}

/// List every remote host whose `k8s_cp` variable is true, as
/// `{k8s_cp_nodes: [...]}`.
pub fn k8s_cp_nodes(hostvars: &Hostvars) -> Value {
    let nodes: Vec<Value> = hostvars
        .remote_hosts()
        .filter(|(_, vars)| matches!(vars.get(K8S_CP_VAR), Some(Value::Bool(true))))
        .map(|(ih, _)| Value::from(ih))
        .collect();
    single_key("k8s_cp_nodes", Value::Sequence(nodes))
}

/// Build `{ih_to_hostname_dict, hostname_to_ih_dict}` from each remote
/// host's `hostname` variable. Hosts without one are skipped.
pub fn ih_hostname_maps(hostvars: &Hostvars) -> Value {
    let mut ih_to_hostname = Mapping::new();
    let mut hostname_to_ih = Mapping::new();
    for (ih, vars) in hostvars.remote_hosts() {
        if let Some(hostname) = vars.get(HOSTNAME_VAR).and_then(Value::as_str) {
            ih_to_hostname.insert(Value::from(ih), Value::from(hostname));
            hostname_to_ih.insert(Value::from(hostname), Value::from(ih));
        }
    }
    let mut root = Mapping::new();
    root.insert(
        Value::from("ih_to_hostname_dict"),
        Value::Mapping(ih_to_hostname),
    );
    root.insert(
        Value::from("hostname_to_ih_dict"),
        Value::Mapping(hostname_to_ih),
    );
    Value::Mapping(root)
}

fn single_key(key: &str, value: Value) -> Value {
    let mut root = Mapping::new();
    root.insert(Value::from(key), value);
    Value::Mapping(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(yaml: &str) -> Hostvars {
        Hostvars::parse(yaml).unwrap()
    }

    // ---- internal_network_hosts ----

    #[test]
    fn test_internal_network_hosts_collects_interfaces() {
        let hostvars = doc(
            "localhost: {}\n\
             node1:\n\
             \x20 internal_network_interfaces:\n\
             \x20 - {if: eth0, subnet: 10.0.0.0/24, ip: 10.0.0.11}\n\
             node2:\n\
             \x20 internal_network_interfaces: []\n",
        );
        let facts = internal_network_hosts(&hostvars).unwrap();
        let hosts = facts
            .get("internal_network_hosts")
            .and_then(Value::as_mapping)
            .unwrap();
        assert_eq!(hosts.len(), 2);
        let node1 = hosts.get("node1").unwrap();
        let interfaces = node1.get("interfaces").and_then(Value::as_sequence).unwrap();
        assert_eq!(interfaces.len(), 1);
        assert_eq!(
            interfaces[0].get("subnet").and_then(Value::as_str),
            Some("10.0.0.0/24")
        );
    }

    #[test]
    fn test_internal_network_hosts_missing_variable_is_fatal() {
        let hostvars = doc("localhost: {}\nnode1: {}\n");
        let err = internal_network_hosts(&hostvars).unwrap_err();
        assert!(matches!(
            err,
            FatalError::MissingVariable { ref ih, ref key }
                if ih == "node1" && key == "internal_network_interfaces"
        ));
    }

    // ---- k8s_cp_nodes ----

    #[test]
    fn test_k8s_cp_nodes_filters_on_flag() {
        let hostvars = doc(
            "localhost: {}\n\
             cp1: {k8s_cp: true}\n\
             worker1: {k8s_cp: false}\n\
             worker2: {}\n\
             cp2: {k8s_cp: true}\n",
        );
        let facts = k8s_cp_nodes(&hostvars);
        let nodes = facts.get("k8s_cp_nodes").and_then(Value::as_sequence).unwrap();
        let names: Vec<&str> = nodes.iter().filter_map(Value::as_str).collect();
        assert_eq!(names, vec!["cp1", "cp2"]);
    }

    // ---- ih_hostname_maps ----

    #[test]
    fn test_ih_hostname_maps_build_both_directions() {
        let hostvars = doc(
            "localhost: {}\n\
             node1: {hostname: k8s-node-1}\n\
             node2: {hostname: k8s-node-2}\n\
             node3: {}\n",
        );
        let facts = ih_hostname_maps(&hostvars);
        let forward = facts
            .get("ih_to_hostname_dict")
            .and_then(Value::as_mapping)
            .unwrap();
        let reverse = facts
            .get("hostname_to_ih_dict")
            .and_then(Value::as_mapping)
            .unwrap();
        assert_eq!(forward.len(), 2);
        assert_eq!(forward.get("node1").and_then(Value::as_str), Some("k8s-node-1"));
        assert_eq!(reverse.get("k8s-node-2").and_then(Value::as_str), Some("node2"));
    }
}
