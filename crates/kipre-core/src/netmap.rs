//! # Name/Address Mapping Helpers
//!
//! Small bidirectional-mapping builders the semantic layer consumes as
//! precomputed inputs:
//!
//! - cluster hostname → resolved addresses, from flat
//!   `[hostname, addr, addr, ...]` rows,
//! - resolved IP → inventory node name, from per-host `k8s_ip` facts,
//! - their composition into node-name ↔ hostname bijections, matching
//!   any of a hostname's addresses against the IP keys and taking the
//!   first match per hostname.
//!
//! All functions are pure over their inputs.

use std::collections::BTreeMap;

use serde_yaml::Value;

use crate::hostvars::Hostvars;

/// Variable each node publishes with its resolved cluster IP.
const K8S_IP_VAR: &str = "k8s_ip";

/// The two derived node-name ↔ hostname maps, exact inverses of each
/// other.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeNameMaps {
    /// Inventory node name → cluster hostname.
    pub node_name_to_hostname: BTreeMap<String, String>,
    /// Cluster hostname → inventory node name.
    pub hostname_to_node_name: BTreeMap<String, String>,
}

/// Build the hostname → addresses map from flat rows where the first
/// element is the hostname and the rest are its resolved addresses.
/// Empty rows are skipped.
pub fn hostname_to_addresses(rows: &[Vec<String>]) -> BTreeMap<String, Vec<String>> {
    let mut map = BTreeMap::new();
    for row in rows {
        if let Some((hostname, addresses)) = row.split_first() {
            map.insert(hostname.clone(), addresses.to_vec());
        }
    }
    map
}

/// Scan every host entry for a `k8s_ip` variable and build the
/// resolved-IP → node-name map.
pub fn ip_to_node_name(hostvars: &Hostvars) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for (ih, vars) in hostvars.hosts() {
        if let Some(ip) = vars.get(K8S_IP_VAR).and_then(Value::as_str) {
            map.insert(ip.to_string(), ih.to_string());
        }
    }
    map
}

/// Compose the two input maps into node-name ↔ hostname bijections.
///
/// For each hostname, its addresses are scanned in order and the first
/// one present in `ip_to_node_name` decides the node name; remaining
/// addresses are ignored.
pub fn node_name_maps(
    ip_to_node_name: &BTreeMap<String, String>,
    hostname_to_addresses: &BTreeMap<String, Vec<String>>,
) -> NodeNameMaps {
    let mut maps = NodeNameMaps::default();
    for (hostname, addresses) in hostname_to_addresses {
        for address in addresses {
            if let Some(node_name) = ip_to_node_name.get(address) {
                maps.node_name_to_hostname
                    .insert(node_name.clone(), hostname.clone());
                break;
            }
        }
    }
    for (node_name, hostname) in &maps.node_name_to_hostname {
        maps.hostname_to_node_name
            .insert(hostname.clone(), node_name.clone());
    }
    maps
}
