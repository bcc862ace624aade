//! # Cross-Reference Validators
//!
//! Standalone fail-fast checks used by the deployment automation outside
//! the main pre-flight run: ingress entries and IP address pools against
//! the node-name map produced by [`kipre_core::netmap`]. Unlike the
//! pre-flight layers these return on the first violation, since the
//! automation aborts the play either way.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use thiserror::Error;

/// First violation found while cross-referencing a list against the
/// node-name map.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CrossRefError {
    /// Two ingress entries carry the same class name.
    #[error("ingress class name '{0}' duplicated")]
    DuplicateIngressClass(String),
    /// An ingress entry references a node the map does not know.
    #[error("Controller node '{0}' does not exist in node_name_to_k8s_hostname_map.keys()")]
    UnknownControllerNode(String),
    /// Two address pools carry the same pool name.
    #[error("pool name '{0}' duplicated")]
    DuplicatePoolName(String),
    /// An address pool references a node the map does not know.
    #[error("Node '{0}' does not exist in node_name_to_k8s_hostname_map.keys()")]
    UnknownPoolNode(String),
}

/// One ingress deployment entry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct IngressEntry {
    pub ingress_class_name: String,
    pub controller_nodes: Vec<String>,
}

/// One load-balancer IP address pool.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct IpAddressPool {
    pub pool_name: String,
    pub nodes: Vec<String>,
}

/// Check ingress entries for class-name uniqueness and controller-node
/// existence. Stops at the first violation.
pub fn validate_ingresses(
    ingresses: &[IngressEntry],
    node_name_to_hostname: &BTreeMap<String, String>,
) -> Result<(), CrossRefError> {
    let mut class_names = BTreeSet::new();
    for ingress in ingresses {
        if !class_names.insert(ingress.ingress_class_name.as_str()) {
            return Err(CrossRefError::DuplicateIngressClass(
                ingress.ingress_class_name.clone(),
            ));
        }
        for controller_node in &ingress.controller_nodes {
            if !node_name_to_hostname.contains_key(controller_node) {
                return Err(CrossRefError::UnknownControllerNode(controller_node.clone()));
            }
        }
    }
    Ok(())
}

/// Check address pools for pool-name uniqueness and node existence.
/// Stops at the first violation.
pub fn validate_ip_address_pools(
    pools: &[IpAddressPool],
    node_name_to_hostname: &BTreeMap<String, String>,
) -> Result<(), CrossRefError> {
    let mut pool_names = BTreeSet::new();
    for pool in pools {
        if !pool_names.insert(pool.pool_name.as_str()) {
            return Err(CrossRefError::DuplicatePoolName(pool.pool_name.clone()));
        }
        for node in &pool.nodes {
            if !node_name_to_hostname.contains_key(node) {
                return Err(CrossRefError::UnknownPoolNode(node.clone()));
            }
        }
    }
    Ok(())
}
