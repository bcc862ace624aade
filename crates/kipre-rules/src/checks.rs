//! # Semantic Checks
//!
//! The ordered rule set, plus [`validate_hostvars`], the full pipeline
//! (schema layer first, then every rule). Rule order is part of the
//! observable output and must not change:
//!
//! 1. control-plane HA flag ⇒ VIP present,
//! 2. internal-network subnet consistency (and VIP containment),
//! 3. ingress classes (name uniqueness, node membership, per-class HA
//!    flag ⇒ VIP),
//! 4. platform HA flag ⇒ storage class present,
//! 5. platform control-plane nodes ⊆ Kubernetes node group.
//!
//! Every rule attributes its errors to the `localhost` aggregate entry.

use std::collections::BTreeSet;
use std::net::Ipv4Addr;

use serde_yaml::Value;

use kipre_core::value::{parse_network, stringify};
use kipre_core::{FieldPath, Hostvars, HostvarsError, LOCALHOST};

use crate::view::LocalhostView;

static NULL: Value = Value::Null;

/// Run the schema layer over every host, then the ordered semantic rule
/// set over the aggregate view, and return every collected error.
///
/// The semantic rules run even when the schema layer found errors; each
/// rule skips quietly when a variable it depends on is missing or
/// ill-typed, since the schema layer already reported it.
pub fn validate_hostvars(hostvars: &Hostvars) -> Vec<HostvarsError> {
    let mut errors = Vec::new();
    kipre_schema::validate_all(hostvars, &mut errors);

    let view = LocalhostView::new(hostvars);
    check_ki_cp_ha_mode_vip(&view, &mut errors);
    check_internal_network_subnets(&view, &mut errors);
    check_k8s_ingress_classes(&view, &mut errors);
    check_aipub_ha_mode_storage_class(&view, &mut errors);
    check_aipub_cp_nodes(&view, &mut errors);
    errors
}

/// Rule 1: `ki_cp_ha_mode = true` requires `ki_cp_ha_mode_vip`.
pub fn check_ki_cp_ha_mode_vip(view: &LocalhostView<'_>, errors: &mut Vec<HostvarsError>) {
    check_flag_dependency(view, errors, "ki_cp_ha_mode", "ki_cp_ha_mode_vip");
}

/// Rule 2: internal-network subnet consistency.
///
/// Every host must resolve to at least one internal-network interface;
/// all control-plane hosts must share one subnet; and with HA mode on,
/// the VIP must lie inside that shared subnet.
///
/// After the per-host interface check this rule returns early if *any*
/// error has been collected so far — schema errors included. Evaluating
/// subnet consistency over hosts that are already known to be broken
/// would only cascade, so the consistency and containment checks only
/// run on an otherwise clean document.
pub fn check_internal_network_subnets(view: &LocalhostView<'_>, errors: &mut Vec<HostvarsError>) {
    let Some(hosts) = view.mapping("internal_network_hosts") else {
        return;
    };
    let subnets_input = stringify(view.raw("internal_network_subnets"));

    for (ih, host) in hosts {
        let Some(ih) = ih.as_str() else { continue };
        let resolved = host
            .get("interfaces")
            .and_then(Value::as_sequence)
            .map_or(0, |interfaces| interfaces.len());
        if resolved == 0 {
            errors.push(HostvarsError::new(
                LOCALHOST,
                FieldPath::of("internal_network_subnets"),
                subnets_input.clone(),
                format!("Node[\"{ih}\"] not belong to any of given internal_network_subnets"),
            ));
        }
    }
    if !errors.is_empty() {
        return;
    }

    let Some(cp_nodes) = view.group("ki_cp_node") else {
        return;
    };
    let mut subnets: Vec<&str> = Vec::new();
    for node in &cp_nodes {
        let Some(subnet) = hosts
            .get(*node)
            .and_then(|host| host.get("interfaces"))
            .and_then(Value::as_sequence)
            .and_then(|interfaces| interfaces.first())
            .and_then(|interface| interface.get("subnet"))
            .and_then(Value::as_str)
        else {
            return;
        };
        subnets.push(subnet);
    }
    let distinct: BTreeSet<&str> = subnets.iter().copied().collect();
    if distinct.len() != 1 {
        errors.push(HostvarsError::new(
            LOCALHOST,
            FieldPath::of("internal_network_subnets"),
            subnets_input.clone(),
            "Nodes in ki_cp_node group must belong to same subnet",
        ));
    }
    if view.flag("ki_cp_ha_mode") == Some(true) && distinct.len() == 1 {
        let Some(subnet) = subnets.first() else {
            return;
        };
        let Ok(cidr) = parse_network(subnet) else {
            return;
        };
        let Some(vip_str) = view.text("ki_cp_ha_mode_vip") else {
            return;
        };
        let Ok(vip) = vip_str.parse::<Ipv4Addr>() else {
            return;
        };
        if !cidr.contains(&vip) {
            errors.push(HostvarsError::new(
                LOCALHOST,
                FieldPath::of("ki_cp_ha_mode_vip"),
                vip_str,
                "Value for variable[\"ki_cp_ha_mode_vip\"] must be ip address which belongs \
                 to a subnet of nodes in ki_cp_node group",
            ));
        }
    }
}

/// Rule 3: ingress classes.
///
/// Class names must be unique; a duplicate is reported once and stops
/// validation of the remaining classes, since membership checks against
/// a broken name set are not meaningful. For each class, every
/// controller node must belong to the `k8s_node` group, and `ha_mode`
/// requires `ha_mode_vip`.
pub fn check_k8s_ingress_classes(view: &LocalhostView<'_>, errors: &mut Vec<HostvarsError>) {
    let Some(classes) = view.sequence("k8s_ingress_classes") else {
        return;
    };
    let Some(k8s_nodes) = view.group("k8s_node") else {
        return;
    };
    let k8s_nodes: BTreeSet<&str> = k8s_nodes.into_iter().collect();

    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for (idx, class) in classes.iter().enumerate() {
        if let Some(name) = class.get("name").and_then(Value::as_str) {
            if !seen.insert(name) {
                errors.push(HostvarsError::new(
                    LOCALHOST,
                    FieldPath::of("k8s_ingress_classes").index(idx).key("name"),
                    name,
                    format!("Ingress class name[\"{name}\"] duplicated"),
                ));
                break;
            }
        }

        if let Some(controller_nodes) = class.get("controller_nodes") {
            let nodes = controller_nodes
                .as_sequence()
                .map_or(&[][..], Vec::as_slice);
            for node in nodes.iter().filter_map(Value::as_str) {
                if !k8s_nodes.contains(node) {
                    errors.push(HostvarsError::new(
                        LOCALHOST,
                        FieldPath::of("k8s_ingress_classes")
                            .index(idx)
                            .key("controller_nodes"),
                        stringify(controller_nodes),
                        format!(
                            "Node[\"{node}\"] in value for variable[\"controller_nodes\"] \
                             must belong to k8s_node group"
                        ),
                    ));
                }
            }
        }

        if class.get("ha_mode").and_then(Value::as_bool) == Some(true) {
            let vip = class.get("ha_mode_vip").unwrap_or(&NULL);
            if vip.is_null() {
                errors.push(HostvarsError::new(
                    LOCALHOST,
                    FieldPath::of("k8s_ingress_classes").index(idx).key("ha_mode_vip"),
                    stringify(vip),
                    "Variable[\"ha_mode_vip\"] must be set when value for \
                     variable[\"ha_mode\"] is true",
                ));
            }
        }
    }
}

/// Rule 4: `aipub_ha_mode = true` requires `aipub_ha_mode_storage_class`.
pub fn check_aipub_ha_mode_storage_class(
    view: &LocalhostView<'_>,
    errors: &mut Vec<HostvarsError>,
) {
    check_flag_dependency(view, errors, "aipub_ha_mode", "aipub_ha_mode_storage_class");
}

/// Rule 5: platform control-plane nodes must be a subset of the
/// `k8s_node` group.
pub fn check_aipub_cp_nodes(view: &LocalhostView<'_>, errors: &mut Vec<HostvarsError>) {
    let Some(cp_nodes) = view.str_list("aipub_cp_nodes") else {
        return;
    };
    let Some(k8s_nodes) = view.group("k8s_node") else {
        return;
    };
    let k8s_nodes: BTreeSet<&str> = k8s_nodes.into_iter().collect();
    if !cp_nodes.iter().all(|node| k8s_nodes.contains(node)) {
        errors.push(HostvarsError::new(
            LOCALHOST,
            FieldPath::of("aipub_cp_nodes"),
            stringify(view.raw("aipub_cp_nodes")),
            "Must belong to k8s_node group",
        ));
    }
}

/// The shared `(flag, dependent_value)` shape: when the flag variable is
/// true, the dependent variable must be non-null (absent reads as null).
fn check_flag_dependency(
    view: &LocalhostView<'_>,
    errors: &mut Vec<HostvarsError>,
    flag: &str,
    dependent: &str,
) {
    if view.flag(flag) != Some(true) {
        return;
    }
    let value = view.raw(dependent);
    if value.is_null() {
        errors.push(HostvarsError::new(
            LOCALHOST,
            FieldPath::of(dependent),
            stringify(value),
            format!(
                "Variable[\"{dependent}\"] must be set when value for \
                 variable[\"{flag}\"] is true"
            ),
        ));
    }
}
