//! # Schema Model — Declarative Field Tables
//!
//! One [`FieldSpec`] row per installer variable. Rows appear in
//! declaration order; error output preserves this order, so reordering a
//! table is an observable change.
//!
//! Presence has three states, matching the variable models the installer
//! ships:
//!
//! - [`Presence::Required`] — the variable must be present and non-null.
//! - [`Presence::Nullable`] — the variable must be present but may be
//!   null (`internal_network_ip`, `target_node`, `target_node_op`).
//! - [`Presence::Optional`] — the variable may be absent or null.

/// Primitive type of a field (or of the elements of a list field).
#[derive(Debug, Clone, Copy)]
pub enum Primitive {
    /// Absolute filesystem path.
    AbsolutePath,
    /// Dotted-quad IPv4 address.
    Ipv4Addr,
    /// IPv4 network in CIDR notation, no host bits set.
    Ipv4Net,
    /// Boolean flag.
    Bool,
    /// Integer in `[0, 65535]`.
    Port,
    /// Integer in `[1, ∞)`.
    PositiveInt,
    /// Unconstrained string.
    Text,
    /// Fully qualified domain name.
    Fqdn,
    /// Kubernetes object name / DNS sub-domain.
    ObjectName,
    /// Certificate validity period (`8760h`).
    ValidityPeriod,
    /// Binary storage size (`10Gi`).
    StorageSize,
    /// POSIX login name.
    SshUser,
    /// IPv4 address or FQDN, tried left to right.
    IpOrFqdn,
    /// Nested object validated against its own field table.
    Object(&'static [FieldSpec]),
}

/// Whether a field holds one value or a list of values.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// A single value of the given primitive type.
    Scalar(Primitive),
    /// A list whose every element has the given primitive type.
    List(Primitive),
}

/// Presence requirement of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Present and non-null.
    Required,
    /// Present, null allowed.
    Nullable,
    /// Absent or null allowed.
    Optional,
}

/// One row of a schema table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Variable name as it appears in the host entry.
    pub name: &'static str,
    /// Value shape and primitive type.
    pub shape: Shape,
    /// Presence requirement.
    pub presence: Presence,
}

const fn required(name: &'static str, shape: Shape) -> FieldSpec {
    FieldSpec {
        name,
        shape,
        presence: Presence::Required,
    }
}

const fn nullable(name: &'static str, shape: Shape) -> FieldSpec {
    FieldSpec {
        name,
        shape,
        presence: Presence::Nullable,
    }
}

const fn optional(name: &'static str, shape: Shape) -> FieldSpec {
    FieldSpec {
        name,
        shape,
        presence: Presence::Optional,
    }
}

use Primitive::*;
use Shape::{List, Scalar};

/// DNS A-record entry for the extra internal-network zone.
pub const A_RECORD_FIELDS: &[FieldSpec] = &[
    required("name", Scalar(Text)),
    required("ip", Scalar(Ipv4Addr)),
];

/// One ingress-class entry: a named ingress controller deployment, the
/// nodes that run it, its HA configuration, and its exposed host ports.
pub const INGRESS_CLASS_FIELDS: &[FieldSpec] = &[
    required("name", Scalar(ObjectName)),
    required("controller_nodes", List(ObjectName)),
    required("ha_mode", Scalar(Bool)),
    optional("ha_mode_vip", Scalar(Ipv4Addr)),
    required("http_hostport", Scalar(Port)),
    required("https_hostport", Scalar(Port)),
];

/// The Vars group: per-deployment tunables.
pub const VARS_SCHEMA: &[FieldSpec] = &[
    required("ki_var_root_path", Scalar(AbsolutePath)),
    required("containerd_root_path", Scalar(AbsolutePath)),
    required("docker_root_path", Scalar(AbsolutePath)),
    required("internal_network_subnets", List(Ipv4Net)),
    optional("internal_network_extra_zone", Scalar(Fqdn)),
    optional(
        "internal_network_extra_zone_a_records",
        List(Object(A_RECORD_FIELDS)),
    ),
    required("ki_cp_ha_mode", Scalar(Bool)),
    optional("ki_cp_ha_mode_vip", Scalar(Ipv4Addr)),
    required("ki_cp_dns_dnssec_validation", Scalar(Bool)),
    required("ki_cp_dns_server_upstream_servers", List(Ipv4Addr)),
    required("ki_cp_ntp_server_upstream_servers", List(IpOrFqdn)),
    required("k8s_certificate_validity_period", Scalar(ValidityPeriod)),
    required("k8s_ingress_classes", List(Object(INGRESS_CLASS_FIELDS))),
    required("aipub_ingress_zone", Scalar(Fqdn)),
    required("aipub_ha_mode", Scalar(Bool)),
    optional("aipub_ha_mode_storage_class", Scalar(ObjectName)),
    required("aipub_cp_nodes", List(ObjectName)),
    required("aipub_keycloak_ingress_class", Scalar(ObjectName)),
    required("aipub_keycloak_ingress_subdomain", Scalar(ObjectName)),
    required("aipub_keycloak_replica_count", Scalar(PositiveInt)),
    required("aipub_keycloak_postgresql_storage_size", Scalar(StorageSize)),
    required("aipub_harbor_ingress_class", Scalar(ObjectName)),
    required("aipub_harbor_ingress_subdomain", Scalar(ObjectName)),
    required("aipub_harbor_replica_count", Scalar(PositiveInt)),
    required("aipub_harbor_registry_storage_size", Scalar(StorageSize)),
    required("aipub_harbor_postgresql_storage_size", Scalar(StorageSize)),
    required("aipub_harbor_redis_storage_size", Scalar(StorageSize)),
];

/// The Constant group: fixed and derived installer paths and ports.
pub const CONSTANT_SCHEMA: &[FieldSpec] = &[
    required("ansible_python_interpreter", Scalar(AbsolutePath)),
    required("ansible_port", Scalar(Port)),
    required("ansible_ssh_user", Scalar(SshUser)),
    required("ki_env_path", Scalar(AbsolutePath)),
    required("ki_env_scripts_path", Scalar(AbsolutePath)),
    required("ki_env_bin_path", Scalar(AbsolutePath)),
    required("ki_env_ki_venv_path", Scalar(AbsolutePath)),
    required("ki_tmp_root_path", Scalar(AbsolutePath)),
    required("ki_tmp_localhost_vars_path", Scalar(AbsolutePath)),
    required("ki_tmp_vars_path", Scalar(AbsolutePath)),
    required("ki_tmp_pki_path", Scalar(AbsolutePath)),
    required("ki_tmp_ki_ca_crt_path", Scalar(AbsolutePath)),
    required("ki_tmp_join_credentials_path", Scalar(AbsolutePath)),
    required("ki_tmp_charts_path", Scalar(AbsolutePath)),
    required("ki_etc_root_path", Scalar(AbsolutePath)),
    required("ki_etc_pki_path", Scalar(AbsolutePath)),
    required("ki_etc_services_path", Scalar(AbsolutePath)),
    required("ki_etc_kubeadm_path", Scalar(AbsolutePath)),
    required("ki_etc_charts_path", Scalar(AbsolutePath)),
    required("ki_var_aipub_local_pv_path", Scalar(AbsolutePath)),
    nullable("internal_network_ip", Scalar(Ipv4Addr)),
    required("internal_network_zone", Scalar(Fqdn)),
    required("internal_network_ki_cp_dns_name", Scalar(Fqdn)),
    required("ki_cp_k8s_cp_lb_port", Scalar(Port)),
    required("ki_cp_k8s_cp_lb_stats_port", Scalar(Port)),
    required("ki_cp_k8s_registry_port", Scalar(Port)),
    required("ki_cp_aipub_registry_port", Scalar(Port)),
    required("k8s_version", Scalar(Text)),
    required("k8s_apiserver_port", Scalar(Port)),
    required("k8s_service_subnet", Scalar(Ipv4Net)),
    required("k8s_pod_subnet", Scalar(Ipv4Net)),
    required("k8s_ca_certificate_validity_period", Scalar(ValidityPeriod)),
    required("k8s_cp", Scalar(Bool)),
    required("nvidia_gpu", Scalar(Bool)),
    nullable("target_node", Scalar(Text)),
    nullable("target_node_op", Scalar(Text)),
];

/// Both schema groups, in check order: Vars first, then Constant.
pub const SCHEMA_GROUPS: &[&[FieldSpec]] = &[VARS_SCHEMA, CONSTANT_SCHEMA];
