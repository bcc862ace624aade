//! End-to-end pipeline runs over complete hostvars documents: schema
//! layer plus the full semantic rule set, checked through
//! [`kipre_rules::validate_hostvars`] exactly as the CLI drives it.

use kipre_core::{render_errors, FatalError, Hostvars};
use kipre_rules::validate_hostvars;

/// Every declared variable of one host entry, all values valid, at the
/// given indentation.
fn entry(i: &str) -> String {
    format!(
        "{i}ki_var_root_path: /var/lib/ki\n\
         {i}containerd_root_path: /var/lib/containerd\n\
         {i}docker_root_path: /var/lib/docker\n\
         {i}internal_network_subnets: [10.0.0.0/24, 10.0.1.0/24]\n\
         {i}internal_network_extra_zone: extra.example.com\n\
         {i}internal_network_extra_zone_a_records: [{{name: gw, ip: 10.0.0.1}}]\n\
         {i}ki_cp_ha_mode: true\n\
         {i}ki_cp_ha_mode_vip: 10.0.0.5\n\
         {i}ki_cp_dns_dnssec_validation: false\n\
         {i}ki_cp_dns_server_upstream_servers: [8.8.8.8]\n\
         {i}ki_cp_ntp_server_upstream_servers: [time.example.com, 10.0.0.2]\n\
         {i}k8s_certificate_validity_period: 8760h\n\
         {i}k8s_ingress_classes: [{{name: nginx, controller_nodes: [node1], ha_mode: false, \
         http_hostport: 80, https_hostport: 443}}]\n\
         {i}aipub_ingress_zone: apps.example.com\n\
         {i}aipub_ha_mode: false\n\
         {i}aipub_ha_mode_storage_class: null\n\
         {i}aipub_cp_nodes: [node1]\n\
         {i}aipub_keycloak_ingress_class: nginx\n\
         {i}aipub_keycloak_ingress_subdomain: keycloak\n\
         {i}aipub_keycloak_replica_count: 1\n\
         {i}aipub_keycloak_postgresql_storage_size: 10Gi\n\
         {i}aipub_harbor_ingress_class: nginx\n\
         {i}aipub_harbor_ingress_subdomain: harbor\n\
         {i}aipub_harbor_replica_count: 1\n\
         {i}aipub_harbor_registry_storage_size: 100Gi\n\
         {i}aipub_harbor_postgresql_storage_size: 10Gi\n\
         {i}aipub_harbor_redis_storage_size: 1Gi\n\
         {i}ansible_python_interpreter: /usr/bin/python3\n\
         {i}ansible_port: 22\n\
         {i}ansible_ssh_user: ubuntu\n\
         {i}ki_env_path: /opt/ki\n\
         {i}ki_env_scripts_path: /opt/ki/scripts\n\
         {i}ki_env_bin_path: /opt/ki/bin\n\
         {i}ki_env_ki_venv_path: /opt/ki/venv\n\
         {i}ki_tmp_root_path: /tmp/ki\n\
         {i}ki_tmp_localhost_vars_path: /tmp/ki/localhost-vars.yml\n\
         {i}ki_tmp_vars_path: /tmp/ki/vars.yml\n\
         {i}ki_tmp_pki_path: /tmp/ki/pki\n\
         {i}ki_tmp_ki_ca_crt_path: /tmp/ki/pki/ca.crt\n\
         {i}ki_tmp_join_credentials_path: /tmp/ki/join-credentials.yml\n\
         {i}ki_tmp_charts_path: /tmp/ki/charts\n\
         {i}ki_etc_root_path: /etc/ki\n\
         {i}ki_etc_pki_path: /etc/ki/pki\n\
         {i}ki_etc_services_path: /etc/ki/services\n\
         {i}ki_etc_kubeadm_path: /etc/ki/kubeadm\n\
         {i}ki_etc_charts_path: /etc/ki/charts\n\
         {i}ki_var_aipub_local_pv_path: /var/lib/ki/aipub-pv\n\
         {i}internal_network_ip: 10.0.0.11\n\
         {i}internal_network_zone: ki.example.com\n\
         {i}internal_network_ki_cp_dns_name: cp.ki.example.com\n\
         {i}ki_cp_k8s_cp_lb_port: 16443\n\
         {i}ki_cp_k8s_cp_lb_stats_port: 18404\n\
         {i}ki_cp_k8s_registry_port: 5000\n\
         {i}ki_cp_aipub_registry_port: 5001\n\
         {i}k8s_version: 1.28.4\n\
         {i}k8s_apiserver_port: 6443\n\
         {i}k8s_service_subnet: 10.96.0.0/12\n\
         {i}k8s_pod_subnet: 10.244.0.0/16\n\
         {i}k8s_ca_certificate_validity_period: 87600h\n\
         {i}k8s_cp: true\n\
         {i}nvidia_gpu: false\n\
         {i}target_node: null\n\
         {i}target_node_op: null\n"
    )
}

/// A complete document: the aggregate `localhost` entry (with groups and
/// the resolved interface map) plus one remote node.
fn fixture() -> String {
    format!(
        "localhost:\n\
         {localhost_vars}\
         \x20 groups:\n\
         \x20   k8s_node: [node1]\n\
         \x20   ki_cp_node: [node1]\n\
         \x20 internal_network_hosts:\n\
         \x20   node1:\n\
         \x20     interfaces:\n\
         \x20     - {{if: eth0, subnet: 10.0.0.0/24, ip: 10.0.0.11}}\n\
         node1:\n\
         {node_vars}",
        localhost_vars = entry("  "),
        node_vars = entry("  "),
    )
}

fn run(yaml: &str) -> Vec<kipre_core::HostvarsError> {
    let hostvars = Hostvars::parse(yaml).unwrap();
    validate_hostvars(&hostvars)
}

#[test]
fn test_valid_document_passes() {
    let errors = run(&fixture());
    assert!(errors.is_empty(), "unexpected errors:\n{}", render_errors(&errors));
}

#[test]
fn test_validation_is_idempotent() {
    let yaml = fixture().replacen("ansible_port: 22", "ansible_port: 70000", 2);
    let hostvars = Hostvars::parse(&yaml).unwrap();
    let first = validate_hostvars(&hostvars);
    let second = validate_hostvars(&hostvars);
    assert_eq!(render_errors(&first), render_errors(&second));
    assert_eq!(first.len(), 2);
}

#[test]
fn test_empty_entry_reports_every_non_optional_field() {
    let yaml = format!(
        "localhost:\n{}node1: {{}}\n",
        entry("  ")
    );
    let errors = run(&yaml);
    // 23 non-optional Vars fields plus 36 Constant fields for node1; the
    // semantic layer adds nothing because localhost itself is intact and
    // rule 2 skips without an interface map.
    assert_eq!(errors.len(), 59);
    assert!(errors.iter().all(|e| e.ih == "node1"));
    assert!(errors.iter().all(|e| e.msg == "field is required"));
}

#[test]
fn test_ha_mode_without_vip() {
    let yaml = fixture().replacen("ki_cp_ha_mode_vip: 10.0.0.5", "ki_cp_ha_mode_vip: null", 2);
    let errors = run(&yaml);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].ih, "localhost");
    assert_eq!(errors[0].location.to_string(), "ki_cp_ha_mode_vip");
    assert_eq!(
        errors[0].msg,
        "Variable[\"ki_cp_ha_mode_vip\"] must be set when value for \
         variable[\"ki_cp_ha_mode\"] is true"
    );
}

#[test]
fn test_vip_outside_control_plane_subnet() {
    let yaml = fixture().replacen("ki_cp_ha_mode_vip: 10.0.0.5", "ki_cp_ha_mode_vip: 10.1.0.5", 2);
    let errors = run(&yaml);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].location.to_string(), "ki_cp_ha_mode_vip");
    assert_eq!(errors[0].input, "10.1.0.5");
    assert_eq!(
        errors[0].msg,
        "Value for variable[\"ki_cp_ha_mode_vip\"] must be ip address which belongs \
         to a subnet of nodes in ki_cp_node group"
    );
}

#[test]
fn test_schema_error_suppresses_subnet_checks() {
    // An invalid port on node1 plus a node without interfaces: only the
    // schema error and the per-host resolution error surface; the subnet
    // consistency check does not run on a dirty document.
    let yaml = fixture()
        .replacen("ansible_port: 22", "ansible_port: -1", 2)
        .replace(
            "\x20     interfaces:\n\
             \x20     - {if: eth0, subnet: 10.0.0.0/24, ip: 10.0.0.11}\n",
            "\x20     interfaces: []\n",
        );
    let errors = run(&yaml);
    assert_eq!(errors.len(), 3);
    assert!(errors
        .iter()
        .any(|e| e.msg.contains("not belong to any of given internal_network_subnets")));
    assert!(!errors.iter().any(|e| e.msg.contains("same subnet")));
}

#[test]
fn test_duplicate_ingress_class_name() {
    let yaml = fixture().replacen(
        "k8s_ingress_classes: [{name: nginx, controller_nodes: [node1], ha_mode: false, \
         http_hostport: 80, https_hostport: 443}]",
        "k8s_ingress_classes: [{name: nginx, controller_nodes: [node1], ha_mode: false, \
         http_hostport: 80, https_hostport: 443}, {name: nginx, controller_nodes: [ghost], \
         ha_mode: true, http_hostport: 81, https_hostport: 444}]",
        1,
    );
    let errors = run(&yaml);
    // Fail-fast: the duplicate masks the second entry's unknown node and
    // missing per-class VIP.
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].location.to_string(), "k8s_ingress_classes / 1 / name");
    assert_eq!(errors[0].msg, "Ingress class name[\"nginx\"] duplicated");
}

#[test]
fn test_controller_node_outside_k8s_node_group() {
    let yaml = fixture().replacen("controller_nodes: [node1]", "controller_nodes: [nodeX]", 1);
    let errors = run(&yaml);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].location.to_string(),
        "k8s_ingress_classes / 0 / controller_nodes"
    );
    assert!(errors[0].msg.contains("Node[\"nodeX\"]"));
}

#[test]
fn test_aipub_ha_mode_without_storage_class() {
    let yaml = fixture().replacen("aipub_ha_mode: false", "aipub_ha_mode: true", 1);
    let errors = run(&yaml);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].location.to_string(), "aipub_ha_mode_storage_class");
}

#[test]
fn test_aipub_cp_nodes_outside_k8s_node_group() {
    let yaml = fixture().replacen("aipub_cp_nodes: [node1]", "aipub_cp_nodes: [node1, nodeX]", 1);
    let errors = run(&yaml);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].location.to_string(), "aipub_cp_nodes");
    assert_eq!(errors[0].msg, "Must belong to k8s_node group");
}

#[test]
fn test_report_rendering() {
    let yaml = fixture().replacen("ansible_port: 22", "ansible_port: 70000", 2);
    let errors = run(&yaml);
    let report = render_errors(&errors);
    assert_eq!(
        report,
        "Error 1:\n\
         \x20 ih: localhost\n\
         \x20 location: ansible_port\n\
         \x20 input: 70000\n\
         \x20 msg: value must be an integer in [0, 65535]\n\
         Error 2:\n\
         \x20 ih: node1\n\
         \x20 location: ansible_port\n\
         \x20 input: 70000\n\
         \x20 msg: value must be an integer in [0, 65535]\n"
    );
}

#[test]
fn test_missing_localhost_is_fatal() {
    let err = Hostvars::parse("node1: {}\n").unwrap_err();
    assert!(matches!(err, FatalError::MissingLocalhost));
}
