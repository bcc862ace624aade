//! # Schema Walker
//!
//! Generic, table-driven validation of host entries against the schema
//! tables in [`crate::model`]. The walker revisits every declared field
//! for every host and every group, accumulating all mismatches — missing
//! required fields, wrong primitive types, pattern mismatches, and range
//! violations — in field declaration order, then list index order.

use kipre_core::value::{self, stringify};
use kipre_core::{FieldPath, Hostvars, HostvarsError, PathSeg};
use serde_yaml::Value;

use crate::model::{FieldSpec, Presence, Primitive, Shape, SCHEMA_GROUPS};

/// Validate every host entry of the document against both schema groups.
pub fn validate_all(hostvars: &Hostvars, errors: &mut Vec<HostvarsError>) {
    for (ih, entry) in hostvars.hosts() {
        validate_host(ih, entry, errors);
    }
}

/// Validate one host entry against both schema groups.
pub fn validate_host(ih: &str, entry: &Value, errors: &mut Vec<HostvarsError>) {
    for group in SCHEMA_GROUPS {
        validate_group(ih, entry, group, errors);
    }
}

/// Validate one host entry against a single schema group.
pub fn validate_group(
    ih: &str,
    entry: &Value,
    group: &[FieldSpec],
    errors: &mut Vec<HostvarsError>,
) {
    validate_fields(ih, entry, group, &FieldPath::root(), errors);
}

fn validate_fields(
    ih: &str,
    entry: &Value,
    fields: &[FieldSpec],
    base: &FieldPath,
    errors: &mut Vec<HostvarsError>,
) {
    let Some(map) = entry.as_mapping() else {
        errors.push(HostvarsError::new(
            ih,
            base.clone(),
            stringify(entry),
            "value must be a mapping of variables",
        ));
        return;
    };
    for spec in fields {
        let path = base.child(PathSeg::from(spec.name));
        match map.get(spec.name) {
            None => {
                if spec.presence != Presence::Optional {
                    errors.push(HostvarsError::new(ih, path, "null", "field is required"));
                }
            }
            Some(Value::Null) if spec.presence != Presence::Required => {}
            Some(v) => check_shape(ih, &path, v, spec.shape, errors),
        }
    }
}

fn check_shape(
    ih: &str,
    path: &FieldPath,
    value: &Value,
    shape: Shape,
    errors: &mut Vec<HostvarsError>,
) {
    match shape {
        Shape::Scalar(primitive) => check_primitive(ih, path, value, primitive, errors),
        Shape::List(primitive) => {
            let Some(seq) = value.as_sequence() else {
                errors.push(HostvarsError::new(
                    ih,
                    path.clone(),
                    stringify(value),
                    "value must be a list",
                ));
                return;
            };
            for (idx, item) in seq.iter().enumerate() {
                let item_path = path.child(PathSeg::from(idx));
                check_primitive(ih, &item_path, item, primitive, errors);
            }
        }
    }
}

fn check_primitive(
    ih: &str,
    path: &FieldPath,
    value: &Value,
    primitive: Primitive,
    errors: &mut Vec<HostvarsError>,
) {
    let result = match primitive {
        Primitive::AbsolutePath => value::absolute_path(value).map(drop),
        Primitive::Ipv4Addr => value::ipv4_addr(value).map(drop),
        Primitive::Ipv4Net => value::ipv4_net(value).map(drop),
        Primitive::Bool => match value.as_bool() {
            Some(_) => Ok(()),
            None => Err(kipre_core::ValueError::TypeMismatch {
                expected: "a boolean",
                input: stringify(value),
            }),
        },
        Primitive::Port => value::port(value).map(drop),
        Primitive::PositiveInt => value::positive_int(value).map(drop),
        Primitive::Text => value::text(value).map(drop),
        Primitive::Fqdn => value::fqdn(value).map(drop),
        Primitive::ObjectName => value::object_name(value).map(drop),
        Primitive::ValidityPeriod => value::validity_period(value).map(drop),
        Primitive::StorageSize => value::storage_size(value).map(drop),
        Primitive::SshUser => value::ssh_user(value).map(drop),
        Primitive::IpOrFqdn => value::ip_or_fqdn(value).map(drop),
        Primitive::Object(fields) => {
            validate_fields(ih, value, fields, path, errors);
            return;
        }
    };
    if let Err(err) = result {
        errors.push(HostvarsError::new(
            ih,
            path.clone(),
            err.input().to_string(),
            err.to_string(),
        ));
    }
}
