//! # Primitive Value Validators
//!
//! Reusable predicate/parsers for the domain value types the schema layer
//! is built from. Each validator takes a raw YAML value and either
//! returns the typed value or fails with a [`ValueError`] that preserves
//! the offending input verbatim.
//!
//! ## Pattern Constants
//!
//! The string patterns below are normative — deployment automation and
//! certificate tooling rely on them byte-for-byte, so they must not be
//! "cleaned up". The FQDN pattern uses lookaround (`(?!-)` / `(?<!-)`),
//! which is why the patterns compile under `fancy-regex`. All regexes are
//! compiled once into process-wide statics; there is no other global
//! state.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use fancy_regex::Regex;
use ipnet::Ipv4Net;
use lazy_static::lazy_static;
use serde_yaml::Value;
use thiserror::Error;

/// Fully qualified domain name, e.g. `ntp.internal.example.com`.
pub const FQDN_PATTERN: &str = r"^((?!-)[A-Za-z0-9-]{1,63}(?<!-)\.)+[A-Za-z]{2,}$";
/// DNS sub-domain label list, lowercase alphanumerics with `-` and `.`.
pub const SUB_DOMAIN_PATTERN: &str = r"^[a-z0-9]([a-z0-9\-.]*[a-z0-9])?$";
/// Kubernetes object names share the sub-domain shape.
pub const K8S_OBJ_NAME_PATTERN: &str = SUB_DOMAIN_PATTERN;
/// Certificate validity period, whole hours: `8760h`.
pub const VALIDITY_PERIOD_PATTERN: &str = r"^[0-9]+h$";
/// Binary storage size: `10Gi`, `512Mi`.
pub const STORAGE_SIZE_PATTERN: &str = r"^[0-9]+[EPTGMK]i$";
/// POSIX login name as accepted by useradd.
pub const SSH_USER_PATTERN: &str = r"^[a-z_]([a-z0-9_-]{0,31}|[a-z0-9_-]{0,30}\$)$";

lazy_static! {
    static ref FQDN_RE: Regex = Regex::new(FQDN_PATTERN).unwrap();
    static ref K8S_OBJ_NAME_RE: Regex = Regex::new(K8S_OBJ_NAME_PATTERN).unwrap();
    static ref VALIDITY_PERIOD_RE: Regex = Regex::new(VALIDITY_PERIOD_PATTERN).unwrap();
    static ref STORAGE_SIZE_RE: Regex = Regex::new(STORAGE_SIZE_PATTERN).unwrap();
    static ref SSH_USER_RE: Regex = Regex::new(SSH_USER_PATTERN).unwrap();
}

/// A primitive validation failure, carrying the offending input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The raw value does not have the expected shape or type.
    #[error("value must be {expected}")]
    TypeMismatch {
        /// Description of the expected value, e.g. `"an absolute path"`.
        expected: &'static str,
        /// Stringified offending input.
        input: String,
    },

    /// A string value does not match its normative pattern.
    #[error("value does not match pattern {pattern:?}")]
    PatternMismatch {
        /// The normative pattern the value was checked against.
        pattern: &'static str,
        /// The offending string, verbatim.
        input: String,
    },

    /// An integer value is outside its closed bounds.
    #[error("value must be an integer in [{min}, {max}]")]
    RangeViolation {
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
        /// Stringified offending input.
        input: String,
    },

    /// An integer value is zero or negative where a count is required.
    #[error("value must be a positive integer")]
    NotPositive {
        /// Stringified offending input.
        input: String,
    },
}

impl ValueError {
    /// The offending input preserved in the error.
    pub fn input(&self) -> &str {
        match self {
            ValueError::TypeMismatch { input, .. }
            | ValueError::PatternMismatch { input, .. }
            | ValueError::RangeViolation { input, .. }
            | ValueError::NotPositive { input } => input,
        }
    }
}

/// Either an IPv4 address or an FQDN. Interpretations are tried left to
/// right and the first success wins — no ambiguity reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpOrFqdn {
    /// The value parsed as a dotted-quad address.
    Ip(Ipv4Addr),
    /// The value matched the FQDN pattern.
    Fqdn(String),
}

fn type_mismatch(expected: &'static str, value: &Value) -> ValueError {
    ValueError::TypeMismatch {
        expected,
        input: stringify(value),
    }
}

fn as_text<'a>(value: &'a Value, expected: &'static str) -> Result<&'a str, ValueError> {
    value.as_str().ok_or_else(|| type_mismatch(expected, value))
}

fn matches(re: &Regex, s: &str) -> bool {
    re.is_match(s).unwrap_or(false)
}

/// An absolute filesystem path. Relative paths fail.
pub fn absolute_path(value: &Value) -> Result<PathBuf, ValueError> {
    let s = as_text(value, "an absolute path")?;
    let path = PathBuf::from(s);
    if path.is_absolute() {
        Ok(path)
    } else {
        Err(type_mismatch("an absolute path", value))
    }
}

/// A dotted-quad IPv4 address.
pub fn ipv4_addr(value: &Value) -> Result<Ipv4Addr, ValueError> {
    let s = as_text(value, "a valid IPv4 address")?;
    s.parse::<Ipv4Addr>()
        .map_err(|_| type_mismatch("a valid IPv4 address", value))
}

/// An IPv4 network in CIDR notation. Host bits beyond the prefix are
/// rejected, matching strict network parsing.
pub fn ipv4_net(value: &Value) -> Result<Ipv4Net, ValueError> {
    let s = as_text(value, "a valid IPv4 network")?;
    parse_network(s)
}

/// Parse a CIDR string strictly. A bare address is accepted as a `/32`;
/// a network with host bits set beyond its prefix is rejected.
pub fn parse_network(s: &str) -> Result<Ipv4Net, ValueError> {
    let net = if s.contains('/') {
        s.parse::<Ipv4Net>().map_err(|_| ValueError::TypeMismatch {
            expected: "a valid IPv4 network",
            input: s.to_string(),
        })?
    } else {
        let addr = s.parse::<Ipv4Addr>().map_err(|_| ValueError::TypeMismatch {
            expected: "a valid IPv4 network",
            input: s.to_string(),
        })?;
        Ipv4Net::from(addr)
    };
    if net.addr() != net.network() {
        return Err(ValueError::TypeMismatch {
            expected: "an IPv4 network with no host bits set",
            input: s.to_string(),
        });
    }
    Ok(net)
}

/// An integer in `[0, 65535]`.
pub fn port(value: &Value) -> Result<u16, ValueError> {
    let Some(n) = value.as_i64() else {
        if value.as_u64().is_some() {
            // Larger than i64::MAX: an integer, but far out of range.
            return Err(ValueError::RangeViolation {
                min: 0,
                max: 65535,
                input: stringify(value),
            });
        }
        return Err(type_mismatch("an integer", value));
    };
    u16::try_from(n).map_err(|_| ValueError::RangeViolation {
        min: 0,
        max: 65535,
        input: stringify(value),
    })
}

/// An integer in `[1, ∞)`.
pub fn positive_int(value: &Value) -> Result<u64, ValueError> {
    if value.as_i64().is_none() && value.as_u64().is_none() {
        return Err(type_mismatch("an integer", value));
    }
    match value.as_u64() {
        Some(n) if n >= 1 => Ok(n),
        _ => Err(ValueError::NotPositive {
            input: stringify(value),
        }),
    }
}

/// An unconstrained string.
pub fn text(value: &Value) -> Result<&str, ValueError> {
    as_text(value, "a string")
}

/// A fully qualified domain name.
pub fn fqdn(value: &Value) -> Result<&str, ValueError> {
    patterned(value, FQDN_PATTERN, &FQDN_RE)
}

/// A Kubernetes object name / DNS sub-domain.
pub fn object_name(value: &Value) -> Result<&str, ValueError> {
    patterned(value, K8S_OBJ_NAME_PATTERN, &K8S_OBJ_NAME_RE)
}

/// A certificate validity period such as `8760h`.
pub fn validity_period(value: &Value) -> Result<&str, ValueError> {
    patterned(value, VALIDITY_PERIOD_PATTERN, &VALIDITY_PERIOD_RE)
}

/// A binary storage size such as `10Gi`.
pub fn storage_size(value: &Value) -> Result<&str, ValueError> {
    patterned(value, STORAGE_SIZE_PATTERN, &STORAGE_SIZE_RE)
}

/// A POSIX login name.
pub fn ssh_user(value: &Value) -> Result<&str, ValueError> {
    patterned(value, SSH_USER_PATTERN, &SSH_USER_RE)
}

fn patterned<'a>(
    value: &'a Value,
    pattern: &'static str,
    re: &Regex,
) -> Result<&'a str, ValueError> {
    let s = as_text(value, "a string")?;
    if matches(re, s) {
        Ok(s)
    } else {
        Err(ValueError::PatternMismatch {
            pattern,
            input: s.to_string(),
        })
    }
}

/// An IPv4 address or an FQDN, tried in that order.
pub fn ip_or_fqdn(value: &Value) -> Result<IpOrFqdn, ValueError> {
    let s = as_text(value, "an IPv4 address or a fully qualified domain name")?;
    if let Ok(ip) = s.parse::<Ipv4Addr>() {
        return Ok(IpOrFqdn::Ip(ip));
    }
    if matches(&FQDN_RE, s) {
        return Ok(IpOrFqdn::Fqdn(s.to_string()));
    }
    Err(type_mismatch(
        "an IPv4 address or a fully qualified domain name",
        value,
    ))
}

/// Stringify a raw value for error reporting.
///
/// Scalars render bare, null renders as `null`, and composite values
/// render as compact JSON so that list and mapping inputs stay on one
/// report line.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => match to_json_value(other) {
            Ok(json) => serde_json::to_string(&json).unwrap_or_else(|_| format!("{other:?}")),
            Err(_) => format!("{other:?}"),
        },
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Hostvars documents use only the JSON-compatible subset of YAML; keys
/// that are numbers or booleans are coerced to strings.
pub fn to_json_value(yaml: &Value) -> Result<serde_json::Value, String> {
    match yaml {
        Value::Null => Ok(serde_json::Value::Null),
        Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(serde_json::Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(serde_json::Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        Value::String(s) => Ok(serde_json::Value::String(s.clone())),
        Value::Sequence(seq) => {
            let items: Result<Vec<serde_json::Value>, String> =
                seq.iter().map(to_json_value).collect();
            Ok(serde_json::Value::Array(items?))
        }
        Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, to_json_value(v)?);
            }
            Ok(serde_json::Value::Object(json_map))
        }
        Value::Tagged(tagged) => to_json_value(&tagged.value),
    }
}
