//! Per-kind canonicalizers and their shared plumbing.
//!
//! Each record kind gets one pure function `fn(&Row) -> Result<Canonical,
//! Rejection>`: resolve required fields, apply kind defaults, harvest
//! extensible attributes, assemble nested structures, and emit the document
//! with the kind's fixed key order. Key order is achieved by insertion
//! order (`serde_json` is built with `preserve_order`).

pub mod dhcp;
pub mod dns;
pub mod host;
pub mod zone;

use serde_json::{Map, Value};

use crate::row::{self, Outcome, Row};

/// Why a row produced no document.
///
/// Never fatal to a batch; the driver records it as a warning tagged with
/// the row position.
#[derive(Debug, Clone)]
pub struct Rejection {
    pub reason: String,
    /// The logical fields involved (missing or invalid).
    pub fields: Vec<String>,
}

impl Rejection {
    pub fn missing(fields: Vec<String>) -> Self {
        Self { reason: "missing required field(s)".into(), fields }
    }

    pub fn invalid(field: &str) -> Self {
        Self {
            reason: "invalid value for required field(s)".into(),
            fields: vec![field.to_string()],
        }
    }

    pub fn describe(&self) -> String {
        if self.fields.is_empty() {
            self.reason.clone()
        } else {
            format!("{}: {}", self.reason, self.fields.join(", "))
        }
    }
}

/// A canonical document plus the optional fields that were present but
/// dropped as malformed (surfaced as observability warnings).
#[derive(Debug)]
pub struct Canonical {
    pub doc: Value,
    pub dropped: Vec<String>,
}

impl Canonical {
    pub fn new(doc: Map<String, Value>, dropped: Vec<String>) -> Self {
        Self { doc: Value::Object(doc), dropped }
    }
}

/// Canonicalizer signature stored in the kind catalog.
pub type CanonicalizeFn = fn(&Row) -> Result<Canonical, Rejection>;

// =============================================================================
// Synonym table
// =============================================================================

/// Ordered candidate header spellings for each logical field.
///
/// The Field Resolver tries candidates in this order; a field with no entry
/// resolves by its own name.
pub fn synonyms(field: &str) -> &'static [&'static str] {
    match field {
        "name" => &["name", "fqdn", "hostname", "host_name", "dns_name"],
        "ipv4addr" => &["ipv4addr", "ipv4_address", "ip_address", "ipaddress", "address", "ip"],
        "ipv6addr" => &["ipv6addr", "ipv6_address", "ipv6"],
        "view" => &["view", "dns_view"],
        "network_view" => &["network_view", "networkview", "net_view"],
        "ttl" => &["ttl", "time_to_live"],
        "comment" => &["comment", "description", "notes"],
        "disable" => &["disable", "disabled"],
        "canonical" => &["canonical", "canonical_name", "cname", "target"],
        "mail_exchanger" => &["mail_exchanger", "mx", "exchanger", "mail_server"],
        "preference" => &["preference", "pref", "priority"],
        "ptrdname" => &["ptrdname", "ptr_name", "domain_name"],
        "port" => &["port"],
        "priority" => &["priority", "prio"],
        "weight" => &["weight"],
        "target" => &["target", "target_host", "host"],
        "text" => &["text", "txt", "text_value"],
        "target_name" => &["target_name", "target"],
        "target_type" => &["target_type"],
        "addresses" => &["addresses", "ipv4addrs", "ipv4addr", "ip_addresses", "ip_address"],
        "configure_for_dns" => &["configure_for_dns", "enable_dns", "dns"],
        "mac" => &["mac", "mac_address", "macaddr", "hardware_address"],
        "match_client" => &["match_client", "match_option"],
        "bootfile" => &["bootfile", "boot_file"],
        "bootserver" => &["bootserver", "boot_server"],
        "nextserver" => &["nextserver", "next_server"],
        "network" => &["network", "cidr", "subnet"],
        "members" => &["members", "member", "grid_members"],
        "member" => &["member", "member_name", "dhcp_member"],
        "start_addr" => &["start_addr", "start_address", "range_start", "start"],
        "end_addr" => &["end_addr", "end_address", "range_end", "end"],
        "fqdn" => &["fqdn", "zone", "zone_name", "name"],
        "zone_format" => &["zone_format", "format"],
        "ns_group" => &["ns_group", "nsgroup"],
        "grid_primary" => &["grid_primary", "primary", "primary_server"],
        "grid_secondaries" => &["grid_secondaries", "secondaries", "secondary_servers"],
        "rpz_policy" => &["rpz_policy", "policy"],
        "rpz_severity" => &["rpz_severity", "severity"],
        "substitute_name" => &["substitute_name", "substitute"],
        "soa_default_ttl" => &["soa_default_ttl", "default_ttl"],
        "soa_expire" => &["soa_expire", "expire"],
        "soa_negative_ttl" => &["soa_negative_ttl", "negative_ttl"],
        "soa_refresh" => &["soa_refresh", "refresh"],
        "soa_retry" => &["soa_retry", "retry"],
        "soa_serial" => &["soa_serial", "serial"],
        "domain-name-servers" => &["domain-name-servers", "domain_name_servers", "dns_servers", "nameservers"],
        "domain-name" => &["domain-name", "domain_name"],
        "dhcp-lease-time" => &["dhcp-lease-time", "dhcp_lease_time", "lease_time"],
        "routers" => &["routers", "router", "gateway"],
        "broadcast-address" => &["broadcast-address", "broadcast_address", "broadcast"],
        _ => &[],
    }
}

/// Resolve one logical field through its synonym list.
pub fn resolve_field<'r>(row: &'r Row, field: &str) -> Option<&'r str> {
    let candidates = synonyms(field);
    if candidates.is_empty() {
        row::resolve(row, &[field])
    } else {
        row::resolve(row, candidates)
    }
}

// =============================================================================
// Required / optional field helpers
// =============================================================================

/// Resolve a set of required fields, reporting every missing one at once.
pub fn require_all<const N: usize>(
    row: &Row,
    fields: [&str; N],
) -> Result<[String; N], Rejection> {
    let mut missing = Vec::new();
    let values = fields.map(|field| match resolve_field(row, field) {
        Some(v) => v.to_string(),
        None => {
            missing.push(field.to_string());
            String::new()
        }
    });
    if missing.is_empty() {
        Ok(values)
    } else {
        Err(Rejection::missing(missing))
    }
}

/// Resolve a required integer field; a malformed value rejects the row.
pub fn require_int(row: &Row, field: &str) -> Result<i64, Rejection> {
    match row::coerce_int(resolve_field(row, field)) {
        Outcome::Value(n) => Ok(n),
        Outcome::Absent => Err(Rejection::missing(vec![field.to_string()])),
        Outcome::Malformed => Err(Rejection::invalid(field)),
    }
}

/// Resolve an optional string field.
pub fn optional_str(row: &Row, field: &str) -> Option<String> {
    resolve_field(row, field).map(str::to_string)
}

/// Resolve an optional integer field; a malformed value is dropped and
/// noted, never fatal.
pub fn optional_int(row: &Row, field: &str, dropped: &mut Vec<String>) -> Option<i64> {
    match row::coerce_int(resolve_field(row, field)) {
        Outcome::Value(n) => Some(n),
        Outcome::Absent => None,
        Outcome::Malformed => {
            dropped.push(field.to_string());
            None
        }
    }
}

/// Resolve an optional integer with a kind default; malformed values fall
/// back to the default and are noted.
pub fn optional_int_or(row: &Row, field: &str, default: i64, dropped: &mut Vec<String>) -> i64 {
    optional_int(row, field, dropped).unwrap_or(default)
}

/// Resolve an optional boolean field; present-but-unrecognized is `false`,
/// absent is `None` so kinds can omit the key.
pub fn optional_bool(row: &Row, field: &str) -> Option<bool> {
    resolve_field(row, field).map(|v| row::coerce_bool(Some(v), false))
}

// =============================================================================
// Extensible attributes
// =============================================================================

/// Organizational metadata harvested uniformly by every canonicalizer.
pub const EXTATTR_FIELDS: &[(&str, &[&str])] = &[
    ("Environment", &["environment", "env"]),
    ("Owner", &["owner", "owned_by"]),
    ("Location", &["location", "site"]),
    ("Department", &["department", "dept"]),
    ("Creator", &["creator", "created_by"]),
];

pub fn harvest_extattrs(row: &Row) -> Map<String, Value> {
    let mut attrs = Map::new();
    for (attr, candidates) in EXTATTR_FIELDS {
        if let Some(value) = row::resolve(row, candidates) {
            attrs.insert((*attr).to_string(), Value::String(value.to_string()));
        }
    }
    attrs
}

/// Insert `extattrs` unconditionally (`{}` when nothing resolved).
pub fn put_extattrs(doc: &mut Map<String, Value>, row: &Row) {
    doc.insert("extattrs".into(), Value::Object(harvest_extattrs(row)));
}

/// Insert `extattrs` only when at least one attribute resolved.
pub fn put_extattrs_nonempty(doc: &mut Map<String, Value>, row: &Row) {
    let attrs = harvest_extattrs(row);
    if !attrs.is_empty() {
        doc.insert("extattrs".into(), Value::Object(attrs));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_all_reports_every_missing_field() {
        let row = Row::from_pairs([("name", "host1.example.com")]);
        let err = require_all(&row, ["name", "ipv4addr", "view"]).unwrap_err();
        assert_eq!(err.fields, vec!["ipv4addr", "view"]);
        assert!(err.describe().contains("missing"));
    }

    #[test]
    fn test_require_all_resolves_through_synonyms() {
        let row = Row::from_pairs([
            ("Hostname", "host1.example.com"),
            ("IP_Address", "10.1.2.3"),
            ("DNS_View", "internal"),
        ]);
        let [name, addr, view] = require_all(&row, ["name", "ipv4addr", "view"]).unwrap();
        assert_eq!(name, "host1.example.com");
        assert_eq!(addr, "10.1.2.3");
        assert_eq!(view, "internal");
    }

    #[test]
    fn test_require_int_rejects_malformed() {
        let row = Row::from_pairs([("preference", "high")]);
        let err = require_int(&row, "preference").unwrap_err();
        assert!(err.describe().contains("invalid"));
        assert_eq!(err.fields, vec!["preference"]);
    }

    #[test]
    fn test_optional_int_notes_drop() {
        let row = Row::from_pairs([("ttl", "soon")]);
        let mut dropped = Vec::new();
        assert!(optional_int(&row, "ttl", &mut dropped).is_none());
        assert_eq!(dropped, vec!["ttl"]);
    }

    #[test]
    fn test_optional_int_or_falls_back_on_malformed() {
        let row = Row::from_pairs([("soa_refresh", "often")]);
        let mut dropped = Vec::new();
        assert_eq!(optional_int_or(&row, "soa_refresh", 10801, &mut dropped), 10801);
        assert_eq!(dropped, vec!["soa_refresh"]);
    }

    #[test]
    fn test_harvest_extattrs_only_owner() {
        let row = Row::from_pairs([("Owner", "team-x"), ("name", "h")]);
        let attrs = harvest_extattrs(&row);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs["Owner"], "team-x");
    }

    #[test]
    fn test_harvest_extattrs_synonyms() {
        let row = Row::from_pairs([("env", "prod"), ("site", "dc-1"), ("dept", "netops")]);
        let attrs = harvest_extattrs(&row);
        assert_eq!(attrs["Environment"], "prod");
        assert_eq!(attrs["Location"], "dc-1");
        assert_eq!(attrs["Department"], "netops");
    }

    #[test]
    fn test_put_extattrs_conventions() {
        let row = Row::from_pairs([("name", "h")]);

        let mut always = Map::new();
        put_extattrs(&mut always, &row);
        assert_eq!(always["extattrs"], serde_json::json!({}));

        let mut omitting = Map::new();
        put_extattrs_nonempty(&mut omitting, &row);
        assert!(!omitting.contains_key("extattrs"));
    }

    #[test]
    fn test_unknown_field_resolves_by_own_name() {
        let row = Row::from_pairs([("exotic_field", "42")]);
        assert_eq!(resolve_field(&row, "exotic_field"), Some("42"));
    }
}
