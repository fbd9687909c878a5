//! Canonicalizers for the DHCP kinds: fixed address, network, network range.
//!
//! DHCP options are drawn from a fixed table of well-known option names and
//! numeric codes; table order is emission order. These kinds omit the
//! `extattrs` key when no attribute resolved.

use serde_json::{json, Map, Value};

use super::{
    optional_bool, optional_str, put_extattrs_nonempty, require_all, resolve_field, Canonical,
    Rejection,
};
use crate::row::{is_mac, is_zero_mac, split_list, Row};

const ZERO_MAC: &str = "00:00:00:00:00:00";

/// Well-known DHCP option names and codes. Emission order is table order.
pub const DHCP_OPTIONS: &[(&str, u8)] = &[
    ("domain-name-servers", 6),
    ("domain-name", 15),
    ("dhcp-lease-time", 51),
    ("routers", 3),
    ("broadcast-address", 28),
];

fn option_entry(name: &str, num: u8, use_option: bool, value: &str) -> Value {
    json!({
        "name": name,
        "num": num,
        "use_option": use_option,
        "value": value,
        "vendor_class": "DHCP",
    })
}

/// Harvest DHCP options the row supplies, in table order.
pub fn harvest_options(row: &Row) -> Vec<Value> {
    DHCP_OPTIONS
        .iter()
        .filter_map(|(name, num)| {
            resolve_field(row, name).map(|value| option_entry(name, *num, true, value))
        })
        .collect()
}

/// Member-reference list from a semicolon-delimited field.
fn member_refs(raw: &str) -> Vec<Value> {
    split_list(raw)
        .into_iter()
        .map(|name| json!({ "name": name }))
        .collect()
}

fn network_view_or_default(row: &Row) -> String {
    optional_str(row, "network_view").unwrap_or_else(|| "default".to_string())
}

pub fn fixed_address(row: &Row) -> Result<Canonical, Rejection> {
    let [ipv4addr] = require_all(row, ["ipv4addr"])?;
    let mut dropped = Vec::new();

    let mac = match resolve_field(row, "mac") {
        Some(raw) if is_mac(raw) => raw.to_string(),
        Some(_) => {
            dropped.push("mac".to_string());
            ZERO_MAC.to_string()
        }
        None => ZERO_MAC.to_string(),
    };

    let match_client = optional_str(row, "match_client")
        .map(|v| v.to_uppercase())
        .unwrap_or_else(|| {
            if is_zero_mac(&mac) {
                "RESERVED".to_string()
            } else {
                "MAC_ADDRESS".to_string()
            }
        });

    let options = harvest_options(row);
    let use_options = !options.is_empty();

    let mut doc = Map::new();
    doc.insert("ipv4addr".into(), Value::String(ipv4addr));
    if let Some(name) = optional_str(row, "name") {
        doc.insert("name".into(), Value::String(name));
    }
    doc.insert("mac".into(), Value::String(mac));
    doc.insert("match_client".into(), Value::String(match_client));
    doc.insert("network_view".into(), Value::String(network_view_or_default(row)));
    if let Some(comment) = optional_str(row, "comment") {
        doc.insert("comment".into(), Value::String(comment));
    }
    for server_field in ["bootfile", "bootserver", "nextserver"] {
        if let Some(value) = optional_str(row, server_field) {
            doc.insert(server_field.into(), Value::String(value));
        }
    }
    doc.insert("options".into(), Value::Array(options));
    for flag in [
        "use_bootfile",
        "use_bootserver",
        "use_nextserver",
        "use_broadcast_address",
        "use_domain_name",
        "use_domain_name_servers",
        "use_ignore_dhcp_option_list_request",
        "use_pxe_lease_time",
        "use_deny_bootp",
    ] {
        doc.insert(flag.into(), Value::Bool(false));
    }
    doc.insert("use_options".into(), Value::Bool(use_options));
    put_extattrs_nonempty(&mut doc, row);

    Ok(Canonical::new(doc, dropped))
}

pub fn network(row: &Row) -> Result<Canonical, Rejection> {
    let [network] = require_all(row, ["network"])?;
    let dropped = Vec::new();

    let members = resolve_field(row, "members").map(member_refs).unwrap_or_default();
    let options = harvest_options(row);

    let mut doc = Map::new();
    doc.insert("network".into(), Value::String(network));
    doc.insert("network_view".into(), Value::String(network_view_or_default(row)));
    if let Some(comment) = optional_str(row, "comment") {
        doc.insert("comment".into(), Value::String(comment));
    }
    doc.insert("members".into(), Value::Array(members));
    doc.insert("options".into(), Value::Array(options));
    if let Some(disable) = optional_bool(row, "disable") {
        doc.insert("disable".into(), Value::Bool(disable));
    }
    put_extattrs_nonempty(&mut doc, row);

    Ok(Canonical::new(doc, dropped))
}

pub fn network_range(row: &Row) -> Result<Canonical, Rejection> {
    let [start_addr, end_addr] = require_all(row, ["start_addr", "end_addr"])?;
    let dropped = Vec::new();

    let member = optional_str(row, "member");
    let server_association_type = if member.is_some() { "MEMBER" } else { "NONE" };

    let mut options = harvest_options(row);
    if options.is_empty() {
        // Ranges always carry a lease time so downstream diffs stay stable.
        options.push(option_entry("dhcp-lease-time", 51, false, "43200"));
    }

    let mut doc = Map::new();
    doc.insert("start_addr".into(), Value::String(start_addr));
    doc.insert("end_addr".into(), Value::String(end_addr));
    if let Some(name) = optional_str(row, "name") {
        doc.insert("name".into(), Value::String(name));
    }
    if let Some(comment) = optional_str(row, "comment") {
        doc.insert("comment".into(), Value::String(comment));
    }
    doc.insert("network_view".into(), Value::String(network_view_or_default(row)));
    if let Some(member) = member {
        doc.insert("member".into(), json!({ "name": member }));
    }
    doc.insert(
        "server_association_type".into(),
        Value::String(server_association_type.to_string()),
    );
    doc.insert("options".into(), Value::Array(options));
    if let Some(disable) = optional_bool(row, "disable") {
        doc.insert("disable".into(), Value::Bool(disable));
    }
    put_extattrs_nonempty(&mut doc, row);

    Ok(Canonical::new(doc, dropped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_address_zero_mac_is_reserved() {
        let row = Row::from_pairs([("ipv4addr", "10.0.0.50"), ("mac", "00:00:00:00:00:00")]);
        let result = fixed_address(&row).unwrap();
        assert_eq!(result.doc["match_client"], "RESERVED");
        assert_eq!(result.doc["mac"], "00:00:00:00:00:00");
    }

    #[test]
    fn test_fixed_address_real_mac_matches_mac_address() {
        let row = Row::from_pairs([("ipv4addr", "10.0.0.50"), ("mac", "AA:BB:CC:DD:EE:FF")]);
        let result = fixed_address(&row).unwrap();
        assert_eq!(result.doc["match_client"], "MAC_ADDRESS");
    }

    #[test]
    fn test_fixed_address_explicit_match_client_wins() {
        let row = Row::from_pairs([
            ("ipv4addr", "10.0.0.50"),
            ("mac", "AA:BB:CC:DD:EE:FF"),
            ("match_client", "reserved"),
        ]);
        let result = fixed_address(&row).unwrap();
        assert_eq!(result.doc["match_client"], "RESERVED");
    }

    #[test]
    fn test_fixed_address_absent_mac_defaults_reserved() {
        let row = Row::from_pairs([("ipv4addr", "10.0.0.50")]);
        let result = fixed_address(&row).unwrap();
        assert_eq!(result.doc["mac"], "00:00:00:00:00:00");
        assert_eq!(result.doc["match_client"], "RESERVED");
    }

    #[test]
    fn test_fixed_address_malformed_mac_dropped() {
        let row = Row::from_pairs([("ipv4addr", "10.0.0.50"), ("mac", "not-a-mac")]);
        let result = fixed_address(&row).unwrap();
        assert_eq!(result.doc["mac"], "00:00:00:00:00:00");
        assert_eq!(result.dropped, vec!["mac"]);
    }

    #[test]
    fn test_fixed_address_use_flags() {
        let row = Row::from_pairs([("ipv4addr", "10.0.0.50"), ("routers", "10.0.0.1")]);
        let result = fixed_address(&row).unwrap();
        assert_eq!(result.doc["use_options"], true);
        assert_eq!(result.doc["use_bootfile"], false);
        assert_eq!(result.doc["use_deny_bootp"], false);

        let bare = Row::from_pairs([("ipv4addr", "10.0.0.51")]);
        let result = fixed_address(&bare).unwrap();
        assert_eq!(result.doc["use_options"], false);
    }

    #[test]
    fn test_fixed_address_omits_empty_extattrs() {
        let row = Row::from_pairs([("ipv4addr", "10.0.0.50")]);
        let result = fixed_address(&row).unwrap();
        assert!(result.doc.get("extattrs").is_none());
    }

    #[test]
    fn test_network_members_and_empty_options() {
        let row = Row::from_pairs([
            ("network", "10.0.0.0/24"),
            ("members", "memberA;memberB"),
        ]);
        let result = network(&row).unwrap();
        assert_eq!(
            result.doc["members"],
            json!([{ "name": "memberA" }, { "name": "memberB" }])
        );
        assert_eq!(result.doc["options"], json!([]));
        assert_eq!(result.doc["network_view"], "default");
    }

    #[test]
    fn test_network_option_harvest() {
        let row = Row::from_pairs([
            ("network", "10.0.0.0/24"),
            ("routers", "10.0.0.1"),
            ("domain-name-servers", "10.0.0.2;10.0.0.3"),
        ]);
        let result = network(&row).unwrap();
        let options = result.doc["options"].as_array().unwrap();
        // Table order: domain-name-servers before routers.
        assert_eq!(options[0]["name"], "domain-name-servers");
        assert_eq!(options[0]["num"], 6);
        assert_eq!(options[0]["use_option"], true);
        assert_eq!(options[1]["name"], "routers");
        assert_eq!(options[1]["num"], 3);
    }

    #[test]
    fn test_network_range_member_association() {
        let row = Row::from_pairs([
            ("start_addr", "10.0.0.10"),
            ("end_addr", "10.0.0.100"),
            ("member", "dhcp-member-1"),
        ]);
        let result = network_range(&row).unwrap();
        assert_eq!(result.doc["member"], json!({ "name": "dhcp-member-1" }));
        assert_eq!(result.doc["server_association_type"], "MEMBER");
    }

    #[test]
    fn test_network_range_defaults() {
        let row = Row::from_pairs([("start_addr", "10.0.0.10"), ("end_addr", "10.0.0.100")]);
        let result = network_range(&row).unwrap();
        assert_eq!(result.doc["server_association_type"], "NONE");
        assert!(result.doc.get("member").is_none());
        assert_eq!(
            result.doc["options"],
            json!([{
                "name": "dhcp-lease-time",
                "num": 51,
                "use_option": false,
                "value": "43200",
                "vendor_class": "DHCP",
            }])
        );
    }

    #[test]
    fn test_network_range_supplied_lease_time_wins() {
        let row = Row::from_pairs([
            ("start_addr", "10.0.0.10"),
            ("end_addr", "10.0.0.100"),
            ("lease_time", "86400"),
        ]);
        let result = network_range(&row).unwrap();
        let options = result.doc["options"].as_array().unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0]["value"], "86400");
        assert_eq!(options[0]["use_option"], true);
    }

    #[test]
    fn test_network_range_missing_bounds() {
        let row = Row::from_pairs([("start_addr", "10.0.0.10")]);
        let err = network_range(&row).unwrap_err();
        assert_eq!(err.fields, vec!["end_addr"]);
    }
}
