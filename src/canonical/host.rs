//! Canonicalizer for host records.
//!
//! A host owns a list of addresses; each semicolon-delimited item may carry
//! a pipe-delimited hardware identifier (`10.0.0.5|AA:BB:CC:DD:EE:FF`).
//! Identifiers with the MAC shape populate `mac`, anything else `duid`.
//! Addresses containing a colon are IPv6 and land in `ipv6addrs`.

use serde_json::{json, Map, Value};

use super::{
    optional_int, optional_str, put_extattrs, require_all, resolve_field, Canonical, Rejection,
};
use crate::row::{coerce_bool, is_mac, split_list, split_pair, Row};

fn address_entry(addr: &str, hardware: Option<&str>) -> (Value, bool) {
    let ipv6 = addr.contains(':');
    let addr_key = if ipv6 { "ipv6addr" } else { "ipv4addr" };

    let mut entry = Map::new();
    entry.insert(addr_key.into(), Value::String(addr.to_string()));
    if let Some(id) = hardware {
        let id_key = if is_mac(id) { "mac" } else { "duid" };
        entry.insert(id_key.into(), Value::String(id.to_string()));
    }
    (Value::Object(entry), ipv6)
}

pub fn host_record(row: &Row) -> Result<Canonical, Rejection> {
    let [name, addresses] = require_all(row, ["name", "addresses"])?;
    let mut dropped = Vec::new();

    let mut ipv4addrs = Vec::new();
    let mut ipv6addrs = Vec::new();
    for item in split_list(&addresses) {
        let (addr, hardware) = split_pair(item);
        if addr.is_empty() {
            continue;
        }
        let (entry, ipv6) = address_entry(addr, hardware);
        if ipv6 {
            ipv6addrs.push(entry);
        } else {
            ipv4addrs.push(entry);
        }
    }

    if ipv4addrs.is_empty() && ipv6addrs.is_empty() {
        return Err(Rejection::invalid("addresses"));
    }

    let configure_for_dns = coerce_bool(resolve_field(row, "configure_for_dns"), true);

    let mut doc = Map::new();
    doc.insert("name".into(), Value::String(name));
    doc.insert(
        "view".into(),
        Value::String(optional_str(row, "view").unwrap_or_else(|| "default".to_string())),
    );
    doc.insert("ipv4addrs".into(), Value::Array(ipv4addrs));
    if !ipv6addrs.is_empty() {
        doc.insert("ipv6addrs".into(), Value::Array(ipv6addrs));
    }
    doc.insert("configure_for_dns".into(), Value::Bool(configure_for_dns));
    if let Some(comment) = optional_str(row, "comment") {
        doc.insert("comment".into(), Value::String(comment));
    }
    if let Some(ttl) = optional_int(row, "ttl", &mut dropped) {
        doc.insert("ttl".into(), json!(ttl));
    }
    put_extattrs(&mut doc, row);

    Ok(Canonical::new(doc, dropped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_address_list_with_hardware_id() {
        let row = Row::from_pairs([
            ("name", "host1.example.com"),
            ("addresses", "10.0.0.1;10.0.0.2|AA:BB:CC:DD:EE:FF"),
        ]);
        let result = host_record(&row).unwrap();
        assert_eq!(
            result.doc["ipv4addrs"],
            json!([
                { "ipv4addr": "10.0.0.1" },
                { "ipv4addr": "10.0.0.2", "mac": "AA:BB:CC:DD:EE:FF" },
            ])
        );
    }

    #[test]
    fn test_host_defaults() {
        let row = Row::from_pairs([("name", "host1.example.com"), ("addresses", "10.0.0.1")]);
        let result = host_record(&row).unwrap();
        assert_eq!(result.doc["view"], "default");
        assert_eq!(result.doc["configure_for_dns"], true);
        assert_eq!(result.doc["extattrs"], json!({}));
        assert!(result.doc.get("ipv6addrs").is_none());
    }

    #[test]
    fn test_host_configure_for_dns_off() {
        let row = Row::from_pairs([
            ("name", "host1.example.com"),
            ("addresses", "10.0.0.1"),
            ("configure_for_dns", "no"),
        ]);
        let result = host_record(&row).unwrap();
        assert_eq!(result.doc["configure_for_dns"], false);
    }

    #[test]
    fn test_host_ipv6_split_and_duid() {
        let row = Row::from_pairs([
            ("name", "host1.example.com"),
            ("addresses", "10.0.0.1;2001:db8::1|000102030405060708"),
        ]);
        let result = host_record(&row).unwrap();
        assert_eq!(result.doc["ipv4addrs"], json!([{ "ipv4addr": "10.0.0.1" }]));
        assert_eq!(
            result.doc["ipv6addrs"],
            json!([{ "ipv6addr": "2001:db8::1", "duid": "000102030405060708" }])
        );
    }

    #[test]
    fn test_host_missing_addresses() {
        let row = Row::from_pairs([("name", "host1.example.com")]);
        let err = host_record(&row).unwrap_err();
        assert_eq!(err.fields, vec!["addresses"]);
    }

    #[test]
    fn test_host_unparseable_address_list() {
        let row = Row::from_pairs([("name", "host1.example.com"), ("addresses", "|;|")]);
        let err = host_record(&row).unwrap_err();
        assert!(err.describe().contains("addresses"));
    }
}
