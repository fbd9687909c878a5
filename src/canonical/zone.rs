//! Canonicalizers for zones, response policy zones, and network views.

use serde_json::{json, Map, Value};

use super::{
    optional_bool, optional_int_or, optional_str, put_extattrs_nonempty, require_all,
    resolve_field, Canonical, Rejection,
};
use crate::row::{split_list, Row};

/// SOA timer defaults applied when the row supplies none.
const SOA_DEFAULTS: &[(&str, i64)] = &[
    ("soa_default_ttl", 7201),
    ("soa_expire", 2419201),
    ("soa_negative_ttl", 901),
    ("soa_refresh", 10801),
    ("soa_retry", 3601),
    ("soa_serial", 1),
];

fn member_refs(raw: &str) -> Vec<Value> {
    split_list(raw)
        .into_iter()
        .map(|name| json!({ "name": name }))
        .collect()
}

fn view_or_default(row: &Row) -> String {
    optional_str(row, "view").unwrap_or_else(|| "default".to_string())
}

pub fn zone(row: &Row) -> Result<Canonical, Rejection> {
    let [fqdn] = require_all(row, ["fqdn"])?;
    let dropped = Vec::new();

    let zone_format = optional_str(row, "zone_format")
        .map(|v| v.to_uppercase())
        .unwrap_or_else(|| "FORWARD".to_string());

    let mut doc = Map::new();
    doc.insert("fqdn".into(), Value::String(fqdn));
    doc.insert("view".into(), Value::String(view_or_default(row)));
    doc.insert("zone_format".into(), Value::String(zone_format));
    if let Some(ns_group) = optional_str(row, "ns_group") {
        doc.insert("ns_group".into(), Value::String(ns_group));
    }
    if let Some(comment) = optional_str(row, "comment") {
        doc.insert("comment".into(), Value::String(comment));
    }
    if let Some(primary) = optional_str(row, "grid_primary") {
        doc.insert("grid_primary".into(), json!([{ "name": primary }]));
    }
    if let Some(secondaries) = resolve_field(row, "grid_secondaries") {
        doc.insert("grid_secondaries".into(), Value::Array(member_refs(secondaries)));
    }
    if let Some(disable) = optional_bool(row, "disable") {
        doc.insert("disable".into(), Value::Bool(disable));
    }
    put_extattrs_nonempty(&mut doc, row);

    Ok(Canonical::new(doc, dropped))
}

pub fn response_policy_zone(row: &Row) -> Result<Canonical, Rejection> {
    let [fqdn] = require_all(row, ["fqdn"])?;
    let mut dropped = Vec::new();

    let rpz_policy = optional_str(row, "rpz_policy")
        .map(|v| v.to_uppercase())
        .unwrap_or_else(|| "GIVEN".to_string());
    let rpz_severity = optional_str(row, "rpz_severity")
        .map(|v| v.to_uppercase())
        .unwrap_or_else(|| "MAJOR".to_string());

    let mut doc = Map::new();
    doc.insert("fqdn".into(), Value::String(fqdn));
    doc.insert("view".into(), Value::String(view_or_default(row)));
    doc.insert("rpz_policy".into(), Value::String(rpz_policy));
    doc.insert("rpz_severity".into(), Value::String(rpz_severity));
    if let Some(substitute_name) = optional_str(row, "substitute_name") {
        doc.insert("substitute_name".into(), Value::String(substitute_name));
    }
    if let Some(comment) = optional_str(row, "comment") {
        doc.insert("comment".into(), Value::String(comment));
    }

    let mut soa_serial = 1;
    for (field, default) in SOA_DEFAULTS {
        let value = optional_int_or(row, field, *default, &mut dropped);
        if *field == "soa_serial" {
            soa_serial = value;
        }
        doc.insert((*field).to_string(), json!(value));
    }

    if let Some(primary) = optional_str(row, "grid_primary") {
        doc.insert("grid_primary".into(), json!([{ "name": primary.clone() }]));
        doc.insert(
            "member_soa_serials".into(),
            json!([{ "grid_primary": primary, "serial": soa_serial }]),
        );
    }
    put_extattrs_nonempty(&mut doc, row);

    Ok(Canonical::new(doc, dropped))
}

pub fn network_view(row: &Row) -> Result<Canonical, Rejection> {
    let [name] = require_all(row, ["name"])?;
    let dropped = Vec::new();

    let mut doc = Map::new();
    doc.insert("name".into(), Value::String(name));
    if let Some(comment) = optional_str(row, "comment") {
        doc.insert("comment".into(), Value::String(comment));
    }
    put_extattrs_nonempty(&mut doc, row);

    Ok(Canonical::new(doc, dropped))
}
