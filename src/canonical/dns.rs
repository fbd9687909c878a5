//! Canonicalizers for the DNS record kinds.
//!
//! All DNS record kinds emit `extattrs` unconditionally and share the
//! optional comment/ttl/disable tail. Required numeric fields (MX
//! preference, SRV port/priority/weight) reject the whole row when
//! unparseable; a malformed TTL is dropped instead.

use serde_json::{json, Map, Value};

use super::{
    optional_bool, optional_int, optional_str, put_extattrs, require_all, require_int,
    Canonical, Rejection,
};
use crate::row::Row;

/// Shared optional tail: comment, ttl, disable.
fn push_tail(doc: &mut Map<String, Value>, row: &Row, dropped: &mut Vec<String>) {
    if let Some(comment) = optional_str(row, "comment") {
        doc.insert("comment".into(), Value::String(comment));
    }
    if let Some(ttl) = optional_int(row, "ttl", dropped) {
        doc.insert("ttl".into(), json!(ttl));
    }
    if let Some(disable) = optional_bool(row, "disable") {
        doc.insert("disable".into(), Value::Bool(disable));
    }
}

fn view_or_default(row: &Row) -> String {
    optional_str(row, "view").unwrap_or_else(|| "default".to_string())
}

pub fn a_record(row: &Row) -> Result<Canonical, Rejection> {
    let [name, ipv4addr, view] = require_all(row, ["name", "ipv4addr", "view"])?;
    let mut dropped = Vec::new();

    let mut doc = Map::new();
    doc.insert("name".into(), Value::String(name));
    doc.insert("ipv4addr".into(), Value::String(ipv4addr));
    doc.insert("view".into(), Value::String(view));
    push_tail(&mut doc, row, &mut dropped);
    put_extattrs(&mut doc, row);

    Ok(Canonical::new(doc, dropped))
}

pub fn aaaa_record(row: &Row) -> Result<Canonical, Rejection> {
    let [name, ipv6addr, view] = require_all(row, ["name", "ipv6addr", "view"])?;
    let mut dropped = Vec::new();

    let mut doc = Map::new();
    doc.insert("name".into(), Value::String(name));
    doc.insert("ipv6addr".into(), Value::String(ipv6addr));
    doc.insert("view".into(), Value::String(view));
    push_tail(&mut doc, row, &mut dropped);
    put_extattrs(&mut doc, row);

    Ok(Canonical::new(doc, dropped))
}

pub fn cname_record(row: &Row) -> Result<Canonical, Rejection> {
    let [name, canonical, view] = require_all(row, ["name", "canonical", "view"])?;
    let mut dropped = Vec::new();

    let mut doc = Map::new();
    doc.insert("name".into(), Value::String(name));
    doc.insert("canonical".into(), Value::String(canonical));
    doc.insert("view".into(), Value::String(view));
    push_tail(&mut doc, row, &mut dropped);
    put_extattrs(&mut doc, row);

    Ok(Canonical::new(doc, dropped))
}

pub fn alias_record(row: &Row) -> Result<Canonical, Rejection> {
    let [name, target_name, target_type, view] =
        require_all(row, ["name", "target_name", "target_type", "view"])?;
    let mut dropped = Vec::new();

    let mut doc = Map::new();
    doc.insert("name".into(), Value::String(name));
    doc.insert("target_name".into(), Value::String(target_name));
    doc.insert("target_type".into(), Value::String(target_type.to_uppercase()));
    doc.insert("view".into(), Value::String(view));
    push_tail(&mut doc, row, &mut dropped);
    put_extattrs(&mut doc, row);

    Ok(Canonical::new(doc, dropped))
}

pub fn mx_record(row: &Row) -> Result<Canonical, Rejection> {
    let [name, mail_exchanger, _] = require_all(row, ["name", "mail_exchanger", "preference"])?;
    let preference = require_int(row, "preference")?;
    let mut dropped = Vec::new();

    let mut doc = Map::new();
    doc.insert("name".into(), Value::String(name));
    doc.insert("mail_exchanger".into(), Value::String(mail_exchanger));
    doc.insert("preference".into(), json!(preference));
    doc.insert("view".into(), Value::String(view_or_default(row)));
    push_tail(&mut doc, row, &mut dropped);
    put_extattrs(&mut doc, row);

    Ok(Canonical::new(doc, dropped))
}

pub fn ptr_record(row: &Row) -> Result<Canonical, Rejection> {
    let [ptrdname, ipv4addr, view] = require_all(row, ["ptrdname", "ipv4addr", "view"])?;
    let mut dropped = Vec::new();

    let mut doc = Map::new();
    doc.insert("ptrdname".into(), Value::String(ptrdname));
    doc.insert("ipv4addr".into(), Value::String(ipv4addr));
    if let Some(ipv6addr) = optional_str(row, "ipv6addr") {
        doc.insert("ipv6addr".into(), Value::String(ipv6addr));
    }
    doc.insert("view".into(), Value::String(view));
    push_tail(&mut doc, row, &mut dropped);
    put_extattrs(&mut doc, row);

    Ok(Canonical::new(doc, dropped))
}

pub fn srv_record(row: &Row) -> Result<Canonical, Rejection> {
    let [name, _, _, _, target] =
        require_all(row, ["name", "port", "priority", "weight", "target"])?;
    let port = require_int(row, "port")?;
    let priority = require_int(row, "priority")?;
    let weight = require_int(row, "weight")?;
    let mut dropped = Vec::new();

    let mut doc = Map::new();
    doc.insert("name".into(), Value::String(name));
    doc.insert("port".into(), json!(port));
    doc.insert("priority".into(), json!(priority));
    doc.insert("weight".into(), json!(weight));
    doc.insert("target".into(), Value::String(target));
    doc.insert("view".into(), Value::String(view_or_default(row)));
    push_tail(&mut doc, row, &mut dropped);
    put_extattrs(&mut doc, row);

    Ok(Canonical::new(doc, dropped))
}

pub fn txt_record(row: &Row) -> Result<Canonical, Rejection> {
    let [name, text, view] = require_all(row, ["name", "text", "view"])?;
    let mut dropped = Vec::new();

    let mut doc = Map::new();
    doc.insert("name".into(), Value::String(name));
    doc.insert("text".into(), Value::String(text));
    doc.insert("view".into(), Value::String(view));
    push_tail(&mut doc, row, &mut dropped);
    put_extattrs(&mut doc, row);

    Ok(Canonical::new(doc, dropped))
}
