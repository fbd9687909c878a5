//! Kind catalog and dispatcher.
//!
//! One static descriptor per record kind: identifier, schema surface
//! (required/optional logical fields), output artifact name, and the
//! canonicalizer. The catalog is populated once and never mutates.
//!
//! Kind auto-detection is longest-identifier-first substring search over
//! the lowercased file base name, so `aaaa_record` wins over `a_record`
//! and `network_range` over `network`.

use once_cell::sync::Lazy;

use crate::canonical::{dhcp, dns, host, zone, CanonicalizeFn};

/// Static, process-lifetime metadata for one record kind.
#[derive(Debug, Clone, Copy)]
pub struct KindDescriptor {
    /// Kind identifier, e.g. `a_record`.
    pub kind: &'static str,
    /// Logical fields a row must yield; failing any one rejects the row.
    pub required: &'static [&'static str],
    /// Logical fields included when the row supplies them.
    pub optional: &'static [&'static str],
    /// Output artifact file name.
    pub artifact: &'static str,
    /// The canonicalizer for this kind.
    pub canonicalize: CanonicalizeFn,
}

/// The full kind catalog, alphabetical by identifier.
pub static CATALOG: &[KindDescriptor] = &[
    KindDescriptor {
        kind: "a_record",
        required: &["name", "ipv4addr", "view"],
        optional: &["comment", "ttl", "disable"],
        artifact: "a_record.json",
        canonicalize: dns::a_record,
    },
    KindDescriptor {
        kind: "aaaa_record",
        required: &["name", "ipv6addr", "view"],
        optional: &["comment", "ttl", "disable"],
        artifact: "aaaa_record.json",
        canonicalize: dns::aaaa_record,
    },
    KindDescriptor {
        kind: "alias_record",
        required: &["name", "target_name", "target_type", "view"],
        optional: &["comment", "ttl", "disable"],
        artifact: "alias_record.json",
        canonicalize: dns::alias_record,
    },
    KindDescriptor {
        kind: "cname_record",
        required: &["name", "canonical", "view"],
        optional: &["comment", "ttl", "disable"],
        artifact: "cname_record.json",
        canonicalize: dns::cname_record,
    },
    KindDescriptor {
        kind: "fixed_address",
        required: &["ipv4addr"],
        optional: &[
            "name",
            "mac",
            "match_client",
            "network_view",
            "comment",
            "bootfile",
            "bootserver",
            "nextserver",
        ],
        artifact: "fixed_address.json",
        canonicalize: dhcp::fixed_address,
    },
    KindDescriptor {
        kind: "host_record",
        required: &["name", "addresses"],
        optional: &["view", "configure_for_dns", "comment", "ttl"],
        artifact: "host_record.json",
        canonicalize: host::host_record,
    },
    KindDescriptor {
        kind: "mx_record",
        required: &["name", "mail_exchanger", "preference"],
        optional: &["view", "comment", "ttl", "disable"],
        artifact: "mx_record.json",
        canonicalize: dns::mx_record,
    },
    KindDescriptor {
        kind: "network",
        required: &["network"],
        optional: &["network_view", "comment", "members", "disable"],
        artifact: "network.json",
        canonicalize: dhcp::network,
    },
    KindDescriptor {
        kind: "network_range",
        required: &["start_addr", "end_addr"],
        optional: &["name", "comment", "network_view", "member", "disable"],
        artifact: "network_range.json",
        canonicalize: dhcp::network_range,
    },
    KindDescriptor {
        kind: "network_view",
        required: &["name"],
        optional: &["comment"],
        artifact: "network_view.json",
        canonicalize: zone::network_view,
    },
    KindDescriptor {
        kind: "ptr_record",
        required: &["ptrdname", "ipv4addr", "view"],
        optional: &["ipv6addr", "comment", "ttl", "disable"],
        artifact: "ptr_record.json",
        canonicalize: dns::ptr_record,
    },
    KindDescriptor {
        kind: "response_policy_zone",
        required: &["fqdn"],
        optional: &[
            "view",
            "rpz_policy",
            "rpz_severity",
            "substitute_name",
            "comment",
            "soa_default_ttl",
            "soa_expire",
            "soa_negative_ttl",
            "soa_refresh",
            "soa_retry",
            "soa_serial",
            "grid_primary",
        ],
        artifact: "response_policy_zone.json",
        canonicalize: zone::response_policy_zone,
    },
    KindDescriptor {
        kind: "srv_record",
        required: &["name", "port", "priority", "weight", "target"],
        optional: &["view", "comment", "ttl", "disable"],
        artifact: "srv_record.json",
        canonicalize: dns::srv_record,
    },
    KindDescriptor {
        kind: "txt_record",
        required: &["name", "text", "view"],
        optional: &["comment", "ttl", "disable"],
        artifact: "txt_record.json",
        canonicalize: dns::txt_record,
    },
    KindDescriptor {
        kind: "zone",
        required: &["fqdn"],
        optional: &[
            "view",
            "zone_format",
            "ns_group",
            "comment",
            "grid_primary",
            "grid_secondaries",
            "disable",
        ],
        artifact: "zone.json",
        canonicalize: zone::zone,
    },
];

/// Catalog view sorted for detection: longest identifier first, so a more
/// specific kind always wins over a shorter overlapping one.
static DETECTION_ORDER: Lazy<Vec<&'static KindDescriptor>> = Lazy::new(|| {
    let mut order: Vec<&'static KindDescriptor> = CATALOG.iter().collect();
    order.sort_by(|a, b| b.kind.len().cmp(&a.kind.len()).then(a.kind.cmp(b.kind)));
    order
});

/// Look up a kind by identifier.
pub fn get(kind: &str) -> Option<&'static KindDescriptor> {
    let kind = kind.trim().to_ascii_lowercase();
    CATALOG.iter().find(|d| d.kind == kind)
}

/// Detect a kind from a file name (base name substring match,
/// longest identifier first).
pub fn detect_kind(filename: &str) -> Option<&'static KindDescriptor> {
    let base = std::path::Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename)
        .to_ascii_lowercase();

    DETECTION_ORDER
        .iter()
        .find(|d| base.contains(d.kind))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::Row;

    /// A plausible value for each logical field, for synthetic rows.
    fn sample(field: &str) -> &'static str {
        match field {
            "name" => "host1.example.com",
            "ipv4addr" => "10.1.2.3",
            "ipv6addr" => "2001:db8::1",
            "view" => "default",
            "canonical" => "host1.example.com",
            "target_name" => "host1.example.com",
            "target_type" => "A",
            "mail_exchanger" => "mail.example.com",
            "preference" => "10",
            "port" => "5060",
            "priority" => "1",
            "weight" => "100",
            "target" => "srv.example.com",
            "text" => "v=spf1 -all",
            "ptrdname" => "host1.example.com",
            "addresses" => "10.0.0.5",
            "network" => "10.0.0.0/24",
            "start_addr" => "10.0.0.10",
            "end_addr" => "10.0.0.100",
            "fqdn" => "example.com",
            _ => "value",
        }
    }

    #[test]
    fn test_every_kind_canonicalizes_its_required_set() {
        for descriptor in CATALOG {
            let row = Row::from_pairs(
                descriptor.required.iter().map(|f| (f.to_string(), sample(f).to_string())),
            );
            let result = (descriptor.canonicalize)(&row);
            assert!(
                result.is_ok(),
                "kind {} rejected its own required set: {:?}",
                descriptor.kind,
                result.err().map(|e| e.describe()),
            );
        }
    }

    #[test]
    fn test_every_kind_rejects_each_missing_required_field() {
        for descriptor in CATALOG {
            for omitted in descriptor.required {
                let row = Row::from_pairs(
                    descriptor
                        .required
                        .iter()
                        .filter(|f| f != &omitted)
                        .map(|f| (f.to_string(), sample(f).to_string())),
                );
                assert!(
                    (descriptor.canonicalize)(&row).is_err(),
                    "kind {} accepted a row without '{}'",
                    descriptor.kind,
                    omitted,
                );
            }
        }
    }

    #[test]
    fn test_get_normalizes_case_and_whitespace() {
        assert_eq!(get(" A_Record ").map(|d| d.kind), Some("a_record"));
        assert!(get("bogus_record").is_none());
    }

    #[test]
    fn test_detect_longest_match_first() {
        assert_eq!(
            detect_kind("aaaa_record_batch.csv").map(|d| d.kind),
            Some("aaaa_record")
        );
        assert_eq!(
            detect_kind("site1_network_range.xlsx").map(|d| d.kind),
            Some("network_range")
        );
        assert_eq!(
            detect_kind("response_policy_zone_2026.csv").map(|d| d.kind),
            Some("response_policy_zone")
        );
    }

    #[test]
    fn test_detect_plain_kinds() {
        assert_eq!(detect_kind("a_record.csv").map(|d| d.kind), Some("a_record"));
        assert_eq!(detect_kind("network.csv").map(|d| d.kind), Some("network"));
        assert_eq!(detect_kind("zone_internal.csv").map(|d| d.kind), Some("zone"));
    }

    #[test]
    fn test_detect_uses_base_name_only() {
        assert_eq!(
            detect_kind("/data/mx_record/unrelated.csv").map(|d| d.kind),
            None
        );
        assert_eq!(
            detect_kind("/data/uploads/mx_record_march.csv").map(|d| d.kind),
            Some("mx_record")
        );
    }

    #[test]
    fn test_detect_unknown() {
        assert!(detect_kind("changes.csv").is_none());
    }

    #[test]
    fn test_artifacts_are_unique() {
        let mut artifacts: Vec<&str> = CATALOG.iter().map(|d| d.artifact).collect();
        artifacts.sort();
        artifacts.dedup();
        assert_eq!(artifacts.len(), CATALOG.len());
    }

    #[test]
    fn test_descriptor_fields_have_synonym_coverage() {
        // Every required field either has a synonym entry or resolves by
        // its own name; both paths must accept the field's own spelling.
        for descriptor in CATALOG {
            for field in descriptor.required.iter().chain(descriptor.optional) {
                let candidates = crate::canonical::synonyms(field);
                if !candidates.is_empty() {
                    assert!(
                        candidates.iter().any(|c| c == field),
                        "synonyms for '{}' must include its own spelling",
                        field,
                    );
                }
            }
        }
    }
}
