//! Test support: builds minimal MMDB images in memory.
//!
//! The integration tests need real, openable lookup databases with known
//! contents. Rather than shipping opaque binary fixtures, this module
//! encodes a small IPv4-only MMDB image directly: binary search tree with
//! 24-bit records, the 16-byte separator, an inline data section (no
//! pointers), the metadata marker, and a metadata map. That is exactly the
//! subset of the format the reader needs for the fixture networks below.

#![allow(dead_code)]

use std::net::Ipv4Addr;
use std::path::Path;

/// An address covered by both fixture databases (Berlin / AS64496).
pub const DUAL_COVERAGE_ADDR: &str = "203.0.113.10";

/// An address with a sparse city record (Lisbon, no location detail) and
/// ASN coverage.
pub const SPARSE_ADDR: &str = "198.51.100.7";

/// An address covered by the city fixture only, with no ASN data.
pub const CITY_ONLY_ADDR: &str = "192.0.2.1";

/// An address in neither fixture database.
pub const UNCOVERED_ADDR: &str = "8.8.8.8";

const METADATA_MARKER: &[u8] = b"\xab\xcd\xefMaxMind.com";
const DATA_SECTION_SEPARATOR: usize = 16;

/// Subset of the MMDB data model used by the fixtures.
#[derive(Clone)]
pub enum Value {
    Str(&'static str),
    U16(u16),
    U32(u32),
    U64(u64),
    F64(f64),
    Map(Vec<(&'static str, Value)>),
    Array(Vec<Value>),
}

fn write_control(out: &mut Vec<u8>, type_num: u8, size: usize) {
    assert!(size < 29 + 256, "fixture values stay small");
    let (size_bits, ext_size) = if size < 29 {
        (size as u8, None)
    } else {
        (29u8, Some((size - 29) as u8))
    };
    if type_num < 8 {
        out.push((type_num << 5) | size_bits);
    } else {
        out.push(size_bits);
        out.push(type_num - 7);
    }
    if let Some(extra) = ext_size {
        out.push(extra);
    }
}

/// Minimal big-endian representation; zero encodes as no bytes at all.
fn uint_bytes(value: u64) -> Vec<u8> {
    value
        .to_be_bytes()
        .iter()
        .copied()
        .skip_while(|byte| *byte == 0)
        .collect()
}

fn encode_value(out: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Str(s) => {
            write_control(out, 2, s.len());
            out.extend_from_slice(s.as_bytes());
        }
        Value::F64(f) => {
            write_control(out, 3, 8);
            out.extend_from_slice(&f.to_be_bytes());
        }
        Value::U16(v) => {
            let bytes = uint_bytes(u64::from(*v));
            write_control(out, 5, bytes.len());
            out.extend_from_slice(&bytes);
        }
        Value::U32(v) => {
            let bytes = uint_bytes(u64::from(*v));
            write_control(out, 6, bytes.len());
            out.extend_from_slice(&bytes);
        }
        Value::U64(v) => {
            let bytes = uint_bytes(*v);
            write_control(out, 9, bytes.len());
            out.extend_from_slice(&bytes);
        }
        Value::Map(entries) => {
            write_control(out, 7, entries.len());
            for (key, val) in entries {
                encode_value(out, &Value::Str(*key));
                encode_value(out, val);
            }
        }
        Value::Array(items) => {
            write_control(out, 11, items.len());
            for item in items {
                encode_value(out, item);
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Record {
    Empty,
    Node(usize),
    Data(usize),
}

/// IPv4 binary search tree over the fixture networks.
struct TreeBuilder {
    nodes: Vec<[Record; 2]>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            nodes: vec![[Record::Empty; 2]],
        }
    }

    fn insert(&mut self, net: Ipv4Addr, prefix_len: u8, data_offset: usize) {
        assert!((1..=32).contains(&prefix_len));
        let addr = u32::from(net);
        let mut node = 0usize;
        for depth in 0..prefix_len {
            let bit = ((addr >> (31 - depth)) & 1) as usize;
            if depth == prefix_len - 1 {
                self.nodes[node][bit] = Record::Data(data_offset);
            } else {
                node = match self.nodes[node][bit] {
                    Record::Node(next) => next,
                    Record::Empty => {
                        let next = self.nodes.len();
                        self.nodes.push([Record::Empty; 2]);
                        self.nodes[node][bit] = Record::Node(next);
                        next
                    }
                    Record::Data(_) => panic!("fixture networks must not overlap"),
                };
            }
        }
    }

    /// 24-bit records: a record equal to node_count means "no data", below
    /// it points at another node, above it points into the data section
    /// (offset by node_count plus the separator).
    fn serialize(&self) -> Vec<u8> {
        let node_count = self.nodes.len();
        let mut out = Vec::with_capacity(node_count * 6);
        for records in &self.nodes {
            for record in records {
                let value = match record {
                    Record::Empty => node_count,
                    Record::Node(next) => *next,
                    Record::Data(offset) => node_count + DATA_SECTION_SEPARATOR + offset,
                } as u32;
                out.extend_from_slice(&value.to_be_bytes()[1..]);
            }
        }
        out
    }
}

/// Assemble a complete single-version (IPv4) MMDB image.
pub fn build_database(database_type: &'static str, entries: &[(&str, u8, Value)]) -> Vec<u8> {
    let mut data_section = Vec::new();
    let mut tree = TreeBuilder::new();
    for (net, prefix_len, record) in entries {
        let offset = data_section.len();
        encode_value(&mut data_section, record);
        tree.insert(net.parse().unwrap(), *prefix_len, offset);
    }

    let node_count = tree.nodes.len();
    let mut image = tree.serialize();
    image.extend_from_slice(&[0u8; DATA_SECTION_SEPARATOR]);
    image.extend_from_slice(&data_section);
    image.extend_from_slice(METADATA_MARKER);

    let metadata = Value::Map(vec![
        ("binary_format_major_version", Value::U16(2)),
        ("binary_format_minor_version", Value::U16(0)),
        ("build_epoch", Value::U64(1_704_067_200)),
        ("database_type", Value::Str(database_type)),
        (
            "description",
            Value::Map(vec![("en", Value::Str("test fixture"))]),
        ),
        ("ip_version", Value::U16(4)),
        (
            "languages",
            Value::Array(vec![Value::Str("en"), Value::Str("de")]),
        ),
        ("node_count", Value::U32(node_count as u32)),
        ("record_size", Value::U16(24)),
    ]);
    encode_value(&mut image, &metadata);
    image
}

/// City database: 203.0.113.0/24 is Berlin with full detail,
/// 198.51.100.0/24 is a sparse Lisbon record, and 192.0.2.0/24 carries a
/// country only.
pub fn city_db_bytes() -> Vec<u8> {
    let berlin = Value::Map(vec![
        (
            "city",
            Value::Map(vec![(
                "names",
                Value::Map(vec![("en", Value::Str("Berlin"))]),
            )]),
        ),
        (
            "continent",
            Value::Map(vec![
                ("code", Value::Str("EU")),
                (
                    "names",
                    Value::Map(vec![
                        ("de", Value::Str("Europa")),
                        ("en", Value::Str("Europe")),
                    ]),
                ),
            ]),
        ),
        (
            "country",
            Value::Map(vec![
                ("iso_code", Value::Str("DE")),
                (
                    "names",
                    Value::Map(vec![
                        ("de", Value::Str("Deutschland")),
                        ("en", Value::Str("Germany")),
                    ]),
                ),
            ]),
        ),
        (
            "location",
            Value::Map(vec![
                ("accuracy_radius", Value::U16(50)),
                ("latitude", Value::F64(52.52)),
                ("longitude", Value::F64(13.405)),
                ("time_zone", Value::Str("Europe/Berlin")),
            ]),
        ),
        ("postal", Value::Map(vec![("code", Value::Str("10117"))])),
        (
            "subdivisions",
            Value::Array(vec![Value::Map(vec![
                ("iso_code", Value::Str("BE")),
                (
                    "names",
                    Value::Map(vec![("en", Value::Str("Berlin"))]),
                ),
            ])]),
        ),
    ]);

    let lisbon = Value::Map(vec![
        (
            "city",
            Value::Map(vec![(
                "names",
                Value::Map(vec![("en", Value::Str("Lisbon"))]),
            )]),
        ),
        (
            "country",
            Value::Map(vec![
                ("iso_code", Value::Str("PT")),
                (
                    "names",
                    Value::Map(vec![("en", Value::Str("Portugal"))]),
                ),
            ]),
        ),
    ]);

    let country_only = Value::Map(vec![(
        "country",
        Value::Map(vec![
            ("iso_code", Value::Str("NL")),
            (
                "names",
                Value::Map(vec![("en", Value::Str("Netherlands"))]),
            ),
        ]),
    )]);

    build_database(
        "GeoLite2-City",
        &[
            ("203.0.113.0", 24, berlin),
            ("198.51.100.0", 24, lisbon),
            ("192.0.2.0", 24, country_only),
        ],
    )
}

/// ASN database: covers the Berlin and Lisbon networks but not
/// 192.0.2.0/24.
pub fn asn_db_bytes() -> Vec<u8> {
    let carrier = Value::Map(vec![
        ("autonomous_system_number", Value::U32(64496)),
        (
            "autonomous_system_organization",
            Value::Str("Example Carrier GmbH"),
        ),
    ]);
    let doc_net = Value::Map(vec![
        ("autonomous_system_number", Value::U32(64500)),
        (
            "autonomous_system_organization",
            Value::Str("Documentation Network"),
        ),
    ]);
    build_database(
        "GeoLite2-ASN",
        &[("203.0.113.0", 24, carrier), ("198.51.100.0", 24, doc_net)],
    )
}

pub fn write_city_db(dir: &Path) {
    std::fs::write(dir.join("GeoLite2-City.mmdb"), city_db_bytes()).unwrap();
}

pub fn write_asn_db(dir: &Path) {
    std::fs::write(dir.join("GeoLite2-ASN.mmdb"), asn_db_bytes()).unwrap();
}
