//! MARCXML holdings record parser
//!
//! Reads MARC21 slim XML into a structured record and exposes the
//! field/subfield accessors used by the holdings engine.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use quick_xml::de::from_str as xml_from_str;
use regex::Regex;
use serde::Deserialize;

use crate::error::{HoldingsError, HoldingsResult};

static XMLNS_DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\s+xmlns(?::\w+)?="[^"]*""#).expect("valid regex"));
static ELEMENT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(/?)(\w+):").expect("valid regex"));

/// A MARC record containing leader and fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarcRecord {
    /// The 24-character record leader
    pub leader: String,
    /// Control fields (00X)
    pub control_fields: HashMap<String, String>,
    /// Data fields with indicators and subfields, in document order
    pub data_fields: Vec<DataField>,
}

/// A MARC data field (010-999)
#[derive(Debug, Clone, PartialEq)]
pub struct DataField {
    pub tag: String,
    pub ind1: char,
    pub ind2: char,
    pub subfields: Vec<Subfield>,
}

/// A MARC subfield
#[derive(Debug, Clone, PartialEq)]
pub struct Subfield {
    pub code: char,
    pub data: String,
}

#[derive(Debug, Deserialize)]
struct XmlRecord {
    #[serde(default)]
    leader: Option<String>,
    #[serde(default)]
    controlfield: Vec<XmlControlField>,
    #[serde(default)]
    datafield: Vec<XmlDataField>,
}

#[derive(Debug, Deserialize)]
struct XmlControlField {
    #[serde(rename = "@tag")]
    tag: String,
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct XmlDataField {
    #[serde(rename = "@tag")]
    tag: String,
    #[serde(rename = "@ind1", default)]
    ind1: String,
    #[serde(rename = "@ind2", default)]
    ind2: String,
    #[serde(default)]
    subfield: Vec<XmlSubfield>,
}

#[derive(Debug, Deserialize)]
struct XmlSubfield {
    #[serde(rename = "@code")]
    code: String,
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct XmlCollection {
    #[serde(default)]
    record: Vec<XmlRecord>,
}

/// Drop namespace declarations and element prefixes (`marc:record` -> `record`)
fn strip_namespaces(xml: &str) -> String {
    let stripped = XMLNS_DECLARATION.replace_all(xml, "");
    ELEMENT_PREFIX.replace_all(&stripped, "<$1").into_owned()
}

impl MarcRecord {
    /// Parse a MARCXML `<record>`, or the first record of a `<collection>`
    pub fn from_marcxml(xml: &str) -> HoldingsResult<Self> {
        let cleaned = strip_namespaces(xml);
        let record = if cleaned.contains("<collection") {
            let collection: XmlCollection = xml_from_str(&cleaned)
                .map_err(|e| HoldingsError::Metadata(format!("Failed to parse MARCXML collection: {}", e)))?;
            collection
                .record
                .into_iter()
                .next()
                .ok_or_else(|| HoldingsError::Metadata("Empty MARCXML collection".to_string()))?
        } else {
            xml_from_str::<XmlRecord>(&cleaned)
                .map_err(|e| HoldingsError::Metadata(format!("Failed to parse MARCXML: {}", e)))?
        };
        Ok(Self::from(record))
    }

    /// Get all data fields with a specific tag
    pub fn get_fields(&self, tag: &str) -> Vec<&DataField> {
        self.data_fields.iter().filter(|f| f.tag == tag).collect()
    }

    /// Lines described by colon-separated field specs such as `866a:867az`.
    ///
    /// Each matching field gives one line: the data of its subfields whose code
    /// is listed, space-joined in field order. Empty lines are dropped.
    pub fn extract_lines(&self, field_specs: &str) -> Vec<String> {
        let mut lines = Vec::new();
        for spec in field_specs.split(':') {
            let spec = spec.trim();
            if spec.len() < 3 || !spec.is_char_boundary(3) {
                continue;
            }
            let (tag, codes) = spec.split_at(3);
            for field in self.get_fields(tag) {
                let line = field
                    .subfields
                    .iter()
                    .filter(|sf| codes.contains(sf.code))
                    .map(|sf| sf.data.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                if !line.is_empty() {
                    lines.push(line);
                }
            }
        }
        lines
    }
}

impl From<XmlRecord> for MarcRecord {
    fn from(xml: XmlRecord) -> Self {
        let control_fields = xml
            .controlfield
            .into_iter()
            .map(|cf| (cf.tag, cf.value))
            .collect();
        let data_fields = xml
            .datafield
            .into_iter()
            .map(|df| DataField {
                tag: df.tag,
                ind1: df.ind1.chars().next().unwrap_or(' '),
                ind2: df.ind2.chars().next().unwrap_or(' '),
                subfields: df
                    .subfield
                    .into_iter()
                    .filter_map(|sf| {
                        sf.code.chars().next().map(|code| Subfield { code, data: sf.value })
                    })
                    .collect(),
            })
            .collect();

        MarcRecord {
            leader: xml.leader.unwrap_or_default(),
            control_fields,
            data_fields,
        }
    }
}

impl DataField {
    /// Subfields in the order they appear
    pub fn subfields(&self) -> &[Subfield] {
        &self.subfields
    }

    /// Get a subfield value by code
    pub fn get_subfield(&self, code: char) -> Option<&str> {
        self.subfields
            .iter()
            .find(|sf| sf.code == code)
            .map(|sf| sf.data.as_str())
    }

    /// Get all subfield values for a code
    pub fn get_all_subfields(&self, code: char) -> Vec<&str> {
        self.subfields
            .iter()
            .filter(|sf| sf.code == code)
            .map(|sf| sf.data.as_str())
            .collect()
    }
}
