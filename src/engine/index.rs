//! Holding index: holding-only records keyed by holding id

use indexmap::IndexMap;

use crate::{
    config::HoldingsConfig,
    marc::MarcRecord,
    models::{MarcDetails, RawHoldingRecord},
};

/// A holding record with its metadata parsed once
#[derive(Debug, Clone)]
pub struct IndexedHolding {
    pub record: RawHoldingRecord,
    /// `None` when no metadata blob is in a supported schema or it failed to parse
    pub marc: Option<MarcRecord>,
    /// MFHD fields merged into every entry built from this holding
    pub details: Option<MarcDetails>,
}

impl IndexedHolding {
    pub fn new(record: RawHoldingRecord, config: &HoldingsConfig) -> Self {
        let marc = parse_metadata(&record);
        let details = marc
            .as_ref()
            .and_then(|marc| marc_details(marc, &record.holding_id, config));
        Self {
            record,
            marc,
            details,
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.record.suppressed
    }
}

/// Holdings of one title in fetch order
#[derive(Debug, Clone, Default)]
pub struct HoldingIndex {
    holdings: IndexMap<String, IndexedHolding>,
}

impl HoldingIndex {
    pub fn build(records: Vec<RawHoldingRecord>, config: &HoldingsConfig) -> Self {
        let mut holdings = IndexMap::with_capacity(records.len());
        for record in records {
            let id = record.holding_id.clone();
            if holdings.contains_key(&id) {
                tracing::warn!("Duplicate holding id {} in fetch result, keeping the last one", id);
            }
            holdings.insert(id, IndexedHolding::new(record, config));
        }
        tracing::debug!("Indexed {} holding records", holdings.len());
        Self { holdings }
    }

    pub fn get(&self, holding_id: &str) -> Option<&IndexedHolding> {
        self.holdings.get(holding_id)
    }

    /// Holdings that may contribute entries, in fetch order
    pub fn visible(&self) -> impl Iterator<Item = &IndexedHolding> {
        self.holdings.values().filter(|h| !h.is_suppressed())
    }
}

/// First supported metadata blob, parsed
fn parse_metadata(record: &RawHoldingRecord) -> Option<MarcRecord> {
    let blob = record
        .metadata_blobs()
        .into_iter()
        .find(|blob| blob.is_supported());
    let Some(blob) = blob else {
        tracing::debug!("Holding {} has no MARC21 MARCXML metadata", record.holding_id);
        return None;
    };
    match MarcRecord::from_marcxml(&blob.metadata) {
        Ok(marc) => Some(marc),
        Err(e) => {
            tracing::warn!("Skipping metadata of holding {}: {}", record.holding_id, e);
            None
        }
    }
}

fn marc_details(marc: &MarcRecord, holding_id: &str, config: &HoldingsConfig) -> Option<MarcDetails> {
    let optional = |specs: &Option<String>| {
        specs
            .as_deref()
            .map(|specs| marc.extract_lines(specs))
            .unwrap_or_default()
    };
    let details = MarcDetails {
        notes: marc.extract_lines(&config.notes),
        summary: marc.extract_lines(&config.summary),
        supplements: optional(&config.supplements),
        indexes: optional(&config.indexes),
        links: optional(&config.links),
        holdings_id: holding_id.to_string(),
    };

    let empty = details.notes.is_empty()
        && details.summary.is_empty()
        && details.supplements.is_empty()
        && details.indexes.is_empty()
        && details.links.is_empty();
    if empty {
        None
    } else {
        Some(details)
    }
}
