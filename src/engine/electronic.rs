//! Online access links read from holding metadata

use crate::engine::index::HoldingIndex;
use crate::engine::PositionCounter;
use crate::marc::DataField;
use crate::models::{ElectronicHoldingsEntry, ItemIdentity};

/// One entry per `856$u` of every visible holding with readable metadata
pub fn extract_electronic_entries(
    title_id: &str,
    index: &HoldingIndex,
    counter: &mut PositionCounter,
) -> Vec<ElectronicHoldingsEntry> {
    let mut entries = Vec::new();
    for holding in index.visible() {
        let Some(marc) = holding.marc.as_ref() else {
            continue;
        };
        let notes: Vec<&str> = marc
            .get_fields("852")
            .into_iter()
            .filter_map(|f| f.get_subfield('z'))
            .collect();

        for field in marc.get_fields("856") {
            let text = link_text(field, &notes);
            for url in field.get_all_subfields('u') {
                let position = counter.take();
                entries.push(ElectronicHoldingsEntry {
                    id: title_id.to_string(),
                    item_id: ItemIdentity::Holding(holding.record.holding_id.clone()),
                    location: text.clone(),
                    status: text.clone(),
                    availability: true,
                    location_href: url.to_string(),
                    use_unknown_message: false,
                    branch_id: holding.record.holding_branch.clone(),
                    location_id: holding.record.location.clone(),
                    sort: position,
                });
            }
        }
    }

    tracing::debug!("Extracted {} electronic links for title {}", entries.len(), title_id);
    entries
}

/// Materials specified (`$3`), then link texts (`$y`, `$z`), then holding notes
fn link_text(field: &DataField, notes: &[&str]) -> String {
    let mut parts: Vec<&str> = Vec::new();
    let mut descriptions: Vec<&str> = Vec::new();
    for subfield in field.subfields() {
        match subfield.code {
            '3' => parts.push(&subfield.data),
            'y' | 'z' => descriptions.push(&subfield.data),
            _ => {}
        }
    }
    parts
        .into_iter()
        .chain(descriptions)
        .chain(notes.iter().copied())
        .collect::<Vec<_>>()
        .join(". ")
}
