// core/src/features.rs
use crate::models::{AngleGroup, AngleSample};
use crate::resample::CANONICAL_LEN;

/// Lengden på featurevektoren: 62 group1-verdier etterfulgt av 62
/// group2-verdier.
pub const FEATURE_LEN: usize = 2 * CANONICAL_LEN;

/// Setter sammen featurevektoren for ett segment fra den kanoniske
/// tabellen. Returnerer None hvis segmentet mangler en komplett kanal
/// (f.eks. droppet av cleaneren) – kalleren hopper over og rapporterer.
pub fn feature_for_segment(rows: &[AngleSample], label: &str) -> Option<Vec<f64>> {
    let group1 = channel_values(rows, label, AngleGroup::Group1)?;
    let group2 = channel_values(rows, label, AngleGroup::Group2)?;

    let mut feature = Vec::with_capacity(FEATURE_LEN);
    feature.extend(group1);
    feature.extend(group2);
    Some(feature)
}

fn channel_values(rows: &[AngleSample], label: &str, group: AngleGroup) -> Option<Vec<f64>> {
    let mut values: Vec<(usize, f64)> = rows
        .iter()
        .filter(|r| r.segment_label == label && r.angle_group == group)
        .map(|r| (r.frame_number, r.angle_value))
        .collect();

    if values.len() != CANONICAL_LEN {
        return None;
    }

    values.sort_by_key(|(frame, _)| *frame);
    Some(values.into_iter().map(|(_, v)| v).collect())
}
