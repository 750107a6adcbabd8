// core/src/reference.rs
use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::models::{AngleGroup, AngleSample, ReferenceCurve, Segment};
use crate::resample::{resample, CANONICAL_LEN};

/// Bygger referansekurven fra kanoniske rader merket med
/// "ideell form"-kategorien: aritmetisk snitt per (kanal, posisjon 1..=62).
/// Kurven bygges én gang per datasett og muteres aldri av scoring.
pub fn build_reference(
    rows: &[AngleSample],
    ideal_category: &str,
) -> Result<ReferenceCurve, FormError> {
    let mut sums = [[0.0f64; CANONICAL_LEN]; 2];
    let mut counts = [[0usize; CANONICAL_LEN]; 2];
    let mut matched = 0usize;

    for row in rows {
        if row.categories != ideal_category {
            continue;
        }
        if row.frame_number == 0 || row.frame_number > CANONICAL_LEN {
            // kanoniske rader nummereres 1..=62; alt annet hører ikke hjemme her
            continue;
        }
        let g = match row.angle_group {
            AngleGroup::Group1 => 0,
            AngleGroup::Group2 => 1,
        };
        sums[g][row.frame_number - 1] += row.angle_value;
        counts[g][row.frame_number - 1] += 1;
        matched += 1;
    }

    if matched == 0 {
        return Err(FormError::NoIdealRows(ideal_category.to_string()));
    }

    let mut curve = ReferenceCurve {
        group1: Vec::with_capacity(CANONICAL_LEN),
        group2: Vec::with_capacity(CANONICAL_LEN),
    };
    for (g, out) in [&mut curve.group1, &mut curve.group2].into_iter().enumerate() {
        let group = if g == 0 {
            AngleGroup::Group1
        } else {
            AngleGroup::Group2
        };
        for pos in 0..CANONICAL_LEN {
            if counts[g][pos] == 0 {
                return Err(FormError::IncompleteReference {
                    group: group.as_str(),
                    position: pos + 1,
                });
            }
            out.push(sums[g][pos] / counts[g][pos] as f64);
        }
    }

    Ok(curve)
}

/// Referansen strukket/komprimert til én segmentlengde, for justering
/// mot et observert segment i sanntid. Gjenbruker resampleren med
/// byttede roller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedReference {
    pub group1: Vec<f64>,
    pub group2: Vec<f64>,
}

pub fn align_reference(reference: &ReferenceCurve, total_frames: usize) -> AlignedReference {
    AlignedReference {
        group1: resample(&reference.group1, total_frames),
        group2: resample(&reference.group2, total_frames),
    }
}

/// Én rad i en kurvetabell: posisjon pluss begge kanaler.
/// Samme skjema brukes for referansetabellen (frame_number 1..=62) og den
/// justerte tabellen (frame_number 1..=segmentlengde per segment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveRow {
    pub frame_number: usize,
    pub group1: f64,
    pub group2: f64,
}

pub fn reference_rows(reference: &ReferenceCurve) -> Vec<CurveRow> {
    reference
        .group1
        .iter()
        .zip(&reference.group2)
        .enumerate()
        .map(|(i, (&g1, &g2))| CurveRow {
            frame_number: i + 1,
            group1: g1,
            group2: g2,
        })
        .collect()
}

/// Justert tabell for en hel video: referansen strukket til hvert
/// detekterte segments lengde, i segmentrekkefølge.
pub fn align_for_segments(reference: &ReferenceCurve, segments: &[Segment]) -> Vec<CurveRow> {
    let mut rows = Vec::new();
    for segment in segments {
        let aligned = align_reference(reference, segment.total_frames);
        for (i, (&g1, &g2)) in aligned.group1.iter().zip(&aligned.group2).enumerate() {
            rows.push(CurveRow {
                frame_number: i + 1,
                group1: g1,
                group2: g2,
            });
        }
    }
    rows
}
