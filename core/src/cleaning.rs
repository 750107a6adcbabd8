// core/src/cleaning.rs
use crate::metrics::SEGMENTS_DROPPED_TOTAL;
use crate::models::AngleSample;

/// Renser vinkelsekvensen for ett segment. Null brukes som sentinel for
/// "manglende måling" fra pose-kilden.
///
/// Kontrakt:
/// - null-runs i start/slutt fylles med nærmeste ikke-null-verdi,
/// - indre nuller erstattes med snittet av nærmeste ikke-null-nabo på hver
///   side (én-sidig nabo hvis bare én finnes),
/// - helt nullstilt segment gir `None` – kalleren dropper segmentet.
pub fn clean_segment_angles(angles: &[f64]) -> Option<Vec<f64>> {
    let first_nz = angles.iter().position(|&a| a != 0.0)?;
    let last_nz = angles.iter().rposition(|&a| a != 0.0)?;

    let mut out = angles.to_vec();

    for v in &mut out[..first_nz] {
        *v = angles[first_nz];
    }
    for v in &mut out[last_nz + 1..] {
        *v = angles[last_nz];
    }

    for i in first_nz..=last_nz {
        if out[i] != 0.0 {
            continue;
        }
        let left = out[..i].iter().rposition(|&a| a != 0.0);
        let right = out[i + 1..]
            .iter()
            .position(|&a| a != 0.0)
            .map(|j| i + 1 + j);

        out[i] = match (left, right) {
            (Some(l), Some(r)) => (out[l] + out[r]) / 2.0,
            (Some(l), None) => out[l],
            (None, Some(r)) => out[r],
            // kan ikke skje: first_nz/last_nz garanterer naboer
            (None, None) => out[i],
        };
    }

    Some(out)
}

/// Renser en hel vinkeltabell, gruppert på (segment_label, angle_group)
/// i radrekkefølge. Helt nullstilte grupper droppes med warning – ikke
/// fatalt, videoen fortsetter uten det segmentet.
pub fn clean_table(rows: Vec<AngleSample>) -> (Vec<AngleSample>, Vec<String>) {
    let mut cleaned = Vec::with_capacity(rows.len());
    let mut warnings = Vec::new();

    let mut i = 0;
    while i < rows.len() {
        // finn runen med samme (label, gruppe)
        let mut j = i + 1;
        while j < rows.len()
            && rows[j].segment_label == rows[i].segment_label
            && rows[j].angle_group == rows[i].angle_group
        {
            j += 1;
        }

        let angles: Vec<f64> = rows[i..j].iter().map(|r| r.angle_value).collect();
        match clean_segment_angles(&angles) {
            Some(values) => {
                for (row, value) in rows[i..j].iter().zip(values) {
                    let mut row = row.clone();
                    row.angle_value = value;
                    cleaned.push(row);
                }
            }
            None => {
                let msg = format!(
                    "segment '{}' ({}) har bare null-vinkler, droppes",
                    rows[i].segment_label,
                    rows[i].angle_group.as_str()
                );
                log::warn!("{}", msg);
                SEGMENTS_DROPPED_TOTAL.inc();
                warnings.push(msg);
            }
        }

        i = j;
    }

    (cleaned, warnings)
}
