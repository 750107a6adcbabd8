// core/src/storage.rs
use std::path::Path;

use crate::error::FormError;
use crate::models::{AngleSample, ReferenceCurve};
use crate::reference::{reference_rows, CurveRow};
use crate::resample::CANONICAL_LEN;

/// Lagrer en vinkeltabell (rå eller kanonisk) som CSV med kolonnene
/// segment_label, frame_number, angle_group, angle_value, categories,
/// segment_total_frames.
pub fn save_angle_table(path: impl AsRef<Path>, rows: &[AngleSample]) -> Result<(), FormError> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    log::info!("✅ vinkeltabell lagret til {} ({} rader)", path.display(), rows.len());
    Ok(())
}

pub fn load_angle_table(path: impl AsRef<Path>) -> Result<Vec<AngleSample>, FormError> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        let row: AngleSample = result.map_err(|e| FormError::BadRow {
            row: i + 1,
            reason: e.to_string(),
        })?;
        rows.push(row);
    }
    log::info!("📂 vinkeltabell lastet fra {} ({} rader)", path.display(), rows.len());
    Ok(rows)
}

/// Lagrer en kurvetabell (referanse eller justert referanse):
/// frame_number, group1, group2.
pub fn save_curve_table(path: impl AsRef<Path>, rows: &[CurveRow]) -> Result<(), FormError> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    log::info!("✅ kurvetabell lagret til {} ({} rader)", path.display(), rows.len());
    Ok(())
}

pub fn save_reference(path: impl AsRef<Path>, reference: &ReferenceCurve) -> Result<(), FormError> {
    save_curve_table(path, &reference_rows(reference))
}

/// Leser referansekurven tilbake og validerer at begge kanaler har
/// nøyaktig 62 punkter i posisjonsrekkefølge.
pub fn load_reference(path: impl AsRef<Path>) -> Result<ReferenceCurve, FormError> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows: Vec<CurveRow> = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        let row: CurveRow = result.map_err(|e| FormError::BadRow {
            row: i + 1,
            reason: e.to_string(),
        })?;
        rows.push(row);
    }

    if rows.len() != CANONICAL_LEN {
        return Err(FormError::BadReferenceLength {
            expected: CANONICAL_LEN,
            got: rows.len(),
        });
    }
    rows.sort_by_key(|r| r.frame_number);

    log::info!("📂 referansekurve lastet fra {}", path.display());
    Ok(ReferenceCurve {
        group1: rows.iter().map(|r| r.group1).collect(),
        group2: rows.iter().map(|r| r.group2).collect(),
    })
}
