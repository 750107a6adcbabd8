// core/src/analyze_video.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cleaning::clean_table;
use crate::features::feature_for_segment;
use crate::metrics::{SEGMENTS_SCORED_TOTAL, VIDEOS_ANALYZED_TOTAL};
use crate::models::{
    AngleGroup, AngleSample, ArmSide, ReferenceCurve, ScoreRecord, CATEGORY_OBSERVED,
};
use crate::resample::{resample, CANONICAL_LEN};
use crate::scoring::{normalize_scores, segment_distance, ScoringConfig};
use crate::segmentation::{segment_video, Segmentation, SegmenterConfig};

/// Inndata for offline-analysen av én video: ferdig beregnede vinkler
/// per ramme fra pose-kilden, pluss terskler.
#[derive(Clone)]
pub struct AnalyzeInputs<'a> {
    pub angles_group1: &'a [f64],
    pub angles_group2: &'a [f64],
    pub fps: f64,
    pub arm: ArmSide,
    pub segmenter: SegmenterConfig,
    pub scoring: ScoringConfig,
}

/// Video-resultat: segmenttabell, begge vinkeltabeller, batch-scores og
/// akkumulerte warnings. Ingenting her er fatalt – en video uten reps
/// gir bare tomme lister.
#[derive(Debug, Clone, Serialize)]
pub struct VideoAnalysis {
    pub analyzed_at: DateTime<Utc>,
    pub arm: ArmSide,
    pub segmentation: Segmentation,
    /// Rå vinkeltabell (før rensing), kun gyldige rammer fra første topp.
    pub raw_rows: Vec<AngleSample>,
    /// Kanonisk tabell: 62 rader per (segment, kanal).
    pub canonical_rows: Vec<AngleSample>,
    pub records: Vec<ScoreRecord>,
    pub average_score: Option<f64>,
    pub warnings: Vec<String>,
}

impl VideoAnalysis {
    /// Segmenter under terskelen – kandidater for klipp-uttrekk i
    /// rapporteringslaget.
    pub fn records_below(&self, threshold: f64) -> Vec<&ScoreRecord> {
        self.records
            .iter()
            .filter(|r| r.normalized_score < threshold)
            .collect()
    }
}

pub fn analyze_video(inputs: AnalyzeInputs, reference: &ReferenceCurve) -> VideoAnalysis {
    let mut warnings = Vec::new();

    let mut n = inputs.angles_group1.len();
    if inputs.angles_group2.len() != n {
        n = n.min(inputs.angles_group2.len());
        warnings.push(format!(
            "ulik kanal-lengde (group1={}, group2={}), trunkerer til {}",
            inputs.angles_group1.len(),
            inputs.angles_group2.len(),
            n
        ));
    }
    let group1 = &inputs.angles_group1[..n];
    let group2 = &inputs.angles_group2[..n];

    let segmentation = segment_video(group1, inputs.fps, &inputs.segmenter);
    if segmentation.segments.is_empty() {
        warnings.push("ingen repetisjoner funnet i videoen".to_string());
    }

    // rå tabell i segmentrekkefølge, group1 så group2 per segment: samme
    // radorden som den kanoniske tabellen nedstrøms, så triggerens plan
    // kan leses rett ut av påfølgende runs. Delte grenserammer hører til
    // det tidligste segmentet og hoppes over i det senere.
    let mut raw_rows = Vec::new();
    for segment in &segmentation.segments {
        for (group, angles) in [(AngleGroup::Group1, group1), (AngleGroup::Group2, group2)] {
            for frame in segment.start_frame..=segment.end_frame {
                let owner = segmentation.segment_for_frame(frame);
                if owner.map(|s| s.label != segment.label).unwrap_or(true) {
                    continue;
                }
                raw_rows.push(AngleSample {
                    segment_label: segment.label.clone(),
                    frame_number: frame,
                    angle_group: group,
                    angle_value: angles[frame],
                    categories: CATEGORY_OBSERVED.to_string(),
                    segment_total_frames: segment.total_frames,
                });
            }
        }
    }

    let (cleaned, clean_warnings) = clean_table(raw_rows.clone());
    warnings.extend(clean_warnings);

    let canonical_rows = resample_table(&cleaned);

    // batch-scoring mot referansen: råavstand per segment, deretter
    // min-max-invertering over hele videoen
    let mut scored_segments = Vec::new();
    let mut distances = Vec::new();
    for segment in &segmentation.segments {
        match feature_for_segment(&canonical_rows, &segment.label) {
            Some(feature) => {
                let d = segment_distance(
                    &feature[..CANONICAL_LEN],
                    &feature[CANONICAL_LEN..],
                    reference,
                    &inputs.scoring.distance_weights,
                );
                scored_segments.push(segment.clone());
                distances.push(d);
            }
            None => {
                warnings.push(format!(
                    "segment '{}' utelatt fra scoring (ufullstendige data)",
                    segment.label
                ));
            }
        }
    }

    let scores = normalize_scores(&distances);
    let records: Vec<ScoreRecord> = scored_segments
        .into_iter()
        .zip(distances)
        .zip(&scores)
        .map(|((segment, raw_distance), &normalized_score)| ScoreRecord {
            segment,
            raw_distance,
            normalized_score,
            predicted_label: None,
        })
        .collect();

    let average_score = if records.is_empty() {
        None
    } else {
        Some(records.iter().map(|r| r.normalized_score).sum::<f64>() / records.len() as f64)
    };

    SEGMENTS_SCORED_TOTAL.inc_by(records.len() as u64);
    VIDEOS_ANALYZED_TOTAL.inc();

    VideoAnalysis {
        analyzed_at: Utc::now(),
        arm: inputs.arm,
        segmentation,
        raw_rows,
        canonical_rows,
        records,
        average_score,
        warnings,
    }
}

/// Resampler hver (segment, kanal)-run i den rensede tabellen til
/// kanonisk lengde. frame_number blir 1..=62; segment_total_frames
/// beholder den faktiske segmentlengden – triggeren trenger den.
fn resample_table(rows: &[AngleSample]) -> Vec<AngleSample> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < rows.len() {
        let mut j = i + 1;
        while j < rows.len()
            && rows[j].segment_label == rows[i].segment_label
            && rows[j].angle_group == rows[i].angle_group
        {
            j += 1;
        }

        let values: Vec<f64> = rows[i..j].iter().map(|r| r.angle_value).collect();
        for (pos, value) in resample(&values, CANONICAL_LEN).into_iter().enumerate() {
            out.push(AngleSample {
                segment_label: rows[i].segment_label.clone(),
                frame_number: pos + 1,
                angle_group: rows[i].angle_group,
                angle_value: value,
                categories: rows[i].categories.clone(),
                segment_total_frames: rows[i].segment_total_frames,
            });
        }

        i = j;
    }
    out
}
