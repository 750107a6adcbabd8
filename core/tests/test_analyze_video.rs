use formgraph_core::models::{ArmSide, ReferenceCurve, CATEGORY_OBSERVED};
use formgraph_core::scoring::ScoringConfig;
use formgraph_core::segmentation::SegmenterConfig;
use formgraph_core::{analyze_video, AnalyzeInputs, CANONICAL_LEN};

fn rep_series(frames: usize) -> (Vec<f64>, Vec<f64>) {
    let pattern = [50.0, 130.0, 70.0, 135.0, 65.0, 140.0, 68.0];
    let group1: Vec<f64> = pattern.iter().cycle().take(frames).copied().collect();
    // støttekanalen svinger svakt rundt 90, med et par null-hull
    let group2: Vec<f64> = (0..frames)
        .map(|i| if i % 9 == 4 { 0.0 } else { 90.0 + (i % 5) as f64 })
        .collect();
    (group1, group2)
}

fn cfg() -> SegmenterConfig {
    SegmenterConfig {
        min_distance: 2,
        min_prominence: 5.0,
        ..SegmenterConfig::default()
    }
}

fn reference() -> ReferenceCurve {
    ReferenceCurve {
        group1: vec![100.0; CANONICAL_LEN],
        group2: vec![90.0; CANONICAL_LEN],
    }
}

fn inputs<'a>(group1: &'a [f64], group2: &'a [f64]) -> AnalyzeInputs<'a> {
    AnalyzeInputs {
        angles_group1: group1,
        angles_group2: group2,
        fps: 30.0,
        arm: ArmSide::Right,
        segmenter: cfg(),
        scoring: ScoringConfig::default(),
    }
}

#[test]
fn test_analyze_video_end_to_end() {
    let (group1, group2) = rep_series(21);
    let result = analyze_video(inputs(&group1, &group2), &reference());

    assert!(result.segmentation.segments.len() >= 2);
    assert_eq!(result.records.len(), result.segmentation.segments.len());

    // min-max-invertering: beste segment 100, dårligste 0
    let scores: Vec<f64> = result.records.iter().map(|r| r.normalized_score).collect();
    assert!(scores.iter().cloned().fold(f64::INFINITY, f64::min) == 0.0);
    assert!(scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max) == 100.0);
    assert!(scores.iter().all(|s| (0.0..=100.0).contains(s)));

    // batch-løypa har ingen klassifikator
    assert!(result.records.iter().all(|r| r.predicted_label.is_none()));

    let avg = result.average_score.unwrap();
    assert!((0.0..=100.0).contains(&avg));
}

#[test]
fn test_analyze_video_canonical_table_shape() {
    let (group1, group2) = rep_series(21);
    let result = analyze_video(inputs(&group1, &group2), &reference());

    let segments = result.segmentation.segments.len();
    // 62 rader per kanal per segment, null-hullene interpolert bort
    assert_eq!(result.canonical_rows.len(), segments * 2 * CANONICAL_LEN);
    assert!(result.canonical_rows.iter().all(|r| r.angle_value != 0.0));
    assert!(result
        .canonical_rows
        .iter()
        .all(|r| (1..=CANONICAL_LEN).contains(&r.frame_number)));
    assert!(result
        .canonical_rows
        .iter()
        .all(|r| r.categories == CATEGORY_OBSERVED));

    // rå tabell starter ved første forankrede topp
    let first = result.segmentation.first_peak.unwrap();
    assert!(result.raw_rows.iter().all(|r| r.frame_number >= first));
}

#[test]
fn test_analyze_video_no_reps_is_not_an_error() {
    let flat = vec![100.0; 60];
    let result = analyze_video(inputs(&flat, &flat), &reference());

    assert!(result.segmentation.segments.is_empty());
    assert!(result.records.is_empty());
    assert!(result.average_score.is_none());
    assert!(result.warnings.iter().any(|w| w.contains("ingen repetisjoner")));
}

#[test]
fn test_analyze_video_truncates_unequal_channels() {
    let (group1, mut group2) = rep_series(21);
    group2.truncate(18);

    let result = analyze_video(inputs(&group1, &group2), &reference());

    assert!(result.warnings.iter().any(|w| w.contains("trunkerer")));
    assert!(result.raw_rows.iter().all(|r| r.frame_number < 18));
}

#[test]
fn test_records_below_threshold() {
    let (group1, group2) = rep_series(21);
    let result = analyze_video(inputs(&group1, &group2), &reference());

    let low = result.records_below(50.0);
    assert!(low.iter().all(|r| r.normalized_score < 50.0));
    assert!(low.len() < result.records.len());

    // ingen under 0: terskel 0 gir tom liste
    assert!(result.records_below(0.0).is_empty());
}
