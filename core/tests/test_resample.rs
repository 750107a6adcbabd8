use formgraph_core::resample::{resample, CANONICAL_LEN};

#[test]
fn test_resample_length_matches_target() {
    let long: Vec<f64> = (0..200).map(|i| i as f64).collect();
    let short: Vec<f64> = (0..7).map(|i| i as f64).collect();

    assert_eq!(resample(&long, CANONICAL_LEN).len(), CANONICAL_LEN);
    assert_eq!(resample(&short, CANONICAL_LEN).len(), CANONICAL_LEN);
}

#[test]
fn test_resample_identity_when_same_length() {
    let values: Vec<f64> = (0..CANONICAL_LEN).map(|i| i as f64 * 1.5).collect();
    assert_eq!(resample(&values, CANONICAL_LEN), values);
}

#[test]
fn test_resample_downsample_floor() {
    // n=5 -> 3: step 2.0, floor gir indeksene 0, 2, 4
    let values = vec![0.0, 1.0, 2.0, 3.0, 4.0];
    assert_eq!(resample(&values, 3), vec![0.0, 2.0, 4.0]);
}

#[test]
fn test_resample_upsample_repeats_indices() {
    // n=2 -> 5: step 0.25, avrunding gir 0,0,1,1,1
    let values = vec![0.0, 10.0];
    assert_eq!(resample(&values, 5), vec![0.0, 0.0, 10.0, 10.0, 10.0]);
}

#[test]
fn test_resample_preserves_endpoints() {
    let values: Vec<f64> = (0..90).map(|i| 50.0 + i as f64).collect();
    let out = resample(&values, CANONICAL_LEN);
    assert_eq!(out[0], values[0]);
    assert_eq!(out[CANONICAL_LEN - 1], *values.last().unwrap());
}

#[test]
fn test_resample_edge_cases() {
    assert!(resample(&[], CANONICAL_LEN).is_empty());
    assert!(resample(&[1.0, 2.0], 0).is_empty());
    assert_eq!(resample(&[7.0, 8.0, 9.0], 1), vec![7.0]);
}

#[test]
fn test_resample_deterministic() {
    let values: Vec<f64> = (0..130).map(|i| (i as f64).sin() * 40.0 + 100.0).collect();
    assert_eq!(resample(&values, CANONICAL_LEN), resample(&values, CANONICAL_LEN));
}
