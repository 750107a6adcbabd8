use formgraph_core::cleaning::{clean_segment_angles, clean_table};
use formgraph_core::models::{AngleGroup, AngleSample};

fn rows(label: &str, group: AngleGroup, values: &[f64]) -> Vec<AngleSample> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| AngleSample {
            segment_label: label.to_string(),
            frame_number: i + 1,
            angle_group: group,
            angle_value: v,
            categories: "original".to_string(),
            segment_total_frames: values.len(),
        })
        .collect()
}

#[test]
fn test_clean_boundary_zeros_filled() {
    // ledende og avsluttende nuller fylles med nærmeste ikke-null
    let out = clean_segment_angles(&[0.0, 0.0, 5.0, 6.0, 0.0]).unwrap();
    assert_eq!(out, vec![5.0, 5.0, 5.0, 6.0, 6.0]);
}

#[test]
fn test_clean_interior_zero_is_neighbor_mean() {
    let out = clean_segment_angles(&[4.0, 0.0, 8.0]).unwrap();
    assert_eq!(out, vec![4.0, 6.0, 8.0]);
}

#[test]
fn test_clean_zero_run_interior() {
    // hele runen fylles venstre mot høyre; først (10+30)/2, deretter (20+30)/2
    let out = clean_segment_angles(&[10.0, 0.0, 0.0, 30.0]).unwrap();
    assert_eq!(out, vec![10.0, 20.0, 25.0, 30.0]);
}

#[test]
fn test_clean_all_zero_gives_none() {
    assert!(clean_segment_angles(&[0.0, 0.0, 0.0]).is_none());
}

#[test]
fn test_clean_no_zeros_unchanged() {
    let values = vec![90.0, 110.0, 130.0, 100.0];
    assert_eq!(clean_segment_angles(&values).unwrap(), values);
}

#[test]
fn test_clean_table_output_has_no_zeros() {
    let mut table = rows("a", AngleGroup::Group1, &[0.0, 100.0, 0.0, 120.0]);
    table.extend(rows("a", AngleGroup::Group2, &[90.0, 0.0, 95.0]));

    let (cleaned, warnings) = clean_table(table);

    assert!(warnings.is_empty());
    assert!(cleaned.iter().all(|r| r.angle_value != 0.0));
    assert_eq!(cleaned.len(), 7);
}

#[test]
fn test_clean_table_drops_all_zero_run() {
    let mut table = rows("a", AngleGroup::Group1, &[100.0, 110.0]);
    table.extend(rows("b", AngleGroup::Group1, &[0.0, 0.0, 0.0]));
    table.extend(rows("c", AngleGroup::Group1, &[95.0, 105.0]));

    let (cleaned, warnings) = clean_table(table);

    // b droppes, a og c overlever i rekkefølge
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("'b'"));
    assert_eq!(cleaned.len(), 4);
    assert!(cleaned.iter().all(|r| r.segment_label != "b"));
}

#[test]
fn test_clean_table_groups_by_label_and_channel() {
    // samme etikett, men ulik kanal: nullene renses per kanal-run
    let mut table = rows("a", AngleGroup::Group1, &[100.0, 0.0, 120.0]);
    table.extend(rows("a", AngleGroup::Group2, &[0.0, 80.0]));

    let (cleaned, _) = clean_table(table);

    assert_eq!(cleaned[1].angle_value, 110.0);
    assert_eq!(cleaned[3].angle_value, 80.0);
}
