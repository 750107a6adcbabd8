use formgraph_core::metrics::{gather_text, VIDEOS_ANALYZED_TOTAL};
use formgraph_core::{analyze_video_json, build_reference_json};
use serde_json::json;

fn angles_json() -> String {
    let pattern = [50.0, 130.0, 70.0, 135.0, 65.0, 140.0, 68.0];
    let group1: Vec<f64> = pattern.iter().cycle().take(21).copied().collect();
    let group2 = vec![90.0; 21];
    json!({ "group1": group1, "group2": group2, "fps": 30.0, "arm": "right" }).to_string()
}

fn reference_json() -> String {
    json!({ "group1": vec![100.0; 62], "group2": vec![90.0; 62] }).to_string()
}

fn cfg_json() -> String {
    json!({ "segmenter": { "min_distance": 2, "min_prominence": 5.0 } }).to_string()
}

#[test]
fn smoke_analyze_video_json() {
    let out = analyze_video_json(&angles_json(), &reference_json(), Some(&cfg_json())).unwrap();

    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(v["records"].as_array().unwrap().len() >= 2);
    assert!(v["average_score"].as_f64().is_some());
    assert_eq!(v["arm"], "right");
    assert!(v["analyzed_at"].as_str().is_some());

    // counterne er registrert og synlige i text-formatet
    assert!(VIDEOS_ANALYZED_TOTAL.get() >= 1);
    let text = gather_text();
    assert!(text.contains("formgraph_videos_analyzed_total"));
    assert!(text.contains("formgraph_segments_scored_total"));
}

#[test]
fn smoke_json_errors_point_at_path() {
    // feil type i group1: feilmeldingen skal peke på JSON-stien
    let bad = json!({ "group1": "ikke-en-liste", "group2": [1.0] }).to_string();
    let err = analyze_video_json(&bad, &reference_json(), None).unwrap_err();
    assert!(err.contains("angles parse"));
    assert!(err.contains("group1"));

    // referanse med feil lengde avvises før analyse
    let short = json!({ "group1": [1.0, 2.0], "group2": [3.0, 4.0] }).to_string();
    let err = analyze_video_json(&angles_json(), &short, None).unwrap_err();
    assert!(err.contains("62"));
}

#[test]
fn smoke_json_aliases_accepted() {
    let pattern = [50.0, 130.0, 70.0, 135.0, 65.0, 140.0, 68.0];
    let group1: Vec<f64> = pattern.iter().cycle().take(21).copied().collect();
    // eldre klienter sender angles_group1/angles_group2 og dropper fps
    let angles = json!({ "angles_group1": group1, "angles_group2": vec![90.0; 21] }).to_string();

    let out = analyze_video_json(&angles, &reference_json(), Some(&cfg_json())).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["arm"], "right"); // default-arm
}

#[test]
fn smoke_build_reference_json() {
    // 62 rader per kanal med kategori case0
    let mut rows = Vec::new();
    for group in ["group1", "group2"] {
        for pos in 1..=62 {
            rows.push(json!({
                "segment_label": "0:00:00-0:00:02",
                "frame_number": pos,
                "angle_group": group,
                "angle_value": 100.0 + pos as f64,
                "categories": "case0",
                "segment_total_frames": 40
            }));
        }
    }

    let out = build_reference_json(&serde_json::to_string(&rows).unwrap(), None).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["group1"].as_array().unwrap().len(), 62);
    assert_eq!(v["group1"][0], 101.0);
    assert_eq!(v["group2"][61], 162.0);

    // ukjent kategori gir forklarlig feil
    let err = build_reference_json(&serde_json::to_string(&rows).unwrap(), Some("case9"))
        .unwrap_err();
    assert!(err.contains("case9"));
}
