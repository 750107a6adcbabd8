// core/src/lib.rs
//! FormGraph core: segmenterer en støyete leddvinkel-serie i
//! repetisjoner, normaliserer hvert segment mot en lært referansekurve
//! og produserer reproduserbare kvalitetsscores – offline i batch og
//! online via en ramme-drevet trigger under avspilling.

pub mod analyze_video;
pub mod cleaning;
pub mod error;
pub mod features;
pub mod metrics;
pub mod models;
pub mod reference;
pub mod resample;
pub mod scoring;
pub mod segmentation;
pub mod storage;
pub mod trigger;

pub use analyze_video::{analyze_video, AnalyzeInputs, VideoAnalysis};
pub use error::FormError;
pub use models::{
    AngleGroup, AngleSample, ArmSide, Keypoint, ReferenceCurve, ScoreRecord, Segment,
};
pub use resample::CANONICAL_LEN;

use serde::Deserialize;
use serde_json as json;
use serde_path_to_error as spte;

// ──────────────────────────────────────────────────────────────────────
// JSON-grenseflate for klienter utenfor Rust (toleranse via aliaser)
// ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct AnglesIn {
    #[serde(alias = "angles_group1", alias = "g1")]
    group1: Vec<f64>,
    #[serde(alias = "angles_group2", alias = "g2")]
    group2: Vec<f64>,
    #[serde(default = "default_fps")]
    fps: f64,
    #[serde(default = "default_arm")]
    arm: ArmSide,
}

fn default_fps() -> f64 {
    30.0
}

fn default_arm() -> ArmSide {
    ArmSide::Right
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CfgIn {
    segmenter: segmentation::SegmenterConfig,
    scoring: scoring::ScoringConfig,
}

fn parse_json<T: for<'de> Deserialize<'de>>(what: &str, s: &str) -> Result<T, String> {
    let mut de = json::Deserializer::from_str(s);
    spte::deserialize(&mut de).map_err(|e| format!("{what} parse at {}: {}", e.path(), e))
}

/// Analyserer én video fra JSON: vinkelserier + referansekurve + valgfri
/// konfig, returnerer VideoAnalysis som JSON. Feilstrengen peker på
/// JSON-stien som ikke lot seg parse.
pub fn analyze_video_json(
    angles_json: &str,
    reference_json: &str,
    cfg_json: Option<&str>,
) -> Result<String, String> {
    let angles: AnglesIn = parse_json("angles", angles_json)?;
    let reference: ReferenceCurve = parse_json("reference", reference_json)?;
    if reference.group1.len() != CANONICAL_LEN || reference.group2.len() != CANONICAL_LEN {
        return Err(format!(
            "reference: må ha {CANONICAL_LEN} punkter per kanal (group1={}, group2={})",
            reference.group1.len(),
            reference.group2.len()
        ));
    }

    let cfg: CfgIn = match cfg_json {
        Some(s) => parse_json("cfg", s)?,
        None => CfgIn::default(),
    };

    let result = analyze_video(
        AnalyzeInputs {
            angles_group1: &angles.group1,
            angles_group2: &angles.group2,
            fps: angles.fps,
            arm: angles.arm,
            segmenter: cfg.segmenter,
            scoring: cfg.scoring,
        },
        &reference,
    );

    json::to_string(&result).map_err(|e| e.to_string())
}

/// Bygger referansekurven fra et JSON-array av kanoniske vinkelrader.
/// `ideal_category` er None for defaulten ("case0").
pub fn build_reference_json(
    rows_json: &str,
    ideal_category: Option<&str>,
) -> Result<String, String> {
    let rows: Vec<AngleSample> = parse_json("rows", rows_json)?;
    let curve = reference::build_reference(
        &rows,
        ideal_category.unwrap_or(models::CATEGORY_IDEAL),
    )
    .map_err(|e| e.to_string())?;
    json::to_string(&curve).map_err(|e| e.to_string())
}
