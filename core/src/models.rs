// core/src/models.rs
use serde::{Deserialize, Serialize};

/// Segment-etikett for rammer som ikke tilhører noen repetisjon.
pub const INVALID_LABEL: &str = "invalid";

/// Kategori-merke for observerte (ikke-ideelle) rader i vinkeltabellen.
pub const CATEGORY_OBSERVED: &str = "original";

/// Kategori-merke for "ideell form"-segmenter som referansekurven bygges av.
pub const CATEGORY_IDEAL: &str = "case0";

/// De to vinkelkanalene som spores per ramme.
/// group1 er leddet med størst utslag (styrer segmenteringen),
/// group2 er støttevinkelen som vurderes rundt toppen av bevegelsen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleGroup {
    Group1,
    Group2,
}

impl AngleGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            AngleGroup::Group1 => "group1",
            AngleGroup::Group2 => "group2",
        }
    }

    pub fn parse(s: &str) -> Option<AngleGroup> {
        match s {
            "group1" => Some(AngleGroup::Group1),
            "group2" => Some(AngleGroup::Group2),
            _ => None,
        }
    }
}

/// Én rad i vinkeltabellen: én ramme, én vinkelkanal.
/// Immutabel etter at den er skrevet – nedstrøms steg lager nye rader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AngleSample {
    pub segment_label: String,
    pub frame_number: usize,
    pub angle_group: AngleGroup,
    pub angle_value: f64,
    pub categories: String,
    pub segment_total_frames: usize,
}

/// Én repetisjon: et sammenhengende rammeintervall (inklusive begge ender).
/// Nabosegmenter deler toppunkt-rammen; en ramme hører likevel til maks
/// ett segment i tabellen (det tidligste).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Tidsintervall-streng, f.eks. "0:00:01.500000-0:00:03.200000".
    pub label: String,
    pub start_frame: usize,
    pub end_frame: usize,
    pub total_frames: usize,
}

impl Segment {
    pub fn contains(&self, frame: usize) -> bool {
        self.start_frame <= frame && frame <= self.end_frame
    }
}

/// Kanonisk referansekurve: 62 punkter per vinkelkanal, bygget én gang fra
/// "ideell form"-data og aldri mutert av scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCurve {
    pub group1: Vec<f64>,
    pub group2: Vec<f64>,
}

impl ReferenceCurve {
    pub fn values(&self, group: AngleGroup) -> &[f64] {
        match group {
            AngleGroup::Group1 => &self.group1,
            AngleGroup::Group2 => &self.group2,
        }
    }
}

/// Resultat for ett scoret segment. Appendes til en ordnet liste og
/// muteres aldri etterpå.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub segment: Segment,
    pub raw_distance: f64,
    pub normalized_score: f64,
    /// Klassifisert feilkategori. None i batch-løypa (ingen klassifikator).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_label: Option<String>,
}

/// Ett keypoint fra pose-kilden: pikselposisjon + konfidens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub confidence: f32,
}

/// Hvilken arm som spores. Varianten eier sine keypoint-tripler og
/// rotasjonsretning, i stedet for liste-sammenligninger i renderingsløypa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmSide {
    Left,
    Right,
}

impl ArmSide {
    /// Keypoint-trippel for hovedvinkelen (group1): skulder–albue–håndledd.
    pub fn primary_triple(self) -> [usize; 3] {
        match self {
            ArmSide::Left => [5, 7, 9],
            ArmSide::Right => [6, 8, 10],
        }
    }

    /// Keypoint-trippel for støttevinkelen (group2): albue–skulder–hofte.
    pub fn secondary_triple(self) -> [usize; 3] {
        match self {
            ArmSide::Left => [7, 5, 11],
            ArmSide::Right => [8, 6, 12],
        }
    }

    /// Rotasjonsfortegn for skjelett-projeksjon: høyre arm roterer mot
    /// klokka (+1), venstre med klokka (-1).
    pub fn rotation_sign(self) -> f64 {
        match self {
            ArmSide::Left => -1.0,
            ArmSide::Right => 1.0,
        }
    }
}
