// core/src/trigger.rs
//
// Online-løypa: én synkron kall per rendret ramme, fra én produsent.
// All tilstand ligger i RepTrigger-objektet (ingen prosess-globale
// variabler), så maskinen kan testes isolert og må ikke deles mellom
// tråder uten egen mutex rundt hvert ramme-kall.

use anyhow::Result;

use crate::features::feature_for_segment;
use crate::metrics::SEGMENTS_SCORED_TOTAL;
use crate::models::{AngleSample, Keypoint, ReferenceCurve, ScoreRecord, Segment, INVALID_LABEL};
use crate::reference::{align_reference, AlignedReference};
use crate::resample::CANONICAL_LEN;
use crate::scoring::{clamp_score, segment_distance, weight_feature_vector, ScoringConfig};

/// Ekstern regresjonsmodell: featurevektor (124) → score 0–100.
/// Ren, tilstandsløs, ferdigtrent – lastes utenfor kjernen.
pub trait ScorePredictor {
    fn score(&self, features: &[f64]) -> Result<f64>;
}

/// Ekstern klassifikator: featurevektor (124) → feilkategori-etikett.
pub trait FormClassifier {
    fn classify(&self, features: &[f64]) -> Result<String>;
}

/// Én planlagt repetisjon fra offline-segmenttabellen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPlan {
    pub label: String,
    pub total_frames: usize,
}

/// Komprimerer segmenttabellen til én rad per segment: påfølgende rader
/// med samme etikett (62 per kanal i den kanoniske tabellen) slås
/// sammen én gang her, i stedet for en skip-løkke per ramme i triggeren.
pub fn compact_plan(rows: &[AngleSample]) -> Vec<SegmentPlan> {
    let mut plan: Vec<SegmentPlan> = Vec::new();
    for row in rows {
        if row.segment_label == INVALID_LABEL || row.segment_total_frames == 0 {
            continue;
        }
        if plan
            .last()
            .map(|p| p.label == row.segment_label)
            .unwrap_or(false)
        {
            continue;
        }
        plan.push(SegmentPlan {
            label: row.segment_label.clone(),
            total_frames: row.segment_total_frames,
        });
    }
    plan
}

/// Fase for tilstandsmaskinen, avledet av tellerne.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPhase {
    /// Før første gyldige ramme er sett.
    AwaitingFirstValidFrame,
    /// Inne i et segment; venter på at telleren når segmentlengden.
    InSegment,
    /// Planen er brukt opp; ingen flere scoringer.
    Exhausted,
}

/// Overlay-data for rendering. Selve tegningen ligger utenfor kjernen.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    pub score_text: String,
    pub label_text: String,
    /// Justert referansevinkel (group1) for gjeldende ramme i segmentet.
    pub expected_angle: Option<f64>,
}

/// Tilstandsmaskinen som fyrer scoring/klassifisering nøyaktig én gang
/// per fullført repetisjon under avspilling.
pub struct RepTrigger {
    plan: Vec<SegmentPlan>,
    aligned: Vec<AlignedReference>,
    canonical: Vec<AngleSample>,
    reference: ReferenceCurve,
    scoring: ScoringConfig,
    first_peak: usize,
    last_peak: usize,
    /// Teller innenfor gjeldende segment. Resettes til 1 ved fullføring:
    /// grenserammen deles med neste segment og er dets første ramme.
    cur: usize,
    /// Peker inn i planen.
    ndx: usize,
    positions: Vec<Vec<Keypoint>>,
    overlay: Overlay,
    records: Vec<ScoreRecord>,
    warnings: Vec<String>,
}

impl RepTrigger {
    /// Initialiseres én gang per video/sesjon, med den kanoniske tabellen
    /// og peak-grensene fra offline-segmenteringen av samme video.
    pub fn new(
        canonical_rows: Vec<AngleSample>,
        reference: ReferenceCurve,
        first_peak: usize,
        last_peak: usize,
        scoring: ScoringConfig,
    ) -> Self {
        let plan = compact_plan(&canonical_rows);
        let aligned = plan
            .iter()
            .map(|p| align_reference(&reference, p.total_frames))
            .collect();

        Self {
            plan,
            aligned,
            canonical: canonical_rows,
            reference,
            scoring,
            first_peak,
            last_peak,
            cur: 0,
            ndx: 0,
            positions: Vec::new(),
            overlay: Overlay::default(),
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn phase(&self) -> TriggerPhase {
        if self.ndx >= self.plan.len() {
            TriggerPhase::Exhausted
        } else if self.cur == 0 {
            TriggerPhase::AwaitingFirstValidFrame
        } else {
            TriggerPhase::InSegment
        }
    }

    /// Mater maskinen med én ramme. Rammer utenfor
    /// [first_peak, last_peak] logges for overlay men teller ikke.
    /// Returnerer resultatet når denne rammen fullførte et segment.
    pub fn on_frame(
        &mut self,
        frame_number: usize,
        points: &[Keypoint],
        scorer: &dyn ScorePredictor,
        classifier: &dyn FormClassifier,
    ) -> Option<&ScoreRecord> {
        self.positions.push(points.to_vec());

        if frame_number < self.first_peak || frame_number > self.last_peak {
            return None;
        }
        // planen brukt opp: stopp triggering, behold eksisterende resultater
        if self.ndx >= self.plan.len() {
            return None;
        }

        self.cur += 1;
        let expected = self.plan[self.ndx].total_frames;

        if self.cur < expected {
            self.overlay.expected_angle = self.aligned[self.ndx]
                .group1
                .get(self.cur - 1)
                .copied();
            return None;
        }

        // segmentet fullført på denne rammen
        let completed = self.complete_segment(frame_number, scorer, classifier);
        self.cur = 1;
        self.ndx += 1;

        if completed {
            self.records.last()
        } else {
            None
        }
    }

    fn complete_segment(
        &mut self,
        frame_number: usize,
        scorer: &dyn ScorePredictor,
        classifier: &dyn FormClassifier,
    ) -> bool {
        let label_key = self.plan[self.ndx].label.clone();
        let total = self.plan[self.ndx].total_frames;

        let mut feature = match feature_for_segment(&self.canonical, &label_key) {
            Some(f) => f,
            None => {
                let msg = format!(
                    "segment '{label_key}' mangler komplett featurevektor, hopper over scoring"
                );
                log::warn!("{}", msg);
                self.warnings.push(msg);
                return false;
            }
        };

        let raw_distance = segment_distance(
            &feature[..CANONICAL_LEN],
            &feature[CANONICAL_LEN..],
            &self.reference,
            &self.scoring.distance_weights,
        );

        weight_feature_vector(&mut feature, &self.scoring.feature_weights);

        let score = match scorer.score(&feature) {
            Ok(s) => clamp_score(s),
            Err(e) => {
                let msg = format!("score-prediktor feilet for '{label_key}': {e}");
                log::warn!("{}", msg);
                self.warnings.push(msg);
                return false;
            }
        };
        let label = match classifier.classify(&feature) {
            Ok(l) => l,
            Err(e) => {
                let msg = format!("klassifikator feilet for '{label_key}': {e}");
                log::warn!("{}", msg);
                self.warnings.push(msg);
                return false;
            }
        };

        let segment = Segment {
            label: label_key,
            start_frame: frame_number + 1 - total,
            end_frame: frame_number,
            total_frames: total,
        };

        self.overlay.score_text = format!("score: {score:.1}");
        self.overlay.label_text = format!("category: {label}");

        self.records.push(ScoreRecord {
            segment,
            raw_distance,
            normalized_score: score,
            predicted_label: Some(label),
        });
        SEGMENTS_SCORED_TOTAL.inc();
        true
    }

    pub fn plan(&self) -> &[SegmentPlan] {
        &self.plan
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn positions(&self) -> &[Vec<Keypoint>] {
        &self.positions
    }

    /// Avslutter sesjonen. Delvis akkumulert data for et ufullført siste
    /// segment forkastes – bare fullførte repetisjoner er scoret.
    pub fn into_records(self) -> Vec<ScoreRecord> {
        self.records
    }
}
