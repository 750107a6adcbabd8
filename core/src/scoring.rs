// core/src/scoring.rs
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::models::{AngleGroup, ReferenceCurve};

/// Vektprofil for avstand/feature-vekting: de `num_weights` utvalgte
/// posisjonene får faktor `weight_factor`, resten 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightPolicy {
    pub num_weights: usize,
    pub weight_factor: f64,
}

impl WeightPolicy {
    pub const fn new(num_weights: usize, weight_factor: f64) -> Self {
        Self {
            num_weights,
            weight_factor,
        }
    }
}

/// Vektoppsett for scoring. Batch-avstanden bruker (3, 3), features til
/// de eksterne prediktorene (5, 5) – samme verdier som treningsdataene
/// ble laget med.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub distance_weights: WeightPolicy,
    pub feature_weights: WeightPolicy,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            distance_weights: WeightPolicy::new(3, 3.0),
            feature_weights: WeightPolicy::new(5, 5.0),
        }
    }
}

/// Vektvektor for en kanal:
/// - group1: første og siste k posisjoner vektes opp (start/slutt-positur),
/// - group2: de midterste k posisjonene vektes opp (toppen av bevegelsen).
pub fn weights_for(group: AngleGroup, len: usize, policy: &WeightPolicy) -> Vec<f64> {
    let mut w = vec![1.0; len];
    let k = policy.num_weights.min(len);
    match group {
        AngleGroup::Group1 => {
            for v in &mut w[..k] {
                *v = policy.weight_factor;
            }
            for v in &mut w[len - k..] {
                *v = policy.weight_factor;
            }
        }
        AngleGroup::Group2 => {
            let start = (len - k) / 2;
            for v in &mut w[start..start + k] {
                *v = policy.weight_factor;
            }
        }
    }
    w
}

/// Vektet euklidsk avstand: sqrt(Σ ((obs − ref) · w)²).
/// Med alle vekter lik 1 er dette eksakt uvektet euklidsk avstand.
pub fn weighted_distance(observed: &[f64], reference: &[f64], weights: &[f64]) -> f64 {
    observed
        .iter()
        .zip(reference)
        .zip(weights)
        .map(|((o, r), w)| {
            let d = (o - r) * w;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Avstand for ett segment: vektet avstand per kanal mot referansen,
/// snittet til én verdi.
pub fn segment_distance(
    group1: &[f64],
    group2: &[f64],
    reference: &ReferenceCurve,
    policy: &WeightPolicy,
) -> f64 {
    let w1 = weights_for(AngleGroup::Group1, group1.len(), policy);
    let w2 = weights_for(AngleGroup::Group2, group2.len(), policy);
    let d1 = weighted_distance(group1, reference.values(AngleGroup::Group1), &w1);
    let d2 = weighted_distance(group2, reference.values(AngleGroup::Group2), &w2);
    (d1 + d2) / 2.0
}

/// Inverterer en batch med råavstander til scores i [0, 100]: minst
/// avstand gir 100, størst gir 0. Degenerert batch (alle avstander like)
/// gir 100 til alle – ingen divisjon på null.
pub fn normalize_scores(distances: &[f64]) -> Vec<f64> {
    if distances.is_empty() {
        return Vec::new();
    }

    let min = distances
        .iter()
        .copied()
        .map(OrderedFloat)
        .min()
        .map(|v| v.0)
        .unwrap_or(0.0);
    let max = distances
        .iter()
        .copied()
        .map(OrderedFloat)
        .max()
        .map(|v| v.0)
        .unwrap_or(0.0);

    if max == min {
        log::warn!("alle segmentavstander like ({min}); gir 100 til hele batchen");
        return vec![100.0; distances.len()];
    }

    distances
        .iter()
        .map(|d| 100.0 - (d - min) / (max - min) * 100.0)
        .collect()
}

/// Vekter en 124-feature før den sendes til prediktorene: start/slutt av
/// group1-blokka og midten av group2-blokka ganges opp.
pub fn weight_feature_vector(features: &mut [f64], policy: &WeightPolicy) {
    let half = features.len() / 2;
    let k = policy.num_weights.min(half);
    let f = policy.weight_factor;

    for v in &mut features[..k] {
        *v *= f;
    }
    for v in &mut features[half - k..half] {
        *v *= f;
    }

    let mid_start = half + (half - k) / 2;
    for v in &mut features[mid_start..mid_start + k] {
        *v *= f;
    }
}

/// Prediktor-scores klemmes alltid til [0, 100].
pub fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}
