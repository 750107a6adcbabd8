// core/src/metrics.rs
use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

fn counter(name: &str, help: &str) -> IntCounter {
    let c = IntCounter::new(name, help).expect("gyldig metric-navn");
    REGISTRY
        .register(Box::new(c.clone()))
        .expect("metric registrert én gang");
    c
}

/// Antall videoer kjørt gjennom offline-analysen.
pub static VIDEOS_ANALYZED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    counter(
        "formgraph_videos_analyzed_total",
        "Antall videoer analysert",
    )
});

/// Antall segmenter scoret (batch + trigger).
pub static SEGMENTS_SCORED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    counter(
        "formgraph_segments_scored_total",
        "Antall segmenter scoret",
    )
});

/// Antall segmenter droppet av cleaneren (helt nullstilte vinkler).
pub static SEGMENTS_DROPPED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    counter(
        "formgraph_segments_dropped_total",
        "Antall segmenter droppet under rensing",
    )
});

/// Prometheus text-format for alle registrerte metrics.
pub fn gather_text() -> String {
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    if encoder.encode(&REGISTRY.gather(), &mut buf).is_err() {
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}
