// core/src/error.rs
use thiserror::Error;

/// Feiltyper for lagring og referansebygging. Alt som kan hoppes over
/// per segment/video (nullsegmenter, ingen reps) er IKKE feil – de ender
/// som warnings på videoresultatet i stedet.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("io-feil: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv-feil: {0}")]
    Csv(#[from] csv::Error),

    #[error("ugyldig rad {row}: {reason}")]
    BadRow { row: usize, reason: String },

    #[error("referansekurven mangler data for {group} posisjon {position}")]
    IncompleteReference { group: &'static str, position: usize },

    #[error("ingen rader med kategori '{0}' å bygge referanse fra")]
    NoIdealRows(String),

    #[error("referansekurven må ha {expected} punkter per kanal, fant {got}")]
    BadReferenceLength { expected: usize, got: usize },
}
