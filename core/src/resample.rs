// core/src/resample.rs

/// Kanonisk segmentlengde for trening/feature-bruk.
pub const CANONICAL_LEN: usize = 62;

/// Resampler en sekvens til nøyaktig `target_len` punkter.
///
/// Nedsampling (`len > target_len`) plukker jevnt fordelte indekser over
/// `[0, len-1]` med floor; oppsampling (`len <= target_len`) avrunder og
/// tillater med vilje indeks-repetisjon i stedet for interpolasjon.
/// Deterministisk for samme input. Samme funksjon brukes begge veier:
/// segment → kanonisk lengde, og referanse → vilkårlig segmentlengde.
pub fn resample(values: &[f64], target_len: usize) -> Vec<f64> {
    if values.is_empty() || target_len == 0 {
        return Vec::new();
    }
    let n = values.len();
    if target_len == 1 {
        return vec![values[0]];
    }

    let step = (n - 1) as f64 / (target_len - 1) as f64;
    let mut out = Vec::with_capacity(target_len);

    if n > target_len {
        for i in 0..target_len {
            let idx = (step * i as f64) as usize; // floor
            out.push(values[idx.min(n - 1)]);
        }
    } else {
        for i in 0..target_len {
            let idx = (step * i as f64).round() as usize;
            out.push(values[idx.min(n - 1)]);
        }
    }

    out
}
