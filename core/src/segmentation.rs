// core/src/segmentation.rs
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{Segment, INVALID_LABEL};

/// Terskler for segmentering. Defaultverdiene (120/80, avstand 20,
/// prominens 10, hale 25–100, bakoversøk 20) er heuristikker fra
/// kildedataene, ikke utledet – de ligger her for domene-review, ikke
/// fordi de generaliserer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Nedre vinkelterskel (grader) – bunnen av en ekte repetisjon.
    pub low_angle: f64,
    /// Øvre vinkelterskel (grader) – toppen av en ekte repetisjon.
    pub high_angle: f64,
    /// Minste avstand mellom topper (rammer).
    pub min_distance: usize,
    /// Minste prominens for en topp (grader).
    pub min_prominence: f64,
    /// Minste lengde for halesegmentet (rammer).
    pub tail_min_frames: usize,
    /// Største lengde for halesegmentet før det trunkeres.
    pub tail_max_frames: usize,
    /// Hvor langt bakover fra slutten trunkeringen leter etter en ramme
    /// over `high_angle`.
    pub tail_backsearch: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            low_angle: 80.0,
            high_angle: 120.0,
            min_distance: 20,
            min_prominence: 10.0,
            tail_min_frames: 25,
            tail_max_frames: 100,
            tail_backsearch: 20,
        }
    }
}

/// Resultatet av segmenteringen for én video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segmentation {
    /// Ordnede, ikke-overlappende segmenter. Tom liste = ingen reps
    /// funnet, som er et gyldig video-utfall og ikke en feil.
    pub segments: Vec<Segment>,
    /// Første forankrede topp. None når ingen anker ble funnet.
    pub first_peak: Option<usize>,
    /// Siste gyldige ramme for trigger-løypa.
    pub last_peak: usize,
}

impl Segmentation {
    /// Tidligste segment som inneholder rammen. Delte toppunkt-rammer
    /// tilhører dermed det tidligere segmentet.
    pub fn segment_for_frame(&self, frame: usize) -> Option<&Segment> {
        self.segments.iter().find(|s| s.contains(frame))
    }

    pub fn frame_label(&self, frame: usize) -> &str {
        self.segment_for_frame(frame)
            .map(|s| s.label.as_str())
            .unwrap_or(INVALID_LABEL)
    }

    pub fn frame_total(&self, frame: usize) -> usize {
        self.segment_for_frame(frame)
            .map(|s| s.total_frames)
            .unwrap_or(0)
    }
}

/// Klassisk peak-picking: lokale maksima (platåer gir midtpunktet),
/// deretter avstandsfilter (høyeste topp vinner) og prominensfilter.
pub fn find_peaks(xs: &[f64], min_distance: usize, min_prominence: f64) -> Vec<usize> {
    let n = xs.len();
    if n < 3 {
        return Vec::new();
    }

    // 1) lokale maksima
    let mut candidates = Vec::new();
    let mut i = 1;
    while i < n - 1 {
        if xs[i] > xs[i - 1] {
            let start = i;
            let mut end = i;
            while end + 1 < n && xs[end + 1] == xs[i] {
                end += 1;
            }
            if end + 1 < n && xs[end + 1] < xs[i] {
                candidates.push((start + end) / 2);
            }
            i = end + 1;
        } else {
            i += 1;
        }
    }

    // 2) avstandsfilter: gå gjennom toppene etter høyde og fjern lavere
    // topper nærmere enn min_distance
    let mut keep = vec![true; candidates.len()];
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| {
        xs[candidates[b]]
            .partial_cmp(&xs[candidates[a]])
            .unwrap_or(Ordering::Equal)
    });
    for &k in &order {
        if !keep[k] {
            continue;
        }
        let p = candidates[k];
        let mut l = k;
        while l > 0 {
            l -= 1;
            if p - candidates[l] < min_distance {
                keep[l] = false;
            } else {
                break;
            }
        }
        let mut r = k + 1;
        while r < candidates.len() {
            if candidates[r] - p < min_distance {
                keep[r] = false;
                r += 1;
            } else {
                break;
            }
        }
    }

    // 3) prominens relativt til omkringliggende minima
    candidates
        .into_iter()
        .enumerate()
        .filter(|&(k, _)| keep[k])
        .map(|(_, p)| p)
        .filter(|&p| prominence(xs, p) >= min_prominence)
        .collect()
}

/// Prominens = høyde minus den høyeste av basene på hver side, der en
/// base er minimum fram til første verdi som overstiger toppen.
fn prominence(xs: &[f64], peak: usize) -> f64 {
    let h = xs[peak];

    let mut left_min = h;
    for k in (0..peak).rev() {
        if xs[k] > h {
            break;
        }
        if xs[k] < left_min {
            left_min = xs[k];
        }
    }

    let mut right_min = h;
    for x in &xs[peak + 1..] {
        if *x > h {
            break;
        }
        if *x < right_min {
            right_min = *x;
        }
    }

    h - left_min.max(right_min)
}

/// Segmenterer group1-vinkelserien for én video til repetisjonsintervaller.
pub fn segment_video(angles: &[f64], fps: f64, cfg: &SegmenterConfig) -> Segmentation {
    let n = angles.len();
    if n == 0 {
        return Segmentation {
            segments: Vec::new(),
            first_peak: None,
            last_peak: 0,
        };
    }

    let mut peaks = find_peaks(angles, cfg.min_distance, cfg.min_prominence);

    // syntetisk topp i ramme 0 når videoen starter i topposisjon
    if angles[0] > cfg.high_angle {
        peaks.insert(0, 0);
    }

    // anker: første toppepar der området mellom dem faktisk går over
    // high og under low – filtrerer falske topper før bevegelsen starter
    let mut anchored: &[usize] = &[];
    for i in 0..peaks.len().saturating_sub(1) {
        let span = &angles[peaks[i]..=peaks[i + 1]];
        let max = span.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = span.iter().cloned().fold(f64::INFINITY, f64::min);
        if max > cfg.high_angle && min < cfg.low_angle {
            anchored = &peaks[i..];
            break;
        }
    }

    if anchored.is_empty() {
        return Segmentation {
            segments: Vec::new(),
            first_peak: None,
            last_peak: n - 1,
        };
    }

    let mut segments = Vec::new();
    for pair in anchored.windows(2) {
        segments.push(make_segment(pair[0], pair[1], fps));
    }

    // halesegmentet: fra siste topp til siste ramme
    let tail_start = anchored[anchored.len() - 1];
    let tail_end = n - 1;
    let tail_len = tail_end - tail_start + 1;
    let mut last_peak = tail_start;

    if (cfg.tail_min_frames..=cfg.tail_max_frames).contains(&tail_len) {
        segments.push(make_segment(tail_start, tail_end, fps));
        last_peak = tail_end;
    } else if tail_len > cfg.tail_max_frames {
        // let bakover etter siste ramme over high_angle og trunker der
        let search_floor = tail_end.saturating_sub(cfg.tail_backsearch).max(tail_start);
        for i in (search_floor..=tail_end).rev() {
            if angles[i] > cfg.high_angle {
                segments.push(make_segment(tail_start, i, fps));
                last_peak = i;
                break;
            }
        }
    }
    // tail_len < tail_min_frames: halen forkastes

    Segmentation {
        segments,
        first_peak: Some(anchored[0]),
        last_peak,
    }
}

fn make_segment(start: usize, end: usize, fps: f64) -> Segment {
    Segment {
        label: format_range(start, end, fps),
        start_frame: start,
        end_frame: end,
        total_frames: end - start + 1,
    }
}

/// Tidsintervall-etikett på formen "0:00:01.500000-0:00:03.200000".
/// Etiketten er join-nøkkelen på tvers av alle tabellene, så formatet
/// ligger fast.
pub fn format_range(start_frame: usize, end_frame: usize, fps: f64) -> String {
    format!(
        "{}-{}",
        format_timestamp(start_frame as f64 / fps),
        format_timestamp(end_frame as f64 / fps)
    )
}

fn format_timestamp(seconds: f64) -> String {
    let total_us = (seconds * 1_000_000.0).round() as u64;
    let us = total_us % 1_000_000;
    let total_s = total_us / 1_000_000;
    let (h, m, s) = (total_s / 3600, (total_s / 60) % 60, total_s % 60);
    if us == 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}:{:02}.{:06}", h, m, s, us)
    }
}
