// Tempo laws: mappings from beat positions to seconds.
//
// The timeline treats a tempo as a monotonic function from the beat domain
// to the time domain and never looks inside it. Two laws are provided: a
// constant BPM and a linear BPM ramp that settles on its end value.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Tempo {
    /// Fixed beats per minute. 60 BPM maps beats to seconds one-to-one.
    Constant { bpm: f64 },
    /// BPM moves linearly from `start_bpm` to `end_bpm` over the first
    /// `beats` beats, then holds `end_bpm`.
    Ramp {
        start_bpm: f64,
        end_bpm: f64,
        beats: f64,
    },
}

impl Tempo {
    pub fn constant(bpm: f64) -> Self {
        Tempo::Constant { bpm }
    }

    /// Identity mapping: one beat lasts one second.
    pub fn identity() -> Self {
        Tempo::Constant { bpm: 60.0 }
    }

    /// Seconds elapsed from beat 0 to `beats`.
    ///
    /// Also used for durations: applying the tempo to a length measured in
    /// beats gives the length in seconds as if it started at beat 0.
    pub fn apply_tempo(&self, beats: f64) -> f64 {
        match *self {
            Tempo::Constant { bpm } => beats * 60.0 / bpm,
            Tempo::Ramp {
                start_bpm,
                end_bpm,
                beats: ramp_beats,
            } => {
                if beats <= 0.0 || ramp_beats <= 0.0 {
                    let bpm = if ramp_beats <= 0.0 { end_bpm } else { start_bpm };
                    return beats * 60.0 / bpm;
                }
                let inside = beats.min(ramp_beats);
                let ramp_seconds = ramp_time(start_bpm, end_bpm, ramp_beats, inside);
                let after = (beats - ramp_beats).max(0.0);
                ramp_seconds + after * 60.0 / end_bpm
            }
        }
    }
}

/// Integral of 60 / bpm(b) for b in [0, x] with bpm linear over [0, span].
fn ramp_time(start_bpm: f64, end_bpm: f64, span: f64, x: f64) -> f64 {
    let slope = (end_bpm - start_bpm) / span;
    if slope.abs() < f64::EPSILON {
        return x * 60.0 / start_bpm;
    }
    let bpm_x = start_bpm + slope * x;
    60.0 / slope * (bpm_x / start_bpm).ln()
}
