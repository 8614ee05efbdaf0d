// The playable note emitted by timeline resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Velocity given to every synthesized note.
pub const DEFAULT_VELOCITY: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Absolute pitch as a MIDI note number.
    pub key: i32,
    /// Start in seconds.
    pub time: f64,
    /// Length in seconds.
    pub duration: f64,
    pub velocity: u8,
}

impl Note {
    pub fn new(key: i32, time: f64, duration: f64) -> Self {
        Note {
            key,
            time,
            duration,
            velocity: DEFAULT_VELOCITY,
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {:.3}s for {:.3}s (vel {})",
            pitch_name(self.key),
            self.time,
            self.duration,
            self.velocity
        )
    }
}

/// Compact note name for a MIDI pitch (e.g. "C4", "F#3").
pub fn pitch_name(pitch: i32) -> String {
    const NAMES: [&str; 12] = [
        "C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
    ];
    let octave = pitch.div_euclid(12) - 1;
    format!("{}{}", NAMES[pitch.rem_euclid(12) as usize], octave)
}
