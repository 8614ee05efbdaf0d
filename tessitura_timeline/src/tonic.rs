// The tonal center that resolved scale offsets are added to.

use serde::{Deserialize, Serialize};

/// Reference pitch of a key, as a MIDI note number (C4 = 60).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tonic {
    pub center_pitch: i32,
}

impl Tonic {
    pub fn new(center_pitch: i32) -> Self {
        Tonic { center_pitch }
    }

    pub fn center_pitch(&self) -> i32 {
        self.center_pitch
    }

    /// The same tonic moved by `semitones`, or None on overflow.
    pub fn transposed(&self, semitones: i32) -> Option<Self> {
        self.center_pitch.checked_add(semitones).map(Tonic::new)
    }
}
