// Scales and the modes they are usually built from.
//
// A Scale is the list of semitone offsets that make up one octave span,
// measured from the tonic. Scale degrees are plain integers: degree 0 is the
// tonic, degree `len` is the tonic an octave up, and negative degrees walk
// down below it. Chords and pitches are written in degrees so the same
// material can be reharmonized by swapping the scale underneath it.

use serde::{Deserialize, Serialize};

/// Named interval patterns, each measured from the tonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// C D E F G A B (major)
    Ionian,
    /// Natural minor with raised 6th
    Dorian,
    /// Natural minor with lowered 2nd
    Phrygian,
    /// Major with raised 4th
    Lydian,
    /// Major with lowered 7th
    Mixolydian,
    /// Natural minor
    Aeolian,
    /// Diminished 5th above the tonic; rarely a home key
    Locrian,
    /// Natural minor with raised 7th
    HarmonicMinor,
    /// Five-note major pentatonic
    MajorPentatonic,
}

impl Mode {
    pub const ALL: [Mode; 9] = [
        Mode::Ionian,
        Mode::Dorian,
        Mode::Phrygian,
        Mode::Lydian,
        Mode::Mixolydian,
        Mode::Aeolian,
        Mode::Locrian,
        Mode::HarmonicMinor,
        Mode::MajorPentatonic,
    ];

    /// Semitone offsets from the tonic for each degree within one octave.
    pub fn intervals(self) -> &'static [i32] {
        match self {
            Mode::Ionian => &[0, 2, 4, 5, 7, 9, 11],
            Mode::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Mode::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            Mode::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            Mode::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            Mode::Aeolian => &[0, 2, 3, 5, 7, 8, 10],
            Mode::Locrian => &[0, 1, 3, 5, 6, 8, 10],
            Mode::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            Mode::MajorPentatonic => &[0, 2, 4, 7, 9],
        }
    }

    /// Parse a lowercase mode name as accepted on the command line.
    pub fn from_name(name: &str) -> Option<Mode> {
        let mode = match name.to_lowercase().as_str() {
            "ionian" | "major" => Mode::Ionian,
            "dorian" => Mode::Dorian,
            "phrygian" => Mode::Phrygian,
            "lydian" => Mode::Lydian,
            "mixolydian" => Mode::Mixolydian,
            "aeolian" | "minor" => Mode::Aeolian,
            "locrian" => Mode::Locrian,
            "harmonic-minor" | "harmonic_minor" => Mode::HarmonicMinor,
            "pentatonic" | "major-pentatonic" => Mode::MajorPentatonic,
            _ => return None,
        };
        Some(mode)
    }
}

/// Semitones spanned by one octave.
const OCTAVE: i64 = 12;

/// One octave's worth of semitone steps, repeated every twelve semitones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    steps: Vec<i32>,
}

impl Scale {
    /// A scale from explicit semitone offsets. `steps` should be non-empty,
    /// ascending and start at 0; an empty list is treated as the lone tonic.
    pub fn new(steps: Vec<i32>) -> Self {
        let steps = if steps.is_empty() { vec![0] } else { steps };
        Scale { steps }
    }

    pub fn from_mode(mode: Mode) -> Self {
        Scale::new(mode.intervals().to_vec())
    }

    /// Number of degrees per octave.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Semitone offset from the tonic of any scale degree.
    ///
    /// Degrees beyond the scale wrap into the next octave; negative degrees
    /// wrap downward, so degree -1 is the leading tone below the tonic.
    /// Offsets saturate instead of overflowing.
    pub fn degree_offset(&self, degree: i64) -> i64 {
        // A deserialized scale may bypass `new`; treat no steps as tonic-only.
        if self.steps.is_empty() {
            return degree.saturating_mul(OCTAVE);
        }
        let len = self.steps.len() as i64;
        let octave = degree.div_euclid(len);
        let index = degree.rem_euclid(len) as usize;
        i64::from(self.steps[index]).saturating_add(octave.saturating_mul(OCTAVE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_degrees() {
        let scale = Scale::from_mode(Mode::Ionian);
        assert_eq!(scale.degree_offset(0), 0);
        assert_eq!(scale.degree_offset(2), 4); // E
        assert_eq!(scale.degree_offset(4), 7); // G
        assert_eq!(scale.degree_offset(7), 12); // C an octave up
        assert_eq!(scale.degree_offset(9), 16); // E an octave up
    }

    #[test]
    fn test_negative_degrees_wrap_down() {
        let scale = Scale::from_mode(Mode::Ionian);
        assert_eq!(scale.degree_offset(-1), -1); // B below
        assert_eq!(scale.degree_offset(-7), -12);
        assert_eq!(scale.degree_offset(-3), -5); // G below
    }

    #[test]
    fn test_dorian_matches_church_mode() {
        // D Dorian: D E F G A B C
        let scale = Scale::from_mode(Mode::Dorian);
        let offsets: Vec<i64> = (0..7).map(|d| scale.degree_offset(d)).collect();
        assert_eq!(offsets, vec![0, 2, 3, 5, 7, 9, 10]);
    }

    #[test]
    fn test_pentatonic_wraps_after_five() {
        let scale = Scale::from_mode(Mode::MajorPentatonic);
        assert_eq!(scale.len(), 5);
        assert_eq!(scale.degree_offset(5), 12);
        assert_eq!(scale.degree_offset(-1), -3);
    }

    #[test]
    fn test_extreme_degrees_saturate() {
        let scale = Scale::from_mode(Mode::Ionian);
        assert_eq!(scale.degree_offset(i64::MAX), i64::MAX);
        assert!(scale.degree_offset(i64::MIN) < i64::from(i32::MIN));
        // 306_783_378 octaves up, then the second degree.
        assert_eq!(scale.degree_offset(i64::from(i32::MAX)), 3_681_400_538);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(Mode::from_name("Dorian"), Some(Mode::Dorian));
        assert_eq!(Mode::from_name("minor"), Some(Mode::Aeolian));
        assert_eq!(Mode::from_name("bebop"), None);
    }
}
