// Chords expressed as scale degrees.
//
// A chord does not know which scale it lives in: `[0, 2, 4]` is the tonic
// triad of whatever scale is active when it is resolved. Chord tone indices
// beyond the chord size continue into the next octave of the scale.

use crate::scale::Scale;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    pub degrees: Vec<i32>,
}

impl Chord {
    pub fn new(degrees: Vec<i32>) -> Self {
        Chord { degrees }
    }

    /// Stacked thirds on `root`: root, third and fifth.
    pub fn triad(root: i32) -> Self {
        Chord::new(vec![root, root.saturating_add(2), root.saturating_add(4)])
    }

    /// Scale degree of chord tone `index`, or None for an empty chord.
    ///
    /// Index `len` is the root one scale-octave higher, index -1 the top
    /// chord tone one scale-octave lower.
    pub fn tone_degree(&self, index: i32, scale: &Scale) -> Option<i64> {
        if self.degrees.is_empty() {
            return None;
        }
        let len = self.degrees.len() as i64;
        let index = i64::from(index);
        let octave = index.div_euclid(len);
        let degree = i64::from(self.degrees[index.rem_euclid(len) as usize]);
        Some(degree.saturating_add(octave.saturating_mul(scale.len() as i64)))
    }
}
