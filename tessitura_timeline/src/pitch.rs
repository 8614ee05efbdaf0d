// Pitch sequences and the unisons they are made of.
//
// A PitchSequence is an ordered list of Unisons. Each Unison is the group of
// pitches that sound together at one rhythmic slot: one pitch for a melody
// note, several for a doubling or a spread chord, none for a rest. Pitches
// are relative (chord tones, scale degrees or raw semitones) and only become
// semitone offsets once resolved against the scale and chord in force.

use crate::chord::Chord;
use crate::scale::Scale;
use serde::{Deserialize, Serialize};

/// A single relative pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pitch {
    /// Index into the active chord's tones, wrapping by scale octaves.
    ChordTone(i32),
    /// A degree of the active scale.
    ScaleDegree(i32),
    /// Semitones above the tonic, ignoring scale and chord.
    Chromatic(i32),
}

impl Pitch {
    /// Semitone offset from the tonic, or None when a chord tone is asked
    /// of an empty chord.
    pub fn resolve(&self, scale: &Scale, chord: &Chord) -> Option<i64> {
        match *self {
            Pitch::ChordTone(index) => chord
                .tone_degree(index, scale)
                .map(|degree| scale.degree_offset(degree)),
            Pitch::ScaleDegree(degree) => Some(scale.degree_offset(i64::from(degree))),
            Pitch::Chromatic(semitones) => Some(i64::from(semitones)),
        }
    }
}

/// Pitches sounding together in one rhythmic slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unison {
    pub pitches: Vec<Pitch>,
}

/// Shared empty unison handed out by empty pitch sequences.
static REST: Unison = Unison { pitches: Vec::new() };

impl Unison {
    pub fn new(pitches: Vec<Pitch>) -> Self {
        Unison { pitches }
    }

    pub fn rest() -> Self {
        Unison::default()
    }

    pub fn single(pitch: Pitch) -> Self {
        Unison::new(vec![pitch])
    }

    pub fn is_rest(&self) -> bool {
        self.pitches.is_empty()
    }

    /// Semitone offsets for every pitch that resolves, in order.
    pub fn resolve(&self, scale: &Scale, chord: &Chord) -> Vec<i64> {
        self.pitches
            .iter()
            .filter_map(|pitch| pitch.resolve(scale, chord))
            .collect()
    }
}

/// Ordered unisons consumed one per rhythmic event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchSequence {
    pub unisons: Vec<Unison>,
}

impl PitchSequence {
    pub fn new(unisons: Vec<Unison>) -> Self {
        PitchSequence { unisons }
    }

    /// A melody of single pitches.
    pub fn melody(pitches: impl IntoIterator<Item = Pitch>) -> Self {
        PitchSequence::new(pitches.into_iter().map(Unison::single).collect())
    }

    pub fn len(&self) -> usize {
        self.unisons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unisons.is_empty()
    }

    /// The unison at `index`, cycling when the rhythm outlasts the sequence.
    /// An empty sequence always answers with a rest.
    pub fn unison(&self, index: usize) -> &Unison {
        if self.unisons.is_empty() {
            return &REST;
        }
        &self.unisons[index % self.unisons.len()]
    }
}
