// Rhythms: ordered lists of rhythmic events.
//
// Each event starts at a whole beat plus a rational sub-beat offset and
// lasts a rational number of beats. Offsets and lengths are kept as integer
// numerator/denominator pairs so rhythms can be written exactly (triplets,
// dotted values) and only turn into floating point when a tempo is applied.

use crate::error::TimelineError;
use serde::{Deserialize, Serialize};

/// One event in a rhythm, positioned relative to the rhythm's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhythmicNote {
    /// Whole beats from the rhythm's origin.
    pub start_beat: u32,
    /// Sub-beat offset numerator.
    pub start_value: u32,
    /// Sub-beat offset denominator.
    pub start_subdivision: u32,
    /// Duration numerator, in beats.
    pub value: u32,
    /// Duration denominator.
    pub subdivision: u32,
}

impl RhythmicNote {
    /// An event on `start_beat` lasting `value / subdivision` beats.
    pub fn on_beat(start_beat: u32, value: u32, subdivision: u32) -> Self {
        RhythmicNote {
            start_beat,
            start_value: 0,
            start_subdivision: 1,
            value,
            subdivision,
        }
    }

    /// The same event pushed `start_value / start_subdivision` past its beat.
    pub fn offset_by(self, start_value: u32, start_subdivision: u32) -> Self {
        RhythmicNote {
            start_value,
            start_subdivision,
            ..self
        }
    }

    /// Sub-beat offset as a fraction of a beat.
    pub fn start_offset(&self, event: usize) -> Result<f64, TimelineError> {
        ratio(self.start_value, self.start_subdivision, event)
    }

    /// Duration in beats.
    pub fn length(&self, event: usize) -> Result<f64, TimelineError> {
        ratio(self.value, self.subdivision, event)
    }

    /// Start position in beats from the rhythm's origin.
    pub fn start(&self, event: usize) -> Result<f64, TimelineError> {
        Ok(self.start_beat as f64 + self.start_offset(event)?)
    }
}

fn ratio(numerator: u32, denominator: u32, event: usize) -> Result<f64, TimelineError> {
    if denominator == 0 {
        return Err(TimelineError::ZeroSubdivision { event });
    }
    Ok(numerator as f64 / denominator as f64)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rhythm {
    pub notes: Vec<RhythmicNote>,
}

impl Rhythm {
    pub fn new(notes: Vec<RhythmicNote>) -> Self {
        Rhythm { notes }
    }

    pub fn notes(&self) -> &[RhythmicNote] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Beats from the origin to the end of the last-ending event.
    pub fn span_beats(&self) -> Result<f64, TimelineError> {
        let mut span: f64 = 0.0;
        for (event, note) in self.notes.iter().enumerate() {
            span = span.max(note.start(event)? + note.length(event)?);
        }
        Ok(span)
    }
}
