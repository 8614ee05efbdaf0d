// Pitch sequence builders.
//
// Both builders write pitches as chord tones, so the resulting sequence
// follows whatever harmony the timeline puts underneath it.

use crate::describer::{Builder, Describer, PITCH_SEQUENCE_BUILDER};
use crate::error::ComposeError;
use rand::{Rng, RngCore};
use std::fmt;
use tessitura_timeline::{Pitch, PitchSequence, Unison};

/// Longest sequence the registered builders accept.
pub const MAX_LENGTH: u32 = 1 << 16;

/// Widest chord-tone walk the registered builder accepts.
pub const MAX_SPAN: u32 = 64;

/// Most tones a block chord may stack.
pub const MAX_VOICES: u32 = 16;

pub trait PitchSequenceBuilder: fmt::Debug {
    fn build(&self, rng: &mut dyn RngCore) -> PitchSequence;
}

/// A melody that steps up or down by at most one chord tone at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordToneWalkBuilder {
    pub length: u32,
    /// Furthest chord-tone index reachable on either side of the root.
    pub span: u32,
}

impl Default for ChordToneWalkBuilder {
    fn default() -> Self {
        ChordToneWalkBuilder { length: 16, span: 4 }
    }
}

impl ChordToneWalkBuilder {
    pub fn register_with(describer: &mut Describer) {
        describer.register_builder(
            PITCH_SEQUENCE_BUILDER,
            "ChordToneWalkBuilder",
            "Chord Tone Walk",
            &["length", "span"],
            |params| {
                let defaults = ChordToneWalkBuilder::default();
                Ok(Builder::PitchSequence(Box::new(ChordToneWalkBuilder {
                    length: params.count("length", defaults.length, MAX_LENGTH)?,
                    span: params.count("span", defaults.span, MAX_SPAN)?,
                })))
            },
        );
    }
}

impl PitchSequenceBuilder for ChordToneWalkBuilder {
    fn build(&self, rng: &mut dyn RngCore) -> PitchSequence {
        let span = i32::try_from(self.span).unwrap_or(i32::MAX);
        let mut tone: i32 = 0;
        let mut pitches = Vec::new();
        for _ in 0..self.length {
            pitches.push(Pitch::ChordTone(tone));
            tone = tone.saturating_add(rng.random_range(-1..=1)).clamp(-span, span);
        }
        PitchSequence::melody(pitches)
    }
}

/// Every slot sounds the lowest `voices` tones of the current chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockChordBuilder {
    pub length: u32,
    pub voices: u32,
}

impl Default for BlockChordBuilder {
    fn default() -> Self {
        BlockChordBuilder { length: 1, voices: 3 }
    }
}

impl BlockChordBuilder {
    pub fn register_with(describer: &mut Describer) {
        describer.register_builder(
            PITCH_SEQUENCE_BUILDER,
            "BlockChordBuilder",
            "Block Chords",
            &["length", "voices"],
            |params| {
                let defaults = BlockChordBuilder::default();
                let length = params.count("length", defaults.length, MAX_LENGTH)?;
                if length == 0 {
                    return Err(ComposeError::invalid("length", "must be at least 1"));
                }
                Ok(Builder::PitchSequence(Box::new(BlockChordBuilder {
                    length,
                    voices: params.count("voices", defaults.voices, MAX_VOICES)?,
                })))
            },
        );
    }
}

impl PitchSequenceBuilder for BlockChordBuilder {
    fn build(&self, _rng: &mut dyn RngCore) -> PitchSequence {
        let voices = i32::try_from(self.voices).unwrap_or(i32::MAX);
        let block = Unison::new((0..voices).map(Pitch::ChordTone).collect());
        PitchSequence::new(vec![block; self.length as usize])
    }
}
