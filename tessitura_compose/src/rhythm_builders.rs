// Rhythm builders.
//
// SteadyRhythmBuilder lays down an even pulse. RandomRhythmBuilder fills a
// span with note values drawn from a small palette (eighth, quarter, dotted
// quarter, half) measured in half-beats, turning some of them into rests.
// Rests are gaps: no event is emitted for them.

use crate::describer::{Builder, Describer, RHYTHM_BUILDER};
use crate::error::ComposeError;
use rand::{Rng, RngCore};
use std::fmt;
use tessitura_timeline::{Rhythm, RhythmicNote};

/// Longest rhythm, in beats, the registered builders accept.
pub const MAX_BEATS: u32 = 1 << 16;

/// Finest pulse the steady builder accepts, in events per beat.
pub const MAX_SUBDIVISION: u32 = 64;

pub trait RhythmBuilder: fmt::Debug {
    fn build(&self, rng: &mut dyn RngCore) -> Rhythm;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteadyRhythmBuilder {
    pub beats: u32,
    /// Events per beat.
    pub subdivision: u32,
}

impl Default for SteadyRhythmBuilder {
    fn default() -> Self {
        SteadyRhythmBuilder {
            beats: 16,
            subdivision: 1,
        }
    }
}

impl SteadyRhythmBuilder {
    pub fn register_with(describer: &mut Describer) {
        describer.register_builder(
            RHYTHM_BUILDER,
            "SteadyRhythmBuilder",
            "Steady Pulse",
            &["beats", "subdivision"],
            |params| {
                let defaults = SteadyRhythmBuilder::default();
                let subdivision =
                    params.count("subdivision", defaults.subdivision, MAX_SUBDIVISION)?;
                if subdivision == 0 {
                    return Err(ComposeError::invalid("subdivision", "must be at least 1"));
                }
                Ok(Builder::Rhythm(Box::new(SteadyRhythmBuilder {
                    beats: params.count("beats", defaults.beats, MAX_BEATS)?,
                    subdivision,
                })))
            },
        );
    }
}

impl RhythmBuilder for SteadyRhythmBuilder {
    fn build(&self, _rng: &mut dyn RngCore) -> Rhythm {
        let subdivision = self.subdivision.max(1);
        let notes = (0..self.beats.saturating_mul(subdivision))
            .map(|step| {
                RhythmicNote::on_beat(step / subdivision, 1, subdivision)
                    .offset_by(step % subdivision, subdivision)
            })
            .collect();
        Rhythm::new(notes)
    }
}

/// Note values available to RandomRhythmBuilder, in half-beats.
const PALETTE_HALF_BEATS: [u32; 4] = [1, 2, 3, 4];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomRhythmBuilder {
    pub beats: u32,
    /// Chance that a drawn value becomes a rest.
    pub rest_chance: f64,
}

impl Default for RandomRhythmBuilder {
    fn default() -> Self {
        RandomRhythmBuilder {
            beats: 16,
            rest_chance: 0.1,
        }
    }
}

impl RandomRhythmBuilder {
    pub fn register_with(describer: &mut Describer) {
        describer.register_builder(
            RHYTHM_BUILDER,
            "RandomRhythmBuilder",
            "Random Durations",
            &["beats", "rest_chance"],
            |params| {
                let defaults = RandomRhythmBuilder::default();
                Ok(Builder::Rhythm(Box::new(RandomRhythmBuilder {
                    beats: params.count("beats", defaults.beats, MAX_BEATS)?,
                    rest_chance: params.probability("rest_chance", defaults.rest_chance)?,
                })))
            },
        );
    }
}

impl RhythmBuilder for RandomRhythmBuilder {
    fn build(&self, rng: &mut dyn RngCore) -> Rhythm {
        let total = self.beats.saturating_mul(2);
        let mut position = 0;
        let mut notes = Vec::new();

        while position < total {
            let remaining = total - position;
            let fitting: Vec<u32> = PALETTE_HALF_BEATS
                .iter()
                .copied()
                .filter(|&value| value <= remaining)
                .collect();
            let value = fitting[rng.random_range(0..fitting.len())];

            if !rng.random_bool(self.rest_chance) {
                notes.push(
                    RhythmicNote::on_beat(position / 2, value, 2).offset_by(position % 2, 2),
                );
            }
            position += value;
        }

        Rhythm::new(notes)
    }
}
