// Chord pools: the harmonic vocabulary a composition draws its chords from.
//
// A pool is a flat list of chords; the composer picks from it at random every
// few beats. Pools are produced by ChordPoolBuilders registered with the
// describer.

use crate::describer::{Builder, CHORD_POOL_BUILDER, Describer};
use rand::{Rng, RngCore};
use std::fmt;
use std::sync::Arc;
use tessitura_timeline::Chord;

#[derive(Debug, Clone, Default)]
pub struct ChordPool {
    chords: Vec<Arc<Chord>>,
}

impl ChordPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_chord(&mut self, chord: Arc<Chord>) {
        self.chords.push(chord);
    }

    pub fn chords(&self) -> &[Arc<Chord>] {
        &self.chords
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// A uniformly chosen chord, shared with the pool.
    pub fn choose(&self, rng: &mut dyn RngCore) -> Option<Arc<Chord>> {
        if self.chords.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.chords.len());
        Some(Arc::clone(&self.chords[index]))
    }
}

pub trait ChordPoolBuilder: fmt::Debug {
    fn build(&self) -> ChordPool;
}

fn triads(roots: std::ops::Range<i32>) -> ChordPool {
    let mut pool = ChordPool::new();
    for root in roots {
        pool.add_chord(Arc::new(Chord::triad(root)));
    }
    pool
}

/// Triads on every scale degree across three octaves, from a low root a
/// scale-octave below the tonic up to two above it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTriadChordPoolBuilder;

impl RandomTriadChordPoolBuilder {
    pub fn register_with(describer: &mut Describer) {
        describer.register_builder(
            CHORD_POOL_BUILDER,
            "RandomTriadChordPoolBuilder",
            "Random Triads",
            &[],
            |_| Ok(Builder::ChordPool(Box::new(RandomTriadChordPoolBuilder))),
        );
    }
}

impl ChordPoolBuilder for RandomTriadChordPoolBuilder {
    fn build(&self) -> ChordPool {
        triads(-7..14)
    }
}

/// The seven diatonic triads within a single octave.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiatonicTriadChordPoolBuilder;

impl DiatonicTriadChordPoolBuilder {
    pub fn register_with(describer: &mut Describer) {
        describer.register_builder(
            CHORD_POOL_BUILDER,
            "DiatonicTriadChordPoolBuilder",
            "Diatonic Triads",
            &[],
            |_| Ok(Builder::ChordPool(Box::new(DiatonicTriadChordPoolBuilder))),
        );
    }
}

impl ChordPoolBuilder for DiatonicTriadChordPoolBuilder {
    fn build(&self) -> ChordPool {
        triads(0..7)
    }
}
