// Tessitura Compose
//
// Builds timelines for the tessitura engine from a declarative config. The
// config names builders by type; the describer maps those names to
// constructors, and the composer runs them and lays their output onto a
// Timeline's default track and voice tracks.
//
// Module overview:
// - describer.rs: Registration table of builders by category and type name
// - chord_pool.rs: ChordPool and the chord pool builders
// - rhythm_builders.rs: Steady and random rhythm builders
// - pitch_builders.rs: Chord-tone melodies and block chords
// - config.rs: GenerateConfig, loaded from JSON
// - compose.rs: Config to Timeline, and rendering to notes
// - error.rs: ComposeError
//
// The `generate` binary (main.rs) wires these together behind a small CLI.

pub mod chord_pool;
pub mod compose;
pub mod config;
pub mod describer;
pub mod error;
pub mod pitch_builders;
pub mod rhythm_builders;

pub use chord_pool::{ChordPool, ChordPoolBuilder};
pub use compose::{compose, render};
pub use config::{BuilderSpec, GenerateConfig, VoiceConfig};
pub use describer::{Builder, BuilderEntry, BuilderParams, Describer};
pub use error::ComposeError;
pub use pitch_builders::PitchSequenceBuilder;
pub use rhythm_builders::RhythmBuilder;
