// Tessitura Timeline
//
// The resolution engine at the heart of the tessitura generator. A Timeline
// stores musical attributes (tempo, tonic, scale, chord, pitch sequence,
// rhythm) against half-open beat ranges on named tracks, with an implicit
// "default" track that every other track falls back to. Asking the Timeline
// for a track's notes walks the active rhythm and resolves the attributes in
// force at each rhythmic event into absolute-time notes.
//
// Architecture:
// - track.rs: Bucket (object + beat range) and Track<T> (insertion-ordered
//   buckets, first match wins on overlap)
// - timeline.rs: Timeline storage, two-level fallback, note synthesis and
//   duration queries
// - tempo.rs: Tempo laws mapping beats to seconds
// - tonic.rs: Tonal center pitch
// - scale.rs: Modes and scale-degree to semitone mapping
// - chord.rs: Chords as sets of scale degrees
// - pitch.rs: Pitch, Unison and PitchSequence, resolved against scale + chord
// - rhythm.rs: Rhythmic events with rational offsets and durations
// - note.rs: The emitted Note value
// - error.rs: TimelineError
//
// Everything here is synchronous and allocation-light. Attribute objects are
// held behind Arc so one object can be shared by several buckets or tracks.

pub mod chord;
pub mod error;
pub mod note;
pub mod pitch;
pub mod rhythm;
pub mod scale;
pub mod tempo;
pub mod timeline;
pub mod tonic;
pub mod track;

pub use chord::Chord;
pub use error::{AttributeKind, TimelineError};
pub use note::Note;
pub use pitch::{Pitch, PitchSequence, Unison};
pub use rhythm::{Rhythm, RhythmicNote};
pub use scale::{Mode, Scale};
pub use tempo::Tempo;
pub use timeline::{Attribute, DEFAULT_TRACK, Layer, Timeline};
pub use tonic::Tonic;
pub use track::{Bucket, Track};
