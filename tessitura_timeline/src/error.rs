// Errors surfaced by timeline storage and note synthesis.
//
// Every variant is a caller precondition that was not met: the timeline
// never retries or patches around a failure, it reports which track, beat
// or rhythmic event was at fault and leaves recovery to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six attribute kinds a Timeline stores per track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    Tempo,
    Tonic,
    Scale,
    Chord,
    PitchSequence,
    Rhythm,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeKind::Tempo => "tempo",
            AttributeKind::Tonic => "tonic",
            AttributeKind::Scale => "scale",
            AttributeKind::Chord => "chord",
            AttributeKind::PitchSequence => "pitch sequence",
            AttributeKind::Rhythm => "rhythm",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    #[error("track {track:?} was never added to the timeline")]
    UnknownTrack { track: String },
    #[error("no {kind} covers beat {beat} on track {track:?} or on the default track")]
    MissingAttribute {
        kind: AttributeKind,
        track: String,
        beat: u32,
    },
    #[error("no {kind} exists on track {track:?} or on the default track")]
    MissingRepresentative { kind: AttributeKind, track: String },
    #[error("rhythmic event {event} has a zero subdivision")]
    ZeroSubdivision { event: usize },
    #[error("rhythmic event {event} on track {track:?} resolves to pitch {pitch}, outside the key range")]
    PitchOutOfRange {
        track: String,
        event: usize,
        pitch: i64,
    },
    #[error("beat range [{begin}, {end}) is empty")]
    EmptyRange { begin: u32, end: u32 },
}
