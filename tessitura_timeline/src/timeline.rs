// Timeline: layered attribute storage and note synthesis.
//
// The timeline holds one Layer per track name. A Layer is six Tracks, one
// per attribute type (tempo, tonic, scale, chord, pitch sequence, rhythm).
// The "default" layer exists from construction; custom tracks are added by
// name and only ever grow.
//
// Every lookup is two-level: the requested track is asked first and, if it
// has nothing covering the beat, the default track answers instead. That
// fallback lives in `resolve` and is shared by all six attribute types.
//
// Note synthesis (`notes`) walks the rhythm active at beat 0 once. For each
// rhythmic event it resolves pitch sequence, scale, chord, tempo and tonic at
// the event's beat, converts position and length through the tempo, and
// emits one note per offset the current unison resolves to. The unison
// cursor advances once per event, not once per emitted note.

use crate::chord::Chord;
use crate::error::{AttributeKind, TimelineError};
use crate::note::Note;
use crate::pitch::PitchSequence;
use crate::rhythm::Rhythm;
use crate::scale::Scale;
use crate::tempo::Tempo;
use crate::tonic::Tonic;
use crate::track::{Bucket, Track};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// Name of the implicit fallback track.
pub const DEFAULT_TRACK: &str = "default";

/// The six attribute tracks belonging to one track name.
#[derive(Debug, Default)]
pub struct Layer {
    tempos: Track<Tempo>,
    tonics: Track<Tonic>,
    scales: Track<Scale>,
    chords: Track<Chord>,
    pitch_sequences: Track<PitchSequence>,
    rhythms: Track<Rhythm>,
}

impl Layer {
    pub fn track<A: Attribute>(&self) -> &Track<A> {
        A::track(self)
    }
}

/// A musical attribute type the timeline can store.
///
/// Implemented for exactly the six attribute types; it picks the matching
/// Track out of a Layer so storage and lookup can be written once.
pub trait Attribute: Sized {
    const KIND: AttributeKind;

    fn track(layer: &Layer) -> &Track<Self>;

    fn track_mut(layer: &mut Layer) -> &mut Track<Self>;
}

macro_rules! attribute {
    ($ty:ty, $field:ident, $kind:expr) => {
        impl Attribute for $ty {
            const KIND: AttributeKind = $kind;

            fn track(layer: &Layer) -> &Track<Self> {
                &layer.$field
            }

            fn track_mut(layer: &mut Layer) -> &mut Track<Self> {
                &mut layer.$field
            }
        }
    };
}

attribute!(Tempo, tempos, AttributeKind::Tempo);
attribute!(Tonic, tonics, AttributeKind::Tonic);
attribute!(Scale, scales, AttributeKind::Scale);
attribute!(Chord, chords, AttributeKind::Chord);
attribute!(PitchSequence, pitch_sequences, AttributeKind::PitchSequence);
attribute!(Rhythm, rhythms, AttributeKind::Rhythm);

/// Layered, beat-ranged store of musical attributes.
#[derive(Debug)]
pub struct Timeline {
    num_beats: u32,
    /// Registered custom track names. Never contains the default track.
    tracks: BTreeSet<String>,
    default: Layer,
    layers: HashMap<String, Layer>,
}

impl Timeline {
    /// An empty timeline `num_beats` long with only the default track.
    pub fn new(num_beats: u32) -> Self {
        Timeline {
            num_beats,
            tracks: BTreeSet::new(),
            default: Layer::default(),
            layers: HashMap::new(),
        }
    }

    pub fn num_beats(&self) -> u32 {
        self.num_beats
    }

    /// Register a custom track with six empty attribute tracks.
    ///
    /// The default name and names already registered are ignored. Returns
    /// whether a new track was created.
    pub fn add_track(&mut self, name: &str) -> bool {
        if name == DEFAULT_TRACK || self.tracks.contains(name) {
            return false;
        }
        self.tracks.insert(name.to_string());
        self.layers.insert(name.to_string(), Layer::default());
        true
    }

    /// Registered custom track names, excluding the default track.
    pub fn tracks(&self) -> &BTreeSet<String> {
        &self.tracks
    }

    /// True for the default track and every registered track.
    pub fn has_track(&self, name: &str) -> bool {
        name == DEFAULT_TRACK || self.layers.contains_key(name)
    }

    pub fn layer(&self, track: &str) -> Result<&Layer, TimelineError> {
        if track == DEFAULT_TRACK {
            return Ok(&self.default);
        }
        self.layers
            .get(track)
            .ok_or_else(|| TimelineError::UnknownTrack {
                track: track.to_string(),
            })
    }

    fn layer_mut(&mut self, track: &str) -> Result<&mut Layer, TimelineError> {
        if track == DEFAULT_TRACK {
            return Ok(&mut self.default);
        }
        self.layers
            .get_mut(track)
            .ok_or_else(|| TimelineError::UnknownTrack {
                track: track.to_string(),
            })
    }

    /// Make `object` active on `track` over the beats `[begin, end)`.
    ///
    /// The track must be the default track or one registered with
    /// `add_track`. Overlapping earlier buckets keep precedence.
    pub fn add<A: Attribute>(
        &mut self,
        object: Arc<A>,
        track: &str,
        begin: u32,
        end: u32,
    ) -> Result<(), TimelineError> {
        if begin >= end {
            return Err(TimelineError::EmptyRange { begin, end });
        }
        let layer = self.layer_mut(track)?;
        A::track_mut(layer).add(Bucket::new(object, begin, end));
        Ok(())
    }

    /// The attribute active at `beat` on `track`, else on the default track.
    pub fn resolve<A: Attribute>(&self, track: &str, beat: u32) -> Result<&A, TimelineError> {
        A::track(self.layer(track)?)
            .object_at(beat)
            .or_else(|| {
                if track != DEFAULT_TRACK {
                    log::trace!("{} on track {track} falls back to default at beat {beat}", A::KIND);
                }
                A::track(&self.default).object_at(beat)
            })
            .map(|object| object.as_ref())
            .ok_or_else(|| TimelineError::MissingAttribute {
                kind: A::KIND,
                track: track.to_string(),
                beat,
            })
    }

    /// The first attribute ever added to `track`, else to the default track.
    pub fn representative<A: Attribute>(&self, track: &str) -> Result<&A, TimelineError> {
        A::track(self.layer(track)?)
            .first_object()
            .or_else(|| A::track(&self.default).first_object())
            .map(|object| object.as_ref())
            .ok_or_else(|| TimelineError::MissingRepresentative {
                kind: A::KIND,
                track: track.to_string(),
            })
    }

    /// Playback length of the whole piece in seconds for `track`.
    ///
    /// Uses the track's representative tempo, so tempo changes later in the
    /// piece do not affect the result.
    pub fn length(&self, track: &str) -> Result<f64, TimelineError> {
        let tempo: &Tempo = self.representative(track)?;
        Ok(tempo.apply_tempo(self.num_beats as f64))
    }

    /// Synthesize the notes of `track`, in emission order.
    pub fn notes(&self, track: &str) -> Result<Vec<Note>, TimelineError> {
        // One rhythm pass per call: every lookup is relative to beat 0.
        let origin: u32 = 0;
        let rhythm: &Rhythm = self.resolve(track, origin)?;

        let mut notes = Vec::new();
        // The event index doubles as the unison cursor, so an event that
        // resolves to no notes still consumes its unison.
        for (cursor, event) in rhythm.notes().iter().enumerate() {
            let beat = origin.saturating_add(event.start_beat);

            let pitches: &PitchSequence = self.resolve(track, beat)?;
            let scale: &Scale = self.resolve(track, beat)?;
            let chord: &Chord = self.resolve(track, beat)?;
            let tempo: &Tempo = self.resolve(track, beat)?;
            let tonic: &Tonic = self.resolve(track, beat)?;

            let start = tempo.apply_tempo(beat as f64 + event.start_offset(cursor)?);
            let length = tempo.apply_tempo(event.length(cursor)?);

            for offset in pitches.unison(cursor).resolve(scale, chord) {
                let pitch = i64::from(tonic.center_pitch()).saturating_add(offset);
                let key = i32::try_from(pitch).map_err(|_| TimelineError::PitchOutOfRange {
                    track: track.to_string(),
                    event: cursor,
                    pitch,
                })?;
                let note = Note::new(key, start, length);
                log::debug!(
                    "adding note on track {track} {} {} {} {}",
                    note.key,
                    note.time,
                    note.duration,
                    note.velocity
                );
                notes.push(note);
            }
        }

        Ok(notes)
    }

    /// Notes for the default track and every registered track, by name.
    pub fn render(&self) -> Result<BTreeMap<String, Vec<Note>>, TimelineError> {
        let mut rendered = BTreeMap::new();
        rendered.insert(DEFAULT_TRACK.to_string(), self.notes(DEFAULT_TRACK)?);
        for track in &self.tracks {
            rendered.insert(track.clone(), self.notes(track)?);
        }
        Ok(rendered)
    }
}
