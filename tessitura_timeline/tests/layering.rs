// End-to-end layering through the public timeline API: a shared default
// harmony with two voices that override different attributes.

use std::sync::Arc;
use tessitura_timeline::{
    Chord, DEFAULT_TRACK, Mode, Note, Pitch, PitchSequence, Rhythm, RhythmicNote, Scale, Tempo,
    Timeline, TimelineError, Tonic, Unison,
};

fn quarter_notes(count: u32) -> Rhythm {
    Rhythm::new((0..count).map(|beat| RhythmicNote::on_beat(beat, 1, 1)).collect())
}

/// Eight beats in D Dorian at 60 BPM: i for four beats, then IV.
fn dorian_timeline() -> Timeline {
    let mut timeline = Timeline::new(8);
    timeline.add(Arc::new(Tempo::identity()), DEFAULT_TRACK, 0, 8).unwrap();
    timeline.add(Arc::new(Tonic::new(62)), DEFAULT_TRACK, 0, 8).unwrap();
    timeline.add(Arc::new(Scale::from_mode(Mode::Dorian)), DEFAULT_TRACK, 0, 8).unwrap();
    timeline.add(Arc::new(Chord::triad(0)), DEFAULT_TRACK, 0, 4).unwrap();
    timeline.add(Arc::new(Chord::triad(3)), DEFAULT_TRACK, 4, 8).unwrap();
    timeline
        .add(Arc::new(PitchSequence::melody([Pitch::ChordTone(0)])), DEFAULT_TRACK, 0, 8)
        .unwrap();
    timeline.add(Arc::new(quarter_notes(8)), DEFAULT_TRACK, 0, 8).unwrap();
    timeline
}

#[test]
fn default_track_follows_the_chords() {
    let timeline = dorian_timeline();
    let keys: Vec<i32> = timeline.notes(DEFAULT_TRACK).unwrap().iter().map(|n| n.key).collect();
    // D for the i chord, G for the IV chord.
    assert_eq!(keys, vec![62, 62, 62, 62, 67, 67, 67, 67]);
}

#[test]
fn voices_override_only_what_they_set() {
    let mut timeline = dorian_timeline();
    timeline.add_track("bass");
    timeline.add_track("upper");

    timeline.add(Arc::new(Tonic::new(50)), "bass", 0, 8).unwrap();
    timeline.add(Arc::new(quarter_notes(2)), "bass", 0, 8).unwrap();

    let spread = Unison::new(vec![Pitch::ChordTone(1), Pitch::ChordTone(2)]);
    timeline
        .add(Arc::new(PitchSequence::new(vec![spread])), "upper", 0, 8)
        .unwrap();

    let bass = timeline.notes("bass").unwrap();
    assert_eq!(bass, vec![Note::new(50, 0.0, 1.0), Note::new(50, 1.0, 1.0)]);

    let upper = timeline.notes("upper").unwrap();
    assert_eq!(upper.len(), 16);
    // F and A over the i chord, B and D over IV.
    assert_eq!(upper[0].key, 62 + 3);
    assert_eq!(upper[1].key, 62 + 7);
    assert_eq!(upper[8].key, 62 + 9);
    assert_eq!(upper[9].key, 62 + 12);

    assert_eq!(timeline.tracks().iter().cloned().collect::<Vec<_>>(), vec!["bass", "upper"]);
}

#[test]
fn shared_objects_are_not_copied() {
    let mut timeline = dorian_timeline();
    let tonic = Arc::new(Tonic::new(57));
    for name in ["alto", "tenor"] {
        timeline.add_track(name);
        timeline.add(Arc::clone(&tonic), name, 0, 8).unwrap();
    }
    let alto: &Tonic = timeline.resolve("alto", 0).unwrap();
    let tenor: &Tonic = timeline.resolve("tenor", 0).unwrap();
    assert!(std::ptr::eq(alto, tenor));
    assert_eq!(Arc::strong_count(&tonic), 3);
}

#[test]
fn unknown_tracks_are_rejected_everywhere() {
    let mut timeline = dorian_timeline();
    let err = timeline
        .add(Arc::new(Tempo::constant(90.0)), "never-added", 0, 8)
        .unwrap_err();
    assert_eq!(err, TimelineError::UnknownTrack { track: "never-added".to_string() });
    assert!(timeline.notes("never-added").is_err());
    assert!(timeline.length("never-added").is_err());
}

#[test]
fn length_scales_with_tempo() {
    let mut timeline = Timeline::new(16);
    timeline.add(Arc::new(Tempo::identity()), DEFAULT_TRACK, 0, 16).unwrap();
    assert_eq!(timeline.length(DEFAULT_TRACK).unwrap(), 16.0);

    timeline.add_track("double");
    timeline.add(Arc::new(Tempo::constant(120.0)), "double", 0, 16).unwrap();
    assert_eq!(timeline.length("double").unwrap(), 8.0);
}
