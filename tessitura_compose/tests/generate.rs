// End-to-end: config file on disk, through the describer and composer, to
// rendered notes.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tessitura_compose::{Describer, GenerateConfig, compose, render};
use tessitura_timeline::{DEFAULT_TRACK, Mode};

const CONFIG: &str = r#"{
    "num_beats": 12,
    "tempo": {"Constant": {"bpm": 60.0}},
    "tonic_pitch": 57,
    "mode": "Aeolian",
    "chord_pool": {"type_name": "RandomTriadChordPoolBuilder"},
    "chord_change_beats": 4,
    "rhythm": {"type_name": "SteadyRhythmBuilder", "params": {"subdivision": 2}},
    "pitches": {"type_name": "ChordToneWalkBuilder", "params": {"length": 8, "span": 3}},
    "voices": [
        {"name": "drone", "transpose": -12,
         "rhythm": {"type_name": "SteadyRhythmBuilder", "params": {"beats": 1}},
         "pitches": {"type_name": "BlockChordBuilder", "params": {"voices": 1}}},
        {"name": "echo"}
    ]
}"#;

fn load() -> GenerateConfig {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("piece.json");
    std::fs::write(&path, CONFIG).unwrap();
    GenerateConfig::load(&path).unwrap()
}

#[test]
fn config_file_drives_every_track() {
    let config = load();
    assert_eq!(config.mode, Mode::Aeolian);

    let describer = Describer::with_builtin();
    let timeline = compose(&config, &describer, &mut StdRng::seed_from_u64(2024)).unwrap();
    let rendered = render(&timeline).unwrap();

    let names: Vec<&str> = rendered.keys().map(String::as_str).collect();
    assert_eq!(names, vec![DEFAULT_TRACK, "drone", "echo"]);

    // Two events per beat at 60 BPM.
    let melody = &rendered[DEFAULT_TRACK];
    assert_eq!(melody.len(), 24);
    assert_eq!(melody[3].time, 1.5);
    assert!(melody.iter().all(|note| note.duration == 0.5));

    // A voice with no settings of its own is an exact copy of the default.
    assert_eq!(&rendered["echo"], melody);

    // One beat of chord roots, an octave below the tonic's register.
    let drone = &rendered["drone"];
    assert_eq!(drone.len(), 1);
    assert_eq!(drone[0].time, 0.0);
    assert_eq!(drone[0].duration, 1.0);

    assert_eq!(timeline.length(DEFAULT_TRACK).unwrap(), 12.0);
}

#[test]
fn seeds_are_reproducible_from_the_config() {
    let config = GenerateConfig {
        seed: Some(8),
        ..load()
    };
    let describer = Describer::with_builtin();
    let piece = |seed: u64| {
        let timeline = compose(&config, &describer, &mut StdRng::seed_from_u64(seed)).unwrap();
        render(&timeline).unwrap()
    };
    assert_eq!(piece(8), piece(8));
}

#[test]
fn every_builtin_builder_is_described() {
    let describer = Describer::with_builtin();
    let total: usize = describer
        .categories()
        .into_iter()
        .map(|category| describer.describe(category).count())
        .sum();
    assert_eq!(total, 6);
}
