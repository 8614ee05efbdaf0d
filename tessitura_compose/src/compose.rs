// Composition driver: turn a GenerateConfig into a populated Timeline.
//
// The default track carries the whole piece: tempo, tonic and scale over
// every beat, a chord drawn from the chord pool every `chord_change_beats`
// beats, and the default rhythm and pitch sequence. Each configured voice
// becomes a registered track that only stores what it changes; anything it
// leaves out is inherited from the default track at resolution time.
//
// Rhythms are resolved once per track at beat 0, so every rhythm builder is
// asked to cover the full piece unless its spec sets `beats` explicitly.

use crate::chord_pool::ChordPool;
use crate::config::{BuilderSpec, GenerateConfig};
use crate::describer::Describer;
use crate::error::ComposeError;
use rand::RngCore;
use std::collections::BTreeMap;
use std::sync::Arc;
use tessitura_timeline::{DEFAULT_TRACK, Note, Rhythm, Scale, Timeline, TimelineError, Tonic};

/// Lay out a complete piece from `config`.
pub fn compose(
    config: &GenerateConfig,
    describer: &Describer,
    rng: &mut dyn RngCore,
) -> Result<Timeline, ComposeError> {
    config.validate()?;
    let num_beats = config.num_beats;
    let mut timeline = Timeline::new(num_beats);

    timeline.add(Arc::new(config.tempo), DEFAULT_TRACK, 0, num_beats)?;
    timeline.add(Arc::new(Tonic::new(config.tonic_pitch)), DEFAULT_TRACK, 0, num_beats)?;
    timeline.add(Arc::new(Scale::from_mode(config.mode)), DEFAULT_TRACK, 0, num_beats)?;

    let pool = describer
        .chord_pool_builder(&config.chord_pool.type_name, &config.chord_pool.params)?
        .build();
    let chord_count = add_chords(&mut timeline, &pool, config, rng)?;

    let rhythm = build_rhythm(describer, &config.rhythm, num_beats, rng)?;
    timeline.add(rhythm, DEFAULT_TRACK, 0, num_beats)?;
    let pitches = describer
        .pitch_sequence_builder(&config.pitches.type_name, &config.pitches.params)?
        .build(rng);
    timeline.add(Arc::new(pitches), DEFAULT_TRACK, 0, num_beats)?;

    for voice in &config.voices {
        if timeline.has_track(&voice.name) {
            return Err(ComposeError::invalid(
                "voices",
                format!("{:?} is already a track", voice.name),
            ));
        }
        timeline.add_track(&voice.name);
        if voice.transpose != 0 {
            let tonic = Tonic::new(config.tonic_pitch)
                .transposed(voice.transpose)
                .ok_or_else(|| ComposeError::invalid("transpose", "overflows the tonic"))?;
            timeline.add(Arc::new(tonic), &voice.name, 0, num_beats)?;
        }
        if let Some(spec) = &voice.rhythm {
            let rhythm = build_rhythm(describer, spec, num_beats, rng)?;
            timeline.add(rhythm, &voice.name, 0, num_beats)?;
        }
        if let Some(spec) = &voice.pitches {
            let pitches = describer
                .pitch_sequence_builder(&spec.type_name, &spec.params)?
                .build(rng);
            timeline.add(Arc::new(pitches), &voice.name, 0, num_beats)?;
        }
    }

    log::info!(
        "composed {num_beats} beats in {:?}: {chord_count} chords, {} voices",
        config.mode,
        timeline.tracks().len()
    );
    Ok(timeline)
}

/// Notes for every track of `timeline`, keyed by track name.
pub fn render(timeline: &Timeline) -> Result<BTreeMap<String, Vec<Note>>, TimelineError> {
    timeline.render()
}

fn add_chords(
    timeline: &mut Timeline,
    pool: &ChordPool,
    config: &GenerateConfig,
    rng: &mut dyn RngCore,
) -> Result<usize, ComposeError> {
    let mut count = 0;
    let mut begin = 0;
    while begin < config.num_beats {
        let end = begin.saturating_add(config.chord_change_beats).min(config.num_beats);
        let chord = pool.choose(rng).ok_or_else(|| ComposeError::EmptyChordPool {
            type_name: config.chord_pool.type_name.clone(),
        })?;
        timeline.add(chord, DEFAULT_TRACK, begin, end)?;
        count += 1;
        begin = end;
    }
    Ok(count)
}

fn build_rhythm(
    describer: &Describer,
    spec: &BuilderSpec,
    num_beats: u32,
    rng: &mut dyn RngCore,
) -> Result<Arc<Rhythm>, ComposeError> {
    let params = spec.params.clone().with_default("beats", num_beats as f64);
    let rhythm = describer.rhythm_builder(&spec.type_name, &params)?.build(rng);
    Ok(Arc::new(rhythm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VoiceConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tessitura_timeline::{Chord, Mode, Tempo};

    fn small_config() -> GenerateConfig {
        GenerateConfig {
            num_beats: 8,
            tempo: Tempo::constant(120.0),
            tonic_pitch: 60,
            mode: Mode::Ionian,
            seed: Some(5),
            chord_change_beats: 3,
            rhythm: BuilderSpec::new("SteadyRhythmBuilder"),
            pitches: BuilderSpec::new("BlockChordBuilder").with("voices", 1.0),
            voices: Vec::new(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_track_is_fully_populated() {
        let describer = Describer::with_builtin();
        let mut rng = StdRng::seed_from_u64(5);
        let timeline = compose(&small_config(), &describer, &mut rng).unwrap();

        assert_eq!(timeline.num_beats(), 8);
        assert!(timeline.tracks().is_empty());
        // Chords change at 0, 3 and 6; the last one is cut short at the end.
        assert_eq!(timeline.layer(DEFAULT_TRACK).unwrap().track::<Chord>().len(), 3);
        assert_eq!(timeline.length(DEFAULT_TRACK).unwrap(), 4.0);

        // One root note per beat, each on a chord root from the diatonic pool.
        let notes = timeline.notes(DEFAULT_TRACK).unwrap();
        assert_eq!(notes.len(), 8);
        let c_major = [0, 2, 4, 5, 7, 9, 11];
        for (i, note) in notes.iter().enumerate() {
            assert_eq!(note.time, i as f64 * 0.5);
            assert!(c_major.contains(&(note.key - 60)));
        }
    }

    #[test]
    fn test_voices_inherit_and_override() {
        let describer = Describer::with_builtin();
        let config = GenerateConfig {
            voices: vec![
                VoiceConfig {
                    name: "bass".to_string(),
                    transpose: -24,
                    rhythm: None,
                    pitches: None,
                },
                VoiceConfig {
                    name: "pad".to_string(),
                    transpose: 0,
                    rhythm: Some(BuilderSpec::new("SteadyRhythmBuilder").with("beats", 2.0)),
                    pitches: Some(BuilderSpec::new("BlockChordBuilder")),
                },
            ],
            ..small_config()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let timeline = compose(&config, &describer, &mut rng).unwrap();
        let rendered = render(&timeline).unwrap();

        let melody = &rendered[DEFAULT_TRACK];
        let bass = &rendered["bass"];
        assert_eq!(bass.len(), melody.len());
        for (low, high) in bass.iter().zip(melody) {
            assert_eq!(low.key, high.key - 24);
            assert_eq!(low.time, high.time);
        }

        // Two beats of three-note chords.
        assert_eq!(rendered["pad"].len(), 6);
        assert!(timeline.layer("pad").unwrap().track::<Tonic>().is_empty());
    }

    #[test]
    fn test_same_seed_same_piece() {
        let describer = Describer::with_builtin();
        let config = GenerateConfig::default();
        let first = compose(&config, &describer, &mut StdRng::seed_from_u64(99)).unwrap();
        let second = compose(&config, &describer, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(render(&first).unwrap(), render(&second).unwrap());
    }

    #[test]
    fn test_unknown_builder_fails() {
        let describer = Describer::with_builtin();
        let config = GenerateConfig {
            rhythm: BuilderSpec::new("NoSuchRhythm"),
            ..small_config()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            compose(&config, &describer, &mut rng),
            Err(ComposeError::UnknownBuilder { .. })
        ));
    }

    #[test]
    fn test_hostile_values_fail_without_panicking() {
        let describer = Describer::with_builtin();
        let configs = [
            GenerateConfig {
                pitches: BuilderSpec::new("ChordToneWalkBuilder").with("span", 3e9),
                ..small_config()
            },
            GenerateConfig {
                rhythm: BuilderSpec::new("SteadyRhythmBuilder")
                    .with("beats", 1e5)
                    .with("subdivision", 1e5),
                ..small_config()
            },
            GenerateConfig {
                voices: vec![VoiceConfig {
                    name: "up".to_string(),
                    transpose: i32::MAX,
                    rhythm: None,
                    pitches: None,
                }],
                ..small_config()
            },
        ];
        for config in &configs {
            let mut rng = StdRng::seed_from_u64(0);
            assert!(matches!(
                compose(config, &describer, &mut rng),
                Err(ComposeError::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_default_named_voice_is_rejected() {
        let describer = Describer::with_builtin();
        let config = GenerateConfig {
            voices: vec![VoiceConfig {
                name: DEFAULT_TRACK.to_string(),
                transpose: 12,
                rhythm: None,
                pitches: None,
            }],
            ..small_config()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(compose(&config, &describer, &mut rng).is_err());
    }

    #[test]
    fn test_empty_chord_pool_fails() {
        use crate::chord_pool::ChordPoolBuilder;
        use crate::describer::{Builder, CHORD_POOL_BUILDER};

        #[derive(Debug)]
        struct Silence;
        impl ChordPoolBuilder for Silence {
            fn build(&self) -> ChordPool {
                ChordPool::new()
            }
        }

        let mut describer = Describer::with_builtin();
        describer.register_builder(CHORD_POOL_BUILDER, "Silence", "Silence", &[], |_| {
            Ok(Builder::ChordPool(Box::new(Silence)))
        });
        let config = GenerateConfig {
            chord_pool: BuilderSpec::new("Silence"),
            ..small_config()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            compose(&config, &describer, &mut rng),
            Err(ComposeError::EmptyChordPool { .. })
        ));
    }
}
