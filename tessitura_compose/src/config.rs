// Generator configuration.
//
// Everything the composer needs to lay out a piece: length, tempo, key,
// which builders to use for harmony, rhythm and melody, and the extra voices
// layered over the default track. Every field has a default, so a config
// file only needs to name what it changes. The CLI loads a JSON file with
// `--config` and then applies its own flags on top.

use crate::describer::BuilderParams;
use crate::error::ComposeError;
use crate::rhythm_builders::MAX_BEATS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tessitura_timeline::{DEFAULT_TRACK, Mode, Tempo};

/// Playable MIDI pitches.
const KEY_RANGE: std::ops::RangeInclusive<i32> = 0..=127;

/// A builder chosen by registered type name, with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderSpec {
    pub type_name: String,
    #[serde(default)]
    pub params: BuilderParams,
}

impl BuilderSpec {
    pub fn new(type_name: &str) -> Self {
        BuilderSpec {
            type_name: type_name.to_string(),
            params: BuilderParams::new(),
        }
    }

    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.params = self.params.with(name, value);
        self
    }
}

/// A named track layered over the default track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceConfig {
    pub name: String,
    /// Semitones relative to the piece's tonic. Zero keeps the default tonic.
    #[serde(default)]
    pub transpose: i32,
    /// Falls back to the default track's rhythm when absent.
    #[serde(default)]
    pub rhythm: Option<BuilderSpec>,
    /// Falls back to the default track's pitch sequence when absent.
    #[serde(default)]
    pub pitches: Option<BuilderSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Length of the piece in beats.
    pub num_beats: u32,
    pub tempo: Tempo,
    /// MIDI pitch of the tonic.
    pub tonic_pitch: i32,
    pub mode: Mode,
    /// Fixed seed for reproducible output; random when absent.
    pub seed: Option<u64>,
    pub chord_pool: BuilderSpec,
    /// Beats between chord changes.
    pub chord_change_beats: u32,
    pub rhythm: BuilderSpec,
    pub pitches: BuilderSpec,
    pub voices: Vec<VoiceConfig>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        GenerateConfig {
            num_beats: 32,
            tempo: Tempo::constant(96.0),
            tonic_pitch: 62, // D4
            mode: Mode::Dorian,
            seed: None,
            chord_pool: BuilderSpec::new("DiatonicTriadChordPoolBuilder"),
            chord_change_beats: 4,
            rhythm: BuilderSpec::new("RandomRhythmBuilder").with("rest_chance", 0.1),
            pitches: BuilderSpec::new("ChordToneWalkBuilder").with("length", 16.0),
            voices: vec![
                VoiceConfig {
                    name: "bass".to_string(),
                    transpose: -24,
                    rhythm: Some(BuilderSpec::new("SteadyRhythmBuilder").with("subdivision", 1.0)),
                    pitches: Some(BuilderSpec::new("BlockChordBuilder").with("voices", 1.0)),
                },
                VoiceConfig {
                    name: "pad".to_string(),
                    transpose: -12,
                    rhythm: None,
                    pitches: Some(BuilderSpec::new("BlockChordBuilder").with("voices", 3.0)),
                },
            ],
        }
    }
}

impl GenerateConfig {
    pub fn load(path: &Path) -> Result<Self, ComposeError> {
        let data = std::fs::read_to_string(path)?;
        let config: GenerateConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ComposeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings that cannot produce a timeline.
    pub fn validate(&self) -> Result<(), ComposeError> {
        if !(1..=MAX_BEATS).contains(&self.num_beats) {
            return Err(ComposeError::invalid(
                "num_beats",
                format!("must be from 1 to {MAX_BEATS}, got {}", self.num_beats),
            ));
        }
        if self.chord_change_beats == 0 {
            return Err(ComposeError::invalid("chord_change_beats", "must be at least 1"));
        }
        if !KEY_RANGE.contains(&self.tonic_pitch) {
            return Err(ComposeError::invalid(
                "tonic_pitch",
                format!("must be a MIDI pitch, got {}", self.tonic_pitch),
            ));
        }
        let bpm_ok = match self.tempo {
            Tempo::Constant { bpm } => bpm > 0.0,
            Tempo::Ramp { start_bpm, end_bpm, .. } => start_bpm > 0.0 && end_bpm > 0.0,
        };
        if !bpm_ok {
            return Err(ComposeError::invalid("tempo", "bpm must be positive"));
        }

        let mut names = BTreeSet::new();
        for voice in &self.voices {
            if voice.name == DEFAULT_TRACK {
                return Err(ComposeError::invalid(
                    "voices",
                    format!("{DEFAULT_TRACK:?} is reserved for the shared track"),
                ));
            }
            if !names.insert(voice.name.as_str()) {
                return Err(ComposeError::invalid(
                    "voices",
                    format!("{:?} is named more than once", voice.name),
                ));
            }
            let pitch = self.tonic_pitch.checked_add(voice.transpose);
            if !pitch.is_some_and(|pitch| KEY_RANGE.contains(&pitch)) {
                return Err(ComposeError::invalid(
                    "transpose",
                    format!(
                        "voice {:?} moves the tonic outside the MIDI range by {}",
                        voice.name, voice.transpose
                    ),
                ));
            }
        }
        Ok(())
    }
}
