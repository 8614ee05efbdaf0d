// The describer: a registration table of every available builder.
//
// Builders register under a category ("ChordPoolBuilder", "RhythmBuilder",
// "PitchSequenceBuilder"), a type name, a display label and the list of
// parameter names they understand, together with a constructor that turns
// a parameter map into a ready builder. The table is filled explicitly at
// startup by `Describer::with_builtin`; there is no global state.
//
// Config files and the CLI refer to builders by type name only, and the
// describer is the single place that maps those names to code.

use crate::chord_pool::{ChordPoolBuilder, DiatonicTriadChordPoolBuilder, RandomTriadChordPoolBuilder};
use crate::error::ComposeError;
use crate::pitch_builders::{BlockChordBuilder, ChordToneWalkBuilder, PitchSequenceBuilder};
use crate::rhythm_builders::{RandomRhythmBuilder, RhythmBuilder, SteadyRhythmBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const CHORD_POOL_BUILDER: &str = "ChordPoolBuilder";
pub const RHYTHM_BUILDER: &str = "RhythmBuilder";
pub const PITCH_SEQUENCE_BUILDER: &str = "PitchSequenceBuilder";

/// Numeric builder parameters by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuilderParams(BTreeMap<String, f64>);

impl BuilderParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.0.insert(name.to_string(), value);
        self
    }

    /// Set `name` only if it is not already present.
    pub fn with_default(mut self, name: &str, value: f64) -> Self {
        self.0.entry(name.to_string()).or_insert(value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// A whole number in `0..=max`, or `default` when absent.
    pub fn count(&self, name: &str, default: u32, max: u32) -> Result<u32, ComposeError> {
        match self.get(name) {
            None => Ok(default),
            Some(value) if value >= 0.0 && value.fract() == 0.0 && value <= max as f64 => {
                Ok(value as u32)
            }
            Some(value) => Err(ComposeError::invalid(
                name,
                format!("must be a whole number from 0 to {max}, got {value}"),
            )),
        }
    }

    /// A probability in [0, 1], or `default` when absent.
    pub fn probability(&self, name: &str, default: f64) -> Result<f64, ComposeError> {
        match self.get(name) {
            None => Ok(default),
            Some(value) if (0.0..=1.0).contains(&value) => Ok(value),
            Some(value) => Err(ComposeError::invalid(
                name,
                format!("must be between 0 and 1, got {value}"),
            )),
        }
    }
}

/// A constructed builder of any category.
#[derive(Debug)]
pub enum Builder {
    ChordPool(Box<dyn ChordPoolBuilder>),
    Rhythm(Box<dyn RhythmBuilder>),
    PitchSequence(Box<dyn PitchSequenceBuilder>),
}

impl Builder {
    pub fn category(&self) -> &'static str {
        match self {
            Builder::ChordPool(_) => CHORD_POOL_BUILDER,
            Builder::Rhythm(_) => RHYTHM_BUILDER,
            Builder::PitchSequence(_) => PITCH_SEQUENCE_BUILDER,
        }
    }
}

pub type Constructor = fn(&BuilderParams) -> Result<Builder, ComposeError>;

/// One registered builder.
#[derive(Clone)]
pub struct BuilderEntry {
    pub category: &'static str,
    pub type_name: &'static str,
    pub label: &'static str,
    pub params: &'static [&'static str],
    constructor: Constructor,
}

impl fmt::Debug for BuilderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderEntry")
            .field("category", &self.category)
            .field("type_name", &self.type_name)
            .field("label", &self.label)
            .field("params", &self.params)
            .finish()
    }
}

/// Registered builders by category, then by type name.
#[derive(Debug, Default)]
pub struct Describer {
    entries: BTreeMap<&'static str, BTreeMap<&'static str, BuilderEntry>>,
}

impl Describer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A describer with every builder shipped in this crate.
    pub fn with_builtin() -> Self {
        let mut describer = Describer::new();
        RandomTriadChordPoolBuilder::register_with(&mut describer);
        DiatonicTriadChordPoolBuilder::register_with(&mut describer);
        SteadyRhythmBuilder::register_with(&mut describer);
        RandomRhythmBuilder::register_with(&mut describer);
        ChordToneWalkBuilder::register_with(&mut describer);
        BlockChordBuilder::register_with(&mut describer);
        describer
    }

    /// Add a builder to the table. A later registration under the same
    /// category and type name replaces the earlier one.
    pub fn register_builder(
        &mut self,
        category: &'static str,
        type_name: &'static str,
        label: &'static str,
        params: &'static [&'static str],
        constructor: Constructor,
    ) {
        let entry = BuilderEntry {
            category,
            type_name,
            label,
            params,
            constructor,
        };
        let replaced = self
            .entries
            .entry(category)
            .or_default()
            .insert(type_name, entry);
        if replaced.is_some() {
            log::warn!("{category} {type_name} registered twice; keeping the latest");
        }
    }

    pub fn entry(&self, category: &str, type_name: &str) -> Option<&BuilderEntry> {
        self.entries.get(category)?.get(type_name)
    }

    /// All builders in a category, ordered by type name.
    pub fn describe<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a BuilderEntry> + 'a {
        self.entries
            .get(category)
            .into_iter()
            .flat_map(|builders| builders.values())
    }

    pub fn categories(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    /// Construct the builder registered as `type_name` in `category`.
    pub fn instantiate(
        &self,
        category: &str,
        type_name: &str,
        params: &BuilderParams,
    ) -> Result<Builder, ComposeError> {
        let entry = self
            .entry(category, type_name)
            .ok_or_else(|| ComposeError::UnknownBuilder {
                category: category.to_string(),
                type_name: type_name.to_string(),
            })?;
        for name in params.names() {
            if !entry.params.contains(&name) {
                log::warn!("{type_name} ignores unknown parameter {name:?}");
            }
        }
        log::debug!("instantiating {category} {type_name} ({})", entry.label);
        (entry.constructor)(params)
    }

    pub fn chord_pool_builder(
        &self,
        type_name: &str,
        params: &BuilderParams,
    ) -> Result<Box<dyn ChordPoolBuilder>, ComposeError> {
        match self.instantiate(CHORD_POOL_BUILDER, type_name, params)? {
            Builder::ChordPool(builder) => Ok(builder),
            other => Err(wrong_category(type_name, CHORD_POOL_BUILDER, &other)),
        }
    }

    pub fn rhythm_builder(
        &self,
        type_name: &str,
        params: &BuilderParams,
    ) -> Result<Box<dyn RhythmBuilder>, ComposeError> {
        match self.instantiate(RHYTHM_BUILDER, type_name, params)? {
            Builder::Rhythm(builder) => Ok(builder),
            other => Err(wrong_category(type_name, RHYTHM_BUILDER, &other)),
        }
    }

    pub fn pitch_sequence_builder(
        &self,
        type_name: &str,
        params: &BuilderParams,
    ) -> Result<Box<dyn PitchSequenceBuilder>, ComposeError> {
        match self.instantiate(PITCH_SEQUENCE_BUILDER, type_name, params)? {
            Builder::PitchSequence(builder) => Ok(builder),
            other => Err(wrong_category(type_name, PITCH_SEQUENCE_BUILDER, &other)),
        }
    }
}

fn wrong_category(type_name: &str, expected: &'static str, found: &Builder) -> ComposeError {
    ComposeError::WrongCategory {
        type_name: type_name.to_string(),
        expected,
        found: found.category(),
    }
}
