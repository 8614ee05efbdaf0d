// Tessitura generator: CLI entry point.
//
// Composes a piece from a config (built-in defaults unless --config is
// given), resolves every track of the resulting timeline into notes and
// prints a per-track summary. With --json the rendered notes are also
// written to a file, keyed by track name.
//
// Usage:
//   cargo run -p tessitura_compose --bin generate -- [--config FILE] [--beats N]
//     [--tempo BPM] [--mode MODE] [--seed N] [--json FILE] [--list-builders]
//
// Modes: ionian, dorian, phrygian, lydian, mixolydian, aeolian, locrian,
//        harmonic-minor, pentatonic
//
// Set RUST_LOG=debug to see every note as it is resolved.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use tessitura_compose::describer::{CHORD_POOL_BUILDER, PITCH_SEQUENCE_BUILDER, RHYTHM_BUILDER};
use tessitura_compose::{Describer, GenerateConfig, compose, render};
use tessitura_timeline::note::pitch_name;
use tessitura_timeline::{DEFAULT_TRACK, Mode, Tempo};

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();
    let describer = Describer::with_builtin();

    if args.iter().any(|a| a == "--list-builders") {
        list_builders(&describer);
        return;
    }

    let mut config = match parse_flag::<String>(&args, "--config") {
        Some(path) => match GenerateConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => GenerateConfig::default(),
    };

    // Flags override the config file.
    if let Some(beats) = parse_flag(&args, "--beats") {
        config.num_beats = beats;
    }
    if let Some(bpm) = parse_flag::<f64>(&args, "--tempo") {
        config.tempo = Tempo::constant(bpm);
    }
    if let Some(name) = parse_flag::<String>(&args, "--mode") {
        config.mode = Mode::from_name(&name).unwrap_or_else(|| {
            let known: Vec<String> = Mode::ALL.iter().map(|m| format!("{:?}", m)).collect();
            eprintln!("Unknown mode '{}' (known: {}). Using Dorian.", name, known.join(", "));
            Mode::Dorian
        });
    }
    if let Some(seed) = parse_flag(&args, "--seed") {
        config.seed = Some(seed);
    }
    let json_path: Option<String> = parse_flag(&args, "--json");

    println!("=== Tessitura Generator ===");
    println!("Mode: {:?} on {}", config.mode, pitch_name(config.tonic_pitch));
    println!("Beats: {}", config.num_beats);
    println!("Voices: {}", config.voices.len());
    if let Some(s) = config.seed {
        println!("Seed: {}", s);
    }
    println!();

    let mut rng = if let Some(s) = config.seed {
        StdRng::seed_from_u64(s)
    } else {
        StdRng::from_os_rng()
    };

    let timeline = match compose(&config, &describer, &mut rng) {
        Ok(timeline) => timeline,
        Err(e) => {
            eprintln!("Error composing: {}", e);
            std::process::exit(1);
        }
    };

    let rendered = match render(&timeline) {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("Error resolving notes: {}", e);
            std::process::exit(1);
        }
    };

    for (track, notes) in &rendered {
        let length = match timeline.length(track) {
            Ok(length) => length,
            Err(e) => {
                eprintln!("Error measuring track {}: {}", track, e);
                std::process::exit(1);
            }
        };
        println!("{:<10} {:>4} notes, {:.1}s", track, notes.len(), length);
        for note in notes.iter().take(4) {
            println!("    {}", note);
        }
        if notes.len() > 4 {
            println!("    ...");
        }
    }

    if let Some(path) = json_path {
        let written = serde_json::to_string_pretty(&rendered)
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(&path, json).map_err(|e| e.to_string()));
        match written {
            Ok(()) => println!("\nWrote notes to {}", path),
            Err(e) => {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
        }
    }

    match timeline.length(DEFAULT_TRACK) {
        Ok(length) => {
            println!();
            println!("Duration: {:.1}s", length);
        }
        Err(e) => {
            eprintln!("Error measuring the piece: {}", e);
            std::process::exit(1);
        }
    }
}

fn list_builders(describer: &Describer) {
    for category in [CHORD_POOL_BUILDER, RHYTHM_BUILDER, PITCH_SEQUENCE_BUILDER] {
        println!("{}:", category);
        for entry in describer.describe(category) {
            println!("  {:<32} {:<18} [{}]", entry.type_name, entry.label, entry.params.join(", "));
        }
    }
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
