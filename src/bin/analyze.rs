use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use zone_occupancy::{
    Arena, ArenaConfig, Cli, CsvReport, TableReport, TrackingSample, ZoneEngine,
};

/// Either one subject's samples, or samples keyed by subject id.
#[derive(Deserialize)]
#[serde(untagged)]
enum SampleFile {
    Single(Vec<TrackingSample>),
    Subjects(BTreeMap<String, Vec<TrackingSample>>),
}

fn load_sessions(path: &Path) -> Result<Vec<(String, Vec<TrackingSample>)>> {
    let file = File::open(path).with_context(|| format!("Failed to open samples {:?}", path))?;
    let parsed: SampleFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse samples {:?}", path))?;

    Ok(match parsed {
        SampleFile::Single(samples) => {
            let subject = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("subject")
                .to_string();
            vec![(subject, samples)]
        }
        SampleFile::Subjects(map) => map.into_iter().collect(),
    })
}

fn main() -> Result<()> {
    // 1. Setup Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    // 2. Arena
    let config = ArenaConfig::load(&args.arena)
        .with_context(|| format!("Failed to load arena {:?}", args.arena))?;
    let arena = Arena::from_config(&config).context("Arena zones failed to resolve")?;

    // 3. Engine
    let settings = args.engine_settings().context("Invalid analysis settings")?;
    let engine = ZoneEngine::new(Arc::new(arena), settings)?;

    // 4. Samples
    let sessions = load_sessions(&args.samples)?;
    log::info!("Loaded {} subject(s) from {:?}", sessions.len(), args.samples);

    // 5. Analyze
    let reports = engine.analyze_sessions(&sessions).context("Analysis failed")?;

    // 6. Output
    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else if args.csv {
        let mut csv = CsvReport::new();
        for report in &reports {
            report.write_to(&mut csv);
        }
        csv.print_all();
    } else {
        let mut table = TableReport::new();
        for report in &reports {
            report.write_to(&mut table);
        }
        print!("{}", table.render());
    }

    Ok(())
}
