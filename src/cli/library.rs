//! beatbook library command implementations.

use crate::config::Config;
use crate::error::Result;
use crate::library::{builtin_library, filter_by_bpm, Service, Track};
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct ListOptions {
    pub min_bpm: Option<u16>,
    pub max_bpm: Option<u16>,
    pub service: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = Config::load_from_dir(&cwd);

    let min = options.min_bpm.unwrap_or(config.library.min_bpm);
    let max = options.max_bpm.unwrap_or(config.library.max_bpm);
    let service = options
        .service
        .as_deref()
        .map(str::parse::<Service>)
        .transpose()?;

    let tracks = builtin_library();
    let mut filtered: Vec<&Track> = filter_by_bpm(&tracks, min, max);
    if let Some(service) = service {
        filtered.retain(|track| track.service == service);
    }

    let mut human = HumanOutput::new(format!(
        "beatbook library list: {} tracks in {min}-{max} BPM",
        filtered.len()
    ));
    for track in &filtered {
        human.push_detail(format!(
            "{:>3} BPM  {} - {} ({})",
            track.bpm, track.title, track.artist, track.service
        ));
    }
    if filtered.is_empty() {
        human.push_detail("No songs found in this BPM range.".to_string());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "library list",
        &filtered,
        Some(&human),
    )
}
