//! Track library and BPM range filtering.
//!
//! The library is the fixed set of synced tracks; filtering is a read-only
//! derived view recomputed on every call, never cached.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Spotify,
    Apple,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Spotify => "spotify",
            Service::Apple => "apple",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "spotify" => Ok(Service::Spotify),
            "apple" => Ok(Service::Apple),
            other => Err(Error::InvalidArgument(format!(
                "unknown service '{other}' (expected spotify|apple)"
            ))),
        }
    }
}

/// A synced track with its detected tempo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub cover_url: String,
    pub bpm: u16,
    pub service: Service,
}

/// Select tracks whose tempo falls within the inclusive `[min, max]`
/// range, preserving input order.
pub fn filter_by_bpm(tracks: &[Track], min: u16, max: u16) -> Vec<&Track> {
    tracks
        .iter()
        .filter(|track| track.bpm >= min && track.bpm <= max)
        .collect()
}

/// The synced track set.
pub fn builtin_library() -> Vec<Track> {
    fn track(id: &str, title: &str, artist: &str, bpm: u16, service: Service) -> Track {
        Track {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            cover_url: format!(
                "https://source.unsplash.com/random/300x300/?album&seed={id}"
            ),
            bpm,
            service,
        }
    }

    vec![
        track("1", "Blinding Lights", "The Weeknd", 171, Service::Spotify),
        track("2", "Don't Start Now", "Dua Lipa", 124, Service::Spotify),
        track("3", "Bad Guy", "Billie Eilish", 135, Service::Spotify),
        track("4", "Dance Monkey", "Tones and I", 98, Service::Apple),
        track("5", "Levitating", "Dua Lipa", 103, Service::Apple),
        track("6", "Watermelon Sugar", "Harry Styles", 95, Service::Spotify),
        track("7", "Save Your Tears", "The Weeknd", 118, Service::Apple),
        track("8", "Stay", "The Kid LAROI, Justin Bieber", 170, Service::Spotify),
    ]
}
