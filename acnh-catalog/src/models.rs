//! Catalog record types
//!
//! Two record shapes share one query engine. [`CatalogRecord`] carries what
//! every record has (id, asset file stem, endpoints); [`Scheduled`] and
//! [`Named`] are the capabilities the hour/weather and name filters need.

use crate::error::{CatalogError, CatalogResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Weather condition a background track plays under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Rainy,
    Snowy,
}

impl Weather {
    pub const ALL: [Weather; 3] = [Weather::Sunny, Weather::Rainy, Weather::Snowy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Sunny => "Sunny",
            Weather::Rainy => "Rainy",
            Weather::Snowy => "Snowy",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weather {
    type Err = CatalogError;

    /// Exact, case-sensitive match on the wire names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weather::ALL
            .into_iter()
            .find(|w| w.as_str() == s)
            .ok_or_else(|| {
                CatalogError::Validation(format!(
                    "weather must be {}, {}, or {} (got {:?})",
                    Weather::Rainy,
                    Weather::Sunny,
                    Weather::Snowy,
                    s
                ))
            })
    }
}

/// Anything a weather filter accepts: the enum itself or its textual name
pub trait IntoWeather {
    fn into_weather(self) -> CatalogResult<Weather>;
}

impl IntoWeather for Weather {
    fn into_weather(self) -> CatalogResult<Weather> {
        Ok(self)
    }
}

impl IntoWeather for &str {
    fn into_weather(self) -> CatalogResult<Weather> {
        self.parse()
    }
}

impl IntoWeather for &String {
    fn into_weather(self) -> CatalogResult<Weather> {
        self.parse()
    }
}

/// Which remote collection a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    /// Hourly background music (`/backgroundmusic`)
    BackgroundMusic,
    /// K.K. Slider songs (`/songs`)
    Songs,
}

impl CatalogKind {
    /// Bulk listing endpoint
    pub fn list_path(&self) -> &'static str {
        match self {
            CatalogKind::BackgroundMusic => "/v{apiVersion}/backgroundmusic",
            CatalogKind::Songs => "/v{apiVersion}/songs",
        }
    }

    /// Single-record endpoint, keyed by record id
    pub fn record_path(&self) -> &'static str {
        match self {
            CatalogKind::BackgroundMusic => "/v{apiVersion}/backgroundmusic/{id}",
            CatalogKind::Songs => "/v{apiVersion}/songs/{id}",
        }
    }

    /// Binary audio endpoint, keyed by record id
    pub fn asset_path(&self) -> &'static str {
        match self {
            CatalogKind::BackgroundMusic => "/v{apiVersion}/hourly/{id}",
            CatalogKind::Songs => "/v{apiVersion}/music/{id}",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKind::BackgroundMusic => f.write_str("background music"),
            CatalogKind::Songs => f.write_str("songs"),
        }
    }
}

/// Common shape of every catalog record
pub trait CatalogRecord: DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: CatalogKind;

    fn id(&self) -> u32;

    /// Asset file name without extension
    fn file_stem(&self) -> &str;
}

/// Records that play at a given hour under a given weather
pub trait Scheduled: CatalogRecord {
    fn hour(&self) -> u8;
    fn weather(&self) -> Weather;
}

/// Records with localized display names
pub trait Named: CatalogRecord {
    /// Display name for a locale code such as `EUen`
    fn display_name(&self, locale: &str) -> Option<&str>;
}

/// Background music track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BgmTrack {
    pub id: u32,
    #[serde(rename = "file-name")]
    pub file_name: String,
    /// Hour of day (0-23)
    pub hour: u8,
    pub weather: Weather,
}

impl CatalogRecord for BgmTrack {
    const KIND: CatalogKind = CatalogKind::BackgroundMusic;

    fn id(&self) -> u32 {
        self.id
    }

    fn file_stem(&self) -> &str {
        &self.file_name
    }
}

impl Scheduled for BgmTrack {
    fn hour(&self) -> u8 {
        self.hour
    }

    fn weather(&self) -> Weather {
        self.weather
    }
}

/// K.K. Slider song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: u32,
    #[serde(rename = "file-name")]
    pub file_name: String,
    /// Display names keyed `name-<locale>`, e.g. `name-EUen`
    #[serde(default)]
    pub name: HashMap<String, String>,
}

impl CatalogRecord for Song {
    const KIND: CatalogKind = CatalogKind::Songs;

    fn id(&self) -> u32 {
        self.id
    }

    fn file_stem(&self) -> &str {
        &self.file_name
    }
}

impl Named for Song {
    fn display_name(&self, locale: &str) -> Option<&str> {
        self.name.get(&format!("name-{}", locale)).map(String::as_str)
    }
}
