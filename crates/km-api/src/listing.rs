use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Operating status of a kebab place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Open,
    Closed,
    Planned,
    #[default]
    Unknown,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::Closed => "closed",
            Status::Planned => "planned",
            Status::Unknown => "unknown",
        }
    }

    /// Lenient parse used by the mapper; anything unrecognised is `Unknown`.
    pub fn from_upstream(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Status::Open),
            "closed" => Ok(Status::Closed),
            "planned" => Ok(Status::Planned),
            "unknown" => Ok(Status::Unknown),
            other => Err(format!("unknown status `{other}`")),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A kebab place as shown on the map and in the list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: Status,
    pub craft_rating: bool,
    pub in_chain: bool,
}
