use std::collections::BTreeMap;

use chrono::{Datelike, Local, Utc, Weekday};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    api_interfaces::details::{self, HoursEntry},
    error::GetError,
    listing::Status,
    mapper::{coerce_bool, coerce_f64, coerce_i32, coerce_string, split_list},
    session::Session,
    util::{endpoint, read_json},
};

const NO_TITLE: &str = "Brak tytułu";
const NO_ADDRESS: &str = "Brak adresu";
const NO_DESCRIPTION: &str = "Brak opisu";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayHours {
    pub open: String,
    pub close: String,
}

/// Opening hours keyed by lowercase English day name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours(BTreeMap<String, DayHours>);

impl OpeningHours {
    /// Lenient parse: accepts an object, or a string holding one (single
    /// quotes allowed). Anything else yields no hours.
    pub fn parse(value: &Value) -> Self {
        let parsed = match value {
            Value::Object(_) => serde_json::from_value(value.clone()),
            Value::String(raw) => serde_json::from_str(&raw.replace('\'', "\"")),
            _ => return Self::default(),
        };
        match parsed {
            Ok(hours) => Self(hours),
            Err(error) => {
                debug!(%error, "ignoring unparsable opening hours");
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn for_weekday(&self, weekday: Weekday) -> Option<&DayHours> {
        self.0.get(day_name(weekday))
    }

    /// Hours for the current local day.
    pub fn today(&self) -> Option<&DayHours> {
        self.for_weekday(Local::now().weekday())
    }

    /// Entries in week order, Monday first. Keys that are not day names come last.
    pub fn days(&self) -> Vec<(&str, &DayHours)> {
        let mut days: Vec<_> = self.0.iter().map(|(day, hours)| (day.as_str(), hours)).collect();
        days.sort_by_key(|(day, _)| day_index(day));
        days
    }
}

fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

fn day_index(day: &str) -> u32 {
    day.parse::<Weekday>()
        .map(|weekday| weekday.num_days_from_monday())
        .unwrap_or(u32::MAX)
}

/// Everything the details screen shows about one place.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListingDetails {
    pub id: String,
    pub title: String,
    pub logo: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub rating: f64,
    pub year_opened: i32,
    pub year_closed: Option<i32>,
    pub opening_hours: OpeningHours,
    pub meats: Vec<String>,
    pub sauces: Vec<String>,
    pub order_methods: Vec<String>,
    pub status: Status,
    pub craft: bool,
    pub is_favorite: bool,
}

fn or_default(value: &Value, default: &str) -> String {
    let s = coerce_string(value);
    if s.is_empty() {
        default.to_string()
    } else {
        s
    }
}

impl From<details::Details> for ListingDetails {
    fn from(raw: details::Details) -> Self {
        Self {
            id: or_default(&raw.id, "0"),
            title: or_default(&raw.name, NO_TITLE),
            logo: coerce_string(&raw.logo),
            location: or_default(&raw.description, NO_ADDRESS),
            latitude: coerce_f64(&raw.latitude),
            longitude: coerce_f64(&raw.longitude),
            description: or_default(&raw.location_details, NO_DESCRIPTION),
            rating: coerce_f64(&raw.google_rating),
            year_opened: coerce_i32(&raw.year_opened)
                .filter(|year| *year != 0)
                .unwrap_or_else(|| Utc::now().year()),
            year_closed: coerce_i32(&raw.year_closed).filter(|year| *year != 0),
            opening_hours: OpeningHours::parse(&raw.opening_hours),
            meats: split_list(&raw.meats),
            sauces: split_list(&raw.sauces),
            order_methods: split_list(&raw.order_methods),
            status: Status::from_upstream(&coerce_string(&raw.status)),
            craft: coerce_bool(&raw.craft_rating),
            is_favorite: coerce_bool(&raw.is_favorite),
        }
    }
}

/// Get the details of one place.
pub async fn get(client: &Client, api_url: &Url, id: &str) -> Result<ListingDetails, GetError> {
    let url = endpoint(api_url, &["kebabs", id])?;
    debug!(%url, "fetching details");
    let response = client.get(url).send().await?;
    let raw: details::Details = read_json(response).await?;
    Ok(ListingDetails::from(raw))
}

/// Look up the opening hours published for the place with the given title.
pub async fn get_opening_hours(
    client: &Client,
    api_url: &Url,
    session: &Session,
    title: &str,
) -> Result<Option<OpeningHours>, GetError> {
    let url = endpoint(api_url, &["kebab-hours"])?;
    let response = client
        .get(url)
        .bearer_auth(session.token())
        .send()
        .await?;
    let entries: Vec<HoursEntry> = read_json(response).await?;
    let hours = entries
        .into_iter()
        .find(|entry| entry.name == title)
        .map(|entry| OpeningHours::parse(&entry.hours));
    if hours.is_none() {
        warn!(title, "no opening hours found");
    }
    Ok(hours)
}
