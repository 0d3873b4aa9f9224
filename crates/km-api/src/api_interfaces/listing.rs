use serde::Deserialize;
use serde_json::Value;

// Request structure is omitted since listing queries only use URL parameters.

/// Raw listing record from API.
///
/// Every field is kept as a raw JSON value since upstream revisions disagree on
/// both the key names and the value types. Records may carry several of the
/// alternative keys at once, so each one is its own field.
#[derive(Deserialize)]
pub struct Record {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub title: Value,
    #[serde(default)]
    pub address: Value,
    #[serde(default)]
    pub location: Value,
    /// Map markers carry the street address here.
    #[serde(default)]
    pub description: Value,
    #[serde(default)]
    pub latitude: Value,
    #[serde(default)]
    pub longitude: Value,
    #[serde(default)]
    pub status: Value,
    #[serde(default)]
    pub craft_rating: Value,
    #[serde(default, rename = "craftRating")]
    pub craft_rating_camel: Value,
    #[serde(default)]
    pub craft: Value,
    #[serde(default)]
    pub in_chain: Value,
    #[serde(default, rename = "inChain")]
    pub in_chain_camel: Value,
}
