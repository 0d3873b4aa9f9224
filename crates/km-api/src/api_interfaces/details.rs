use serde::Deserialize;
use serde_json::Value;

/// Raw details record from API.
#[derive(Deserialize)]
pub struct Details {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub logo: Value,
    /// Street address; the API stores it under `description`.
    #[serde(default)]
    pub description: Value,
    #[serde(default)]
    pub latitude: Value,
    #[serde(default)]
    pub longitude: Value,
    #[serde(default)]
    pub location_details: Value,
    #[serde(default)]
    pub opening_hours: Value,
    #[serde(default)]
    pub google_rating: Value,
    #[serde(default)]
    pub year_opened: Value,
    #[serde(default)]
    pub year_closed: Value,
    #[serde(default)]
    pub meats: Value,
    #[serde(default)]
    pub sauces: Value,
    #[serde(default)]
    pub status: Value,
    #[serde(default)]
    pub craft_rating: Value,
    #[serde(default)]
    pub order_methods: Value,
    #[serde(default)]
    pub is_favorite: Value,
}

/// Raw comment from API.
#[derive(Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub user: Value,
    #[serde(default)]
    pub text: Value,
}

/// Raw entry of the opening hours list.
#[derive(Deserialize)]
pub struct HoursEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hours: Value,
}

/// Raw entry of the user's favorites list.
#[derive(Deserialize)]
pub struct Favorite {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub is_favorite: Value,
}
