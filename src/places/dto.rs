use serde::Deserialize;

/// Mutable listing fields, shared between create and update. The owner is
/// deliberately absent: it is always derived from the authenticated
/// principal and never accepted from the client.
#[derive(Debug, Deserialize)]
pub struct PlaceFields {
    pub title: String,
    pub address: String,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub perks: Vec<String>,
    #[serde(default)]
    pub extra_info: String,
    #[serde(default)]
    pub check_in: String,
    #[serde(default)]
    pub check_out: String,
    pub max_guests: i32,
    pub price: f64,
}
