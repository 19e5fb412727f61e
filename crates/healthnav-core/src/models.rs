use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A geographic coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Clinician record - the star of the show
///
/// Immutable once fetched; the managers reference and clone these but
/// never edit them. Field names follow the backend wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub npi: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub specialties: Vec<String>,
    #[serde(default)]
    pub hospital_id: Option<String>,
    #[serde(default)]
    pub hospital_name: Option<String>,
    /// HCAHPS patient-experience score, 0-100
    #[serde(default, deserialize_with = "de_opt_score")]
    pub hcahps_score: Option<u8>,
    pub lat: f64,
    pub lng: f64,
    /// Precomputed distance from the search origin, in miles
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Hospital snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: String,
    pub cms_id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(deserialize_with = "de_score")]
    pub hcahps_score: u8,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub affiliated_providers: u32,
    #[serde(default)]
    pub bed_count: Option<u32>,
    #[serde(default)]
    pub emergency_services: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pharmacy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub chain: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub hours: Option<String>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub is_24_hour: bool,
}

/// What the user asked for - transient, only persisted when captured
/// into a recent-search entry
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub symptom: String,
    /// Search radius in miles
    pub radius: f64,
    pub specialties: Vec<String>,
    pub min_hcahps: u8,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            symptom: String::new(),
            radius: 25.0,
            specialties: Vec::new(),
            min_hcahps: 0,
        }
    }
}

impl SearchQuery {
    /// Whether any filter beyond the defaults is in effect
    pub fn has_filters(&self) -> bool {
        !self.symptom.is_empty() || !self.specialties.is_empty() || self.min_hcahps > 0
    }
}

/// A captured query snapshot for the recent-searches list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSearch {
    pub id: String,
    pub symptom: String,
    pub radius: f64,
    pub specialties: Vec<String>,
    pub min_hcahps: u8,
    pub timestamp: DateTime<Utc>,
}

impl RecentSearch {
    pub fn from_query(id: String, query: &SearchQuery) -> Self {
        Self {
            id,
            symptom: query.symptom.clone(),
            radius: query.radius,
            specialties: query.specialties.clone(),
            min_hcahps: query.min_hcahps,
            timestamp: Utc::now(),
        }
    }
}

// The backend models scores as floats (87.0); we keep them as the
// integers the UI actually renders. Round and clamp on the way in.
fn de_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

fn de_opt_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.map(|s| s.round().clamp(0.0, 100.0) as u8))
}
