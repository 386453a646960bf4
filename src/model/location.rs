//! Selected location.

use serde::{Deserialize, Serialize};

/// A coordinate pair with optional place descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            city: None,
            state: None,
            country: None,
        }
    }

    /// Short label: the city if known, else "Custom location".
    pub fn label(&self) -> &str {
        self.city
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or("Custom location")
    }

    /// "City, State, Country" from whatever descriptors are present,
    /// falling back to the coordinates.
    pub fn describe(&self) -> String {
        let parts: Vec<&str> = [&self.city, &self.state, &self.country]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            format!("{:.4}, {:.4}", self.latitude, self.longitude)
        } else {
            parts.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_falls_back() {
        let mut loc = Location::new(40.7, -74.0);
        assert_eq!(loc.label(), "Custom location");
        loc.city = Some("New York".to_string());
        assert_eq!(loc.label(), "New York");
    }

    #[test]
    fn describe_joins_known_parts() {
        let loc = Location {
            city: Some("Austin".to_string()),
            country: Some("USA".to_string()),
            ..Location::new(30.27, -97.74)
        };
        assert_eq!(loc.describe(), "Austin, USA");
        assert_eq!(Location::new(1.0, 2.0).describe(), "1.0000, 2.0000");
    }

    #[test]
    fn bare_coordinates_omit_descriptors() {
        let json = serde_json::to_value(Location::new(1.5, 2.5)).unwrap();
        assert_eq!(json, serde_json::json!({"latitude": 1.5, "longitude": 2.5}));
    }
}
