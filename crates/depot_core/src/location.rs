//! Company locations managed from the settings page.

use chrono::{DateTime, Utc};
use depot_error::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Location type used when the caller does not name one.
pub const DEFAULT_LOCATION_TYPE: &str = "warehouse";

/// A stored company location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyLocation {
    /// Primary key
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Street address
    pub address: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Site kind (warehouse, factory, ...)
    #[serde(rename = "type")]
    pub location_type: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// A validated location ready to insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLocation {
    /// Display name
    pub name: String,
    /// Street address
    pub address: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Site kind
    pub location_type: String,
}

/// Location fields as submitted by a client; everything is optional until validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationInput {
    /// Display name
    pub name: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// Latitude in degrees
    pub latitude: Option<f64>,
    /// Longitude in degrees
    pub longitude: Option<f64>,
    /// Site kind
    #[serde(rename = "type")]
    pub location_type: Option<String>,
}

impl LocationInput {
    /// Check required fields and fill defaults.
    ///
    /// Name and address must be present and non-blank. Coordinates default to
    /// zero and the type defaults to [`DEFAULT_LOCATION_TYPE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use depot_core::LocationInput;
    ///
    /// let input = LocationInput {
    ///     name: Some("North DC".into()),
    ///     address: Some("1 Dock Road".into()),
    ///     ..Default::default()
    /// };
    /// let location = input.validate().unwrap();
    /// assert_eq!(location.location_type, "warehouse");
    /// assert_eq!(location.latitude, 0.0);
    ///
    /// assert!(LocationInput::default().validate().is_err());
    /// ```
    #[track_caller]
    pub fn validate(self) -> Result<NewLocation, ValidationError> {
        let name = self.name.filter(|s| !s.trim().is_empty());
        let address = self.address.filter(|s| !s.trim().is_empty());
        let (Some(name), Some(address)) = (name, address) else {
            return Err(ValidationError::new("Name and address are required"));
        };

        Ok(NewLocation {
            name,
            address,
            latitude: self.latitude.unwrap_or(0.0),
            longitude: self.longitude.unwrap_or(0.0),
            location_type: self
                .location_type
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOCATION_TYPE.to_string()),
        })
    }
}
