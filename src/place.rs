use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Geographic position of a place, in degrees.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }
}

// Compared by bit pattern so that a place can live in a HashSet.
impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
    }
}

/// Structured postal address. Every part is optional because providers
/// rarely fill all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    pub thoroughfare: Option<String>,
    pub sub_thoroughfare: Option<String>,
    pub locality: Option<String>,
    pub sub_locality: Option<String>,
    pub administrative_area: Option<String>,
    pub sub_administrative_area: Option<String>,
    pub postal_code: Option<String>,
    pub iso_country_code: Option<String>,
    pub country: Option<String>,
}

/// One search hit. Treated as a value: two results with identical fields are
/// the same result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceResult {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub url: Option<String>,
    pub address: Address,
    pub coordinate: Coordinate,
}

impl PlaceResult {
    pub fn new(name: Option<String>, coordinate: Coordinate) -> Self {
        PlaceResult {
            name,
            coordinate,
            ..PlaceResult::default()
        }
    }

    /// Phone and url, whichever are present, one per line.
    pub fn contact_line(&self) -> String {
        [self.phone.as_deref(), self.url.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Single-line postal address used as the row subtitle.
    pub fn subtitle(&self) -> String {
        let address = &self.address;
        let street = match (
            address.sub_thoroughfare.as_deref(),
            address.thoroughfare.as_deref(),
        ) {
            (Some(number), Some(street)) => Some(format!("{} {}", number, street)),
            (None, Some(street)) => Some(street.to_string()),
            (Some(number), None) => Some(number.to_string()),
            (None, None) => None,
        };

        street
            .into_iter()
            .chain(
                [
                    address.locality.as_deref(),
                    address.administrative_area.as_deref(),
                    address.postal_code.as_deref(),
                    address.country.as_deref(),
                ]
                .into_iter()
                .flatten()
                .map(str::to_string),
            )
            .collect::<Vec<_>>()
            .join(", ")
    }
}
