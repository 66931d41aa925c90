use geo_types::Point;
use serde::{Deserialize, Serialize};

use super::place::Place;

/// Shared origin/destination state, owned by the store
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Trip {
    pub origin: Option<Place>,
    pub destination: Option<Place>,
}

impl Trip {
    pub fn is_resolved(&self) -> bool {
        self.origin.is_some() && self.destination.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TripAction {
    SetOrigin(Place),
    SetDestination(Place),
    ClearOrigin,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UserLocation {
    pub street: Option<String>,
    #[serde(skip)]
    pub point: Option<Point>,
}
