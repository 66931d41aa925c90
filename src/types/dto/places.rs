use serde::{Deserialize, Serialize};

use crate::types::place::Place;

/// Body of a search-ahead response
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PlaceResults {
    #[serde(default)]
    pub results: Vec<Place>,
}

/// Status plus body of a places call. Anything but a 200 with a body is a failed search.
#[derive(Debug, Clone)]
pub struct PlacesResponse {
    pub status: u16,
    pub data: Option<PlaceResults>,
}

impl PlacesResponse {
    pub fn ok(results: Vec<Place>) -> Self {
        PlacesResponse {
            status: 200,
            data: Some(PlaceResults { results }),
        }
    }

    pub fn with_status(status: u16) -> Self {
        PlacesResponse { status, data: None }
    }

    /// The result list, if this was a successful search
    pub fn into_results(self) -> Option<Vec<Place>> {
        if self.status != 200 {
            return None;
        }
        self.data.map(|data| data.results)
    }
}
