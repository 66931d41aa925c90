use geo_types::Point;
use geojson::{Feature, Geometry};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A place as returned by the search-ahead service.
///
/// Only the fields the picker reads are typed, everything else the service
/// sends is kept in `extra` so a place survives a round trip unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(default)]
    pub display_string: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<Feature>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Place {
    /// Shortcut item for "nearby" selections, which only know a name and where they are
    pub fn nearby(name: impl Into<String>, point: Option<Point>) -> Self {
        Place {
            name: name.into(),
            place: point.map(|p| Feature {
                geometry: Some(Geometry::new((&p).into())),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn point(&self) -> Option<Point> {
        let geometry = self.place.as_ref()?.geometry.as_ref()?;
        Point::try_from(&geometry.value).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_search_ahead_result_and_keeps_unknown_fields() {
        let place: Place = serde_json::from_value(json!({
            "collection": ["address"],
            "displayString": "123 Main St, San Francisco, CA 94105",
            "id": "mqId:282031134",
            "language": "en",
            "name": "123 Main St",
            "place": {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-122.39, 37.79] },
                "properties": { "city": "San Francisco" }
            },
            "recordType": "address",
            "slug": "/us/ca/san-francisco/123-main-st"
        }))
        .unwrap();

        assert_eq!(place.name, "123 Main St");
        assert_eq!(place.record_type.as_deref(), Some("address"));
        assert_eq!(place.extra.get("slug"), Some(&json!("/us/ca/san-francisco/123-main-st")));
        let point = place.point().unwrap();
        assert_eq!((point.x(), point.y()), (-122.39, 37.79));

        let back = serde_json::to_value(&place).unwrap();
        assert_eq!(back["language"], json!("en"));
        assert_eq!(back["displayString"], json!("123 Main St, San Francisco, CA 94105"));
    }

    #[test]
    fn nearby_place_has_name_and_point_only() {
        let place = Place::nearby("Downtown", Some(Point::new(-122.4, 37.78)));
        assert_eq!(place.name, "Downtown");
        assert!(place.display_string.is_empty());
        assert_eq!(place.point(), Some(Point::new(-122.4, 37.78)));
        assert_eq!(Place::nearby("Downtown", None).point(), None);
    }
}
