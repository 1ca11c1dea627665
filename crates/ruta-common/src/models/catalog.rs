use serde::{Deserialize, Serialize};

/// Vehicle class operating a transit route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Jeepney,
    Minibus,
    Ejeepney,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Jeepney => "jeepney",
            VehicleType::Minibus => "minibus",
            VehicleType::Ejeepney => "ejeepney",
        }
    }
}

/// Whether a route is currently served
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    #[default]
    Active,
    Inactive,
}

impl RouteStatus {
    pub const ACTIVE: &'static str = "active";

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStatus::Active => "active",
            RouteStatus::Inactive => "inactive",
        }
    }
}

/// Fixed set of landmark categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LandmarkCategory {
    Hospital,
    #[serde(rename = "Government Office")]
    GovernmentOffice,
    Market,
    School,
    Airport,
    Mall,
    Cemetery,
    Restaurant,
    Establishment,
}

impl LandmarkCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LandmarkCategory::Hospital => "Hospital",
            LandmarkCategory::GovernmentOffice => "Government Office",
            LandmarkCategory::Market => "Market",
            LandmarkCategory::School => "School",
            LandmarkCategory::Airport => "Airport",
            LandmarkCategory::Mall => "Mall",
            LandmarkCategory::Cemetery => "Cemetery",
            LandmarkCategory::Restaurant => "Restaurant",
            LandmarkCategory::Establishment => "Establishment",
        }
    }
}

/// Review state of a commuter-submitted landmark suggestion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl SuggestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionStatus::Pending => "pending",
            SuggestionStatus::Approved => "approved",
            SuggestionStatus::Rejected => "rejected",
        }
    }
}

/// A point along a route's path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_type_roundtrip() {
        let v: VehicleType = serde_json::from_str("\"minibus\"").unwrap();
        assert_eq!(v, VehicleType::Minibus);
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"minibus\"");
    }

    #[test]
    fn test_unknown_vehicle_type_rejected() {
        let result = serde_json::from_str::<VehicleType>("\"tricycle\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_route_status_defaults_to_active() {
        assert_eq!(RouteStatus::default(), RouteStatus::Active);
        assert_eq!(RouteStatus::default().as_str(), RouteStatus::ACTIVE);
    }

    #[test]
    fn test_landmark_category_with_space() {
        let c: LandmarkCategory = serde_json::from_str("\"Government Office\"").unwrap();
        assert_eq!(c, LandmarkCategory::GovernmentOffice);
        assert_eq!(c.as_str(), "Government Office");
    }

    #[test]
    fn test_suggestion_status_roundtrip() {
        for status in [
            SuggestionStatus::Pending,
            SuggestionStatus::Approved,
            SuggestionStatus::Rejected,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let back: SuggestionStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_coordinate_json_shape() {
        let c = Coordinate {
            lat: 14.5995,
            lng: 120.9842,
        };
        let value = serde_json::to_value(c).unwrap();
        assert_eq!(value["lat"], 14.5995);
        assert_eq!(value["lng"], 120.9842);
    }
}
