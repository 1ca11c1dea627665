//! Destination resolution: match free-text destinations against the landmark
//! and route catalogs and produce boarding instructions.
//!
//! Matching is deterministic, case-insensitive substring, first-match-wins in
//! store (insertion) order. There is no ranking: a destination that is a
//! substring of several names resolves to whichever comes first. That
//! ambiguity is a documented property of the catalog data, not something the
//! resolver tries to repair.

use ruta_common::models::catalog::RouteStatus;
use ruta_db::{LandmarkRow, RouteRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// No landmark or route matched the destination text
    NotFound,
    /// A route matched but is not currently served
    RouteUnavailable,
}

/// A resolved destination: the route to take and where to get off
#[derive(Debug)]
pub struct Resolution<'a> {
    pub route: &'a RouteRow,
    pub target_location: String,
    pub instructions: Vec<String>,
}

/// Resolve a destination against the catalogs.
///
/// 1. First landmark whose name contains the destination wins; its
///    `near_route` is looked up by exact route name and the landmark name
///    becomes the disembark label.
/// 2. Otherwise the first route whose end point, landmark list, or name
///    contains the destination wins, with the raw destination as the label.
pub fn resolve<'a>(
    destination: &str,
    landmarks: &[LandmarkRow],
    routes: &'a [RouteRow],
) -> Result<Resolution<'a>, ResolveError> {
    let needle = destination.to_lowercase();

    let matched_landmark = landmarks
        .iter()
        .find(|lm| lm.name.to_lowercase().contains(&needle));

    let (route, target_location) = match matched_landmark {
        Some(landmark) => {
            let route = routes.iter().find(|r| r.route_name == landmark.near_route);
            (route, landmark.name.clone())
        }
        None => {
            let route = routes.iter().find(|r| {
                r.end_point.to_lowercase().contains(&needle)
                    || r.landmarks
                        .iter()
                        .any(|lm| lm.to_lowercase().contains(&needle))
                    || r.route_name.to_lowercase().contains(&needle)
            });
            (route, destination.to_string())
        }
    };

    let route = route.ok_or(ResolveError::NotFound)?;

    if route.route_status != RouteStatus::ACTIVE {
        return Err(ResolveError::RouteUnavailable);
    }

    Ok(Resolution {
        route,
        instructions: instructions(route, &target_location),
        target_location,
    })
}

/// The three-step boarding instructions for a resolved route
pub fn instructions(route: &RouteRow, target_location: &str) -> Vec<String> {
    vec![
        format!("go to {} terminal", route.start_point),
        format!(
            "board {} bound for {}",
            route.vehicle_type, route.route_name
        ),
        format!("disembark at {}", target_location),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ruta_common::models::catalog::Coordinate;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn route(name: &str, vehicle: &str, start: &str, end: &str, status: &str) -> RouteRow {
        RouteRow {
            route_id: Uuid::new_v4(),
            route_name: name.to_string(),
            vehicle_type: vehicle.to_string(),
            start_point: start.to_string(),
            end_point: end.to_string(),
            fare: 15.0,
            estimated_time: 45,
            route_status: status.to_string(),
            landmarks: Vec::new(),
            coordinates: Json(vec![Coordinate {
                lat: 14.5995,
                lng: 120.9842,
            }]),
            created_at: Utc::now(),
        }
    }

    fn landmark(name: &str, near_route: &str) -> LandmarkRow {
        LandmarkRow {
            landmark_id: Uuid::new_v4(),
            name: name.to_string(),
            category: "Establishment".to_string(),
            near_route: near_route.to_string(),
            latitude: 14.5995,
            longitude: 120.9842,
            created_at: Utc::now(),
        }
    }

    fn sample_catalog() -> (Vec<LandmarkRow>, Vec<RouteRow>) {
        let mut route1 = route(
            "Route 1 - City Center to Suburbs",
            "jeepney",
            "City Center",
            "Suburbs",
            "active",
        );
        route1.landmarks = vec!["Central Park".to_string(), "City Mall".to_string()];
        let mut route2 = route(
            "Route 2 - Downtown to Uptown",
            "minibus",
            "Downtown",
            "Uptown",
            "active",
        );
        route2.landmarks = vec!["Tech Hub".to_string(), "University".to_string()];
        let landmarks = vec![
            landmark("Central Park", "Route 1 - City Center to Suburbs"),
            landmark("University", "Route 2 - Downtown to Uptown"),
        ];
        (landmarks, vec![route1, route2])
    }

    #[test]
    fn test_landmark_match_uses_near_route() {
        let (landmarks, routes) = sample_catalog();
        let resolution = resolve("University", &landmarks, &routes).unwrap();
        assert_eq!(resolution.route.route_name, "Route 2 - Downtown to Uptown");
        assert_eq!(resolution.target_location, "University");
        assert_eq!(
            resolution.instructions,
            vec![
                "go to Downtown terminal",
                "board minibus bound for Route 2 - Downtown to Uptown",
                "disembark at University",
            ]
        );
    }

    #[test]
    fn test_landmark_match_is_case_insensitive_substring() {
        let (landmarks, routes) = sample_catalog();
        let resolution = resolve("univ", &landmarks, &routes).unwrap();
        // Label is the landmark's full name, not the query fragment
        assert_eq!(resolution.target_location, "University");
    }

    #[test]
    fn test_fallback_matches_end_point_with_raw_label() {
        let (landmarks, routes) = sample_catalog();
        let resolution = resolve("Suburbs", &landmarks, &routes).unwrap();
        assert_eq!(
            resolution.route.route_name,
            "Route 1 - City Center to Suburbs"
        );
        // No landmark matched, so the raw destination text is the label
        assert_eq!(resolution.target_location, "Suburbs");
        assert_eq!(resolution.instructions[2], "disembark at Suburbs");
    }

    #[test]
    fn test_fallback_matches_route_landmark_entry() {
        let (landmarks, routes) = sample_catalog();
        // "Tech Hub" is in route 2's landmark list but not in the landmark catalog
        let resolution = resolve("Tech Hub", &landmarks, &routes).unwrap();
        assert_eq!(resolution.route.route_name, "Route 2 - Downtown to Uptown");
        assert_eq!(resolution.target_location, "Tech Hub");
    }

    #[test]
    fn test_fallback_matches_route_name() {
        let (landmarks, routes) = sample_catalog();
        let resolution = resolve("route 1", &landmarks, &routes).unwrap();
        assert_eq!(
            resolution.route.route_name,
            "Route 1 - City Center to Suburbs"
        );
    }

    #[test]
    fn test_no_match_is_not_found() {
        let (landmarks, routes) = sample_catalog();
        let result = resolve("Mars Colony", &landmarks, &routes);
        assert_eq!(result.unwrap_err(), ResolveError::NotFound);
    }

    #[test]
    fn test_landmark_with_dangling_near_route_is_not_found() {
        let landmarks = vec![landmark("Orphan Plaza", "Route 9 - Nowhere")];
        let (_, routes) = sample_catalog();
        // The landmark matches, but its soft route reference resolves to nothing
        let result = resolve("Orphan Plaza", &landmarks, &routes);
        assert_eq!(result.unwrap_err(), ResolveError::NotFound);
    }

    #[test]
    fn test_inactive_route_is_unavailable() {
        let (landmarks, mut routes) = sample_catalog();
        routes[1].route_status = "inactive".to_string();
        let result = resolve("University", &landmarks, &routes);
        assert_eq!(result.unwrap_err(), ResolveError::RouteUnavailable);
    }

    #[test]
    fn test_inactive_fallback_route_is_unavailable() {
        let (landmarks, mut routes) = sample_catalog();
        routes[0].route_status = "inactive".to_string();
        let result = resolve("Suburbs", &landmarks, &routes);
        assert_eq!(result.unwrap_err(), ResolveError::RouteUnavailable);
    }

    #[test]
    fn test_ambiguous_substring_takes_first_in_store_order() {
        let landmarks = vec![
            landmark("City Mall", "Route 1 - City Center to Suburbs"),
            landmark("City Hall", "Route 2 - Downtown to Uptown"),
        ];
        let (_, routes) = sample_catalog();
        // "City" matches both landmarks; the first in store order wins
        let resolution = resolve("City", &landmarks, &routes).unwrap();
        assert_eq!(resolution.target_location, "City Mall");
        assert_eq!(
            resolution.route.route_name,
            "Route 1 - City Center to Suburbs"
        );
    }

    #[test]
    fn test_landmark_catalog_takes_precedence_over_route_fields() {
        let (mut landmarks, routes) = sample_catalog();
        // "Suburbs Clinic" is a landmark on route 2 even though "Suburbs" is
        // route 1's end point; the landmark path wins
        landmarks.push(landmark("Suburbs Clinic", "Route 2 - Downtown to Uptown"));
        let resolution = resolve("Suburbs Clinic", &landmarks, &routes).unwrap();
        assert_eq!(resolution.route.route_name, "Route 2 - Downtown to Uptown");
        assert_eq!(resolution.target_location, "Suburbs Clinic");
    }

    #[test]
    fn test_near_route_lookup_is_exact_name_match() {
        let landmarks = vec![landmark("Central Park", "route 1 - city center to suburbs")];
        let (_, routes) = sample_catalog();
        // near_route differs in case from the stored route name; the exact
        // lookup finds nothing
        let result = resolve("Central Park", &landmarks, &routes);
        assert_eq!(result.unwrap_err(), ResolveError::NotFound);
    }

    #[test]
    fn test_instructions_shape() {
        let r = route("Route 3 - Airport to City", "ejeepney", "Airport", "City Center", "active");
        let steps = instructions(&r, "Hotel District");
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], "go to Airport terminal");
        assert_eq!(steps[1], "board ejeepney bound for Route 3 - Airport to City");
        assert_eq!(steps[2], "disembark at Hotel District");
    }
}
