use crate::auth::hash_password;
use crate::config::AdminSeedConfig;
use anyhow::{Context, Result};
use ruta_common::models::auth::Role;
use ruta_common::models::catalog::Coordinate;
use ruta_db::{LandmarkRepo, NewLandmark, NewRoute, RouteRepo, UserRepo};
use sqlx::PgPool;
use uuid::Uuid;

/// Create the default admin account when no admin exists yet
pub async fn seed_admin(pool: &PgPool, admin: &AdminSeedConfig) -> Result<()> {
    if UserRepo::admin_exists(pool).await? {
        tracing::info!("Admin account already exists, skipping seed");
        return Ok(());
    }

    let password_hash =
        hash_password(&admin.password).context("Failed to hash admin password")?;
    UserRepo::create(
        pool,
        Uuid::new_v4(),
        &admin.full_name,
        &admin.email,
        &password_hash,
        Role::Admin.as_str(),
        None,
    )
    .await
    .context("Failed to create admin user")?;

    // Seeded admins skip email verification
    let seeded = UserRepo::get_by_email(pool, &admin.email)
        .await?
        .context("Seeded admin not found")?;
    UserRepo::mark_verified(pool, seeded.user_id).await?;

    tracing::info!("Created admin account: {}", admin.email);
    Ok(())
}

/// Insert demo routes and landmarks when the catalog is empty
pub async fn seed_sample_data(pool: &PgPool) -> Result<()> {
    if RouteRepo::count(pool).await? > 0 || LandmarkRepo::count(pool).await? > 0 {
        tracing::info!("Catalog is not empty, skipping sample data seed");
        return Ok(());
    }

    for route in sample_routes() {
        RouteRepo::create(pool, &route).await?;
    }
    for landmark in sample_landmarks() {
        LandmarkRepo::create(pool, &landmark).await?;
    }

    tracing::info!("Sample catalog data seeded");
    Ok(())
}

fn sample_route(
    name: &str,
    vehicle: &str,
    start: &str,
    end: &str,
    fare: f64,
    estimated_time: i32,
    landmarks: &[&str],
    coordinates: Vec<Coordinate>,
) -> NewRoute {
    NewRoute {
        route_name: name.to_string(),
        vehicle_type: vehicle.to_string(),
        start_point: start.to_string(),
        end_point: end.to_string(),
        fare,
        estimated_time,
        route_status: "active".to_string(),
        landmarks: landmarks.iter().map(|s| s.to_string()).collect(),
        coordinates,
    }
}

fn sample_routes() -> Vec<NewRoute> {
    vec![
        sample_route(
            "Route 1 - City Center to Suburbs",
            "jeepney",
            "City Center",
            "Suburbs",
            15.0,
            45,
            &["Central Park", "City Mall"],
            vec![
                Coordinate { lat: 14.5995, lng: 120.9842 },
                Coordinate { lat: 14.6095, lng: 120.9942 },
            ],
        ),
        sample_route(
            "Route 2 - Downtown to Uptown",
            "minibus",
            "Downtown",
            "Uptown",
            20.0,
            30,
            &["Tech Hub", "University"],
            vec![
                Coordinate { lat: 14.5895, lng: 120.9742 },
                Coordinate { lat: 14.6195, lng: 121.0042 },
            ],
        ),
        sample_route(
            "Route 3 - Airport to City",
            "ejeepney",
            "Airport",
            "City Center",
            25.0,
            35,
            &["Airport Terminal", "Hotel District"],
            vec![
                Coordinate { lat: 14.5095, lng: 120.9642 },
                Coordinate { lat: 14.5995, lng: 120.9842 },
            ],
        ),
    ]
}

fn sample_landmark(name: &str, category: &str, near_route: &str, lat: f64, lng: f64) -> NewLandmark {
    NewLandmark {
        name: name.to_string(),
        category: category.to_string(),
        near_route: near_route.to_string(),
        latitude: lat,
        longitude: lng,
    }
}

fn sample_landmarks() -> Vec<NewLandmark> {
    vec![
        sample_landmark(
            "Central Park",
            "Establishment",
            "Route 1 - City Center to Suburbs",
            14.5995,
            120.9842,
        ),
        sample_landmark(
            "City Mall",
            "Mall",
            "Route 1 - City Center to Suburbs",
            14.6095,
            120.9942,
        ),
        sample_landmark(
            "Tech Hub",
            "Establishment",
            "Route 2 - Downtown to Uptown",
            14.5895,
            120.9742,
        ),
        sample_landmark(
            "University",
            "School",
            "Route 2 - Downtown to Uptown",
            14.6195,
            121.0042,
        ),
        sample_landmark(
            "Airport Terminal",
            "Airport",
            "Route 3 - Airport to City",
            14.5095,
            120.9642,
        ),
        sample_landmark(
            "Hotel District",
            "Establishment",
            "Route 3 - Airport to City",
            14.5295,
            120.9742,
        ),
        sample_landmark(
            "General Hospital",
            "Hospital",
            "Route 1 - City Center to Suburbs",
            14.5795,
            120.9642,
        ),
        sample_landmark(
            "City Hall",
            "Government Office",
            "Route 2 - Downtown to Uptown",
            14.5895,
            120.9842,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_landmarks_reference_sample_routes() {
        let route_names: Vec<String> = sample_routes().iter().map(|r| r.route_name.clone()).collect();
        for landmark in sample_landmarks() {
            assert!(
                route_names.contains(&landmark.near_route),
                "landmark {} references unknown route {}",
                landmark.name,
                landmark.near_route
            );
        }
    }

    #[test]
    fn test_sample_routes_are_active() {
        for route in sample_routes() {
            assert_eq!(route.route_status, "active");
        }
    }
}
