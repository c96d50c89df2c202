//! The fixed initial dataset embedded in the binary.

use crate::api::NewCelestialBody;
use crate::db::repository::{RepositoryError, RepositoryResult};

/// Seed dataset, compiled in so a fresh deployment needs no data files.
const PLANETS_JSON: &str = include_str!("../../data/planets.json");

/// Parse the embedded seed dataset.
///
/// A malformed embedded dataset is a startup error, not something to limp
/// past with a partial catalog.
pub fn initial_bodies() -> RepositoryResult<Vec<NewCelestialBody>> {
    serde_json::from_str(PLANETS_JSON).map_err(|e| {
        RepositoryError::configuration(format!("Embedded planet dataset is invalid: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_dataset_parses() {
        let bodies = initial_bodies().unwrap();
        assert!(bodies.len() >= 9);
    }

    #[test]
    fn test_seed_has_exactly_one_central_body() {
        let bodies = initial_bodies().unwrap();
        let centrals: Vec<_> = bodies.iter().filter(|b| b.orbital_radius == 0.0).collect();
        assert_eq!(centrals.len(), 1);
        assert_eq!(centrals[0].name, "Sun");
    }

    #[test]
    fn test_seed_names_are_unique() {
        let bodies = initial_bodies().unwrap();
        let mut names: Vec<&str> = bodies.iter().map(|b| b.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), bodies.len());
    }

    #[test]
    fn test_seed_respects_model_bounds() {
        for body in initial_bodies().unwrap() {
            assert!(body.radius >= 1.0, "{} radius too small", body.name);
            assert!(body.orbital_radius >= 0.0);
            assert!(body.orbital_speed >= 0.0);
            assert!(!body.color.is_empty());
        }
    }
}
