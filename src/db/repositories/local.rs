//! In-memory repository for unit testing and local development.
//!
//! Also the runtime fallback when no database is configured: the process
//! keeps serving from a store that lives exactly as long as it does.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::api::{BodyId, CelestialBody, NewCelestialBody};
use crate::db::repository::{
    canonical_sort, validate_new_body, BodyRepository, ErrorContext, RepositoryError,
    RepositoryResult,
};

/// In-memory implementation of [`BodyRepository`].
///
/// Ids are assigned from a monotonic sequence starting at 1, mirroring the
/// `BIGSERIAL` column of the Postgres backend.
#[derive(Debug, Default)]
pub struct LocalRepository {
    inner: RwLock<Store>,
}

#[derive(Debug, Default)]
struct Store {
    bodies: Vec<CelestialBody>,
    next_id: i64,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Store {
                bodies: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

#[async_trait]
impl BodyRepository for LocalRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<CelestialBody>> {
        let mut bodies = self.inner.read().bodies.clone();
        canonical_sort(&mut bodies);
        Ok(bodies)
    }

    async fn find_by_name_substring(&self, text: &str) -> RepositoryResult<Vec<CelestialBody>> {
        if text.is_empty() {
            return Err(RepositoryError::validation_with_context(
                "Search text must not be empty",
                ErrorContext::new("find_by_name_substring"),
            ));
        }

        let needle = text.to_lowercase();
        let mut matches: Vec<CelestialBody> = self
            .inner
            .read()
            .bodies
            .iter()
            .filter(|b| b.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        canonical_sort(&mut matches);
        Ok(matches)
    }

    async fn count(&self) -> RepositoryResult<usize> {
        Ok(self.inner.read().bodies.len())
    }

    async fn insert_many(&self, bodies: Vec<NewCelestialBody>) -> RepositoryResult<usize> {
        for body in &bodies {
            validate_new_body(body)?;
        }

        let mut store = self.inner.write();
        // Reject the whole batch before mutating anything, so a failed seed
        // leaves the store empty rather than half-populated.
        for body in &bodies {
            let name = body.name.trim();
            if store
                .bodies
                .iter()
                .any(|existing| existing.name == name)
            {
                return Err(RepositoryError::validation_with_context(
                    format!("Body name '{}' already exists", name),
                    ErrorContext::new("insert_many").with_details("unique_violation"),
                ));
            }
        }
        let mut seen = std::collections::HashSet::new();
        for body in &bodies {
            if !seen.insert(body.name.trim().to_string()) {
                return Err(RepositoryError::validation_with_context(
                    format!("Duplicate body name '{}' in batch", body.name.trim()),
                    ErrorContext::new("insert_many").with_details("unique_violation"),
                ));
            }
        }

        let inserted = bodies.len();
        for body in bodies {
            let id = BodyId::new(store.next_id);
            store.next_id += 1;
            store.bodies.push(body.into_body(id));
        }
        Ok(inserted)
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(name: &str, orbital_radius: f64) -> NewCelestialBody {
        NewCelestialBody {
            name: name.to_string(),
            description: format!("{} description", name),
            radius: 5.0,
            orbital_radius,
            orbital_speed: 0.01,
            color: "#ffffff".to_string(),
            image_src: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_in_canonical_order() {
        let repo = LocalRepository::new();
        repo.insert_many(vec![
            body("Neptune", 500.0),
            body("Sun", 0.0),
            body("Mercury", 60.0),
        ])
        .await
        .unwrap();

        let all = repo.list_all().await.unwrap();
        let names: Vec<&str> = all.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Sun", "Mercury", "Neptune"]);
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let repo = LocalRepository::new();
        repo.insert_many(vec![body("Sun", 0.0), body("Mercury", 60.0)])
            .await
            .unwrap();

        let mut all = repo.list_all().await.unwrap();
        all.sort_by_key(|b| b.id);
        assert_eq!(all[0].id, BodyId::new(1));
        assert_eq!(all[1].id, BodyId::new(2));
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected_without_partial_insert() {
        let repo = LocalRepository::new();
        repo.insert_many(vec![body("Earth", 120.0)]).await.unwrap();

        let err = repo
            .insert_many(vec![body("Mars", 160.0), body("Earth", 120.0)])
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_name_trimmed_on_insert() {
        let repo = LocalRepository::new();
        let mut earth = body("Earth", 120.0);
        earth.name = "  Earth  ".to_string();
        repo.insert_many(vec![earth]).await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all[0].name, "Earth");
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let repo = LocalRepository::new();
        repo.insert_many(vec![
            body("Mercury", 60.0),
            body("Earth", 120.0),
            body("Mars", 160.0),
        ])
        .await
        .unwrap();

        let hits = repo.find_by_name_substring("mer").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Mercury");

        let hits = repo.find_by_name_substring("EARTH").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Earth");

        let hits = repo.find_by_name_substring("ar").await.unwrap();
        let names: Vec<&str> = hits.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Earth", "Mars"]);
    }

    #[tokio::test]
    async fn test_search_no_match_is_empty_not_error() {
        let repo = LocalRepository::new();
        repo.insert_many(vec![body("Earth", 120.0)]).await.unwrap();
        let hits = repo.find_by_name_substring("xyz").await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_search_empty_text_is_error() {
        let repo = LocalRepository::new();
        let err = repo.find_by_name_substring("").await.unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_bounds_validation() {
        let repo = LocalRepository::new();

        let mut tiny = body("Speck", 10.0);
        tiny.radius = 0.5;
        assert!(repo.insert_many(vec![tiny]).await.is_err());

        let mut negative = body("Retro", 10.0);
        negative.orbital_speed = -0.1;
        assert!(repo.insert_many(vec![negative]).await.is_err());

        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
