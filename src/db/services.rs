//! Service layer for catalog business logic.
//!
//! High-level functions that work with any repository implementation. The
//! HTTP handlers and the server binary call these rather than the repository
//! trait directly.

use crate::api::{CelestialBody, NewCelestialBody};
use crate::db::repository::{BodyRepository, RepositoryResult};

/// Fetch the whole catalog in canonical order.
pub async fn list_bodies(repo: &dyn BodyRepository) -> RepositoryResult<Vec<CelestialBody>> {
    repo.list_all().await
}

/// Case-insensitive, unanchored substring search by name.
pub async fn search_bodies(
    repo: &dyn BodyRepository,
    text: &str,
) -> RepositoryResult<Vec<CelestialBody>> {
    repo.find_by_name_substring(text).await
}

/// Seed the store with the fixed dataset, only when it is empty.
///
/// Idempotent: invoking it against a non-empty store changes nothing and
/// returns 0. Never overwrites or duplicates existing data.
pub async fn seed_if_empty(
    repo: &dyn BodyRepository,
    initial: Vec<NewCelestialBody>,
) -> RepositoryResult<usize> {
    let existing = repo.count().await?;
    if existing > 0 {
        log::info!(
            "Store already contains {} bodies, skipping seeding",
            existing
        );
        return Ok(0);
    }

    let inserted = repo.insert_many(initial).await?;
    log::info!("Seeded {} bodies into an empty store", inserted);
    Ok(inserted)
}

/// Check that the storage backend is reachable.
pub async fn health_check(repo: &dyn BodyRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}
