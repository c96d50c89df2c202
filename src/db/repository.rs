//! Repository trait for catalog storage backends.
//!
//! The catalog is a single flat collection of [`CelestialBody`] records with
//! a unique-name constraint. Records are inserted once at startup by the
//! seeding service and never updated or deleted afterwards.

use async_trait::async_trait;

use crate::api::{CelestialBody, NewCelestialBody};

pub use super::error::{ErrorContext, RepositoryError, RepositoryResult};

/// Repository trait for celestial-body storage.
///
/// All read operations return records in the catalog's canonical order:
/// ascending `orbital_radius`, ties broken by name. Slice indices exposed by
/// the HTTP layer address this order.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait BodyRepository: Send + Sync {
    /// Fetch every body in canonical order.
    async fn list_all(&self) -> RepositoryResult<Vec<CelestialBody>>;

    /// Fetch bodies whose name contains `text`, case-insensitively and
    /// unanchored, in canonical order.
    ///
    /// # Returns
    /// * `Ok(Vec<CelestialBody>)` - Matching bodies; empty on no match
    /// * `Err(RepositoryError::ValidationError)` - If `text` is empty
    async fn find_by_name_substring(&self, text: &str) -> RepositoryResult<Vec<CelestialBody>>;

    /// Number of bodies currently stored.
    async fn count(&self) -> RepositoryResult<usize>;

    /// Insert a batch of bodies, assigning ids.
    ///
    /// Names are trimmed before insertion. Rejects records violating the
    /// unique-name constraint or the numeric lower bounds
    /// (`radius >= 1`, `orbital_radius >= 0`, `orbital_speed >= 0`).
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records inserted
    async fn insert_many(&self, bodies: Vec<NewCelestialBody>) -> RepositoryResult<usize>;

    /// Check that the underlying storage is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}

/// Validate the numeric lower bounds of a record before insertion.
///
/// Shared by every backend so the constraint set cannot drift between them.
pub fn validate_new_body(body: &NewCelestialBody) -> RepositoryResult<()> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(RepositoryError::validation_with_context(
            "Body name must not be empty",
            ErrorContext::new("insert_many"),
        ));
    }
    if body.radius < 1.0 {
        return Err(RepositoryError::validation_with_context(
            format!("Body '{}' has radius {} (minimum 1)", name, body.radius),
            ErrorContext::new("insert_many"),
        ));
    }
    if body.orbital_radius < 0.0 {
        return Err(RepositoryError::validation_with_context(
            format!(
                "Body '{}' has negative orbital radius {}",
                name, body.orbital_radius
            ),
            ErrorContext::new("insert_many"),
        ));
    }
    if body.orbital_speed < 0.0 {
        return Err(RepositoryError::validation_with_context(
            format!(
                "Body '{}' has negative orbital speed {}",
                name, body.orbital_speed
            ),
            ErrorContext::new("insert_many"),
        ));
    }
    Ok(())
}

/// Canonical catalog ordering: ascending orbital radius, then name.
///
/// Guarantees the central body (orbital radius 0) sorts first and slice
/// indices are stable across backends.
pub fn canonical_sort(bodies: &mut [CelestialBody]) {
    bodies.sort_by(|a, b| {
        a.orbital_radius
            .partial_cmp(&b.orbital_radius)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
}
