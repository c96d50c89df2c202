#[cfg(test)]
mod tests {
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::BodyRepository;
    use crate::db::{seed, services};

    #[tokio::test]
    async fn test_seed_populates_empty_store() {
        let repo = LocalRepository::new();
        let initial = seed::initial_bodies().unwrap();
        let expected = initial.len();

        let inserted = services::seed_if_empty(&repo, initial).await.unwrap();
        assert_eq!(inserted, expected);
        assert_eq!(repo.count().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let repo = LocalRepository::new();
        services::seed_if_empty(&repo, seed::initial_bodies().unwrap())
            .await
            .unwrap();
        let count_after_first = repo.count().await.unwrap();

        let inserted = services::seed_if_empty(&repo, seed::initial_bodies().unwrap())
            .await
            .unwrap();
        assert_eq!(inserted, 0);
        assert_eq!(repo.count().await.unwrap(), count_after_first);
    }

    #[tokio::test]
    async fn test_seeded_catalog_starts_with_the_sun() {
        let repo = LocalRepository::new();
        services::seed_if_empty(&repo, seed::initial_bodies().unwrap())
            .await
            .unwrap();

        let all = services::list_bodies(&repo).await.unwrap();
        assert_eq!(all[0].name, "Sun");
        assert!(all[0].is_central());
        // Canonical order is ascending orbital radius.
        for pair in all.windows(2) {
            assert!(pair[0].orbital_radius <= pair[1].orbital_radius);
        }
    }

    #[tokio::test]
    async fn test_search_service_passes_through_matches() {
        let repo = LocalRepository::new();
        services::seed_if_empty(&repo, seed::initial_bodies().unwrap())
            .await
            .unwrap();

        let hits = services::search_bodies(&repo, "mer").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Mercury");

        let none = services::search_bodies(&repo, "xyz").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_health_check_local() {
        let repo = LocalRepository::new();
        assert!(services::health_check(&repo).await.unwrap());
    }
}
