//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository
//! instances based on runtime configuration.

use std::str::FromStr;
use std::sync::Arc;

use super::repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
use super::repositories::{PostgresConfig, PostgresRepository};
use super::repository::{BodyRepository, RepositoryError, RepositoryResult};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Postgres + Diesel implementation
    Postgres,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variables.
    ///
    /// Reads `REPOSITORY_TYPE` when set. Otherwise a present `DATABASE_URL`
    /// selects Postgres; its absence degrades to the in-memory store, which
    /// is a warning rather than an error (the catalog then lives only for
    /// the process lifetime).
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("DATABASE_URL").is_ok() {
            Self::Postgres
        } else {
            Self::Local
        }
    }
}

/// Repository factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Returns
    /// * `Ok(Arc<dyn BodyRepository>)` - Repository instance
    /// * `Err(RepositoryError)` - If creation fails; for Postgres this
    ///   includes an unreachable database, which callers treat as fatal
    pub fn create(repo_type: RepositoryType) -> RepositoryResult<Arc<dyn BodyRepository>> {
        match repo_type {
            RepositoryType::Postgres => {
                #[cfg(feature = "postgres-repo")]
                {
                    let config = PostgresConfig::from_env()
                        .map_err(RepositoryError::configuration)?;
                    Ok(Arc::new(PostgresRepository::new(config)?) as Arc<dyn BodyRepository>)
                }
                #[cfg(not(feature = "postgres-repo"))]
                {
                    Err(RepositoryError::configuration(
                        "Postgres repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn BodyRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create a repository from environment configuration.
    ///
    /// Logs a warning when no database is configured and the process falls
    /// back to the ephemeral in-memory store.
    pub fn from_env() -> RepositoryResult<Arc<dyn BodyRepository>> {
        let repo_type = RepositoryType::from_env();
        if repo_type == RepositoryType::Local && std::env::var("DATABASE_URL").is_err() {
            log::warn!(
                "DATABASE_URL is not set; using the in-memory store, catalog will not persist"
            );
        }
        Self::create(repo_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_type_parsing() {
        assert_eq!("local".parse::<RepositoryType>(), Ok(RepositoryType::Local));
        assert_eq!("pg".parse::<RepositoryType>(), Ok(RepositoryType::Postgres));
        assert_eq!(
            "Postgres".parse::<RepositoryType>(),
            Ok(RepositoryType::Postgres)
        );
        assert!("mongo".parse::<RepositoryType>().is_err());
    }

    #[test]
    fn test_create_local() {
        let _repo = RepositoryFactory::create_local();
    }
}
