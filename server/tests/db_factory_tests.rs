//! Tests for repository selection and configuration loading.

mod support;

use shareit_server::db::{FullRepository, RepositoryConfig, RepositoryFactory, RepositoryType};
use support::with_scoped_env;

#[test]
fn test_repository_type_parsing() {
    assert_eq!("local".parse::<RepositoryType>(), Ok(RepositoryType::Local));
    assert_eq!(
        "postgres".parse::<RepositoryType>(),
        Ok(RepositoryType::Postgres)
    );
    assert_eq!("PG".parse::<RepositoryType>(), Ok(RepositoryType::Postgres));
    assert!("mongodb".parse::<RepositoryType>().is_err());
}

#[test]
fn test_repository_type_from_env() {
    with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
        },
    );

    // Without an explicit type, a database URL selects Postgres.
    with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", Some("postgres://localhost/shareit")),
            ("PG_DATABASE_URL", None),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Postgres);
        },
    );

    with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
        },
    );

    // Unknown explicit values fall back to Local.
    with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("mongodb")),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
        },
    );
}

#[tokio::test]
async fn test_local_factory_produces_working_repository() {
    let repo = RepositoryFactory::create_local();
    assert!(repo.health_check().await.unwrap());
}

#[tokio::test]
async fn test_create_with_local_type() {
    let repo = RepositoryFactory::create(RepositoryType::Local, None).unwrap();
    assert!(repo.health_check().await.unwrap());
}

#[test]
fn test_repository_config_from_file() {
    let dir = std::env::temp_dir().join("shareit-config-test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("repository.toml");
    std::fs::write(
        &path,
        r#"
[repository]
type = "local"
"#,
    )
    .unwrap();

    let config = RepositoryConfig::from_file(&path).unwrap();
    assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_repository_config_missing_file() {
    let result = RepositoryConfig::from_file("/nonexistent/repository.toml");
    assert!(result.is_err());
}
