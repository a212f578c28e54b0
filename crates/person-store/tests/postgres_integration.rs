//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency. Each test
//! truncates the table, so they are serialized with `#[serial]`.

use std::sync::Arc;

use person_store::{
    DocumentId, DuplicateNames, NewPerson, PersonStore, PersonStoreExt, PostgresPersonStore,
    StoreError,
};
use serial_test::serial;
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            let temp_pool = PgPool::connect(&connection_string).await.unwrap();
            PostgresPersonStore::new(temp_pool.clone())
                .run_migrations()
                .await
                .unwrap();
            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool and an empty table
async fn get_test_store() -> PostgresPersonStore {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    sqlx::query("TRUNCATE TABLE persons")
        .execute(&pool)
        .await
        .unwrap();

    PostgresPersonStore::new(pool)
}

#[tokio::test]
#[serial]
async fn create_and_find_person() {
    let store = get_test_store().await;

    let created = store
        .create(NewPerson::new("Ann", "123"), DuplicateNames::Reject)
        .await
        .unwrap();

    let found = store.find_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(found, created);
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
#[serial]
async fn find_unknown_id_returns_none() {
    let store = get_test_store().await;
    let found = store.find_by_id(&DocumentId::new()).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
#[serial]
async fn malformed_id_is_rejected_before_lookup() {
    let result = PostgresPersonStore::parse_id("not-a-uuid");
    assert!(matches!(result, Err(StoreError::MalformedId(_))));
}

#[tokio::test]
#[serial]
async fn list_returns_insertion_order() {
    let store = get_test_store().await;
    for name in ["Ann", "Bob", "Cid"] {
        store
            .create(NewPerson::new(name, "1"), DuplicateNames::Reject)
            .await
            .unwrap();
    }

    let names: Vec<_> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["Ann", "Bob", "Cid"]);
}

#[tokio::test]
#[serial]
async fn duplicate_name_rejected() {
    let store = get_test_store().await;
    store
        .create(NewPerson::new("Ann", "123"), DuplicateNames::Reject)
        .await
        .unwrap();

    let result = store
        .create(NewPerson::new("Ann", "456"), DuplicateNames::Reject)
        .await;
    assert!(matches!(result, Err(StoreError::DuplicateName(_))));
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
#[serial]
async fn duplicate_name_allowed_when_configured() {
    let store = get_test_store().await;
    store
        .create(NewPerson::new("Ann", "123"), DuplicateNames::Allow)
        .await
        .unwrap();
    store
        .create(NewPerson::new("Ann", "456"), DuplicateNames::Allow)
        .await
        .unwrap();

    assert_eq!(store.count().await.unwrap(), 2);
}

#[tokio::test]
#[serial]
async fn empty_field_rejected_by_constraint() {
    let store = get_test_store().await;

    let result = store
        .create(NewPerson::new("Ann", ""), DuplicateNames::Allow)
        .await;

    match result {
        Err(StoreError::Validation(msg)) => {
            assert_eq!(msg, "Person validation failed: number: Path `number` is required.")
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
#[serial]
async fn update_round_trip() {
    let store = get_test_store().await;
    let created = store
        .create(NewPerson::new("Ann", "123"), DuplicateNames::Reject)
        .await
        .unwrap();

    let updated = store
        .update(&created.id, NewPerson::new("Anna", "999"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, created.id);

    let found = store.find_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Anna");
    assert_eq!(found.number, "999");
}

#[tokio::test]
#[serial]
async fn update_unknown_id_returns_none() {
    let store = get_test_store().await;
    let result = store
        .update(&DocumentId::new(), NewPerson::new("Ann", "1"))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
#[serial]
async fn delete_twice_succeeds() {
    let store = get_test_store().await;
    let created = store
        .create(NewPerson::new("Ann", "123"), DuplicateNames::Reject)
        .await
        .unwrap();

    store.delete_by_id(&created.id).await.unwrap();
    store.delete_by_id(&created.id).await.unwrap();

    assert!(store.list_all().await.unwrap().is_empty());
}
