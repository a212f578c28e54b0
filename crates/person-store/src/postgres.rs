use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    DocumentId, DuplicateNames, NewPerson, Person, Result, StoreError, store::PersonStore,
};

/// PostgreSQL-backed person store.
///
/// Each record is one row of the `persons` table, addressed by a UUID
/// generated on insert.
#[derive(Clone)]
pub struct PostgresPersonStore {
    pool: PgPool,
}

impl PostgresPersonStore {
    /// Creates a new PostgreSQL person store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_person(row: PgRow) -> Result<Person<DocumentId>> {
        Ok(Person {
            id: DocumentId::from_uuid(row.try_get::<Uuid, _>("id")?),
            name: row.try_get("name")?,
            number: row.try_get("number")?,
        })
    }
}

/// Translates a rejected empty-field constraint into a validation failure.
fn map_write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        let field = match db_err.constraint() {
            Some("persons_name_not_empty") => Some("name"),
            Some("persons_number_not_empty") => Some("number"),
            _ => None,
        };
        if let Some(field) = field {
            return StoreError::Validation(format!(
                "Person validation failed: {field}: Path `{field}` is required."
            ));
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl PersonStore for PostgresPersonStore {
    type Id = DocumentId;

    async fn list_all(&self) -> Result<Vec<Person<DocumentId>>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, number
            FROM persons
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_person).collect()
    }

    async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM persons")
            .fetch_one(&self.pool)
            .await?;

        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Person<DocumentId>>> {
        let row: Option<PgRow> = sqlx::query("SELECT id, name, number FROM persons WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_person).transpose()
    }

    async fn create(
        &self,
        person: NewPerson,
        names: DuplicateNames,
    ) -> Result<Person<DocumentId>> {
        let id = DocumentId::new();
        let mut tx = self.pool.begin().await?;

        let inserted = match names {
            DuplicateNames::Reject => {
                // Serialize creates per name until commit
                sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
                    .bind(&person.name)
                    .execute(&mut *tx)
                    .await?;

                sqlx::query(
                    r#"
                    INSERT INTO persons (id, name, number)
                    SELECT $1, $2, $3
                    WHERE NOT EXISTS (SELECT 1 FROM persons WHERE name = $2)
                    "#,
                )
                .bind(id.as_uuid())
                .bind(&person.name)
                .bind(&person.number)
                .execute(&mut *tx)
                .await
                .map_err(map_write_error)?
            }
            DuplicateNames::Allow => sqlx::query(
                "INSERT INTO persons (id, name, number) VALUES ($1, $2, $3)",
            )
            .bind(id.as_uuid())
            .bind(&person.name)
            .bind(&person.number)
            .execute(&mut *tx)
            .await
            .map_err(map_write_error)?,
        };

        if inserted.rows_affected() == 0 {
            return Err(StoreError::DuplicateName(person.name));
        }

        tx.commit().await?;
        Ok(person.with_id(id))
    }

    async fn update(
        &self,
        id: &DocumentId,
        person: NewPerson,
    ) -> Result<Option<Person<DocumentId>>> {
        let row: Option<PgRow> = sqlx::query(
            r#"
            UPDATE persons SET name = $2, number = $3
            WHERE id = $1
            RETURNING id, name, number
            "#,
        )
        .bind(id.as_uuid())
        .bind(&person.name)
        .bind(&person.number)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        row.map(Self::row_to_person).transpose()
    }

    async fn delete_by_id(&self, id: &DocumentId) -> Result<()> {
        sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
