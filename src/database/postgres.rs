use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::database::{ApplicationStore, GreetingStore};
use crate::error::{Error, Result};
use crate::models::application::{
    Application, ApplicationChanges, ApplicationStatus, NewApplication,
};
use crate::models::hello_world::HelloWorld;

const APPLICATION_COLUMNS: &str = "id, candidate_name, candidate_email, candidate_full_name, position, cv_filename, cover_letter, status, notes, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ApplicationRow {
    id: i32,
    candidate_name: String,
    candidate_email: String,
    candidate_full_name: String,
    position: String,
    cv_filename: Option<String>,
    cover_letter: Option<String>,
    status: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = Error;

    fn try_from(row: ApplicationRow) -> Result<Self> {
        let status = row
            .status
            .parse::<ApplicationStatus>()
            .map_err(|e| Error::Internal(format!("application {}: {}", row.id, e)))?;

        Ok(Self {
            id: row.id,
            candidate_name: row.candidate_name,
            candidate_email: row.candidate_email,
            candidate_full_name: row.candidate_full_name,
            position: row.position,
            cv_filename: row.cv_filename,
            cover_letter: row.cover_letter,
            status,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_applications(rows: Vec<ApplicationRow>) -> Result<Vec<Application>> {
    rows.into_iter().map(Application::try_from).collect()
}

#[async_trait]
impl ApplicationStore for PgStore {
    async fn insert(&self, application: NewApplication) -> Result<Application> {
        let query = format!(
            r#"
            INSERT INTO applications (
                candidate_name, candidate_email, candidate_full_name, position,
                cv_filename, cover_letter, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        );

        let row = sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(application.candidate_name)
            .bind(application.candidate_email)
            .bind(application.candidate_full_name)
            .bind(application.position)
            .bind(application.cv_filename)
            .bind(application.cover_letter)
            .bind(ApplicationStatus::default().as_str())
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }

    async fn list_all(&self) -> Result<Vec<Application>> {
        let query = format!(
            "SELECT {} FROM applications ORDER BY created_at DESC, id DESC",
            APPLICATION_COLUMNS
        );
        let rows = sqlx::query_as::<_, ApplicationRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        into_applications(rows)
    }

    async fn list_by_email(&self, email: &str) -> Result<Vec<Application>> {
        let query = format!(
            "SELECT {} FROM applications WHERE candidate_email = $1 ORDER BY created_at DESC, id DESC",
            APPLICATION_COLUMNS
        );
        let rows = sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(email)
            .fetch_all(&self.pool)
            .await?;
        into_applications(rows)
    }

    async fn find(&self, id: i32) -> Result<Option<Application>> {
        let query = format!("SELECT {} FROM applications WHERE id = $1", APPLICATION_COLUMNS);
        let row = sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Application::try_from).transpose()
    }

    async fn update(&self, id: i32, changes: ApplicationChanges) -> Result<Option<Application>> {
        // updated_at must move forward even when two writes share a clock tick.
        let query = format!(
            r#"
            UPDATE applications
            SET
                status = COALESCE($2, status),
                notes = COALESCE($3, notes),
                updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond')
            WHERE id = $1
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        );

        let row = sqlx::query_as::<_, ApplicationRow>(&query)
            .bind(id)
            .bind(changes.status.map(ApplicationStatus::as_str))
            .bind(changes.notes)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Application::try_from).transpose()
    }

    async fn count_by_status(&self) -> Result<Vec<(ApplicationStatus, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT status, COUNT(*) AS count
            FROM applications
            GROUP BY status
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(status, count)| {
                status
                    .parse::<ApplicationStatus>()
                    .map(|status| (status, count))
                    .map_err(|e| Error::Internal(e.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl GreetingStore for PgStore {
    async fn greeting(&self) -> Result<Option<String>> {
        let row = sqlx::query_as::<_, HelloWorld>("SELECT id, message FROM hello_world WHERE id = $1")
            .bind(1_i32)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|row| row.message))
    }
}
