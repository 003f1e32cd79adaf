//! Research note repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::research::{CreateResearchNoteRequest, ResearchNote, UpdateResearchNoteRequest};
use crate::utils::errors::ThreadlineError;

const NOTE_COLUMNS: &str = "id, kind, title, supplier, unit_cost, notes, sample_ordered, created_by, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct ResearchRepository {
    pool: PgPool,
}

impl ResearchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a research note
    pub async fn create(
        &self,
        request: CreateResearchNoteRequest,
        created_by: Option<i64>,
    ) -> Result<ResearchNote, ThreadlineError> {
        let note = sqlx::query_as::<_, ResearchNote>(
            r#"
            INSERT INTO research_notes (kind, title, supplier, unit_cost, notes, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, kind, title, supplier, unit_cost, notes, sample_ordered, created_by, created_at, updated_at
            "#,
        )
        .bind(request.kind)
        .bind(request.title)
        .bind(request.supplier)
        .bind(request.unit_cost)
        .bind(request.notes)
        .bind(created_by)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(note)
    }

    /// Find research note by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<ResearchNote>, ThreadlineError> {
        let note = sqlx::query_as::<_, ResearchNote>(&format!(
            "SELECT {} FROM research_notes WHERE id = $1",
            NOTE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(note)
    }

    /// Update research note
    pub async fn update(
        &self,
        id: i64,
        request: UpdateResearchNoteRequest,
    ) -> Result<ResearchNote, ThreadlineError> {
        let note = sqlx::query_as::<_, ResearchNote>(
            r#"
            UPDATE research_notes
            SET title = COALESCE($2, title),
                supplier = COALESCE($3, supplier),
                unit_cost = COALESCE($4, unit_cost),
                notes = COALESCE($5, notes),
                sample_ordered = COALESCE($6, sample_ordered),
                updated_at = $7
            WHERE id = $1
            RETURNING id, kind, title, supplier, unit_cost, notes, sample_ordered, created_by, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.title)
        .bind(request.supplier)
        .bind(request.unit_cost)
        .bind(request.notes)
        .bind(request.sample_ordered)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(note)
    }

    /// Delete research note
    pub async fn delete(&self, id: i64) -> Result<(), ThreadlineError> {
        sqlx::query("DELETE FROM research_notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List research notes filtered by kind, newest first
    pub async fn list(
        &self,
        kind: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ResearchNote>, ThreadlineError> {
        let notes = sqlx::query_as::<_, ResearchNote>(&format!(
            r#"
            SELECT {} FROM research_notes
            WHERE ($1::text IS NULL OR kind = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            NOTE_COLUMNS
        ))
        .bind(kind)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }
}
