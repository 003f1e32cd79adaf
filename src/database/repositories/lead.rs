//! Lead repository implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::lead::{CreateLeadRequest, Lead, UpdateLeadRequest};
use crate::utils::errors::ThreadlineError;

const LEAD_COLUMNS: &str = "id, company_name, contact_name, contact_email, contact_phone, source, status, assigned_to, contacted, items_confirmed, submitted_to_design, submitted_at, notes, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct LeadRepository {
    pool: PgPool,
}

impl LeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new lead
    pub async fn create(&self, request: CreateLeadRequest) -> Result<Lead, ThreadlineError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO leads (company_name, contact_name, contact_email, contact_phone, source, assigned_to, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, company_name, contact_name, contact_email, contact_phone, source, status, assigned_to, contacted, items_confirmed, submitted_to_design, submitted_at, notes, created_at, updated_at
            "#,
        )
        .bind(request.company_name)
        .bind(request.contact_name)
        .bind(request.contact_email)
        .bind(request.contact_phone)
        .bind(request.source)
        .bind(request.assigned_to)
        .bind(request.notes)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(lead)
    }

    /// Find lead by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Lead>, ThreadlineError> {
        let lead = sqlx::query_as::<_, Lead>(&format!(
            "SELECT {} FROM leads WHERE id = $1",
            LEAD_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lead)
    }

    /// Update lead contact fields and status
    pub async fn update(&self, id: i64, request: UpdateLeadRequest) -> Result<Lead, ThreadlineError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            UPDATE leads
            SET company_name = COALESCE($2, company_name),
                contact_name = COALESCE($3, contact_name),
                contact_email = COALESCE($4, contact_email),
                contact_phone = COALESCE($5, contact_phone),
                source = COALESCE($6, source),
                status = COALESCE($7, status),
                assigned_to = COALESCE($8, assigned_to),
                notes = COALESCE($9, notes),
                updated_at = $10
            WHERE id = $1
            RETURNING id, company_name, contact_name, contact_email, contact_phone, source, status, assigned_to, contacted, items_confirmed, submitted_to_design, submitted_at, notes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.company_name)
        .bind(request.contact_name)
        .bind(request.contact_email)
        .bind(request.contact_phone)
        .bind(request.source)
        .bind(request.status)
        .bind(request.assigned_to)
        .bind(request.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(lead)
    }

    /// Persist the resolved progress flags for a lead
    pub async fn set_progress(
        &self,
        id: i64,
        contacted: bool,
        items_confirmed: bool,
        submitted_to_design: bool,
        submitted_at: Option<DateTime<Utc>>,
        status: &str,
    ) -> Result<Lead, ThreadlineError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            UPDATE leads
            SET contacted = $2,
                items_confirmed = $3,
                submitted_to_design = $4,
                submitted_at = $5,
                status = $6,
                updated_at = $7
            WHERE id = $1
            RETURNING id, company_name, contact_name, contact_email, contact_phone, source, status, assigned_to, contacted, items_confirmed, submitted_to_design, submitted_at, notes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(contacted)
        .bind(items_confirmed)
        .bind(submitted_to_design)
        .bind(submitted_at)
        .bind(status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(lead)
    }

    /// Delete lead
    pub async fn delete(&self, id: i64) -> Result<(), ThreadlineError> {
        sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List leads filtered by status and assignee, newest first
    pub async fn list(
        &self,
        status: Option<&str>,
        assigned_to: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Lead>, ThreadlineError> {
        let leads = sqlx::query_as::<_, Lead>(&format!(
            r#"
            SELECT {} FROM leads
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::bigint IS NULL OR assigned_to = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
            LEAD_COLUMNS
        ))
        .bind(status)
        .bind(assigned_to)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(leads)
    }

    /// Count total leads
    pub async fn count(&self) -> Result<i64, ThreadlineError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM leads")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
