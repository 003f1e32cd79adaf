//! Schedule repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::schedule::{CreateScheduleEventRequest, ScheduleEvent, UpdateScheduleEventRequest};
use crate::utils::errors::ThreadlineError;

const EVENT_COLUMNS: &str = "id, camp_id, title, location, starts_at, ends_at, staff_lead_id, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a schedule event for a camp
    pub async fn create(
        &self,
        camp_id: i64,
        request: CreateScheduleEventRequest,
    ) -> Result<ScheduleEvent, ThreadlineError> {
        let event = sqlx::query_as::<_, ScheduleEvent>(
            r#"
            INSERT INTO schedule_events (camp_id, title, location, starts_at, ends_at, staff_lead_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, camp_id, title, location, starts_at, ends_at, staff_lead_id, created_at, updated_at
            "#,
        )
        .bind(camp_id)
        .bind(request.title)
        .bind(request.location)
        .bind(request.starts_at)
        .bind(request.ends_at)
        .bind(request.staff_lead_id)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find schedule event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<ScheduleEvent>, ThreadlineError> {
        let event = sqlx::query_as::<_, ScheduleEvent>(&format!(
            "SELECT {} FROM schedule_events WHERE id = $1",
            EVENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Update schedule event
    pub async fn update(
        &self,
        id: i64,
        request: UpdateScheduleEventRequest,
    ) -> Result<ScheduleEvent, ThreadlineError> {
        let event = sqlx::query_as::<_, ScheduleEvent>(
            r#"
            UPDATE schedule_events
            SET title = COALESCE($2, title),
                location = COALESCE($3, location),
                starts_at = COALESCE($4, starts_at),
                ends_at = COALESCE($5, ends_at),
                staff_lead_id = COALESCE($6, staff_lead_id),
                updated_at = $7
            WHERE id = $1
            RETURNING id, camp_id, title, location, starts_at, ends_at, staff_lead_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.title)
        .bind(request.location)
        .bind(request.starts_at)
        .bind(request.ends_at)
        .bind(request.staff_lead_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Delete schedule event
    pub async fn delete(&self, id: i64) -> Result<(), ThreadlineError> {
        sqlx::query("DELETE FROM schedule_events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List a camp's schedule in day order
    pub async fn list_for_camp(&self, camp_id: i64) -> Result<Vec<ScheduleEvent>, ThreadlineError> {
        let events = sqlx::query_as::<_, ScheduleEvent>(&format!(
            "SELECT {} FROM schedule_events WHERE camp_id = $1 ORDER BY starts_at ASC",
            EVENT_COLUMNS
        ))
        .bind(camp_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }
}
