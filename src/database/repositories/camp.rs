//! Camp and registration repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::camp::{Camp, CreateCampRequest, Registration, UpdateCampRequest};
use crate::utils::errors::ThreadlineError;

const CAMP_COLUMNS: &str = "id, name, location, start_date, end_date, capacity, description, is_active, created_at, updated_at";
const REGISTRATION_COLUMNS: &str = "id, camp_id, participant_id, payment_status, confirmation_code, status, registered_at";

#[derive(Debug, Clone)]
pub struct CampRepository {
    pool: PgPool,
}

impl CampRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new camp
    pub async fn create(&self, request: CreateCampRequest) -> Result<Camp, ThreadlineError> {
        let camp = sqlx::query_as::<_, Camp>(
            r#"
            INSERT INTO camps (name, location, start_date, end_date, capacity, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, location, start_date, end_date, capacity, description, is_active, created_at, updated_at
            "#,
        )
        .bind(request.name)
        .bind(request.location)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.capacity)
        .bind(request.description)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(camp)
    }

    /// Find camp by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Camp>, ThreadlineError> {
        let camp = sqlx::query_as::<_, Camp>(&format!(
            "SELECT {} FROM camps WHERE id = $1",
            CAMP_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(camp)
    }

    /// Update camp
    pub async fn update(&self, id: i64, request: UpdateCampRequest) -> Result<Camp, ThreadlineError> {
        let camp = sqlx::query_as::<_, Camp>(
            r#"
            UPDATE camps
            SET name = COALESCE($2, name),
                location = COALESCE($3, location),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                capacity = COALESCE($6, capacity),
                description = COALESCE($7, description),
                is_active = COALESCE($8, is_active),
                updated_at = $9
            WHERE id = $1
            RETURNING id, name, location, start_date, end_date, capacity, description, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.name)
        .bind(request.location)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.capacity)
        .bind(request.description)
        .bind(request.is_active)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(camp)
    }

    /// Delete camp
    pub async fn delete(&self, id: i64) -> Result<(), ThreadlineError> {
        sqlx::query("DELETE FROM camps WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List camps, soonest first
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Camp>, ThreadlineError> {
        let camps = sqlx::query_as::<_, Camp>(&format!(
            "SELECT {} FROM camps ORDER BY start_date ASC LIMIT $1 OFFSET $2",
            CAMP_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(camps)
    }

    /// Count registrations currently holding a seat
    pub async fn count_active_registrations(&self, camp_id: i64) -> Result<i64, ThreadlineError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations WHERE camp_id = $1 AND status = 'registered'",
        )
        .bind(camp_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Whether a participant already holds a seat in the camp
    pub async fn is_registered(&self, camp_id: i64, participant_id: i64) -> Result<bool, ThreadlineError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations WHERE camp_id = $1 AND participant_id = $2 AND status = 'registered'",
        )
        .bind(camp_id)
        .bind(participant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// Create a registration
    pub async fn create_registration(
        &self,
        camp_id: i64,
        participant_id: i64,
        payment_status: &str,
        confirmation_code: &str,
    ) -> Result<Registration, ThreadlineError> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (camp_id, participant_id, payment_status, confirmation_code, registered_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, camp_id, participant_id, payment_status, confirmation_code, status, registered_at
            "#,
        )
        .bind(camp_id)
        .bind(participant_id)
        .bind(payment_status)
        .bind(confirmation_code)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Find a registration by ID
    pub async fn find_registration(&self, id: i64) -> Result<Option<Registration>, ThreadlineError> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {} FROM registrations WHERE id = $1",
            REGISTRATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Update a registration's payment status
    pub async fn set_registration_payment(
        &self,
        id: i64,
        payment_status: &str,
    ) -> Result<Registration, ThreadlineError> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            UPDATE registrations
            SET payment_status = $2
            WHERE id = $1
            RETURNING id, camp_id, participant_id, payment_status, confirmation_code, status, registered_at
            "#,
        )
        .bind(id)
        .bind(payment_status)
        .fetch_one(&self.pool)
        .await?;

        Ok(registration)
    }

    /// Cancel a registration, freeing its seat
    pub async fn cancel_registration(&self, id: i64) -> Result<Registration, ThreadlineError> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            UPDATE registrations
            SET status = 'cancelled'
            WHERE id = $1
            RETURNING id, camp_id, participant_id, payment_status, confirmation_code, status, registered_at
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(registration)
    }

    /// List registrations for a camp
    pub async fn list_registrations(&self, camp_id: i64) -> Result<Vec<Registration>, ThreadlineError> {
        let registrations = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {} FROM registrations WHERE camp_id = $1 ORDER BY registered_at ASC",
            REGISTRATION_COLUMNS
        ))
        .bind(camp_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }
}
