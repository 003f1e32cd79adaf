//! Participant and staff roster repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::roster::{
    CampStaff, CreateParticipantRequest, CreateStaffRequest, Participant, Staff,
    UpdateParticipantRequest, UpdateStaffRequest,
};
use crate::utils::errors::ThreadlineError;

const PARTICIPANT_COLUMNS: &str = "id, camp_id, first_name, last_name, date_of_birth, guardian_name, guardian_phone, medical_notes, created_at, updated_at";
const STAFF_COLUMNS: &str = "id, first_name, last_name, role_title, email, phone, certifications, is_active, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct RosterRepository {
    pool: PgPool,
}

impl RosterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a participant scoped to a camp
    pub async fn create_participant(
        &self,
        camp_id: i64,
        request: CreateParticipantRequest,
    ) -> Result<Participant, ThreadlineError> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            INSERT INTO participants (camp_id, first_name, last_name, date_of_birth, guardian_name, guardian_phone, medical_notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, camp_id, first_name, last_name, date_of_birth, guardian_name, guardian_phone, medical_notes, created_at, updated_at
            "#,
        )
        .bind(camp_id)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.date_of_birth)
        .bind(request.guardian_name)
        .bind(request.guardian_phone)
        .bind(request.medical_notes)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(participant)
    }

    /// Find participant by ID
    pub async fn find_participant(&self, id: i64) -> Result<Option<Participant>, ThreadlineError> {
        let participant = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {} FROM participants WHERE id = $1",
            PARTICIPANT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(participant)
    }

    /// Update participant
    pub async fn update_participant(
        &self,
        id: i64,
        request: UpdateParticipantRequest,
    ) -> Result<Participant, ThreadlineError> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            UPDATE participants
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                date_of_birth = COALESCE($4, date_of_birth),
                guardian_name = COALESCE($5, guardian_name),
                guardian_phone = COALESCE($6, guardian_phone),
                medical_notes = COALESCE($7, medical_notes),
                updated_at = $8
            WHERE id = $1
            RETURNING id, camp_id, first_name, last_name, date_of_birth, guardian_name, guardian_phone, medical_notes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.date_of_birth)
        .bind(request.guardian_name)
        .bind(request.guardian_phone)
        .bind(request.medical_notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(participant)
    }

    /// Delete participant
    pub async fn delete_participant(&self, id: i64) -> Result<(), ThreadlineError> {
        sqlx::query("DELETE FROM participants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List participants for a camp, alphabetical
    pub async fn list_participants(&self, camp_id: i64) -> Result<Vec<Participant>, ThreadlineError> {
        let participants = sqlx::query_as::<_, Participant>(&format!(
            "SELECT {} FROM participants WHERE camp_id = $1 ORDER BY last_name ASC, first_name ASC",
            PARTICIPANT_COLUMNS
        ))
        .bind(camp_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(participants)
    }

    /// Create a staff member
    pub async fn create_staff(&self, request: CreateStaffRequest) -> Result<Staff, ThreadlineError> {
        let staff = sqlx::query_as::<_, Staff>(
            r#"
            INSERT INTO staff (first_name, last_name, role_title, email, phone, certifications, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, first_name, last_name, role_title, email, phone, certifications, is_active, created_at, updated_at
            "#,
        )
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.role_title)
        .bind(request.email)
        .bind(request.phone)
        .bind(request.certifications.unwrap_or_default())
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(staff)
    }

    /// Find staff by ID
    pub async fn find_staff(&self, id: i64) -> Result<Option<Staff>, ThreadlineError> {
        let staff = sqlx::query_as::<_, Staff>(&format!(
            "SELECT {} FROM staff WHERE id = $1",
            STAFF_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(staff)
    }

    /// Update staff
    pub async fn update_staff(&self, id: i64, request: UpdateStaffRequest) -> Result<Staff, ThreadlineError> {
        let staff = sqlx::query_as::<_, Staff>(
            r#"
            UPDATE staff
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                role_title = COALESCE($4, role_title),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                certifications = COALESCE($7, certifications),
                is_active = COALESCE($8, is_active),
                updated_at = $9
            WHERE id = $1
            RETURNING id, first_name, last_name, role_title, email, phone, certifications, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.role_title)
        .bind(request.email)
        .bind(request.phone)
        .bind(request.certifications)
        .bind(request.is_active)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(staff)
    }

    /// Delete staff
    pub async fn delete_staff(&self, id: i64) -> Result<(), ThreadlineError> {
        sqlx::query("DELETE FROM staff WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List staff, active first then alphabetical
    pub async fn list_staff(&self, limit: i64, offset: i64) -> Result<Vec<Staff>, ThreadlineError> {
        let staff = sqlx::query_as::<_, Staff>(&format!(
            "SELECT {} FROM staff ORDER BY is_active DESC, last_name ASC LIMIT $1 OFFSET $2",
            STAFF_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(staff)
    }

    /// Assign a staff member to a camp
    pub async fn assign_staff(
        &self,
        camp_id: i64,
        staff_id: i64,
        duty: Option<String>,
    ) -> Result<CampStaff, ThreadlineError> {
        let assignment = sqlx::query_as::<_, CampStaff>(
            r#"
            INSERT INTO camp_staff (camp_id, staff_id, duty, assigned_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, camp_id, staff_id, duty, assigned_at
            "#,
        )
        .bind(camp_id)
        .bind(staff_id)
        .bind(duty)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(assignment)
    }

    /// Whether a staff member is already assigned to the camp
    pub async fn is_assigned(&self, camp_id: i64, staff_id: i64) -> Result<bool, ThreadlineError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM camp_staff WHERE camp_id = $1 AND staff_id = $2",
        )
        .bind(camp_id)
        .bind(staff_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// List staff assignments for a camp
    pub async fn list_camp_staff(&self, camp_id: i64) -> Result<Vec<CampStaff>, ThreadlineError> {
        let assignments = sqlx::query_as::<_, CampStaff>(
            "SELECT id, camp_id, staff_id, duty, assigned_at FROM camp_staff WHERE camp_id = $1 ORDER BY assigned_at ASC",
        )
        .bind(camp_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(assignments)
    }

    /// Remove a staff assignment from a camp
    pub async fn remove_camp_staff(&self, camp_id: i64, staff_id: i64) -> Result<(), ThreadlineError> {
        sqlx::query("DELETE FROM camp_staff WHERE camp_id = $1 AND staff_id = $2")
            .bind(camp_id)
            .bind(staff_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
