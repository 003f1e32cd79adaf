//! Roster service implementation
//!
//! Participants scoped to camps, the staff register, and per-camp staff
//! assignments.

use tracing::{debug, info};

use crate::database::repositories::{CampRepository, RosterRepository};
use crate::models::roster::{
    CampStaff, CreateParticipantRequest, CreateStaffRequest, Participant, Staff,
    UpdateParticipantRequest, UpdateStaffRequest,
};
use crate::utils::errors::{Result, ThreadlineError};
use crate::utils::helpers;

/// Roster service for participants and staff
#[derive(Debug, Clone)]
pub struct RosterService {
    roster_repository: RosterRepository,
    camp_repository: CampRepository,
}

impl RosterService {
    /// Create a new RosterService instance
    pub fn new(roster_repository: RosterRepository, camp_repository: CampRepository) -> Self {
        Self {
            roster_repository,
            camp_repository,
        }
    }

    async fn require_camp(&self, camp_id: i64) -> Result<()> {
        self.camp_repository
            .find_by_id(camp_id)
            .await?
            .ok_or(ThreadlineError::CampNotFound { camp_id })?;
        Ok(())
    }

    /// Create a participant scoped to a camp
    pub async fn create_participant(
        &self,
        camp_id: i64,
        request: CreateParticipantRequest,
    ) -> Result<Participant> {
        self.require_camp(camp_id).await?;
        helpers::require_field(&request.first_name, "first_name")?;
        helpers::require_field(&request.last_name, "last_name")?;
        if let Some(ref phone) = request.guardian_phone {
            if !helpers::is_valid_phone(phone) {
                return Err(ThreadlineError::InvalidInput(format!(
                    "Invalid guardian phone: {}",
                    phone
                )));
            }
        }

        let participant = self.roster_repository.create_participant(camp_id, request).await?;
        info!(
            camp_id = camp_id,
            participant_id = participant.id,
            "Participant created"
        );
        Ok(participant)
    }

    /// Get participant by ID
    pub async fn get_participant(&self, participant_id: i64) -> Result<Participant> {
        debug!(participant_id = participant_id, "Getting participant by ID");
        self.roster_repository
            .find_participant(participant_id)
            .await?
            .ok_or(ThreadlineError::NotFound {
                entity: "Participant",
                id: participant_id,
            })
    }

    /// Update a participant
    pub async fn update_participant(
        &self,
        participant_id: i64,
        request: UpdateParticipantRequest,
    ) -> Result<Participant> {
        self.get_participant(participant_id).await?;

        if let Some(ref phone) = request.guardian_phone {
            if !helpers::is_valid_phone(phone) {
                return Err(ThreadlineError::InvalidInput(format!(
                    "Invalid guardian phone: {}",
                    phone
                )));
            }
        }

        let participant = self
            .roster_repository
            .update_participant(participant_id, request)
            .await?;
        info!(participant_id = participant_id, "Participant updated");
        Ok(participant)
    }

    /// Delete a participant
    pub async fn delete_participant(&self, participant_id: i64) -> Result<()> {
        self.get_participant(participant_id).await?;
        self.roster_repository.delete_participant(participant_id).await?;
        info!(participant_id = participant_id, "Participant deleted");
        Ok(())
    }

    /// List a camp's participants
    pub async fn list_participants(&self, camp_id: i64) -> Result<Vec<Participant>> {
        self.require_camp(camp_id).await?;
        self.roster_repository.list_participants(camp_id).await
    }

    /// Create a staff member
    pub async fn create_staff(&self, request: CreateStaffRequest) -> Result<Staff> {
        helpers::require_field(&request.first_name, "first_name")?;
        helpers::require_field(&request.last_name, "last_name")?;
        helpers::require_field(&request.role_title, "role_title")?;
        if let Some(ref email) = request.email {
            if !helpers::is_valid_email(email) {
                return Err(ThreadlineError::InvalidInput(format!(
                    "Invalid email: {}",
                    email
                )));
            }
        }

        let staff = self.roster_repository.create_staff(request).await?;
        info!(staff_id = staff.id, "Staff member created");
        Ok(staff)
    }

    /// Get staff by ID
    pub async fn get_staff(&self, staff_id: i64) -> Result<Staff> {
        self.roster_repository
            .find_staff(staff_id)
            .await?
            .ok_or(ThreadlineError::NotFound {
                entity: "Staff",
                id: staff_id,
            })
    }

    /// Update a staff member
    pub async fn update_staff(&self, staff_id: i64, request: UpdateStaffRequest) -> Result<Staff> {
        self.get_staff(staff_id).await?;

        if let Some(ref email) = request.email {
            if !helpers::is_valid_email(email) {
                return Err(ThreadlineError::InvalidInput(format!(
                    "Invalid email: {}",
                    email
                )));
            }
        }

        let staff = self.roster_repository.update_staff(staff_id, request).await?;
        info!(staff_id = staff_id, "Staff member updated");
        Ok(staff)
    }

    /// Delete a staff member
    pub async fn delete_staff(&self, staff_id: i64) -> Result<()> {
        self.get_staff(staff_id).await?;
        self.roster_repository.delete_staff(staff_id).await?;
        info!(staff_id = staff_id, "Staff member deleted");
        Ok(())
    }

    /// List staff with pagination
    pub async fn list_staff(&self, page: i64, page_size: i64) -> Result<Vec<Staff>> {
        let offset = helpers::calculate_offset(page, page_size);
        self.roster_repository.list_staff(page_size, offset).await
    }

    /// Assign a staff member to a camp with a duty
    pub async fn assign_staff(
        &self,
        camp_id: i64,
        staff_id: i64,
        duty: Option<String>,
    ) -> Result<CampStaff> {
        self.require_camp(camp_id).await?;
        self.get_staff(staff_id).await?;

        if self.roster_repository.is_assigned(camp_id, staff_id).await? {
            return Err(ThreadlineError::InvalidInput(format!(
                "Staff {} is already assigned to camp {}",
                staff_id, camp_id
            )));
        }

        let assignment = self.roster_repository.assign_staff(camp_id, staff_id, duty).await?;
        info!(camp_id = camp_id, staff_id = staff_id, "Staff assigned to camp");
        Ok(assignment)
    }

    /// List staff assignments for a camp
    pub async fn list_camp_staff(&self, camp_id: i64) -> Result<Vec<CampStaff>> {
        self.require_camp(camp_id).await?;
        self.roster_repository.list_camp_staff(camp_id).await
    }

    /// Remove a staff assignment from a camp
    pub async fn remove_camp_staff(&self, camp_id: i64, staff_id: i64) -> Result<()> {
        self.require_camp(camp_id).await?;
        self.roster_repository.remove_camp_staff(camp_id, staff_id).await?;
        info!(camp_id = camp_id, staff_id = staff_id, "Staff assignment removed");
        Ok(())
    }
}
