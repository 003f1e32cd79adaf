//! Camp service implementation
//!
//! Camp lifecycle and registrations: date-range validation, seat capacity
//! enforcement, confirmation codes, and payment tracking.

use tracing::{debug, info, warn};

use crate::database::repositories::{CampRepository, RosterRepository};
use crate::models::camp::{
    Camp, CreateCampRequest, CreateRegistrationRequest, Registration, UpdateCampRequest,
};
use crate::models::order::PaymentStatus;
use crate::utils::errors::{Result, ThreadlineError};
use crate::utils::helpers;

/// Camp service for event and registration management
#[derive(Debug, Clone)]
pub struct CampService {
    camp_repository: CampRepository,
    roster_repository: RosterRepository,
}

impl CampService {
    /// Create a new CampService instance
    pub fn new(camp_repository: CampRepository, roster_repository: RosterRepository) -> Self {
        Self {
            camp_repository,
            roster_repository,
        }
    }

    /// Create a new camp
    pub async fn create_camp(&self, request: CreateCampRequest) -> Result<Camp> {
        helpers::require_field(&request.name, "name")?;
        helpers::require_ordered(request.start_date, request.end_date, "start_date", "end_date")?;
        if request.capacity <= 0 {
            return Err(ThreadlineError::InvalidInput(
                "Capacity must be greater than 0".to_string(),
            ));
        }

        let camp = self.camp_repository.create(request).await?;
        info!(camp_id = camp.id, name = %camp.name, "Camp created");
        Ok(camp)
    }

    /// Get camp by ID
    pub async fn get_camp(&self, camp_id: i64) -> Result<Camp> {
        debug!(camp_id = camp_id, "Getting camp by ID");
        self.camp_repository
            .find_by_id(camp_id)
            .await?
            .ok_or(ThreadlineError::CampNotFound { camp_id })
    }

    /// Update a camp, revalidating the date range
    pub async fn update_camp(&self, camp_id: i64, request: UpdateCampRequest) -> Result<Camp> {
        let camp = self.get_camp(camp_id).await?;

        let start = request.start_date.unwrap_or(camp.start_date);
        let end = request.end_date.unwrap_or(camp.end_date);
        helpers::require_ordered(start, end, "start_date", "end_date")?;

        if let Some(capacity) = request.capacity {
            if capacity <= 0 {
                return Err(ThreadlineError::InvalidInput(
                    "Capacity must be greater than 0".to_string(),
                ));
            }
        }

        let camp = self.camp_repository.update(camp_id, request).await?;
        info!(camp_id = camp_id, "Camp updated");
        Ok(camp)
    }

    /// List camps with pagination
    pub async fn list_camps(&self, page: i64, page_size: i64) -> Result<Vec<Camp>> {
        let offset = helpers::calculate_offset(page, page_size);
        self.camp_repository.list(page_size, offset).await
    }

    /// Delete a camp
    pub async fn delete_camp(&self, camp_id: i64) -> Result<()> {
        self.get_camp(camp_id).await?;
        self.camp_repository.delete(camp_id).await?;
        info!(camp_id = camp_id, "Camp deleted");
        Ok(())
    }

    /// Register a participant into a camp, enforcing capacity
    pub async fn register_participant(
        &self,
        camp_id: i64,
        request: CreateRegistrationRequest,
    ) -> Result<Registration> {
        let camp = self.get_camp(camp_id).await?;

        self.roster_repository
            .find_participant(request.participant_id)
            .await?
            .ok_or(ThreadlineError::NotFound {
                entity: "Participant",
                id: request.participant_id,
            })?;

        if self
            .camp_repository
            .is_registered(camp_id, request.participant_id)
            .await?
        {
            return Err(ThreadlineError::InvalidInput(format!(
                "Participant {} is already registered",
                request.participant_id
            )));
        }

        let taken = self.camp_repository.count_active_registrations(camp_id).await?;
        if taken >= camp.capacity as i64 {
            warn!(camp_id = camp_id, capacity = camp.capacity, "Registration rejected, camp full");
            return Err(ThreadlineError::CapacityExceeded {
                camp_id,
                capacity: camp.capacity,
            });
        }

        let payment_status = request
            .payment_status
            .as_deref()
            .unwrap_or(PaymentStatus::Unpaid.as_str());
        if PaymentStatus::parse(payment_status).is_none() {
            return Err(ThreadlineError::InvalidInput(format!(
                "Unknown payment status: {}",
                payment_status
            )));
        }

        let code = helpers::generate_confirmation_code(8);
        let registration = self
            .camp_repository
            .create_registration(camp_id, request.participant_id, payment_status, &code)
            .await?;

        info!(
            camp_id = camp_id,
            registration_id = registration.id,
            participant_id = registration.participant_id,
            "Participant registered"
        );
        Ok(registration)
    }

    /// List registrations for a camp
    pub async fn list_registrations(&self, camp_id: i64) -> Result<Vec<Registration>> {
        self.get_camp(camp_id).await?;
        self.camp_repository.list_registrations(camp_id).await
    }

    /// Update a registration's payment status
    pub async fn set_registration_payment(
        &self,
        registration_id: i64,
        payment_status: &str,
    ) -> Result<Registration> {
        if PaymentStatus::parse(payment_status).is_none() {
            return Err(ThreadlineError::InvalidInput(format!(
                "Unknown payment status: {}",
                payment_status
            )));
        }

        self.camp_repository
            .find_registration(registration_id)
            .await?
            .ok_or(ThreadlineError::NotFound {
                entity: "Registration",
                id: registration_id,
            })?;

        let registration = self
            .camp_repository
            .set_registration_payment(registration_id, payment_status)
            .await?;
        info!(registration_id = registration_id, payment_status = %payment_status, "Registration payment updated");
        Ok(registration)
    }

    /// Cancel a registration, freeing its seat
    pub async fn cancel_registration(&self, registration_id: i64) -> Result<Registration> {
        self.camp_repository
            .find_registration(registration_id)
            .await?
            .ok_or(ThreadlineError::NotFound {
                entity: "Registration",
                id: registration_id,
            })?;

        let registration = self.camp_repository.cancel_registration(registration_id).await?;
        info!(registration_id = registration_id, "Registration cancelled");
        Ok(registration)
    }
}
