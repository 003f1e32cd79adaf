//! Logistics service implementation
//!
//! Per-camp schedules and travel arrangements, both with timestamp
//! ordering enforced before the write.

use tracing::{debug, info};

use crate::database::repositories::{CampRepository, RosterRepository, ScheduleRepository, TravelRepository};
use crate::models::schedule::{CreateScheduleEventRequest, ScheduleEvent, UpdateScheduleEventRequest};
use crate::models::travel::{
    CreateTravelRequest, TravelArrangement, TravelKind, TravelerKind, UpdateTravelRequest,
};
use crate::utils::errors::{Result, ThreadlineError};
use crate::utils::helpers;

/// Logistics service for schedules and travel
#[derive(Debug, Clone)]
pub struct LogisticsService {
    schedule_repository: ScheduleRepository,
    travel_repository: TravelRepository,
    camp_repository: CampRepository,
    roster_repository: RosterRepository,
}

impl LogisticsService {
    /// Create a new LogisticsService instance
    pub fn new(
        schedule_repository: ScheduleRepository,
        travel_repository: TravelRepository,
        camp_repository: CampRepository,
        roster_repository: RosterRepository,
    ) -> Self {
        Self {
            schedule_repository,
            travel_repository,
            camp_repository,
            roster_repository,
        }
    }

    async fn require_camp(&self, camp_id: i64) -> Result<()> {
        self.camp_repository
            .find_by_id(camp_id)
            .await?
            .ok_or(ThreadlineError::CampNotFound { camp_id })?;
        Ok(())
    }

    /// Create a schedule event for a camp
    pub async fn create_schedule_event(
        &self,
        camp_id: i64,
        request: CreateScheduleEventRequest,
    ) -> Result<ScheduleEvent> {
        self.require_camp(camp_id).await?;
        helpers::require_field(&request.title, "title")?;
        helpers::require_ordered(request.starts_at, request.ends_at, "starts_at", "ends_at")?;

        if let Some(staff_id) = request.staff_lead_id {
            self.roster_repository
                .find_staff(staff_id)
                .await?
                .ok_or(ThreadlineError::NotFound {
                    entity: "Staff",
                    id: staff_id,
                })?;
        }

        let event = self.schedule_repository.create(camp_id, request).await?;
        info!(camp_id = camp_id, event_id = event.id, "Schedule event created");
        Ok(event)
    }

    /// Get a schedule event by ID
    pub async fn get_schedule_event(&self, event_id: i64) -> Result<ScheduleEvent> {
        debug!(event_id = event_id, "Getting schedule event by ID");
        self.schedule_repository
            .find_by_id(event_id)
            .await?
            .ok_or(ThreadlineError::NotFound {
                entity: "Schedule event",
                id: event_id,
            })
    }

    /// Update a schedule event, revalidating the time range
    pub async fn update_schedule_event(
        &self,
        event_id: i64,
        request: UpdateScheduleEventRequest,
    ) -> Result<ScheduleEvent> {
        let event = self.get_schedule_event(event_id).await?;

        let starts = request.starts_at.unwrap_or(event.starts_at);
        let ends = request.ends_at.unwrap_or(event.ends_at);
        helpers::require_ordered(starts, ends, "starts_at", "ends_at")?;

        let event = self.schedule_repository.update(event_id, request).await?;
        info!(event_id = event_id, "Schedule event updated");
        Ok(event)
    }

    /// Delete a schedule event
    pub async fn delete_schedule_event(&self, event_id: i64) -> Result<()> {
        self.get_schedule_event(event_id).await?;
        self.schedule_repository.delete(event_id).await?;
        info!(event_id = event_id, "Schedule event deleted");
        Ok(())
    }

    /// List a camp's schedule in day order
    pub async fn list_schedule(&self, camp_id: i64) -> Result<Vec<ScheduleEvent>> {
        self.require_camp(camp_id).await?;
        self.schedule_repository.list_for_camp(camp_id).await
    }

    /// Create a travel leg for a camp
    pub async fn create_travel(
        &self,
        camp_id: i64,
        request: CreateTravelRequest,
    ) -> Result<TravelArrangement> {
        self.require_camp(camp_id).await?;

        if TravelKind::parse(&request.kind).is_none() {
            return Err(ThreadlineError::InvalidInput(format!(
                "Unknown travel kind: {}",
                request.kind
            )));
        }
        let traveler_kind = TravelerKind::parse(&request.traveler_kind).ok_or_else(|| {
            ThreadlineError::InvalidInput(format!("Unknown traveler kind: {}", request.traveler_kind))
        })?;
        helpers::require_ordered(request.departs_at, request.arrives_at, "departs_at", "arrives_at")?;

        // The traveler must exist in whichever roster the kind points at.
        match traveler_kind {
            TravelerKind::Staff => {
                self.roster_repository
                    .find_staff(request.traveler_id)
                    .await?
                    .ok_or(ThreadlineError::NotFound {
                        entity: "Staff",
                        id: request.traveler_id,
                    })?;
            }
            TravelerKind::Participant => {
                self.roster_repository
                    .find_participant(request.traveler_id)
                    .await?
                    .ok_or(ThreadlineError::NotFound {
                        entity: "Participant",
                        id: request.traveler_id,
                    })?;
            }
        }

        let travel = self.travel_repository.create(camp_id, request).await?;
        info!(camp_id = camp_id, travel_id = travel.id, "Travel leg created");
        Ok(travel)
    }

    /// Get a travel leg by ID
    pub async fn get_travel(&self, travel_id: i64) -> Result<TravelArrangement> {
        self.travel_repository
            .find_by_id(travel_id)
            .await?
            .ok_or(ThreadlineError::NotFound {
                entity: "Travel arrangement",
                id: travel_id,
            })
    }

    /// Update a travel leg, revalidating kind and times
    pub async fn update_travel(
        &self,
        travel_id: i64,
        request: UpdateTravelRequest,
    ) -> Result<TravelArrangement> {
        let travel = self.get_travel(travel_id).await?;

        if let Some(ref kind) = request.kind {
            if TravelKind::parse(kind).is_none() {
                return Err(ThreadlineError::InvalidInput(format!(
                    "Unknown travel kind: {}",
                    kind
                )));
            }
        }

        let departs = request.departs_at.unwrap_or(travel.departs_at);
        let arrives = request.arrives_at.unwrap_or(travel.arrives_at);
        helpers::require_ordered(departs, arrives, "departs_at", "arrives_at")?;

        let travel = self.travel_repository.update(travel_id, request).await?;
        info!(travel_id = travel_id, "Travel leg updated");
        Ok(travel)
    }

    /// Delete a travel leg
    pub async fn delete_travel(&self, travel_id: i64) -> Result<()> {
        self.get_travel(travel_id).await?;
        self.travel_repository.delete(travel_id).await?;
        info!(travel_id = travel_id, "Travel leg deleted");
        Ok(())
    }

    /// List travel legs for a camp
    pub async fn list_travel(&self, camp_id: i64) -> Result<Vec<TravelArrangement>> {
        self.require_camp(camp_id).await?;
        self.travel_repository.list_for_camp(camp_id).await
    }
}
