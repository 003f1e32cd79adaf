//! Lead service implementation
//!
//! Lead CRUD plus the three-step progress tracker. Completing the final
//! step hands the lead to design by opening a design project.

use tracing::{debug, info};

use crate::database::repositories::{DesignRepository, LeadRepository};
use crate::models::design::CreateDesignProjectRequest;
use crate::models::lead::{CreateLeadRequest, Lead, LeadProgressRequest, UpdateLeadRequest};
use crate::utils::errors::{Result, ThreadlineError};
use crate::utils::helpers;
use crate::workflow::progress::{resolve_progress, LeadProgress};

/// Lead service for sales prospect management
#[derive(Debug, Clone)]
pub struct LeadService {
    lead_repository: LeadRepository,
    design_repository: DesignRepository,
}

impl LeadService {
    /// Create a new LeadService instance
    pub fn new(lead_repository: LeadRepository, design_repository: DesignRepository) -> Self {
        Self {
            lead_repository,
            design_repository,
        }
    }

    fn validate(request: &CreateLeadRequest) -> Result<()> {
        helpers::require_field(&request.company_name, "company_name")?;
        helpers::require_field(&request.contact_name, "contact_name")?;
        if let Some(ref email) = request.contact_email {
            if !helpers::is_valid_email(email) {
                return Err(ThreadlineError::InvalidInput(format!(
                    "Invalid email: {}",
                    email
                )));
            }
        }
        Ok(())
    }

    /// Create a new lead
    pub async fn create_lead(&self, request: CreateLeadRequest) -> Result<Lead> {
        Self::validate(&request)?;
        let lead = self.lead_repository.create(request).await?;
        info!(lead_id = lead.id, company = %lead.company_name, "Lead created");
        Ok(lead)
    }

    /// Get lead by ID
    pub async fn get_lead(&self, lead_id: i64) -> Result<Lead> {
        debug!(lead_id = lead_id, "Getting lead by ID");
        self.lead_repository
            .find_by_id(lead_id)
            .await?
            .ok_or(ThreadlineError::LeadNotFound { lead_id })
    }

    /// Update lead contact fields
    pub async fn update_lead(&self, lead_id: i64, request: UpdateLeadRequest) -> Result<Lead> {
        self.get_lead(lead_id).await?;

        if let Some(ref email) = request.contact_email {
            if !helpers::is_valid_email(email) {
                return Err(ThreadlineError::InvalidInput(format!(
                    "Invalid email: {}",
                    email
                )));
            }
        }
        if let Some(ref status) = request.status {
            if crate::models::lead::LeadStatus::parse(status).is_none() {
                return Err(ThreadlineError::InvalidInput(format!(
                    "Unknown lead status: {}",
                    status
                )));
            }
        }

        let lead = self.lead_repository.update(lead_id, request).await?;
        info!(lead_id = lead_id, "Lead updated");
        Ok(lead)
    }

    /// Apply a partial progress update to the step tracker.
    ///
    /// Newly completing the final step opens a design project for the lead
    /// and stamps `submitted_at`.
    pub async fn update_progress(
        &self,
        lead_id: i64,
        request: LeadProgressRequest,
    ) -> Result<Lead> {
        let lead = self.get_lead(lead_id).await?;

        let current = LeadProgress::from_lead(&lead);
        let next = resolve_progress(current, &request)?;

        let newly_submitted = next.submitted_to_design && !lead.submitted_to_design;
        let submitted_at = if next.submitted_to_design {
            lead.submitted_at.or_else(|| Some(chrono::Utc::now()))
        } else {
            None
        };

        let status = next.implied_status();
        let updated = self
            .lead_repository
            .set_progress(
                lead_id,
                next.contacted,
                next.items_confirmed,
                next.submitted_to_design,
                submitted_at,
                status.as_str(),
            )
            .await?;

        crate::utils::logging::log_lead_progress(
            lead_id,
            lead.assigned_to.unwrap_or_default(),
            "progress",
            next.submitted_to_design,
        );

        if newly_submitted {
            let project = self
                .design_repository
                .create_project(CreateDesignProjectRequest {
                    order_id: None,
                    lead_id: Some(lead_id),
                    designer_id: None,
                    title: format!("{} — initial design", updated.company_name),
                    brief: updated.notes.clone(),
                })
                .await?;
            info!(
                lead_id = lead_id,
                project_id = project.id,
                "Lead submitted to design"
            );
        }

        Ok(updated)
    }

    /// List leads filtered by status and assignee
    pub async fn list_leads(
        &self,
        status: Option<&str>,
        assigned_to: Option<i64>,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<Lead>> {
        let offset = helpers::calculate_offset(page, page_size);
        self.lead_repository
            .list(status, assigned_to, page_size, offset)
            .await
    }

    /// Delete a lead
    pub async fn delete_lead(&self, lead_id: i64) -> Result<()> {
        self.get_lead(lead_id).await?;
        self.lead_repository.delete(lead_id).await?;
        info!(lead_id = lead_id, "Lead deleted");
        Ok(())
    }
}
