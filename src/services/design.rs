//! Design service implementation
//!
//! Design project lifecycle: submission, designer assignment, versioning,
//! and approval. Only one version per project holds approval at a time.

use tracing::{debug, info};

use crate::database::repositories::DesignRepository;
use crate::models::design::{
    CreateDesignProjectRequest, CreateDesignVersionRequest, DesignProject, DesignStatus,
    DesignVersion, UpdateDesignProjectRequest,
};
use crate::utils::errors::{Result, ThreadlineError};
use crate::utils::helpers;
use crate::workflow::transitions::check_design_transition;

/// Design service for design job management
#[derive(Debug, Clone)]
pub struct DesignService {
    design_repository: DesignRepository,
}

impl DesignService {
    /// Create a new DesignService instance
    pub fn new(design_repository: DesignRepository) -> Self {
        Self { design_repository }
    }

    /// Create a new design project
    pub async fn create_project(
        &self,
        request: CreateDesignProjectRequest,
    ) -> Result<DesignProject> {
        helpers::require_field(&request.title, "title")?;

        let project = self.design_repository.create_project(request).await?;
        info!(project_id = project.id, title = %project.title, "Design project created");
        Ok(project)
    }

    /// Get project by ID
    pub async fn get_project(&self, project_id: i64) -> Result<DesignProject> {
        debug!(project_id = project_id, "Getting design project by ID");
        self.design_repository
            .find_project(project_id)
            .await?
            .ok_or(ThreadlineError::NotFound {
                entity: "Design project",
                id: project_id,
            })
    }

    /// Update a project, enforcing the status pipeline
    pub async fn update_project(
        &self,
        project_id: i64,
        request: UpdateDesignProjectRequest,
    ) -> Result<DesignProject> {
        let project = self.get_project(project_id).await?;

        if let Some(ref status) = request.status {
            let from = DesignStatus::parse(&project.status).ok_or_else(|| {
                ThreadlineError::InvalidInput(format!("Unknown design status: {}", project.status))
            })?;
            let to = DesignStatus::parse(status).ok_or_else(|| {
                ThreadlineError::InvalidInput(format!("Unknown design status: {}", status))
            })?;

            check_design_transition(from, to)?;

            // Approval only happens through approve_version, which records
            // which version won.
            if to == DesignStatus::Approved && from != DesignStatus::Approved {
                return Err(ThreadlineError::InvalidInput(
                    "Approve a version to approve the project".to_string(),
                ));
            }
        }

        let project = self.design_repository.update_project(project_id, request).await?;
        info!(project_id = project_id, status = %project.status, "Design project updated");
        Ok(project)
    }

    /// Assign a designer to a project
    pub async fn assign_designer(&self, project_id: i64, designer_id: i64) -> Result<DesignProject> {
        self.get_project(project_id).await?;

        let request = UpdateDesignProjectRequest {
            designer_id: Some(designer_id),
            ..Default::default()
        };
        let project = self.design_repository.update_project(project_id, request).await?;
        info!(project_id = project_id, designer_id = designer_id, "Designer assigned");
        Ok(project)
    }

    /// Add a version to a project
    pub async fn add_version(
        &self,
        project_id: i64,
        request: CreateDesignVersionRequest,
        created_by: Option<i64>,
    ) -> Result<DesignVersion> {
        self.get_project(project_id).await?;
        helpers::require_field(&request.file_ref, "file_ref")?;

        let version = self
            .design_repository
            .add_version(project_id, request, created_by)
            .await?;
        info!(
            project_id = project_id,
            version = version.version_number,
            "Design version added"
        );
        Ok(version)
    }

    /// List a project's versions
    pub async fn list_versions(&self, project_id: i64) -> Result<Vec<DesignVersion>> {
        self.get_project(project_id).await?;
        self.design_repository.list_versions(project_id).await
    }

    /// Approve a version, superseding any earlier approval
    pub async fn approve_version(&self, project_id: i64, version_id: i64) -> Result<DesignProject> {
        self.get_project(project_id).await?;

        let version = self
            .design_repository
            .find_version(version_id)
            .await?
            .ok_or(ThreadlineError::NotFound {
                entity: "Design version",
                id: version_id,
            })?;

        if version.project_id != project_id {
            return Err(ThreadlineError::InvalidInput(format!(
                "Version {} does not belong to project {}",
                version_id, project_id
            )));
        }

        let project = self
            .design_repository
            .approve_version(project_id, version_id, DesignStatus::Approved.as_str())
            .await?;

        info!(
            project_id = project_id,
            version_id = version_id,
            "Design version approved"
        );
        Ok(project)
    }

    /// List projects filtered by designer and status
    pub async fn list_projects(
        &self,
        designer_id: Option<i64>,
        status: Option<&str>,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<DesignProject>> {
        if let Some(status) = status {
            if DesignStatus::parse(status).is_none() {
                return Err(ThreadlineError::InvalidInput(format!(
                    "Unknown design status: {}",
                    status
                )));
            }
        }
        let offset = helpers::calculate_offset(page, page_size);
        self.design_repository
            .list_projects(designer_id, status, page_size, offset)
            .await
    }

    /// Delete a project
    pub async fn delete_project(&self, project_id: i64) -> Result<()> {
        self.get_project(project_id).await?;
        self.design_repository.delete_project(project_id).await?;
        info!(project_id = project_id, "Design project deleted");
        Ok(())
    }
}
