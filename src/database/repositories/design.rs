//! Design project repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::design::{
    CreateDesignProjectRequest, CreateDesignVersionRequest, DesignProject, DesignVersion,
    UpdateDesignProjectRequest,
};
use crate::utils::errors::ThreadlineError;

const PROJECT_COLUMNS: &str = "id, order_id, lead_id, designer_id, title, brief, status, current_version_id, created_at, updated_at";
const VERSION_COLUMNS: &str = "id, project_id, version_number, file_ref, notes, approved, created_by, created_at";

#[derive(Debug, Clone)]
pub struct DesignRepository {
    pool: PgPool,
}

impl DesignRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new design project
    pub async fn create_project(
        &self,
        request: CreateDesignProjectRequest,
    ) -> Result<DesignProject, ThreadlineError> {
        let project = sqlx::query_as::<_, DesignProject>(
            r#"
            INSERT INTO design_projects (order_id, lead_id, designer_id, title, brief, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, order_id, lead_id, designer_id, title, brief, status, current_version_id, created_at, updated_at
            "#,
        )
        .bind(request.order_id)
        .bind(request.lead_id)
        .bind(request.designer_id)
        .bind(request.title)
        .bind(request.brief)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    /// Find project by ID
    pub async fn find_project(&self, id: i64) -> Result<Option<DesignProject>, ThreadlineError> {
        let project = sqlx::query_as::<_, DesignProject>(&format!(
            "SELECT {} FROM design_projects WHERE id = $1",
            PROJECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    /// Update project fields
    pub async fn update_project(
        &self,
        id: i64,
        request: UpdateDesignProjectRequest,
    ) -> Result<DesignProject, ThreadlineError> {
        let project = sqlx::query_as::<_, DesignProject>(
            r#"
            UPDATE design_projects
            SET designer_id = COALESCE($2, designer_id),
                title = COALESCE($3, title),
                brief = COALESCE($4, brief),
                status = COALESCE($5, status),
                updated_at = $6
            WHERE id = $1
            RETURNING id, order_id, lead_id, designer_id, title, brief, status, current_version_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.designer_id)
        .bind(request.title)
        .bind(request.brief)
        .bind(request.status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    /// Delete project
    pub async fn delete_project(&self, id: i64) -> Result<(), ThreadlineError> {
        sqlx::query("DELETE FROM design_projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List projects filtered by designer and status, newest first
    pub async fn list_projects(
        &self,
        designer_id: Option<i64>,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DesignProject>, ThreadlineError> {
        let projects = sqlx::query_as::<_, DesignProject>(&format!(
            r#"
            SELECT {} FROM design_projects
            WHERE ($1::bigint IS NULL OR designer_id = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
            PROJECT_COLUMNS
        ))
        .bind(designer_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    /// Append a version to a project, numbering it after the latest
    pub async fn add_version(
        &self,
        project_id: i64,
        request: CreateDesignVersionRequest,
        created_by: Option<i64>,
    ) -> Result<DesignVersion, ThreadlineError> {
        let version = sqlx::query_as::<_, DesignVersion>(
            r#"
            INSERT INTO design_versions (project_id, version_number, file_ref, notes, created_by, created_at)
            VALUES ($1, (SELECT COALESCE(MAX(version_number), 0) + 1 FROM design_versions WHERE project_id = $1), $2, $3, $4, $5)
            RETURNING id, project_id, version_number, file_ref, notes, approved, created_by, created_at
            "#,
        )
        .bind(project_id)
        .bind(request.file_ref)
        .bind(request.notes)
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(version)
    }

    /// Find a version by ID
    pub async fn find_version(&self, id: i64) -> Result<Option<DesignVersion>, ThreadlineError> {
        let version = sqlx::query_as::<_, DesignVersion>(&format!(
            "SELECT {} FROM design_versions WHERE id = $1",
            VERSION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(version)
    }

    /// List a project's versions in order
    pub async fn list_versions(&self, project_id: i64) -> Result<Vec<DesignVersion>, ThreadlineError> {
        let versions = sqlx::query_as::<_, DesignVersion>(&format!(
            "SELECT {} FROM design_versions WHERE project_id = $1 ORDER BY version_number ASC",
            VERSION_COLUMNS
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(versions)
    }

    /// Approve a version, superseding any earlier approval on the project
    pub async fn approve_version(
        &self,
        project_id: i64,
        version_id: i64,
        approved_status: &str,
    ) -> Result<DesignProject, ThreadlineError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE design_versions SET approved = false WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE design_versions SET approved = true WHERE id = $1 AND project_id = $2")
            .bind(version_id)
            .bind(project_id)
            .execute(&mut *tx)
            .await?;

        let project = sqlx::query_as::<_, DesignProject>(
            r#"
            UPDATE design_projects
            SET current_version_id = $2, status = $3, updated_at = $4
            WHERE id = $1
            RETURNING id, order_id, lead_id, designer_id, title, brief, status, current_version_id, created_at, updated_at
            "#,
        )
        .bind(project_id)
        .bind(version_id)
        .bind(approved_status)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(project)
    }
}
