//! Research service implementation
//!
//! Fabric and pattern research notes kept by the design team.

use tracing::info;

use crate::database::repositories::ResearchRepository;
use crate::models::research::{
    CreateResearchNoteRequest, ResearchKind, ResearchNote, UpdateResearchNoteRequest,
};
use crate::utils::errors::{Result, ThreadlineError};
use crate::utils::helpers;

/// Research service for fabric and pattern notes
#[derive(Debug, Clone)]
pub struct ResearchService {
    research_repository: ResearchRepository,
}

impl ResearchService {
    /// Create a new ResearchService instance
    pub fn new(research_repository: ResearchRepository) -> Self {
        Self { research_repository }
    }

    /// Create a research note
    pub async fn create_note(
        &self,
        request: CreateResearchNoteRequest,
        created_by: Option<i64>,
    ) -> Result<ResearchNote> {
        helpers::require_field(&request.title, "title")?;
        if ResearchKind::parse(&request.kind).is_none() {
            return Err(ThreadlineError::InvalidInput(format!(
                "Unknown research kind: {}",
                request.kind
            )));
        }
        if let Some(cost) = request.unit_cost {
            if cost < 0.0 {
                return Err(ThreadlineError::InvalidInput(
                    "Unit cost cannot be negative".to_string(),
                ));
            }
        }

        let note = self.research_repository.create(request, created_by).await?;
        info!(note_id = note.id, kind = %note.kind, "Research note created");
        Ok(note)
    }

    /// Get a note by ID
    pub async fn get_note(&self, note_id: i64) -> Result<ResearchNote> {
        self.research_repository
            .find_by_id(note_id)
            .await?
            .ok_or(ThreadlineError::NotFound {
                entity: "Research note",
                id: note_id,
            })
    }

    /// Update a note
    pub async fn update_note(
        &self,
        note_id: i64,
        request: UpdateResearchNoteRequest,
    ) -> Result<ResearchNote> {
        self.get_note(note_id).await?;

        if let Some(cost) = request.unit_cost {
            if cost < 0.0 {
                return Err(ThreadlineError::InvalidInput(
                    "Unit cost cannot be negative".to_string(),
                ));
            }
        }

        let note = self.research_repository.update(note_id, request).await?;
        info!(note_id = note_id, "Research note updated");
        Ok(note)
    }

    /// Delete a note
    pub async fn delete_note(&self, note_id: i64) -> Result<()> {
        self.get_note(note_id).await?;
        self.research_repository.delete(note_id).await?;
        info!(note_id = note_id, "Research note deleted");
        Ok(())
    }

    /// List notes filtered by kind
    pub async fn list_notes(
        &self,
        kind: Option<&str>,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<ResearchNote>> {
        if let Some(kind) = kind {
            if ResearchKind::parse(kind).is_none() {
                return Err(ThreadlineError::InvalidInput(format!(
                    "Unknown research kind: {}",
                    kind
                )));
            }
        }
        let offset = helpers::calculate_offset(page, page_size);
        self.research_repository.list(kind, page_size, offset).await
    }
}
