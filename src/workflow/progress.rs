//! Lead progress step chain
//!
//! The lead tracker is three sequential flags: contacted, items confirmed,
//! submitted to design. A step may only be set once every earlier step is
//! set, and clearing a step clears everything after it.

use crate::models::lead::{Lead, LeadProgressRequest, LeadStatus, LeadStep};
use crate::utils::errors::{Result, ThreadlineError};

/// Resolved progress flags after applying a partial update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadProgress {
    pub contacted: bool,
    pub items_confirmed: bool,
    pub submitted_to_design: bool,
}

impl LeadProgress {
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            contacted: lead.contacted,
            items_confirmed: lead.items_confirmed,
            submitted_to_design: lead.submitted_to_design,
        }
    }

    fn get(&self, step: LeadStep) -> bool {
        match step {
            LeadStep::Contacted => self.contacted,
            LeadStep::ItemsConfirmed => self.items_confirmed,
            LeadStep::SubmittedToDesign => self.submitted_to_design,
        }
    }

    fn set(&mut self, step: LeadStep, value: bool) {
        match step {
            LeadStep::Contacted => self.contacted = value,
            LeadStep::ItemsConfirmed => self.items_confirmed = value,
            LeadStep::SubmittedToDesign => self.submitted_to_design = value,
        }
    }

    /// Lead status implied by the flags
    pub fn implied_status(&self) -> LeadStatus {
        if self.submitted_to_design {
            LeadStatus::Converted
        } else if self.contacted {
            LeadStatus::Active
        } else {
            LeadStatus::New
        }
    }
}

fn requested(request: &LeadProgressRequest, step: LeadStep) -> Option<bool> {
    match step {
        LeadStep::Contacted => request.contacted,
        LeadStep::ItemsConfirmed => request.items_confirmed,
        LeadStep::SubmittedToDesign => request.submitted_to_design,
    }
}

/// Apply a partial progress update, enforcing step ordering.
///
/// Steps are applied in workflow order, so a single request may legally set
/// `contacted` and `items_confirmed` together. Clearing a step cascades the
/// clear to every later step, including ones the request tried to set.
pub fn resolve_progress(current: LeadProgress, request: &LeadProgressRequest) -> Result<LeadProgress> {
    if request.contacted.is_none()
        && request.items_confirmed.is_none()
        && request.submitted_to_design.is_none()
    {
        return Err(ThreadlineError::InvalidInput(
            "progress update must set at least one step".to_string(),
        ));
    }

    let steps = LeadStep::ordered();
    let mut next = current;

    for (idx, step) in steps.iter().enumerate() {
        let Some(value) = requested(request, *step) else {
            continue;
        };

        if value {
            let blocked = steps[..idx].iter().find(|earlier| !next.get(**earlier));
            if let Some(missing) = blocked {
                return Err(ThreadlineError::InvalidStateTransition {
                    from: missing.as_str().to_string(),
                    to: step.as_str().to_string(),
                });
            }
            next.set(*step, true);
        } else {
            next.set(*step, false);
            for later in &steps[idx + 1..] {
                next.set(*later, false);
            }
        }
    }

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> LeadProgress {
        LeadProgress {
            contacted: false,
            items_confirmed: false,
            submitted_to_design: false,
        }
    }

    #[test]
    fn first_step_sets_cleanly() {
        let next = resolve_progress(
            blank(),
            &LeadProgressRequest {
                contacted: Some(true),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(next.contacted);
        assert!(!next.items_confirmed);
    }

    #[test]
    fn skipping_a_step_is_rejected() {
        let err = resolve_progress(
            blank(),
            &LeadProgressRequest {
                submitted_to_design: Some(true),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, ThreadlineError::InvalidStateTransition { .. }));
    }

    #[test]
    fn confirm_without_contact_is_rejected() {
        let err = resolve_progress(
            blank(),
            &LeadProgressRequest {
                items_confirmed: Some(true),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, ThreadlineError::InvalidStateTransition { .. }));
    }

    #[test]
    fn all_steps_in_one_request() {
        let next = resolve_progress(
            blank(),
            &LeadProgressRequest {
                contacted: Some(true),
                items_confirmed: Some(true),
                submitted_to_design: Some(true),
            },
        )
        .unwrap();
        assert!(next.contacted && next.items_confirmed && next.submitted_to_design);
        assert_eq!(next.implied_status(), LeadStatus::Converted);
    }

    #[test]
    fn clearing_cascades_to_later_steps() {
        let current = LeadProgress {
            contacted: true,
            items_confirmed: true,
            submitted_to_design: true,
        };
        let next = resolve_progress(
            current,
            &LeadProgressRequest {
                contacted: Some(false),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(!next.contacted && !next.items_confirmed && !next.submitted_to_design);
        assert_eq!(next.implied_status(), LeadStatus::New);
    }

    #[test]
    fn clearing_middle_step_keeps_earlier() {
        let current = LeadProgress {
            contacted: true,
            items_confirmed: true,
            submitted_to_design: true,
        };
        let next = resolve_progress(
            current,
            &LeadProgressRequest {
                items_confirmed: Some(false),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(next.contacted);
        assert!(!next.items_confirmed);
        assert!(!next.submitted_to_design);
    }

    #[test]
    fn clear_beats_set_in_same_request() {
        let current = LeadProgress {
            contacted: true,
            items_confirmed: true,
            submitted_to_design: false,
        };
        // Clearing items_confirmed while trying to submit: the clear cascades.
        let err = resolve_progress(
            current,
            &LeadProgressRequest {
                items_confirmed: Some(false),
                submitted_to_design: Some(true),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, ThreadlineError::InvalidStateTransition { .. }));
    }

    #[test]
    fn empty_request_is_rejected() {
        let err = resolve_progress(blank(), &LeadProgressRequest::default()).unwrap_err();
        assert!(matches!(err, ThreadlineError::InvalidInput(_)));
    }
}
