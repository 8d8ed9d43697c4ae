// src/candidates/enhancement.rs
//! Resume enhancement session tracking and change-highlight computation.
//!
//! The session is a small state machine enforcing that nothing durable
//! happens before an explicit save, and that a failed generation leaves the
//! original resume untouched. Highlight computation is a pure comparison of
//! two resume documents.

use crate::candidates::models::{ChangeHighlight, ChangeKind};
use crate::profile::models::ResumeDoc;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EnhancementError {
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnhancementState {
    Idle,
    Enhancing,
    Enhanced,
    Failed,
    Saved,
}

impl EnhancementState {
    fn name(&self) -> &'static str {
        match self {
            EnhancementState::Idle => "idle",
            EnhancementState::Enhancing => "enhancing",
            EnhancementState::Enhanced => "enhanced",
            EnhancementState::Failed => "failed",
            EnhancementState::Saved => "saved",
        }
    }
}

/// One enhancement attempt, from request to save or abandonment.
///
/// Allowed transitions:
/// `Idle -> Enhancing -> Enhanced -> Saved`, `Enhancing -> Failed`,
/// and any state back to `Idle` on cancel. `Failed` keeps the error
/// message until the session is reset.
#[derive(Debug)]
pub struct EnhancementSession {
    state: EnhancementState,
    error: Option<String>,
}

impl EnhancementSession {
    pub fn new() -> Self {
        Self {
            state: EnhancementState::Idle,
            error: None,
        }
    }

    /// A session rehydrated at the save step. The client holds the enhanced
    /// document between the enhance call and the explicit save, so the save
    /// endpoint picks the workflow back up in `Enhanced`.
    pub fn enhanced() -> Self {
        Self {
            state: EnhancementState::Enhanced,
            error: None,
        }
    }

    pub fn state(&self) -> &EnhancementState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn invalid(&self, to: &'static str) -> EnhancementError {
        EnhancementError::InvalidTransition {
            from: self.state.name(),
            to,
        }
    }

    /// Begin generation. Requires the resume source and the job to both be
    /// resolved by the caller first.
    pub fn start_enhancing(&mut self) -> Result<(), EnhancementError> {
        match self.state {
            EnhancementState::Idle => {
                self.error = None;
                self.state = EnhancementState::Enhancing;
                Ok(())
            }
            _ => Err(self.invalid("enhancing")),
        }
    }

    /// Generation returned a structurally-compatible document.
    pub fn complete(&mut self) -> Result<(), EnhancementError> {
        match self.state {
            EnhancementState::Enhancing => {
                self.state = EnhancementState::Enhanced;
                Ok(())
            }
            _ => Err(self.invalid("enhanced")),
        }
    }

    /// Generation failed. The error is kept for reporting; nothing has
    /// been persisted.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), EnhancementError> {
        match self.state {
            EnhancementState::Enhancing => {
                self.error = Some(message.into());
                self.state = EnhancementState::Failed;
                Ok(())
            }
            _ => Err(self.invalid("failed")),
        }
    }

    /// The user confirmed the enhanced version; the caller performs the
    /// single durable append.
    pub fn save(&mut self) -> Result<(), EnhancementError> {
        match self.state {
            EnhancementState::Enhanced => {
                self.state = EnhancementState::Saved;
                Ok(())
            }
            _ => Err(self.invalid("saved")),
        }
    }

    /// Cancel or retry: valid from every state.
    pub fn reset(&mut self) {
        self.state = EnhancementState::Idle;
        self.error = None;
    }
}

impl Default for EnhancementSession {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Change highlights
// ============================================================================

fn contains_skill(skills: &[String], skill: &str) -> bool {
    skills.iter().any(|s| s.eq_ignore_ascii_case(skill))
}

/// Compare an original and enhanced resume and report what changed.
///
/// The output order is fixed: summary, then skills, then experience
/// description changes by index, then achievement additions by index.
/// Skills dropped by the enhanced version are deliberately not reported;
/// user-stated skills are never flagged for removal.
pub fn generate_change_highlights(
    original: &ResumeDoc,
    enhanced: &ResumeDoc,
    job_skills: &[String],
) -> Vec<ChangeHighlight> {
    let mut highlights = Vec::new();

    // Summary
    match (&original.summary, &enhanced.summary) {
        (None, Some(new)) if !new.trim().is_empty() => {
            highlights.push(ChangeHighlight {
                section: "Summary".to_string(),
                kind: ChangeKind::Add,
                original: None,
                enhanced: Some(new.clone()),
                explanation: "Added a professional summary tailored to the role".to_string(),
            });
        }
        (Some(old), Some(new)) if old != new => {
            highlights.push(ChangeHighlight {
                section: "Summary".to_string(),
                kind: ChangeKind::Modify,
                original: Some(old.clone()),
                enhanced: Some(new.clone()),
                explanation: "Rewrote the summary to emphasize relevant experience".to_string(),
            });
        }
        _ => {}
    }

    // Skills: additions only
    let added: Vec<String> = enhanced
        .skills
        .iter()
        .filter(|s| !contains_skill(&original.skills, s))
        .cloned()
        .collect();
    if !added.is_empty() {
        let matching_job = added
            .iter()
            .filter(|s| contains_skill(job_skills, s))
            .count();
        let explanation = if matching_job > 0 {
            format!(
                "Added {} skill(s) requested by the job posting",
                matching_job
            )
        } else {
            "Added skills supported by your experience".to_string()
        };
        highlights.push(ChangeHighlight {
            section: "Skills".to_string(),
            kind: ChangeKind::Add,
            original: None,
            enhanced: Some(added.join(", ")),
            explanation,
        });
    }

    // Experience descriptions, matched by index
    for (index, (orig, new)) in original
        .experience
        .iter()
        .zip(enhanced.experience.iter())
        .enumerate()
    {
        if orig.description != new.description {
            highlights.push(ChangeHighlight {
                section: format!("Experience #{}: {}", index + 1, new.title),
                kind: ChangeKind::Modify,
                original: orig.description.clone(),
                enhanced: new.description.clone(),
                explanation: "Reworded the role description to highlight relevant impact"
                    .to_string(),
            });
        }
    }

    // Achievement additions, matched by company + title
    for (index, new) in enhanced.experience.iter().enumerate() {
        let matched = original
            .experience
            .iter()
            .find(|orig| orig.company == new.company && orig.title == new.title);

        let grew = match matched {
            Some(orig) => new.achievements.len() > orig.achievements.len(),
            None => !new.achievements.is_empty(),
        };

        if grew {
            highlights.push(ChangeHighlight {
                section: format!("Experience #{}: {}", index + 1, new.title),
                kind: ChangeKind::Add,
                original: None,
                enhanced: Some(new.achievements.join("; ")),
                explanation: "Added achievements demonstrating measurable results".to_string(),
            });
        }
    }

    highlights
}
