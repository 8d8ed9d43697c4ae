// src/candidates/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::profile::models::ResumeDoc;

// ============================================================================
// Application Models
// ============================================================================

#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct Application {
    pub id: String,
    pub job_id: String,
    pub applicant_id: String,
    pub recruiter_id: String,
    pub resume_id: Option<String>,
    pub resume_url: Option<String>,
    pub summary: Option<String>,
    pub cover_letter: Option<String>,
    pub status: String,
    pub applied_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub job_id: String,
    pub resume_id: Option<String>,
    pub resume_url: Option<String>,
    pub summary: Option<String>,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<Application>,
    pub total: usize,
}

// ============================================================================
// Enhancement Models
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Add,
    Modify,
    Remove,
}

/// One reported difference between an original and an enhanced resume.
/// Derived on every enhancement, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeHighlight {
    pub section: String,
    pub kind: ChangeKind,
    pub original: Option<String>,
    pub enhanced: Option<String>,
    pub explanation: String,
}

/// The slice of a job listing the generation prompt needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobContext {
    #[serde(default)]
    pub title: String,
    pub company: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub experience_level: Option<String>,
}

/// The resume source is either an inline document or a saved resume id;
/// exactly one must be present.
#[derive(Debug, Deserialize)]
pub struct EnhanceResumeRequest {
    pub resume: Option<ResumeDoc>,
    pub resume_id: Option<String>,
    pub job: JobContext,
}

#[derive(Debug, Serialize)]
pub struct EnhanceResumeResponse {
    pub resume: ResumeDoc,
    pub highlights: Vec<ChangeHighlight>,
}

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub success: bool,
    pub resume: ResumeDoc,
}
