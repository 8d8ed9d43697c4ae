// src/profile/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Profile Models
// ============================================================================

#[derive(FromRow, Serialize, Deserialize, Debug)]
pub struct Profile {
    pub user_id: String,
    pub headline: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub headline: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
}

// ============================================================================
// Resume Document Model
// ============================================================================
//
// Every field the generation endpoint may omit carries a serde default, so
// a structurally-compatible reply always deserializes into a complete
// document with empty sections rather than failing on absent keys.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default)]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    pub field_of_study: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificationEntry {
    #[serde(default)]
    pub name: String,
    pub issuer: Option<String>,
    pub year: Option<String>,
}

/// A structured resume document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeDoc {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub certifications: Vec<CertificationEntry>,
}

// ============================================================================
// Stored Resume Models
// ============================================================================

/// Raw database row; `data` holds the JSON-encoded [`ResumeDoc`]
#[derive(FromRow, Debug)]
pub struct ResumeRecord {
    pub id: String,
    pub user_id: String,
    pub label: Option<String>,
    pub data: String,
    pub source_resume_id: Option<String>,
    pub tailored_job_id: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub id: String,
    pub label: Option<String>,
    pub resume: ResumeDoc,
    /// Set on enhanced variants: the resume this one was derived from
    pub source_resume_id: Option<String>,
    /// Set on enhanced variants: the job this one was tailored for
    pub tailored_job_id: Option<String>,
    pub created_at: Option<String>,
}

impl TryFrom<ResumeRecord> for ResumeResponse {
    type Error = serde_json::Error;

    fn try_from(record: ResumeRecord) -> Result<Self, Self::Error> {
        let resume: ResumeDoc = serde_json::from_str(&record.data)?;
        Ok(ResumeResponse {
            id: record.id,
            label: record.label,
            resume,
            source_resume_id: record.source_resume_id,
            tailored_job_id: record.tailored_job_id,
            created_at: record.created_at,
        })
    }
}

/// Append a resume to the profile; the only durable write in the
/// enhancement workflow.
#[derive(Debug, Deserialize)]
pub struct SaveResumeRequest {
    pub label: Option<String>,
    pub resume: ResumeDoc,
    pub source_resume_id: Option<String>,
    pub tailored_job_id: Option<String>,
}
