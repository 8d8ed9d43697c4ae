// src/jobs/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Job Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Temporary,
    Internship,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full-time",
            EmploymentType::PartTime => "part-time",
            EmploymentType::Contract => "contract",
            EmploymentType::Temporary => "temporary",
            EmploymentType::Internship => "internship",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "full-time" => Some(EmploymentType::FullTime),
            "part-time" => Some(EmploymentType::PartTime),
            "contract" => Some(EmploymentType::Contract),
            "temporary" => Some(EmploymentType::Temporary),
            "internship" => Some(EmploymentType::Internship),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Executive,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Executive => "executive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "entry" => Some(ExperienceLevel::Entry),
            "mid" => Some(ExperienceLevel::Mid),
            "senior" => Some(ExperienceLevel::Senior),
            "executive" => Some(ExperienceLevel::Executive),
            _ => None,
        }
    }
}

/// Remote work policy for a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemotePolicy {
    No,
    Hybrid,
    Fully,
}

impl RemotePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemotePolicy::No => "no",
            RemotePolicy::Hybrid => "hybrid",
            RemotePolicy::Fully => "fully",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "no" => Some(RemotePolicy::No),
            "hybrid" => Some(RemotePolicy::Hybrid),
            "fully" => Some(RemotePolicy::Fully),
            _ => None,
        }
    }
}

/// Listings are never deleted, only toggled between these two states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Active,
    Inactive,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(JobStatus::Active),
            "inactive" => Some(JobStatus::Inactive),
            _ => None,
        }
    }
}

// ============================================================================
// Job Models
// ============================================================================

/// Salary bounds are free-form numeric strings as entered by the recruiter;
/// the search engine owns the parse semantics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Salary {
    pub min: Option<String>,
    pub max: Option<String>,
    pub currency: Option<String>,
    pub period: Option<String>,
}

/// Raw database row; JSON-encoded columns are parsed into [`Job`]
#[derive(FromRow, Debug)]
pub struct JobRow {
    pub id: String,
    pub recruiter_id: String,
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub experience_level: Option<String>,
    pub remote: Option<String>,
    pub salary_min: Option<String>,
    pub salary_max: Option<String>,
    pub salary_currency: Option<String>,
    pub salary_period: Option<String>,
    pub skills: Option<String>, // JSON array in DB
    pub visa_sponsorship: i64,
    pub status: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub job_simulation: Option<String>,
    pub key_qualifications: Option<String>, // JSON array in DB
    pub views: i64,
    pub applicants: i64,
    pub created_at: Option<i64>,
    pub updated_at: Option<String>,
}

/// A posted job listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub recruiter_id: String,
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub experience_level: Option<ExperienceLevel>,
    pub remote: Option<RemotePolicy>,
    #[serde(default)]
    pub salary: Salary,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub visa_sponsorship: bool,
    pub status: JobStatus,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub job_simulation: Option<String>,
    pub key_qualifications: Option<Vec<String>>,
    pub views: i64,
    pub applicants: i64,
    /// Creation time as Unix epoch seconds; may be absent on legacy rows
    pub created_at: Option<i64>,
    pub updated_at: Option<String>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        let skills = row
            .skills
            .and_then(|s| serde_json::from_str::<Vec<String>>(&s).ok())
            .unwrap_or_default();

        let key_qualifications = row
            .key_qualifications
            .and_then(|s| serde_json::from_str::<Vec<String>>(&s).ok());

        Job {
            id: row.id,
            recruiter_id: row.recruiter_id,
            title: row.title,
            company: row.company,
            location: row.location,
            employment_type: row.employment_type.as_deref().and_then(EmploymentType::parse),
            experience_level: row
                .experience_level
                .as_deref()
                .and_then(ExperienceLevel::parse),
            remote: row.remote.as_deref().and_then(RemotePolicy::parse),
            salary: Salary {
                min: row.salary_min,
                max: row.salary_max,
                currency: row.salary_currency,
                period: row.salary_period,
            },
            skills,
            visa_sponsorship: row.visa_sponsorship == 1,
            status: JobStatus::parse(&row.status).unwrap_or(JobStatus::Inactive),
            description: row.description,
            requirements: row.requirements,
            benefits: row.benefits,
            job_simulation: row.job_simulation,
            key_qualifications,
            views: row.views,
            applicants: row.applicants,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct JobListResponse {
    pub jobs: Vec<Job>,
    pub total: usize,
}

#[derive(Deserialize)]
pub struct CreateJob {
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub experience_level: Option<ExperienceLevel>,
    pub remote: Option<RemotePolicy>,
    pub salary: Option<Salary>,
    pub skills: Option<Vec<String>>,
    pub visa_sponsorship: Option<bool>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub job_simulation: Option<String>,
    pub key_qualifications: Option<Vec<String>>,
    pub status: Option<JobStatus>,
}

#[derive(Deserialize)]
pub struct UpdateJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub experience_level: Option<ExperienceLevel>,
    pub remote: Option<RemotePolicy>,
    pub salary: Option<Salary>,
    pub skills: Option<Vec<String>>,
    pub visa_sponsorship: Option<bool>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub job_simulation: Option<String>,
    pub key_qualifications: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct UpdateJobStatusRequest {
    pub status: JobStatus,
}

#[derive(Debug, Deserialize)]
pub struct JobViewRequest {
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

// ============================================================================
// Job Analysis Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct JobAnalyzeRequest {
    pub description: String,
}

/// Shape of the JSON object expected inside the model's reply
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAnalysis {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub improvement_tips: Vec<String>,
    #[serde(default)]
    pub quality_score: u32,
    #[serde(default)]
    pub job_simulation: String,
    #[serde(default)]
    pub key_qualifications: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAnalysisResponse {
    pub success: bool,
    pub skills: Vec<String>,
    pub improvement_tips: Vec<String>,
    pub quality_score: u32,
    pub job_simulation: String,
    pub key_qualifications: Vec<String>,
}
