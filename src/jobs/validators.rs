// src/jobs/validators.rs

use super::models::*;
use super::search::parse_salary;
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Job Validators
// ============================================================================

pub struct JobValidator;

impl JobValidator {
    fn validate_common(
        result: &mut ValidationResult,
        description: Option<&str>,
        location: Option<&str>,
        company: Option<&str>,
        salary: Option<&Salary>,
        skills: Option<&Vec<String>>,
    ) {
        if let Some(description) = description {
            if description.len() > 10000 {
                result.add_error(
                    "description",
                    "Description must be less than 10000 characters",
                );
            }
        }

        if let Some(location) = location {
            if location.len() > 255 {
                result.add_error("location", "Location must be less than 255 characters");
            }
        }

        if let Some(company) = company {
            if company.len() > 255 {
                result.add_error("company", "Company name must be less than 255 characters");
            }
        }

        if let Some(salary) = salary {
            let min = parse_salary(salary.min.as_deref());
            let max = parse_salary(salary.max.as_deref());

            if salary.min.is_some() && min.is_none() {
                result.add_error("salary.min", "Minimum salary must be numeric");
            }
            if salary.max.is_some() && max.is_none() {
                result.add_error("salary.max", "Maximum salary must be numeric");
            }
            if let (Some(min), Some(max)) = (min, max) {
                if min > max {
                    result.add_error(
                        "salary",
                        "Minimum salary cannot be greater than maximum salary",
                    );
                }
            }
        }

        if let Some(skills) = skills {
            if skills.len() > 50 {
                result.add_error("skills", "Cannot list more than 50 skills");
            }
            if skills.iter().any(|s| s.trim().is_empty()) {
                result.add_error("skills", "Skills cannot be empty strings");
            }
        }
    }
}

impl Validator<CreateJob> for JobValidator {
    fn validate(&self, data: &CreateJob) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.title.trim().is_empty() {
            result.add_error("title", "Job title is required");
        } else if data.title.len() > 255 {
            result.add_error("title", "Job title must be less than 255 characters");
        }

        Self::validate_common(
            &mut result,
            data.description.as_deref(),
            data.location.as_deref(),
            data.company.as_deref(),
            data.salary.as_ref(),
            data.skills.as_ref(),
        );

        result
    }
}

impl Validator<UpdateJob> for JobValidator {
    fn validate(&self, data: &UpdateJob) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(title) = &data.title {
            if title.trim().is_empty() {
                result.add_error("title", "Job title cannot be empty");
            } else if title.len() > 255 {
                result.add_error("title", "Job title must be less than 255 characters");
            }
        }

        Self::validate_common(
            &mut result,
            data.description.as_deref(),
            data.location.as_deref(),
            data.company.as_deref(),
            data.salary.as_ref(),
            data.skills.as_ref(),
        );

        result
    }
}

// ============================================================================
// Job Analysis Validators
// ============================================================================

pub struct JobAnalyzeValidator;

impl Validator<JobAnalyzeRequest> for JobAnalyzeValidator {
    fn validate(&self, data: &JobAnalyzeRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.description.trim().is_empty() {
            result.add_error("description", "Job description is required");
        } else if data.description.len() > 20000 {
            result.add_error(
                "description",
                "Job description must be less than 20000 characters",
            );
        }

        result
    }
}

// ============================================================================
// View Tracking Validators
// ============================================================================

pub struct JobViewValidator;

impl Validator<JobViewRequest> for JobViewValidator {
    fn validate(&self, data: &JobViewRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(user_agent) = &data.user_agent {
            if user_agent.len() > 1024 {
                result.add_error("user_agent", "User agent string too long");
            }
        }

        if let Some(referrer) = &data.referrer {
            if referrer.len() > 2048 {
                result.add_error("referrer", "Referrer too long");
            }
        }

        result
    }
}
