// src/candidates/validators.rs

use crate::candidates::models::{CreateApplicationRequest, EnhanceResumeRequest};
use crate::common::{has_prefix, EntityPrefix, ValidationResult, Validator};

const MAX_SUMMARY_LENGTH: usize = 2000;
const MAX_COVER_LETTER_LENGTH: usize = 10000;
const MAX_JOB_DESCRIPTION_LENGTH: usize = 20000;

pub struct ApplicationValidator;

impl Validator<CreateApplicationRequest> for ApplicationValidator {
    fn validate(&self, data: &CreateApplicationRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.job_id.trim().is_empty() {
            result.add_error("job_id", "Job id is required");
        } else if !has_prefix(&data.job_id, EntityPrefix::Job) {
            result.add_error("job_id", "Invalid job id format");
        }

        if let Some(resume_id) = &data.resume_id {
            if !has_prefix(resume_id, EntityPrefix::Resume) {
                result.add_error("resume_id", "Invalid resume id format");
            }
        }

        if let Some(summary) = &data.summary {
            if summary.len() > MAX_SUMMARY_LENGTH {
                result.add_error(
                    "summary",
                    &format!("Summary must be at most {} characters", MAX_SUMMARY_LENGTH),
                );
            }
        }

        if let Some(cover_letter) = &data.cover_letter {
            if cover_letter.len() > MAX_COVER_LETTER_LENGTH {
                result.add_error(
                    "cover_letter",
                    &format!(
                        "Cover letter must be at most {} characters",
                        MAX_COVER_LETTER_LENGTH
                    ),
                );
            }
        }

        result
    }
}

pub struct EnhanceValidator;

impl Validator<EnhanceResumeRequest> for EnhanceValidator {
    fn validate(&self, data: &EnhanceResumeRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        match (&data.resume, &data.resume_id) {
            (None, None) => {
                result.add_error("resume", "Either resume or resume_id is required");
            }
            (Some(_), Some(_)) => {
                result.add_error("resume", "Provide either resume or resume_id, not both");
            }
            _ => {}
        }

        if let Some(resume_id) = &data.resume_id {
            if !has_prefix(resume_id, EntityPrefix::Resume) {
                result.add_error("resume_id", "Invalid resume id format");
            }
        }

        if data.job.title.trim().is_empty() {
            result.add_error("job.title", "Job title is required");
        }

        match data.job.description.as_deref() {
            None => {
                result.add_error("job.description", "Job description is required");
            }
            Some(description) if description.trim().is_empty() => {
                result.add_error("job.description", "Job description is required");
            }
            Some(description) if description.len() > MAX_JOB_DESCRIPTION_LENGTH => {
                result.add_error(
                    "job.description",
                    &format!(
                        "Job description must be at most {} characters",
                        MAX_JOB_DESCRIPTION_LENGTH
                    ),
                );
            }
            _ => {}
        }

        result
    }
}
