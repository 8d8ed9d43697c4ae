// src/candidates/tests/validators_tests.rs

#[cfg(test)]
mod tests {
    use crate::candidates::models::*;
    use crate::candidates::validators::*;
    use crate::common::Validator;
    use crate::profile::models::ResumeDoc;

    fn job_context() -> JobContext {
        JobContext {
            title: "Backend Engineer".to_string(),
            company: Some("Acme".to_string()),
            description: Some("Build and operate backend services".to_string()),
            requirements: None,
            skills: vec!["Rust".to_string()],
            experience_level: Some("mid".to_string()),
        }
    }

    #[test]
    fn test_application_validator_valid_request() {
        let validator = ApplicationValidator;
        let request = CreateApplicationRequest {
            job_id: "J_ABC123".to_string(),
            resume_id: Some("R_XYZ789".to_string()),
            resume_url: None,
            summary: Some("Five years of backend work".to_string()),
            cover_letter: None,
        };

        let result = validator.validate(&request);
        assert!(result.is_valid);
    }

    #[test]
    fn test_application_validator_requires_job_id() {
        let validator = ApplicationValidator;
        let request = CreateApplicationRequest {
            job_id: "  ".to_string(),
            resume_id: None,
            resume_url: None,
            summary: None,
            cover_letter: None,
        };

        let result = validator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "job_id"));
    }

    #[test]
    fn test_application_validator_rejects_foreign_id_prefix() {
        let validator = ApplicationValidator;
        let request = CreateApplicationRequest {
            job_id: "U_ABC123".to_string(),
            resume_id: None,
            resume_url: None,
            summary: None,
            cover_letter: None,
        };

        let result = validator.validate(&request);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_application_validator_caps_cover_letter() {
        let validator = ApplicationValidator;
        let request = CreateApplicationRequest {
            job_id: "J_ABC123".to_string(),
            resume_id: None,
            resume_url: None,
            summary: None,
            cover_letter: Some("a".repeat(10001)),
        };

        let result = validator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "cover_letter"));
    }

    #[test]
    fn test_enhance_validator_requires_a_resume_source() {
        let validator = EnhanceValidator;
        let request = EnhanceResumeRequest {
            resume: None,
            resume_id: None,
            job: job_context(),
        };

        let result = validator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "resume"));
    }

    #[test]
    fn test_enhance_validator_rejects_both_sources() {
        let validator = EnhanceValidator;
        let request = EnhanceResumeRequest {
            resume: Some(ResumeDoc::default()),
            resume_id: Some("R_XYZ789".to_string()),
            job: job_context(),
        };

        let result = validator.validate(&request);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_enhance_validator_requires_job_description() {
        let validator = EnhanceValidator;
        let mut job = job_context();
        job.description = None;
        let request = EnhanceResumeRequest {
            resume: Some(ResumeDoc::default()),
            resume_id: None,
            job,
        };

        let result = validator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "job.description"));
    }

    #[test]
    fn test_enhance_validator_accepts_inline_resume() {
        let validator = EnhanceValidator;
        let request = EnhanceResumeRequest {
            resume: Some(ResumeDoc::default()),
            resume_id: None,
            job: job_context(),
        };

        let result = validator.validate(&request);
        assert!(result.is_valid);
    }
}
