// src/jobs/tests/validators_tests.rs

#[cfg(test)]
mod tests {
    use crate::common::Validator;
    use crate::jobs::models::*;
    use crate::jobs::validators::*;

    fn minimal_create_job(title: &str) -> CreateJob {
        CreateJob {
            title: title.to_string(),
            company: None,
            location: None,
            employment_type: None,
            experience_level: None,
            remote: None,
            salary: None,
            skills: None,
            visa_sponsorship: None,
            description: None,
            requirements: None,
            benefits: None,
            job_simulation: None,
            key_qualifications: None,
            status: None,
        }
    }

    #[test]
    fn test_job_validator_valid_request() {
        let validator = JobValidator;
        let mut request = minimal_create_job("Backend Engineer");
        request.salary = Some(Salary {
            min: Some("110000".to_string()),
            max: Some("140000".to_string()),
            currency: Some("USD".to_string()),
            period: Some("year".to_string()),
        });
        request.skills = Some(vec!["Node.js".to_string(), "Express".to_string()]);

        let result = validator.validate(&request);
        assert!(result.is_valid);
        assert_eq!(result.errors.len(), 0);
    }

    #[test]
    fn test_job_validator_requires_title() {
        let validator = JobValidator;
        let request = minimal_create_job("   ");

        let result = validator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "title"));
    }

    #[test]
    fn test_job_validator_rejects_inverted_salary_range() {
        let validator = JobValidator;
        let mut request = minimal_create_job("Engineer");
        request.salary = Some(Salary {
            min: Some("140000".to_string()),
            max: Some("110000".to_string()),
            ..Default::default()
        });

        let result = validator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "salary"));
    }

    #[test]
    fn test_job_validator_rejects_non_numeric_salary() {
        let validator = JobValidator;
        let mut request = minimal_create_job("Engineer");
        request.salary = Some(Salary {
            min: Some("competitive".to_string()),
            ..Default::default()
        });

        let result = validator.validate(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.field == "salary.min"));
    }

    #[test]
    fn test_job_validator_update_allows_partial() {
        let validator = JobValidator;
        let request = UpdateJob {
            title: None,
            company: None,
            location: None,
            employment_type: Some(EmploymentType::Contract),
            experience_level: None,
            remote: None,
            salary: None,
            skills: None,
            visa_sponsorship: None,
            description: None,
            requirements: None,
            benefits: None,
            job_simulation: None,
            key_qualifications: None,
        };

        let result = validator.validate(&request);
        assert!(result.is_valid);
    }

    #[test]
    fn test_analyze_validator_requires_description() {
        let validator = JobAnalyzeValidator;
        let request = JobAnalyzeRequest {
            description: "".to_string(),
        };

        let result = validator.validate(&request);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_analyze_validator_caps_description_length() {
        let validator = JobAnalyzeValidator;
        let request = JobAnalyzeRequest {
            description: "a".repeat(20001),
        };

        let result = validator.validate(&request);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_view_validator_limits_header_lengths() {
        let validator = JobViewValidator;
        let request = JobViewRequest {
            user_agent: Some("x".repeat(2000)),
            referrer: None,
        };

        let result = validator.validate(&request);
        assert!(!result.is_valid);
    }
}
