// src/candidates/tests/handlers_tests.rs
//
// Handler tests against a real in-memory database: the duplicate-application
// pre-check and the no-partial-writes guarantees of the enhancement workflow.

#[cfg(test)]
mod tests {
    use axum::extract::{Extension, Json};
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use sqlx::SqlitePool;
    use std::str::FromStr;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use crate::auth::{Role, Session};
    use crate::candidates::handlers::{create_application, enhance_resume};
    use crate::candidates::models::{CreateApplicationRequest, EnhanceResumeRequest, JobContext};
    use crate::common::{ApiError, AppState};
    use crate::profile::handlers::save_resume;
    use crate::profile::models::{ResumeDoc, SaveResumeRequest};
    use crate::services::{GenAiConfig, GenAiService, PdfService};

    async fn test_state() -> Arc<RwLock<AppState>> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        crate::common::migrations::run_migrations(&pool)
            .await
            .unwrap();

        // No API key: generation calls fail without touching the network
        let genai_config = GenAiConfig {
            api_key: None,
            base_url: "http://localhost".to_string(),
            model: "test".to_string(),
        };

        Arc::new(RwLock::new(AppState {
            db: pool,
            http: reqwest::Client::new(),
            jwt_secret: "test-secret".to_string(),
            google_client_id: None,
            genai_service: Arc::new(GenAiService::new(genai_config)),
            pdf_service: Arc::new(PdfService::new()),
        }))
    }

    async fn seed_user(db: &SqlitePool, id: &str, email: &str, role: &str) {
        sqlx::query("INSERT INTO users (id, email, role) VALUES (?, ?, ?)")
            .bind(id)
            .bind(email)
            .bind(role)
            .execute(db)
            .await
            .unwrap();
    }

    async fn seed_job(db: &SqlitePool, id: &str, recruiter_id: &str) {
        sqlx::query("INSERT INTO jobs (id, recruiter_id, title, status) VALUES (?, ?, 'Backend Engineer', 'active')")
            .bind(id)
            .bind(recruiter_id)
            .execute(db)
            .await
            .unwrap();
    }

    async fn seed_resume(db: &SqlitePool, id: &str, user_id: &str) {
        sqlx::query("INSERT INTO resumes (id, user_id, data) VALUES (?, ?, ?)")
            .bind(id)
            .bind(user_id)
            .bind(r#"{"personal_info":{"name":"Ada Lovelace"},"skills":["Rust"]}"#)
            .execute(db)
            .await
            .unwrap();
    }

    fn applicant_session() -> Session {
        Session {
            user_id: "U_APP001".to_string(),
            email: "ada@example.com".to_string(),
            role: Role::Applicant,
        }
    }

    fn application_request(job_id: &str) -> CreateApplicationRequest {
        CreateApplicationRequest {
            job_id: job_id.to_string(),
            resume_id: None,
            resume_url: None,
            summary: Some("Five years of backend work".to_string()),
            cover_letter: None,
        }
    }

    #[tokio::test]
    async fn test_second_application_to_same_job_is_rejected() {
        let state = test_state().await;
        {
            let s = state.read().await;
            seed_user(&s.db, "U_REC001", "recruiter@example.com", "recruiter").await;
            seed_user(&s.db, "U_APP001", "ada@example.com", "applicant").await;
            seed_job(&s.db, "J_TEST01", "U_REC001").await;
        }

        let first = create_application(
            Extension(state.clone()),
            applicant_session(),
            Json(application_request("J_TEST01")),
        )
        .await;
        assert!(first.is_ok());

        let second = create_application(
            Extension(state.clone()),
            applicant_session(),
            Json(application_request("J_TEST01")),
        )
        .await;
        match second.err().expect("second submission must be rejected") {
            ApiError::BadRequest(msg) => assert!(msg.contains("already applied")),
            other => panic!("unexpected error: {}", other),
        }

        // The pre-check ran before any write: still exactly one application
        let db = state.read().await.db.clone();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications")
            .fetch_one(&db)
            .await
            .unwrap();
        assert_eq!(count, 1);
        let applicants: i64 =
            sqlx::query_scalar("SELECT applicants FROM jobs WHERE id = 'J_TEST01'")
                .fetch_one(&db)
                .await
                .unwrap();
        assert_eq!(applicants, 1);
    }

    #[tokio::test]
    async fn test_failed_generation_adds_no_resume_rows() {
        let state = test_state().await;
        {
            let s = state.read().await;
            seed_user(&s.db, "U_APP001", "ada@example.com", "applicant").await;
            seed_resume(&s.db, "R_SRC001", "U_APP001").await;
        }

        let request = EnhanceResumeRequest {
            resume: None,
            resume_id: Some("R_SRC001".to_string()),
            job: JobContext {
                title: "Backend Engineer".to_string(),
                description: Some("Build and operate backend services".to_string()),
                ..Default::default()
            },
        };

        let result = enhance_resume(Extension(state.clone()), applicant_session(), Json(request))
            .await;
        assert!(matches!(result, Err(ApiError::ServiceUnavailable(_))));

        // The saved resume is untouched and nothing was appended
        let db = state.read().await.db.clone();
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM resumes WHERE user_id = 'U_APP001'")
                .fetch_one(&db)
                .await
                .unwrap();
        assert_eq!(count, 1);
        let data: String = sqlx::query_scalar("SELECT data FROM resumes WHERE id = 'R_SRC001'")
            .fetch_one(&db)
            .await
            .unwrap();
        assert!(data.contains("Ada Lovelace"));
    }

    #[tokio::test]
    async fn test_saving_enhanced_resume_appends_exactly_one_row() {
        let state = test_state().await;
        {
            let s = state.read().await;
            seed_user(&s.db, "U_REC001", "recruiter@example.com", "recruiter").await;
            seed_user(&s.db, "U_APP001", "ada@example.com", "applicant").await;
            seed_job(&s.db, "J_TEST01", "U_REC001").await;
            seed_resume(&s.db, "R_SRC001", "U_APP001").await;
        }

        let request = SaveResumeRequest {
            label: Some("Tailored for Backend Engineer".to_string()),
            resume: ResumeDoc::default(),
            source_resume_id: Some("R_SRC001".to_string()),
            tailored_job_id: Some("J_TEST01".to_string()),
        };

        let response = save_resume(Extension(state.clone()), applicant_session(), Json(request))
            .await
            .expect("save must succeed");
        assert_eq!(response.0.source_resume_id.as_deref(), Some("R_SRC001"));
        assert_eq!(response.0.tailored_job_id.as_deref(), Some("J_TEST01"));

        let db = state.read().await.db.clone();
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM resumes WHERE user_id = 'U_APP001'")
                .fetch_one(&db)
                .await
                .unwrap();
        assert_eq!(count, 2);

        // The original row is never overwritten
        let data: String = sqlx::query_scalar("SELECT data FROM resumes WHERE id = 'R_SRC001'")
            .fetch_one(&db)
            .await
            .unwrap();
        assert!(data.contains("Ada Lovelace"));
    }
}
