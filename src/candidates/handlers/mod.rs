// src/candidates/handlers/mod.rs

pub mod applications;
pub mod enhancement;
pub mod files;
pub mod resumes;

pub use applications::{create_application, get_user_applications, list_job_applications};
pub use enhancement::enhance_resume;
pub use files::{generate_resume_pdf, proxy_file};
pub use resumes::parse_resume;
