// src/profile/mod.rs

pub mod handlers;
pub mod models;
pub mod routes;

pub use models::{PersonalInfo, ResumeDoc};
pub use routes::profile_routes;
