// src/auth/mod.rs

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;

// Re-export commonly used items
pub use extractors::Session;
pub use models::Role;
pub use routes::auth_routes;
