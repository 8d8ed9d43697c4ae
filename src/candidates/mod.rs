// src/candidates/mod.rs

pub mod enhancement;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;

#[cfg(test)]
mod tests;

pub use models::{ChangeHighlight, ChangeKind};
pub use routes::candidates_routes;
