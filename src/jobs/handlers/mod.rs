// src/jobs/handlers/mod.rs

pub mod ai;
pub mod public;
pub mod recruiter;

pub use public::*;
pub use recruiter::*;
