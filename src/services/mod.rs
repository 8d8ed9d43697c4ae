// src/services/mod.rs
//
// Shared services module containing business logic services
// that can be used across different domain modules

pub mod genai;
pub mod pdf;

// Re-export commonly used types for convenience
pub use genai::{GenAiConfig, GenAiError, GenAiService, GenerationPurpose};
pub use pdf::PdfService;
