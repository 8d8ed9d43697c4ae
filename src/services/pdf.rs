// src/services/pdf.rs
//! Resume PDF rendering and text extraction.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use tracing::{debug, info};

use crate::profile::models::ResumeDoc;

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("PDF rendering failed: {0}")]
    Render(String),

    #[error("PDF text extraction failed: {0}")]
    Extract(String),
}

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 6.0;
const WRAP_COLUMNS: usize = 92;

#[derive(Debug, Default)]
pub struct PdfService;

impl PdfService {
    pub fn new() -> Self {
        Self
    }

    /// Extract plain text from an uploaded PDF.
    pub fn extract_text(&self, bytes: &[u8]) -> Result<String, PdfError> {
        let text =
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| PdfError::Extract(e.to_string()))?;
        debug!(chars = text.len(), "Extracted text from uploaded PDF");
        Ok(text)
    }

    /// Render a structured resume document as a single-column PDF.
    pub fn render_resume(&self, resume: &ResumeDoc) -> Result<Vec<u8>, PdfError> {
        let title = if resume.personal_info.name.is_empty() {
            "Resume".to_string()
        } else {
            format!("Resume - {}", resume.personal_info.name)
        };

        let (doc, page, layer) =
            PdfDocument::new(&title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| PdfError::Render(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| PdfError::Render(e.to_string()))?;

        let mut writer = PageWriter {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            cursor_mm: PAGE_HEIGHT_MM - MARGIN_MM,
        };

        writer.line(&resume.personal_info.name, 18.0, &bold);
        let contact: Vec<&str> = [
            resume.personal_info.email.as_deref(),
            resume.personal_info.phone.as_deref(),
            resume.personal_info.location.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !contact.is_empty() {
            writer.line(&contact.join(" | "), 10.0, &regular);
        }
        writer.gap();

        if let Some(summary) = &resume.summary {
            writer.section("Summary", &bold);
            writer.paragraph(summary, &regular);
        }

        if !resume.skills.is_empty() {
            writer.section("Skills", &bold);
            writer.paragraph(&resume.skills.join(", "), &regular);
        }

        if !resume.experience.is_empty() {
            writer.section("Experience", &bold);
            for entry in &resume.experience {
                writer.line(
                    &format!("{} - {}", entry.title, entry.company),
                    11.0,
                    &bold,
                );
                let dates = format!(
                    "{} - {}",
                    entry.start_date.as_deref().unwrap_or(""),
                    entry.end_date.as_deref().unwrap_or("present")
                );
                writer.line(dates.trim(), 9.0, &regular);
                if let Some(description) = &entry.description {
                    writer.paragraph(description, &regular);
                }
                for achievement in &entry.achievements {
                    writer.paragraph(&format!("- {}", achievement), &regular);
                }
                writer.gap();
            }
        }

        if !resume.education.is_empty() {
            writer.section("Education", &bold);
            for entry in &resume.education {
                writer.line(
                    &format!("{} - {}", entry.degree, entry.institution),
                    11.0,
                    &bold,
                );
                if let Some(field) = &entry.field_of_study {
                    writer.line(field, 10.0, &regular);
                }
                writer.gap();
            }
        }

        if !resume.projects.is_empty() {
            writer.section("Projects", &bold);
            for entry in &resume.projects {
                writer.line(&entry.name, 11.0, &bold);
                if let Some(description) = &entry.description {
                    writer.paragraph(description, &regular);
                }
                writer.gap();
            }
        }

        if !resume.certifications.is_empty() {
            writer.section("Certifications", &bold);
            for entry in &resume.certifications {
                let mut line = entry.name.clone();
                if let Some(issuer) = &entry.issuer {
                    line = format!("{} ({})", line, issuer);
                }
                writer.paragraph(&line, &regular);
            }
        }

        drop(writer);
        let bytes = doc
            .save_to_bytes()
            .map_err(|e| PdfError::Render(e.to_string()))?;

        info!(
            bytes = bytes.len(),
            name = %resume.personal_info.name,
            "Rendered resume PDF"
        );

        Ok(bytes)
    }
}

/// Cursor-based writer that spills onto fresh pages as sections grow.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    cursor_mm: f32,
}

impl PageWriter<'_> {
    fn advance(&mut self, by_mm: f32) {
        self.cursor_mm -= by_mm;
        if self.cursor_mm < MARGIN_MM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor_mm = PAGE_HEIGHT_MM - MARGIN_MM;
        }
    }

    fn line(&mut self, text: &str, size: f32, font: &IndirectFontRef) {
        if text.is_empty() {
            return;
        }
        self.layer
            .use_text(text, size, Mm(MARGIN_MM), Mm(self.cursor_mm), font);
        self.advance(LINE_HEIGHT_MM);
    }

    fn section(&mut self, heading: &str, font: &IndirectFontRef) {
        self.advance(2.0);
        self.line(heading, 13.0, font);
    }

    fn paragraph(&mut self, text: &str, font: &IndirectFontRef) {
        for line in wrap_text(text, WRAP_COLUMNS) {
            self.line(&line, 10.0, font);
        }
    }

    fn gap(&mut self) {
        self.advance(LINE_HEIGHT_MM / 2.0);
    }
}

/// Greedy word wrap; words longer than the column limit get their own line.
fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= columns {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::models::{PersonalInfo, ResumeDoc};

    #[test]
    fn test_wrap_text_respects_columns() {
        let lines = wrap_text("one two three four five six seven eight", 15);
        assert!(lines.iter().all(|l| l.len() <= 15));
        assert_eq!(
            lines.join(" "),
            "one two three four five six seven eight"
        );
    }

    #[test]
    fn test_wrap_text_empty() {
        assert!(wrap_text("", 80).is_empty());
        assert!(wrap_text("   ", 80).is_empty());
    }

    #[test]
    fn test_render_minimal_resume_produces_pdf() {
        let service = PdfService::new();
        let resume = ResumeDoc {
            personal_info: PersonalInfo {
                name: "Ada Lovelace".to_string(),
                email: Some("ada@example.com".to_string()),
                ..Default::default()
            },
            summary: Some("Analytical engine programmer.".to_string()),
            skills: vec!["Mathematics".to_string()],
            ..Default::default()
        };

        let bytes = service.render_resume(&resume).expect("render");
        assert!(bytes.starts_with(b"%PDF"));
    }
}
