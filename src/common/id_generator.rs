// src/common/id_generator.rs
//! Crockford Base32 ID generator.
//!
//! Produces short, prefixed, human-readable identifiers in the form
//! PREFIX_XXXXXX (e.g. J_K7NP3X for a job listing). The alphabet excludes
//! I, L, O and U so ids survive being read over the phone.

use rand::Rng;

const CROCKFORD_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Entity type prefixes for ID generation
#[derive(Debug, Clone, Copy)]
pub enum EntityPrefix {
    /// Job listing (J_)
    Job,
    /// Resume document (R_)
    Resume,
    /// Application (A_)
    Application,
    /// User (U_)
    User,
    /// Notification (N_)
    Notification,
    /// Job view record (W_) - W for Watch/View
    View,
}

impl EntityPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::Job => "J",
            EntityPrefix::Resume => "R",
            EntityPrefix::Application => "A",
            EntityPrefix::User => "U",
            EntityPrefix::Notification => "N",
            EntityPrefix::View => "W",
        }
    }
}

fn generate_crockford_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..32);
            CROCKFORD_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a prefixed ID in the format "PREFIX_XXXXXX" (e.g. "J_K7NP3X")
pub fn generate_id(prefix: EntityPrefix) -> String {
    format!("{}_{}", prefix.as_str(), generate_crockford_string(6))
}

/// Check whether a string looks like an ID carrying the given prefix
pub fn has_prefix(id: &str, prefix: EntityPrefix) -> bool {
    match id.split_once('_') {
        Some((p, rest)) => {
            p == prefix.as_str()
                && !rest.is_empty()
                && rest.bytes().all(|b| CROCKFORD_ALPHABET.contains(&b))
        }
        None => false,
    }
}

// ============================================================================
// Convenience functions for each entity type
// ============================================================================

/// Generate a Job ID (J_XXXXXX)
pub fn generate_job_id() -> String {
    generate_id(EntityPrefix::Job)
}

/// Generate a Resume ID (R_XXXXXX)
pub fn generate_resume_id() -> String {
    generate_id(EntityPrefix::Resume)
}

/// Generate an Application ID (A_XXXXXX)
pub fn generate_application_id() -> String {
    generate_id(EntityPrefix::Application)
}

/// Generate a User ID (U_XXXXXX)
pub fn generate_user_id() -> String {
    generate_id(EntityPrefix::User)
}

/// Generate a Notification ID (N_XXXXXX)
pub fn generate_notification_id() -> String {
    generate_id(EntityPrefix::Notification)
}

/// Generate a View ID (W_XXXXXX)
pub fn generate_view_id() -> String {
    generate_id(EntityPrefix::View)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_id_format() {
        let job_id = generate_job_id();
        assert!(job_id.starts_with("J_"));
        assert_eq!(job_id.len(), 8); // "J_" + 6 chars

        let resume_id = generate_resume_id();
        assert!(resume_id.starts_with("R_"));
        assert_eq!(resume_id.len(), 8);
    }

    #[test]
    fn test_crockford_alphabet_only() {
        let id = generate_job_id();
        let random_part = &id[2..];

        for c in random_part.chars() {
            assert!(
                CROCKFORD_ALPHABET.contains(&(c as u8)),
                "Character '{}' not in Crockford alphabet",
                c
            );
        }

        assert!(!random_part.contains('I'));
        assert!(!random_part.contains('L'));
        assert!(!random_part.contains('O'));
        assert!(!random_part.contains('U'));
    }

    #[test]
    fn test_uniqueness() {
        let mut ids = HashSet::new();
        for _ in 0..1000 {
            let id = generate_job_id();
            assert!(ids.insert(id), "Duplicate ID generated");
        }
    }

    #[test]
    fn test_has_prefix() {
        let id = generate_application_id();
        assert!(has_prefix(&id, EntityPrefix::Application));
        assert!(!has_prefix(&id, EntityPrefix::Job));
        assert!(!has_prefix("garbage", EntityPrefix::Job));
        assert!(!has_prefix("J_", EntityPrefix::Job));
        assert!(!has_prefix("J_ilou!", EntityPrefix::Job));
    }

    #[test]
    fn test_all_prefixes() {
        assert!(generate_job_id().starts_with("J_"));
        assert!(generate_resume_id().starts_with("R_"));
        assert!(generate_application_id().starts_with("A_"));
        assert!(generate_user_id().starts_with("U_"));
        assert!(generate_notification_id().starts_with("N_"));
        assert!(generate_view_id().starts_with("W_"));
    }
}
