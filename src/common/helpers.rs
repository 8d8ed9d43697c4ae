// src/common/helpers.rs
//! Small shared helpers

use chrono::Utc;

/// Mask an email address for log output (keeps the first two characters
/// of the local part and the full domain).
pub fn safe_email_log(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let visible: String = local.chars().take(2).collect();
            format!("{}***@{}", visible, domain)
        }
        None => "***".to_string(),
    }
}

/// Current wall-clock time as Unix epoch seconds
pub fn now_epoch_seconds() -> i64 {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_email_log_masks_local_part() {
        assert_eq!(safe_email_log("alice@example.com"), "al***@example.com");
        assert_eq!(safe_email_log("not-an-email"), "***");
    }
}
