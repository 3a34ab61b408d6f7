//! Sync status value object

use std::time::Instant;

/// A short-lived, human-readable message describing the outcome of the
/// most recent sync step. At most one is active per status channel;
/// newer statuses supersede older ones and each expires on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncStatus {
    message: String,
    expires_at: Instant,
}

impl SyncStatus {
    /// Create a status that expires at the given instant
    pub fn new(message: impl Into<String>, expires_at: Instant) -> Self {
        Self {
            message: message.into(),
            expires_at,
        }
    }

    /// The display text
    pub fn message(&self) -> &str {
        &self.message
    }

    /// When this status should disappear unless superseded
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// Whether the display window has already elapsed
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn message_and_expiry_are_kept() {
        let expires = Instant::now() + Duration::from_secs(3);
        let status = SyncStatus::new("Uploaded: receipt-abcd1234.jpg", expires);
        assert_eq!(status.message(), "Uploaded: receipt-abcd1234.jpg");
        assert_eq!(status.expires_at(), expires);
        assert!(!status.is_expired());
    }

    #[test]
    fn expired_when_deadline_passed() {
        let status = SyncStatus::new("done", Instant::now() - Duration::from_millis(1));
        assert!(status.is_expired());
    }
}
