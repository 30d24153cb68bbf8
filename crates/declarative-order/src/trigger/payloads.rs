//! Reload trigger payloads

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================
// INCOMING REQUESTS
// ============================================================

/// "Declarations changed" notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadRequest {
    /// Correlation ID for response tracking
    pub correlation_id: Uuid,
    /// Free-form description of what changed
    pub reason: String,
}

impl ReloadRequest {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            reason: reason.into(),
        }
    }
}

// ============================================================
// OUTGOING RESPONSES
// ============================================================

/// Outcome of one reload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReloadResponse {
    /// Correlation ID from request
    pub correlation_id: Uuid,
    /// Whether priorities were applied
    pub success: bool,
    /// Entries written to the registry
    pub applied: usize,
    /// Entries already at their computed priority
    pub unchanged: usize,
    /// Items with no registry entry
    pub unresolved: Vec<String>,
    /// Error kind label (if failed)
    pub error_kind: Option<String>,
    /// Error message (if failed)
    pub error: Option<String>,
}
