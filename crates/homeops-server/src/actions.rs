//! Action execution.
//!
//! Intentionally inert: a recognized action is logged and acknowledged,
//! never executed. This is the placeholder for future mutating
//! operations gated behind stronger confirmation semantics.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use homeops_core::{ActionAck, GatewayError};
use serde::Serialize;
use uuid::Uuid;

/// Known, non-destructive action identifiers. Anything else is rejected
/// before a record is created.
pub const ALLOWED_ACTIONS: &[&str] = &[
    "restart_container",
    "stop_container",
    "scan_library",
    "pause_session",
];

/// One logged "execute" request. In-memory only; gone at process exit.
#[derive(Debug, Clone, Serialize)]
pub struct ActionRecord {
    pub id: Uuid,
    pub action: String,
    pub params: serde_json::Value,
    pub requested_at: DateTime<Utc>,
}

/// Append-only, in-process action log.
///
/// The mutex is held only for the append or the snapshot copy, never
/// across an await.
#[derive(Default)]
pub struct ActionLog {
    records: Mutex<Vec<ActionRecord>>,
}

impl ActionLog {
    /// Validate `action` against the allow-list, append a record, and
    /// return the acknowledgment. The timestamp is assigned here, on
    /// arrival.
    pub fn execute(
        &self,
        action: &str,
        params: serde_json::Value,
    ) -> Result<ActionAck, GatewayError> {
        if !ALLOWED_ACTIONS.contains(&action) {
            return Err(GatewayError::UnknownAction(action.to_string()));
        }

        let record = ActionRecord {
            id: Uuid::new_v4(),
            action: action.to_string(),
            params,
            requested_at: Utc::now(),
        };
        tracing::info!(
            action = %record.action,
            record_id = %record.id,
            "action_requested (logged, not executed)"
        );

        let ack = ActionAck {
            action: record.action.clone(),
            status: "simulated".to_string(),
            record_id: record.id,
            timestamp: record.requested_at,
        };

        let mut records = self
            .records
            .lock()
            .map_err(|_| GatewayError::Internal("action log poisoned".to_string()))?;
        records.push(record);
        Ok(ack)
    }

    /// Copy of the records logged so far.
    pub fn snapshot(&self) -> Vec<ActionRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }
}
