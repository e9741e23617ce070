use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One line of the system audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Uuid,

    pub timestamp: NaiveDateTime,

    /// Username of whoever performed the action
    pub user: String,

    /// Screen or function where the action happened
    pub screen: String,

    /// Action code, e.g. `CREATE`, `UPDATE`, `DELETE`, `LOGIN`
    pub action: String,

    /// Free-form payload, exported as serialized JSON
    pub details: Value,
}
