use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A patient calendar entry (scan, therapy session, reminder, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub event_at: String,
    pub title: Option<String>,
    pub event_type: Option<String>,
}
