use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled or completed clinical appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub scheduled_at: String,
    pub physician: Option<String>,
    pub visit_type: Option<String>,
}
