use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A patient-reported symptom log entry.
///
/// `logged_at` is stored as an ISO-8601-like string exactly as the upstream
/// writer produced it (with or without a time portion). Date bucketing in
/// `crate::history` works on the date-only prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomLog {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub logged_at: String,
    pub symptom_name: String,
    /// 0–10 patient-reported severity score.
    pub severity: u8,
    pub notes: Option<String>,
}
