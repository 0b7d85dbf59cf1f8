use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A medication on the patient's current regimen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
}
