use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A medication adherence event — one scheduled dose, taken or missed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdherenceLog {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub logged_date: String,
    pub medication_name: String,
    pub taken: bool,
    pub notes: Option<String>,
}
