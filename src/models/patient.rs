use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::adherence::AdherenceLog;
use super::appointment::Appointment;
use super::calendar_event::CalendarEvent;
use super::enums::SymptomBurden;
use super::medication::Medication;
use super::symptom::SymptomLog;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub condition: String,
    pub last_visit: Option<NaiveDate>,
    pub burden: SymptomBurden,
    pub alert: bool,
}

/// The four per-patient history collections, as fetched from storage.
///
/// This is the payload the history and insights modules consume. Record
/// order within each collection is the storage order; the consumers
/// preserve it when grouping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientHistory {
    pub symptom_logs: Vec<SymptomLog>,
    pub adherence: Vec<AdherenceLog>,
    pub appointments: Vec<Appointment>,
    pub calendar: Vec<CalendarEvent>,
}

/// Everything known about one patient — header, regimen, and history.
/// Assembled by the repository in a single fetch, consumed by the
/// dashboard and assistant layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient: Patient,
    pub medications: Vec<Medication>,
    pub history: PatientHistory,
}
