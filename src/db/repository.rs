use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::DatabaseError;
use crate::models::enums::SymptomBurden;
use crate::models::*;

// ═══════════════════════════════════════════
// Patients
// ═══════════════════════════════════════════

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patients (id, name, condition, last_visit, burden, alert)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            patient.id.to_string(),
            patient.name,
            patient.condition,
            patient.last_visit.map(|d| d.to_string()),
            patient.burden.as_str(),
            patient.alert as i32,
        ],
    )?;
    Ok(())
}

pub fn get_patient(conn: &Connection, id: &Uuid) -> Result<Option<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, condition, last_visit, burden, alert FROM patients WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_string()], |row| {
        Ok(PatientRow {
            id: row.get::<_, String>(0)?,
            name: row.get::<_, String>(1)?,
            condition: row.get::<_, String>(2)?,
            last_visit: row.get::<_, Option<String>>(3)?,
            burden: row.get::<_, String>(4)?,
            alert: row.get::<_, i32>(5)?,
        })
    });

    match result {
        Ok(row) => Ok(Some(patient_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List the full patient panel, ordered by name.
pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, condition, last_visit, burden, alert FROM patients ORDER BY name",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(PatientRow {
            id: row.get::<_, String>(0)?,
            name: row.get::<_, String>(1)?,
            condition: row.get::<_, String>(2)?,
            last_visit: row.get::<_, Option<String>>(3)?,
            burden: row.get::<_, String>(4)?,
            alert: row.get::<_, i32>(5)?,
        })
    })?;

    let mut patients = Vec::new();
    for row in rows {
        patients.push(patient_from_row(row?)?);
    }
    Ok(patients)
}

pub fn count_patients(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM patients", [], |row| {
        row.get::<_, i64>(0)
    })?;
    Ok(count)
}

// Internal row type for Patient mapping
struct PatientRow {
    id: String,
    name: String,
    condition: String,
    last_visit: Option<String>,
    burden: String,
    alert: i32,
}

fn patient_from_row(row: PatientRow) -> Result<Patient, DatabaseError> {
    Ok(Patient {
        id: parse_uuid(&row.id)?,
        name: row.name,
        condition: row.condition,
        last_visit: row
            .last_visit
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        burden: SymptomBurden::from_str(&row.burden)?,
        alert: row.alert != 0,
    })
}

fn parse_uuid(s: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(s).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}

// ═══════════════════════════════════════════
// Medications
// ═══════════════════════════════════════════

pub fn insert_medication(conn: &Connection, med: &Medication) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO medications (id, patient_id, name, dosage, frequency)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            med.id.to_string(),
            med.patient_id.to_string(),
            med.name,
            med.dosage,
            med.frequency,
        ],
    )?;
    Ok(())
}

pub fn fetch_medications(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<Medication>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, name, dosage, frequency
         FROM medications WHERE patient_id = ?1 ORDER BY name",
    )?;

    let rows = stmt.query_map(params![patient_id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
        ))
    })?;

    let mut medications = Vec::new();
    for row in rows {
        let (id, pid, name, dosage, frequency) = row?;
        medications.push(Medication {
            id: parse_uuid(&id)?,
            patient_id: parse_uuid(&pid)?,
            name,
            dosage,
            frequency,
        });
    }
    Ok(medications)
}

// ═══════════════════════════════════════════
// History records
// ═══════════════════════════════════════════

pub fn insert_symptom_log(conn: &Connection, log: &SymptomLog) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO symptom_logs (id, patient_id, logged_at, symptom_name, severity, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            log.id.to_string(),
            log.patient_id.to_string(),
            log.logged_at,
            log.symptom_name,
            log.severity as i32,
            log.notes,
        ],
    )?;
    Ok(())
}

pub fn insert_adherence_log(conn: &Connection, log: &AdherenceLog) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO adherence_logs (id, patient_id, logged_date, medication_name, taken, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            log.id.to_string(),
            log.patient_id.to_string(),
            log.logged_date,
            log.medication_name,
            log.taken as i32,
            log.notes,
        ],
    )?;
    Ok(())
}

pub fn insert_appointment(conn: &Connection, appt: &Appointment) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (id, patient_id, scheduled_at, physician, visit_type)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            appt.id.to_string(),
            appt.patient_id.to_string(),
            appt.scheduled_at,
            appt.physician,
            appt.visit_type,
        ],
    )?;
    Ok(())
}

pub fn insert_calendar_event(conn: &Connection, event: &CalendarEvent) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO calendar_events (id, patient_id, event_at, title, event_type)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            event.id.to_string(),
            event.patient_id.to_string(),
            event.event_at,
            event.title,
            event.event_type,
        ],
    )?;
    Ok(())
}

/// Fetch the four history collections for one patient in a single call.
///
/// Each collection comes back in chronological storage order; downstream
/// grouping preserves that order within a day.
pub fn fetch_patient_history(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<PatientHistory, DatabaseError> {
    let pid = patient_id.to_string();

    let mut stmt = conn.prepare(
        "SELECT id, patient_id, logged_at, symptom_name, severity, notes
         FROM symptom_logs WHERE patient_id = ?1 ORDER BY logged_at",
    )?;
    let rows = stmt.query_map(params![pid], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, i32>(4)?,
            row.get::<_, Option<String>>(5)?,
        ))
    })?;
    let mut symptom_logs = Vec::new();
    for row in rows {
        let (id, pid, logged_at, symptom_name, severity, notes) = row?;
        symptom_logs.push(SymptomLog {
            id: parse_uuid(&id)?,
            patient_id: parse_uuid(&pid)?,
            logged_at,
            symptom_name,
            severity: severity.clamp(0, 10) as u8,
            notes,
        });
    }

    let mut stmt = conn.prepare(
        "SELECT id, patient_id, logged_date, medication_name, taken, notes
         FROM adherence_logs WHERE patient_id = ?1 ORDER BY logged_date",
    )?;
    let rows = stmt.query_map(params![pid], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, i32>(4)?,
            row.get::<_, Option<String>>(5)?,
        ))
    })?;
    let mut adherence = Vec::new();
    for row in rows {
        let (id, pid, logged_date, medication_name, taken, notes) = row?;
        adherence.push(AdherenceLog {
            id: parse_uuid(&id)?,
            patient_id: parse_uuid(&pid)?,
            logged_date,
            medication_name,
            taken: taken != 0,
            notes,
        });
    }

    let mut stmt = conn.prepare(
        "SELECT id, patient_id, scheduled_at, physician, visit_type
         FROM appointments WHERE patient_id = ?1 ORDER BY scheduled_at",
    )?;
    let rows = stmt.query_map(params![pid], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
            row.get::<_, Option<String>>(4)?,
        ))
    })?;
    let mut appointments = Vec::new();
    for row in rows {
        let (id, pid, scheduled_at, physician, visit_type) = row?;
        appointments.push(Appointment {
            id: parse_uuid(&id)?,
            patient_id: parse_uuid(&pid)?,
            scheduled_at,
            physician,
            visit_type,
        });
    }

    let mut stmt = conn.prepare(
        "SELECT id, patient_id, event_at, title, event_type
         FROM calendar_events WHERE patient_id = ?1 ORDER BY event_at",
    )?;
    let rows = stmt.query_map(params![pid], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
            row.get::<_, Option<String>>(4)?,
        ))
    })?;
    let mut calendar = Vec::new();
    for row in rows {
        let (id, pid, event_at, title, event_type) = row?;
        calendar.push(CalendarEvent {
            id: parse_uuid(&id)?,
            patient_id: parse_uuid(&pid)?,
            event_at,
            title,
            event_type,
        });
    }

    Ok(PatientHistory {
        symptom_logs,
        adherence,
        appointments,
        calendar,
    })
}

/// Assemble the complete per-patient record: header, regimen, history.
pub fn fetch_patient_record(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Option<PatientRecord>, DatabaseError> {
    let Some(patient) = get_patient(conn, patient_id)? else {
        return Ok(None);
    };
    let medications = fetch_medications(conn, patient_id)?;
    let history = fetch_patient_history(conn, patient_id)?;
    Ok(Some(PatientRecord {
        patient,
        medications,
        history,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    fn test_patient() -> Patient {
        Patient {
            id: Uuid::new_v4(),
            name: "Alex Chen".into(),
            condition: "Empty Nose Syndrome".into(),
            last_visit: NaiveDate::from_ymd_opt(2026, 1, 15),
            burden: SymptomBurden::ModerateHigh,
            alert: true,
        }
    }

    #[test]
    fn patient_round_trips() {
        let conn = open_memory_database().unwrap();
        let patient = test_patient();
        insert_patient(&conn, &patient).unwrap();

        let loaded = get_patient(&conn, &patient.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Alex Chen");
        assert_eq!(loaded.burden, SymptomBurden::ModerateHigh);
        assert_eq!(loaded.last_visit, NaiveDate::from_ymd_opt(2026, 1, 15));
        assert!(loaded.alert);
    }

    #[test]
    fn unknown_patient_is_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_patient(&conn, &Uuid::new_v4()).unwrap().is_none());
        assert!(fetch_patient_record(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn history_fetch_collects_all_four_kinds() {
        let conn = open_memory_database().unwrap();
        let patient = test_patient();
        insert_patient(&conn, &patient).unwrap();

        insert_symptom_log(
            &conn,
            &SymptomLog {
                id: Uuid::new_v4(),
                patient_id: patient.id,
                logged_at: "2026-02-25T08:00:00Z".into(),
                symptom_name: "Pain".into(),
                severity: 8,
                notes: Some("worse at night".into()),
            },
        )
        .unwrap();
        insert_adherence_log(
            &conn,
            &AdherenceLog {
                id: Uuid::new_v4(),
                patient_id: patient.id,
                logged_date: "2026-02-25".into(),
                medication_name: "Gabapentin".into(),
                taken: false,
                notes: None,
            },
        )
        .unwrap();
        insert_appointment(
            &conn,
            &Appointment {
                id: Uuid::new_v4(),
                patient_id: patient.id,
                scheduled_at: "2026-03-11T09:30:00Z".into(),
                physician: Some("Dr. Osei".into()),
                visit_type: Some("imaging".into()),
            },
        )
        .unwrap();
        insert_calendar_event(
            &conn,
            &CalendarEvent {
                id: Uuid::new_v4(),
                patient_id: patient.id,
                event_at: "2026-03-18".into(),
                title: Some("ENT consult".into()),
                event_type: Some("consult".into()),
            },
        )
        .unwrap();

        let history = fetch_patient_history(&conn, &patient.id).unwrap();
        assert_eq!(history.symptom_logs.len(), 1);
        assert_eq!(history.adherence.len(), 1);
        assert_eq!(history.appointments.len(), 1);
        assert_eq!(history.calendar.len(), 1);
        assert_eq!(history.symptom_logs[0].severity, 8);
        assert!(!history.adherence[0].taken);
    }

    #[test]
    fn history_is_scoped_to_the_patient() {
        let conn = open_memory_database().unwrap();
        let a = test_patient();
        let mut b = test_patient();
        b.id = Uuid::new_v4();
        b.name = "Maria Fernandez".into();
        insert_patient(&conn, &a).unwrap();
        insert_patient(&conn, &b).unwrap();

        insert_symptom_log(
            &conn,
            &SymptomLog {
                id: Uuid::new_v4(),
                patient_id: a.id,
                logged_at: "2026-02-25".into(),
                symptom_name: "Pain".into(),
                severity: 5,
                notes: None,
            },
        )
        .unwrap();

        assert_eq!(fetch_patient_history(&conn, &a.id).unwrap().symptom_logs.len(), 1);
        assert!(fetch_patient_history(&conn, &b.id).unwrap().symptom_logs.is_empty());
    }

    #[test]
    fn panel_lists_patients_by_name() {
        let conn = open_memory_database().unwrap();
        let mut a = test_patient();
        a.name = "Priya Nair".into();
        let mut b = test_patient();
        b.id = Uuid::new_v4();
        b.name = "James Liu".into();
        insert_patient(&conn, &a).unwrap();
        insert_patient(&conn, &b).unwrap();

        let panel = list_patients(&conn).unwrap();
        let names: Vec<_> = panel.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["James Liu", "Priya Nair"]);
        assert_eq!(count_patients(&conn).unwrap(), 2);
    }
}
