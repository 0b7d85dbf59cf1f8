//! Demo dataset — a small patient panel with one richly-logged patient.
//!
//! Seeded into a fresh database so the dashboard renders end-to-end without
//! an external data source. IDs are v5 UUIDs derived from stable codes so
//! reseeding and cross-referencing stay deterministic.

use rusqlite::Connection;
use uuid::Uuid;

use crate::db::{
    count_patients, insert_adherence_log, insert_appointment, insert_calendar_event,
    insert_medication, insert_patient, insert_symptom_log, DatabaseError,
};
use crate::models::enums::SymptomBurden;
use crate::models::{
    AdherenceLog, Appointment, CalendarEvent, Medication, Patient, SymptomLog,
};

/// Deterministic id for a demo entity, derived from its stable code.
pub fn demo_id(code: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("flareline:{code}").as_bytes())
}

/// Daily peak severity for the demo patient across February 2026.
const FEBRUARY_SEVERITY: [u8; 28] = [
    2, 3, 6, 8, 7, 4, 2, //
    1, 2, 5, 9, 8, 5, 3, //
    2, 1, 3, 5, 4, 2, 1, //
    3, 4, 6, 7, 6, 3, 2,
];

/// (day-of-month, medication) doses missed in February.
const MISSED_DOSES: [(u32, &str); 5] = [
    (5, "Melatonin"),
    (11, "Gabapentin"),
    (19, "Melatonin"),
    (25, "Gabapentin"),
    (25, "Melatonin"),
];

const DAILY_MEDICATIONS: [&str; 3] = ["Gabapentin", "Vitamin D", "Melatonin"];

/// Seed the demo panel into an empty database. A database that already has
/// patients is left untouched.
pub fn seed_demo_data(conn: &Connection) -> Result<(), DatabaseError> {
    if count_patients(conn)? > 0 {
        tracing::debug!("Database already populated, skipping demo seed");
        return Ok(());
    }
    tracing::info!("Seeding demo patient panel");

    seed_panel(conn)?;
    seed_alex_history(conn)?;
    Ok(())
}

fn seed_panel(conn: &Connection) -> Result<(), DatabaseError> {
    let panel = [
        ("P001", "Alex Chen", "Empty Nose Syndrome", "2026-01-15", SymptomBurden::ModerateHigh, true),
        ("P002", "Maria Fernandez", "CRPS Type II", "2026-02-12", SymptomBurden::Moderate, false),
        ("P003", "James Liu", "Undiagnosed — Autonomic", "2026-02-20", SymptomBurden::High, true),
        ("P004", "Priya Nair", "Ehlers-Danlos Syndrome", "2026-01-28", SymptomBurden::Low, false),
    ];

    for (code, name, condition, last_visit, burden, alert) in panel {
        insert_patient(
            conn,
            &Patient {
                id: demo_id(&format!("patient:{code}")),
                name: name.into(),
                condition: condition.into(),
                last_visit: last_visit.parse().ok(),
                burden,
                alert,
            },
        )?;
    }
    Ok(())
}

fn seed_alex_history(conn: &Connection) -> Result<(), DatabaseError> {
    let patient_id = demo_id("patient:P001");

    let regimen = [
        ("Gabapentin", "300mg", "TID"),
        ("Clonazepam", "0.5mg", "PRN"),
        ("Vitamin D", "2000IU", "daily"),
        ("Melatonin", "5mg", "nightly"),
    ];
    for (name, dosage, frequency) in regimen {
        insert_medication(
            conn,
            &Medication {
                id: demo_id(&format!("medication:P001:{name}")),
                patient_id,
                name: name.into(),
                dosage: dosage.into(),
                frequency: frequency.into(),
            },
        )?;
    }

    // One symptom log per February day; breathing complaints cluster late
    // in the month, matching the flare the dashboard should surface.
    for (i, &severity) in FEBRUARY_SEVERITY.iter().enumerate() {
        let day = (i + 1) as u32;
        let symptom_name = if day >= 24 {
            "Breathing"
        } else if day % 3 == 0 {
            "Fatigue"
        } else {
            "Pain"
        };
        let notes = (day == 25).then(|| "worse at night, interrupted sleep".to_string());
        insert_symptom_log(
            conn,
            &SymptomLog {
                id: demo_id(&format!("symptom:P001:{day}")),
                patient_id,
                logged_at: format!("2026-02-{day:02}T20:30:00Z"),
                symptom_name: symptom_name.into(),
                severity,
                notes,
            },
        )?;
    }

    for day in 1..=28u32 {
        for med in DAILY_MEDICATIONS {
            let taken = !MISSED_DOSES.contains(&(day, med));
            insert_adherence_log(
                conn,
                &AdherenceLog {
                    id: demo_id(&format!("adherence:P001:{day}:{med}")),
                    patient_id,
                    logged_date: format!("2026-02-{day:02}"),
                    medication_name: med.into(),
                    taken,
                    notes: None,
                },
            )?;
        }
    }

    let appointments = [
        ("A1", "2026-01-15T10:00:00Z", "Dr. Rivera", "neurology"),
        ("A2", "2026-03-04T09:30:00Z", "Dr. Rivera", "follow_up"),
        ("A3", "2026-03-18T14:00:00Z", "Dr. Osei", "ent_consult"),
    ];
    for (code, scheduled_at, physician, visit_type) in appointments {
        insert_appointment(
            conn,
            &Appointment {
                id: demo_id(&format!("appointment:P001:{code}")),
                patient_id,
                scheduled_at: scheduled_at.into(),
                physician: Some(physician.into()),
                visit_type: Some(visit_type.into()),
            },
        )?;
    }

    insert_calendar_event(
        conn,
        &CalendarEvent {
            id: demo_id("calendar:P001:mri"),
            patient_id,
            event_at: "2026-03-11T08:00:00Z".into(),
            title: Some("MRI Scan — Mass General".into()),
            event_type: Some("imaging".into()),
        },
    )?;
    insert_calendar_event(
        conn,
        &CalendarEvent {
            id: demo_id("calendar:P001:pt"),
            patient_id,
            event_at: "2026-02-14T16:00:00Z".into(),
            title: Some("Physical therapy".into()),
            event_type: Some("therapy".into()),
        },
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{fetch_patient_history, list_patients, open_memory_database};
    use crate::history::{build_date_index, build_month_matrix, MedicationStatus};

    #[test]
    fn seed_populates_the_panel() {
        let conn = open_memory_database().unwrap();
        seed_demo_data(&conn).unwrap();

        let panel = list_patients(&conn).unwrap();
        assert_eq!(panel.len(), 4);
        assert!(panel.iter().any(|p| p.name == "Alex Chen" && p.alert));
    }

    #[test]
    fn seed_is_idempotent() {
        let conn = open_memory_database().unwrap();
        seed_demo_data(&conn).unwrap();
        seed_demo_data(&conn).unwrap();
        assert_eq!(list_patients(&conn).unwrap().len(), 4);
    }

    #[test]
    fn demo_history_drives_the_february_grid() {
        let conn = open_memory_database().unwrap();
        seed_demo_data(&conn).unwrap();

        let history = fetch_patient_history(&conn, &demo_id("patient:P001")).unwrap();
        assert_eq!(history.symptom_logs.len(), 28);

        let index = build_date_index(&history);
        let matrix = build_month_matrix(&index, 2026, 1);
        let day_11 = matrix.iter().flatten().find(|c| c.day == 11).unwrap();
        assert_eq!(day_11.max_severity, 9);
        assert_eq!(day_11.medication, MedicationStatus::SomeMissed);

        let day_14 = matrix.iter().flatten().find(|c| c.day == 14).unwrap();
        assert_eq!(day_14.medication, MedicationStatus::AllTaken);
        assert!(day_14.has_event); // physical therapy session
    }
}
