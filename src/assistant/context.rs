//! Patient record → assistant context block.
//!
//! Renders one patient's record as the markdown-ish section listing both
//! chat models consume. Display timestamps keep at most the minute
//! (`YYYY-MM-DD HH:MM`-sized prefix); bucketing precision is not needed
//! here, only readability.

use crate::models::PatientRecord;

/// Longest timestamp prefix shown in context lines.
const DISPLAY_TS_LEN: usize = 16;

fn display_ts(timestamp: &str) -> &str {
    timestamp.get(0..DISPLAY_TS_LEN).unwrap_or(timestamp)
}

/// Format the full record as the context block for prompt assembly.
pub fn format_patient_context(record: &PatientRecord) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("## Patient: {}", record.patient.name));
    lines.push(format!("Disease: {}", record.patient.condition));
    lines.push(String::new());

    if !record.medications.is_empty() {
        lines.push("## Current Medications".into());
        for med in &record.medications {
            lines.push(format!("- {} {} {}", med.name, med.dosage, med.frequency));
        }
        lines.push(String::new());
    }

    if !record.history.adherence.is_empty() {
        lines.push("## Medication Adherence (recent)".into());
        for log in record.history.adherence.iter().rev().take(14) {
            let status = if log.taken { "taken" } else { "missed" };
            let note = log
                .notes
                .as_deref()
                .map(|n| format!(" — {n}"))
                .unwrap_or_default();
            lines.push(format!(
                "- {}: {} {}{}",
                log.logged_date, log.medication_name, status, note
            ));
        }
        lines.push(String::new());
    }

    if !record.history.appointments.is_empty() {
        lines.push("## Appointments".into());
        for appt in &record.history.appointments {
            lines.push(format!(
                "- {} | {} | {}",
                display_ts(&appt.scheduled_at),
                appt.physician.as_deref().unwrap_or("N/A"),
                appt.visit_type.as_deref().unwrap_or(""),
            ));
        }
        lines.push(String::new());
    }

    if !record.history.symptom_logs.is_empty() {
        lines.push("## Symptom Logs (patient-reported)".into());
        for log in &record.history.symptom_logs {
            let note = log
                .notes
                .as_deref()
                .map(|n| format!(" — {n}"))
                .unwrap_or_default();
            lines.push(format!(
                "- {} | {} | severity {}{}",
                display_ts(&log.logged_at),
                log.symptom_name,
                log.severity,
                note
            ));
        }
        lines.push(String::new());
    }

    if !record.history.calendar.is_empty() {
        lines.push("## Calendar / Schedule".into());
        for event in &record.history.calendar {
            lines.push(format!(
                "- {} | {} | {}",
                display_ts(&event.event_at),
                event.title.as_deref().unwrap_or(""),
                event.event_type.as_deref().unwrap_or(""),
            ));
        }
    }

    let text = lines.join("\n");
    let text = text.trim_end().to_string();
    if text.is_empty() {
        "No patient data found.".into()
    } else {
        text
    }
}
