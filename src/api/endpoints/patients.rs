//! Patient panel, dashboard metrics, and the calendar history view.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;
use crate::history::{
    build_date_index, build_month_matrix, severity_color_class, shift_month, MedicationStatus,
    SeverityBand,
};
use crate::insights::{compute_dashboard, DashboardData};
use crate::models::Patient;

// ── Panel ──────────────────────────────────────────────────────────────────

/// One card of the physician's patient panel.
#[derive(Debug, Serialize)]
pub struct PatientCard {
    pub id: Uuid,
    pub name: String,
    pub condition: String,
    /// Display form, e.g. "Jan 15".
    pub last_visit: Option<String>,
    pub severity: &'static str,
    pub alert: bool,
}

impl From<&Patient> for PatientCard {
    fn from(p: &Patient) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            condition: p.condition.clone(),
            last_visit: p.last_visit.map(|d| d.format("%b %d").to_string()),
            severity: p.burden.label(),
            alert: p.alert,
        }
    }
}

#[derive(Serialize)]
pub struct PatientsResponse {
    pub patients: Vec<PatientCard>,
}

/// `GET /api/patients` — the full panel.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<PatientsResponse>, ApiError> {
    let conn = ctx.db.lock().map_err(|_| ApiError::Internal("db lock poisoned".into()))?;
    let patients = db::list_patients(&conn)?;
    Ok(Json(PatientsResponse {
        patients: patients.iter().map(PatientCard::from).collect(),
    }))
}

// ── Dashboard ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DashboardResponse {
    pub patient: PatientCard,
    #[serde(flatten)]
    pub data: DashboardData,
}

/// `GET /api/patients/:id/dashboard` — insight cards and chart series.
pub async fn dashboard(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let conn = ctx.db.lock().map_err(|_| ApiError::Internal("db lock poisoned".into()))?;
    let record = db::fetch_patient_record(&conn, &id)?
        .ok_or_else(|| ApiError::NotFound(format!("patient {id}")))?;

    let today = Utc::now().date_naive();
    Ok(Json(DashboardResponse {
        patient: PatientCard::from(&record.patient),
        data: compute_dashboard(&record.history, today),
    }))
}

// ── History ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Calendar year; defaults to the current UTC year.
    pub year: Option<i32>,
    /// Zero-based month (0 = January); defaults to the current UTC month.
    pub month: Option<i32>,
}

/// A rendered month-grid cell: the aggregate plus its heat band.
#[derive(Debug, Serialize)]
pub struct CellView {
    pub day: u32,
    pub max_severity: u8,
    pub medication: MedicationStatus,
    pub has_event: bool,
    pub band: SeverityBand,
    pub light_text: bool,
}

#[derive(Debug, Serialize)]
pub struct MonthRef {
    pub year: i32,
    pub month: i32,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub year: i32,
    pub month: i32,
    /// Sunday-first month grid; `null` entries are padding cells.
    pub matrix: Vec<Option<CellView>>,
    pub prev: MonthRef,
    pub next: MonthRef,
}

/// `GET /api/patients/:id/history?year=&month=` — the calendar view.
pub async fn history(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let conn = ctx.db.lock().map_err(|_| ApiError::Internal("db lock poisoned".into()))?;
    if db::get_patient(&conn, &id)?.is_none() {
        return Err(ApiError::NotFound(format!("patient {id}")));
    }
    let records = db::fetch_patient_history(&conn, &id)?;
    drop(conn);

    let now = Utc::now();
    let year = query.year.unwrap_or_else(|| now.year());
    let month = query.month.unwrap_or(now.month0() as i32).clamp(0, 11);

    let index = build_date_index(&records);
    let matrix = build_month_matrix(&index, year, month)
        .into_iter()
        .map(|cell| {
            cell.map(|c| {
                let band = severity_color_class(c.max_severity as i32);
                CellView {
                    day: c.day,
                    max_severity: c.max_severity,
                    medication: c.medication,
                    has_event: c.has_event,
                    band,
                    light_text: band.light_text(),
                }
            })
        })
        .collect();

    let (prev_year, prev_month) = shift_month(year, month, -1);
    let (next_year, next_month) = shift_month(year, month, 1);

    Ok(Json(HistoryResponse {
        year,
        month,
        matrix,
        prev: MonthRef {
            year: prev_year,
            month: prev_month,
        },
        next: MonthRef {
            year: next_year,
            month: next_month,
        },
    }))
}
