use axum::Json;
use axum::extract::{Path, Query};
use axum::routing::{delete, patch};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::db::{notes, reminders};
use crate::error::AppError;
use crate::models::*;
use crate::presentation::grouping::{DateChip, date_chip, group_reminders_by_date};
use crate::state::AppState;

#[derive(Deserialize)]
struct NoteQueryParams {
    course_id: Option<String>,
    #[serde(default)]
    starred: bool,
    q: Option<String>,
}

#[derive(Deserialize)]
struct ReminderQueryParams {
    course_id: Option<String>,
    from: Option<i64>,
    to: Option<i64>,
}

#[derive(Debug, PartialEq)]
enum ReminderListing {
    Range(i64, i64),
    Course(String),
    All,
}

impl ReminderQueryParams {
    /// A lone `from` or `to` is rejected rather than silently ignored.
    fn listing(self) -> Result<ReminderListing, AppError> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Ok(ReminderListing::Range(from, to)),
            (Some(_), None) | (None, Some(_)) => Err(AppError::BadRequest(
                "from and to must be supplied together".to_string(),
            )),
            (None, None) => Ok(match self.course_id {
                Some(course_id) => ReminderListing::Course(course_id),
                None => ReminderListing::All,
            }),
        }
    }
}

#[derive(Deserialize)]
struct StarRequest {
    is_starred: bool,
}

#[derive(Deserialize)]
struct CompleteRequest {
    is_completed: bool,
}

#[derive(Serialize)]
struct DeletedResponse {
    deleted: u64,
}

#[derive(Serialize)]
struct AgendaSection {
    label: String,
    chip: DateChip,
    reminders: Vec<Reminder>,
}

#[derive(Serialize)]
struct MaintenanceStatus {
    /// False when the check was dropped because one was in flight.
    checked: bool,
    under_maintenance: Option<bool>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/{id}", get(get_note).put(update_note).delete(delete_note))
        .route("/notes/{id}/star", patch(star_note))
        .route("/reminders", get(list_reminders).post(create_reminder))
        .route("/reminders/agenda", get(reminder_agenda))
        .route(
            "/reminders/{id}",
            get(get_reminder).put(update_reminder).delete(delete_reminder),
        )
        .route("/reminders/{id}/complete", patch(complete_reminder))
        .route("/courses/{id}/notes", delete(delete_course_notes))
        .route("/courses/{id}/reminders", delete(delete_course_reminders))
        .route("/maintenance", get(maintenance_status))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_notes(
    State(state): State<AppState>,
    Query(params): Query<NoteQueryParams>,
) -> Result<Json<Vec<Note>>, AppError> {
    if let Some(q) = params.q {
        let found = notes::search_notes(&state.db, &q).await?;
        return Ok(Json(found));
    }

    let course_id = params
        .course_id
        .ok_or_else(|| AppError::BadRequest("course_id or q is required".to_string()))?;
    let found = notes::fetch_notes_for_course(&state.db, &course_id, params.starred).await?;
    Ok(Json(found))
}

async fn create_note(
    State(state): State<AppState>,
    Json(req): Json<NewNoteRequest>,
) -> Result<Json<Note>, AppError> {
    let note = notes::insert_note(&state.db, req).await?;
    Ok(Json(note))
}

async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Note>, AppError> {
    let note = notes::find_note_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(note))
}

async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateNoteRequest>,
) -> Result<Json<Note>, AppError> {
    let note = notes::update_note(&state.db, &id, req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(note))
}

async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if notes::delete_note(&state.db, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

async fn star_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StarRequest>,
) -> Result<StatusCode, AppError> {
    if notes::set_note_starred(&state.db, &id, req.is_starred).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

async fn list_reminders(
    State(state): State<AppState>,
    Query(params): Query<ReminderQueryParams>,
) -> Result<Json<Vec<Reminder>>, AppError> {
    let found = match params.listing()? {
        ReminderListing::Range(from, to) => {
            reminders::fetch_reminders_in_range(&state.db, from, to).await?
        }
        ReminderListing::Course(course_id) => {
            reminders::fetch_reminders_for_course(&state.db, &course_id).await?
        }
        ReminderListing::All => reminders::fetch_all_reminders(&state.db).await?,
    };
    Ok(Json(found))
}

async fn create_reminder(
    State(state): State<AppState>,
    Json(draft): Json<ReminderDraft>,
) -> Result<Json<Reminder>, AppError> {
    let reminder = reminders::insert_reminder(&state.db, &draft, "", "").await?;
    Ok(Json(reminder))
}

async fn get_reminder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Reminder>, AppError> {
    let reminder = reminders::find_reminder_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(reminder))
}

async fn update_reminder(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<ReminderDraft>,
) -> Result<Json<Reminder>, AppError> {
    let reminder = reminders::update_reminder(&state.db, &id, &draft, "", "")
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(reminder))
}

async fn delete_reminder(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if reminders::delete_reminder(&state.db, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

async fn complete_reminder(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CompleteRequest>,
) -> Result<StatusCode, AppError> {
    if reminders::set_reminder_completed(&state.db, &id, req.is_completed).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

/// Date-grouped sections with their chips, in chronological order.
async fn reminder_agenda(
    State(state): State<AppState>,
    Query(params): Query<ReminderQueryParams>,
) -> Result<Json<Vec<AgendaSection>>, AppError> {
    let found = match params.course_id {
        Some(course_id) => reminders::fetch_reminders_for_course(&state.db, &course_id).await?,
        None => reminders::fetch_all_reminders(&state.db).await?,
    };

    let today = Local::now().date_naive();
    let sections = group_reminders_by_date(found)
        .into_iter()
        .map(|group| AgendaSection {
            chip: date_chip(group.date, today),
            label: group.label,
            reminders: group.reminders,
        })
        .collect();
    Ok(Json(sections))
}

async fn delete_course_notes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, AppError> {
    let deleted = notes::delete_notes_for_course(&state.db, &id).await?;
    Ok(Json(DeletedResponse { deleted }))
}

async fn delete_course_reminders(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, AppError> {
    let deleted = reminders::delete_reminders_for_course(&state.db, &id).await?;
    Ok(Json(DeletedResponse { deleted }))
}

async fn maintenance_status(State(state): State<AppState>) -> Json<MaintenanceStatus> {
    let result = state.maintenance.check().await;
    Json(MaintenanceStatus {
        checked: result.is_some(),
        under_maintenance: result,
    })
}
