use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum NoteType {
    #[default]
    Text,
    Image,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub content: String,
    pub note_type: NoteType,
    pub is_starred: bool,
    pub image_path: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNoteRequest {
    pub course_id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub note_type: NoteType,
    #[serde(default)]
    pub is_starred: bool,
    pub image_path: Option<String>,
}

/// Full-record update. Notes are never patched field by field; the
/// starred flag additionally has its own single-field toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: String,
    pub content: String,
    pub note_type: NoteType,
    #[serde(default)]
    pub is_starred: bool,
    pub image_path: Option<String>,
}
