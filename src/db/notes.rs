use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{NewNoteRequest, Note, UpdateNoteRequest};

const NOTE_COLUMNS: &str =
    "id, course_id, title, content, note_type, is_starred, image_path, created_at, updated_at";

pub async fn fetch_notes_for_course(
    db: &SqlitePool,
    course_id: &str,
    starred_only: bool,
) -> Result<Vec<Note>, sqlx::Error> {
    let sql = if starred_only {
        format!(
            "SELECT {NOTE_COLUMNS} FROM notes \
             WHERE course_id = ? AND is_starred = 1 ORDER BY created_at DESC"
        )
    } else {
        format!("SELECT {NOTE_COLUMNS} FROM notes WHERE course_id = ? ORDER BY created_at DESC")
    };

    sqlx::query_as::<_, Note>(&sql).bind(course_id).fetch_all(db).await
}

/// Free-text search across title and content. Deliberately a
/// case-sensitive substring match (inherited behavior); `instr` is used
/// because SQLite's LIKE folds ASCII case.
pub async fn search_notes(db: &SqlitePool, query: &str) -> Result<Vec<Note>, sqlx::Error> {
    sqlx::query_as::<_, Note>(&format!(
        "SELECT {NOTE_COLUMNS} FROM notes \
         WHERE instr(title, ?1) > 0 OR instr(content, ?1) > 0 \
         ORDER BY created_at DESC"
    ))
    .bind(query)
    .fetch_all(db)
    .await
}

pub async fn find_note_by_id(db: &SqlitePool, id: &str) -> Result<Option<Note>, sqlx::Error> {
    sqlx::query_as::<_, Note>(&format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert_note(db: &SqlitePool, req: NewNoteRequest) -> Result<Note, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().timestamp_millis();

    sqlx::query(
        "INSERT INTO notes \
            (id, course_id, title, content, note_type, is_starred, image_path, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&req.course_id)
    .bind(&req.title)
    .bind(&req.content)
    .bind(req.note_type)
    .bind(req.is_starred)
    .bind(&req.image_path)
    .bind(now)
    .bind(now)
    .execute(db)
    .await?;

    Ok(Note {
        id,
        course_id: req.course_id,
        title: req.title,
        content: req.content,
        note_type: req.note_type,
        is_starred: req.is_starred,
        image_path: req.image_path,
        created_at: now,
        updated_at: now,
    })
}

/// Full-record update. updated_at is refreshed unconditionally, even
/// when no field actually changed.
pub async fn update_note(
    db: &SqlitePool,
    id: &str,
    req: UpdateNoteRequest,
) -> Result<Option<Note>, sqlx::Error> {
    let now = Utc::now().timestamp_millis();

    let affected = sqlx::query(
        "UPDATE notes SET \
            title = ?, content = ?, note_type = ?, is_starred = ?, image_path = ?, updated_at = ? \
         WHERE id = ?",
    )
    .bind(&req.title)
    .bind(&req.content)
    .bind(req.note_type)
    .bind(req.is_starred)
    .bind(&req.image_path)
    .bind(now)
    .bind(id)
    .execute(db)
    .await?
    .rows_affected();

    if affected == 0 {
        return Ok(None);
    }

    find_note_by_id(db, id).await
}

/// Starred toggle independent of the full update path.
pub async fn set_note_starred(
    db: &SqlitePool,
    id: &str,
    is_starred: bool,
) -> Result<bool, sqlx::Error> {
    let now = Utc::now().timestamp_millis();
    let affected = sqlx::query("UPDATE notes SET is_starred = ?, updated_at = ? WHERE id = ?")
        .bind(is_starred)
        .bind(now)
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(affected > 0)
}

pub async fn delete_note(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query("DELETE FROM notes WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(affected > 0)
}

/// Course-removal cascade.
pub async fn delete_notes_for_course(db: &SqlitePool, course_id: &str) -> Result<u64, sqlx::Error> {
    let affected = sqlx::query("DELETE FROM notes WHERE course_id = ?")
        .bind(course_id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(affected)
}
