use sqlx::SqlitePool;
use tokio::sync::watch;

use crate::db::{notes, reminders};
use crate::error::AppError;
use crate::models::{Note, Reminder};

/// Live reminder list for one course (or every course when the filter
/// is `None`), ordered by due instant. The feed owns the sender side of
/// a watch channel; screens subscribe for their visible lifetime and
/// simply drop the receiver on teardown. Write paths call [`refresh`]
/// to publish a fresh query result.
///
/// [`refresh`]: ReminderFeed::refresh
pub struct ReminderFeed {
    db: SqlitePool,
    course_id: Option<String>,
    tx: watch::Sender<Vec<Reminder>>,
}

impl ReminderFeed {
    pub fn new(db: SqlitePool, course_id: Option<String>) -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self { db, course_id, tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Reminder>> {
        self.tx.subscribe()
    }

    pub async fn refresh(&self) -> Result<(), AppError> {
        let rows = match &self.course_id {
            Some(course_id) => reminders::fetch_reminders_for_course(&self.db, course_id).await?,
            None => reminders::fetch_all_reminders(&self.db).await?,
        };
        self.tx.send_replace(rows);
        Ok(())
    }
}

/// Live note list for a course, newest first, optionally starred-only.
pub struct NoteFeed {
    db: SqlitePool,
    course_id: String,
    starred_only: bool,
    tx: watch::Sender<Vec<Note>>,
}

impl NoteFeed {
    pub fn new(db: SqlitePool, course_id: impl Into<String>, starred_only: bool) -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self {
            db,
            course_id: course_id.into(),
            starred_only,
            tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Note>> {
        self.tx.subscribe()
    }

    pub async fn refresh(&self) -> Result<(), AppError> {
        let rows =
            notes::fetch_notes_for_course(&self.db, &self.course_id, self.starred_only).await?;
        self.tx.send_replace(rows);
        Ok(())
    }
}
