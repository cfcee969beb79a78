use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{Reminder, ReminderDraft};

const REMINDER_COLUMNS: &str = "id, course_id, course_title, title, description, date_millis, \
     from_time_hour, from_time_minute, to_time_hour, to_time_minute, \
     is_all_day, alert_days_before, attachment_url, is_completed, created_at, updated_at";

/// Stored shape of a reminder. Time-of-day fields live as separate
/// hour/minute columns and are reassembled into "HH:MM" on read.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ReminderRow {
    id: String,
    course_id: String,
    course_title: String,
    title: String,
    description: String,
    date_millis: i64,
    from_time_hour: i64,
    from_time_minute: i64,
    to_time_hour: i64,
    to_time_minute: i64,
    is_all_day: bool,
    alert_days_before: i64,
    attachment_url: Option<String>,
    is_completed: bool,
    created_at: i64,
    updated_at: i64,
}

impl From<ReminderRow> for Reminder {
    fn from(row: ReminderRow) -> Self {
        let (from_time, to_time) = if row.is_all_day {
            (String::new(), String::new())
        } else {
            (
                format_time(row.from_time_hour, row.from_time_minute),
                format_time(row.to_time_hour, row.to_time_minute),
            )
        };
        Reminder {
            id: row.id,
            course_id: row.course_id,
            course_title: row.course_title,
            title: row.title,
            description: row.description,
            date_millis: row.date_millis,
            from_time,
            to_time,
            is_all_day: row.is_all_day,
            alert_days_before: row.alert_days_before,
            attachment_url: row.attachment_url,
            is_completed: row.is_completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub fn format_time(hour: i64, minute: i64) -> String {
    format!("{:02}:{:02}", hour, minute)
}

/// Lenient "HH:MM" split. A malformed or missing component becomes 0;
/// time strings are never rejected.
pub fn parse_time_components(time: &str) -> (i64, i64) {
    let mut parts = time.split(':');
    let hour = parts
        .next()
        .and_then(|p| p.trim().parse::<i64>().ok())
        .unwrap_or(0);
    let minute = parts
        .next()
        .and_then(|p| p.trim().parse::<i64>().ok())
        .unwrap_or(0);
    (hour, minute)
}

fn effective<'a>(external: &'a str, own: &'a str) -> &'a str {
    if external.is_empty() { own } else { external }
}

pub async fn fetch_reminders_for_course(
    db: &SqlitePool,
    course_id: &str,
) -> Result<Vec<Reminder>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ReminderRow>(&format!(
        "SELECT {REMINDER_COLUMNS} FROM reminders WHERE course_id = ? ORDER BY date_millis ASC"
    ))
    .bind(course_id)
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(Reminder::from).collect())
}

pub async fn fetch_all_reminders(db: &SqlitePool) -> Result<Vec<Reminder>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ReminderRow>(&format!(
        "SELECT {REMINDER_COLUMNS} FROM reminders ORDER BY date_millis ASC"
    ))
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(Reminder::from).collect())
}

pub async fn find_reminder_by_id(
    db: &SqlitePool,
    id: &str,
) -> Result<Option<Reminder>, sqlx::Error> {
    let row = sqlx::query_as::<_, ReminderRow>(&format!(
        "SELECT {REMINDER_COLUMNS} FROM reminders WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row.map(Reminder::from))
}

/// Non-completed reminders whose due instant falls within
/// [start_millis, end_millis], both bounds inclusive.
pub async fn fetch_reminders_in_range(
    db: &SqlitePool,
    start_millis: i64,
    end_millis: i64,
) -> Result<Vec<Reminder>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ReminderRow>(&format!(
        "SELECT {REMINDER_COLUMNS} FROM reminders \
         WHERE is_completed = 0 AND date_millis BETWEEN ? AND ? \
         ORDER BY date_millis ASC"
    ))
    .bind(start_millis)
    .bind(end_millis)
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(Reminder::from).collect())
}

pub async fn insert_reminder(
    db: &SqlitePool,
    draft: &ReminderDraft,
    course_id: &str,
    course_title: &str,
) -> Result<Reminder, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().timestamp_millis();
    let course_id = effective(course_id, &draft.course_id);
    let course_title = effective(course_title, &draft.course_title);
    let (from_hour, from_minute) = parse_time_components(&draft.from_time);
    let (to_hour, to_minute) = parse_time_components(&draft.to_time);

    sqlx::query(
        "INSERT INTO reminders \
            (id, course_id, course_title, title, description, date_millis, \
             from_time_hour, from_time_minute, to_time_hour, to_time_minute, \
             is_all_day, alert_days_before, attachment_url, is_completed, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(course_id)
    .bind(course_title)
    .bind(&draft.title)
    .bind(&draft.description)
    .bind(draft.date_millis)
    .bind(from_hour)
    .bind(from_minute)
    .bind(to_hour)
    .bind(to_minute)
    .bind(draft.is_all_day)
    .bind(draft.alert_days_before)
    .bind(&draft.attachment_url)
    .bind(draft.is_completed)
    .bind(now)
    .bind(now)
    .execute(db)
    .await?;

    find_reminder_by_id(db, &id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Full-record replacement. Refreshes updated_at; created_at is kept.
pub async fn update_reminder(
    db: &SqlitePool,
    id: &str,
    draft: &ReminderDraft,
    course_id: &str,
    course_title: &str,
) -> Result<Option<Reminder>, sqlx::Error> {
    let now = Utc::now().timestamp_millis();
    let course_id = effective(course_id, &draft.course_id);
    let course_title = effective(course_title, &draft.course_title);
    let (from_hour, from_minute) = parse_time_components(&draft.from_time);
    let (to_hour, to_minute) = parse_time_components(&draft.to_time);

    let affected = sqlx::query(
        "UPDATE reminders SET \
            course_id = ?, course_title = ?, title = ?, description = ?, date_millis = ?, \
            from_time_hour = ?, from_time_minute = ?, to_time_hour = ?, to_time_minute = ?, \
            is_all_day = ?, alert_days_before = ?, attachment_url = ?, is_completed = ?, \
            updated_at = ? \
         WHERE id = ?",
    )
    .bind(course_id)
    .bind(course_title)
    .bind(&draft.title)
    .bind(&draft.description)
    .bind(draft.date_millis)
    .bind(from_hour)
    .bind(from_minute)
    .bind(to_hour)
    .bind(to_minute)
    .bind(draft.is_all_day)
    .bind(draft.alert_days_before)
    .bind(&draft.attachment_url)
    .bind(draft.is_completed)
    .bind(now)
    .bind(id)
    .execute(db)
    .await?
    .rows_affected();

    if affected == 0 {
        return Ok(None);
    }

    find_reminder_by_id(db, id).await
}

/// Completion toggle without re-submitting the whole record.
pub async fn set_reminder_completed(
    db: &SqlitePool,
    id: &str,
    is_completed: bool,
) -> Result<bool, sqlx::Error> {
    let now = Utc::now().timestamp_millis();
    let affected = sqlx::query("UPDATE reminders SET is_completed = ?, updated_at = ? WHERE id = ?")
        .bind(is_completed)
        .bind(now)
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(affected > 0)
}

pub async fn delete_reminder(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let affected = sqlx::query("DELETE FROM reminders WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(affected > 0)
}

/// Course-removal cascade.
pub async fn delete_reminders_for_course(
    db: &SqlitePool,
    course_id: &str,
) -> Result<u64, sqlx::Error> {
    let affected = sqlx::query("DELETE FROM reminders WHERE course_id = ?")
        .bind(course_id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test db");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    fn draft(title: &str, date_millis: i64) -> ReminderDraft {
        ReminderDraft {
            course_id: "course-1".to_string(),
            course_title: "Linear Algebra".to_string(),
            title: title.to_string(),
            description: "bring calculator".to_string(),
            date_millis,
            from_time: "09:05".to_string(),
            to_time: "10:30".to_string(),
            is_all_day: false,
            alert_days_before: 1,
            attachment_url: None,
            is_completed: false,
        }
    }

    #[test]
    fn time_parsing_is_lenient() {
        assert_eq!(parse_time_components("09:05"), (9, 5));
        assert_eq!(parse_time_components("9:5"), (9, 5));
        assert_eq!(parse_time_components(""), (0, 0));
        assert_eq!(parse_time_components("garbage"), (0, 0));
        assert_eq!(parse_time_components("12"), (12, 0));
        assert_eq!(parse_time_components(":30"), (0, 30));
    }

    #[tokio::test]
    async fn test_insert_and_round_trip_times() {
        let pool = setup_test_db().await;

        let reminder = insert_reminder(&pool, &draft("Quiz", 1_700_000_000_000), "", "")
            .await
            .expect("Failed to insert reminder");

        let found = find_reminder_by_id(&pool, &reminder.id)
            .await
            .expect("Failed to fetch reminder")
            .expect("Reminder not found");

        assert_eq!(found.from_time, "09:05");
        assert_eq!(found.to_time, "10:30");
        assert_eq!(found.course_id, "course-1");
        assert_eq!(found.course_title, "Linear Algebra");
    }

    #[tokio::test]
    async fn test_all_day_times_render_empty() {
        let pool = setup_test_db().await;

        let mut d = draft("Field trip", 1_700_000_000_000);
        d.is_all_day = true;
        let reminder = insert_reminder(&pool, &d, "", "")
            .await
            .expect("Failed to insert reminder");

        assert!(reminder.from_time.is_empty());
        assert!(reminder.to_time.is_empty());
    }

    #[tokio::test]
    async fn test_external_course_overrides_draft() {
        let pool = setup_test_db().await;

        let reminder = insert_reminder(
            &pool,
            &draft("Essay", 1_700_000_000_000),
            "course-9",
            "World History",
        )
        .await
        .expect("Failed to insert reminder");

        assert_eq!(reminder.course_id, "course-9");
        assert_eq!(reminder.course_title, "World History");
    }

    #[tokio::test]
    async fn test_list_ordered_by_due_instant() {
        let pool = setup_test_db().await;

        insert_reminder(&pool, &draft("later", 3_000), "", "").await.unwrap();
        insert_reminder(&pool, &draft("first", 1_000), "", "").await.unwrap();
        insert_reminder(&pool, &draft("middle", 2_000), "", "").await.unwrap();

        let all = fetch_reminders_for_course(&pool, "course-1")
            .await
            .expect("Failed to fetch reminders");
        let titles: Vec<&str> = all.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "middle", "later"]);
    }

    #[tokio::test]
    async fn test_range_query_inclusive_and_skips_completed() {
        let pool = setup_test_db().await;

        insert_reminder(&pool, &draft("before", 999), "", "").await.unwrap();
        insert_reminder(&pool, &draft("lower edge", 1_000), "", "").await.unwrap();
        insert_reminder(&pool, &draft("upper edge", 2_000), "", "").await.unwrap();
        insert_reminder(&pool, &draft("after", 2_001), "", "").await.unwrap();
        let done = insert_reminder(&pool, &draft("done", 1_500), "", "").await.unwrap();
        set_reminder_completed(&pool, &done.id, true).await.unwrap();

        let in_range = fetch_reminders_in_range(&pool, 1_000, 2_000)
            .await
            .expect("Failed to fetch range");
        let titles: Vec<&str> = in_range.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["lower edge", "upper edge"]);
    }

    #[tokio::test]
    async fn test_completion_toggle() {
        let pool = setup_test_db().await;

        let reminder = insert_reminder(&pool, &draft("Lab report", 1_700_000_000_000), "", "")
            .await
            .unwrap();
        assert!(!reminder.is_completed);

        let ok = set_reminder_completed(&pool, &reminder.id, true).await.unwrap();
        assert!(ok);

        let found = find_reminder_by_id(&pool, &reminder.id).await.unwrap().unwrap();
        assert!(found.is_completed);
        assert!(found.updated_at >= reminder.updated_at);

        let missing = set_reminder_completed(&pool, "no-such-id", true).await.unwrap();
        assert!(!missing);
    }

    #[tokio::test]
    async fn test_lookup_miss_is_none() {
        let pool = setup_test_db().await;
        let found = find_reminder_by_id(&pool, "missing").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_course_cascade_delete() {
        let pool = setup_test_db().await;

        insert_reminder(&pool, &draft("a", 1), "", "").await.unwrap();
        insert_reminder(&pool, &draft("b", 2), "", "").await.unwrap();
        insert_reminder(&pool, &draft("other", 3), "course-2", "Chemistry").await.unwrap();

        let removed = delete_reminders_for_course(&pool, "course-1").await.unwrap();
        assert_eq!(removed, 2);

        let remaining = fetch_all_reminders(&pool).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].course_id, "course-2");
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let pool = setup_test_db().await;

        let reminder = insert_reminder(&pool, &draft("Draft", 1_000), "", "").await.unwrap();

        let mut d = draft("Final", 2_000);
        d.from_time = "14:00".to_string();
        let updated = update_reminder(&pool, &reminder.id, &d, "", "")
            .await
            .expect("Failed to update")
            .expect("Reminder not found");

        assert_eq!(updated.title, "Final");
        assert_eq!(updated.date_millis, 2_000);
        assert_eq!(updated.from_time, "14:00");
        assert_eq!(updated.created_at, reminder.created_at);

        let missing = update_reminder(&pool, "no-such-id", &d, "", "").await.unwrap();
        assert!(missing.is_none());
    }
}
