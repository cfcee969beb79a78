use serde::{Deserialize, Serialize};

/// Derived, non-stored reminder state. A completed reminder stays
/// COMPLETED regardless of its due instant; an incomplete one whose due
/// instant has passed reports UPCOMING, otherwise CAN_WAIT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderStatus {
    Upcoming,
    CanWait,
    Completed,
}

/// Domain-side reminder. The backing row stores the time-of-day fields
/// as separate hour/minute integers; here they are the reassembled
/// "HH:MM" display strings, empty when the reminder is all-day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub course_id: String,
    pub course_title: String,
    pub title: String,
    pub description: String,
    pub date_millis: i64,
    pub from_time: String,
    pub to_time: String,
    pub is_all_day: bool,
    pub alert_days_before: i64,
    pub attachment_url: Option<String>,
    pub is_completed: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Reminder {
    pub fn status(&self, now_millis: i64) -> ReminderStatus {
        if self.is_completed {
            ReminderStatus::Completed
        } else if self.date_millis < now_millis {
            ReminderStatus::Upcoming
        } else {
            ReminderStatus::CanWait
        }
    }
}

/// Everything the caller supplies when creating or fully replacing a
/// reminder. The repository combines this with an externally supplied
/// course id/title pair, falling back to the values here when the
/// caller passes empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderDraft {
    #[serde(default)]
    pub course_id: String,
    #[serde(default)]
    pub course_title: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date_millis: i64,
    #[serde(default)]
    pub from_time: String,
    #[serde(default)]
    pub to_time: String,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub alert_days_before: i64,
    pub attachment_url: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}
