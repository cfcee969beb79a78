use chrono::{Local, NaiveDate, TimeZone};
use serde::Serialize;

use crate::models::Reminder;

pub const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipTone {
    Urgent,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateChip {
    pub label: String,
    pub tone: ChipTone,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReminderGroup {
    pub label: String,
    pub date: NaiveDate,
    pub reminders: Vec<Reminder>,
}

/// Calendar date of an epoch-millisecond instant under the device's
/// current time-zone rules.
pub fn calendar_date_of(millis: i64) -> NaiveDate {
    Local
        .timestamp_millis_opt(millis)
        .earliest()
        .map(|dt| dt.date_naive())
        .unwrap_or_default()
}

pub fn display_date(millis: i64) -> String {
    calendar_date_of(millis).format(DISPLAY_DATE_FORMAT).to_string()
}

/// Sorts ascending by due instant and groups by calendar date. The
/// group key is the formatted display-date string; when it parses back
/// it defines the group's calendar date, otherwise the date is
/// reconstructed from the due instant. Because the input is sorted
/// first, group order follows each group's earliest due instant even
/// though the keys are strings.
pub fn group_reminders_by_date(mut reminders: Vec<Reminder>) -> Vec<ReminderGroup> {
    reminders.sort_by_key(|r| r.date_millis);

    let mut groups: Vec<ReminderGroup> = Vec::new();
    for reminder in reminders {
        let label = display_date(reminder.date_millis);
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.reminders.push(reminder),
            None => {
                let date = NaiveDate::parse_from_str(&label, DISPLAY_DATE_FORMAT)
                    .unwrap_or_else(|_| calendar_date_of(reminder.date_millis));
                groups.push(ReminderGroup {
                    label,
                    date,
                    reminders: vec![reminder],
                });
            }
        }
    }
    groups
}

/// Label and color classification for a date chip relative to "today".
pub fn date_chip(date: NaiveDate, today: NaiveDate) -> DateChip {
    let days = (date - today).num_days();
    let (label, tone) = match days {
        0 => ("Today".to_string(), ChipTone::Urgent),
        1 => ("Tomorrow".to_string(), ChipTone::Urgent),
        2 => ("2 days to go".to_string(), ChipTone::Urgent),
        d if d > 2 => (format!("{} days to go", d), ChipTone::Warning),
        -1 => ("Yesterday".to_string(), ChipTone::Warning),
        d => (format!("{} days ago", -d), ChipTone::Warning),
    };
    DateChip { label, tone }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn reminder(title: &str, date_millis: i64) -> Reminder {
        Reminder {
            id: title.to_string(),
            course_id: "c1".to_string(),
            course_title: "Biology".to_string(),
            title: title.to_string(),
            description: String::new(),
            date_millis,
            from_time: String::new(),
            to_time: String::new(),
            is_all_day: true,
            alert_days_before: 0,
            attachment_url: None,
            is_completed: false,
            created_at: 0,
            updated_at: 0,
        }
    }

    const DAY_MS: i64 = 86_400_000;

    #[test]
    fn groups_ordered_by_earliest_due_instant() {
        // Noon UTC, so a one-minute gap never straddles local midnight.
        let base = 1_700_049_600_000;
        // Three distinct calendar dates, inserted out of order.
        let input = vec![
            reminder("day3", base + 2 * DAY_MS),
            reminder("day1-late", base + 60_000),
            reminder("day2", base + DAY_MS),
            reminder("day1-early", base),
        ];

        let groups = group_reminders_by_date(input);
        assert_eq!(groups.len(), 3);

        assert_eq!(groups[0].label, display_date(base));
        let titles: Vec<&str> = groups[0].reminders.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["day1-early", "day1-late"]);

        assert_eq!(groups[1].label, display_date(base + DAY_MS));
        assert_eq!(groups[2].label, display_date(base + 2 * DAY_MS));

        assert!(groups[0].reminders[0].date_millis <= groups[1].reminders[0].date_millis);
        assert!(groups[1].reminders[0].date_millis <= groups[2].reminders[0].date_millis);
    }

    #[test]
    fn group_date_parses_back_from_label() {
        let base = 1_700_049_600_000;
        let groups = group_reminders_by_date(vec![reminder("only", base)]);
        assert_eq!(groups[0].date, calendar_date_of(base));
    }

    #[test]
    fn chip_today_and_tomorrow_are_urgent() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        assert_eq!(
            date_chip(today, today),
            DateChip { label: "Today".to_string(), tone: ChipTone::Urgent }
        );
        assert_eq!(
            date_chip(today + Duration::days(1), today),
            DateChip { label: "Tomorrow".to_string(), tone: ChipTone::Urgent }
        );
        assert_eq!(
            date_chip(today + Duration::days(2), today),
            DateChip { label: "2 days to go".to_string(), tone: ChipTone::Urgent }
        );
    }

    #[test]
    fn chip_further_out_is_warning() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        assert_eq!(
            date_chip(today + Duration::days(3), today),
            DateChip { label: "3 days to go".to_string(), tone: ChipTone::Warning }
        );
        assert_eq!(
            date_chip(today + Duration::days(14), today),
            DateChip { label: "14 days to go".to_string(), tone: ChipTone::Warning }
        );
    }

    #[test]
    fn chip_past_dates_are_warning() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        assert_eq!(
            date_chip(today - Duration::days(1), today),
            DateChip { label: "Yesterday".to_string(), tone: ChipTone::Warning }
        );
        assert_eq!(
            date_chip(today - Duration::days(5), today),
            DateChip { label: "5 days ago".to_string(), tone: ChipTone::Warning }
        );
    }
}
