pub mod notes;
pub mod prefs;
pub mod reminders;
