pub mod editor;
pub mod grouping;

pub use editor::{NoteEditor, toggle_line_prefix, wrap_selection};
pub use grouping::{ChipTone, DateChip, ReminderGroup, date_chip, group_reminders_by_date};
