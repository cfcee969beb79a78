pub mod note;
pub mod reminder;

pub use note::{NewNoteRequest, Note, NoteType, UpdateNoteRequest};
pub use reminder::{Reminder, ReminderDraft, ReminderStatus};
