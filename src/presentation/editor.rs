use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Oldest snapshots are silently discarded past this depth.
pub const SNAPSHOT_CAPACITY: usize = 50;

/// Free typing commits a snapshot after this much quiescence.
pub const TYPING_QUIESCENCE: Duration = Duration::from_secs(1);

pub mod markers {
    pub const BOLD: &str = "**";
    pub const ITALIC: &str = "_";
    pub const UNDERLINE: &str = "__";
    pub const BULLET: &str = "- ";
    pub const CHECKLIST: &str = "- [ ] ";
}

/// Snaps a platform-supplied byte offset onto the nearest char
/// boundary at or before it. Offsets land mid-character whenever the
/// host text field counts UTF-16 units, so slicing must never trust
/// them as-is.
fn snap_to_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Inserts a prefix/suffix pair around `[start, end)`. With an empty
/// selection the pair is inserted at the cursor and the cursor is left
/// between the markers. Returns (text, selection start, selection end)
/// in byte offsets.
pub fn wrap_selection(
    text: &str,
    start: usize,
    end: usize,
    prefix: &str,
    suffix: &str,
) -> (String, usize, usize) {
    let start = snap_to_char_boundary(text, start);
    let end = snap_to_char_boundary(text, end).max(start);

    let mut out = String::with_capacity(text.len() + prefix.len() + suffix.len());
    out.push_str(&text[..start]);
    out.push_str(prefix);
    out.push_str(&text[start..end]);
    out.push_str(suffix);
    out.push_str(&text[end..]);

    if start == end {
        let cursor = start + prefix.len();
        (out, cursor, cursor)
    } else {
        (out, start + prefix.len(), end + prefix.len())
    }
}

/// Toggles `marker` on the single line containing the selection start:
/// strips it when present (selection start shifted back by the marker
/// length, floored at 0), otherwise prepends it (shifted forward).
/// Applying the same marker twice returns the original line.
pub fn toggle_line_prefix(text: &str, sel_start: usize, marker: &str) -> (String, usize) {
    let sel_start = snap_to_char_boundary(text, sel_start);
    let line_start = text[..sel_start].rfind('\n').map(|i| i + 1).unwrap_or(0);

    if text[line_start..].starts_with(marker) {
        let mut out = String::with_capacity(text.len() - marker.len());
        out.push_str(&text[..line_start]);
        out.push_str(&text[line_start + marker.len()..]);
        (out, sel_start.saturating_sub(marker.len()))
    } else {
        let mut out = String::with_capacity(text.len() + marker.len());
        out.push_str(&text[..line_start]);
        out.push_str(marker);
        out.push_str(&text[line_start..]);
        (out, sel_start + marker.len())
    }
}

/// Two-stack linear undo model over whole-text snapshots. Toolbar
/// actions snapshot eagerly; free typing snapshots the pre-burst text
/// once the burst goes quiet. Both stacks are bounded.
#[derive(Debug)]
pub struct NoteEditor {
    text: String,
    sel_start: usize,
    sel_end: usize,
    undo: VecDeque<String>,
    redo: VecDeque<String>,
    last_snapshot: String,
    typing_since: Option<Instant>,
}

impl NoteEditor {
    pub fn new(initial: impl Into<String>) -> Self {
        let text = initial.into();
        let last_snapshot = text.clone();
        Self {
            text,
            sel_start: 0,
            sel_end: 0,
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            last_snapshot,
            typing_since: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> (usize, usize) {
        (self.sel_start, self.sel_end)
    }

    pub fn set_selection(&mut self, start: usize, end: usize) {
        self.sel_start = snap_to_char_boundary(&self.text, start);
        self.sel_end = snap_to_char_boundary(&self.text, end).max(self.sel_start);
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Formatting-toolbar wrap (bold/italic/underline).
    pub fn apply_wrap(&mut self, prefix: &str, suffix: &str) {
        self.snapshot_before_action();
        let (text, start, end) =
            wrap_selection(&self.text, self.sel_start, self.sel_end, prefix, suffix);
        self.text = text;
        self.sel_start = start;
        self.sel_end = end;
        self.last_snapshot = self.text.clone();
    }

    /// Formatting-toolbar line prefix (bullet/checklist).
    pub fn apply_line_prefix(&mut self, marker: &str) {
        self.snapshot_before_action();
        let (text, start) = toggle_line_prefix(&self.text, self.sel_start, marker);
        self.text = text;
        self.sel_start = start;
        self.sel_end = start;
        self.last_snapshot = self.text.clone();
    }

    /// Free-typing path: the whole text is replaced and the quiescence
    /// timer restarted. No snapshot is taken yet.
    pub fn set_text(&mut self, text: impl Into<String>, at: Instant) {
        self.text = text.into();
        self.clamp_selection();
        self.typing_since = Some(at);
    }

    /// Commits the pre-burst snapshot once typing has been quiet for
    /// [`TYPING_QUIESCENCE`] and the text actually changed.
    pub fn tick(&mut self, now: Instant) {
        let Some(since) = self.typing_since else { return };
        if now.duration_since(since) < TYPING_QUIESCENCE {
            return;
        }
        self.typing_since = None;
        if self.text != self.last_snapshot {
            let snapshot = std::mem::replace(&mut self.last_snapshot, self.text.clone());
            self.push_undo(snapshot);
            self.redo.clear();
        }
    }

    pub fn undo(&mut self) -> bool {
        self.typing_since = None;
        let Some(snapshot) = self.undo.pop_back() else {
            return false;
        };
        Self::push_bounded(&mut self.redo, std::mem::take(&mut self.text));
        self.text = snapshot;
        self.last_snapshot = self.text.clone();
        self.clamp_selection();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.redo.pop_back() else {
            return false;
        };
        Self::push_bounded(&mut self.undo, std::mem::take(&mut self.text));
        self.text = snapshot;
        self.last_snapshot = self.text.clone();
        self.clamp_selection();
        true
    }

    fn snapshot_before_action(&mut self) {
        self.typing_since = None;
        self.push_undo(self.text.clone());
        self.redo.clear();
    }

    fn push_undo(&mut self, snapshot: String) {
        Self::push_bounded(&mut self.undo, snapshot);
    }

    fn push_bounded(stack: &mut VecDeque<String>, snapshot: String) {
        if stack.len() == SNAPSHOT_CAPACITY {
            stack.pop_front();
        }
        stack.push_back(snapshot);
    }

    fn clamp_selection(&mut self) {
        self.sel_start = snap_to_char_boundary(&self.text, self.sel_start);
        self.sel_end = snap_to_char_boundary(&self.text, self.sel_end).max(self.sel_start);
    }
}
