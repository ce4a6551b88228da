//! A single sticky note: its data, geometry, and state transitions.

use crate::core::color;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Smallest width a note can be interactively resized to.
pub const MIN_WIDTH: i32 = 150;
/// Smallest height a note can be interactively resized to.
pub const MIN_HEIGHT: i32 = 100;
/// Header-only height of a minimized note.
pub const MINIMIZED_HEIGHT: i32 = 30;
/// Width of a freshly created note.
pub const DEFAULT_WIDTH: i32 = 250;
/// Height of a freshly created note.
pub const DEFAULT_HEIGHT: i32 = 200;

fn default_x() -> i32 {
    100
}
fn default_y() -> i32 {
    100
}
fn default_width() -> i32 {
    DEFAULT_WIDTH
}
fn default_height() -> i32 {
    DEFAULT_HEIGHT
}
fn default_color() -> String {
    color::PALETTE[0].to_string()
}

/// The canonical serializable snapshot of one note.
///
/// This is both the in-file record format and the value returned by
/// [`Note::snapshot`]. Readers tolerate missing fields: every field has a
/// documented default so hand-edited or partially written files still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteData {
    /// Unique note identifier; empty means "assign a fresh one on restore".
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_x")]
    pub x: i32,
    #[serde(default = "default_y")]
    pub y: i32,
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    /// Body color as `#rrggbb`.
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub minimized: bool,
}

/// One live sticky note.
///
/// A `Note` owns its visible state and exposes the state transitions the
/// desktop shell maps gestures onto: moving, resizing, recoloring, editing,
/// and the minimize toggle. The derived chrome color is cached here and
/// recomputed whenever the body color changes; it is never serialized.
#[derive(Debug, Clone)]
pub struct Note {
    id: String,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    color: String,
    chrome: String,
    text: String,
    minimized: bool,
    saved_height: i32,
}

impl Note {
    /// Builds a note from a snapshot. The snapshot's `minimized` flag is
    /// ignored here; the store applies it via [`Note::minimize`] after
    /// construction so the transition captures `saved_height` consistently.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StickernotesError::InvalidColor`] if the snapshot's
    /// color is not a parseable `#rrggbb` value.
    pub(crate) fn new(data: NoteData) -> Result<Self> {
        let chrome = color::darken(&data.color)?;
        Ok(Self {
            id: data.id,
            x: data.x,
            y: data.y,
            width: data.width,
            height: data.height,
            color: data.color,
            chrome,
            text: data.text,
            minimized: false,
            saved_height: data.height,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Body color as `#rrggbb`.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Derived dark color used for the header bar and its buttons.
    pub fn chrome_color(&self) -> &str {
        &self.chrome
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Mutable access to the text buffer, for direct editing by text widgets.
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// The height this note returns to when un-minimized.
    pub fn saved_height(&self) -> i32 {
        self.saved_height
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Resizes the note, clamping to [`MIN_WIDTH`] × [`MIN_HEIGHT`] and
    /// recording the new height as the minimize-restore target.
    ///
    /// A minimized note has no resize affordance, so this is a no-op while
    /// minimized.
    pub fn resize_to(&mut self, width: i32, height: i32) {
        if self.minimized {
            return;
        }
        self.width = width.max(MIN_WIDTH);
        self.height = height.max(MIN_HEIGHT);
        self.saved_height = self.height;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Changes the body color and recomputes the cached chrome color.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StickernotesError::InvalidColor`] if `color` is not a
    /// valid `#rrggbb` string; the note is left unchanged.
    pub fn set_color(&mut self, color: &str) -> Result<()> {
        self.chrome = color::darken(color)?;
        self.color = color.to_string();
        Ok(())
    }

    /// Collapses the note to its header bar, remembering the current height.
    /// No-op if already minimized.
    pub fn minimize(&mut self) {
        if self.minimized {
            return;
        }
        self.saved_height = self.height;
        self.height = MINIMIZED_HEIGHT;
        self.minimized = true;
    }

    /// Expands the note back to the height captured when it was minimized.
    /// No-op if not minimized.
    pub fn restore(&mut self) {
        if !self.minimized {
            return;
        }
        self.height = self.saved_height;
        self.minimized = false;
    }

    pub fn toggle_minimized(&mut self) {
        if self.minimized {
            self.restore();
        } else {
            self.minimize();
        }
    }

    /// Produces the canonical snapshot: live geometry, color, trimmed text,
    /// and the minimized flag.
    pub fn snapshot(&self) -> NoteData {
        NoteData {
            id: self.id.clone(),
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            color: self.color.clone(),
            text: self.text.trim().to_string(),
            minimized: self.minimized,
        }
    }
}

/// An in-progress corner resize.
///
/// Captures the note's width and height at press time; every motion step
/// computes the new size as that origin plus the total cursor delta, so
/// dragging back out of the clamp region behaves exactly as the cursor
/// position dictates rather than re-accumulating from the clamped size.
#[derive(Debug, Clone, Copy)]
pub struct ResizeGesture {
    start_width: i32,
    start_height: i32,
}

impl ResizeGesture {
    /// Starts a resize at the note's current size.
    pub fn begin(note: &Note) -> Self {
        Self {
            start_width: note.width(),
            start_height: note.height(),
        }
    }

    /// Applies the total cursor delta since the press to `note`.
    pub fn apply(&self, note: &mut Note, dx: i32, dy: i32) {
        note.resize_to(self.start_width + dx, self.start_height + dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(width: i32, height: i32) -> Note {
        Note::new(NoteData {
            id: "test-id".to_string(),
            x: 10,
            y: 20,
            width,
            height,
            color: "#FFEB3B".to_string(),
            text: String::new(),
            minimized: false,
        })
        .unwrap()
    }

    #[test]
    fn test_minimize_then_restore_keeps_height() {
        let mut n = note(250, 320);
        n.minimize();
        assert!(n.is_minimized());
        assert_eq!(n.height(), MINIMIZED_HEIGHT);
        n.restore();
        assert!(!n.is_minimized());
        assert_eq!(n.height(), 320);
    }

    #[test]
    fn test_minimize_twice_does_not_clobber_saved_height() {
        let mut n = note(250, 320);
        n.minimize();
        n.minimize();
        n.restore();
        assert_eq!(n.height(), 320);
    }

    #[test]
    fn test_resize_clamps_to_minimums() {
        let mut n = note(250, 200);
        let gesture = ResizeGesture::begin(&n);
        gesture.apply(&mut n, -500, -500);
        assert_eq!(n.width(), MIN_WIDTH);
        assert_eq!(n.height(), MIN_HEIGHT);
    }

    #[test]
    fn test_resize_delta_is_relative_to_gesture_origin() {
        let mut n = note(250, 200);
        let gesture = ResizeGesture::begin(&n);
        // Drive deep into the clamp, then back out: the size must track the
        // cursor, not re-grow from the clamped minimum.
        gesture.apply(&mut n, -500, -500);
        gesture.apply(&mut n, 50, 50);
        assert_eq!(n.width(), 300);
        assert_eq!(n.height(), 250);
    }

    #[test]
    fn test_resize_updates_saved_height() {
        let mut n = note(250, 200);
        n.resize_to(300, 400);
        n.minimize();
        n.restore();
        assert_eq!(n.height(), 400);
    }

    #[test]
    fn test_resize_while_minimized_is_ignored() {
        let mut n = note(250, 200);
        n.minimize();
        n.resize_to(500, 500);
        assert_eq!(n.width(), 250);
        assert_eq!(n.height(), MINIMIZED_HEIGHT);
    }

    #[test]
    fn test_set_color_recomputes_chrome() {
        let mut n = note(250, 200);
        assert_eq!(n.chrome_color(), "#d7c313");
        n.set_color("#FFFFFF").unwrap();
        assert_eq!(n.chrome_color(), "#d7d7d7");
    }

    #[test]
    fn test_set_color_rejects_garbage_and_keeps_old_color() {
        let mut n = note(250, 200);
        assert!(n.set_color("not-a-color").is_err());
        assert_eq!(n.color(), "#FFEB3B");
        assert_eq!(n.chrome_color(), "#d7c313");
    }

    #[test]
    fn test_snapshot_trims_text() {
        let mut n = note(250, 200);
        n.set_text("  hello world \n");
        assert_eq!(n.snapshot().text, "hello world");
    }

    #[test]
    fn test_move_by_accumulates() {
        let mut n = note(250, 200);
        n.move_by(5, -3);
        n.move_by(5, -3);
        assert_eq!((n.x(), n.y()), (20, 14));
    }

    #[test]
    fn test_record_defaults_fill_missing_fields() {
        let data: NoteData = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(data.x, 100);
        assert_eq!(data.y, 100);
        assert_eq!(data.width, DEFAULT_WIDTH);
        assert_eq!(data.height, DEFAULT_HEIGHT);
        assert_eq!(data.color, crate::PALETTE[0]);
        assert_eq!(data.text, "");
        assert!(!data.minimized);
    }
}
