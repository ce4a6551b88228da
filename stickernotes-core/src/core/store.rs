//! The note store: the single source of truth for the set of live notes and
//! the persisted JSON file.

use crate::core::color;
use crate::core::note::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::{Note, NoteData, Result, Storage};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::path::Path;
use uuid::Uuid;

/// Optional parameters for creating a note; anything left unset takes a
/// randomized or documented default.
#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    /// Screen position; defaults to a uniform pick in x ∈ [100, 800],
    /// y ∈ [100, 500].
    pub position: Option<(i32, i32)>,
    /// Size; defaults to 250 × 200.
    pub size: Option<(i32, i32)>,
    /// Body color; defaults to a uniform pick from [`color::PALETTE`].
    pub color: Option<String>,
    /// Initial text; defaults to empty.
    pub text: Option<String>,
    /// Identifier; unset or empty means a fresh UUID is assigned.
    pub id: Option<String>,
    /// Restore the note in its minimized state.
    pub minimized: bool,
}

/// What [`Store::load`] managed to restore.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Notes successfully restored from the file.
    pub restored: usize,
    /// Records skipped because they could not be decoded or restored.
    pub skipped: usize,
}

/// The in-memory registry of all live notes plus the backing save file.
///
/// Notes are iterated in insertion order; the order carries no meaning but
/// is kept fixed so that repeated saves of an unchanged store produce
/// byte-identical files.
pub struct Store {
    storage: Storage,
    notes: HashMap<String, Note>,
    order: Vec<String>,
}

impl Store {
    /// Creates an empty store backed by the file at `path`. No I/O happens
    /// until [`Store::load`] or the first mutation.
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            storage: Storage::new(path),
            notes: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Path of the backing save file.
    pub fn path(&self) -> &Path {
        self.storage.path()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Note ids in insertion order.
    pub fn ids(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn note_mut(&mut self, id: &str) -> Option<&mut Note> {
        self.notes.get_mut(id)
    }

    /// Creates a note from `draft`, registers it, and persists the full set.
    ///
    /// Used both for user-initiated creation (empty draft) and for restoring
    /// each saved record during [`Store::load`]. Returns the new note's id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StickernotesError::InvalidColor`] if the draft's
    /// color is not a valid `#rrggbb` string, or a save error from
    /// [`Store::save`].
    pub fn create_note(&mut self, draft: NoteDraft) -> Result<String> {
        let mut rng = rand::thread_rng();

        let (x, y) = draft
            .position
            .unwrap_or_else(|| (rng.gen_range(100..=800), rng.gen_range(100..=500)));
        let (width, height) = draft.size.unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT));
        let body_color = draft.color.unwrap_or_else(|| {
            color::PALETTE
                .choose(&mut rng)
                .copied()
                .unwrap_or(color::PALETTE[0])
                .to_string()
        });
        let id = draft
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut note = Note::new(NoteData {
            id: id.clone(),
            x,
            y,
            width,
            height,
            color: body_color,
            text: draft.text.unwrap_or_default(),
            minimized: false,
        })?;
        if draft.minimized {
            note.minimize();
        }

        if self.notes.insert(id.clone(), note).is_some() {
            log::warn!("note id {id} already existed and was replaced");
        } else {
            self.order.push(id.clone());
        }

        self.save()?;
        Ok(id)
    }

    /// Removes the note with `id` if present and persists the smaller set.
    /// Removing an unknown id is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns a save error from [`Store::save`].
    pub fn remove_note(&mut self, id: &str) -> Result<()> {
        if self.notes.remove(id).is_some() {
            self.order.retain(|o| o != id);
            self.save()?;
        }
        Ok(())
    }

    /// Removes every note and persists the now-empty collection.
    ///
    /// # Errors
    ///
    /// Returns a save error from [`Store::save`].
    pub fn clear_all(&mut self) -> Result<()> {
        self.notes.clear();
        self.order.clear();
        self.save()
    }

    /// Serializes every live note's snapshot, in insertion order, to the
    /// save file.
    ///
    /// An id present in the order index but missing from the map is skipped
    /// rather than treated as an error, so one inconsistent entry can never
    /// block persisting the rest.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StickernotesError::Io`] or
    /// [`crate::StickernotesError::Json`] if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let records: Vec<NoteData> = self
            .order
            .iter()
            .filter_map(|id| self.notes.get(id))
            .map(Note::snapshot)
            .collect();
        self.storage.write(&records)?;
        log::debug!(
            "saved {} notes to {}",
            records.len(),
            self.storage.path().display()
        );
        Ok(())
    }

    /// Restores notes from the save file, if it exists.
    ///
    /// Each record is decoded independently: a record that cannot be decoded
    /// or restored (for example, an unparseable color) is logged, counted in
    /// [`LoadReport::skipped`], and does not abort the rest. Records marked
    /// minimized are re-minimized after creation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StickernotesError::Json`] if the whole file is not a
    /// JSON array (the store is left empty and the next save will overwrite
    /// the bad file), or [`crate::StickernotesError::Io`] if it cannot be
    /// read.
    pub fn load(&mut self) -> Result<LoadReport> {
        if !self.storage.exists() {
            return Ok(LoadReport::default());
        }

        let values = self.storage.read()?;
        let mut report = LoadReport::default();

        for value in values {
            let record: NoteData = match serde_json::from_value(value) {
                Ok(record) => record,
                Err(e) => {
                    log::warn!("skipping unreadable note record: {e}");
                    report.skipped += 1;
                    continue;
                }
            };

            let draft = NoteDraft {
                position: Some((record.x, record.y)),
                size: Some((record.width, record.height)),
                color: Some(record.color),
                text: Some(record.text),
                id: Some(record.id),
                minimized: record.minimized,
            };
            match self.create_note(draft) {
                Ok(_) => report.restored += 1,
                Err(e) => {
                    log::warn!("skipping note that failed to restore: {e}");
                    report.skipped += 1;
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StickernotesError, MINIMIZED_HEIGHT, PALETTE};
    use std::collections::HashMap;
    use std::fs;

    fn store_in(dir: &tempfile::TempDir) -> Store {
        Store::new(dir.path().join("stickers_data.json"))
    }

    fn draft(id: &str, text: &str) -> NoteDraft {
        NoteDraft {
            position: Some((10, 20)),
            size: Some((250, 200)),
            color: Some("#FFEB3B".to_string()),
            text: Some(text.to_string()),
            id: Some(id.to_string()),
            minimized: false,
        }
    }

    #[test]
    fn test_create_note_persists_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.create_note(draft("a", "hello")).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert!(contents.contains(r#""id": "a""#));
    }

    #[test]
    fn test_unset_fields_take_randomized_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        let id = store.create_note(NoteDraft::default()).unwrap();
        let note = store.note(&id).unwrap();

        assert!((100..=800).contains(&note.x()));
        assert!((100..=500).contains(&note.y()));
        assert_eq!(note.width(), 250);
        assert_eq!(note.height(), 200);
        assert!(PALETTE.contains(&note.color()));
        assert_eq!(note.text(), "");
        // ids are UUIDs, not empty strings
        assert_eq!(id.len(), 36);
    }

    #[test]
    fn test_create_three_remove_one_leaves_two_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.create_note(draft("a", "")).unwrap();
        store.create_note(draft("b", "")).unwrap();
        store.create_note(draft("c", "")).unwrap();

        store.remove_note("b").unwrap();

        assert_eq!(store.len(), 2);
        let saved: Vec<NoteData> =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        let ids: Vec<&str> = saved.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_remove_unknown_id_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.remove_note("missing").unwrap();

        // No save was triggered, so no file either.
        assert!(!store.path().exists());
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store
            .create_note(NoteDraft {
                position: Some((42, 77)),
                size: Some((300, 260)),
                color: Some("#E91E63".to_string()),
                text: Some("first — com acentuação".to_string()),
                id: Some("n1".to_string()),
                minimized: false,
            })
            .unwrap();
        store.create_note(draft("n2", "second")).unwrap();
        store.note_mut("n2").unwrap().minimize();
        store.save().unwrap();

        let mut reloaded = store_in(&dir);
        let report = reloaded.load().unwrap();
        assert_eq!(report, LoadReport { restored: 2, skipped: 0 });

        let original: HashMap<String, NoteData> = store
            .ids()
            .iter()
            .map(|id| (id.clone(), store.note(id).unwrap().snapshot()))
            .collect();
        let restored: HashMap<String, NoteData> = reloaded
            .ids()
            .iter()
            .map(|id| (id.clone(), reloaded.note(id).unwrap().snapshot()))
            .collect();
        assert_eq!(original, restored);
        assert!(reloaded.note("n2").unwrap().is_minimized());
    }

    #[test]
    fn test_save_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.create_note(draft("a", "one")).unwrap();
        store.create_note(draft("b", "two")).unwrap();

        store.save().unwrap();
        let first = fs::read(store.path()).unwrap();
        store.save().unwrap();
        let second = fs::read(store.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_load_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("stickers_data.json"),
            r#"[{"id": "partial"}]"#,
        )
        .unwrap();

        let mut store = store_in(&dir);
        store.load().unwrap();

        let note = store.note("partial").unwrap();
        assert_eq!(note.x(), 100);
        assert_eq!(note.y(), 100);
        assert_eq!(note.width(), 250);
        assert_eq!(note.height(), 200);
        assert_eq!(note.color(), PALETTE[0]);
        assert_eq!(note.text(), "");
    }

    #[test]
    fn test_load_assigns_fresh_id_when_record_has_none() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stickers_data.json"), r#"[{"text": "anon"}]"#).unwrap();

        let mut store = store_in(&dir);
        let report = store.load().unwrap();

        assert_eq!(report.restored, 1);
        let ids = store.ids();
        assert_eq!(ids[0].len(), 36);
    }

    #[test]
    fn test_load_malformed_file_fails_with_zero_notes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stickers_data.json"), "not json at all").unwrap();

        let mut store = store_in(&dir);
        match store.load() {
            Err(StickernotesError::Json(_)) => {}
            other => panic!("expected Json error, got {other:?}"),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_skips_bad_records_and_keeps_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("stickers_data.json"),
            r#"[{"id": "good"}, {"id": "bad-color", "color": "nope"}, {"id": "bad-type", "x": "left"}]"#,
        )
        .unwrap();

        let mut store = store_in(&dir);
        let report = store.load().unwrap();

        assert_eq!(report, LoadReport { restored: 1, skipped: 2 });
        assert!(store.note("good").is_some());
        assert!(store.note("bad-color").is_none());
    }

    #[test]
    fn test_load_reapplies_minimized_state() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("stickers_data.json"),
            r#"[{"id": "m", "height": 240, "minimized": true}]"#,
        )
        .unwrap();

        let mut store = store_in(&dir);
        store.load().unwrap();

        let note = store.note_mut("m").unwrap();
        assert!(note.is_minimized());
        assert_eq!(note.height(), MINIMIZED_HEIGHT);
        note.restore();
        assert_eq!(note.height(), 240);
    }

    #[test]
    fn test_clear_all_persists_an_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.create_note(draft("a", "")).unwrap();
        store.create_note(draft("b", "")).unwrap();

        store.clear_all().unwrap();

        assert!(store.is_empty());
        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "[]");
    }

    #[test]
    fn test_insertion_order_is_preserved_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        for id in ["z", "a", "m"] {
            store.create_note(draft(id, "")).unwrap();
        }

        let mut reloaded = store_in(&dir);
        reloaded.load().unwrap();

        assert_eq!(reloaded.ids(), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_duplicate_id_replaces_without_duplicating_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.create_note(draft("dup", "old")).unwrap();
        store.create_note(draft("dup", "new")).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.ids(), vec!["dup"]);
        assert_eq!(store.note("dup").unwrap().text(), "new");
    }
}
