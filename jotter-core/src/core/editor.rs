//! Draft state of the note editor.
//!
//! An [`EditorSession`] holds the fields being edited, separately from the
//! store, and decides when they may be written: a manual [`save`] rejects a
//! blank title, an [`autosave`] silently skips it. The first successful save of
//! a new note turns the session into an edit of the created note.
//!
//! The editor also owns the zoom controls. Zoom is clamped to
//! `[MIN_FONT_ZOOM, MAX_FONT_ZOOM]` here and every change is remembered as the
//! device's zoom preference.
//!
//! [`save`]: EditorSession::save
//! [`autosave`]: EditorSession::autosave

use crate::core::note::{clamp_font_zoom, DEFAULT_FONT_ZOOM};
use crate::core::palette::DEFAULT_COLOR;
use crate::{
    Debouncer, JotterError, Note, NoteDraft, NotePatch, NotesPersistence, NotesStore, Result,
    SharedNotesStore, UpdateOutcome, ZoomPreference,
};
use std::sync::{Arc, Mutex};

/// Step applied by [`EditorSession::zoom_in`] and [`EditorSession::zoom_out`].
pub const ZOOM_STEP: u32 = 10;

pub struct EditorSession {
    note_id: Option<String>,
    title: String,
    content: String,
    color: String,
    important: bool,
    font_zoom: u32,
    last_saved: Option<i64>,
    zoom_preference: ZoomPreference,
}

impl EditorSession {
    /// Starts a draft for a note that does not exist yet, at the remembered zoom.
    pub fn new_note(zoom_preference: ZoomPreference) -> Self {
        Self {
            note_id: None,
            title: String::new(),
            content: String::new(),
            color: DEFAULT_COLOR.to_string(),
            important: false,
            font_zoom: zoom_preference.load(),
            last_saved: None,
            zoom_preference,
        }
    }

    /// Starts editing `note`. Its zoom becomes the remembered zoom.
    pub fn open(note: &Note, zoom_preference: ZoomPreference) -> Self {
        let mut session = Self {
            note_id: Some(note.id.clone()),
            title: note.title.clone(),
            content: note.content.clone(),
            color: note.color.clone(),
            important: note.important,
            font_zoom: DEFAULT_FONT_ZOOM,
            last_saved: None,
            zoom_preference,
        };
        session.set_font_zoom(note.font_zoom);
        session
    }

    /// The id being edited, or `None` until a new note is first saved.
    pub fn note_id(&self) -> Option<&str> {
        self.note_id.as_deref()
    }

    pub fn is_new(&self) -> bool {
        self.note_id.is_none()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn important(&self) -> bool {
        self.important
    }

    pub fn font_zoom(&self) -> u32 {
        self.font_zoom
    }

    /// Timestamp of the last successful save in this session.
    pub fn last_saved(&self) -> Option<i64> {
        self.last_saved
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    pub fn toggle_important(&mut self) {
        self.important = !self.important;
    }

    /// Sets the zoom (clamped) and remembers it as the device preference.
    pub fn set_font_zoom(&mut self, zoom: u32) {
        self.font_zoom = clamp_font_zoom(zoom);
        if let Err(e) = self.zoom_preference.save(self.font_zoom) {
            log::warn!("failed to store zoom preference: {e}");
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_font_zoom(self.font_zoom.saturating_add(ZOOM_STEP));
    }

    pub fn zoom_out(&mut self) {
        self.set_font_zoom(self.font_zoom.saturating_sub(ZOOM_STEP));
    }

    pub fn reset_zoom(&mut self) {
        self.set_font_zoom(DEFAULT_FONT_ZOOM);
    }

    /// Restores default color, importance and zoom. Title and content stay.
    pub fn clear_formatting(&mut self) {
        self.color = DEFAULT_COLOR.to_string();
        self.important = false;
        self.reset_zoom();
    }

    fn draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            color: self.color.clone(),
            important: self.important,
            font_zoom: self.font_zoom,
        }
    }

    /// Writes the draft to `store`, creating the note on first save.
    ///
    /// # Errors
    ///
    /// Returns [`JotterError::ValidationFailed`] if the title is blank, or
    /// [`JotterError::NoteNotFound`] if the note being edited has been deleted.
    pub fn save<P: NotesPersistence>(&mut self, store: &mut NotesStore<P>) -> Result<Note> {
        if self.title.trim().is_empty() {
            return Err(JotterError::ValidationFailed("Please enter a title".to_string()));
        }
        self.commit(store)
    }

    /// Like [`save`](Self::save), but a blank title is skipped rather than
    /// rejected.
    pub fn autosave<P: NotesPersistence>(
        &mut self,
        store: &mut NotesStore<P>,
    ) -> Result<Option<Note>> {
        if self.title.trim().is_empty() {
            log::trace!("autosave skipped, title is blank");
            return Ok(None);
        }
        self.commit(store).map(Some)
    }

    fn commit<P: NotesPersistence>(&mut self, store: &mut NotesStore<P>) -> Result<Note> {
        let saved = match &self.note_id {
            None => {
                let note = store.add_note(self.draft());
                log::info!("Note created: {}", note.id);
                self.note_id = Some(note.id.clone());
                note
            }
            Some(id) => match store.update_note(id, NotePatch::from(self.draft())) {
                UpdateOutcome::Updated(note) => note,
                UpdateOutcome::NotFound => return Err(JotterError::NoteNotFound(id.clone())),
            },
        };
        self.last_saved = Some(saved.updated_at);
        Ok(saved)
    }
}

/// Schedules a debounced [`EditorSession::autosave`] of `editor` into `store`.
///
/// The draft is read when the save runs, so edits made during the quiet
/// period are included.
pub fn schedule_autosave<P>(
    debouncer: &mut Debouncer,
    editor: Arc<Mutex<EditorSession>>,
    store: SharedNotesStore<P>,
) where
    P: NotesPersistence + 'static,
{
    debouncer.schedule(move || {
        let (Ok(mut editor), Ok(mut store)) = (editor.lock(), store.lock()) else {
            log::error!("autosave skipped, editor or store lock poisoned");
            return;
        };
        match editor.autosave(&mut *store) {
            Ok(Some(note)) => log::debug!("autosaved note {}", note.id),
            Ok(None) => {}
            Err(e) => log::warn!("autosave failed: {e}"),
        }
    });
}
