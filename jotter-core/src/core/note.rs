use serde::{Deserialize, Serialize};

/// Smallest font zoom percentage a note can carry.
pub const MIN_FONT_ZOOM: u32 = 50;
/// Largest font zoom percentage a note can carry.
pub const MAX_FONT_ZOOM: u32 = 200;
/// Font zoom used for new notes and after a reset.
pub const DEFAULT_FONT_ZOOM: u32 = 100;

/// Clamps a zoom percentage into `[MIN_FONT_ZOOM, MAX_FONT_ZOOM]`.
pub fn clamp_font_zoom(zoom: u32) -> u32 {
    zoom.clamp(MIN_FONT_ZOOM, MAX_FONT_ZOOM)
}

/// A single note as stored under `notes_<deviceId>`.
///
/// Field names serialize in camelCase (`fontZoom`, `createdAt`, `updatedAt`)
/// so the stored JSON matches the documented layout exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub color: String,
    pub important: bool,
    pub font_zoom: u32,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    /// Milliseconds since the Unix epoch; never earlier than `created_at`.
    pub updated_at: i64,
}

/// The caller-supplied fields of a note about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub color: String,
    pub important: bool,
    pub font_zoom: u32,
}

impl Default for NoteDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            color: crate::core::palette::DEFAULT_COLOR.to_string(),
            important: false,
            font_zoom: DEFAULT_FONT_ZOOM,
        }
    }
}

/// A partial update; `None` leaves the existing value in place.
///
/// `id` and `created_at` never change, and `updated_at` is owned by the
/// store, so none of them can be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub color: Option<String>,
    pub important: Option<bool>,
    pub font_zoom: Option<u32>,
}

impl NotePatch {
    /// Returns `true` if the patch would not change any field.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.color.is_none()
            && self.important.is_none()
            && self.font_zoom.is_none()
    }

    /// Overlays the patch on `note`, leaving timestamps untouched.
    pub(crate) fn apply_to(self, note: &mut Note) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
        if let Some(color) = self.color {
            note.color = color;
        }
        if let Some(important) = self.important {
            note.important = important;
        }
        if let Some(zoom) = self.font_zoom {
            note.font_zoom = clamp_font_zoom(zoom);
        }
    }
}

impl From<NoteDraft> for NotePatch {
    fn from(draft: NoteDraft) -> Self {
        Self {
            title: Some(draft.title),
            content: Some(draft.content),
            color: Some(draft.color),
            important: Some(draft.important),
            font_zoom: Some(draft.font_zoom),
        }
    }
}
