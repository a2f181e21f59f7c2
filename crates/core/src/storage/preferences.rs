use tracing::warn;

use crate::errors::CoreError;
use crate::models::history::{self, HistoryEntry, DEFAULT_HISTORY_CAPACITY};
use crate::models::request::FormField;
use crate::models::theme::Theme;
use super::traits::KeyValueStore;

/// Storage key of the persisted theme.
pub const THEME_KEY: &str = "theme";

/// Prefix of the per-field memory keys (`car_year`, `car_kms`, ...).
pub const FIELD_KEY_PREFIX: &str = "car_";

/// Storage key of the JSON-encoded prediction history.
pub const HISTORY_KEY: &str = "prediction_history";

/// Storage key for a form field's remembered value.
pub fn field_key(field: FormField) -> String {
    format!("{FIELD_KEY_PREFIX}{}", field.id())
}

/// Everything the page persists between visits, behind explicit accessors.
///
/// Three independent record kinds share one store: the theme, one
/// remembered value per form field, and a bounded newest-first history.
/// All access is synchronous read-modify-write with no locking; callers
/// run on a single UI thread.
pub struct Preferences {
    store: Box<dyn KeyValueStore>,
    history_capacity: usize,
}

impl Preferences {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self::with_capacity(store, DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(store: Box<dyn KeyValueStore>, history_capacity: usize) -> Self {
        Self {
            store,
            history_capacity,
        }
    }

    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }

    // ── Theme ───────────────────────────────────────────────────────

    /// The persisted theme, `Light` when nothing (or garbage) is stored.
    pub fn theme(&self) -> Result<Theme, CoreError> {
        let Some(raw) = self.store.get_item(THEME_KEY)? else {
            return Ok(Theme::default());
        };
        match raw.parse() {
            Ok(theme) => Ok(theme),
            Err(e) => {
                warn!(stored = %raw, error = %e, "ignoring unrecognised stored theme");
                Ok(Theme::default())
            }
        }
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), CoreError> {
        self.store.set_item(THEME_KEY, theme.as_str())
    }

    // ── Field memory ────────────────────────────────────────────────

    /// Last value entered into `field`, if one was stored and is non-empty.
    pub fn field_value(&self, field: FormField) -> Result<Option<String>, CoreError> {
        Ok(self
            .store
            .get_item(&field_key(field))?
            .filter(|v| !v.is_empty()))
    }

    pub fn remember_field(&self, field: FormField, value: &str) -> Result<(), CoreError> {
        self.store.set_item(&field_key(field), value)
    }

    // ── History ─────────────────────────────────────────────────────

    /// Stored prediction history, newest first.
    ///
    /// An unreadable stored list is treated as empty; the next successful
    /// prediction overwrites it.
    pub fn history(&self) -> Result<Vec<HistoryEntry>, CoreError> {
        let Some(raw) = self.store.get_item(HISTORY_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(error = %e, "stored prediction history is corrupt, starting over");
                Ok(Vec::new())
            }
        }
    }

    /// Prepend `entry`, trim to capacity, and write the whole list back.
    /// Returns the new history length.
    pub fn push_history(&self, entry: HistoryEntry) -> Result<usize, CoreError> {
        let mut entries = self.history()?;
        history::push_capped(&mut entries, entry, self.history_capacity);

        let json = serde_json::to_string(&entries)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize history: {e}")))?;
        self.store.set_item(HISTORY_KEY, &json)?;
        Ok(entries.len())
    }

    pub fn clear_history(&self) -> Result<(), CoreError> {
        self.store.remove_item(HISTORY_KEY)
    }
}
