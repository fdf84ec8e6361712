//! Sound preference
//!
//! The only thing the site keeps in browser storage: whether sound effects are muted.
//! Stored as a bare JSON boolean (`"true"` / `"false"`) under `soundMuted`.

use serde::{Deserialize, Serialize};

use crate::platform::Storage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundSettings {
    pub muted: bool,
}

impl SoundSettings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "soundMuted";

    /// Load from storage; anything missing or unreadable means unmuted
    pub fn load(storage: &impl Storage) -> Self {
        let muted = storage
            .get(Self::STORAGE_KEY)
            .and_then(|raw| serde_json::from_str::<bool>(&raw).ok());

        match muted {
            Some(muted) => {
                log::info!("Loaded sound preference (muted: {})", muted);
                Self { muted }
            }
            None => Self::default(),
        }
    }

    pub fn save(&self, storage: &mut impl Storage) {
        if let Ok(raw) = serde_json::to_string(&self.muted) {
            storage.set(Self::STORAGE_KEY, &raw);
        }
    }

    /// Flip and persist; returns the new muted state
    pub fn toggle_mute(&mut self, storage: &mut impl Storage) -> bool {
        self.muted = !self.muted;
        self.save(storage);
        self.muted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;

    #[test]
    fn test_default_is_unmuted() {
        let storage = MemoryStorage::new();
        assert!(!SoundSettings::load(&storage).muted);
    }

    #[test]
    fn test_toggle_persists_plain_bool() {
        let mut storage = MemoryStorage::new();
        let mut settings = SoundSettings::load(&storage);

        assert!(settings.toggle_mute(&mut storage));
        assert_eq!(storage.get("soundMuted").as_deref(), Some("true"));
        assert!(SoundSettings::load(&storage).muted);

        assert!(!settings.toggle_mute(&mut storage));
        assert_eq!(storage.get("soundMuted").as_deref(), Some("false"));
    }

    #[test]
    fn test_garbage_falls_back_to_unmuted() {
        let mut storage = MemoryStorage::new();
        storage.set("soundMuted", "maybe");
        assert!(!SoundSettings::load(&storage).muted);
    }
}
