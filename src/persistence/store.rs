use std::{fs, path::Path};

use crate::core::level::registry::LevelRegistry;
use crate::persistence::snapshot::{SaveGame, SAVE_VERSION};

pub fn save_to_file(path: impl AsRef<Path>, save: &SaveGame) -> Result<(), String> {
    let text = ron::ser::to_string_pretty(save, ron::ser::PrettyConfig::default())
        .map_err(|e| format!("encode save: {e}"))?;
    fs::write(&path, text).map_err(|e| format!("write save {:?}: {e}", path.as_ref()))
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<SaveGame, String> {
    let text = fs::read_to_string(&path)
        .map_err(|e| format!("read save {:?}: {e}", path.as_ref()))?;
    let save: SaveGame = ron::from_str(&text).map_err(|e| format!("parse save: {e}"))?;
    if save.version != SAVE_VERSION {
        return Err(format!(
            "save version {} unsupported (expected {SAVE_VERSION})",
            save.version
        ));
    }
    Ok(save)
}

/// Builds the post-load registry without touching the current one. Callers
/// swap the result in only on `Ok`, so a corrupt save never leaves a
/// half-reconstructed level list behind.
pub fn apply_save(current: &LevelRegistry, save: SaveGame) -> Result<LevelRegistry, String> {
    if save.unlocked.len() != current.len() {
        return Err(format!(
            "save has {} unlock flags, campaign has {} levels",
            save.unlocked.len(),
            current.len()
        ));
    }
    let mut next = current.clone();
    next.unlocked = save.unlocked;
    next.active = None;
    for slot in &mut next.slots {
        slot.snapshot = None;
    }
    for level in save.levels {
        let Some(slot) = next.slots.get_mut(level.index) else {
            return Err(format!("save references level {} out of range", level.index));
        };
        slot.spec = level.spec.clone();
        slot.snapshot = Some(level);
    }
    Ok(next)
}
