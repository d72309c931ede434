use bevy::prelude::*;

use crate::core::config::GameConfig;
use crate::core::level::spec::StructureSpec;
use crate::persistence::snapshot::LevelSnapshot;

/// One campaign slot: the blueprint plus an optional persisted snapshot
/// (present after a save/load cycle, consumed when the level is entered).
#[derive(Debug, Clone)]
pub struct LevelSlot {
    pub spec: StructureSpec,
    pub snapshot: Option<LevelSnapshot>,
}

impl LevelSlot {
    pub fn new(spec: StructureSpec) -> Self {
        Self {
            spec,
            snapshot: None,
        }
    }
}

/// What the player is currently inside. Random levels are transient: they
/// never enter the campaign slots and are not persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveLevel {
    Campaign(usize),
    Random(StructureSpec),
}

/// Owns the campaign's level list and unlock flags. Explicit resource rather
/// than global state so independent app instances (tests) stay isolated.
#[derive(Resource, Debug, Clone)]
pub struct LevelRegistry {
    pub slots: Vec<LevelSlot>,
    /// Ordered, fixed size = level count. First level starts unlocked.
    pub unlocked: Vec<bool>,
    /// The level currently instantiated in the ECS, if any.
    pub active: Option<ActiveLevel>,
}

impl LevelRegistry {
    pub fn from_config(cfg: &GameConfig) -> Self {
        let slots: Vec<LevelSlot> = cfg.levels.iter().cloned().map(LevelSlot::new).collect();
        let mut unlocked = vec![false; slots.len()];
        if let Some(first) = unlocked.first_mut() {
            *first = true;
        }
        Self {
            slots,
            unlocked,
            active: None,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_unlocked(&self, index: usize) -> bool {
        self.unlocked.get(index).copied().unwrap_or(false)
    }

    /// Flips the first locked level to unlocked (level-complete reward).
    pub fn unlock_next(&mut self) {
        if let Some(flag) = self.unlocked.iter_mut().find(|f| !**f) {
            *flag = true;
        }
    }

    pub fn all_unlocked(&self) -> bool {
        self.unlocked.iter().all(|f| *f)
    }

    /// The level a resuming player should land in: the one before the first
    /// locked level, clamped to the first level. Returns `None` when every
    /// level is unlocked (callers then offer a random level instead).
    pub fn latest_playable_index(&self) -> Option<usize> {
        self.unlocked
            .iter()
            .position(|f| !*f)
            .map(|i| i.saturating_sub(1))
    }

    /// Drops a slot's snapshot so the next entry rebuilds from the blueprint.
    pub fn clear_snapshot(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.snapshot = None;
        }
    }

    /// The campaign index currently being played, if the active level is not
    /// a transient random one.
    pub fn active_campaign(&self) -> Option<usize> {
        match self.active {
            Some(ActiveLevel::Campaign(i)) => Some(i),
            _ => None,
        }
    }
}
