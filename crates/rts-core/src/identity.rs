//! Identity types for triggers, players and sectors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Map id that makes a script apply to every map
pub const ALL_MAPS: &str = "ALL";

/// Maximum number of player slots a [`PlayerMask`] can describe
pub const MAX_PLAYERS: usize = 32;

/// Handle to a live trigger instance
///
/// The generation makes handles to destroyed triggers go stale instead of
/// aliasing whatever instance reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerId {
    index: u32,
    generation: u32,
}

impl TriggerId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the trigger arena
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation of the slot when this handle was issued
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trigger:{}v{}", self.index, self.generation)
    }
}

/// Bitmask of player slots (bit N = player N)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerMask(pub u32);

impl PlayerMask {
    /// No players
    pub const EMPTY: PlayerMask = PlayerMask(0);

    /// Mask containing a single player
    pub fn single(player: usize) -> Self {
        if player < MAX_PLAYERS {
            Self(1 << player)
        } else {
            Self::EMPTY
        }
    }

    /// Check whether the mask is empty
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Check whether a player is in the mask
    pub fn contains(&self, player: usize) -> bool {
        player < MAX_PLAYERS && self.0 & (1 << player) != 0
    }

    /// Add a player to the mask
    pub fn insert(&mut self, player: usize) {
        if player < MAX_PLAYERS {
            self.0 |= 1 << player;
        }
    }

    /// Remove a player from the mask
    pub fn remove(&mut self, player: usize) {
        if player < MAX_PLAYERS {
            self.0 &= !(1 << player);
        }
    }

    /// Players present in both masks
    pub fn intersect(self, other: PlayerMask) -> PlayerMask {
        PlayerMask(self.0 & other.0)
    }

    /// Number of players in the mask
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate over the player indices in the mask
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..MAX_PLAYERS).filter(move |p| self.contains(*p))
    }
}

impl FromIterator<usize> for PlayerMask {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut mask = PlayerMask::EMPTY;
        for player in iter {
            mask.insert(player);
        }
        mask
    }
}

/// Identifier of a level sector, as handed out by the game world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectorId(pub u32);

impl fmt::Display for SectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sector:{}", self.0)
    }
}

/// A point in map space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    /// Create a new position
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}
