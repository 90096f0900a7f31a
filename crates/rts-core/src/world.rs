//! The game world as seen by the trigger runtime
//!
//! The runtime never touches level geometry, things or sound directly. It
//! asks a [`GameWorld`] for what it needs to evaluate conditions and hands it
//! every [`GameAction`] to carry out.

use crate::action::GameAction;
use crate::identity::{PlayerMask, Position, SectorId, TriggerId};
use crate::script::{ConditionCheck, GameMode, ScriptDef};

/// A live player as the condition evaluator sees it
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerInfo {
    /// Player slot
    pub index: usize,
    pub x: f32,
    pub y: f32,
    /// Feet height
    pub z: f32,
    pub radius: f32,
    pub height: f32,
    /// Holding the use key this tick
    pub use_pressed: bool,
    pub sector: SectorId,
    pub sector_tag: i32,
}

impl PlayerInfo {
    /// A player with default body size standing at (x, y, 0)
    pub fn at(index: usize, x: f32, y: f32) -> Self {
        Self {
            index,
            x,
            y,
            z: 0.0,
            radius: 16.0,
            height: 56.0,
            use_pressed: false,
            sector: SectorId(0),
            sector_tag: 0,
        }
    }
}

/// Settings that decide which scripts spawn on a level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSettings {
    /// 1-based skill level
    pub skill: u8,
    pub mode: GameMode,
    pub player_count: u32,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            skill: 3,
            mode: GameMode::Single,
            player_count: 1,
        }
    }
}

/// The trigger a game action runs on behalf of
#[derive(Debug, Clone)]
pub struct ActionContext<'a> {
    pub trigger: TriggerId,
    pub script: &'a ScriptDef,
    /// Players that activated the trigger
    pub acti_players: PlayerMask,
    /// Origin of sounds started without an explicit position
    pub sound_origin: Option<Position>,
}

/// Everything the trigger runtime needs from the running game
///
/// Handlers must degrade to a no-op when an action names something that no
/// longer exists (an unknown thing type, a removed sector): trigger scripts
/// must never crash a running level.
pub trait GameWorld {
    /// Players currently alive
    fn players(&self) -> Vec<PlayerInfo>;

    /// The local player, for tips and menus
    fn console_player(&self) -> usize;

    /// Sector containing a point
    fn sector_at(&self, x: f32, y: f32) -> Option<SectorId>;

    /// Sector by level index
    fn sector_by_index(&self, index: u32) -> Option<SectorId>;

    /// Current floor height of a sector
    fn floor_height(&self, sector: SectorId) -> f32;

    /// Current ceiling height of a sector
    fn ceiling_height(&self, sector: SectorId) -> f32;

    /// Living things of a type; `None` if the type has never been seen
    fn living_count(&self, thing_type: &str) -> Option<u32>;

    /// Evaluate a custom condition for a player
    fn check_condition(&self, player: usize, condition: &ConditionCheck) -> bool;

    /// Whether a tip/menu style exists
    fn has_style(&self, _style: &str) -> bool {
        true
    }

    /// Carry out a game action
    fn perform(&mut self, ctx: &ActionContext<'_>, action: &GameAction);

    /// Mark living things of the given types with `wud_tag` and return how
    /// many were marked; each death must later be reported through the
    /// engine's monster-death notification
    fn watch_deaths(&mut self, thing_types: &[String], wud_tag: i32) -> u32;

    /// Echo a message to the console
    fn console_message(&mut self, _text: &str) {}

    /// Play the sound that accompanies a tip
    fn tip_sound(&mut self) {}
}
