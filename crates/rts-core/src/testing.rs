//! A scripted game world for tests
//!
//! [`MockWorld`] answers queries from plain fields and records every
//! mutation the runtime asks for, stamped with [`MockWorld::now`].

use crate::action::GameAction;
use crate::identity::{PlayerMask, Position, SectorId, TriggerId};
use crate::script::ConditionCheck;
use crate::time::Tick;
use crate::world::{ActionContext, GameWorld, PlayerInfo};
use indexmap::IndexMap;
use std::collections::HashSet;

/// A game action the runtime performed
#[derive(Debug, Clone, PartialEq)]
pub struct Performed {
    pub tick: Tick,
    pub trigger: TriggerId,
    pub action: GameAction,
    pub acti_players: PlayerMask,
    pub sound_origin: Option<Position>,
}

/// In-memory [`GameWorld`]
#[derive(Debug, Clone, Default)]
pub struct MockWorld {
    /// Tick stamped on recorded actions
    pub now: Tick,
    pub players: Vec<PlayerInfo>,
    pub console_player: usize,
    /// Sector -> (floor, ceiling)
    pub sectors: IndexMap<SectorId, (f32, f32)>,
    /// Sector the point lookup returns for every point
    pub sector_under_points: Option<SectorId>,
    pub living: IndexMap<String, u32>,
    /// (player, condition name) pairs that hold
    pub conditions: HashSet<(usize, String)>,
    /// Known styles; `None` accepts every style
    pub styles: Option<Vec<String>>,

    pub performed: Vec<Performed>,
    pub console: Vec<String>,
    pub tip_sounds: usize,
    /// (thing types, marker) passed to `watch_deaths`
    pub watches: Vec<(Vec<String>, i32)>,
}

impl MockWorld {
    /// An empty world with no players
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_player(&mut self, player: PlayerInfo) {
        self.players.push(player);
    }

    pub fn add_sector(&mut self, sector: SectorId, floor: f32, ceiling: f32) {
        self.sectors.insert(sector, (floor, ceiling));
    }

    pub fn set_floor(&mut self, sector: SectorId, floor: f32) {
        if let Some(heights) = self.sectors.get_mut(&sector) {
            heights.0 = floor;
        }
    }

    pub fn set_ceiling(&mut self, sector: SectorId, ceiling: f32) {
        if let Some(heights) = self.sectors.get_mut(&sector) {
            heights.1 = ceiling;
        }
    }

    pub fn set_living(&mut self, thing_type: &str, count: u32) {
        self.living.insert(thing_type.to_ascii_uppercase(), count);
    }

    /// Make a named condition hold for a player
    pub fn grant_condition(&mut self, player: usize, name: &str) {
        self.conditions.insert((player, name.to_ascii_uppercase()));
    }

    /// Ticks at which actions were performed
    pub fn performed_ticks(&self) -> Vec<Tick> {
        self.performed.iter().map(|p| p.tick).collect()
    }

    /// Amounts of every `DAMAGEPLAYER` performed
    pub fn performed_amounts(&self) -> Vec<f32> {
        self.performed
            .iter()
            .filter_map(|p| match p.action {
                GameAction::DamagePlayer { amount } => Some(amount),
                _ => None,
            })
            .collect()
    }
}

impl GameWorld for MockWorld {
    fn players(&self) -> Vec<PlayerInfo> {
        self.players.clone()
    }

    fn console_player(&self) -> usize {
        self.console_player
    }

    fn sector_at(&self, _x: f32, _y: f32) -> Option<SectorId> {
        self.sector_under_points
    }

    fn sector_by_index(&self, index: u32) -> Option<SectorId> {
        let sector = SectorId(index);
        self.sectors.contains_key(&sector).then_some(sector)
    }

    fn floor_height(&self, sector: SectorId) -> f32 {
        self.sectors.get(&sector).map(|h| h.0).unwrap_or(0.0)
    }

    fn ceiling_height(&self, sector: SectorId) -> f32 {
        self.sectors.get(&sector).map(|h| h.1).unwrap_or(0.0)
    }

    fn living_count(&self, thing_type: &str) -> Option<u32> {
        self.living.get(&thing_type.to_ascii_uppercase()).copied()
    }

    fn check_condition(&self, player: usize, condition: &ConditionCheck) -> bool {
        let holds = self
            .conditions
            .contains(&(player, condition.name.to_ascii_uppercase()));
        holds != condition.negate
    }

    fn has_style(&self, style: &str) -> bool {
        match &self.styles {
            Some(styles) => styles.iter().any(|s| s.eq_ignore_ascii_case(style)),
            None => true,
        }
    }

    fn perform(&mut self, ctx: &ActionContext<'_>, action: &GameAction) {
        self.performed.push(Performed {
            tick: self.now,
            trigger: ctx.trigger,
            action: action.clone(),
            acti_players: ctx.acti_players,
            sound_origin: ctx.sound_origin,
        });
    }

    fn watch_deaths(&mut self, thing_types: &[String], wud_tag: i32) -> u32 {
        self.watches.push((thing_types.to_vec(), wud_tag));
        thing_types
            .iter()
            .filter_map(|t| self.living_count(t))
            .sum()
    }

    fn console_message(&mut self, text: &str) {
        self.console.push(text.to_string());
    }

    fn tip_sound(&mut self) {
        self.tip_sounds += 1;
    }
}
