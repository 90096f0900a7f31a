//! Compiled script definitions
//!
//! A [`ScriptDef`] is produced once per `RADIUS_TRIGGER` / `RECT_TRIGGER`
//! block and never changes afterwards. Live triggers share it through an
//! `Arc`.

use crate::action::{Action, SectorPlane};
use crate::error::{Error, Result};
use crate::identity::{Position, ALL_MAPS, MAX_PLAYERS};
use crate::tag::Tag;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Game mode, used by appearance gating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    #[default]
    Single,
    Coop,
    Deathmatch,
}

/// Skill and mode bits controlling where a script appears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Appearance(pub u16);

impl Appearance {
    pub const SKILL_MASK: u16 = 0b1_1111;
    pub const SINGLE: u16 = 1 << 5;
    pub const COOP: u16 = 1 << 6;
    pub const DEATHMATCH: u16 = 1 << 7;
    pub const MODE_MASK: u16 = Self::SINGLE | Self::COOP | Self::DEATHMATCH;

    /// Appears on every skill in every mode
    pub const ALL: Appearance = Appearance(Self::SKILL_MASK | Self::MODE_MASK);

    /// Bit for a 1-based skill level
    pub fn skill_bit(skill: u8) -> u16 {
        if (1..=5).contains(&skill) {
            1 << (skill - 1)
        } else {
            0
        }
    }

    /// Bit for a game mode
    pub fn mode_bit(mode: GameMode) -> u16 {
        match mode {
            GameMode::Single => Self::SINGLE,
            GameMode::Coop => Self::COOP,
            GameMode::Deathmatch => Self::DEATHMATCH,
        }
    }

    /// Check a skill/mode combination against these bits
    pub fn allows(&self, skill: u8, mode: GameMode) -> bool {
        self.0 & Self::skill_bit(skill) != 0 && self.0 & Self::mode_bit(mode) != 0
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self::ALL
    }
}

/// Symmetric height band around a centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightBand {
    pub center: f32,
    pub half: f32,
}

impl HeightBand {
    /// Band covering `[z1, z2]` in either order
    pub fn from_range(z1: f32, z2: f32) -> Self {
        Self {
            center: (z1 + z2) / 2.0,
            half: (z2 - z1).abs() / 2.0,
        }
    }

    /// Whether an actor standing at `z` with `height` overlaps the band
    pub fn overlaps(&self, z: f32, height: f32) -> bool {
        let half_height = height / 2.0;
        (self.center - (z + half_height)).abs() <= self.half + half_height
    }
}

/// Where a script is triggered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Spatial {
    /// Circle around (x, y)
    Radius {
        x: f32,
        y: f32,
        radius: f32,
        height: Option<HeightBand>,
    },
    /// Axis-aligned rectangle centred on (x, y)
    Rect {
        x: f32,
        y: f32,
        half_x: f32,
        half_y: f32,
        height: Option<HeightBand>,
    },
    /// Any sector carrying a tag
    SectorTag {
        tag: i32,
        height: Option<HeightBand>,
    },
    /// One sector by index
    SectorIndex {
        index: u32,
        height: Option<HeightBand>,
    },
    /// Anywhere on the map
    Everywhere,
}

impl Spatial {
    /// Centre point used for sound origins and sector lookups
    pub fn center(&self) -> Position {
        match self {
            Spatial::Radius { x, y, height, .. } | Spatial::Rect { x, y, height, .. } => {
                Position::new(*x, *y, height.map(|h| h.center).unwrap_or(0.0))
            }
            Spatial::SectorTag { height, .. } | Spatial::SectorIndex { height, .. } => {
                Position::new(0.0, 0.0, height.map(|h| h.center).unwrap_or(0.0))
            }
            Spatial::Everywhere => Position::default(),
        }
    }
}

/// Repeat policy from `TAGGED_REPEATABLE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatPolicy {
    /// Extra passes after the first; negative repeats forever
    pub count: i32,
    /// Ticks to wait between passes
    pub delay: i32,
}

impl RepeatPolicy {
    /// Run the state list once
    pub const ONCE: RepeatPolicy = RepeatPolicy { count: 0, delay: 0 };

    /// Whether the trigger repeats forever
    pub fn is_forever(&self) -> bool {
        self.count < 0
    }
}

impl Default for RepeatPolicy {
    fn default() -> Self {
        Self::ONCE
    }
}

/// `ONDEATH type [threshold]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeathCheck {
    pub thing_type: String,
    /// Passes once no more than this many are still alive
    pub threshold: u32,
}

/// `ONHEIGHT` / `ONCEILINGHEIGHT z1 z2 [sector]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightCheck {
    pub z1: f32,
    pub z2: f32,
    /// Sector index; `None` means the sector under the trigger's centre
    pub sector: Option<u32>,
    pub plane: SectorPlane,
}

impl HeightCheck {
    /// Whether a plane height lies in the band
    pub fn contains(&self, height: f32) -> bool {
        self.z1 <= height && height <= self.z2
    }
}

/// A custom condition such as `HEALTH(50)` or `!JUMPING`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionCheck {
    pub name: String,
    pub amount: Option<f32>,
    pub negate: bool,
}

impl fmt::Display for ConditionCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negate {
            write!(f, "!")?;
        }
        match self.amount {
            Some(amount) => write!(f, "{}({})", self.name, amount),
            None => write!(f, "{}", self.name),
        }
    }
}

/// `PATH_EVENT label[:offset]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEvent {
    pub label: String,
    pub offset: u32,
}

/// Where a definition came from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// One compiled instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Ticks to wait before this state runs
    pub tics: i32,
    pub action: Action,
    pub label: Option<String>,
}

/// A program counter expressed against labels, stable across script edits
/// that add or remove states before the label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRef {
    /// Label name, or `"*"` for the start of the script
    pub label: String,
    pub offset: usize,
}

impl StateRef {
    /// Label text meaning "the first state"
    pub const START: &'static str = "*";
}

/// A compiled radius trigger script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptDef {
    /// Owning map id, or [`ALL_MAPS`]
    pub map: String,
    pub name: Option<String>,
    pub tag: Option<Tag>,
    pub spatial: Spatial,

    pub appear: Appearance,
    pub min_players: u32,
    pub max_players: u32,
    pub tagged_use: bool,
    pub independent: bool,
    pub immediate: bool,
    pub disabled: bool,
    pub repeat: RepeatPolicy,

    pub states: Vec<State>,
    /// Upper-cased label -> state index
    pub labels: IndexMap<String, usize>,

    /// `TAGGED_PATH` successors, by script name
    pub path_next: Vec<String>,
    pub path_event: Option<PathEvent>,
    pub death_checks: Vec<DeathCheck>,
    pub height_checks: Vec<HeightCheck>,
    pub conditions: Vec<ConditionCheck>,

    pub source: SourceLocation,
    /// Which load produced this definition
    pub load_serial: u32,
}

impl ScriptDef {
    /// Create an empty definition for a map
    pub fn new(map: impl Into<String>, spatial: Spatial, source: SourceLocation) -> Self {
        Self {
            map: map.into(),
            name: None,
            tag: None,
            spatial,
            appear: Appearance::ALL,
            min_players: 0,
            max_players: MAX_PLAYERS as u32,
            tagged_use: false,
            independent: false,
            immediate: false,
            disabled: false,
            repeat: RepeatPolicy::ONCE,
            states: Vec::new(),
            labels: IndexMap::new(),
            path_next: Vec::new(),
            path_event: None,
            death_checks: Vec::new(),
            height_checks: Vec::new(),
            conditions: Vec::new(),
            source,
            load_serial: 0,
        }
    }

    /// Whether this script applies to a map
    pub fn applies_to(&self, map: &str) -> bool {
        self.map.eq_ignore_ascii_case(ALL_MAPS) || self.map.eq_ignore_ascii_case(map)
    }

    /// Whether the script name matches (case-insensitive)
    pub fn has_name(&self, name: &str) -> bool {
        self.name
            .as_deref()
            .map(|n| n.eq_ignore_ascii_case(name))
            .unwrap_or(false)
    }

    /// Human-readable identity for logs
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => format!("{}/{}", self.map, name),
            None => format!("{}@{}", self.map, self.source),
        }
    }

    /// Look up a label (case-insensitive)
    pub fn find_label(&self, label: &str) -> Option<usize> {
        self.labels.get(&label.to_ascii_uppercase()).copied()
    }

    /// Delay of the first state, or zero for an empty script
    pub fn first_tics(&self) -> i32 {
        self.states.first().map(|s| s.tics).unwrap_or(0)
    }

    /// Express a state index relative to the nearest label at or before it
    pub fn state_ref(&self, index: usize) -> StateRef {
        let end = index.saturating_add(1).min(self.states.len());
        let nearest = self.states[..end]
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, s)| s.label.as_ref().map(|l| (i, l)));

        match nearest {
            Some((i, label)) => StateRef {
                label: label.clone(),
                offset: index - i,
            },
            None => StateRef {
                label: StateRef::START.to_string(),
                offset: index,
            },
        }
    }

    /// Resolve a saved [`StateRef`] back to a state index
    pub fn resolve_state_ref(&self, state: &StateRef) -> Result<usize> {
        let base = if state.label == StateRef::START {
            0
        } else {
            self.find_label(&state.label)
                .ok_or_else(|| Error::LabelNotFound {
                    script: self.display_name(),
                    label: state.label.clone(),
                })?
        };
        let index = base.saturating_add(state.offset);
        if index < self.states.len() {
            Ok(index)
        } else {
            Err(Error::InvalidState {
                script: self.display_name(),
                index,
                len: self.states.len(),
            })
        }
    }
}
