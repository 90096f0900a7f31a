//! Compiled actions
//!
//! Every action primitive compiles to one [`Action`] with its parameters
//! fully decoded, so the scheduler never re-parses text. Control actions are
//! executed by the scheduler itself; [`GameAction`]s are handed to the game
//! world through [`crate::GameWorld::perform`].

use crate::script::Appearance;
use crate::tag::Tag;
use serde::{Deserialize, Serialize};

/// A jump destination, resolved to a state index when the script is compiled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpTarget {
    /// Label name as written (upper-cased)
    pub label: String,
    /// Index of the first state after the label
    pub state: usize,
}

impl JumpTarget {
    /// Create an unresolved target
    pub fn unresolved(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            state: usize::MAX,
        }
    }

    /// Whether the compiler has filled in the state index
    pub fn is_resolved(&self) -> bool {
        self.state != usize::MAX
    }
}

/// What a tip displays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TipContent {
    /// Literal text
    Text(String),
    /// Language-file lookup key
    Ldf(String),
    /// Graphic lump name
    Graphic(String),
}

impl TipContent {
    /// Text echoed to the console when the tip is shown
    pub fn console_text(&self) -> Option<&str> {
        match self {
            TipContent::Text(s) | TipContent::Ldf(s) => Some(s),
            TipContent::Graphic(_) => None,
        }
    }
}

/// A tip to show in the trigger's current tip slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipDef {
    pub content: TipContent,
    /// Display time in ticks
    pub time: i32,
    /// Play the tip sound
    pub sound: bool,
    /// Graphic scale
    pub scale: f32,
}

/// Adjustment to a tip slot's presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TipChange {
    /// Move to (x, y), fractions of the screen, over `time` ticks
    Position { x: f32, y: f32, time: i32 },
    /// Change the text colour
    Colour { colour: String },
    /// Fade to a translucency over `time` ticks
    Translucency { alpha: f32, time: i32 },
    /// Left-justify or centre the text
    Align { left: bool },
}

/// A blocking menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuDef {
    pub title: String,
    pub options: Vec<String>,
    /// Title and options are language-file keys
    pub ldf: bool,
}

/// Which plane of a sector an action refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectorPlane {
    Floor,
    Ceiling,
}

/// Which surface `CHANGE_TEX` replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TexturePart {
    RightUpper,
    RightMiddle,
    RightLower,
    LeftUpper,
    LeftMiddle,
    LeftLower,
    Floor,
    Ceiling,
    Sky,
}

/// Thing spawn parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnThing {
    pub thing_type: String,
    /// Explicit position; `None` means the trigger's centre
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
    pub angle: f32,
    pub slope: f32,
    pub tag: i32,
    /// Restrict the spawn to certain skills/modes
    pub when: Option<Appearance>,
    pub ambush: bool,
    pub flash: bool,
}

impl SpawnThing {
    /// Spawn a thing at the trigger's centre
    pub fn new(thing_type: impl Into<String>) -> Self {
        Self {
            thing_type: thing_type.into(),
            x: None,
            y: None,
            z: None,
            angle: 0.0,
            slope: 0.0,
            tag: 0,
            when: None,
            ambush: false,
            flash: false,
        }
    }
}

/// Sound playback parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaySound {
    pub sound: String,
    /// Explicit position; `None` plays from the trigger's sound origin
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
    /// Full volume everywhere on the map
    pub bossman: bool,
}

/// Actions carried out by the game world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameAction {
    SpawnThing(SpawnThing),
    PlaySound(PlaySound),
    /// Stop the sound started from the trigger's sound origin
    KillSound,
    ChangeMusic {
        entry: i32,
    },
    HealPlayer {
        amount: f32,
        limit: Option<f32>,
    },
    GiveArmour {
        armour_type: String,
        amount: f32,
        limit: Option<f32>,
    },
    DamagePlayer {
        amount: f32,
    },
    Benefit {
        benefit: String,
        lose: bool,
    },
    DamageMonsters {
        thing_type: String,
        amount: f32,
        tag: Option<i32>,
    },
    ThingEvent {
        thing_type: String,
        label: String,
        offset: u32,
    },
    ExitLevel {
        delay: i32,
        secret: bool,
    },
    GotoMap {
        map: String,
        skip_all: bool,
    },
    Skill {
        skill: u8,
        respawn: bool,
        fast_monsters: bool,
    },
    MoveSector {
        tag: i32,
        amount: f32,
        plane: SectorPlane,
        absolute: bool,
    },
    LightSector {
        tag: i32,
        amount: f32,
        absolute: bool,
    },
    ActivateLinetype {
        line_type: i32,
        tag: i32,
    },
    BlockLines {
        tag: i32,
        blocked: bool,
    },
    ChangeTexture {
        part: TexturePart,
        texture: String,
        tag: i32,
        subtag: i32,
    },
    SwitchWeapon {
        weapon: String,
    },
    ReplaceWeapon {
        old: String,
        new: String,
    },
    ReplaceThing {
        old: String,
        new: String,
    },
    WeaponEvent {
        weapon: String,
        label: String,
        offset: u32,
    },
    TeleportToStart,
}

/// One compiled action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Does nothing; carries a trailing wait or an extra label
    Nop,

    // === Flow ===
    /// Redirect the program counter, subject to a chance in [0, 1]
    Jump { target: JumpTarget, chance: f32 },
    /// Jump to the label picked by the last menu result (1-based)
    JumpOnMenu { targets: Vec<JumpTarget> },
    /// Reset activation of an independent trigger
    Retrigger,
    /// Pause until the listed monsters have died
    WaitUntilDead { thing_types: Vec<String> },

    // === Other triggers ===
    /// Enable or disable every trigger with a tag
    EnableTagged { tag: Tag, disable: bool },
    /// Enable or disable every trigger with a script name
    EnableScript { name: String, disable: bool },

    // === Display ===
    Tip(TipDef),
    /// Select the tip slot used by later tips (0-based)
    TipSlot(usize),
    TipChange(TipChange),
    ShowMenu(MenuDef),
    MenuStyle(String),

    // === World ===
    Game(GameAction),
}

impl Action {
    /// Keyword-like name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::Nop => "NOP",
            Action::Jump { .. } => "JUMP",
            Action::JumpOnMenu { .. } => "JUMP_ON",
            Action::Retrigger => "RETRIGGER",
            Action::WaitUntilDead { .. } => "WAIT_UNTIL_DEAD",
            Action::EnableTagged { disable: false, .. } => "ENABLE_TAGGED",
            Action::EnableTagged { disable: true, .. } => "DISABLE_TAGGED",
            Action::EnableScript { disable: false, .. } => "ENABLE_SCRIPT",
            Action::EnableScript { disable: true, .. } => "DISABLE_SCRIPT",
            Action::Tip(_) => "TIP",
            Action::TipSlot(_) => "TIP_SLOT",
            Action::TipChange(_) => "TIP_SET",
            Action::ShowMenu(_) => "SHOW_MENU",
            Action::MenuStyle(_) => "MENU_STYLE",
            Action::Game(_) => "GAME",
        }
    }

    /// Jump targets held by this action
    pub fn jump_targets(&self) -> Vec<&JumpTarget> {
        match self {
            Action::Jump { target, .. } => vec![target],
            Action::JumpOnMenu { targets } => targets.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Mutable jump targets, for label resolution
    pub fn jump_targets_mut(&mut self) -> Vec<&mut JumpTarget> {
        match self {
            Action::Jump { target, .. } => vec![target],
            Action::JumpOnMenu { targets } => targets.iter_mut().collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_targets() {
        let mut action = Action::JumpOnMenu {
            targets: vec![JumpTarget::unresolved("YES"), JumpTarget::unresolved("NO")],
        };
        assert_eq!(action.jump_targets().len(), 2);
        assert!(!action.jump_targets()[0].is_resolved());

        for (i, target) in action.jump_targets_mut().into_iter().enumerate() {
            target.state = i;
        }
        assert!(action.jump_targets().iter().all(|t| t.is_resolved()));
        assert!(Action::Retrigger.jump_targets().is_empty());
    }

    #[test]
    fn test_action_ron() {
        let ron_str = r#"Game(DamagePlayer(amount: 10.0))"#;
        let action: Action = ron::from_str(ron_str).unwrap();
        assert_eq!(action, Action::Game(GameAction::DamagePlayer { amount: 10.0 }));
        assert_eq!(action.name(), "GAME");
    }

    #[test]
    fn test_tip_console_text() {
        assert_eq!(TipContent::Text("hi".into()).console_text(), Some("hi"));
        assert_eq!(TipContent::Graphic("TITLEPIC".into()).console_text(), None);
    }
}
