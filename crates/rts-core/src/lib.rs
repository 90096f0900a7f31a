//! RTS Core - data model and runtime for radius trigger scripts
//!
//! This crate holds everything that exists after a script has been
//! compiled:
//! - Compiled definitions (`ScriptDef`, `State`, `Action`) and the
//!   `ScriptRegistry` that owns them
//! - Numeric and hashed tags (`Tag`, `TagKey`)
//! - Live triggers in a generational arena (`TriggerStore`)
//! - The condition evaluator and the per-tick `Scheduler`
//! - Tip slots and the blocking menu (`DisplayState`)
//! - The `GameWorld` and `Renderer` seams to the rest of the game
//!
//! ## Testing Feature
//!
//! Enable the `testing` feature for an in-memory `GameWorld`:
//! ```toml
//! rts-core = { version = "0.1", features = ["testing"] }
//! ```

pub mod action;
pub mod condition;
pub mod display;
mod error;
mod identity;
mod registry;
mod rng;
pub mod scheduler;
pub mod script;
mod tag;
pub mod time;
mod trigger;
mod world;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use action::{
    Action, GameAction, JumpTarget, MenuDef, PlaySound, SectorPlane, SpawnThing, TexturePart,
    TipChange, TipContent, TipDef,
};
pub use display::{
    ActiveMenu, DisplayState, InputEvent, MenuView, Renderer, TipView, DEFAULT_MENU_STYLE,
    TIP_SLOTS,
};
pub use error::{Error, Result};
pub use identity::{PlayerMask, Position, SectorId, TriggerId, ALL_MAPS, MAX_PLAYERS};
pub use registry::{ScriptRef, ScriptRegistry};
pub use rng::GameRng;
pub use scheduler::Scheduler;
pub use script::{
    Appearance, ConditionCheck, DeathCheck, GameMode, HeightBand, HeightCheck, PathEvent,
    RepeatPolicy, ScriptDef, SourceLocation, Spatial, State, StateRef,
};
pub use tag::{hash_name, Tag, TagKey};
pub use time::{seconds_to_ticks, Clock, Tick, TICRATE};
pub use trigger::{TriggerInstance, TriggerStore};
pub use world::{ActionContext, GameWorld, LevelSettings, PlayerInfo};
