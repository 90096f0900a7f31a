//! RTS Engine - radius trigger scripts for a game loop
//!
//! Ties the compiler, the scheduler and save games together behind
//! [`Engine`]:
//!
//! ```rust,ignore
//! use rts_engine::{Engine, EngineConfig};
//! use rts_core::LevelSettings;
//!
//! let mut engine = Engine::with_config(EngineConfig::from_file("rts.ron")?);
//! engine.load_directory("scripts")?;
//! engine.spawn_triggers_for_map("MAP01", &LevelSettings::default());
//!
//! loop {
//!     engine.tick(&mut world);
//!     engine.draw(&mut renderer);
//! }
//! ```

mod config;
mod engine;
mod error;

pub use config::{EngineConfig, DEFAULT_RNG_SEED};
pub use engine::Engine;
pub use error::{Error, Result};

pub use rts_core::{GameWorld, InputEvent, LevelSettings, Renderer};
pub use rts_save::{SaveFormat, SaveGame};
