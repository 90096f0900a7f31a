//! Engine - the game-facing trigger system
//!
//! Owns the compiled scripts and the live triggers for the current level.
//! Game code drives it through a handful of calls:
//!
//! - [`Engine::compile`] / [`Engine::load_file`] at startup or map load
//! - [`Engine::spawn_triggers_for_map`] when a level starts
//! - [`Engine::tick`] once per game tick
//! - [`Engine::handle_input_event`] and [`Engine::draw`] from the UI layer
//! - [`Engine::clear_triggers`] when the level unloads

use crate::config::EngineConfig;
use crate::error::Result;
use rts_core::{
    GameRng, GameWorld, InputEvent, LevelSettings, Renderer, ScriptRegistry, Scheduler, TagKey,
    TriggerId,
};
use rts_save::{RestoreReport, SaveFormat, SaveGame};
use rts_script::{CompileReport, Loader};
use std::path::Path;
use tracing::info;

/// Radius trigger engine
pub struct Engine {
    registry: ScriptRegistry,
    scheduler: Scheduler,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with default (lenient) settings
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with a specific configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            registry: ScriptRegistry::new(),
            scheduler: Scheduler::new(config.rng_seed, config.tip_slots),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compile script source (a map lump or an in-memory file)
    pub fn compile(&mut self, source: &str, origin: &str) -> Result<CompileReport> {
        Ok(self.loader().load_str(source, origin)?)
    }

    /// Compile one script file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<CompileReport> {
        Ok(self.loader().load_file(path)?)
    }

    /// Compile every script file under a directory
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<CompileReport> {
        Ok(self.loader().load_directory(path)?)
    }

    fn loader(&mut self) -> Loader<'_> {
        Loader::new(&mut self.registry, self.config.compile_options())
    }

    /// Start a level: drop old triggers and create the map's ones
    pub fn spawn_triggers_for_map(&mut self, map: &str, settings: &LevelSettings) -> usize {
        self.scheduler.clear();
        self.scheduler.set_rng(GameRng::new(self.config.rng_seed));
        self.scheduler.spawn(&self.registry, map, settings)
    }

    /// Run one game tick
    pub fn tick(&mut self, world: &mut dyn GameWorld) {
        self.scheduler.tick(world);
    }

    /// Level unload
    pub fn clear_triggers(&mut self) {
        self.scheduler.clear();
        info!("triggers cleared");
    }

    /// Enable (or disable) every trigger with a tag
    ///
    /// Purely numeric text addresses numeric tags; anything else addresses
    /// string tags. Returns how many triggers matched.
    pub fn enable_by_tag(&mut self, tag: &str, disable: bool) -> usize {
        self.scheduler.enable_by_tag(TagKey::parse(tag), disable)
    }

    /// Enable (or disable) every trigger whose script has a name
    pub fn enable_by_name(&mut self, name: &str, disable: bool) -> usize {
        self.scheduler.enable_by_name(name, disable)
    }

    /// Paint tips and the menu
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        self.scheduler.draw(renderer);
    }

    /// Offer an input event to the open menu; returns whether it was consumed
    pub fn handle_input_event(&mut self, event: InputEvent) -> bool {
        self.scheduler.handle_input(event)
    }

    /// A monster watched by `WAIT_UNTIL_DEAD` died
    pub fn notify_monster_death(&mut self, wud_tag: i32) {
        self.scheduler.notify_monster_death(wud_tag);
    }

    /// Live triggers linked from a trigger's `TAGGED_PATH` list
    pub fn path_links(&self, trigger: TriggerId) -> Vec<TriggerId> {
        self.scheduler.path_links(trigger)
    }

    /// Snapshot the live triggers
    pub fn save(&self) -> SaveGame {
        SaveGame::capture(&self.scheduler, &self.registry)
    }

    /// Replace the live triggers with a snapshot
    pub fn restore(&mut self, save: &SaveGame) -> Result<RestoreReport> {
        let report = save.restore(&mut self.scheduler, &self.registry)?;
        info!(
            map = save.map.as_deref().unwrap_or("-"),
            restored = report.restored,
            dropped = report.dropped,
            "triggers restored"
        );
        Ok(report)
    }

    /// Save to a file; `.ron` and `.json` are text, anything else binary
    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<()> {
        Ok(self.save().write_file(path)?)
    }

    /// Restore from a file written by [`Engine::save_file`]
    pub fn load_save_file(&mut self, path: impl AsRef<Path>) -> Result<RestoreReport> {
        let save = SaveGame::read_file(path)?;
        self.restore(&save)
    }

    /// Encode a snapshot in memory
    pub fn save_bytes(&self, format: SaveFormat) -> Result<Vec<u8>> {
        Ok(self.save().encode(format)?)
    }

    pub fn restore_bytes(&mut self, bytes: &[u8], format: SaveFormat) -> Result<RestoreReport> {
        let save = SaveGame::decode(bytes, format)?;
        self.restore(&save)
    }

    /// Whether a menu is pausing the trigger system
    pub fn menu_active(&self) -> bool {
        self.scheduler.menu_active()
    }

    /// Number of live triggers
    pub fn trigger_count(&self) -> usize {
        self.scheduler.trigger_count()
    }

    pub fn registry(&self) -> &ScriptRegistry {
        &self.registry
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
