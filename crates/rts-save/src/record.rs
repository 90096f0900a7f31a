//! Save-game records and the capture/restore pair
//!
//! A trigger is saved against its script's [`ScriptRef`] and its program
//! counter as a [`StateRef`] relative to the nearest label, so a reloaded
//! script that gained or lost states above that label still resumes at the
//! right place. Tip slots are not saved; they are cosmetic.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use rts_core::{
    ActiveMenu, GameRng, PlayerMask, Position, ScriptRef, ScriptRegistry, Scheduler, StateRef,
    Tick, TriggerId, TriggerInstance,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

/// One live trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTrigger {
    pub script: ScriptRef,
    /// `None` only for a script without states
    pub pc: Option<StateRef>,
    pub wait_ticks: i32,
    pub disabled: bool,
    pub repeats_left: i32,
    pub repeat_delay: i32,
    pub activated: bool,
    pub acti_players: PlayerMask,
    pub tip_slot: usize,
    pub menu_style: Option<String>,
    pub menu_result: i32,
    pub last_con_message: Option<String>,
    pub wud_tag: i32,
    pub wud_count: i32,
    pub sound_origin: Option<Position>,
}

/// The blocking menu, if one was open
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMenu {
    /// Index of the owner in [`SaveGame::triggers`]
    pub owner: usize,
    pub title: String,
    pub options: Vec<String>,
    pub ldf: bool,
    pub style: String,
}

/// Everything needed to resume the trigger system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub map: Option<String>,
    pub tick: Tick,
    pub rng_state: u64,
    /// Last `WAIT_UNTIL_DEAD` marker handed out
    pub wud_tag: i32,
    pub menu: Option<SavedMenu>,
    /// Live triggers in processing order
    pub triggers: Vec<SavedTrigger>,
}

/// Outcome of a restore
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub restored: usize,
    /// Triggers whose script no longer exists
    pub dropped: usize,
    /// Triggers whose saved label vanished; they start over
    pub restarted: usize,
}

impl SaveGame {
    /// Snapshot the scheduler's live triggers
    pub fn capture(scheduler: &Scheduler, registry: &ScriptRegistry) -> Self {
        let mut ids: Vec<TriggerId> = Vec::new();
        let triggers = scheduler
            .store()
            .iter()
            .map(|(id, trigger)| {
                ids.push(id);
                save_trigger(trigger, registry)
            })
            .collect();

        let menu = scheduler.display().menu().and_then(|menu| {
            let owner = ids.iter().position(|id| *id == menu.owner)?;
            Some(SavedMenu {
                owner,
                title: menu.title.clone(),
                options: menu.options.clone(),
                ldf: menu.ldf,
                style: menu.style.clone(),
            })
        });

        Self {
            version: SAVE_VERSION,
            saved_at: Utc::now(),
            map: scheduler.current_map().map(str::to_string),
            tick: scheduler.current_tick(),
            rng_state: scheduler.rng().state(),
            wud_tag: scheduler.wud_tag(),
            menu,
            triggers,
        }
    }

    /// Replace the scheduler's triggers with the saved ones
    ///
    /// Scripts are looked up in `registry`, which must hold the definitions
    /// for the saved map.
    pub fn restore(&self, scheduler: &mut Scheduler, registry: &ScriptRegistry) -> Result<RestoreReport> {
        if self.version > SAVE_VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                supported: SAVE_VERSION,
            });
        }

        scheduler.clear();
        let mut report = RestoreReport::default();
        let mut ids: Vec<Option<TriggerId>> = vec![None; self.triggers.len()];

        // Insertion goes to the head, so walk backwards to keep the order
        for (index, saved) in self.triggers.iter().enumerate().rev() {
            let script = match registry.resolve(&saved.script) {
                Ok(script) => script,
                Err(e) => {
                    warn!(error = %e, "dropping saved trigger");
                    report.dropped += 1;
                    continue;
                }
            };
            let mut trigger = TriggerInstance::new(Arc::clone(script));
            if load_trigger(&mut trigger, saved) {
                report.restarted += 1;
            }
            ids[index] = Some(scheduler.store_mut().insert(trigger));
            report.restored += 1;
        }

        if let Some(menu) = &self.menu {
            match ids.get(menu.owner).copied().flatten() {
                Some(owner) => {
                    scheduler.display_mut().open_menu(ActiveMenu {
                        owner,
                        title: menu.title.clone(),
                        options: menu.options.clone(),
                        ldf: menu.ldf,
                        style: menu.style.clone(),
                    });
                }
                None => warn!(title = %menu.title, "menu owner was not restored, menu dropped"),
            }
        }

        scheduler.set_rng(GameRng::from_state(self.rng_state));
        scheduler.set_current_tick(self.tick);
        scheduler.set_wud_tag(self.wud_tag);
        scheduler.set_current_map(self.map.clone());
        debug!(
            restored = report.restored,
            dropped = report.dropped,
            restarted = report.restarted,
            "save restored"
        );
        Ok(report)
    }
}

fn save_trigger(trigger: &TriggerInstance, registry: &ScriptRegistry) -> SavedTrigger {
    SavedTrigger {
        script: registry.script_ref(&trigger.script),
        pc: trigger.pc.map(|pc| trigger.script.state_ref(pc)),
        wait_ticks: trigger.wait_ticks,
        disabled: trigger.disabled,
        repeats_left: trigger.repeats_left,
        repeat_delay: trigger.repeat_delay,
        activated: trigger.activated,
        acti_players: trigger.acti_players,
        tip_slot: trigger.tip_slot,
        menu_style: trigger.menu_style.clone(),
        menu_result: trigger.menu_result,
        last_con_message: trigger.last_con_message.clone(),
        wud_tag: trigger.wud_tag,
        wud_count: trigger.wud_count,
        sound_origin: trigger.sound_origin,
    }
}

/// Copy saved fields onto a fresh trigger; returns true if it had to restart
fn load_trigger(trigger: &mut TriggerInstance, saved: &SavedTrigger) -> bool {
    let mut restarted = false;
    if let Some(state) = &saved.pc {
        match trigger.script.resolve_state_ref(state) {
            Ok(pc) => {
                trigger.pc = Some(pc);
                trigger.wait_ticks = saved.wait_ticks;
            }
            Err(e) => {
                warn!(error = %e, "saved position lost, restarting trigger");
                restarted = true;
            }
        }
    }
    trigger.disabled = saved.disabled;
    trigger.repeats_left = saved.repeats_left;
    trigger.repeat_delay = saved.repeat_delay;
    trigger.activated = saved.activated;
    trigger.acti_players = saved.acti_players;
    trigger.tip_slot = saved.tip_slot;
    trigger.menu_style = saved.menu_style.clone();
    trigger.menu_result = saved.menu_result;
    trigger.last_con_message = saved.last_con_message.clone();
    trigger.wud_tag = saved.wud_tag;
    trigger.wud_count = saved.wud_count;
    trigger.sound_origin = saved.sound_origin;
    restarted
}
