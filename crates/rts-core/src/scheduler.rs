//! The per-tick trigger driver
//!
//! Each tick walks the live triggers newest first. A trigger that is not
//! disabled, not cooling down between repeats and whose conditions hold runs
//! states until one of them carries a delay. The handle of the next trigger
//! is taken before any action runs, since actions may destroy triggers.

use crate::action::{Action, GameAction, JumpTarget};
use crate::condition;
use crate::display::{ActiveMenu, DisplayState, InputEvent, Renderer, TIP_SLOTS};
use crate::identity::{PlayerMask, TriggerId};
use crate::registry::ScriptRegistry;
use crate::rng::GameRng;
use crate::tag::TagKey;
use crate::time::{Clock, Tick};
use crate::trigger::{TriggerInstance, TriggerStore};
use crate::world::{ActionContext, GameWorld, LevelSettings};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What the driver does after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Add the next state's delay and keep going
    Next,
    /// The action could not run yet; its state is retried later
    Retry,
}

/// Owns the live triggers and runs them
#[derive(Debug)]
pub struct Scheduler {
    store: TriggerStore,
    display: DisplayState,
    rng: GameRng,
    clock: Clock,
    next_wud_tag: i32,
    current_map: Option<String>,
}

impl Scheduler {
    /// Create a scheduler with a seeded RNG and a number of tip slots
    pub fn new(rng_seed: u64, tip_slots: usize) -> Self {
        Self {
            store: TriggerStore::new(),
            display: DisplayState::new(tip_slots),
            rng: GameRng::new(rng_seed),
            clock: Clock::new(),
            next_wud_tag: 0,
            current_map: None,
        }
    }

    /// Create a trigger for every script that applies to the level
    ///
    /// Returns the number of triggers created.
    pub fn spawn(
        &mut self,
        registry: &ScriptRegistry,
        map: &str,
        settings: &LevelSettings,
    ) -> usize {
        let mut spawned = 0;
        for script in registry.for_map(map) {
            if !script.appear.allows(settings.skill, settings.mode) {
                continue;
            }
            if settings.player_count < script.min_players
                || settings.player_count > script.max_players
            {
                continue;
            }
            let id = self.store.insert(TriggerInstance::new(Arc::clone(script)));
            debug!(trigger = %id, script = %script.display_name(), "trigger spawned");
            spawned += 1;
        }
        self.current_map = Some(map.to_string());
        info!(map, triggers = spawned, "spawned triggers");
        spawned
    }

    /// Run one game tick
    pub fn tick(&mut self, world: &mut dyn GameWorld) {
        self.clock.advance();
        self.display.tick();

        let mut cursor = self.store.head();
        while let Some(id) = cursor {
            cursor = self.store.next_of(id);
            if self.display.menu_active() {
                break;
            }
            self.run_trigger(id, world);
        }
        self.store.sweep();
    }

    fn run_trigger(&mut self, id: TriggerId, world: &mut dyn GameWorld) {
        let Some(trigger) = self.store.get_mut(id) else {
            return;
        };
        if trigger.disabled {
            return;
        }
        if trigger.repeat_delay > 0 {
            trigger.repeat_delay -= 1;
            return;
        }
        if !(trigger.script.independent && trigger.activated)
            && !condition::try_activate(trigger, &*world)
        {
            return;
        }
        if trigger.wait_ticks > 0 {
            trigger.wait_ticks -= 1;
            return;
        }

        loop {
            let Some(trigger) = self.store.get(id) else {
                return;
            };
            if trigger.wait_ticks != 0 || trigger.wud_count > 0 {
                break;
            }
            let Some(pc) = trigger.pc else { break };
            let script = Arc::clone(&trigger.script);
            let Some(state) = script.states.get(pc) else {
                break;
            };

            if let Some(trigger) = self.store.get_mut(id) {
                trigger.pc = (pc + 1 < script.states.len()).then_some(pc + 1);
            }
            let step = self.apply(id, pc, &state.action, world);

            let Some(trigger) = self.store.get_mut(id) else {
                return;
            };
            if step == Step::Retry {
                break;
            }
            if let Some(next) = trigger.pc.and_then(|pc| script.states.get(pc)) {
                trigger.wait_ticks += next.tics;
            }
            if trigger.disabled || trigger.pc.is_none() || self.display.menu_active() {
                break;
            }
        }

        let Some(trigger) = self.store.get_mut(id) else {
            return;
        };
        if trigger.pc.is_some() {
            return;
        }

        if trigger.script.repeat.is_forever() || trigger.repeats_left > 0 {
            if !trigger.script.repeat.is_forever() {
                trigger.repeats_left -= 1;
            }
            trigger.restart();
        } else {
            debug!(trigger = %id, script = %trigger.script.display_name(), "trigger finished");
            self.store.retire(id);
        }
    }

    /// Carry out one state's action on behalf of a trigger
    fn apply(
        &mut self,
        id: TriggerId,
        pc: usize,
        action: &Action,
        world: &mut dyn GameWorld,
    ) -> Step {
        let console = world.console_player();
        let Some(trigger) = self.store.get_mut(id) else {
            return Step::Next;
        };

        match action {
            Action::Nop => {}
            Action::Jump { target, chance } => {
                if self.rng.chance(f64::from(*chance)) {
                    jump(trigger, target);
                }
            }
            Action::JumpOnMenu { targets } => {
                let choice = trigger.menu_result;
                if choice >= 1 {
                    if let Some(target) = targets.get(choice as usize - 1) {
                        jump(trigger, target);
                    }
                }
            }
            Action::Retrigger => {
                trigger.activated = false;
                trigger.acti_players = PlayerMask::EMPTY;
            }
            Action::WaitUntilDead { thing_types } => {
                self.next_wud_tag += 1;
                trigger.wud_tag = self.next_wud_tag;
                trigger.wud_count = world.watch_deaths(thing_types, self.next_wud_tag) as i32;
            }
            Action::EnableTagged { tag, disable } => {
                self.enable_by_tag(tag.key(), *disable);
            }
            Action::EnableScript { name, disable } => {
                self.enable_by_name(name, *disable);
            }
            Action::Tip(tip) => {
                if !trigger.acti_players.contains(console) {
                    return Step::Next;
                }
                self.display.show_tip(trigger.tip_slot, tip);
                if tip.sound {
                    world.tip_sound();
                }
                if let Some(text) = tip.content.console_text() {
                    if trigger.last_con_message.as_deref() != Some(text) {
                        world.console_message(text);
                        trigger.last_con_message = Some(text.to_string());
                    }
                }
            }
            Action::TipSlot(slot) => {
                if *slot < self.display.slot_count() {
                    trigger.tip_slot = *slot;
                } else {
                    warn!(script = %trigger.script.display_name(), slot, "tip slot out of range");
                }
            }
            Action::TipChange(change) => {
                self.display.change(trigger.tip_slot, change);
            }
            Action::ShowMenu(menu) => {
                if !trigger.acti_players.contains(console) {
                    return Step::Next;
                }
                if self.display.menu_active() {
                    trigger.pc = Some(pc);
                    trigger.wait_ticks = 1;
                    return Step::Retry;
                }
                let style = match trigger.menu_style.as_deref() {
                    Some(style) if world.has_style(style) => Some(style),
                    Some(style) => {
                        warn!(script = %trigger.script.display_name(), style, "unknown menu style, using default");
                        None
                    }
                    None => None,
                };
                trigger.menu_result = 0;
                self.display.open_menu(ActiveMenu::new(id, menu, style));
                debug!(trigger = %id, title = %menu.title, "menu opened");
            }
            Action::MenuStyle(style) => {
                trigger.menu_style = Some(style.clone());
            }
            Action::Game(game) => {
                match game {
                    GameAction::PlaySound(sound) if sound.x.is_none() && !sound.bossman => {
                        trigger.sound_origin = Some(trigger.script.spatial.center());
                    }
                    _ => {}
                }
                let ctx = ActionContext {
                    trigger: id,
                    script: &trigger.script,
                    acti_players: trigger.acti_players,
                    sound_origin: trigger.sound_origin,
                };
                world.perform(&ctx, game);
                if matches!(game, GameAction::KillSound) {
                    trigger.sound_origin = None;
                }
            }
        }
        Step::Next
    }

    /// Enable or disable every trigger in a tag group
    pub fn enable_by_tag(&mut self, key: TagKey, disable: bool) -> usize {
        let members = self.store.tag_group(key);
        for id in &members {
            if let Some(trigger) = self.store.get_mut(*id) {
                trigger.disabled = disable;
            }
        }
        members.len()
    }

    /// Enable or disable every trigger whose script has a name
    pub fn enable_by_name(&mut self, name: &str, disable: bool) -> usize {
        let members = self.store.find_by_name(name);
        for id in &members {
            if let Some(trigger) = self.store.get_mut(*id) {
                trigger.disabled = disable;
            }
        }
        members.len()
    }

    /// Feed an input event to the open menu; returns whether it was consumed
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        if !self.display.menu_active() {
            return false;
        }
        if let Some((owner, result)) = self.display.handle_input(event) {
            if let Some(trigger) = self.store.get_mut(owner) {
                trigger.menu_result = result;
            }
            debug!(trigger = %owner, result, "menu closed");
        }
        true
    }

    /// A watched monster died
    pub fn notify_monster_death(&mut self, wud_tag: i32) {
        for id in self.store.ids() {
            if let Some(trigger) = self.store.get_mut(id) {
                if trigger.wud_tag == wud_tag && trigger.wud_count > 0 {
                    trigger.wud_count -= 1;
                }
            }
        }
    }

    /// Live triggers named by a trigger's `TAGGED_PATH` list
    pub fn path_links(&self, id: TriggerId) -> Vec<TriggerId> {
        let Some(trigger) = self.store.get(id) else {
            return Vec::new();
        };
        trigger
            .script
            .path_next
            .iter()
            .flat_map(|name| self.store.find_by_name(name))
            .collect()
    }

    /// Paint tips and the menu
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        self.display.draw(renderer);
    }

    /// Destroy every trigger and reset the display (level unload)
    pub fn clear(&mut self) {
        self.store.clear();
        self.display.reset();
        self.clock.reset();
        self.next_wud_tag = 0;
        self.current_map = None;
    }

    pub fn menu_active(&self) -> bool {
        self.display.menu_active()
    }

    pub fn trigger_count(&self) -> usize {
        self.store.len()
    }

    pub fn store(&self) -> &TriggerStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TriggerStore {
        &mut self.store
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut DisplayState {
        &mut self.display
    }

    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    pub fn set_rng(&mut self, rng: GameRng) {
        self.rng = rng;
    }

    /// Ticks run since the scheduler was created or restored
    pub fn current_tick(&self) -> Tick {
        self.clock.tick
    }

    pub fn set_current_tick(&mut self, tick: Tick) {
        self.clock.tick = tick;
    }

    pub fn current_map(&self) -> Option<&str> {
        self.current_map.as_deref()
    }

    pub fn set_current_map(&mut self, map: Option<String>) {
        self.current_map = map;
    }

    /// Last `WAIT_UNTIL_DEAD` marker handed out
    pub fn wud_tag(&self) -> i32 {
        self.next_wud_tag
    }

    pub fn set_wud_tag(&mut self, tag: i32) {
        self.next_wud_tag = tag;
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(GameRng::default().state(), TIP_SLOTS)
    }
}

fn jump(trigger: &mut TriggerInstance, target: &JumpTarget) {
    if target.state >= trigger.script.states.len() {
        warn!(script = %trigger.script.display_name(), label = %target.label, "jump target out of range");
        return;
    }
    trigger.pc = Some(target.state);
    trigger.wait_ticks += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{MenuDef, TipContent, TipDef};
    use crate::registry::ScriptRegistry;
    use crate::script::{RepeatPolicy, ScriptDef, SourceLocation, Spatial, State};
    use crate::tag::Tag;
    use crate::testing::MockWorld;
    use crate::world::PlayerInfo;

    fn state(tics: i32, action: Action) -> State {
        State {
            tics,
            action,
            label: None,
        }
    }

    fn damage(amount: f32) -> Action {
        Action::Game(GameAction::DamagePlayer { amount })
    }

    fn script(states: Vec<State>) -> ScriptDef {
        let mut def = ScriptDef::new(
            "MAP01",
            Spatial::Radius {
                x: 0.0,
                y: 0.0,
                radius: 64.0,
                height: None,
            },
            SourceLocation::default(),
        );
        def.states = states;
        def
    }

    fn world_with_player() -> MockWorld {
        let mut world = MockWorld::new();
        world.add_player(PlayerInfo::at(0, 0.0, 0.0));
        world
    }

    fn spawn(defs: Vec<ScriptDef>) -> Scheduler {
        let mut registry = ScriptRegistry::new();
        for def in defs {
            registry.add(def);
        }
        let mut scheduler = Scheduler::default();
        scheduler.spawn(&registry, "MAP01", &LevelSettings::default());
        scheduler
    }

    fn run(scheduler: &mut Scheduler, world: &mut MockWorld, ticks: usize) {
        for _ in 0..ticks {
            world.now = scheduler.current_tick() + 1;
            scheduler.tick(world);
        }
    }

    #[test]
    fn test_spawn_gating() {
        let mut registry = ScriptRegistry::new();
        let mut coop_only = script(vec![state(0, Action::Nop)]);
        coop_only.appear = crate::script::Appearance(
            crate::script::Appearance::SKILL_MASK | crate::script::Appearance::COOP,
        );
        registry.add(coop_only);
        let mut crowded = script(vec![state(0, Action::Nop)]);
        crowded.min_players = 2;
        registry.add(crowded);
        let mut other_map = script(vec![state(0, Action::Nop)]);
        other_map.map = "MAP02".into();
        registry.add(other_map);
        registry.add(script(vec![state(0, Action::Nop)]));

        let mut scheduler = Scheduler::default();
        let spawned = scheduler.spawn(&registry, "MAP01", &LevelSettings::default());
        assert_eq!(spawned, 1);
        assert_eq!(scheduler.current_map(), Some("MAP01"));
    }

    #[test]
    fn test_waits_and_destruction() {
        let mut world = world_with_player();
        let mut scheduler = spawn(vec![script(vec![state(2, damage(1.0)), state(3, damage(2.0))])]);

        run(&mut scheduler, &mut world, 2);
        assert!(world.performed.is_empty());
        run(&mut scheduler, &mut world, 1);
        assert_eq!(world.performed_ticks(), vec![3]);
        run(&mut scheduler, &mut world, 4);
        assert_eq!(world.performed_ticks(), vec![3, 7]);
        assert_eq!(scheduler.trigger_count(), 0);
    }

    #[test]
    fn test_conditions_hold_during_wait() {
        let mut world = world_with_player();
        let mut scheduler = spawn(vec![script(vec![state(5, damage(1.0))])]);

        run(&mut scheduler, &mut world, 2);
        world.players[0].x = 1000.0;
        run(&mut scheduler, &mut world, 20);
        assert!(world.performed.is_empty());

        world.players[0].x = 0.0;
        run(&mut scheduler, &mut world, 3);
        assert!(world.performed.is_empty());
        run(&mut scheduler, &mut world, 1);
        assert_eq!(world.performed.len(), 1);
    }

    #[test]
    fn test_repeat_count_runs_n_plus_one() {
        let mut world = world_with_player();
        let mut def = script(vec![state(0, damage(10.0))]);
        def.repeat = RepeatPolicy { count: 2, delay: 35 };
        let mut scheduler = spawn(vec![def]);

        run(&mut scheduler, &mut world, 200);
        assert_eq!(world.performed_ticks(), vec![1, 37, 73]);
        assert_eq!(scheduler.trigger_count(), 0);
    }

    #[test]
    fn test_repeat_forever() {
        let mut world = world_with_player();
        let mut def = script(vec![state(0, damage(1.0))]);
        def.repeat = RepeatPolicy { count: -1, delay: 4 };
        let mut scheduler = spawn(vec![def]);

        run(&mut scheduler, &mut world, 100);
        assert_eq!(world.performed.len(), 20);
        assert_eq!(scheduler.trigger_count(), 1);
    }

    #[test]
    fn test_jump_surcharge() {
        let mut world = world_with_player();
        let mut def = script(vec![
            state(0, damage(1.0)),
            state(
                0,
                Action::Jump {
                    target: JumpTarget {
                        label: "LOOP".into(),
                        state: 0,
                    },
                    chance: 1.0,
                },
            ),
        ]);
        def.states[0].label = Some("LOOP".into());
        let mut scheduler = spawn(vec![def]);
        let id = scheduler.store().head().unwrap();
        let rng_before = scheduler.rng().clone();

        run(&mut scheduler, &mut world, 1);
        let trigger = scheduler.store().get(id).unwrap();
        assert_eq!(trigger.pc, Some(0));
        assert_eq!(trigger.wait_ticks, 1);
        assert_eq!(scheduler.rng(), &rng_before);

        run(&mut scheduler, &mut world, 5);
        assert_eq!(world.performed_ticks(), vec![1, 3, 5]);
    }

    #[test]
    fn test_tag_broadcast() {
        let mut world = world_with_player();
        let mut door = script(vec![state(0, damage(1.0))]);
        door.tag = Some(Tag::Numeric(7));
        door.repeat = RepeatPolicy { count: -1, delay: 0 };
        let mut switch = script(vec![state(
            0,
            Action::EnableTagged {
                tag: Tag::Numeric(7),
                disable: true,
            },
        )]);
        switch.immediate = true;

        // Spawned first, so processed after the switch
        let mut scheduler = spawn(vec![door, switch]);
        run(&mut scheduler, &mut world, 3);
        assert!(world.performed.is_empty());

        assert_eq!(scheduler.enable_by_tag(TagKey::Numeric(7), false), 1);
        run(&mut scheduler, &mut world, 1);
        assert_eq!(world.performed.len(), 1);
    }

    #[test]
    fn test_menu_blocks_everything() {
        let mut world = world_with_player();
        let mut counter = script(vec![state(0, damage(1.0))]);
        counter.independent = true;
        counter.repeat = RepeatPolicy { count: -1, delay: 0 };
        let menu = script(vec![
            state(
                0,
                Action::ShowMenu(MenuDef {
                    title: "Choose".into(),
                    options: vec!["Left".into(), "Right".into()],
                    ldf: false,
                }),
            ),
            state(
                0,
                Action::JumpOnMenu {
                    targets: vec![
                        JumpTarget {
                            label: "A".into(),
                            state: 2,
                        },
                        JumpTarget {
                            label: "B".into(),
                            state: 3,
                        },
                    ],
                },
            ),
            state(0, damage(100.0)),
            state(0, damage(200.0)),
        ]);
        let mut scheduler = spawn(vec![counter, menu]);
        run(&mut scheduler, &mut world, 1);
        assert!(scheduler.menu_active());
        // The counter trigger sits after the menu trigger in processing order
        assert!(world.performed.is_empty());

        let pcs: Vec<_> = scheduler.store().iter().map(|(_, t)| t.pc).collect();
        run(&mut scheduler, &mut world, 10);
        let after: Vec<_> = scheduler.store().iter().map(|(_, t)| t.pc).collect();
        assert_eq!(pcs, after);
        assert!(world.performed.is_empty());

        assert!(scheduler.handle_input(InputEvent::Other));
        assert!(scheduler.menu_active());
        assert!(scheduler.handle_input(InputEvent::Digit(2)));
        assert!(!scheduler.menu_active());

        run(&mut scheduler, &mut world, 3);
        assert!(world.performed_amounts().contains(&200.0));
        assert!(!world.performed_amounts().contains(&100.0));
    }

    #[test]
    fn test_queued_menu_opens_after_first_closes() {
        let mut world = world_with_player();
        let def = || {
            script(vec![state(
                0,
                Action::ShowMenu(MenuDef {
                    title: "Hi".into(),
                    options: Vec::new(),
                    ldf: false,
                }),
            )])
        };
        let mut scheduler = spawn(vec![def(), def()]);
        run(&mut scheduler, &mut world, 1);
        assert!(scheduler.menu_active());
        assert_eq!(scheduler.trigger_count(), 1);

        scheduler.handle_input(InputEvent::Other);
        run(&mut scheduler, &mut world, 1);
        assert!(scheduler.menu_active());
        assert_eq!(scheduler.trigger_count(), 0);
    }

    #[test]
    fn test_independent_and_retrigger() {
        let mut world = world_with_player();
        let mut def = script(vec![state(0, damage(1.0)), state(0, Action::Retrigger)]);
        def.independent = true;
        def.repeat = RepeatPolicy { count: -1, delay: 0 };
        let mut scheduler = spawn(vec![def]);

        run(&mut scheduler, &mut world, 1);
        assert_eq!(world.performed.len(), 1);
        world.players[0].x = 1000.0;
        run(&mut scheduler, &mut world, 3);
        assert_eq!(world.performed.len(), 1);
    }

    #[test]
    fn test_independent_ignores_area_once_latched() {
        let mut world = world_with_player();
        let mut def = script(vec![state(0, Action::Nop), state(5, damage(1.0))]);
        def.independent = true;
        let mut scheduler = spawn(vec![def]);

        run(&mut scheduler, &mut world, 1);
        world.players[0].x = 1000.0;
        run(&mut scheduler, &mut world, 6);
        assert_eq!(world.performed_ticks(), vec![7]);
    }

    #[test]
    fn test_wait_until_dead() {
        let mut world = world_with_player();
        world.set_living("IMP", 2);
        let mut scheduler = spawn(vec![script(vec![
            state(
                0,
                Action::WaitUntilDead {
                    thing_types: vec!["IMP".into()],
                },
            ),
            state(0, damage(1.0)),
        ])]);

        run(&mut scheduler, &mut world, 3);
        assert!(world.performed.is_empty());
        let tag = world.watches[0].1;
        scheduler.notify_monster_death(tag);
        run(&mut scheduler, &mut world, 1);
        assert!(world.performed.is_empty());
        scheduler.notify_monster_death(tag);
        run(&mut scheduler, &mut world, 1);
        assert_eq!(world.performed.len(), 1);
    }

    #[test]
    fn test_tip_echoes_once() {
        let mut world = world_with_player();
        let tip = TipDef {
            content: TipContent::Text("Find the key".into()),
            time: 70,
            sound: true,
            scale: 1.0,
        };
        let mut scheduler = spawn(vec![script(vec![
            state(0, Action::Tip(tip.clone())),
            state(1, Action::Tip(tip)),
        ])]);
        run(&mut scheduler, &mut world, 3);
        assert_eq!(world.console, vec!["Find the key".to_string()]);
        assert_eq!(world.tip_sounds, 2);
        assert!(scheduler.display().slot(0).unwrap().is_showing());
    }

    #[test]
    fn test_disabled_script_skips() {
        let mut world = world_with_player();
        let mut def = script(vec![state(0, damage(1.0))]);
        def.name = Some("Trap".into());
        def.disabled = true;
        let mut scheduler = spawn(vec![def]);

        run(&mut scheduler, &mut world, 5);
        assert!(world.performed.is_empty());
        assert_eq!(scheduler.enable_by_name("TRAP", false), 1);
        run(&mut scheduler, &mut world, 1);
        assert_eq!(world.performed.len(), 1);
    }

    #[test]
    fn test_sound_origin() {
        let mut world = world_with_player();
        let sound = crate::action::PlaySound {
            sound: "DSWIND".into(),
            x: None,
            y: None,
            z: None,
            bossman: false,
        };
        let mut scheduler = spawn(vec![script(vec![
            state(0, Action::Game(GameAction::PlaySound(sound))),
            state(1, Action::Game(GameAction::KillSound)),
        ])]);
        let id = scheduler.store().head().unwrap();
        run(&mut scheduler, &mut world, 1);
        assert!(scheduler.store().get(id).unwrap().sound_origin.is_some());
        run(&mut scheduler, &mut world, 2);
        assert_eq!(world.performed.len(), 2);
        assert!(world.performed[1].sound_origin.is_some());
    }

    #[test]
    fn test_path_links() {
        let mut a = script(vec![state(0, Action::Nop)]);
        a.path_next = vec!["B".into()];
        let mut b = script(vec![state(0, Action::Nop)]);
        b.name = Some("b".into());
        let scheduler = spawn(vec![a, b]);
        let ids = scheduler.store().ids();
        // Newest first: [b, a]
        assert_eq!(scheduler.path_links(ids[1]), vec![ids[0]]);
        assert!(scheduler.path_links(ids[0]).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut scheduler = spawn(vec![script(vec![state(0, Action::Nop)])]);
        assert_eq!(scheduler.trigger_count(), 1);
        scheduler.clear();
        assert_eq!(scheduler.trigger_count(), 0);
        assert_eq!(scheduler.current_map(), None);
    }
}
