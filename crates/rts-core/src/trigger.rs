//! Trigger instances and the arena that owns them
//!
//! Live triggers sit in a generational arena. Two intrusive doubly linked
//! lists run through it by handle:
//! - the master list, newest first, which fixes the per-tick processing order
//! - one list per tag key, so a tag broadcast visits only its own group
//!
//! Destroying a trigger while the scheduler walks the master list only
//! *retires* it: it drops out of its tag group and becomes invisible to
//! lookups, but stays linked until [`TriggerStore::sweep`] so any `next`
//! handle the scheduler already holds remains walkable.

use crate::identity::{PlayerMask, Position, SectorId, TriggerId};
use crate::script::{ScriptDef, State};
use crate::tag::TagKey;
use indexmap::IndexMap;
use std::sync::Arc;

/// One live trigger on the current level
#[derive(Debug, Clone)]
pub struct TriggerInstance {
    /// The definition this trigger runs (shared, never owned)
    pub script: Arc<ScriptDef>,
    /// Index of the next state to run; `None` once the list is exhausted
    pub pc: Option<usize>,
    pub wait_ticks: i32,
    pub activated: bool,
    pub acti_players: PlayerMask,
    pub disabled: bool,
    pub repeats_left: i32,
    pub repeat_delay: i32,

    // Action-owned fields, persisted with the trigger
    pub tip_slot: usize,
    pub menu_style: Option<String>,
    pub menu_result: i32,
    pub last_con_message: Option<String>,
    /// `WAIT_UNTIL_DEAD` marker handed to the world
    pub wud_tag: i32,
    /// Watched monsters still alive
    pub wud_count: i32,
    pub sound_origin: Option<Position>,

    /// Sectors for the height checks, resolved on first use
    pub(crate) height_sectors: Option<Vec<Option<SectorId>>>,

    prev: Option<TriggerId>,
    next: Option<TriggerId>,
    tag_prev: Option<TriggerId>,
    tag_next: Option<TriggerId>,
    retired: bool,
}

impl TriggerInstance {
    /// Create a fresh trigger at the start of its script
    pub fn new(script: Arc<ScriptDef>) -> Self {
        let pc = (!script.states.is_empty()).then_some(0);
        Self {
            pc,
            wait_ticks: script.first_tics(),
            activated: false,
            acti_players: PlayerMask::EMPTY,
            disabled: script.disabled,
            repeats_left: script.repeat.count,
            repeat_delay: 0,
            tip_slot: 0,
            menu_style: None,
            menu_result: 0,
            last_con_message: None,
            wud_tag: 0,
            wud_count: 0,
            sound_origin: None,
            height_sectors: None,
            prev: None,
            next: None,
            tag_prev: None,
            tag_next: None,
            retired: false,
            script,
        }
    }

    /// The state the program counter points at
    pub fn current_state(&self) -> Option<&State> {
        self.pc.and_then(|pc| self.script.states.get(pc))
    }

    /// Tag key of the trigger's script
    pub fn tag_key(&self) -> Option<TagKey> {
        self.script.tag.as_ref().map(|t| t.key())
    }

    /// Rewind to the first state for another pass
    pub fn restart(&mut self) {
        self.pc = (!self.script.states.is_empty()).then_some(0);
        self.wait_ticks = self.script.first_tics();
        self.repeat_delay = self.script.repeat.delay;
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    instance: Option<TriggerInstance>,
}

/// Arena of live triggers
#[derive(Debug, Default)]
pub struct TriggerStore {
    slots: Vec<Slot>,
    free: Vec<u32>,
    head: Option<TriggerId>,
    groups: IndexMap<TagKey, TriggerId>,
    live: usize,
}

impl TriggerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trigger at the front of the master list and its tag group
    pub fn insert(&mut self, instance: TriggerInstance) -> TriggerId {
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                TriggerId::new(index, slot.generation)
            }
            None => {
                self.slots.push(Slot::default());
                TriggerId::new((self.slots.len() - 1) as u32, 0)
            }
        };

        let tag = instance.tag_key();
        let mut instance = instance;
        instance.prev = None;
        instance.next = self.head;
        instance.tag_prev = None;
        instance.tag_next = tag.and_then(|key| self.groups.get(&key).copied());
        instance.retired = false;

        if let Some(old_head) = instance.next {
            if let Some(old) = self.raw_mut(old_head) {
                old.prev = Some(id);
            }
        }
        if let Some(old_group_head) = instance.tag_next {
            if let Some(old) = self.raw_mut(old_group_head) {
                old.tag_prev = Some(id);
            }
        }

        self.slots[id.index() as usize].instance = Some(instance);
        self.head = Some(id);
        if let Some(key) = tag {
            self.groups.insert(key, id);
        }
        self.live += 1;
        id
    }

    /// Look up a live trigger
    pub fn get(&self, id: TriggerId) -> Option<&TriggerInstance> {
        self.raw(id).filter(|t| !t.retired)
    }

    /// Look up a live trigger mutably
    pub fn get_mut(&mut self, id: TriggerId) -> Option<&mut TriggerInstance> {
        self.raw_mut(id).filter(|t| !t.retired)
    }

    /// Whether a handle still refers to a live trigger
    pub fn contains(&self, id: TriggerId) -> bool {
        self.get(id).is_some()
    }

    /// First trigger in processing order
    pub fn head(&self) -> Option<TriggerId> {
        self.head
    }

    /// Successor in processing order, including retired triggers
    pub fn next_of(&self, id: TriggerId) -> Option<TriggerId> {
        self.raw(id).and_then(|t| t.next)
    }

    /// Number of live triggers
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether there are no live triggers
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Live triggers in processing order
    pub fn iter(&self) -> impl Iterator<Item = (TriggerId, &TriggerInstance)> {
        let mut cursor = self.head;
        std::iter::from_fn(move || loop {
            let id = cursor?;
            let instance = self.raw(id)?;
            cursor = instance.next;
            if !instance.retired {
                return Some((id, instance));
            }
        })
    }

    /// Handles of live triggers in processing order
    pub fn ids(&self) -> Vec<TriggerId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Members of a tag group
    pub fn tag_group(&self, key: TagKey) -> Vec<TriggerId> {
        let mut members = Vec::new();
        let mut cursor = self.groups.get(&key).copied();
        while let Some(id) = cursor {
            let Some(instance) = self.raw(id) else { break };
            members.push(id);
            cursor = instance.tag_next;
        }
        members
    }

    /// Live triggers whose script has a name
    pub fn find_by_name(&self, name: &str) -> Vec<TriggerId> {
        self.iter()
            .filter(|(_, t)| t.script.has_name(name))
            .map(|(id, _)| id)
            .collect()
    }

    /// Destroy a trigger, deferring the unlink from the master list
    ///
    /// Safe to call while the master list is being walked.
    pub fn retire(&mut self, id: TriggerId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.unlink_tag(id);
        if let Some(instance) = self.raw_mut(id) {
            instance.retired = true;
        }
        self.live -= 1;
        true
    }

    /// Destroy a trigger immediately
    pub fn remove(&mut self, id: TriggerId) -> Option<TriggerInstance> {
        let retired = self.raw(id)?.retired;
        if !retired {
            self.unlink_tag(id);
            self.live -= 1;
        }
        self.unlink_master(id);

        let slot = &mut self.slots[id.index() as usize];
        let instance = slot.instance.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        instance
    }

    /// Free every retired trigger
    pub fn sweep(&mut self) {
        let retired: Vec<TriggerId> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match &slot.instance {
                Some(t) if t.retired => Some(TriggerId::new(index as u32, slot.generation)),
                _ => None,
            })
            .collect();
        for id in retired {
            self.remove(id);
        }
    }

    /// Destroy every trigger
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.groups.clear();
        self.head = None;
        self.live = 0;
    }

    fn raw(&self, id: TriggerId) -> Option<&TriggerInstance> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.instance.as_ref()
    }

    fn raw_mut(&mut self, id: TriggerId) -> Option<&mut TriggerInstance> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.instance.as_mut()
    }

    fn unlink_master(&mut self, id: TriggerId) {
        let Some(instance) = self.raw_mut(id) else { return };
        let (prev, next) = (instance.prev.take(), instance.next.take());
        match prev {
            Some(p) => {
                if let Some(t) = self.raw_mut(p) {
                    t.next = next;
                }
            }
            None => self.head = next,
        }
        if let Some(n) = next {
            if let Some(t) = self.raw_mut(n) {
                t.prev = prev;
            }
        }
    }

    fn unlink_tag(&mut self, id: TriggerId) {
        let Some(instance) = self.raw_mut(id) else { return };
        let Some(key) = instance.tag_key() else { return };
        let (prev, next) = (instance.tag_prev.take(), instance.tag_next.take());
        match prev {
            Some(p) => {
                if let Some(t) = self.raw_mut(p) {
                    t.tag_next = next;
                }
            }
            None => match next {
                Some(n) => {
                    self.groups.insert(key, n);
                }
                None => {
                    self.groups.shift_remove(&key);
                }
            },
        }
        if let Some(n) = next {
            if let Some(t) = self.raw_mut(n) {
                t.tag_prev = prev;
            }
        }
    }
}
