//! Tips and the blocking menu
//!
//! Display state is owned by the scheduler and painted through a
//! [`Renderer`]. At most one menu exists engine-wide; while it is open the
//! scheduler runs no trigger at all.

use crate::action::{MenuDef, TipChange, TipContent, TipDef};
use crate::identity::TriggerId;
use serde::{Deserialize, Serialize};

/// Number of tip slots
pub const TIP_SLOTS: usize = 45;

/// Style used when a trigger names none, or one that does not exist
pub const DEFAULT_MENU_STYLE: &str = "RTS MENU";

/// A value moving linearly towards a target over a number of ticks
#[derive(Debug, Clone, Copy, PartialEq)]
struct Fade {
    current: f32,
    target: f32,
    ticks_left: i32,
}

impl Fade {
    fn new(value: f32) -> Self {
        Self {
            current: value,
            target: value,
            ticks_left: 0,
        }
    }

    fn start(&mut self, target: f32, time: i32) {
        if time <= 0 {
            self.current = target;
            self.ticks_left = 0;
        } else {
            self.ticks_left = time;
        }
        self.target = target;
    }

    fn step(&mut self) {
        if self.ticks_left <= 0 {
            return;
        }
        self.current += (self.target - self.current) / self.ticks_left as f32;
        self.ticks_left -= 1;
        if self.ticks_left == 0 {
            self.current = self.target;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ShownTip {
    content: TipContent,
    ticks_left: i32,
    scale: f32,
}

/// One tip slot and its presentation
#[derive(Debug, Clone, PartialEq)]
pub struct TipSlot {
    x: Fade,
    y: Fade,
    alpha: Fade,
    left_align: bool,
    colour: String,
    tip: Option<ShownTip>,
}

impl TipSlot {
    fn new(index: usize) -> Self {
        // Slots stack downwards from the upper part of the screen
        let y = 0.2 + (index % 12) as f32 * 0.05;
        Self {
            x: Fade::new(0.5),
            y: Fade::new(y),
            alpha: Fade::new(1.0),
            left_align: false,
            colour: "#FFFFFF".to_string(),
            tip: None,
        }
    }

    /// Whether a tip is currently showing
    pub fn is_showing(&self) -> bool {
        self.tip.is_some()
    }

    /// Screen position as fractions of width and height
    pub fn position(&self) -> (f32, f32) {
        (self.x.current, self.y.current)
    }

    pub fn alpha(&self) -> f32 {
        self.alpha.current
    }

    pub fn colour(&self) -> &str {
        &self.colour
    }

    pub fn left_align(&self) -> bool {
        self.left_align
    }
}

/// The engine-wide blocking menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveMenu {
    /// Trigger that receives the result
    pub owner: TriggerId,
    pub title: String,
    pub options: Vec<String>,
    pub ldf: bool,
    pub style: String,
}

impl ActiveMenu {
    /// Open a menu for a trigger
    pub fn new(owner: TriggerId, def: &MenuDef, style: Option<&str>) -> Self {
        Self {
            owner,
            title: def.title.clone(),
            options: def.options.clone(),
            ldf: def.ldf,
            style: style.unwrap_or(DEFAULT_MENU_STYLE).to_string(),
        }
    }

    /// The result an input event selects, if it resolves the menu
    pub fn resolve(&self, event: InputEvent) -> Option<i32> {
        if self.options.is_empty() {
            return Some(0);
        }
        match event {
            InputEvent::Digit(d) if d >= 1 && (d as usize) <= self.options.len() => Some(d as i32),
            InputEvent::Escape => Some(0),
            _ => None,
        }
    }
}

/// Input events the menu layer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Number key `0..=9`
    Digit(u8),
    Escape,
    /// Any other key
    Other,
}

/// A tip ready to paint
#[derive(Debug, Clone, PartialEq)]
pub struct TipView<'a> {
    pub slot: usize,
    pub content: &'a TipContent,
    pub x: f32,
    pub y: f32,
    pub left_align: bool,
    pub colour: &'a str,
    pub alpha: f32,
    pub scale: f32,
}

/// A menu ready to paint
#[derive(Debug, Clone, PartialEq)]
pub struct MenuView<'a> {
    pub title: &'a str,
    pub options: &'a [String],
    pub ldf: bool,
    pub style: &'a str,
}

/// Paints tips and menus
pub trait Renderer {
    fn draw_tip(&mut self, tip: &TipView<'_>);
    fn draw_menu(&mut self, menu: &MenuView<'_>);
}

/// Tip slots plus the active menu
#[derive(Debug, Clone)]
pub struct DisplayState {
    slots: Vec<TipSlot>,
    menu: Option<ActiveMenu>,
}

impl DisplayState {
    /// Create display state with a number of tip slots
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: (0..slot_count.max(1)).map(TipSlot::new).collect(),
            menu: None,
        }
    }

    /// Number of tip slots
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, index: usize) -> Option<&TipSlot> {
        self.slots.get(index)
    }

    /// Show a tip in a slot, replacing whatever it showed
    pub fn show_tip(&mut self, slot: usize, tip: &TipDef) {
        if let Some(s) = self.slots.get_mut(slot) {
            s.tip = Some(ShownTip {
                content: tip.content.clone(),
                ticks_left: tip.time,
                scale: tip.scale,
            });
        }
    }

    /// Adjust a slot's presentation
    pub fn change(&mut self, slot: usize, change: &TipChange) {
        let Some(s) = self.slots.get_mut(slot) else {
            return;
        };
        match change {
            TipChange::Position { x, y, time } => {
                s.x.start(*x, *time);
                s.y.start(*y, *time);
            }
            TipChange::Colour { colour } => s.colour = colour.clone(),
            TipChange::Translucency { alpha, time } => s.alpha.start(alpha.clamp(0.0, 1.0), *time),
            TipChange::Align { left } => s.left_align = *left,
        }
    }

    /// Advance tip timers and fades by one tick
    pub fn tick(&mut self) {
        for slot in &mut self.slots {
            slot.x.step();
            slot.y.step();
            slot.alpha.step();
            if let Some(tip) = &mut slot.tip {
                tip.ticks_left -= 1;
                if tip.ticks_left <= 0 {
                    slot.tip = None;
                }
            }
        }
    }

    /// Whether a menu is blocking the scheduler
    pub fn menu_active(&self) -> bool {
        self.menu.is_some()
    }

    pub fn menu(&self) -> Option<&ActiveMenu> {
        self.menu.as_ref()
    }

    /// Open the blocking menu; fails if one is already open
    pub fn open_menu(&mut self, menu: ActiveMenu) -> bool {
        if self.menu.is_some() {
            return false;
        }
        self.menu = Some(menu);
        true
    }

    /// Feed an input event to the menu; returns the owner and result once
    /// the menu closes
    pub fn handle_input(&mut self, event: InputEvent) -> Option<(TriggerId, i32)> {
        let result = self.menu.as_ref()?.resolve(event)?;
        let menu = self.menu.take()?;
        Some((menu.owner, result))
    }

    /// Close the menu without a result
    pub fn close_menu(&mut self) -> Option<ActiveMenu> {
        self.menu.take()
    }

    /// Drop every tip and the menu
    pub fn reset(&mut self) {
        let count = self.slots.len();
        self.slots = (0..count).map(TipSlot::new).collect();
        self.menu = None;
    }

    /// Paint visible tips, then the menu on top
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        for (index, slot) in self.slots.iter().enumerate() {
            let Some(tip) = &slot.tip else { continue };
            renderer.draw_tip(&TipView {
                slot: index,
                content: &tip.content,
                x: slot.x.current,
                y: slot.y.current,
                left_align: slot.left_align,
                colour: &slot.colour,
                alpha: slot.alpha.current,
                scale: tip.scale,
            });
        }
        if let Some(menu) = &self.menu {
            renderer.draw_menu(&MenuView {
                title: &menu.title,
                options: &menu.options,
                ldf: menu.ldf,
                style: &menu.style,
            });
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new(TIP_SLOTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tip(text: &str, time: i32) -> TipDef {
        TipDef {
            content: TipContent::Text(text.into()),
            time,
            sound: false,
            scale: 1.0,
        }
    }

    fn menu(options: &[&str]) -> ActiveMenu {
        ActiveMenu::new(
            TriggerId::new(0, 0),
            &MenuDef {
                title: "Pick".into(),
                options: options.iter().map(|s| s.to_string()).collect(),
                ldf: false,
            },
            None,
        )
    }

    #[derive(Default)]
    struct Recorder {
        tips: Vec<String>,
        menus: Vec<String>,
    }

    impl Renderer for Recorder {
        fn draw_tip(&mut self, tip: &TipView<'_>) {
            if let TipContent::Text(t) = tip.content {
                self.tips.push(t.clone());
            }
        }

        fn draw_menu(&mut self, menu: &MenuView<'_>) {
            self.menus.push(format!("{}:{}", menu.title, menu.style));
        }
    }

    #[test]
    fn test_tip_expires() {
        let mut display = DisplayState::default();
        assert_eq!(display.slot_count(), TIP_SLOTS);
        display.show_tip(3, &tip("hello", 2));
        assert!(display.slot(3).unwrap().is_showing());
        display.tick();
        assert!(display.slot(3).unwrap().is_showing());
        display.tick();
        assert!(!display.slot(3).unwrap().is_showing());
    }

    #[test]
    fn test_position_fade() {
        let mut display = DisplayState::new(1);
        display.change(
            0,
            &TipChange::Position {
                x: 0.0,
                y: 0.2,
                time: 2,
            },
        );
        display.tick();
        assert!((display.slot(0).unwrap().position().0 - 0.25).abs() < 1e-6);
        display.tick();
        assert_eq!(display.slot(0).unwrap().position(), (0.0, 0.2));
    }

    #[test]
    fn test_instant_translucency() {
        let mut display = DisplayState::new(1);
        display.change(0, &TipChange::Translucency { alpha: 0.5, time: 0 });
        assert_eq!(display.slot(0).unwrap().alpha(), 0.5);
    }

    #[test]
    fn test_menu_resolution() {
        let m = menu(&["Yes", "No"]);
        assert_eq!(m.resolve(InputEvent::Digit(2)), Some(2));
        assert_eq!(m.resolve(InputEvent::Digit(3)), None);
        assert_eq!(m.resolve(InputEvent::Digit(0)), None);
        assert_eq!(m.resolve(InputEvent::Escape), Some(0));
        assert_eq!(m.resolve(InputEvent::Other), None);

        let info = menu(&[]);
        assert_eq!(info.resolve(InputEvent::Other), Some(0));
    }

    #[test]
    fn test_single_menu() {
        let mut display = DisplayState::default();
        assert!(display.open_menu(menu(&["A"])));
        assert!(!display.open_menu(menu(&["B"])));
        assert!(display.menu_active());

        assert_eq!(display.handle_input(InputEvent::Other), None);
        assert_eq!(
            display.handle_input(InputEvent::Digit(1)),
            Some((TriggerId::new(0, 0), 1))
        );
        assert!(!display.menu_active());
    }

    #[test]
    fn test_draw_order() {
        let mut display = DisplayState::default();
        display.show_tip(0, &tip("one", 10));
        display.open_menu(menu(&["A"]));
        let mut recorder = Recorder::default();
        display.draw(&mut recorder);
        assert_eq!(recorder.tips, vec!["one"]);
        assert_eq!(recorder.menus, vec![format!("Pick:{}", DEFAULT_MENU_STYLE)]);
    }
}
