//! The script compiler
//!
//! Lines are matched against the primitive table and checked for block level
//! and parameter count before their handler runs. Handlers build one
//! [`ScriptDef`] per trigger block; `END_RADIUS_TRIGGER` finishes it,
//! resolves its jump labels and adds it to the registry.

use crate::args::{self, ArgResult};
use crate::define::DefineTable;
use crate::error::{Error, Result};
use crate::primitive;
use crate::tokenizer::{splice_lines, tokenize};
use rts_core::{
    Action, DeathCheck, HeightBand, HeightCheck, PathEvent, RepeatPolicy, ScriptDef,
    ScriptRegistry, SectorPlane, SourceLocation, Spatial, State, Tag, ALL_MAPS, MAX_PLAYERS,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Newest `#VERSION` this compiler understands
pub const LANGUAGE_VERSION: f32 = 1.35;

/// Default tip display time in ticks
pub const DEFAULT_TIP_TIME: i32 = 105;

/// Compiler settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Unknown primitives are fatal instead of a warning
    pub strict: bool,
    /// Display time for tips that give none
    pub default_tip_time: i32,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            strict: false,
            default_tip_time: DEFAULT_TIP_TIME,
        }
    }
}

/// What one compile produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompileReport {
    /// Script definitions added
    pub scripts: usize,
    /// Earlier definitions replaced by `START_MAP`
    pub purged: usize,
    pub warnings: usize,
    /// Last `#VERSION` seen
    pub version: Option<f32>,
}

/// Block nesting level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockLevel {
    /// Outside any block
    Outer,
    /// Inside `START_MAP`
    Map,
    /// Inside a trigger block
    Trigger,
}

impl BlockLevel {
    fn describe(self) -> &'static str {
        match self {
            BlockLevel::Outer => "outside any block",
            BlockLevel::Map => "inside START_MAP",
            BlockLevel::Trigger => "inside a trigger block",
        }
    }
}

/// A trigger block under construction
#[derive(Debug)]
struct ScriptBuilder {
    def: ScriptDef,
    pending_wait: i32,
    pending_label: Option<String>,
    /// Source line of each state, for errors found at the end of the block
    state_lines: Vec<(SourceLocation, String)>,
    used: HashSet<&'static str>,
}

/// Compile source text into a registry
///
/// `origin` names the file or lump in diagnostics.
pub fn compile(
    source: &str,
    origin: &str,
    registry: &mut ScriptRegistry,
    options: &CompileOptions,
) -> Result<CompileReport> {
    Compiler::new(registry, options, origin).run(source)
}

/// Compiler state for one source buffer
pub struct Compiler<'a> {
    registry: &'a mut ScriptRegistry,
    options: &'a CompileOptions,
    defines: DefineTable,
    serial: u32,
    level: BlockLevel,
    map: Option<String>,
    building: Option<ScriptBuilder>,
    report: CompileReport,
    at: SourceLocation,
    text: String,
}

impl<'a> Compiler<'a> {
    /// Create a compiler writing into a registry
    pub fn new(registry: &'a mut ScriptRegistry, options: &'a CompileOptions, origin: &str) -> Self {
        Self {
            registry,
            options,
            defines: DefineTable::new(),
            serial: 0,
            level: BlockLevel::Outer,
            map: None,
            building: None,
            report: CompileReport::default(),
            at: SourceLocation {
                file: origin.to_string(),
                line: 0,
            },
            text: String::new(),
        }
    }

    /// Compile a whole buffer
    pub fn run(mut self, source: &str) -> Result<CompileReport> {
        self.defines.clear();
        self.serial = self.registry.begin_load();

        for line in splice_lines(source) {
            self.at.line = line.line;
            self.text = line.text.trim().to_string();
            let tokens = tokenize(&line.text, &self.defines).map_err(|e| self.error(e.to_string()))?;
            if tokens.is_empty() {
                continue;
            }
            self.dispatch(&tokens)?;
        }

        match self.level {
            BlockLevel::Outer => {}
            BlockLevel::Map => return Err(self.error("missing END_MAP at end of file")),
            BlockLevel::Trigger => {
                return Err(self.error("missing END_RADIUS_TRIGGER at end of file"))
            }
        }

        self.defines.clear();
        info!(
            file = %self.at.file,
            scripts = self.report.scripts,
            warnings = self.report.warnings,
            "compiled trigger scripts"
        );
        Ok(self.report)
    }

    fn dispatch(&mut self, tokens: &[String]) -> Result<()> {
        let keyword = &tokens[0];
        let params = &tokens[1..];

        let Some(prim) = primitive::lookup(keyword) else {
            if self.options.strict {
                return Err(self.error(format!("unknown primitive `{keyword}`")));
            }
            self.warn(format!("unknown primitive `{keyword}`, line ignored"));
            return Ok(());
        };

        if let Some(level) = prim.level {
            if level != self.level {
                return Err(self.error(format!(
                    "{} must be used {} (found {})",
                    prim.name,
                    level.describe(),
                    self.level.describe()
                )));
            }
        }

        if params.len() < prim.min {
            return Err(self.error(format!(
                "{} needs at least {} parameter(s), found {}",
                prim.name,
                prim.min,
                params.len()
            )));
        }
        let params = if params.len() > prim.max {
            self.warn(format!(
                "{} takes at most {} parameter(s), ignoring {}",
                prim.name,
                prim.max,
                params.len() - prim.max
            ));
            &params[..prim.max]
        } else {
            params
        };

        (prim.handler)(self, params)
    }

    // === Diagnostics ===

    /// Fatal error at the current line
    pub(crate) fn error(&self, message: impl Into<String>) -> Error {
        Error::parse(&self.at, &self.text, message)
    }

    /// Warning at the current line
    pub(crate) fn warn(&mut self, message: impl AsRef<str>) {
        self.report.warnings += 1;
        warn!(file = %self.at.file, line = self.at.line, text = %self.text, "{}", message.as_ref());
    }

    /// Attach the current line to a parameter error
    pub(crate) fn arg<T>(&self, value: ArgResult<T>) -> Result<T> {
        value.map_err(|message| self.error(message))
    }

    pub(crate) fn options(&self) -> &CompileOptions {
        self.options
    }

    // === Script under construction ===

    fn builder(&mut self) -> Result<&mut ScriptBuilder> {
        match self.building.as_mut() {
            Some(builder) => Ok(builder),
            None => Err(Error::parse(&self.at, &self.text, "no trigger block is open")),
        }
    }

    /// The definition being built
    pub(crate) fn script(&mut self) -> Result<&mut ScriptDef> {
        Ok(&mut self.builder()?.def)
    }

    /// Mark a single-use property as set; a second use is fatal
    pub(crate) fn claim(&mut self, property: &'static str) -> Result<()> {
        if !self.builder()?.used.insert(property) {
            return Err(self.error(format!("{property} used more than once in this trigger")));
        }
        Ok(())
    }

    /// Append one state carrying any pending wait and label
    pub(crate) fn push_action(&mut self, action: Action) -> Result<()> {
        let at = (self.at.clone(), self.text.clone());
        let builder = self.builder()?;
        let label = builder.pending_label.take();
        let index = builder.def.states.len();
        if let Some(label) = &label {
            builder.def.labels.insert(label.clone(), index);
        }
        builder.def.states.push(State {
            tics: std::mem::take(&mut builder.pending_wait),
            action,
            label,
        });
        builder.state_lines.push(at);
        Ok(())
    }

    /// `WAIT`: add to the pending delay
    pub(crate) fn add_wait(&mut self, ticks: i32) -> Result<()> {
        let builder = self.builder()?;
        builder.pending_wait = builder.pending_wait.saturating_add(ticks);
        Ok(())
    }

    /// `LABEL`: name the next state
    pub(crate) fn add_label(&mut self, name: &str) -> Result<()> {
        let name = name.to_ascii_uppercase();
        let builder = self.builder()?;
        let duplicate = builder.def.labels.contains_key(&name)
            || builder.pending_label.as_deref() == Some(name.as_str());
        if duplicate {
            return Err(self.error(format!("duplicate label `{name}`")));
        }
        if self.builder()?.pending_label.is_some() {
            self.push_action(Action::Nop)?;
        }
        self.builder()?.pending_label = Some(name);
        Ok(())
    }

    fn open_trigger(&mut self, spatial: Spatial) -> Result<()> {
        let map = self
            .map
            .clone()
            .ok_or_else(|| self.error("trigger outside START_MAP"))?;
        self.building = Some(ScriptBuilder {
            def: ScriptDef::new(map, spatial, self.at.clone()),
            pending_wait: 0,
            pending_label: None,
            state_lines: Vec::new(),
            used: HashSet::new(),
        });
        self.level = BlockLevel::Trigger;
        Ok(())
    }

    fn finish_trigger(&mut self) -> Result<()> {
        {
            let builder = self.builder()?;
            if builder.pending_label.is_some() || builder.pending_wait > 0 {
                self.push_action(Action::Nop)?;
            }
        }
        let Some(mut builder) = self.building.take() else {
            return Err(self.error("no trigger block is open"));
        };

        if builder.def.states.is_empty() {
            return Err(Error::parse(
                &builder.def.source,
                &self.text,
                "trigger has no actions",
            ));
        }

        let labels = builder.def.labels.clone();
        let mut uses_retrigger = false;
        for (state, (at, text)) in builder.def.states.iter_mut().zip(&builder.state_lines) {
            uses_retrigger |= matches!(state.action, Action::Retrigger);
            for target in state.action.jump_targets_mut() {
                match labels.get(&target.label) {
                    Some(&index) => target.state = index,
                    None => {
                        return Err(Error::parse(
                            at,
                            text,
                            format!("unknown label `{}`", target.label),
                        ))
                    }
                }
            }
        }
        if uses_retrigger && !builder.def.independent {
            self.warn("RETRIGGER used in a trigger without TAGGED_INDEPENDENT");
        }

        builder.def.load_serial = self.serial;
        debug!(script = %builder.def.display_name(), states = builder.def.states.len(), "script compiled");
        self.registry.add(builder.def);
        self.report.scripts += 1;
        self.level = BlockLevel::Map;
        Ok(())
    }

    fn height_band(&self, z1: &str, z2: &str) -> Result<HeightBand> {
        let z1 = self.arg(args::float(z1))?;
        let z2 = self.arg(args::float(z2))?;
        Ok(HeightBand::from_range(z1, z2))
    }

    /// Optional trailing `z1 z2` pair, which must be complete
    fn optional_band(&self, p: &[String], from: usize) -> Result<Option<HeightBand>> {
        match p.len().saturating_sub(from) {
            0 => Ok(None),
            2 => Ok(Some(self.height_band(&p[from], &p[from + 1])?)),
            _ => Err(self.error("height range needs both z1 and z2")),
        }
    }
}

// === Global primitives ===

pub(crate) fn define(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let value = args::unquote(&p[1]);
    c.defines.define(&p[0], &value);
    Ok(())
}

pub(crate) fn clear_all(c: &mut Compiler<'_>, _p: &[String]) -> Result<()> {
    info!(file = %c.at.file, scripts = c.registry.len(), "#CLEARALL removed all scripts");
    c.registry.clear();
    Ok(())
}

pub(crate) fn version(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let version = c.arg(args::float(&p[0]))?;
    if version > LANGUAGE_VERSION {
        c.warn(format!(
            "script version {version} is newer than supported {LANGUAGE_VERSION}"
        ));
    }
    c.report.version = Some(version);
    Ok(())
}

// === Block primitives ===

pub(crate) fn start_map(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let map = args::unquote(&p[0]);
    if !map.eq_ignore_ascii_case(ALL_MAPS) {
        let purged = c.registry.purge_map(&map, c.serial);
        if purged > 0 {
            debug!(map = %map, purged, "replaced earlier scripts");
        }
        c.report.purged += purged;
    }
    c.map = Some(map);
    c.level = BlockLevel::Map;
    Ok(())
}

pub(crate) fn end_map(c: &mut Compiler<'_>, _p: &[String]) -> Result<()> {
    c.map = None;
    c.level = BlockLevel::Outer;
    Ok(())
}

pub(crate) fn radius_trigger(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let x = c.arg(args::float(&p[0]))?;
    let y = c.arg(args::float(&p[1]))?;
    let radius = c.arg(args::float(&p[2]))?;
    let height = c.optional_band(p, 3)?;
    c.open_trigger(Spatial::Radius {
        x,
        y,
        radius,
        height,
    })
}

pub(crate) fn rect_trigger(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let mut x1 = c.arg(args::float(&p[0]))?;
    let mut y1 = c.arg(args::float(&p[1]))?;
    let mut x2 = c.arg(args::float(&p[2]))?;
    let mut y2 = c.arg(args::float(&p[3]))?;
    let height = c.optional_band(p, 4)?;

    if x1 > x2 {
        c.warn("RECT_TRIGGER x1 greater than x2, swapping");
        std::mem::swap(&mut x1, &mut x2);
    }
    if y1 > y2 {
        c.warn("RECT_TRIGGER y1 greater than y2, swapping");
        std::mem::swap(&mut y1, &mut y2);
    }

    c.open_trigger(Spatial::Rect {
        x: (x1 + x2) / 2.0,
        y: (y1 + y2) / 2.0,
        half_x: (x2 - x1) / 2.0,
        half_y: (y2 - y1) / 2.0,
        height,
    })
}

pub(crate) fn sector_trigger_tag(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let tag = c.arg(args::int(&p[0]))?;
    let height = c.optional_band(p, 1)?;
    c.open_trigger(Spatial::SectorTag { tag, height })
}

pub(crate) fn sector_trigger_index(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let index = c.arg(args::unsigned(&p[0]))?;
    let height = c.optional_band(p, 1)?;
    c.open_trigger(Spatial::SectorIndex { index, height })
}

pub(crate) fn end_trigger(c: &mut Compiler<'_>, _p: &[String]) -> Result<()> {
    c.finish_trigger()
}

// === Property primitives ===

pub(crate) fn name(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    c.claim("NAME")?;
    c.script()?.name = Some(args::unquote(&p[0]));
    Ok(())
}

pub(crate) fn tag(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    c.claim("TAG")?;
    c.script()?.tag = Some(Tag::parse(&args::unquote(&p[0])));
    Ok(())
}

pub(crate) fn when_appear(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    c.claim("WHEN_APPEAR")?;
    let appear = c.arg(args::appearance(&p[0]))?;
    c.script()?.appear = appear;
    Ok(())
}

pub(crate) fn when_player_num(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    c.claim("WHEN_PLAYER_NUM")?;
    let min = c.arg(args::unsigned(&p[0]))?;
    let max = match p.get(1) {
        Some(max) => c.arg(args::unsigned(max))?,
        None => MAX_PLAYERS as u32,
    };
    if min > max {
        return Err(c.error(format!("WHEN_PLAYER_NUM minimum {min} exceeds maximum {max}")));
    }
    let script = c.script()?;
    script.min_players = min;
    script.max_players = max;
    Ok(())
}

pub(crate) fn tagged_repeatable(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    c.claim("TAGGED_REPEATABLE")?;
    let count = match p.first() {
        Some(count) => c.arg(args::int(count))?,
        None => -1,
    };
    let delay = match p.get(1) {
        Some(delay) => c.arg(args::time(delay))?,
        None => 0,
    };
    c.script()?.repeat = RepeatPolicy {
        count: count.max(-1),
        delay,
    };
    Ok(())
}

pub(crate) fn tagged_use(c: &mut Compiler<'_>, _p: &[String]) -> Result<()> {
    c.claim("TAGGED_USE")?;
    c.script()?.tagged_use = true;
    Ok(())
}

pub(crate) fn tagged_independent(c: &mut Compiler<'_>, _p: &[String]) -> Result<()> {
    c.claim("TAGGED_INDEPENDENT")?;
    c.script()?.independent = true;
    Ok(())
}

pub(crate) fn tagged_immediate(c: &mut Compiler<'_>, _p: &[String]) -> Result<()> {
    c.claim("TAGGED_IMMEDIATE")?;
    c.script()?.immediate = true;
    Ok(())
}

pub(crate) fn tagged_disabled(c: &mut Compiler<'_>, _p: &[String]) -> Result<()> {
    c.claim("TAGGED_DISABLED")?;
    c.script()?.disabled = true;
    Ok(())
}

pub(crate) fn tagged_path(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let next = args::unquote(&p[0]);
    c.script()?.path_next.push(next);
    Ok(())
}

pub(crate) fn path_event(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    c.claim("PATH_EVENT")?;
    let (label, offset) = c.arg(args::label_offset(&p[0]))?;
    c.script()?.path_event = Some(PathEvent { label, offset });
    Ok(())
}

pub(crate) fn on_death(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let threshold = match p.get(1) {
        Some(t) => c.arg(args::unsigned(t))?,
        None => 0,
    };
    c.script()?.death_checks.push(DeathCheck {
        thing_type: p[0].to_ascii_uppercase(),
        threshold,
    });
    Ok(())
}

fn height_check(c: &mut Compiler<'_>, p: &[String], plane: SectorPlane) -> Result<()> {
    let mut z1 = c.arg(args::float(&p[0]))?;
    let mut z2 = c.arg(args::float(&p[1]))?;
    if z1 > z2 {
        c.warn("height range given high to low, swapping");
        std::mem::swap(&mut z1, &mut z2);
    }
    let sector = match p.get(2) {
        Some(s) => Some(c.arg(args::unsigned(s))?),
        None => None,
    };
    c.script()?.height_checks.push(HeightCheck {
        z1,
        z2,
        sector,
        plane,
    });
    Ok(())
}

pub(crate) fn on_height(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    height_check(c, p, SectorPlane::Floor)
}

pub(crate) fn on_ceiling_height(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    height_check(c, p, SectorPlane::Ceiling)
}

pub(crate) fn on_condition(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let condition = c.arg(args::condition(&p[0]))?;
    c.script()?.conditions.push(condition);
    Ok(())
}

// === Sequencing ===

pub(crate) fn label(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    c.add_label(&p[0])
}

pub(crate) fn wait(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let ticks = c.arg(args::time(&p[0]))?;
    c.add_wait(ticks)
}
