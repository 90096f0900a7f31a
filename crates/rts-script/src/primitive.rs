//! The primitive dispatch table

use crate::actions as act;
use crate::compiler::{self as cc, BlockLevel, Compiler};
use crate::error::Result;

/// Compiles one primitive from its parameters
pub(crate) type Handler = fn(&mut Compiler<'_>, &[String]) -> Result<()>;

/// One entry in the dispatch table
pub(crate) struct Primitive {
    pub name: &'static str,
    /// Required block level; `None` is usable anywhere
    pub level: Option<BlockLevel>,
    pub min: usize,
    pub max: usize,
    /// Match any keyword starting with `name`
    pub prefix: bool,
    pub handler: Handler,
}

const ANY: Option<BlockLevel> = None;
const OUTER: Option<BlockLevel> = Some(BlockLevel::Outer);
const MAP: Option<BlockLevel> = Some(BlockLevel::Map);
const TRIGGER: Option<BlockLevel> = Some(BlockLevel::Trigger);

const fn p(
    name: &'static str,
    level: Option<BlockLevel>,
    min: usize,
    max: usize,
    handler: Handler,
) -> Primitive {
    Primitive {
        name,
        level,
        min,
        max,
        prefix: false,
        handler,
    }
}

static PRIMITIVES: &[Primitive] = &[
    // Directives
    p("#DEFINE", ANY, 2, 2, cc::define),
    p("#CLEARALL", ANY, 0, 0, cc::clear_all),
    p("#VERSION", ANY, 1, 1, cc::version),
    // Blocks
    p("START_MAP", OUTER, 1, 1, cc::start_map),
    p("END_MAP", MAP, 0, 0, cc::end_map),
    p("RADIUS_TRIGGER", MAP, 3, 5, cc::radius_trigger),
    p("RECT_TRIGGER", MAP, 4, 6, cc::rect_trigger),
    p("SECTOR_TRIGGER_TAG", MAP, 1, 3, cc::sector_trigger_tag),
    p("SECTOR_TRIGGER_INDEX", MAP, 1, 3, cc::sector_trigger_index),
    Primitive {
        name: "END_RADIUS",
        level: TRIGGER,
        min: 0,
        max: 0,
        prefix: true,
        handler: cc::end_trigger,
    },
    // Properties
    p("NAME", TRIGGER, 1, 1, cc::name),
    p("TAG", TRIGGER, 1, 1, cc::tag),
    p("WHEN_APPEAR", TRIGGER, 1, 1, cc::when_appear),
    p("WHEN_PLAYER_NUM", TRIGGER, 1, 2, cc::when_player_num),
    p("TAGGED_REPEATABLE", TRIGGER, 0, 2, cc::tagged_repeatable),
    p("TAGGED_USE", TRIGGER, 0, 0, cc::tagged_use),
    p("TAGGED_INDEPENDENT", TRIGGER, 0, 0, cc::tagged_independent),
    p("TAGGED_IMMEDIATE", TRIGGER, 0, 0, cc::tagged_immediate),
    p("TAGGED_DISABLED", TRIGGER, 0, 0, cc::tagged_disabled),
    p("TAGGED_PATH", TRIGGER, 1, 1, cc::tagged_path),
    p("PATH_EVENT", TRIGGER, 1, 1, cc::path_event),
    p("ONDEATH", TRIGGER, 1, 2, cc::on_death),
    p("ONHEIGHT", TRIGGER, 2, 3, cc::on_height),
    p("ONCEILINGHEIGHT", TRIGGER, 2, 3, cc::on_ceiling_height),
    p("ONCONDITION", TRIGGER, 1, 1, cc::on_condition),
    // Sequencing
    p("LABEL", TRIGGER, 1, 1, cc::label),
    p("WAIT", TRIGGER, 1, 1, cc::wait),
    p("JUMP", TRIGGER, 1, 2, act::jump),
    p("JUMP_ON", TRIGGER, 2, 10, act::jump_on),
    p("RETRIGGER", TRIGGER, 0, 0, act::retrigger),
    p("WAIT_UNTIL_DEAD", TRIGGER, 1, 10, act::wait_until_dead),
    p("ENABLE_TAGGED", TRIGGER, 1, 1, act::enable_tagged),
    p("DISABLE_TAGGED", TRIGGER, 1, 1, act::disable_tagged),
    p("ENABLE_SCRIPT", TRIGGER, 1, 1, act::enable_script),
    p("DISABLE_SCRIPT", TRIGGER, 1, 1, act::disable_script),
    // Tips and menus
    p("TIP", TRIGGER, 1, 4, act::tip_text),
    p("TIP_LDF", TRIGGER, 1, 4, act::tip_ldf),
    p("TIP_GRAPHIC", TRIGGER, 1, 4, act::tip_graphic),
    p("TIP_SLOT", TRIGGER, 1, 1, act::tip_slot),
    p("TIP_SET_POS", TRIGGER, 2, 3, act::tip_set_pos),
    p("TIP_SET_COLOUR", TRIGGER, 1, 1, act::tip_set_colour),
    p("TIP_SET_TRANS", TRIGGER, 1, 2, act::tip_set_trans),
    p("TIP_SET_ALIGN", TRIGGER, 1, 1, act::tip_set_align),
    p("SHOW_MENU", TRIGGER, 1, 10, act::show_menu),
    p("SHOW_MENU_LDF", TRIGGER, 1, 10, act::show_menu_ldf),
    p("MENU_STYLE", TRIGGER, 1, 1, act::menu_style),
    // Things
    p("SPAWNTHING", TRIGGER, 1, 8, act::spawn_thing),
    p("SPAWNTHING_AMBUSH", TRIGGER, 1, 8, act::spawn_thing_ambush),
    p("SPAWNTHING_FLASH", TRIGGER, 1, 8, act::spawn_thing_flash),
    p("DAMAGE_MONSTERS", TRIGGER, 2, 3, act::damage_monsters),
    p("THING_EVENT", TRIGGER, 2, 2, act::thing_event),
    p("REPLACE_THING", TRIGGER, 2, 2, act::replace_thing),
    // Sound
    p("PLAYSOUND", TRIGGER, 1, 4, act::play_sound),
    p("PLAYSOUND_BOSSMAN", TRIGGER, 1, 1, act::play_sound_bossman),
    p("KILLSOUND", TRIGGER, 0, 0, act::kill_sound),
    p("CHANGE_MUSIC", TRIGGER, 1, 1, act::change_music),
    // Players
    p("HEALPLAYER", TRIGGER, 1, 2, act::heal_player),
    p("GIVEARMOUR", TRIGGER, 2, 3, act::give_armour),
    p("DAMAGEPLAYER", TRIGGER, 1, 1, act::damage_player),
    p("GIVE_BENEFIT", TRIGGER, 1, 1, act::give_benefit),
    p("LOSE_BENEFIT", TRIGGER, 1, 1, act::lose_benefit),
    p("TELEPORT_TO_START", TRIGGER, 0, 0, act::teleport_to_start),
    // Weapons
    p("SWITCH_WEAPON", TRIGGER, 1, 1, act::switch_weapon),
    p("REPLACE_WEAPON", TRIGGER, 2, 2, act::replace_weapon),
    p("WEAPON_EVENT", TRIGGER, 2, 2, act::weapon_event),
    // Level
    p("EXITLEVEL", TRIGGER, 0, 1, act::exit_level),
    p("SECRET_EXIT", TRIGGER, 0, 1, act::secret_exit),
    p("GOTOMAP", TRIGGER, 1, 2, act::goto_map),
    p("SKILL", TRIGGER, 3, 3, act::skill),
    // Sectors and lines
    p("MOVE_SECTOR", TRIGGER, 3, 4, act::move_sector),
    p("LIGHT_SECTOR", TRIGGER, 2, 3, act::light_sector),
    p("ACTIVATE_LINETYPE", TRIGGER, 2, 2, act::activate_linetype),
    p("BLOCK_LINES", TRIGGER, 1, 1, act::block_lines),
    p("UNBLOCK_LINES", TRIGGER, 1, 1, act::unblock_lines),
    p("CHANGE_TEX", TRIGGER, 2, 4, act::change_tex),
];

/// Find the primitive for a keyword (case-insensitive)
///
/// Exact names win over prefix entries.
pub(crate) fn lookup(keyword: &str) -> Option<&'static Primitive> {
    let upper = keyword.to_ascii_uppercase();
    PRIMITIVES
        .iter()
        .find(|prim| !prim.prefix && prim.name == upper)
        .or_else(|| {
            PRIMITIVES
                .iter()
                .find(|prim| prim.prefix && upper.starts_with(prim.name))
        })
}

/// Every keyword the compiler understands
pub fn keywords() -> impl Iterator<Item = &'static str> {
    PRIMITIVES.iter().map(|prim| prim.name)
}
