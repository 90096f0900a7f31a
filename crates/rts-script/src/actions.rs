//! Action primitives
//!
//! Every handler decodes its parameters into one [`Action`] and appends it
//! as a state.

use crate::args;
use crate::compiler::Compiler;
use crate::error::Result;
use rts_core::{
    Action, GameAction, JumpTarget, MenuDef, PlaySound, SectorPlane, SpawnThing, Tag,
    TexturePart, TipChange, TipContent, TipDef, TIP_SLOTS,
};

fn game(c: &mut Compiler<'_>, action: GameAction) -> Result<()> {
    c.push_action(Action::Game(action))
}

// === Flow ===

pub(crate) fn jump(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let chance = match p.get(1) {
        Some(chance) => c.arg(args::percent(chance))?,
        None => 1.0,
    };
    c.push_action(Action::Jump {
        target: JumpTarget::unresolved(p[0].to_ascii_uppercase()),
        chance,
    })
}

pub(crate) fn jump_on(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    if !p[0].eq_ignore_ascii_case("MENU") {
        return Err(c.error(format!("JUMP_ON expects MENU, found `{}`", p[0])));
    }
    let targets = p[1..]
        .iter()
        .map(|label| JumpTarget::unresolved(label.to_ascii_uppercase()))
        .collect();
    c.push_action(Action::JumpOnMenu { targets })
}

pub(crate) fn retrigger(c: &mut Compiler<'_>, _p: &[String]) -> Result<()> {
    c.push_action(Action::Retrigger)
}

pub(crate) fn wait_until_dead(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let thing_types = p.iter().map(|t| t.to_ascii_uppercase()).collect();
    c.push_action(Action::WaitUntilDead { thing_types })
}

pub(crate) fn enable_tagged(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    tagged(c, p, false)
}

pub(crate) fn disable_tagged(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    tagged(c, p, true)
}

fn tagged(c: &mut Compiler<'_>, p: &[String], disable: bool) -> Result<()> {
    let tag = Tag::parse(&args::unquote(&p[0]));
    c.push_action(Action::EnableTagged { tag, disable })
}

pub(crate) fn enable_script(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let name = args::unquote(&p[0]);
    c.push_action(Action::EnableScript {
        name,
        disable: false,
    })
}

pub(crate) fn disable_script(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let name = args::unquote(&p[0]);
    c.push_action(Action::EnableScript {
        name,
        disable: true,
    })
}

// === Tips and menus ===

fn tip(c: &mut Compiler<'_>, p: &[String], content: TipContent) -> Result<()> {
    let time = match p.get(1) {
        Some(t) => c.arg(args::time(t))?,
        None => c.options().default_tip_time,
    };
    let sound = match p.get(2) {
        Some(s) => c.arg(args::boolean(s))?,
        None => false,
    };
    let scale = match p.get(3) {
        Some(s) => c.arg(args::float(s))?,
        None => 1.0,
    };
    c.push_action(Action::Tip(TipDef {
        content,
        time,
        sound,
        scale,
    }))
}

pub(crate) fn tip_text(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    tip(c, p, TipContent::Text(args::unquote(&p[0])))
}

pub(crate) fn tip_ldf(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    tip(c, p, TipContent::Ldf(args::unquote(&p[0])))
}

pub(crate) fn tip_graphic(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    tip(c, p, TipContent::Graphic(args::unquote(&p[0])))
}

pub(crate) fn tip_slot(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let slot = c.arg(args::unsigned(&p[0]))? as usize;
    if !(1..=TIP_SLOTS).contains(&slot) {
        return Err(c.error(format!("tip slot {slot} out of range 1-{TIP_SLOTS}")));
    }
    c.push_action(Action::TipSlot(slot - 1))
}

pub(crate) fn tip_set_pos(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let x = c.arg(args::percent(&p[0]))?;
    let y = c.arg(args::percent(&p[1]))?;
    let time = match p.get(2) {
        Some(t) => c.arg(args::time(t))?,
        None => 0,
    };
    c.push_action(Action::TipChange(TipChange::Position { x, y, time }))
}

pub(crate) fn tip_set_colour(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let colour = args::unquote(&p[0]);
    c.push_action(Action::TipChange(TipChange::Colour { colour }))
}

pub(crate) fn tip_set_trans(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let alpha = c.arg(args::percent(&p[0]))?;
    let time = match p.get(1) {
        Some(t) => c.arg(args::time(t))?,
        None => 0,
    };
    c.push_action(Action::TipChange(TipChange::Translucency { alpha, time }))
}

pub(crate) fn tip_set_align(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let left = match p[0].to_ascii_uppercase().as_str() {
        "LEFT" => true,
        "CENTER" | "CENTRE" => false,
        other => return Err(c.error(format!("TIP_SET_ALIGN expects LEFT or CENTER, found `{other}`"))),
    };
    c.push_action(Action::TipChange(TipChange::Align { left }))
}

fn menu(c: &mut Compiler<'_>, p: &[String], ldf: bool) -> Result<()> {
    c.push_action(Action::ShowMenu(MenuDef {
        title: args::unquote(&p[0]),
        options: p[1..].iter().map(|o| args::unquote(o)).collect(),
        ldf,
    }))
}

pub(crate) fn show_menu(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    menu(c, p, false)
}

pub(crate) fn show_menu_ldf(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    menu(c, p, true)
}

pub(crate) fn menu_style(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    c.push_action(Action::MenuStyle(args::unquote(&p[0])))
}

// === Things ===

fn spawn(c: &mut Compiler<'_>, p: &[String], ambush: bool, flash: bool) -> Result<()> {
    let mut spawn = SpawnThing::new(p[0].to_ascii_uppercase());
    spawn.ambush = ambush;
    spawn.flash = flash;
    let rest = &p[1..];

    if rest.iter().any(|t| args::keyword(t).is_some()) {
        for token in rest {
            let Some((key, value)) = args::keyword(token) else {
                return Err(c.error(format!("expected KEY=value, found `{token}`")));
            };
            match key.as_str() {
                "X" => spawn.x = Some(c.arg(args::float(value))?),
                "Y" => spawn.y = Some(c.arg(args::float(value))?),
                "Z" => spawn.z = Some(c.arg(args::float(value))?),
                "ANGLE" => spawn.angle = c.arg(args::float(value))?,
                "SLOPE" => spawn.slope = c.arg(args::float(value))?,
                "TAG" => spawn.tag = c.arg(args::int(value))?,
                "WHEN" => spawn.when = Some(c.arg(args::appearance(value))?),
                _ => c.warn(format!("unknown spawn keyword `{key}`")),
            }
        }
        if spawn.x.is_some() != spawn.y.is_some() {
            return Err(c.error("spawn position needs both X and Y"));
        }
    } else {
        match rest.len() {
            0 => {}
            1 => return Err(c.error("spawn position needs both x and y")),
            _ => {
                spawn.x = Some(c.arg(args::float(&rest[0]))?);
                spawn.y = Some(c.arg(args::float(&rest[1]))?);
                if let Some(angle) = rest.get(2) {
                    spawn.angle = c.arg(args::float(angle))?;
                }
                if let Some(z) = rest.get(3) {
                    spawn.z = Some(c.arg(args::float(z))?);
                }
            }
        }
    }

    game(c, GameAction::SpawnThing(spawn))
}

pub(crate) fn spawn_thing(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    spawn(c, p, false, false)
}

pub(crate) fn spawn_thing_ambush(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    spawn(c, p, true, false)
}

pub(crate) fn spawn_thing_flash(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    spawn(c, p, false, true)
}

pub(crate) fn damage_monsters(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let amount = c.arg(args::float(&p[1]))?;
    let tag = match p.get(2) {
        Some(token) => match args::keyword(token) {
            Some((key, value)) if key == "TAG" => Some(c.arg(args::int(value))?),
            _ => return Err(c.error(format!("expected TAG=n, found `{token}`"))),
        },
        None => None,
    };
    game(
        c,
        GameAction::DamageMonsters {
            thing_type: p[0].to_ascii_uppercase(),
            amount,
            tag,
        },
    )
}

pub(crate) fn thing_event(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let (label, offset) = c.arg(args::label_offset(&p[1]))?;
    game(
        c,
        GameAction::ThingEvent {
            thing_type: p[0].to_ascii_uppercase(),
            label,
            offset,
        },
    )
}

pub(crate) fn replace_thing(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    game(
        c,
        GameAction::ReplaceThing {
            old: p[0].to_ascii_uppercase(),
            new: p[1].to_ascii_uppercase(),
        },
    )
}

// === Sound and music ===

pub(crate) fn play_sound(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let mut sound = PlaySound {
        sound: p[0].to_ascii_uppercase(),
        x: None,
        y: None,
        z: None,
        bossman: false,
    };
    match p.len() {
        1 => {}
        2 => return Err(c.error("sound position needs both x and y")),
        _ => {
            sound.x = Some(c.arg(args::float(&p[1]))?);
            sound.y = Some(c.arg(args::float(&p[2]))?);
            if let Some(z) = p.get(3) {
                sound.z = Some(c.arg(args::float(z))?);
            }
        }
    }
    game(c, GameAction::PlaySound(sound))
}

pub(crate) fn play_sound_bossman(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    game(
        c,
        GameAction::PlaySound(PlaySound {
            sound: p[0].to_ascii_uppercase(),
            x: None,
            y: None,
            z: None,
            bossman: true,
        }),
    )
}

pub(crate) fn kill_sound(c: &mut Compiler<'_>, _p: &[String]) -> Result<()> {
    game(c, GameAction::KillSound)
}

pub(crate) fn change_music(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let entry = c.arg(args::int(&p[0]))?;
    game(c, GameAction::ChangeMusic { entry })
}

// === Players ===

pub(crate) fn heal_player(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let amount = c.arg(args::float(&p[0]))?;
    let limit = match p.get(1) {
        Some(l) => Some(c.arg(args::float(l))?),
        None => None,
    };
    game(c, GameAction::HealPlayer { amount, limit })
}

pub(crate) fn give_armour(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let amount = c.arg(args::float(&p[1]))?;
    let limit = match p.get(2) {
        Some(l) => Some(c.arg(args::float(l))?),
        None => None,
    };
    game(
        c,
        GameAction::GiveArmour {
            armour_type: p[0].to_ascii_uppercase(),
            amount,
            limit,
        },
    )
}

pub(crate) fn damage_player(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let amount = c.arg(args::float(&p[0]))?;
    game(c, GameAction::DamagePlayer { amount })
}

pub(crate) fn give_benefit(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    benefit(c, p, false)
}

pub(crate) fn lose_benefit(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    benefit(c, p, true)
}

fn benefit(c: &mut Compiler<'_>, p: &[String], lose: bool) -> Result<()> {
    game(
        c,
        GameAction::Benefit {
            benefit: p[0].to_ascii_uppercase(),
            lose,
        },
    )
}

pub(crate) fn teleport_to_start(c: &mut Compiler<'_>, _p: &[String]) -> Result<()> {
    game(c, GameAction::TeleportToStart)
}

// === Weapons ===

pub(crate) fn switch_weapon(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    game(
        c,
        GameAction::SwitchWeapon {
            weapon: p[0].to_ascii_uppercase(),
        },
    )
}

pub(crate) fn replace_weapon(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    game(
        c,
        GameAction::ReplaceWeapon {
            old: p[0].to_ascii_uppercase(),
            new: p[1].to_ascii_uppercase(),
        },
    )
}

pub(crate) fn weapon_event(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let (label, offset) = c.arg(args::label_offset(&p[1]))?;
    game(
        c,
        GameAction::WeaponEvent {
            weapon: p[0].to_ascii_uppercase(),
            label,
            offset,
        },
    )
}

// === Level ===

pub(crate) fn exit_level(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    exit(c, p, false)
}

pub(crate) fn secret_exit(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    exit(c, p, true)
}

fn exit(c: &mut Compiler<'_>, p: &[String], secret: bool) -> Result<()> {
    let delay = match p.first() {
        Some(d) => c.arg(args::time(d))?,
        None => 5,
    };
    game(c, GameAction::ExitLevel { delay, secret })
}

pub(crate) fn goto_map(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let skip_all = match p.get(1) {
        Some(flag) if flag.eq_ignore_ascii_case("SKIP_ALL") => true,
        Some(flag) => {
            c.warn(format!("GOTOMAP ignores unknown flag `{flag}`"));
            false
        }
        None => false,
    };
    game(
        c,
        GameAction::GotoMap {
            map: args::unquote(&p[0]),
            skip_all,
        },
    )
}

pub(crate) fn skill(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let skill = c.arg(args::unsigned(&p[0]))?;
    if !(1..=5).contains(&skill) {
        return Err(c.error(format!("skill {skill} out of range 1-5")));
    }
    let respawn = c.arg(args::boolean(&p[1]))?;
    let fast_monsters = c.arg(args::boolean(&p[2]))?;
    game(
        c,
        GameAction::Skill {
            skill: skill as u8,
            respawn,
            fast_monsters,
        },
    )
}

// === Sectors and lines ===

fn absolute_flag(c: &mut Compiler<'_>, token: Option<&String>) -> Result<bool> {
    match token {
        Some(flag) if flag.eq_ignore_ascii_case("ABSOLUTE") => Ok(true),
        Some(flag) => Err(c.error(format!("expected ABSOLUTE, found `{flag}`"))),
        None => Ok(false),
    }
}

pub(crate) fn move_sector(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let tag = c.arg(args::int(&p[0]))?;
    let amount = c.arg(args::float(&p[1]))?;
    let plane = match p[2].to_ascii_uppercase().as_str() {
        "FLOOR" => SectorPlane::Floor,
        "CEILING" => SectorPlane::Ceiling,
        other => return Err(c.error(format!("expected FLOOR or CEILING, found `{other}`"))),
    };
    let absolute = absolute_flag(c, p.get(3))?;
    game(
        c,
        GameAction::MoveSector {
            tag,
            amount,
            plane,
            absolute,
        },
    )
}

pub(crate) fn light_sector(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let tag = c.arg(args::int(&p[0]))?;
    let amount = c.arg(args::float(&p[1]))?;
    let absolute = absolute_flag(c, p.get(2))?;
    game(
        c,
        GameAction::LightSector {
            tag,
            amount,
            absolute,
        },
    )
}

pub(crate) fn activate_linetype(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let line_type = c.arg(args::int(&p[0]))?;
    let tag = c.arg(args::int(&p[1]))?;
    game(c, GameAction::ActivateLinetype { line_type, tag })
}

pub(crate) fn block_lines(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let tag = c.arg(args::int(&p[0]))?;
    game(c, GameAction::BlockLines { tag, blocked: true })
}

pub(crate) fn unblock_lines(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let tag = c.arg(args::int(&p[0]))?;
    game(c, GameAction::BlockLines { tag, blocked: false })
}

pub(crate) fn change_tex(c: &mut Compiler<'_>, p: &[String]) -> Result<()> {
    let part = match p[0].to_ascii_uppercase().as_str() {
        "RIGHT_UPPER" => TexturePart::RightUpper,
        "RIGHT_MIDDLE" => TexturePart::RightMiddle,
        "RIGHT_LOWER" => TexturePart::RightLower,
        "LEFT_UPPER" => TexturePart::LeftUpper,
        "LEFT_MIDDLE" => TexturePart::LeftMiddle,
        "LEFT_LOWER" => TexturePart::LeftLower,
        "FLOOR" => TexturePart::Floor,
        "CEILING" => TexturePart::Ceiling,
        "SKY" => TexturePart::Sky,
        other => return Err(c.error(format!("unknown texture part `{other}`"))),
    };
    let tag = match p.get(2) {
        Some(t) => c.arg(args::int(t))?,
        None => 0,
    };
    let subtag = match p.get(3) {
        Some(t) => c.arg(args::int(t))?,
        None => 0,
    };
    game(
        c,
        GameAction::ChangeTexture {
            part,
            texture: args::unquote(&p[1]),
            tag,
            subtag,
        },
    )
}

#[cfg(test)]
mod tests {
    use crate::compiler::{compile, CompileOptions, DEFAULT_TIP_TIME};
    use crate::error::Error;
    use rts_core::{Action, GameAction, ScriptRegistry, TagKey, TexturePart, TipChange, TipContent};

    /// Compile a trigger body and return its actions
    fn actions(body: &str) -> Vec<Action> {
        let source = format!("START_MAP MAP01\nRADIUS_TRIGGER 0 0 64\n{body}\nEND_RADIUS_TRIGGER\nEND_MAP\n");
        let mut registry = ScriptRegistry::new();
        compile(&source, "test.rts", &mut registry, &CompileOptions::default()).unwrap();
        let def = registry.iter().next().unwrap();
        def.states.iter().map(|s| s.action.clone()).collect()
    }

    fn fails(body: &str) -> String {
        let source = format!("START_MAP MAP01\nRADIUS_TRIGGER 0 0 64\n{body}\nEND_RADIUS_TRIGGER\nEND_MAP\n");
        let mut registry = ScriptRegistry::new();
        match compile(&source, "test.rts", &mut registry, &CompileOptions::default()) {
            Err(Error::Parse { message, line, .. }) => {
                assert_eq!(line, 3);
                message
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_spawn_positional_and_keywords() {
        let got = actions("SPAWNTHING imp 10 20 90\nSPAWNTHING_AMBUSH IMP X=1 Y=2 Z=3 TAG=4 WHEN=coop");
        let Action::Game(GameAction::SpawnThing(first)) = &got[0] else {
            panic!("expected spawn");
        };
        assert_eq!(first.thing_type, "IMP");
        assert_eq!((first.x, first.y, first.angle), (Some(10.0), Some(20.0), 90.0));
        assert!(!first.ambush);

        let Action::Game(GameAction::SpawnThing(second)) = &got[1] else {
            panic!("expected spawn");
        };
        assert_eq!((second.x, second.y, second.z), (Some(1.0), Some(2.0), Some(3.0)));
        assert_eq!(second.tag, 4);
        assert!(second.ambush);
        assert!(second.when.is_some());

        assert!(fails("SPAWNTHING IMP 10").contains("x and y"));
    }

    #[test]
    fn test_tips() {
        let got = actions("TIP \"Hello\\nthere\"\nTIP_GRAPHIC KEYPIC 2s TRUE 0.5\nTIP_SLOT 3\nTIP_SET_POS 10% 90% 35\nTIP_SET_ALIGN left");
        assert_eq!(
            got[0],
            Action::Tip(rts_core::TipDef {
                content: TipContent::Text("Hello\nthere".into()),
                time: DEFAULT_TIP_TIME,
                sound: false,
                scale: 1.0,
            })
        );
        let Action::Tip(graphic) = &got[1] else {
            panic!("expected tip");
        };
        assert_eq!(graphic.content, TipContent::Graphic("KEYPIC".into()));
        assert_eq!((graphic.time, graphic.sound, graphic.scale), (70, true, 0.5));
        assert_eq!(got[2], Action::TipSlot(2));
        assert_eq!(
            got[3],
            Action::TipChange(TipChange::Position {
                x: 0.1,
                y: 0.9,
                time: 35
            })
        );
        assert_eq!(got[4], Action::TipChange(TipChange::Align { left: true }));

        assert!(fails("TIP_SLOT 0").contains("out of range"));
    }

    #[test]
    fn test_menu_and_jump_on() {
        let got = actions("SHOW_MENU \"Which way?\" \"Left\" \"Right\"\nJUMP_ON MENU left right\nLABEL left\nDAMAGEPLAYER 1\nLABEL right\nDAMAGEPLAYER 2");
        let Action::ShowMenu(menu) = &got[0] else {
            panic!("expected menu");
        };
        assert_eq!(menu.title, "Which way?");
        assert_eq!(menu.options, vec!["Left", "Right"]);

        let Action::JumpOnMenu { targets } = &got[1] else {
            panic!("expected JUMP_ON");
        };
        assert_eq!(targets.iter().map(|t| t.state).collect::<Vec<_>>(), vec![2, 3]);

        assert!(fails("JUMP_ON TIP a").contains("MENU"));
    }

    #[test]
    fn test_tagged_and_scripts() {
        let got = actions("ENABLE_TAGGED 5\nDISABLE_TAGGED lift\nDISABLE_SCRIPT trap");
        match &got[0] {
            Action::EnableTagged { tag, disable } => {
                assert_eq!(tag.key(), TagKey::Numeric(5));
                assert!(!disable);
            }
            other => panic!("unexpected {other:?}"),
        }
        match &got[1] {
            Action::EnableTagged { tag, disable } => {
                assert_eq!(tag.key(), TagKey::parse("LIFT"));
                assert!(disable);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            got[2],
            Action::EnableScript {
                name: "trap".into(),
                disable: true
            }
        );
    }

    #[test]
    fn test_world_actions() {
        let got = actions(
            "MOVE_SECTOR 3 -64 floor absolute\nLIGHT_SECTOR 3 -16\nCHANGE_TEX left_lower STARTAN 9\n\
             DAMAGE_MONSTERS ANY 50 TAG=2\nGOTOMAP MAP05 SKIP_ALL\nSKILL 4 true false\nEXITLEVEL",
        );
        assert_eq!(
            got[0],
            Action::Game(GameAction::MoveSector {
                tag: 3,
                amount: -64.0,
                plane: rts_core::SectorPlane::Floor,
                absolute: true
            })
        );
        assert!(matches!(got[1], Action::Game(GameAction::LightSector { absolute: false, .. })));
        assert!(matches!(
            got[2],
            Action::Game(GameAction::ChangeTexture {
                part: TexturePart::LeftLower,
                tag: 9,
                ..
            })
        ));
        assert!(matches!(
            got[3],
            Action::Game(GameAction::DamageMonsters { tag: Some(2), .. })
        ));
        assert!(matches!(got[4], Action::Game(GameAction::GotoMap { skip_all: true, .. })));
        assert!(matches!(
            got[5],
            Action::Game(GameAction::Skill {
                skill: 4,
                respawn: true,
                fast_monsters: false
            })
        ));
        assert_eq!(got[6], Action::Game(GameAction::ExitLevel { delay: 5, secret: false }));

        assert!(fails("MOVE_SECTOR 3 10 wall").contains("FLOOR or CEILING"));
        assert!(fails("CHANGE_TEX roof X").contains("texture part"));
    }

    #[test]
    fn test_sounds_and_events() {
        let got = actions("PLAYSOUND dswind 0 0\nPLAYSOUND_BOSSMAN dsbossit\nKILLSOUND\nTHING_EVENT imp pain:2\nWAIT_UNTIL_DEAD imp baron");
        assert!(matches!(&got[0], Action::Game(GameAction::PlaySound(s)) if s.x == Some(0.0) && !s.bossman));
        assert!(matches!(&got[1], Action::Game(GameAction::PlaySound(s)) if s.bossman));
        assert_eq!(got[2], Action::Game(GameAction::KillSound));
        assert_eq!(
            got[3],
            Action::Game(GameAction::ThingEvent {
                thing_type: "IMP".into(),
                label: "PAIN".into(),
                offset: 2
            })
        );
        assert_eq!(
            got[4],
            Action::WaitUntilDead {
                thing_types: vec!["IMP".into(), "BARON".into()]
            }
        );
    }
}
