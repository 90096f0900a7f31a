//! Activation conditions
//!
//! Checks run in a fixed order and stop at the first that leaves no player:
//! live players, spatial predicate, use key, sector heights, death counts,
//! custom conditions. The survivors become the trigger's `acti_players`.

use crate::action::SectorPlane;
use crate::identity::{PlayerMask, SectorId};
use crate::script::{HeightBand, Spatial};
use crate::trigger::TriggerInstance;
use crate::world::{GameWorld, PlayerInfo};
use tracing::debug;

/// Whether a player satisfies a spatial predicate
pub fn in_area(spatial: &Spatial, player: &PlayerInfo, world: &dyn GameWorld) -> bool {
    let (inside, band) = match spatial {
        Spatial::Radius {
            x,
            y,
            radius,
            height,
        } => {
            // A negative radius covers the whole map
            let (dx, dy) = (player.x - x, player.y - y);
            let reach = radius + player.radius;
            (*radius < 0.0 || dx * dx + dy * dy <= reach * reach, height)
        }
        Spatial::Rect {
            x,
            y,
            half_x,
            half_y,
            height,
        } => (
            (player.x - x).abs() <= half_x + player.radius
                && (player.y - y).abs() <= half_y + player.radius,
            height,
        ),
        Spatial::SectorTag { tag, height } => (player.sector_tag == *tag, height),
        Spatial::SectorIndex { index, height } => {
            (world.sector_by_index(*index) == Some(player.sector), height)
        }
        Spatial::Everywhere => return true,
    };
    inside && band_allows(band.as_ref(), player)
}

fn band_allows(band: Option<&HeightBand>, player: &PlayerInfo) -> bool {
    band.map_or(true, |b| b.overlaps(player.z, player.height))
}

/// Players that currently satisfy every activation condition
pub fn evaluate(trigger: &mut TriggerInstance, world: &dyn GameWorld) -> PlayerMask {
    let script = trigger.script.clone();
    let players = world.players();

    let mut mask: PlayerMask = players.iter().map(|p| p.index).collect();
    if mask.is_empty() {
        return mask;
    }

    if !script.immediate {
        mask = players
            .iter()
            .filter(|p| mask.contains(p.index) && in_area(&script.spatial, p, world))
            .map(|p| p.index)
            .collect();
        if mask.is_empty() {
            return mask;
        }
    }

    if script.tagged_use {
        mask = players
            .iter()
            .filter(|p| mask.contains(p.index) && p.use_pressed)
            .map(|p| p.index)
            .collect();
        if mask.is_empty() {
            return mask;
        }
    }

    if !script.height_checks.is_empty() {
        let sectors = trigger.height_sectors.get_or_insert_with(|| {
            let center = script.spatial.center();
            script
                .height_checks
                .iter()
                .map(|check| match check.sector {
                    Some(index) => world.sector_by_index(index),
                    None => world.sector_at(center.x, center.y),
                })
                .collect()
        });
        for (check, sector) in script.height_checks.iter().zip(sectors.iter()) {
            let Some(sector) = sector else {
                debug!(script = %script.display_name(), "height check sector not found");
                return PlayerMask::EMPTY;
            };
            if !check.contains(plane_height(world, *sector, check.plane)) {
                return PlayerMask::EMPTY;
            }
        }
    }

    for check in &script.death_checks {
        match world.living_count(&check.thing_type) {
            Some(alive) if alive <= check.threshold => {}
            _ => return PlayerMask::EMPTY,
        }
    }

    if !script.conditions.is_empty() {
        mask = mask
            .iter()
            .filter(|&p| script.conditions.iter().all(|c| world.check_condition(p, c)))
            .collect();
    }

    mask
}

/// Latch the trigger if its conditions hold; returns whether it is active
pub fn try_activate(trigger: &mut TriggerInstance, world: &dyn GameWorld) -> bool {
    let mask = evaluate(trigger, world);
    if mask.is_empty() {
        return false;
    }
    if !trigger.activated {
        debug!(script = %trigger.script.display_name(), players = mask.0, "trigger activated");
    }
    trigger.activated = true;
    trigger.acti_players = mask;
    true
}

fn plane_height(world: &dyn GameWorld, sector: SectorId, plane: SectorPlane) -> f32 {
    match plane {
        SectorPlane::Floor => world.floor_height(sector),
        SectorPlane::Ceiling => world.ceiling_height(sector),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{
        ConditionCheck, DeathCheck, HeightCheck, ScriptDef, SourceLocation,
    };
    use crate::testing::MockWorld;
    use std::sync::Arc;

    fn trigger(def: ScriptDef) -> TriggerInstance {
        TriggerInstance::new(Arc::new(def))
    }

    fn radius(x: f32, y: f32, r: f32) -> ScriptDef {
        ScriptDef::new(
            "MAP01",
            Spatial::Radius {
                x,
                y,
                radius: r,
                height: None,
            },
            SourceLocation::default(),
        )
    }

    #[test]
    fn test_radius_includes_player_radius() {
        let mut world = MockWorld::new();
        world.add_player(PlayerInfo::at(0, 70.0, 0.0));
        world.add_player(PlayerInfo::at(1, 90.0, 0.0));

        let mut t = trigger(radius(0.0, 0.0, 64.0));
        assert!(try_activate(&mut t, &world));
        assert_eq!(t.acti_players, PlayerMask::single(0));
    }

    #[test]
    fn test_negative_radius_is_everywhere() {
        let mut world = MockWorld::new();
        world.add_player(PlayerInfo::at(0, 9000.0, -9000.0));
        assert!(try_activate(&mut trigger(radius(0.0, 0.0, -1.0)), &world));
    }

    #[test]
    fn test_no_players_never_activates() {
        let world = MockWorld::new();
        let mut def = radius(0.0, 0.0, 64.0);
        def.immediate = true;
        let mut t = trigger(def);
        assert!(!try_activate(&mut t, &world));
        assert!(!t.activated);
    }

    #[test]
    fn test_rect_and_height_band() {
        let mut world = MockWorld::new();
        let mut high = PlayerInfo::at(0, 10.0, 10.0);
        high.z = 200.0;
        world.add_player(high);
        world.add_player(PlayerInfo::at(1, 10.0, 10.0));

        let def = ScriptDef::new(
            "MAP01",
            Spatial::Rect {
                x: 0.0,
                y: 0.0,
                half_x: 32.0,
                half_y: 32.0,
                height: Some(HeightBand::from_range(0.0, 64.0)),
            },
            SourceLocation::default(),
        );
        let mut t = trigger(def);
        assert_eq!(evaluate(&mut t, &world), PlayerMask::single(1));
    }

    #[test]
    fn test_immediate_skips_area() {
        let mut world = MockWorld::new();
        world.add_player(PlayerInfo::at(0, 5000.0, 5000.0));
        let mut def = radius(0.0, 0.0, 16.0);
        def.immediate = true;
        assert!(try_activate(&mut trigger(def), &world));
    }

    #[test]
    fn test_use_key() {
        let mut world = MockWorld::new();
        world.add_player(PlayerInfo::at(0, 0.0, 0.0));
        let mut def = radius(0.0, 0.0, 64.0);
        def.tagged_use = true;
        let mut t = trigger(def);
        assert!(!try_activate(&mut t, &world));

        world.players[0].use_pressed = true;
        assert!(try_activate(&mut t, &world));
    }

    #[test]
    fn test_death_check() {
        let mut world = MockWorld::new();
        world.add_player(PlayerInfo::at(0, 0.0, 0.0));
        let mut def = radius(0.0, 0.0, 64.0);
        def.death_checks.push(DeathCheck {
            thing_type: "CYBERDEMON".into(),
            threshold: 0,
        });
        let mut t = trigger(def);

        // Never seen
        assert!(!try_activate(&mut t, &world));
        world.set_living("CYBERDEMON", 1);
        assert!(!try_activate(&mut t, &world));
        world.set_living("CYBERDEMON", 0);
        assert!(try_activate(&mut t, &world));
    }

    #[test]
    fn test_height_check_caches_sector() {
        let mut world = MockWorld::new();
        world.add_player(PlayerInfo::at(0, 0.0, 0.0));
        world.add_sector(SectorId(7), 0.0, 128.0);

        let mut def = radius(0.0, 0.0, 64.0);
        def.height_checks.push(HeightCheck {
            z1: 32.0,
            z2: 64.0,
            sector: Some(7),
            plane: SectorPlane::Floor,
        });
        let mut t = trigger(def);
        assert!(!try_activate(&mut t, &world));
        assert_eq!(t.height_sectors, Some(vec![Some(SectorId(7))]));

        world.set_floor(SectorId(7), 48.0);
        assert!(try_activate(&mut t, &world));
    }

    #[test]
    fn test_custom_conditions() {
        let mut world = MockWorld::new();
        world.add_player(PlayerInfo::at(0, 0.0, 0.0));
        world.add_player(PlayerInfo::at(1, 0.0, 0.0));
        world.grant_condition(1, "JUMPING");

        let mut def = radius(0.0, 0.0, 64.0);
        def.conditions.push(ConditionCheck {
            name: "JUMPING".into(),
            amount: None,
            negate: false,
        });
        let mut t = trigger(def);
        assert!(try_activate(&mut t, &world));
        assert_eq!(t.acti_players, PlayerMask::single(1));
    }

    #[test]
    fn test_sector_tag_area() {
        let mut world = MockWorld::new();
        let mut p = PlayerInfo::at(0, 0.0, 0.0);
        p.sector_tag = 12;
        world.add_player(p);
        world.add_player(PlayerInfo::at(1, 0.0, 0.0));

        let def = ScriptDef::new(
            "MAP01",
            Spatial::SectorTag {
                tag: 12,
                height: None,
            },
            SourceLocation::default(),
        );
        assert_eq!(evaluate(&mut trigger(def), &world), PlayerMask::single(0));
    }
}
