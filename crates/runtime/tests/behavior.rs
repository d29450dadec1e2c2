//! Decision engine scenarios driven through `Session::tick`.

mod common;

use common::{ARCHER, BRUTE, Fixture, GOBLIN, LURKER, SKULKER, room};
use game_core::{
    Action, ActorKind, ActorState, DeathCause, Position, SimConfig, TerrainKind, Tick,
    VisibilityGrid,
};
use runtime::LevelSetup;

// ============================================================================
// Movement
// ============================================================================

#[test]
fn aggressive_enemy_steps_onto_the_open_cell_between() {
    let mut fx = Fixture::new(room(12, 12), Position::new(5, 7));
    let goblin = fx.enemy(GOBLIN, Position::new(5, 5));
    let mut session = fx.session();

    let report = session.tick(Tick(0)).unwrap();

    assert_eq!(
        report.action_of(goblin),
        Some(Action::Move {
            to: Position::new(5, 6)
        })
    );
    assert_eq!(
        session.state().actor(goblin).unwrap().position,
        Position::new(5, 6)
    );
    assert!(session.occupants(Position::new(5, 5)).is_empty());
    assert!(session.state().verify().is_ok());
}

#[test]
fn chest_on_the_step_is_walked_around() {
    // A* with flocking, then the greedy axis step alone.
    for radius in [SimConfig::DEFAULT_PATHFINDING_RADIUS, 0] {
        let config = SimConfig::default().with_pathfinding_radius(radius);
        let mut fx = Fixture::new(room(12, 12), Position::new(6, 8)).with_config(config);
        let chest = fx.actor(ActorState::new(ActorKind::Chest, Position::new(5, 6)));
        let goblin = fx.enemy(GOBLIN, Position::new(5, 5));
        let mut session = fx.session();

        let report = session.tick(Tick(0)).unwrap();

        assert_eq!(
            report.action_of(goblin),
            Some(Action::Move {
                to: Position::new(6, 5)
            }),
            "pathfinding radius {radius}"
        );
        assert_eq!(
            session.state().actor(chest).unwrap().position,
            Position::new(5, 6)
        );
        assert!(session.state().verify().is_ok());
    }
}

#[test]
fn adjacent_enemy_attacks_instead_of_moving() {
    let mut fx = Fixture::new(room(12, 12), Position::new(5, 6));
    let goblin = fx.enemy(GOBLIN, Position::new(5, 5));
    let mut session = fx.session();

    let report = session.tick(Tick(0)).unwrap();

    assert_eq!(report.action_of(goblin), Some(Action::melee()));
    assert_eq!(report.player_damage, 4);
    assert!(!report.player_died);
    let player = session.state().player().unwrap();
    assert_eq!(player.combat.unwrap().health.current, 96);
}

#[test]
fn cumulative_damage_kills_the_player() {
    let mut fx = Fixture::new(room(12, 12), Position::new(5, 5));
    fx.entities
        .set_player(ActorState::player(Position::new(5, 5), 6));
    fx.enemy(GOBLIN, Position::new(5, 4));
    fx.enemy(GOBLIN, Position::new(5, 6));
    let mut session = fx.session();

    let report = session.tick(Tick(0)).unwrap();

    assert_eq!(report.player_damage, 8);
    assert!(report.player_died);
}

// ============================================================================
// Culling and scheduling
// ============================================================================

#[test]
fn activation_radius_is_inclusive() {
    let config = SimConfig::default().with_activation_radius(10);
    let mut fx = Fixture::new(room(30, 5), Position::new(1, 2)).with_config(config);
    let at_radius = fx.enemy(GOBLIN, Position::new(11, 2));
    let beyond = fx.enemy(GOBLIN, Position::new(12, 2));
    let mut session = fx.session();

    let report = session.tick(Tick(0)).unwrap();

    assert_eq!(
        report.action_of(at_radius),
        Some(Action::Move {
            to: Position::new(10, 2)
        })
    );
    assert_eq!(report.action_of(beyond), Some(Action::Sleep));
}

#[test]
fn culled_actors_still_reset_their_clock() {
    let config = SimConfig::default().with_activation_radius(3);
    let mut fx = Fixture::new(room(20, 5), Position::new(1, 2)).with_config(config);
    let far = fx.enemy(GOBLIN, Position::new(15, 2));
    let mut session = fx.session();

    assert_eq!(
        session.tick(Tick(0)).unwrap().action_of(far),
        Some(Action::Sleep)
    );
    assert_eq!(session.tick(Tick(100)).unwrap().action_of(far), None);
    assert_eq!(
        session.tick(Tick(350)).unwrap().action_of(far),
        Some(Action::Sleep)
    );
}

#[test]
fn actors_wait_out_their_interval() {
    let mut fx = Fixture::new(room(12, 12), Position::new(5, 9));
    let goblin = fx.enemy(GOBLIN, Position::new(5, 3));
    let mut session = fx.session();

    assert!(session.tick(Tick(0)).unwrap().action_of(goblin).is_some());
    assert!(session.tick(Tick(349)).unwrap().action_of(goblin).is_none());
    assert!(session.tick(Tick(350)).unwrap().action_of(goblin).is_some());
}

#[test]
fn actors_are_processed_in_canonical_order() {
    let mut fx = Fixture::new(room(12, 12), Position::new(5, 5));
    let first = fx.enemy(GOBLIN, Position::new(9, 9));
    let second = fx.enemy(GOBLIN, Position::new(1, 1));
    let third = fx.enemy(GOBLIN, Position::new(5, 1));
    let mut session = fx.session();

    let report = session.tick(Tick(0)).unwrap();
    let order: Vec<_> = report.actions.iter().map(|p| p.actor).collect();
    assert_eq!(order, vec![first, second, third]);
}

// ============================================================================
// Status gate
// ============================================================================

#[test]
fn stun_skips_exactly_one_turn() {
    let mut fx = Fixture::new(room(12, 12), Position::new(5, 9));
    let mut goblin = fx.spawn_template(GOBLIN, Position::new(5, 3));
    goblin.combat.as_mut().unwrap().stunned = 1;
    let id = fx.actor(goblin);
    let mut session = fx.session();

    assert_eq!(
        session.tick(Tick(0)).unwrap().action_of(id),
        Some(Action::Stunned)
    );
    assert_eq!(session.state().actor(id).unwrap().combat.unwrap().stunned, 0);
    assert!(matches!(
        session.tick(Tick(350)).unwrap().action_of(id),
        Some(Action::Move { .. })
    ));
}

#[test]
fn slowed_actor_alternates_skip_and_act() {
    let mut fx = Fixture::new(room(12, 12), Position::new(5, 10));
    let mut goblin = fx.spawn_template(GOBLIN, Position::new(5, 1));
    goblin.combat.as_mut().unwrap().slowed = 2;
    let id = fx.actor(goblin);
    let mut session = fx.session();

    let actions: Vec<_> = [0, 350, 700]
        .into_iter()
        .map(|now| session.tick(Tick(now)).unwrap().action_of(id))
        .collect();

    assert_eq!(actions[0], Some(Action::Slowed));
    assert!(matches!(actions[1], Some(Action::Move { .. })));
    assert!(matches!(actions[2], Some(Action::Move { .. })));
}

#[test]
fn poison_death_deregisters_before_later_actors() {
    let mut fx = Fixture::new(room(12, 12), Position::new(5, 9));
    let mut victim = fx.spawn_template(GOBLIN, Position::new(5, 3));
    {
        let combat = victim.combat.as_mut().unwrap();
        combat.poisoned = 2;
        combat.health.current = 3;
    }
    let victim = fx.actor(victim);
    let mut session = fx.session();

    let report = session.tick(Tick(0)).unwrap();

    assert_eq!(
        report.action_of(victim),
        Some(Action::Died {
            cause: DeathCause::Poison
        })
    );
    assert_eq!(report.removed, vec![victim]);
    assert!(session.state().actor(victim).is_none());
    assert!(session.occupants(Position::new(5, 3)).is_empty());
    assert!(session.state().verify().is_ok());
}

#[test]
fn poison_that_does_not_kill_still_lets_the_actor_act() {
    let mut fx = Fixture::new(room(12, 12), Position::new(5, 9));
    let mut goblin = fx.spawn_template(GOBLIN, Position::new(5, 3));
    {
        let combat = goblin.combat.as_mut().unwrap();
        combat.poisoned = 1;
        combat.poison_damage = 5;
    }
    let id = fx.actor(goblin);
    let mut session = fx.session();

    let report = session.tick(Tick(0)).unwrap();

    assert!(matches!(report.action_of(id), Some(Action::Move { .. })));
    let combat = session.state().actor(id).unwrap().combat.unwrap();
    assert_eq!(combat.health.current, 7);
    assert_eq!(combat.poisoned, 0);
}

// ============================================================================
// Evasion and profiles
// ============================================================================

#[test]
fn invisible_player_makes_enemies_wander() {
    let mut fx = Fixture::new(room(12, 12), Position::new(5, 5));
    let goblin = fx.enemy(GOBLIN, Position::new(5, 8));
    let mut session = fx.session();
    session.set_player_invisible(true).unwrap();

    let report = session.tick(Tick(0)).unwrap();

    match report.action_of(goblin) {
        Some(Action::Wander { to }) => assert_eq!(to.manhattan(Position::new(5, 8)), 1),
        other => panic!("expected a wander step, got {other:?}"),
    }
}

#[test]
fn boxed_in_enemy_is_confused_while_player_is_invisible() {
    let mut map = room(12, 12);
    for cell in Position::new(5, 8).cardinal_neighbors() {
        map.set_tile(cell, TerrainKind::Wall).unwrap();
    }
    let mut fx = Fixture::new(map, Position::new(2, 2));
    let goblin = fx.enemy(GOBLIN, Position::new(5, 8));
    let mut session = fx.session();
    session.set_player_invisible(true).unwrap();

    let report = session.tick(Tick(0)).unwrap();
    assert_eq!(report.action_of(goblin), Some(Action::WaitConfused));
}

#[test]
fn ambusher_waits_until_the_player_is_close() {
    let mut fx = Fixture::new(room(14, 5), Position::new(2, 2));
    let lurker = fx.enemy(LURKER, Position::new(8, 2));
    let mut session = fx.session();

    assert_eq!(
        session.tick(Tick(0)).unwrap().action_of(lurker),
        Some(Action::Wait)
    );

    session.move_player(Position::new(4, 2)).unwrap();
    assert_eq!(
        session.tick(Tick(350)).unwrap().action_of(lurker),
        Some(Action::Move {
            to: Position::new(7, 2)
        })
    );
}

#[test]
fn cautious_enemy_backs_off_when_too_close() {
    let mut fx = Fixture::new(room(12, 12), Position::new(5, 5));
    let skulker = fx.enemy(SKULKER, Position::new(5, 7));
    let mut session = fx.session();

    assert_eq!(
        session.tick(Tick(0)).unwrap().action_of(skulker),
        Some(Action::Move {
            to: Position::new(5, 8)
        })
    );
}

#[test]
fn archer_shoots_with_clear_sight() {
    let mut fx = Fixture::new(room(12, 12), Position::new(2, 5));
    let archer = fx.enemy(ARCHER, Position::new(6, 5));
    let mut session = fx.session();

    let report = session.tick(Tick(0)).unwrap();

    assert_eq!(
        report.action_of(archer),
        Some(Action::RangedAttack {
            range: 5,
            power_pct: 70
        })
    );
    assert_eq!(report.player_damage, 2);
}

#[test]
fn walls_block_the_shot() {
    let mut map = room(12, 12);
    map.set_tile(Position::new(4, 5), TerrainKind::Wall).unwrap();
    let mut fx = Fixture::new(map, Position::new(2, 5));
    let archer = fx.enemy(ARCHER, Position::new(6, 5));
    let mut session = fx.session();

    let report = session.tick(Tick(0)).unwrap();

    assert!(matches!(report.action_of(archer), Some(Action::Move { .. })));
    assert_eq!(report.player_damage, 0);
}

#[test]
fn cautious_enemy_may_retreat_inside_the_band() {
    for (pct, expected) in [
        (100, Action::Move {
            to: Position::new(5, 1),
        }),
        (0, Action::Wait),
    ] {
        let config = SimConfig {
            retreat_chance_pct: pct,
            ..SimConfig::default()
        };
        let mut fx = Fixture::new(room(12, 12), Position::new(5, 5)).with_config(config);
        let skulker = fx.enemy(SKULKER, Position::new(5, 2));
        let mut session = fx.session();

        assert_eq!(
            session.tick(Tick(0)).unwrap().action_of(skulker),
            Some(expected),
            "retreat chance {pct}"
        );
    }
}

#[test]
fn cautious_enemy_holds_its_band() {
    let config = SimConfig {
        strafe_chance_pct: 0,
        ..SimConfig::default()
    };
    let mut fx = Fixture::new(room(12, 12), Position::new(5, 5)).with_config(config);
    let skulker = fx.enemy(SKULKER, Position::new(5, 1));
    let mut session = fx.session();

    let report = session.tick(Tick(0)).unwrap();

    assert_eq!(report.action_of(skulker), Some(Action::Wait));
    assert_eq!(report.player_damage, 0);
}

#[test]
fn cautious_enemy_strafes_sideways_in_its_band() {
    let config = SimConfig {
        strafe_chance_pct: 100,
        ..SimConfig::default()
    };
    let mut fx = Fixture::new(room(12, 12), Position::new(5, 5)).with_config(config);
    let skulker = fx.enemy(SKULKER, Position::new(5, 1));
    let mut session = fx.session();

    let report = session.tick(Tick(0)).unwrap();

    let Some(Action::Move { to }) = report.action_of(skulker) else {
        panic!("expected a strafe, got {:?}", report.action_of(skulker));
    };
    assert!(
        to == Position::new(4, 1) || to == Position::new(6, 1),
        "strafed to {to}"
    );
    assert_eq!(to.manhattan(Position::new(5, 5)), 5);
}

#[test]
fn melee_preferring_shooter_closes_in_at_short_range() {
    let config = SimConfig {
        melee_preference_shot_pct: 0,
        ..SimConfig::default()
    };
    let mut fx = Fixture::new(room(12, 12), Position::new(5, 5)).with_config(config);
    let near = fx.enemy(BRUTE, Position::new(5, 3));
    let far = fx.enemy(BRUTE, Position::new(1, 5));
    let mut session = fx.session();

    let report = session.tick(Tick(0)).unwrap();

    assert_eq!(
        report.action_of(near),
        Some(Action::Move {
            to: Position::new(5, 4)
        })
    );
    // Beyond the close band the shot is not gated.
    assert_eq!(
        report.action_of(far),
        Some(Action::RangedAttack {
            range: 5,
            power_pct: 70
        })
    );
    assert_eq!(report.player_damage, 3);
}

#[test]
fn melee_preferring_shooter_sometimes_fires_point_blank() {
    let config = SimConfig {
        melee_preference_shot_pct: 100,
        ..SimConfig::default()
    };
    let mut fx = Fixture::new(room(12, 12), Position::new(5, 5)).with_config(config);
    let thrower = fx.enemy(BRUTE, Position::new(5, 3));
    let mut session = fx.session();

    let report = session.tick(Tick(0)).unwrap();

    assert_eq!(
        report.action_of(thrower),
        Some(Action::RangedAttack {
            range: 5,
            power_pct: 70
        })
    );
    assert_eq!(report.player_damage, 3);
}

// ============================================================================
// Level loading
// ============================================================================

#[test]
fn level_load_discards_a_supplied_visibility_grid() {
    let fx = Fixture::new(room(12, 12), Position::new(5, 5));
    let mut session = fx.session();
    let dimensions = session.visibility().dimensions();
    session.set_visibility(VisibilityGrid::hidden(dimensions));
    assert!(!session.visibility().is_visible(Position::new(5, 5)));

    let mut next = Fixture::new(room(12, 12), Position::new(2, 2));
    next.enemy(GOBLIN, Position::new(2, 6));
    session.load_level(LevelSetup::new(next.map, next.entities, 3));

    assert_eq!(session.visibility().dimensions(), dimensions);
    assert!(session.visibility().is_visible(Position::new(2, 2)));
    assert!(session.visibility().is_visible(Position::new(2, 6)));

    assert!(!session.visibility().is_visible(Position::new(3, 10)));
    session.move_player(Position::new(3, 2)).unwrap();
    assert!(session.visibility().is_visible(Position::new(3, 10)));
}
