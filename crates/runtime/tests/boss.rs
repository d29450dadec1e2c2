//! Boss ability clock, rage and summoning.

mod common;

use common::{Fixture, GOBLIN, KING, SHAMAN, room};
use game_core::{Action, BossState, Position, SimConfig, TerrainKind, Tick};
use runtime::BossController;

fn boss_fixture() -> Fixture {
    Fixture::new(room(14, 14), Position::new(2, 2))
}

#[test]
fn first_summon_waits_out_the_warmup() {
    let mut fx = boss_fixture();
    let king = fx.enemy(KING, Position::new(9, 9));
    let mut session = fx.session();

    let report = session.tick(Tick(0)).unwrap();
    assert_eq!(
        report.action_of(king),
        Some(Action::Move {
            to: Position::new(9, 8)
        })
    );
    assert_eq!(
        session.state().actor(king).unwrap().boss,
        Some(BossState {
            last_summon: Some(Tick(0)),
            summons: 0,
        })
    );

    let report = session.tick(Tick(1_800)).unwrap();
    assert!(matches!(report.action_of(king), Some(Action::Move { .. })));
    assert!(report.spawned.is_empty());

    let report = session.tick(Tick(2_250)).unwrap();
    assert_eq!(report.action_of(king), Some(Action::SpecialSummon));
    assert_eq!(report.spawned.len(), 1);

    let minion = session.state().actor(report.spawned[0]).unwrap();
    assert_eq!(minion.enemy_type, Some(GOBLIN));
    let king_at = session.state().actor(king).unwrap().position;
    assert_eq!(minion.position.chebyshev(king_at), 1);
    assert_eq!(minion.clock.not_before, Some(Tick(3_250)));
    assert_eq!(
        session.state().actor(king).unwrap().boss,
        Some(BossState {
            last_summon: Some(Tick(2_250)),
            summons: 1,
        })
    );
    assert!(session.state().verify().is_ok());
}

#[test]
fn summoned_minions_sit_out_their_sickness() {
    let mut fx = boss_fixture();
    let king = fx.enemy(KING, Position::new(9, 9));
    let mut session = fx.session();

    session.tick(Tick(0)).unwrap();
    let minion = session.tick(Tick(2_000)).unwrap().spawned[0];
    assert_eq!(session.state().actor(king).unwrap().boss.unwrap().summons, 1);

    assert_eq!(session.tick(Tick(2_450)).unwrap().action_of(minion), None);
    assert_eq!(session.tick(Tick(2_999)).unwrap().action_of(minion), None);
    assert!(session.tick(Tick(3_000)).unwrap().action_of(minion).is_some());
}

#[test]
fn cooldown_shrinks_once_enraged() {
    let config = SimConfig::default();
    let mut fx = boss_fixture();
    let mut king = fx.spawn_template(KING, Position::new(9, 9));
    king.boss = Some(BossState {
        last_summon: Some(Tick(0)),
        summons: 1,
    });
    king.combat.as_mut().unwrap().health.current = 35;
    assert!(!BossController::is_enraged(&king, &config));
    assert_eq!(BossController::summon_wait(&king, &config), 12_000);
    assert!(!BossController::summon_ready(&king, &config, Tick(8_000)));

    let id = fx.actor(king);
    let mut session = fx.session();

    let report = session.tick(Tick(8_000)).unwrap();
    assert_ne!(report.action_of(id), Some(Action::SpecialSummon));

    session.damage_actor(id, 10).unwrap();
    let king = session.state().actor(id).unwrap();
    assert!(BossController::is_enraged(king, &config));
    assert_eq!(BossController::summon_wait(king, &config), 8_000);

    let report = session.tick(Tick(8_450)).unwrap();
    assert_eq!(report.action_of(id), Some(Action::SpecialSummon));
    assert_eq!(report.spawned.len(), 2);
    for &minion in &report.spawned {
        let minion = session.state().actor(minion).unwrap();
        assert_eq!(minion.clock.not_before, Some(Tick(9_450)));
    }
    assert!(session.state().verify().is_ok());
}

#[test]
fn failed_summon_keeps_the_clock() {
    let mut map = room(14, 14);
    for cell in Position::new(5, 5).ring_neighbors() {
        map.set_tile(cell, TerrainKind::Wall).unwrap();
    }
    let mut fx = Fixture::new(map, Position::new(2, 2));
    let mut king = fx.spawn_template(KING, Position::new(5, 5));
    king.boss = Some(BossState {
        last_summon: Some(Tick(0)),
        summons: 1,
    });
    let id = fx.actor(king);
    let mut session = fx.session();

    let report = session.tick(Tick(12_000)).unwrap();

    assert_eq!(report.action_of(id), Some(Action::Wait));
    assert!(report.spawned.is_empty());
    assert_eq!(
        session.state().actor(id).unwrap().boss,
        Some(BossState {
            last_summon: Some(Tick(0)),
            summons: 1,
        })
    );
}

#[test]
fn lethal_damage_removes_the_boss() {
    let mut fx = boss_fixture();
    let king = fx.enemy(KING, Position::new(9, 9));
    let mut session = fx.session();

    assert!(session.damage_actor(king, 50).unwrap().is_none());
    let removed = session.damage_actor(king, 50).unwrap();
    assert_eq!(removed.map(|actor| actor.id), Some(king));
    assert!(session.state().actor(king).is_none());
    assert!(session.occupants(Position::new(9, 9)).is_empty());
}

#[test]
fn turn_mode_counts_ability_timers_in_turns() {
    let config = SimConfig::default().with_scheduler_mode(game_core::SchedulerMode::Turn);
    let fx = boss_fixture();
    let mut king = fx.spawn_template(KING, Position::new(9, 9));
    assert_eq!(BossController::summon_wait(&king, &config), 6);

    king.boss = Some(BossState {
        last_summon: Some(Tick(10)),
        summons: 1,
    });
    assert_eq!(BossController::summon_wait(&king, &config), 35);
    assert!(!BossController::summon_ready(&king, &config, Tick(44)));
    assert!(BossController::summon_ready(&king, &config, Tick(45)));
}

#[test]
fn enraged_boss_hits_harder() {
    let mut fx = Fixture::new(room(12, 12), Position::new(5, 5));
    let mut king = fx.spawn_template(KING, Position::new(5, 6));
    king.combat.as_mut().unwrap().health.current = 25;
    let id = fx.actor(king);
    let mut session = fx.session();

    let report = session.tick(Tick(0)).unwrap();

    assert_eq!(
        report.action_of(id),
        Some(Action::MeleeAttack { power_pct: 150 })
    );
    assert_eq!(report.player_damage, 15);
    let player = session.state().player().unwrap();
    assert_eq!(player.combat.unwrap().health.current, 85);
}

#[test]
fn calm_boss_hits_at_full_power() {
    let mut fx = Fixture::new(room(12, 12), Position::new(5, 5));
    let king = fx.enemy(KING, Position::new(5, 6));
    let mut session = fx.session();

    let report = session.tick(Tick(0)).unwrap();

    assert_eq!(report.action_of(king), Some(Action::melee()));
    assert_eq!(report.player_damage, 10);
}

#[test]
fn boss_feints_at_close_range() {
    for (pct, to) in [(100, Position::new(5, 8)), (0, Position::new(5, 6))] {
        let config = SimConfig {
            feint_chance_pct: pct,
            ..SimConfig::default()
        };
        let mut fx = Fixture::new(room(12, 12), Position::new(5, 5)).with_config(config);
        let king = fx.enemy(KING, Position::new(5, 7));
        let mut session = fx.session();

        assert_eq!(
            session.tick(Tick(0)).unwrap().action_of(king),
            Some(Action::Move { to }),
            "feint chance {pct}"
        );
    }
}

#[test]
fn caster_boss_backs_away_without_a_shot() {
    let mut map = room(12, 12);
    map.set_tile(Position::new(5, 6), TerrainKind::Wall).unwrap();
    let mut fx = Fixture::new(map, Position::new(5, 5));
    let shaman = fx.enemy(SHAMAN, Position::new(5, 7));
    let mut session = fx.session();

    let report = session.tick(Tick(0)).unwrap();

    assert_eq!(
        report.action_of(shaman),
        Some(Action::Move {
            to: Position::new(5, 8)
        })
    );
    assert_eq!(report.player_damage, 0);
}

#[test]
fn caster_boss_shoots_with_clear_sight() {
    let config = SimConfig {
        caster_shot_pct: 100,
        ..SimConfig::default()
    };
    let mut fx = Fixture::new(room(12, 12), Position::new(2, 5)).with_config(config);
    let shaman = fx.enemy(SHAMAN, Position::new(6, 5));
    let mut session = fx.session();

    let report = session.tick(Tick(0)).unwrap();

    assert_eq!(
        report.action_of(shaman),
        Some(Action::RangedAttack {
            range: 6,
            power_pct: 70
        })
    );
    assert_eq!(report.player_damage, 7);
}

#[test]
fn caster_boss_circles_at_its_preferred_range() {
    let config = SimConfig {
        caster_shot_pct: 0,
        ..SimConfig::default()
    };
    let mut fx = Fixture::new(room(12, 12), Position::new(2, 5)).with_config(config);
    let shaman = fx.enemy(SHAMAN, Position::new(6, 5));
    let mut session = fx.session();

    let report = session.tick(Tick(0)).unwrap();

    let Some(Action::Move { to }) = report.action_of(shaman) else {
        panic!("expected a sidestep, got {:?}", report.action_of(shaman));
    };
    assert!(
        to == Position::new(6, 4) || to == Position::new(6, 6),
        "moved to {to}"
    );
    assert_eq!(report.player_damage, 0);
}
