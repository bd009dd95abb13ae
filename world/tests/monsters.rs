use std::time::Duration;

use merge_defence_core::{
    CellIndex, Command, Event, GameState, Grade, MonsterId, MonsterTemplateId, Side, UnitKind,
};
use merge_defence_world::{self as world, query, SimulationConfig, World};

const NORMAL: MonsterTemplateId = MonsterTemplateId::new(0);
const BOSS: MonsterTemplateId = MonsterTemplateId::new(1);

fn run(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

fn spawn(world: &mut World, side: Side, template: MonsterTemplateId) -> (MonsterId, f32, bool) {
    run(world, Command::SpawnMonster { side, template })
        .into_iter()
        .find_map(|event| match event {
            Event::MonsterSpawned {
                monster,
                hp_max,
                reused,
                ..
            } => Some((monster, hp_max, reused)),
            _ => None,
        })
        .expect("monster spawned")
}

#[test]
fn hit_points_scale_with_wave_level() {
    let mut world = World::new(SimulationConfig::default(), 1);
    let (_, base, _) = spawn(&mut world, Side::Player, NORMAL);
    assert!((base - 100.0).abs() < 1e-3);

    for _ in 0..10 {
        let _ = run(&mut world, Command::AdvanceWaveLevel);
    }
    assert_eq!(query::wave_status(&world).wave_level, 10);

    let (_, scaled, _) = spawn(&mut world, Side::Player, NORMAL);
    assert!((scaled - 100.0 * 1.1_f32.powi(10)).abs() < 0.05, "{scaled}");
    let (_, boss, _) = spawn(&mut world, Side::Opponent, BOSS);
    assert!((boss - 2_500.0 * 1.1_f32.powi(10)).abs() < 1.0, "{boss}");
}

#[test]
fn dead_monsters_are_recycled_after_the_death_delay() {
    let mut world = World::new(SimulationConfig::default(), 2);
    let (first, _, reused) = spawn(&mut world, Side::Player, NORMAL);
    assert!(!reused);

    let killed = run(
        &mut world,
        Command::HitMonster {
            monster: first,
            damage: 500.0,
        },
    );
    assert!(killed.contains(&Event::MonsterDied {
        monster: first,
        side: Side::Player,
        is_boss: false,
    }));
    assert!(query::monster(&world, first).is_none());

    // Still dying, so a second spawn needs a fresh slot.
    let (second, _, reused) = spawn(&mut world, Side::Player, NORMAL);
    assert_ne!(second, first);
    assert!(!reused);

    let ticked = run(
        &mut world,
        Command::Tick {
            dt: Duration::from_secs(1),
        },
    );
    assert!(ticked.contains(&Event::MonsterDeactivated { monster: first }));

    let (third, hp_max, reused) = spawn(&mut world, Side::Player, NORMAL);
    assert_eq!(third, first);
    assert!(reused);
    let revived = query::monster(&world, third).expect("walking again");
    assert!((revived.hp - hp_max).abs() < 1e-3);
    assert_eq!(query::pool_size(&world, Side::Player, NORMAL), 2);
    assert_eq!(query::pool_size(&world, Side::Opponent, NORMAL), 0);
}

#[test]
fn boss_kills_pay_both_purses_and_gems() {
    let mut world = World::new(SimulationConfig::default(), 3);
    let (boss, _, _) = spawn(&mut world, Side::Opponent, BOSS);
    assert_eq!(query::wave_status(&world).living_bosses, 1);

    let _ = run(
        &mut world,
        Command::HitMonster {
            monster: boss,
            damage: 1.0e6,
        },
    );
    let economy = query::economy(&world);
    assert_eq!(economy.player_gold, 150);
    assert_eq!(economy.opponent_gold, 150);
    assert_eq!(economy.gem, 2);
    assert_eq!(query::wave_status(&world).living_bosses, 0);
}

#[test]
fn monsters_walk_their_route_and_turn() {
    let mut world = World::new(SimulationConfig::default(), 4);
    let (monster, _, _) = spawn(&mut world, Side::Player, NORMAL);
    let start = query::monster(&world, monster).expect("monster").position;

    let mut events = Vec::new();
    for _ in 0..200 {
        world::apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(50),
            },
            &mut events,
        );
    }

    let moved = query::monster(&world, monster).expect("monster").position;
    assert!(moved.distance(start) > 0.0);
    assert!(events.iter().any(|event| matches!(
        event,
        Event::MonsterTurned { monster: turned, .. } if *turned == monster
    )));
    assert_eq!(query::tick_index(&world), 200);
}

#[test]
fn monster_count_tracks_spawns_and_kills() {
    let mut world = World::new(SimulationConfig::default(), 5);
    let (first, _, _) = spawn(&mut world, Side::Player, NORMAL);
    let _ = spawn(&mut world, Side::Opponent, NORMAL);
    assert_eq!(query::wave_status(&world).monster_count, 2);

    let events = run(
        &mut world,
        Command::HitMonster {
            monster: first,
            damage: 1_000.0,
        },
    );
    assert!(events.contains(&Event::MonsterCountChanged { count: 1, max: 100 }));
    assert_eq!(query::monster_view(&world).len(), 1);
}

#[test]
fn wave_commands_are_ignored_after_game_over() {
    let mut world = World::new(SimulationConfig::default(), 6);
    let _ = run(
        &mut world,
        Command::SetGameState {
            state: GameState::Wave,
        },
    );
    let _ = run(
        &mut world,
        Command::SetGameState {
            state: GameState::GameOver,
        },
    );

    assert!(run(&mut world, Command::AdvanceWaveLevel).is_empty());
    assert!(run(&mut world, Command::AnnounceWaveTime { seconds: 3 }).is_empty());
    assert!(run(&mut world, Command::StartNextWaveCountdown).is_empty());
    assert_eq!(query::game_state(&world), GameState::GameOver);
}

#[test]
fn partial_toml_overrides_keep_defaults() {
    let config: SimulationConfig = toml::from_str(
        r#"
        [economy]
        player_gold = 250
        unit_cap = 12

        [monsters]
        hp_growth = 1.25
        "#,
    )
    .expect("config parses");

    assert_eq!(config.economy.player_gold, 250);
    assert_eq!(config.economy.unit_cap, 12);
    assert_eq!(config.economy.opponent_gold, 100);
    assert!((config.monsters.hp_growth - 1.25).abs() < f32::EPSILON);
    assert_eq!(config.monsters.templates.len(), 2);

    let world = World::new(config, 7);
    assert_eq!(query::economy(&world).player_gold, 250);
}

#[test]
fn extreme_motion_tuning_saturates_durations() {
    let config: SimulationConfig = toml::from_str(
        r#"
        [motion]
        swap_speed = 1e-38
        summon_flight_seconds = 1e30
        "#,
    )
    .expect("config parses");
    let mut world = World::new(config, 7);
    for kind in [UnitKind::NORMAL_ARCHER, UnitKind::NORMAL_WARRIOR] {
        let _ = run(
            &mut world,
            Command::PlaceUnit {
                side: Side::Player,
                kind,
            },
        );
    }

    let swapped = run(
        &mut world,
        Command::SwapCells {
            side: Side::Player,
            first: CellIndex::new(0),
            second: CellIndex::new(1),
        },
    );
    assert_eq!(
        swapped,
        vec![Event::CellsSwapped {
            side: Side::Player,
            first: CellIndex::new(0),
            second: CellIndex::new(1),
            into_first: Duration::MAX,
            into_second: Duration::MAX,
        }]
    );

    let summoned = run(
        &mut world,
        Command::Summon {
            side: Side::Player,
            grade: Grade::Normal,
        },
    );
    assert!(summoned.iter().any(|event| matches!(
        event,
        Event::SummonLaunched { duration, .. } if *duration == Duration::MAX
    )));
}
