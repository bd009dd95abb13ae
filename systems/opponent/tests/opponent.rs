use std::time::Duration;

use merge_defence_core::{Command, Event, GameState, Grade, Side, UnitKind};
use merge_defence_system_opponent::{Config, Opponent};
use merge_defence_world::{self as world, config::EconomyConfig, query, SimulationConfig, World};

const FRAME: Duration = Duration::from_millis(100);

fn frame(world: &mut World, opponent: &mut Opponent) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt: FRAME }, &mut events);

    let mut commands = Vec::new();
    opponent.handle(
        &events,
        query::game_state(world),
        &query::grid_view(world, opponent.side()),
        &mut commands,
    );
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn rich_world() -> World {
    World::new(
        SimulationConfig {
            economy: EconomyConfig {
                opponent_gold: 10_000,
                player_gold: 10_000,
                ..EconomyConfig::default()
            },
            ..SimulationConfig::default()
        },
        77,
    )
}

#[test]
fn summons_on_its_cadence() {
    let mut world = rich_world();
    let mut opponent = Opponent::new(Config::default());

    let mut summons = 0;
    for _ in 0..26 {
        summons += frame(&mut world, &mut opponent)
            .iter()
            .filter(|event| {
                matches!(
                    event,
                    Event::SummonLaunched {
                        side: Side::Opponent,
                        ..
                    }
                )
            })
            .count();
    }

    // Nothing to combine, so the combine step falls through and summons every second.
    assert_eq!(summons, 3);
    assert_eq!(query::unit_count(&world, Side::Opponent), 3);
    assert_eq!(query::unit_count(&world, Side::Player), 0);
}

#[test]
fn promotes_full_stacks_through_the_world() {
    let mut world = rich_world();
    let mut events = Vec::new();
    for _ in 0..3 {
        world::apply(
            &mut world,
            Command::PlaceUnit {
                side: Side::Opponent,
                kind: UnitKind::NORMAL_ARCHER,
            },
            &mut events,
        );
    }
    let mut opponent = Opponent::new(Config::default());

    let mut promoted = None;
    for _ in 0..10 {
        for event in frame(&mut world, &mut opponent) {
            if let Event::StackPromoted { produced, .. } = event {
                promoted = Some(produced);
            }
        }
    }

    assert_eq!(promoted.map(|kind| kind.grade()), Some(Grade::Rare));
}

#[test]
fn warrior_recipe_yields_epic_warrior() {
    let mut world = rich_world();
    let mut events = Vec::new();
    for kind in [
        UnitKind::HERO_WARRIOR,
        UnitKind::RARE_ARCHER,
        UnitKind::RARE_WARRIOR,
    ] {
        world::apply(
            &mut world,
            Command::PlaceUnit {
                side: Side::Opponent,
                kind,
            },
            &mut events,
        );
    }
    let mut opponent = Opponent::new(Config::default());

    let mut combined = Vec::new();
    for _ in 0..15 {
        for event in frame(&mut world, &mut opponent) {
            if let Event::UnitPlaced { kind, .. } = event {
                if kind.grade() == Grade::Epic {
                    combined.push(kind);
                }
            }
        }
    }

    assert_eq!(combined, vec![UnitKind::EPIC_WARRIOR]);
}

#[test]
fn autoplay_drives_the_player_board() {
    let mut world = rich_world();
    let mut opponent = Opponent::new(Config::new(Side::Player, Duration::from_millis(500)));

    let mut launched = 0;
    for _ in 0..60 {
        launched += frame(&mut world, &mut opponent)
            .iter()
            .filter(|event| matches!(event, Event::SummonLaunched { side: Side::Player, .. }))
            .count();
    }

    assert_eq!(launched, 6);
    assert!(query::unit_count(&world, Side::Player) > 0);
    assert_eq!(query::unit_count(&world, Side::Opponent), 0);
    assert!(query::economy(&world).player_gold < 10_000);
}

#[test]
fn stops_after_game_over() {
    let mut world = rich_world();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SetGameState {
            state: GameState::GameOver,
        },
        &mut events,
    );
    let mut opponent = Opponent::new(Config::default());

    for _ in 0..20 {
        let _ = frame(&mut world, &mut opponent);
    }
    assert_eq!(query::unit_count(&world, Side::Opponent), 0);
}
