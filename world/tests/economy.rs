use merge_defence_core::{
    Command, Event, GambleError, GambleTier, Grade, PurchaseError, Side, SummonError, UnitKind,
    UpgradeTier,
};
use merge_defence_world::{
    self as world,
    config::{EconomyConfig, GambleOdds, SimulationConfig},
    query, World,
};

fn world_with(economy: EconomyConfig) -> World {
    World::new(
        SimulationConfig {
            economy,
            ..SimulationConfig::default()
        },
        0x0bad_5eed,
    )
}

fn run(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

#[test]
fn summon_with_nineteen_gold_changes_nothing() {
    let mut world = world_with(EconomyConfig {
        player_gold: 19,
        ..EconomyConfig::default()
    });

    let events = run(
        &mut world,
        Command::Summon {
            side: Side::Player,
            grade: Grade::Normal,
        },
    );

    assert_eq!(
        events,
        vec![Event::SummonRejected {
            side: Side::Player,
            reason: SummonError::InsufficientGold {
                price: 20,
                available: 19,
            },
        }]
    );
    let economy = query::economy(&world);
    assert_eq!(economy.player_gold, 19);
    assert_eq!(economy.player_summon_price, 20);
    assert_eq!(query::unit_count(&world, Side::Player), 0);
}

#[test]
fn summon_respects_the_unit_cap() {
    let mut world = world_with(EconomyConfig {
        player_gold: 1_000,
        ..EconomyConfig::default()
    });
    for _ in 0..20 {
        let _ = run(
            &mut world,
            Command::PlaceUnit {
                side: Side::Player,
                kind: UnitKind::HERO_WARRIOR,
            },
        );
    }

    let events = run(
        &mut world,
        Command::Summon {
            side: Side::Player,
            grade: Grade::Normal,
        },
    );
    assert_eq!(
        events,
        vec![Event::SummonRejected {
            side: Side::Player,
            reason: SummonError::UnitCapReached { cap: 20 },
        }]
    );
    assert_eq!(query::economy(&world).player_gold, 1_000);
}

#[test]
fn summon_on_a_full_board_keeps_gold_and_price() {
    let mut world = world_with(EconomyConfig {
        unit_cap: 100,
        ..EconomyConfig::default()
    });
    for _ in 0..54 {
        let _ = run(
            &mut world,
            Command::PlaceUnit {
                side: Side::Player,
                kind: UnitKind::EPIC_MAGICIAN,
            },
        );
    }
    assert_eq!(query::unit_count(&world, Side::Player), 54);

    let events = run(
        &mut world,
        Command::Summon {
            side: Side::Player,
            grade: Grade::Normal,
        },
    );
    assert_eq!(
        events,
        vec![Event::SummonRejected {
            side: Side::Player,
            reason: SummonError::NoFreeCell,
        }]
    );
    let economy = query::economy(&world);
    assert_eq!(economy.player_gold, 100);
    assert_eq!(economy.player_summon_price, 20);
}

#[test]
fn summon_price_escalates_until_gold_runs_out() {
    let mut world = world_with(EconomyConfig::default());
    let mut spent = 0;
    loop {
        let events = run(
            &mut world,
            Command::Summon {
                side: Side::Opponent,
                grade: Grade::Normal,
            },
        );
        if events
            .iter()
            .any(|event| matches!(event, Event::SummonRejected { .. }))
        {
            break;
        }
        spent += 1;
    }

    // 20 + 22 + 24 + 26 leaves 8 gold, short of the fifth price of 28.
    assert_eq!(spent, 4);
    let economy = query::economy(&world);
    assert_eq!(economy.opponent_gold, 100 - 20 - 22 - 24 - 26);
    assert_eq!(economy.player_gold, 100);
    assert_eq!(query::unit_count(&world, Side::Opponent), 4);
    assert!(query::grid_view(&world, Side::Opponent)
        .iter()
        .filter_map(|stack| stack.kind)
        .all(|kind| kind.grade() == Grade::Normal));
}

#[test]
fn upgrade_purchase_raises_dealt_damage() {
    let mut world = world_with(EconomyConfig::default());
    let _ = run(
        &mut world,
        Command::PlaceUnit {
            side: Side::Player,
            kind: UnitKind::NORMAL_ARCHER,
        },
    );
    let before = query::unit_view(&world)
        .iter()
        .next()
        .map(|unit| unit.damage)
        .expect("unit");

    let events = run(
        &mut world,
        Command::PurchaseUpgrade {
            tier: UpgradeTier::Rare,
        },
    );
    assert_eq!(
        events,
        vec![
            Event::GoldChanged {
                side: Side::Player,
                amount: 70,
            },
            Event::UpgradeLevelChanged {
                tier: UpgradeTier::Rare,
                level: 2,
            },
        ]
    );

    let after = query::unit_view(&world)
        .iter()
        .next()
        .map(|unit| unit.damage)
        .expect("unit");
    assert!((after - before * 2.0).abs() < 1e-4);
    assert_eq!(query::economy(&world).upgrade_level(UpgradeTier::Hero), 1);
}

#[test]
fn epic_upgrade_needs_gems() {
    let mut world = world_with(EconomyConfig::default());
    let events = run(
        &mut world,
        Command::PurchaseUpgrade {
            tier: UpgradeTier::Epic,
        },
    );
    assert_eq!(
        events,
        vec![Event::UpgradePurchaseRejected {
            tier: UpgradeTier::Epic,
            reason: PurchaseError::InsufficientGems {
                price: 2,
                available: 0,
            },
        }]
    );
}

#[test]
fn gamble_without_gems_is_rejected() {
    let mut world = world_with(EconomyConfig::default());
    let events = run(
        &mut world,
        Command::Gamble {
            tier: GambleTier::Hero,
        },
    );
    assert_eq!(
        events,
        vec![Event::GambleRejected {
            tier: GambleTier::Hero,
            reason: GambleError::InsufficientGems {
                price: 1,
                available: 0,
            },
        }]
    );
}

#[test]
fn gamble_spends_gems_and_awards_only_its_grade() {
    let mut world = world_with(EconomyConfig {
        gem: 12,
        player_gold: 10_000,
        ..EconomyConfig::default()
    });
    let mut awarded = 0;
    for _ in 0..12 {
        let events = run(
            &mut world,
            Command::Gamble {
                tier: GambleTier::Rare,
            },
        );
        for event in &events {
            if let Event::GambleResolved {
                awarded: Some(kind),
                ..
            } = event
            {
                assert_eq!(kind.grade(), Grade::Rare);
                awarded += 1;
            }
        }
    }

    assert_eq!(query::economy(&world).gem, 0);
    assert_eq!(query::unit_count(&world, Side::Player), awarded);
    assert_eq!(query::economy(&world).player_summon_price, 20 + 2 * awarded);
    assert!(awarded <= 12);
}

fn certain_rare_gamble(player_gold: u32) -> EconomyConfig {
    let mut economy = EconomyConfig {
        gem: 3,
        player_gold,
        ..EconomyConfig::default()
    };
    economy.gamble.rare = GambleOdds {
        gems: 1,
        chance_percent: 100,
    };
    economy
}

#[test]
fn winning_gamble_summons_through_the_gold_purse() {
    let mut world = world_with(certain_rare_gamble(100));

    let events = run(
        &mut world,
        Command::Gamble {
            tier: GambleTier::Rare,
        },
    );

    assert_eq!(events.first(), Some(&Event::GemChanged { amount: 2 }));
    assert!(events.contains(&Event::GoldChanged {
        side: Side::Player,
        amount: 80,
    }));
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::SummonLaunched { .. })));
    assert!(matches!(
        events.last(),
        Some(Event::GambleResolved {
            awarded: Some(kind),
            ..
        }) if kind.grade() == Grade::Rare
    ));
    let economy = query::economy(&world);
    assert_eq!(economy.player_summon_price, 22);
    assert_eq!(economy.gem, 2);
}

#[test]
fn gamble_short_of_the_summon_price_charges_nothing() {
    let mut world = world_with(certain_rare_gamble(10));

    let events = run(
        &mut world,
        Command::Gamble {
            tier: GambleTier::Rare,
        },
    );

    assert_eq!(
        events,
        vec![Event::GambleRejected {
            tier: GambleTier::Rare,
            reason: GambleError::InsufficientGold {
                price: 20,
                available: 10,
            },
        }]
    );
    let economy = query::economy(&world);
    assert_eq!(economy.gem, 3);
    assert_eq!(economy.player_gold, 10);
    assert_eq!(query::unit_count(&world, Side::Player), 0);
}

#[test]
fn graded_summon_draws_from_the_requested_grade() {
    let mut world = world_with(EconomyConfig::default());

    let events = run(
        &mut world,
        Command::Summon {
            side: Side::Player,
            grade: Grade::Epic,
        },
    );

    assert!(events.contains(&Event::GoldChanged {
        side: Side::Player,
        amount: 80,
    }));
    let placed = events.iter().find_map(|event| match event {
        Event::UnitPlaced { kind, .. } => Some(*kind),
        _ => None,
    });
    assert!(placed.is_some_and(|kind| kind.grade() == Grade::Epic && kind.is_legal()));
}
