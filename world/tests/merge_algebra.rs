use merge_defence_core::{
    CellIndex, CombinationError, Command, EpicRecipe, Event, Grade, GridView, PromotionError,
    Side, UnitKind,
};
use merge_defence_world::{self as world, query, SimulationConfig, World};

fn new_world() -> World {
    World::new(SimulationConfig::default(), 0x00c0_ffee)
}

fn run(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

fn place(world: &mut World, kind: UnitKind, times: usize) {
    for _ in 0..times {
        let events = run(
            world,
            Command::PlaceUnit {
                side: Side::Player,
                kind,
            },
        );
        assert!(
            events
                .iter()
                .any(|event| matches!(event, Event::UnitPlaced { .. })),
            "placement of {kind:?} failed: {events:?}"
        );
    }
}

fn stack(view: &GridView, cell: u8) -> (Option<UnitKind>, u8) {
    let stack = view.stack(CellIndex::new(cell)).expect("cell on board");
    (stack.kind, stack.count)
}

fn assert_stack_invariant(view: &GridView) {
    for stack in view.iter() {
        assert!(stack.count <= 3, "{stack:?} overflowed");
        assert_eq!(stack.count == 0, stack.kind.is_none(), "{stack:?}");
    }
}

#[test]
fn three_normal_archers_share_the_first_cell() {
    let mut world = new_world();
    place(&mut world, UnitKind::NORMAL_ARCHER, 3);

    let view = query::grid_view(&world, Side::Player);
    assert_eq!(stack(&view, 0), (Some(UnitKind::NORMAL_ARCHER), 3));
    assert_eq!(view.unit_count(), 3);
    assert_stack_invariant(&view);
}

#[test]
fn promotion_consumes_three_and_creates_one_of_next_grade() {
    let mut world = new_world();
    place(&mut world, UnitKind::NORMAL_ARCHER, 3);
    place(&mut world, UnitKind::NORMAL_WARRIOR, 1);
    let before = query::unit_count(&world, Side::Player);

    let events = run(
        &mut world,
        Command::PromoteStack {
            side: Side::Player,
            cell: CellIndex::new(0),
            target: Grade::Rare,
        },
    );

    let produced = events
        .iter()
        .find_map(|event| match event {
            Event::StackPromoted {
                consumed, produced, ..
            } => {
                assert_eq!(*consumed, UnitKind::NORMAL_ARCHER);
                Some(*produced)
            }
            _ => None,
        })
        .expect("promotion event");
    assert_eq!(produced.grade(), Grade::Rare);
    assert!(produced.is_legal());

    let view = query::grid_view(&world, Side::Player);
    assert_eq!(view.unit_count(), before - 2);
    let promoted: Vec<_> = view
        .iter()
        .filter(|stack| stack.kind == Some(produced))
        .collect();
    assert_eq!(promoted.len(), 1);
    assert_eq!(promoted[0].count, 1);
    assert_stack_invariant(&view);
}

#[test]
fn promotion_requires_a_full_non_epic_stack() {
    let mut world = new_world();
    place(&mut world, UnitKind::NORMAL_ARCHER, 2);
    place(&mut world, UnitKind::EPIC_WARRIOR, 3);

    let partial = run(
        &mut world,
        Command::PromoteStack {
            side: Side::Player,
            cell: CellIndex::new(0),
            target: Grade::Rare,
        },
    );
    assert_eq!(
        partial,
        vec![Event::PromotionRejected {
            side: Side::Player,
            cell: CellIndex::new(0),
            reason: PromotionError::NotFull { count: 2 },
        }]
    );

    let epic = run(
        &mut world,
        Command::PromoteStack {
            side: Side::Player,
            cell: CellIndex::new(1),
            target: Grade::Epic,
        },
    );
    assert_eq!(
        epic,
        vec![Event::PromotionRejected {
            side: Side::Player,
            cell: CellIndex::new(1),
            reason: PromotionError::HighestGrade,
        }]
    );
    assert_eq!(query::unit_count(&world, Side::Player), 5);
}

#[test]
fn promotion_rejects_skipped_grades() {
    let mut world = new_world();
    place(&mut world, UnitKind::RARE_WARRIOR, 3);

    let events = run(
        &mut world,
        Command::PromoteStack {
            side: Side::Player,
            cell: CellIndex::new(0),
            target: Grade::Epic,
        },
    );
    assert_eq!(
        events,
        vec![Event::PromotionRejected {
            side: Side::Player,
            cell: CellIndex::new(0),
            reason: PromotionError::GradeMismatch {
                expected: Grade::Hero,
                requested: Grade::Epic,
            },
        }]
    );
}

#[test]
fn removal_tops_up_from_a_partial_donor() {
    let mut world = new_world();
    place(&mut world, UnitKind::RARE_ARCHER, 5);

    let events = run(
        &mut world,
        Command::RemoveUnit {
            side: Side::Player,
            cell: CellIndex::new(0),
        },
    );
    assert!(events.iter().any(|event| matches!(
        event,
        Event::UnitPulled { from, to, .. } if *from == CellIndex::new(1) && *to == CellIndex::new(0)
    )));

    let view = query::grid_view(&world, Side::Player);
    assert_eq!(stack(&view, 0), (Some(UnitKind::RARE_ARCHER), 3));
    assert_eq!(stack(&view, 1), (Some(UnitKind::RARE_ARCHER), 1));
    assert_stack_invariant(&view);
}

#[test]
fn removal_never_pulls_from_full_donors() {
    let mut world = new_world();
    place(&mut world, UnitKind::RARE_ARCHER, 6);

    let events = run(
        &mut world,
        Command::RemoveUnit {
            side: Side::Player,
            cell: CellIndex::new(0),
        },
    );
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::UnitPulled { .. })));

    let view = query::grid_view(&world, Side::Player);
    assert_eq!(stack(&view, 0), (Some(UnitKind::RARE_ARCHER), 2));
    assert_eq!(stack(&view, 1), (Some(UnitKind::RARE_ARCHER), 3));

    // The shrunken stack now donates to the next full stack that loses a unit.
    let _ = run(
        &mut world,
        Command::RemoveUnit {
            side: Side::Player,
            cell: CellIndex::new(1),
        },
    );
    let view = query::grid_view(&world, Side::Player);
    assert_eq!(stack(&view, 0), (Some(UnitKind::RARE_ARCHER), 1));
    assert_eq!(stack(&view, 1), (Some(UnitKind::RARE_ARCHER), 3));
    assert_stack_invariant(&view);
}

#[test]
fn clearing_a_cell_destroys_every_unit() {
    let mut world = new_world();
    place(&mut world, UnitKind::HERO_MAGICIAN, 3);

    let events = run(
        &mut world,
        Command::ClearCell {
            side: Side::Player,
            cell: CellIndex::new(0),
        },
    );
    assert!(events.contains(&Event::CellCleared {
        side: Side::Player,
        cell: CellIndex::new(0),
        kind: UnitKind::HERO_MAGICIAN,
        removed: 3,
    }));
    assert!(events.contains(&Event::UnitCountChanged {
        side: Side::Player,
        count: 0,
    }));
    assert_eq!(
        stack(&query::grid_view(&world, Side::Player), 0),
        (None, 0)
    );
}

#[test]
fn swapping_moves_stacks_and_reports_travel() {
    let mut world = new_world();
    place(&mut world, UnitKind::NORMAL_WARRIOR, 2);

    let events = run(
        &mut world,
        Command::SwapCells {
            side: Side::Player,
            first: CellIndex::new(0),
            second: CellIndex::new(3),
        },
    );
    let Some(Event::CellsSwapped {
        into_first,
        into_second,
        ..
    }) = events.first()
    else {
        panic!("expected swap event, got {events:?}");
    };
    assert!(into_first.is_zero(), "empty stack does not travel");
    assert!(!into_second.is_zero());

    let view = query::grid_view(&world, Side::Player);
    assert_eq!(stack(&view, 0), (None, 0));
    assert_eq!(stack(&view, 3), (Some(UnitKind::NORMAL_WARRIOR), 2));

    let same = run(
        &mut world,
        Command::SwapCells {
            side: Side::Player,
            first: CellIndex::new(3),
            second: CellIndex::new(3),
        },
    );
    assert!(same.is_empty());
}

#[test]
fn warrior_recipe_yields_epic_warrior() {
    let mut world = new_world();
    place(&mut world, UnitKind::HERO_WARRIOR, 1);
    place(&mut world, UnitKind::RARE_ARCHER, 1);
    place(&mut world, UnitKind::RARE_WARRIOR, 1);

    let events = run(
        &mut world,
        Command::CombineEpic {
            side: Side::Player,
            recipe: EpicRecipe::EpicWarrior,
        },
    );
    assert!(events.iter().any(|event| matches!(
        event,
        Event::UnitPlaced { kind, .. } if *kind == UnitKind::EPIC_WARRIOR
    )));

    let view = query::grid_view(&world, Side::Player);
    assert_eq!(view.unit_count(), 1);
    assert!(view
        .iter()
        .any(|stack| stack.kind == Some(UnitKind::EPIC_WARRIOR)));
    assert!(!view
        .iter()
        .any(|stack| stack.kind == Some(UnitKind::EPIC_MAGICIAN)));
}

#[test]
fn combination_with_missing_ingredient_consumes_nothing() {
    let mut world = new_world();
    place(&mut world, UnitKind::HERO_MAGICIAN, 1);
    place(&mut world, UnitKind::RARE_ARCHER, 2);
    let before = query::grid_view(&world, Side::Player);

    let events = run(
        &mut world,
        Command::CombineEpic {
            side: Side::Player,
            recipe: EpicRecipe::EpicMagician,
        },
    );
    assert_eq!(
        events,
        vec![Event::CombinationRejected {
            side: Side::Player,
            recipe: EpicRecipe::EpicMagician,
            reason: CombinationError::MissingIngredient {
                kind: UnitKind::RARE_WARRIOR,
            },
        }]
    );
    assert_eq!(query::grid_view(&world, Side::Player), before);
}

#[test]
fn combination_prefers_partial_holders() {
    let mut world = new_world();
    place(&mut world, UnitKind::RARE_ARCHER, 3);
    place(&mut world, UnitKind::HERO_MAGICIAN, 1);
    place(&mut world, UnitKind::RARE_WARRIOR, 1);
    place(&mut world, UnitKind::RARE_ARCHER, 1);

    let _ = run(
        &mut world,
        Command::CombineEpic {
            side: Side::Player,
            recipe: EpicRecipe::EpicMagician,
        },
    );

    let view = query::grid_view(&world, Side::Player);
    // The lone archer in cell 3 was the preferred holder, leaving cell 0 full.
    assert_eq!(stack(&view, 0), (Some(UnitKind::RARE_ARCHER), 3));
    assert_eq!(view.unit_count(), 4);
    assert!(view
        .iter()
        .any(|stack| stack.kind == Some(UnitKind::EPIC_MAGICIAN)));
    assert_stack_invariant(&view);
}

#[test]
fn boards_are_independent() {
    let mut world = new_world();
    place(&mut world, UnitKind::NORMAL_ARCHER, 2);
    let _ = run(
        &mut world,
        Command::PlaceUnit {
            side: Side::Opponent,
            kind: UnitKind::HERO_WARRIOR,
        },
    );

    assert_eq!(query::unit_count(&world, Side::Player), 2);
    assert_eq!(query::unit_count(&world, Side::Opponent), 1);
    let units = query::unit_view(&world);
    let opponent_unit = units
        .iter()
        .find(|unit| unit.side == Side::Opponent)
        .expect("opponent unit");
    let player_unit = units
        .iter()
        .find(|unit| unit.side == Side::Player)
        .expect("player unit");
    assert!(opponent_unit.anchor.y > player_unit.anchor.y);
}
