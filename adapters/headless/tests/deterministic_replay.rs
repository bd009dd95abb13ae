use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use merge_defence_core::{Event, Grade, Side};
use merge_defence_headless::{PlayerRequest, Settings, Simulation};
use merge_defence_world::query;

const FRAME: Duration = Duration::from_millis(20);

#[test]
fn autoplayed_runs_replay_identically() {
    let first = replay(0xdead_beef);
    let second = replay(0xdead_beef);

    assert_eq!(first, second, "replay diverged between runs");
    assert!(first.records.len() > 100, "too little happened to compare");
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    records: Vec<String>,
    units: [u32; 2],
    gold: [u32; 2],
    wave_level: u32,
    fingerprint: u64,
}

fn replay(seed: u64) -> ReplayOutcome {
    let mut simulation = Simulation::new(Settings {
        seed,
        autoplay: true,
        ..Settings::default()
    });

    let mut records = Vec::new();
    for frame in 0..3_000_u32 {
        if frame % 250 == 0 {
            simulation.request(PlayerRequest::Summon {
                grade: Grade::Normal,
            });
        }
        let report = simulation.step(FRAME);
        record_events(&report.events, &mut records);
    }

    let world = simulation.world();
    let economy = query::economy(world);
    let mut hasher = DefaultHasher::new();
    records.hash(&mut hasher);
    ReplayOutcome {
        units: Side::ALL.map(|side| query::unit_count(world, side)),
        gold: [economy.player_gold, economy.opponent_gold],
        wave_level: query::wave_status(world).wave_level,
        fingerprint: hasher.finish(),
        records,
    }
}

fn record_events(events: &[Event], log: &mut Vec<String>) {
    log.extend(
        events
            .iter()
            .filter(|event| !matches!(event, Event::TimeAdvanced { .. }))
            .map(|event| format!("{event:?}")),
    );
}
