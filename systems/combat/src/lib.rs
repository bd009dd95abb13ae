#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that drives unit attack cycles and area skills.
//!
//! Every unit alternates between searching for the nearest monster within
//! reach of its cell and attacking it. Each attack rolls against the unit's
//! skill chance and either casts a pooled area skill or lands a basic hit.
//! Basic hits are announced with `Command::LaunchAttack` for presentation.
//! Damage is emitted as `Command::HitMonster`; a per-tick hit point ledger
//! mirrors those commands so that monsters killed earlier in the tick are no
//! longer targeted.

mod ledger;
mod skills;

use std::{collections::BTreeMap, time::Duration};

use merge_defence_core::{
    Command, Event, GameState, MonsterId, MonsterView, SkillAnchor, SkillTemplateId, UnitId,
    UnitSnapshot, UnitView, WorldPoint,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use ledger::HpLedger;
use skills::{SkillCast, SkillPool};

const ROLL_RANGE: u32 = 100;

/// Configuration parameters required to construct the combat system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration seeding the skill roll generator.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Attacking { target: MonsterId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct AttackCycle {
    phase: Phase,
    ready_in: Duration,
}

impl AttackCycle {
    const fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            ready_in: Duration::ZERO,
        }
    }
}

/// Combat system that turns unit cycles into damage commands.
#[derive(Debug)]
pub struct Combat {
    rng: ChaCha8Rng,
    cycles: BTreeMap<UnitId, AttackCycle>,
    skills: SkillPool,
    ledger: HpLedger,
}

impl Combat {
    /// Creates a new combat system with every unit idle.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            cycles: BTreeMap::new(),
            skills: SkillPool::default(),
            ledger: HpLedger::default(),
        }
    }

    /// Consumes the tick's events and views to emit `Command::HitMonster` entries.
    ///
    /// Active skills pulse before units act. Nothing happens after game over.
    pub fn handle(
        &mut self,
        events: &[Event],
        game_state: GameState,
        units: &UnitView,
        monsters: &MonsterView,
        out: &mut Vec<Command>,
    ) {
        if game_state == GameState::GameOver {
            return;
        }

        let mut elapsed = None;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                elapsed = Some(elapsed.unwrap_or(Duration::ZERO).saturating_add(*dt));
            }
        }
        let Some(dt) = elapsed else {
            return;
        };

        self.ledger.refresh(monsters);
        self.cycles.retain(|id, _| units.get(*id).is_some());

        self.skills.advance(dt, units, monsters, &mut self.ledger, out);

        for unit in units.iter() {
            let cycle = self.cycles.entry(unit.id).or_insert_with(AttackCycle::idle);
            cycle.ready_in = cycle.ready_in.saturating_sub(dt);
            if !cycle.ready_in.is_zero() {
                continue;
            }

            let next = match cycle.phase {
                Phase::Idle => search(unit, monsters, &self.ledger).map_or(
                    AttackCycle::idle(),
                    |target| AttackCycle {
                        phase: Phase::Attacking { target },
                        ready_in: Duration::ZERO,
                    },
                ),
                Phase::Attacking { target } => attack(
                    unit,
                    target,
                    units,
                    monsters,
                    &mut self.rng,
                    &mut self.skills,
                    &mut self.ledger,
                    out,
                ),
            };
            *cycle = next;
        }
    }

    /// Number of skill instances ever created for the template.
    #[must_use]
    pub fn skill_pool_size(&self, template: SkillTemplateId) -> usize {
        self.skills.pool_size(template)
    }

    /// Number of skill instances still pulsing.
    #[must_use]
    pub fn active_skills(&self) -> usize {
        self.skills.active()
    }

    /// Monster the unit is currently attacking.
    #[must_use]
    pub fn target_of(&self, unit: UnitId) -> Option<MonsterId> {
        match self.cycles.get(&unit)?.phase {
            Phase::Idle => None,
            Phase::Attacking { target } => Some(target),
        }
    }
}

fn search(unit: &UnitSnapshot, monsters: &MonsterView, ledger: &HpLedger) -> Option<MonsterId> {
    let reach = unit.stats.attack_range * unit.stats.attack_range;
    let mut nearest: Option<(MonsterId, f32)> = None;
    for monster in monsters.iter() {
        if !ledger.is_alive(monster.id) {
            continue;
        }
        let distance = monster.position.distance_squared(unit.anchor);
        if distance > reach {
            continue;
        }
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((monster.id, distance)),
        }
    }
    nearest.map(|(id, _)| id)
}

fn target_position(
    unit: &UnitSnapshot,
    target: MonsterId,
    monsters: &MonsterView,
    ledger: &HpLedger,
) -> Option<WorldPoint> {
    if !ledger.is_alive(target) {
        return None;
    }
    let position = monsters.get(target)?.position;
    let reach = unit.stats.attack_range * unit.stats.attack_range;
    (position.distance_squared(unit.anchor) <= reach).then_some(position)
}

fn attack(
    unit: &UnitSnapshot,
    target: MonsterId,
    units: &UnitView,
    monsters: &MonsterView,
    rng: &mut ChaCha8Rng,
    skills: &mut SkillPool,
    ledger: &mut HpLedger,
    out: &mut Vec<Command>,
) -> AttackCycle {
    let Some(position) = target_position(unit, target, monsters, ledger) else {
        return AttackCycle::idle();
    };

    let roll = rng.gen_range(0..ROLL_RANGE);
    let skill = unit.skill;
    let killed = if roll < u32::from(skill.gravity) {
        let origin = match skill.anchor {
            SkillAnchor::Caster => unit.anchor,
            SkillAnchor::Target => position,
        };
        debug!(unit = ?unit.id, skill = ?skill.id, "skill cast");
        skills.cast(
            SkillCast {
                template: skill,
                origin,
                caster: unit.id,
                damage: unit.damage * skill.damage_rate,
            },
            units,
            monsters,
            ledger,
            out,
        );
        false
    } else {
        out.push(Command::LaunchAttack {
            unit: unit.id,
            monster: target,
        });
        ledger.hit(target, unit.damage, out)
    };

    AttackCycle {
        phase: if killed {
            Phase::Idle
        } else {
            Phase::Attacking { target }
        },
        ready_in: unit.stats.attack_interval(),
    }
}
