use std::{collections::BTreeMap, time::Duration};

use merge_defence_core::{
    Event, Facing, MonsterId, MonsterSnapshot, MonsterTemplate, MonsterTemplateId, Side,
    WorldPoint,
};

use crate::config::ZoneConfig;

/// Squared distance under which a waypoint counts as reached.
const ARRIVAL_EPSILON: f32 = 0.0001;

/// Index of the first waypoint walked while facing left.
const LEFTWARD_WAYPOINT: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Inactive,
    Walking,
    Dying { remaining: Duration },
}

/// Result of applying damage to a monster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum HitOutcome {
    AlreadyDead,
    Damaged { hp: f32 },
    Killed,
}

/// Pooled monster slot.
#[derive(Clone, Debug)]
pub(crate) struct Monster {
    id: MonsterId,
    template: MonsterTemplateId,
    sequence: u64,
    position: WorldPoint,
    hp: f32,
    hp_max: f32,
    move_speed: f32,
    is_boss: bool,
    route_index: usize,
    facing: Facing,
    phase: Phase,
}

impl Monster {
    pub(crate) const fn is_boss(&self) -> bool {
        self.is_boss
    }

    pub(crate) const fn facing(&self) -> Facing {
        self.facing
    }

    fn is_walking(&self) -> bool {
        self.phase == Phase::Walking
    }

    /// Applies damage, clamping hit points to `[0, hp_max]`.
    pub(crate) fn hit(&mut self, damage: f32, death_delay: Duration) -> HitOutcome {
        if !self.is_walking() || self.hp <= 0.0 {
            return HitOutcome::AlreadyDead;
        }
        self.hp = (self.hp - damage).clamp(0.0, self.hp_max);
        if self.hp <= 0.0 {
            self.phase = Phase::Dying {
                remaining: death_delay,
            };
            return HitOutcome::Killed;
        }
        HitOutcome::Damaged { hp: self.hp }
    }

    fn walk(&mut self, route: &[WorldPoint], dt: Duration, out_events: &mut Vec<Event>) {
        let Some(&waypoint) = route.get(self.route_index) else {
            return;
        };
        self.position = self
            .position
            .move_towards(waypoint, self.move_speed * dt.as_secs_f32());
        if self.position.distance_squared(waypoint) >= ARRIVAL_EPSILON {
            return;
        }

        let reached = self.route_index;
        self.route_index = (reached + 1) % route.len();
        let facing = if reached < LEFTWARD_WAYPOINT {
            Facing::Right
        } else {
            Facing::Left
        };
        if facing != self.facing {
            self.facing = facing;
            out_events.push(Event::MonsterTurned {
                monster: self.id,
                facing,
            });
        }
    }

    fn snapshot(&self, side: Side) -> MonsterSnapshot {
        MonsterSnapshot {
            id: self.id,
            side,
            template: self.template,
            sequence: self.sequence,
            position: self.position,
            hp: self.hp,
            hp_max: self.hp_max,
            is_boss: self.is_boss,
        }
    }
}

/// Activation parameters for a monster slot.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Activation {
    pub(crate) template: MonsterTemplate,
    pub(crate) hp_max: f32,
    pub(crate) sequence: u64,
}

/// Spawn point, route and per-template pools of one side.
#[derive(Clone, Debug)]
pub(crate) struct SpawnZone {
    side: Side,
    spawn_point: WorldPoint,
    route: Vec<WorldPoint>,
    pools: BTreeMap<MonsterTemplateId, Vec<Monster>>,
}

impl SpawnZone {
    pub(crate) fn new(side: Side, config: &ZoneConfig) -> Self {
        Self {
            side,
            spawn_point: config.spawn_point,
            route: config.route.clone(),
            pools: BTreeMap::new(),
        }
    }

    /// Reuses the first inactive slot of the template, creating one when none is free.
    ///
    /// Returns the slot identifier and whether it was reused.
    pub(crate) fn activate(
        &mut self,
        activation: Activation,
        fresh_id: impl FnOnce() -> MonsterId,
    ) -> (MonsterId, bool) {
        let template = activation.template;
        let pool = self.pools.entry(template.id).or_default();
        let (slot, reused) = match pool
            .iter_mut()
            .position(|monster| monster.phase == Phase::Inactive)
        {
            Some(index) => (&mut pool[index], true),
            None => {
                pool.push(Monster {
                    id: fresh_id(),
                    template: template.id,
                    sequence: 0,
                    position: self.spawn_point,
                    hp: 0.0,
                    hp_max: 0.0,
                    move_speed: 0.0,
                    is_boss: false,
                    route_index: 0,
                    facing: Facing::Right,
                    phase: Phase::Inactive,
                });
                let last = pool.len() - 1;
                (&mut pool[last], false)
            }
        };

        slot.sequence = activation.sequence;
        slot.position = self.spawn_point;
        slot.hp_max = activation.hp_max;
        slot.hp = activation.hp_max;
        slot.move_speed = template.move_speed;
        slot.is_boss = template.is_boss;
        slot.route_index = 0;
        slot.facing = Facing::Right;
        slot.phase = Phase::Walking;
        (slot.id, reused)
    }

    /// Walks living monsters and returns expired corpses to their pools.
    pub(crate) fn advance(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let route = &self.route;
        for monster in self.pools.values_mut().flatten() {
            match monster.phase {
                Phase::Inactive => {}
                Phase::Walking => {
                    if !route.is_empty() {
                        monster.walk(route, dt, out_events);
                    }
                }
                Phase::Dying { remaining } => {
                    let remaining = remaining.saturating_sub(dt);
                    if remaining.is_zero() {
                        monster.phase = Phase::Inactive;
                        out_events.push(Event::MonsterDeactivated {
                            monster: monster.id,
                        });
                    } else {
                        monster.phase = Phase::Dying { remaining };
                    }
                }
            }
        }
    }

    pub(crate) fn monster_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.pools
            .values_mut()
            .flatten()
            .find(|monster| monster.id == id)
    }

    pub(crate) fn monster(&self, id: MonsterId) -> Option<&Monster> {
        self.pools
            .values()
            .flatten()
            .find(|monster| monster.id == id)
    }

    /// Snapshots of every walking monster.
    pub(crate) fn walking(&self) -> impl Iterator<Item = MonsterSnapshot> + '_ {
        self.pools
            .values()
            .flatten()
            .filter(|monster| monster.is_walking())
            .map(|monster| monster.snapshot(self.side))
    }

    /// Number of slots ever created for the template.
    pub(crate) fn pool_size(&self, template: MonsterTemplateId) -> usize {
        self.pools.get(&template).map_or(0, Vec::len)
    }
}
