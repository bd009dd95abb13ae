use std::{collections::BTreeMap, time::Duration};

use merge_defence_core::{
    Command, MonsterId, MonsterView, SkillTemplate, SkillTemplateId, UnitId, UnitView, WorldPoint,
};

use crate::ledger::HpLedger;

/// A skill in flight, anchored where it was cast.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SkillCast {
    pub(crate) template: SkillTemplate,
    pub(crate) origin: WorldPoint,
    pub(crate) caster: UnitId,
    /// Per-target damage of the latest pulse. Kept once the caster leaves the board.
    pub(crate) damage: f32,
}

impl SkillCast {
    fn pulse(
        &mut self,
        units: &UnitView,
        monsters: &MonsterView,
        ledger: &mut HpLedger,
        out: &mut Vec<Command>,
    ) {
        if let Some(caster) = units.get(self.caster) {
            self.damage = caster.damage * self.template.damage_rate;
        }
        let reach = self.template.range * self.template.range;
        let mut targets: Vec<(MonsterId, f32)> = monsters
            .iter()
            .filter(|monster| ledger.is_alive(monster.id))
            .map(|monster| (monster.id, monster.position.distance_squared(self.origin)))
            .filter(|(_, distance)| *distance <= reach)
            .collect();
        if targets.len() > self.template.max_targets {
            targets.sort_by(|a, b| a.1.total_cmp(&b.1));
            targets.truncate(self.template.max_targets);
        }
        for (monster, _) in targets {
            let _ = ledger.hit(monster, self.damage, out);
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    cast: SkillCast,
    remaining: u32,
    ready_in: Duration,
}

impl Slot {
    const fn is_active(&self) -> bool {
        self.remaining > 0
    }
}

/// Skill instances pooled per template, reused once their last pulse fired.
#[derive(Debug, Default)]
pub(crate) struct SkillPool {
    pools: BTreeMap<SkillTemplateId, Vec<Slot>>,
}

impl SkillPool {
    /// Fires the first pulse immediately and keeps the rest pending.
    pub(crate) fn cast(
        &mut self,
        mut cast: SkillCast,
        units: &UnitView,
        monsters: &MonsterView,
        ledger: &mut HpLedger,
        out: &mut Vec<Command>,
    ) {
        let remaining = match cast.template.repeat_count {
            0 => 0,
            count => {
                cast.pulse(units, monsters, ledger, out);
                count - 1
            }
        };
        let slot = Slot {
            cast,
            remaining,
            ready_in: cast.template.repeat_delay,
        };

        let pool = self.pools.entry(cast.template.id).or_default();
        match pool.iter_mut().find(|slot| !slot.is_active()) {
            Some(free) => *free = slot,
            None => pool.push(slot),
        }
    }

    /// Counts down pending pulses and fires those that came due.
    pub(crate) fn advance(
        &mut self,
        dt: Duration,
        units: &UnitView,
        monsters: &MonsterView,
        ledger: &mut HpLedger,
        out: &mut Vec<Command>,
    ) {
        for slot in self.pools.values_mut().flatten() {
            if !slot.is_active() {
                continue;
            }
            slot.ready_in = slot.ready_in.saturating_sub(dt);
            if !slot.ready_in.is_zero() {
                continue;
            }
            slot.cast.pulse(units, monsters, ledger, out);
            slot.remaining -= 1;
            slot.ready_in = slot.cast.template.repeat_delay;
        }
    }

    pub(crate) fn pool_size(&self, template: SkillTemplateId) -> usize {
        self.pools.get(&template).map_or(0, Vec::len)
    }

    pub(crate) fn active(&self) -> usize {
        self.pools
            .values()
            .flatten()
            .filter(|slot| slot.is_active())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merge_defence_core::{
        CellIndex, MonsterSnapshot, MonsterTemplateId, Side, SkillAnchor, UnitKind, UnitSnapshot,
        UnitStats,
    };

    fn cast(repeat_count: u32, delay_ms: u64) -> SkillCast {
        SkillCast {
            template: SkillTemplate {
                id: SkillTemplateId::new(2),
                gravity: 20,
                anchor: SkillAnchor::Target,
                damage_rate: 2.0,
                repeat_count,
                repeat_delay: Duration::from_millis(delay_ms),
                max_targets: 4,
                range: 1.0,
            },
            origin: WorldPoint::new(0.0, 0.0),
            caster: UnitId::new(0),
            damage: 0.0,
        }
    }

    fn casters(damage: f32) -> UnitView {
        let template = cast(1, 0).template;
        UnitView::from_snapshots(vec![UnitSnapshot {
            id: UnitId::new(0),
            side: Side::Opponent,
            cell: CellIndex::new(0),
            kind: UnitKind::HERO_MAGICIAN,
            anchor: WorldPoint::new(0.0, 0.0),
            damage,
            stats: UnitStats {
                base_damage: damage,
                attack_speed: 1.0,
                attack_range: 2.0,
            },
            skill: template,
        }])
    }

    fn monsters() -> MonsterView {
        MonsterView::from_snapshots(vec![MonsterSnapshot {
            id: MonsterId::new(1),
            side: Side::Opponent,
            template: MonsterTemplateId::new(0),
            sequence: 0,
            position: WorldPoint::new(0.5, 0.0),
            hp: 100.0,
            hp_max: 100.0,
            is_boss: false,
        }])
    }

    #[test]
    fn repeats_are_spaced_by_the_delay() {
        let monsters = monsters();
        let units = casters(5.0);
        let mut ledger = HpLedger::default();
        ledger.refresh(&monsters);
        let mut pool = SkillPool::default();
        let mut out = Vec::new();

        pool.cast(cast(3, 300), &units, &monsters, &mut ledger, &mut out);
        assert_eq!(out.len(), 1);

        pool.advance(Duration::from_millis(200), &units, &monsters, &mut ledger, &mut out);
        assert_eq!(out.len(), 1);
        pool.advance(Duration::from_millis(100), &units, &monsters, &mut ledger, &mut out);
        assert_eq!(out.len(), 2);
        pool.advance(Duration::from_millis(300), &units, &monsters, &mut ledger, &mut out);
        assert_eq!(out.len(), 3);
        assert_eq!(pool.active(), 0);

        pool.advance(Duration::from_secs(1), &units, &monsters, &mut ledger, &mut out);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn finished_instances_are_reused() {
        let monsters = monsters();
        let units = casters(5.0);
        let mut ledger = HpLedger::default();
        ledger.refresh(&monsters);
        let mut pool = SkillPool::default();
        let mut out = Vec::new();

        pool.cast(cast(2, 100), &units, &monsters, &mut ledger, &mut out);
        pool.cast(cast(2, 100), &units, &monsters, &mut ledger, &mut out);
        assert_eq!(pool.pool_size(SkillTemplateId::new(2)), 2);

        pool.advance(Duration::from_millis(100), &units, &monsters, &mut ledger, &mut out);
        assert_eq!(pool.active(), 0);
        pool.cast(cast(2, 100), &units, &monsters, &mut ledger, &mut out);
        assert_eq!(pool.pool_size(SkillTemplateId::new(2)), 2);
        assert_eq!(pool.active(), 1);
    }

    #[test]
    fn later_pulses_use_the_casters_current_damage() {
        let monsters = monsters();
        let mut ledger = HpLedger::default();
        ledger.refresh(&monsters);
        let mut pool = SkillPool::default();
        let mut out = Vec::new();

        pool.cast(cast(3, 100), &casters(5.0), &monsters, &mut ledger, &mut out);
        pool.advance(
            Duration::from_millis(100),
            &casters(8.0),
            &monsters,
            &mut ledger,
            &mut out,
        );
        pool.advance(
            Duration::from_millis(100),
            &UnitView::default(),
            &monsters,
            &mut ledger,
            &mut out,
        );

        let damage: Vec<f32> = out
            .iter()
            .map(|command| match command {
                Command::HitMonster { damage, .. } => *damage,
                other => panic!("unexpected command {other:?}"),
            })
            .collect();
        assert_eq!(damage, vec![10.0, 16.0, 16.0]);
    }
}
