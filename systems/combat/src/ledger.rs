use std::collections::BTreeMap;

use merge_defence_core::{Command, MonsterId, MonsterView};

/// Hit points of living monsters as they will be once this tick's commands apply.
#[derive(Debug, Default)]
pub(crate) struct HpLedger {
    hp: BTreeMap<MonsterId, f32>,
}

impl HpLedger {
    pub(crate) fn refresh(&mut self, monsters: &MonsterView) {
        self.hp.clear();
        self.hp.extend(
            monsters
                .iter()
                .filter(|monster| monster.is_alive())
                .map(|monster| (monster.id, monster.hp)),
        );
    }

    pub(crate) fn is_alive(&self, monster: MonsterId) -> bool {
        self.hp.get(&monster).is_some_and(|hp| *hp > 0.0)
    }

    /// Emits a hit and reports whether it is the killing blow.
    pub(crate) fn hit(&mut self, monster: MonsterId, damage: f32, out: &mut Vec<Command>) -> bool {
        let Some(hp) = self.hp.get_mut(&monster).filter(|hp| **hp > 0.0) else {
            return false;
        };
        out.push(Command::HitMonster { monster, damage });
        *hp = (*hp - damage).max(0.0);
        *hp <= 0.0
    }
}
