use merge_defence_core::{EconomySnapshot, Grade, Side, UpgradeTier};

use crate::config::EconomyConfig;

/// Price of an upgrade purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Price {
    Gold(u32),
    Gems(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Purse {
    gold: u32,
    summon_count: u32,
}

/// Gold, gems and upgrade levels. Balances never drop below zero.
#[derive(Clone, Debug)]
pub(crate) struct Economy {
    config: EconomyConfig,
    player: Purse,
    opponent: Purse,
    gem: u32,
    upgrade_levels: [u32; 3],
}

impl Economy {
    pub(crate) fn new(config: EconomyConfig) -> Self {
        Self {
            player: Purse {
                gold: config.player_gold,
                summon_count: 0,
            },
            opponent: Purse {
                gold: config.opponent_gold,
                summon_count: 0,
            },
            gem: config.gem,
            upgrade_levels: [1; 3],
            config,
        }
    }

    pub(crate) const fn config(&self) -> &EconomyConfig {
        &self.config
    }

    fn purse(&self, side: Side) -> &Purse {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    fn purse_mut(&mut self, side: Side) -> &mut Purse {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    pub(crate) fn gold(&self, side: Side) -> u32 {
        self.purse(side).gold
    }

    pub(crate) const fn gem(&self) -> u32 {
        self.gem
    }

    pub(crate) fn summon_price(&self, side: Side) -> u32 {
        let count = self.purse(side).summon_count;
        self.config
            .summon_base_price
            .saturating_add(self.config.summon_price_step.saturating_mul(count))
    }

    /// Deducts gold, returning the new balance or the unchanged balance on shortfall.
    pub(crate) fn spend_gold(&mut self, side: Side, amount: u32) -> Result<u32, u32> {
        let purse = self.purse_mut(side);
        let remaining = purse.gold.checked_sub(amount).ok_or(purse.gold)?;
        purse.gold = remaining;
        Ok(remaining)
    }

    pub(crate) fn earn_gold(&mut self, side: Side, amount: u32) -> u32 {
        let purse = self.purse_mut(side);
        purse.gold = purse.gold.saturating_add(amount);
        purse.gold
    }

    /// Deducts gems, returning the new balance or the unchanged balance on shortfall.
    pub(crate) fn spend_gems(&mut self, amount: u32) -> Result<u32, u32> {
        self.gem = self.gem.checked_sub(amount).ok_or(self.gem)?;
        Ok(self.gem)
    }

    pub(crate) fn earn_gems(&mut self, amount: u32) -> u32 {
        self.gem = self.gem.saturating_add(amount);
        self.gem
    }

    pub(crate) fn record_summon(&mut self, side: Side) {
        let purse = self.purse_mut(side);
        purse.summon_count = purse.summon_count.saturating_add(1);
    }

    pub(crate) const fn upgrade_level(&self, tier: UpgradeTier) -> u32 {
        self.upgrade_levels[tier_slot(tier)]
    }

    /// Multiplier applied to the base damage of units of the grade.
    pub(crate) fn damage_multiplier(&self, grade: Grade) -> f32 {
        self.upgrade_level(grade.upgrade_tier()) as f32
    }

    pub(crate) fn upgrade_price(&self, tier: UpgradeTier) -> Price {
        let level = self.upgrade_level(tier);
        match tier {
            UpgradeTier::Rare => Price::Gold(self.config.rare_upgrade_gold.saturating_mul(level)),
            UpgradeTier::Hero => Price::Gold(self.config.hero_upgrade_gold.saturating_mul(level)),
            UpgradeTier::Epic => {
                Price::Gems(self.config.epic_upgrade_gem_base.saturating_add(level))
            }
        }
    }

    pub(crate) fn raise_level(&mut self, tier: UpgradeTier) -> u32 {
        let slot = &mut self.upgrade_levels[tier_slot(tier)];
        *slot = slot.saturating_add(1);
        *slot
    }

    pub(crate) fn snapshot(&self) -> EconomySnapshot {
        EconomySnapshot {
            player_gold: self.player.gold,
            opponent_gold: self.opponent.gold,
            gem: self.gem,
            player_summon_price: self.summon_price(Side::Player),
            opponent_summon_price: self.summon_price(Side::Opponent),
            upgrade_levels: self.upgrade_levels,
        }
    }
}

const fn tier_slot(tier: UpgradeTier) -> usize {
    match tier {
        UpgradeTier::Rare => 0,
        UpgradeTier::Hero => 1,
        UpgradeTier::Epic => 2,
    }
}
