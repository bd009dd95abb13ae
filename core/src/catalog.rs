use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::saturating_seconds;

/// Rarity tier of a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    /// Entry tier produced by gold summons.
    Normal,
    /// Second tier.
    Rare,
    /// Third tier.
    Hero,
    /// Top tier, only reachable through recipes, gambling or direct placement.
    Epic,
}

impl Grade {
    /// Every grade in ascending order.
    pub const ALL: [Grade; 4] = [Grade::Normal, Grade::Rare, Grade::Hero, Grade::Epic];

    /// Grade produced by merging three units of this grade.
    #[must_use]
    pub const fn successor(self) -> Option<Grade> {
        match self {
            Grade::Normal => Some(Grade::Rare),
            Grade::Rare => Some(Grade::Hero),
            Grade::Hero => Some(Grade::Epic),
            Grade::Epic => None,
        }
    }

    /// Classes a unit of this grade may take, in draw order.
    #[must_use]
    pub const fn legal_classes(self) -> [UnitClass; 2] {
        match self {
            Grade::Normal | Grade::Rare => [UnitClass::Archer, UnitClass::Warrior],
            Grade::Hero | Grade::Epic => [UnitClass::Magician, UnitClass::Warrior],
        }
    }

    /// Upgrade tier whose level multiplies the damage of this grade.
    #[must_use]
    pub const fn upgrade_tier(self) -> UpgradeTier {
        match self {
            Grade::Normal | Grade::Rare => UpgradeTier::Rare,
            Grade::Hero => UpgradeTier::Hero,
            Grade::Epic => UpgradeTier::Epic,
        }
    }
}

/// Combat archetype of a unit. Classes are data, not behaviour hierarchies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitClass {
    /// Ranged attacker firing arrows.
    Archer,
    /// Close combat attacker.
    Warrior,
    /// Caster firing magic projectiles.
    Magician,
}

impl UnitClass {
    /// Presentation descriptor for the basic attack of this class.
    #[must_use]
    pub const fn attack_effect(self) -> AttackEffect {
        match self {
            UnitClass::Archer => AttackEffect::Arrow {
                seconds_per_unit: PROJECTILE_SECONDS_PER_UNIT,
            },
            UnitClass::Warrior => AttackEffect::MeleeSwing,
            UnitClass::Magician => AttackEffect::MagicProjectile {
                seconds_per_unit: PROJECTILE_SECONDS_PER_UNIT,
            },
        }
    }
}

const PROJECTILE_SECONDS_PER_UNIT: f32 = 0.125;

/// Visual effect played by a basic attack, carried by `Event::AttackLaunched`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttackEffect {
    /// Swing animation on the attacker without a travelling projectile.
    MeleeSwing,
    /// Arrow travelling from the attacker to the target.
    Arrow {
        /// Flight time per world unit travelled.
        seconds_per_unit: f32,
    },
    /// Magic bolt travelling from the attacker to the target.
    MagicProjectile {
        /// Flight time per world unit travelled.
        seconds_per_unit: f32,
    },
}

impl AttackEffect {
    /// Flight time of the effect over the provided distance.
    #[must_use]
    pub fn travel_time(&self, distance: f32) -> Duration {
        match self {
            AttackEffect::MeleeSwing => Duration::ZERO,
            AttackEffect::Arrow { seconds_per_unit }
            | AttackEffect::MagicProjectile { seconds_per_unit } => {
                saturating_seconds(distance * seconds_per_unit)
            }
        }
    }
}

/// Grade and class pair identifying what a stack holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitKind {
    grade: Grade,
    class: UnitClass,
}

impl UnitKind {
    /// Normal archer.
    pub const NORMAL_ARCHER: UnitKind = UnitKind::new(Grade::Normal, UnitClass::Archer);
    /// Normal warrior.
    pub const NORMAL_WARRIOR: UnitKind = UnitKind::new(Grade::Normal, UnitClass::Warrior);
    /// Rare archer.
    pub const RARE_ARCHER: UnitKind = UnitKind::new(Grade::Rare, UnitClass::Archer);
    /// Rare warrior.
    pub const RARE_WARRIOR: UnitKind = UnitKind::new(Grade::Rare, UnitClass::Warrior);
    /// Hero magician.
    pub const HERO_MAGICIAN: UnitKind = UnitKind::new(Grade::Hero, UnitClass::Magician);
    /// Hero warrior.
    pub const HERO_WARRIOR: UnitKind = UnitKind::new(Grade::Hero, UnitClass::Warrior);
    /// Epic magician.
    pub const EPIC_MAGICIAN: UnitKind = UnitKind::new(Grade::Epic, UnitClass::Magician);
    /// Epic warrior.
    pub const EPIC_WARRIOR: UnitKind = UnitKind::new(Grade::Epic, UnitClass::Warrior);

    /// Every legal kind, grouped by grade.
    pub const ALL: [UnitKind; 8] = [
        UnitKind::NORMAL_ARCHER,
        UnitKind::NORMAL_WARRIOR,
        UnitKind::RARE_ARCHER,
        UnitKind::RARE_WARRIOR,
        UnitKind::HERO_MAGICIAN,
        UnitKind::HERO_WARRIOR,
        UnitKind::EPIC_MAGICIAN,
        UnitKind::EPIC_WARRIOR,
    ];

    /// Pairs a grade with a class. Legality is checked with [`UnitKind::is_legal`].
    #[must_use]
    pub const fn new(grade: Grade, class: UnitClass) -> Self {
        Self { grade, class }
    }

    /// Grade of the kind.
    #[must_use]
    pub const fn grade(&self) -> Grade {
        self.grade
    }

    /// Class of the kind.
    #[must_use]
    pub const fn class(&self) -> UnitClass {
        self.class
    }

    /// Reports whether the class is available at this grade.
    #[must_use]
    pub fn is_legal(&self) -> bool {
        self.grade.legal_classes().contains(&self.class)
    }
}

/// Recipes that fuse three lower units into an epic unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EpicRecipe {
    /// Hero magician, rare archer and rare warrior into an epic magician.
    EpicMagician,
    /// Hero warrior, rare archer and rare warrior into an epic warrior.
    EpicWarrior,
}

impl EpicRecipe {
    /// Recipes in the order automated players attempt them.
    pub const ALL: [EpicRecipe; 2] = [EpicRecipe::EpicMagician, EpicRecipe::EpicWarrior];

    /// Kinds consumed by the recipe, one unit each.
    #[must_use]
    pub const fn ingredients(self) -> [UnitKind; 3] {
        match self {
            EpicRecipe::EpicMagician => [
                UnitKind::HERO_MAGICIAN,
                UnitKind::RARE_ARCHER,
                UnitKind::RARE_WARRIOR,
            ],
            EpicRecipe::EpicWarrior => [
                UnitKind::HERO_WARRIOR,
                UnitKind::RARE_ARCHER,
                UnitKind::RARE_WARRIOR,
            ],
        }
    }

    /// Kind produced by the recipe.
    #[must_use]
    pub const fn output(self) -> UnitKind {
        match self {
            EpicRecipe::EpicMagician => UnitKind::EPIC_MAGICIAN,
            EpicRecipe::EpicWarrior => UnitKind::EPIC_WARRIOR,
        }
    }
}

/// Damage upgrade band. Normal and rare units share the rare band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UpgradeTier {
    /// Band covering normal and rare units.
    Rare,
    /// Band covering hero units.
    Hero,
    /// Band covering epic units.
    Epic,
}

impl UpgradeTier {
    /// Every upgrade band.
    pub const ALL: [UpgradeTier; 3] = [UpgradeTier::Rare, UpgradeTier::Hero, UpgradeTier::Epic];
}

/// Gem-priced chance summon of a fixed grade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GambleTier {
    /// Chance at a rare unit.
    Rare,
    /// Chance at a hero unit.
    Hero,
    /// Chance at an epic unit.
    Epic,
}

impl GambleTier {
    /// Grade awarded when the roll succeeds.
    #[must_use]
    pub const fn grade(self) -> Grade {
        match self {
            GambleTier::Rare => Grade::Rare,
            GambleTier::Hero => Grade::Hero,
            GambleTier::Epic => Grade::Epic,
        }
    }
}

/// Combat statistics of a unit kind before upgrades.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    /// Damage of a basic hit at upgrade level one.
    pub base_damage: f32,
    /// Basic actions per second.
    pub attack_speed: f32,
    /// Reach of the unit measured from its cell anchor.
    pub attack_range: f32,
}

impl UnitStats {
    /// Delay between two actions of the unit.
    #[must_use]
    pub fn attack_interval(&self) -> Duration {
        if self.attack_speed.is_nan() || self.attack_speed <= 0.0 {
            return Duration::MAX;
        }
        saturating_seconds(1.0 / self.attack_speed)
    }
}

/// Identifier of a skill template, also the key of its instance pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkillTemplateId(u32);

impl SkillTemplateId {
    /// Creates a new identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Where a skill lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillAnchor {
    /// Centred on the casting unit's cell.
    Caster,
    /// Centred on the monster the caster was attacking.
    Target,
}

/// Area skill cast instead of a basic hit with `gravity` percent chance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkillTemplate {
    /// Pool key of the skill.
    pub id: SkillTemplateId,
    /// Cast chance in percent, `0..=100`.
    pub gravity: u8,
    /// Placement of the area.
    pub anchor: SkillAnchor,
    /// Multiplier applied to the caster's damage per hit.
    pub damage_rate: f32,
    /// Number of damage pulses.
    pub repeat_count: u32,
    /// Delay between consecutive pulses.
    pub repeat_delay: Duration,
    /// Upper bound of monsters hit per pulse, nearest first.
    pub max_targets: usize,
    /// Radius of the area.
    pub range: f32,
}

/// Template a monster is activated from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonsterTemplate {
    /// Pool key of the template.
    pub id: crate::MonsterTemplateId,
    /// Hit points at wave level zero.
    pub hp_max: f32,
    /// Travel speed in world units per second.
    pub move_speed: f32,
    /// Whether deaths grant boss rewards and count toward boss checks.
    pub is_boss: bool,
}

impl MonsterTemplate {
    /// Hit points of an instance spawned during the provided wave level.
    #[must_use]
    pub fn scaled_hp(&self, wave_level: u32, growth: f32) -> f32 {
        let exponent = i32::try_from(wave_level).unwrap_or(i32::MAX);
        self.hp_max * growth.powi(exponent)
    }
}
