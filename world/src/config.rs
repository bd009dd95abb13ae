//! Tunable parameters of a run.
//!
//! Every field carries a default so partial TOML files only need to name the
//! values they override.

use std::time::Duration;

use merge_defence_core::{
    saturating_seconds, BoardLayout, GambleTier, MonsterTemplate, MonsterTemplateId, Side,
    SkillAnchor, SkillTemplate, SkillTemplateId, UnitClass, UnitKind, UnitStats, WorldPoint,
};
use serde::{Deserialize, Serialize};

/// Vertical distance between the player's board and the opponent's board.
const OPPONENT_OFFSET: f32 = 3.4;

/// Complete configuration consumed by [`World::new`](crate::World::new).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Prices, starting balances and rewards.
    pub economy: EconomyConfig,
    /// Board placement for both sides.
    pub boards: BoardsConfig,
    /// Spawn zones for both sides.
    pub zones: ZonesConfig,
    /// Monster templates and scaling.
    pub monsters: MonsterCatalogConfig,
    /// Combat statistics per unit kind.
    pub units: UnitCatalogConfig,
    /// Skills per unit class.
    pub skills: SkillCatalogConfig,
    /// Presentation hints emitted alongside grid mutations.
    pub motion: MotionConfig,
}

/// Prices, starting balances and rewards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Gold the player starts with.
    pub player_gold: u32,
    /// Gold the opponent starts with.
    pub opponent_gold: u32,
    /// Gems the player starts with.
    pub gem: u32,
    /// Maximum units per board.
    pub unit_cap: u32,
    /// Price of the first summon.
    pub summon_base_price: u32,
    /// Price increase per completed summon.
    pub summon_price_step: u32,
    /// Gold per level for the rare upgrade band.
    pub rare_upgrade_gold: u32,
    /// Gold per level for the hero upgrade band.
    pub hero_upgrade_gold: u32,
    /// Gems added to the level for the epic upgrade band.
    pub epic_upgrade_gem_base: u32,
    /// Gold granted to both sides per normal kill.
    pub normal_kill_gold: u32,
    /// Gold granted to both sides per boss kill.
    pub boss_kill_gold: u32,
    /// Gems granted to the player per boss kill.
    pub boss_kill_gem: u32,
    /// Gem gamble odds.
    pub gamble: GambleConfig,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            player_gold: 100,
            opponent_gold: 100,
            gem: 0,
            unit_cap: 20,
            summon_base_price: 20,
            summon_price_step: 2,
            rare_upgrade_gold: 30,
            hero_upgrade_gold: 50,
            epic_upgrade_gem_base: 1,
            normal_kill_gold: 1,
            boss_kill_gold: 50,
            boss_kill_gem: 2,
            gamble: GambleConfig::default(),
        }
    }
}

/// Price and success chance of a gamble tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GambleOdds {
    /// Gems charged per attempt.
    pub gems: u32,
    /// Success chance in percent.
    pub chance_percent: u32,
}

/// Gem gamble odds per tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GambleConfig {
    /// Rare tier odds.
    pub rare: GambleOdds,
    /// Hero tier odds.
    pub hero: GambleOdds,
    /// Epic tier odds.
    pub epic: GambleOdds,
}

impl GambleConfig {
    /// Odds of the provided tier.
    #[must_use]
    pub const fn odds(&self, tier: GambleTier) -> GambleOdds {
        match tier {
            GambleTier::Rare => self.rare,
            GambleTier::Hero => self.hero,
            GambleTier::Epic => self.epic,
        }
    }
}

impl Default for GambleConfig {
    fn default() -> Self {
        Self {
            rare: GambleOdds {
                gems: 1,
                chance_percent: 60,
            },
            hero: GambleOdds {
                gems: 1,
                chance_percent: 20,
            },
            epic: GambleOdds {
                gems: 2,
                chance_percent: 10,
            },
        }
    }
}

/// Board placement for both sides.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardsConfig {
    /// Player board transform.
    pub player: BoardLayout,
    /// Opponent board transform.
    pub opponent: BoardLayout,
}

impl BoardsConfig {
    /// Layout of the provided side.
    #[must_use]
    pub const fn layout(&self, side: Side) -> BoardLayout {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }
}

impl Default for BoardsConfig {
    fn default() -> Self {
        let player = BoardLayout::default();
        Self {
            player,
            opponent: player.translated(0.0, OPPONENT_OFFSET),
        }
    }
}

/// A spawn zone: where monsters appear and the loop they walk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Activation position of new monsters.
    pub spawn_point: WorldPoint,
    /// Cyclic waypoint list.
    pub route: Vec<WorldPoint>,
}

impl ZoneConfig {
    fn rectangle(dy: f32) -> Self {
        let route = vec![
            WorldPoint::new(-2.7, 0.6 + dy),
            WorldPoint::new(2.7, 0.6 + dy),
            WorldPoint::new(2.7, -2.2 + dy),
            WorldPoint::new(-2.7, -2.2 + dy),
        ];
        Self {
            spawn_point: route[0],
            route,
        }
    }
}

/// Spawn zones for both sides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZonesConfig {
    /// Zone circling the player's board.
    pub player: ZoneConfig,
    /// Zone circling the opponent's board.
    pub opponent: ZoneConfig,
}

impl ZonesConfig {
    /// Zone of the provided side.
    #[must_use]
    pub fn zone(&self, side: Side) -> &ZoneConfig {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }
}

impl Default for ZonesConfig {
    fn default() -> Self {
        Self {
            player: ZoneConfig::rectangle(0.0),
            opponent: ZoneConfig::rectangle(OPPONENT_OFFSET),
        }
    }
}

/// Serialized form of a monster template.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterTemplateConfig {
    /// Pool key of the template.
    pub id: u32,
    /// Hit points at wave level zero.
    pub hp_max: f32,
    /// Travel speed in world units per second.
    pub move_speed: f32,
    /// Whether the template is a boss.
    #[serde(default)]
    pub is_boss: bool,
}

impl MonsterTemplateConfig {
    /// Converts the entry into the runtime template.
    #[must_use]
    pub const fn template(&self) -> MonsterTemplate {
        MonsterTemplate {
            id: MonsterTemplateId::new(self.id),
            hp_max: self.hp_max,
            move_speed: self.move_speed,
            is_boss: self.is_boss,
        }
    }
}

/// Monster templates and scaling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterCatalogConfig {
    /// Every template that may be spawned.
    pub templates: Vec<MonsterTemplateConfig>,
    /// Hit point multiplier applied once per wave level.
    pub hp_growth: f32,
    /// Seconds a dead monster lingers before returning to its pool.
    pub death_delay_seconds: f32,
}

impl MonsterCatalogConfig {
    /// Delay between death and deactivation.
    #[must_use]
    pub fn death_delay(&self) -> Duration {
        saturating_seconds(self.death_delay_seconds)
    }
}

impl Default for MonsterCatalogConfig {
    fn default() -> Self {
        Self {
            templates: vec![
                MonsterTemplateConfig {
                    id: 0,
                    hp_max: 100.0,
                    move_speed: 1.0,
                    is_boss: false,
                },
                MonsterTemplateConfig {
                    id: 1,
                    hp_max: 2_500.0,
                    move_speed: 0.5,
                    is_boss: true,
                },
            ],
            hp_growth: 1.1,
            death_delay_seconds: 1.0,
        }
    }
}

/// Combat statistics per unit kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitCatalogConfig {
    /// Normal archer statistics.
    pub normal_archer: UnitStats,
    /// Normal warrior statistics.
    pub normal_warrior: UnitStats,
    /// Rare archer statistics.
    pub rare_archer: UnitStats,
    /// Rare warrior statistics.
    pub rare_warrior: UnitStats,
    /// Hero magician statistics.
    pub hero_magician: UnitStats,
    /// Hero warrior statistics.
    pub hero_warrior: UnitStats,
    /// Epic magician statistics.
    pub epic_magician: UnitStats,
    /// Epic warrior statistics.
    pub epic_warrior: UnitStats,
}

impl UnitCatalogConfig {
    /// Statistics of the provided kind. Illegal kinds fall back to their grade's warrior.
    #[must_use]
    pub fn stats(&self, kind: UnitKind) -> UnitStats {
        use merge_defence_core::Grade;

        match (kind.grade(), kind.class()) {
            (Grade::Normal, UnitClass::Archer) => self.normal_archer,
            (Grade::Normal, _) => self.normal_warrior,
            (Grade::Rare, UnitClass::Archer) => self.rare_archer,
            (Grade::Rare, _) => self.rare_warrior,
            (Grade::Hero, UnitClass::Magician) => self.hero_magician,
            (Grade::Hero, _) => self.hero_warrior,
            (Grade::Epic, UnitClass::Magician) => self.epic_magician,
            (Grade::Epic, _) => self.epic_warrior,
        }
    }
}

const fn stats(base_damage: f32, attack_speed: f32, attack_range: f32) -> UnitStats {
    UnitStats {
        base_damage,
        attack_speed,
        attack_range,
    }
}

impl Default for UnitCatalogConfig {
    fn default() -> Self {
        Self {
            normal_archer: stats(10.0, 1.0, 1.3),
            normal_warrior: stats(12.0, 0.8, 0.9),
            rare_archer: stats(25.0, 1.2, 1.4),
            rare_warrior: stats(30.0, 1.0, 1.0),
            hero_magician: stats(60.0, 0.8, 1.6),
            hero_warrior: stats(70.0, 1.1, 1.1),
            epic_magician: stats(150.0, 1.0, 1.8),
            epic_warrior: stats(170.0, 1.3, 1.2),
        }
    }
}

/// Serialized form of a skill template.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillConfig {
    /// Cast chance in percent.
    pub gravity: u8,
    /// Placement of the area.
    pub anchor: SkillAnchor,
    /// Multiplier applied to the caster's damage.
    pub damage_rate: f32,
    /// Number of damage pulses.
    pub repeat_count: u32,
    /// Seconds between pulses.
    pub repeat_delay_seconds: f32,
    /// Upper bound of monsters hit per pulse.
    pub max_targets: usize,
    /// Radius of the area.
    pub range: f32,
}

impl SkillConfig {
    fn template(&self, id: u32) -> SkillTemplate {
        SkillTemplate {
            id: SkillTemplateId::new(id),
            gravity: self.gravity.min(100),
            anchor: self.anchor,
            damage_rate: self.damage_rate,
            repeat_count: self.repeat_count,
            repeat_delay: saturating_seconds(self.repeat_delay_seconds),
            max_targets: self.max_targets,
            range: self.range,
        }
    }
}

/// Skills per unit class.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCatalogConfig {
    /// Archer volley.
    pub archer: SkillConfig,
    /// Warrior whirlwind.
    pub warrior: SkillConfig,
    /// Magician blast.
    pub magician: SkillConfig,
}

impl SkillCatalogConfig {
    /// Skill carried by every unit of the provided class.
    #[must_use]
    pub fn template(&self, class: UnitClass) -> SkillTemplate {
        match class {
            UnitClass::Archer => self.archer.template(0),
            UnitClass::Warrior => self.warrior.template(1),
            UnitClass::Magician => self.magician.template(2),
        }
    }
}

impl Default for SkillCatalogConfig {
    fn default() -> Self {
        Self {
            archer: SkillConfig {
                gravity: 10,
                anchor: SkillAnchor::Target,
                damage_rate: 1.5,
                repeat_count: 1,
                repeat_delay_seconds: 0.0,
                max_targets: 3,
                range: 1.0,
            },
            warrior: SkillConfig {
                gravity: 15,
                anchor: SkillAnchor::Caster,
                damage_rate: 1.2,
                repeat_count: 3,
                repeat_delay_seconds: 0.3,
                max_targets: 5,
                range: 0.9,
            },
            magician: SkillConfig {
                gravity: 20,
                anchor: SkillAnchor::Target,
                damage_rate: 2.0,
                repeat_count: 2,
                repeat_delay_seconds: 0.5,
                max_targets: 4,
                range: 1.2,
            },
        }
    }
}

/// Presentation hints emitted alongside grid mutations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Where player summons start their flight.
    pub player_summon_origin: WorldPoint,
    /// Where opponent summons start their flight.
    pub opponent_summon_origin: WorldPoint,
    /// Height of the flight apex above the higher endpoint.
    pub summon_apex_lift: f32,
    /// Duration of a summon flight in seconds.
    pub summon_flight_seconds: f32,
    /// Travel speed of swapped stacks in world units per second.
    pub swap_speed: f32,
}

impl MotionConfig {
    /// Summon flight origin of the provided side.
    #[must_use]
    pub const fn summon_origin(&self, side: Side) -> WorldPoint {
        match side {
            Side::Player => self.player_summon_origin,
            Side::Opponent => self.opponent_summon_origin,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            player_summon_origin: WorldPoint::new(0.0, -3.0),
            opponent_summon_origin: WorldPoint::new(0.0, 6.4),
            summon_apex_lift: 2.0,
            summon_flight_seconds: 0.5,
            swap_speed: 5.0,
        }
    }
}
