use serde::{Deserialize, Serialize};

use crate::{
    merge::{self, StackSnapshot},
    CellIndex, EpicRecipe, GameState, MonsterId, MonsterTemplateId, Side, SkillTemplate,
    UnitId, UnitKind, UnitStats, UpgradeTier, WorldPoint,
};

/// Immutable representation of a single unit used by combat.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitSnapshot {
    /// Unique identifier of the unit.
    pub id: UnitId,
    /// Board the unit fights on.
    pub side: Side,
    /// Cell currently holding the unit.
    pub cell: CellIndex,
    /// Grade and class of the unit.
    pub kind: UnitKind,
    /// Centre of the holding cell. Range checks are measured from here.
    pub anchor: WorldPoint,
    /// Damage per basic hit with upgrades applied.
    pub damage: f32,
    /// Base statistics of the kind.
    pub stats: UnitStats,
    /// Skill rolled against on every action.
    pub skill: SkillTemplate,
}

/// Read-only view of every unit on both boards.
#[derive(Clone, Debug, Default)]
pub struct UnitView {
    snapshots: Vec<UnitSnapshot>,
}

impl UnitView {
    /// Creates a view from the provided snapshots, sorted by identifier.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<UnitSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured units in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &UnitSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a unit by identifier.
    #[must_use]
    pub fn get(&self, id: UnitId) -> Option<&UnitSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of captured units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no units were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Immutable representation of an active monster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonsterSnapshot {
    /// Unique identifier of the monster.
    pub id: MonsterId,
    /// Spawn zone the monster walks in.
    pub side: Side,
    /// Template the monster was activated from.
    pub template: MonsterTemplateId,
    /// Activation sequence number, increasing across the run.
    pub sequence: u64,
    /// Current position.
    pub position: WorldPoint,
    /// Remaining hit points.
    pub hp: f32,
    /// Hit points at activation.
    pub hp_max: f32,
    /// Whether the monster is a boss.
    pub is_boss: bool,
}

impl MonsterSnapshot {
    /// Reports whether the monster can still be targeted.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }
}

/// Read-only view of active monsters, player zone first then opponent zone,
/// each in activation order.
#[derive(Clone, Debug, Default)]
pub struct MonsterView {
    snapshots: Vec<MonsterSnapshot>,
}

impl MonsterView {
    /// Creates a view from the provided snapshots in canonical scan order.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<MonsterSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| (snapshot.side, snapshot.sequence));
        Self { snapshots }
    }

    /// Iterator over the captured monsters in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &MonsterSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a monster by identifier.
    #[must_use]
    pub fn get(&self, id: MonsterId) -> Option<&MonsterSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.id == id)
    }

    /// Number of captured monsters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no monsters were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Read-only view of one side's board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridView {
    side: Side,
    stacks: Vec<StackSnapshot>,
}

impl GridView {
    /// Creates a view from stacks listed in cell order.
    #[must_use]
    pub fn new(side: Side, mut stacks: Vec<StackSnapshot>) -> Self {
        stacks.sort_by_key(|stack| stack.cell);
        Self { side, stacks }
    }

    /// Side owning the board.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Stack held by the provided cell.
    #[must_use]
    pub fn stack(&self, cell: CellIndex) -> Option<&StackSnapshot> {
        self.stacks.get(cell.as_usize())
    }

    /// Iterator over every stack in cell order.
    pub fn iter(&self) -> impl Iterator<Item = &StackSnapshot> {
        self.stacks.iter()
    }

    /// Total number of units on the board.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.stacks.iter().map(|stack| u32::from(stack.count)).sum()
    }

    /// Cell a new unit of `kind` would land in.
    #[must_use]
    pub fn placement_cell(&self, kind: UnitKind) -> Option<CellIndex> {
        merge::placement_cell(&self.stacks, kind)
    }

    /// First full stack that can be promoted.
    #[must_use]
    pub fn first_promotable(&self) -> Option<CellIndex> {
        merge::first_promotable(&self.stacks)
    }

    /// Cells a combination of `recipe` would draw from.
    #[must_use]
    pub fn recipe_cells(&self, recipe: EpicRecipe) -> Option<[CellIndex; 3]> {
        merge::recipe_cells(&self.stacks, recipe)
    }
}

/// Snapshot of the wave state machine as recorded by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WaveStatus {
    /// Phase the world is in.
    pub state: GameState,
    /// Current wave level.
    pub wave_level: u32,
    /// Monsters alive across both zones.
    pub monster_count: u32,
    /// Bosses alive across both zones.
    pub living_bosses: u32,
}

/// Snapshot of both purses and the shared upgrade levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EconomySnapshot {
    /// Player gold.
    pub player_gold: u32,
    /// Opponent gold.
    pub opponent_gold: u32,
    /// Player gems.
    pub gem: u32,
    /// Price of the player's next summon.
    pub player_summon_price: u32,
    /// Price of the opponent's next summon.
    pub opponent_summon_price: u32,
    /// Levels of the rare, hero and epic upgrade bands.
    pub upgrade_levels: [u32; 3],
}

impl EconomySnapshot {
    /// Gold held by the provided side.
    #[must_use]
    pub const fn gold(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_gold,
            Side::Opponent => self.opponent_gold,
        }
    }

    /// Next summon price of the provided side.
    #[must_use]
    pub const fn summon_price(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_summon_price,
            Side::Opponent => self.opponent_summon_price,
        }
    }

    /// Level of the provided upgrade band.
    #[must_use]
    pub const fn upgrade_level(&self, tier: UpgradeTier) -> u32 {
        match tier {
            UpgradeTier::Rare => self.upgrade_levels[0],
            UpgradeTier::Hero => self.upgrade_levels[1],
            UpgradeTier::Epic => self.upgrade_levels[2],
        }
    }
}
