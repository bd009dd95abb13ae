#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Merge Defence engine.
//!
//! Adapters and automated players submit [`Command`] values describing desired
//! mutations, the world executes them through its `apply` entry point and
//! broadcasts [`Event`] values. Systems consume event streams together with the
//! read-only views defined here ([`UnitView`], [`MonsterView`], [`GridView`],
//! [`WaveStatus`]) and answer exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod board;
mod catalog;
pub mod merge;
mod views;

pub use board::{BoardLayout, CellIndex, GridCoord, WorldPoint, CELL_COUNT, GRID_COLUMNS, GRID_ROWS};
pub use catalog::{
    AttackEffect, EpicRecipe, GambleTier, Grade, MonsterTemplate, SkillAnchor, SkillTemplate,
    SkillTemplateId, UnitClass, UnitKind, UnitStats, UpgradeTier,
};
pub use merge::{StackSnapshot, STACK_CAPACITY};
pub use views::{
    EconomySnapshot, GridView, MonsterSnapshot, MonsterView, UnitSnapshot, UnitView, WaveStatus,
};

/// Highest number of simultaneously alive monsters tracked by the world.
pub const MONSTER_LIMIT: u32 = 100;

/// Converts a seconds value taken from tuning data into a [`Duration`].
///
/// Negative and NaN inputs clamp to zero, values beyond the representable
/// range clamp to [`Duration::MAX`].
#[must_use]
pub fn saturating_seconds(seconds: f32) -> Duration {
    if seconds.is_nan() || seconds <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f32(seconds).unwrap_or(Duration::MAX)
}

/// The two boards competing in a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// The human-controlled board.
    Player,
    /// The automated opponent's board.
    Opponent,
}

impl Side {
    /// Both sides, player first.
    pub const ALL: [Side; 2] = [Side::Player, Side::Opponent];

    /// The side facing this one.
    #[must_use]
    pub const fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Phase of the wave state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Countdown before the first wave.
    Loading,
    /// Normal monsters are streaming in.
    Wave,
    /// Boss fight.
    Boss,
    /// Break between a boss fight and the next wave.
    Reward,
    /// Terminal failure state.
    GameOver,
}

/// Horizontal orientation of a walking monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Sprite mirrored to face left.
    Left,
    /// Sprite facing right.
    Right,
}

/// Unique identifier assigned to a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(u32);

impl UnitId {
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

/// Unique identifier assigned to a pooled monster slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId(u32);

impl MonsterId {
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

/// Identifier of a monster template, also the key of its pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterTemplateId(u32);

impl MonsterTemplateId {
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

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Buys a unit of `grade` with a random legal class for the side's gold.
    Summon {
        /// Side paying for and receiving the unit.
        side: Side,
        /// Grade of the summoned unit.
        grade: Grade,
    },
    /// Spends gems on a chance at a unit of the tier's grade.
    Gamble {
        /// Tier to roll.
        tier: GambleTier,
    },
    /// Places a unit of the provided kind without charging for it.
    PlaceUnit {
        /// Board receiving the unit.
        side: Side,
        /// Kind of the new unit.
        kind: UnitKind,
    },
    /// Destroys the front unit of a cell, topping the cell up from a donor.
    RemoveUnit {
        /// Board holding the cell.
        side: Side,
        /// Cell losing a unit.
        cell: CellIndex,
    },
    /// Destroys every unit of a cell.
    ClearCell {
        /// Board holding the cell.
        side: Side,
        /// Cell being emptied.
        cell: CellIndex,
    },
    /// Exchanges the stacks held by two cells.
    SwapCells {
        /// Board holding both cells.
        side: Side,
        /// First cell.
        first: CellIndex,
        /// Second cell.
        second: CellIndex,
    },
    /// Merges a full stack into a single unit of the next grade.
    PromoteStack {
        /// Board holding the stack.
        side: Side,
        /// Cell holding three units of one kind.
        cell: CellIndex,
        /// Grade requested for the new unit.
        target: Grade,
    },
    /// Consumes a recipe's ingredients to create an epic unit.
    CombineEpic {
        /// Board supplying the ingredients.
        side: Side,
        /// Recipe to combine.
        recipe: EpicRecipe,
    },
    /// Buys the next level of a damage upgrade band.
    PurchaseUpgrade {
        /// Band to raise.
        tier: UpgradeTier,
    },
    /// Activates a monster of the template in a side's spawn zone.
    SpawnMonster {
        /// Zone receiving the monster.
        side: Side,
        /// Template to activate.
        template: MonsterTemplateId,
    },
    /// Announces a basic attack so presentation can play the attacker's effect.
    LaunchAttack {
        /// Attacking unit.
        unit: UnitId,
        /// Monster under attack.
        monster: MonsterId,
    },
    /// Applies damage to a monster.
    HitMonster {
        /// Monster receiving the damage.
        monster: MonsterId,
        /// Amount of hit points removed.
        damage: f32,
    },
    /// Moves the wave state machine into a new phase.
    SetGameState {
        /// Phase to enter.
        state: GameState,
    },
    /// Increments the wave level by one.
    AdvanceWaveLevel,
    /// Publishes the whole seconds remaining on the running phase timer.
    AnnounceWaveTime {
        /// Remaining whole seconds.
        seconds: u32,
    },
    /// Shows the "next wave incoming" countdown on both spawn zones.
    StartNextWaveCountdown,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a unit joined a cell.
    UnitPlaced {
        /// Board holding the cell.
        side: Side,
        /// Cell that received the unit.
        cell: CellIndex,
        /// Identifier of the new unit.
        unit: UnitId,
        /// Kind of the new unit.
        kind: UnitKind,
        /// Units in the cell after placement.
        count: u8,
        /// Whether presentation may refresh the cell right away.
        immediate: bool,
    },
    /// Confirms that the front unit of a cell was destroyed.
    UnitRemoved {
        /// Board holding the cell.
        side: Side,
        /// Cell that lost the unit.
        cell: CellIndex,
        /// Identifier of the destroyed unit.
        unit: UnitId,
        /// Units left in the cell before any pull-over.
        remaining: u8,
    },
    /// Confirms that every unit of a cell was destroyed.
    CellCleared {
        /// Board holding the cell.
        side: Side,
        /// Cell that was emptied.
        cell: CellIndex,
        /// Kind the cell held.
        kind: UnitKind,
        /// Number of destroyed units.
        removed: u8,
    },
    /// Confirms that a unit moved from a donor cell into a shrunken stack.
    UnitPulled {
        /// Board holding both cells.
        side: Side,
        /// Donor cell.
        from: CellIndex,
        /// Cell that was topped up.
        to: CellIndex,
        /// Identifier of the relocated unit.
        unit: UnitId,
    },
    /// Confirms that two cells exchanged stacks.
    CellsSwapped {
        /// Board holding both cells.
        side: Side,
        /// First cell, now holding the second cell's former stack.
        first: CellIndex,
        /// Second cell, now holding the first cell's former stack.
        second: CellIndex,
        /// Travel time of the stack that moved into `first`, zero when empty.
        into_first: Duration,
        /// Travel time of the stack that moved into `second`, zero when empty.
        into_second: Duration,
    },
    /// Confirms that a full stack was merged into a higher grade unit.
    StackPromoted {
        /// Board holding the stack.
        side: Side,
        /// Cell that held the full stack.
        cell: CellIndex,
        /// Kind of the three consumed units.
        consumed: UnitKind,
        /// Kind of the created unit.
        produced: UnitKind,
        /// Cell that received the created unit.
        placed_at: CellIndex,
    },
    /// Confirms that a recipe produced an epic unit.
    EpicCombined {
        /// Board supplying the ingredients.
        side: Side,
        /// Recipe that was combined.
        recipe: EpicRecipe,
        /// Cell that received the epic unit.
        placed_at: CellIndex,
    },
    /// Describes the curved flight of a freshly summoned unit.
    SummonLaunched {
        /// Board receiving the unit.
        side: Side,
        /// Destination cell.
        cell: CellIndex,
        /// Identifier of the summoned unit.
        unit: UnitId,
        /// Quadratic bezier control points: start, apex, destination.
        path: [WorldPoint; 3],
        /// Flight duration.
        duration: Duration,
    },
    /// Reports the outcome of a gem gamble.
    GambleResolved {
        /// Tier that was rolled.
        tier: GambleTier,
        /// Kind awarded when the roll succeeded.
        awarded: Option<UnitKind>,
    },
    /// Confirms that an upgrade band gained a level.
    UpgradeLevelChanged {
        /// Band that changed.
        tier: UpgradeTier,
        /// New level.
        level: u32,
    },
    /// Reports the number of units on a side's board.
    UnitCountChanged {
        /// Board that changed.
        side: Side,
        /// Units on the board.
        count: u32,
    },
    /// Reports a side's gold balance.
    GoldChanged {
        /// Purse that changed.
        side: Side,
        /// New balance.
        amount: u32,
    },
    /// Reports the player's gem balance.
    GemChanged {
        /// New balance.
        amount: u32,
    },
    /// Confirms that a monster was activated.
    MonsterSpawned {
        /// Identifier of the pooled monster.
        monster: MonsterId,
        /// Zone the monster walks in.
        side: Side,
        /// Template the monster was activated from.
        template: MonsterTemplateId,
        /// Hit points at activation.
        hp_max: f32,
        /// Whether the slot was reused from the pool.
        reused: bool,
    },
    /// A unit started a basic attack on a living monster.
    AttackLaunched {
        /// Board of the attacker.
        side: Side,
        /// Attacking unit.
        unit: UnitId,
        /// Monster under attack.
        monster: MonsterId,
        /// Effect of the attacker's class.
        effect: AttackEffect,
        /// Anchor of the attacker's cell.
        from: WorldPoint,
        /// Position of the monster when the attack started.
        to: WorldPoint,
        /// Flight time of the effect, zero for melee.
        travel: Duration,
    },
    /// Confirms that a monster lost hit points.
    MonsterDamaged {
        /// Monster that was hit.
        monster: MonsterId,
        /// Hit points remaining.
        hp: f32,
    },
    /// Announces a monster's death.
    MonsterDied {
        /// Monster that died.
        monster: MonsterId,
        /// Zone the monster walked in.
        side: Side,
        /// Whether boss rewards were granted.
        is_boss: bool,
    },
    /// Confirms that a dead monster returned to its pool.
    MonsterDeactivated {
        /// Monster returned to the pool.
        monster: MonsterId,
    },
    /// Reports that a monster changed horizontal orientation.
    MonsterTurned {
        /// Monster that turned.
        monster: MonsterId,
        /// New orientation.
        facing: Facing,
    },
    /// Reports the number of alive monsters.
    MonsterCountChanged {
        /// Monsters alive across both zones.
        count: u32,
        /// Overflow threshold.
        max: u32,
    },
    /// Reports the current wave level.
    WaveLevelChanged {
        /// New wave level.
        level: u32,
    },
    /// Reports the whole seconds remaining on the phase timer.
    WaveTimeChanged {
        /// Remaining whole seconds.
        seconds: u32,
    },
    /// Announces a phase transition.
    GameStateChanged {
        /// Phase that ended.
        from: GameState,
        /// Phase that began.
        to: GameState,
    },
    /// Announces the "next wave incoming" countdown on a spawn zone.
    NextWaveCountdownStarted {
        /// Zone showing the countdown.
        side: Side,
    },
    /// Announces the end of the run.
    GameOver {
        /// Wave level reached.
        wave_level: u32,
    },
    /// Reports that a summon was refused.
    SummonRejected {
        /// Side that attempted the summon.
        side: Side,
        /// Specific reason the summon failed.
        reason: SummonError,
    },
    /// Reports that a gamble was refused.
    GambleRejected {
        /// Tier that was requested.
        tier: GambleTier,
        /// Specific reason the gamble failed.
        reason: GambleError,
    },
    /// Reports that a free placement was refused.
    PlacementRejected {
        /// Board that was targeted.
        side: Side,
        /// Requested kind.
        kind: UnitKind,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Reports that a cell operation was refused.
    CellCommandRejected {
        /// Board that was targeted.
        side: Side,
        /// Cell that was targeted.
        cell: CellIndex,
        /// Specific reason the operation failed.
        reason: CellError,
    },
    /// Reports that a promotion was refused.
    PromotionRejected {
        /// Board that was targeted.
        side: Side,
        /// Cell that was targeted.
        cell: CellIndex,
        /// Specific reason the promotion failed.
        reason: PromotionError,
    },
    /// Reports that a combination was refused; nothing was consumed.
    CombinationRejected {
        /// Board that was targeted.
        side: Side,
        /// Requested recipe.
        recipe: EpicRecipe,
        /// Specific reason the combination failed.
        reason: CombinationError,
    },
    /// Reports that an upgrade purchase was refused.
    UpgradePurchaseRejected {
        /// Requested band.
        tier: UpgradeTier,
        /// Specific reason the purchase failed.
        reason: PurchaseError,
    },
    /// Reports that a monster spawn was refused.
    SpawnRejected {
        /// Requested zone.
        side: Side,
        /// Requested template.
        template: MonsterTemplateId,
        /// Specific reason the spawn failed.
        reason: SpawnError,
    },
}

/// Reasons a gold summon may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum SummonError {
    /// The board already holds the maximum number of units.
    #[error("unit cap of {cap} reached")]
    UnitCapReached {
        /// Maximum units per board.
        cap: u32,
    },
    /// The purse cannot cover the summon price.
    #[error("summon costs {price} gold but only {available} is available")]
    InsufficientGold {
        /// Price of the summon.
        price: u32,
        /// Gold held.
        available: u32,
    },
    /// No cell can take the drawn unit.
    #[error("no cell can take another unit")]
    NoFreeCell,
}

/// Reasons a gem gamble may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum GambleError {
    /// The board already holds the maximum number of units.
    #[error("unit cap of {cap} reached")]
    UnitCapReached {
        /// Maximum units per board.
        cap: u32,
    },
    /// The player cannot cover the gamble price.
    #[error("gamble costs {price} gems but only {available} are available")]
    InsufficientGems {
        /// Price of the gamble.
        price: u32,
        /// Gems held.
        available: u32,
    },
    /// The purse cannot cover the summon a winning roll would make.
    #[error("the awarded summon costs {price} gold but only {available} is available")]
    InsufficientGold {
        /// Price of the summon.
        price: u32,
        /// Gold held.
        available: u32,
    },
    /// No cell can take the drawn unit.
    #[error("no cell can take another unit")]
    NoFreeCell,
}

impl From<SummonError> for GambleError {
    fn from(error: SummonError) -> Self {
        match error {
            SummonError::UnitCapReached { cap } => GambleError::UnitCapReached { cap },
            SummonError::InsufficientGold { price, available } => {
                GambleError::InsufficientGold { price, available }
            }
            SummonError::NoFreeCell => GambleError::NoFreeCell,
        }
    }
}

/// Reasons a free placement may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// The class is not available at the requested grade.
    #[error("class is not available at this grade")]
    IllegalKind,
    /// No cell can take the unit.
    #[error("no cell can take another unit")]
    NoFreeCell,
}

/// Reasons a cell operation may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum CellError {
    /// The index addresses no cell on the board.
    #[error("cell index is outside the board")]
    OutOfBounds,
    /// The cell holds no units.
    #[error("cell is empty")]
    Empty,
}

/// Reasons a promotion may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PromotionError {
    /// The index addresses no cell on the board.
    #[error("cell index is outside the board")]
    OutOfBounds,
    /// The stack does not hold three units.
    #[error("stack holds {count} units, three are required")]
    NotFull {
        /// Units in the stack.
        count: u8,
    },
    /// Epic units cannot be promoted.
    #[error("stack is already at the highest grade")]
    HighestGrade,
    /// The requested grade is not the successor of the stack's grade.
    #[error("stack promotes to {expected:?}, not {requested:?}")]
    GradeMismatch {
        /// Grade the stack promotes to.
        expected: Grade,
        /// Grade that was requested.
        requested: Grade,
    },
}

/// Reasons an epic combination may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum CombinationError {
    /// No cell holds one of the ingredients.
    #[error("no cell holds a {kind:?}")]
    MissingIngredient {
        /// Ingredient that was not found.
        kind: UnitKind,
    },
    /// The epic unit has nowhere to go once the ingredients are consumed.
    #[error("no cell can take the combined unit")]
    NoFreeCell,
}

/// Reasons an upgrade purchase may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PurchaseError {
    /// The player cannot cover a gold price.
    #[error("upgrade costs {price} gold but only {available} is available")]
    InsufficientGold {
        /// Price of the upgrade.
        price: u32,
        /// Gold held.
        available: u32,
    },
    /// The player cannot cover a gem price.
    #[error("upgrade costs {price} gems but only {available} are available")]
    InsufficientGems {
        /// Price of the upgrade.
        price: u32,
        /// Gems held.
        available: u32,
    },
}

/// Reasons a monster spawn may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum SpawnError {
    /// The run has ended.
    #[error("the run is over")]
    GameOver,
    /// The template is not part of the configured catalog.
    #[error("unknown monster template")]
    UnknownTemplate,
}
