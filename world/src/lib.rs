#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Merge Defence.
//!
//! The world owns both boards, both spawn zones, the economy and the wave
//! state. It only changes through [`apply`], reports every change as an
//! [`Event`] and exposes read-only views through the [`query`] module.

pub mod config;
mod economy;
mod grid;
mod monsters;

use std::{collections::BTreeMap, time::Duration};

use merge_defence_core::{
    merge, saturating_seconds, BoardLayout, CellError, CellIndex, CombinationError, Command,
    EpicRecipe, Event, GambleError, GambleTier, GameState, Grade, MonsterId, MonsterTemplate,
    MonsterTemplateId, PlacementError, PromotionError, PurchaseError, Side, SpawnError,
    SummonError, UnitId, UnitKind, UpgradeTier, WorldPoint, MONSTER_LIMIT,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

pub use config::SimulationConfig;

use economy::{Economy, Price};
use grid::{Grid, Removal, Unit};
use monsters::{Activation, HitOutcome, SpawnZone};

const PERCENT: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct WaveState {
    state: GameState,
    level: u32,
    monster_count: u32,
    announced_seconds: u32,
}

/// Represents the authoritative Merge Defence world state.
#[derive(Debug)]
pub struct World {
    config: SimulationConfig,
    player_grid: Grid,
    opponent_grid: Grid,
    player_zone: SpawnZone,
    opponent_zone: SpawnZone,
    templates: BTreeMap<MonsterTemplateId, MonsterTemplate>,
    economy: Economy,
    wave: WaveState,
    rng: ChaCha8Rng,
    next_unit_id: u32,
    next_monster_id: u32,
    spawn_sequence: u64,
    tick_index: u64,
}

impl World {
    /// Creates a world in the loading phase with empty boards.
    ///
    /// `seed` drives class draws and gamble rolls.
    #[must_use]
    pub fn new(config: SimulationConfig, seed: u64) -> Self {
        let templates = config
            .monsters
            .templates
            .iter()
            .map(|entry| {
                let template = entry.template();
                (template.id, template)
            })
            .collect();
        Self {
            player_grid: Grid::new(),
            opponent_grid: Grid::new(),
            player_zone: SpawnZone::new(Side::Player, config.zones.zone(Side::Player)),
            opponent_zone: SpawnZone::new(Side::Opponent, config.zones.zone(Side::Opponent)),
            templates,
            economy: Economy::new(config.economy.clone()),
            wave: WaveState {
                state: GameState::Loading,
                level: 0,
                monster_count: 0,
                announced_seconds: 0,
            },
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_unit_id: 0,
            next_monster_id: 0,
            spawn_sequence: 0,
            tick_index: 0,
            config,
        }
    }

    fn grid(&self, side: Side) -> &Grid {
        match side {
            Side::Player => &self.player_grid,
            Side::Opponent => &self.opponent_grid,
        }
    }

    fn grid_mut(&mut self, side: Side) -> &mut Grid {
        match side {
            Side::Player => &mut self.player_grid,
            Side::Opponent => &mut self.opponent_grid,
        }
    }

    fn zone(&self, side: Side) -> &SpawnZone {
        match side {
            Side::Player => &self.player_zone,
            Side::Opponent => &self.opponent_zone,
        }
    }

    fn layout(&self, side: Side) -> BoardLayout {
        self.config.boards.layout(side)
    }

    fn allocate_unit(&mut self, kind: UnitKind) -> Unit {
        let id = UnitId::new(self.next_unit_id);
        self.next_unit_id = self.next_unit_id.wrapping_add(1);
        Unit { id, kind }
    }

    fn draw_kind(&mut self, grade: Grade) -> UnitKind {
        let classes = grade.legal_classes();
        let class = classes[self.rng.gen_range(0..classes.len())];
        UnitKind::new(grade, class)
    }

    fn push_unit_count(&self, side: Side, out_events: &mut Vec<Event>) {
        out_events.push(Event::UnitCountChanged {
            side,
            count: self.grid(side).unit_count(),
        });
    }

    fn push_removal(side: Side, removal: &Removal, out_events: &mut Vec<Event>) {
        out_events.push(Event::UnitRemoved {
            side,
            cell: removal.cell,
            unit: removal.removed.id,
            remaining: removal.remaining,
        });
        if let Some(pull) = removal.pulled {
            out_events.push(Event::UnitPulled {
                side,
                from: pull.from,
                to: removal.cell,
                unit: pull.unit,
            });
        }
    }

    /// Runs every summon check and draws the kind without charging anything.
    fn prepare_summon(
        &mut self,
        side: Side,
        grade: Grade,
    ) -> Result<(UnitKind, u32), SummonError> {
        let cap = self.economy.config().unit_cap;
        if self.grid(side).unit_count() >= cap {
            return Err(SummonError::UnitCapReached { cap });
        }
        let price = self.economy.summon_price(side);
        let available = self.economy.gold(side);
        if available < price {
            return Err(SummonError::InsufficientGold { price, available });
        }
        let kind = self.draw_kind(grade);
        if self.grid(side).placement_cell(kind).is_none() {
            return Err(SummonError::NoFreeCell);
        }
        Ok((kind, price))
    }

    fn launch_summon(
        &mut self,
        side: Side,
        kind: UnitKind,
        price: u32,
        out_events: &mut Vec<Event>,
    ) {
        let Ok(gold) = self.economy.spend_gold(side, price) else {
            return;
        };
        self.economy.record_summon(side);
        let unit = self.allocate_unit(kind);
        let Some(cell) = self.grid_mut(side).add(unit) else {
            return;
        };

        out_events.push(Event::GoldChanged { side, amount: gold });
        out_events.push(Event::UnitPlaced {
            side,
            cell,
            unit: unit.id,
            kind,
            count: self.grid(side).stack(cell).map_or(0, |stack| stack.count()),
            immediate: false,
        });
        self.push_unit_count(side, out_events);

        let motion = self.config.motion;
        let start = motion.summon_origin(side);
        let end = self.layout(side).cell_anchor(cell);
        let apex = WorldPoint::new(
            (start.x + end.x) / 2.0,
            start.y.max(end.y) + motion.summon_apex_lift,
        );
        out_events.push(Event::SummonLaunched {
            side,
            cell,
            unit: unit.id,
            path: [start, apex, end],
            duration: saturating_seconds(motion.summon_flight_seconds),
        });
    }

    fn summon(&mut self, side: Side, grade: Grade, out_events: &mut Vec<Event>) {
        match self.prepare_summon(side, grade) {
            Ok((kind, price)) => self.launch_summon(side, kind, price, out_events),
            Err(reason) => {
                debug!(?side, ?grade, %reason, "summon rejected");
                out_events.push(Event::SummonRejected { side, reason });
            }
        }
    }

    fn gamble(&mut self, tier: GambleTier, out_events: &mut Vec<Event>) {
        let side = Side::Player;
        let cap = self.economy.config().unit_cap;
        let odds = self.economy.config().gamble.odds(tier);
        let available = self.economy.gem();

        let prepared = if self.grid(side).unit_count() >= cap {
            Err(GambleError::UnitCapReached { cap })
        } else if available < odds.gems {
            Err(GambleError::InsufficientGems {
                price: odds.gems,
                available,
            })
        } else {
            self.prepare_summon(side, tier.grade()).map_err(GambleError::from)
        };
        let (kind, price) = match prepared {
            Ok(prepared) => prepared,
            Err(reason) => {
                debug!(?tier, %reason, "gamble rejected");
                out_events.push(Event::GambleRejected { tier, reason });
                return;
            }
        };

        let Ok(gem) = self.economy.spend_gems(odds.gems) else {
            return;
        };
        out_events.push(Event::GemChanged { amount: gem });

        let roll = self.rng.gen_range(0..PERCENT);
        if roll >= odds.chance_percent {
            out_events.push(Event::GambleResolved {
                tier,
                awarded: None,
            });
            return;
        }

        self.launch_summon(side, kind, price, out_events);
        out_events.push(Event::GambleResolved {
            tier,
            awarded: Some(kind),
        });
    }

    fn place_unit(&mut self, side: Side, kind: UnitKind, out_events: &mut Vec<Event>) {
        let reason = if !kind.is_legal() {
            Some(PlacementError::IllegalKind)
        } else if self.grid(side).placement_cell(kind).is_none() {
            Some(PlacementError::NoFreeCell)
        } else {
            None
        };
        if let Some(reason) = reason {
            debug!(?side, ?kind, %reason, "placement rejected");
            out_events.push(Event::PlacementRejected { side, kind, reason });
            return;
        }

        let unit = self.allocate_unit(kind);
        if let Some(cell) = self.grid_mut(side).add(unit) {
            out_events.push(Event::UnitPlaced {
                side,
                cell,
                unit: unit.id,
                kind,
                count: self.grid(side).stack(cell).map_or(0, |stack| stack.count()),
                immediate: true,
            });
            self.push_unit_count(side, out_events);
        }
    }

    fn remove_unit(&mut self, side: Side, cell: CellIndex, out_events: &mut Vec<Event>) {
        match self.grid_mut(side).remove_unit(cell) {
            Ok(removal) => {
                Self::push_removal(side, &removal, out_events);
                self.push_unit_count(side, out_events);
            }
            Err(reason) => reject_cell(side, cell, reason, out_events),
        }
    }

    fn clear_cell(&mut self, side: Side, cell: CellIndex, out_events: &mut Vec<Event>) {
        let units = match self.grid_mut(side).remove_all(cell) {
            Ok(units) => units,
            Err(reason) => return reject_cell(side, cell, reason, out_events),
        };
        let Some(first) = units.first() else {
            return reject_cell(side, cell, CellError::Empty, out_events);
        };
        out_events.push(Event::CellCleared {
            side,
            cell,
            kind: first.kind,
            removed: units.len() as u8,
        });
        self.push_unit_count(side, out_events);
    }

    fn swap_cells(
        &mut self,
        side: Side,
        first: CellIndex,
        second: CellIndex,
        out_events: &mut Vec<Event>,
    ) {
        if first == second {
            return;
        }
        if let Err(reason) = self.grid_mut(side).swap(first, second) {
            let cell = if first.is_on_board() { second } else { first };
            return reject_cell(side, cell, reason, out_events);
        }

        let layout = self.layout(side);
        let distance = layout.cell_anchor(first).distance(layout.cell_anchor(second));
        let speed = self.config.motion.swap_speed;
        let travel = if speed > 0.0 {
            saturating_seconds(distance / speed)
        } else {
            Duration::ZERO
        };
        let travel_into = |cell: CellIndex| match self.grid(side).stack(cell) {
            Ok(stack) if stack.count() > 0 => travel,
            _ => Duration::ZERO,
        };
        out_events.push(Event::CellsSwapped {
            side,
            first,
            second,
            into_first: travel_into(first),
            into_second: travel_into(second),
        });
    }

    fn promote_stack(
        &mut self,
        side: Side,
        cell: CellIndex,
        target: Grade,
        out_events: &mut Vec<Event>,
    ) {
        let snapshot = match self.grid(side).stack(cell) {
            Ok(stack) => merge::StackSnapshot {
                cell,
                kind: stack.kind(),
                count: stack.count(),
            },
            Err(_) => {
                return reject_promotion(side, cell, PromotionError::OutOfBounds, out_events);
            }
        };
        let Some(consumed) = snapshot.kind.filter(|_| snapshot.count == merge::STACK_CAPACITY)
        else {
            let reason = PromotionError::NotFull {
                count: snapshot.count,
            };
            return reject_promotion(side, cell, reason, out_events);
        };
        let Some(expected) = merge::promotion_grade(&snapshot) else {
            return reject_promotion(side, cell, PromotionError::HighestGrade, out_events);
        };
        if expected != target {
            let reason = PromotionError::GradeMismatch {
                expected,
                requested: target,
            };
            return reject_promotion(side, cell, reason, out_events);
        }

        let produced = self.draw_kind(expected);
        let unit = self.allocate_unit(produced);
        let grid = self.grid_mut(side);
        let removed = grid.remove_all(cell).map_or(0, |units| units.len() as u8);
        let placed_at = grid.replace(cell, unit);
        let count = grid.stack(placed_at).map_or(0, |stack| stack.count());

        out_events.push(Event::CellCleared {
            side,
            cell,
            kind: consumed,
            removed,
        });
        out_events.push(Event::UnitPlaced {
            side,
            cell: placed_at,
            unit: unit.id,
            kind: produced,
            count,
            immediate: true,
        });
        out_events.push(Event::StackPromoted {
            side,
            cell,
            consumed,
            produced,
            placed_at,
        });
        self.push_unit_count(side, out_events);
    }

    fn combine_epic(&mut self, side: Side, recipe: EpicRecipe, out_events: &mut Vec<Event>) {
        let snapshots = self.grid(side).snapshots();
        let Some(cells) = merge::recipe_cells(&snapshots, recipe) else {
            let missing = recipe
                .ingredients()
                .into_iter()
                .find(|kind| merge::ingredient_cell(&snapshots, *kind).is_none())
                .unwrap_or(recipe.output());
            let reason = CombinationError::MissingIngredient { kind: missing };
            return reject_combination(side, recipe, reason, out_events);
        };

        let mut staged = self.grid(side).clone();
        let mut removals = Vec::with_capacity(cells.len());
        for (cell, kind) in cells.into_iter().zip(recipe.ingredients()) {
            match staged.remove_unit(cell) {
                Ok(removal) => removals.push(removal),
                Err(_) => {
                    let reason = CombinationError::MissingIngredient { kind };
                    return reject_combination(side, recipe, reason, out_events);
                }
            }
        }
        let output = recipe.output();
        let unit = self.allocate_unit(output);
        let Some(placed_at) = staged.add(unit) else {
            let reason = CombinationError::NoFreeCell;
            return reject_combination(side, recipe, reason, out_events);
        };
        let count = staged.stack(placed_at).map_or(0, |stack| stack.count());
        *self.grid_mut(side) = staged;

        for removal in &removals {
            Self::push_removal(side, removal, out_events);
        }
        out_events.push(Event::UnitPlaced {
            side,
            cell: placed_at,
            unit: unit.id,
            kind: output,
            count,
            immediate: true,
        });
        out_events.push(Event::EpicCombined {
            side,
            recipe,
            placed_at,
        });
        self.push_unit_count(side, out_events);
    }

    fn purchase_upgrade(&mut self, tier: UpgradeTier, out_events: &mut Vec<Event>) {
        let charged = match self.economy.upgrade_price(tier) {
            Price::Gold(price) => self
                .economy
                .spend_gold(Side::Player, price)
                .map(|amount| Event::GoldChanged {
                    side: Side::Player,
                    amount,
                })
                .map_err(|available| PurchaseError::InsufficientGold { price, available }),
            Price::Gems(price) => self
                .economy
                .spend_gems(price)
                .map(|amount| Event::GemChanged { amount })
                .map_err(|available| PurchaseError::InsufficientGems { price, available }),
        };

        match charged {
            Ok(balance) => {
                out_events.push(balance);
                let level = self.economy.raise_level(tier);
                out_events.push(Event::UpgradeLevelChanged { tier, level });
            }
            Err(reason) => {
                debug!(?tier, %reason, "upgrade purchase rejected");
                out_events.push(Event::UpgradePurchaseRejected { tier, reason });
            }
        }
    }

    fn spawn_monster(
        &mut self,
        side: Side,
        template: MonsterTemplateId,
        out_events: &mut Vec<Event>,
    ) {
        let blocked = (self.wave.state == GameState::GameOver).then_some(SpawnError::GameOver);
        let definition = match (blocked, self.templates.get(&template).copied()) {
            (None, Some(definition)) => definition,
            (blocked, _) => {
                let reason = blocked.unwrap_or(SpawnError::UnknownTemplate);
                debug!(?side, ?template, %reason, "spawn rejected");
                out_events.push(Event::SpawnRejected {
                    side,
                    template,
                    reason,
                });
                return;
            }
        };

        let hp_max = definition.scaled_hp(self.wave.level, self.config.monsters.hp_growth);
        let activation = Activation {
            template: definition,
            hp_max,
            sequence: self.spawn_sequence,
        };
        self.spawn_sequence = self.spawn_sequence.wrapping_add(1);

        let next_id = &mut self.next_monster_id;
        let zone = match side {
            Side::Player => &mut self.player_zone,
            Side::Opponent => &mut self.opponent_zone,
        };
        let (monster, reused) = zone.activate(activation, || {
            let id = MonsterId::new(*next_id);
            *next_id = next_id.wrapping_add(1);
            id
        });
        if reused {
            debug!(?monster, ?template, "monster slot reused");
        }

        self.wave.monster_count = self.wave.monster_count.saturating_add(1).min(MONSTER_LIMIT);
        out_events.push(Event::MonsterSpawned {
            monster,
            side,
            template,
            hp_max,
            reused,
        });
        self.push_monster_count(out_events);
    }

    fn push_monster_count(&self, out_events: &mut Vec<Event>) {
        out_events.push(Event::MonsterCountChanged {
            count: self.wave.monster_count,
            max: MONSTER_LIMIT,
        });
    }

    fn launch_attack(&self, unit: UnitId, monster: MonsterId, out_events: &mut Vec<Event>) {
        let attacker = Side::ALL.into_iter().find_map(|side| {
            self.grid(side).iter().find_map(|(cell, stack)| {
                stack
                    .units()
                    .iter()
                    .find(|held| held.id == unit)
                    .map(|held| (side, cell, held.kind))
            })
        });
        let (Some((side, cell, kind)), Some(target)) = (attacker, query::monster(self, monster))
        else {
            return;
        };
        if !target.is_alive() {
            return;
        }

        let from = self.layout(side).cell_anchor(cell);
        let to = target.position;
        let effect = kind.class().attack_effect();
        out_events.push(Event::AttackLaunched {
            side,
            unit,
            monster,
            effect,
            from,
            to,
            travel: effect.travel_time(from.distance(to)),
        });
    }

    fn hit_monster(&mut self, id: MonsterId, damage: f32, out_events: &mut Vec<Event>) {
        let death_delay = self.config.monsters.death_delay();
        let located = Side::ALL.into_iter().find_map(|side| {
            let zone = match side {
                Side::Player => &mut self.player_zone,
                Side::Opponent => &mut self.opponent_zone,
            };
            zone.monster_mut(id).map(|monster| {
                let outcome = monster.hit(damage, death_delay);
                (side, monster.is_boss(), outcome)
            })
        });
        let Some((side, is_boss, outcome)) = located else {
            return;
        };

        match outcome {
            HitOutcome::AlreadyDead => {}
            HitOutcome::Damaged { hp } => {
                out_events.push(Event::MonsterDamaged { monster: id, hp });
            }
            HitOutcome::Killed => {
                out_events.push(Event::MonsterDamaged {
                    monster: id,
                    hp: 0.0,
                });
                out_events.push(Event::MonsterDied {
                    monster: id,
                    side,
                    is_boss,
                });
                self.wave.monster_count = self.wave.monster_count.saturating_sub(1);
                self.push_monster_count(out_events);
                self.reward_kill(is_boss, out_events);
            }
        }
    }

    fn reward_kill(&mut self, is_boss: bool, out_events: &mut Vec<Event>) {
        let config = self.economy.config();
        let (gold, gem) = if is_boss {
            (config.boss_kill_gold, config.boss_kill_gem)
        } else {
            (config.normal_kill_gold, 0)
        };
        for side in Side::ALL {
            let amount = self.economy.earn_gold(side, gold);
            out_events.push(Event::GoldChanged { side, amount });
        }
        if gem > 0 {
            let amount = self.economy.earn_gems(gem);
            out_events.push(Event::GemChanged { amount });
        }
    }

    fn set_game_state(&mut self, state: GameState, out_events: &mut Vec<Event>) {
        let from = self.wave.state;
        if from == GameState::GameOver {
            debug!(?state, "state change ignored after game over");
            return;
        }
        if from == state {
            return;
        }

        self.wave.state = state;
        info!(?from, to = ?state, wave_level = self.wave.level, "game state changed");
        out_events.push(Event::GameStateChanged { from, to: state });
        if state == GameState::GameOver {
            info!(wave_level = self.wave.level, "game over");
            out_events.push(Event::GameOver {
                wave_level: self.wave.level,
            });
        }
    }

    fn advance_wave_level(&mut self, out_events: &mut Vec<Event>) {
        if self.wave.state == GameState::GameOver {
            return;
        }
        self.wave.level = self.wave.level.saturating_add(1);
        out_events.push(Event::WaveLevelChanged {
            level: self.wave.level,
        });
    }
}

fn reject_cell(side: Side, cell: CellIndex, reason: CellError, out_events: &mut Vec<Event>) {
    debug!(?side, ?cell, %reason, "cell command rejected");
    out_events.push(Event::CellCommandRejected { side, cell, reason });
}

fn reject_promotion(
    side: Side,
    cell: CellIndex,
    reason: PromotionError,
    out_events: &mut Vec<Event>,
) {
    debug!(?side, ?cell, %reason, "promotion rejected");
    out_events.push(Event::PromotionRejected { side, cell, reason });
}

fn reject_combination(
    side: Side,
    recipe: EpicRecipe,
    reason: CombinationError,
    out_events: &mut Vec<Event>,
) {
    debug!(?side, ?recipe, %reason, "combination rejected");
    out_events.push(Event::CombinationRejected {
        side,
        recipe,
        reason,
    });
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
            world.player_zone.advance(dt, out_events);
            world.opponent_zone.advance(dt, out_events);
        }
        Command::Summon { side, grade } => world.summon(side, grade, out_events),
        Command::Gamble { tier } => world.gamble(tier, out_events),
        Command::PlaceUnit { side, kind } => world.place_unit(side, kind, out_events),
        Command::RemoveUnit { side, cell } => world.remove_unit(side, cell, out_events),
        Command::ClearCell { side, cell } => world.clear_cell(side, cell, out_events),
        Command::SwapCells {
            side,
            first,
            second,
        } => world.swap_cells(side, first, second, out_events),
        Command::PromoteStack { side, cell, target } => {
            world.promote_stack(side, cell, target, out_events);
        }
        Command::CombineEpic { side, recipe } => world.combine_epic(side, recipe, out_events),
        Command::PurchaseUpgrade { tier } => world.purchase_upgrade(tier, out_events),
        Command::SpawnMonster { side, template } => {
            world.spawn_monster(side, template, out_events);
        }
        Command::LaunchAttack { unit, monster } => world.launch_attack(unit, monster, out_events),
        Command::HitMonster { monster, damage } => world.hit_monster(monster, damage, out_events),
        Command::SetGameState { state } => world.set_game_state(state, out_events),
        Command::AdvanceWaveLevel => world.advance_wave_level(out_events),
        Command::AnnounceWaveTime { seconds } => {
            if world.wave.state != GameState::GameOver {
                world.wave.announced_seconds = seconds;
                out_events.push(Event::WaveTimeChanged { seconds });
            }
        }
        Command::StartNextWaveCountdown => {
            if world.wave.state != GameState::GameOver {
                for side in Side::ALL {
                    out_events.push(Event::NextWaveCountdownStarted { side });
                }
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use merge_defence_core::{
        BoardLayout, EconomySnapshot, Facing, GameState, GridView, MonsterId, MonsterSnapshot,
        MonsterTemplateId, MonsterView, Side, UnitSnapshot, UnitView, WaveStatus,
    };

    use super::World;

    /// Captures every unit on both boards with upgrades applied.
    #[must_use]
    pub fn unit_view(world: &World) -> UnitView {
        let mut snapshots = Vec::new();
        for side in Side::ALL {
            let layout = world.layout(side);
            for (cell, stack) in world.grid(side).iter() {
                for unit in stack.units() {
                    let stats = world.config.units.stats(unit.kind);
                    snapshots.push(UnitSnapshot {
                        id: unit.id,
                        side,
                        cell,
                        kind: unit.kind,
                        anchor: layout.cell_anchor(cell),
                        damage: stats.base_damage
                            * world.economy.damage_multiplier(unit.kind.grade()),
                        stats,
                        skill: world.config.skills.template(unit.kind.class()),
                    });
                }
            }
        }
        UnitView::from_snapshots(snapshots)
    }

    /// Captures every walking monster in scan order.
    #[must_use]
    pub fn monster_view(world: &World) -> MonsterView {
        let snapshots = Side::ALL
            .into_iter()
            .flat_map(|side| world.zone(side).walking())
            .collect();
        MonsterView::from_snapshots(snapshots)
    }

    /// Captures a single walking monster.
    #[must_use]
    pub fn monster(world: &World, id: MonsterId) -> Option<MonsterSnapshot> {
        Side::ALL
            .into_iter()
            .flat_map(|side| world.zone(side).walking())
            .find(|snapshot| snapshot.id == id)
    }

    /// Orientation of a pooled monster.
    #[must_use]
    pub fn monster_facing(world: &World, id: MonsterId) -> Option<Facing> {
        Side::ALL
            .into_iter()
            .find_map(|side| world.zone(side).monster(id))
            .map(|monster| monster.facing())
    }

    /// Number of pooled slots ever created for a template in a zone.
    #[must_use]
    pub fn pool_size(world: &World, side: Side, template: MonsterTemplateId) -> usize {
        world.zone(side).pool_size(template)
    }

    /// Captures one side's board.
    #[must_use]
    pub fn grid_view(world: &World, side: Side) -> GridView {
        GridView::new(side, world.grid(side).snapshots())
    }

    /// Number of units on one side's board.
    #[must_use]
    pub fn unit_count(world: &World, side: Side) -> u32 {
        world.grid(side).unit_count()
    }

    /// Transform of one side's board.
    #[must_use]
    pub fn board_layout(world: &World, side: Side) -> BoardLayout {
        world.layout(side)
    }

    /// Captures the wave state machine.
    #[must_use]
    pub fn wave_status(world: &World) -> WaveStatus {
        let living_bosses = Side::ALL
            .into_iter()
            .flat_map(|side| world.zone(side).walking())
            .filter(|snapshot| snapshot.is_boss && snapshot.is_alive())
            .count();
        WaveStatus {
            state: world.wave.state,
            wave_level: world.wave.level,
            monster_count: world.wave.monster_count,
            living_bosses: u32::try_from(living_bosses).unwrap_or(u32::MAX),
        }
    }

    /// Phase the world is in.
    #[must_use]
    pub fn game_state(world: &World) -> GameState {
        world.wave.state
    }

    /// Whole seconds last announced for the running phase timer.
    #[must_use]
    pub fn wave_time(world: &World) -> u32 {
        world.wave.announced_seconds
    }

    /// Captures both purses and the upgrade levels.
    #[must_use]
    pub fn economy(world: &World) -> EconomySnapshot {
        world.economy.snapshot()
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
