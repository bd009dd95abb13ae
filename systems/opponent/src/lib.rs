#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that plays one board on a fixed cadence.
//!
//! The loop summons, promotes the first full stack and tries the epic
//! recipes in turn. It issues the same commands a player would, leaving
//! every rule check to the world.

use std::time::Duration;

use merge_defence_core::{Command, EpicRecipe, Event, GameState, Grade, GridView, Side};
use tracing::trace;

/// Configuration parameters required to construct the opponent loop.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    side: Side,
    step_interval: Duration,
}

impl Config {
    /// Creates a new configuration playing `side` every `step_interval`.
    #[must_use]
    pub const fn new(side: Side, step_interval: Duration) -> Self {
        Self {
            side,
            step_interval,
        }
    }

    /// Pause between two actions.
    #[must_use]
    pub const fn step_interval(&self) -> Duration {
        self.step_interval
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Side::Opponent, Duration::from_millis(500))
    }
}

/// Next action of the loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Buy a normal unit.
    Summon,
    /// Promote the first full stack.
    Upgrade,
    /// Combine the first satisfiable epic recipe.
    Combine,
}

/// Opponent loop that emits grid commands for one side.
#[derive(Debug)]
pub struct Opponent {
    side: Side,
    step_interval: Duration,
    step: Step,
    wait: Duration,
}

impl Opponent {
    /// Creates a new loop that summons after its first interval.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            side: config.side,
            step_interval: config.step_interval,
            step: Step::Summon,
            wait: config.step_interval,
        }
    }

    /// Side the loop plays.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Action the loop takes once its wait elapses.
    #[must_use]
    pub const fn next_step(&self) -> Step {
        self.step
    }

    /// Consumes the tick's events and the board to emit at most one command.
    pub fn handle(
        &mut self,
        events: &[Event],
        game_state: GameState,
        grid: &GridView,
        out: &mut Vec<Command>,
    ) {
        if game_state == GameState::GameOver {
            return;
        }

        let dt = events
            .iter()
            .filter_map(|event| match event {
                Event::TimeAdvanced { dt } => Some(*dt),
                _ => None,
            })
            .fold(Duration::ZERO, Duration::saturating_add);
        if dt.is_zero() {
            return;
        }

        self.wait = self.wait.saturating_sub(dt);
        if !self.wait.is_zero() {
            return;
        }

        let side = self.side;
        loop {
            match self.step {
                Step::Summon => {
                    out.push(Command::Summon {
                        side,
                        grade: Grade::Normal,
                    });
                    self.pause(Step::Upgrade);
                    return;
                }
                Step::Upgrade => {
                    if let Some(command) = promotion(side, grid) {
                        out.push(command);
                    }
                    self.pause(Step::Combine);
                    return;
                }
                Step::Combine => {
                    let recipe = EpicRecipe::ALL
                        .into_iter()
                        .find(|recipe| grid.recipe_cells(*recipe).is_some());
                    match recipe {
                        Some(recipe) => {
                            trace!(?side, ?recipe, "combining");
                            out.push(Command::CombineEpic { side, recipe });
                            self.pause(Step::Summon);
                            return;
                        }
                        None => self.step = Step::Summon,
                    }
                }
            }
        }
    }

    fn pause(&mut self, next: Step) {
        self.step = next;
        self.wait = self.step_interval;
    }
}

fn promotion(side: Side, grid: &GridView) -> Option<Command> {
    let cell = grid.first_promotable()?;
    let target = grid.stack(cell)?.kind?.grade().successor()?;
    trace!(?side, ?cell, ?target, "promoting");
    Some(Command::PromoteStack { side, cell, target })
}
