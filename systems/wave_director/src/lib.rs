#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that sequences loading, waves, boss fights and rewards.
//!
//! The director runs one handler per game state. A handler owns a phase
//! timer and a spawn queue, announces the timer's whole seconds and, once it
//! ends, issues the state transition. The next handler starts on the
//! following tick for whatever state the world then reports.

mod countdown;
mod queue;

use std::time::Duration;

use merge_defence_core::{
    Command, Event, GameState, MonsterTemplateId, WaveStatus, MONSTER_LIMIT,
};
use tracing::debug;

use countdown::{Countdown, SecondChange};
use queue::SpawnQueue;

/// Every this many levels a wave is followed by a boss fight.
const BOSS_LEVEL_PERIOD: u32 = 10;

/// Durations and spawn counts of every phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    /// Countdown before the first wave.
    pub loading: Duration,
    /// Length of a regular wave.
    pub wave: Duration,
    /// Time the players have to kill the bosses.
    pub boss: Duration,
    /// Break after a boss fight.
    pub reward: Duration,
    /// Gap between two queued spawns.
    pub spawn_interval: Duration,
    /// Normal monsters queued per wave.
    pub wave_spawns: u32,
    /// Bosses queued per boss fight.
    pub boss_spawns: u32,
    /// Whole second at which the next-wave countdown starts.
    pub next_wave_mark: u64,
}

impl Timings {
    /// Standard pacing of a match.
    pub const STANDARD: Self = Self {
        loading: Duration::from_secs(4),
        wave: Duration::from_secs(20),
        boss: Duration::from_secs(60),
        reward: Duration::from_secs(15),
        spawn_interval: Duration::from_millis(375),
        wave_spawns: 40,
        boss_spawns: 2,
        next_wave_mark: 5,
    };
}

impl Default for Timings {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Configuration parameters required to construct the wave director.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    normal: MonsterTemplateId,
    boss: MonsterTemplateId,
    timings: Timings,
}

impl Config {
    /// Creates a new configuration spawning the provided templates.
    #[must_use]
    pub const fn new(
        normal: MonsterTemplateId,
        boss: MonsterTemplateId,
        timings: Timings,
    ) -> Self {
        Self {
            normal,
            boss,
            timings,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            MonsterTemplateId::new(0),
            MonsterTemplateId::new(1),
            Timings::STANDARD,
        )
    }
}

#[derive(Clone, Debug)]
struct Handler {
    state: GameState,
    countdown: Countdown,
    spawns: SpawnQueue,
    next_wave_mark: Option<u64>,
}

/// Wave director that turns elapsed time into spawns and state transitions.
#[derive(Debug)]
pub struct WaveDirector {
    config: Config,
    handler: Option<Handler>,
}

impl WaveDirector {
    /// Creates a new director waiting for its first tick.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            handler: None,
        }
    }

    /// Consumes the tick's events and the wave snapshot to emit commands.
    pub fn handle(&mut self, events: &[Event], status: WaveStatus, out: &mut Vec<Command>) {
        if status.state == GameState::GameOver {
            self.handler = None;
            return;
        }

        let mut elapsed = None;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                elapsed = Some(elapsed.unwrap_or(Duration::ZERO).saturating_add(*dt));
            }
        }
        let Some(dt) = elapsed else {
            return;
        };

        if status.state == GameState::Wave && status.monster_count >= MONSTER_LIMIT {
            debug!(monster_count = status.monster_count, "monster limit reached");
            self.handler = None;
            out.push(Command::SetGameState {
                state: GameState::GameOver,
            });
            return;
        }

        let running = self
            .handler
            .as_mut()
            .filter(|handler| handler.state == status.state);
        let Some(handler) = running else {
            self.start(status, out);
            return;
        };

        handler.spawns.advance(dt, out);
        let change = handler.countdown.advance(dt);
        if let Some(change) = change {
            announce(handler, change, out);
        }

        let queued_bosses = handler.spawns.count_of(self.config.boss);
        let bosses_left = status.living_bosses as usize + queued_bosses;
        let boss_cleared =
            handler.state == GameState::Boss && change.is_some() && bosses_left == 0;
        if handler.countdown.is_expired() || boss_cleared {
            self.finish(status, bosses_left, out);
        }
    }

    fn start(&mut self, status: WaveStatus, out: &mut Vec<Command>) {
        let timings = self.config.timings;
        let interval = timings.spawn_interval;
        let mark = Some(timings.next_wave_mark);
        let (duration, spawns, next_wave_mark) = match status.state {
            GameState::Loading => (timings.loading, SpawnQueue::default(), None),
            GameState::Wave => (
                timings.wave,
                SpawnQueue::alternating(self.config.normal, timings.wave_spawns, interval),
                mark,
            ),
            GameState::Boss => (
                timings.boss,
                SpawnQueue::alternating(self.config.boss, timings.boss_spawns, interval),
                None,
            ),
            GameState::Reward => (timings.reward, SpawnQueue::default(), mark),
            GameState::GameOver => return,
        };

        debug!(state = ?status.state, wave_level = status.wave_level, "wave handler started");
        let mut handler = Handler {
            state: status.state,
            countdown: Countdown::new(duration),
            spawns,
            next_wave_mark,
        };
        out.push(Command::AnnounceWaveTime {
            seconds: clamp_seconds(handler.countdown.seconds()),
        });
        handler.spawns.advance(Duration::ZERO, out);
        self.handler = Some(handler);
    }

    fn finish(&mut self, status: WaveStatus, bosses_left: usize, out: &mut Vec<Command>) {
        let Some(handler) = self.handler.take() else {
            return;
        };
        debug!(state = ?handler.state, wave_level = status.wave_level, "wave handler finished");

        match handler.state {
            GameState::Loading => {
                out.push(Command::AdvanceWaveLevel);
                out.push(Command::SetGameState {
                    state: GameState::Wave,
                });
            }
            GameState::Wave => {
                out.push(Command::AdvanceWaveLevel);
                if status.wave_level % BOSS_LEVEL_PERIOD == 0 {
                    out.push(Command::SetGameState {
                        state: GameState::Boss,
                    });
                }
            }
            GameState::Boss => {
                let next = if bosses_left > 0 {
                    GameState::GameOver
                } else {
                    GameState::Reward
                };
                out.push(Command::SetGameState { state: next });
            }
            GameState::Reward => out.push(Command::SetGameState {
                state: GameState::Wave,
            }),
            GameState::GameOver => {}
        }
    }

    /// State whose handler is running, if any.
    #[must_use]
    pub fn running(&self) -> Option<GameState> {
        self.handler.as_ref().map(|handler| handler.state)
    }

    /// Time left on the running handler's timer.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.handler
            .as_ref()
            .map(|handler| handler.countdown.remaining())
    }

    /// Spawns still queued by the running handler.
    #[must_use]
    pub fn pending_spawns(&self) -> usize {
        self.handler
            .as_ref()
            .map_or(0, |handler| handler.spawns.len())
    }
}

fn announce(handler: &Handler, change: SecondChange, out: &mut Vec<Command>) {
    out.push(Command::AnnounceWaveTime {
        seconds: clamp_seconds(change.to),
    });
    if let Some(mark) = handler.next_wave_mark {
        if change.from >= mark && change.to < mark {
            out.push(Command::StartNextWaveCountdown);
        }
    }
}

fn clamp_seconds(seconds: u64) -> u32 {
    u32::try_from(seconds).unwrap_or(u32::MAX)
}
