#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame driver shared by every Merge Defence front end.
//!
//! [`Simulation`] owns the world and the pure systems and runs them in a
//! fixed order each frame: queued player requests, the world tick, combat,
//! the wave director, the opponent loops and finally the commands they
//! emitted. Presentation layers listen through the [`Notifier`] observer list
//! and animate the returned [`MotionRequest`] values.

mod motion;
mod notify;
mod request;
mod seed;

use std::{collections::VecDeque, time::Duration};

use merge_defence_core::{Command, Event, GameState, MonsterTemplateId, Side};
use merge_defence_system_combat::{self as combat, Combat};
use merge_defence_system_opponent::{self as opponent, Opponent};
use merge_defence_system_wave_director::{self as wave_director, Timings, WaveDirector};
use merge_defence_world::{self as world, query, SimulationConfig, World};
use tracing::{debug, trace};

pub use motion::{MotionHandle, MotionRequest};
pub use notify::{Notification, Notifier, SubscriptionId};
pub use request::PlayerRequest;
pub use seed::derive_labeled_seed;

use motion::MotionPlanner;
use seed::{COMBAT_STREAM, WORLD_STREAM};

/// Everything needed to start a run.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Run seed every random stream derives from.
    pub seed: u64,
    /// World tuning.
    pub world: SimulationConfig,
    /// Wave pacing.
    pub timings: Timings,
    /// Pause between two actions of an automated board.
    pub opponent_step: Duration,
    /// Whether the player's board is played by the opponent loop as well.
    pub autoplay: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            world: SimulationConfig::default(),
            timings: Timings::STANDARD,
            opponent_step: opponent::Config::default().step_interval(),
            autoplay: false,
        }
    }
}

/// Outcome of a single frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Every event broadcast during the frame, in emission order.
    pub events: Vec<Event>,
    /// Movements the presentation layer should animate.
    pub motions: Vec<MotionRequest>,
}

/// A running match.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    combat: Combat,
    director: WaveDirector,
    opponents: Vec<Opponent>,
    requests: VecDeque<PlayerRequest>,
    notifier: Notifier,
    planner: MotionPlanner,
}

impl Simulation {
    /// Starts a run in the loading phase.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let (normal, boss) = wave_templates(&settings.world);
        let speed = settings.world.motion.swap_speed;
        let world = World::new(
            settings.world,
            derive_labeled_seed(settings.seed, WORLD_STREAM),
        );
        let planner = MotionPlanner::new(
            query::board_layout(&world, Side::Player),
            query::board_layout(&world, Side::Opponent),
            speed,
        );

        let mut opponents = vec![Opponent::new(opponent::Config::new(
            Side::Opponent,
            settings.opponent_step,
        ))];
        if settings.autoplay {
            opponents.push(Opponent::new(opponent::Config::new(
                Side::Player,
                settings.opponent_step,
            )));
        }

        Self {
            world,
            combat: Combat::new(combat::Config::new(derive_labeled_seed(
                settings.seed,
                COMBAT_STREAM,
            ))),
            director: WaveDirector::new(wave_director::Config::new(
                normal,
                boss,
                settings.timings,
            )),
            opponents,
            requests: VecDeque::new(),
            notifier: Notifier::default(),
            planner,
        }
    }

    /// Queues a player request for the start of the next frame.
    pub fn request(&mut self, request: PlayerRequest) {
        self.requests.push_back(request);
    }

    /// Registers a presentation observer.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&Notification) + 'static,
    {
        self.notifier.subscribe(observer)
    }

    /// Removes a presentation observer, reporting whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Read-only access to the world for queries.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Reports whether the run has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        query::game_state(&self.world) == GameState::GameOver
    }

    /// Advances the run by `dt`.
    pub fn step(&mut self, dt: Duration) -> FrameReport {
        let mut events = Vec::new();

        while let Some(request) = self.requests.pop_front() {
            debug!(?request, "player request");
            world::apply(&mut self.world, request.into_command(), &mut events);
        }
        world::apply(&mut self.world, Command::Tick { dt }, &mut events);

        let mut commands = Vec::new();
        let game_state = query::game_state(&self.world);
        self.combat.handle(
            &events,
            game_state,
            &query::unit_view(&self.world),
            &query::monster_view(&self.world),
            &mut commands,
        );
        self.director
            .handle(&events, query::wave_status(&self.world), &mut commands);
        for opponent in &mut self.opponents {
            let grid = query::grid_view(&self.world, opponent.side());
            opponent.handle(&events, game_state, &grid, &mut commands);
        }

        trace!(
            tick = query::tick_index(&self.world),
            commands = commands.len(),
            "applying system commands"
        );
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }

        self.notifier.publish(&events);
        let mut motions = Vec::new();
        self.planner.plan(&events, &mut motions);
        FrameReport { events, motions }
    }
}

fn wave_templates(config: &SimulationConfig) -> (MonsterTemplateId, MonsterTemplateId) {
    let templates = &config.monsters.templates;
    let first = |boss: bool| {
        templates
            .iter()
            .find(|entry| entry.is_boss == boss)
            .map(|entry| entry.template().id)
    };
    (
        first(false).unwrap_or(MonsterTemplateId::new(0)),
        first(true).unwrap_or(MonsterTemplateId::new(1)),
    )
}
