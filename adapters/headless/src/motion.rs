use std::time::Duration;

use glam::Vec2;
use merge_defence_core::{
    saturating_seconds, BoardLayout, CellIndex, Event, MonsterId, Side, UnitId, WorldPoint,
};

/// Object a motion request moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionHandle {
    /// A single unit.
    Unit(UnitId),
    /// Every unit of the stack now held by the cell.
    Stack {
        /// Board holding the cell.
        side: Side,
        /// Cell the stack moved into.
        cell: CellIndex,
    },
    /// Projectile of a basic attack, spawned at the attacker's cell anchor.
    Projectile {
        /// Attacking unit.
        unit: UnitId,
        /// Monster the projectile flies to.
        monster: MonsterId,
    },
}

/// Fire-and-forget movement handed to the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionRequest {
    /// Straight travel from the current position.
    Linear {
        /// Object to move.
        handle: MotionHandle,
        /// Final position.
        destination: Vec2,
        /// Travel time.
        duration: Duration,
    },
    /// Quadratic bezier flight through three control points.
    Curved {
        /// Object to move.
        handle: MotionHandle,
        /// Start, apex and destination.
        path: [Vec2; 3],
        /// Flight time.
        duration: Duration,
    },
}

impl MotionRequest {
    /// Object the request moves.
    #[must_use]
    pub const fn handle(&self) -> MotionHandle {
        match self {
            MotionRequest::Linear { handle, .. } | MotionRequest::Curved { handle, .. } => *handle,
        }
    }

    /// Travel time of the request.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        match self {
            MotionRequest::Linear { duration, .. } | MotionRequest::Curved { duration, .. } => {
                *duration
            }
        }
    }

    /// Position after `elapsed`, starting from `start` for linear travel.
    ///
    /// Curved flights ignore `start` and follow their control points.
    #[must_use]
    pub fn sample(&self, start: Vec2, elapsed: Duration) -> Vec2 {
        let duration = self.duration();
        let progress = if duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
        };
        match self {
            MotionRequest::Linear { destination, .. } => start.lerp(*destination, progress),
            MotionRequest::Curved { path, .. } => quadratic_bezier(*path, progress),
        }
    }
}

fn quadratic_bezier([p0, p1, p2]: [Vec2; 3], t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

fn vec2(point: WorldPoint) -> Vec2 {
    Vec2::new(point.x, point.y)
}

/// Translates board events into motion requests.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MotionPlanner {
    player: BoardLayout,
    opponent: BoardLayout,
    speed: f32,
}

impl MotionPlanner {
    pub(crate) const fn new(player: BoardLayout, opponent: BoardLayout, speed: f32) -> Self {
        Self {
            player,
            opponent,
            speed,
        }
    }

    fn anchor(&self, side: Side, cell: CellIndex) -> WorldPoint {
        match side {
            Side::Player => self.player.cell_anchor(cell),
            Side::Opponent => self.opponent.cell_anchor(cell),
        }
    }

    fn travel(&self, from: WorldPoint, to: WorldPoint) -> Duration {
        if self.speed <= 0.0 {
            return Duration::ZERO;
        }
        saturating_seconds(from.distance(to) / self.speed)
    }

    pub(crate) fn plan(&self, events: &[Event], out: &mut Vec<MotionRequest>) {
        for event in events {
            match *event {
                Event::SummonLaunched {
                    unit,
                    path,
                    duration,
                    ..
                } => out.push(MotionRequest::Curved {
                    handle: MotionHandle::Unit(unit),
                    path: path.map(vec2),
                    duration,
                }),
                Event::CellsSwapped {
                    side,
                    first,
                    second,
                    into_first,
                    into_second,
                } => {
                    for (cell, duration) in [(first, into_first), (second, into_second)] {
                        if duration.is_zero() {
                            continue;
                        }
                        out.push(MotionRequest::Linear {
                            handle: MotionHandle::Stack { side, cell },
                            destination: vec2(self.anchor(side, cell)),
                            duration,
                        });
                    }
                }
                Event::UnitPulled {
                    side,
                    from,
                    to,
                    unit,
                } => {
                    let start = self.anchor(side, from);
                    let destination = self.anchor(side, to);
                    out.push(MotionRequest::Linear {
                        handle: MotionHandle::Unit(unit),
                        destination: vec2(destination),
                        duration: self.travel(start, destination),
                    });
                }
                Event::AttackLaunched {
                    unit,
                    monster,
                    to,
                    travel,
                    ..
                } if !travel.is_zero() => out.push(MotionRequest::Linear {
                    handle: MotionHandle::Projectile { unit, monster },
                    destination: vec2(to),
                    duration: travel,
                }),
                _ => {}
            }
        }
    }
}
