use std::{collections::VecDeque, time::Duration};

use merge_defence_core::{Command, MonsterTemplateId, Side};

/// Pending spawns released one interval apart, the first one immediately.
#[derive(Clone, Debug, Default)]
pub(crate) struct SpawnQueue {
    pending: VecDeque<(Side, MonsterTemplateId)>,
    interval: Duration,
    accumulator: Duration,
}

impl SpawnQueue {
    /// Queues `count` spawns of the template alternating zones, player first.
    pub(crate) fn alternating(template: MonsterTemplateId, count: u32, interval: Duration) -> Self {
        let pending = (0..count)
            .map(|index| {
                let side = if index % 2 == 0 {
                    Side::Player
                } else {
                    Side::Opponent
                };
                (side, template)
            })
            .collect();
        Self {
            pending,
            interval,
            accumulator: interval,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn count_of(&self, template: MonsterTemplateId) -> usize {
        self.pending
            .iter()
            .filter(|(_, queued)| *queued == template)
            .count()
    }

    /// Releases every spawn that came due within `dt`.
    pub(crate) fn advance(&mut self, dt: Duration, out: &mut Vec<Command>) {
        if self.pending.is_empty() {
            return;
        }
        self.accumulator = self.accumulator.saturating_add(dt);
        if self.interval.is_zero() {
            self.accumulator = Duration::ZERO;
            out.extend(
                self.pending
                    .drain(..)
                    .map(|(side, template)| Command::SpawnMonster { side, template }),
            );
            return;
        }
        while self.accumulator >= self.interval {
            let Some((side, template)) = self.pending.pop_front() else {
                break;
            };
            self.accumulator -= self.interval;
            out.push(Command::SpawnMonster { side, template });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_spawn_is_immediate_and_sides_alternate() {
        let template = MonsterTemplateId::new(0);
        let mut queue = SpawnQueue::alternating(template, 3, Duration::from_millis(375));
        let mut out = Vec::new();

        queue.advance(Duration::ZERO, &mut out);
        assert_eq!(
            out,
            vec![Command::SpawnMonster {
                side: Side::Player,
                template,
            }]
        );

        queue.advance(Duration::from_millis(300), &mut out);
        assert_eq!(out.len(), 1);
        queue.advance(Duration::from_millis(800), &mut out);
        assert_eq!(
            out[1..],
            [
                Command::SpawnMonster {
                    side: Side::Opponent,
                    template,
                },
                Command::SpawnMonster {
                    side: Side::Player,
                    template,
                },
            ]
        );
        assert_eq!(queue.len(), 0);
    }
}
