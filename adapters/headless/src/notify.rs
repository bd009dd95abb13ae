use std::fmt;

use merge_defence_core::{Event, Side};
use serde::Serialize;

/// Counter changes a presentation layer displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// A purse changed.
    Gold {
        /// Owner of the purse.
        side: Side,
        /// New balance.
        amount: u32,
    },
    /// The gem balance changed.
    Gem {
        /// New balance.
        amount: u32,
    },
    /// The number of units on a board changed.
    UnitCount {
        /// Board that changed.
        side: Side,
        /// Units on the board.
        count: u32,
    },
    /// The number of alive monsters changed.
    MonsterCount {
        /// Monsters alive across both zones.
        count: u32,
        /// Overflow threshold.
        max: u32,
    },
    /// The wave level changed.
    WaveLevel {
        /// New level.
        level: u32,
    },
    /// The phase timer ticked over a whole second.
    WaveTime {
        /// Remaining whole seconds.
        seconds: u32,
    },
    /// The run ended.
    GameOver {
        /// Wave level reached.
        wave_level: u32,
    },
}

impl Notification {
    /// Extracts the notification an event carries, if any.
    #[must_use]
    pub fn from_event(event: &Event) -> Option<Self> {
        let notification = match *event {
            Event::GoldChanged { side, amount } => Notification::Gold { side, amount },
            Event::GemChanged { amount } => Notification::Gem { amount },
            Event::UnitCountChanged { side, count } => Notification::UnitCount { side, count },
            Event::MonsterCountChanged { count, max } => Notification::MonsterCount { count, max },
            Event::WaveLevelChanged { level } => Notification::WaveLevel { level },
            Event::WaveTimeChanged { seconds } => Notification::WaveTime { seconds },
            Event::GameOver { wave_level } => Notification::GameOver { wave_level },
            _ => return None,
        };
        Some(notification)
    }
}

/// Handle returned by [`Notifier::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&Notification)>;

/// Ordered observer list.
///
/// Observers are called synchronously in subscription order.
#[derive(Default)]
pub struct Notifier {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer)>,
}

impl Notifier {
    /// Registers an observer and returns the handle that removes it.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&Notification) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer, reporting whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(registered, _)| *registered != id);
        self.observers.len() != before
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Reports whether nobody is listening.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Delivers the notifications carried by `events` in emission order.
    pub fn publish(&mut self, events: &[Event]) {
        if self.observers.is_empty() {
            return;
        }
        for notification in events.iter().filter_map(Notification::from_event) {
            for (_, observer) in &mut self.observers {
                observer(&notification);
            }
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("next_id", &self.next_id)
            .field("observers", &self.observers.len())
            .finish()
    }
}
