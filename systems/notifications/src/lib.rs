#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Synchronous listener registry fed by world event batches.
//!
//! Listeners run on the calling thread, in registration order, while
//! [`Notifier::dispatch`] walks the batch. They receive copies of the event
//! payloads and have no access to the world, so they cannot mutate it while a
//! batch is being delivered.

use std::fmt;

use wise_mole_core::{BoxPush, CellCoord, Event, FieldSize};

type SizeListener = Box<dyn FnMut(FieldSize, FieldSize)>;
type MoleListener = Box<dyn FnMut(MoleMove)>;
type WinListener = Box<dyn FnMut(u32)>;

/// Payload delivered to mole-moved listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoleMove {
    /// Cell the mole left.
    pub from: Option<CellCoord>,
    /// Cell the mole entered.
    pub to: Option<CellCoord>,
    /// Box relocated by the transition, if any.
    pub pushed_box: Option<BoxPush>,
}

/// Registry of size-changed, mole-moved and user-won listeners.
#[derive(Default)]
pub struct Notifier {
    size_listeners: Vec<SizeListener>,
    mole_listeners: Vec<MoleListener>,
    win_listeners: Vec<WinListener>,
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("size_listeners", &self.size_listeners.len())
            .field("mole_listeners", &self.mole_listeners.len())
            .field("win_listeners", &self.win_listeners.len())
            .finish()
    }
}

impl Notifier {
    /// Creates a registry without listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener receiving `(previous, current)` field sizes.
    pub fn on_size_changed<F>(&mut self, listener: F)
    where
        F: FnMut(FieldSize, FieldSize) + 'static,
    {
        self.size_listeners.push(Box::new(listener));
    }

    /// Registers a listener invoked for every mole transition, including undo and redo.
    pub fn on_mole_moved<F>(&mut self, listener: F)
    where
        F: FnMut(MoleMove) + 'static,
    {
        self.mole_listeners.push(Box::new(listener));
    }

    /// Registers a listener receiving the step count at which the level was solved.
    pub fn on_user_won<F>(&mut self, listener: F)
    where
        F: FnMut(u32) + 'static,
    {
        self.win_listeners.push(Box::new(listener));
    }

    /// Delivers each event of the batch to the matching listeners, in order.
    ///
    /// `LevelLoaded` has no dedicated listener; a load that changes the field
    /// dimensions is announced through the `FieldResized` event preceding it.
    pub fn dispatch(&mut self, events: &[Event]) {
        for event in events {
            match *event {
                Event::FieldResized { from, to } => {
                    for listener in &mut self.size_listeners {
                        listener(from, to);
                    }
                }
                Event::MoleMoved {
                    from,
                    to,
                    pushed_box,
                } => {
                    let payload = MoleMove {
                        from,
                        to,
                        pushed_box,
                    };
                    for listener in &mut self.mole_listeners {
                        listener(payload);
                    }
                }
                Event::UserWon { steps } => {
                    for listener in &mut self.win_listeners {
                        listener(steps);
                    }
                }
                Event::LevelLoaded { .. } => {}
            }
        }
    }
}
