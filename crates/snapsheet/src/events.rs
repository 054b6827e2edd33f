//! Host callbacks.
//!
//! The engine never calls host code directly. It posts [`SheetEvent`]s into a
//! mailbox and the host drains them through an [`EventReceiver`] whenever it
//! is ready, possibly on another thread.

use snapsheet_core::Inbox;

use crate::types::SnapPointKind;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SheetEvent {
    /// The committed index changed; `-1` means closed.
    Change {
        index: i32,
        position: f32,
        kind: SnapPointKind,
    },
    /// A transition toward a different index started.
    Animate { from_index: i32, to_index: i32 },
    Close,
}

/// Receives dispatched events. Every method defaults to doing nothing.
pub trait SheetHandler {
    fn on_change(&mut self, _index: i32, _position: f32, _kind: SnapPointKind) {}
    fn on_animate(&mut self, _from_index: i32, _to_index: i32) {}
    fn on_close(&mut self) {}
}

#[derive(Clone)]
pub struct EventReceiver {
    inbox: Inbox<SheetEvent>,
}

impl EventReceiver {
    pub(crate) fn new(inbox: Inbox<SheetEvent>) -> Self {
        Self { inbox }
    }

    /// Take all pending events without dispatching them.
    pub fn drain(&self) -> Vec<SheetEvent> {
        self.inbox.drain()
    }

    pub fn pending(&self) -> usize {
        self.inbox.len()
    }

    /// Deliver pending events in posting order; returns how many were handled.
    pub fn dispatch(&self, handler: &mut impl SheetHandler) -> usize {
        let events = self.inbox.drain();
        for event in &events {
            match *event {
                SheetEvent::Change {
                    index,
                    position,
                    kind,
                } => handler.on_change(index, position, kind),
                SheetEvent::Animate {
                    from_index,
                    to_index,
                } => handler.on_animate(from_index, to_index),
                SheetEvent::Close => handler.on_close(),
            }
        }
        events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapsheet_core::mailbox;

    #[derive(Default)]
    struct Log {
        changes: Vec<i32>,
        closes: usize,
    }

    impl SheetHandler for Log {
        fn on_change(&mut self, index: i32, _position: f32, _kind: SnapPointKind) {
            self.changes.push(index);
        }

        fn on_close(&mut self) {
            self.closes += 1;
        }
    }

    #[test]
    fn dispatch_routes_and_skips_unhandled() {
        let (tx, rx) = mailbox();
        let receiver = EventReceiver::new(rx);
        tx.post(SheetEvent::Animate {
            from_index: 0,
            to_index: -1,
        });
        tx.post(SheetEvent::Change {
            index: -1,
            position: 800.0,
            kind: SnapPointKind::Provided,
        });
        tx.post(SheetEvent::Close);

        let mut log = Log::default();
        assert_eq!(receiver.dispatch(&mut log), 3);
        assert_eq!(log.changes, vec![-1]);
        assert_eq!(log.closes, 1);
        assert_eq!(receiver.pending(), 0);
    }

    #[test]
    fn receiver_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EventReceiver>();
    }
}
