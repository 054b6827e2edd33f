//! One-directional, fire-and-forget message passing from the animation context
//! to host logic.
//!
//! The animation side holds an [`Outbox`] and never blocks on the receiver:
//! `post` appends to an unbounded queue and returns. The logic side drains an
//! [`Inbox`] whenever it gets around to it, on whatever thread it lives.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

type Queue<E> = Arc<Mutex<VecDeque<E>>>;

/// Create a connected outbox/inbox pair.
pub fn mailbox<E>() -> (Outbox<E>, Inbox<E>) {
    let queue: Queue<E> = Arc::new(Mutex::new(VecDeque::new()));
    (
        Outbox {
            queue: queue.clone(),
        },
        Inbox { queue },
    )
}

pub struct Outbox<E> {
    queue: Queue<E>,
}

impl<E> Clone for Outbox<E> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue.clone(),
        }
    }
}

impl<E> Outbox<E> {
    pub fn post(&self, message: E) {
        self.queue.lock().push_back(message);
    }
}

pub struct Inbox<E> {
    queue: Queue<E>,
}

impl<E> Clone for Inbox<E> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue.clone(),
        }
    }
}

impl<E> Inbox<E> {
    /// Take every pending message in posting order.
    pub fn drain(&self) -> Vec<E> {
        self.queue.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_arrive_in_order() {
        let (tx, rx) = mailbox();
        tx.post(1);
        tx.clone().post(2);
        assert_eq!(rx.len(), 2);
        assert_eq!(rx.drain(), vec![1, 2]);
        assert!(rx.is_empty());
    }

    #[test]
    fn inbox_can_live_on_another_thread() {
        let (tx, rx) = mailbox::<&'static str>();
        tx.post("change");
        let handle = std::thread::spawn(move || rx.drain());
        assert_eq!(handle.join().unwrap(), vec!["change"]);
    }
}
