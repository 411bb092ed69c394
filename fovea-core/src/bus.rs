use crate::notification::Notification;
use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::{Duration, Instant};

/// Publishing side of the notification bus. Cheap to clone; one copy per
/// plugin.
#[derive(Clone)]
pub struct BusHandle {
    tx: Sender<Notification>,
}

impl BusHandle {
    /// Fire-and-forget publish. A bus that is already gone drops the message.
    pub fn publish(&self, notification: Notification) {
        let _ = self.tx.send(notification);
    }
}

struct Pending {
    due_at: Instant,
    seq: u64,
    notification: Notification,
}

/// Receiving side of the bus: orders publications and holds delayed
/// notifications back until their deadline. Time is always passed in, so
/// delivery can be driven (and tested) without a wall clock.
pub struct NotificationBus {
    rx: Receiver<Notification>,
    inbox: VecDeque<Notification>,
    pending: Vec<Pending>,
    seq: u64,
    disconnected: bool,
}

impl NotificationBus {
    pub fn channel() -> (BusHandle, NotificationBus) {
        let (tx, rx) = mpsc::channel();
        (
            BusHandle { tx },
            NotificationBus {
                rx,
                inbox: VecDeque::new(),
                pending: Vec::new(),
                seq: 0,
                disconnected: false,
            },
        )
    }

    /// Drains everything published so far and returns the notifications due
    /// at `now`, in publication order. A delayed notification is delivered at
    /// the first pump whose `now` has reached its deadline.
    pub fn pump(&mut self, now: Instant) -> Vec<Notification> {
        while let Some(notification) = self.inbox.pop_front() {
            self.enqueue(now, notification);
        }
        loop {
            match self.rx.try_recv() {
                Ok(notification) => self.enqueue(now, notification),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.disconnected = true;
                    break;
                }
            }
        }

        let (due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due_at <= now);
        self.pending = pending;

        let mut due = due;
        due.sort_by_key(|p| (p.due_at, p.seq));
        due.into_iter().map(|p| p.notification).collect()
    }

    fn enqueue(&mut self, now: Instant, notification: Notification) {
        let due_at = match notification.delay() {
            Some(delay) => now + delay,
            None => now,
        };
        self.seq += 1;
        self.pending.push(Pending {
            due_at,
            seq: self.seq,
            notification,
        });
    }

    /// Blocks for up to `timeout` waiting for a publication, buffering it for
    /// the next pump. Returns as soon as one arrives.
    pub fn wait(&mut self, timeout: Duration) {
        match self.rx.recv_timeout(timeout) {
            Ok(notification) => self.inbox.push_back(notification),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => self.disconnected = true,
        }
    }

    /// Earliest deadline among held-back notifications.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due_at).min()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty() || !self.inbox.is_empty()
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}
