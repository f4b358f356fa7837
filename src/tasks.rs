//! Per-screen background tasks.
//!
//! Each screen owns at most one running task. Starting a new one aborts the
//! previous task of that screen, and leaving the screen aborts whatever is
//! still running. Results carry the [`Ticket`] they were started with so a
//! result that raced an abort can be recognised and dropped.

use crate::state::Screen;
use std::collections::HashMap;
use std::future::Future;
use tokio::task::JoinHandle;

/// Identifies one spawned task.
pub type Ticket = u64;

struct Running {
    ticket: Ticket,
    handle: JoinHandle<()>,
}

/// Cancellable tasks keyed by screen.
#[derive(Default)]
pub struct ScreenTasks {
    next_ticket: Ticket,
    running: HashMap<Screen, Running>,
}

impl ScreenTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the task built by `make` for `screen`, superseding any task the
    /// screen already has.
    pub fn spawn<F, Fut>(&mut self, screen: Screen, make: F) -> Ticket
    where
        F: FnOnce(Ticket) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.cancel(screen) {
            tracing::debug!(?screen, "Superseded running task");
        }

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let handle = tokio::spawn(make(ticket));
        self.running.insert(screen, Running { ticket, handle });
        ticket
    }

    /// Abort the task of `screen`. Returns whether one was running.
    pub fn cancel(&mut self, screen: Screen) -> bool {
        match self.running.remove(&screen) {
            Some(running) => {
                running.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Abort every task.
    pub fn cancel_all(&mut self) {
        for (_, running) in self.running.drain() {
            running.handle.abort();
        }
    }

    /// Accept the result of a task. Returns false for results of tasks that
    /// were superseded or cancelled; those must be dropped.
    pub fn settle(&mut self, screen: Screen, ticket: Ticket) -> bool {
        match self.running.get(&screen) {
            Some(running) if running.ticket == ticket => {
                self.running.remove(&screen);
                true
            }
            _ => false,
        }
    }
}

impl Drop for ScreenTasks {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
