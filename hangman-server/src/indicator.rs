use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct FlagState {
    active: bool,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

/// A flag that switches itself off a fixed time after the last trigger.
///
/// Triggering again while raised aborts the pending timer and starts a new one,
/// so an older trigger can never lower the flag early.
#[derive(Debug)]
pub struct TransientFlag {
    duration: Duration,
    state: Arc<Mutex<FlagState>>,
}

fn lock(state: &Mutex<FlagState>) -> MutexGuard<'_, FlagState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TransientFlag {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            state: Arc::new(Mutex::new(FlagState::default())),
        }
    }

    /// Raise the flag. `on_expire` runs once the flag drops back, unless a
    /// later trigger or a cancel replaced this one first. Must be called from
    /// within a tokio runtime.
    pub fn trigger<F>(&self, on_expire: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut state = lock(&self.state);
        state.generation += 1;
        state.active = true;
        if let Some(previous) = state.timer.take() {
            previous.abort();
        }

        let generation = state.generation;
        let shared = self.state.clone();
        let duration = self.duration;
        state.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let expired = {
                let mut state = lock(&shared);
                if state.generation == generation {
                    state.active = false;
                    state.timer = None;
                    true
                } else {
                    false
                }
            };
            if expired {
                on_expire.await;
            }
        }));
    }

    /// Lower the flag now without running the pending callback
    pub fn cancel(&self) {
        let mut state = lock(&self.state);
        state.generation += 1;
        state.active = false;
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        lock(&self.state).active
    }
}

impl Drop for TransientFlag {
    fn drop(&mut self) {
        if let Some(timer) = lock(&self.state).timer.take() {
            timer.abort();
        }
    }
}
