use std::sync::{Mutex, PoisonError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RebuildState {
    Idle,
    Running,
}

/// At most one rebuild per primitive. Losers are told so and nothing queues.
#[derive(Debug)]
pub struct RebuildGuard {
    state: Mutex<RebuildState>,
}

impl Default for RebuildGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl RebuildGuard {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RebuildState::Idle),
        }
    }

    /// Moves `Idle -> Running`; `None` if a rebuild already holds the guard.
    pub fn try_begin(&self) -> Option<RebuildTicket<'_>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state == RebuildState::Running {
            return None;
        }
        *state = RebuildState::Running;
        Some(RebuildTicket { guard: self })
    }

    pub fn state(&self) -> RebuildState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state() == RebuildState::Running
    }
}

/// Proof of a running rebuild. Dropping it returns the guard to `Idle`,
/// including on unwind.
#[derive(Debug)]
pub struct RebuildTicket<'a> {
    guard: &'a RebuildGuard,
}

impl Drop for RebuildTicket<'_> {
    fn drop(&mut self) {
        *self
            .guard
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = RebuildState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_fails_until_ticket_drops() {
        let g = RebuildGuard::new();
        let t = g.try_begin().expect("idle guard");
        assert!(g.is_running());
        assert!(g.try_begin().is_none());
        drop(t);
        assert_eq!(g.state(), RebuildState::Idle);
        assert!(g.try_begin().is_some());
        assert_eq!(g.state(), RebuildState::Idle);
    }

    #[test]
    fn ticket_released_on_panic() {
        let g = RebuildGuard::new();
        let r = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _t = g.try_begin().unwrap();
            panic!("rebuild failed");
        }));
        assert!(r.is_err());
        assert!(!g.is_running());
    }
}
