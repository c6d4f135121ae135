//! Composite lifecycle: one-shot synchronization from the host value.
//!
//! A composite picker moves through `Uninitialized -> Synchronizing -> Live`
//! exactly once, and to `Unmounted` when torn down. Outbound changes are only
//! allowed while `Live`. The transition never runs backwards: a second inbound
//! value does not re-synchronize.

use std::cell::Cell;
use std::rc::Rc;

// ---------------------------------------------------------------------------
// SyncPhase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncPhase {
    /// Constructed, no host value received yet.
    Uninitialized,
    /// Columns are being initialized from the host value; emission muted.
    Synchronizing,
    /// Column changes are reported to the host.
    Live,
    /// Torn down; nothing is reported any more.
    Unmounted,
}

/// Events recorded by [`Lifecycle`], drained by the owner or by tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The first host value arrived and synchronization started.
    Mount,
    /// Synchronization finished; changes are now reported.
    Live,
    /// A later host value arrived and was not applied.
    ResyncIgnored,
    /// The composite was torn down.
    Unmount,
}

// ---------------------------------------------------------------------------
// PhaseHandle
// ---------------------------------------------------------------------------

/// Shared read access to a composite's phase, for use inside effects.
#[derive(Debug, Clone)]
pub struct PhaseHandle(Rc<Cell<SyncPhase>>);

impl PhaseHandle {
    pub fn get(&self) -> SyncPhase {
        self.0.get()
    }

    pub fn is_live(&self) -> bool {
        self.0.get() == SyncPhase::Live
    }
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Phase tracker for one composite instance.
#[derive(Debug)]
pub struct Lifecycle {
    phase: Rc<Cell<SyncPhase>>,
    pending: Vec<LifecycleEvent>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: Rc::new(Cell::new(SyncPhase::Uninitialized)),
            pending: Vec::new(),
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase.get()
    }

    pub fn handle(&self) -> PhaseHandle {
        PhaseHandle(Rc::clone(&self.phase))
    }

    pub fn is_live(&self) -> bool {
        self.phase.get() == SyncPhase::Live
    }

    /// Enter `Synchronizing` if no host value has been applied yet.
    ///
    /// Returns `false` (and records [`LifecycleEvent::ResyncIgnored`] when
    /// already live) if the caller must not apply the value.
    pub fn begin_sync(&mut self) -> bool {
        match self.phase.get() {
            SyncPhase::Uninitialized => {
                self.phase.set(SyncPhase::Synchronizing);
                self.pending.push(LifecycleEvent::Mount);
                true
            }
            SyncPhase::Live => {
                self.pending.push(LifecycleEvent::ResyncIgnored);
                false
            }
            SyncPhase::Synchronizing | SyncPhase::Unmounted => false,
        }
    }

    /// Leave `Synchronizing` for `Live`. No-op in any other phase.
    pub fn finish_sync(&mut self) {
        if self.phase.get() == SyncPhase::Synchronizing {
            self.phase.set(SyncPhase::Live);
            self.pending.push(LifecycleEvent::Live);
        }
    }

    /// Enter `Unmounted`. Idempotent.
    pub fn unmount(&mut self) {
        if self.phase.get() != SyncPhase::Unmounted {
            self.phase.set(SyncPhase::Unmounted);
            self.pending.push(LifecycleEvent::Unmount);
        }
    }

    /// Drain and return the recorded events.
    pub fn pending_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.pending)
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_uninitialized() {
        let lc = Lifecycle::new();
        assert_eq!(lc.phase(), SyncPhase::Uninitialized);
        assert!(!lc.is_live());
    }

    #[test]
    fn one_way_to_live() {
        let mut lc = Lifecycle::new();
        assert!(lc.begin_sync());
        assert_eq!(lc.phase(), SyncPhase::Synchronizing);
        lc.finish_sync();
        assert!(lc.is_live());
        assert_eq!(
            lc.pending_events(),
            vec![LifecycleEvent::Mount, LifecycleEvent::Live]
        );
    }

    #[test]
    fn second_sync_is_refused() {
        let mut lc = Lifecycle::new();
        lc.begin_sync();
        lc.finish_sync();
        let _ = lc.pending_events();

        assert!(!lc.begin_sync());
        assert!(lc.is_live());
        assert_eq!(lc.pending_events(), vec![LifecycleEvent::ResyncIgnored]);
    }

    #[test]
    fn finish_without_begin_is_noop() {
        let mut lc = Lifecycle::new();
        lc.finish_sync();
        assert_eq!(lc.phase(), SyncPhase::Uninitialized);
        assert!(lc.pending_events().is_empty());
    }

    #[test]
    fn handle_sees_phase_changes() {
        let mut lc = Lifecycle::new();
        let handle = lc.handle();
        assert!(!handle.is_live());
        lc.begin_sync();
        lc.finish_sync();
        assert!(handle.is_live());
        lc.unmount();
        assert_eq!(handle.get(), SyncPhase::Unmounted);
    }

    #[test]
    fn unmount_is_idempotent_and_final() {
        let mut lc = Lifecycle::new();
        lc.unmount();
        lc.unmount();
        assert!(!lc.begin_sync());
        assert_eq!(lc.pending_events(), vec![LifecycleEvent::Unmount]);
    }
}
