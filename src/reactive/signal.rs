//! Signals and the thread-local reactive runtime.
//!
//! Single-threaded, synchronous reactivity: signals store values, effects
//! auto-track the signals they read and re-run when one of them is written.
//! Slots live in `slotmap` arenas, so ids of disposed signals and effects go
//! inert instead of aliasing a newer slot.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

use slotmap::{new_key_type, SlotMap};

// ---------------------------------------------------------------------------
// IDs
// ---------------------------------------------------------------------------

new_key_type! {
    /// Identifies a signal slot inside the runtime.
    pub struct SignalId;
    /// Identifies an effect slot inside the runtime.
    pub struct EffectId;
}

// ---------------------------------------------------------------------------
// Runtime internals
// ---------------------------------------------------------------------------

struct SignalState {
    value: Box<dyn Any>,
    subscribers: HashSet<EffectId>,
}

struct EffectState {
    /// Taken out while the effect runs so no runtime borrow is held across
    /// the user callback.
    callback: Option<Box<dyn FnMut()>>,
    dependencies: HashSet<SignalId>,
}

struct Runtime {
    signals: SlotMap<SignalId, SignalState>,
    effects: SlotMap<EffectId, EffectState>,
    /// The effect currently executing (for auto-tracking).
    tracking: Option<EffectId>,
    /// > 0 inside `batch()`; effects are deferred until it drops to 0.
    batch_depth: usize,
    pending_effects: Vec<EffectId>,
    /// Set while the notification loop runs; nested writes queue instead of
    /// recursing.
    running_effects: bool,
}

impl Runtime {
    fn new() -> Self {
        Self {
            signals: SlotMap::with_key(),
            effects: SlotMap::with_key(),
            tracking: None,
            batch_depth: 0,
            pending_effects: Vec::new(),
            running_effects: false,
        }
    }
}

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::new());
}

// ---------------------------------------------------------------------------
// Signal creation
// ---------------------------------------------------------------------------

/// Create a reactive signal with the given initial value.
///
/// Returns a `(ReadSignal<T>, WriteSignal<T>)` pair. Reading inside an effect
/// subscribes that effect to later writes.
pub fn create_signal<T: 'static>(initial: T) -> (ReadSignal<T>, WriteSignal<T>) {
    let id = RUNTIME.with(|rt| {
        rt.borrow_mut().signals.insert(SignalState {
            value: Box::new(initial),
            subscribers: HashSet::new(),
        })
    });

    (
        ReadSignal {
            id,
            _marker: PhantomData,
        },
        WriteSignal {
            id,
            _marker: PhantomData,
        },
    )
}

/// Drop a signal's value. Later reads see nothing and writes are ignored.
pub fn dispose_signal(id: SignalId) {
    RUNTIME.with(|rt| {
        let mut rt_ref = rt.borrow_mut();
        if let Some(state) = rt_ref.signals.remove(id) {
            for eid in state.subscribers {
                if let Some(effect) = rt_ref.effects.get_mut(eid) {
                    effect.dependencies.remove(&id);
                }
            }
        }
    });
}

/// Number of live signals on this thread.
pub fn signal_count() -> usize {
    RUNTIME.with(|rt| rt.borrow().signals.len())
}

// ---------------------------------------------------------------------------
// ReadSignal
// ---------------------------------------------------------------------------

/// Read-half of a signal. `Copy`; only stores an id.
pub struct ReadSignal<T: 'static> {
    id: SignalId,
    _marker: PhantomData<T>,
}

impl<T: 'static> Copy for ReadSignal<T> {}
impl<T: 'static> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> fmt::Debug for ReadSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadSignal").field("id", &self.id).finish()
    }
}

impl<T: 'static> ReadSignal<T> {
    pub fn id(&self) -> SignalId {
        self.id
    }

    /// Read the current value, subscribing the running effect (if any).
    ///
    /// # Panics
    ///
    /// When the signal has been disposed.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        match self.try_get() {
            Some(value) => value,
            None => panic!("read of disposed signal {:?}", self.id),
        }
    }

    /// Read the current value, or `None` once disposed. Subscribes the running
    /// effect like [`get`](Self::get).
    pub fn try_get(&self) -> Option<T>
    where
        T: Clone,
    {
        RUNTIME.with(|rt| {
            let mut rt_ref = rt.borrow_mut();
            let tracking = rt_ref.tracking;
            let state = rt_ref.signals.get_mut(self.id)?;
            if let Some(eid) = tracking {
                state.subscribers.insert(eid);
            }
            let value = state
                .value
                .downcast_ref::<T>()
                .expect("signal type mismatch")
                .clone();
            if let Some(eid) = tracking {
                if let Some(effect) = rt_ref.effects.get_mut(eid) {
                    effect.dependencies.insert(self.id);
                }
            }
            Some(value)
        })
    }

    /// Read without tracking; never subscribes the running effect.
    pub fn get_untracked(&self) -> Option<T>
    where
        T: Clone,
    {
        RUNTIME.with(|rt| {
            let rt_ref = rt.borrow();
            let state = rt_ref.signals.get(self.id)?;
            Some(
                state
                    .value
                    .downcast_ref::<T>()
                    .expect("signal type mismatch")
                    .clone(),
            )
        })
    }
}

// ---------------------------------------------------------------------------
// WriteSignal
// ---------------------------------------------------------------------------

/// Write-half of a signal. `Copy`; only stores an id.
pub struct WriteSignal<T: 'static> {
    id: SignalId,
    _marker: PhantomData<T>,
}

impl<T: 'static> Copy for WriteSignal<T> {}
impl<T: 'static> Clone for WriteSignal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> fmt::Debug for WriteSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteSignal").field("id", &self.id).finish()
    }
}

impl<T: 'static> WriteSignal<T> {
    pub fn id(&self) -> SignalId {
        self.id
    }

    /// Overwrite the value and notify subscribers. No-op once disposed.
    pub fn set(&self, value: T) {
        let subs = RUNTIME.with(|rt| {
            let mut rt_ref = rt.borrow_mut();
            match rt_ref.signals.get_mut(self.id) {
                Some(state) => {
                    state.value = Box::new(value);
                    state.subscribers.iter().copied().collect::<Vec<_>>()
                }
                None => Vec::new(),
            }
        });
        notify_subscribers(subs);
    }

    /// Write only when the value differs from the current one.
    ///
    /// Returns whether a write (and notification) happened.
    pub fn set_if_changed(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        let changed = RUNTIME.with(|rt| {
            let rt_ref = rt.borrow();
            rt_ref
                .signals
                .get(self.id)
                .and_then(|state| state.value.downcast_ref::<T>())
                .is_some_and(|current| *current != value)
        });
        if changed {
            self.set(value);
        }
        changed
    }
}

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// Create a side effect that auto-tracks signal reads and return its id.
///
/// The closure runs once immediately, then whenever a tracked signal is
/// written, until [`dispose_effect`] is called.
pub fn create_effect_with_id(f: impl FnMut() + 'static) -> EffectId {
    let eid = RUNTIME.with(|rt| {
        rt.borrow_mut().effects.insert(EffectState {
            callback: Some(Box::new(f)),
            dependencies: HashSet::new(),
        })
    });
    run_effect(eid);
    eid
}

/// Create an effect that lives as long as the thread's runtime.
pub fn create_effect(f: impl FnMut() + 'static) {
    create_effect_with_id(f);
}

/// Stop an effect and drop its closure. Safe to call from inside the effect
/// itself and on ids that are already gone.
pub fn dispose_effect(eid: EffectId) {
    RUNTIME.with(|rt| {
        let mut rt_ref = rt.borrow_mut();
        if let Some(state) = rt_ref.effects.remove(eid) {
            for sid in state.dependencies {
                if let Some(signal) = rt_ref.signals.get_mut(sid) {
                    signal.subscribers.remove(&eid);
                }
            }
        }
    });
}

/// Number of live effects on this thread.
pub fn effect_count() -> usize {
    RUNTIME.with(|rt| rt.borrow().effects.len())
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// Run `f` with effect notifications deferred; each affected effect runs once
/// after the outermost batch returns.
pub fn batch<R>(f: impl FnOnce() -> R) -> R {
    RUNTIME.with(|rt| {
        rt.borrow_mut().batch_depth += 1;
    });

    let result = f();

    let pending = RUNTIME.with(|rt| {
        let mut rt_ref = rt.borrow_mut();
        rt_ref.batch_depth -= 1;
        if rt_ref.batch_depth == 0 {
            let mut seen = HashSet::new();
            rt_ref
                .pending_effects
                .drain(..)
                .filter(|id| seen.insert(*id))
                .collect()
        } else {
            Vec::new()
        }
    });

    notify_subscribers(pending);
    result
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Run a single effect: clear old deps, set tracking, execute callback.
fn run_effect(eid: EffectId) {
    let maybe_cb = RUNTIME.with(|rt| {
        let mut rt_ref = rt.borrow_mut();
        let effect = rt_ref.effects.get_mut(eid)?;
        let cb = effect.callback.take()?;
        let old_deps: Vec<SignalId> = effect.dependencies.drain().collect();
        for sid in old_deps {
            if let Some(signal) = rt_ref.signals.get_mut(sid) {
                signal.subscribers.remove(&eid);
            }
        }
        Some(cb)
    });

    let Some(mut cb) = maybe_cb else {
        return;
    };

    let prev_tracking = RUNTIME.with(|rt| rt.borrow_mut().tracking.replace(eid));

    cb();

    RUNTIME.with(|rt| {
        let mut rt_ref = rt.borrow_mut();
        rt_ref.tracking = prev_tracking;
        // Disposed while running: the closure is dropped here.
        if let Some(effect) = rt_ref.effects.get_mut(eid) {
            effect.callback = Some(cb);
        }
    });
}

/// Run the given effects, plus any effects their writes schedule.
fn notify_subscribers(subs: Vec<EffectId>) {
    if subs.is_empty() {
        return;
    }

    let queued = RUNTIME.with(|rt| {
        let mut rt_ref = rt.borrow_mut();
        if rt_ref.batch_depth > 0 || rt_ref.running_effects {
            rt_ref.pending_effects.extend(subs.iter().copied());
            true
        } else {
            rt_ref.running_effects = true;
            false
        }
    });
    if queued {
        return;
    }

    let mut queue = subs;
    while !queue.is_empty() {
        let mut seen = HashSet::new();
        for eid in std::mem::take(&mut queue) {
            if seen.insert(eid) {
                run_effect(eid);
            }
        }
        RUNTIME.with(|rt| {
            queue.append(&mut rt.borrow_mut().pending_effects);
        });
    }

    RUNTIME.with(|rt| {
        rt.borrow_mut().running_effects = false;
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
